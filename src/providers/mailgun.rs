use reqwest::Client;

use super::Provider;
use crate::models::{AttemptRecord, EmailRecord};

#[derive(Debug, Clone)]
pub struct Mailgun {
    api_url: String,
    domain: String,
    api_key: String,
}

impl Mailgun {
    pub fn new(api_url: &str, domain: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            domain: domain.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_url, self.domain)
    }

    pub async fn send(
        &self,
        client: &Client,
        record: &EmailRecord,
    ) -> Result<AttemptRecord, reqwest::Error> {
        let url = self.messages_url();
        let form = [
            ("from", format!("{} <{}>", record.from_name, record.from_email)),
            ("to", format!("{} <{}>", record.to_name, record.to_email)),
            ("subject", record.subject.clone()),
            ("text", record.body.clone()),
        ];

        tracing::debug!("Posting message to Mailgun at {}", url);

        let response = client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(AttemptRecord::new(status, Provider::Mailgun, body))
    }
}
