use reqwest::Client;
use serde::Serialize;

use super::Provider;
use crate::models::{AttemptRecord, EmailRecord};

#[derive(Debug, Clone)]
pub struct Sendgrid {
    api_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct Mail<'a> {
    personalizations: [Personalization<'a>; 1],
    content: [Content<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
    subject: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

impl<'a> Mail<'a> {
    fn plain_text(record: &'a EmailRecord) -> Self {
        let sender = Address {
            email: &record.from_email,
            name: &record.from_name,
        };

        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: &record.to_email,
                    name: &record.to_name,
                }],
                subject: &record.subject,
            }],
            content: [Content {
                kind: "text/plain",
                value: &record.body,
            }],
            from: sender,
            reply_to: sender,
        }
    }
}

impl Sendgrid {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn send_url(&self) -> String {
        format!("{}/mail/send", self.api_url)
    }

    pub async fn send(
        &self,
        client: &Client,
        record: &EmailRecord,
    ) -> Result<AttemptRecord, reqwest::Error> {
        let url = self.send_url();

        tracing::debug!("Posting message to SendGrid at {}", url);

        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&Mail::plain_text(record))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(AttemptRecord::new(status, Provider::Sendgrid, body))
    }
}
