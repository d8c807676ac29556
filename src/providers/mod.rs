mod mailgun;
mod sendgrid;

pub use mailgun::Mailgun;
pub use sendgrid::Sendgrid;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use std::{fmt, str::FromStr, time::Duration};

use crate::{
    config::Config,
    error::UnknownProvider,
    models::{AttemptRecord, EmailRecord},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    #[default]
    Mailgun,
    Sendgrid,
}

impl Provider {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mailgun => "MAILGUN",
            Self::Sendgrid => "SENDGRID",
        }
    }

    pub const fn alternate(self) -> Self {
        match self {
            Self::Mailgun => Self::Sendgrid,
            Self::Sendgrid => Self::Mailgun,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MAILGUN" => Ok(Self::Mailgun),
            "SENDGRID" => Ok(Self::Sendgrid),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Both provider adapters sharing one pooled HTTP client.
#[derive(Debug, Clone)]
pub struct Providers {
    client: reqwest::Client,
    mailgun: Mailgun,
    sendgrid: Sendgrid,
}

impl Providers {
    pub fn new(cfg: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            mailgun: Mailgun::new(&cfg.mailgun_api_url, &cfg.mailgun_domain, &cfg.mailgun_api_key),
            sendgrid: Sendgrid::new(&cfg.sendgrid_api_url, &cfg.sendgrid_api_key),
        })
    }

    /// Sends one email through one provider. Non-2xx responses are returned as
    /// attempts; only transport failures are errors.
    pub async fn send(
        &self,
        provider: Provider,
        record: &EmailRecord,
    ) -> Result<AttemptRecord, reqwest::Error> {
        match provider {
            Provider::Mailgun => self.mailgun.send(&self.client, record).await,
            Provider::Sendgrid => self.sendgrid.send(&self.client, record).await,
        }
    }
}
