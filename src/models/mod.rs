use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::providers::Provider;

/// Normalized email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailRecord {
    pub to_email: String,
    pub to_name: String,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    /// Plain text, tags already stripped
    pub body: String,
}

/// Outcome of one outbound call to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttemptRecord {
    pub status_code: u16,
    pub service_name: Provider,
    pub response_body: String,
}

impl AttemptRecord {
    pub const fn new(status_code: u16, service_name: Provider, response_body: String) -> Self {
        Self {
            status_code,
            service_name,
            response_body,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status_code, 200..=299)
    }

    /// 4xx and 5xx keep the retry loop going, anything else stops it.
    pub const fn is_retryable(&self) -> bool {
        matches!(self.status_code, 400..=599)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchResult {
    pub email_data: EmailRecord,
    /// Every attempt in call order, spanning both providers on fallback
    pub attempts: Vec<AttemptRecord>,
    pub send_success: bool,
    pub final_attempt: AttemptRecord,
}
