use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::DispatchResult;

/// Query string accepted by `POST /email`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SendEmailParams {
    /// `MAILGUN` or `SENDGRID`, case-insensitive
    #[serde(rename = "emailProvider")]
    pub email_provider: Option<String>,
    /// Retry on 4xx/5xx when `true`
    pub retry: Option<String>,
    /// Switch to the other provider when the first one fails
    #[serde(rename = "emailProviderFallback")]
    pub email_provider_fallback: Option<String>,
}

impl SendEmailParams {
    pub fn retry(&self) -> bool {
        is_true(self.retry.as_deref())
    }

    pub fn fallback(&self) -> bool {
        is_true(self.email_provider_fallback.as_deref())
    }
}

fn is_true(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Request body as documented; the handler reads it as a raw JSON object so
/// that every missing field can be reported.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendEmailRequest {
    /// Recipient address
    pub to: String,
    pub to_name: String,
    /// Sender address
    pub from: String,
    pub from_name: String,
    pub subject: String,
    /// HTML or plain text
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendFailureResponse {
    pub message: String,
    pub response_data: DispatchResult,
}
