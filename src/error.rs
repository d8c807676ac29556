use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::ErrorResponse;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Fields must be strings: {}", .0.join(", "))]
    NotAString(Vec<String>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid email provider: {0}")]
pub struct UnknownProvider(pub String);

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("transport error talking to {provider}: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("environment variables are incomplete: {0}")]
    Env(#[from] envy::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors surfaced by the REST handler, each mapped to a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Provider(#[from] UnknownProvider),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Payload { status: StatusCode, message: String },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Provider(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Payload { status, .. } => *status,
            Self::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Provider(_) => "Invalid email provider".to_string(),
            Self::Dispatch(_) => "Failed to send email".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Failed to send email: {self}");
        } else {
            tracing::error!("Rejected email request: {self}");
        }

        (
            status,
            Json(ErrorResponse {
                message: self.message(),
            }),
        )
            .into_response()
    }
}
