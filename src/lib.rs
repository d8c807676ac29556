//! HTTP front-end that relays a single email through Mailgun or SendGrid,
//! optionally retrying failed attempts and falling back to the other provider.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod service;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use providers::{Provider, Providers};
use service::EmailService;

/// Shared, read-only state behind every request.
pub struct AppState {
    pub service: EmailService,
    pub default_provider: Provider,
}

impl AppState {
    pub fn from_config(cfg: &config::Config) -> Result<Self, error::ConfigError> {
        let providers = Providers::new(cfg)?;
        Ok(Self {
            service: EmailService::new(providers, cfg.max_retries),
            default_provider: cfg.default_email_provider,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(rest::health_check))
        .route("/email", post(rest::send_email))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
