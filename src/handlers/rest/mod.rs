use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use serde_json::{Map, Value};
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    AppState,
    dto::{ErrorResponse, SendEmailParams, SendEmailRequest, SendFailureResponse},
    error::ApiError,
    models::{AttemptRecord, DispatchResult, EmailRecord},
    normalize,
    providers::Provider,
    service::DispatchOptions,
};

#[derive(OpenApi)]
#[openapi(
    paths(send_email),
    components(schemas(
        SendEmailRequest,
        DispatchResult,
        EmailRecord,
        AttemptRecord,
        Provider,
        ErrorResponse,
        SendFailureResponse
    )),
    tags(
        (name = "email", description = "Email relay API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/email",
    params(SendEmailParams),
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email accepted by the provider", body = DispatchResult),
        (status = 400, description = "Invalid provider or missing fields", body = ErrorResponse),
        (status = 500, description = "Provider unreachable", body = ErrorResponse),
        (status = 502, description = "Provider rejected the email", body = SendFailureResponse)
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SendEmailParams>, QueryRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::Payload {
        status: e.status(),
        message: e.body_text(),
    })?;

    let provider = match params.email_provider.as_deref() {
        Some(name) => name.parse::<Provider>()?,
        None => state.default_provider,
    };

    let Json(raw) = payload.map_err(|e| ApiError::Payload {
        status: e.status(),
        message: e.body_text(),
    })?;

    normalize::validate(&raw)?;
    let record = normalize::transform(raw);

    let options = DispatchOptions {
        provider,
        retry: params.retry(),
        fallback: params.fallback(),
    };
    let result = state.service.dispatch(record, options).await?;

    let last = &result.final_attempt;
    if last.status_code != 200 {
        let message = format!(
            "The {} returned a status code of {} and a message of {}",
            last.service_name, last.status_code, last.response_body
        );
        tracing::error!("{message}. Full response: {result:?}");
        return Ok((
            StatusCode::BAD_GATEWAY,
            Json(SendFailureResponse {
                message,
                response_data: result,
            }),
        )
            .into_response());
    }

    tracing::info!("Email sent successfully. Full response: {result:?}");
    Ok((StatusCode::OK, Json(result)).into_response())
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from email relay!").into_response()
}
