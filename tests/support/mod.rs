//! In-process stand-ins for the Mailgun and SendGrid HTTP APIs.
//!
//! Each stub replays a scripted list of status codes, one per request, and
//! records what it received so tests can check both the retry behaviour and
//! the exact request each adapter built.

#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use email_relay::{
    config::Config,
    models::EmailRecord,
    providers::{Provider, Providers},
    service::EmailService,
};

pub const MAILGUN_KEY: &str = "key-test";
pub const SENDGRID_KEY: &str = "SG.test";
pub const DOMAIN: &str = "mg.example.com";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub form: Vec<(String, String)>,
    pub json: Value,
}

#[derive(Default)]
struct Endpoint {
    statuses: Mutex<VecDeque<u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Endpoint {
    fn scripted(statuses: &[u16]) -> Arc<Self> {
        Arc::new(Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            requests: Mutex::default(),
        })
    }

    fn reply(&self, request: RecordedRequest) -> Response {
        self.requests.lock().unwrap().push(request);
        // An exhausted script answers 599 so over-sending shows up in assertions
        let code = self.statuses.lock().unwrap().pop_front().unwrap_or(599);
        let status = StatusCode::from_u16(code).unwrap();
        let body = if status.is_success() {
            format!("{{\"message\":\"Queued. Thank you.\",\"status\":{code}}}")
        } else {
            format!("stub error {code}")
        };
        (status, body).into_response()
    }
}

#[derive(Clone)]
struct StubState {
    mailgun: Arc<Endpoint>,
    sendgrid: Arc<Endpoint>,
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

async fn mailgun_handler(
    State(state): State<StubState>,
    Path(domain): Path<String>,
    headers: HeaderMap,
    Form(form): Form<Vec<(String, String)>>,
) -> Response {
    state.mailgun.reply(RecordedRequest {
        path: format!("/v3/{domain}/messages"),
        authorization: authorization(&headers),
        form,
        json: Value::Null,
    })
}

async fn sendgrid_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(json): Json<Value>,
) -> Response {
    state.sendgrid.reply(RecordedRequest {
        path: "/sendgrid/v3/mail/send".to_string(),
        authorization: authorization(&headers),
        form: Vec::new(),
        json,
    })
}

pub struct StubProviders {
    addr: SocketAddr,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubProviders {
    /// Starts both stubs on one ephemeral port.
    pub async fn spawn(mailgun: &[u16], sendgrid: &[u16]) -> Self {
        let state = StubState {
            mailgun: Endpoint::scripted(mailgun),
            sendgrid: Endpoint::scripted(sendgrid),
        };

        let app = Router::new()
            .route("/v3/{domain}/messages", post(mailgun_handler))
            .route("/sendgrid/v3/mail/send", post(sendgrid_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("stub provider server exited with error: {err}");
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn config(&self, max_retries: u32) -> Config {
        config_for(self.addr, max_retries)
    }

    pub fn service(&self, max_retries: u32) -> EmailService {
        let cfg = self.config(max_retries);
        EmailService::new(Providers::new(&cfg).unwrap(), cfg.max_retries)
    }

    pub fn mailgun_requests(&self) -> Vec<RecordedRequest> {
        self.state.mailgun.requests.lock().unwrap().clone()
    }

    pub fn sendgrid_requests(&self) -> Vec<RecordedRequest> {
        self.state.sendgrid.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, provider: Provider) -> Vec<RecordedRequest> {
        match provider {
            Provider::Mailgun => self.mailgun_requests(),
            Provider::Sendgrid => self.sendgrid_requests(),
        }
    }
}

impl Drop for StubProviders {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn config_for(addr: SocketAddr, max_retries: u32) -> Config {
    Config {
        mailgun_domain: DOMAIN.to_string(),
        mailgun_api_key: MAILGUN_KEY.to_string(),
        mailgun_api_url: format!("http://{addr}/v3"),
        sendgrid_api_key: SENDGRID_KEY.to_string(),
        sendgrid_api_url: format!("http://{addr}/sendgrid/v3/"),
        default_email_provider: Provider::Mailgun,
        max_retries,
        port: 0,
        request_timeout: Some(5),
    }
}

/// An address nothing listens on, for transport failures.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn record() -> EmailRecord {
    EmailRecord {
        to_email: "recipient@example.com".to_string(),
        to_name: "Recipient".to_string(),
        from_email: "sender@example.com".to_string(),
        from_name: "Sender".to_string(),
        subject: "Test Email".to_string(),
        body: "This is a test email.".to_string(),
    }
}
