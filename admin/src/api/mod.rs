//! HTTP client wrapper for the hostel backend API.
//!
//! Adds the bearer credential from the session store, joins the base URL, and
//! unwraps the backend's inconsistent `{status, data|result|stats}` response
//! envelope. Endpoint groups live in the submodules.

pub mod auth;
pub mod billing;
pub mod bookings;
pub mod reports;
pub mod students;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::SessionStore;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, AppError> {
        self.execute(Method::GET, path, query, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        self.execute(Method::PATCH, path, &[], Some(body)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);

        if let Some(token) = self.session.bearer_token().await {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let value: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: extract_error_message(&value, status.as_u16()),
            });
        }

        Ok(unwrap_envelope(value))
    }
}

/// Unwrap the backend's response envelope. Payloads arrive under `data`,
/// `result`, or `stats` depending on the endpoint; anything else is returned
/// as-is.
fn unwrap_envelope(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for key in ["data", "result", "stats"] {
            if let Some(inner) = map.remove(key) {
                return inner;
            }
        }
    }
    value
}

fn extract_error_message(body: &Value, status: u16) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with HTTP {}", status))
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(AppError::from)
}
