//! HTTP client for the remote authentication service.
//!
//! Thin boundary over the two remote operations. Each call resolves to
//! either a structured success payload, a structured rejection (status
//! plus optional server message), or a transport-level `Err`. No retry
//! is performed here: a failed attempt requires explicit re-submission.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::session::{Credentials, LoginPayload, RegistrationProfile};

/// Outcome of one remote call, transport failures excluded (those are
/// the surrounding `Result`'s `Err`).
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Success-class HTTP status with a parsed body.
    Ok(T),
    /// Non-success HTTP status; business-level rejection.
    Rejected {
        status: u16,
        /// `message` from the failure body, when the server sent one.
        message: Option<String>,
    },
}

/// Shape of failure bodies: `{message?}`. Parsed best-effort; a
/// malformed failure body just means no message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a client against `base_url` with a bounded per-request
    /// timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// `POST /api/auth/login` with `{email, password}`.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResult<LoginPayload>> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(%url, email = %credentials.email, "sending login request");

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .context("Login request failed")?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("Failed to read login response body")?;

        if status.is_success() {
            let payload: LoginPayload = serde_json::from_slice(&body)
                .context("Login response was not valid JSON")?;
            debug!(status = status.as_u16(), "login accepted");
            Ok(ApiResult::Ok(payload))
        } else {
            let message = parse_error_message(&body);
            debug!(status = status.as_u16(), has_message = message.is_some(), "login rejected");
            Ok(ApiResult::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// `POST /api/auth/register` with the six profile fields.
    ///
    /// Normalizes the profile (trims, lowercases email) before sending.
    /// Success carries no structured payload beyond the status.
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<ApiResult<()>> {
        let url = format!("{}/api/auth/register", self.base_url);
        let body = RegisterRequest::from(profile.normalized());
        debug!(%url, email = %body.email, "sending registration request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Registration request failed")?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("Failed to read registration response body")?;

        if status.is_success() {
            debug!(status = status.as_u16(), "registration accepted");
            Ok(ApiResult::Ok(()))
        } else {
            let message = parse_error_message(&body);
            debug!(
                status = status.as_u16(),
                has_message = message.is_some(),
                "registration rejected"
            );
            Ok(ApiResult::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn parse_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

/// Wire body for registration. Field order and names match the service.
#[derive(Debug, serde::Serialize)]
struct RegisterRequest {
    name: String,
    surname: String,
    email: String,
    password: String,
    department: String,
    task: String,
}

impl From<RegistrationProfile> for RegisterRequest {
    fn from(p: RegistrationProfile) -> Self {
        Self {
            name: p.name,
            surname: p.surname,
            email: p.email,
            password: p.password,
            department: p.department,
            task: p.task,
        }
    }
}
