//! Wire types and request builders for the users endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{HttpError, HttpRequest, HttpResponse};
use crate::config::ApiConfig;
use crate::model::{FetchedUser, Flow, NoticeKind};
use crate::password::PasswordError;

pub const EMAIL_QUERY_PARAM: &str = "email";

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Already hashed; never the typed password.
    pub password_hash: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Body of an update; the target record is named by the query string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
}

/// `user` may be null but the key must be present.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FetchUserResponse {
    #[serde(deserialize_with = "Option::deserialize")]
    pub user: Option<FetchedUser>,
}

/// `{message}` on success, `{error}` on an application-level failure.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// Text to show and how to show it. `message` wins over `error`; an
    /// empty `message` falls through like a missing one.
    pub fn notice(&self) -> (String, NoticeKind) {
        match (&self.message, &self.error) {
            (Some(message), _) if !message.is_empty() => (message.clone(), NoticeKind::Success),
            (_, Some(error)) => (error.clone(), NoticeKind::Error),
            _ => (String::new(), NoticeKind::Info),
        }
    }
}

/// Why a submitted flow did not complete.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    #[error("invalid response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl FlowError {
    /// Status-message text for a failure of `flow`.
    pub fn status_message(&self, flow: Flow) -> String {
        format!("{}: {}", flow.failure_prefix(), self)
    }
}

/// Passes 2xx responses through and turns anything else into a `FlowError`.
pub fn expect_success(response: HttpResponse) -> Result<HttpResponse, FlowError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(FlowError::Status {
            status: response.status(),
        })
    }
}

pub fn create_user(config: &ApiConfig, body: &CreateUserRequest) -> Result<HttpRequest, HttpError> {
    HttpRequest::post(config.endpoint()?).with_json(body)
}

pub fn fetch_user(config: &ApiConfig, email: &str) -> Result<HttpRequest, HttpError> {
    HttpRequest::get(config.endpoint()?).with_query(EMAIL_QUERY_PARAM, email)
}

pub fn update_user(
    config: &ApiConfig,
    email: &str,
    body: &UpdateUserRequest,
) -> Result<HttpRequest, HttpError> {
    HttpRequest::put(config.endpoint()?)
        .with_query(EMAIL_QUERY_PARAM, email)?
        .with_json(body)
}

pub fn delete_user(config: &ApiConfig, email: &str) -> Result<HttpRequest, HttpError> {
    HttpRequest::delete(config.endpoint()?).with_query(EMAIL_QUERY_PARAM, email)
}
