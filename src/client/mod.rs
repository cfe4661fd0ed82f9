//! Titanic Survey API client
//!
//! Everything the backend returns flows through the [`ApiResponse`]
//! envelope: a success flag mirroring the HTTP status class, the decoded
//! JSON body, and the status code. Transport and body-decode failures are
//! coerced into a failure envelope instead of propagating, so the raw
//! request path never errors. The typed [`SurveyApi`] operations sit on
//! top of the envelope and translate failure envelopes into crate errors
//! for the CLI.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::Result;

pub mod guard;
pub mod models;
pub mod origin;
pub mod survey;

pub use guard::PageNavigator;
pub use models::PassengerInput;
pub use survey::SurveyClient;

use models::{
    AdminPrediction, AdminStats, AdminUser, AuthStatus, HistoryEntry, LoginResponse, Prediction,
};

/// Fixed diagnostic for requests that never produced a decodable response
pub const UNREACHABLE_MSG: &str = "Cannot reach server. Is the backend running?";

/// Uniform result of every API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Whether the HTTP status was in the 2xx class
    pub ok: bool,

    /// Decoded response body
    pub data: Value,

    /// HTTP status code; absent when the request never completed
    pub status: Option<u16>,
}

impl ApiResponse {
    /// Failure envelope for a request that could not be sent or decoded
    pub fn unreachable() -> Self {
        Self {
            ok: false,
            data: json!({ "error": UNREACHABLE_MSG }),
            status: None,
        }
    }

    /// The backend's `error` field, when present
    pub fn error_message(&self) -> Option<&str> {
        self.data.get("error").and_then(Value::as_str)
    }
}

/// Typed operations against the Titanic Survey backend
#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// Authenticate and persist the resulting session
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    /// Create an account; the backend logs the new user in
    async fn register(&self, username: &str, email: &str, password: &str)
    -> Result<LoginResponse>;

    /// Ask the backend who we are
    async fn status(&self) -> Result<AuthStatus>;

    /// Run a survival prediction for one passenger
    async fn predict(&self, input: &PassengerInput) -> Result<Prediction>;

    /// Recent predictions for the current user
    async fn history(&self) -> Result<Vec<HistoryEntry>>;

    /// Aggregate platform statistics (admin only)
    async fn admin_stats(&self) -> Result<AdminStats>;

    /// Registered non-admin users (admin only)
    async fn admin_users(&self) -> Result<Vec<AdminUser>>;

    /// Delete a user account (admin only); returns the backend's message
    async fn admin_delete_user(&self, user_id: u64) -> Result<String>;

    /// Recent predictions across all users (admin only)
    async fn admin_predictions(&self) -> Result<Vec<AdminPrediction>>;

    /// Delete one prediction (admin only); returns the backend's message
    async fn admin_delete_prediction(&self, pred_id: u64) -> Result<String>;

    /// Delete every prediction (admin only); returns the backend's message
    async fn admin_clear_predictions(&self) -> Result<String>;
}
