//! Wire models for the Titanic Survey backend

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Response to `/api/login` and `/api/register`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Human-readable outcome message
    pub message: String,

    /// Username of the authenticated account
    pub username: String,

    /// Administrator role flag
    #[serde(default)]
    pub is_admin: bool,

    /// Session token, when the backend issues one
    #[serde(default)]
    pub token: Option<String>,
}

/// Response to `/api/status`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub is_admin: bool,
}

/// Passenger features submitted to `/api/predict`
#[derive(Debug, Clone, Serialize)]
pub struct PassengerInput {
    /// Ticket class (1-3)
    pub pclass: u8,

    /// Sex ("male" or "female")
    pub sex: String,

    /// Age in years
    pub age: f64,

    /// Siblings/spouses aboard
    pub sibsp: u32,

    /// Parents/children aboard
    pub parch: u32,

    /// Ticket fare
    pub fare: f64,

    /// Embarkation port (S, C, or Q)
    pub embarked: String,
}

/// Response to `/api/predict`
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// "Survived" or "Did Not Survive"
    pub result: String,

    /// Survival probability as a percentage
    pub probability: f64,
}

/// One entry from `/api/history`
#[derive(Debug, Clone, Deserialize, Serialize, Tabled)]
pub struct HistoryEntry {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "CLASS")]
    pub pclass: u8,

    #[tabled(rename = "SEX")]
    pub sex: String,

    #[tabled(rename = "AGE")]
    pub age: f64,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "PROB %")]
    pub probability: f64,

    #[tabled(rename = "WHEN")]
    pub timestamp: String,
}

/// Response to `/api/admin/stats`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_predictions: u64,
    pub survived: u64,
    pub not_survived: u64,
    pub survival_rate: f64,
}

/// One entry from `/api/admin/predictions`
#[derive(Debug, Clone, Deserialize, Serialize, Tabled)]
pub struct AdminPrediction {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "CLASS")]
    pub pclass: u8,

    #[tabled(rename = "SEX")]
    pub sex: String,

    #[tabled(rename = "AGE")]
    pub age: f64,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "PROB %")]
    pub probability: f64,

    #[tabled(rename = "WHEN")]
    pub timestamp: String,
}

/// One entry from `/api/admin/users`
#[derive(Debug, Clone, Deserialize, Serialize, Tabled)]
pub struct AdminUser {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PREDICTIONS")]
    pub prediction_count: u64,
}
