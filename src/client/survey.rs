//! HTTP client for the Titanic Survey backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Value, json};

use super::models::{
    AdminPrediction, AdminStats, AdminUser, AuthStatus, HistoryEntry, LoginResponse,
    PassengerInput, Prediction,
};
use super::{ApiResponse, SurveyApi};
use crate::error::{ApiError, Result};
use crate::session::{Profile, SessionStore};

/// Titanic Survey API client.
///
/// Holds the session store so the bearer credential is attached
/// automatically whenever a token is present. Attachment does no preflight
/// expiry check; an expired token is still sent and rejection is the
/// backend's responsibility.
pub struct SurveyClient {
    http: HttpClient,
    base_url: String,
    session: Arc<SessionStore>,
}

impl SurveyClient {
    /// Create a new client against the given backend origin
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
        })
    }

    /// The session store this client reads its credential from
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Issue a request and coerce every outcome into an envelope.
    ///
    /// The JSON content type is always set. `body` is serialized as the
    /// request payload for any method other than GET; GET requests never
    /// carry a body. A request that cannot be sent, or whose response body
    /// does not decode as JSON, yields the fixed failure envelope instead
    /// of an error.
    pub async fn api_call(&self, endpoint: &str, body: &Value, method: Method) -> ApiResponse {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        if method != Method::GET {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request to {} failed: {}", endpoint, e);
                return ApiResponse::unreachable();
            }
        };

        let status = response.status();
        match response.json::<Value>().await {
            Ok(data) => ApiResponse {
                ok: status.is_success(),
                data,
                status: Some(status.as_u16()),
            },
            Err(e) => {
                log::warn!("Undecodable response from {}: {}", endpoint, e);
                ApiResponse::unreachable()
            }
        }
    }

    /// POST with a JSON body
    pub async fn post(&self, endpoint: &str, body: &Value) -> ApiResponse {
        self.api_call(endpoint, body, Method::POST).await
    }

    /// GET, never carrying a body
    pub async fn get(&self, endpoint: &str) -> ApiResponse {
        self.api_call(endpoint, &json!({}), Method::GET).await
    }

    /// Translate an envelope into a typed value or a backend error
    fn expect<T: for<'de> Deserialize<'de>>(resp: ApiResponse) -> Result<T> {
        if resp.ok {
            serde_json::from_value(resp.data)
                .map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
        } else {
            let message = resp
                .error_message()
                .unwrap_or("Request failed")
                .to_string();
            Err(ApiError::Backend {
                message,
                status: resp.status,
            }
            .into())
        }
    }

    /// Persist the session issued by a successful login/register.
    ///
    /// The profile is a cache keyed to the token: it is only written when
    /// this response carried a token or one is already stored, so a
    /// token-less login never leaves an orphaned profile behind.
    fn remember(&self, login: &LoginResponse) -> Result<()> {
        match &login.token {
            Some(token) => self.session.set_token(token)?,
            None if self.session.token().is_none() => return Ok(()),
            None => {}
        }

        self.session.set_user(&Profile {
            username: login.username.clone(),
            is_admin: login.is_admin,
            email: None,
        })
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[async_trait]
impl SurveyApi for SurveyClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = json!({ "username": username, "password": password });
        let login: LoginResponse = Self::expect(self.post("/api/login", &body).await)?;
        self.remember(&login)?;
        Ok(login)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse> {
        let body = json!({ "username": username, "email": email, "password": password });
        let login: LoginResponse = Self::expect(self.post("/api/register", &body).await)?;
        self.remember(&login)?;
        Ok(login)
    }

    async fn status(&self) -> Result<AuthStatus> {
        Self::expect(self.get("/api/status").await)
    }

    async fn predict(&self, input: &PassengerInput) -> Result<Prediction> {
        let body = serde_json::to_value(input)?;
        Self::expect(self.post("/api/predict", &body).await)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        Self::expect(self.get("/api/history").await)
    }

    async fn admin_stats(&self) -> Result<AdminStats> {
        Self::expect(self.get("/api/admin/stats").await)
    }

    async fn admin_users(&self) -> Result<Vec<AdminUser>> {
        Self::expect(self.get("/api/admin/users").await)
    }

    async fn admin_delete_user(&self, user_id: u64) -> Result<String> {
        let endpoint = format!("/api/admin/users/{}", user_id);
        let resp = self.api_call(&endpoint, &json!({}), Method::DELETE).await;
        let msg: MessageResponse = Self::expect(resp)?;
        Ok(msg.message)
    }

    async fn admin_predictions(&self) -> Result<Vec<AdminPrediction>> {
        Self::expect(self.get("/api/admin/predictions").await)
    }

    async fn admin_delete_prediction(&self, pred_id: u64) -> Result<String> {
        let endpoint = format!("/api/admin/predictions/{}", pred_id);
        let resp = self.api_call(&endpoint, &json!({}), Method::DELETE).await;
        let msg: MessageResponse = Self::expect(resp)?;
        Ok(msg.message)
    }

    async fn admin_clear_predictions(&self) -> Result<String> {
        let resp = self
            .api_call("/api/admin/predictions/clear", &json!({}), Method::DELETE)
            .await;
        let msg: MessageResponse = Self::expect(resp)?;
        Ok(msg.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UNREACHABLE_MSG;
    use crate::session::MemoryStorage;
    use crate::session::claims::test_token;

    fn client_for(base_url: &str) -> SurveyClient {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        SurveyClient::new(base_url, session).unwrap()
    }

    #[tokio::test]
    async fn test_success_envelope_mirrors_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .with_status(200)
            .with_body(r#"{"message":"Logged in","username":"ada","is_admin":false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let resp = client.post("/api/login", &json!({})).await;

        assert!(resp.ok);
        assert_eq!(resp.status, Some(200));
        assert_eq!(resp.data["username"], "ada");
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .with_status(401)
            .with_body(r#"{"error":"Invalid credentials"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let resp = client.post("/api/login", &json!({})).await;

        assert!(!resp.ok);
        assert_eq!(resp.status, Some(401));
        assert_eq!(resp.error_message(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_network_failure_yields_fixed_envelope() {
        // Nothing listens on port 9
        let client = client_for("http://127.0.0.1:9");
        let resp = client.post("/api/login", &json!({})).await;

        assert!(!resp.ok);
        assert_eq!(resp.status, None);
        assert_eq!(resp.error_message(), Some(UNREACHABLE_MSG));
    }

    #[tokio::test]
    async fn test_undecodable_body_yields_fixed_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/status")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let resp = client.get("/api/status").await;

        assert!(!resp.ok);
        assert_eq!(resp.status, None);
        assert_eq!(resp.error_message(), Some(UNREACHABLE_MSG));
    }

    #[tokio::test]
    async fn test_get_never_carries_a_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/history")
            .match_body(mockito::Matcher::Exact(String::new()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let resp = client
            .api_call("/api/history", &json!({"ignored": true}), Method::GET)
            .await;

        assert!(resp.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_present() {
        let token = test_token::with_exp_offset(-3600, false);

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/status")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_body(r#"{"authenticated":true,"username":"ada","is_admin":false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        // Expired on purpose: attachment does no preflight expiry check
        client.session().set_token(&token).unwrap();

        let resp = client.get("/api/status").await;
        assert!(resp.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_bearer_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/status")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"authenticated":false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let resp = client.get("/api/status").await;

        assert!(resp.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let token = test_token::with_exp_offset(3600, false);

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .match_body(mockito::Matcher::Json(
                json!({"username": "ada", "password": "secret"}),
            ))
            .with_status(200)
            .with_body(
                json!({
                    "message": "Logged in",
                    "username": "ada",
                    "is_admin": false,
                    "token": token.clone(),
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let login = client.login("ada", "secret").await.unwrap();

        assert_eq!(login.username, "ada");
        assert_eq!(client.session().token(), Some(token));
        let profile = client.session().user().unwrap();
        assert_eq!(profile.username, "ada");
        assert!(!profile.is_admin);
    }

    #[tokio::test]
    async fn test_tokenless_login_caches_no_profile() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .with_status(200)
            .with_body(r#"{"message":"Logged in","username":"ada","is_admin":false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let login = client.login("ada", "secret").await.unwrap();

        assert_eq!(login.username, "ada");
        // No token issued, so no profile may be cached either
        assert_eq!(client.session().token(), None);
        assert_eq!(client.session().user(), None);
    }

    #[tokio::test]
    async fn test_tokenless_login_refreshes_profile_for_existing_token() {
        let token = test_token::with_exp_offset(3600, true);

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .with_status(200)
            .with_body(r#"{"message":"Admin logged in","username":"root","is_admin":true}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        client.session().set_token(&token).unwrap();

        client.login("root", "secret").await.unwrap();

        let profile = client.session().user().expect("expected cached profile");
        assert_eq!(profile.username, "root");
        assert!(profile.is_admin);
    }

    #[tokio::test]
    async fn test_backend_error_becomes_typed_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/login")
            .with_status(401)
            .with_body(r#"{"error":"Invalid credentials"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.login("ada", "wrong").await.unwrap_err();

        assert!(err.to_string().contains("Invalid credentials"));
        // Failed login leaves the session untouched
        assert_eq!(client.session().token(), None);
    }

    #[tokio::test]
    async fn test_admin_predictions_listing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/admin/predictions")
            .with_status(200)
            .with_body(
                r#"[{"id":7,"username":"ada","pclass":1,"sex":"female","age":29.0,
                     "result":"Survived","probability":91.3,"timestamp":"Apr 10, 1912 23:40"}]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let predictions = client.admin_predictions().await.unwrap();

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].username, "ada");
        assert_eq!(predictions[0].result, "Survived");
    }

    #[tokio::test]
    async fn test_admin_prediction_deletion() {
        let mut server = mockito::Server::new_async().await;
        let delete_one = server
            .mock("DELETE", "/api/admin/predictions/7")
            .with_status(200)
            .with_body(r#"{"message":"Prediction deleted"}"#)
            .create_async()
            .await;
        let clear_all = server
            .mock("DELETE", "/api/admin/predictions/clear")
            .with_status(200)
            .with_body(r#"{"message":"All predictions cleared"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());

        let msg = client.admin_delete_prediction(7).await.unwrap();
        assert_eq!(msg, "Prediction deleted");
        delete_one.assert_async().await;

        let msg = client.admin_clear_predictions().await.unwrap();
        assert_eq!(msg, "All predictions cleared");
        clear_all.assert_async().await;
    }

    #[tokio::test]
    async fn test_predict_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/predict")
            .match_body(mockito::Matcher::PartialJson(json!({"pclass": 1, "sex": "female"})))
            .with_status(200)
            .with_body(r#"{"result":"Survived","probability":91.3}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let input = PassengerInput {
            pclass: 1,
            sex: "female".to_string(),
            age: 29.0,
            sibsp: 0,
            parch: 0,
            fare: 211.34,
            embarked: "S".to_string(),
        };

        let prediction = client.predict(&input).await.unwrap();
        assert_eq!(prediction.result, "Survived");
        assert!((prediction.probability - 91.3).abs() < f64::EPSILON);
    }
}
