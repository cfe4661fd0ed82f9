//! Backend origin selection
//!
//! The origin is picked once at startup as a pure function of where the
//! companion frontend is running: a loopback host or local file context
//! selects the local development server, anything else the deployed
//! backend. An explicit `--api-host` / `SURVEYCTL_API_HOST` override wins
//! over detection.

/// Local development backend
pub const LOCAL_ORIGIN: &str = "http://127.0.0.1:5000";

/// Deployed backend
pub const DEPLOYED_ORIGIN: &str = "https://titanic-survey-api.onrender.com";

/// Select the backend origin for a frontend location.
///
/// `location` is the host or URL the frontend is served from. Loopback
/// hosts, `file://` URLs, and the opaque `null` origin of a local file all
/// map to the local backend. An empty location means "no deployed context
/// detected" and also maps local.
pub fn select_origin(location: &str) -> &'static str {
    let loc = location.trim().to_ascii_lowercase();

    let is_local = loc.is_empty()
        || loc == "null"
        || loc.starts_with("file:")
        || loc.contains("localhost")
        || loc.contains("127.0.0.1");

    if is_local { LOCAL_ORIGIN } else { DEPLOYED_ORIGIN }
}

/// Resolve the origin from an explicit override, falling back to detection
pub fn resolve_origin(override_host: Option<&str>, location: &str) -> String {
    match override_host {
        Some(host) => host.trim_end_matches('/').to_string(),
        None => select_origin(location).to_string(),
    }
}
