//! Session guards
//!
//! Guards check the persisted session before a page (or here, a command)
//! proceeds. Their failure action is a redirect through the [`Navigator`]
//! collaborator, never a returned error: a `None` result means navigation
//! happened and the caller must stop. Auth failures (missing, malformed,
//! expired token) and authz failures (valid non-admin where admin is
//! required) differ only in which destination is chosen.
//!
//! Every rejection path clears the session before redirecting, so a stale
//! credential never survives a bounce to the login page.

use serde_json::json;

use super::survey::SurveyClient;
use crate::session::{SessionStore, claims};

/// Fixed redirect targets, invoked by full-page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Admin,
}

impl Destination {
    /// Relative navigation target
    pub fn target(&self) -> &'static str {
        match self {
            Destination::Login => "login.html",
            Destination::Admin => "admin.html",
        }
    }
}

/// Page-router collaborator that performs redirects
pub trait Navigator {
    fn navigate(&self, dest: Destination);
}

/// Production navigator: announces the redirect on stderr.
///
/// The CLI has no page to swap out, so the redirect is surfaced as a
/// pointer to the matching destination.
pub struct PageNavigator;

impl Navigator for PageNavigator {
    fn navigate(&self, dest: Destination) {
        log::info!("Redirecting to {}", dest.target());
        eprintln!("→ {}", dest.target());
    }
}

/// Clear the session and bounce to the login destination
fn reject(session: &SessionStore, nav: &dyn Navigator) {
    if let Err(e) = session.clear() {
        log::warn!("Failed to clear session: {}", e);
    }
    nav.navigate(Destination::Login);
}

/// Require an authenticated session.
///
/// Missing, expired, or undecodable tokens clear the session and navigate
/// to login. With `redirect_if_admin`, a valid administrator session is
/// sent to the admin destination instead of proceeding. Returns the
/// decoded claims only when the caller may continue.
pub fn require_auth(
    session: &SessionStore,
    nav: &dyn Navigator,
    redirect_if_admin: bool,
) -> Option<claims::Claims> {
    let token = match session.token() {
        Some(token) => token,
        None => {
            reject(session, nav);
            return None;
        }
    };

    if claims::is_token_expired(&token) {
        reject(session, nav);
        return None;
    }

    let claims = match claims::decode_token(&token) {
        Some(claims) => claims,
        None => {
            reject(session, nav);
            return None;
        }
    };

    if redirect_if_admin && claims.is_admin {
        nav.navigate(Destination::Admin);
        return None;
    }

    Some(claims)
}

/// Require an authenticated administrator session.
///
/// Rejections are handled as in [`require_auth`]; a valid non-admin
/// session is also cleared and sent to login. Only valid admin claims are
/// returned.
pub fn require_admin(session: &SessionStore, nav: &dyn Navigator) -> Option<claims::Claims> {
    let claims = require_auth(session, nav, false)?;

    if !claims.is_admin {
        reject(session, nav);
        return None;
    }

    Some(claims)
}

/// Log out: best-effort server notification, then unconditional local
/// teardown.
///
/// The network call's outcome is ignored; logout must succeed client-side
/// even when the backend is unreachable.
pub async fn do_logout(client: &SurveyClient, nav: &dyn Navigator) {
    let resp = client.post("/api/logout", &json!({})).await;
    if !resp.ok {
        log::debug!("Logout request failed, clearing session anyway");
    }

    if let Err(e) = client.session().clear() {
        log::warn!("Failed to clear session: {}", e);
    }
    nav.navigate(Destination::Login);
}
