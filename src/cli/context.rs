//! Command execution context
//!
//! Consolidates the setup every command needs: the session store at its
//! resolved path, the API client against the resolved origin, and the
//! navigator guards redirect through.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{PageNavigator, SurveyClient, origin};
use crate::error::Result;
use crate::session::{FileStorage, SessionStore};

/// Context for command execution
pub struct CommandContext {
    /// Session store backed by the resolved session file
    pub session: Arc<SessionStore>,

    /// API client bound to the resolved backend origin
    pub client: SurveyClient,

    /// Navigator used by the guard functions
    pub navigator: PageNavigator,

    /// Output format preference
    pub format: OutputFormat,

    /// Session file path, for display
    pub session_path: PathBuf,
}

impl CommandContext {
    /// Build a context from global options.
    ///
    /// Origin precedence: `--api-host`/env override, then detection from
    /// the configured frontend location.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let session_path = match opts.session_ref() {
            Some(path) => PathBuf::from(path),
            None => FileStorage::default_path()?,
        };

        let session = Arc::new(SessionStore::new(Box::new(FileStorage::new(
            session_path.clone(),
        ))));

        let base_url = origin::resolve_origin(opts.api_host_ref(), &opts.location);
        log::debug!("Using backend origin {}", base_url);

        let client = SurveyClient::new(base_url, Arc::clone(&session))?;

        Ok(Self {
            session,
            client,
            navigator: PageNavigator,
            format: opts.format,
            session_path,
        })
    }
}
