//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

pub mod admin;
pub mod context;
pub mod history;
pub mod login;
pub mod logout;
pub mod predict;
pub mod status;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// surveyctl - CLI companion for the Titanic Survey platform
#[derive(Parser, Debug)]
#[command(name = "surveyctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SURVEYCTL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override the backend origin
    #[arg(long, global = true, env = "SURVEYCTL_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Override session file location
    #[arg(long, global = true, env = "SURVEYCTL_SESSION", hide_env = true)]
    pub session: Option<String>,

    /// Frontend location used for backend origin detection
    #[arg(
        long,
        global = true,
        env = "SURVEYCTL_LOCATION",
        default_value = "",
        hide_env = true,
        hide = true
    )]
    pub location: String,

    /// Enable debug logging
    #[arg(long, global = true, env = "SURVEYCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session token
    Login {
        /// Username (prompted if omitted)
        username: Option<String>,
    },

    /// Create an account and log in
    Register,

    /// End the session (best-effort server notification)
    Logout,

    /// Show session and backend status
    Status {
        /// Also query the backend's /api/status endpoint
        #[arg(long)]
        remote: bool,
    },

    /// Run a survival prediction for one passenger
    Predict(PassengerArgs),

    /// Show your recent predictions
    History,

    /// Administrator operations
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Display version information
    Version,
}

/// Passenger features for the predict command
#[derive(Debug, Clone, Args)]
pub struct PassengerArgs {
    /// Ticket class (1-3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub pclass: u8,

    /// Sex (male, female)
    #[arg(long)]
    pub sex: String,

    /// Age in years
    #[arg(long)]
    pub age: f64,

    /// Siblings/spouses aboard
    #[arg(long, default_value_t = 0)]
    pub sibsp: u32,

    /// Parents/children aboard
    #[arg(long, default_value_t = 0)]
    pub parch: u32,

    /// Ticket fare
    #[arg(long)]
    pub fare: f64,

    /// Embarkation port (S, C, Q)
    #[arg(long, default_value = "S")]
    pub embarked: String,
}

/// Administrator subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Show aggregate platform statistics
    Stats,

    /// List registered users
    Users,

    /// Delete a user account
    DeleteUser {
        /// Numeric user ID
        user_id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List recent predictions across all users
    Predictions,

    /// Delete one prediction
    DeletePrediction {
        /// Numeric prediction ID
        pred_id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete every prediction
    ClearPredictions {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Global CLI options passed to all command handlers
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Backend origin override (bypasses detection)
    pub api_host: Option<String>,

    /// Custom session file path (defaults to ~/.surveyctl/session.yaml)
    pub session: Option<String>,

    /// Frontend location for origin detection
    pub location: String,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            api_host: cli.api_host.clone(),
            session: cli.session.clone(),
            location: cli.location.clone(),
        }
    }

    /// Get API host override as `Option<&str>`
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// Get session path override as `Option<&str>`
    pub fn session_ref(&self) -> Option<&str> {
        self.session.as_deref()
    }
}
