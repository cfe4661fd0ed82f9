//! surveyctl - CLI companion for the Titanic Survey platform

use clap::Parser;

mod cli;
mod client;
mod error;
mod output;
mod session;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username } => cli::login::run(&opts, username).await,
        Commands::Register => cli::login::register(&opts).await,
        Commands::Logout => cli::logout::run(&opts).await,
        Commands::Status { remote } => cli::status::run(&opts, remote).await,
        Commands::Predict(args) => cli::predict::run(&opts, args).await,
        Commands::History => cli::history::run(&opts).await,
        Commands::Admin(admin_cmd) => cli::admin::run(&opts, admin_cmd).await,
        Commands::Version => {
            println!("surveyctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
