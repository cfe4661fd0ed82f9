//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::SurveyApi;
use crate::error::Result;
use crate::session::claims;

/// Run the status command to display session state, optionally asking the
/// backend who it thinks we are
pub async fn run(opts: &GlobalOptions, remote: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    println!("{}\n", "Titanic Survey Session Status".bold());
    println!(
        "Session file: {}",
        ctx.session_path.display().to_string().cyan()
    );
    println!();

    match ctx.session.token() {
        None => {
            println!("{} No session", "✗".red());
            println!("  → Run {} to sign in", "surveyctl login".cyan());
        }
        Some(token) => match claims::decode_token(&token) {
            None => {
                println!("{} Stored token is malformed", "⚠".yellow());
                println!("  → Run {} to start over", "surveyctl login".cyan());
            }
            Some(c) => {
                if claims::is_token_expired(&token) {
                    println!("{} Token expired", "⚠".yellow());
                    println!("  → Run {} to sign in again", "surveyctl login".cyan());
                } else {
                    let remaining = c
                        .exp
                        .map(|exp| exp - chrono::Utc::now().timestamp())
                        .unwrap_or(0);
                    println!(
                        "{} Token valid (expires in {}h {}m)",
                        "✓".green(),
                        remaining / 3600,
                        (remaining % 3600) / 60
                    );
                }

                if let Some(sub) = &c.sub {
                    println!("{} Subject: {}", "✓".green(), sub.bold());
                }
                if c.is_admin {
                    println!("{} Administrator session", "✓".green());
                }
            }
        },
    }

    if let Some(profile) = ctx.session.user() {
        println!(
            "{} Cached profile: {}{}",
            "✓".green(),
            profile.username.bold(),
            if profile.is_admin { " (admin)" } else { "" }
        );
    } else {
        println!("{} No cached profile", "○".dimmed());
    }

    if remote {
        println!();
        match ctx.client.status().await {
            Ok(status) if status.authenticated => {
                println!(
                    "{} Backend sees: {}{}",
                    "✓".green(),
                    status.username.unwrap_or_default().bold(),
                    if status.is_admin { " (admin)" } else { "" }
                );
            }
            Ok(_) => println!("{} Backend sees no active session", "○".dimmed()),
            Err(e) => println!("{} Backend unreachable: {}", "✗".red(), e),
        }
    }

    println!();
    Ok(())
}
