//! Login and register command implementations

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::SurveyApi;
use crate::error::Result;

/// Run the login command
pub async fn run(opts: &GlobalOptions, username: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let login = ctx.client.login(&username, &password).await?;

    println!("{} {}", "✓".green(), login.message);
    if login.is_admin {
        println!("  Admin session for {}", login.username.bold());
    } else {
        println!("  Logged in as {}", login.username.bold());
    }
    println!("  Session saved to {}", ctx.session_path.display());

    Ok(())
}

/// Run the register command
pub async fn register(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Username")
        .interact_text()?;

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let login = ctx.client.register(&username, &email, &password).await?;

    println!("{} {}", "✓".green(), login.message);
    println!("  Logged in as {}", login.username.bold());

    Ok(())
}
