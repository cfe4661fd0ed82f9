//! Admin command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{AdminCommands, CommandContext, GlobalOptions, OutputFormat};
use crate::client::{SurveyApi, guard};
use crate::error::{ApiError, Result};
use crate::output::{json, table};

/// Dispatch an admin subcommand
pub async fn run(opts: &GlobalOptions, cmd: AdminCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if guard::require_admin(&ctx.session, &ctx.navigator).is_none() {
        return Err(ApiError::Forbidden.into());
    }

    match cmd {
        AdminCommands::Stats => stats(&ctx).await,
        AdminCommands::Users => users(&ctx).await,
        AdminCommands::DeleteUser { user_id, yes } => delete_user(&ctx, user_id, yes).await,
        AdminCommands::Predictions => predictions(&ctx).await,
        AdminCommands::DeletePrediction { pred_id, yes } => {
            delete_prediction(&ctx, pred_id, yes).await
        }
        AdminCommands::ClearPredictions { yes } => clear_predictions(&ctx, yes).await,
    }
}

/// Ask before a destructive action, unless `--yes` was passed
fn confirmed(prompt: String, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

async fn stats(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.client.admin_stats().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::render(&stats)?),
        OutputFormat::Table => {
            println!("{}\n", "Platform Statistics".bold());
            println!("Users:            {}", stats.total_users);
            println!("Predictions:      {}", stats.total_predictions);
            println!("Survived:         {}", stats.survived.to_string().green());
            println!("Did not survive:  {}", stats.not_survived.to_string().red());
            println!("Survival rate:    {:.1}%", stats.survival_rate);
        }
    }

    Ok(())
}

async fn users(ctx: &CommandContext) -> Result<()> {
    let users = ctx.client.admin_users().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::render(&users)?),
        OutputFormat::Table => println!("{}", table::format_table(&users)),
    }

    Ok(())
}

async fn delete_user(ctx: &CommandContext, user_id: u64, yes: bool) -> Result<()> {
    if !confirmed(format!("Delete user {}?", user_id), yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let message = ctx.client.admin_delete_user(user_id).await?;
    println!("{} {}", "✓".green(), message);

    Ok(())
}

async fn predictions(ctx: &CommandContext) -> Result<()> {
    let predictions = ctx.client.admin_predictions().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::render(&predictions)?),
        OutputFormat::Table => println!("{}", table::format_table(&predictions)),
    }

    Ok(())
}

async fn delete_prediction(ctx: &CommandContext, pred_id: u64, yes: bool) -> Result<()> {
    if !confirmed(format!("Delete prediction {}?", pred_id), yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let message = ctx.client.admin_delete_prediction(pred_id).await?;
    println!("{} {}", "✓".green(), message);

    Ok(())
}

async fn clear_predictions(ctx: &CommandContext, yes: bool) -> Result<()> {
    if !confirmed("Delete ALL predictions?".to_string(), yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let message = ctx.client.admin_clear_predictions().await?;
    println!("{} {}", "✓".green(), message);

    Ok(())
}
