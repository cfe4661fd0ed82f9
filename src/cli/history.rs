//! History command implementation

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::{SurveyApi, guard};
use crate::error::{ApiError, Result};
use crate::output::{json, table};

/// Run the history command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if guard::require_auth(&ctx.session, &ctx.navigator, false).is_none() {
        return Err(ApiError::Unauthorized.into());
    }

    let entries = ctx.client.history().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::render(&entries)?),
        OutputFormat::Table => println!("{}", table::format_table(&entries)),
    }

    Ok(())
}
