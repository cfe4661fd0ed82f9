//! Logout command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::guard;
use crate::error::Result;

/// Run the logout command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    guard::do_logout(&ctx.client, &ctx.navigator).await;

    println!("{} Logged out", "✓".green());
    Ok(())
}
