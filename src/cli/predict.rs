//! Predict command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, PassengerArgs};
use crate::client::{PassengerInput, SurveyApi, guard};
use crate::error::{ApiError, Result};
use crate::output::json;

/// Run the predict command
pub async fn run(opts: &GlobalOptions, args: PassengerArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if guard::require_auth(&ctx.session, &ctx.navigator, false).is_none() {
        return Err(ApiError::Unauthorized.into());
    }

    let input = PassengerInput {
        pclass: args.pclass,
        sex: args.sex,
        age: args.age,
        sibsp: args.sibsp,
        parch: args.parch,
        fare: args.fare,
        embarked: args.embarked,
    };

    let prediction = ctx.client.predict(&input).await?;

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::render(&serde_json::json!({
                "result": prediction.result,
                "probability": prediction.probability,
            }))?);
        }
        OutputFormat::Table => {
            let verdict = if prediction.result == "Survived" {
                prediction.result.green().bold()
            } else {
                prediction.result.red().bold()
            };
            println!("{} ({:.1}% survival probability)", verdict, prediction.probability);
        }
    }

    Ok(())
}
