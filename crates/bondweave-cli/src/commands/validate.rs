//! Form validation command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use bondweave_core::{outcome_message, BoardId, RawContent, Validator};

#[derive(Args)]
pub struct ValidateArgs {
    /// Board the content is posted on
    #[arg(short, long)]
    pub board: i64,

    /// Category to validate against
    #[arg(long)]
    pub category: String,

    /// JSON file mapping field names to raw form input
    #[arg(long)]
    pub content: PathBuf,
}

pub async fn run(args: &ValidateArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let board = BoardId(args.board);
    let schema = ctx.store.inner().schema(board)?;
    let category = schema.category(&args.category)?;

    let text = std::fs::read_to_string(&args.content)
        .with_context(|| format!("failed to read {}", args.content.display()))?;
    let raw: RawContent = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a field map", args.content.display()))?;

    let validator =
        Validator::new(&schema, ctx.store.as_ref(), board).with_config(&ctx.config)?;
    let outcome = validator.validate_category(category, &raw).await;
    let message = outcome_message(&outcome);

    let field = match &outcome {
        Ok(Some(rejection)) => Some(rejection.field.clone()),
        _ => None,
    };

    match OutputFormat::from(cli.format.as_str()) {
        OutputFormat::Json => {
            let body = match &message {
                None => json!({ "valid": true }),
                Some(msg) => json!({ "valid": false, "field": field, "message": msg }),
            };
            println!("{}", output::to_json(&body));
        }
        OutputFormat::Table => match &message {
            None => {
                if !cli.quiet {
                    println!("valid");
                }
            }
            Some(msg) => println!("{}", msg),
        },
    }

    if message.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
