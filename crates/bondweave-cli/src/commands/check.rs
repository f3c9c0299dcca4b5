//! Stored-content bond check command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use bondweave_core::{BoardId, Content, Validator};

#[derive(Args)]
pub struct CheckArgs {
    /// Board the content belongs to
    #[arg(short, long)]
    pub board: i64,

    /// Category the content was written in
    #[arg(long)]
    pub category: String,

    /// JSON file with typed content
    #[arg(long)]
    pub content: PathBuf,
}

pub async fn run(args: &CheckArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let board = BoardId(args.board);
    let schema = ctx.store.inner().schema(board)?;
    let category = schema.category(&args.category)?;

    let text = std::fs::read_to_string(&args.content)
        .with_context(|| format!("failed to read {}", args.content.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.content.display()))?;
    let content = Content::from_json(category, &json)?;
    tracing::debug!("Checking {} bond(s) in {}", content.bonds().len(), args.category);

    let validator =
        Validator::new(&schema, ctx.store.as_ref(), board).with_config(&ctx.config)?;
    let Err(err) = validator.check_content(&content).await else {
        if !cli.quiet {
            println!("ok");
        }
        return Ok(());
    };

    match OutputFormat::from(cli.format.as_str()) {
        OutputFormat::Json => println!("{}", output::to_json(&err)),
        OutputFormat::Table => println!("{}", err),
    }
    std::process::exit(1);
}
