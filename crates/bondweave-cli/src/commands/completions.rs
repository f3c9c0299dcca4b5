//! Shell completions

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, generate_to, Shell};

use crate::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    match &args.out_dir {
        Some(dir) => {
            let path = generate_to(args.shell, &mut cmd, "bondweave", dir)?;
            tracing::info!("Wrote {} completions to {:?}", args.shell, path);
        }
        None => generate(args.shell, &mut cmd, "bondweave", &mut std::io::stdout()),
    }
    Ok(())
}
