//! Family index command

use std::collections::BTreeMap;

use clap::Args;

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use bondweave_core::BoardId;

#[derive(Args)]
pub struct FamiliesArgs {
    /// Board id (all boards when omitted)
    #[arg(short, long)]
    pub board: Option<i64>,
}

type Index = BTreeMap<String, Vec<String>>;

pub fn run(args: &FamiliesArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.store.inner();
    let boards = match args.board {
        Some(id) => vec![BoardId(id)],
        None => store.board_ids()?,
    };

    let mut indexes: BTreeMap<BoardId, Index> = BTreeMap::new();
    for board in boards {
        let schema = store.schema(board)?;
        let index: Index = schema
            .families()
            .iter()
            .map(|(family, categories)| (family.clone(), categories.iter().cloned().collect()))
            .collect();
        indexes.insert(board, index);
    }

    match OutputFormat::from(cli.format.as_str()) {
        OutputFormat::Json => {
            // A single board prints its index directly
            match (args.board, indexes.values().next()) {
                (Some(_), Some(index)) => println!("{}", output::to_json(index)),
                _ => println!("{}", output::to_json(&indexes)),
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = indexes
                .iter()
                .flat_map(|(board, index)| {
                    index.iter().map(move |(family, categories)| {
                        vec![board.to_string(), family.clone(), categories.join(", ")]
                    })
                })
                .collect();
            if rows.is_empty() {
                println!("No families defined");
                return Ok(());
            }
            println!(
                "{}",
                output::table(&["BOARD", "FAMILY", "CATEGORIES"], &rows)
            );
        }
    }
    Ok(())
}
