//! Bond graph command

use clap::Args;
use serde_json::json;

use super::split_list;
use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use bondweave_core::{FamilyFilter, GraphBuilder, GraphQuery};

#[derive(Args)]
pub struct GraphArgs {
    /// Article to start from
    pub root: i64,

    /// Only follow bonds into these categories (comma-separated)
    #[arg(long)]
    pub categories: Option<String>,

    /// Only follow bonds into categories of these families (comma-separated)
    #[arg(long, conflicts_with = "blacklist")]
    pub whitelist: Option<String>,

    /// Skip bonds into categories of these families (comma-separated)
    #[arg(long)]
    pub blacklist: Option<String>,

    /// Node cap (overrides the config)
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Include traversal counters in the output
    #[arg(long)]
    pub stats: bool,
}

impl GraphArgs {
    fn query(&self, ctx: &AppContext) -> GraphQuery {
        let mut query = GraphQuery::new(self.root).with_config(&ctx.config);
        if let Some(categories) = &self.categories {
            query = query.with_categories(split_list(categories));
        }
        if let Some(families) = &self.whitelist {
            query = query.with_family_filter(FamilyFilter::white_list(split_list(families)));
        } else if let Some(families) = &self.blacklist {
            query = query.with_family_filter(FamilyFilter::black_list(split_list(families)));
        }
        if let Some(max_nodes) = self.max_nodes {
            query = query.with_max_nodes(max_nodes);
        }
        query
    }
}

pub async fn run(args: &GraphArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let query = args.query(ctx);
    let (graph, stats) = GraphBuilder::build_with_stats(ctx.store.as_ref(), &query).await?;

    if stats.truncated {
        tracing::warn!(
            "Graph around {} truncated at {} nodes",
            query.root,
            query.max_nodes
        );
    }

    match OutputFormat::from(cli.format.as_str()) {
        OutputFormat::Json => {
            let body = if args.stats {
                json!({ "nodes": graph.nodes, "edges": graph.edges, "stats": stats })
            } else {
                json!({ "nodes": graph.nodes, "edges": graph.edges })
            };
            println!("{}", output::to_json(&body));
        }
        OutputFormat::Table => {
            let nodes: Vec<Vec<String>> = graph
                .nodes
                .iter()
                .map(|n| {
                    vec![
                        n.id.to_string(),
                        n.category_name.clone(),
                        n.title.clone(),
                        n.energy.to_string(),
                    ]
                })
                .collect();
            println!("{}", output::table(&["ID", "CATEGORY", "TITLE", "ENERGY"], &nodes));
            println!();

            if graph.edges.is_empty() {
                println!("No bonds");
            } else {
                let edges: Vec<Vec<String>> = graph
                    .edges
                    .iter()
                    .map(|e| {
                        vec![
                            e.id.to_string(),
                            e.from.to_string(),
                            e.to.to_string(),
                            e.name.clone(),
                            e.energy.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    output::table(&["EDGE", "FROM", "TO", "FIELD", "ENERGY"], &edges)
                );
            }

            if args.stats {
                println!();
                println!(
                    "expanded {} node(s), saw {} bond(s), dropped {}{}",
                    stats.nodes_expanded,
                    stats.edges_seen,
                    stats.edges_dropped,
                    if stats.truncated { ", truncated" } else { "" }
                );
            }
        }
    }
    Ok(())
}
