//! Resource limits for graph expansion and content size

/// Hard ceiling on nodes in a single bond graph (10000)
pub const MAX_GRAPH_NODES: usize = 10_000;

/// Node cap applied when the caller does not pick one (500)
pub const DEFAULT_GRAPH_NODES: usize = 500;

/// Hard ceiling on elements in one array field (1024)
pub const MAX_ARRAY_ITEMS: usize = 1024;

/// Element cap applied when the caller does not pick one (256)
pub const DEFAULT_ARRAY_ITEMS: usize = 256;

/// Limit violation
#[derive(Debug, Clone, PartialEq)]
pub enum LimitError {
    GraphNodesTooLarge { nodes: usize, max: usize },
    GraphNodesZero,
    ArrayItemsTooLarge { items: usize, max: usize },
    ArrayItemsZero,
}

impl std::fmt::Display for LimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphNodesTooLarge { nodes, max } => {
                write!(f, "Graph node limit too large: {} (max {})", nodes, max)
            }
            Self::GraphNodesZero => write!(f, "Graph node limit must be at least 1"),
            Self::ArrayItemsTooLarge { items, max } => {
                write!(f, "Array item limit too large: {} (max {})", items, max)
            }
            Self::ArrayItemsZero => write!(f, "Array item limit must be at least 1"),
        }
    }
}

impl std::error::Error for LimitError {}

/// Validate a graph node cap
pub fn validate_graph_nodes(nodes: usize) -> Result<(), LimitError> {
    if nodes == 0 {
        return Err(LimitError::GraphNodesZero);
    }
    if nodes > MAX_GRAPH_NODES {
        return Err(LimitError::GraphNodesTooLarge {
            nodes,
            max: MAX_GRAPH_NODES,
        });
    }
    Ok(())
}

/// Validate an array element cap
pub fn validate_array_items(items: usize) -> Result<(), LimitError> {
    if items == 0 {
        return Err(LimitError::ArrayItemsZero);
    }
    if items > MAX_ARRAY_ITEMS {
        return Err(LimitError::ArrayItemsTooLarge {
            items,
            max: MAX_ARRAY_ITEMS,
        });
    }
    Ok(())
}
