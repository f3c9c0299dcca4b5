//! CLI command implementations

pub mod check;
pub mod completions;
pub mod families;
pub mod graph;
pub mod validate;

use std::collections::BTreeSet;

/// Split a comma-separated list, dropping blanks
pub fn split_list(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        let set = split_list(" News, Opinion ,,");
        assert_eq!(set.len(), 2);
        assert!(set.contains("News"));
        assert!(set.contains("Opinion"));
    }
}
