//! Story flow analysis

use crate::types::content::{ContentGraph, NodeKind};
use crate::validate::{ContentIssue, ValidationReport};
use std::collections::HashSet;

const CATEGORY: &str = "flow";

/// Warn about nodes no path reaches, and about stories that cannot end
pub fn check(content: &ContentGraph, report: &mut ValidationReport) {
    let start = content.start_node();
    if !content.contains(start) {
        // Reported by the reference check
        return;
    }

    let reachable = reachable_from(content, start);

    for id in content.nodes.keys() {
        if !reachable.contains(id.as_str()) {
            report.add_issue(ContentIssue::warning(
                CATEGORY,
                Some(id.as_str()),
                "node is unreachable from the start node",
            ));
        }
    }

    let can_end = reachable
        .iter()
        .filter_map(|id| content.node(id))
        .any(|node| node.kind == NodeKind::Ending);
    if !can_end {
        report.add_issue(ContentIssue::warning(
            CATEGORY,
            None,
            "no ending node is reachable from the start node",
        ));
    }
}

/// Ids reachable from `start`, following every possible transition
pub fn reachable_from<'a>(content: &'a ContentGraph, start: &'a str) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(node) = content.node(id) {
            stack.extend(node.targets().into_iter().filter(|t| !seen.contains(t)));
        }
    }
    seen
}
