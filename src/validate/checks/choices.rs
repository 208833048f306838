//! Choice node checking

use crate::types::content::{ContentGraph, NodeKind};
use crate::validate::{ContentIssue, ValidationReport};

const CATEGORY: &str = "choices";

/// Keyboard selection covers 1-9
pub const MAX_KEYED_CHOICES: usize = 9;

pub fn check(content: &ContentGraph, report: &mut ValidationReport) {
    for (id, node) in &content.nodes {
        let NodeKind::Choice { choices } = &node.kind else {
            continue;
        };

        if choices.is_empty() {
            report.add_issue(ContentIssue::error(CATEGORY, Some(id.as_str()), "choice node has no choices"));
        } else if choices.len() > MAX_KEYED_CHOICES {
            report.add_issue(ContentIssue::warning(
                CATEGORY,
                Some(id.as_str()),
                format!(
                    "{} choices; only the first {} can be picked by number key",
                    choices.len(),
                    MAX_KEYED_CHOICES
                ),
            ));
        }
    }
}
