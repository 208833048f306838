//! Reference integrity checking

use crate::types::content::{ContentGraph, NodeKind};
use crate::validate::{ContentIssue, ValidationReport};

const CATEGORY: &str = "references";

/// Every transition target and the start node must exist
pub fn check(content: &ContentGraph, report: &mut ValidationReport) {
    let start = content.start_node();
    if !content.contains(start) {
        report.add_issue(ContentIssue::error(
            CATEGORY,
            None,
            format!("start node '{}' does not exist", start),
        ));
    }

    for (id, node) in &content.nodes {
        let mut require = |field: &str, target: &str| {
            if !content.contains(target) {
                report.add_issue(ContentIssue::error(
                    CATEGORY,
                    Some(id.as_str()),
                    format!("{} target '{}' does not exist", field, target),
                ));
            }
        };

        match &node.kind {
            NodeKind::Narrative { next: Some(next) } => require("next", next.as_str()),
            NodeKind::Narrative { next: None } | NodeKind::Ending => {}
            NodeKind::Choice { choices } => {
                for (i, choice) in choices.iter().enumerate() {
                    if let Some(next) = &choice.next {
                        require(&format!("choice {} next", i + 1), next.as_str());
                    }
                }
            }
            NodeKind::Branch { condition } => {
                let (if_true, if_false) = condition.targets();
                require("if_true", if_true);
                require("if_false", if_false);
            }
        }
    }
}
