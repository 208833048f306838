//! Branch condition checking

use crate::types::content::{Condition, ContentGraph, NodeKind};
use crate::validate::{ContentIssue, ValidationReport};

const CATEGORY: &str = "conditions";

/// Relationship checks need exactly one bound
pub fn check(content: &ContentGraph, report: &mut ValidationReport) {
    for (id, node) in &content.nodes {
        let NodeKind::Branch {
            condition:
                Condition::RelationshipCheck {
                    character,
                    above,
                    below,
                    ..
                },
        } = &node.kind
        else {
            continue;
        };

        match (above, below) {
            (None, None) => report.add_issue(ContentIssue::error(
                CATEGORY,
                Some(id.as_str()),
                format!("relationship_check on '{}' has neither 'above' nor 'below'", character),
            )),
            (Some(_), Some(_)) => report.add_issue(ContentIssue::warning(
                CATEGORY,
                Some(id.as_str()),
                format!("relationship_check on '{}' has both bounds; 'below' is ignored", character),
            )),
            _ => {}
        }

        if !content.game_state_template.relationships.contains_key(character) {
            report.add_issue(ContentIssue::warning(
                CATEGORY,
                Some(id.as_str()),
                format!("relationship_check on untracked character '{}' always reads 0", character),
            ));
        }
    }
}
