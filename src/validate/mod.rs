//! Load-time content validation
//!
//! Catches the mistakes that would otherwise only surface mid-story:
//! - Dangling node references
//! - Branch conditions that cannot route
//! - Choice nodes the player cannot act on
//! - Unreachable content (warnings only)

use crate::types::content::ContentGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod checks;

/// Severity of a content issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLevel {
    /// Content cannot be played
    Error,
    /// Content plays but is probably not what the author meant
    Warning,
}

/// A problem found in the content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIssue {
    pub level: IssueLevel,
    /// Node the issue was found on, if any
    pub node: Option<String>,
    pub message: String,
    /// `references`, `conditions`, `choices` or `flow`
    pub category: String,
}

impl ContentIssue {
    pub fn error(category: &str, node: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(IssueLevel::Error, category, node, message)
    }

    pub fn warning(category: &str, node: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(IssueLevel::Warning, category, node, message)
    }

    fn new(level: IssueLevel, category: &str, node: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level,
            node: node.map(str::to_string),
            message: message.into(),
            category: category.to_string(),
        }
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            IssueLevel::Error => "error",
            IssueLevel::Warning => "warning",
        };
        match &self.node {
            Some(node) => write!(f, "{}[{}] {}: {}", level, self.category, node, self.message),
            None => write!(f, "{}[{}] {}", level, self.category, self.message),
        }
    }
}

/// Result of validating a content graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ContentIssue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: ContentIssue) {
        match issue.level {
            IssueLevel::Error => self.error_count += 1,
            IssueLevel::Warning => self.warning_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ContentIssue> {
        self.issues.iter().filter(|i| i.level == IssueLevel::Error)
    }
}

/// Run every check over the content
pub fn validate(content: &ContentGraph) -> ValidationReport {
    let mut report = ValidationReport::new();

    checks::references::check(content, &mut report);
    checks::conditions::check(content, &mut report);
    checks::choices::check(content, &mut report);
    checks::flow::check(content, &mut report);

    // Node iteration order is unspecified; keep reports stable
    report
        .issues
        .sort_by(|a, b| (a.level as u8, &a.category, &a.node).cmp(&(b.level as u8, &b.category, &b.node)));
    report
}
