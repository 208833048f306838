//! Content loading: parse, then validate
//!
//! The interpreter never reads files itself; embedders hand it a
//! [`ContentGraph`] produced here.

use crate::error::ContentError;
use crate::types::content::ContentGraph;
use crate::validate::{self, IssueLevel, ValidationReport};
use std::path::Path;

/// Parsed content together with its validation report
#[derive(Debug, Clone)]
pub struct Checked {
    pub content: ContentGraph,
    pub report: ValidationReport,
    /// md5 of the raw JSON text
    pub digest: String,
}

/// Parse and validate, keeping the report even when it has errors
pub fn check_str(json: &str) -> Result<Checked, ContentError> {
    let content: ContentGraph = serde_json::from_str(json)?;
    let report = validate::validate(&content);
    Ok(Checked {
        content,
        report,
        digest: digest(json),
    })
}

/// Parse and validate content; any error-level issue rejects it
pub fn from_json_str(json: &str) -> Result<ContentGraph, ContentError> {
    let Checked {
        content, report, ..
    } = check_str(json)?;

    if report.has_errors() {
        for issue in report.errors() {
            log::error!("{}", issue);
        }
        return Err(ContentError::Invalid { report });
    }
    for issue in report.issues.iter().filter(|i| i.level == IssueLevel::Warning) {
        log::warn!("{}", issue);
    }

    log::debug!(
        "loaded {} nodes, {} characters",
        content.nodes.len(),
        content.characters.npcs.len()
    );
    Ok(content)
}

pub async fn from_file(path: impl AsRef<Path>) -> Result<ContentGraph, ContentError> {
    from_json_str(&read(path.as_ref()).await?)
}

pub async fn read(path: &Path) -> Result<String, ContentError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Hex md5 of content text, for telling content builds apart
pub fn digest(json: &str) -> String {
    format!("{:x}", md5::compute(json.as_bytes()))
}
