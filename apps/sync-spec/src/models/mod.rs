//! Shared data models: config records and the sync action report.

pub mod repo;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
/// What a single sync step did.
pub enum ActionKind {
    CreatedDir,
    Copied,
    Rendered,
    Skipped,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single step performed (or deliberately skipped) during a sync.
pub struct SyncAction {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SyncAction {
    pub fn created_dir(target: &std::path::Path) -> Self {
        Self {
            kind: ActionKind::CreatedDir,
            source: None,
            target: target.to_string_lossy().to_string(),
            reason: None,
        }
    }

    pub fn copied(source: &std::path::Path, target: &std::path::Path) -> Self {
        Self {
            kind: ActionKind::Copied,
            source: Some(source.to_string_lossy().to_string()),
            target: target.to_string_lossy().to_string(),
            reason: None,
        }
    }

    pub fn rendered(source: &std::path::Path, target: &std::path::Path) -> Self {
        Self {
            kind: ActionKind::Rendered,
            source: Some(source.to_string_lossy().to_string()),
            target: target.to_string_lossy().to_string(),
            reason: None,
        }
    }

    pub fn skipped(target: &std::path::Path, reason: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Skipped,
            source: None,
            target: target.to_string_lossy().to_string(),
            reason: Some(reason.into()),
        }
    }
}
