//! Repository identity: the `origin` remote URL and its short display name.

use crate::error::{EnvironmentError, Result};
use std::path::Path;
use std::process::Command;

/// Read the `origin` remote URL of the git repository at `repo_root`.
///
/// A missing git binary, a non-zero exit, or empty output are all hard
/// errors. Trailing whitespace is stripped.
pub fn resolve_identifier(repo_root: &Path) -> Result<String> {
    let out = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(repo_root)
        .output()
        .map_err(EnvironmentError::GitUnavailable)?;
    if !out.status.success() {
        return Err(EnvironmentError::NoOrigin {
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }
        .into());
    }
    let identifier = String::from_utf8_lossy(&out.stdout).trim_end().to_string();
    if identifier.is_empty() {
        return Err(EnvironmentError::EmptyOrigin.into());
    }
    tracing::debug!(%identifier, "resolved repository identifier");
    Ok(identifier)
}

/// Derive the display name used in fixture templates.
///
/// Keeps the part of the last path segment after its final `-` and drops a
/// trailing `.git`, so `git@github.com:acme/puppet-nginx.git` yields `nginx`.
pub fn derive_short_name(identifier: &str) -> String {
    let segment = identifier
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(identifier);
    let tail = segment.rsplit('-').next().unwrap_or(segment);
    tail.strip_suffix(".git").unwrap_or(tail).to_string()
}
