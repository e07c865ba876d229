//! Skeleton copying: mirror a repo type's `<repo_type>_skel` tree into the
//! target repository.
//!
//! All directories are created first (empty ones included), then regular
//! files are copied over whatever already exists. Keep-marker files such as
//! `.gitkeep` only exist to hold empty directories in version control and
//! are never copied.

use crate::error::{Error, Result};
use crate::models::SyncAction;
use glob::Pattern;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static KEEP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.gitkeep$").expect("keep-marker pattern"));

/// True when `name` is a keep-marker file name.
pub fn is_keep_marker(name: &str) -> bool {
    KEEP_MARKER.is_match(name)
}

/// Copy every directory and file under `skeleton_root` into
/// `destination_root`, preserving relative paths.
///
/// `exclude` holds glob patterns matched against paths relative to the
/// skeleton root (a plain relative path matches only itself). Returns the
/// directories created and the files copied.
pub fn copy_tree(
    skeleton_root: &Path,
    destination_root: &Path,
    exclude: &[&str],
) -> Result<Vec<SyncAction>> {
    if !skeleton_root.is_dir() {
        return Err(Error::io(
            skeleton_root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "skeleton directory not found",
            ),
        ));
    }
    let excluded = exclude
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    walk(skeleton_root, Path::new(""), &mut dirs, &mut files)?;

    let mut actions = Vec::new();
    for rel in &dirs {
        let dst = destination_root.join(rel);
        if !dst.is_dir() {
            fs::create_dir_all(&dst).map_err(|e| Error::io(&dst, e))?;
            tracing::debug!(dir = %rel.display(), "created directory");
            actions.push(SyncAction::created_dir(rel));
        }
    }
    for rel in &files {
        let name = rel
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if is_keep_marker(&name) {
            continue;
        }
        if excluded.iter().any(|p| p.matches_path(rel)) {
            tracing::debug!(file = %rel.display(), "excluded from skeleton copy");
            continue;
        }
        let src = skeleton_root.join(rel);
        let dst = destination_root.join(rel);
        fs::copy(&src, &dst).map_err(|e| Error::io(&dst, e))?;
        tracing::debug!(file = %rel.display(), "copied skeleton file");
        actions.push(SyncAction::copied(&src, rel));
    }
    Ok(actions)
}

/// Collect directories and regular files below `root.join(rel)` as paths
/// relative to `root`, sorted per directory.
fn walk(root: &Path, rel: &Path, dirs: &mut Vec<PathBuf>, files: &mut Vec<PathBuf>) -> Result<()> {
    let dir = root.join(rel);
    let mut entries = fs::read_dir(&dir)
        .map_err(|e| Error::io(&dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(&dir, e))?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let child = rel.join(entry.file_name());
        let meta = fs::metadata(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
        if meta.is_dir() {
            dirs.push(child.clone());
            walk(root, &child, dirs, files)?;
        } else if meta.is_file() {
            files.push(child);
        }
    }
    Ok(())
}
