//! Template rendering: concatenate fragments, substitute placeholders,
//! write the result.
//!
//! Placeholders are literal tokens, conventionally `##NAME##`. Substitution
//! runs pair by pair in insertion order over the whole buffer, so a value
//! inserted by an earlier pair can be rewritten by a later one.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Ordered `token -> value` replacements applied to rendered content.
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a replacement; returns `self` for chaining.
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((token.into(), value.into()));
        self
    }

    /// Replace every occurrence of each token, one pair at a time.
    pub fn apply(&self, content: &str) -> String {
        let mut out = content.to_string();
        for (token, value) in &self.pairs {
            if token.is_empty() {
                continue;
            }
            out = out.replace(token.as_str(), value);
        }
        out
    }
}

/// Read an optional fragment. Unreadable fragments yield `None` and
/// contribute nothing to the rendered file.
pub fn read_fragment(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::debug!(fragment = %path.display(), error = %e, "skipping unreadable fragment");
            None
        }
    }
}

/// Concatenate fragments in order and apply `subs`, without writing.
pub fn compose(fragments: &[PathBuf], subs: &Substitutions) -> String {
    let content: String = fragments
        .iter()
        .filter_map(|p| read_fragment(p))
        .collect();
    subs.apply(&content)
}

/// Render `fragments` with `subs` into `destination`, replacing any
/// existing file. Parent directories must already exist.
pub fn render(fragments: &[PathBuf], destination: &Path, subs: &Substitutions) -> Result<()> {
    let content = compose(fragments, subs);
    fs::write(destination, content).map_err(|e| Error::io(destination, e))?;
    tracing::debug!(dest = %destination.display(), "rendered template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_concatenates_and_substitutes() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("head.yml");
        let b = dir.path().join("body.yml");
        fs::write(&a, "name: ##SHORT_NAME##\n").unwrap();
        fs::write(&b, "deps: ##SHORT_NAME##-deps").unwrap();
        let dest = dir.path().join("out.yml");

        let subs = Substitutions::new().with("##SHORT_NAME##", "nginx");
        render(&[a, b], &dest, &subs).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "name: nginx\ndeps: nginx-deps"
        );
    }

    #[test]
    fn test_missing_fragment_is_empty() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present");
        fs::write(&present, "kept").unwrap();
        let absent = dir.path().join("absent");
        assert_eq!(read_fragment(&absent), None);

        let dest = dir.path().join("out");
        render(&[absent.clone(), present, absent], &dest, &Substitutions::new()).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "kept");
    }

    #[test]
    fn test_substitution_is_iterative_in_order() {
        let subs = Substitutions::new()
            .with("##A##", "x ##B##")
            .with("##B##", "y");
        assert_eq!(subs.apply("##A## / ##B##"), "x y / y");

        // Reverse order: ##B## is gone before ##A## introduces it.
        let subs = Substitutions::new()
            .with("##B##", "y")
            .with("##A##", "x ##B##");
        assert_eq!(subs.apply("##A## / ##B##"), "x ##B## / y");
    }

    #[test]
    fn test_tokens_are_literal() {
        let subs = Substitutions::new().with("$.*", "[dollar]");
        assert_eq!(subs.apply("a$.*b $.x"), "a[dollar]b $.x");
    }

    #[test]
    fn test_render_is_deterministic_and_overwrites() {
        let dir = tempdir().unwrap();
        let frag = dir.path().join("t");
        fs::write(&frag, "facts:\n##STUBBED_FACTS##end\n").unwrap();
        let dest = dir.path().join("out");
        fs::write(&dest, "previous content that is longer").unwrap();
        let subs = Substitutions::new().with("##STUBBED_FACTS##", "  a\n");

        render(&[frag.clone()], &dest, &subs).unwrap();
        let first = fs::read(&dest).unwrap();
        render(&[frag], &dest, &subs).unwrap();
        assert_eq!(first, fs::read(&dest).unwrap());
        assert_eq!(first, b"facts:\n  a\nend\n");
    }

    #[test]
    fn test_render_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing/out.rb");
        let err = render(&[], &dest, &Substitutions::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
