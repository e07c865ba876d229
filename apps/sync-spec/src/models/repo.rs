//! Per-repository record schema from `sync_spec.yml`.

use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize, Clone)]
/// One repository's entry, keyed by its origin URL in the config store.
pub struct RepositoryConfig {
    #[serde(default)]
    pub repo_type: Option<String>,
    /// Repositories to check out for test fixtures, rendered into `.fixtures.yml`.
    #[serde(default)]
    pub fixtures: Option<Yaml>,
    /// Fact name -> stubbed value, rendered into `spec/spec_helper.rb`.
    #[serde(default)]
    pub stubbed_facts: Option<Mapping>,
    /// `Some` whenever the key is present, even with a null value.
    #[serde(default, deserialize_with = "present")]
    pub no_init_spec: Option<Option<Yaml>>,
    /// Keys this tool does not interpret; kept for diagnostics.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Yaml>,
}

/// Marks a key as present regardless of its value.
fn present<'de, D>(d: D) -> Result<Option<Option<Yaml>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Yaml>::deserialize(d).map(Some)
}

impl RepositoryConfig {
    /// Non-empty `repo_type`, if any.
    pub fn repo_type(&self) -> Option<&str> {
        self.repo_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True when generation of the default init spec is suppressed.
    ///
    /// The key's presence is what counts; its value is ignored.
    pub fn no_init_spec(&self) -> bool {
        self.no_init_spec.is_some()
    }

    /// Names of the keys present in this record, in a stable order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if self.repo_type.is_some() {
            keys.push("repo_type".to_string());
        }
        if self.fixtures.is_some() {
            keys.push("fixtures".to_string());
        }
        if self.stubbed_facts.is_some() {
            keys.push("stubbed_facts".to_string());
        }
        if self.no_init_spec.is_some() {
            keys.push("no_init_spec".to_string());
        }
        keys.extend(self.extra.keys().cloned());
        keys
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Supported repository types. Each selects a skeleton/template set and a
/// sync procedure.
pub enum RepoType {
    PuppetModule,
    RspecOnly,
}

impl RepoType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "puppet_module" => Some(RepoType::PuppetModule),
            "rspec_only" => Some(RepoType::RspecOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::PuppetModule => "puppet_module",
            RepoType::RspecOnly => "rspec_only",
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
