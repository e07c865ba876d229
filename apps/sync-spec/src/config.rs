//! Config store discovery and effective settings resolution.
//!
//! The config store lives in the tool directory next to the skeleton and
//! template sets. It maps each repository's origin URL to a
//! `RepositoryConfig` record:
//!
//! ```yaml
//! git@github.com:acme/puppet-nginx.git:
//!   repo_type: puppet_module
//!   fixtures:
//!     stdlib:
//!       repo: https://github.com/puppetlabs/puppetlabs-stdlib.git
//!   stubbed_facts:
//!     osfamily: RedHat
//! ```
//!
//! `sync_spec.yml` is canonical; `sync_spec.yaml` and `sync_spec.toml` are
//! accepted as alternatives.
//!
//! Overrides precedence: CLI > environment > defaults.

use crate::error::{ConfigError, Result};
use crate::models::repo::{RepoType, RepositoryConfig};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Candidate file names, in order, inside the tool directory.
pub const CONFIG_FILES: [&str; 3] = ["sync_spec.yml", "sync_spec.yaml", "sync_spec.toml"];

#[derive(Debug, Clone)]
/// Fully-resolved run settings after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub tool_dir: PathBuf,
    pub output: String,
}

/// Resolve `Effective` from CLI flags and defaults.
///
/// The tool directory defaults to the directory holding the running
/// executable; the repository root defaults to the current directory.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_tool_dir: Option<&str>,
    cli_output: Option<&str>,
) -> Effective {
    let repo_root = PathBuf::from(cli_repo_root.unwrap_or("."));
    let tool_dir = cli_tool_dir
        .map(PathBuf::from)
        .unwrap_or_else(default_tool_dir);
    let output = cli_output
        .map(|s| s.to_string())
        .unwrap_or_else(|| "human".to_string());
    Effective {
        repo_root,
        tool_dir,
        output,
    }
}

fn default_tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone)]
/// Repository records loaded from the config file.
pub struct ConfigStore {
    path: PathBuf,
    entries: HashMap<String, Option<RepositoryConfig>>,
}

impl ConfigStore {
    /// Find the config file inside `tool_dir`.
    ///
    /// Reports the canonical `sync_spec.yml` as missing when none of the
    /// candidates exist.
    pub fn locate(tool_dir: &Path) -> Result<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| tool_dir.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| {
                ConfigError::Missing {
                    path: tool_dir.join(CONFIG_FILES[0]),
                }
                .into()
            })
    }

    /// Load and parse the config file at `path`. The format follows the
    /// extension: `.toml` is parsed as TOML, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let entries = if is_toml {
            toml::from_str(&s).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?
        };
        tracing::debug!(path = %path.display(), "loaded config store");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Look up `identifier` and validate its `repo_type`.
    pub fn lookup(&self, identifier: &str) -> Result<(RepoType, &RepositoryConfig)> {
        let record = self.entries.get(identifier).ok_or_else(|| {
            ConfigError::UnknownRepository {
                identifier: identifier.to_string(),
                config: self.file_name(),
            }
        })?;
        let Some(record) = record.as_ref() else {
            return Err(ConfigError::MissingRepoType {
                identifier: identifier.to_string(),
                keys: Vec::new(),
            }
            .into());
        };
        let Some(tag) = record.repo_type() else {
            return Err(ConfigError::MissingRepoType {
                identifier: identifier.to_string(),
                keys: record.keys(),
            }
            .into());
        };
        let repo_type = RepoType::parse(tag).ok_or_else(|| ConfigError::UnsupportedRepoType {
            identifier: identifier.to_string(),
            repo_type: tag.to_string(),
        })?;
        Ok((repo_type, record))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    const ORIGIN: &str = "git@github.com:acme/puppet-nginx.git";

    fn write_store(dir: &Path, name: &str, body: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn test_load_yaml_and_lookup() {
        let dir = tempdir().unwrap();
        let p = write_store(
            dir.path(),
            "sync_spec.yml",
            r#"
git@github.com:acme/puppet-nginx.git:
  repo_type: puppet_module
  fixtures:
    stdlib:
      ref: main
https://example.com/data.git:
  repo_type: rspec_only
"#,
        );
        let store = ConfigStore::load(&p).unwrap();
        let (ty, cfg) = store.lookup(ORIGIN).unwrap();
        assert_eq!(ty, RepoType::PuppetModule);
        assert!(cfg.fixtures.is_some());
        let (ty, _) = store.lookup("https://example.com/data.git").unwrap();
        assert_eq!(ty, RepoType::RspecOnly);
    }

    #[test]
    fn test_load_toml_alternative() {
        let dir = tempdir().unwrap();
        let p = write_store(
            dir.path(),
            "sync_spec.toml",
            r#"
["git@github.com:acme/puppet-nginx.git"]
repo_type = "puppet_module"
no_init_spec = true

["git@github.com:acme/puppet-nginx.git".stubbed_facts]
osfamily = "RedHat"
"#,
        );
        assert_eq!(ConfigStore::locate(dir.path()).unwrap(), p);
        let store = ConfigStore::load(&p).unwrap();
        let (_, cfg) = store.lookup(ORIGIN).unwrap();
        assert!(cfg.no_init_spec());
        assert_eq!(cfg.stubbed_facts.as_ref().map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        match ConfigStore::locate(dir.path()) {
            Err(Error::Config(ConfigError::Missing { path })) => {
                assert!(path.ends_with("sync_spec.yml"))
            }
            other => panic!("unexpected: {other:?}"),
        }
        let p = write_store(dir.path(), "sync_spec.yml", "key: [unterminated\n");
        assert!(matches!(
            ConfigStore::load(&p),
            Err(Error::Config(ConfigError::ParseYaml { .. }))
        ));
    }

    #[test]
    fn test_lookup_failures() {
        let dir = tempdir().unwrap();
        let p = write_store(
            dir.path(),
            "sync_spec.yml",
            r#"
no-type:
  fixtures: {}
null-record:
odd-type:
  repo_type: ansible_role
"#,
        );
        let store = ConfigStore::load(&p).unwrap();

        match store.lookup("elsewhere") {
            Err(Error::Config(ConfigError::UnknownRepository { identifier, config })) => {
                assert_eq!(identifier, "elsewhere");
                assert_eq!(config, "sync_spec.yml");
            }
            other => panic!("unexpected: {other:?}"),
        }
        match store.lookup("no-type") {
            Err(Error::Config(ConfigError::MissingRepoType { keys, .. })) => {
                assert_eq!(keys, vec!["fixtures"])
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            store.lookup("null-record"),
            Err(Error::Config(ConfigError::MissingRepoType { .. }))
        ));
        assert!(matches!(
            store.lookup("odd-type"),
            Err(Error::Config(ConfigError::UnsupportedRepoType { .. }))
        ));
    }

    #[test]
    fn test_resolve_effective_defaults() {
        let eff = resolve_effective(None, Some("/opt/sync-spec"), None);
        assert_eq!(eff.repo_root, PathBuf::from("."));
        assert_eq!(eff.tool_dir, PathBuf::from("/opt/sync-spec"));
        assert_eq!(eff.output, "human");
    }
}
