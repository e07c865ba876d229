//! Error types for sync-spec.
//!
//! Failures fall into three families: configuration lookups, the ambient
//! git environment, and filesystem I/O. Each family maps to a process exit
//! code in `main`.

use std::path::PathBuf;

/// Result type for sync-spec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by every fallible operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to serialize fixtures: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Problems with `sync_spec.yml` or the record for the current repository.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid YAML: {source}", .path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{} is not valid TOML: {source}", .path.display())]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{identifier} not found in {config}")]
    UnknownRepository { identifier: String, config: String },

    #[error("repo_type not found for {identifier} (which has only [{}])", .keys.join(", "))]
    MissingRepoType { identifier: String, keys: Vec<String> },

    #[error("unsupported repo_type '{repo_type}' for {identifier} (expected puppet_module or rspec_only)")]
    UnsupportedRepoType {
        identifier: String,
        repo_type: String,
    },
}

/// The repository identity could not be read from git.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("failed to run git: {0}")]
    GitUnavailable(#[source] std::io::Error),

    #[error("no 'origin' remote found: {stderr}")]
    NoOrigin { stderr: String },

    #[error("git returned an empty 'origin' remote URL")]
    EmptyOrigin,
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure: 1 for configuration problems,
    /// 2 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 1,
            _ => 2,
        }
    }
}
