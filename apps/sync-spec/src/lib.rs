//! sync-spec core library.
//!
//! This crate scaffolds rspec support files into repositories of a known
//! type. Each repository is identified by its `origin` remote URL, which
//! selects a record in `sync_spec.yml`; the record's `repo_type` picks a
//! skeleton tree to copy and a set of templates to render.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Config store loading and effective settings resolution.
//! - `identity`: Origin URL lookup via git and short-name derivation.
//! - `skeleton`: Recursive skeleton copying that skips keep-markers.
//! - `template`: Fragment concatenation and literal placeholder substitution.
//! - `sync`: Startup context and per-repo-type sync procedures.
//! - `models`: Config record schema and sync action structs.
//! - `output`: Human/JSON printers for sync results.
//! - `error`: Error types and exit-code mapping.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod output;
pub mod skeleton;
pub mod sync;
pub mod template;
pub mod utils;
