//! Sync orchestration for the current repository.
//!
//! A run builds one immutable `SyncContext` (identity, config record, repo
//! type) and dispatches on `RepoType`:
//! - `puppet_module`: copy the skeleton, then render `.fixtures.yml`,
//!   `spec/spec_helper.rb` and, for modules without their own class specs,
//!   `spec/classes/init_spec.rb`.
//! - `rspec_only`: copy the skeleton.

use crate::config::ConfigStore;
use crate::error::{Error, Result};
use crate::identity;
use crate::models::repo::{RepoType, RepositoryConfig};
use crate::models::SyncAction;
use crate::skeleton;
use crate::template::{self, Substitutions};
use serde_yaml::{Mapping, Value as Yaml};
use std::fs;
use std::path::{Path, PathBuf};

/// Entries of `spec/classes` that still allow installing the default init spec.
const INIT_SPEC_ALLOWED: [&str; 2] = [".gitkeep", "readme_spec.rb"];

const SPEC_CLASSES_DIR: &str = "spec/classes";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Skeleton and template directories for one repo type.
pub struct TemplateSet {
    pub templates: PathBuf,
    pub skel: PathBuf,
}

impl TemplateSet {
    pub fn for_type(tool_dir: &Path, repo_type: RepoType) -> Self {
        Self {
            templates: tool_dir.join(format!("{}_templates", repo_type)),
            skel: tool_dir.join(format!("{}_skel", repo_type)),
        }
    }

    /// Path of a named fragment inside the templates directory.
    pub fn fragment(&self, name: &str) -> PathBuf {
        self.templates.join(name)
    }
}

#[derive(Debug, Clone)]
/// Everything a sync needs, resolved once at startup.
pub struct SyncContext {
    pub tool_dir: PathBuf,
    pub repo_root: PathBuf,
    pub identifier: String,
    pub short_name: String,
    pub repo_type: RepoType,
    pub config: RepositoryConfig,
}

impl SyncContext {
    /// Resolve the origin of `repo_root`, load the config store from
    /// `tool_dir` and validate the matching record.
    ///
    /// Nothing is written before this succeeds.
    pub fn initialize(tool_dir: &Path, repo_root: &Path) -> Result<Self> {
        let identifier = identity::resolve_identifier(repo_root)?;
        let store = ConfigStore::load(&ConfigStore::locate(tool_dir)?)?;
        Self::from_store(tool_dir, repo_root, identifier, &store)
    }

    /// Build a context for an already-known identifier.
    pub fn from_store(
        tool_dir: &Path,
        repo_root: &Path,
        identifier: String,
        store: &ConfigStore,
    ) -> Result<Self> {
        let (repo_type, config) = store.lookup(&identifier)?;
        tracing::debug!(%identifier, %repo_type, "matched repository config");
        Ok(Self {
            tool_dir: tool_dir.to_path_buf(),
            repo_root: repo_root.to_path_buf(),
            short_name: identity::derive_short_name(&identifier),
            identifier,
            repo_type,
            config: config.clone(),
        })
    }

    pub fn template_set(&self) -> TemplateSet {
        TemplateSet::for_type(&self.tool_dir, self.repo_type)
    }
}

/// Run the sync procedure for the context's repo type.
pub fn run_sync(ctx: &SyncContext) -> Result<Vec<SyncAction>> {
    tracing::info!(identifier = %ctx.identifier, repo_type = %ctx.repo_type, "syncing");
    match ctx.repo_type {
        RepoType::PuppetModule => sync_puppet_module(ctx),
        RepoType::RspecOnly => sync_rspec_only(ctx),
    }
}

/// Skeleton, fixtures, spec helper and (conditionally) a default init spec.
fn sync_puppet_module(ctx: &SyncContext) -> Result<Vec<SyncAction>> {
    let set = ctx.template_set();
    let mut actions = skeleton::copy_tree(&set.skel, &ctx.repo_root, &[])?;
    actions.push(install_fixtures(ctx, &set)?);
    actions.push(install_spec_helper(ctx, &set)?);
    actions.push(install_init_spec(ctx, &set)?);
    Ok(actions)
}

/// Skeleton only, for data-only test suites.
fn sync_rspec_only(ctx: &SyncContext) -> Result<Vec<SyncAction>> {
    skeleton::copy_tree(&ctx.template_set().skel, &ctx.repo_root, &[])
}

fn install_template(
    ctx: &SyncContext,
    set: &TemplateSet,
    fragment: &str,
    dest: &str,
    subs: &Substitutions,
) -> Result<SyncAction> {
    let src = set.fragment(fragment);
    template::render(&[src.clone()], &ctx.repo_root.join(dest), subs)?;
    Ok(SyncAction::rendered(&src, Path::new(dest)))
}

fn install_fixtures(ctx: &SyncContext, set: &TemplateSet) -> Result<SyncAction> {
    let subs = Substitutions::new()
        .with("##FIXTURES##", fixtures_block(ctx.config.fixtures.as_ref())?)
        .with("##SHORT_NAME##", ctx.short_name.as_str());
    install_template(ctx, set, ".fixtures.yml", ".fixtures.yml", &subs)
}

fn install_spec_helper(ctx: &SyncContext, set: &TemplateSet) -> Result<SyncAction> {
    let subs = Substitutions::new().with(
        "##STUBBED_FACTS##",
        stubbed_facts_block(ctx.config.stubbed_facts.as_ref()),
    );
    install_template(ctx, set, "spec_helper.rb", "spec/spec_helper.rb", &subs)
}

/// Install `spec/classes/init_spec.rb` unless suppressed by config or the
/// module already has class specs of its own.
fn install_init_spec(ctx: &SyncContext, set: &TemplateSet) -> Result<SyncAction> {
    let dest = Path::new(SPEC_CLASSES_DIR).join("init_spec.rb");
    if ctx.config.no_init_spec() {
        tracing::debug!("init spec suppressed by no_init_spec");
        return Ok(SyncAction::skipped(&dest, "no_init_spec is set"));
    }
    if !spec_classes_pristine(&ctx.repo_root.join(SPEC_CLASSES_DIR))? {
        tracing::debug!("spec/classes already holds specs; leaving it alone");
        return Ok(SyncAction::skipped(
            &dest,
            "spec/classes already contains spec files",
        ));
    }
    install_template(
        ctx,
        set,
        "init_spec.rb",
        &dest.to_string_lossy(),
        &Substitutions::new(),
    )
}

/// True when `dir` holds nothing besides the allow-listed entries.
fn spec_classes_pristine(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        if !INIT_SPEC_ALLOWED.iter().any(|a| name == **a) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// YAML for the `##FIXTURES##` placeholder: no document marker, no
/// trailing newline, continuation lines indented by two spaces.
pub fn fixtures_block(fixtures: Option<&Yaml>) -> Result<String> {
    let Some(v) = fixtures.filter(|v| !v.is_null()) else {
        return Ok(String::new());
    };
    let yaml = serde_yaml::to_string(v)?;
    let yaml = yaml.strip_suffix('\n').unwrap_or(&yaml);
    Ok(yaml.replace("---\n", "").replace('\n', "\n  "))
}

/// Ruby hash entries for the `##STUBBED_FACTS##` placeholder, one per fact
/// in config order.
pub fn stubbed_facts_block(facts: Option<&Mapping>) -> String {
    facts
        .map(|m| {
            m.iter()
                .map(|(k, v)| format!("    :{} => '{}',\n", scalar(k), scalar(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn scalar(v: &Yaml) -> String {
    match v {
        Yaml::Null => String::new(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => s.clone(),
        Yaml::Tagged(t) => scalar(&t.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
