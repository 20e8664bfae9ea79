//! Configuration loading.
//!
//! The generator reads `~/.proposal-generator/config.toml`. Every section is
//! optional; a missing file yields the defaults. Secrets never live here, see
//! [`crate::credentials`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::drafting::FailurePolicy;
use crate::layout::Branding;

/// Name of the runtime directory under the user's home.
pub const RUNTIME_DIR_NAME: &str = ".proposal-generator";

/// Default model spec for drafted sections.
pub const DEFAULT_DRAFTING_MODEL: &str = "anthropic/claude-sonnet-4-5";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Company details for the cover and footer.
    pub branding: Branding,
    /// Where `init` creates projects.
    pub projects: ProjectsConfig,
    /// Drafting path settings.
    pub drafting: DraftingSettings,
}

/// Project directory settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Root for new projects. `~/AI` when unset.
    pub root: Option<PathBuf>,
}

impl ProjectsConfig {
    /// Configured root, or `~/AI`.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is configured and the home directory cannot be determined.
    pub fn resolve_root(&self) -> anyhow::Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        let home = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.home_dir().join("AI"))
    }
}

/// Drafting path settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DraftingSettings {
    /// `provider/model` spec.
    pub model: String,
    /// Per-section request timeout in seconds.
    pub timeout_secs: u64,
    /// What to do when a section cannot be drafted.
    pub on_failure: FailurePolicy,
    /// Override for every section's output token budget.
    pub max_tokens: Option<u32>,
}

impl Default for DraftingSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_DRAFTING_MODEL.to_owned(),
            timeout_secs: 120,
            on_failure: FailurePolicy::default(),
            max_tokens: None,
        }
    }
}

/// Parse configuration from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML for the schema.
pub fn parse_config(toml_str: &str) -> anyhow::Result<Config> {
    toml::from_str(toml_str).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
}

/// Load configuration from a TOML file. A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), "loading config from file");
            parse_config(&contents)
                .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config at {}: {e}",
            path.display()
        )),
    }
}

/// Files under the runtime directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    /// `~/.proposal-generator`
    pub root: PathBuf,
    /// `config.toml`
    pub config_toml: PathBuf,
    /// `.env` with API keys.
    pub env_file: PathBuf,
    /// Log directory for the web server.
    pub logs_dir: PathBuf,
}

impl RuntimePaths {
    /// Paths rooted at `root`.
    pub fn under(root: PathBuf) -> Self {
        Self {
            config_toml: root.join("config.toml"),
            env_file: root.join(".env"),
            logs_dir: root.join("logs"),
            root,
        }
    }
}

/// Resolve `~/.proposal-generator` and the files inside it.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn runtime_paths() -> anyhow::Result<RuntimePaths> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(RuntimePaths::under(home.home_dir().join(RUNTIME_DIR_NAME)))
}
