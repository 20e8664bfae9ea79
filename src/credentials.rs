//! Credential loading from the runtime `.env` file and the process environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::runtime_paths;

/// Anthropic API key variable.
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Optional Ollama base URL variable.
pub const OLLAMA_URL: &str = "OLLAMA_URL";

/// Variables the process environment may override.
const ENV_OVERRIDES: &[&str] = &[ANTHROPIC_API_KEY, OLLAMA_URL];

/// Runtime credentials.
#[derive(Clone, Default)]
pub struct Credentials {
    vars: BTreeMap<String, String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("keys", &self.vars.keys().collect::<Vec<_>>())
            .field("values", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from a key-value map.
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    /// Returns a credential value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Overlay known variables from an environment resolver.
    ///
    /// Takes a resolver function so tests avoid mutating the process environment.
    pub fn overlay(&mut self, env: impl Fn(&str) -> Option<String>) {
        for key in ENV_OVERRIDES {
            if let Some(value) = env(key).filter(|v| !v.trim().is_empty()) {
                debug!(key, "credential overridden from environment");
                self.vars.insert((*key).to_owned(), value);
            }
        }
    }
}

/// Load credentials from a specific `.env` path.
///
/// # Errors
///
/// Returns an error if the file does not exist, permissions are too broad,
/// or parsing fails.
pub fn load_credentials(path: &Path) -> anyhow::Result<Credentials> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "credentials file does not exist: {}",
            path.display()
        ));
    }

    validate_private_permissions(path)?;

    let mut vars = BTreeMap::new();
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to read credentials at {}", path.display()))?;

    for item in iter {
        let (key, value) = item.with_context(|| {
            format!(
                "failed to parse key-value entry in credentials file {}",
                path.display()
            )
        })?;
        vars.insert(key, value);
    }

    Ok(Credentials { vars })
}

/// Load `~/.proposal-generator/.env` when present, then overlay the process
/// environment.
///
/// # Errors
///
/// Returns an error when runtime paths cannot be resolved or an existing
/// credentials file is invalid.
pub fn load_default_credentials() -> anyhow::Result<Credentials> {
    let paths = runtime_paths()?;
    let mut credentials = if paths.env_file.exists() {
        load_credentials(&paths.env_file)?
    } else {
        Credentials::default()
    };
    credentials.overlay(|key| std::env::var(key).ok());
    Ok(credentials)
}

#[cfg(unix)]
fn validate_private_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to inspect credentials file {}", path.display()))?;
    let mode = metadata.permissions().mode() & 0o777;

    if mode & 0o077 != 0 {
        return Err(anyhow::anyhow!(
            "credentials file {} must be 0600, found {:o}",
            path.display(),
            mode
        ));
    }

    Ok(())
}

#[cfg(not(unix))]
fn validate_private_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
