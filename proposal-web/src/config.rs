//! Web server configuration loaded from `~/.proposal-generator/web.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use proposal_generator::layout::Branding;
use proposal_generator::metadata::Contact;

/// Web server configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Socket address to bind.
    pub bind: String,
    /// Email domains allowed to sign in.
    pub allowed_domains: Vec<String>,
    /// Session lifetime in minutes.
    pub session_ttl_mins: u32,
    /// Environment variable holding the shared staff access code.
    pub access_code_env: String,
    /// Sign every visitor in as a development user. Never enable in production.
    pub dev_auto_login: bool,
    /// Cover and footer branding.
    pub branding: Branding,
    /// Contact card placed in the Next Steps section of form-built proposals.
    pub contact: Contact,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_owned(),
            allowed_domains: vec!["mediaforce.ca".to_owned()],
            session_ttl_mins: 480,
            access_code_env: "PROPOSAL_ACCESS_CODE".to_owned(),
            dev_auto_login: false,
            branding: Branding::default(),
            contact: Contact {
                name: Some("Mediaforce Team".to_owned()),
                email: Some("hello@mediaforce.ca".to_owned()),
                phone: Some("613 265 2120".to_owned()),
                website: Some("mediaforce.ca".to_owned()),
            },
        }
    }
}

impl WebConfig {
    /// Whether `email` belongs to an allowed domain.
    pub fn is_allowed_email(&self, email: &str) -> bool {
        let Some((local, domain)) = email.trim().rsplit_once('@') else {
            return false;
        };
        !local.is_empty()
            && self
                .allowed_domains
                .iter()
                .any(|allowed| allowed.trim().eq_ignore_ascii_case(domain))
    }
}

/// Parse configuration from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML for the schema.
pub fn parse_web_config(toml_str: &str) -> anyhow::Result<WebConfig> {
    toml::from_str(toml_str).map_err(|e| anyhow::anyhow!("failed to parse web config: {e}"))
}

/// Load configuration from a file; a missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_web_config(path: &Path) -> anyhow::Result<WebConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::info!(path = %path.display(), "loading web config from file");
            parse_web_config(&contents)
                .map_err(|e| anyhow::anyhow!("invalid web config at {}: {e}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no web config file found, using defaults");
            Ok(WebConfig::default())
        }
        Err(e) => Err(anyhow::anyhow!(
            "failed to read web config at {}: {e}",
            path.display()
        )),
    }
}

/// Default web config path: `~/.proposal-generator/web.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_web_config_path() -> anyhow::Result<PathBuf> {
    Ok(proposal_generator::config::runtime_paths()?
        .root
        .join("web.toml"))
}
