//! Project scaffolding for `init`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::error::ProposalError;
use crate::metadata::METADATA_FILE_NAME;

/// Starter metadata written into new projects.
pub const METADATA_TEMPLATE: &str = include_str!("../templates/metadata_template.json");

/// Directory name for a client: upper case, spaces and `/` replaced by `_`.
///
/// A name made only of dots becomes underscores, so the result is always a
/// single directory below the projects root.
pub fn safe_project_name(client_name: &str) -> String {
    let name: String = client_name
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if name.chars().all(|c| c == '.') {
        name.replace('.', "_")
    } else {
        name
    }
}

/// Create `<base_dir>/<SAFE_NAME>/metadata.json` from the starter template.
///
/// Returns the project directory.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] for a blank client name,
/// [`ProposalError::Io`] if the metadata file already exists or cannot be
/// written, and [`ProposalError::MalformedInput`] if the packaged template is
/// not valid JSON.
pub fn init_project(
    client_name: &str,
    base_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ProposalError> {
    let client_name = client_name.trim();
    if client_name.is_empty() {
        return Err(ProposalError::missing("metadata.client_name"));
    }

    let project_dir = base_dir.join(safe_project_name(client_name));
    let metadata_path = project_dir.join(METADATA_FILE_NAME);
    if metadata_path.exists() {
        return Err(ProposalError::Io {
            path: metadata_path,
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "project already initialized",
            ),
        });
    }

    let contents = starter_metadata(client_name, date)?;
    std::fs::create_dir_all(&project_dir).map_err(|source| ProposalError::Io {
        path: project_dir.clone(),
        source,
    })?;
    std::fs::write(&metadata_path, contents).map_err(|source| ProposalError::Io {
        path: metadata_path.clone(),
        source,
    })?;

    info!(client = client_name, path = %project_dir.display(), "project initialized");
    Ok(project_dir)
}

/// Starter metadata with the client name and date filled in.
///
/// # Errors
///
/// Returns [`ProposalError::MalformedInput`] if the packaged template is invalid.
pub fn starter_metadata(client_name: &str, date: NaiveDate) -> Result<String, ProposalError> {
    let mut template: Value = serde_json::from_str(METADATA_TEMPLATE)
        .map_err(|e| ProposalError::MalformedInput(format!("metadata template: {e}")))?;
    let info = template
        .as_object_mut()
        .ok_or_else(|| ProposalError::MalformedInput("metadata template is not an object".into()))?
        .entry("metadata")
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    let info = info
        .as_object_mut()
        .ok_or_else(|| ProposalError::MalformedInput("metadata group is not an object".into()))?;
    info.insert("client_name".into(), Value::String(client_name.to_owned()));
    info.insert(
        "proposal_date".into(),
        Value::String(date.format("%Y-%m-%d").to_string()),
    );

    let mut out = serde_json::to_string_pretty(&template)
        .map_err(|e| ProposalError::MalformedInput(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
