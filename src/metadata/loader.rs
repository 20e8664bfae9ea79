//! Reading client metadata from JSON text or a project directory.

use std::path::Path;

use tracing::debug;

use crate::error::ProposalError;

use super::ClientMetadata;

/// File name of the metadata document inside a project directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Parse a metadata document.
///
/// Only structurally invalid input fails; absent fields take their defaults.
///
/// # Errors
///
/// Returns [`ProposalError::MalformedInput`] when the text is not valid JSON
/// for the schema (including negative or malformed monetary values).
pub fn parse_metadata(json: &str) -> Result<ClientMetadata, ProposalError> {
    serde_json::from_str(json).map_err(|e| ProposalError::MalformedInput(e.to_string()))
}

/// Read and parse a metadata file.
///
/// # Errors
///
/// Returns [`ProposalError::Io`] if the file cannot be read and
/// [`ProposalError::MalformedInput`] if it does not parse.
pub fn load_metadata(path: &Path) -> Result<ClientMetadata, ProposalError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProposalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = parse_metadata(&contents)?;
    debug!(
        path = %path.display(),
        pillars = metadata.strategy.pillars.len(),
        packages = metadata.investment.packages.len(),
        "metadata loaded"
    );
    Ok(metadata)
}

/// Read `metadata.json` from a project directory.
///
/// # Errors
///
/// Same as [`load_metadata`].
pub fn load_project(project_dir: &Path) -> Result<ClientMetadata, ProposalError> {
    load_metadata(&project_dir.join(METADATA_FILE_NAME))
}
