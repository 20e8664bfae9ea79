//! Generation pipeline: metadata → fragments → composed document → file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ProposalError;
use crate::layout::{self, Branding, DocumentParts, Skeleton};
use crate::metadata::ClientMetadata;
use crate::render::{render_section, Fragment, SectionId};

/// A finished proposal: one self-contained HTML string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDocument {
    html: String,
}

impl ProposalDocument {
    /// The document HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Take the HTML.
    pub fn into_html(self) -> String {
        self.html
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.html.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Render all eight sections in document order.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] when the client name is absent.
pub fn render_fragments(metadata: &ClientMetadata) -> Result<Vec<Fragment>, ProposalError> {
    metadata.validate()?;
    SectionId::ALL
        .into_iter()
        .map(|section| render_section(section, metadata))
        .collect()
}

/// Compose fragments, cover, navigation and footer into the skeleton.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] when the client name is absent.
pub fn assemble_document(
    metadata: &ClientMetadata,
    fragments: &[Fragment],
    skeleton: &Skeleton,
    branding: &Branding,
) -> Result<ProposalDocument, ProposalError> {
    let parts = DocumentParts {
        title: layout::document_title(metadata)?,
        stylesheet: layout::stylesheet(),
        cover: layout::render_cover(metadata, branding)?,
        nav: layout::build_nav(fragments.iter().map(|fragment| fragment.section)),
        sections: layout::render_body(fragments),
        footer: layout::render_footer(metadata, branding),
    };
    let html = layout::compose(skeleton, &parts);
    debug!(bytes = html.len(), sections = fragments.len(), "composed proposal");
    Ok(ProposalDocument { html })
}

/// Render and compose with the embedded skeleton.
///
/// # Errors
///
/// Returns [`ProposalError::MissingRequiredField`] or [`ProposalError::TemplateIntegrity`].
pub fn generate_proposal(
    metadata: &ClientMetadata,
    branding: &Branding,
) -> Result<ProposalDocument, ProposalError> {
    let skeleton = Skeleton::embedded()?;
    let fragments = render_fragments(metadata)?;
    assemble_document(metadata, &fragments, &skeleton, branding)
}

/// Write the document in one step.
///
/// The HTML goes to a sibling `.tmp` file that is renamed over `path`, so a
/// failed write never leaves a truncated document behind. Parent directories
/// are created as needed.
///
/// # Errors
///
/// Returns [`ProposalError::Io`] naming the path that failed.
pub fn write_document(document: &ProposalDocument, path: &Path) -> Result<(), ProposalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ProposalError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp_path = temp_path_for(path);
    std::fs::write(&tmp_path, document.html()).map_err(|source| ProposalError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(ProposalError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(path = %path.display(), bytes = document.len(), "proposal written");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "proposal.html".into());
    name.push(".tmp");
    path.with_file_name(name)
}
