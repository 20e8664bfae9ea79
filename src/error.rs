//! Error taxonomy shared by the loader, assembler, compositor and drafter.

use std::path::PathBuf;

use crate::render::sections::SectionId;

/// What went wrong with a skeleton placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderProblem {
    /// The token never appears in the skeleton.
    Missing,
    /// The token appears more than once.
    Duplicated,
    /// The token is not one the compositor knows how to fill.
    Unknown,
}

impl std::fmt::Display for PlaceholderProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Missing => "missing",
            Self::Duplicated => "duplicated",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Errors produced while turning client metadata into a proposal document.
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    /// The input is not valid structured data for the metadata schema.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A required field path is absent or blank.
    #[error("missing required field '{path}'")]
    MissingRequiredField {
        /// Dotted path of the absent field.
        path: String,
    },

    /// The layout skeleton does not carry each placeholder exactly once.
    #[error("template integrity error: placeholder '{token}' is {problem}")]
    TemplateIntegrity {
        /// Placeholder token as written in the skeleton.
        token: String,
        /// Nature of the defect.
        problem: PlaceholderProblem,
    },

    /// The text-generation service did not answer in time.
    #[error("drafting '{section}' timed out after {timeout_secs}s")]
    GenerationTimeout {
        /// Section being drafted.
        section: SectionId,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The text-generation service failed or returned unusable output.
    #[error("drafting '{section}' failed: {reason}")]
    GenerationFailed {
        /// Section being drafted.
        section: SectionId,
        /// Human-readable cause.
        reason: String,
    },

    /// Filesystem failure while reading input or writing output.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl ProposalError {
    /// Build a [`ProposalError::MissingRequiredField`] for a dotted path.
    pub fn missing(path: &str) -> Self {
        Self::MissingRequiredField {
            path: path.to_owned(),
        }
    }

    /// Whether the drafting path may recover by falling back to template text.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::GenerationTimeout { .. } | Self::GenerationFailed { .. }
        )
    }
}
