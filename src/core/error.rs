//! Errors surfaced by tree building and document generation

use thiserror::Error;

/// Which guard a tree tripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLimit {
    /// Nesting deeper than allowed
    Depth,
    /// More nodes than allowed
    Nodes,
}

impl std::fmt::Display for TreeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depth => write!(f, "depth"),
            Self::Nodes => write!(f, "node count"),
        }
    }
}

/// Rejections from the generation engine
///
/// Every variant is returned before any buffer leaves a generator, so callers
/// never see a partially written document.
#[derive(Error, Debug)]
pub enum MindMapError {
    /// Requested output kind is not in the supported set
    #[error("unsupported output format: '{0}' (use excel, json, markdown, opml, freemind or image)")]
    UnsupportedFormat(String),

    /// Requested palette is not in the catalog
    #[error("unknown theme: '{0}'")]
    UnknownTheme(String),

    /// The input tree exceeds a configured guard
    #[error("outline exceeds maximum {limit} of {max} (got {actual})")]
    TreeTooLarge {
        /// Which guard
        limit: TreeLimit,
        /// Configured maximum
        max: usize,
        /// Observed value when the guard tripped
        actual: usize,
    },

    /// The computed image would be larger than allowed
    #[error("image canvas {width}x{height} exceeds maximum dimension {max}")]
    CanvasTooLarge {
        /// Computed width
        width: u32,
        /// Computed height
        height: u32,
        /// Configured maximum for either axis
        max: u32,
    },

    /// The outline record could not be parsed
    #[error("invalid outline input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// A serializer backend failed
    #[error("failed to generate {format} output: {message}")]
    Export {
        /// Format being produced
        format: &'static str,
        /// Backend error message
        message: String,
    },

    /// I/O failure while writing an in-memory buffer or reading a resource
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MindMapError {
    /// Wrap a backend error for the given format
    pub fn export(format: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Export {
            format,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = MindMapError::UnsupportedFormat("pdf".to_string());
        assert!(err.to_string().contains("'pdf'"));

        let err = MindMapError::TreeTooLarge {
            limit: TreeLimit::Depth,
            max: 3,
            actual: 4,
        };
        assert_eq!(err.to_string(), "outline exceeds maximum depth of 3 (got 4)");

        let err = MindMapError::export("xlsx", "boom");
        assert_eq!(err.to_string(), "failed to generate xlsx output: boom");
    }
}
