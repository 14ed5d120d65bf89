use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Converter '{program}' not found in PATH")]
    ToolNotFound { program: String },
    #[error("Failed to execute {program}: {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: IoError,
    },
    #[error("{program} exited with {}", exit_desc(.code))]
    ToolFailed { program: String, code: Option<i32> },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("Invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid glyph selector: {0}")]
    InvalidSelector(String),
    #[error("Invalid render parameters: {0}")]
    InvalidParams(String),
}

/// Broad failure category, for callers that pick an exit policy per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The converter could not be started or did not succeed
    Tool,
    /// Reading or writing the generated file failed
    Io,
    /// Manifest, selectors or parameters are invalid
    Config,
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ToolNotFound { .. } | Self::ToolLaunch { .. } | Self::ToolFailed { .. } => {
                FailureKind::Tool
            }
            Self::Io { .. } => FailureKind::Io,
            Self::Manifest { .. } | Self::InvalidSelector(_) | Self::InvalidParams(_) => {
                FailureKind::Config
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[allow(clippy::ref_option)]
fn exit_desc(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("exit code {c}"),
    )
}

pub type FontResult<T> = Result<T, Error>;
