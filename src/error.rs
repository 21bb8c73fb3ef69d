//! Error types surfaced at the generation boundary

use std::path::PathBuf;
use thiserror::Error;

use crate::golang::parser::ParseError;
use crate::golang::position::Position;

/// Errors raised while rendering or formatting generated output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No renderer registered under this name
    #[error("renderer '{0}' not found")]
    NotFound(String),
    /// The rendered text is not valid source for its target language
    #[error("generated source is invalid at {position}: {message}")]
    Syntax { message: String, position: Position },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("failed to write rendered output")]
    Write(#[from] std::fmt::Error),
}

/// Any failure of a generation run. There is no partial output: the first
/// error aborts the run before anything is written.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("parse error in {file}:{source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("value for defined tag: {key} not found ({structure}.{field})")]
    MissingTag {
        key: String,
        structure: String,
        field: String,
    },

    #[error("no struct names given, nothing to do")]
    NothingRequested,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CodegenError {
    pub(crate) fn parse(file: impl Into<String>, source: ParseError) -> Self {
        CodegenError::Parse {
            file: file.into(),
            source,
        }
    }
}
