// ABOUTME: Error types for rendering a named template to an output sink
// ABOUTME: Separates resolution, execution, and sink write failures

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot resolve template: {0}")]
    Resolve(#[from] TemplateError),

    #[error("Error executing template {name}: {source}")]
    ExecutionFailure {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Error writing rendered template {name}: {source}")]
    WriteFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resolve(e) => e.kind(),
            Self::ExecutionFailure { .. } => "ExecutionFailure",
            Self::WriteFailure { .. } => "WriteFailure",
        }
    }

    /// Whether anything may have reached the sink before the failure
    pub fn may_have_written(&self) -> bool {
        matches!(self, Self::WriteFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
