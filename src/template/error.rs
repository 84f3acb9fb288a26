// ABOUTME: Error types for template store and cache operations
// ABOUTME: Distinguishes unreadable backing stores, parse failures, and rejected template names

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Backing store unreadable at {location}: {source}")]
    BackingStoreUnreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template parse failure in {name}: {source}")]
    ParseFailure {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Invalid template name: {name:?}")]
    InvalidName { name: String },
}

impl TemplateError {
    pub(crate) fn unreadable(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::BackingStoreUnreadable {
            location: location.into(),
            source,
        }
    }

    pub(crate) fn parse(name: impl Into<String>, source: handlebars::TemplateError) -> Self {
        Self::ParseFailure {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Short label of the failure class, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BackingStoreUnreadable { .. } => "BackingStoreUnreadable",
            Self::ParseFailure { .. } => "ParseFailure",
            Self::InvalidName { .. } => "BackingStoreUnreadable",
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
