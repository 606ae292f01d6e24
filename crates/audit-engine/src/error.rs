//! Error types for the audit engine

use thiserror::Error;

/// Rule table validation errors, raised before any scanning begins.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rule table is empty")]
    EmptyTable,

    #[error("rule '{concept}' has an empty keyword list")]
    EmptyKeywords { concept: String },

    #[error("rule '{concept}' contains a blank keyword")]
    BlankKeyword { concept: String },

    #[error("duplicate concept identifier '{concept}' in rule table")]
    DuplicateConcept { concept: String },

    #[error("failed to parse rule table")]
    Parse(#[source] serde_json::Error),

    #[error("failed to compile context pattern for rule '{concept}'")]
    Pattern {
        concept: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors returned by an analyze call.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
