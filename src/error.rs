//! Error types for the pipeline registry.

use thiserror::Error;

use crate::namespace::provider::ProviderError;

/// Registry error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Name is not declared by any contribution
    #[error("Unknown symbol '{name}'")]
    UnknownSymbol { name: String },

    /// A placeholder was used while its capabilities are missing
    #[error("'{symbol}' requires missing capabilities: {}. {hint}", .missing.join(", "))]
    CapabilityUnavailable {
        symbol: String,
        missing: Vec<String>,
        hint: String,
    },

    /// The group's provider failed to load
    #[error("Failed to load provider for group '{group}': {source}")]
    ProviderLoad {
        group: String,
        #[source]
        source: ProviderError,
    },

    /// No provider was registered for a declared group
    #[error("No provider registered for group '{group}'")]
    NoProvider { group: String },

    /// Provider loaded but did not expose a declared member
    #[error("Provider for group '{group}' does not expose declared member '{symbol}'")]
    MissingMember { group: String, symbol: String },

    /// Same symbol declared twice
    #[error("Symbol '{name}' declared by group '{first_group}' and again by group '{second_group}'")]
    DuplicateSymbol {
        name: String,
        first_group: String,
        second_group: String,
    },

    /// Malformed contribution
    #[error("Invalid contribution: {0}")]
    InvalidContribution(String),

    /// Live value is not of the requested type
    #[error("Symbol '{symbol}' is not a {expected}")]
    TypeMismatch {
        symbol: String,
        expected: &'static str,
    },

    /// Global namespace installed twice
    #[error("Global namespace already installed")]
    AlreadyInstalled,

    /// Global namespace used before install
    #[error("Global namespace not installed")]
    NotInstalled,

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
