//! Unified error types for the connector crate.

use thiserror::Error;

/// Top-level error type for fallible connector operations.
///
/// Login and logout deliberately do not return this type; their outcomes
/// are reported through [`LoginOutcome`](crate::session::LoginOutcome)
/// and [`LogoutOutcome`](crate::session::LogoutOutcome) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be resolved, read, or parsed.
    #[error("config: {0}")]
    Config(String),

    /// Chain provider construction or lookup failed.
    #[error("chain: {0}")]
    Chain(String),

    /// A chain was selected by an index the registry does not contain.
    #[error("chain index {index} out of range ({len} chains registered)")]
    IndexOutOfRange {
        /// The requested registry index.
        index: usize,
        /// Number of entries in the registry.
        len: usize,
    },
}

impl Error {
    /// Creates a [`Error::Config`] from a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a [`Error::Config`] from a message and an underlying cause.
    pub fn config_with(msg: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {err}", msg.into()))
    }

    /// Creates a [`Error::Chain`] from a message.
    pub fn chain(msg: impl Into<String>) -> Self {
        Self::Chain(msg.into())
    }

    /// Creates a [`Error::Chain`] from a message and an underlying cause.
    pub fn chain_with(msg: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Chain(format!("{}: {err}", msg.into()))
    }
}
