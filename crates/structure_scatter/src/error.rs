//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, unparsable parameter names, and IO performed by callers around
//! the core.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown algorithm '{name}' (expected \"Region\" or \"Poisson\")")]
    UnknownAlgorithm { name: String },

    #[error("unknown structure type '{name}'")]
    UnknownStructureType { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
