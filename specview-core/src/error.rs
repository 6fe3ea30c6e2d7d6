//! Error types for specview-core.

use thiserror::Error;

/// Result type alias for specview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for specview operations.
///
/// Only construction-time contract violations are errors. Data-shape problems
/// (empty ranges, malformed filters, unknown specimens) degrade to sentinel
/// values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid viewer configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A site or specimen name was empty.
    #[error("empty name in catalog")]
    EmptyName,

    /// The same site appears twice in a catalog.
    #[error("duplicate site: {0}")]
    DuplicateSite(String),

    /// The same specimen appears twice within one site.
    #[error("duplicate specimen {specimen} in site {site}")]
    DuplicateSpecimen { site: String, specimen: String },
}
