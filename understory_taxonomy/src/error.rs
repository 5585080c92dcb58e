// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while loading and building a forest.

use alloc::string::String;

/// Problems found while building a [`Forest`](crate::Forest) from authored data.
///
/// The bundled dataset is trusted, so these indicate a defect in the data
/// rather than a condition to recover from at runtime.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// Two taxa derived the same identifier.
    #[error("duplicate taxon id `{id}`")]
    DuplicateId {
        /// The identifier that was seen twice.
        id: String,
    },
    /// A taxon has no canonical or scientific name that yields an identifier.
    #[error("taxon of rank `{rank}` has neither a canonical nor a scientific name")]
    MissingName {
        /// Rank of the offending taxon.
        rank: String,
    },
    /// The JSON source could not be parsed.
    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] JsonError),
}

/// A bundled JSON document (dataset or allow-list) could not be parsed.
#[cfg(feature = "json")]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed JSON at line {line}, column {column}: {message}")]
pub struct JsonError {
    /// 1-based line of the error.
    pub line: usize,
    /// 1-based column of the error.
    pub column: usize,
    /// Parser message.
    pub message: String,
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        use alloc::string::ToString;
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
