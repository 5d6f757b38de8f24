// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog construction
//!
//! Catalog errors are content-authoring failures, not learner-input
//! failures: they can only occur while a catalog is being built, never
//! during detection.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building a [`crate::MistakeCatalog`]
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Two definitions share the same id
    #[error("Duplicate mistake id: {0}")]
    DuplicateId(String),

    /// A definition has no detection patterns
    #[error("Mistake '{0}' has no detection patterns")]
    EmptyPatternSet(String),

    /// A detection or guard pattern failed to compile
    #[error("Invalid pattern '{pattern}' in mistake '{id}': {message}")]
    InvalidPattern {
        id: String,
        pattern: String,
        message: String,
    },
}
