// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for the validation engine
//!
//! Learner input is never an error; every learner-facing problem is folded
//! into the returned `ValidationResult`. The variants here all represent
//! content-authoring bugs in an exercise or catalog.

use thiserror::Error;

/// Result type alias for validation operations
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Errors that can occur while validating a query
#[derive(Debug, Error)]
pub enum ValidateError {
    /// An authored `forbidden_patterns` regex failed to compile
    #[error("Invalid forbidden pattern '{pattern}': {message}")]
    InvalidForbiddenPattern { pattern: String, message: String },

    /// The injected mistake catalog failed to build
    #[error(transparent)]
    Catalog(#[from] sqlcoach_catalog::CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_forbidden_pattern() {
        let err = ValidateError::InvalidForbiddenPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("("));
        assert!(msg.contains("unclosed group"));
    }
}
