// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlcoach - Validation Engine
//!
//! The query assessment pipeline: takes free-form SQL typed by a learner
//! and an [`ExerciseSpec`], and produces one graded, explainable
//! [`ValidationResult`] (score, issues, a 4-level hint ladder, next steps,
//! and a simulated execution-order breakdown).
//!
//! ## Pipeline
//!
//! ```text
//! normalize -> syntax pre-check -> structural analysis -> mistake
//! detection -> constraint checks + test cases -> scorer -> explainer
//! ```
//!
//! The syntax pre-check short-circuits to a fully-formed zero-score result,
//! so every input, including gibberish, yields something displayable. The
//! engine never executes SQL against a database; the execution-step
//! narrative is a pedagogical simulation of logical evaluation order.
//!
//! ## Usage
//!
//! ```rust
//! use sqlcoach_validator::{ExerciseSpec, QueryValidator};
//!
//! let exercise = ExerciseSpec::new(
//!     "Select users",
//!     "SELECT name, email FROM users;",
//! );
//! let validator = QueryValidator::with_builtin_catalog();
//! let result = validator
//!     .validate("SELECT name, email FROM users;", &exercise)
//!     .unwrap();
//! assert!(result.is_valid);
//! ```
//!
//! ## Concurrency
//!
//! `validate` is a pure function of its inputs: no I/O, no shared mutable
//! state. A [`QueryValidator`] can be shared freely across threads; the
//! mistake catalog it holds is immutable behind an `Arc`, and hot-swapping
//! a catalog means constructing a new validator around a new `Arc`.
//!
//! ## Error policy
//!
//! Learner input never produces an `Err`. The only propagating error is a
//! malformed authored regex in `ExerciseSpec::forbidden_patterns`, which is
//! a content-authoring bug, not learner data.

pub mod constraints;
pub mod error;
pub mod exercise;
pub mod explain;
pub mod result;
pub mod scoring;
pub mod validator;

// Re-exports
pub use error::{ValidateError, ValidateResult};
pub use exercise::{ExerciseSchema, ExerciseSpec, SchemaColumn, SchemaTable, TestCase};
pub use result::{
    ExecutionStep, ForbiddenCheck, RequiredCheck, TestCaseResult, ValidationResult,
};
pub use validator::{validate_query, QueryValidator};
