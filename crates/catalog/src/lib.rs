// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlcoach - Mistake Catalog Layer
//!
//! This crate provides the catalog of known SQL anti-patterns used by the
//! sqlcoach validation engine. It defines:
//!
//! - [`MistakeDefinition`]: one known anti-pattern with detection patterns,
//!   severity, category, and remediation text
//! - [`MistakeCatalog`]: a frozen, ordered collection of definitions with
//!   compiled patterns and id-based lookup
//! - [`builtin`]: the built-in catalog shipped with the engine
//!
//! ## Architecture
//!
//! The catalog is read-only reference data. It is constructed once (all
//! patterns compile eagerly, all invariants are checked), then shared behind
//! an `Arc` and never mutated. Hot-swapping a catalog means replacing the
//! `Arc`, so an in-flight validation never observes a half-updated catalog.
//!
//! ## Detection semantics
//!
//! A query matches a definition when ANY of its detection patterns matches
//! AND none of its `unless` guard patterns match. Patterns are compiled
//! case-insensitively and tested against the raw learner query.
//! [`MistakeCatalog::detect`] returns matches in catalog order, which is the
//! explicit primary tie-break for "primary mistake" everywhere downstream.
//!
//! ## Usage
//!
//! ```rust
//! use sqlcoach_catalog::builtin;
//!
//! let catalog = builtin();
//! let matches = catalog.detect("DELETE FROM orders;");
//! assert_eq!(matches[0].id, "missing-where");
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod mistake;

// Re-exports
pub use builtin::builtin;
pub use catalog::MistakeCatalog;
pub use error::{CatalogError, CatalogResult};
pub use mistake::{Category, MistakeDefinition, MistakeExample, Severity};
