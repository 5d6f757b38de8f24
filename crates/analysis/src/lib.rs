// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlcoach - Analysis Layer
//!
//! Lexical and structural analysis of learner SQL text. This crate provides
//! the three cheap, pure front-end stages of the validation pipeline:
//!
//! - [`normalize`]: canonicalize query text for comparison (case folding,
//!   whitespace collapsing, punctuation spacing)
//! - [`check_syntax`]: shallow structural sanity checks that catch the most
//!   common typos before any scoring runs
//! - [`analyze`]: regex-driven feature extraction producing a
//!   [`StructuralAnalysis`] (clause flags, tables, columns, complexity)
//!
//! ## Not a parser
//!
//! There is no grammar and no AST here. Table and column
//! extraction is heuristic and substring-based: it can be fooled by nested
//! subqueries, CTEs reusing an alias, or SQL keywords inside comments and
//! string literals. That is an accepted limitation for a pedagogical static
//! checker; the syntax pre-check is likewise intentionally shallow.

pub mod normalize;
pub mod structure;
pub mod syntax;

// Re-exports
pub use normalize::normalize;
pub use structure::{
    analyze, extract_clause, extract_columns, extract_tables, key_elements, Complexity,
    StructuralAnalysis,
};
pub use syntax::{check_syntax, SyntaxError};
