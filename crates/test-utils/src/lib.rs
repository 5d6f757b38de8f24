// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqlcoach
//!
//! This crate provides common testing components including:
//! - Sample SQL queries ([`SqlFixtures`])
//! - Exercise builders for the shapes the curriculum layer ships
//! - Assertions over validation results

pub mod assertions;
pub mod fixtures;

// Re-exports for convenience
pub use assertions::{assert_execution_order, assert_result_shape};
pub use fixtures::{join_exercise, minimal_exercise, select_columns_exercise, SqlFixtures};
