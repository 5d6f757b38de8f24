// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Assertions over validation results

use sqlcoach_validator::{ExecutionStep, ValidationResult};

/// Logical evaluation order every execution-step sequence must follow.
const EXECUTION_ORDER: [&str; 7] = [
    "FROM", "JOIN", "WHERE", "GROUP BY", "SELECT", "ORDER BY", "LIMIT",
];

/// Assert the shape invariants every result must satisfy: score bounds,
/// exactly 4 hints, at most 5 next steps, and well-ordered execution steps
///
/// # Panics
///
/// Panics with a descriptive message when an invariant is violated.
pub fn assert_result_shape(result: &ValidationResult) {
    assert!(result.score <= 100, "score out of bounds: {}", result.score);
    assert_eq!(
        result.hints.len(),
        4,
        "hint ladder must have exactly 4 entries, got {}",
        result.hints.len()
    );
    assert!(
        result.hints.iter().all(|h| !h.is_empty()),
        "hint ladder contains an empty entry"
    );
    assert!(
        result.next_steps.len() <= 5,
        "too many next steps: {}",
        result.next_steps.len()
    );
    if result.is_valid {
        assert!(
            result.score >= 70,
            "is_valid with failing score {}",
            result.score
        );
    }
    assert_execution_order(&result.execution_steps);
}

/// Assert execution steps appear as a subsequence of the fixed logical
/// order, numbered 1..k without gaps or duplicates
pub fn assert_execution_order(steps: &[ExecutionStep]) {
    let mut cursor = 0;
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.step, i + 1, "step numbers must be sequential from 1");
        let position = EXECUTION_ORDER[cursor..]
            .iter()
            .position(|op| *op == step.operation)
            .unwrap_or_else(|| {
                panic!(
                    "operation {:?} out of order (or unknown) at index {i}",
                    step.operation
                )
            });
        cursor += position + 1;
    }
}
