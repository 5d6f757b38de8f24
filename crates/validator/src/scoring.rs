// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scorer
//!
//! Combines test-case results, detected mistakes, and constraint
//! violations into one 0..=100 score. Deduction model:
//!
//! - test-case shortfall: `(1 - weighted pass ratio) * 40`
//! - every detected mistake by severity: critical 30, high 15, medium 8,
//!   low 4 (multiple mistakes compound)
//! - 10 per missing required element
//! - 10 per forbidden-pattern violation
//!
//! The result is clamped to [0, 100] and rounded to the nearest integer.

use sqlcoach_catalog::{MistakeDefinition, Severity};

use crate::result::{ForbiddenCheck, RequiredCheck, TestCaseResult};

/// Share of the total score attributable to test-case correctness.
const TEST_CASE_SHARE: f64 = 40.0;
/// Deduction per missing required element or forbidden violation.
const CONSTRAINT_PENALTY: f64 = 10.0;

fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 30.0,
        Severity::High => 15.0,
        Severity::Medium => 8.0,
        Severity::Low => 4.0,
    }
}

/// Compute the final score
pub(crate) fn score(
    test_results: &[TestCaseResult],
    mistakes: &[&MistakeDefinition],
    required: &RequiredCheck,
    forbidden: &ForbiddenCheck,
) -> u8 {
    let mut score = 100.0;

    let total_weight: f64 = test_results.iter().map(|tr| tr.weight).sum();
    let passed_weight: f64 = test_results
        .iter()
        .filter(|tr| tr.passed)
        .map(|tr| tr.weight)
        .sum();
    let pass_ratio = if total_weight > 0.0 {
        passed_weight / total_weight
    } else {
        1.0
    };
    score -= (1.0 - pass_ratio) * TEST_CASE_SHARE;

    for mistake in mistakes {
        score -= severity_penalty(mistake.severity);
    }

    score -= required.missing.len() as f64 * CONSTRAINT_PENALTY;
    score -= forbidden.violations.len() as f64 * CONSTRAINT_PENALTY;

    score.clamp(0.0, 100.0).round() as u8
}
