// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Validation result types
//!
//! The pipeline's sole output. A [`ValidationResult`] is constructed fully
//! by one validation call, immutable once returned, and never persisted by
//! the engine itself (best-score persistence belongs to the host).

use serde::Serialize;
use sqlcoach_analysis::StructuralAnalysis;
use sqlcoach_catalog::MistakeDefinition;

/// Graded, explainable verdict for one submitted query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// True iff `score >= 70` AND no detected mistake is critical. A
    /// critical mistake forces this false even when the score passes.
    pub is_valid: bool,
    /// Integer score in 0..=100
    pub score: u8,
    /// Primary cause of point loss, if any
    pub issue: Option<String>,
    /// Production consequence of the primary issue, if any
    pub real_world_impact: Option<String>,
    /// The highest-priority matched mistake (catalog order), if any
    pub common_mistake_detected: Option<MistakeDefinition>,
    /// Exactly 4 hints, increasingly specific
    pub hints: Vec<String>,
    /// At most 5 actionable suggestions, strongest first
    pub next_steps: Vec<String>,
    /// Simulated logical evaluation order over the clauses present
    pub execution_steps: Vec<ExecutionStep>,
    /// Per-test-case outcomes (or the single solution-match fallback)
    pub test_results: Vec<TestCaseResult>,
    /// Outcome of the required-elements check
    pub required_check: RequiredCheck,
    /// Outcome of the forbidden-patterns check
    pub forbidden_check: ForbiddenCheck,
    /// False when the syntax pre-check short-circuited
    pub syntax_valid: bool,
    /// The structural analysis the verdict was based on
    pub structure_analysis: StructuralAnalysis,
}

/// One step of the simulated execution-order breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionStep {
    /// Sequential number 1..k over the clauses actually present
    pub step: usize,
    /// Clause name (FROM, JOIN, WHERE, GROUP BY, SELECT, ORDER BY, LIMIT)
    pub operation: String,
    /// Short fixed description of the clause's semantic role
    pub description: String,
    /// Verbatim extracted clause text
    pub clause: String,
}

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub weight: f64,
}

/// Outcome of the required-elements check; all misses are collected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredCheck {
    pub passed: bool,
    pub missing: Vec<String>,
}

impl RequiredCheck {
    pub fn passing() -> Self {
        Self {
            passed: true,
            missing: Vec::new(),
        }
    }
}

/// Outcome of the forbidden-patterns check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForbiddenCheck {
    pub passed: bool,
    pub violations: Vec<String>,
}

impl ForbiddenCheck {
    pub fn passing() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }
}
