// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query validator
//!
//! Pipeline orchestration: one `validate` call runs the whole assessment
//! synchronously and returns one [`ValidationResult`].

use std::sync::Arc;

use tracing::debug;

use sqlcoach_analysis::{analyze, check_syntax, normalize, StructuralAnalysis, SyntaxError};
use sqlcoach_catalog::{builtin, MistakeCatalog, Severity};

use crate::constraints::{check_forbidden, check_required, run_test_cases};
use crate::error::ValidateResult;
use crate::exercise::ExerciseSpec;
use crate::explain::{build_issue, execution_steps, next_steps, progressive_hints};
use crate::result::{ForbiddenCheck, RequiredCheck, ValidationResult};
use crate::scoring::score;

/// Minimum score for a submission to be considered valid.
const PASSING_SCORE: u8 = 70;

/// The SQL exercise validation engine
///
/// Holds an immutable [`MistakeCatalog`] behind an `Arc`; construct once
/// and share freely across threads. Swapping catalogs means constructing
/// a new validator around a new `Arc`, so in-flight validations never
/// observe a half-updated catalog.
pub struct QueryValidator {
    catalog: Arc<MistakeCatalog>,
}

impl QueryValidator {
    /// Create a validator over an injected catalog
    pub fn new(catalog: Arc<MistakeCatalog>) -> Self {
        Self { catalog }
    }

    /// Create a validator over the built-in catalog
    pub fn with_builtin_catalog() -> Self {
        Self::new(Arc::new(builtin()))
    }

    /// The catalog this validator scans against
    pub fn catalog(&self) -> &Arc<MistakeCatalog> {
        &self.catalog
    }

    /// Assess one submitted query against an exercise
    ///
    /// Pure and deterministic: identical inputs always produce an
    /// identical result. Learner input never errors; a malformed authored
    /// regex in `exercise.forbidden_patterns` is the only `Err` path.
    pub fn validate(
        &self,
        query: &str,
        exercise: &ExerciseSpec,
    ) -> ValidateResult<ValidationResult> {
        let normalized_query = normalize(query);
        let normalized_solution = normalize(&exercise.solution);

        if let Err(syntax_error) = check_syntax(&normalized_query) {
            debug!(%syntax_error, "syntax pre-check failed");
            return Ok(syntax_failure_result(syntax_error));
        }

        let analysis = analyze(&normalized_query);
        debug!(
            tables = analysis.tables.len(),
            columns = analysis.columns.len(),
            complexity = ?analysis.estimated_complexity,
            "structural analysis complete"
        );

        let mistakes = self.catalog.detect(query);
        if !mistakes.is_empty() {
            debug!(count = mistakes.len(), primary = %mistakes[0].id, "mistakes detected");
        }

        let test_results =
            run_test_cases(exercise, &normalized_query, &normalized_solution, &analysis);
        let required_check = check_required(exercise, &normalized_query, &analysis);
        let forbidden_check = check_forbidden(exercise, query)?;

        let score = score(&test_results, &mistakes, &required_check, &forbidden_check);
        let has_critical = mistakes.iter().any(|m| m.severity == Severity::Critical);
        let is_valid = score >= PASSING_SCORE && !has_critical;
        debug!(score, is_valid, "scored");

        let (issue, real_world_impact) =
            build_issue(&mistakes, &required_check, &forbidden_check, score);
        let hints = progressive_hints(exercise, &analysis, &mistakes, &normalized_solution);
        let next_steps = next_steps(&analysis, &mistakes, score);
        let execution_steps = execution_steps(query, &analysis);

        Ok(ValidationResult {
            is_valid,
            score,
            issue,
            real_world_impact,
            common_mistake_detected: mistakes.first().map(|m| (*m).clone()),
            hints,
            next_steps,
            execution_steps,
            test_results,
            required_check,
            forbidden_check,
            syntax_valid: true,
            structure_analysis: analysis,
        })
    }
}

/// Validate a query against the built-in catalog
///
/// Convenience for hosts that never customize the catalog. Constructing a
/// catalog per call is cheap relative to exercise cadence; hosts validating
/// at volume should hold a [`QueryValidator`] instead.
pub fn validate_query(
    query: &str,
    exercise: &ExerciseSpec,
) -> ValidateResult<ValidationResult> {
    QueryValidator::with_builtin_catalog().validate(query, exercise)
}

/// Fully-formed zero-score result for a failed syntax pre-check
///
/// Even gibberish input gets a displayable verdict: score 0, a hint
/// ladder pointing at the error, and an empty structural analysis.
fn syntax_failure_result(error: SyntaxError) -> ValidationResult {
    ValidationResult {
        is_valid: false,
        score: 0,
        issue: Some(error.to_string()),
        real_world_impact: Some(
            "Syntax errors prevent your query from running at all. The database will \
             reject it immediately."
                .to_string(),
        ),
        common_mistake_detected: None,
        hints: vec![
            "Check for typos in SQL keywords.".to_string(),
            "Make sure all parentheses and quotes are properly matched.".to_string(),
            "Verify that your query follows standard SQL syntax.".to_string(),
            format!("The error is: {error}"),
        ],
        next_steps: vec![
            "Fix the syntax error first.".to_string(),
            "Try a simpler version of your query.".to_string(),
            "Use the starter code as a reference.".to_string(),
        ],
        execution_steps: Vec::new(),
        test_results: Vec::new(),
        required_check: RequiredCheck::passing(),
        forbidden_check: ForbiddenCheck::passing(),
        syntax_valid: false,
        structure_analysis: StructuralAnalysis::default(),
    }
}
