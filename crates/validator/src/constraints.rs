// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Constraint checker and test-case runner
//!
//! Exercise-specific requirements: required clauses/tables/columns,
//! forbidden patterns, and structured test cases with the feature-overlap
//! fallback used when an exercise authors no test cases.

use regex::RegexBuilder;
use sqlcoach_analysis::{key_elements, StructuralAnalysis};

use crate::error::{ValidateError, ValidateResult};
use crate::exercise::ExerciseSpec;
use crate::result::{ForbiddenCheck, RequiredCheck, TestCaseResult};

/// Minimum feature-overlap ratio for the solution-match fallback to pass.
const SOLUTION_MATCH_THRESHOLD: f64 = 0.7;

/// Check every required clause, expected table, and expected column
///
/// All misses are collected and reported, not just the first. Clause
/// checks are case-insensitive substring checks against the normalized
/// query; table/column checks are case-insensitive exact matches against
/// the structural analysis.
pub(crate) fn check_required(
    exercise: &ExerciseSpec,
    normalized_query: &str,
    analysis: &StructuralAnalysis,
) -> RequiredCheck {
    let mut missing = Vec::new();

    for clause in &exercise.required_clauses {
        if !normalized_query.contains(&clause.to_lowercase()) {
            missing.push(clause.clone());
        }
    }

    for table in &exercise.expected_tables {
        if !analysis.tables.iter().any(|t| t.eq_ignore_ascii_case(table)) {
            missing.push(format!("table: {table}"));
        }
    }

    for column in &exercise.expected_columns {
        if !analysis
            .columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(column))
        {
            missing.push(format!("column: {column}"));
        }
    }

    RequiredCheck {
        passed: missing.is_empty(),
        missing,
    }
}

/// Test every forbidden pattern against the raw query
///
/// # Errors
///
/// Returns `ValidateError::InvalidForbiddenPattern` when an authored
/// pattern fails to compile; that is an exercise-authoring bug, the one
/// data-shaped problem the engine propagates instead of grading around.
pub(crate) fn check_forbidden(
    exercise: &ExerciseSpec,
    raw_query: &str,
) -> ValidateResult<ForbiddenCheck> {
    let mut violations = Vec::new();

    for pattern in &exercise.forbidden_patterns {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ValidateError::InvalidForbiddenPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        if re.is_match(raw_query) {
            violations.push(pattern.clone());
        }
    }

    Ok(ForbiddenCheck {
        passed: violations.is_empty(),
        violations,
    })
}

/// Run the exercise's test cases, or the solution-match fallback when none
/// are authored
///
/// Each structured test case is evaluated independently; within a case the
/// first triggered failure names the message. Unweighted cases share the
/// scoring mass equally.
pub(crate) fn run_test_cases(
    exercise: &ExerciseSpec,
    normalized_query: &str,
    normalized_solution: &str,
    analysis: &StructuralAnalysis,
) -> Vec<TestCaseResult> {
    if exercise.test_cases.is_empty() {
        return vec![solution_match(normalized_query, normalized_solution)];
    }

    let default_weight = 1.0 / exercise.test_cases.len() as f64;
    exercise
        .test_cases
        .iter()
        .map(|tc| {
            let weight = tc.weight.unwrap_or(default_weight);

            for required in &tc.should_contain {
                if !normalized_query.contains(&required.to_lowercase()) {
                    return TestCaseResult {
                        name: tc.name.clone(),
                        passed: false,
                        message: format!("Missing required element: \"{required}\""),
                        weight,
                    };
                }
            }

            for forbidden in &tc.should_not_contain {
                if normalized_query.contains(&forbidden.to_lowercase()) {
                    return TestCaseResult {
                        name: tc.name.clone(),
                        passed: false,
                        message: format!("Should not contain: \"{forbidden}\""),
                        weight,
                    };
                }
            }

            for column in &tc.expected_columns {
                if !analysis
                    .columns
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(column))
                {
                    return TestCaseResult {
                        name: tc.name.clone(),
                        passed: false,
                        message: format!("Missing expected column: \"{column}\""),
                        weight,
                    };
                }
            }

            TestCaseResult {
                name: tc.name.clone(),
                passed: true,
                message: "Test passed".to_string(),
                weight,
            }
        })
        .collect()
}

/// Fallback grading when no test cases are authored: compare the
/// keyword/table/column feature sets of the query and the solution, and
/// pass when the overlap ratio reaches the threshold.
fn solution_match(normalized_query: &str, normalized_solution: &str) -> TestCaseResult {
    let solution_elements = key_elements(normalized_solution);
    let query_elements = key_elements(normalized_query);

    let match_count = solution_elements
        .iter()
        .filter(|e| query_elements.iter().any(|q| q.eq_ignore_ascii_case(e)))
        .count();
    let ratio = if solution_elements.is_empty() {
        0.0
    } else {
        match_count as f64 / solution_elements.len() as f64
    };

    let passed = ratio >= SOLUTION_MATCH_THRESHOLD;
    TestCaseResult {
        name: "Solution Match".to_string(),
        passed,
        message: if passed {
            "Query structure matches expected solution".to_string()
        } else {
            format!(
                "Query matches {}% of expected elements",
                (ratio * 100.0).round() as u32
            )
        },
        weight: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcoach_analysis::{analyze, normalize};

    use crate::exercise::TestCase;

    fn exercise_with(cases: Vec<TestCase>) -> ExerciseSpec {
        let mut exercise = ExerciseSpec::new("T", "SELECT name, email FROM users;");
        exercise.test_cases = cases;
        exercise
    }

    fn prepared(query: &str) -> (String, StructuralAnalysis) {
        let normalized = normalize(query);
        let analysis = analyze(&normalized);
        (normalized, analysis)
    }

    #[test]
    fn test_required_collects_all_misses() {
        let exercise = ExerciseSpec::new("T", "SELECT 1")
            .with_required_clause("WHERE")
            .with_expected_table("users")
            .with_expected_column("email");
        let (normalized, analysis) = prepared("SELECT id FROM orders");
        let check = check_required(&exercise, &normalized, &analysis);
        assert!(!check.passed);
        assert_eq!(
            check.missing,
            vec!["WHERE", "table: users", "column: email"]
        );
    }

    #[test]
    fn test_required_passes_case_insensitively() {
        let exercise = ExerciseSpec::new("T", "SELECT 1")
            .with_required_clause("WHERE")
            .with_expected_table("USERS")
            .with_expected_column("Email");
        let (normalized, analysis) = prepared("SELECT email FROM users WHERE id = 1");
        let check = check_required(&exercise, &normalized, &analysis);
        assert!(check.passed, "missing: {:?}", check.missing);
    }

    #[test]
    fn test_forbidden_matches_raw_query() {
        let exercise = ExerciseSpec::new("T", "SELECT 1").with_forbidden_pattern(r"\*");
        let check = check_forbidden(&exercise, "SELECT * FROM users").unwrap();
        assert!(!check.passed);
        assert_eq!(check.violations, vec![r"\*"]);
    }

    #[test]
    fn test_forbidden_invalid_pattern_propagates() {
        let exercise = ExerciseSpec::new("T", "SELECT 1").with_forbidden_pattern("(");
        let err = check_forbidden(&exercise, "SELECT 1").unwrap_err();
        assert!(matches!(
            err,
            ValidateError::InvalidForbiddenPattern { .. }
        ));
    }

    #[test]
    fn test_test_case_first_failure_names_message() {
        let cases = vec![TestCase::new("shape")
            .with_contains("from users")
            .with_expected_column("email")];
        let exercise = exercise_with(cases);
        let (normalized, analysis) = prepared("SELECT name FROM orders");
        let results = run_test_cases(&exercise, &normalized, "", &analysis);
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(results[0].message.contains("from users"));
    }

    #[test]
    fn test_test_case_should_not_contain() {
        let cases = vec![TestCase::new("no star").with_not_contains("*")];
        let exercise = exercise_with(cases);
        let (normalized, analysis) = prepared("SELECT * FROM users");
        let results = run_test_cases(&exercise, &normalized, "", &analysis);
        assert!(!results[0].passed);
        assert!(results[0].message.contains("Should not contain"));
    }

    #[test]
    fn test_unweighted_cases_share_mass_equally() {
        let cases = vec![TestCase::new("a"), TestCase::new("b")];
        let exercise = exercise_with(cases);
        let (normalized, analysis) = prepared("SELECT id FROM t");
        let results = run_test_cases(&exercise, &normalized, "", &analysis);
        assert!((results[0].weight - 0.5).abs() < 1e-9);
        assert!((results[1].weight - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_solution_match_fallback_passes_exact_solution() {
        let exercise = exercise_with(Vec::new());
        let solution = normalize(&exercise.solution);
        let (normalized, analysis) = prepared("select name, email from users");
        let results = run_test_cases(&exercise, &normalized, &solution, &analysis);
        assert_eq!(results[0].name, "Solution Match");
        assert!(results[0].passed);
        assert!((results[0].weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solution_match_threshold_boundary() {
        // The solution's feature set has exactly 10 elements: SELECT, FROM,
        // WHERE, OR (inside ORDER), ORDER BY, LIMIT, users, name, email,
        // age. The first query matches 7 of them, landing exactly on the
        // 0.7 threshold; dropping WHERE leaves 6 and fails.
        let solution =
            normalize("SELECT name, email, age FROM users WHERE id = 1 ORDER BY name LIMIT 5");
        let at_threshold = solution_match(
            &normalize("SELECT name, email, age FROM users WHERE id = 2"),
            &solution,
        );
        assert!(at_threshold.passed);

        let below = solution_match(&normalize("SELECT name, email, age FROM users"), &solution);
        assert!(!below.passed);
        assert!(below.message.contains("60%"));
    }

    #[test]
    fn test_solution_match_fallback_fails_unrelated_query() {
        let exercise = exercise_with(Vec::new());
        let solution = normalize(&exercise.solution);
        let (normalized, analysis) = prepared("delete from logs");
        let results = run_test_cases(&exercise, &normalized, &solution, &analysis);
        assert!(!results[0].passed);
        assert!(results[0].message.contains("% of expected elements"));
    }
}
