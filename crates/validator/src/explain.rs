// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Explainer
//!
//! Derives the user-facing narrative from the pipeline's raw signals: the
//! primary issue/impact pair, the 4-level progressive hint ladder, the
//! score-banded next steps, and the simulated execution-order breakdown.
//!
//! The primary mistake everywhere in this module is the FIRST detected
//! mistake in catalog order; severity never reorders it.

use sqlcoach_analysis::{extract_clause, extract_tables, StructuralAnalysis};
use sqlcoach_catalog::{Category, MistakeDefinition};

use crate::exercise::ExerciseSpec;
use crate::result::{ExecutionStep, ForbiddenCheck, RequiredCheck};

/// Number of hints every result carries.
pub(crate) const HINT_LEVELS: usize = 4;
/// Cap on next-step suggestions.
const MAX_NEXT_STEPS: usize = 5;
/// Example snippets in level-4 hints are truncated to this many chars.
const EXAMPLE_SNIPPET_LEN: usize = 50;

/// Derive the primary issue and its real-world impact
///
/// Priority: detected mistake, then first missing required element, then
/// first forbidden violation, then a generic structure message when the
/// score fails, else nothing.
pub(crate) fn build_issue(
    mistakes: &[&MistakeDefinition],
    required: &RequiredCheck,
    forbidden: &ForbiddenCheck,
    score: u8,
) -> (Option<String>, Option<String>) {
    if let Some(primary) = mistakes.first() {
        return (
            Some(primary.issue.clone()),
            Some(primary.real_world_impact.clone()),
        );
    }
    if let Some(first_missing) = required.missing.first() {
        return (
            Some(format!("Missing required element: {first_missing}")),
            Some(
                "Incomplete queries may not return the expected results or may fail \
                 entirely in production."
                    .to_string(),
            ),
        );
    }
    if let Some(first_violation) = forbidden.violations.first() {
        return (
            Some(format!("Forbidden pattern detected: {first_violation}")),
            Some(
                "This pattern is discouraged for this exercise to teach best practices."
                    .to_string(),
            ),
        );
    }
    if score < 70 {
        return (
            Some("Your query structure differs significantly from the expected solution.".to_string()),
            Some(
                "While your query might work, following the expected pattern helps build \
                 consistent SQL skills."
                    .to_string(),
            ),
        );
    }
    (None, None)
}

/// Build the 4-level progressive hint ladder
///
/// Each level prefers mistake-derived text, then the exercise's authored
/// hint for that level, then a synthesized fallback, so the ladder always
/// has exactly [`HINT_LEVELS`] entries no matter how sparse the exercise.
pub(crate) fn progressive_hints(
    exercise: &ExerciseSpec,
    analysis: &StructuralAnalysis,
    mistakes: &[&MistakeDefinition],
    normalized_solution: &str,
) -> Vec<String> {
    let primary = mistakes.first();
    let authored = &exercise.hints;
    let mut hints = Vec::with_capacity(HINT_LEVELS);

    // Level 1: conceptual nudge
    hints.push(if let Some(mistake) = primary {
        format!(
            "Think about {} best practices. What might be inefficient or risky in your query?",
            mistake.category
        )
    } else if !analysis.has_where && normalized_solution.contains("where") {
        "Consider whether you need to filter your results in some way.".to_string()
    } else if let Some(hint) = authored.first() {
        hint.clone()
    } else {
        "Review the basic structure of your query. Is something missing or in the wrong order?"
            .to_string()
    });

    // Level 2: directional
    hints.push(if let Some(mistake) = primary {
        let focus = match mistake.category {
            Category::Performance => "selecting data",
            Category::Security => "handling input",
            Category::Correctness => "structuring your logic",
            Category::Style | Category::DataIntegrity => "writing your SQL",
        };
        format!(
            "Your query has a {} issue. Look at how you're {focus}.",
            mistake.category
        )
    } else if let Some(hint) = authored.get(1) {
        hint.clone()
    } else {
        "Compare the clauses in your query with what the problem asks for.".to_string()
    });

    // Level 3: specific
    hints.push(if let Some(mistake) = primary {
        format!("Issue detected: {}. {}", mistake.name, mistake.correction)
    } else if let Some(hint) = authored.get(2) {
        hint.clone()
    } else {
        let solution_tables = extract_tables(normalized_solution);
        if solution_tables.is_empty() {
            "Build the query one clause at a time and re-run after each change.".to_string()
        } else {
            format!(
                "Make sure you're using the correct table(s): {}",
                solution_tables.join(", ")
            )
        }
    });

    // Level 4: near-solution
    hints.push(if let Some(mistake) = primary.filter(|m| !m.example.wrong.is_empty()) {
        format!(
            "Instead of patterns like \"{}...\", try \"{}...\"",
            snippet(&mistake.example.wrong),
            snippet(&mistake.example.right)
        )
    } else if let Some(hint) = authored.get(3) {
        hint.clone()
    } else {
        let solution_start = exercise.solution.lines().next().unwrap_or_default();
        format!("Your query should start similar to: {solution_start}")
    });

    hints
}

fn snippet(text: &str) -> String {
    text.chars().take(EXAMPLE_SNIPPET_LEN).collect()
}

/// Score-banded next-step suggestions, at most [`MAX_NEXT_STEPS`]
pub(crate) fn next_steps(
    analysis: &StructuralAnalysis,
    mistakes: &[&MistakeDefinition],
    score: u8,
) -> Vec<String> {
    let mut steps = Vec::new();

    if score >= 90 {
        steps.push(
            "Great work! Try optimizing your query further or add comments explaining your approach."
                .to_string(),
        );
        steps.push(
            "Consider edge cases: what happens with NULL values or empty results?".to_string(),
        );
    } else if score >= 70 {
        steps.push("Your query works but could be improved. Review any warnings above.".to_string());
        if let Some(mistake) = mistakes.first() {
            steps.push(format!(
                "Fix the {} issue for better {}.",
                mistake.name, mistake.category
            ));
        }
        steps.push(
            "Try running EXPLAIN on your query to understand its execution plan.".to_string(),
        );
    } else if score >= 50 {
        steps.push("You're on the right track. Focus on the hints provided.".to_string());
        steps.push("Review the lesson content about SQL query structure.".to_string());
        if !analysis.has_select {
            steps.push("Make sure your query starts with SELECT.".to_string());
        }
        if !analysis.has_from {
            steps.push("Add a FROM clause to specify which table to query.".to_string());
        }
    } else {
        steps.push("Start with the basic structure: SELECT columns FROM table".to_string());
        steps.push("Read through the exercise description again carefully.".to_string());
        steps.push("Use the starter code as a foundation and modify it step by step.".to_string());
        steps.push("Check the hint for guidance on what approach to take.".to_string());
    }

    steps.truncate(MAX_NEXT_STEPS);
    steps
}

/// Build the simulated execution-order breakdown
///
/// Clauses appear in fixed logical evaluation order (FROM, JOIN, WHERE,
/// GROUP BY, SELECT, ORDER BY, LIMIT), one entry per clause actually
/// present, numbered 1..k without gaps. The clause text is extracted
/// verbatim from the raw query.
pub(crate) fn execution_steps(
    raw_query: &str,
    analysis: &StructuralAnalysis,
) -> Vec<ExecutionStep> {
    let from_description = if analysis.tables.is_empty() {
        "Load data from table(s): specified table".to_string()
    } else {
        format!("Load data from table(s): {}", analysis.tables.join(", "))
    };
    let select_description = if analysis.columns.is_empty() {
        "Select columns: *".to_string()
    } else {
        format!("Select columns: {}", analysis.columns.join(", "))
    };

    let stages: [(&str, bool, String); 7] = [
        ("FROM", analysis.has_from, from_description),
        (
            "JOIN",
            analysis.has_join,
            "Combine rows from multiple tables based on join conditions".to_string(),
        ),
        (
            "WHERE",
            analysis.has_where,
            "Filter rows based on conditions".to_string(),
        ),
        (
            "GROUP BY",
            analysis.has_group_by,
            "Group rows for aggregation".to_string(),
        ),
        ("SELECT", analysis.has_select, select_description),
        (
            "ORDER BY",
            analysis.has_order_by,
            "Sort the results".to_string(),
        ),
        (
            "LIMIT",
            analysis.has_limit,
            "Limit the number of returned rows".to_string(),
        ),
    ];

    stages
        .into_iter()
        .filter(|(_, present, _)| *present)
        .enumerate()
        .map(|(i, (operation, _, description))| ExecutionStep {
            step: i + 1,
            operation: operation.to_string(),
            description,
            clause: extract_clause(raw_query, &operation.to_lowercase()),
        })
        .collect()
}
