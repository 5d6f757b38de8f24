// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: sample queries and exercise builders

use sqlcoach_validator::{ExerciseSpec, TestCase};

/// Sample SQL queries for testing
pub struct SqlFixtures;

impl SqlFixtures {
    // ===== Clean queries =====

    /// Simple SELECT with column list
    pub const fn simple_select() -> &'static str {
        "SELECT name, email FROM users"
    }

    /// SELECT with WHERE on a named value
    pub const fn select_with_where() -> &'static str {
        "SELECT name FROM users WHERE email LIKE 'a%'"
    }

    /// Explicit INNER JOIN with aliases
    pub const fn aliased_join() -> &'static str {
        "SELECT o.order_id, c.customer_name FROM orders o \
         INNER JOIN customers c ON o.customer_id = c.id"
    }

    // ===== Queries exhibiting catalog mistakes =====

    /// SELECT * anti-pattern
    pub const fn select_star() -> &'static str {
        "SELECT * FROM users"
    }

    /// DELETE without WHERE (critical)
    pub const fn delete_without_where() -> &'static str {
        "DELETE FROM orders;"
    }

    /// NULL compared with =
    pub const fn null_equals() -> &'static str {
        "SELECT name FROM users WHERE deleted_at = NULL"
    }

    /// LIKE with a leading wildcard
    pub const fn leading_wildcard() -> &'static str {
        "SELECT name FROM products WHERE name LIKE '%phone%'"
    }

    // ===== Syntactically broken queries =====

    /// Unbalanced opening parenthesis
    pub const fn unbalanced_parens() -> &'static str {
        "SELECT (id FROM users"
    }

    /// Stray single quote
    pub const fn unbalanced_quote() -> &'static str {
        "SELECT name FROM users WHERE name = 'bob"
    }

    /// Not a SQL statement at all
    pub const fn not_sql() -> &'static str {
        "please show me the users"
    }
}

/// A bare-bones exercise: only a title and a solution, every optional
/// field absent. Exercises the degraded solution-comparison path.
pub fn minimal_exercise() -> ExerciseSpec {
    ExerciseSpec::new("Select users", "SELECT name, email FROM users;")
}

/// The "select specific columns" exercise from the curriculum, with
/// weighted test cases, a forbidden `*`, and expected tables/columns.
pub fn select_columns_exercise() -> ExerciseSpec {
    ExerciseSpec::new("Select Specific Columns", "SELECT name, email FROM users;")
        .with_description("Select only the name and email columns from the users table.")
        .with_starter_code("-- Select name and email from users\nSELECT ")
        .with_hint("Think about which columns you need")
        .with_hint("You need to specify columns after SELECT")
        .with_hint("The columns should be name and email")
        .with_hint("SELECT name, email FROM users")
        .with_test_case(
            TestCase::new("Contains SELECT keyword")
                .with_contains("select")
                .with_weight(0.2),
        )
        .with_test_case(
            TestCase::new("Selects from users table")
                .with_contains("from users")
                .with_weight(0.2),
        )
        .with_test_case(
            TestCase::new("Includes name column")
                .with_expected_column("name")
                .with_weight(0.3),
        )
        .with_test_case(
            TestCase::new("Includes email column")
                .with_expected_column("email")
                .with_weight(0.3),
        )
        .with_forbidden_pattern(r"\*")
        .with_expected_table("users")
        .with_expected_column("name")
        .with_expected_column("email")
}

/// A JOIN exercise graded by structured test cases
pub fn join_exercise() -> ExerciseSpec {
    ExerciseSpec::new(
        "Join Orders with Customers",
        "SELECT o.order_id, c.customer_name, o.total_amount \
         FROM orders o \
         INNER JOIN customers c ON o.customer_id = c.id;",
    )
    .with_description(
        "Join the orders table with customers to show order_id, customer_name, and \
         total_amount.",
    )
    .with_hint("You need to combine data from two tables")
    .with_hint("Use JOIN to connect orders and customers")
    .with_test_case(
        TestCase::new("Uses JOIN keyword")
            .with_contains("join")
            .with_weight(0.25),
    )
    .with_test_case(
        TestCase::new("Includes ON condition")
            .with_contains(" on ")
            .with_weight(0.25),
    )
    .with_test_case(
        TestCase::new("References orders table")
            .with_contains("orders")
            .with_weight(0.25),
    )
    .with_test_case(
        TestCase::new("References customers table")
            .with_contains("customers")
            .with_weight(0.25),
    )
    .with_expected_table("orders")
    .with_expected_table("customers")
}
