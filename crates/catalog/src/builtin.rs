// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Built-in mistake catalog
//!
//! The catalog of SQL anti-patterns shipped with the engine. Entries are
//! ordered by how valuable they are as primary feedback; detection returns
//! matches in this order.
//!
//! Two entries are deliberately broad heuristics: `n-plus-one` fires on any
//! literal per-row lookup shape, and `missing-index-hint` fires on a fixed
//! list of commonly unindexed column names. Both produce false positives
//! outside their intended exercise context, so `missing-index-hint` is
//! gated down to low severity.

use crate::catalog::MistakeCatalog;
use crate::mistake::{Category, MistakeDefinition, Severity};

/// Build the built-in catalog
///
/// The definitions are compile-time constants; construction cannot fail
/// unless the source itself is broken, which the catalog tests cover.
pub fn builtin() -> MistakeCatalog {
    MistakeCatalog::new(builtin_definitions())
        .expect("builtin catalog definitions are valid")
}

fn builtin_definitions() -> Vec<MistakeDefinition> {
    vec![
        MistakeDefinition::new(
            "select-star",
            "SELECT * Anti-pattern",
            Severity::Medium,
            Category::Performance,
        )
        .with_pattern(r"select\s+\*\s+from")
        .with_pattern(r"select\s+\*\s*,")
        .with_issue("Using SELECT * retrieves all columns, even those you don't need.")
        .with_correction(
            "Explicitly list only the columns you need: SELECT id, name, email FROM users",
        )
        .with_impact(
            "In production, SELECT * can transfer megabytes of unnecessary data, slow down \
             queries by 10-100x, and break applications when schema changes add new columns.",
        )
        .with_prevention(
            "Always specify column names explicitly. Create views for common column sets.",
        )
        .with_example(
            "SELECT * FROM users WHERE active = true;",
            "SELECT id, name, email FROM users WHERE active = true;",
        ),
        MistakeDefinition::new(
            "missing-where",
            "Missing WHERE Clause",
            Severity::Critical,
            Category::DataIntegrity,
        )
        .with_pattern(r"\b(update|delete)\b")
        .with_unless(r"\bwhere\b")
        .with_issue("UPDATE or DELETE without WHERE affects ALL rows in the table.")
        .with_correction("Always include a WHERE clause to target specific rows.")
        .with_impact(
            "A missing WHERE clause in production once deleted 77 million user records at \
             GitLab, causing 6 hours of downtime. This is one of the most dangerous SQL \
             mistakes.",
        )
        .with_prevention(
            "Use transactions, test with SELECT first, and implement database safeguards \
             that reject WHERE-less mutations.",
        )
        .with_example(
            "DELETE FROM orders;",
            "DELETE FROM orders WHERE status = 'cancelled' AND created_at < '2024-01-01';",
        ),
        MistakeDefinition::new(
            "sql-injection-risk",
            "Potential SQL Injection",
            Severity::Critical,
            Category::Security,
        )
        .with_pattern(r"'\s*\+\s*\w+\s*\+\s*'")
        .with_pattern(r"'\s*\|\|\s*\w+")
        .with_pattern(r#"concat\s*\(\s*['"]"#)
        .with_pattern(r"'\s*or\s*'1'\s*=\s*'1'")
        .with_pattern(r"'\s*;\s*drop")
        .with_pattern(r"--\s*$")
        .with_issue("String concatenation in queries can allow SQL injection attacks.")
        .with_correction("Use parameterized queries or prepared statements instead.")
        .with_impact(
            "SQL injection remains the #1 web vulnerability. In 2017, Equifax was breached \
             via SQL injection, exposing 147 million records and costing $700M+ in \
             settlements.",
        )
        .with_prevention(
            "Never concatenate user input into queries. Use parameterized queries, ORMs, \
             or prepared statements.",
        )
        .with_example(
            "SELECT * FROM users WHERE name = '\" + userInput + \"';",
            "SELECT * FROM users WHERE name = $1; -- with parameterized input",
        ),
        MistakeDefinition::new(
            "implicit-join",
            "Implicit JOIN (Comma Syntax)",
            Severity::Medium,
            Category::Style,
        )
        .with_pattern(r"from\s+\w+\s*,\s*\w+")
        .with_issue(
            "Comma-separated tables create implicit CROSS JOINs, which are hard to read \
             and error-prone.",
        )
        .with_correction("Use explicit JOIN syntax with ON conditions.")
        .with_impact(
            "Implicit joins make code reviews harder and often hide missing join \
             conditions, causing incorrect results or massive Cartesian products that \
             crash databases.",
        )
        .with_prevention(
            "Always use explicit JOIN keywords. Configure linters to flag comma joins.",
        )
        .with_example(
            "SELECT * FROM orders, customers WHERE orders.customer_id = customers.id;",
            "SELECT * FROM orders INNER JOIN customers ON orders.customer_id = customers.id;",
        ),
        MistakeDefinition::new(
            "missing-table-aliases",
            "Missing Table Aliases",
            Severity::Low,
            Category::Style,
        )
        .with_pattern(r"join\s+\w+\s+on\s+\w+\.\w+\s*=")
        .with_issue("Long table names repeated throughout queries reduce readability.")
        .with_correction("Use short, meaningful aliases for tables.")
        .with_impact(
            "Without aliases, complex queries become unreadable and maintenance-prone. \
             Teams waste hours debugging ambiguous column references.",
        )
        .with_prevention(
            "Establish naming conventions for aliases (first letter or short abbreviation).",
        )
        .with_example(
            "SELECT orders.id, customers.name FROM orders JOIN customers ON \
             orders.customer_id = customers.id;",
            "SELECT o.id, c.name FROM orders o JOIN customers c ON o.customer_id = c.id;",
        ),
        MistakeDefinition::new(
            "n-plus-one",
            "N+1 Query Pattern",
            Severity::High,
            Category::Performance,
        )
        .with_pattern(r"select.*where\s+\w+\s*=\s*\?")
        .with_pattern(r"select.*where\s+id\s*=\s*\d+")
        .with_issue(
            "Fetching related data one row at a time causes excessive database roundtrips.",
        )
        .with_correction("Use JOINs or batch queries with IN clauses.")
        .with_impact(
            "N+1 queries are the #1 cause of slow page loads. A page showing 50 products \
             with categories makes 51 queries instead of 1-2, often adding 5-10 seconds \
             to load time.",
        )
        .with_prevention(
            "Use eager loading in ORMs. Monitor query counts per request. Use batch \
             fetching.",
        )
        .with_example(
            "SELECT * FROM order_items WHERE order_id = 1; -- repeated once per order",
            "SELECT * FROM order_items WHERE order_id IN (1, 2, 3);",
        ),
        MistakeDefinition::new(
            "like-wildcard-start",
            "Leading Wildcard in LIKE",
            Severity::High,
            Category::Performance,
        )
        .with_pattern(r#"like\s+['"]%"#)
        .with_issue(
            "LIKE patterns starting with % cannot use indexes, forcing full table scans.",
        )
        .with_correction(
            "Restructure queries to avoid leading wildcards, or use full-text search.",
        )
        .with_impact(
            "A LIKE '%search%' on a million-row table can take 10+ seconds. Full-text \
             search indexes can return results in milliseconds.",
        )
        .with_prevention(
            "Use full-text search (PostgreSQL tsvector, MySQL FULLTEXT, Elasticsearch). \
             Consider search-optimized columns.",
        )
        .with_example(
            "SELECT * FROM products WHERE name LIKE '%phone%';",
            "SELECT * FROM products WHERE to_tsvector('english', name) @@ \
             to_tsquery('phone');",
        ),
        MistakeDefinition::new(
            "null-comparison",
            "NULL Comparison Error",
            Severity::High,
            Category::Correctness,
        )
        .with_pattern(r"=\s*null")
        .with_pattern(r"!=\s*null")
        .with_pattern(r"<>\s*null")
        .with_issue(
            "NULL cannot be compared with = or !=. These comparisons always return NULL \
             (unknown).",
        )
        .with_correction("Use IS NULL or IS NOT NULL for NULL comparisons.")
        .with_impact(
            "This logic error silently returns wrong results. WHERE status != 'deleted' \
             won't return rows where status is NULL, potentially hiding data.",
        )
        .with_prevention(
            "Understand three-valued logic in SQL. Use COALESCE to handle NULLs explicitly.",
        )
        .with_example(
            "SELECT * FROM users WHERE deleted_at = NULL;",
            "SELECT * FROM users WHERE deleted_at IS NULL;",
        ),
        MistakeDefinition::new(
            "group-by-non-aggregated",
            "Non-aggregated Column in GROUP BY",
            Severity::High,
            Category::Correctness,
        )
        .with_pattern(
            r"select\s+\w+\s*,\s*\w+\s*,.*\b(count|sum|avg|max|min)\s*\(.*\bgroup\s+by\s+\w+\s*;?\s*$",
        )
        .with_issue(
            "Selecting columns not in GROUP BY or aggregate functions returns \
             unpredictable results.",
        )
        .with_correction(
            "Include all selected columns in GROUP BY or wrap them in aggregate functions.",
        )
        .with_impact(
            "MySQL's permissive mode hides this error, causing silent data corruption. \
             Results vary between executions, making bugs extremely hard to track.",
        )
        .with_prevention(
            "Enable ONLY_FULL_GROUP_BY mode in MySQL. PostgreSQL enforces this by default.",
        )
        .with_example(
            "SELECT customer_id, order_date, SUM(amount) FROM orders GROUP BY customer_id;",
            "SELECT customer_id, MAX(order_date), SUM(amount) FROM orders GROUP BY \
             customer_id;",
        ),
        MistakeDefinition::new(
            "order-by-random",
            "ORDER BY RANDOM() Anti-pattern",
            Severity::Medium,
            Category::Performance,
        )
        .with_pattern(r"order\s+by\s+rand\s*\(\s*\)")
        .with_pattern(r"order\s+by\s+random\s*\(\s*\)")
        .with_pattern(r"order\s+by\s+newid\s*\(\s*\)")
        .with_issue("ORDER BY RANDOM() scans and sorts the entire table, even for LIMIT 1.")
        .with_correction(
            "Use offset-based random selection or pre-generated random columns.",
        )
        .with_impact(
            "On a table with 1M rows, ORDER BY RANDOM() LIMIT 1 takes 2-5 seconds \
             instead of milliseconds, potentially crashing your database under load.",
        )
        .with_prevention(
            "For random samples, use TABLESAMPLE or application-side random ID generation.",
        )
        .with_example(
            "SELECT * FROM products ORDER BY RANDOM() LIMIT 5;",
            "SELECT * FROM products WHERE id >= (SELECT FLOOR(RANDOM() * (SELECT MAX(id) \
             FROM products))) LIMIT 5;",
        ),
        MistakeDefinition::new(
            "distinct-overuse",
            "DISTINCT as a Band-Aid",
            Severity::Medium,
            Category::Correctness,
        )
        .with_pattern(r"select\s+distinct\b")
        .with_issue("DISTINCT often masks underlying JOIN problems that create duplicates.")
        .with_correction(
            "Fix the root cause (incorrect joins) instead of hiding duplicates with \
             DISTINCT.",
        )
        .with_impact(
            "DISTINCT sorts the entire result set, which is expensive. The hidden join \
             bug may also cause incorrect counts or aggregations elsewhere.",
        )
        .with_prevention(
            "If you need DISTINCT, ask why duplicates exist. Often it's a many-to-many \
             join issue.",
        )
        .with_example(
            "SELECT DISTINCT customer_name FROM customers c JOIN orders o ON c.id = \
             o.customer_id;",
            "SELECT customer_name FROM customers WHERE EXISTS (SELECT 1 FROM orders \
             WHERE customer_id = customers.id);",
        ),
        MistakeDefinition::new(
            "subquery-in-select",
            "Correlated Subquery in SELECT",
            Severity::High,
            Category::Performance,
        )
        .with_pattern(r"select\s+.*\(\s*select\s+.*from\s+\w+\s+where")
        .with_issue(
            "Correlated subqueries in SELECT execute once per row, causing O(n^2) \
             performance.",
        )
        .with_correction("Rewrite as a JOIN or use window functions.")
        .with_impact(
            "A report with 10,000 rows and a correlated subquery runs 10,000+ queries. \
             What should take 100ms takes 30+ seconds.",
        )
        .with_prevention(
            "Profile queries with EXPLAIN. Look for \"dependent subquery\" warnings.",
        )
        .with_example(
            "SELECT name, (SELECT COUNT(*) FROM orders WHERE customer_id = c.id) FROM \
             customers c;",
            "SELECT c.name, COUNT(o.id) FROM customers c LEFT JOIN orders o ON c.id = \
             o.customer_id GROUP BY c.id, c.name;",
        ),
        MistakeDefinition::new(
            "or-chain",
            "Multiple OR Conditions",
            Severity::Medium,
            Category::Performance,
        )
        .with_pattern(r"where.*\bor\b.*\bor\b.*\bor\b")
        .with_issue(
            "Multiple OR conditions often prevent index usage and create complex \
             execution plans.",
        )
        .with_correction("Use IN clause or UNION ALL for better index utilization.")
        .with_impact(
            "OR conditions on different columns prevent index intersection in many \
             databases, causing full table scans.",
        )
        .with_prevention(
            "Use IN for same-column conditions. Consider UNION ALL for cross-column OR \
             logic.",
        )
        .with_example(
            "SELECT * FROM products WHERE category = 'A' OR category = 'B' OR category \
             = 'C';",
            "SELECT * FROM products WHERE category IN ('A', 'B', 'C');",
        ),
        MistakeDefinition::new(
            "count-column-confusion",
            "COUNT(*) vs COUNT(column) Confusion",
            Severity::Medium,
            Category::Correctness,
        )
        .with_pattern(r"count\s*\(\s*\w+\s*\)")
        .with_issue(
            "COUNT(column) ignores NULLs, which may not be intended. COUNT(*) counts \
             all rows.",
        )
        .with_correction(
            "Use COUNT(*) for row counts, COUNT(column) only when NULL exclusion is \
             intentional.",
        )
        .with_impact(
            "Reports showing \"500 orders\" when COUNT(discount_code) was used miss the \
             200 orders without discounts, causing incorrect business decisions.",
        )
        .with_prevention(
            "Be explicit about intent. Add comments explaining why COUNT(column) is used.",
        )
        .with_example(
            "SELECT COUNT(email) FROM users; -- excludes users without email",
            "SELECT COUNT(*) FROM users; -- counts all users",
        ),
        MistakeDefinition::new(
            "missing-index-hint",
            "Filtering on Non-indexed Column",
            Severity::Low,
            Category::Performance,
        )
        .with_pattern(
            r"where\s+(created_at|updated_at|status|type|category|is_active|is_deleted)\s*(=|>|<|like)",
        )
        .with_issue("Frequently filtered columns without indexes cause full table scans.")
        .with_correction(
            "Create indexes on columns used in WHERE, JOIN, and ORDER BY clauses.",
        )
        .with_impact(
            "A missing index on a datetime filter can make a \"get recent orders\" query \
             1000x slower as the table grows.",
        )
        .with_prevention(
            "Use EXPLAIN to check query plans. Monitor slow query logs. Create composite \
             indexes for common filter combinations.",
        )
        .with_example(
            "SELECT * FROM orders WHERE status = 'pending'; -- no index on status",
            "CREATE INDEX idx_orders_status ON orders(status);",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 15);
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        // MistakeCatalog::new enforces this; re-assert on the raw data so a
        // regression is reported against the definition list itself.
        let defs = builtin_definitions();
        let mut ids: Vec<&str> = defs.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn test_every_definition_has_patterns_and_example() {
        for def in builtin_definitions() {
            assert!(!def.patterns.is_empty(), "{} has no patterns", def.id);
            assert!(!def.example.wrong.is_empty(), "{} has no example", def.id);
            assert!(!def.issue.is_empty(), "{} has no issue text", def.id);
        }
    }

    #[test]
    fn test_detects_select_star() {
        let catalog = builtin();
        let found = catalog.detect("SELECT * FROM users;");
        assert!(found.iter().any(|d| d.id == "select-star"));
    }

    #[test]
    fn test_detects_delete_without_where() {
        let catalog = builtin();
        let found = catalog.detect("DELETE FROM orders;");
        assert!(found.iter().any(|d| d.id == "missing-where"));
        assert!(found
            .iter()
            .any(|d| d.severity == Severity::Critical));
    }

    #[test]
    fn test_delete_with_where_not_flagged() {
        let catalog = builtin();
        let found = catalog.detect("DELETE FROM orders WHERE id = 1;");
        assert!(!found.iter().any(|d| d.id == "missing-where"));
    }

    #[test]
    fn test_detects_null_comparison() {
        let catalog = builtin();
        let found = catalog.detect("SELECT id FROM users WHERE deleted_at = NULL");
        assert!(found.iter().any(|d| d.id == "null-comparison"));
    }

    #[test]
    fn test_detects_injection_shapes() {
        let catalog = builtin();
        for query in [
            "SELECT * FROM users WHERE name = '' OR '1' = '1'",
            "SELECT * FROM users WHERE name = ''; DROP TABLE users",
        ] {
            let found = catalog.detect(query);
            assert!(
                found.iter().any(|d| d.id == "sql-injection-risk"),
                "not flagged: {query}"
            );
        }
    }

    #[test]
    fn test_detects_leading_wildcard_like() {
        let catalog = builtin();
        let found = catalog.detect("SELECT id FROM products WHERE name LIKE '%phone%'");
        assert!(found.iter().any(|d| d.id == "like-wildcard-start"));
    }

    #[test]
    fn test_detects_order_by_random() {
        let catalog = builtin();
        let found = catalog.detect("SELECT id FROM products ORDER BY RANDOM() LIMIT 5");
        assert!(found.iter().any(|d| d.id == "order-by-random"));
    }

    #[test]
    fn test_detects_group_by_non_aggregated() {
        let catalog = builtin();
        let found = catalog
            .detect("SELECT customer_id, order_date, SUM(amount) FROM orders GROUP BY customer_id;");
        assert!(found.iter().any(|d| d.id == "group-by-non-aggregated"));

        let fixed = catalog.detect(
            "SELECT customer_id, MAX(order_date), SUM(amount) FROM orders GROUP BY customer_id;",
        );
        assert!(!fixed.iter().any(|d| d.id == "group-by-non-aggregated"));
    }

    #[test]
    fn test_missing_index_hint_is_low_severity() {
        let catalog = builtin();
        let def = catalog.get("missing-index-hint").unwrap();
        assert_eq!(def.severity, Severity::Low);
    }

    #[test]
    fn test_clean_query_detects_nothing() {
        let catalog = builtin();
        let found = catalog.detect("SELECT name, email FROM users");
        assert!(found.is_empty(), "unexpected: {:?}", found.first().map(|d| &d.id));
    }
}
