//! Dialect-compatibility rewrite rules.
//!
//! Generated SQL is opaque text; the only transformation it undergoes is
//! this enumerable rule table of literal substitutions. The rules patch a
//! known schema/dialect mismatch (MySQL-style date arithmetic, a date
//! column that needs a timestamp cast) and are not general SQL translation.

/// A literal pattern -> replacement substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl RewriteRule {
    pub const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// Apply the rule once, leaving already-rewritten occurrences alone.
    ///
    /// When the replacement contains the pattern (e.g. a cast appended to a
    /// column name), a plain `str::replace` would stack replacements on
    /// every application. Splitting on the replacement first protects the
    /// occurrences that are already in target form.
    pub fn apply(&self, sql: &str) -> String {
        if self.replacement.contains(self.pattern) {
            sql.split(self.replacement)
                .map(|segment| segment.replace(self.pattern, self.replacement))
                .collect::<Vec<_>>()
                .join(self.replacement)
        } else {
            sql.replace(self.pattern, self.replacement)
        }
    }
}

/// The rule table, applied in order.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule::new("DATE_SUB(CURRENT_DATE", "CURRENT_DATE - INTERVAL"),
    RewriteRule::new("joiningdate", "joiningdate::timestamp"),
];

/// Apply every rewrite rule to a fixpoint.
///
/// Iterating until nothing changes keeps the whole patch set idempotent:
/// applying it to already-patched text yields the same text.
pub fn apply_rewrites(sql: &str) -> String {
    let mut current = sql.to_string();
    loop {
        let next = REWRITE_RULES
            .iter()
            .fold(current.clone(), |text, rule| rule.apply(&text));
        if next == current {
            return current;
        }
        current = next;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_sub_rewritten_to_interval_form() {
        let sql = "SELECT * FROM employees WHERE joined > DATE_SUB(CURRENT_DATE, INTERVAL 1 YEAR)";
        let patched = apply_rewrites(sql);
        assert!(patched.contains("CURRENT_DATE - INTERVAL"));
        assert!(!patched.contains("DATE_SUB(CURRENT_DATE"));
    }

    #[test]
    fn test_joiningdate_gains_timestamp_cast() {
        let sql = "SELECT COUNT(*) FROM employees WHERE joiningdate > '2023-01-01'";
        let patched = apply_rewrites(sql);
        assert!(patched.contains("joiningdate::timestamp"));
    }

    #[test]
    fn test_already_cast_column_left_alone() {
        let sql = "SELECT joiningdate::timestamp FROM employees";
        assert_eq!(apply_rewrites(sql), sql);
    }

    #[test]
    fn test_unrelated_sql_unchanged() {
        let sql = "SELECT name FROM employees ORDER BY name";
        assert_eq!(apply_rewrites(sql), sql);
    }

    #[test]
    fn test_rules_are_idempotent_on_scenario_sql() {
        let sql = "SELECT COUNT(*) FROM employees \
                   WHERE joiningdate > DATE_SUB(CURRENT_DATE, INTERVAL 30 DAY)";
        let once = apply_rewrites(sql);
        let twice = apply_rewrites(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cast_rule_alone_is_idempotent() {
        let rule = RewriteRule::new("joiningdate", "joiningdate::timestamp");
        let once = rule.apply("joiningdate, joiningdate::timestamp, joiningdate");
        let twice = rule.apply(&once);
        assert_eq!(once, "joiningdate::timestamp, joiningdate::timestamp, joiningdate::timestamp");
        assert_eq!(once, twice);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Generator biased toward strings containing rule fragments, so the
    /// idempotence property is exercised where it matters.
    fn sql_fragments() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("joiningdate".to_string()),
                Just("joiningdate::timestamp".to_string()),
                Just("DATE_SUB(CURRENT_DATE".to_string()),
                Just("CURRENT_DATE - INTERVAL".to_string()),
                Just("SELECT COUNT(*) FROM employees WHERE ".to_string()),
                "[ -~]{0,12}",
            ],
            0..8,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        /// Applying the rule set twice yields the same text as applying once.
        #[test]
        fn prop_apply_rewrites_idempotent(sql in sql_fragments()) {
            let once = apply_rewrites(&sql);
            let twice = apply_rewrites(&once);
            prop_assert_eq!(once, twice);
        }

        /// Patched text never contains the MySQL-style date arithmetic form.
        #[test]
        fn prop_no_date_sub_survives(sql in sql_fragments()) {
            let patched = apply_rewrites(&sql);
            prop_assert!(!patched.contains("DATE_SUB(CURRENT_DATE"));
        }
    }
}
