use crate::access::AccessDecision;

use super::model::Table;

// ---------------------------------------------------------------------------
// Column visibility policy for gated datasets
// ---------------------------------------------------------------------------

/// Partition of a gated table's columns into public and restricted.
///
/// The public list is fixed at startup; restricted columns are whatever the
/// loaded table has beyond it, so the partition follows schema changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPolicy {
    public: Vec<String>,
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_COLUMNS.iter().map(|c| c.to_string()).collect())
    }
}

pub const DEFAULT_PUBLIC_COLUMNS: [&str; 6] = [
    "season",
    "week",
    "away_team",
    "home_team",
    "spread_line",
    "total_line",
];

impl ColumnPolicy {
    pub fn new(public: Vec<String>) -> Self {
        Self { public }
    }

    pub fn is_public(&self, column: &str) -> bool {
        self.public.iter().any(|p| p == column)
    }

    /// Columns of `table` outside the public list, in table order.
    pub fn restricted_columns(&self, table: &Table) -> Vec<String> {
        table
            .columns
            .iter()
            .filter(|c| !self.is_public(c))
            .cloned()
            .collect()
    }

    /// Public columns the table does not have.
    pub fn missing_public_columns(&self, table: &Table) -> Vec<String> {
        self.public
            .iter()
            .filter(|p| !table.has_column(p))
            .cloned()
            .collect()
    }

    /// Columns to display, in table order.
    ///
    /// Granted access shows everything. Otherwise only public columns the
    /// table actually has are shown; missing public columns are skipped.
    pub fn visible_columns(&self, table: &Table, decision: AccessDecision) -> Vec<String> {
        if decision.is_granted() {
            return table.columns.clone();
        }
        table
            .columns
            .iter()
            .filter(|c| self.is_public(c))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(columns: &[&str]) -> Table {
        let row = columns.iter().map(|_| CellValue::Null).collect();
        Table::new(columns.iter().map(|c| c.to_string()).collect(), vec![row]).unwrap()
    }

    #[test]
    fn restricted_is_set_difference_in_table_order() {
        let t = table(&["model_pick", "season", "edge", "week"]);
        let policy = ColumnPolicy::default();
        assert_eq!(policy.restricted_columns(&t), vec!["model_pick", "edge"]);
    }

    #[test]
    fn partition_covers_all_columns_disjointly() {
        let t = table(&[
            "season", "week", "away_team", "home_team", "spread_line", "total_line",
            "model_pick", "expected_value",
        ]);
        let policy = ColumnPolicy::default();
        let restricted = policy.restricted_columns(&t);
        let public_present: Vec<String> = t
            .columns
            .iter()
            .filter(|c| policy.is_public(c))
            .cloned()
            .collect();

        assert!(restricted.iter().all(|r| !public_present.contains(r)));
        let mut union: Vec<String> = public_present.into_iter().chain(restricted).collect();
        union.sort();
        let mut all = t.columns.clone();
        all.sort();
        assert_eq!(union, all);
    }

    #[test]
    fn denied_view_follows_table_order_not_policy_order() {
        let t = table(&["week", "season", "model_pick", "home_team"]);
        let policy = ColumnPolicy::default();
        assert_eq!(
            policy.visible_columns(&t, AccessDecision::Denied),
            vec!["week", "season", "home_team"]
        );
        assert_eq!(policy.visible_columns(&t, AccessDecision::Granted), t.columns);
    }

    #[test]
    fn missing_public_columns_are_reported_and_skipped() {
        let t = table(&["season", "week", "away_team", "home_team", "spread_line", "pick"]);
        let policy = ColumnPolicy::default();
        assert_eq!(policy.missing_public_columns(&t), vec!["total_line"]);
        assert_eq!(policy.visible_columns(&t, AccessDecision::Denied).len(), 5);
    }
}
