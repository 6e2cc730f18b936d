//! Decides what each tab shows for one render.
//!
//! A render is a pure function of the dataset source, the column policy and
//! the access decision; nothing is cached between renders.

use crate::access::AccessDecision;
use crate::data::filter::ColumnPolicy;
use crate::data::loader::{load_source, TableSource};
use crate::data::model::{DatasetKind, Table};
use crate::data::DataError;

/// Message shown above a gated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Unlocked,
    PublicOnly,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::Unlocked => "Correct password! Displaying all columns.",
            Notice::PublicOnly => {
                "Showing only public columns. Enter the correct password above to unlock restricted columns."
            }
        }
    }
}

/// The table a tab displays plus what the gate did to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedView {
    pub kind: DatasetKind,
    /// Exactly the displayed columns and rows.
    pub table: Table,
    /// Set only for gated views.
    pub notice: Option<Notice>,
    /// Restricted columns withheld from this render.
    pub hidden_columns: Vec<String>,
    /// Public columns the loaded dataset lacks (skipped, not fatal).
    pub missing_public_columns: Vec<String>,
}

impl ComposedView {
    pub fn displayed_columns(&self) -> &[String] {
        &self.table.columns
    }
}

/// Apply the tab's display rule to a loaded table.
pub fn compose(
    kind: DatasetKind,
    table: Table,
    policy: &ColumnPolicy,
    decision: AccessDecision,
) -> Result<ComposedView, DataError> {
    if !kind.is_gated() {
        return Ok(ComposedView {
            kind,
            table,
            notice: None,
            hidden_columns: Vec::new(),
            missing_public_columns: Vec::new(),
        });
    }

    let missing_public_columns = policy.missing_public_columns(&table);
    if !missing_public_columns.is_empty() {
        log::debug!("{kind}: omitting missing public columns {missing_public_columns:?}");
    }

    let (table, notice, hidden_columns) = if decision.is_granted() {
        (table, Notice::Unlocked, Vec::new())
    } else {
        let visible = policy.visible_columns(&table, decision);
        let hidden = policy.restricted_columns(&table);
        (table.select(&visible)?, Notice::PublicOnly, hidden)
    };

    Ok(ComposedView {
        kind,
        table,
        notice: Some(notice),
        hidden_columns,
        missing_public_columns,
    })
}

/// Load the tab's dataset from `source` and compose its view.
pub fn render(
    kind: DatasetKind,
    source: &TableSource<'_>,
    policy: &ColumnPolicy,
    decision: AccessDecision,
) -> Result<ComposedView, DataError> {
    let table = load_source(source)?;
    log::debug!(
        "{kind}: loaded {} rows x {} columns from {}",
        table.len(),
        table.column_count(),
        source.origin()
    );
    compose(kind, table, policy, decision)
}
