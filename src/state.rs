use std::collections::BTreeMap;
use std::path::Path;

use crate::access::{AccessDecision, AccessGate};
use crate::config::Config;
use crate::data::filter::ColumnPolicy;
use crate::data::loader::TableSource;
use crate::data::model::{DatasetKind, Table};
use crate::data::DataError;
use crate::view::{self, ComposedView};

// ---------------------------------------------------------------------------
// Session-scoped upload
// ---------------------------------------------------------------------------

/// A replacement dataset picked by the viewer. Lives only as long as the
/// running session.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Column sort applied to the displayed rows of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub descending: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,
    pub gate: AccessGate,
    pub policy: ColumnPolicy,

    /// Currently selected tab.
    pub active_tab: DatasetKind,

    /// Password text as typed; compared against the secret on every render.
    pub password_input: String,

    /// Per-dataset replacements picked this session.
    pub uploads: BTreeMap<DatasetKind, Upload>,

    /// Per-tab row ordering chosen by clicking headers.
    pub sort: BTreeMap<DatasetKind, SortState>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Last load error per tab, so each distinct failure is logged once.
    last_errors: BTreeMap<DatasetKind, String>,

    /// Last missing-public-column warning, logged once per change.
    last_missing_public: Vec<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gate = AccessGate::new(config.password.clone());
        if !gate.is_configured() {
            log::warn!("No password configured; restricted columns cannot be unlocked");
        } else if gate.has_empty_secret() {
            log::warn!("Configured password is empty; restricted columns are visible to everyone");
        }
        let policy = ColumnPolicy::new(config.public_columns.clone());

        Self {
            config,
            gate,
            policy,
            active_tab: DatasetKind::Past,
            password_input: String::new(),
            uploads: BTreeMap::new(),
            sort: BTreeMap::new(),
            status_message: None,
            last_errors: BTreeMap::new(),
            last_missing_public: Vec::new(),
        }
    }

    /// Access decision for the current password text.
    pub fn access_decision(&self) -> AccessDecision {
        self.gate.decide(&self.password_input)
    }

    /// Dataset source for this render: the upload if one exists, else the
    /// configured file.
    pub fn source_for<'a>(&'a self, kind: DatasetKind, default_path: &'a Path) -> TableSource<'a> {
        match self.uploads.get(&kind) {
            Some(upload) => TableSource::Upload {
                file_name: &upload.file_name,
                bytes: &upload.bytes,
            },
            None => TableSource::Default(default_path),
        }
    }

    /// Load and compose one tab from scratch.
    pub fn render_tab(&mut self, kind: DatasetKind) -> Result<ComposedView, DataError> {
        let default_path = self.config.source_path(kind);
        let decision = if kind.is_gated() {
            self.access_decision()
        } else {
            AccessDecision::Granted
        };
        let result = {
            let source = self.source_for(kind, &default_path);
            view::render(kind, &source, &self.policy, decision)
        };

        match &result {
            Ok(view) => {
                self.last_errors.remove(&kind);
                if kind.is_gated() && view.missing_public_columns != self.last_missing_public {
                    if !view.missing_public_columns.is_empty() {
                        log::warn!(
                            "{kind} dataset lacks public columns {:?}; they are omitted",
                            view.missing_public_columns
                        );
                    }
                    self.last_missing_public = view.missing_public_columns.clone();
                }
            }
            Err(e) => {
                let msg = e.to_string();
                if self.last_errors.get(&kind) != Some(&msg) {
                    log::error!("Failed to load {kind}: {msg}");
                    self.last_errors.insert(kind, msg);
                }
            }
        }
        result
    }

    /// Replace a dataset for the rest of the session with the file at `path`.
    pub fn set_upload(&mut self, kind: DatasetKind, path: &Path) -> Result<(), DataError> {
        let bytes = std::fs::read(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.csv")
            .to_string();
        log::info!("{kind}: using uploaded {file_name} ({} bytes)", bytes.len());
        self.uploads.insert(kind, Upload { file_name, bytes });
        self.sort.remove(&kind);
        self.status_message = None;
        Ok(())
    }

    /// Go back to the configured file.
    pub fn clear_upload(&mut self, kind: DatasetKind) {
        if let Some(upload) = self.uploads.remove(&kind) {
            log::info!("{kind}: dropped uploaded {}", upload.file_name);
            self.sort.remove(&kind);
        }
    }

    /// Cycle a header click: ascending → descending → unsorted.
    pub fn toggle_sort(&mut self, kind: DatasetKind, column: &str) {
        match self.sort.get(&kind) {
            Some(s) if s.column == column && !s.descending => {
                self.sort.insert(
                    kind,
                    SortState {
                        column: column.to_string(),
                        descending: true,
                    },
                );
            }
            Some(s) if s.column == column => {
                self.sort.remove(&kind);
            }
            _ => {
                self.sort.insert(
                    kind,
                    SortState {
                        column: column.to_string(),
                        descending: false,
                    },
                );
            }
        }
    }

    /// Row order for a displayed view, honouring the tab's sort if its
    /// column is still displayed.
    pub fn row_order(&self, view: &ComposedView) -> Vec<usize> {
        match self
            .sort
            .get(&view.kind)
            .and_then(|s| view.table.column_index(&s.column).map(|i| (i, s.descending)))
        {
            Some((col, descending)) => view.table.sorted_row_order(col, descending),
            None => (0..view.table.len()).collect(),
        }
    }

    /// The view's table with rows in on-screen order.
    pub fn displayed_table(&self, view: &ComposedView) -> Table {
        Table {
            columns: view.table.columns.clone(),
            rows: self
                .row_order(view)
                .into_iter()
                .map(|i| view.table.rows[i].clone())
                .collect(),
        }
    }
}
