use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::data::model::CellValue;
use crate::state::AppState;
use crate::view::ComposedView;

const HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Full-width data table
// ---------------------------------------------------------------------------

/// Render the displayed table of a view, with a small toolbar above it.
/// Clicking a header cycles the sort for that column.
pub fn data_table(ui: &mut Ui, state: &mut AppState, view: &ComposedView) {
    let table = &view.table;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} rows × {} columns",
            table.len(),
            table.column_count()
        ));
        if ui.small_button("Download CSV").clicked() {
            save_view_dialog(state, view);
        }
    });

    if table.column_count() == 0 {
        ui.weak("No columns to display.");
        return;
    }

    let order = state.row_order(view);
    let sort = state.sort.get(&view.kind).cloned();
    let mut clicked: Option<String> = None;

    ui.push_id(view.kind, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0).clip(true), table.column_count())
                .min_scrolled_height(0.0)
                .header(HEADER_HEIGHT, |mut header| {
                    for name in &table.columns {
                        header.col(|ui: &mut Ui| {
                            let marker = match &sort {
                                Some(s) if &s.column == name && s.descending => " ⬇",
                                Some(s) if &s.column == name => " ⬆",
                                _ => "",
                            };
                            let label = RichText::new(format!("{name}{marker}")).strong();
                            if ui.add(egui::Button::new(label).frame(false)).clicked() {
                                clicked = Some(name.clone());
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, order.len(), |mut row| {
                        let cells = &table.rows[order[row.index()]];
                        for cell in cells {
                            row.col(|ui: &mut Ui| cell_label(ui, cell));
                        }
                    });
                });
        });
    });

    if let Some(column) = clicked {
        state.toggle_sort(view.kind, &column);
    }
}

fn cell_label(ui: &mut Ui, cell: &CellValue) {
    match cell {
        CellValue::Null => {
            ui.weak("None");
        }
        CellValue::Integer(_) | CellValue::Float(_) => {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.monospace(cell.to_string());
            });
        }
        _ => {
            ui.label(cell.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Save dialog
// ---------------------------------------------------------------------------

/// Export exactly what the view displays, in on-screen row order.
fn save_view_dialog(state: &mut AppState, view: &ComposedView) {
    let default_name = state.config.files.get(view.kind).to_string();
    let file = rfd::FileDialog::new()
        .set_title("Save displayed table")
        .set_file_name(&default_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let shown = state.displayed_table(view);
        match export::save_csv(&shown, &path) {
            Ok(()) => {
                log::info!(
                    "Saved {} rows of {} to {}",
                    shown.len(),
                    view.kind,
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save table: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
