use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::Config;
use crate::data::model::DatasetKind;
use crate::state::AppState;
use crate::view::{ComposedView, Notice};

use super::table;

const SUCCESS: Color32 = Color32::from_rgb(0x3c, 0xb3, 0x71);
const INFO: Color32 = Color32::from_rgb(0x5b, 0x9b, 0xd5);
const WARNING: Color32 = Color32::from_rgb(0xe6, 0xa2, 0x3c);

// ---------------------------------------------------------------------------
// Left side panel – instructions
// ---------------------------------------------------------------------------

/// Render the instructions sidebar.
pub fn sidebar(ui: &mut Ui) {
    ui.heading("Instructions");
    ui.separator();

    let steps: [(&str, &str, &str); 3] = [
        (
            "1. If desired, ",
            "upload",
            " a new CSV for each dataset to temporarily view updated data.",
        ),
        (
            "2. To see ",
            "restricted columns",
            " in the 'Future Games' tab, enter the password in the text box on that tab.",
        ),
        (
            "3. Data changes made via uploads only persist ",
            "for the current session",
            ". For permanent changes, update the CSV files in the data directory and restart the dashboard.",
        ),
    ];
    for (before, bold, after) in steps {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(before);
            ui.label(RichText::new(bold).strong());
            ui.label(after);
        });
        ui.add_space(4.0);
    }

    ui.add_space(8.0);
    egui::Frame::group(ui.style())
        .fill(INFO.gamma_multiply(0.15))
        .show(ui, |ui: &mut Ui| {
            ui.label(
                RichText::new("Feel free to explore each tab above. Enjoy the data insights!")
                    .color(INFO),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let kind = state.active_tab;
            if ui.button(format!("Upload CSV for {kind}…")).clicked() {
                open_upload_dialog(state, kind);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.uploads.contains_key(&kind), egui::Button::new("Clear upload"))
                .clicked()
            {
                state.clear_upload(kind);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if !state.uploads.is_empty() {
            ui.label(format!("{} dataset(s) replaced this session", state.uploads.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Page title and caption.
pub fn title(ui: &mut Ui, config: &Config) {
    ui.label(RichText::new(&config.title).size(28.0).strong());
    ui.label(&config.caption);
    ui.add_space(6.0);
}

/// One selectable label per dataset.
pub fn tab_strip(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for kind in DatasetKind::ALL {
            ui.selectable_value(&mut state.active_tab, kind, kind.tab_label());
        }
    });
}

/// Header, upload row and the composed table for one tab.
pub fn tab_body(ui: &mut Ui, state: &mut AppState, kind: DatasetKind) {
    ui.heading(kind.header());
    upload_row(ui, state, kind);
    ui.add_space(6.0);

    let view = match state.render_tab(kind) {
        Ok(view) => view,
        Err(e) => {
            ui.colored_label(
                Color32::RED,
                format!("Could not load {}: {e}", kind.tab_label()),
            );
            return;
        }
    };

    if kind.is_gated() {
        ui.label(RichText::new("Model Picks Restricted").size(18.0).strong());
        password_box(ui, state);
        notice(ui, &view);
    }

    if let Some(sub) = kind.subheader() {
        ui.label(RichText::new(sub).size(16.0).strong());
    }

    table::data_table(ui, state, &view);
    ui.separator();
}

/// "Upload a CSV to override …" with a Clear button when an upload is active.
fn upload_row(ui: &mut Ui, state: &mut AppState, kind: DatasetKind) {
    let default_name = state.config.files.get(kind).to_string();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Upload a CSV to override {default_name}"));
        if ui.button("Browse…").clicked() {
            open_upload_dialog(state, kind);
        }
        let active = state.uploads.get(&kind).map(|u| u.file_name.clone());
        if let Some(name) = active {
            ui.label(RichText::new(format!("Using {name}")).italics());
            if ui.small_button("Clear").clicked() {
                state.clear_upload(kind);
            }
        }
    });
}

fn password_box(ui: &mut Ui, state: &mut AppState) {
    ui.label("Enter password to unlock restricted columns:");
    ui.add(
        egui::TextEdit::singleline(&mut state.password_input)
            .password(true)
            .desired_width(260.0),
    );
}

fn notice(ui: &mut Ui, view: &ComposedView) {
    match &view.notice {
        Some(n @ Notice::Unlocked) => {
            ui.colored_label(SUCCESS, n.text());
        }
        Some(n @ Notice::PublicOnly) => {
            ui.colored_label(INFO, n.text());
            if !view.hidden_columns.is_empty() {
                ui.weak(hidden_summary(&view.hidden_columns));
            }
        }
        None => {}
    }
    if !view.missing_public_columns.is_empty() {
        ui.colored_label(
            WARNING,
            format!(
                "This dataset has no {} column(s); showing the remaining public columns.",
                view.missing_public_columns.join(", ")
            ),
        );
    }
}

fn hidden_summary(hidden: &[String]) -> String {
    match hidden.len() {
        1 => "1 restricted column hidden.".to_string(),
        n => format!("{n} restricted columns hidden."),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_upload_dialog(state: &mut AppState, kind: DatasetKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Replace {kind} data"))
        .add_filter("CSV", &["csv"])
        .add_filter("Tab-separated", &["tsv", "tab"])
        .add_filter("JSON records", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.set_upload(kind, &path) {
            log::error!("Failed to read upload: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
