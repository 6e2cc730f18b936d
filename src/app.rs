use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: instructions ----
        egui::SidePanel::left("instructions")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::sidebar(ui);
            });

        // ---- Central panel: title, tabs, active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::title(ui, &self.state.config);
            panels::tab_strip(ui, &mut self.state);
            ui.separator();
            let kind = self.state.active_tab;
            panels::tab_body(ui, &mut self.state, kind);
        });
    }
}
