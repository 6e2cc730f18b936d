use adshark_bets::app::DashboardApp;
use adshark_bets::config::Config;
use anyhow::{anyhow, Context, Result};
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load().context("loading dashboard configuration")?;
    log::info!("Reading datasets from {}", config.data_dir.display());

    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(config)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
