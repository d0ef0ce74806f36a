mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CsvPlotterApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Paths given on the command line pre-fill the input box.
    let input = std::env::args().skip(1).collect::<Vec<_>>().join(", ");
    if !input.is_empty() {
        log::info!("Initial input: {input}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(CsvPlotterApp::new(input)))),
    )
}
