use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvPlotterApp {
    pub state: AppState,
}

impl CsvPlotterApp {
    /// Start with `input` already resolved and loaded (may be empty).
    pub fn new(input: String) -> Self {
        Self {
            state: AppState::with_input(input),
        }
    }
}

impl eframe::App for CsvPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_shortcut(&panels::RELOAD_SHORTCUT)) {
            self.state.reload();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs and plot controls ----
        egui::SidePanel::left("input_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: one chart per plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_list(ui, &mut self.state);
        });

        // ---- Floating window: merged data preview ----
        table::preview_window(ctx, &mut self.state);
    }
}
