use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::MergedDataset;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Floating "Merged Data" window, shown while the toolbar toggle is on.
pub fn preview_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let mut open = state.show_preview;
    egui::Window::new("Merged Data")
        .open(&mut open)
        .default_size([720.0, 420.0])
        .show(ctx, |ui: &mut Ui| {
            egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                merged_table(ui, dataset);
            });
        });
    state.show_preview = open;
}

/// Every merged row, with its position in the merged dataset first.
fn merged_table(ui: &mut Ui, dataset: &MergedDataset) {
    let columns = dataset.columns();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(TableColumn::auto().at_least(40.0))
        .columns(TableColumn::auto().at_least(60.0), columns.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for col in columns {
                header.col(|ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label(i.to_string());
                });
                for col in columns {
                    row.col(|ui| {
                        ui.label(col.values[i].to_string());
                    });
                }
            });
        });
}
