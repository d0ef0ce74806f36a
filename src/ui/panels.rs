use eframe::egui::{self, Color32, Key, KeyboardShortcut, Modifiers, RichText, Ui};

use crate::config::{SMOOTHING_WINDOW_MAX, SMOOTHING_WINDOW_MIN};
use crate::data::transform::DerivativeScope;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – inputs and plot controls
// ---------------------------------------------------------------------------

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.label("Paths to CSV files (comma separated) or a wildcard, e.g. mydir/**/*.csv");

    let mut input = state.paths_input.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut input)
            .hint_text("a.csv, b.csv")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_paths_input(input);
    }

    for path in &state.missing {
        ui.label(RichText::new(format!("File not found: {path}")).color(Color32::RED));
    }

    ui.separator();
    ui.heading("Plot");

    if state.dataset.is_none() {
        ui.label("No data loaded.");
        return;
    }
    if !state.can_plot() {
        ui.label(
            RichText::new("Error: Not enough numeric columns to plot.").color(Color32::RED),
        );
        return;
    }

    let columns = state.numeric_columns.clone();
    axis_selector(ui, "x_axis", "X-axis", &columns, &mut state.x_axis);
    axis_selector(ui, "y_axis", "Y-axis", &columns, &mut state.y_axis);

    ui.add_space(4.0);
    let mut window = state.view.smoothing_window.get();
    if ui
        .add(
            egui::Slider::new(&mut window, SMOOTHING_WINDOW_MIN..=SMOOTHING_WINDOW_MAX)
                .text("Smoothing window"),
        )
        .changed()
    {
        state.set_smoothing_window(window);
    }

    ui.checkbox(&mut state.compute_derivative, "Compute Derivative of Y-axis");

    let mut per_source = state.view.derivative_scope == DerivativeScope::PerSource;
    if ui
        .checkbox(&mut per_source, "Per-source derivative")
        .on_hover_text("Compute dy/dx inside each file instead of across the merged rows")
        .changed()
    {
        state.set_derivative_scope(if per_source {
            DerivativeScope::PerSource
        } else {
            DerivativeScope::Concatenated
        });
    }

    ui.add_space(4.0);
    if ui.button("Add Plot").clicked() {
        state.add_current_plot();
    }
}

fn axis_selector(ui: &mut Ui, id: &str, label: &str, columns: &[String], selected: &mut Option<String>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.clone().unwrap_or_default())
            .show_ui(ui, |ui: &mut Ui| {
                for col in columns {
                    ui.selectable_value(selected, Some(col.clone()), col);
                }
            });
    });
}

/// Re-read every input file without editing the path text.
pub const RELOAD_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::R);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let reload = egui::Button::new("Reload")
                .shortcut_text(ui.ctx().format_shortcut(&RELOAD_SHORTCUT));
            if ui.add(reload).clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Add files…").clicked() {
                add_files_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts as JSON…").clicked() {
                export_charts_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows from {} source(s), {} plot(s)",
                ds.len(),
                ds.source_groups().len(),
                state.view.plots.len()
            ));
            ui.separator();
            ui.toggle_value(&mut state.show_preview, "Merged Data");
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Pick CSV files and append them to the input as literal paths.
pub fn add_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add CSV files")
        .add_filter("CSV", &["csv"])
        .pick_files();

    let Some(files) = files else {
        return;
    };
    let picked: Vec<String> = files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    // A glob cannot be combined with literal paths, so it is replaced.
    let current = state.paths_input.trim();
    let input = if current.is_empty() || current.contains('*') {
        picked.join(", ")
    } else {
        format!("{current}, {}", picked.join(", "))
    };
    state.set_paths_input(input);
}

/// Write every chart of the current render pass to a JSON file.
pub fn export_charts_dialog(state: &mut AppState) {
    let charts: Vec<_> = state.charts().into_iter().filter_map(Result::ok).collect();
    if charts.is_empty() {
        state.status_message = Some("Nothing to export: add a plot first.".to_string());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        match crate::chart::write_json(&path, &charts) {
            Ok(()) => {
                log::info!("Exported {} chart(s) to {}", charts.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
