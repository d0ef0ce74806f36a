use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::ChartArtifact;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart list (central panel)
// ---------------------------------------------------------------------------

/// Render every configured plot, each with its own remove button.
pub fn chart_list(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Enter CSV paths or a wildcard in the left panel");
        });
        return;
    }
    if state.view.plots.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick axes and press \"Add Plot\"");
        });
        return;
    }

    let charts = state.charts();
    let mut remove = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, chart) in charts.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.button(format!("Remove Plot {}", i + 1)).clicked() {
                        remove = Some(i);
                    }
                    if let Ok(chart) = chart {
                        ui.heading(&chart.title);
                    }
                });
                match chart {
                    Ok(chart) => draw_chart(ui, i, chart),
                    Err(e) => {
                        ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                    }
                }
                ui.separator();
            }
        });

    if let Some(i) = remove {
        state.remove_plot(i);
    }
}

/// Draw one chart artifact as a fixed-size square plot.
fn draw_chart(ui: &mut Ui, index: usize, chart: &ChartArtifact) {
    Plot::new(("chart", index))
        .width(chart.width)
        .height(chart.height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{}: {:.4}\n{}: {:.4}", chart.x_label, value.x, chart.y_label, value.y)
            } else {
                chart.hover_text(name, value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let [r, g, b] = series.color;
                let points: PlotPoints = series.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(&series.source)
                    .color(Color32::from_rgb(r, g, b))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
