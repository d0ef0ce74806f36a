use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::color::{ColorMap, Rgb};
use crate::config::CHART_SIZE;
use crate::data::model::{MergedDataset, DERIVATIVE_COLUMN, ORIGINAL_COLUMN};
use crate::data::transform::{PlotConfig, PlotError};

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// A renderable line chart: one polyline per source file.
///
/// Rebuilt on every render pass; the UI only draws it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartArtifact {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: f32,
    pub height: f32,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    /// `Source` tag, also the legend name.
    pub source: String,
    /// Path the rows were loaded from.
    pub original: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

impl ChartArtifact {
    pub fn series_for(&self, source: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.source == source)
    }

    /// Hover text for a point of the named series.
    pub fn hover_text(&self, source: &str, x: f64, y: f64) -> String {
        let original = self
            .series_for(source)
            .map(|s| s.original.as_str())
            .unwrap_or_default();
        format!(
            "Source: {source}\n{}: {x:.4}\n{}: {y:.4}\nOriginal: {original}",
            self.x_label, self.y_label
        )
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Turn a transformed dataset into a chart for `config`.
///
/// In derivative mode the y values come from the `dy_dx` column, which the
/// transformer must already have appended.
pub fn render_chart(dataset: &MergedDataset, config: &PlotConfig) -> Result<ChartArtifact, PlotError> {
    let (y_column, y_label, title) = if config.compute_derivative {
        (
            DERIVATIVE_COLUMN,
            "dy/dx".to_string(),
            format!("Derivative of {} vs {}", config.y_axis, config.x_axis),
        )
    } else {
        (
            config.y_axis.as_str(),
            config.y_axis.clone(),
            format!("{} vs {}", config.y_axis, config.x_axis),
        )
    };

    let x = dataset
        .column(&config.x_axis)
        .ok_or_else(|| PlotError::UnknownColumn(config.x_axis.clone()))?
        .to_f64();
    let y = dataset
        .column(y_column)
        .ok_or_else(|| PlotError::UnknownColumn(y_column.to_string()))?
        .to_f64();
    let original = dataset.column(ORIGINAL_COLUMN);

    let groups = dataset.source_groups();
    let colors = ColorMap::new(groups.iter().map(|(source, _)| source.as_str()));

    let series = groups
        .iter()
        .map(|(source, rows)| ChartSeries {
            source: source.clone(),
            original: rows
                .first()
                .and_then(|&r| original.map(|c| c.values[r].to_string()))
                .unwrap_or_default(),
            color: colors.color_for(source),
            points: rows.iter().map(|&r| [x[r], y[r]]).collect(),
        })
        .collect();

    Ok(ChartArtifact {
        title,
        x_label: config.x_axis.clone(),
        y_label,
        width: CHART_SIZE,
        height: CHART_SIZE,
        series,
    })
}

/// Write charts as pretty-printed JSON.
pub fn write_json(path: &Path, charts: &[ChartArtifact]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), charts)
        .context("serialising charts")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette_color;
    use crate::data::model::{CellValue, Column, Dataset, SOURCE_COLUMN};
    use crate::data::transform::{transform, DerivativeScope, SmoothingWindow};

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::String(v.to_string())).collect()
    }

    fn merged() -> Dataset {
        Dataset::new(vec![
            Column::from_f64("t", &[0.0, 1.0, 2.0, 0.0, 1.0]),
            Column::from_f64("v", &[1.0, 2.0, 3.0, 5.0, 7.0]),
            Column::new(SOURCE_COLUMN, text(&["1", "1", "1", "3", "3"])),
            Column::new(ORIGINAL_COLUMN, text(&["a.csv", "a.csv", "a.csv", "c.csv", "c.csv"])),
        ])
    }

    #[test]
    fn test_one_series_per_source() {
        let chart = render_chart(&merged(), &PlotConfig::new("t", "v", false)).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.title, "v vs t");
        assert_eq!(chart.y_label, "v");
        assert_eq!((chart.width, chart.height), (CHART_SIZE, CHART_SIZE));

        let first = &chart.series[0];
        assert_eq!(first.source, "1");
        assert_eq!(first.original, "a.csv");
        assert_eq!(first.points, vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);

        assert_eq!(first.color, palette_color(0));
        assert_eq!(chart.series[1].color, palette_color(1));
    }

    #[test]
    fn test_derivative_chart_uses_dy_dx() {
        let config = PlotConfig::new("t", "v", true);
        let transformed = transform(
            &merged(),
            &config,
            SmoothingWindow::default(),
            DerivativeScope::PerSource,
        )
        .unwrap();
        let chart = render_chart(&transformed, &config).unwrap();

        assert_eq!(chart.title, "Derivative of v vs t");
        assert_eq!(chart.y_label, "dy/dx");
        assert_eq!(chart.series[1].points, vec![[0.0, 2.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_derivative_without_transform_is_error() {
        let err = render_chart(&merged(), &PlotConfig::new("t", "v", true)).unwrap_err();
        assert_eq!(err, PlotError::UnknownColumn(DERIVATIVE_COLUMN.to_string()));
    }

    #[test]
    fn test_empty_dataset_renders_empty_chart() {
        let empty = Dataset::new(vec![
            Column::new("t", Vec::new()),
            Column::new("v", Vec::new()),
            Column::new(SOURCE_COLUMN, Vec::new()),
        ]);
        let chart = render_chart(&empty, &PlotConfig::new("t", "v", false)).unwrap();
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_hover_text_names_source_and_path() {
        let chart = render_chart(&merged(), &PlotConfig::new("t", "v", false)).unwrap();
        let hover = chart.hover_text("3", 1.0, 7.0);
        assert!(hover.contains("Source: 3"));
        assert!(hover.contains("t: 1.0000"));
        assert!(hover.contains("v: 7.0000"));
        assert!(hover.contains("Original: c.csv"));
    }

    #[test]
    fn test_artifact_serialises_to_json() {
        let chart = render_chart(&merged(), &PlotConfig::new("t", "v", false)).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["title"], "v vs t");
        assert_eq!(json["series"][1]["original"], "c.csv");
    }

    #[test]
    fn test_write_json_round_trips_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        let charts = vec![
            render_chart(&merged(), &PlotConfig::new("t", "v", false)).unwrap(),
            render_chart(&merged(), &PlotConfig::new("v", "t", false)).unwrap(),
        ];
        write_json(&path, &charts).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["title"], "t vs v");
    }
}
