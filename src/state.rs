use crate::chart::{render_chart, ChartArtifact};
use crate::data::loader::load_sources;
use crate::data::model::MergedDataset;
use crate::data::paths::resolve_paths;
use crate::data::transform::{transform, DerivativeScope, PlotConfig, PlotError, SmoothingWindow};

// ---------------------------------------------------------------------------
// View state: what to plot and how
// ---------------------------------------------------------------------------

/// The plot list and the global render settings.
///
/// Owned by the shell and only mutated between render passes.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub plots: Vec<PlotConfig>,
    pub smoothing_window: SmoothingWindow,
    pub derivative_scope: DerivativeScope,
}

impl ViewState {
    pub fn add_plot(&mut self, config: PlotConfig) {
        log::debug!("Adding plot {config:?}");
        self.plots.push(config);
    }

    /// Remove the plot at `index`; out-of-range indices are ignored.
    pub fn remove_plot(&mut self, index: usize) -> Option<PlotConfig> {
        (index < self.plots.len()).then(|| self.plots.remove(index))
    }

    pub fn set_smoothing_window(&mut self, size: usize) {
        self.smoothing_window = SmoothingWindow::new(size);
    }

    pub fn set_derivative_scope(&mut self, scope: DerivativeScope) {
        self.derivative_scope = scope;
    }
}

/// Build one chart per configured plot, in plot-list order.
pub fn render(view: &ViewState, dataset: &MergedDataset) -> Vec<Result<ChartArtifact, PlotError>> {
    view.plots
        .iter()
        .map(|config| {
            let transformed = transform(dataset, config, view.smoothing_window, view.derivative_scope)?;
            render_chart(&transformed, config)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Raw path / glob text as typed by the user.
    pub paths_input: String,

    /// Merged data (None until at least one file loads).
    pub dataset: Option<MergedDataset>,

    /// Paths from the last load that did not exist.
    pub missing: Vec<String>,

    /// Numeric columns of the current dataset (cached).
    pub numeric_columns: Vec<String>,

    /// Axis selections for the next "Add Plot".
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub compute_derivative: bool,

    pub view: ViewState,

    /// Whether the merged-data preview window is open.
    pub show_preview: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_input(input: String) -> Self {
        let mut state = AppState {
            paths_input: input,
            ..AppState::default()
        };
        state.reload();
        state
    }

    /// Replace the input string and reload when it changed.
    pub fn set_paths_input(&mut self, input: String) {
        if input != self.paths_input {
            self.paths_input = input;
            self.reload();
        }
    }

    /// Re-resolve and reload every path from the current input.
    pub fn reload(&mut self) {
        self.missing.clear();
        self.status_message = None;

        let loaded = resolve_paths(&self.paths_input)
            .map_err(anyhow::Error::from)
            .and_then(|paths| load_sources(&paths));

        match loaded {
            Ok(report) => {
                self.missing = report.missing;
                self.set_dataset(report.dataset);
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.set_dataset(None);
            }
        }
    }

    /// Ingest a newly merged dataset and refresh the axis choices.
    pub fn set_dataset(&mut self, dataset: Option<MergedDataset>) {
        self.numeric_columns = dataset
            .as_ref()
            .map(MergedDataset::numeric_columns)
            .unwrap_or_default();

        // Keep previous selections when the columns survive the reload.
        let keep = |sel: &Option<String>, cols: &[String], fallback: usize| {
            sel.clone()
                .filter(|c| cols.contains(c))
                .or_else(|| cols.get(fallback).or_else(|| cols.first()).cloned())
        };
        self.x_axis = keep(&self.x_axis, &self.numeric_columns, 0);
        self.y_axis = keep(&self.y_axis, &self.numeric_columns, 1);
        self.dataset = dataset;
    }

    /// Whether there are enough numeric columns to offer plotting.
    pub fn can_plot(&self) -> bool {
        self.dataset.is_some() && self.numeric_columns.len() >= 2
    }

    /// Append a plot for the current axis selections.
    ///
    /// Like every plot-list or setting change, this re-reads the input files
    /// first so the charts reflect what is on disk now.
    pub fn add_current_plot(&mut self) {
        self.reload();
        if let (Some(x), Some(y)) = (&self.x_axis, &self.y_axis) {
            let config = PlotConfig::new(x.clone(), y.clone(), self.compute_derivative);
            self.view.add_plot(config);
        }
    }

    pub fn remove_plot(&mut self, index: usize) {
        self.view.remove_plot(index);
        self.reload();
    }

    pub fn set_smoothing_window(&mut self, size: usize) {
        self.view.set_smoothing_window(size);
        self.reload();
    }

    pub fn set_derivative_scope(&mut self, scope: DerivativeScope) {
        self.view.set_derivative_scope(scope);
        self.reload();
    }

    /// Charts for every configured plot; empty when there is no data.
    pub fn charts(&self) -> Vec<Result<ChartArtifact, PlotError>> {
        match &self.dataset {
            Some(ds) => render(&self.view, ds),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, Dataset, SOURCE_COLUMN};
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::from_f64("t", &[0.0, 1.0, 2.0, 3.0]),
            Column::from_f64("v", &[1.0, 2.0, 3.0, 4.0]),
            Column::new(
                SOURCE_COLUMN,
                ["1", "1", "2", "2"].iter().map(|s| CellValue::String(s.to_string())).collect(),
            ),
        ])
    }

    #[test]
    fn test_add_and_remove_plots() {
        let mut view = ViewState::default();
        view.add_plot(PlotConfig::new("t", "v", false));
        view.add_plot(PlotConfig::new("t", "v", true));
        assert_eq!(view.plots.len(), 2);

        assert_eq!(view.remove_plot(5), None);
        let removed = view.remove_plot(0).unwrap();
        assert!(!removed.compute_derivative);
        assert_eq!(view.plots, vec![PlotConfig::new("t", "v", true)]);
    }

    #[test]
    fn test_render_one_chart_per_plot() {
        let mut view = ViewState::default();
        assert!(render(&view, &dataset()).is_empty());

        view.add_plot(PlotConfig::new("t", "v", false));
        view.add_plot(PlotConfig::new("t", "missing", false));
        view.set_smoothing_window(2);

        let charts = render(&view, &dataset());
        assert_eq!(charts.len(), 2);
        let first = charts[0].as_ref().unwrap();
        assert_eq!(first.series.len(), 2);
        assert_eq!(first.series[0].points, vec![[0.0, 1.0], [0.5, 1.5]]);
        assert!(matches!(&charts[1], Err(PlotError::UnknownColumn(c)) if c == "missing"));
    }

    #[test]
    fn test_app_state_loads_and_selects_axes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "t,v,label\n0,1,x\n1,2,y\n").unwrap();
        let input = format!("{}/*.csv", dir.path().display());

        let mut state = AppState::with_input(input);
        assert!(state.can_plot());
        assert_eq!(state.numeric_columns, vec!["t", "v"]);
        assert_eq!(state.x_axis.as_deref(), Some("t"));
        assert_eq!(state.y_axis.as_deref(), Some("v"));

        state.add_current_plot();
        let charts = state.charts();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].as_ref().unwrap().series.len(), 1);
    }

    #[test]
    fn test_single_numeric_column_cannot_plot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "t,label\n0,x\n").unwrap();

        let state = AppState::with_input(path.display().to_string());
        assert!(state.dataset.is_some());
        assert!(!state.can_plot());
    }

    #[test]
    fn test_interactions_pick_up_files_created_later() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        std::fs::write(&a, "t,v\n0,1\n1,2\n").unwrap();
        let input = format!("{}, {}", a.display(), b.display());

        let mut state = AppState::with_input(input);
        assert_eq!(state.missing.len(), 1);

        std::fs::write(&b, "t,v\n0,5\n1,6\n").unwrap();
        state.add_current_plot();
        assert!(state.missing.is_empty());
        let charts = state.charts();
        assert_eq!(charts[0].as_ref().unwrap().series.len(), 2);

        std::fs::remove_file(&b).unwrap();
        state.set_smoothing_window(3);
        assert_eq!(state.missing.len(), 1);
        assert_eq!(state.view.smoothing_window.get(), 3);
        assert_eq!(state.charts()[0].as_ref().unwrap().series.len(), 1);

        std::fs::write(&b, "t,v\n0,5\n").unwrap();
        state.set_derivative_scope(DerivativeScope::PerSource);
        assert!(state.missing.is_empty());

        std::fs::remove_file(&b).unwrap();
        state.remove_plot(0);
        assert!(state.view.plots.is_empty());
        assert_eq!(state.missing.len(), 1);
    }

    #[test]
    fn test_missing_only_input_has_no_data() {
        let state = AppState::with_input("nowhere_1.csv, nowhere_2.csv".to_string());
        assert!(state.dataset.is_none());
        assert_eq!(state.missing, vec!["nowhere_1.csv", "nowhere_2.csv"]);
        assert!(state.charts().is_empty());
    }
}
