use thiserror::Error;

use super::model::{Column, MergedDataset, DERIVATIVE_COLUMN};
use crate::config::{SMOOTHING_WINDOW_DEFAULT, SMOOTHING_WINDOW_MAX, SMOOTHING_WINDOW_MIN};

// ---------------------------------------------------------------------------
// Plot configuration
// ---------------------------------------------------------------------------

/// One requested chart. Immutable once added to the plot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    pub x_axis: String,
    pub y_axis: String,
    pub compute_derivative: bool,
}

impl PlotConfig {
    pub fn new(x_axis: impl Into<String>, y_axis: impl Into<String>, compute_derivative: bool) -> Self {
        PlotConfig {
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            compute_derivative,
        }
    }
}

/// Trailing moving-average size shared by every plot, always in 1..=20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingWindow(usize);

impl SmoothingWindow {
    /// Clamp `size` into the supported range.
    pub fn new(size: usize) -> Self {
        SmoothingWindow(size.clamp(SMOOTHING_WINDOW_MIN, SMOOTHING_WINDOW_MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        SmoothingWindow(SMOOTHING_WINDOW_DEFAULT)
    }
}

/// Which rows a single dy/dx gradient runs over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DerivativeScope {
    /// One gradient across the whole merged sequence, crossing file boundaries.
    #[default]
    Concatenated,
    /// One gradient per `Source` group.
    PerSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("column '{0}' does not exist")]
    UnknownColumn(String),
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),
}

// ---------------------------------------------------------------------------
// Transformation
// ---------------------------------------------------------------------------

/// Smooth X and Y per source and optionally append `dy_dx`.
///
/// The returned dataset has the same rows as the input; the X and Y columns
/// are overwritten with their smoothed float values.
pub fn transform(
    dataset: &MergedDataset,
    config: &PlotConfig,
    window: SmoothingWindow,
    scope: DerivativeScope,
) -> Result<MergedDataset, PlotError> {
    let x_raw = numeric_column(dataset, &config.x_axis)?;
    let y_raw = numeric_column(dataset, &config.y_axis)?;
    let groups = dataset.source_groups();

    let x = smooth_grouped(&x_raw, &groups, window.get());
    let y = smooth_grouped(&y_raw, &groups, window.get());

    let mut out = dataset.clone();
    out.set_column(Column::from_f64(&config.x_axis, &x));
    out.set_column(Column::from_f64(&config.y_axis, &y));

    if config.compute_derivative {
        let dy_dx = match scope {
            DerivativeScope::Concatenated => gradient(&y, &x),
            DerivativeScope::PerSource => {
                let mut dy_dx = vec![f64::NAN; y.len()];
                for (_, rows) in &groups {
                    let gx: Vec<f64> = rows.iter().map(|&r| x[r]).collect();
                    let gy: Vec<f64> = rows.iter().map(|&r| y[r]).collect();
                    for (&r, d) in rows.iter().zip(gradient(&gy, &gx)) {
                        dy_dx[r] = d;
                    }
                }
                dy_dx
            }
        };
        out.set_column(Column::from_f64(DERIVATIVE_COLUMN, &dy_dx));
    }

    Ok(out)
}

fn numeric_column(dataset: &MergedDataset, name: &str) -> Result<Vec<f64>, PlotError> {
    let column = dataset
        .column(name)
        .ok_or_else(|| PlotError::UnknownColumn(name.to_string()))?;
    if !column.is_numeric() {
        return Err(PlotError::NonNumericColumn(name.to_string()));
    }
    Ok(column.to_f64())
}

fn smooth_grouped(values: &[f64], groups: &[(String, Vec<usize>)], window: usize) -> Vec<f64> {
    let mut out = values.to_vec();
    for (_, rows) in groups {
        let series: Vec<f64> = rows.iter().map(|&r| values[r]).collect();
        for (&r, v) in rows.iter().zip(rolling_mean(&series, window)) {
            out[r] = v;
        }
    }
    out
}

/// Trailing moving average with a minimum of one observation.
///
/// Point `i` is the mean of the non-NaN values in `values[i+1-window..=i]`
/// (clipped at 0), or NaN when that slice holds none.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Derivative of `y` with respect to the coordinates `x`.
///
/// Interior points use the second-order central difference for uneven
/// spacing; the first and last points use one-sided differences. A
/// sequence shorter than two points has no defined derivative (NaN).
pub fn gradient(y: &[f64], x: &[f64]) -> Vec<f64> {
    debug_assert_eq!(y.len(), x.len());
    let n = y.len();
    if n < 2 {
        return vec![f64::NAN; n];
    }

    let mut out = Vec::with_capacity(n);
    out.push((y[1] - y[0]) / (x[1] - x[0]));
    for i in 1..n - 1 {
        let h1 = x[i] - x[i - 1];
        let h2 = x[i + 1] - x[i];
        let a = -h2 / (h1 * (h1 + h2));
        let b = (h2 - h1) / (h1 * h2);
        let c = h1 / (h2 * (h1 + h2));
        out.push(a * y[i - 1] + b * y[i] + c * y[i + 1]);
    }
    out.push((y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]));
    out
}
