use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CellValue, Dataset, MergedDataset, ORIGINAL_COLUMN, SOURCE_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Outcome of loading every resolved path.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Merged rows of every file that loaded; `None` means nothing to display.
    pub dataset: Option<MergedDataset>,
    /// Paths that did not exist, in input order.
    pub missing: Vec<String>,
}

/// Load every path in order and merge them into one dataset.
///
/// Each path consumes a 1-based index whether or not it exists, so the
/// `Source` tags of surviving files may have gaps. Missing paths are
/// collected in the report; a file that exists but fails to parse fails
/// the whole load.
pub fn load_sources(paths: &[String]) -> Result<LoadReport> {
    let mut tables = Vec::with_capacity(paths.len());
    let mut missing = Vec::new();

    for (idx, path) in paths.iter().enumerate() {
        if !Path::new(path).exists() {
            log::error!("File not found: {path}");
            missing.push(path.clone());
            continue;
        }

        let mut table = load_csv(Path::new(path))
            .with_context(|| format!("loading {path}"))?;
        table.fill_column(SOURCE_COLUMN, CellValue::String((idx + 1).to_string()));
        table.fill_column(ORIGINAL_COLUMN, CellValue::String(path.clone()));
        log::debug!("Loaded {} rows from {path}", table.len());
        tables.push(table);
    }

    let n_sources = tables.len();
    let dataset = Dataset::concat(tables);
    match &dataset {
        Some(ds) => log::info!(
            "Merged {} rows from {n_sources} source(s) with columns {:?}",
            ds.len(),
            ds.column_names()
        ),
        None => log::info!("No data loaded from {} path(s)", paths.len()),
    }

    Ok(LoadReport { dataset, missing })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row.
/// Headers and fields are whitespace-trimmed; cell types are guessed per
/// field (see [`CellValue::infer`]). Short rows are padded with nulls, rows
/// longer than the header are an error.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() > headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, saw {}",
                headers.len(),
                record.len()
            );
        }
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    Ok(Dataset::from_rows(headers, rows))
}
