use std::collections::HashMap;
use std::fmt;

/// Column tagging each row with the 1-based index of the file it came from.
pub const SOURCE_COLUMN: &str = "Source";
/// Column holding the literal path string a row was loaded from.
pub const ORIGINAL_COLUMN: &str = "Original";
/// Column appended by the transformer in derivative mode.
pub const DERIVATIVE_COLUMN: &str = "dy_dx";

/// Field spellings read as a missing value (pandas' default NA set).
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred per cell while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Empty field, or absent because the row's file lacked the column.
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field. Surrounding whitespace is ignored.
    pub fn infer(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || NA_MARKERS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Build a float column from plain numbers.
    pub fn from_f64(name: impl Into<String>, values: &[f64]) -> Self {
        Column::new(name, values.iter().map(|&v| CellValue::Float(v)).collect())
    }

    /// A column is numeric when every non-null cell is an integer or float.
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.is_null() || v.as_f64().is_some())
    }

    /// Numeric view of the column; nulls and text become NaN.
    pub fn to_f64(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – one loaded file, or the concatenation of all of them
// ---------------------------------------------------------------------------

/// Column-oriented table. Every column holds exactly `len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

/// The concatenation of every successfully loaded file.
pub type MergedDataset = Dataset;

impl Dataset {
    /// Build a table from equally long columns.
    pub fn new(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map_or(0, |c| c.values.len());
        debug_assert!(columns.iter().all(|c| c.values.len() == n_rows));
        Dataset { columns, n_rows }
    }

    /// Build a table from a header and row-major records.
    ///
    /// Rows shorter than the header are padded with `Null`; extra trailing
    /// fields are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        let n_rows = rows.len();
        for row in rows {
            let mut fields = row.into_iter();
            for col in columns.iter_mut() {
                col.values.push(fields.next().unwrap_or(CellValue::Null));
            }
        }
        Dataset { columns, n_rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Replace the column with the same name, or append it.
    pub fn set_column(&mut self, column: Column) {
        debug_assert_eq!(column.values.len(), self.n_rows);
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Append (or overwrite) a column holding the same value on every row.
    pub fn fill_column(&mut self, name: &str, value: CellValue) {
        let values = vec![value; self.n_rows];
        self.set_column(Column::new(name, values));
    }

    /// Concatenate tables row-wise, aligning columns by name.
    ///
    /// Columns are the union in first-seen order; cells a table lacks are
    /// `Null`. Returns `None` when there is nothing to concatenate.
    pub fn concat(tables: Vec<Dataset>) -> Option<Dataset> {
        if tables.is_empty() {
            return None;
        }

        let mut names: Vec<String> = Vec::new();
        for table in &tables {
            for col in &table.columns {
                if !names.contains(&col.name) {
                    names.push(col.name.clone());
                }
            }
        }

        let n_rows: usize = tables.iter().map(Dataset::len).sum();
        let mut merged: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(n_rows)))
            .collect();

        for mut table in tables {
            let len = table.n_rows;
            for out in &mut merged {
                match table.columns.iter().position(|c| c.name == out.name) {
                    Some(idx) => out
                        .values
                        .append(&mut table.columns[idx].values),
                    None => out
                        .values
                        .extend(std::iter::repeat(CellValue::Null).take(len)),
                }
            }
        }

        Some(Dataset::new(merged))
    }

    /// Row indices grouped by their `Source` value, groups in first-seen order.
    pub fn source_groups(&self) -> Vec<(String, Vec<usize>)> {
        let Some(source) = self.column(SOURCE_COLUMN) else {
            return Vec::new();
        };

        let mut order: Vec<(String, Vec<usize>)> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (row, value) in source.values.iter().enumerate() {
            let key = value.to_string();
            let slot = *lookup.entry(key.clone()).or_insert_with(|| {
                order.push((key, Vec::new()));
                order.len() - 1
            });
            order[slot].1.push(row);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cols: &[(&str, &[CellValue])]) -> Dataset {
        Dataset::new(
            cols.iter()
                .map(|(name, vals)| Column::new(*name, vals.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_infer_cell_types() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("42"), CellValue::Integer(42));
        assert_eq!(CellValue::infer("-1.5"), CellValue::Float(-1.5));
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::infer("run-a"),
            CellValue::String("run-a".to_string())
        );
    }

    #[test]
    fn test_infer_trims_and_reads_na_markers() {
        assert_eq!(CellValue::infer(" 1"), CellValue::Integer(1));
        assert_eq!(CellValue::infer("2.5 "), CellValue::Float(2.5));
        for marker in ["NA", "N/A", "null", "NaN", "nan", "-nan", "#N/A", "None", " NA "] {
            assert_eq!(CellValue::infer(marker), CellValue::Null, "{marker:?}");
        }
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let ds = Dataset::from_rows(
            vec!["t".to_string(), "v".to_string()],
            vec![
                vec![CellValue::Integer(0), CellValue::Integer(1)],
                vec![CellValue::Integer(1)],
            ],
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.column("v").unwrap().values,
            vec![CellValue::Integer(1), CellValue::Null]
        );
    }

    #[test]
    fn test_numeric_columns_skip_text_and_bool() {
        let ds = table(&[
            ("t", &[CellValue::Integer(0), CellValue::Float(0.5)]),
            ("label", &[CellValue::String("a".into()), CellValue::Null]),
            ("flag", &[CellValue::Bool(true), CellValue::Bool(false)]),
            ("gap", &[CellValue::Null, CellValue::Integer(3)]),
        ]);
        assert_eq!(ds.numeric_columns(), vec!["t", "gap"]);
    }

    #[test]
    fn test_concat_outer_union_fills_null() {
        let a = table(&[
            ("t", &[CellValue::Integer(1)]),
            ("v", &[CellValue::Integer(10)]),
        ]);
        let b = table(&[
            ("t", &[CellValue::Integer(2), CellValue::Integer(3)]),
            ("w", &[CellValue::Float(0.1), CellValue::Float(0.2)]),
        ]);

        let merged = Dataset::concat(vec![a, b]).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.column_names(), vec!["t", "v", "w"]);
        assert_eq!(
            merged.column("v").unwrap().values,
            vec![CellValue::Integer(10), CellValue::Null, CellValue::Null]
        );
        assert_eq!(
            merged.column("w").unwrap().values,
            vec![CellValue::Null, CellValue::Float(0.1), CellValue::Float(0.2)]
        );
    }

    #[test]
    fn test_concat_nothing_is_none() {
        assert!(Dataset::concat(Vec::new()).is_none());
    }

    #[test]
    fn test_source_groups_first_seen_order() {
        let s = |v: &str| CellValue::String(v.to_string());
        let ds = table(&[(SOURCE_COLUMN, &[s("3"), s("3"), s("1"), s("3")])]);
        let groups = ds.source_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("3".to_string(), vec![0, 1, 3]));
        assert_eq!(groups[1], ("1".to_string(), vec![2]));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut ds = table(&[
            ("x", &[CellValue::Integer(1)]),
            ("y", &[CellValue::Integer(2)]),
        ]);
        ds.set_column(Column::from_f64("x", &[9.0]));
        ds.fill_column("z", CellValue::Bool(true));
        assert_eq!(ds.column_names(), vec!["x", "y", "z"]);
        assert_eq!(ds.column("x").unwrap().to_f64(), vec![9.0]);
    }
}
