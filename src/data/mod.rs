/// Data layer: path resolution, loading, the table model and transforms.
///
/// Architecture:
/// ```text
///  "dir/**/*.csv"  or  "a.csv, b.csv"
///        │
///        ▼
///   ┌──────────┐
///   │  paths    │  glob / comma split → Vec<String>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse each CSV, tag Source/Original, concat
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ MergedDataset  │  columns of CellValue, outer union
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  per-source rolling mean, optional dy/dx
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod paths;
pub mod transform;
