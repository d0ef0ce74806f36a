//! egui front-end: panels collect input, `plot` draws chart artifacts,
//! `table` previews the merged rows.

pub mod panels;
pub mod plot;
pub mod table;
