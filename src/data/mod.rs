/// Data layer: tabular batch input and output.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BatchTable (no header row)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ BatchTable  │  rows of Cell, positional columns
///   └────────────┘
///        │  + "Predicted τu (MPa)" column
///        ▼
///   ┌──────────┐
///   │  writer   │  BatchTable → .xlsx / .csv
///   └──────────┘
/// ```
pub mod loader;
pub mod table;
pub mod writer;

pub use loader::load_table;
pub use table::{BatchTable, Cell};
pub use writer::{save_table, suggest_output_name};
