/// Data layer: core types, parsing, loading, and projection.
///
/// Architecture:
/// ```text
///  named resource / picked file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch raw text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  split + coerce → Dataset (Vec<Row>)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ projection │  ranking / series / distinct values
///   └────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod parser;
pub mod projection;
