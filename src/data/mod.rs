/// Data layer: cleaning, widget options and chart transforms.
///
/// Architecture:
/// ```text
///  nama_10_gdp_1_Data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  normalize values, drop missing/zero/aggregate/chain-linked → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Observation>, immutable after load
///   └──────────┘
///      │     │
///      ▼     ▼
///  ┌───────┐ ┌───────────┐
///  │catalog│ │ transform  │  scatter_series / time_series per interaction
///  └───────┘ └───────────┘
/// ```

pub mod catalog;
pub mod loader;
pub mod model;
pub mod transform;
