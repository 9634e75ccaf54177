/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (fatal on bad input)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site index, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  site selection + payload range → PieChart / ScatterChart
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
