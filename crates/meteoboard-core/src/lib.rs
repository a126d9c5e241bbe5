//! Core data model, aggregation engine, and derived chart computations
//!
//! The pure computational heart of the dashboard: it owns the observation
//! data model and turns a loaded dataset into chart-ready series and
//! geometry. It performs no I/O and holds no state.

pub mod aggregate;
pub mod charts;
pub mod heatmap;
pub mod rollups;
pub mod summary;
pub mod types;
pub mod windrose;

pub use aggregate::*;
pub use charts::*;
pub use heatmap::*;
pub use rollups::*;
pub use summary::*;
pub use types::*;
pub use windrose::*;
