//! specview-algorithms: Dataset generation, caching and range-filtered analysis.
//!
//! This crate provides:
//! - **Generator** - deterministic synthetic series, one of ten shapes per slot
//! - **Cache** - eager per-specimen dataset cache with regenerate-on-miss
//! - **Aggregation** - per-slot and pooled statistics inside a range window
//! - **Summary / Conditions** - formatted parameter values and fail-open filtering
//! - **Site statistics** - site and global mean with 1-sigma bands
//!
//! [`DataService`] ties these together behind the interface the viewer uses.
//!
#![warn(missing_docs)]

pub mod aggregate;
pub mod cache;
pub mod condition;
pub mod generator;
pub mod selection;
mod service;
pub mod site_stats;
pub mod stats;
pub mod summary;

pub use aggregate::{
    aggregate_dataset, DualSlotStats, OverallStatistics, PooledStatistics, RangeAverages,
    SingleSlotStats, SlotAverage,
};
pub use cache::{CacheInfo, DatasetCache};
pub use condition::{evaluate_condition, ConditionResult, IndeterminateReason};
pub use generator::{PlotShape, SpecimenSource, SyntheticSource, SHAPE_COUNT};
pub use selection::{SelectionEntry, SELECTION_SEPARATOR};
pub use service::DataService;
pub use site_stats::{GlobalStatistics, ParameterStats, SiteStatistics, SpecimenValues};
pub use summary::{build_summary, SpecimenSummary, SummaryEntry, SummaryValue, NOT_AVAILABLE};

// Re-export core types used throughout the public API
pub use specview_core::{Catalog, FilterHighlight, RangeWindow, ViewerConfig};
