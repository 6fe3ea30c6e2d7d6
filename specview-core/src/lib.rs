//! specview-core: Core types for specimen data browsing and filtering.
//!
//! This crate provides the site/specimen catalog, plot series types, range
//! windows, significant-figure formatting, and the filter expression parser.
//!

pub mod catalog;
pub mod config;
pub mod error;
pub mod expression;
pub mod format;
pub mod highlight;
pub mod range;
pub mod series;

pub use catalog::{Catalog, Site};
pub use config::{ViewerConfig, DEFAULT_PARAMETER_LABELS};
pub use error::{Error, Result};
pub use expression::{parse_filter_expression, ComparisonOperator, FilterCondition};
pub use format::{
    format_display, format_significant, parse_formatted, parse_formatted_or_zero,
    DISPLAY_SIG_FIGS,
};
pub use highlight::{FilterHighlight, HighlightStyle};
pub use range::{RangeConfig, RangeWindow};
pub use series::{dataset_key, PlotLabels, PlotSeries, SeriesKind, SpecimenDataset};
