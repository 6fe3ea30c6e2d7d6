//! Plot series and per-specimen datasets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a series carries one or two dependent arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeriesKind {
    /// One `y` array.
    Single,
    /// Two arrays `y1` and `y2` sharing one `x` array.
    Dual,
}

/// Axis titles attached to a generated series.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotLabels {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

/// One plot slot's data. Arrays are equal length and never change after
/// generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PlotSeries {
    Single {
        x: Vec<f64>,
        y: Vec<f64>,
        labels: PlotLabels,
    },
    Dual {
        x: Vec<f64>,
        y1: Vec<f64>,
        y2: Vec<f64>,
        labels: PlotLabels,
    },
}

impl PlotSeries {
    /// Returns the series kind.
    pub fn kind(&self) -> SeriesKind {
        match self {
            PlotSeries::Single { .. } => SeriesKind::Single,
            PlotSeries::Dual { .. } => SeriesKind::Dual,
        }
    }

    /// The shared independent axis.
    pub fn x(&self) -> &[f64] {
        match self {
            PlotSeries::Single { x, .. } | PlotSeries::Dual { x, .. } => x,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x().len()
    }

    /// Returns true if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.x().is_empty()
    }

    /// Title and axis labels.
    pub fn labels(&self) -> &PlotLabels {
        match self {
            PlotSeries::Single { labels, .. } | PlotSeries::Dual { labels, .. } => labels,
        }
    }
}

/// All plot slots generated for one (site, specimen) pair, indexed by slot.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecimenDataset {
    slots: Vec<PlotSeries>,
}

impl SpecimenDataset {
    /// Wraps already generated slots.
    pub fn new(slots: Vec<PlotSeries>) -> Self {
        Self { slots }
    }

    /// Series at `slot`, if present.
    pub fn slot(&self, slot: usize) -> Option<&PlotSeries> {
        self.slots.get(slot)
    }

    /// Number of plot slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slots were generated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &PlotSeries> {
        self.slots.iter()
    }
}

/// Builds the cache key for a (site, specimen) pair.
#[must_use]
pub fn dataset_key(site: &str, specimen: &str) -> String {
    format!("{site}_{specimen}")
}
