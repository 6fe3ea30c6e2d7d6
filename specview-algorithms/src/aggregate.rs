//! Range-restricted aggregation over a specimen's plot slots.
//!
//! Samples whose x value lies inside the window are kept; everything else is
//! dropped before statistics are computed. A slot with no samples in range is
//! reported as [`SlotAverage::NoPointsInRange`] and left out of the pooled
//! statistics.

use log::warn;
use specview_core::range::RangeWindow;
use specview_core::series::{PlotSeries, SeriesKind, SpecimenDataset};

use crate::stats::{mean, population_std, Descriptive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// In-range statistics of a single-series slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SingleSlotStats {
    /// Samples inside the window.
    pub points: usize,
    /// Mean of in-range `y`.
    pub mean: f64,
    /// Population standard deviation of in-range `y`.
    pub std: f64,
    /// Smallest in-range `y`.
    pub min: f64,
    /// Largest in-range `y`.
    pub max: f64,
    /// Median of in-range `y`.
    pub median: f64,
    /// Smallest and largest in-range `x`.
    pub x_span: (f64, f64),
}

/// In-range statistics of a dual-series slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualSlotStats {
    /// Samples inside the window (per series).
    pub points: usize,
    /// Mean of in-range `y1`.
    pub y1_mean: f64,
    /// Mean of in-range `y2`.
    pub y2_mean: f64,
    /// Mean over in-range `y1` followed by in-range `y2`.
    pub combined_mean: f64,
    /// Population standard deviation of in-range `y1`.
    pub y1_std: f64,
    /// Population standard deviation of in-range `y2`.
    pub y2_std: f64,
    /// Smallest and largest in-range `x`.
    pub x_span: (f64, f64),
}

/// Result for one plot slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum SlotAverage {
    /// Single-series slot with data in range.
    Single(SingleSlotStats),
    /// Dual-series slot with data in range.
    Dual(DualSlotStats),
    /// The window captured no samples of this slot.
    NoPointsInRange {
        /// Kind of the empty slot.
        kind: SeriesKind,
    },
}

impl SlotAverage {
    /// Value that represents this slot in a summary: the mean for single
    /// series, the combined mean for dual series.
    pub fn summary_mean(&self) -> Option<f64> {
        match self {
            SlotAverage::Single(stats) => Some(stats.mean),
            SlotAverage::Dual(stats) => Some(stats.combined_mean),
            SlotAverage::NoPointsInRange { .. } => None,
        }
    }

    /// Returns true if the slot had samples in range.
    pub fn has_data(&self) -> bool {
        !matches!(self, SlotAverage::NoPointsInRange { .. })
    }
}

/// Statistics pooled over every in-range sample of every non-empty slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PooledStatistics {
    /// Descriptive statistics of the pooled samples.
    pub stats: Descriptive,
    /// Slots that contributed samples.
    pub valid_slots: usize,
}

/// Overall result across slots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum OverallStatistics {
    /// At least one slot had data.
    Pooled(PooledStatistics),
    /// No slot had data in range.
    NoPointsInRange,
}

/// Per-slot and pooled statistics for one specimen and window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeAverages {
    /// Window the statistics were computed over.
    pub window: RangeWindow,
    /// One entry per plot slot, in slot order.
    pub slots: Vec<SlotAverage>,
    /// Statistics over all in-range samples.
    pub overall: OverallStatistics,
}

impl RangeAverages {
    /// Result for `slot`, if the dataset has that many slots.
    pub fn slot(&self, slot: usize) -> Option<&SlotAverage> {
        self.slots.get(slot)
    }

    /// Number of slots with data in range.
    pub fn valid_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.has_data()).count()
    }
}

fn select_in_range(x: &[f64], y: &[f64], window: RangeWindow) -> Vec<f64> {
    x.iter()
        .zip(y)
        .filter(|(x, _)| window.contains(**x))
        .map(|(_, y)| *y)
        .collect()
}

fn x_span(x: &[f64], window: RangeWindow) -> Option<(f64, f64)> {
    x.iter()
        .copied()
        .filter(|&x| window.contains(x))
        .fold(None, |span, x| match span {
            None => Some((x, x)),
            Some((lo, hi)) => Some((f64::min(lo, x), f64::max(hi, x))),
        })
}

/// Aggregates one slot, appending its in-range samples to `pool`.
fn aggregate_slot(series: &PlotSeries, window: RangeWindow, pool: &mut Vec<f64>) -> SlotAverage {
    let Some(span) = x_span(series.x(), window) else {
        return SlotAverage::NoPointsInRange {
            kind: series.kind(),
        };
    };

    match series {
        PlotSeries::Single { x, y, .. } => {
            let in_range = select_in_range(x, y, window);
            let Some(stats) = Descriptive::from_values(&in_range) else {
                return SlotAverage::NoPointsInRange {
                    kind: SeriesKind::Single,
                };
            };
            pool.extend_from_slice(&in_range);
            SlotAverage::Single(SingleSlotStats {
                points: stats.count,
                mean: stats.mean,
                std: stats.std,
                min: stats.min,
                max: stats.max,
                median: stats.median,
                x_span: span,
            })
        }
        PlotSeries::Dual { x, y1, y2, .. } => {
            let in_y1 = select_in_range(x, y1, window);
            let in_y2 = select_in_range(x, y2, window);
            let combined: Vec<f64> = in_y1.iter().chain(&in_y2).copied().collect();
            let (Some(y1_mean), Some(y2_mean), Some(combined_mean)) =
                (mean(&in_y1), mean(&in_y2), mean(&combined))
            else {
                return SlotAverage::NoPointsInRange {
                    kind: SeriesKind::Dual,
                };
            };
            let stats = DualSlotStats {
                points: in_y1.len(),
                y1_mean,
                y2_mean,
                combined_mean,
                y1_std: population_std(&in_y1).unwrap_or(0.0),
                y2_std: population_std(&in_y2).unwrap_or(0.0),
                x_span: span,
            };
            pool.extend(combined);
            SlotAverage::Dual(stats)
        }
    }
}

/// Computes per-slot and pooled statistics of `dataset` restricted to
/// `window`.
///
/// Never fails: empty slots and an empty pool are result variants.
pub fn aggregate_dataset(dataset: &SpecimenDataset, window: RangeWindow) -> RangeAverages {
    if window.is_inverted() {
        warn!("range window {window} is inverted, no samples will be selected");
    }

    let mut pool = Vec::new();
    let slots: Vec<SlotAverage> = dataset
        .iter()
        .map(|series| aggregate_slot(series, window, &mut pool))
        .collect();

    let overall = match Descriptive::from_values(&pool) {
        Some(stats) => OverallStatistics::Pooled(PooledStatistics {
            stats,
            valid_slots: slots.iter().filter(|s| s.has_data()).count(),
        }),
        None => OverallStatistics::NoPointsInRange,
    };

    RangeAverages {
        window,
        slots,
        overall,
    }
}
