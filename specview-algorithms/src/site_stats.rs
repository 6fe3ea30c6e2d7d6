//! Site and global statistics over specimen summaries.
//!
//! Values are recovered from the summaries' display strings. A parameter
//! showing `N/A` contributes `0.0` rather than being dropped, so every
//! specimen weighs in on every parameter.

use specview_core::range::RangeWindow;

use crate::stats::{mean, population_std};
use crate::summary::SpecimenSummary;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean and 1-sigma band of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterStats {
    /// Mean of the contributed values.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// `mean + std`.
    pub upper_1sigma: f64,
    /// `mean - std`.
    pub lower_1sigma: f64,
    /// Values aggregated, unavailable ones included as `0.0`.
    pub count: usize,
    /// Values that were actually available.
    pub available: usize,
}

impl ParameterStats {
    /// Statistics of `values`; all zero for an empty slice.
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(0.0)).collect();
        let (Some(mean), Some(std)) = (mean(&filled), population_std(&filled)) else {
            return Self::default();
        };
        Self {
            mean,
            std,
            upper_1sigma: mean + std,
            lower_1sigma: mean - std,
            count: filled.len(),
            available: values.iter().filter(|v| v.is_some()).count(),
        }
    }
}

/// Numeric parameter values of one specimen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecimenValues {
    /// Specimen name.
    pub specimen: String,
    /// One value per parameter; `None` where the summary shows `N/A`.
    pub values: Vec<Option<f64>>,
}

impl SpecimenValues {
    /// Extracts the values of `summary`.
    pub fn from_summary(specimen: impl Into<String>, summary: &SpecimenSummary) -> Self {
        Self {
            specimen: specimen.into(),
            values: summary.entries().iter().map(|e| e.value.numeric()).collect(),
        }
    }

    /// Values with unavailable entries replaced by `0.0`.
    pub fn filled(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(0.0)).collect()
    }
}

/// Statistics across the selected specimens of one site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteStatistics {
    /// Site name.
    pub site: String,
    /// Window the summaries were computed over.
    pub window: RangeWindow,
    /// Per-specimen values, in selection order.
    pub specimens: Vec<SpecimenValues>,
    /// One entry per parameter.
    pub parameters: Vec<ParameterStats>,
}

impl SiteStatistics {
    /// Aggregates the summaries of a site's specimens.
    pub fn from_summaries<I, S>(site: impl Into<String>, window: RangeWindow, summaries: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecimenSummary)>,
        S: Into<String>,
    {
        let specimens: Vec<SpecimenValues> = summaries
            .into_iter()
            .map(|(name, summary)| SpecimenValues::from_summary(name, &summary))
            .collect();
        let num_params = specimens.first().map_or(0, |s| s.values.len());
        let parameters = (0..num_params)
            .map(|i| {
                let column: Vec<Option<f64>> = specimens
                    .iter()
                    .filter_map(|s| s.values.get(i).copied())
                    .collect();
                ParameterStats::from_values(&column)
            })
            .collect();
        Self {
            site: site.into(),
            window,
            specimens,
            parameters,
        }
    }

    /// Per-parameter site means.
    pub fn means(&self) -> Vec<f64> {
        self.parameters.iter().map(|p| p.mean).collect()
    }

    /// Number of specimens aggregated.
    pub fn specimen_count(&self) -> usize {
        self.specimens.len()
    }
}

/// Statistics of site means across sites.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalStatistics {
    /// Window the summaries were computed over.
    pub window: RangeWindow,
    /// Every site's statistics, in selection order.
    pub sites: Vec<SiteStatistics>,
    /// One entry per parameter, computed over the site means.
    pub parameters: Vec<ParameterStats>,
}

impl GlobalStatistics {
    /// Aggregates the per-parameter means of `sites`.
    ///
    /// Sites without any specimens are kept in `sites` but do not contribute.
    pub fn from_sites(window: RangeWindow, sites: Vec<SiteStatistics>) -> Self {
        let site_means: Vec<Vec<f64>> = sites
            .iter()
            .map(SiteStatistics::means)
            .filter(|means| !means.is_empty())
            .collect();
        let num_params = site_means.first().map_or(0, Vec::len);
        let parameters = (0..num_params)
            .map(|i| {
                let column: Vec<Option<f64>> =
                    site_means.iter().filter_map(|m| m.get(i).copied().map(Some)).collect();
                ParameterStats::from_values(&column)
            })
            .collect();
        Self {
            window,
            sites,
            parameters,
        }
    }

    /// Site names in selection order.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(|s| s.site.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{OverallStatistics, RangeAverages, SingleSlotStats, SlotAverage};
    use crate::summary::build_summary;
    use approx::assert_abs_diff_eq;
    use specview_core::series::SeriesKind;

    fn summary_of(means: &[Option<f64>]) -> SpecimenSummary {
        let slots = means
            .iter()
            .map(|m| match m {
                Some(mean) => SlotAverage::Single(SingleSlotStats {
                    points: 1,
                    mean: *mean,
                    std: 0.0,
                    min: *mean,
                    max: *mean,
                    median: *mean,
                    x_span: (1.0, 1.0),
                }),
                None => SlotAverage::NoPointsInRange {
                    kind: SeriesKind::Single,
                },
            })
            .collect();
        let averages = RangeAverages {
            window: RangeWindow::default(),
            slots,
            overall: OverallStatistics::NoPointsInRange,
        };
        let labels: Vec<String> = (0..means.len()).map(|i| format!("P{i}")).collect();
        build_summary(&averages, &labels)
    }

    #[test]
    fn test_parameter_stats_band() {
        let stats = ParameterStats::from_values(&[Some(1.0), Some(3.0)]);
        assert_abs_diff_eq!(stats.mean, 2.0);
        assert_abs_diff_eq!(stats.std, 1.0);
        assert_abs_diff_eq!(stats.upper_1sigma, 3.0);
        assert_abs_diff_eq!(stats.lower_1sigma, 1.0);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.available, 2);

        assert_eq!(ParameterStats::from_values(&[]), ParameterStats::default());
    }

    #[test]
    fn test_unavailable_counts_as_zero() {
        let site = SiteStatistics::from_summaries(
            "S",
            RangeWindow::default(),
            [
                ("a", summary_of(&[Some(4.0), None])),
                ("b", summary_of(&[Some(2.0), Some(6.0)])),
            ],
        );
        assert_eq!(site.specimen_count(), 2);
        assert_eq!(site.parameters.len(), 2);
        assert_abs_diff_eq!(site.parameters[0].mean, 3.0);
        assert_abs_diff_eq!(site.parameters[1].mean, 3.0);
        assert_eq!(site.parameters[1].count, 2);
        assert_eq!(site.parameters[1].available, 1);
        assert_eq!(site.specimens[0].filled(), [4.0, 0.0]);
    }

    #[test]
    fn test_global_over_site_means() {
        let window = RangeWindow::default();
        let a = SiteStatistics::from_summaries(
            "A",
            window,
            [("a1", summary_of(&[Some(1.0)])), ("a2", summary_of(&[Some(3.0)]))],
        );
        let b = SiteStatistics::from_summaries("B", window, [("b1", summary_of(&[Some(6.0)]))]);
        let empty =
            SiteStatistics::from_summaries("C", window, Vec::<(String, SpecimenSummary)>::new());

        let global = GlobalStatistics::from_sites(window, vec![a, b, empty]);
        assert_eq!(global.site_names().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(global.parameters.len(), 1);
        // Site means 2.0 and 6.0; the empty site is skipped
        assert_abs_diff_eq!(global.parameters[0].mean, 4.0);
        assert_abs_diff_eq!(global.parameters[0].std, 2.0);
        assert_eq!(global.parameters[0].count, 2);
    }
}
