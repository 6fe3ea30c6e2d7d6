//! The data service consumed by the presentation layer.
//!
//! Owns the catalog, the configuration and the dataset cache. Every query
//! degrades to sentinel values instead of failing; only construction can
//! return an error.

use log::debug;
use specview_core::catalog::Catalog;
use specview_core::config::ViewerConfig;
use specview_core::error::Result;
use specview_core::range::RangeWindow;
use specview_core::series::SpecimenDataset;

use crate::aggregate::{aggregate_dataset, RangeAverages};
use crate::cache::{CacheInfo, DatasetCache};
use crate::condition::{evaluate_condition, ConditionResult};
use crate::generator::{SpecimenSource, SyntheticSource};
use crate::selection::{group_by_site, specimens_for_site, SelectionEntry};
use crate::site_stats::{GlobalStatistics, SiteStatistics};
use crate::summary::{build_summary, SpecimenSummary};

/// Catalog, configuration and cached datasets behind one interface.
pub struct DataService<S: SpecimenSource = SyntheticSource> {
    config: ViewerConfig,
    labels: Vec<String>,
    cache: DatasetCache<S>,
}

impl DataService<SyntheticSource> {
    /// Creates a service over the reference catalog and synthetic data.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        Self::with_catalog(config, Catalog::reference())
    }

    /// Creates a service over `catalog` with synthetic data.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_catalog(config: ViewerConfig, catalog: Catalog) -> Result<Self> {
        Self::with_source(config, catalog, SyntheticSource::new())
    }
}

impl<S: SpecimenSource> DataService<S> {
    /// Creates a service with a custom data source. The cache is populated
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_source(config: ViewerConfig, catalog: Catalog, source: S) -> Result<Self> {
        config.validate()?;
        let labels = config.resolved_labels();
        let cache = DatasetCache::new(source, catalog, config.num_plots);
        Ok(Self {
            config,
            labels,
            cache,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Parameter labels in parameter order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The site/specimen catalog.
    pub fn catalog(&self) -> &Catalog {
        self.cache.catalog()
    }

    /// Site names in catalog order.
    pub fn list_sites(&self) -> Vec<&str> {
        self.catalog().site_names().collect()
    }

    /// Specimens of `site`; empty for an unknown site.
    pub fn list_specimens(&self, site: &str) -> &[String] {
        self.catalog().specimens(site).unwrap_or(&[])
    }

    /// Every plot slot of a specimen, unfiltered.
    pub fn full_dataset(&mut self, site: &str, specimen: &str) -> &SpecimenDataset {
        self.cache.get(site, specimen)
    }

    /// Per-slot and pooled statistics restricted to `window`.
    pub fn range_averages(&mut self, site: &str, specimen: &str, window: RangeWindow) -> RangeAverages {
        aggregate_dataset(self.cache.get(site, specimen), window)
    }

    /// Display value per parameter for `window`.
    pub fn summary(&mut self, site: &str, specimen: &str, window: RangeWindow) -> SpecimenSummary {
        let averages = self.range_averages(site, specimen, window);
        build_summary(&averages, &self.labels)
    }

    /// Checks one parameter's condition.
    pub fn check_condition(
        &mut self,
        site: &str,
        specimen: &str,
        parameter: usize,
        condition: &str,
        window: RangeWindow,
    ) -> ConditionResult {
        let summary = self.summary(site, specimen, window);
        evaluate_condition(&summary, parameter, condition)
    }

    /// Checks each parameter against its own condition.
    ///
    /// `conditions[i]` applies to parameter `i`. Conditions past the last
    /// parameter report an out-of-range index.
    pub fn check_conditions<T: AsRef<str>>(
        &mut self,
        site: &str,
        specimen: &str,
        conditions: &[T],
        window: RangeWindow,
    ) -> Vec<ConditionResult> {
        let summary = self.summary(site, specimen, window);
        conditions
            .iter()
            .enumerate()
            .map(|(index, condition)| evaluate_condition(&summary, index, condition.as_ref()))
            .collect()
    }

    /// Statistics across the selected specimens of `site`.
    ///
    /// Specimens are taken from `selection`; if none belong to `site` the
    /// whole catalog site is used. Returns `None` for an empty site name, or
    /// for a site that is neither selected nor in the catalog.
    pub fn site_stats(
        &mut self,
        site: &str,
        selection: &[SelectionEntry],
        window: RangeWindow,
    ) -> Option<SiteStatistics> {
        if site.trim().is_empty() {
            return None;
        }
        let mut specimens = specimens_for_site(selection, site);
        if specimens.is_empty() {
            specimens = self.catalog().specimens(site)?.to_vec();
        }
        Some(self.site_statistics(site, specimens, window))
    }

    /// Statistics of site means across every selected site.
    ///
    /// An empty (or fully unresolvable) selection uses the whole catalog.
    pub fn global_stats(&mut self, selection: &[SelectionEntry], window: RangeWindow) -> GlobalStatistics {
        let mut groups = group_by_site(selection);
        if groups.is_empty() {
            groups = self
                .catalog()
                .sites()
                .iter()
                .map(|site| (site.name.clone(), site.specimens.clone()))
                .collect();
        }
        debug!("global statistics over {} sites", groups.len());
        let sites = groups
            .into_iter()
            .map(|(site, specimens)| self.site_statistics(&site, specimens, window))
            .collect();
        GlobalStatistics::from_sites(window, sites)
    }

    fn site_statistics(&mut self, site: &str, specimens: Vec<String>, window: RangeWindow) -> SiteStatistics {
        let summaries: Vec<(String, SpecimenSummary)> = specimens
            .into_iter()
            .map(|specimen| {
                let summary = self.summary(site, &specimen, window);
                (specimen, summary)
            })
            .collect();
        SiteStatistics::from_summaries(site, window, summaries)
    }

    /// Drops and regenerates every cached dataset.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cache population summary.
    pub fn cache_info(&self) -> CacheInfo {
        self.cache.info()
    }
}
