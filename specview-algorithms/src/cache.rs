//! Eagerly populated cache of generated specimen datasets.

use std::collections::HashMap;

use log::{info, warn};
use specview_core::catalog::Catalog;
use specview_core::series::{dataset_key, SpecimenDataset};

use crate::generator::SpecimenSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of cache population.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CacheInfo {
    /// Specimens in the catalog.
    pub total_specimens: usize,
    /// Entries currently cached, including any regenerated on a miss.
    pub cached_specimens: usize,
    /// `cached_specimens == total_specimens`; extra entries from misses make it false.
    pub complete: bool,
    /// Site names in catalog order.
    pub sites: Vec<String>,
    /// Cached keys, sorted.
    pub cached_keys: Vec<String>,
}

/// Datasets for every catalog specimen, keyed by `"{site}_{specimen}"`.
///
/// Construction generates everything up front. Lookups of keys outside the
/// catalog regenerate on the fly and are inserted, so `get` never fails.
pub struct DatasetCache<S: SpecimenSource> {
    source: S,
    catalog: Catalog,
    num_plots: usize,
    entries: HashMap<String, SpecimenDataset>,
}

impl<S: SpecimenSource> DatasetCache<S> {
    /// Builds and fully populates the cache.
    pub fn new(source: S, catalog: Catalog, num_plots: usize) -> Self {
        let mut cache = Self {
            source,
            catalog,
            num_plots,
            entries: HashMap::new(),
        };
        cache.populate();
        cache
    }

    fn populate(&mut self) {
        for (site, specimen) in self.catalog.pairs() {
            let dataset = self.source.dataset(site, specimen, self.num_plots);
            self.entries.insert(dataset_key(site, specimen), dataset);
        }
        info!(
            "dataset cache populated: {} specimens x {} plots",
            self.entries.len(),
            self.num_plots
        );
    }

    /// Dataset for a specimen, generating and caching it on a miss.
    pub fn get(&mut self, site: &str, specimen: &str) -> &SpecimenDataset {
        let key = dataset_key(site, specimen);
        let source = &self.source;
        let num_plots = self.num_plots;
        self.entries.entry(key).or_insert_with(|| {
            warn!("dataset for {site} - {specimen} not cached, regenerating");
            source.dataset(site, specimen, num_plots)
        })
    }

    /// Returns true if the specimen already has an entry.
    pub fn contains(&self, site: &str, specimen: &str) -> bool {
        self.entries.contains_key(&dataset_key(site, specimen))
    }

    /// Drops every entry and repopulates from the catalog.
    pub fn clear(&mut self) {
        info!("clearing dataset cache");
        self.entries.clear();
        self.populate();
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog the cache was populated from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Plot slots generated per specimen.
    pub fn num_plots(&self) -> usize {
        self.num_plots
    }

    /// Population summary.
    pub fn info(&self) -> CacheInfo {
        let mut cached_keys: Vec<String> = self.entries.keys().cloned().collect();
        cached_keys.sort();
        let total_specimens = self.catalog.total_specimens();
        let cached_specimens = self.entries.len();
        CacheInfo {
            total_specimens,
            cached_specimens,
            complete: cached_specimens == total_specimens,
            sites: self.catalog.site_names().map(str::to_string).collect(),
            cached_keys,
        }
    }
}
