//! Site and specimen catalog.

use std::collections::HashSet;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sampling location owning an ordered list of specimens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Site {
    /// Site identifier.
    pub name: String,
    /// Specimen identifiers in display order.
    pub specimens: Vec<String>,
}

impl Site {
    /// Creates a site from a name and its specimen names.
    pub fn new<S, I, T>(name: S, specimens: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            specimens: specimens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the position of a specimen within this site.
    pub fn position(&self, specimen: &str) -> Option<usize> {
        self.specimens.iter().position(|s| s == specimen)
    }
}

/// Immutable, ordered catalog of sites and their specimens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    sites: Vec<Site>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl Catalog {
    /// Builds a catalog, rejecting empty names and duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if a site or specimen name is empty, a site name is
    /// repeated, or a specimen is repeated within one site.
    pub fn new(sites: Vec<Site>) -> Result<Self> {
        let mut seen_sites = HashSet::new();
        for site in &sites {
            if site.name.trim().is_empty() {
                return Err(Error::EmptyName);
            }
            if !seen_sites.insert(site.name.as_str()) {
                return Err(Error::DuplicateSite(site.name.clone()));
            }
            let mut seen_specimens = HashSet::new();
            for specimen in &site.specimens {
                if specimen.trim().is_empty() {
                    return Err(Error::EmptyName);
                }
                if !seen_specimens.insert(specimen.as_str()) {
                    return Err(Error::DuplicateSpecimen {
                        site: site.name.clone(),
                        specimen: specimen.clone(),
                    });
                }
            }
        }
        Ok(Self { sites })
    }

    /// The built-in four-site catalog used when no external data is loaded.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            sites: vec![
                Site::new("Site A", ["Sample A1", "Sample A2", "Sample A3"]),
                Site::new("Site B", ["Sample B1", "Sample B2"]),
                Site::new(
                    "Site C",
                    ["Sample C1", "Sample C2", "Sample C3", "Sample C4"],
                ),
                Site::new("Site D", ["Sample D1", "Sample D2"]),
            ],
        }
    }

    /// All sites in catalog order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Site names in catalog order.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(|s| s.name.as_str())
    }

    /// Looks up a site by name.
    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name == name)
    }

    /// Specimens of a site, or `None` for an unknown site.
    pub fn specimens(&self, site: &str) -> Option<&[String]> {
        self.site(site).map(|s| s.specimens.as_slice())
    }

    /// Returns true if the (site, specimen) pair is in the catalog.
    pub fn contains(&self, site: &str, specimen: &str) -> bool {
        self.site(site).is_some_and(|s| s.position(specimen).is_some())
    }

    /// Total number of specimens across all sites.
    pub fn total_specimens(&self) -> usize {
        self.sites.iter().map(|s| s.specimens.len()).sum()
    }

    /// Iterates every (site, specimen) pair in catalog order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sites.iter().flat_map(|site| {
            site.specimens
                .iter()
                .map(move |specimen| (site.name.as_str(), specimen.as_str()))
        })
    }

    fn locate(&self, site: &str, specimen: &str) -> Option<(usize, usize)> {
        let site_idx = self.sites.iter().position(|s| s.name == site)?;
        let specimen_idx = self.sites[site_idx].position(specimen)?;
        Some((site_idx, specimen_idx))
    }

    /// The specimen after the given one, crossing into the next site.
    ///
    /// Returns `None` at the end of the catalog, for unknown positions, or when
    /// the next site has no specimens.
    pub fn next_specimen(&self, site: &str, specimen: &str) -> Option<(&str, &str)> {
        let (site_idx, specimen_idx) = self.locate(site, specimen)?;
        let current = &self.sites[site_idx];
        if let Some(next) = current.specimens.get(specimen_idx + 1) {
            return Some((current.name.as_str(), next.as_str()));
        }
        let next_site = self.sites.get(site_idx + 1)?;
        next_site
            .specimens
            .first()
            .map(|first| (next_site.name.as_str(), first.as_str()))
    }

    /// The specimen before the given one, crossing into the previous site.
    pub fn previous_specimen(&self, site: &str, specimen: &str) -> Option<(&str, &str)> {
        let (site_idx, specimen_idx) = self.locate(site, specimen)?;
        let current = &self.sites[site_idx];
        if specimen_idx > 0 {
            return Some((current.name.as_str(), current.specimens[specimen_idx - 1].as_str()));
        }
        let prev_site = self.sites.get(site_idx.checked_sub(1)?)?;
        prev_site
            .specimens
            .last()
            .map(|last| (prev_site.name.as_str(), last.as_str()))
    }

    /// Reports whether (previous, next) navigation is possible from a position.
    ///
    /// Availability follows position only: the first specimen of a later site
    /// can always go back even if the earlier site turns out to be empty.
    pub fn can_navigate(&self, site: &str, specimen: &str) -> (bool, bool) {
        let Some((site_idx, specimen_idx)) = self.locate(site, specimen) else {
            return (false, false);
        };
        let last_specimen = self.sites[site_idx].specimens.len() - 1;
        let prev = specimen_idx > 0 || site_idx > 0;
        let next = specimen_idx < last_specimen || site_idx + 1 < self.sites.len();
        (prev, next)
    }
}
