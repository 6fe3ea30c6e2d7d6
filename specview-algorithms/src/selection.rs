//! Specimen selections coming from the selection list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator between site and specimen in a labelled selection entry.
pub const SELECTION_SEPARATOR: &str = " → ";

/// One selected specimen, either as list text or as a structured pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SelectionEntry {
    /// Text of the form `"Site A → Sample A1"`.
    Labeled(String),
    /// Explicit site and specimen.
    Pair {
        /// Site name.
        site: String,
        /// Specimen name.
        specimen: String,
    },
}

impl SelectionEntry {
    /// Builds a structured entry.
    pub fn pair(site: impl Into<String>, specimen: impl Into<String>) -> Self {
        SelectionEntry::Pair {
            site: site.into(),
            specimen: specimen.into(),
        }
    }

    /// The labelled form of a pair.
    pub fn label(site: &str, specimen: &str) -> Self {
        SelectionEntry::Labeled(format!("{site}{SELECTION_SEPARATOR}{specimen}"))
    }

    /// Resolves to `(site, specimen)`.
    ///
    /// Labelled text must split into exactly two parts on the separator.
    /// Parts are trimmed. Anything else, including empty names, is `None`.
    pub fn resolve(&self) -> Option<(&str, &str)> {
        let (site, specimen) = match self {
            SelectionEntry::Labeled(text) => {
                let mut parts = text.split(SELECTION_SEPARATOR);
                let (Some(site), Some(specimen), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return None;
                };
                (site.trim(), specimen.trim())
            }
            SelectionEntry::Pair { site, specimen } => (site.as_str(), specimen.as_str()),
        };
        (!site.is_empty() && !specimen.is_empty()).then_some((site, specimen))
    }
}

impl From<&str> for SelectionEntry {
    fn from(text: &str) -> Self {
        SelectionEntry::Labeled(text.to_string())
    }
}

/// Groups resolvable entries by site, keeping first-seen site order and
/// selection order within a site. Unresolvable entries are skipped.
pub fn group_by_site(selection: &[SelectionEntry]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (site, specimen) in selection.iter().filter_map(SelectionEntry::resolve) {
        match groups.iter_mut().find(|(name, _)| name == site) {
            Some((_, specimens)) => specimens.push(specimen.to_string()),
            None => groups.push((site.to_string(), vec![specimen.to_string()])),
        }
    }
    groups
}

/// Specimens selected for `site`, in selection order.
pub fn specimens_for_site(selection: &[SelectionEntry], site: &str) -> Vec<String> {
    selection
        .iter()
        .filter_map(SelectionEntry::resolve)
        .filter(|(s, _)| *s == site)
        .map(|(_, specimen)| specimen.to_string())
        .collect()
}
