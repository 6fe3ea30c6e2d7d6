//! Parameter summaries: one display string per configured parameter.

use std::fmt;

use specview_core::format::{format_display, parse_formatted};

use crate::aggregate::RangeAverages;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text shown for a parameter without a value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display value of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", from = "String"))]
pub enum SummaryValue {
    /// Mean formatted to five significant figures.
    Value(String),
    /// No slot, or no samples in range.
    NotAvailable,
}

impl SummaryValue {
    /// The display string.
    pub fn as_str(&self) -> &str {
        match self {
            SummaryValue::Value(text) => text,
            SummaryValue::NotAvailable => NOT_AVAILABLE,
        }
    }

    /// Returns true for `N/A`.
    pub fn is_available(&self) -> bool {
        matches!(self, SummaryValue::Value(_))
    }

    /// Number recovered from the display string.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            SummaryValue::Value(text) => parse_formatted(text),
            SummaryValue::NotAvailable => None,
        }
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SummaryValue> for String {
    fn from(value: SummaryValue) -> Self {
        match value {
            SummaryValue::Value(text) => text,
            SummaryValue::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl From<String> for SummaryValue {
    fn from(text: String) -> Self {
        if text.is_empty() || text == NOT_AVAILABLE {
            SummaryValue::NotAvailable
        } else {
            SummaryValue::Value(text)
        }
    }
}

/// A labelled parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryEntry {
    /// Parameter label.
    pub label: String,
    /// Display value.
    pub value: SummaryValue,
}

/// Label to display-value mapping for one specimen and range window, in
/// parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecimenSummary {
    entries: Vec<SummaryEntry>,
}

impl SpecimenSummary {
    /// Entries in parameter order.
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value for a label.
    pub fn get(&self, label: &str) -> Option<&SummaryValue> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.value)
    }

    /// Value of parameter `index`.
    pub fn value(&self, index: usize) -> Option<&SummaryValue> {
        self.entries.get(index).map(|e| &e.value)
    }

    /// Label of parameter `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.label.as_str())
    }
}

/// Maps parameter `i` to slot `i` of `averages`.
///
/// Single slots contribute their mean, dual slots their combined mean. A
/// parameter whose slot does not exist or had no samples in range is `N/A`.
pub fn build_summary(averages: &RangeAverages, labels: &[String]) -> SpecimenSummary {
    let entries = labels
        .iter()
        .enumerate()
        .map(|(index, label)| SummaryEntry {
            label: label.clone(),
            value: averages
                .slot(index)
                .and_then(|slot| slot.summary_mean())
                .map_or(SummaryValue::NotAvailable, |mean| {
                    SummaryValue::Value(format_display(mean))
                }),
        })
        .collect();
    SpecimenSummary { entries }
}
