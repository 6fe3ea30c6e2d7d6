//! Filter highlight palette for displayed parameter values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a displayed value should be highlighted after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterHighlight {
    /// No condition entered.
    Default,
    /// Condition satisfied (or not decidable).
    Match,
    /// Condition not satisfied.
    NoMatch,
}

/// Colors applied to a value box, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HighlightStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub bold: bool,
}

impl std::fmt::Display for FilterHighlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterHighlight::Default => write!(f, "default"),
            FilterHighlight::Match => write!(f, "match"),
            FilterHighlight::NoMatch => write!(f, "no match"),
        }
    }
}

impl FilterHighlight {
    /// Palette entry for this highlight.
    #[must_use]
    pub fn style(self) -> HighlightStyle {
        match self {
            FilterHighlight::Default => HighlightStyle {
                background: "#ffffff",
                text: "#333333",
                border: "#cccccc",
                bold: false,
            },
            FilterHighlight::Match => HighlightStyle {
                background: "#d4edda",
                text: "#0066cc",
                border: "#28a745",
                bold: true,
            },
            FilterHighlight::NoMatch => HighlightStyle {
                background: "#f8d7da",
                text: "#cc0000",
                border: "#dc3545",
                bold: true,
            },
        }
    }
}
