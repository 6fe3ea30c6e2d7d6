//! Per-parameter filter condition evaluation.
//!
//! Evaluation is fail-open. Anything that prevents a decision (bad index,
//! missing value, malformed expression) yields a result that still passes,
//! but as a distinct variant from a real match.

use log::debug;
use specview_core::expression::FilterCondition;
use specview_core::highlight::FilterHighlight;

use crate::summary::{SpecimenSummary, SummaryValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a condition could not be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndeterminateReason {
    /// Parameter index outside the configured parameters.
    ParameterOutOfRange,
    /// The parameter shows `N/A`.
    ValueUnavailable,
    /// The condition text is not a valid expression.
    UnparseableCondition,
}

impl std::fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndeterminateReason::ParameterOutOfRange => write!(f, "parameter out of range"),
            IndeterminateReason::ValueUnavailable => write!(f, "value unavailable"),
            IndeterminateReason::UnparseableCondition => write!(f, "unparseable condition"),
        }
    }
}

/// Outcome of checking one parameter against its condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "result", content = "reason", rename_all = "snake_case"))]
pub enum ConditionResult {
    /// Empty condition; nothing to check.
    NoCondition,
    /// Not decidable; treated as passing.
    Indeterminate(IndeterminateReason),
    /// Condition satisfied.
    Match,
    /// Condition not satisfied.
    NoMatch,
}

impl ConditionResult {
    /// Collapses to the pass/fail answer the viewer filters on.
    pub fn passes(self) -> bool {
        !matches!(self, ConditionResult::NoMatch)
    }

    /// Highlight for the value box.
    pub fn highlight(self) -> FilterHighlight {
        match self {
            ConditionResult::NoCondition => FilterHighlight::Default,
            ConditionResult::Match | ConditionResult::Indeterminate(_) => FilterHighlight::Match,
            ConditionResult::NoMatch => FilterHighlight::NoMatch,
        }
    }
}

impl std::fmt::Display for ConditionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionResult::NoCondition => write!(f, "no condition"),
            ConditionResult::Indeterminate(reason) => write!(f, "indeterminate ({reason})"),
            ConditionResult::Match => write!(f, "match"),
            ConditionResult::NoMatch => write!(f, "no match"),
        }
    }
}

/// Checks parameter `index` of `summary` against `condition`.
///
/// `=` and `!=` compare display strings; ordering operators compare numbers.
pub fn evaluate_condition(summary: &SpecimenSummary, index: usize, condition: &str) -> ConditionResult {
    let (Some(label), Some(value)) = (summary.label(index), summary.value(index)) else {
        return ConditionResult::Indeterminate(IndeterminateReason::ParameterOutOfRange);
    };
    if condition.trim().is_empty() {
        return ConditionResult::NoCondition;
    }
    let SummaryValue::Value(display) = value else {
        debug!("{label}: value is N/A, condition {condition:?} passes");
        return ConditionResult::Indeterminate(IndeterminateReason::ValueUnavailable);
    };
    let Some(parsed) = FilterCondition::parse(condition) else {
        debug!("{label}: cannot parse condition {condition:?}, passing");
        return ConditionResult::Indeterminate(IndeterminateReason::UnparseableCondition);
    };

    let matched = parsed.matches_display(display);
    debug!(
        "{label}: display {display:?} {} {} -> {matched}",
        parsed.operator, parsed.threshold
    );
    if matched {
        ConditionResult::Match
    } else {
        ConditionResult::NoMatch
    }
}
