//! Filter expression mini-language.
//!
//! A condition is one comparison operator followed by a number: `>`, `>=`,
//! `<`, `<=`, `=`, `!=`, or a bare number meaning `=`. Whitespace is allowed
//! after the operator. There are no compound conditions.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::format::{format_display, parse_formatted_or_zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Alternation order gives two-character operators precedence.
static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|<=|!=|>|<|=)?\s*(-?[0-9]+\.?[0-9]*)$")
        .expect("filter expression pattern is valid")
});

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparisonOperator {
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    NotEqual,
}

impl ComparisonOperator {
    /// The operator as written in an expression.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "" | "=" => ComparisonOperator::Equal,
            ">" => ComparisonOperator::Greater,
            ">=" => ComparisonOperator::GreaterEqual,
            "<" => ComparisonOperator::Less,
            "<=" => ComparisonOperator::LessEqual,
            "!=" => ComparisonOperator::NotEqual,
            _ => return None,
        })
    }

    /// Equality operators compare display strings rather than numbers.
    pub fn is_textual(self) -> bool {
        matches!(self, ComparisonOperator::Equal | ComparisonOperator::NotEqual)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed (operator, threshold) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterCondition {
    pub operator: ComparisonOperator,
    pub threshold: f64,
}

impl FilterCondition {
    /// Creates a condition.
    pub fn new(operator: ComparisonOperator, threshold: f64) -> Self {
        Self {
            operator,
            threshold,
        }
    }

    /// Parses an expression such as `">= 10"` or `"5"`.
    ///
    /// Returns `None` for empty or malformed input.
    pub fn parse(expression: &str) -> Option<Self> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return None;
        }
        let caps = EXPRESSION.captures(trimmed)?;
        let operator =
            ComparisonOperator::from_symbol(caps.get(1).map_or("", |m| m.as_str()))?;
        let threshold = caps.get(2)?.as_str().parse::<f64>().ok()?;
        Some(Self::new(operator, threshold))
    }

    /// Checks an already formatted display value against this condition.
    ///
    /// `=` and `!=` compare the display string with the threshold formatted the
    /// same way, so equality means "what the user sees". Ordering operators
    /// compare the numeric value recovered from the display string with the
    /// raw threshold.
    pub fn matches_display(&self, display: &str) -> bool {
        let display = display.trim();
        match self.operator {
            ComparisonOperator::Equal => display == format_display(self.threshold),
            ComparisonOperator::NotEqual => display != format_display(self.threshold),
            ComparisonOperator::Greater => parse_formatted_or_zero(display) > self.threshold,
            ComparisonOperator::GreaterEqual => {
                parse_formatted_or_zero(display) >= self.threshold
            }
            ComparisonOperator::Less => parse_formatted_or_zero(display) < self.threshold,
            ComparisonOperator::LessEqual => parse_formatted_or_zero(display) <= self.threshold,
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.threshold)
    }
}

/// Parses a filter expression; see [`FilterCondition::parse`].
pub fn parse_filter_expression(expression: &str) -> Option<FilterCondition> {
    FilterCondition::parse(expression)
}
