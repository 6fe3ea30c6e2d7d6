//! Inclusive x-axis range windows.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds and defaults offered by the range pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeConfig {
    /// Smallest selectable bound.
    pub min: i32,
    /// Largest selectable bound.
    pub max: i32,
    /// Initial upper bound.
    pub default_up: i32,
    /// Initial lower bound.
    pub default_down: i32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            default_up: 100,
            default_down: 1,
        }
    }
}

impl RangeConfig {
    /// Upper-bound choices, largest first.
    pub fn up_choices(&self) -> Vec<i32> {
        (self.min..=self.max).rev().collect()
    }

    /// Lower-bound choices, smallest first.
    pub fn down_choices(&self) -> Vec<i32> {
        (self.min..=self.max).collect()
    }

    /// The default window.
    pub fn default_window(&self) -> RangeWindow {
        RangeWindow::new(self.default_down, self.default_up)
    }
}

/// Inclusive `[down, up]` filter applied to x values before aggregation.
///
/// `down <= up` is not enforced. An inverted window selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeWindow {
    pub down: i32,
    pub up: i32,
}

impl Default for RangeWindow {
    fn default() -> Self {
        RangeConfig::default().default_window()
    }
}

impl RangeWindow {
    /// Creates a window from its lower and upper bounds.
    pub fn new(down: i32, up: i32) -> Self {
        Self { down, up }
    }

    /// Resolves range picker texts into a window.
    ///
    /// If either text is not an integer both bounds fall back to the
    /// configured defaults.
    pub fn from_text(up: &str, down: &str, config: &RangeConfig) -> Self {
        match (up.trim().parse::<i32>(), down.trim().parse::<i32>()) {
            (Ok(up), Ok(down)) => Self::new(down, up),
            _ => config.default_window(),
        }
    }

    /// Returns true if `x` lies inside the window, bounds included.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= f64::from(self.down) && x <= f64::from(self.up)
    }

    /// Returns true if `down > up`, which makes every slot empty.
    pub fn is_inverted(&self) -> bool {
        self.down > self.up
    }
}

impl std::fmt::Display for RangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.down, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive() {
        let window = RangeWindow::new(1, 5);
        assert!(window.contains(1.0));
        assert!(window.contains(5.0));
        assert!(window.contains(2.5));
        assert!(!window.contains(0.999));
        assert!(!window.contains(5.001));
    }

    #[test]
    fn test_inverted_window_selects_nothing() {
        let window = RangeWindow::new(10, 2);
        assert!(window.is_inverted());
        assert!(!(0..=20).any(|x| window.contains(f64::from(x))));
    }

    #[test]
    fn test_from_text_falls_back_together() {
        let config = RangeConfig::default();
        assert_eq!(
            RangeWindow::from_text("50", "10", &config),
            RangeWindow::new(10, 50)
        );
        assert_eq!(
            RangeWindow::from_text("50", "ten", &config),
            RangeWindow::new(1, 100)
        );
        assert_eq!(
            RangeWindow::from_text("", "3", &config),
            RangeWindow::new(1, 100)
        );
    }

    #[test]
    fn test_choices() {
        let config = RangeConfig::default();
        let up = config.up_choices();
        let down = config.down_choices();
        assert_eq!(up.len(), 100);
        assert_eq!(up.first(), Some(&100));
        assert_eq!(down.first(), Some(&1));
        assert_eq!(RangeWindow::default().to_string(), "1 to 100");
    }
}
