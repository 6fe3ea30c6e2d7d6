//! Viewer configuration: plot and parameter counts and parameter labels.

use crate::error::{Error, Result};
use crate::range::RangeConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Labels used when no custom labels are supplied.
pub const DEFAULT_PARAMETER_LABELS: [&str; 10] = [
    "Temperature",
    "Pressure",
    "Humidity",
    "Voltage",
    "Current",
    "Resistance",
    "Frequency",
    "Amplitude",
    "Phase",
    "Power",
];

/// Configuration shared by the data service and its consumers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Plot slots generated per specimen.
    pub num_plots: usize,
    /// Filterable parameters; parameter `i` summarizes plot slot `i`.
    pub num_params: usize,
    /// Custom parameter labels, used only if at least `num_params` are given.
    pub parameter_labels: Vec<String>,
    /// Range picker bounds and defaults.
    pub range: RangeConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            num_plots: 8,
            num_params: 5,
            parameter_labels: Vec::new(),
            range: RangeConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of plot slots.
    #[must_use]
    pub fn with_num_plots(mut self, num_plots: usize) -> Self {
        self.num_plots = num_plots;
        self
    }

    /// Sets the number of parameters.
    #[must_use]
    pub fn with_num_params(mut self, num_params: usize) -> Self {
        self.num_params = num_params;
        self
    }

    /// Sets custom parameter labels.
    #[must_use]
    pub fn with_parameter_labels<I, T>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.parameter_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the range picker configuration.
    #[must_use]
    pub fn with_range(mut self, range: RangeConfig) -> Self {
        self.range = range;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no plot slots are configured or the
    /// range bounds are reversed.
    pub fn validate(&self) -> Result<()> {
        if self.num_plots == 0 {
            return Err(Error::ConfigError("num_plots must be at least 1".into()));
        }
        if self.range.min > self.range.max {
            return Err(Error::ConfigError(format!(
                "range min {} exceeds max {}",
                self.range.min, self.range.max
            )));
        }
        Ok(())
    }

    /// The `num_params` labels in parameter order.
    ///
    /// Custom labels win when there are enough of them; otherwise the built-in
    /// names are used, continuing as `Param N` past the tenth.
    pub fn resolved_labels(&self) -> Vec<String> {
        if self.parameter_labels.len() >= self.num_params {
            return self.parameter_labels[..self.num_params].to_vec();
        }
        (0..self.num_params)
            .map(|i| {
                DEFAULT_PARAMETER_LABELS
                    .get(i)
                    .map_or_else(|| format!("Param {}", i + 1), |s| (*s).to_string())
            })
            .collect()
    }

    /// Titles for the plot slots: `Plot 1` .. `Plot N`.
    pub fn plot_titles(&self) -> Vec<String> {
        (1..=self.num_plots).map(|i| format!("Plot {i}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.resolved_labels(),
            ["Temperature", "Pressure", "Humidity", "Voltage", "Current"]
        );
    }

    #[test]
    fn test_labels_past_defaults() {
        let labels = ViewerConfig::new().with_num_params(12).resolved_labels();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[9], "Power");
        assert_eq!(labels[10], "Param 11");
        assert_eq!(labels[11], "Param 12");
    }

    #[test]
    fn test_custom_labels() {
        let config = ViewerConfig::new()
            .with_num_params(2)
            .with_parameter_labels(["pH", "Salinity", "Depth"]);
        assert_eq!(config.resolved_labels(), ["pH", "Salinity"]);

        // Too few custom labels falls back to the defaults entirely
        let config = ViewerConfig::new()
            .with_num_params(3)
            .with_parameter_labels(["pH"]);
        assert_eq!(
            config.resolved_labels(),
            ["Temperature", "Pressure", "Humidity"]
        );
    }

    #[test]
    fn test_validate() {
        assert!(ViewerConfig::default().validate().is_ok());
        assert!(ViewerConfig::new().with_num_plots(0).validate().is_err());
        let reversed = RangeConfig {
            min: 10,
            max: 1,
            ..RangeConfig::default()
        };
        assert!(ViewerConfig::new().with_range(reversed).validate().is_err());
    }

    #[test]
    fn test_plot_titles() {
        let titles = ViewerConfig::new().with_num_plots(3).plot_titles();
        assert_eq!(titles, ["Plot 1", "Plot 2", "Plot 3"]);
    }
}
