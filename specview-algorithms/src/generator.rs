//! Deterministic synthetic dataset generation.
//!
//! Each (site, specimen, slot) triple seeds its own RNG, so a slot's series is
//! identical no matter when or in which order it is generated.

use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use specview_core::series::{PlotLabels, PlotSeries, SpecimenDataset};

/// Number of distinct plot shapes; slot `n` uses shape `n % SHAPE_COUNT`.
pub const SHAPE_COUNT: usize = 10;

/// Produces plot series for specimens.
///
/// The cache is generic over this so measured data can replace the synthetic
/// generator without touching aggregation.
pub trait SpecimenSource {
    /// Generates the series for one plot slot.
    fn series(&self, site: &str, specimen: &str, slot: usize) -> PlotSeries;

    /// Generates slots `0..num_plots` for one specimen.
    fn dataset(&self, site: &str, specimen: &str, num_plots: usize) -> SpecimenDataset {
        SpecimenDataset::new(
            (0..num_plots)
                .map(|slot| self.series(site, specimen, slot))
                .collect(),
        )
    }
}

/// The ten synthetic plot shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotShape {
    /// Sine wave plus uniform noise.
    Sine,
    /// Exponential decay plus uniform noise.
    ExponentialDecay,
    /// Cosine and sine sharing one x axis.
    DualTrig,
    /// Scaled parabola plus uniform noise.
    Quadratic,
    /// Lorentzian peak plus uniform noise.
    Lorentzian,
    /// Shifted logarithm plus uniform noise.
    Logarithmic,
    /// Exponentially damped oscillation.
    DampedOscillation,
    /// Parametric spiral; x is not monotonic.
    Spiral,
    /// Constant level plus Gaussian noise.
    GaussianNoise,
    /// Two-level step.
    Step,
}

impl PlotShape {
    /// The shape used by a plot slot.
    #[must_use]
    pub fn for_slot(slot: usize) -> Self {
        match slot % SHAPE_COUNT {
            0 => PlotShape::Sine,
            1 => PlotShape::ExponentialDecay,
            2 => PlotShape::DualTrig,
            3 => PlotShape::Quadratic,
            4 => PlotShape::Lorentzian,
            5 => PlotShape::Logarithmic,
            6 => PlotShape::DampedOscillation,
            7 => PlotShape::Spiral,
            8 => PlotShape::GaussianNoise,
            _ => PlotShape::Step,
        }
    }

    /// Number of samples this shape generates.
    #[must_use]
    pub fn sample_count(self) -> usize {
        match self {
            PlotShape::Sine | PlotShape::DampedOscillation | PlotShape::Spiral | PlotShape::Step => {
                50
            }
            PlotShape::ExponentialDecay | PlotShape::GaussianNoise => 30,
            PlotShape::DualTrig => 40,
            PlotShape::Quadratic => 25,
            PlotShape::Lorentzian => 100,
            PlotShape::Logarithmic => 35,
        }
    }

    /// Generates this shape for 1-based plot number `plot_num`.
    pub fn generate<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        plot_num: usize,
        specimen: &str,
    ) -> PlotSeries {
        #[allow(clippy::cast_precision_loss)]
        let p = plot_num as f64;
        let n = self.sample_count();
        let labels = PlotLabels {
            title: format!("Plot {plot_num} - {specimen}"),
            xlabel: "X Values".to_string(),
            ylabel: "Y Values".to_string(),
        };

        let single = |x: Vec<f64>, y: Vec<f64>| PlotSeries::Single { x, y, labels: labels.clone() };

        match self {
            PlotShape::Sine => {
                let x = linspace(0.0, 10.0, n);
                let y = with_uniform_noise(rng, &x, 0.1, |x| (x + p * 0.5).sin());
                single(x, y)
            }
            PlotShape::ExponentialDecay => {
                let x = linspace(0.0, 5.0, n);
                let y = with_uniform_noise(rng, &x, 0.05, |x| (-x * p * 0.3).exp());
                single(x, y)
            }
            PlotShape::DualTrig => {
                let x = linspace(0.0, 8.0, n);
                let y1 = with_uniform_noise(rng, &x, 0.1, |x| (x + p * 0.2).cos());
                let y2 = with_uniform_noise(rng, &x, 0.1, |x| (x + p * 0.3).sin());
                PlotSeries::Dual {
                    x,
                    y1,
                    y2,
                    labels: labels.clone(),
                }
            }
            PlotShape::Quadratic => {
                let x = linspace(0.0, 6.0, n);
                let y = with_uniform_noise(rng, &x, 0.05, |x| x * x * (0.1 * p));
                single(x, y)
            }
            PlotShape::Lorentzian => {
                let x = linspace(-5.0, 5.0, n);
                let y = with_uniform_noise(rng, &x, 0.02, |x| (1.0 / (1.0 + x * x)) * p * 0.5);
                single(x, y)
            }
            PlotShape::Logarithmic => {
                let x = linspace(0.1, 4.0, n);
                let y = with_uniform_noise(rng, &x, 0.1, |x| (x + p * 0.5).ln());
                single(x, y)
            }
            PlotShape::DampedOscillation => {
                let x = linspace(0.0, 10.0, n);
                let y = with_uniform_noise(rng, &x, 0.05, |x| (-x * 0.2).exp() * (x * p).sin());
                single(x, y)
            }
            PlotShape::Spiral => {
                let t = linspace(0.0, 4.0 * PI, n);
                let x: Vec<f64> = t.iter().map(|&t| t * (t + p).cos()).collect();
                let y = with_uniform_noise(rng, &t, 0.1, |t| t * (t + p).sin());
                single(x, y)
            }
            PlotShape::GaussianNoise => {
                let x = linspace(0.0, 5.0, n);
                let y = x
                    .iter()
                    .map(|_| p * 0.5 + 0.5 * rng.sample::<f64, _>(StandardNormal))
                    .collect();
                single(x, y)
            }
            PlotShape::Step => {
                let x = linspace(0.0, 10.0, n);
                let y = with_uniform_noise(rng, &x, 0.1, |x| {
                    if x < 5.0 {
                        p * 0.3
                    } else {
                        p * 0.8
                    }
                });
                single(x, y)
            }
        }
    }
}

/// `n` evenly spaced samples from `start` to `stop`, both included.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn with_uniform_noise<R, F>(rng: &mut R, axis: &[f64], amplitude: f64, signal: F) -> Vec<f64>
where
    R: Rng + ?Sized,
    F: Fn(f64) -> f64,
{
    axis.iter()
        .map(|&v| signal(v) + amplitude * rng.gen::<f64>())
        .collect()
}

/// Seed for one slot, derived from `"{site}_{specimen}_{slot}"` and reduced
/// modulo 2^32.
#[must_use]
pub fn slot_seed(site: &str, specimen: &str, slot: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    format!("{site}_{specimen}_{slot}").hash(&mut hasher);
    hasher.finish() & 0xFFFF_FFFF
}

/// The built-in synthetic generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    /// Creates the generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SpecimenSource for SyntheticSource {
    fn series(&self, site: &str, specimen: &str, slot: usize) -> PlotSeries {
        let mut rng = StdRng::seed_from_u64(slot_seed(site, specimen, slot));
        PlotShape::for_slot(slot).generate(&mut rng, slot + 1, specimen)
    }
}
