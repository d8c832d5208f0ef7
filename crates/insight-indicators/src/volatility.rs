//! Volatility indicators.

use insight_core::traits::{align, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::simd;

/// Bollinger Bands output for a single bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    pub lower: f64,
}

/// The three bands padded to the input length.
#[derive(Debug, Clone, Default)]
pub struct BandLines {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger Bands.
///
/// A middle SMA with upper and lower bands a fixed number of population
/// standard deviations away.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }

    pub fn bands(&self, data: &[f64]) -> BandLines {
        let outputs = self.calculate(data);
        let pick = |f: fn(&BollingerOutput) -> f64| {
            let values: Vec<f64> = outputs.iter().map(f).collect();
            align(data.len(), &values)
        };

        BandLines {
            upper: pick(|o| o.upper),
            middle: pick(|o| o.middle),
            lower: pick(|o| o.lower),
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        let means = simd::sma_simd(data, self.period);
        let deviations = simd::std_dev_simd(data, self.period);

        means
            .iter()
            .zip(deviations.iter())
            .map(|(&mean, &std_dev)| BollingerOutput {
                upper: mean + self.std_dev_multiplier * std_dev,
                middle: mean,
                lower: mean - self.std_dev_multiplier * std_dev,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
