//! Moving average indicators.

use insight_core::traits::Indicator;

use crate::simd;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        simd::sma_simd(data, self.period)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive form seeded with the first value and smoothed with
/// `2 / (period + 1)`. The first `period - 1` values are warm-up and are
/// not emitted, so the output starts at input index `period - 1`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let one_minus_mult = 1.0 - self.multiplier;

        let mut ema = data[0];
        for (i, &price) in data.iter().enumerate() {
            if i > 0 {
                ema = price * self.multiplier + ema * one_minus_mult;
            }
            if i + 1 >= self.period {
                result.push(ema);
            }
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::traits::align;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_warmup_region() {
        let sma = Sma::new(50);
        let data: Vec<f64> = (0..60).map(|i| i as f64).collect();
        let aligned = align(data.len(), &sma.calculate(&data));

        assert_eq!(sma.warmup(), 49);
        assert!(aligned[..49].iter().all(Option::is_none));
        assert!((aligned[49].unwrap() - 24.5).abs() < 1e-10);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let result = sma.calculate(&[1.0, 2.0, 3.0]);

        assert!(result.is_empty());
    }

    #[test]
    fn test_ema() {
        let ema = Ema::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        // mult = 0.5, seeded with 1.0: 1.5 (warm-up), 2.25, 3.125, 4.0625
        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.25).abs() < 1e-10);
        assert!((result[1] - 3.125).abs() < 1e-10);
        assert!((result[2] - 4.0625).abs() < 1e-10);
    }

    #[test]
    fn test_ema_period_one_is_identity() {
        let result = Ema::new(1).calculate(&[3.0, 5.0, 4.0]);
        assert_eq!(result, vec![3.0, 5.0, 4.0]);
    }
}
