//! Momentum indicators.

use insight_core::traits::{align, Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
}

/// MACD and signal lines aligned to the input series.
#[derive(Debug, Clone, Default)]
pub struct MacdLines {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// MACD line, compacted: the first value belongs to input index `slow - 1`.
    fn macd_line(&self, data: &[f64]) -> Vec<f64> {
        let fast_ema = Ema::new(self.fast_period).calculate(data);
        let slow_ema = Ema::new(self.slow_period).calculate(data);
        if slow_ema.is_empty() {
            return vec![];
        }

        // Align the EMAs (fast has more values)
        let offset = self.slow_period - self.fast_period;
        fast_ema[offset..]
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect()
    }

    /// Both lines padded to the input length for plotting and last-value checks.
    ///
    /// The MACD line is defined from index `slow - 1`, the signal line from
    /// index `slow + signal - 2`.
    pub fn lines(&self, data: &[f64]) -> MacdLines {
        let macd_line = self.macd_line(data);
        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);

        MacdLines {
            macd: align(data.len(), &macd_line),
            signal: align(data.len(), &signal_line),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let macd_line = self.macd_line(data);
        if macd_line.len() < self.signal_period {
            return vec![];
        }

        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);

        let offset = self.signal_period - 1;
        macd_line[offset..]
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput { macd, signal })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 30 - 14);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_warmup() {
        let rsi = Rsi::default();
        assert_eq!(rsi.warmup(), 14);
        assert!(rsi.calculate(&[1.0; 14]).is_empty());
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 50 - macd.warmup());
        // In an uptrend, MACD should be positive
        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_lines_alignment() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).cos()).collect();
        let lines = macd.lines(&data);

        assert_eq!(lines.macd.len(), 60);
        assert_eq!(lines.signal.len(), 60);
        assert!(lines.macd[24].is_none());
        assert!(lines.macd[25].is_some());
        assert!(lines.signal[32].is_none());
        assert!(lines.signal[33].is_some());

        // Compacted outputs agree with the aligned lines
        let last = *macd.calculate(&data).last().unwrap();
        assert!((lines.macd[59].unwrap() - last.macd).abs() < 1e-12);
        assert!((lines.signal[59].unwrap() - last.signal).abs() < 1e-12);
    }

    #[test]
    fn test_macd_short_series() {
        let macd = Macd::new();
        let lines = macd.lines(&[100.0; 20]);
        assert!(lines.macd.iter().all(Option::is_none));
        assert!(macd.calculate(&[100.0; 20]).is_empty());
    }
}
