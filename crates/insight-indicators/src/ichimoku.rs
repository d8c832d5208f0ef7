//! Ichimoku Kinko Hyo.

use insight_core::traits::{align, last_defined, RangeIndicator};
use serde::{Deserialize, Serialize};

use crate::simd::{rolling_max_simd, rolling_min_simd};

/// Ichimoku components aligned to the input bars.
///
/// Both leading spans are already displaced forward, so `span_a[i]` is the
/// value plotted at bar `i` (computed from bar `i - displacement`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IchimokuLines {
    pub tenkan: Vec<Option<f64>>,
    pub kijun: Vec<Option<f64>>,
    pub span_a: Vec<Option<f64>>,
    pub span_b: Vec<Option<f64>>,
}

impl IchimokuLines {
    /// Latest defined (tenkan, kijun) pair.
    pub fn last_conversion(&self) -> Option<(f64, f64)> {
        Some((last_defined(&self.tenkan)?, last_defined(&self.kijun)?))
    }
}

/// Ichimoku cloud built from rolling high/low midpoints.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan_period: usize,
    kijun_period: usize,
    senkou_period: usize,
    displacement: usize,
}

impl Ichimoku {
    /// Classic 9/26/52 parameters with a 26-bar displacement.
    pub fn new() -> Self {
        Self::with_periods(9, 26, 52, 26)
    }

    pub fn with_periods(tenkan: usize, kijun: usize, senkou: usize, displacement: usize) -> Self {
        assert!(tenkan > 0 && kijun > 0 && senkou > 0);
        Self {
            tenkan_period: tenkan,
            kijun_period: kijun,
            senkou_period: senkou,
            displacement,
        }
    }

    fn midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<Option<f64>> {
        let highs = rolling_max_simd(high, period);
        let lows = rolling_min_simd(low, period);
        let mids: Vec<f64> = highs.iter().zip(&lows).map(|(h, l)| (h + l) / 2.0).collect();
        align(high.len(), &mids)
    }

    /// Move a series forward, dropping values that fall past the last bar.
    fn displace(series: &[Option<f64>], by: usize) -> Vec<Option<f64>> {
        let len = series.len();
        std::iter::repeat(None)
            .take(by.min(len))
            .chain(series.iter().copied())
            .take(len)
            .collect()
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeIndicator for Ichimoku {
    type Output = IchimokuLines;

    fn calculate_range(&self, high: &[f64], low: &[f64]) -> IchimokuLines {
        let len = high.len().min(low.len());
        let (high, low) = (&high[..len], &low[..len]);

        let tenkan = Self::midpoint(high, low, self.tenkan_period);
        let kijun = Self::midpoint(high, low, self.kijun_period);
        let leading_a: Vec<Option<f64>> = tenkan
            .iter()
            .zip(&kijun)
            .map(|(t, k)| Some((t.as_ref()? + k.as_ref()?) / 2.0))
            .collect();
        let leading_b = Self::midpoint(high, low, self.senkou_period);

        IchimokuLines {
            span_a: Self::displace(&leading_a, self.displacement),
            span_b: Self::displace(&leading_b, self.displacement),
            tenkan,
            kijun,
        }
    }

    fn period(&self) -> usize {
        self.tenkan_period.max(self.kijun_period).max(self.senkou_period)
    }

    fn name(&self) -> &str {
        "Ichimoku"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let high = (0..n).map(|i| 101.0 + i as f64).collect();
        let low = (0..n).map(|i| 99.0 + i as f64).collect();
        (high, low)
    }

    #[test]
    fn test_definition_points() {
        let (high, low) = ramp(100);
        let lines = Ichimoku::new().calculate_range(&high, &low);

        assert_eq!(lines.tenkan.len(), 100);
        assert!(lines.tenkan[7].is_none());
        assert!(lines.tenkan[8].is_some());
        assert!(lines.kijun[24].is_none());
        assert!(lines.kijun[25].is_some());
        // Span A needs kijun (25) plus the 26-bar displacement
        assert!(lines.span_a[50].is_none());
        assert!(lines.span_a[51].is_some());
        // Span B needs 52 bars plus the displacement
        assert!(lines.span_b[76].is_none());
        assert!(lines.span_b[77].is_some());
    }

    #[test]
    fn test_midpoints_on_ramp() {
        let (high, low) = ramp(60);
        let lines = Ichimoku::new().calculate_range(&high, &low);

        // Window of bars 51..=59: max high 160, min low 150
        assert!((lines.tenkan[59].unwrap() - 155.0).abs() < 1e-10);
        // Window of bars 34..=59: max high 160, min low 133
        assert!((lines.kijun[59].unwrap() - 146.5).abs() < 1e-10);

        let (tenkan, kijun) = lines.last_conversion().unwrap();
        assert!(tenkan > kijun);
    }

    #[test]
    fn test_span_is_displaced_value() {
        let (high, low) = ramp(80);
        let lines = Ichimoku::new().calculate_range(&high, &low);

        let expected = (lines.tenkan[40].unwrap() + lines.kijun[40].unwrap()) / 2.0;
        assert!((lines.span_a[66].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_short_series() {
        let (high, low) = ramp(5);
        let lines = Ichimoku::new().calculate_range(&high, &low);

        assert!(lines.tenkan.iter().all(Option::is_none));
        assert!(lines.last_conversion().is_none());
        assert_eq!(Ichimoku::new().period(), 52);
    }
}
