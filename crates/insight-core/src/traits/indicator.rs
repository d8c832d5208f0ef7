//! Indicator trait definitions.

/// Trait for technical indicators over a single input series.
///
/// `calculate` returns only the defined values: the first output
/// corresponds to input index `warmup()`.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Number of leading input positions without an output value.
    fn warmup(&self) -> usize {
        self.period().saturating_sub(1)
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Number of leading input positions without an output value.
    fn warmup(&self) -> usize {
        self.period().saturating_sub(1)
    }
}

/// Indicator computed from the high/low range of each bar.
pub trait RangeIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from high and low prices.
    ///
    /// The output is aligned to the input: one entry per bar, `None` where
    /// the indicator is undefined.
    fn calculate_range(&self, high: &[f64], low: &[f64]) -> Self::Output;

    /// Get the minimum data points required for every component to be defined.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Pad an indicator output to the length of its input.
///
/// The result has `None` over the warm-up region and `Some` afterwards, so
/// every indicator series shares the input's timestamp axis.
pub fn align(len: usize, values: &[f64]) -> Vec<Option<f64>> {
    let pad = len.saturating_sub(values.len());
    std::iter::repeat(None)
        .take(pad)
        .chain(values.iter().copied().map(Some))
        .take(len)
        .collect()
}

/// Last defined value of an aligned series.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().find_map(|v| *v)
}
