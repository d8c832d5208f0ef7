//! SIMD-optimized rolling-window kernels.
//!
//! These implementations use the `wide` crate for portable SIMD operations.
//! Every kernel returns one value per complete window, so the output has
//! `data.len() - period + 1` entries (or none when the input is too short).

use wide::f64x4;

/// Sliding-window Simple Moving Average.
pub fn sma_simd(data: &[f64], period: usize) -> Vec<f64> {
    if data.len() < period || period == 0 {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    let period_f64 = period as f64;

    // Initial sum for first window, four lanes at a time
    let mut sum = lane_sum(&data[..period]);
    result.push(sum / period_f64);

    // Sliding window
    for i in period..data.len() {
        sum = sum - data[i - period] + data[i];
        result.push(sum / period_f64);
    }

    result
}

/// Rolling population standard deviation.
pub fn std_dev_simd(data: &[f64], period: usize) -> Vec<f64> {
    if data.len() < period || period < 2 {
        return vec![];
    }

    let period_f64 = period as f64;

    data.windows(period)
        .map(|window| {
            let mean = lane_sum(window) / period_f64;
            let mean_vec = f64x4::splat(mean);

            // SIMD sum of squared differences
            let chunks = window.chunks_exact(4);
            let remainder = chunks.remainder();
            let mut sum_sq = 0.0;
            for chunk in chunks {
                let diff = load(chunk) - mean_vec;
                sum_sq += (diff * diff).reduce_add();
            }
            for value in remainder {
                let diff = value - mean;
                sum_sq += diff * diff;
            }

            (sum_sq / period_f64).sqrt()
        })
        .collect()
}

/// Rolling maximum.
pub fn rolling_max_simd(data: &[f64], period: usize) -> Vec<f64> {
    rolling_reduce(data, period, f64::NEG_INFINITY, f64x4::max, f64::max)
}

/// Rolling minimum.
pub fn rolling_min_simd(data: &[f64], period: usize) -> Vec<f64> {
    rolling_reduce(data, period, f64::INFINITY, f64x4::min, f64::min)
}

fn rolling_reduce(
    data: &[f64],
    period: usize,
    identity: f64,
    lanes: fn(f64x4, f64x4) -> f64x4,
    scalar: fn(f64, f64) -> f64,
) -> Vec<f64> {
    if data.len() < period || period == 0 {
        return vec![];
    }

    data.windows(period)
        .map(|window| {
            let chunks = window.chunks_exact(4);
            let remainder = chunks.remainder();
            let mut acc = f64x4::splat(identity);
            for chunk in chunks {
                acc = lanes(acc, load(chunk));
            }
            acc.to_array()
                .iter()
                .chain(remainder)
                .copied()
                .fold(identity, scalar)
        })
        .collect()
}

fn lane_sum(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(4);
    let remainder: f64 = chunks.remainder().iter().sum();
    chunks.fold(f64x4::splat(0.0), |acc, c| acc + load(c)).reduce_add() + remainder
}

#[inline]
fn load(chunk: &[f64]) -> f64x4 {
    f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]])
}
