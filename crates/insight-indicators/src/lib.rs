//! Technical indicators with SIMD optimization.
//!
//! This crate provides the indicators the signal engine can plot and evaluate:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Bollinger Bands)
//! - Trend indicators (Ichimoku)
//!
//! Rolling-window kernels in [`simd`] use portable SIMD and back the
//! Bollinger and Ichimoku calculations.

pub mod ichimoku;
pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod volatility;

pub use ichimoku::{Ichimoku, IchimokuLines};
pub use momentum::{Macd, MacdLines, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BandLines, BollingerBands, BollingerOutput};
