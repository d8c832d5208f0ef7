//! Signal engine.
//!
//! Turns a price series and a set of requested indicators into:
//! - one aggregate trading [`Signal`], evaluated in a fixed priority order
//! - one SMA-based [`Trend`] label
//! - a backend-independent [`Figure`] of every computed series

mod engine;
mod evaluator;
mod figure;
mod request;
mod signal;

pub use engine::{SignalConfig, SignalEngine, TechnicalAnalysis};
pub use evaluator::{
    IchimokuEvaluator, IndicatorValues, MacdEvaluator, RsiEvaluator, SignalEvaluator,
};
pub use figure::{Figure, Guide, LineSeries, LineStyle, Panel, Rgb};
pub use request::{IndicatorKind, IndicatorRequest};
pub use signal::{Signal, SignalReason, Trend};
