//! Analysis session.
//!
//! A run executes four independent stages in order (technical analysis,
//! fundamentals, news sentiment, on-chain metrics). A failing stage is
//! recorded in the report and never stops the others.

mod report;
mod session;

pub use report::SessionReport;
pub use session::{AnalysisSession, SessionRequest, StageError, StageOutcome};
