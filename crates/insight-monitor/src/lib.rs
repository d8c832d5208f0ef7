//! Logging and the terminal dashboard.

mod dashboard;
mod logging;

pub use dashboard::{render, Dashboard, DashboardAction, DashboardState};
pub use logging::setup_logging;
