//! Projection engine for monthly rental cash flows

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig, MAX_HORIZON_YEARS};
pub use cashflows::{
    break_even_month, CashflowSeries, ProjectionPoint, ProjectionResult, ProjectionSummary, YearSummary,
};
