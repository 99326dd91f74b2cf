//! Rental Analyzer - cash flow projection and scoring for rental property deals
//!
//! This library provides:
//! - Fixed-rate mortgage payments and amortization schedules
//! - Month-by-month operating cash flow projections
//! - Return metrics (IRR, NPV, cap rate, cash-on-cash, ROI) and affordability checks
//! - Weighted composite and quick deal scores
//! - Batch and rent sensitivity runs across deals

pub mod error;
pub mod loan;
pub mod assumptions;
pub mod projection;
pub mod metrics;
pub mod scoring;
pub mod analysis;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{AnalyzerError, AnalyzerResult};
pub use loan::{build_schedule, compute_payment, AmortizationSchedule, LoanTerms, MAX_TERM_YEARS};
pub use assumptions::{DealInput, OperatingAssumptions, PropertyParams};
pub use projection::{CashflowSeries, ProjectionConfig, ProjectionEngine, ProjectionResult, MAX_HORIZON_YEARS};
pub use metrics::{compute_irr, compute_npv, ReturnSummary};
pub use scoring::{DealMetrics, DealRating, DealScoreResult, QuickRating, QuickScore};
pub use analysis::{
    analyze_deal, compute_amortization, compute_deal_score, compute_return_metrics, project_cashflows, screen_deal,
    DealReport, QuickScreen,
};
pub use scenario::ScenarioRunner;
