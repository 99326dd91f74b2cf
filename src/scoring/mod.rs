//! Deal scoring policies
//!
//! `deal` is the weighted five-metric composite; `quick` is a two-metric
//! screen with its own rating scale. The two are never combined.

mod deal;
mod quick;

pub use deal::{compute_deal_score, normalize, DealMetrics, DealRating, DealScoreResult, ScoreWeight, Weights, WEIGHTS};
pub use quick::{quick_score, QuickRating, QuickScore};
