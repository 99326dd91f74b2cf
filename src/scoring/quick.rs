//! Two-metric quick screen

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl QuickRating {
    fn from_score(score: f64) -> Self {
        if score >= 20.0 {
            QuickRating::Excellent
        } else if score >= 10.0 {
            QuickRating::Good
        } else if score >= 5.0 {
            QuickRating::Average
        } else {
            QuickRating::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickScore {
    pub score: f64,
    pub rating: QuickRating,
}

/// Equal-weight blend of cap rate and cash-on-cash (both percent)
pub fn quick_score(cap_rate: f64, cash_on_cash: f64) -> QuickScore {
    let score = 0.5 * cap_rate + 0.5 * cash_on_cash;
    QuickScore {
        score,
        rating: QuickRating::from_score(score),
    }
}
