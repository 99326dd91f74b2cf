//! Weighted composite deal score (0-100)

use log::debug;
use serde::{Deserialize, Serialize};

/// Target value and maximum points for one scored metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeight {
    pub target: f64,
    pub max_points: f64,
}

/// Cash-on-cash, ROI, IRR, cap rate. NPV targets the initial investment.
pub const WEIGHTS: Weights = Weights {
    cash_on_cash: ScoreWeight { target: 12.0, max_points: 30.0 },
    roi: ScoreWeight { target: 100.0, max_points: 25.0 },
    irr: ScoreWeight { target: 15.0, max_points: 20.0 },
    npv_points: 15.0,
    cap_rate: ScoreWeight { target: 6.0, max_points: 10.0 },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub cash_on_cash: ScoreWeight,
    pub roi: ScoreWeight,
    pub irr: ScoreWeight,
    pub npv_points: f64,
    pub cap_rate: ScoreWeight,
}

/// Scorer inputs; percents except `npv` and `initial_investment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    pub roi: f64,
    pub irr: Option<f64>,
    pub npv: Option<f64>,
    pub initial_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealRating {
    Excellent,
    Strong,
    Moderate,
    Weak,
}

impl DealRating {
    fn from_total(total: f64) -> Self {
        if total >= 90.0 {
            DealRating::Excellent
        } else if total >= 75.0 {
            DealRating::Strong
        } else if total >= 60.0 {
            DealRating::Moderate
        } else {
            DealRating::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealScoreResult {
    pub coc_score: f64,
    pub roi_score: f64,
    pub irr_score: f64,
    pub npv_score: f64,
    pub cap_rate_score: f64,
    pub total_score: f64,
    pub rating: DealRating,
}

/// `clamp(value / target, 0, 1) * max_weight`
///
/// Negative values score 0. A non-positive target or any non-finite input
/// also scores 0.
pub fn normalize(value: f64, ideal_target: f64, max_weight: f64) -> f64 {
    if !value.is_finite() || !ideal_target.is_finite() || ideal_target <= 0.0 {
        return 0.0;
    }
    (value / ideal_target).clamp(0.0, 1.0) * max_weight
}

fn score(value: f64, weight: ScoreWeight) -> f64 {
    normalize(value, weight.target, weight.max_points)
}

pub fn compute_deal_score(metrics: &DealMetrics) -> DealScoreResult {
    let coc_score = score(metrics.cash_on_cash, WEIGHTS.cash_on_cash);
    let roi_score = score(metrics.roi, WEIGHTS.roi);
    let irr_score = metrics.irr.map_or(0.0, |irr| score(irr, WEIGHTS.irr));
    let npv_score = metrics
        .npv
        .map_or(0.0, |npv| normalize(npv, metrics.initial_investment, WEIGHTS.npv_points));
    let cap_rate_score = score(metrics.cap_rate, WEIGHTS.cap_rate);

    let total_score = coc_score + roi_score + irr_score + npv_score + cap_rate_score;
    debug!(
        "Deal score {:.2}: coc={:.2} roi={:.2} irr={:.2} npv={:.2} cap={:.2}",
        total_score, coc_score, roi_score, irr_score, npv_score, cap_rate_score
    );

    DealScoreResult {
        coc_score,
        roi_score,
        irr_score,
        npv_score,
        cap_rate_score,
        total_score,
        rating: DealRating::from_total(total_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn metrics() -> DealMetrics {
        DealMetrics {
            cap_rate: 0.0,
            cash_on_cash: 0.0,
            roi: 0.0,
            irr: None,
            npv: None,
            initial_investment: 60_000.0,
        }
    }

    #[test]
    fn test_cash_on_cash_alone() {
        let result = compute_deal_score(&DealMetrics {
            cash_on_cash: 12.0,
            ..metrics()
        });
        assert_eq!(result.coc_score, 30.0);
        assert_eq!(result.total_score, 30.0);
        assert_eq!(result.rating, DealRating::Weak);
    }

    #[test]
    fn test_perfect_deal_caps_at_100() {
        let result = compute_deal_score(&DealMetrics {
            cap_rate: 12.0,
            cash_on_cash: 40.0,
            roi: 250.0,
            irr: Some(30.0),
            npv: Some(500_000.0),
            initial_investment: 60_000.0,
        });
        assert_abs_diff_eq!(result.total_score, 100.0, epsilon = 1e-12);
        assert_eq!(result.rating, DealRating::Excellent);
    }

    #[test]
    fn test_partial_scores_and_ratings() {
        let result = compute_deal_score(&DealMetrics {
            cap_rate: 3.0,
            cash_on_cash: 6.0,
            roi: 50.0,
            irr: Some(7.5),
            npv: Some(30_000.0),
            initial_investment: 60_000.0,
        });
        assert_abs_diff_eq!(result.cap_rate_score, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.npv_score, 7.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result.total_score, 50.0, epsilon = 1e-12);
        assert_eq!(result.rating, DealRating::Weak);

        assert_eq!(DealRating::from_total(60.0), DealRating::Moderate);
        assert_eq!(DealRating::from_total(75.0), DealRating::Strong);
        assert_eq!(DealRating::from_total(89.99), DealRating::Strong);
    }

    #[test]
    fn test_negative_metrics_floor_at_zero() {
        let result = compute_deal_score(&DealMetrics {
            cap_rate: 4.4,
            cash_on_cash: -8.3,
            roi: -20.0,
            irr: Some(-5.0),
            npv: Some(-70_000.0),
            initial_investment: 60_000.0,
        });
        assert_eq!(result.coc_score, 0.0);
        assert_eq!(result.roi_score, 0.0);
        assert_eq!(result.irr_score, 0.0);
        assert_eq!(result.npv_score, 0.0);
        assert!(result.cap_rate_score > 0.0);
    }

    #[test]
    fn test_normalize_edge_cases() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(5.0, -1.0, 10.0), 0.0);
        assert_eq!(normalize(f64::NAN, 6.0, 10.0), 0.0);
        assert_eq!(normalize(3.0, 6.0, 10.0), 5.0);

        // All-cash deal with nothing invested: NPV has no target
        let result = compute_deal_score(&DealMetrics {
            npv: Some(1_000.0),
            initial_investment: 0.0,
            ..metrics()
        });
        assert_eq!(result.npv_score, 0.0);
    }
}
