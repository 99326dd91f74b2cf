//! Return metrics: IRR, NPV, investment ratios and affordability

mod irr;
mod discount;
pub mod ratios;
pub mod affordability;

pub use irr::{calculate_irr, compute_irr, compute_monthly_irr, effective_annual_pct, seed_with_investment};
pub use discount::{compute_npv, discount_factor, present_value};
pub use ratios::DealRatios;

use serde::{Deserialize, Serialize};

/// IRR and NPV of a monthly cash flow series against its initial investment
///
/// Each figure is computed on its own; an absent IRR never blocks the NPV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    /// Nominal annual IRR in percent
    pub irr_pct: Option<f64>,
    /// Periodic (monthly) IRR in percent
    pub monthly_irr_pct: Option<f64>,
    pub npv: Option<f64>,
    pub discount_rate_pct: f64,
}

impl ReturnSummary {
    pub fn compute(cash_flows: &[f64], initial_investment: f64, annual_discount_pct: f64) -> Self {
        let monthly_irr_pct = compute_monthly_irr(cash_flows, initial_investment);
        Self {
            irr_pct: monthly_irr_pct.map(|pct| pct * 12.0),
            monthly_irr_pct,
            npv: compute_npv(cash_flows, initial_investment, annual_discount_pct),
            discount_rate_pct: annual_discount_pct,
        }
    }

    /// Effective annual IRR in percent, compounding the monthly rate
    pub fn effective_irr_pct(&self) -> Option<f64> {
        self.monthly_irr_pct.map(effective_annual_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary_matches_free_functions() {
        let flows = vec![400.0; 120];
        let summary = ReturnSummary::compute(&flows, 30_000.0, 8.0);

        assert_eq!(summary.irr_pct, compute_irr(&flows, 30_000.0));
        assert_eq!(summary.npv, compute_npv(&flows, 30_000.0, 8.0));
        assert_eq!(summary.discount_rate_pct, 8.0);

        let effective = summary.effective_irr_pct().unwrap();
        assert!(effective > summary.irr_pct.unwrap());
    }

    #[test]
    fn test_npv_present_without_irr() {
        // Always losing money: no IRR, NPV still well defined
        let flows = vec![-415.0; 60];
        let summary = ReturnSummary::compute(&flows, 60_000.0, 8.0);

        assert_eq!(summary.irr_pct, None);
        assert_eq!(summary.effective_irr_pct(), None);
        let npv = summary.npv.unwrap();
        assert!(npv < -60_000.0);
        assert_abs_diff_eq!(npv, -60_000.0 - present_value(&flows, 8.0).unwrap().abs(), epsilon = 1e-6);
    }
}
