//! Investment ratios derived from a projection

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionResult;

/// Headline ratios for a projected deal (percent unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRatios {
    /// Net operating income over the first 12 months ($)
    pub year_one_noi: f64,

    /// Net cash flow over the first 12 months ($)
    pub year_one_cash_flow: f64,

    /// Year-1 NOI / purchase price
    pub cap_rate: f64,

    /// Year-1 net cash flow / cash invested
    pub cash_on_cash: f64,

    /// (Total cash flow + equity gain) / cash invested, over the horizon
    pub roi: f64,

    /// Purchase price / year-1 gross rent (a multiple, not a percent)
    pub gross_rent_multiplier: f64,
}

impl DealRatios {
    pub fn from_projection(result: &ProjectionResult, purchase_price: f64) -> Self {
        let year_one_noi = result.series.year_net_operating_income(1);
        let year_one_cash_flow = result.series.year_net_cash_flow(1);
        let year_one_rent: f64 = result.series.iter().take(12).map(|p| p.rent).sum();

        Self {
            year_one_noi,
            year_one_cash_flow,
            cap_rate: cap_rate(year_one_noi, purchase_price),
            cash_on_cash: cash_on_cash(year_one_cash_flow, result.initial_investment),
            roi: roi(
                result.series.total_net_cash_flow(),
                result.final_equity(),
                result.initial_investment,
            ),
            gross_rent_multiplier: if year_one_rent > 0.0 {
                purchase_price / year_one_rent
            } else {
                0.0
            },
        }
    }
}

/// Annual NOI as a percent of purchase price
pub fn cap_rate(annual_noi: f64, purchase_price: f64) -> f64 {
    percent_of(annual_noi, purchase_price)
}

/// Annual net cash flow as a percent of cash invested
pub fn cash_on_cash(annual_cash_flow: f64, cash_invested: f64) -> f64 {
    percent_of(annual_cash_flow, cash_invested)
}

/// Cash flow plus equity gain as a percent of cash invested
///
/// Equity starts at the initial investment, so the gain is
/// `final_equity - initial_investment`.
pub fn roi(total_cash_flow: f64, final_equity: f64, initial_investment: f64) -> f64 {
    percent_of(total_cash_flow + final_equity - initial_investment, initial_investment)
}

// Zero when the base is not positive (e.g. nothing invested)
fn percent_of(amount: f64, base: f64) -> f64 {
    if base > 0.0 {
        amount / base * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{OperatingAssumptions, PropertyParams};
    use crate::loan::LoanTerms;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_ratios() {
        assert_abs_diff_eq!(cap_rate(18_000.0, 300_000.0), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cash_on_cash(7_200.0, 60_000.0), 12.0, epsilon = 1e-12);
        // 10k cash flow, equity 60k -> 110k
        assert_abs_diff_eq!(roi(10_000.0, 110_000.0, 60_000.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_investment_yields_zero() {
        assert_eq!(cash_on_cash(5_000.0, 0.0), 0.0);
        assert_eq!(roi(5_000.0, 10_000.0, 0.0), 0.0);
    }

    #[test]
    fn test_reference_deal_ratios() {
        let property = PropertyParams::new(300_000.0, 60_000.0, 3.0);
        let loan = LoanTerms::new(240_000.0, 6.5, 30).unwrap();
        let result = ProjectionEngine::new(OperatingAssumptions::default(), ProjectionConfig::new(5))
            .project(&property, Some(&loan))
            .unwrap();

        let ratios = DealRatios::from_projection(&result, property.purchase_price);
        assert_abs_diff_eq!(ratios.year_one_noi, 13_217.34, epsilon = 0.01);
        assert_abs_diff_eq!(ratios.cap_rate, 4.4058, epsilon = 1e-4);
        assert_abs_diff_eq!(ratios.cash_on_cash, -4986.22 / 60_000.0 * 100.0, epsilon = 1e-4);
        assert!(ratios.gross_rent_multiplier > 11.0 && ratios.gross_rent_multiplier < 12.0);
    }
}
