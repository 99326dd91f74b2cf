//! Scenario runner for batch and sensitivity analysis
//!
//! Holds a base deal and fans independent variations of it (or unrelated
//! deals) out across the rayon thread pool.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{analyze_deal, project_cashflows, screen_deal, DealReport, QuickScreen};
use crate::assumptions::{DealInput, DealParts, OperatingAssumptions};
use crate::error::AnalyzerResult;
use crate::scoring::DealRating;

/// One row of a rent sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub monthly_rent: f64,
    pub year_one_cash_flow: f64,
    pub total_cash_flow: f64,
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    pub irr_pct: Option<f64>,
    pub npv: Option<f64>,
    pub total_score: f64,
    pub rating: DealRating,
}

impl SensitivityPoint {
    fn from_report(monthly_rent: f64, report: &DealReport) -> Self {
        Self {
            monthly_rent,
            year_one_cash_flow: report.ratios.year_one_cash_flow,
            total_cash_flow: report.summary.total_net_cash_flow,
            cap_rate: report.ratios.cap_rate,
            cash_on_cash: report.ratios.cash_on_cash,
            irr_pct: report.returns.irr_pct,
            npv: report.returns.npv,
            total_score: report.score.total_score,
            rating: report.score.rating,
        }
    }
}

/// Scenario runner over a base deal
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_deal("deal.json")?);
/// let table = runner.run_rent_sensitivity(&[1800.0, 2000.0, 2200.0])?;
/// let needed = runner.estimate_break_even_rent()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base: DealInput,
}

impl ScenarioRunner {
    pub fn new(base: DealInput) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &DealInput {
        &self.base
    }

    /// Mutable access for tweaking the base deal between runs
    pub fn base_mut(&mut self) -> &mut DealInput {
        &mut self.base
    }

    /// Analyze the base deal
    pub fn run(&self) -> AnalyzerResult<DealReport> {
        analyze_deal(&self.base)
    }

    /// Analyze independent deals in parallel, preserving input order
    ///
    /// A deal that fails validation yields its own error without stopping
    /// the others.
    pub fn run_batch(&self, deals: &[DealInput]) -> Vec<AnalyzerResult<DealReport>> {
        debug!("Running batch of {} deals", deals.len());
        deals.par_iter().map(analyze_deal).collect()
    }

    /// Quick-screen independent deals in parallel, preserving input order
    pub fn run_quick_screen(&self, deals: &[DealInput]) -> Vec<AnalyzerResult<QuickScreen>> {
        debug!("Quick-screening {} deals", deals.len());
        deals.par_iter().map(screen_deal).collect()
    }

    /// Re-run the base deal at each monthly rent
    pub fn run_rent_sensitivity(&self, rents: &[f64]) -> AnalyzerResult<Vec<SensitivityPoint>> {
        rents
            .par_iter()
            .map(|&rent| {
                let deal = self.with_rent(rent);
                analyze_deal(&deal).map(|report| SensitivityPoint::from_report(rent, &report))
            })
            .collect()
    }

    /// Smallest whole-dollar rent in `[rent, 2 x rent)` whose cumulative cash
    /// flow at the end of the horizon covers the initial investment
    ///
    /// `None` when no rent in that range breaks even.
    ///
    /// Horizon-end cash flow is monotonic in rent, so the range is bisected:
    /// the number of projections grows with log2 of the range, not its width.
    pub fn estimate_break_even_rent(&self) -> AnalyzerResult<Option<f64>> {
        let parts = self.base.to_parts()?;

        let mut low = self.base.monthly_rent.trunc() as u64;
        let upper = (self.base.monthly_rent * 2.0).trunc() as u64;
        let mut high = upper;
        debug!(
            "Searching break-even rent in [{}, {}) against {:.2}",
            low, high, parts.property.down_payment
        );

        if low >= high {
            return Ok(None);
        }
        if covers_investment(&parts, low)? {
            return Ok(Some(low as f64));
        }
        if rent_dollar_yield(&parts) <= 0.0 {
            // Extra rent never adds cash flow
            return Ok(None);
        }

        // `low` misses; `high` covers unless it is still `upper`
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if covers_investment(&parts, mid)? {
                high = mid;
            } else {
                low = mid;
            }
        }

        Ok((high < upper).then_some(high as f64))
    }

    fn with_rent(&self, monthly_rent: f64) -> DealInput {
        DealInput {
            monthly_rent,
            ..self.base.clone()
        }
    }
}

// Net cash flow kept per dollar of gross rent
fn rent_dollar_yield(parts: &DealParts) -> f64 {
    if !parts.config.include_expenses {
        return 1.0;
    }
    let ops = &parts.assumptions;
    (1.0 - ops.vacancy_rate / 100.0) * (1.0 - (ops.management_fee_rate + ops.maintenance_rate) / 100.0)
}

// Horizon-end cumulative cash flow at `rent` covers the down payment
fn covers_investment(parts: &DealParts, rent: u64) -> AnalyzerResult<bool> {
    let assumptions = OperatingAssumptions {
        monthly_rent: rent as f64,
        ..parts.assumptions.clone()
    };
    let result = project_cashflows(&parts.property, parts.loan.as_ref(), &assumptions, &parts.config)?;
    let total = result.cumulative_cash_flow.last().copied().unwrap_or(0.0);
    Ok(total >= parts.property.down_payment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_order_and_isolates_errors() {
        let runner = ScenarioRunner::default();
        let deals = vec![
            DealInput {
                name: Some("A".into()),
                ..Default::default()
            },
            DealInput {
                name: Some("Bad".into()),
                purchase_price: 0.0,
                ..Default::default()
            },
            DealInput {
                name: Some("C".into()),
                monthly_rent: 3_500.0,
                ..Default::default()
            },
        ];

        let results = runner.run_batch(&deals);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().label, "A");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().label, "C");
    }

    #[test]
    fn test_rent_sensitivity_is_monotonic() {
        let runner = ScenarioRunner::default();
        let table = runner.run_rent_sensitivity(&[1_800.0, 2_200.0, 2_600.0, 3_000.0]).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table[1].monthly_rent, 2_200.0);
        assert!(table.windows(2).all(|w| w[1].year_one_cash_flow > w[0].year_one_cash_flow));
        assert!(table.windows(2).all(|w| w[1].total_score >= w[0].total_score));
    }

    #[test]
    fn test_break_even_rent_is_minimal() {
        let runner = ScenarioRunner::default();
        let rent = runner.estimate_break_even_rent().unwrap().expect("reachable within 2x rent");
        assert!(rent > 2_200.0 && rent < 4_400.0);

        let mut at = runner.clone();
        at.base_mut().monthly_rent = rent;
        let hit = at.run().unwrap();
        assert!(hit.summary.total_net_cash_flow >= hit.initial_investment);

        at.base_mut().monthly_rent = rent - 1.0;
        let miss = at.run().unwrap();
        assert!(miss.summary.total_net_cash_flow < miss.initial_investment);
    }

    #[test]
    fn test_break_even_rent_absent_when_out_of_range() {
        // 5-year cash flow cannot repay a 100% down payment at this rent
        let runner = ScenarioRunner::new(DealInput {
            down_payment_pct: 100.0,
            monthly_rent: 1_000.0,
            ..Default::default()
        });
        assert_eq!(runner.estimate_break_even_rent().unwrap(), None);
    }

    #[test]
    fn test_break_even_rent_with_huge_base_rent() {
        // Management plus maintenance eat every rent dollar: rent never helps
        let hopeless = ScenarioRunner::new(DealInput {
            monthly_rent: 1.0e12,
            management_fee_rate: 60.0,
            maintenance_rate: 40.0,
            ..Default::default()
        });
        assert_eq!(hopeless.estimate_break_even_rent().unwrap(), None);

        // Wide range that does break even: found in a few dozen projections
        let wide = ScenarioRunner::new(DealInput {
            monthly_rent: 1.0e9,
            ..Default::default()
        });
        assert_eq!(wide.estimate_break_even_rent().unwrap(), Some(1.0e9));
    }

    #[test]
    fn test_bisection_agrees_with_linear_scan() {
        let runner = ScenarioRunner::new(DealInput {
            monthly_rent: 1_500.0,
            ..Default::default()
        });
        let parts = runner.base().to_parts().unwrap();
        let linear = (1_500..3_000).find(|&rent| covers_investment(&parts, rent).unwrap());
        assert_eq!(runner.estimate_break_even_rent().unwrap(), linear.map(|r| r as f64));
    }

    #[test]
    fn test_quick_screen_batch() {
        let runner = ScenarioRunner::default();
        let deals = vec![
            DealInput::default(),
            DealInput {
                purchase_price: -1.0,
                ..Default::default()
            },
        ];
        let screens = runner.run_quick_screen(&deals);
        assert_eq!(screens.len(), 2);
        assert!(screens[0].is_ok());
        assert!(screens[1].is_err());
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        let runner = ScenarioRunner::new(DealInput {
            projection_years: 0,
            ..Default::default()
        });
        assert!(runner.estimate_break_even_rent().is_err());
        assert!(runner.run_rent_sensitivity(&[2_000.0]).is_err());
    }
}
