//! Projection state tracking for a single property

use crate::assumptions::{OperatingAssumptions, PropertyParams};
use crate::loan::AmortizationSchedule;

/// State of the property at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed; 0 before the first advance)
    pub projection_month: u32,

    /// Rent growth multiplier `(1 + g/12)^month`
    pub rent_factor: f64,

    /// Cost inflation multiplier `(1 + i/12)^month`
    pub cost_factor: f64,

    /// Estimated property value at month end
    pub property_value: f64,

    /// Loan balance after this month's payment
    pub loan_balance: f64,

    /// Net cash flow accumulated through this month
    pub cumulative_cash_flow: f64,
}

impl ProjectionState {
    /// Initialize state at purchase (month 0)
    pub fn from_property(property: &PropertyParams, schedule: Option<&AmortizationSchedule>) -> Self {
        Self {
            projection_month: 0,
            rent_factor: 1.0,
            cost_factor: 1.0,
            property_value: property.purchase_price,
            loan_balance: schedule.map(|s| s.principal).unwrap_or(0.0),
            cumulative_cash_flow: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(
        &mut self,
        property: &PropertyParams,
        assumptions: &OperatingAssumptions,
        schedule: Option<&AmortizationSchedule>,
    ) {
        self.projection_month += 1;
        let month = self.projection_month as i32;

        self.rent_factor = (1.0 + assumptions.rent_growth_rate / 100.0 / 12.0).powi(month);
        self.cost_factor = (1.0 + assumptions.inflation_rate / 100.0 / 12.0).powi(month);
        self.property_value = property.estimated_value(self.projection_month);
        self.loan_balance = schedule
            .map(|s| s.balance_after(self.projection_month))
            .unwrap_or(0.0);
    }

    /// Equity at month end: value less remaining loan
    pub fn equity(&self) -> f64 {
        self.property_value - self.loan_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::build_schedule;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_initial_equity_is_down_payment() {
        let property = PropertyParams::new(300_000.0, 60_000.0, 3.0);
        let schedule = build_schedule(240_000.0, 6.5, 30).unwrap();
        let state = ProjectionState::from_property(&property, Some(&schedule));
        assert_eq!(state.projection_month, 0);
        assert_eq!(state.equity(), 60_000.0);
    }

    #[test]
    fn test_advance_compounds_factors() {
        let property = PropertyParams::new(300_000.0, 60_000.0, 3.0);
        let assumptions = OperatingAssumptions::default();
        let schedule = build_schedule(240_000.0, 6.5, 30).unwrap();
        let mut state = ProjectionState::from_property(&property, Some(&schedule));

        for _ in 0..12 {
            state.advance_month(&property, &assumptions, Some(&schedule));
        }

        assert_eq!(state.projection_month, 12);
        assert_abs_diff_eq!(state.rent_factor, (1.0 + 0.025 / 12.0_f64).powi(12), epsilon = 1e-12);
        assert_abs_diff_eq!(state.cost_factor, (1.0 + 0.02 / 12.0_f64).powi(12), epsilon = 1e-12);
        assert_abs_diff_eq!(state.equity(), 309_000.0 - 237_317.46, epsilon = 0.01);
    }

    #[test]
    fn test_no_loan_means_full_equity() {
        let property = PropertyParams::new(200_000.0, 200_000.0, 0.0);
        let mut state = ProjectionState::from_property(&property, None);
        state.advance_month(&property, &OperatingAssumptions::default(), None);
        assert_eq!(state.loan_balance, 0.0);
        assert_eq!(state.equity(), 200_000.0);
    }
}
