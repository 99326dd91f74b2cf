//! Core projection engine for monthly rental cash flows

use log::debug;
use serde::{Deserialize, Serialize};

use super::cashflows::{break_even_month, CashflowSeries, ProjectionPoint, ProjectionResult};
use super::state::ProjectionState;
use crate::assumptions::{OperatingAssumptions, PropertyParams};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::loan::LoanTerms;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of years to project (months = years * 12)
    pub horizon_years: u32,

    /// Deduct the mortgage payment from net cash flow
    pub include_mortgage: bool,

    /// Deduct vacancy and operating expenses from net cash flow
    pub include_expenses: bool,

    /// Grow tax, insurance, HOA and other expenses with inflation
    pub apply_inflation_to_fixed_costs: bool,
}

/// Longest projection horizon accepted, in years
pub const MAX_HORIZON_YEARS: u32 = 50;

impl ProjectionConfig {
    pub fn new(horizon_years: u32) -> Self {
        Self {
            horizon_years,
            ..Default::default()
        }
    }

    pub fn projection_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12)
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        if !(1..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(AnalyzerError::invalid(
                "horizon_years",
                format!("must be between 1 and {} years (got {})", MAX_HORIZON_YEARS, self.horizon_years),
            ));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: 5,
            include_mortgage: true,
            include_expenses: true,
            apply_inflation_to_fixed_costs: false,
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: OperatingAssumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: OperatingAssumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &OperatingAssumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run projection for a single property
    ///
    /// `loan` is `None` for an all-cash purchase; otherwise it must finance
    /// exactly the price less the down payment.
    pub fn project(&self, property: &PropertyParams, loan: Option<&LoanTerms>) -> AnalyzerResult<ProjectionResult> {
        property.validate()?;
        self.assumptions.validate()?;
        self.config.validate()?;
        check_loan_matches(property, loan)?;

        let months = self.config.projection_months();
        let schedule = loan.map(LoanTerms::schedule);
        let payment = loan.map(LoanTerms::payment).unwrap_or(0.0);
        let term_months = loan.map(LoanTerms::payment_count).unwrap_or(0);

        debug!(
            "Projecting {} months: price={:.2} down={:.2} payment={:.2} include_mortgage={} inflate_fixed={}",
            months,
            property.purchase_price,
            property.down_payment,
            payment,
            self.config.include_mortgage,
            self.config.apply_inflation_to_fixed_costs,
        );

        let mut series = CashflowSeries::with_capacity(months as usize);
        let mut cumulative_cash_flow = Vec::with_capacity(months as usize);
        let mut property_value = Vec::with_capacity(months as usize);
        let mut loan_balance = Vec::with_capacity(months as usize);
        let mut equity = Vec::with_capacity(months as usize);

        let mut state = ProjectionState::from_property(property, schedule.as_ref());

        for _month in 1..=months {
            state.advance_month(property, &self.assumptions, schedule.as_ref());

            let mortgage_payment = if self.config.include_mortgage && state.projection_month <= term_months {
                payment
            } else {
                0.0
            };

            let point = self.calculate_month(&state, mortgage_payment);
            state.cumulative_cash_flow += point.net_cash_flow;

            cumulative_cash_flow.push(state.cumulative_cash_flow);
            property_value.push(state.property_value);
            loan_balance.push(state.loan_balance);
            equity.push(state.equity());
            series.push(point);
        }

        let break_even = break_even_month(&cumulative_cash_flow, property.down_payment);
        debug!(
            "Projection complete: total net cash flow {:.2}, break-even {:?}",
            state.cumulative_cash_flow, break_even
        );

        Ok(ProjectionResult {
            monthly_payment: payment,
            initial_investment: property.down_payment,
            series,
            cumulative_cash_flow,
            property_value,
            loan_balance,
            equity,
            break_even_month: break_even,
        })
    }

    /// Calculate cash flows for a single month
    ///
    /// Management and maintenance are charged on rent net of vacancy.
    fn calculate_month(&self, state: &ProjectionState, mortgage_payment: f64) -> ProjectionPoint {
        let ops = &self.assumptions;

        let rent = ops.monthly_rent * state.rent_factor;
        if !self.config.include_expenses {
            return ProjectionPoint {
                month: state.projection_month,
                rent,
                vacancy_loss: 0.0,
                management_fee: 0.0,
                maintenance: 0.0,
                fixed_costs: 0.0,
                mortgage_payment,
                net_cash_flow: rent - mortgage_payment,
            };
        }

        let vacancy_loss = rent * ops.vacancy_rate / 100.0;
        let effective_rent = rent - vacancy_loss;
        let management_fee = effective_rent * ops.management_fee_rate / 100.0;
        let maintenance = effective_rent * ops.maintenance_rate / 100.0;

        let fixed_costs = if self.config.apply_inflation_to_fixed_costs {
            ops.monthly_fixed_costs() * state.cost_factor
        } else {
            ops.monthly_fixed_costs()
        };

        let net_cash_flow = rent - vacancy_loss - management_fee - maintenance - fixed_costs - mortgage_payment;

        ProjectionPoint {
            month: state.projection_month,
            rent,
            vacancy_loss,
            management_fee,
            maintenance,
            fixed_costs,
            mortgage_payment,
            net_cash_flow,
        }
    }
}

/// Amount financed must equal price less down payment (to the cent)
fn check_loan_matches(property: &PropertyParams, loan: Option<&LoanTerms>) -> AnalyzerResult<()> {
    let financed = property.loan_amount();
    match loan {
        Some(terms) if (terms.principal() - financed).abs() > 0.005 => Err(AnalyzerError::invalid(
            "loan",
            format!(
                "principal {:.2} does not match price less down payment {:.2}",
                terms.principal(),
                financed
            ),
        )),
        None if financed > 0.005 => Err(AnalyzerError::invalid(
            "loan",
            format!("{:.2} must be financed but no loan was given", financed),
        )),
        _ => Ok(()),
    }
}
