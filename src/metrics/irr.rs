//! Internal Rate of Return (IRR) calculation
//!
//! Monthly cash flows are seeded with the initial investment as a month-0
//! outflow. The periodic (monthly) root is annualized as a nominal rate,
//! monthly x 12, which is the convention `compute_npv` discounts with.

use log::debug;

use super::discount::npv_at_rate;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: u32 = 1000;

// Newton steps are clamped to this periodic range
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

// Bisection bracket; the lower end stays well above -1 so long monthly
// series don't overflow the discount factor
const BISECTION_LOW: f64 = -0.5;
const BISECTION_HIGH: f64 = 10.0;

/// Annualized IRR in percent (nominal, monthly rate x 12)
///
/// Returns `None` when the seeded series has no sign change, contains
/// non-finite values, or the solver does not converge.
pub fn compute_irr(cash_flows: &[f64], initial_investment: f64) -> Option<f64> {
    compute_monthly_irr(cash_flows, initial_investment).map(|monthly_pct| monthly_pct * 12.0)
}

/// Monthly (periodic) IRR in percent
pub fn compute_monthly_irr(cash_flows: &[f64], initial_investment: f64) -> Option<f64> {
    let seeded = seed_with_investment(cash_flows, initial_investment);
    calculate_irr(&seeded).map(|rate| rate * 100.0)
}

/// Effective annual rate in percent for a periodic rate in percent
pub fn effective_annual_pct(monthly_pct: f64) -> f64 {
    ((1.0 + monthly_pct / 100.0).powi(12) - 1.0) * 100.0
}

/// `[-initial_investment] ++ cash_flows`
pub fn seed_with_investment(cash_flows: &[f64], initial_investment: f64) -> Vec<f64> {
    let mut seeded = Vec::with_capacity(cash_flows.len() + 1);
    seeded.push(-initial_investment);
    seeded.extend_from_slice(cash_flows);
    seeded
}

/// Periodic IRR of a series as a decimal, using Newton-Raphson with a
/// bisection fallback
///
/// # Arguments
/// * `cashflows` - Cash flows, element 0 undiscounted (positive = inflow)
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    // At least one sign change is required for a root
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.05 / 12.0; // 5% annual
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if !npv.is_finite() || !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            return calculate_irr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            if is_root(cashflows, new_rate) {
                return Some(new_rate);
            }
            break;
        }

        rate = new_rate;
    }

    debug!("Newton-Raphson did not converge, falling back to bisection");
    calculate_irr_bisection(cashflows)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection
fn calculate_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = BISECTION_LOW;
    let mut high = BISECTION_HIGH;

    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if !npv_mid.is_finite() {
            return None;
        }

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// NPV at `rate` is zero relative to the size of the flows
fn is_root(cashflows: &[f64], rate: f64) -> bool {
    let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();
    let npv = npv_at_rate(cashflows, rate);
    rate.is_finite() && npv.is_finite() && npv.abs() <= 1e-7 * scale.max(1.0)
}
