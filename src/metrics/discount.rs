//! Present-value helpers for monthly cash flows
//!
//! Annual rates are percents converted to a monthly rate as `pct / 100 / 12`.

use super::irr::seed_with_investment;

/// Net present value of `[-initial_investment] ++ cash_flows`
///
/// The month-0 outflow is undiscounted; month `t` flows are divided by
/// `(1 + r)^t`. Returns `None` for a rate at or below -100% or a non-finite
/// result.
pub fn compute_npv(cash_flows: &[f64], initial_investment: f64, annual_discount_pct: f64) -> Option<f64> {
    let rate = monthly_rate(annual_discount_pct);
    if !rate.is_finite() || 1.0 + rate <= 0.0 {
        return None;
    }

    let npv = npv_at_rate(&seed_with_investment(cash_flows, initial_investment), rate);
    npv.is_finite().then_some(npv)
}

/// Present value of month 1..n flows, without an initial outflow
pub fn present_value(cash_flows: &[f64], annual_discount_pct: f64) -> Option<f64> {
    compute_npv(cash_flows, 0.0, annual_discount_pct)
}

/// Discount factor for `months` months at an annual percent rate
pub fn discount_factor(annual_discount_pct: f64, months: u32) -> f64 {
    (1.0 + monthly_rate(annual_discount_pct)).powi(-(months as i32))
}

/// Calculate NPV at a given periodic rate; element 0 is undiscounted
pub(crate) fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_rate_is_plain_sum() {
        let npv = compute_npv(&[100.0; 12], 1000.0, 0.0).unwrap();
        assert_abs_diff_eq!(npv, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ordinary_annuity() {
        // $100/month for 12 months at 6% annual: 100 * (1 - 1.005^-12) / 0.005
        let pv = present_value(&[100.0; 12], 6.0).unwrap();
        assert_abs_diff_eq!(pv, 1161.89, epsilon = 0.01);

        let npv = compute_npv(&[100.0; 12], 1000.0, 6.0).unwrap();
        assert_abs_diff_eq!(npv, pv - 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_discount_factors() {
        assert_eq!(discount_factor(6.0, 0), 1.0);
        let expected: f64 = (1.0_f64 / 1.005).powi(12);
        assert_abs_diff_eq!(discount_factor(6.0, 12), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_rate_is_absent() {
        // -1200% annual is a -100% monthly rate
        assert_eq!(compute_npv(&[100.0; 3], 100.0, -1200.0), None);
        assert_eq!(compute_npv(&[100.0; 3], 100.0, f64::NAN), None);
    }

    #[test]
    fn test_higher_rate_lowers_npv() {
        let flows = vec![500.0; 60];
        let low = compute_npv(&flows, 20_000.0, 4.0).unwrap();
        let high = compute_npv(&flows, 20_000.0, 10.0).unwrap();
        assert!(high < low);
    }
}
