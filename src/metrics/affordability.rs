//! Owner-occupant affordability checks
//!
//! Housing cost ratio against gross income, and a PITI + PMI payment compared
//! with FHA debt-to-income limits.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, AnalyzerError, AnalyzerResult};
use crate::loan::compute_payment;

/// Annual PMI charged on the loan amount when less than 20% is put down
pub const PMI_ANNUAL_RATE: f64 = 0.008;

/// Down payment percent at or above which no PMI is charged
pub const PMI_FREE_DOWN_PCT: f64 = 20.0;

/// FHA front-end ratio
pub const FHA_FRONT_END_LIMIT: f64 = 0.31;

/// FHA back-end ratio
pub const FHA_MAX_DTI: f64 = 0.43;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingVerdict {
    Affordable,
    Borderline,
    Unaffordable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FhaVerdict {
    WellBelowFhaLimit,
    WithinFhaLimit,
    ExceedsFhaLimit,
}

/// Mortgage plus property tax against gross income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingCost {
    pub total_monthly_payment: f64,
    /// Percent of gross monthly income
    pub ratio_pct: f64,
    pub verdict: HousingVerdict,
}

/// Full PITI + PMI payment against gross income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitiBreakdown {
    pub mortgage: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub pmi: f64,
    pub total: f64,
    /// Debt-to-income as a fraction (0.35 = 35%)
    pub debt_to_income: Option<f64>,
    pub verdict: Option<FhaVerdict>,
}

/// Housing cost ratio: < 30% affordable, < 40% borderline
///
/// `None` without a positive income.
pub fn housing_cost(monthly_mortgage: f64, annual_property_tax: f64, gross_monthly_income: f64) -> Option<HousingCost> {
    if gross_monthly_income <= 0.0 {
        return None;
    }

    let total_monthly_payment = monthly_mortgage + annual_property_tax / 12.0;
    let ratio_pct = total_monthly_payment / gross_monthly_income * 100.0;
    let verdict = if ratio_pct < 30.0 {
        HousingVerdict::Affordable
    } else if ratio_pct < 40.0 {
        HousingVerdict::Borderline
    } else {
        HousingVerdict::Unaffordable
    };

    Some(HousingCost {
        total_monthly_payment,
        ratio_pct,
        verdict,
    })
}

/// Estimated monthly PMI
pub fn monthly_pmi(loan_amount: f64, down_payment_pct: f64) -> f64 {
    if down_payment_pct < PMI_FREE_DOWN_PCT {
        PMI_ANNUAL_RATE * loan_amount / 12.0
    } else {
        0.0
    }
}

/// PITI + PMI and its debt-to-income verdict
pub fn piti(
    monthly_mortgage: f64,
    annual_property_tax: f64,
    monthly_insurance: f64,
    loan_amount: f64,
    down_payment_pct: f64,
    gross_monthly_income: f64,
) -> PitiBreakdown {
    let property_tax = annual_property_tax / 12.0;
    let pmi = monthly_pmi(loan_amount, down_payment_pct);
    let total = monthly_mortgage + property_tax + monthly_insurance + pmi;

    let debt_to_income = (gross_monthly_income > 0.0).then(|| total / gross_monthly_income);
    let verdict = debt_to_income.map(|dti| {
        if dti < FHA_FRONT_END_LIMIT {
            FhaVerdict::WellBelowFhaLimit
        } else if dti < FHA_MAX_DTI {
            FhaVerdict::WithinFhaLimit
        } else {
            FhaVerdict::ExceedsFhaLimit
        }
    });

    PitiBreakdown {
        mortgage: monthly_mortgage,
        property_tax,
        insurance: monthly_insurance,
        pmi,
        total,
        debt_to_income,
        verdict,
    }
}

/// Home purchase to check against a buyer's income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePurchase {
    pub price: f64,
    pub down_payment_pct: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    pub term_years: u32,
    pub annual_property_tax: f64,
    pub annual_insurance: f64,
    pub gross_monthly_income: f64,
}

/// Both affordability checks for one purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityReport {
    pub loan_amount: f64,
    pub monthly_mortgage: f64,
    /// `None` without a positive income
    pub housing: Option<HousingCost>,
    pub piti: PitiBreakdown,
}

impl HomePurchase {
    pub fn validate(&self) -> AnalyzerResult<()> {
        require_positive("price", self.price)?;
        require_non_negative("down_payment_pct", self.down_payment_pct)?;
        if self.down_payment_pct > 100.0 {
            return Err(AnalyzerError::invalid(
                "down_payment_pct",
                format!("must not exceed 100 (got {})", self.down_payment_pct),
            ));
        }
        require_non_negative("annual_property_tax", self.annual_property_tax)?;
        require_non_negative("annual_insurance", self.annual_insurance)?;
        require_non_negative("gross_monthly_income", self.gross_monthly_income)?;
        Ok(())
    }

    pub fn loan_amount(&self) -> f64 {
        self.price * (1.0 - self.down_payment_pct / 100.0)
    }

    /// Validate the purchase and run both checks
    pub fn assess(&self) -> AnalyzerResult<AffordabilityReport> {
        self.validate()?;

        let loan_amount = self.loan_amount();
        let monthly_mortgage = if loan_amount > 0.0 {
            compute_payment(loan_amount, self.annual_rate, self.term_years)?
        } else {
            0.0
        };
        debug!("Affordability: loan {:.2}, mortgage {:.2}", loan_amount, monthly_mortgage);

        Ok(AffordabilityReport {
            loan_amount,
            monthly_mortgage,
            housing: housing_cost(monthly_mortgage, self.annual_property_tax, self.gross_monthly_income),
            piti: piti(
                monthly_mortgage,
                self.annual_property_tax,
                self.annual_insurance / 12.0,
                loan_amount,
                self.down_payment_pct,
                self.gross_monthly_income,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_housing_cost_thresholds() {
        // 1516.96 + 3000/12 = 1766.96 on 8000 income = 22.1%
        let cost = housing_cost(1516.96, 3000.0, 8000.0).unwrap();
        assert_abs_diff_eq!(cost.ratio_pct, 22.087, epsilon = 1e-3);
        assert_eq!(cost.verdict, HousingVerdict::Affordable);

        assert_eq!(housing_cost(2750.0, 3000.0, 8000.0).unwrap().verdict, HousingVerdict::Borderline);
        assert_eq!(housing_cost(3000.0, 3000.0, 8000.0).unwrap().verdict, HousingVerdict::Unaffordable);
        assert!(housing_cost(1500.0, 3000.0, 0.0).is_none());
    }

    #[test]
    fn test_pmi_only_below_twenty_percent_down() {
        assert_abs_diff_eq!(monthly_pmi(270_000.0, 10.0), 180.0, epsilon = 1e-9);
        assert_eq!(monthly_pmi(240_000.0, 20.0), 0.0);
    }

    #[test]
    fn test_piti_fha_verdicts() {
        let breakdown = piti(1516.96, 3000.0, 100.0, 240_000.0, 20.0, 8000.0);
        assert_abs_diff_eq!(breakdown.total, 1866.96, epsilon = 1e-9);
        assert_eq!(breakdown.verdict, Some(FhaVerdict::WellBelowFhaLimit));

        let tight = piti(2800.0, 3000.0, 100.0, 270_000.0, 10.0, 8000.0);
        // 2800 + 250 + 100 + 180 = 3330 -> 41.6%
        assert_eq!(tight.verdict, Some(FhaVerdict::WithinFhaLimit));

        let over = piti(3500.0, 3000.0, 100.0, 270_000.0, 10.0, 8000.0);
        assert_eq!(over.verdict, Some(FhaVerdict::ExceedsFhaLimit));

        assert_eq!(piti(1500.0, 3000.0, 100.0, 240_000.0, 20.0, 0.0).verdict, None);
    }

    fn purchase() -> HomePurchase {
        HomePurchase {
            price: 300_000.0,
            down_payment_pct: 20.0,
            annual_rate: 6.5,
            term_years: 30,
            annual_property_tax: 3000.0,
            annual_insurance: 1200.0,
            gross_monthly_income: 8000.0,
        }
    }

    #[test]
    fn test_assess_purchase() {
        let report = purchase().assess().unwrap();
        assert_eq!(report.loan_amount, 240_000.0);
        assert_abs_diff_eq!(report.monthly_mortgage, 1516.96, epsilon = 0.01);
        assert_eq!(report.housing.unwrap().verdict, HousingVerdict::Affordable);
        assert_abs_diff_eq!(report.piti.total, 1866.96, epsilon = 0.01);

        let all_cash = HomePurchase {
            down_payment_pct: 100.0,
            ..purchase()
        }
        .assess()
        .unwrap();
        assert_eq!(all_cash.monthly_mortgage, 0.0);
        assert_eq!(all_cash.piti.pmi, 0.0);
    }

    #[test]
    fn test_assess_rejects_bad_purchase() {
        let field_of = |p: HomePurchase| match p.assess() {
            Err(AnalyzerError::InvalidInput { field, .. }) => field,
            other => panic!("expected invalid input, got {:?}", other),
        };

        assert_eq!(
            field_of(HomePurchase {
                down_payment_pct: 120.0,
                ..purchase()
            }),
            "down_payment_pct"
        );
        assert_eq!(
            field_of(HomePurchase {
                price: 0.0,
                ..purchase()
            }),
            "price"
        );
        assert_eq!(
            field_of(HomePurchase {
                annual_property_tax: -100.0,
                ..purchase()
            }),
            "annual_property_tax"
        );
        assert_eq!(
            field_of(HomePurchase {
                gross_monthly_income: f64::NAN,
                ..purchase()
            }),
            "gross_monthly_income"
        );
    }
}
