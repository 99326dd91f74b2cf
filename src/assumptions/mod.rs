//! Property and operating assumptions for a rental projection

pub mod loader;

pub use loader::{load_deal, load_deals, load_deals_from_reader, DealInput, DealParts};

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, AnalyzerError, AnalyzerResult};

/// Purchase-side parameters of the property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyParams {
    /// Purchase price
    pub purchase_price: f64,

    /// Cash down payment (the initial investment)
    pub down_payment: f64,

    /// Annual appreciation of the property value, percent
    pub appreciation_rate: f64,
}

impl PropertyParams {
    pub fn new(purchase_price: f64, down_payment: f64, appreciation_rate: f64) -> Self {
        Self {
            purchase_price,
            down_payment,
            appreciation_rate,
        }
    }

    /// Build from a down payment expressed as percent of price
    pub fn with_down_payment_pct(purchase_price: f64, down_payment_pct: f64, appreciation_rate: f64) -> Self {
        Self::new(purchase_price, purchase_price * down_payment_pct / 100.0, appreciation_rate)
    }

    /// Amount financed
    pub fn loan_amount(&self) -> f64 {
        self.purchase_price - self.down_payment
    }

    /// Down payment as percent of price
    pub fn down_payment_pct(&self) -> f64 {
        self.down_payment / self.purchase_price * 100.0
    }

    /// Estimated market value after `months_elapsed` months
    pub fn estimated_value(&self, months_elapsed: u32) -> f64 {
        self.purchase_price * (1.0 + self.appreciation_rate / 100.0).powf(months_elapsed as f64 / 12.0)
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        require_positive("purchase_price", self.purchase_price)?;
        require_non_negative("down_payment", self.down_payment)?;
        require_non_negative("appreciation_rate", self.appreciation_rate)?;
        if self.down_payment > self.purchase_price {
            return Err(AnalyzerError::invalid(
                "down_payment",
                format!(
                    "down payment {:.2} exceeds purchase price {:.2}",
                    self.down_payment, self.purchase_price
                ),
            ));
        }
        Ok(())
    }
}

/// Operating income and expense assumptions
///
/// Rates are whole-number percents (5.0 = 5%). Supplied wholesale per
/// projection; nothing carries over between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingAssumptions {
    /// Monthly rent at month 0
    pub monthly_rent: f64,

    /// Expected vacancy, percent of gross rent
    pub vacancy_rate: f64,

    /// Property management fee, percent of effective rent
    pub management_fee_rate: f64,

    /// Maintenance reserve, percent of effective rent
    pub maintenance_rate: f64,

    pub annual_property_tax: f64,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    pub monthly_other_expenses: f64,

    /// Annual rent growth, percent (compounded monthly at rate/12)
    pub rent_growth_rate: f64,

    /// Annual cost inflation, percent (compounded monthly at rate/12)
    pub inflation_rate: f64,
}

impl OperatingAssumptions {
    /// Rent, tax and insurance only; every advanced expense is zero
    pub fn basic(monthly_rent: f64, annual_property_tax: f64, annual_insurance: f64) -> Self {
        Self {
            monthly_rent,
            vacancy_rate: 0.0,
            management_fee_rate: 0.0,
            maintenance_rate: 0.0,
            annual_property_tax,
            annual_insurance,
            monthly_hoa: 0.0,
            monthly_other_expenses: 0.0,
            rent_growth_rate: 0.0,
            inflation_rate: 0.0,
        }
    }

    /// Tax, insurance, HOA and other expenses for one month, before inflation
    pub fn monthly_fixed_costs(&self) -> f64 {
        self.annual_property_tax / 12.0
            + self.annual_insurance / 12.0
            + self.monthly_hoa
            + self.monthly_other_expenses
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        require_non_negative("monthly_rent", self.monthly_rent)?;
        require_non_negative("vacancy_rate", self.vacancy_rate)?;
        require_non_negative("management_fee_rate", self.management_fee_rate)?;
        require_non_negative("maintenance_rate", self.maintenance_rate)?;
        require_non_negative("annual_property_tax", self.annual_property_tax)?;
        require_non_negative("annual_insurance", self.annual_insurance)?;
        require_non_negative("monthly_hoa", self.monthly_hoa)?;
        require_non_negative("monthly_other_expenses", self.monthly_other_expenses)?;
        require_non_negative("rent_growth_rate", self.rent_growth_rate)?;
        require_non_negative("inflation_rate", self.inflation_rate)?;
        Ok(())
    }
}

impl Default for OperatingAssumptions {
    /// Advanced-mode defaults
    fn default() -> Self {
        Self {
            monthly_rent: 2200.0,
            vacancy_rate: 5.0,
            management_fee_rate: 8.0,
            maintenance_rate: 5.0,
            annual_property_tax: 3500.0,
            annual_insurance: 1200.0,
            monthly_hoa: 150.0,
            monthly_other_expenses: 200.0,
            rent_growth_rate: 2.5,
            inflation_rate: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loan_amount_and_down_pct() {
        let property = PropertyParams::with_down_payment_pct(300_000.0, 20.0, 3.0);
        assert_eq!(property.down_payment, 60_000.0);
        assert_eq!(property.loan_amount(), 240_000.0);
        assert_abs_diff_eq!(property.down_payment_pct(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_estimated_value_compounds_annually() {
        let property = PropertyParams::new(300_000.0, 60_000.0, 3.0);
        assert_eq!(property.estimated_value(0), 300_000.0);
        assert_abs_diff_eq!(property.estimated_value(12), 309_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(property.estimated_value(24), 318_270.0, epsilon = 1e-6);
    }

    #[test]
    fn test_property_validation() {
        assert!(PropertyParams::new(300_000.0, 60_000.0, 3.0).validate().is_ok());
        assert!(PropertyParams::new(0.0, 0.0, 3.0).validate().is_err());
        assert!(PropertyParams::new(300_000.0, -1.0, 3.0).validate().is_err());
        assert!(PropertyParams::new(300_000.0, 300_001.0, 3.0).validate().is_err());
        assert!(PropertyParams::new(300_000.0, 300_000.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_basic_zeroes_advanced_fields() {
        let ops = OperatingAssumptions::basic(1800.0, 2400.0, 1200.0);
        assert_eq!(ops.vacancy_rate, 0.0);
        assert_eq!(ops.monthly_hoa, 0.0);
        assert_eq!(ops.rent_growth_rate, 0.0);
        assert_eq!(ops.monthly_fixed_costs(), 300.0);
    }

    #[test]
    fn test_operating_validation_names_field() {
        let ops = OperatingAssumptions {
            vacancy_rate: -5.0,
            ..Default::default()
        };
        match ops.validate() {
            Err(AnalyzerError::InvalidInput { field, .. }) => assert_eq!(field, "vacancy_rate"),
            other => panic!("expected invalid vacancy rate, got {:?}", other),
        }
    }
}
