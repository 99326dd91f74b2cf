//! Deal input loader
//!
//! Reads raw deal inputs from JSON (one deal) or CSV (one deal per row).
//! Missing fields fall back to the analyzer's form defaults.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{OperatingAssumptions, PropertyParams};
use crate::error::{require_non_negative, AnalyzerError, AnalyzerResult};
use crate::loan::LoanTerms;
use crate::projection::ProjectionConfig;

/// Raw inputs for one deal, as gathered from a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    /// Optional label used in batch output
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_purchase_price")]
    pub purchase_price: f64,
    #[serde(default = "default_down_payment_pct")]
    pub down_payment_pct: f64,
    #[serde(default = "default_loan_term_years")]
    pub loan_term_years: u32,
    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: f64,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    #[serde(default = "default_monthly_rent")]
    pub monthly_rent: f64,
    #[serde(default = "default_vacancy_rate")]
    pub vacancy_rate: f64,
    #[serde(default = "default_management_fee_rate")]
    pub management_fee_rate: f64,
    #[serde(default = "default_maintenance_rate")]
    pub maintenance_rate: f64,
    #[serde(default = "default_annual_property_tax")]
    pub annual_property_tax: f64,
    #[serde(default = "default_annual_insurance")]
    pub annual_insurance: f64,
    #[serde(default = "default_monthly_hoa")]
    pub monthly_hoa: f64,
    #[serde(default = "default_monthly_other_expenses")]
    pub monthly_other_expenses: f64,
    #[serde(default = "default_rent_growth_rate")]
    pub rent_growth_rate: f64,
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,

    #[serde(default = "default_true")]
    pub include_mortgage: bool,
    #[serde(default = "default_true")]
    pub include_expenses: bool,
    #[serde(default)]
    pub apply_inflation_to_fixed_costs: bool,
}

fn default_purchase_price() -> f64 { 300_000.0 }
fn default_down_payment_pct() -> f64 { 20.0 }
fn default_loan_term_years() -> u32 { 30 }
fn default_interest_rate() -> f64 { 6.5 }
fn default_projection_years() -> u32 { 5 }
fn default_appreciation_rate() -> f64 { 3.0 }
fn default_discount_rate() -> f64 { 8.0 }
fn default_monthly_rent() -> f64 { OperatingAssumptions::default().monthly_rent }
fn default_vacancy_rate() -> f64 { OperatingAssumptions::default().vacancy_rate }
fn default_management_fee_rate() -> f64 { OperatingAssumptions::default().management_fee_rate }
fn default_maintenance_rate() -> f64 { OperatingAssumptions::default().maintenance_rate }
fn default_annual_property_tax() -> f64 { OperatingAssumptions::default().annual_property_tax }
fn default_annual_insurance() -> f64 { OperatingAssumptions::default().annual_insurance }
fn default_monthly_hoa() -> f64 { OperatingAssumptions::default().monthly_hoa }
fn default_monthly_other_expenses() -> f64 { OperatingAssumptions::default().monthly_other_expenses }
fn default_rent_growth_rate() -> f64 { OperatingAssumptions::default().rent_growth_rate }
fn default_inflation_rate() -> f64 { OperatingAssumptions::default().inflation_rate }
fn default_true() -> bool { true }

impl Default for DealInput {
    fn default() -> Self {
        Self {
            name: None,
            purchase_price: default_purchase_price(),
            down_payment_pct: default_down_payment_pct(),
            loan_term_years: default_loan_term_years(),
            interest_rate: default_interest_rate(),
            projection_years: default_projection_years(),
            appreciation_rate: default_appreciation_rate(),
            discount_rate: default_discount_rate(),
            monthly_rent: default_monthly_rent(),
            vacancy_rate: default_vacancy_rate(),
            management_fee_rate: default_management_fee_rate(),
            maintenance_rate: default_maintenance_rate(),
            annual_property_tax: default_annual_property_tax(),
            annual_insurance: default_annual_insurance(),
            monthly_hoa: default_monthly_hoa(),
            monthly_other_expenses: default_monthly_other_expenses(),
            rent_growth_rate: default_rent_growth_rate(),
            inflation_rate: default_inflation_rate(),
            include_mortgage: true,
            include_expenses: true,
            apply_inflation_to_fixed_costs: false,
        }
    }
}

/// Validated engine inputs built from a [`DealInput`]
#[derive(Debug, Clone)]
pub struct DealParts {
    pub property: PropertyParams,
    /// `None` for an all-cash purchase
    pub loan: Option<LoanTerms>,
    pub assumptions: OperatingAssumptions,
    pub config: ProjectionConfig,
}

impl DealInput {
    /// Display label for this deal
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("${:.0} @ ${:.0}/mo", self.purchase_price, self.monthly_rent))
    }

    pub fn property(&self) -> PropertyParams {
        PropertyParams::with_down_payment_pct(self.purchase_price, self.down_payment_pct, self.appreciation_rate)
    }

    pub fn operating_assumptions(&self) -> OperatingAssumptions {
        OperatingAssumptions {
            monthly_rent: self.monthly_rent,
            vacancy_rate: self.vacancy_rate,
            management_fee_rate: self.management_fee_rate,
            maintenance_rate: self.maintenance_rate,
            annual_property_tax: self.annual_property_tax,
            annual_insurance: self.annual_insurance,
            monthly_hoa: self.monthly_hoa,
            monthly_other_expenses: self.monthly_other_expenses,
            rent_growth_rate: self.rent_growth_rate,
            inflation_rate: self.inflation_rate,
        }
    }

    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            horizon_years: self.projection_years,
            include_mortgage: self.include_mortgage,
            include_expenses: self.include_expenses,
            apply_inflation_to_fixed_costs: self.apply_inflation_to_fixed_costs,
        }
    }

    /// Validate every field and split into engine inputs
    pub fn to_parts(&self) -> AnalyzerResult<DealParts> {
        if !(0.0..=100.0).contains(&self.down_payment_pct) {
            return Err(AnalyzerError::invalid(
                "down_payment_pct",
                format!("must be between 0 and 100 (got {})", self.down_payment_pct),
            ));
        }
        require_non_negative("discount_rate", self.discount_rate)?;

        let property = self.property();
        property.validate()?;

        let assumptions = self.operating_assumptions();
        assumptions.validate()?;

        let config = self.projection_config();
        config.validate()?;

        let loan_amount = property.loan_amount();
        let loan = if loan_amount > 0.0 {
            Some(LoanTerms::new(loan_amount, self.interest_rate, self.loan_term_years)?)
        } else {
            None
        };

        Ok(DealParts {
            property,
            loan,
            assumptions,
            config,
        })
    }
}

/// Load a single deal from a JSON file
pub fn load_deal<P: AsRef<Path>>(path: P) -> AnalyzerResult<DealInput> {
    let file = File::open(path.as_ref())?;
    let deal: DealInput = serde_json::from_reader(BufReader::new(file))?;
    debug!("Loaded deal from {}: {:?}", path.as_ref().display(), deal);
    Ok(deal)
}

/// Load deals from a CSV file, one deal per row
pub fn load_deals<P: AsRef<Path>>(path: P) -> AnalyzerResult<Vec<DealInput>> {
    let file = File::open(path.as_ref())?;
    let deals = load_deals_from_reader(file)?;
    debug!("Loaded {} deals from {}", deals.len(), path.as_ref().display());
    Ok(deals)
}

/// Load deals from any CSV reader (string buffer, stdin, ...)
pub fn load_deals_from_reader<R: Read>(reader: R) -> AnalyzerResult<Vec<DealInput>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut deals = Vec::new();

    for result in csv_reader.deserialize() {
        let deal: DealInput = result?;
        deals.push(deal);
    }

    Ok(deals)
}
