//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

/// A single month of projected operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Gross scheduled rent
    pub rent: f64,

    // Rent-based expenses
    pub vacancy_loss: f64,
    pub management_fee: f64,
    pub maintenance: f64,

    /// Tax + insurance + HOA + other, inflation-adjusted when enabled
    pub fixed_costs: f64,

    /// Debt service (0 once the loan is paid off or when excluded)
    pub mortgage_payment: f64,

    /// Rent less every expense and debt service
    pub net_cash_flow: f64,
}

impl ProjectionPoint {
    /// Rent collected after vacancy
    pub fn effective_rent(&self) -> f64 {
        self.rent - self.vacancy_loss
    }

    /// Operating expenses excluding debt service
    pub fn operating_expenses(&self) -> f64 {
        self.management_fee + self.maintenance + self.fixed_costs
    }

    /// Net operating income (before debt service)
    pub fn net_operating_income(&self) -> f64 {
        self.effective_rent() - self.operating_expenses()
    }
}

/// One projection year rolled up from monthly points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub total_rent: f64,
    pub net_operating_income: f64,
    pub debt_service: f64,
    pub cash_flow: f64,
}

/// Ordered monthly points over the projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowSeries {
    pub points: Vec<ProjectionPoint>,
}

impl CashflowSeries {
    pub fn with_capacity(months: usize) -> Self {
        Self {
            points: Vec::with_capacity(months),
        }
    }

    pub fn push(&mut self, point: ProjectionPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionPoint> {
        self.points.iter()
    }

    pub fn net_cash_flows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.net_cash_flow).collect()
    }

    pub fn rents(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rent).collect()
    }

    /// Running sum of net cash flow
    pub fn cumulative(&self) -> Vec<f64> {
        self.points
            .iter()
            .scan(0.0, |total, p| {
                *total += p.net_cash_flow;
                Some(*total)
            })
            .collect()
    }

    pub fn total_net_cash_flow(&self) -> f64 {
        self.points.iter().map(|p| p.net_cash_flow).sum()
    }

    /// Net cash flow summed over projection year `year` (1-indexed)
    pub fn year_net_cash_flow(&self, year: u32) -> f64 {
        self.year_points(year).iter().map(|p| p.net_cash_flow).sum()
    }

    /// Net operating income summed over projection year `year` (1-indexed)
    pub fn year_net_operating_income(&self, year: u32) -> f64 {
        self.year_points(year).iter().map(|p| p.net_operating_income()).sum()
    }

    /// Year-by-year totals; only complete years are reported
    pub fn yearly(&self) -> Vec<YearSummary> {
        self.points
            .chunks_exact(12)
            .enumerate()
            .map(|(i, months)| YearSummary {
                year: i as u32 + 1,
                total_rent: months.iter().map(|p| p.rent).sum(),
                net_operating_income: months.iter().map(|p| p.net_operating_income()).sum(),
                debt_service: months.iter().map(|p| p.mortgage_payment).sum(),
                cash_flow: months.iter().map(|p| p.net_cash_flow).sum(),
            })
            .collect()
    }

    fn year_points(&self, year: u32) -> &[ProjectionPoint] {
        if year == 0 {
            return &[];
        }
        let start = ((year - 1) * 12) as usize;
        let end = (year * 12) as usize;
        if start >= self.points.len() {
            return &[];
        }
        &self.points[start..end.min(self.points.len())]
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Level mortgage payment (0 without a loan)
    pub monthly_payment: f64,

    /// Cash invested at month 0 (the down payment)
    pub initial_investment: f64,

    /// Monthly points
    pub series: CashflowSeries,

    /// Running sum of net cash flow, one entry per month
    pub cumulative_cash_flow: Vec<f64>,

    /// Estimated property value at each month end
    pub property_value: Vec<f64>,

    /// Loan balance after each month's payment
    pub loan_balance: Vec<f64>,

    /// Property value less loan balance
    pub equity: Vec<f64>,

    /// First month whose cumulative cash flow recovers the initial investment
    pub break_even_month: Option<u32>,
}

impl ProjectionResult {
    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(self.initial_investment)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_rent: f64 = self.series.iter().map(|p| p.rent).sum();
        let total_noi: f64 = self.series.iter().map(|p| p.net_operating_income()).sum();
        let total_debt_service: f64 = self.series.iter().map(|p| p.mortgage_payment).sum();

        ProjectionSummary {
            total_months: self.series.len() as u32,
            monthly_payment: self.monthly_payment,
            total_rent,
            total_noi,
            total_debt_service,
            total_net_cash_flow: self.series.total_net_cash_flow(),
            year_one_cash_flow: self.series.year_net_cash_flow(1),
            final_property_value: self.property_value.last().copied().unwrap_or(0.0),
            final_loan_balance: self.loan_balance.last().copied().unwrap_or(0.0),
            final_equity: self.final_equity(),
            break_even_month: self.break_even_month,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub monthly_payment: f64,
    pub total_rent: f64,
    pub total_noi: f64,
    pub total_debt_service: f64,
    pub total_net_cash_flow: f64,
    pub year_one_cash_flow: f64,
    pub final_property_value: f64,
    pub final_loan_balance: f64,
    pub final_equity: f64,
    pub break_even_month: Option<u32>,
}

/// First 1-indexed month with `cumulative >= initial_investment`
pub fn break_even_month(cumulative: &[f64], initial_investment: f64) -> Option<u32> {
    cumulative
        .iter()
        .position(|&total| total >= initial_investment)
        .map(|i| i as u32 + 1)
}
