use serde::Serialize;

/// Annual draw assumed sustainable from the final corpus.
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub current_age: u32,
    pub retire_age: u32,
    pub current_savings: f64,
    pub monthly_investment: f64,
    #[serde(rename = "expectedReturn")]
    pub expected_return_pct: f64,
    #[serde(rename = "inflationRate")]
    pub inflation_rate_pct: f64,
}

impl Inputs {
    /// Signed: a retirement age at or below the current age yields zero or less.
    pub fn years_to_invest(&self) -> i64 {
        i64::from(self.retire_age) - i64::from(self.current_age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    pub year: u32,
    pub portfolio_value_nominal: u64,
    pub invested_amount: u64,
    pub real_purchasing_power: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub years_to_freedom: i64,
    pub projected_corpus: f64,
    pub total_invested: f64,
    pub passive_monthly_income: f64,
    pub interest_earned_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub records: Vec<YearlyRecord>,
    pub summary: Summary,
}
