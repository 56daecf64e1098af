use super::types::{Inputs, Projection, SAFE_WITHDRAWAL_RATE, Summary, YearlyRecord};

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
struct Ledger {
    corpus: f64,
    total_invested: f64,
}

impl Ledger {
    fn opening(inputs: &Inputs) -> Self {
        Self {
            corpus: inputs.current_savings,
            total_invested: inputs.current_savings,
        }
    }

    // Interest accrues on the balance carried in from last year; this year's
    // contributions land after it and earn nothing until next year.
    fn advance_year(&mut self, inputs: &Inputs) {
        let yearly_contribution = inputs.monthly_investment * MONTHS_PER_YEAR;
        self.total_invested += yearly_contribution;

        let interest = self.corpus * (inputs.expected_return_pct / 100.0);
        self.corpus += interest + yearly_contribution;
    }
}

pub fn run_projection(inputs: &Inputs) -> Projection {
    let years = inputs.years_to_invest().max(0) as u32;
    let deflator_step = 1.0 + inputs.inflation_rate_pct / 100.0;

    let mut ledger = Ledger::opening(inputs);
    let mut records = Vec::with_capacity(years as usize);
    for year in 1..=years {
        ledger.advance_year(inputs);
        let real_value = ledger.corpus / deflator_step.powi(year as i32);

        records.push(YearlyRecord {
            year: inputs.current_age + year,
            portfolio_value_nominal: round_currency(ledger.corpus),
            invested_amount: round_currency(ledger.total_invested),
            real_purchasing_power: round_currency(real_value),
        });
    }

    Projection {
        records,
        summary: build_summary(inputs, ledger),
    }
}

pub fn project(inputs: &Inputs) -> Vec<YearlyRecord> {
    run_projection(inputs).records
}

pub fn summarize(inputs: &Inputs) -> Summary {
    run_projection(inputs).summary
}

fn build_summary(inputs: &Inputs, ledger: Ledger) -> Summary {
    Summary {
        years_to_freedom: inputs.years_to_invest(),
        projected_corpus: ledger.corpus,
        total_invested: ledger.total_invested,
        passive_monthly_income: ledger.corpus * SAFE_WITHDRAWAL_RATE / MONTHS_PER_YEAR,
        interest_earned_total: ledger.corpus - ledger.total_invested,
    }
}

/// Nearest whole currency unit, halves rounded up. Inputs are never negative.
fn round_currency(value: f64) -> u64 {
    value.round().max(0.0) as u64
}
