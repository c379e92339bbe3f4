use super::types::{Inputs, ProjectionResult, ProjectionRow, SavingsSummary};

const MILLION: f64 = 1_000_000.0;

pub const PROJECTION_YEARS: u32 = 5;
pub const REFERENCE_BASE: f64 = 100_000_000.0;

pub fn starting_aum(portfolio_mio: f64, share_managed: f64) -> f64 {
    portfolio_mio * MILLION * share_managed
}

pub fn annual_growth(annual_growth_mio: f64) -> f64 {
    annual_growth_mio * MILLION
}

pub fn projection_row(
    year: u32,
    aum0: f64,
    growth: f64,
    advisory_fee_rate: f64,
    brokerage_fee_rate: f64,
    partner_share: f64,
) -> ProjectionRow {
    let aum = aum0 + growth * (year - 1) as f64;
    let advisory_fee = aum * advisory_fee_rate;
    let brokerage_fee = aum * brokerage_fee_rate;
    let gross_revenue = advisory_fee + brokerage_fee;
    let partner_revenue = gross_revenue * partner_share;
    let own_revenue = gross_revenue - partner_revenue;

    ProjectionRow {
        year,
        aum,
        advisory_fee,
        brokerage_fee,
        gross_revenue,
        partner_revenue,
        own_revenue,
    }
}

pub fn savings_summary(
    current_portfolio_cost_rate: f64,
    expected_portfolio_cost_rate: f64,
    current_advisory_fee_rate: f64,
    expected_advisory_fee_rate: f64,
) -> SavingsSummary {
    let portfolio_cost_savings =
        (current_portfolio_cost_rate - expected_portfolio_cost_rate) * REFERENCE_BASE;
    let fee_delta = (expected_advisory_fee_rate - current_advisory_fee_rate) * REFERENCE_BASE;
    let net_savings = portfolio_cost_savings - fee_delta;

    SavingsSummary {
        portfolio_cost_savings,
        fee_delta,
        net_savings,
    }
}

pub fn run_projection(inputs: &Inputs) -> ProjectionResult {
    let aum0 = starting_aum(inputs.portfolio_mio, inputs.share_managed);
    let growth = annual_growth(inputs.annual_growth_mio);

    let rows = (1..=PROJECTION_YEARS)
        .map(|year| {
            projection_row(
                year,
                aum0,
                growth,
                inputs.advisory_fee_rate,
                inputs.brokerage_fee_rate,
                inputs.partner_share,
            )
        })
        .collect();

    ProjectionResult {
        rows,
        savings: savings_summary(
            inputs.current_portfolio_cost_rate,
            inputs.expected_portfolio_cost_rate,
            inputs.current_advisory_fee_rate,
            inputs.expected_advisory_fee_rate,
        ),
    }
}
