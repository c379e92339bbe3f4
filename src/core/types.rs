use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    pub portfolio_mio: f64,
    pub share_managed: f64,
    pub advisory_fee_rate: f64,
    pub brokerage_fee_rate: f64,
    pub partner_share: f64,
    pub annual_growth_mio: f64,
    pub current_portfolio_cost_rate: f64,
    pub expected_portfolio_cost_rate: f64,
    pub current_advisory_fee_rate: f64,
    pub expected_advisory_fee_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub year: u32,
    pub aum: f64,
    pub advisory_fee: f64,
    pub brokerage_fee: f64,
    pub gross_revenue: f64,
    pub partner_revenue: f64,
    pub own_revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub portfolio_cost_savings: f64,
    pub fee_delta: f64,
    pub net_savings: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub rows: Vec<ProjectionRow>,
    pub savings: SavingsSummary,
}
