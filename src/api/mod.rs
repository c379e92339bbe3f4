use axum::{
    Router,
    extract::{Json, RawQuery},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Inputs, ProjectionRow, SavingsSummary, run_projection};
use crate::fmt::{format_dkk, format_pct};
use crate::params;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    portfolio_mio: Option<f64>,
    share_managed: Option<f64>,
    advisory_fee: Option<f64>,
    brokerage_fee: Option<f64>,
    partner_share: Option<f64>,
    annual_growth_mio: Option<f64>,
    current_portfolio_cost: Option<f64>,
    expected_portfolio_cost: Option<f64>,
    current_advisory_fee: Option<f64>,
    expected_advisory_fee: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "partnercalc",
    about = "Partner earnings and customer savings projection over a five-year horizon"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 1000.0,
        help = "Total portfolio value in mio. kr."
    )]
    portfolio_mio: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Share of the portfolio under active advisement in percent"
    )]
    share_managed: f64,
    #[arg(
        long,
        default_value_t = 0.5,
        help = "Annual advisory fee in percent of AuM, e.g. 0.5"
    )]
    advisory_fee: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual brokerage fee in percent of AuM"
    )]
    brokerage_fee: f64,
    #[arg(
        long,
        default_value_t = 40.0,
        help = "Platform partner's share of gross revenue in percent"
    )]
    partner_share: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Flat annual AuM growth in mio. kr."
    )]
    annual_growth_mio: f64,
    #[arg(
        long,
        default_value_t = 1.2,
        help = "Customer's current portfolio costs in percent"
    )]
    current_portfolio_cost: f64,
    #[arg(
        long,
        default_value_t = 0.6,
        help = "Expected portfolio costs after the switch in percent"
    )]
    expected_portfolio_cost: f64,
    #[arg(
        long,
        default_value_t = 0.3,
        help = "Customer's current advisory fee in percent"
    )]
    current_advisory_fee: f64,
    #[arg(
        long,
        default_value_t = 0.6,
        help = "Expected advisory fee after the switch in percent"
    )]
    expected_advisory_fee: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    query: String,
    rows: Vec<ProjectionRow>,
    savings: SavingsSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    for (name, value) in [
        ("--portfolio-mio", cli.portfolio_mio),
        ("--share-managed", cli.share_managed),
        ("--advisory-fee", cli.advisory_fee),
        ("--brokerage-fee", cli.brokerage_fee),
        ("--partner-share", cli.partner_share),
        ("--annual-growth-mio", cli.annual_growth_mio),
        ("--current-portfolio-cost", cli.current_portfolio_cost),
        ("--expected-portfolio-cost", cli.expected_portfolio_cost),
        ("--current-advisory-fee", cli.current_advisory_fee),
        ("--expected-advisory-fee", cli.expected_advisory_fee),
    ] {
        if !value.is_finite() {
            return Err(format!("{name} must be a finite number"));
        }
        if value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    if !(0.0..=100.0).contains(&cli.share_managed) {
        return Err("--share-managed must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.partner_share) {
        return Err("--partner-share must be between 0 and 100".to_string());
    }

    Ok(Inputs {
        portfolio_mio: cli.portfolio_mio,
        share_managed: cli.share_managed / 100.0,
        advisory_fee_rate: cli.advisory_fee / 100.0,
        brokerage_fee_rate: cli.brokerage_fee / 100.0,
        partner_share: cli.partner_share / 100.0,
        annual_growth_mio: cli.annual_growth_mio,
        current_portfolio_cost_rate: cli.current_portfolio_cost / 100.0,
        expected_portfolio_cost_rate: cli.expected_portfolio_cost / 100.0,
        current_advisory_fee_rate: cli.current_advisory_fee / 100.0,
        expected_advisory_fee_rate: cli.expected_advisory_fee / 100.0,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        portfolio_mio: 1000.0,
        share_managed: 30.0,
        advisory_fee: 0.5,
        brokerage_fee: 0.0,
        partner_share: 40.0,
        annual_growth_mio: 30.0,
        current_portfolio_cost: 1.2,
        expected_portfolio_cost: 0.6,
        current_advisory_fee: 0.3,
        expected_advisory_fee: 0.6,
    }
}

fn inputs_from_payload(payload: ProjectionPayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.portfolio_mio {
        cli.portfolio_mio = v;
    }
    if let Some(v) = payload.share_managed {
        cli.share_managed = v;
    }
    if let Some(v) = payload.advisory_fee {
        cli.advisory_fee = v;
    }
    if let Some(v) = payload.brokerage_fee {
        cli.brokerage_fee = v;
    }
    if let Some(v) = payload.partner_share {
        cli.partner_share = v;
    }
    if let Some(v) = payload.annual_growth_mio {
        cli.annual_growth_mio = v;
    }
    if let Some(v) = payload.current_portfolio_cost {
        cli.current_portfolio_cost = v;
    }
    if let Some(v) = payload.expected_portfolio_cost {
        cli.expected_portfolio_cost = v;
    }
    if let Some(v) = payload.current_advisory_fee {
        cli.current_advisory_fee = v;
    }
    if let Some(v) = payload.expected_advisory_fee {
        cli.expected_advisory_fee = v;
    }

    build_inputs(cli)
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let inputs = build_inputs(cli)?;
    print_projection(&inputs);
    Ok(())
}

fn print_projection(inputs: &Inputs) {
    let result = run_projection(inputs);
    let first = &result.rows[0];

    println!("Key figures (year 1)");
    println!("  AuM                      {}", format_dkk(first.aum));
    println!("  Gross revenue            {}", format_dkk(first.gross_revenue));
    println!(
        "  Partner share            {} ({})",
        format_dkk(first.partner_revenue),
        format_pct(inputs.partner_share)
    );
    println!("  Own revenue              {}", format_dkk(first.own_revenue));
    println!();

    println!("Five-year overview");
    println!(
        "  {:>4}  {:>18}  {:>15}  {:>15}  {:>15}  {:>15}  {:>15}",
        "Year", "AuM", "Advisory fee", "Brokerage", "Gross", "Partner share", "Own revenue"
    );
    for row in &result.rows {
        let brokerage = if inputs.brokerage_fee_rate == 0.0 {
            "-".to_string()
        } else {
            format_dkk(row.brokerage_fee)
        };
        println!(
            "  {:>4}  {:>18}  {:>15}  {:>15}  {:>15}  {:>15}  {:>15}",
            row.year,
            format_dkk(row.aum),
            format_dkk(row.advisory_fee),
            brokerage,
            format_dkk(row.gross_revenue),
            format_dkk(row.partner_revenue),
            format_dkk(row.own_revenue),
        );
    }
    println!();

    println!("Customer savings per 100 mio. kr.");
    println!(
        "  Portfolio cost savings   {}",
        format_dkk(result.savings.portfolio_cost_savings)
    );
    println!(
        "  Advisory fee delta       {}",
        format_dkk(result.savings.fee_delta)
    );
    println!(
        "  Net savings              {}",
        format_dkk(result.savings.net_savings)
    );
    println!();
    println!("Shareable state: ?{}", params::encode(inputs));
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Partner calculator API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, app).await
}

async fn projection_get_handler(RawQuery(query): RawQuery) -> Response {
    let inputs = params::decode(query.as_deref().unwrap_or(""));
    json_response(StatusCode::OK, projection_response(&inputs))
}

async fn projection_post_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    match inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, projection_response(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn projection_response(inputs: &Inputs) -> ProjectionResponse {
    let result = run_projection(inputs);
    ProjectionResponse {
        query: params::encode(inputs),
        rows: result.rows,
        savings: result.savings,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}
