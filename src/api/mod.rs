mod error;
mod report;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use tokio::net::TcpListener;

use crate::core::{Inputs, Summary, YearlyRecord, run_projection};

pub use error::ApiError;
pub use report::{Report, format_currency, group_thousands};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const DEFAULT_CURRENT_AGE: i64 = 24;
const DEFAULT_RETIRE_AGE: i64 = 50;
const DEFAULT_CURRENT_SAVINGS: f64 = 50_000.0;
const DEFAULT_MONTHLY_INVESTMENT: f64 = 10_000.0;
const DEFAULT_EXPECTED_RETURN: f64 = 12.0;
const DEFAULT_INFLATION_RATE: f64 = 6.0;

const CURRENT_AGE_RANGE: RangeInclusive<u32> = 18..=60;
const RETIRE_AGE_RANGE: RangeInclusive<u32> = 30..=80;
const CURRENT_SAVINGS_RANGE: RangeInclusive<f64> = 0.0..=10_000_000.0;
const MONTHLY_INVESTMENT_RANGE: RangeInclusive<f64> = 500.0..=500_000.0;
const EXPECTED_RETURN_RANGE: RangeInclusive<f64> = 4.0..=20.0;
const INFLATION_RATE_RANGE: RangeInclusive<f64> = 1.0..=10.0;

const NOMINAL_SERIES_COLOR: &str = "#00C853";
const INVESTED_SERIES_COLOR: &str = "#FF5252";

/// How each surface names the parameters that can be rejected.
struct FieldNames {
    current_savings: &'static str,
    monthly_investment: &'static str,
    expected_return: &'static str,
    inflation_rate: &'static str,
}

const CLI_FIELDS: FieldNames = FieldNames {
    current_savings: "--current-savings",
    monthly_investment: "--monthly-investment",
    expected_return: "--expected-return",
    inflation_rate: "--inflation-rate",
};

const API_FIELDS: FieldNames = FieldNames {
    current_savings: "currentSavings",
    monthly_investment: "monthlyInvestment",
    expected_return: "expectedReturn",
    inflation_rate: "inflationRate",
};

// Ages are signed so that out-of-range values reach the clamp instead of
// failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<i64>,
    retire_age: Option<i64>,
    current_savings: Option<f64>,
    monthly_investment: Option<f64>,
    expected_return: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "freedomcalc project",
    about = "Year-by-year FIRE projection (annual compounding, monthly SIP, 4% withdrawal rule)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_CURRENT_AGE,
        allow_negative_numbers = true,
        help = "Current age (18-60)"
    )]
    current_age: i64,
    #[arg(
        long,
        default_value_t = DEFAULT_RETIRE_AGE,
        allow_negative_numbers = true,
        help = "Target retirement age (30-80)"
    )]
    retire_age: i64,
    #[arg(
        long,
        default_value_t = DEFAULT_CURRENT_SAVINGS,
        help = "Current savings (0-10,000,000)"
    )]
    current_savings: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_MONTHLY_INVESTMENT,
        help = "Monthly SIP amount (500-500,000)"
    )]
    monthly_investment: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_EXPECTED_RETURN,
        help = "Expected annual return in percent (4-20)"
    )]
    expected_return: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INFLATION_RATE,
        help = "Expected annual inflation in percent (1-10)"
    )]
    inflation_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartSeries {
    key: &'static str,
    label: &'static str,
    color: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartSpec {
    x: &'static str,
    series: [ChartSeries; 2],
}

impl ChartSpec {
    fn wealth_trajectory() -> Self {
        Self {
            x: "year",
            series: [
                ChartSeries {
                    key: "portfolioValueNominal",
                    label: "Portfolio Value (Nominal)",
                    color: NOMINAL_SERIES_COLOR,
                },
                ChartSeries {
                    key: "investedAmount",
                    label: "Invested Amount",
                    color: INVESTED_SERIES_COLOR,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    inputs: Inputs,
    summary: Summary,
    records: Vec<YearlyRecord>,
    chart: ChartSpec,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn clamp_finite(
    name: &str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<f64, ApiError> {
    if !value.is_finite() {
        return Err(ApiError::InvalidInput(format!(
            "{name} must be a finite number"
        )));
    }
    Ok(value.clamp(*range.start(), *range.end()))
}

fn clamp_age(value: i64, range: &RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
    clamped as u32
}

/// Pulls every parameter into its form range. A retirement age at or below the
/// current age is kept as-is; the engine turns it into an empty projection.
fn build_inputs(cli: Cli, names: &FieldNames) -> Result<Inputs, ApiError> {
    Ok(Inputs {
        current_age: clamp_age(cli.current_age, &CURRENT_AGE_RANGE),
        retire_age: clamp_age(cli.retire_age, &RETIRE_AGE_RANGE),
        current_savings: clamp_finite(
            names.current_savings,
            cli.current_savings,
            &CURRENT_SAVINGS_RANGE,
        )?,
        monthly_investment: clamp_finite(
            names.monthly_investment,
            cli.monthly_investment,
            &MONTHLY_INVESTMENT_RANGE,
        )?,
        expected_return_pct: clamp_finite(
            names.expected_return,
            cli.expected_return,
            &EXPECTED_RETURN_RANGE,
        )?,
        inflation_rate_pct: clamp_finite(
            names.inflation_rate,
            cli.inflation_rate,
            &INFLATION_RATE_RANGE,
        )?,
    })
}

/// Parses `project` flags (first item is the program name) and renders the
/// text dashboard.
pub fn run_cli_report<I, T>(args: I) -> Result<String, ApiError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let inputs = build_inputs(cli, &CLI_FIELDS)?;
    let projection = run_projection(&inputs);
    log::debug!(
        "projected {} years for retirement at {}",
        projection.records.len(),
        inputs.retire_age
    );
    Ok(Report {
        inputs: &inputs,
        projection: &projection,
    }
    .to_string())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    log::info!("FreedomCalc HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    with_cache_control(ApiError::NotFound)
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload).await,
        Err(rejection) => reject_payload(ApiError::InvalidInput(format!(
            "Invalid API query string: {}",
            rejection.body_text()
        ))),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload).await,
        Err(rejection) => reject_payload(ApiError::InvalidInput(format!(
            "Invalid API JSON payload: {}",
            rejection.body_text()
        ))),
    }
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(err) => return reject_payload(err),
    };

    let projection = run_projection(&inputs);
    log::debug!(
        "projection age {} -> {}: {} records",
        inputs.current_age,
        inputs.retire_age,
        projection.records.len()
    );

    let response = ProjectResponse {
        inputs,
        summary: projection.summary,
        records: projection.records,
        chart: ChartSpec::wealth_trajectory(),
    };
    json_response(StatusCode::OK, response)
}

fn reject_payload(err: ApiError) -> Response {
    log::warn!("rejected projection request: {err}");
    with_cache_control(err)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<Inputs, ApiError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retire_age {
        cli.retire_age = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.monthly_investment {
        cli.monthly_investment = v;
    }
    if let Some(v) = payload.expected_return {
        cli.expected_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }

    build_inputs(cli, &API_FIELDS)
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: DEFAULT_CURRENT_AGE,
        retire_age: DEFAULT_RETIRE_AGE,
        current_savings: DEFAULT_CURRENT_SAVINGS,
        monthly_investment: DEFAULT_MONTHLY_INVESTMENT,
        expected_return: DEFAULT_EXPECTED_RETURN,
        inflation_rate: DEFAULT_INFLATION_RATE,
    }
}
