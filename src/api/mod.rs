mod i18n;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    ModelConfig, NumericInput, WealthInputs, WealthPositionResult, calculate_wealth_position,
    validate_results,
};

pub use i18n::{Language, PositionSummary, RegionSummary, string_table, summarize, translate};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "wealth-position",
    about = "Estimate where an income and asset level ranks in Japan and the world"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one position and print it as JSON
    Calc(CalcArgs),
    /// Serve the bilingual page and the JSON API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ConfigArgs {
    #[arg(
        long,
        help = "JSON file replacing the built-in reference datasets (same shape as /api/datasets)"
    )]
    datasets: Option<PathBuf>,
    #[arg(long, help = "USD to JPY rate overriding the dataset value")]
    exchange_rate: Option<f64>,
}

#[derive(Args, Debug)]
struct CalcArgs {
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Annual income in JPY; commas and full-width digits accepted"
    )]
    income: String,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Total assets in JPY; commas and full-width digits accepted"
    )]
    assets: String,
    #[arg(long, value_enum, default_value_t = Language::Ja)]
    lang: Language,
    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PositionPayload {
    #[serde(alias = "annualIncome")]
    income: Option<NumericInput>,
    #[serde(alias = "totalAssets")]
    assets: Option<NumericInput>,
    lang: Option<Language>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TranslationsQuery {
    lang: Option<Language>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PositionRequest {
    inputs: WealthInputs,
    language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionResponse {
    result: WealthPositionResult,
    valid: bool,
    summary: PositionSummary,
}

#[derive(Debug, Serialize)]
struct TranslationsResponse {
    language: Language,
    strings: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Calc(args) => {
            let config = resolve_config(&args.config)?;
            let request = PositionRequest {
                inputs: WealthInputs::parse(
                    &NumericInput::Text(args.income),
                    &NumericInput::Text(args.assets),
                ),
                language: args.lang,
            };
            let response = build_position_response(&config, request);
            let json = if args.pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{json}");
            Ok(())
        }
        Command::Serve(args) => {
            let config = resolve_config(&args.config)?;
            run_http_server(args.port, config).await?;
            Ok(())
        }
    }
}

fn resolve_config(args: &ConfigArgs) -> anyhow::Result<ModelConfig> {
    let config = match &args.datasets {
        Some(path) => {
            info!(path = %path.display(), "loading datasets");
            ModelConfig::load_from_file(path)?
        }
        None => ModelConfig::reference(),
    };

    match args.exchange_rate {
        Some(rate) => {
            info!(usd_to_jpy = rate, "overriding exchange rate");
            config
                .with_exchange_rate(rate)
                .map_err(|e| anyhow::anyhow!("--exchange-rate: {e}"))
        }
        None => Ok(config),
    }
}

pub fn router(config: ModelConfig) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/position",
            get(position_get_handler).post(position_post_handler),
        )
        .route("/api/translations", get(translations_handler))
        .route("/api/datasets", get(datasets_handler))
        .fallback(not_found_handler)
        .with_state(Arc::new(config))
}

pub async fn run_http_server(port: u16, config: ModelConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(
        data_version = %config.data_version,
        usd_to_jpy = config.usd_to_jpy,
        "using wealth datasets"
    );
    let app = router(config);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "wealth position HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
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

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn position_get_handler(
    State(config): State<Arc<ModelConfig>>,
    payload: Result<Query<PositionPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => position_handler_impl(&config, payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn position_post_handler(
    State(config): State<Arc<ModelConfig>>,
    payload: Result<Json<PositionPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => position_handler_impl(&config, payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

fn position_handler_impl(config: &ModelConfig, payload: PositionPayload) -> Response {
    let request = position_request_from_payload(payload);
    let response = build_position_response(config, request);
    debug!(
        japan_top_percent = response.result.japan.percentile,
        world_top_percent = response.result.world.percentile,
        valid = response.valid,
        "computed wealth position"
    );
    json_response(StatusCode::OK, response)
}

async fn translations_handler(
    payload: Result<Query<TranslationsQuery>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(query)) => {
            let language = query.lang.unwrap_or_default();
            json_response(
                StatusCode::OK,
                TranslationsResponse {
                    language,
                    strings: string_table(language),
                },
            )
        }
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn datasets_handler(State(config): State<Arc<ModelConfig>>) -> Response {
    json_response(StatusCode::OK, config.as_ref())
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
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
fn position_request_from_json(json: &str) -> Result<PositionRequest, String> {
    let payload = serde_json::from_str::<PositionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(position_request_from_payload(payload))
}

fn position_request_from_payload(payload: PositionPayload) -> PositionRequest {
    let missing = NumericInput::Number(0.0);
    PositionRequest {
        inputs: WealthInputs::parse(
            payload.income.as_ref().unwrap_or(&missing),
            payload.assets.as_ref().unwrap_or(&missing),
        ),
        language: payload.lang.unwrap_or_default(),
    }
}

fn build_position_response(config: &ModelConfig, request: PositionRequest) -> PositionResponse {
    let result = calculate_wealth_position(
        config,
        request.inputs.annual_income,
        request.inputs.total_assets,
    );
    PositionResponse {
        valid: validate_results(&result),
        summary: summarize(&result, request.language),
        result,
    }
}
