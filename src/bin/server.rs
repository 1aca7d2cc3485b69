use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use channel_designer::config::{DesignerInput, MergeMode};
use channel_designer::hydraulics::BankfullSummary;
use channel_designer::profile::{DesignPoint, Profile};
use channel_designer::scenario::{self, Scenario};
use channel_designer::{Outcome, apply};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Deserialize)]
struct DesignRequest {
    #[serde(default)]
    designer: DesignerInput,
    #[serde(default)]
    xs: Profile,
    /// Overrides `designer.mode` when present.
    mode: Option<MergeMode>,
}

#[derive(Serialize)]
struct DesignResponse {
    name: Option<String>,
    ok: bool,
    error: Option<String>,
    warnings: Vec<String>,
    cross_section: Profile,
    design: Vec<DesignPoint>,
    summary: Option<BankfullSummary>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

impl DesignResponse {
    fn new(name: Option<String>, outcome: Outcome, timings: Vec<TimingEntry>) -> Self {
        Self {
            name,
            ok: outcome.is_ok(),
            error: outcome.error.as_ref().map(ToString::to_string),
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
            cross_section: outcome.cross_section,
            design: outcome.design.map(|d| d.points).unwrap_or_default(),
            summary: outcome.summary,
            timings,
        }
    }
}

async fn design_handler(Json(req): Json<DesignRequest>) -> Json<DesignResponse> {
    let mode = req.mode.unwrap_or(req.designer.mode);
    let (outcome, timings) = apply(&req.designer, &req.xs, mode);

    let timing_entries = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    Json(DesignResponse::new(None, outcome, timing_entries))
}

async fn scenarios_handler(
    Json(scenarios): Json<Vec<Scenario>>,
) -> Result<Json<Vec<DesignResponse>>, StatusCode> {
    let responses = tokio::task::spawn_blocking(move || {
        scenario::run_batch(&scenarios)
            .into_iter()
            .map(|r| {
                let total = vec![TimingEntry {
                    name: "TOTAL".into(),
                    ms: r.ms,
                }];
                DesignResponse::new(Some(r.name), r.outcome, total)
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "scenario batch task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(responses))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,channel_designer=debug".into()),
        )
        .init();

    let app = Router::new()
        .route("/api/design", post(design_handler))
        .route("/api/scenarios", post(scenarios_handler))
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = std::env::var("CHANNEL_DESIGNER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("invalid CHANNEL_DESIGNER_ADDR")?;
    tracing::info!("channel designer server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
