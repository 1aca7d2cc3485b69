use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use channel_designer::config::{DesignerInput, MergeMode};
use channel_designer::profile::Profile;
use channel_designer::scenario::{self, Scenario};
use channel_designer::{Outcome, apply};

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    ok: bool,
    error: Option<String>,
    warnings: Vec<String>,
    points: Vec<Row>,
    cross_section: Profile,
}

#[derive(Serialize)]
struct Row {
    station: f64,
    elevation: f64,
    description: &'static str,
    stage: String,
}

fn report<'a>(name: &'a str, outcome: &Outcome) -> Report<'a> {
    let points = outcome
        .design
        .iter()
        .flat_map(|d| &d.points)
        .map(|p| Row {
            station: p.point.station,
            elevation: p.point.elevation,
            description: p.kind.description(),
            stage: p.stage_label(),
        })
        .collect();
    Report {
        name,
        ok: outcome.is_ok(),
        error: outcome.error.as_ref().map(ToString::to_string),
        warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
        points,
        cross_section: outcome.cross_section.rounded(2),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,channel_designer=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let params_path = args.get(1).map(PathBuf::from);
    let existing_path = args.get(2).map(PathBuf::from);

    let input = match &params_path {
        Some(p) => read_json(p)?,
        None => serde_json::to_value(DesignerInput::default())?,
    };

    // A JSON array is a batch of named scenarios.
    if input.is_array() {
        let scenarios: Vec<Scenario> = serde_json::from_value(input)?;
        tracing::info!(count = scenarios.len(), "running scenario batch");
        let results = scenario::run_batch(&scenarios);
        let reports: Vec<Report> = results
            .iter()
            .map(|r| {
                tracing::info!(name = %r.name, ms = r.ms, ok = r.outcome.is_ok(), "scenario done");
                report(&r.name, &r.outcome)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let designer: DesignerInput = serde_json::from_value(input)?;
    let existing: Profile = match &existing_path {
        Some(p) => serde_json::from_value(read_json(p)?)?,
        None => Profile::default(),
    };
    let mode = match args.get(3).map(String::as_str) {
        None => designer.mode,
        Some("replace") => MergeMode::Replace,
        Some("merge") => MergeMode::Merge,
        Some(other) => bail!("unknown mode {other:?}, expected replace or merge"),
    };

    tracing::info!(
        stages = designer.num_stages,
        ?mode,
        existing = existing.len(),
        "designing cross-section"
    );

    let (outcome, timings) = apply(&designer, &existing, mode);

    for t in &timings {
        tracing::debug!("  {:12} {:8.3} ms", t.name, t.ms);
    }
    if let Some(s) = &outcome.summary {
        tracing::info!(
            area = s.area,
            top_width = s.top_width,
            hydraulic_radius = s.hydraulic_radius,
            mean_depth = s.mean_depth,
            wd_ratio = s.width_depth_ratio,
            "bankfull"
        );
    }

    let name = params_path
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("default");
    println!("{}", serde_json::to_string_pretty(&report(name, &outcome))?);

    if let Some(e) = &outcome.error {
        bail!("{e}");
    }
    Ok(())
}
