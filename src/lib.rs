pub mod assemble;
pub mod config;
pub mod error;
pub mod hydraulics;
pub mod merge;
pub mod params;
pub mod profile;
pub mod scenario;
pub mod side;
pub mod stages;
pub mod tieout;

use std::time::Instant;

use tracing::{debug, warn};

use assemble::Assembly;
use config::{DesignerInput, MergeMode};
use error::{Error, GeometryError, Result};
use hydraulics::BankfullSummary;
use params::ParameterSet;
use profile::{DesignProfile, Profile, Side};

/// Result of one recompute. `cross_section` is always usable: the new
/// design or merge on success, the untouched existing section when `error`
/// is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub cross_section: Profile,
    pub design: Option<DesignProfile>,
    pub summary: Option<BankfullSummary>,
    /// Non-fatal: omitted tie-outs.
    pub warnings: Vec<GeometryError>,
    pub error: Option<Error>,
}

impl Outcome {
    fn unchanged(existing: &Profile, error: Error) -> Self {
        warn!(%error, "recompute aborted, cross-section left unchanged");
        Self {
            cross_section: existing.clone(),
            design: None,
            summary: None,
            warnings: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn timed<T>(timings: &mut Vec<Timing>, name: &'static str, f: impl FnOnce() -> T) -> T {
    let t = Instant::now();
    let out = f();
    let ms = t.elapsed().as_secs_f64() * 1000.0;
    debug!(stage = name, ms, "stage done");
    timings.push(Timing { name, ms });
    out
}

/// Build the design template from validated parameters: both half-profiles,
/// stacked stages, tie-outs, datum placement.
pub fn design(params: &ParameterSet) -> Result<Assembly> {
    debug!(stages = params.num_stages(), "building design");
    let [left, right] = Side::BOTH.map(|side| side::build_side(params, side));
    Ok(assemble::assemble(params, &left, &right)?)
}

/// Validate the form snapshot and run the engine. Never panics on user
/// input; failures come back in `Outcome::error`.
pub fn apply(input: &DesignerInput, existing: &Profile, mode: MergeMode) -> (Outcome, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let validated = timed(&mut timings, "validate", || params::validate(input));
    let outcome = match validated {
        Ok(params) => pipeline(&params, existing, mode, &mut timings),
        Err(e) => Outcome::unchanged(existing, e.into()),
    };

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });
    (outcome, timings)
}

/// Engine entry point for an already validated parameter set.
pub fn run(params: &ParameterSet, existing: &Profile, mode: MergeMode) -> Outcome {
    pipeline(params, existing, mode, &mut Vec::new())
}

fn pipeline(
    params: &ParameterSet,
    existing: &Profile,
    mode: MergeMode,
    timings: &mut Vec<Timing>,
) -> Outcome {
    let Assembly { design, warnings } = match timed(timings, "design", || crate::design(params)) {
        Ok(a) => a,
        Err(e) => return Outcome::unchanged(existing, e),
    };
    let summary = timed(timings, "hydraulics", || hydraulics::bankfull_summary(&design));

    let profile = design.to_profile();
    let merged = timed(timings, "merge", || merge::combine(&profile, existing, mode));
    match merged {
        Ok(cross_section) => Outcome {
            cross_section,
            design: Some(design),
            summary,
            warnings,
            error: None,
        },
        Err(e) => Outcome {
            design: Some(design),
            summary,
            warnings,
            ..Outcome::unchanged(existing, e.into())
        },
    }
}
