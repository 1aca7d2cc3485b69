use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A designer input that cannot produce a channel. Recompute stops before
/// any geometry is built.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{side} tie-out slope {slope} must be > 0")]
    NonPositiveTieOut { side: &'static str, slope: f64 },

    #[error("{side} tie-out is degenerate: edge already at datum elevation {datum}")]
    DegenerateTieOut { side: &'static str, datum: f64 },

    #[error("profile not station-monotonic at point {index} (station {station})")]
    NonMonotonic { index: usize, station: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("existing cross-section has no points")]
    EmptyExisting,

    #[error("existing cross-section stations decrease at point {index}")]
    UnsortedExisting { index: usize },

    #[error("design window [{lo}, {hi}] lies outside existing stations [{ex_lo}, {ex_hi}]")]
    OutsideDomain { lo: f64, hi: f64, ex_lo: f64, ex_hi: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}
