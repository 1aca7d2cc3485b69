use serde::Serialize;

use crate::config::{DesignerInput, TerraceInput};
use crate::error::ValidationError;
use crate::profile::Side;

/// A left/right pair of per-side quantities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T: Copy> PerSide<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn get(&self, side: Side) -> T {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Bankfull channel (stage 1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Channel {
    pub width: f64,
    pub depth: f64,
    pub side_slope: f64,
    pub bed_slope: f64,
    pub thalweg_shift: f64,
    pub roundness: f64,
}

/// Bench or floodplain stage layered on top of the previous stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Terrace {
    pub delta_depth: f64,
    pub side_slope: f64,
    pub width: PerSide<f64>,
    pub slope: PerSide<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InnerBerm {
    pub width: f64,
    pub max_depth: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Advanced {
    /// Rise:run. Not validated for sign; the tie-out extender reports it.
    pub tie_out_slope: PerSide<f64>,
    pub height_multiplier: PerSide<f64>,
    pub side_slope_multiplier: PerSide<f64>,
    pub bed_slope_multiplier: PerSide<f64>,
    pub x_datum: f64,
    pub y_datum: f64,
}

/// Immutable, validated snapshot of the designer inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParameterSet {
    pub stage1: Channel,
    pub stage2: Option<Terrace>,
    pub stage3: Option<Terrace>,
    pub inner_berm: Option<InnerBerm>,
    pub advanced: Advanced,
}

impl ParameterSet {
    /// Height of the bankfull banks above the bed toes, before multipliers.
    #[inline]
    pub fn bank_height(&self) -> f64 {
        self.stage1.depth - self.stage1.bed_slope
    }

    /// Flat-bottom width between the two bed toes.
    #[inline]
    pub fn bed_width(&self) -> f64 {
        self.stage1.width - 2.0 * self.stage1.side_slope * self.bank_height()
    }

    /// Horizontal distance from the thalweg to the bed toe on `side`.
    #[inline]
    pub fn half_bed(&self, side: Side) -> f64 {
        0.5 * self.bed_width() - side.sign() * self.stage1.thalweg_shift
    }

    pub fn num_stages(&self) -> u8 {
        match (self.stage2, self.stage3) {
            (Some(_), Some(_)) => 3,
            (Some(_), None) => 2,
            _ => 1,
        }
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValidationError::new(field, format!("{v} is not a finite number")))
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    let v = finite(field, v)?;
    if v < 0.0 {
        return Err(ValidationError::new(field, format!("{v} must be >= 0")));
    }
    Ok(v)
}

fn positive(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    let v = finite(field, v)?;
    if v <= 0.0 {
        return Err(ValidationError::new(field, format!("{v} must be > 0")));
    }
    Ok(v)
}

fn terrace(prefix: Prefix, raw: &TerraceInput) -> Result<Terrace, ValidationError> {
    Ok(Terrace {
        delta_depth: non_negative(prefix.delta_depth, raw.delta_depth)?,
        side_slope: positive(prefix.side_slope, raw.side_slope)?,
        width: PerSide::new(
            non_negative(prefix.width_left, raw.width_left)?,
            non_negative(prefix.width_right, raw.width_right)?,
        ),
        slope: PerSide::new(
            non_negative(prefix.slope_left, raw.slope_left)?,
            non_negative(prefix.slope_right, raw.slope_right)?,
        ),
    })
}

/// Field names reported for one terrace stage.
struct Prefix {
    delta_depth: &'static str,
    side_slope: &'static str,
    width_left: &'static str,
    width_right: &'static str,
    slope_left: &'static str,
    slope_right: &'static str,
}

const STAGE2: Prefix = Prefix {
    delta_depth: "stage2.delta_depth",
    side_slope: "stage2.side_slope",
    width_left: "stage2.width_left",
    width_right: "stage2.width_right",
    slope_left: "stage2.slope_left",
    slope_right: "stage2.slope_right",
};

const STAGE3: Prefix = Prefix {
    delta_depth: "stage3.delta_depth",
    side_slope: "stage3.side_slope",
    width_left: "stage3.width_left",
    width_right: "stage3.width_right",
    slope_left: "stage3.slope_left",
    slope_right: "stage3.slope_right",
};

/// Validate raw form state. Reports the first offending field; inputs of
/// inactive stages and a disabled inner berm are not inspected.
pub fn validate(raw: &DesignerInput) -> Result<ParameterSet, ValidationError> {
    if !(1..=3).contains(&raw.num_stages) {
        return Err(ValidationError::new(
            "num_stages",
            format!("{} must be 1, 2 or 3", raw.num_stages),
        ));
    }

    let s1 = &raw.stage1;
    let stage1 = Channel {
        width: non_negative("stage1.width", s1.width)?,
        depth: non_negative("stage1.depth", s1.depth)?,
        side_slope: positive("stage1.side_slope", s1.side_slope)?,
        bed_slope: non_negative("stage1.bed_slope", s1.bed_slope)?,
        thalweg_shift: finite("stage1.thalweg_shift", s1.thalweg_shift)?,
        roundness: finite("stage1.roundness", s1.roundness)?,
    };
    if !(0.0..=1.0).contains(&stage1.roundness) {
        return Err(ValidationError::new(
            "stage1.roundness",
            format!("{} must be within [0, 1]", stage1.roundness),
        ));
    }

    let adv = &raw.advanced;
    let advanced = Advanced {
        tie_out_slope: PerSide::new(
            finite("advanced.tie_out_slope_left", adv.tie_out_slope_left)?,
            finite("advanced.tie_out_slope_right", adv.tie_out_slope_right)?,
        ),
        height_multiplier: PerSide::new(
            positive("advanced.height_multiplier_left", adv.height_multiplier_left)?,
            positive("advanced.height_multiplier_right", adv.height_multiplier_right)?,
        ),
        side_slope_multiplier: PerSide::new(
            positive("advanced.side_slope_multiplier_left", adv.side_slope_multiplier_left)?,
            positive("advanced.side_slope_multiplier_right", adv.side_slope_multiplier_right)?,
        ),
        bed_slope_multiplier: PerSide::new(
            positive("advanced.bed_slope_multiplier_left", adv.bed_slope_multiplier_left)?,
            positive("advanced.bed_slope_multiplier_right", adv.bed_slope_multiplier_right)?,
        ),
        x_datum: finite("advanced.x_datum", adv.x_datum)?,
        y_datum: finite("advanced.y_datum", adv.y_datum)?,
    };

    let stage2 = if raw.num_stages >= 2 {
        Some(terrace(STAGE2, &raw.stage2)?)
    } else {
        None
    };
    let stage3 = if raw.num_stages >= 3 {
        Some(terrace(STAGE3, &raw.stage3)?)
    } else {
        None
    };

    let inner_berm = if raw.inner_berm.enabled {
        Some(InnerBerm {
            width: positive("inner_berm.width", raw.inner_berm.width)?,
            max_depth: non_negative("inner_berm.max_depth", raw.inner_berm.max_depth)?,
        })
    } else {
        None
    };

    let params = ParameterSet {
        stage1,
        stage2,
        stage3,
        inner_berm,
        advanced,
    };

    // Cross-field geometry: the bed must exist and hold the thalweg and berm.
    if params.bank_height() <= 0.0 {
        return Err(ValidationError::new(
            "stage1.depth",
            format!(
                "{} must exceed the bed slope rise {}",
                stage1.depth, stage1.bed_slope
            ),
        ));
    }
    let bed_width = params.bed_width();
    if bed_width <= 0.0 {
        return Err(ValidationError::new(
            "stage1.width",
            format!(
                "{} leaves no bed between banks (bed width {bed_width})",
                stage1.width
            ),
        ));
    }
    if stage1.thalweg_shift.abs() >= 0.5 * bed_width {
        return Err(ValidationError::new(
            "stage1.thalweg_shift",
            format!(
                "{} must stay inside the bed half-width {}",
                stage1.thalweg_shift,
                0.5 * bed_width
            ),
        ));
    }
    if let Some(berm) = inner_berm {
        let room = params.half_bed(Side::Left).min(params.half_bed(Side::Right));
        if 0.5 * berm.width >= room {
            return Err(ValidationError::new(
                "inner_berm.width",
                format!("{} does not fit between the thalweg and bed toes", berm.width),
            ));
        }
    }

    Ok(params)
}
