use serde::{Deserialize, Serialize};

/// Raw designer form state, one field per input. Defaults are the values
/// the panel opens with. Validated into a `ParameterSet` on every recompute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerInput {
    pub num_stages: u8,
    pub mode: MergeMode,
    /// Host cadence only; the engine ignores it.
    pub auto_apply: bool,

    pub stage1: Stage1Input,
    pub stage2: TerraceInput,
    pub stage3: TerraceInput,
    pub inner_berm: InnerBermInput,
    pub advanced: AdvancedInput,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage1Input {
    pub width: f64,
    pub depth: f64,
    /// Bank side slope, run:rise (m:1).
    pub side_slope: f64,
    /// Bed rise from thalweg to the bank toe.
    pub bed_slope: f64,
    /// Signed horizontal thalweg offset, + = right.
    pub thalweg_shift: f64,
    pub roundness: f64,
}

/// Bench (stage 2) or floodplain (stage 3) inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraceInput {
    pub delta_depth: f64,
    pub side_slope: f64,
    pub width_left: f64,
    pub width_right: f64,
    /// Terrace cross slope, rise:run.
    pub slope_left: f64,
    pub slope_right: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerBermInput {
    pub enabled: bool,
    pub width: f64,
    pub max_depth: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedInput {
    pub tie_out_slope_left: f64,
    pub tie_out_slope_right: f64,
    pub height_multiplier_left: f64,
    pub height_multiplier_right: f64,
    pub side_slope_multiplier_left: f64,
    pub side_slope_multiplier_right: f64,
    pub bed_slope_multiplier_left: f64,
    pub bed_slope_multiplier_right: f64,
    pub x_datum: f64,
    pub y_datum: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    #[default]
    Replace,
    Merge,
}

impl Default for DesignerInput {
    fn default() -> Self {
        Self {
            num_stages: 1,
            mode: MergeMode::Replace,
            auto_apply: false,
            stage1: Stage1Input::default(),
            stage2: TerraceInput {
                delta_depth: 2.0,
                ..TerraceInput::default()
            },
            stage3: TerraceInput::default(),
            inner_berm: InnerBermInput::default(),
            advanced: AdvancedInput::default(),
        }
    }
}

impl Default for Stage1Input {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 2.0,
            side_slope: 2.0,
            bed_slope: 0.5,
            thalweg_shift: 0.0,
            roundness: 0.0,
        }
    }
}

impl Default for TerraceInput {
    fn default() -> Self {
        Self {
            delta_depth: 0.5,
            side_slope: 2.0,
            width_left: 10.0,
            width_right: 10.0,
            slope_left: 0.02,
            slope_right: 0.02,
        }
    }
}

impl Default for InnerBermInput {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1.0,
            max_depth: 0.5,
        }
    }
}

impl Default for AdvancedInput {
    fn default() -> Self {
        Self {
            tie_out_slope_left: 3.0,
            tie_out_slope_right: 3.0,
            height_multiplier_left: 1.0,
            height_multiplier_right: 1.0,
            side_slope_multiplier_left: 1.0,
            side_slope_multiplier_right: 1.0,
            bed_slope_multiplier_left: 1.0,
            bed_slope_multiplier_right: 1.0,
            x_datum: 0.0,
            y_datum: 0.0,
        }
    }
}
