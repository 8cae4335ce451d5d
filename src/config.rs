//! Fixed rendering constants and the parameters the control panel owns.

use clap::ValueEnum;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 500.0;

pub const NODE_RADIUS: f32 = 5.0;
pub const NODE_STROKE_WIDTH: f32 = 2.0;

pub const LINK_STROKE_WIDTH: f32 = 3.0;
pub const LINK_SELECTED_STROKE_WIDTH: f32 = 6.0;

/// Nominal arrowhead tail lengths along and across the link.
pub const TAIL_LENGTH_X: f32 = 15.0;
pub const TAIL_LENGTH_Y: f32 = 5.0;
/// A tail never exceeds `link length / proportion`.
pub const MAX_TAIL_PROPORTION_X: f32 = 4.0;
pub const MAX_TAIL_PROPORTION_Y: f32 = 12.0;

pub const TEXT_SIZE: f32 = 12.0;
/// Vertical gap between a node and its label.
pub const TEXT_MARGIN: f32 = 10.0;

/// Cursor distance under which an element counts as hovered.
pub const TRIGGER_DISTANCE: f32 = 10.0;

pub const DEFAULT_THRESHOLD: u32 = 75;
pub const DEFAULT_SCALE: f32 = 300.0;
pub const DEFAULT_SHIFT: f32 = 0.0;

pub const THRESHOLD_RANGE: std::ops::RangeInclusive<u32> = 0..=100;
pub const SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=500.0;
pub const SHIFT_RANGE: std::ops::RangeInclusive<f32> = 0.0..=400.0;

/// Which weight normalization feeds the link distances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NormalizationMode {
    /// Divide by the maximum possible weight.
    #[default]
    None,
    /// Divide by the heaviest link in the graph.
    Max,
    /// Collapse links into two distance tiers around the threshold.
    Collapsing,
}

impl NormalizationMode {
    pub const ALL: [Self; 3] = [Self::None, Self::Max, Self::Collapsing];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "disabled",
            Self::Max => "max",
            Self::Collapsing => "collapsing",
        }
    }
}

/// Values read from the control panel at the start of every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveParameters {
    pub threshold: u32,
    pub scale: f32,
    pub shift: f32,
    pub normalization: NormalizationMode,
    pub direction_enabled: bool,
    pub isolated_nodes_visible: bool,
}

impl Default for LiveParameters {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scale: DEFAULT_SCALE,
            shift: DEFAULT_SHIFT,
            normalization: NormalizationMode::None,
            direction_enabled: false,
            isolated_nodes_visible: true,
        }
    }
}
