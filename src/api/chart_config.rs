use serde::{Deserialize, Serialize};

use crate::core::{AxisDefaults, DateStepThresholds, RectF, ScaleDefaults};
use crate::error::{ChartError, ChartResult};

/// Pane-level layout tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneDefaults {
    /// Margins around the chart area, in points.
    #[serde(default = "default_margin")]
    pub margin_left: f64,
    #[serde(default = "default_margin")]
    pub margin_right: f64,
    #[serde(default = "default_margin")]
    pub margin_top: f64,
    #[serde(default = "default_margin")]
    pub margin_bottom: f64,
    /// Reference pane size, in inches, at which fonts render unscaled.
    #[serde(default = "default_base_dimension")]
    pub base_dimension: f64,
    #[serde(default = "default_true")]
    pub is_font_scaled: bool,
    /// Leading zero-valued points do not widen the auto range.
    #[serde(default)]
    pub is_ignore_initial: bool,
    /// Only points inside the manual bounds of the other axis contribute to
    /// auto ranges.
    #[serde(default)]
    pub is_bounded_ranges: bool,
    /// Fraction of the base range used as cluster width when the data has no
    /// usable step.
    #[serde(default = "default_degenerate_step_fraction")]
    pub degenerate_step_fraction: f64,
}

impl Default for PaneDefaults {
    fn default() -> Self {
        Self {
            margin_left: default_margin(),
            margin_right: default_margin(),
            margin_top: default_margin(),
            margin_bottom: default_margin(),
            base_dimension: default_base_dimension(),
            is_font_scaled: true,
            is_ignore_initial: false,
            is_bounded_ranges: false,
            degenerate_step_fraction: default_degenerate_step_fraction(),
        }
    }
}

impl PaneDefaults {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "pane `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.base_dimension.is_finite() || self.base_dimension <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "pane `base_dimension` must be finite and > 0".to_owned(),
            ));
        }
        if !self.degenerate_step_fraction.is_finite()
            || self.degenerate_step_fraction <= 0.0
            || self.degenerate_step_fraction > 1.0
        {
            return Err(ChartError::InvalidConfig(
                "pane `degenerate_step_fraction` must be in (0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Bootstrap configuration of a [`GraphPane`](super::GraphPane).
///
/// Serializable so hosts can keep chart setup in JSON files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub pane_rect: RectF,
    #[serde(default)]
    pub scale: ScaleDefaults,
    #[serde(default)]
    pub axis: AxisDefaults,
    #[serde(default)]
    pub date_steps: DateStepThresholds,
    #[serde(default)]
    pub pane: PaneDefaults,
}

impl ChartConfig {
    #[must_use]
    pub fn new(pane_rect: RectF) -> Self {
        Self {
            pane_rect,
            scale: ScaleDefaults::default(),
            axis: AxisDefaults::default(),
            date_steps: DateStepThresholds::default(),
            pane: PaneDefaults::default(),
        }
    }

    #[must_use]
    pub fn with_scale_defaults(mut self, scale: ScaleDefaults) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_axis_defaults(mut self, axis: AxisDefaults) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_date_steps(mut self, date_steps: DateStepThresholds) -> Self {
        self.date_steps = date_steps;
        self
    }

    #[must_use]
    pub fn with_pane_defaults(mut self, pane: PaneDefaults) -> Self {
        self.pane = pane;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_pane_rect(self.pane_rect)?;
        self.scale.validate()?;
        self.axis.validate()?;
        self.date_steps.validate()?;
        self.pane.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

pub(super) fn validate_pane_rect(rect: RectF) -> ChartResult<()> {
    let finite = [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|value| value.is_finite());
    if !finite || rect.width < 0.0 || rect.height < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "pane rect must be finite with non-negative size, got {rect:?}"
        )));
    }
    Ok(())
}

fn default_margin() -> f64 {
    10.0
}

fn default_base_dimension() -> f64 {
    8.0
}

fn default_degenerate_step_fraction() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}
