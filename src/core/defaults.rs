use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tuning applied when scales are created and auto-ranged.
///
/// Per-scale fields (`min_grace`, `font_size`, ...) seed newly created scales;
/// the remaining fields are read on every pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDefaults {
    #[serde(default = "default_target_steps")]
    pub target_x_steps: f64,
    #[serde(default = "default_target_steps")]
    pub target_y_steps: f64,
    #[serde(default = "default_target_minor_steps")]
    pub target_minor_steps: f64,
    /// When an auto minimum is within this fraction of the range from zero,
    /// zero is used instead.
    #[serde(default = "default_zero_lever")]
    pub zero_lever: f64,
    #[serde(default = "default_grace")]
    pub min_grace: f64,
    #[serde(default = "default_grace")]
    pub max_grace: f64,
    /// Target label count for text scales without overlap measurement.
    #[serde(default = "default_max_text_labels")]
    pub max_text_labels: f64,
    #[serde(default = "default_max_major_tics")]
    pub max_major_tics: usize,
    #[serde(default = "default_minor_tic_iteration_cap")]
    pub minor_tic_iteration_cap: usize,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_label_gap")]
    pub label_gap: f64,
    #[serde(default = "default_true")]
    pub is_prevent_label_overlap: bool,
    #[serde(default = "default_true")]
    pub is_use_ten_power: bool,
}

impl Default for ScaleDefaults {
    fn default() -> Self {
        Self {
            target_x_steps: default_target_steps(),
            target_y_steps: default_target_steps(),
            target_minor_steps: default_target_minor_steps(),
            zero_lever: default_zero_lever(),
            min_grace: default_grace(),
            max_grace: default_grace(),
            max_text_labels: default_max_text_labels(),
            max_major_tics: default_max_major_tics(),
            minor_tic_iteration_cap: default_minor_tic_iteration_cap(),
            font_size: default_font_size(),
            label_gap: default_label_gap(),
            is_prevent_label_overlap: true,
            is_use_ten_power: true,
        }
    }
}

impl ScaleDefaults {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("target_x_steps", self.target_x_steps),
            ("target_y_steps", self.target_y_steps),
            ("target_minor_steps", self.target_minor_steps),
            ("max_text_labels", self.max_text_labels),
            ("font_size", self.font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "scale defaults `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("zero_lever", self.zero_lever),
            ("min_grace", self.min_grace),
            ("max_grace", self.max_grace),
            ("label_gap", self.label_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "scale defaults `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.max_major_tics == 0 || self.minor_tic_iteration_cap == 0 {
            return Err(ChartError::InvalidConfig(
                "scale tic caps must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Range thresholds, in days, that select the date step units.
///
/// A date range greater than `year_year` uses yearly majors and minors, one
/// greater than `year_month` yearly majors with monthly minors, and so on
/// down to second steps below `minute_second`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateStepThresholds {
    #[serde(default = "default_year_year")]
    pub year_year: f64,
    #[serde(default = "default_year_month")]
    pub year_month: f64,
    #[serde(default = "default_month_month")]
    pub month_month: f64,
    #[serde(default = "default_day_day")]
    pub day_day: f64,
    #[serde(default = "default_day_hour")]
    pub day_hour: f64,
    #[serde(default = "default_hour_hour")]
    pub hour_hour: f64,
    #[serde(default = "default_hour_minute")]
    pub hour_minute: f64,
    #[serde(default = "default_minute_minute")]
    pub minute_minute: f64,
    #[serde(default = "default_minute_second")]
    pub minute_second: f64,
}

impl Default for DateStepThresholds {
    fn default() -> Self {
        Self {
            year_year: default_year_year(),
            year_month: default_year_month(),
            month_month: default_month_month(),
            day_day: default_day_day(),
            day_hour: default_day_hour(),
            hour_hour: default_hour_hour(),
            hour_minute: default_hour_minute(),
            minute_minute: default_minute_minute(),
            minute_second: default_minute_second(),
        }
    }
}

impl DateStepThresholds {
    pub fn validate(self) -> ChartResult<Self> {
        let ladder = [
            self.year_year,
            self.year_month,
            self.month_month,
            self.day_day,
            self.day_hour,
            self.hour_hour,
            self.hour_minute,
            self.minute_minute,
            self.minute_second,
        ];
        if ladder.iter().any(|value| !value.is_finite() || *value <= 0.0) {
            return Err(ChartError::InvalidConfig(
                "date step thresholds must be finite and > 0".to_owned(),
            ));
        }
        if ladder.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ChartError::InvalidConfig(
                "date step thresholds must be strictly decreasing".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Defaults applied to newly created axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDefaults {
    #[serde(default = "default_tic_size")]
    pub major_tic_size: f64,
    #[serde(default = "default_minor_tic_size")]
    pub minor_tic_size: f64,
    /// Gap between stacked secondary axes, in points.
    #[serde(default = "default_axis_gap")]
    pub axis_gap: f64,
    #[serde(default = "default_font_size")]
    pub title_font_size: f64,
    #[serde(default = "default_title_gap")]
    pub title_gap: f64,
    #[serde(default)]
    pub min_space: f64,
    #[serde(default)]
    pub is_major_grid_visible: bool,
    #[serde(default)]
    pub is_minor_grid_visible: bool,
}

impl Default for AxisDefaults {
    fn default() -> Self {
        Self {
            major_tic_size: default_tic_size(),
            minor_tic_size: default_minor_tic_size(),
            axis_gap: default_axis_gap(),
            title_font_size: default_font_size(),
            title_gap: default_title_gap(),
            min_space: 0.0,
            is_major_grid_visible: false,
            is_minor_grid_visible: false,
        }
    }
}

impl AxisDefaults {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("major_tic_size", self.major_tic_size),
            ("minor_tic_size", self.minor_tic_size),
            ("axis_gap", self.axis_gap),
            ("title_gap", self.title_gap),
            ("min_space", self.min_space),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis defaults `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.title_font_size.is_finite() || self.title_font_size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis defaults `title_font_size` must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_target_steps() -> f64 {
    7.0
}

fn default_target_minor_steps() -> f64 {
    5.0
}

fn default_zero_lever() -> f64 {
    0.25
}

fn default_grace() -> f64 {
    0.1
}

fn default_max_text_labels() -> f64 {
    12.0
}

fn default_max_major_tics() -> usize {
    1000
}

fn default_minor_tic_iteration_cap() -> usize {
    5000
}

fn default_font_size() -> f64 {
    14.0
}

fn default_label_gap() -> f64 {
    0.3
}

fn default_title_gap() -> f64 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_tic_size() -> f64 {
    5.0
}

fn default_minor_tic_size() -> f64 {
    2.5
}

fn default_axis_gap() -> f64 {
    5.0
}

fn default_year_year() -> f64 {
    1825.0
}

fn default_year_month() -> f64 {
    730.0
}

fn default_month_month() -> f64 {
    300.0
}

fn default_day_day() -> f64 {
    10.0
}

fn default_day_hour() -> f64 {
    3.0
}

fn default_hour_hour() -> f64 {
    0.4167
}

fn default_hour_minute() -> f64 {
    0.125
}

fn default_minute_minute() -> f64 {
    6.94e-3
}

fn default_minute_second() -> f64 {
    2.083e-3
}

#[cfg(test)]
mod tests {
    use super::{AxisDefaults, DateStepThresholds, ScaleDefaults};

    #[test]
    fn built_in_defaults_validate() {
        assert!(ScaleDefaults::default().validate().is_ok());
        assert!(DateStepThresholds::default().validate().is_ok());
        assert!(AxisDefaults::default().validate().is_ok());
    }

    #[test]
    fn unordered_date_thresholds_are_rejected() {
        let thresholds = DateStepThresholds {
            day_day: 500.0,
            ..DateStepThresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn negative_grace_is_rejected() {
        let defaults = ScaleDefaults {
            min_grace: -0.1,
            ..ScaleDefaults::default()
        };
        assert!(defaults.validate().is_err());
    }
}
