//! Value-domain model of one axis: bounds, steps, auto-ranging, tic
//! arithmetic and label formatting for every supported scale type.

mod coordinate_space;
mod date;
mod exponent;
mod labels;
mod linear;
mod log;
mod ordinal;
mod text;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::defaults::{DateStepThresholds, ScaleDefaults};
use crate::core::font::{FontSpec, TextMeasurer};
use crate::core::types::{PointList, is_missing_or_non_finite};
use crate::error::{ChartError, ChartResult};

pub use coordinate_space::{Linearization, ScaleCoordinateSpace};
pub use date::{DateUnit, DateUnits};
pub(crate) use log::log_ladder_tics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    Linear,
    Log,
    Exponent,
    Date,
    Ordinal,
    Text,
    LinearAsOrdinal,
    DateAsOrdinal,
}

impl ScaleType {
    /// Scales that place points by their sequence index.
    #[must_use]
    pub fn is_any_ordinal(self) -> bool {
        matches!(
            self,
            Self::Ordinal | Self::Text | Self::LinearAsOrdinal | Self::DateAsOrdinal
        )
    }

    #[must_use]
    pub fn is_log(self) -> bool {
        self == Self::Log
    }

    #[must_use]
    pub fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateAsOrdinal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
enum ScaleVariant {
    Linear,
    Log,
    Exponent { exponent: f64 },
    Date { units: DateUnits },
    Ordinal,
    Text { labels: Vec<String> },
    LinearAsOrdinal,
    DateAsOrdinal { units: DateUnits },
}

impl ScaleVariant {
    fn for_type(scale_type: ScaleType) -> Self {
        match scale_type {
            ScaleType::Linear => Self::Linear,
            ScaleType::Log => Self::Log,
            ScaleType::Exponent => Self::Exponent { exponent: 1.0 },
            ScaleType::Date => Self::Date {
                units: DateUnits::default(),
            },
            ScaleType::Ordinal => Self::Ordinal,
            ScaleType::Text => Self::Text { labels: Vec::new() },
            ScaleType::LinearAsOrdinal => Self::LinearAsOrdinal,
            ScaleType::DateAsOrdinal => Self::DateAsOrdinal {
                units: DateUnits::default(),
            },
        }
    }

    fn scale_type(&self) -> ScaleType {
        match self {
            Self::Linear => ScaleType::Linear,
            Self::Log => ScaleType::Log,
            Self::Exponent { .. } => ScaleType::Exponent,
            Self::Date { .. } => ScaleType::Date,
            Self::Ordinal => ScaleType::Ordinal,
            Self::Text { .. } => ScaleType::Text,
            Self::LinearAsOrdinal => ScaleType::LinearAsOrdinal,
            Self::DateAsOrdinal { .. } => ScaleType::DateAsOrdinal,
        }
    }

    fn linearization(&self) -> Linearization {
        match self {
            Self::Log => Linearization::Log10,
            Self::Exponent { exponent } => Linearization::Power {
                exponent: *exponent,
            },
            _ => Linearization::Identity,
        }
    }
}

/// Inputs shared by auto-ranging and label measurement.
#[derive(Clone, Copy)]
pub struct ScaleContext<'a> {
    pub defaults: &'a ScaleDefaults,
    pub date_steps: &'a DateStepThresholds,
    pub measurer: &'a dyn TextMeasurer,
    pub scale_factor: f64,
    /// Pixel length available along the axis, used to bound label counts.
    pub axis_length_px: f64,
    /// Source of label values for `LinearAsOrdinal` and `DateAsOrdinal`.
    pub first_series: Option<&'a dyn PointList>,
}

impl<'a> ScaleContext<'a> {
    #[must_use]
    pub fn new(
        defaults: &'a ScaleDefaults,
        date_steps: &'a DateStepThresholds,
        measurer: &'a dyn TextMeasurer,
        axis_length_px: f64,
    ) -> Self {
        Self {
            defaults,
            date_steps,
            measurer,
            scale_factor: 1.0,
            axis_length_px,
            first_series: None,
        }
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[must_use]
    pub fn with_first_series(mut self, points: Option<&'a dyn PointList>) -> Self {
        self.first_series = points;
        self
    }

    fn target_steps(&self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::Horizontal => self.defaults.target_x_steps,
            AxisOrientation::Vertical => self.defaults.target_y_steps,
        }
    }
}

/// Scale state owned by one axis.
///
/// Bounds and steps each carry an auto flag: auto values are recomputed from
/// the data range on every [`Scale::pick_scale`], manual values stay frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    orientation: AxisOrientation,
    variant: ScaleVariant,
    min: f64,
    max: f64,
    major_step: f64,
    minor_step: f64,
    min_auto: bool,
    max_auto: bool,
    major_step_auto: bool,
    minor_step_auto: bool,
    mag: i32,
    mag_auto: bool,
    format_auto: bool,
    decimals: usize,
    date_format: String,
    min_grace: f64,
    max_grace: f64,
    range_min: f64,
    range_max: f64,
    base_tic: Option<f64>,
    pub is_reverse: bool,
    pub is_labels_inside: bool,
    pub is_skip_first_label: bool,
    pub is_skip_last_label: bool,
    pub is_visible: bool,
    pub is_prevent_label_overlap: bool,
    pub is_use_ten_power: bool,
    pub font_spec: FontSpec,
    /// Gap between tics and labels, as a fraction of the label line height.
    pub label_gap: f64,
}

impl Scale {
    #[must_use]
    pub fn new(scale_type: ScaleType, orientation: AxisOrientation, defaults: &ScaleDefaults) -> Self {
        let angle = match orientation {
            AxisOrientation::Horizontal => 0.0,
            AxisOrientation::Vertical => 90.0,
        };
        Self {
            orientation,
            variant: ScaleVariant::for_type(scale_type),
            min: 0.0,
            max: 1.0,
            major_step: 0.1,
            minor_step: 0.1,
            min_auto: true,
            max_auto: true,
            major_step_auto: true,
            minor_step_auto: true,
            mag: 0,
            mag_auto: true,
            format_auto: true,
            decimals: 0,
            date_format: String::new(),
            min_grace: defaults.min_grace,
            max_grace: defaults.max_grace,
            range_min: 0.0,
            range_max: 1.0,
            base_tic: None,
            is_reverse: false,
            is_labels_inside: false,
            is_skip_first_label: false,
            is_skip_last_label: false,
            is_visible: true,
            is_prevent_label_overlap: defaults.is_prevent_label_overlap,
            is_use_ten_power: defaults.is_use_ten_power,
            font_spec: FontSpec::new(defaults.font_size, angle),
            label_gap: defaults.label_gap,
        }
    }

    /// Rebuilds this scale as `scale_type`.
    ///
    /// Bounds, steps, auto flags and presentation flags carry over; the
    /// type-specific state (exponent, date units, text labels, label format)
    /// starts fresh.
    #[must_use]
    pub fn with_type(&self, scale_type: ScaleType) -> Self {
        let mut rebuilt = self.clone();
        rebuilt.variant = ScaleVariant::for_type(scale_type);
        rebuilt.format_auto = true;
        rebuilt.date_format.clear();
        rebuilt
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.variant.scale_type()
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn is_any_ordinal(&self) -> bool {
        self.scale_type().is_any_ordinal()
    }

    #[must_use]
    pub fn is_log(&self) -> bool {
        self.scale_type().is_log()
    }

    #[must_use]
    pub fn linearization(&self) -> Linearization {
        self.variant.linearization()
    }

    #[must_use]
    pub fn linearize(&self, value: f64) -> f64 {
        self.linearization().linearize(value)
    }

    #[must_use]
    pub fn delinearize(&self, value: f64) -> f64 {
        self.linearization().delinearize(value)
    }

    /// Whether `value` can be placed on this scale during auto-ranging.
    #[must_use]
    pub fn is_domain_valid(&self, value: f64) -> bool {
        !is_missing_or_non_finite(value) && !(self.is_log() && value <= 0.0)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn major_step(&self) -> f64 {
        self.major_step
    }

    #[must_use]
    pub fn minor_step(&self) -> f64 {
        self.minor_step
    }

    #[must_use]
    pub fn is_min_auto(&self) -> bool {
        self.min_auto
    }

    #[must_use]
    pub fn is_max_auto(&self) -> bool {
        self.max_auto
    }

    #[must_use]
    pub fn is_major_step_auto(&self) -> bool {
        self.major_step_auto
    }

    #[must_use]
    pub fn is_minor_step_auto(&self) -> bool {
        self.minor_step_auto
    }

    #[must_use]
    pub fn mag(&self) -> i32 {
        self.mag
    }

    #[must_use]
    pub fn is_mag_auto(&self) -> bool {
        self.mag_auto
    }

    #[must_use]
    pub fn is_format_auto(&self) -> bool {
        self.format_auto
    }

    /// Decimal places used for numeric labels.
    #[must_use]
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// `chrono` format string used for date labels.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    #[must_use]
    pub fn min_grace(&self) -> f64 {
        self.min_grace
    }

    #[must_use]
    pub fn max_grace(&self) -> f64 {
        self.max_grace
    }

    #[must_use]
    pub fn base_tic(&self) -> Option<f64> {
        self.base_tic
    }

    /// Data range recorded by the last pane scan.
    #[must_use]
    pub fn data_range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    #[must_use]
    pub fn exponent(&self) -> Option<f64> {
        match self.variant {
            ScaleVariant::Exponent { exponent } => Some(exponent),
            _ => None,
        }
    }

    #[must_use]
    pub fn date_units(&self) -> Option<DateUnits> {
        match self.variant {
            ScaleVariant::Date { units } | ScaleVariant::DateAsOrdinal { units } => Some(units),
            _ => None,
        }
    }

    #[must_use]
    pub fn text_labels(&self) -> Option<&[String]> {
        match &self.variant {
            ScaleVariant::Text { labels } => Some(labels),
            _ => None,
        }
    }

    pub fn set_min(&mut self, min: f64) -> ChartResult<()> {
        self.min = finite("scale min", min)?;
        self.min_auto = false;
        Ok(())
    }

    pub fn set_max(&mut self, max: f64) -> ChartResult<()> {
        self.max = finite("scale max", max)?;
        self.max_auto = false;
        Ok(())
    }

    pub fn set_major_step(&mut self, step: f64) -> ChartResult<()> {
        self.major_step = positive("major step", step)?;
        self.major_step_auto = false;
        Ok(())
    }

    pub fn set_minor_step(&mut self, step: f64) -> ChartResult<()> {
        self.minor_step = positive("minor step", step)?;
        self.minor_step_auto = false;
        Ok(())
    }

    pub fn set_min_auto(&mut self, auto: bool) {
        self.min_auto = auto;
    }

    pub fn set_max_auto(&mut self, auto: bool) {
        self.max_auto = auto;
    }

    pub fn set_major_step_auto(&mut self, auto: bool) {
        self.major_step_auto = auto;
    }

    pub fn set_minor_step_auto(&mut self, auto: bool) {
        self.minor_step_auto = auto;
    }

    pub fn set_mag(&mut self, mag: i32) {
        self.mag = mag;
        self.mag_auto = false;
    }

    pub fn set_mag_auto(&mut self, auto: bool) {
        self.mag_auto = auto;
    }

    pub fn set_decimals(&mut self, decimals: usize) {
        self.decimals = decimals;
        self.format_auto = false;
    }

    pub fn set_date_format(&mut self, format: impl Into<String>) {
        self.date_format = format.into();
        self.format_auto = false;
    }

    pub fn set_format_auto(&mut self, auto: bool) {
        self.format_auto = auto;
    }

    pub fn set_min_grace(&mut self, grace: f64) -> ChartResult<()> {
        self.min_grace = non_negative("min grace", grace)?;
        Ok(())
    }

    pub fn set_max_grace(&mut self, grace: f64) -> ChartResult<()> {
        self.max_grace = non_negative("max grace", grace)?;
        Ok(())
    }

    pub fn set_base_tic(&mut self, base_tic: Option<f64>) -> ChartResult<()> {
        if let Some(value) = base_tic {
            finite("base tic", value)?;
        }
        self.base_tic = base_tic;
        Ok(())
    }

    pub fn set_text_labels(&mut self, values: Vec<String>) -> ChartResult<()> {
        let scale_type = self.scale_type();
        match &mut self.variant {
            ScaleVariant::Text { labels } => {
                *labels = values;
                Ok(())
            }
            _ => Err(ChartError::InvalidData(format!(
                "text labels are only used by text scales, not {scale_type:?}"
            ))),
        }
    }

    /// Sets the calendar units used for manual date steps.
    pub fn set_date_units(&mut self, major: DateUnit, minor: DateUnit) -> ChartResult<()> {
        let scale_type = self.scale_type();
        match &mut self.variant {
            ScaleVariant::Date { units } | ScaleVariant::DateAsOrdinal { units } => {
                *units = DateUnits { major, minor };
                Ok(())
            }
            _ => Err(ChartError::InvalidData(format!(
                "date units are only used by date scales, not {scale_type:?}"
            ))),
        }
    }

    pub(crate) fn set_data_range(&mut self, min: f64, max: f64) {
        self.range_min = min;
        self.range_max = max;
    }

    /// Returns bounds, steps, magnitude and format to automatic mode.
    pub fn restore_auto(&mut self) {
        self.min_auto = true;
        self.max_auto = true;
        self.major_step_auto = true;
        self.minor_step_auto = true;
        self.mag_auto = true;
        self.format_auto = true;
    }

    /// Snapshot of the current bounds against `[min_pix, max_pix]`.
    ///
    /// Horizontal scales grow from `min_pix` towards `max_pix`, vertical
    /// scales from `max_pix` towards `min_pix` (screen y grows downwards);
    /// `is_reverse` flips either direction.
    #[must_use]
    pub fn coordinate_space(&self, min_pix: f64, max_pix: f64) -> ScaleCoordinateSpace {
        let horizontal = self.orientation == AxisOrientation::Horizontal;
        ScaleCoordinateSpace::new(
            self.linearize(self.min),
            self.linearize(self.max),
            min_pix,
            max_pix,
            self.is_reverse == horizontal,
            self.linearization(),
            self.is_any_ordinal(),
        )
    }

    /// Recomputes every auto value from the recorded data range.
    pub fn pick_scale(&mut self, ctx: &ScaleContext<'_>) {
        self.pick_common();

        match self.scale_type() {
            ScaleType::Linear | ScaleType::Exponent => self.pick_linear(ctx),
            ScaleType::Log => self.pick_log(ctx),
            ScaleType::Date => self.pick_date(ctx),
            ScaleType::Ordinal | ScaleType::LinearAsOrdinal => self.pick_ordinal(ctx),
            ScaleType::DateAsOrdinal => {
                self.pick_date_as_ordinal_format(ctx);
                self.pick_ordinal(ctx);
            }
            ScaleType::Text => self.pick_text(ctx),
        }

        trace!(
            scale_type = ?self.scale_type(),
            min = self.min,
            max = self.max,
            major_step = self.major_step,
            minor_step = self.minor_step,
            mag = self.mag,
            "scale picked"
        );
    }

    /// Range handling shared by every scale type: sanitised data bounds,
    /// grace padding and repair of empty or inverted ranges.
    fn pick_common(&mut self) {
        let data_min = if is_missing_or_non_finite(self.range_min) {
            0.0
        } else {
            self.range_min
        };
        let data_max = if is_missing_or_non_finite(self.range_max) {
            0.0
        } else {
            self.range_max
        };
        let range = data_max - data_min;
        let numeric = !self.is_any_ordinal();

        if self.min_auto {
            let padded = data_min - self.min_grace * range;
            self.min = if numeric && (data_min < 0.0 || padded >= 0.0) {
                padded
            } else {
                data_min
            };
        }
        if self.max_auto {
            let padded = data_max + self.max_grace * range;
            self.max = if numeric && (data_max > 0.0 || padded <= 0.0) {
                padded
            } else {
                data_max
            };
        }

        if self.min_auto && self.max_auto && self.max == self.min {
            if self.max.abs() > 1.0e-100 {
                let (low, high) = if self.min < 0.0 { (1.05, 0.95) } else { (0.95, 1.05) };
                self.max *= high;
                self.min *= low;
            } else {
                self.max = 1.0;
                self.min = -1.0;
            }
        }

        if self.max <= self.min {
            if self.max_auto {
                self.max = self.min + 1.0;
            } else if self.min_auto {
                self.min = self.max - 1.0;
            }
        }
    }

    /// Whether minor tics are drawn between majors.
    #[must_use]
    pub fn has_minor_tics(&self) -> bool {
        if self.is_log() {
            return true;
        }
        let (major_unit, minor_unit) = match self.date_units() {
            Some(units) if self.scale_type() == ScaleType::Date => {
                (units.major.days(), units.minor.days())
            }
            _ => (1.0, 1.0),
        };
        self.minor_step * minor_unit < self.major_step * major_unit
    }

    /// First major tic, in tic space.
    ///
    /// Tic space is the decade exponent for log scales and the data value
    /// for every other type.
    pub(crate) fn calc_base_tic(&self) -> f64 {
        if let Some(base_tic) = self.base_tic {
            return base_tic;
        }
        match self.scale_type() {
            ScaleType::Log => self.log_base_tic(),
            ScaleType::Date => self.date_base_tic(),
            ScaleType::Ordinal
            | ScaleType::Text
            | ScaleType::LinearAsOrdinal
            | ScaleType::DateAsOrdinal => 1.0,
            ScaleType::Linear | ScaleType::Exponent => self.linear_base_tic(),
        }
    }

    pub(crate) fn calc_major_tic_value(&self, base: f64, index: f64) -> f64 {
        match self.scale_type() {
            ScaleType::Date => self.date_major_tic_value(base, index),
            _ => base + index * self.major_step,
        }
    }

    pub(crate) fn calc_minor_tic_value(&self, base: f64, index: i64) -> f64 {
        match self.scale_type() {
            ScaleType::Log => log::log_minor_tic_value(base, index),
            ScaleType::Date => self.date_minor_tic_value(base, index),
            _ => base + index as f64 * self.minor_step,
        }
    }

    pub(crate) fn calc_minor_start(&self, base: f64) -> i64 {
        match self.scale_type() {
            ScaleType::Log => log::LOG_MINOR_START,
            ScaleType::Date => self.date_minor_start(base),
            _ => ((self.min - base) / self.minor_step) as i64,
        }
    }

    /// Number of major tics, bounded to `1..=max_tics`.
    pub(crate) fn calc_num_tics(&self, max_tics: usize) -> usize {
        let raw = match self.scale_type() {
            ScaleType::Log => self.log_num_tics(),
            ScaleType::Date => self.date_num_tics(),
            _ => ((self.max - self.min) / self.major_step + 0.01) as i64 + 1,
        };
        usize::try_from(raw).unwrap_or(0).clamp(1, max_tics.max(1))
    }

    /// Scale bounds expressed in tic space.
    pub(crate) fn tic_bounds(&self) -> (f64, f64) {
        if self.is_log() {
            (self.linearize(self.min), self.linearize(self.max))
        } else {
            (self.min, self.max)
        }
    }

    pub(crate) fn tic_to_value(&self, tic: f64) -> f64 {
        if self.is_log() {
            self.delinearize(tic)
        } else {
            tic
        }
    }
}

fn finite(name: &str, value: f64) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!("{name} must be finite")))
    }
}

fn positive(name: &str, value: f64) -> ChartResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> ChartResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AxisOrientation, Scale, ScaleType};
    use crate::core::defaults::ScaleDefaults;

    fn scale(scale_type: ScaleType) -> Scale {
        Scale::new(scale_type, AxisOrientation::Horizontal, &ScaleDefaults::default())
    }

    #[test]
    fn setters_clear_auto_flags() {
        let mut scale = scale(ScaleType::Linear);
        scale.set_min(2.0).expect("min");
        scale.set_major_step(0.5).expect("step");
        assert!(!scale.is_min_auto());
        assert!(scale.is_max_auto());
        assert!(!scale.is_major_step_auto());
        scale.restore_auto();
        assert!(scale.is_min_auto());
        assert!(scale.is_major_step_auto());
    }

    #[test]
    fn invalid_setter_values_are_rejected() {
        let mut scale = scale(ScaleType::Linear);
        assert!(scale.set_min(f64::NAN).is_err());
        assert!(scale.set_major_step(0.0).is_err());
        assert!(scale.set_min_grace(-1.0).is_err());
        assert!(scale.set_exponent(2.0).is_err());
        assert!(scale.is_min_auto());
    }

    #[test]
    fn type_swap_keeps_common_fields_only() {
        let mut linear = scale(ScaleType::Linear);
        linear.set_max(50.0).expect("max");
        linear.is_reverse = true;
        linear.set_decimals(3);

        let exponent = linear.with_type(ScaleType::Exponent);
        assert_eq!(exponent.scale_type(), ScaleType::Exponent);
        assert_eq!(exponent.max(), 50.0);
        assert!(!exponent.is_max_auto());
        assert!(exponent.is_reverse);
        assert!(exponent.is_format_auto());
        assert_eq!(exponent.exponent(), Some(1.0));
    }

    #[test]
    fn vertical_space_puts_minimum_at_bottom() {
        let mut scale = Scale::new(
            ScaleType::Linear,
            AxisOrientation::Vertical,
            &ScaleDefaults::default(),
        );
        scale.set_min(0.0).expect("min");
        scale.set_max(10.0).expect("max");
        let space = scale.coordinate_space(100.0, 300.0);
        assert_relative_eq!(space.transform(0.0), 300.0);
        assert_relative_eq!(space.transform(10.0), 100.0);

        scale.is_reverse = true;
        let reversed = scale.coordinate_space(100.0, 300.0);
        assert_relative_eq!(reversed.transform(0.0), 100.0);
    }
}
