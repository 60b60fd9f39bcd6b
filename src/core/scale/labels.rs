use crate::core::tics::major_tics;
use crate::core::types::{PointList, TextSize, is_missing_or_non_finite};

use super::date::format_serial_date;
use super::{AxisOrientation, Scale, ScaleContext, ScaleType, ScaleVariant};

impl Scale {
    /// Label text for the major tic at data value `value`.
    ///
    /// `first_series` supplies the values shown by `LinearAsOrdinal` and
    /// `DateAsOrdinal` scales; other types ignore it.
    #[must_use]
    pub fn make_label(&self, value: f64, first_series: Option<&dyn PointList>) -> String {
        match &self.variant {
            ScaleVariant::Linear | ScaleVariant::Exponent { .. } | ScaleVariant::Ordinal => {
                format_fixed(value / 10_f64.powi(self.mag), self.decimals)
            }
            ScaleVariant::Log => {
                let decade = value.log10();
                if self.is_use_ten_power && (decade - decade.round()).abs() < 1.0e-9 {
                    format!("10^{}", decade.round() as i64)
                } else {
                    format_general(value)
                }
            }
            ScaleVariant::Date { .. } => format_serial_date(value, &self.effective_date_format()),
            ScaleVariant::Text { labels } => ordinal_slot(value)
                .and_then(|slot| labels.get(slot))
                .cloned()
                .unwrap_or_default(),
            ScaleVariant::LinearAsOrdinal => self
                .ordinal_source_value(value, first_series)
                .map(format_general)
                .unwrap_or_default(),
            ScaleVariant::DateAsOrdinal { .. } => self
                .ordinal_source_value(value, first_series)
                .map(|serial| format_serial_date(serial, &self.effective_date_format()))
                .unwrap_or_default(),
        }
    }

    /// Largest label box over all major tics.
    ///
    /// With `apply_angle` the boxes are rotated by the scale font angle, so the
    /// height is the extent perpendicular to the axis.
    #[must_use]
    pub fn max_label_space(&self, ctx: &ScaleContext<'_>, apply_angle: bool) -> TextSize {
        major_tics(self, ctx.defaults.max_major_tics)
            .into_iter()
            .map(|value| {
                let label = self.make_label(value, ctx.first_series);
                if apply_angle {
                    self.font_spec
                        .bounding_box(ctx.measurer, &label, ctx.scale_factor)
                } else {
                    self.font_spec
                        .unrotated_box(ctx.measurer, &label, ctx.scale_factor)
                }
            })
            .fold(TextSize::default(), TextSize::max)
    }

    /// How many of the widest labels fit along the axis, at least one.
    #[must_use]
    pub fn calc_max_labels(&self, ctx: &ScaleContext<'_>) -> f64 {
        let width = self.max_label_space(ctx, false).width;
        let width = if width > 0.0 { width } else { 1.0 };
        (ctx.axis_length_px / width).floor().max(1.0)
    }

    fn effective_date_format(&self) -> String {
        if !self.date_format.is_empty() {
            return self.date_format.clone();
        }
        let unit = self.date_units().unwrap_or_default().major;
        unit.default_format().to_owned()
    }

    fn ordinal_source_value(&self, value: f64, points: Option<&dyn PointList>) -> Option<f64> {
        debug_assert!(matches!(
            self.scale_type(),
            ScaleType::LinearAsOrdinal | ScaleType::DateAsOrdinal
        ));
        let point = points?.get(ordinal_slot(value)?)?;
        let coordinate = match self.orientation {
            AxisOrientation::Horizontal => point.x,
            AxisOrientation::Vertical => point.y,
        };
        (!is_missing_or_non_finite(coordinate)).then_some(coordinate)
    }
}

/// Zero-based slot of a 1-based ordinal position.
fn ordinal_slot(value: f64) -> Option<usize> {
    let position = value.round();
    if position >= 1.0 && position.is_finite() {
        usize::try_from(position as i64 - 1).ok()
    } else {
        None
    }
}

/// Fixed-point formatting without a negative sign on zero.
pub(crate) fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|ch| ch == '0' || ch == '.') => unsigned.to_owned(),
        _ => text,
    }
}

/// Shortest representation after rounding to twelve significant digits.
pub(crate) fn format_general(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = format!("{value:.11e}").parse::<f64>().unwrap_or(value);
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::{format_fixed, format_general};
    use crate::core::defaults::ScaleDefaults;
    use crate::core::scale::{AxisOrientation, Scale, ScaleType};
    use crate::core::types::PointPair;

    fn scale(scale_type: ScaleType) -> Scale {
        Scale::new(scale_type, AxisOrientation::Horizontal, &ScaleDefaults::default())
    }

    #[test]
    fn fixed_format_drops_negative_zero() {
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
        assert_eq!(format_fixed(-1.5, 1), "-1.5");
    }

    #[test]
    fn general_format_hides_float_noise() {
        assert_eq!(format_general(0.1 + 0.2), "0.3");
        assert_eq!(format_general(1_000.0), "1000");
    }

    #[test]
    fn numeric_labels_divide_out_magnitude() {
        let mut linear = scale(ScaleType::Linear);
        linear.set_mag(3);
        linear.set_decimals(1);
        assert_eq!(linear.make_label(25_000.0, None), "25.0");
    }

    #[test]
    fn log_labels_use_ten_power_on_decades() {
        let log = scale(ScaleType::Log);
        assert_eq!(log.make_label(1_000.0, None), "10^3");
        assert_eq!(log.make_label(0.01, None), "10^-2");
        assert_eq!(log.make_label(2.0, None), "2");
    }

    #[test]
    fn text_labels_are_one_based() {
        let mut text = scale(ScaleType::Text);
        text.set_text_labels(vec!["a".to_owned(), "b".to_owned()])
            .expect("text scale");
        assert_eq!(text.make_label(1.0, None), "a");
        assert_eq!(text.make_label(2.0, None), "b");
        assert_eq!(text.make_label(3.0, None), "");
        assert_eq!(text.make_label(0.0, None), "");
    }

    #[test]
    fn linear_as_ordinal_reads_first_series() {
        let points = vec![PointPair::new(2.5, 1.0), PointPair::new(7.25, 2.0)];
        let scale = scale(ScaleType::LinearAsOrdinal);
        assert_eq!(scale.make_label(2.0, Some(&points)), "7.25");
        assert_eq!(scale.make_label(3.0, Some(&points)), "");
        assert_eq!(scale.make_label(1.0, None), "");
    }
}
