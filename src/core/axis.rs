use serde::{Deserialize, Serialize};

use crate::core::defaults::{AxisDefaults, ScaleDefaults};
use crate::core::font::FontSpec;
use crate::core::scale::{AxisOrientation, Scale, ScaleContext, ScaleCoordinateSpace, ScaleType};
use crate::core::tics::{GridStyle, TicStyle};
use crate::core::types::RectF;
use crate::error::{ChartError, ChartResult};

/// Position class of an axis around the chart rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    /// Bottom.
    X,
    /// Top.
    X2,
    /// Left.
    Y,
    /// Right.
    Y2,
}

impl AxisKind {
    #[must_use]
    pub fn orientation(self) -> AxisOrientation {
        match self {
            Self::X | Self::X2 => AxisOrientation::Horizontal,
            Self::Y | Self::Y2 => AxisOrientation::Vertical,
        }
    }

    /// X2 and Y2 sit on the far edge of their cross axis.
    #[must_use]
    pub fn is_secondary(self) -> bool {
        matches!(self, Self::X2 | Self::Y2)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::X2 => "x2",
            Self::Y => "y",
            Self::Y2 => "y2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub text: String,
    pub font_spec: FontSpec,
    pub is_visible: bool,
    /// Gap between labels and title, as a fraction of the label line height.
    pub gap: f64,
    /// Suppresses the ` (10^mag)` suffix.
    pub is_omit_mag: bool,
}

/// Pixel room an axis needs outside the chart rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSpace {
    /// Total reserved space, at least the axis minimum.
    pub space: f64,
    /// Part of `space` that stays reserved when the axis is shifted into the
    /// chart rect by a cross value (title and outside tics).
    pub fixed_space: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    kind: AxisKind,
    scale: Scale,
    cross: f64,
    cross_auto: bool,
    pub min_space: f64,
    pub is_visible: bool,
    pub is_axis_segment_visible: bool,
    pub title: AxisTitle,
    pub major_tic: TicStyle,
    pub minor_tic: TicStyle,
    pub major_grid: GridStyle,
    pub minor_grid: GridStyle,
    /// Gap between stacked axes of the same kind, in points.
    pub axis_gap: f64,
    /// Space granted by the last chart-rect layout.
    pub(crate) reserved_space: f64,
}

impl Axis {
    /// New axis with a linear scale.
    #[must_use]
    pub fn new(
        kind: AxisKind,
        title: impl Into<String>,
        scale_defaults: &ScaleDefaults,
        axis_defaults: &AxisDefaults,
    ) -> Self {
        Self {
            kind,
            scale: Scale::new(ScaleType::Linear, kind.orientation(), scale_defaults),
            cross: 0.0,
            cross_auto: true,
            min_space: axis_defaults.min_space,
            is_visible: true,
            is_axis_segment_visible: true,
            title: AxisTitle {
                text: title.into(),
                font_spec: FontSpec::new(axis_defaults.title_font_size, 0.0),
                is_visible: true,
                gap: axis_defaults.title_gap,
                is_omit_mag: false,
            },
            major_tic: TicStyle::new(axis_defaults.major_tic_size),
            minor_tic: TicStyle::new(axis_defaults.minor_tic_size),
            major_grid: GridStyle {
                is_visible: axis_defaults.is_major_grid_visible,
                is_zero_line: false,
            },
            minor_grid: GridStyle {
                is_visible: axis_defaults.is_minor_grid_visible,
                is_zero_line: false,
            },
            axis_gap: axis_defaults.axis_gap,
            reserved_space: 0.0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut Scale {
        &mut self.scale
    }

    /// Replaces the scale with one of `scale_type`, keeping common settings.
    pub fn set_scale_type(&mut self, scale_type: ScaleType) {
        if self.scale.scale_type() != scale_type {
            self.scale = self.scale.with_type(scale_type);
        }
    }

    #[must_use]
    pub fn cross(&self) -> f64 {
        self.cross
    }

    #[must_use]
    pub fn is_cross_auto(&self) -> bool {
        self.cross_auto
    }

    /// Places the axis at `value` on its cross axis.
    pub fn set_cross(&mut self, value: f64) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "axis cross value must be finite".to_owned(),
            ));
        }
        self.cross = value;
        self.cross_auto = false;
        Ok(())
    }

    pub fn set_cross_auto(&mut self, auto: bool) {
        self.cross_auto = auto;
    }

    /// Space granted to this axis by the last chart-rect layout.
    #[must_use]
    pub fn reserved_space(&self) -> f64 {
        self.reserved_space
    }

    /// Returns the scale and the cross position to automatic mode.
    pub fn restore_auto_scale(&mut self) {
        self.scale.restore_auto();
        self.cross_auto = true;
    }

    /// Title text with the magnitude suffix, empty when nothing is shown.
    #[must_use]
    pub fn make_title(&self) -> String {
        if self.title.text.is_empty() {
            return String::new();
        }
        let mag = self.scale.mag();
        if mag != 0 && !self.title.is_omit_mag && !self.scale.is_log() {
            format!("{} (10^{mag})", self.title.text)
        } else {
            self.title.text.clone()
        }
    }

    /// Room needed outside the chart rect for tics, labels and title.
    ///
    /// `x_axis` is consulted by primary Y and Y2 axes, which keep room for
    /// half of the widest X label at their corner of the chart rect.
    #[must_use]
    pub fn calc_space(
        &self,
        ctx: &ScaleContext<'_>,
        is_primary: bool,
        x_axis: Option<&Axis>,
    ) -> AxisSpace {
        let scale_factor = ctx.scale_factor;
        let char_height = self.scale.font_spec.height(ctx.measurer, scale_factor);
        let tic_size = self.major_tic.scaled_size(scale_factor);
        let mut space = 0.0;
        let mut fixed_space = 0.0;

        if self.is_visible {
            let has_outside_tic = self.major_tic.is_any_outside() || self.minor_tic.is_any_outside();
            if has_outside_tic {
                space += tic_size;
            }
            if !is_primary {
                space += self.axis_gap * scale_factor;
                if self.major_tic.is_any_inside() {
                    space += tic_size;
                }
            }

            if self.scale.is_visible && !(is_primary && self.scale.is_labels_inside) {
                space += self.scale.max_label_space(ctx, true).height
                    + char_height * self.scale.label_gap;
            }

            let title = self.make_title();
            if self.title.is_visible && !title.is_empty() {
                fixed_space = self
                    .title
                    .font_spec
                    .bounding_box(ctx.measurer, &title, scale_factor)
                    .height
                    + char_height * self.title.gap;
                space += fixed_space;
            }
            if has_outside_tic {
                fixed_space += tic_size;
            }
        }

        let corner_axis =
            x_axis.filter(|x_axis| is_primary && x_axis.shows_corner_label(self.kind));
        if let Some(x_axis) = corner_axis {
            let half_label = x_axis.scale.max_label_space(ctx, true).width / 2.0;
            fixed_space = fixed_space.max(half_label);
        }

        AxisSpace {
            space: space.max(self.min_space * scale_factor),
            fixed_space,
        }
    }

    /// Whether an edge label of this X axis lands at the corner of `side`.
    fn shows_corner_label(&self, side: AxisKind) -> bool {
        let scale = &self.scale;
        if !self.is_visible || !scale.is_visible {
            return false;
        }
        match side {
            AxisKind::Y => {
                (!scale.is_skip_first_label && !scale.is_reverse)
                    || (!scale.is_skip_last_label && scale.is_reverse)
            }
            AxisKind::Y2 => {
                (!scale.is_skip_last_label && !scale.is_reverse)
                    || (!scale.is_skip_first_label && scale.is_reverse)
            }
            AxisKind::X | AxisKind::X2 => false,
        }
    }

    /// Whether the default edge of this axis is the linear maximum of its
    /// cross axis.
    fn sits_at_cross_max(&self, cross_axis: &Axis) -> bool {
        cross_axis.scale.is_reverse != self.kind.is_secondary()
    }

    /// Position of this axis on its cross axis, in the cross axis's
    /// linearised units.
    #[must_use]
    pub fn effective_cross_value(&self, cross_axis: &Axis) -> f64 {
        let cross_scale = &cross_axis.scale;
        let min = cross_scale.linearize(cross_scale.min());
        let max = cross_scale.linearize(cross_scale.max());

        if self.cross_auto {
            return if self.sits_at_cross_max(cross_axis) { max } else { min };
        }
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        cross_scale.linearize(self.cross).clamp(low, high)
    }

    /// Whether a manual cross value moves the axis off its default edge.
    #[must_use]
    pub fn is_cross_shifted(&self, cross_axis: &Axis) -> bool {
        if self.cross_auto {
            return false;
        }
        let cross_scale = &cross_axis.scale;
        if self.sits_at_cross_max(cross_axis) {
            self.cross < cross_scale.max()
        } else {
            self.cross > cross_scale.min()
        }
    }

    /// Fraction of the cross axis extent covering this axis's label side.
    ///
    /// Used to estimate how much of the label space already falls inside the
    /// chart rect when the axis is shifted.
    #[must_use]
    pub fn calc_cross_fraction(&self, cross_axis: &Axis, is_primary: bool) -> f64 {
        if !self.is_cross_shifted(cross_axis) {
            return if is_primary && self.scale.is_labels_inside {
                1.0
            } else {
                0.0
            };
        }

        let cross_scale = &cross_axis.scale;
        let min = cross_scale.linearize(cross_scale.min());
        let max = cross_scale.linearize(cross_scale.max());
        let span = max - min;
        if span.abs() <= 1.0e-100 {
            return 0.0;
        }
        let effective = self.effective_cross_value(cross_axis);
        let from_min =
            (self.scale.is_labels_inside == cross_scale.is_reverse) != self.kind.is_secondary();
        let fraction = if from_min {
            (effective - min) / span
        } else {
            (max - effective) / span
        };
        fraction.clamp(0.0, 1.0)
    }

    /// Pixel distance from the default chart-rect edge to the cross
    /// position, positive towards the inside of the chart rect.
    #[must_use]
    pub fn calc_cross_shift(
        &self,
        cross_axis: &Axis,
        cross_space: &ScaleCoordinateSpace,
        chart_rect: RectF,
    ) -> f64 {
        if !self.is_cross_shifted(cross_axis) {
            return 0.0;
        }
        let pixel = cross_space.local_transform(self.effective_cross_value(cross_axis));
        match self.kind {
            AxisKind::X => chart_rect.bottom() - pixel,
            AxisKind::X2 => pixel - chart_rect.top(),
            AxisKind::Y => pixel - chart_rect.left(),
            AxisKind::Y2 => chart_rect.right() - pixel,
        }
    }

    /// Final offset of the axis line from its default edge.
    ///
    /// Secondary axes that are not cross-shifted are stacked outwards by
    /// `stacked_space`, the room reserved by the axes drawn before them.
    #[must_use]
    pub fn calc_total_shift(
        &self,
        cross_axis: &Axis,
        cross_space: &ScaleCoordinateSpace,
        chart_rect: RectF,
        is_primary: bool,
        stacked_space: f64,
    ) -> f64 {
        let cross_shift = self.calc_cross_shift(cross_axis, cross_space, chart_rect);
        if is_primary || self.is_cross_shifted(cross_axis) {
            cross_shift
        } else {
            cross_shift - stacked_space
        }
    }

    /// Snapshot of the scale along the matching side of `chart_rect`.
    #[must_use]
    pub fn coordinate_space(&self, chart_rect: RectF) -> ScaleCoordinateSpace {
        match self.kind.orientation() {
            AxisOrientation::Horizontal => {
                self.scale
                    .coordinate_space(chart_rect.left(), chart_rect.right())
            }
            AxisOrientation::Vertical => {
                self.scale
                    .coordinate_space(chart_rect.top(), chart_rect.bottom())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Axis, AxisKind};
    use crate::core::defaults::{AxisDefaults, DateStepThresholds, ScaleDefaults};
    use crate::core::font::EstimatedTextMeasurer;
    use crate::core::scale::{ScaleContext, ScaleType};
    use crate::core::types::RectF;

    fn axis(kind: AxisKind, min: f64, max: f64) -> Axis {
        let mut axis = Axis::new(
            kind,
            "",
            &ScaleDefaults::default(),
            &AxisDefaults::default(),
        );
        axis.scale_mut().set_min(min).expect("min");
        axis.scale_mut().set_max(max).expect("max");
        axis.scale_mut().set_major_step(10.0).expect("step");
        axis
    }

    #[test]
    fn auto_cross_sits_on_default_edge() {
        let x = axis(AxisKind::X, 0.0, 100.0);
        let y = axis(AxisKind::Y, -5.0, 5.0);
        let y2 = axis(AxisKind::Y2, -5.0, 5.0);
        assert_eq!(x.effective_cross_value(&y), -5.0);
        assert_eq!(y.effective_cross_value(&x), 0.0);
        assert_eq!(y2.effective_cross_value(&x), 100.0);
        assert!(!x.is_cross_shifted(&y));
    }

    #[test]
    fn manual_cross_is_clamped_and_shifts() {
        let mut x = axis(AxisKind::X, 0.0, 100.0);
        let y = axis(AxisKind::Y, -5.0, 5.0);
        x.set_cross(0.0).expect("cross");
        assert!(x.is_cross_shifted(&y));
        assert_relative_eq!(x.calc_cross_fraction(&y, true), 0.5);

        let rect = RectF::new(0.0, 0.0, 200.0, 100.0);
        let space = y.coordinate_space(rect);
        assert_relative_eq!(x.calc_cross_shift(&y, &space, rect), 50.0);

        x.set_cross(50.0).expect("cross");
        assert_eq!(x.effective_cross_value(&y), 5.0);
    }

    #[test]
    fn cross_at_edge_is_not_shifted() {
        let mut y = axis(AxisKind::Y, 0.0, 10.0);
        let x = axis(AxisKind::X, 0.0, 100.0);
        y.set_cross(-20.0).expect("cross");
        assert!(!y.is_cross_shifted(&x));
        assert_eq!(y.calc_cross_fraction(&x, true), 0.0);
    }

    #[test]
    fn title_carries_magnitude_suffix() {
        let mut y = axis(AxisKind::Y, 0.0, 1.0);
        y.title.text = "Flow".to_owned();
        y.scale_mut().set_mag(3);
        assert_eq!(y.make_title(), "Flow (10^3)");
        y.title.is_omit_mag = true;
        assert_eq!(y.make_title(), "Flow");
    }

    #[test]
    fn space_honours_minimum_and_secondary_gap() {
        let defaults = ScaleDefaults::default();
        let steps = DateStepThresholds::default();
        let measurer = EstimatedTextMeasurer;
        let ctx = ScaleContext::new(&defaults, &steps, &measurer, 400.0);

        let mut y = axis(AxisKind::Y, 0.0, 100.0);
        let primary = y.calc_space(&ctx, true, None);
        let secondary = y.calc_space(&ctx, false, None);
        assert!(primary.space > 0.0);
        assert_relative_eq!(secondary.space - primary.space, 5.0);

        y.min_space = 500.0;
        assert_eq!(y.calc_space(&ctx, true, None).space, 500.0);

        y.is_visible = false;
        y.min_space = 0.0;
        assert_eq!(y.calc_space(&ctx, true, None).space, 0.0);
    }

    #[test]
    fn scale_type_swap_keeps_bounds() {
        let mut x = axis(AxisKind::X, 1.0, 1000.0);
        x.set_scale_type(ScaleType::Log);
        assert_eq!(x.scale().scale_type(), ScaleType::Log);
        assert_eq!(x.scale().max(), 1000.0);
        x.restore_auto_scale();
        assert!(x.scale().is_max_auto());
        assert!(x.is_cross_auto());
    }
}
