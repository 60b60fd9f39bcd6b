use tracing::debug;

use crate::core::{Axis, AxisOrientation, AxisSpace, RectF, ScaleContext, TextMeasurer};

use super::{AxisId, GraphPane};

/// Pane aspect ratios beyond this clamp the font scaling length.
const ASPECT_LIMIT: f64 = 1.5;
const POINTS_PER_INCH: f64 = 72.0;
const MIN_SCALE_FACTOR: f64 = 0.1;

/// Space accumulated on the four sides of the chart rect.
#[derive(Debug, Clone, Copy, Default)]
struct SideSpace {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl GraphPane {
    /// Factor applied to fonts, tics and gaps for the current pane size.
    ///
    /// Grows with the pane's shorter dimension relative to
    /// `base_dimension` inches, never below 0.1.
    #[must_use]
    pub fn calc_scale_factor(&self) -> f64 {
        if !self.config.pane.is_font_scaled || self.rect.height <= 0.0 {
            return 1.0;
        }
        let aspect = self.rect.width / self.rect.height;
        let length = if aspect > ASPECT_LIMIT {
            self.rect.height * ASPECT_LIMIT
        } else if aspect < 1.0 / ASPECT_LIMIT {
            self.rect.width * ASPECT_LIMIT
        } else {
            self.rect.width
        };
        (length / (self.config.pane.base_dimension * POINTS_PER_INCH)).max(MIN_SCALE_FACTOR)
    }

    /// Pane rect minus the scaled margins.
    #[must_use]
    pub fn calc_client_rect(&self, scale_factor: f64) -> RectF {
        let pane = self.config.pane;
        let left = pane.margin_left * scale_factor;
        let top = pane.margin_top * scale_factor;
        RectF::new(
            self.rect.x + left,
            self.rect.y + top,
            (self.rect.width - left - pane.margin_right * scale_factor).max(0.0),
            (self.rect.height - top - pane.margin_bottom * scale_factor).max(0.0),
        )
    }

    /// Chart rect left after every axis reserves its space.
    ///
    /// Axes shifted into the chart by a cross value give back the part of
    /// their space that the chart area already covers. Each axis keeps the
    /// space it was granted for the drawing pass.
    pub fn calc_chart_rect(&mut self, measurer: &dyn TextMeasurer, scale_factor: f64) -> RectF {
        let client = self.calc_client_rect(scale_factor);
        let ids = self.axis_ids();

        let mut spaces = Vec::with_capacity(ids.len());
        let mut fixed = SideSpace::default();
        for &id in &ids {
            let space = self.axis_space(id, measurer, scale_factor, client);
            let side = match id {
                AxisId::X => &mut fixed.bottom,
                AxisId::X2 => &mut fixed.top,
                AxisId::Y(_) => &mut fixed.left,
                AxisId::Y2(_) => &mut fixed.right,
            };
            *side = side.max(space.fixed_space);
            spaces.push(space.space);
        }

        let mut sides = SideSpace::default();
        for (&id, &space) in ids.iter().zip(&spaces) {
            let Ok(axis) = self.axis(id) else {
                continue;
            };
            let Ok(cross_axis) = self.axis(id.cross_axis()) else {
                continue;
            };
            let extent = if id.kind().orientation() == AxisOrientation::Horizontal {
                client.height
            } else {
                client.width
            };
            let granted = reduce_for_cross(axis, cross_axis, id.is_primary(), space, extent - space);
            let (norm, alt) = match id {
                AxisId::X => (&mut sides.bottom, &mut sides.top),
                AxisId::X2 => (&mut sides.top, &mut sides.bottom),
                AxisId::Y(_) => (&mut sides.left, &mut sides.right),
                AxisId::Y2(_) => (&mut sides.right, &mut sides.left),
            };
            let fraction = axis.calc_cross_fraction(cross_axis, id.is_primary());
            let labels_inside = axis.scale().is_labels_inside
                && (id.is_primary() || (fraction != 0.0 && fraction != 1.0));
            if labels_inside {
                *alt = alt.max(granted);
            } else {
                *norm += granted;
            }
            if let Ok(axis) = self.axis_mut(id) {
                axis.reserved_space = granted;
            }
        }

        let left = sides.left.max(fixed.left);
        let right = sides.right.max(fixed.right);
        let top = sides.top.max(fixed.top);
        let bottom = sides.bottom.max(fixed.bottom);
        let chart_rect = RectF::new(
            client.x + left,
            client.y + top,
            (client.width - left - right).max(0.0),
            (client.height - top - bottom).max(0.0),
        );
        debug!(
            x = chart_rect.x,
            y = chart_rect.y,
            width = chart_rect.width,
            height = chart_rect.height,
            scale_factor,
            "chart rect computed"
        );
        chart_rect
    }

    fn axis_space(
        &self,
        id: AxisId,
        measurer: &dyn TextMeasurer,
        scale_factor: f64,
        client: RectF,
    ) -> AxisSpace {
        let Ok(axis) = self.axis(id) else {
            return AxisSpace::default();
        };
        let ctx = self.scale_context(id, measurer, scale_factor, client);
        axis.calc_space(&ctx, id.is_primary(), Some(&self.x_axis))
    }

    /// Context for picking or measuring the scale of `id` against `rect`.
    ///
    /// The axis length falls back to 75% of the pane when `rect` is empty.
    pub(super) fn scale_context<'a>(
        &'a self,
        id: AxisId,
        measurer: &'a dyn TextMeasurer,
        scale_factor: f64,
        rect: RectF,
    ) -> ScaleContext<'a> {
        let horizontal = id.kind().orientation() == AxisOrientation::Horizontal;
        let (length, pane_length) = if horizontal {
            (rect.width, self.rect.width)
        } else {
            (rect.height, self.rect.height)
        };
        let axis_length = if length > 1.0 {
            length
        } else {
            pane_length * 0.75
        };
        ScaleContext::new(
            &self.config.scale,
            &self.config.date_steps,
            measurer,
            axis_length,
        )
        .with_scale_factor(scale_factor)
        .with_first_series(self.series.first().map(|series| series.points()))
    }
}

/// Space an axis still needs once the chart area covers its cross offset,
/// estimated as `f*(1+f)*(1+f²)*extent` pixels for cross fraction `f`.
fn reduce_for_cross(
    axis: &Axis,
    cross_axis: &Axis,
    is_primary: bool,
    space: f64,
    extent: f64,
) -> f64 {
    let fraction = axis.calc_cross_fraction(cross_axis, is_primary);
    let cross_px = fraction * (1.0 + fraction) * (1.0 + fraction * fraction) * extent;
    if !is_primary && axis.is_cross_shifted(cross_axis) {
        return 0.0;
    }
    if space < cross_px {
        0.0
    } else if cross_px > 0.0 {
        space - cross_px
    } else {
        space
    }
}
