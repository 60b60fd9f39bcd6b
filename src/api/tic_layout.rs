use crate::core::tics::{major_tics, minor_tics};
use crate::core::{RectF, ScaleCoordinateSpace, TextMeasurer};
use crate::error::{ChartError, ChartResult};

use super::{AxisId, GraphPane};

/// Frozen pixel mapping of every axis for one drawing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub chart_rect: RectF,
    pub scale_factor: f64,
    pub x: ScaleCoordinateSpace,
    pub x2: ScaleCoordinateSpace,
    pub y: Vec<ScaleCoordinateSpace>,
    pub y2: Vec<ScaleCoordinateSpace>,
}

impl RenderContext {
    #[must_use]
    pub fn space(&self, id: AxisId) -> Option<ScaleCoordinateSpace> {
        match id {
            AxisId::X => Some(self.x),
            AxisId::X2 => Some(self.x2),
            AxisId::Y(index) => self.y.get(index).copied(),
            AxisId::Y2(index) => self.y2.get(index).copied(),
        }
    }
}

/// One tic mark along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TicMark {
    pub value: f64,
    /// Pixel coordinate along the axis direction.
    pub pixel: f64,
    /// Label text; `None` for minor tics and skipped edge labels.
    pub label: Option<String>,
}

/// Everything needed to draw one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicLayout {
    pub axis: AxisId,
    /// Offset of the axis line from its chart-rect edge, positive inwards.
    pub shift: f64,
    /// Distance from the axis line to the label baseline side.
    pub label_offset: f64,
    pub major_tics: Vec<TicMark>,
    pub minor_tics: Vec<TicMark>,
    /// Pixel positions of major grid lines; empty when the grid is hidden.
    pub major_grid: Vec<f64>,
    pub minor_grid: Vec<f64>,
    /// Pixel position of the zero line when requested and in range.
    pub zero_line: Option<f64>,
}

impl GraphPane {
    /// Snapshot of every axis against the current chart rect.
    ///
    /// `None` while the chart rect is one pixel or less in either dimension.
    #[must_use]
    pub fn render_context(&self) -> Option<RenderContext> {
        if self.chart_rect.is_degenerate() {
            return None;
        }
        let rect = self.chart_rect;
        Some(RenderContext {
            chart_rect: rect,
            scale_factor: self.scale_factor,
            x: self.x_axis.coordinate_space(rect),
            x2: self.x2_axis.coordinate_space(rect),
            y: self.y_axes.iter().map(|axis| axis.coordinate_space(rect)).collect(),
            y2: self.y2_axes.iter().map(|axis| axis.coordinate_space(rect)).collect(),
        })
    }

    /// Tic marks, labels and grid lines of one axis.
    ///
    /// `Ok(None)` when the chart rect is degenerate or the axis is hidden.
    pub fn axis_tic_layout(
        &self,
        id: AxisId,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Option<AxisTicLayout>> {
        let axis = self.axis(id)?;
        let Some(context) = self.render_context() else {
            return Ok(None);
        };
        if !axis.is_visible {
            return Ok(None);
        }
        let (Some(space), Some(cross_space)) = (context.space(id), context.space(id.cross_axis()))
        else {
            return Ok(None);
        };
        let cross_axis = self.axis(id.cross_axis())?;
        let scale = axis.scale();
        let defaults = &self.config.scale;
        let first_series = self.series.first().map(|series| series.points());

        let stacked_space: f64 = match id {
            AxisId::Y(index) => self.y_axes[..index].iter().map(|axis| axis.reserved_space).sum(),
            AxisId::Y2(index) => self.y2_axes[..index]
                .iter()
                .map(|axis| axis.reserved_space)
                .sum(),
            AxisId::X | AxisId::X2 => 0.0,
        };
        let shift = axis.calc_total_shift(
            cross_axis,
            &cross_space,
            context.chart_rect,
            id.is_primary(),
            stacked_space,
        );

        let majors = major_tics(scale, defaults.max_major_tics);
        let last_index = majors.len().saturating_sub(1);
        let major_tics: Vec<TicMark> = majors
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let skipped = (index == 0 && scale.is_skip_first_label)
                    || (index == last_index && scale.is_skip_last_label);
                let label = (scale.is_visible && !skipped)
                    .then(|| scale.make_label(value, first_series));
                TicMark {
                    value,
                    pixel: space.transform(value),
                    label,
                }
            })
            .collect();

        let minor_tics: Vec<TicMark> = minor_tics(
            scale,
            defaults.max_major_tics,
            defaults.minor_tic_iteration_cap,
        )
        .into_iter()
        .map(|value| TicMark {
            value,
            pixel: space.transform(value),
            label: None,
        })
        .collect();

        let major_grid = if axis.major_grid.is_visible {
            major_tics.iter().map(|tic| tic.pixel).collect()
        } else {
            Vec::new()
        };
        let minor_grid = if axis.minor_grid.is_visible {
            minor_tics.iter().map(|tic| tic.pixel).collect()
        } else {
            Vec::new()
        };
        let zero_line = (axis.major_grid.is_zero_line
            && !scale.is_log()
            && scale.min() < 0.0
            && scale.max() > 0.0)
            .then(|| space.transform(0.0));

        let scale_factor = context.scale_factor;
        let label_offset = if axis.major_tic.is_any_outside() {
            axis.major_tic.scaled_size(scale_factor)
        } else {
            0.0
        } + scale.font_spec.height(measurer, scale_factor) * scale.label_gap;

        Ok(Some(AxisTicLayout {
            axis: id,
            shift,
            label_offset,
            major_tics,
            minor_tics,
            major_grid,
            minor_grid,
            zero_line,
        }))
    }

    /// Pixel position of point `point_index` of series `series_index`.
    ///
    /// `Ok(None)` for invalid points and while the chart rect is degenerate.
    pub fn transform_point(
        &self,
        series_index: usize,
        point_index: usize,
    ) -> ChartResult<Option<(f64, f64)>> {
        let series = self.series.get(series_index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "series index {series_index} is out of range (series count: {})",
                self.series.len()
            ))
        })?;
        let Some(context) = self.render_context() else {
            return Ok(None);
        };
        let Some(point) = series.points().get(point_index) else {
            return Ok(None);
        };
        if point.is_invalid() {
            return Ok(None);
        }
        let (Some(x_space), Some(y_space)) = (
            context.space(Self::x_axis_id_for_series(series)),
            context.space(self.y_axis_id_for_series(series)),
        ) else {
            return Ok(None);
        };

        let x = x_space.transform_ordinal(series.is_override_ordinal, point_index, point.x);
        let y = y_space.transform_ordinal(series.is_override_ordinal, point_index, point.y);
        Ok(Some((x, y)))
    }
}
