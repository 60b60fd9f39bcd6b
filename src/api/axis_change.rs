use tracing::debug;

use crate::core::{RectF, TextMeasurer};
use crate::error::ChartResult;

use super::{AxisId, GraphPane};

impl GraphPane {
    /// Recomputes the bar cluster width, every auto scale and the chart rect.
    ///
    /// The cluster width comes from the data scan. Scales are then picked
    /// twice: once against the previous chart rect so label space can be
    /// measured, then against the new chart rect so label density matches
    /// the final axis lengths.
    pub fn axis_change(&mut self, measurer: &dyn TextMeasurer) {
        self.scan_ranges();

        let scale_factor = self.calc_scale_factor();
        self.scale_factor = scale_factor;

        self.pick_scales(measurer, scale_factor, self.chart_rect);
        if self.is_chart_rect_auto {
            self.chart_rect = self.calc_chart_rect(measurer, scale_factor);
        }
        self.pick_scales(measurer, scale_factor, self.chart_rect);

        debug!(
            series = self.series.len(),
            y_axes = self.y_axes.len(),
            y2_axes = self.y2_axes.len(),
            scale_factor,
            chart_width = self.chart_rect.width,
            chart_height = self.chart_rect.height,
            cluster_scale_width = self.bar_settings.cluster_scale_width(),
            "axis change"
        );
    }

    /// Returns one axis to auto scaling and re-runs [`GraphPane::axis_change`].
    pub fn restore_auto_scale(&mut self, id: AxisId, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        self.axis_mut(id)?.restore_auto_scale();
        self.axis_change(measurer);
        Ok(())
    }

    fn pick_scales(&mut self, measurer: &dyn TextMeasurer, scale_factor: f64, rect: RectF) {
        for id in self.axis_ids() {
            let ctx = self.scale_context(id, measurer, scale_factor, rect);
            let Ok(axis) = self.axis(id) else {
                continue;
            };
            let mut scale = axis.scale().clone();
            scale.pick_scale(&ctx);
            if let Ok(axis) = self.axis_mut(id) {
                *axis.scale_mut() = scale;
            }
        }
    }
}
