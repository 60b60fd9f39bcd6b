mod axis_access;
mod axis_change;
mod chart_config;
mod chart_rect_resolver;
mod range_scan;
mod tic_layout;

use crate::core::{Axis, AxisKind, BarSettings, RectF, Series};
use crate::error::ChartResult;

pub use axis_access::AxisId;
pub use chart_config::{ChartConfig, PaneDefaults};
pub use tic_layout::{AxisTicLayout, RenderContext, TicMark};

use chart_config::validate_pane_rect;

/// One chart pane: its axes, series and the layout derived from them.
///
/// The pane is driven in passes: [`GraphPane::axis_change`] scans the data,
/// picks every scale and lays out the chart rect; [`GraphPane::render_context`]
/// and [`GraphPane::axis_tic_layout`] then read the frozen geometry.
#[derive(Debug)]
pub struct GraphPane {
    pub(super) config: ChartConfig,
    pub(super) rect: RectF,
    pub(super) chart_rect: RectF,
    pub(super) is_chart_rect_auto: bool,
    pub(super) scale_factor: f64,
    pub(super) x_axis: Axis,
    pub(super) x2_axis: Axis,
    pub(super) y_axes: Vec<Axis>,
    pub(super) y2_axes: Vec<Axis>,
    pub(super) series: Vec<Series>,
    pub(super) bar_settings: BarSettings,
}

impl GraphPane {
    /// Creates a pane with one axis of each kind; X2 and Y2 start hidden.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let axis = |kind: AxisKind| Axis::new(kind, "", &config.scale, &config.axis);

        let mut x2_axis = axis(AxisKind::X2);
        x2_axis.is_visible = false;
        let mut y2_axis = axis(AxisKind::Y2);
        y2_axis.is_visible = false;

        Ok(Self {
            config,
            rect: config.pane_rect,
            chart_rect: RectF::default(),
            is_chart_rect_auto: true,
            scale_factor: 1.0,
            x_axis: axis(AxisKind::X),
            x2_axis,
            y_axes: vec![axis(AxisKind::Y)],
            y2_axes: vec![y2_axis],
            series: Vec::new(),
            bar_settings: BarSettings::new(config.pane.degenerate_step_fraction),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn rect(&self) -> RectF {
        self.rect
    }

    /// Resizes the pane. Call [`GraphPane::axis_change`] afterwards.
    pub fn set_rect(&mut self, rect: RectF) -> ChartResult<()> {
        validate_pane_rect(rect)?;
        self.rect = rect;
        Ok(())
    }

    #[must_use]
    pub fn chart_rect(&self) -> RectF {
        self.chart_rect
    }

    #[must_use]
    pub fn is_chart_rect_auto(&self) -> bool {
        self.is_chart_rect_auto
    }

    /// Fixes the chart rect; layout passes stop recomputing it.
    pub fn set_chart_rect(&mut self, rect: RectF) -> ChartResult<()> {
        validate_pane_rect(rect)?;
        self.chart_rect = rect;
        self.is_chart_rect_auto = false;
        Ok(())
    }

    pub fn set_chart_rect_auto(&mut self, auto: bool) {
        self.is_chart_rect_auto = auto;
    }

    /// Font scale factor used by the last layout pass.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut Vec<Series> {
        &mut self.series
    }

    /// Appends a series and returns its index.
    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.series.len() - 1
    }

    #[must_use]
    pub fn bar_settings(&self) -> &BarSettings {
        &self.bar_settings
    }

    pub fn bar_settings_mut(&mut self) -> &mut BarSettings {
        &mut self.bar_settings
    }
}
