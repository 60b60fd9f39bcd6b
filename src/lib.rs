//! chart-axis: axis and scale core for 2D charts.
//!
//! The crate turns data ranges into auto-ranged scales, maps values to
//! pixels and back, enumerates tics and labels, and reserves the room every
//! axis needs around the chart rect. Drawing is left to the host; text
//! extents come from an injected [`TextMeasurer`].

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisId, AxisTicLayout, ChartConfig, GraphPane, PaneDefaults, RenderContext, TicMark};
pub use crate::core::{
    Axis, AxisKind, AxisOrientation, BarBase, BarSettings, EstimatedTextMeasurer, PointList,
    PointPair, RectF, Scale, ScaleCoordinateSpace, ScaleType, Series, SeriesKind, TextMeasurer,
};
pub use error::{ChartError, ChartResult};
