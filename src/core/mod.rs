pub mod axis;
pub mod bar_settings;
pub mod defaults;
pub mod font;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod tics;
pub mod types;

pub use axis::{Axis, AxisKind, AxisSpace, AxisTitle};
pub use bar_settings::{BarBase, BarSettings};
pub use defaults::{AxisDefaults, DateStepThresholds, ScaleDefaults};
pub use font::{EstimatedTextMeasurer, FontSpec, TextMeasurer};
pub use scale::{
    AxisOrientation, DateUnit, DateUnits, Linearization, Scale, ScaleContext,
    ScaleCoordinateSpace, ScaleType,
};
pub use series::{Series, SeriesKind};
pub use tics::{GridStyle, TicStyle};
pub use types::{MISSING, PointList, PointPair, RectF, TextSize};
