use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::{Axis, AxisKind};
use crate::core::scale::{AxisOrientation, Scale, ScaleCoordinateSpace};
use crate::core::series::Series;
use crate::core::types::PointList;
use crate::error::{ChartError, ChartResult};

/// Axis the bars of a pane grow from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarBase {
    #[default]
    X,
    X2,
    Y,
    Y2,
}

impl BarBase {
    /// Axis kind carrying the bar clusters.
    #[must_use]
    pub fn axis_kind(self) -> AxisKind {
        match self {
            Self::X => AxisKind::X,
            Self::X2 => AxisKind::X2,
            Self::Y => AxisKind::Y,
            Self::Y2 => AxisKind::Y2,
        }
    }
}

/// Pane-wide bar layout state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSettings {
    cluster_scale_width: f64,
    cluster_scale_width_auto: bool,
    pub base: BarBase,
    /// Fraction of the base range used when the smallest step is unusable.
    degenerate_step_fraction: f64,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            cluster_scale_width: 1.0,
            cluster_scale_width_auto: true,
            base: BarBase::X,
            degenerate_step_fraction: 0.1,
        }
    }
}

impl BarSettings {
    #[must_use]
    pub fn new(degenerate_step_fraction: f64) -> Self {
        Self {
            degenerate_step_fraction,
            ..Self::default()
        }
    }

    /// Width of one bar cluster, in base-axis units.
    #[must_use]
    pub fn cluster_scale_width(&self) -> f64 {
        self.cluster_scale_width
    }

    #[must_use]
    pub fn is_cluster_scale_width_auto(&self) -> bool {
        self.cluster_scale_width_auto
    }

    pub fn set_cluster_scale_width(&mut self, width: f64) -> ChartResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "cluster scale width must be finite and > 0".to_owned(),
            ));
        }
        self.cluster_scale_width = width;
        self.cluster_scale_width_auto = false;
        Ok(())
    }

    pub fn set_cluster_scale_width_auto(&mut self, auto: bool) {
        self.cluster_scale_width_auto = auto;
    }

    #[must_use]
    pub fn degenerate_step_fraction(&self) -> f64 {
        self.degenerate_step_fraction
    }

    pub fn set_degenerate_step_fraction(&mut self, fraction: f64) -> ChartResult<()> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(ChartError::InvalidData(
                "degenerate step fraction must be in (0, 1]".to_owned(),
            ));
        }
        self.degenerate_step_fraction = fraction;
        Ok(())
    }

    /// Smallest positive step between consecutive valid points along the
    /// base axis.
    ///
    /// Ordinal base axes and empty lists give 1. A step larger than the base
    /// range is replaced by a fraction of the range.
    #[must_use]
    pub fn get_min_step_size(&self, points: &dyn PointList, base_axis: &Axis) -> f64 {
        let scale = base_axis.scale();
        self.min_step_in_range(points, scale, linear_range(scale, scale.min(), scale.max()))
    }

    /// Same as [`BarSettings::get_min_step_size`] against an explicit linear
    /// base range instead of the picked bounds.
    #[must_use]
    pub fn min_step_in_range(&self, points: &dyn PointList, base_scale: &Scale, range: f64) -> f64 {
        if points.is_empty() || base_scale.is_any_ordinal() {
            return 1.0;
        }

        let coordinate = |index: usize| {
            points.get(index).filter(|point| !point.is_invalid()).map(|point| {
                match base_scale.orientation() {
                    AxisOrientation::Horizontal => point.x,
                    AxisOrientation::Vertical => point.y,
                }
            })
        };

        let mut min_step = f64::INFINITY;
        let mut previous = coordinate(0);
        for index in 1..points.len() {
            let current = coordinate(index);
            if let (Some(last), Some(value)) = (previous, current) {
                let step = value - last;
                if step > 0.0 && step < min_step {
                    min_step = step;
                }
            }
            previous = current;
        }

        if !min_step.is_finite() || range <= 0.0 {
            return 1.0;
        }
        if min_step > range {
            return self.degenerate_step_fraction * range;
        }
        min_step
    }

    /// Recomputes the automatic cluster width from every bar series.
    ///
    /// Manual widths and ordinal base axes keep the current value.
    pub fn calc_cluster_scale_width(&mut self, series: &[Series], base_axis: &Axis) {
        let scale = base_axis.scale();
        let range = linear_range(scale, scale.min(), scale.max());
        self.calc_cluster_scale_width_in_range(series, scale, range);
    }

    /// [`BarSettings::calc_cluster_scale_width`] against an explicit linear
    /// base range.
    pub fn calc_cluster_scale_width_in_range(
        &mut self,
        series: &[Series],
        base_scale: &Scale,
        range: f64,
    ) {
        if !self.cluster_scale_width_auto || base_scale.is_any_ordinal() {
            return;
        }
        let min_step = series
            .iter()
            .filter(|series| series.is_bar())
            .map(|series| self.min_step_in_range(series.points(), base_scale, range))
            .fold(f64::INFINITY, f64::min);
        self.cluster_scale_width = if min_step.is_finite() { min_step } else { 1.0 };
        trace!(
            cluster_scale_width = self.cluster_scale_width,
            range,
            "cluster width computed"
        );
    }

    /// Cluster width in pixels on the base axis, measured in linear units.
    #[must_use]
    pub fn cluster_width_px(&self, base_space: &ScaleCoordinateSpace) -> f64 {
        let origin = base_space.min_linear();
        (base_space.local_transform(origin + self.cluster_scale_width)
            - base_space.local_transform(origin))
        .abs()
    }
}

fn linear_range(scale: &Scale, min: f64, max: f64) -> f64 {
    scale.linearize(max) - scale.linearize(min)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::BarSettings;
    use crate::core::axis::{Axis, AxisKind};
    use crate::core::defaults::{AxisDefaults, ScaleDefaults};
    use crate::core::scale::ScaleType;
    use crate::core::series::Series;
    use crate::core::types::PointPair;

    fn x_axis(min: f64, max: f64) -> Axis {
        let mut axis = Axis::new(
            AxisKind::X,
            "",
            &ScaleDefaults::default(),
            &AxisDefaults::default(),
        );
        axis.scale_mut().set_min(min).expect("min");
        axis.scale_mut().set_max(max).expect("max");
        axis
    }

    fn points(xs: &[f64]) -> Vec<PointPair> {
        xs.iter().map(|x| PointPair::new(*x, 1.0)).collect()
    }

    #[test]
    fn min_step_skips_invalid_neighbours() {
        let settings = BarSettings::default();
        let mut data = points(&[0.0, 5.0, 10.0]);
        data.insert(2, PointPair::missing());
        assert_relative_eq!(settings.get_min_step_size(&data, &x_axis(0.0, 20.0)), 5.0);
    }

    #[test]
    fn min_step_is_smallest_positive_gap() {
        let settings = BarSettings::default();
        let data = points(&[1.0, 3.0, 4.0, 8.0]);
        assert_relative_eq!(settings.get_min_step_size(&data, &x_axis(0.0, 10.0)), 1.0);
    }

    #[test]
    fn steps_wider_than_the_range_fall_back_to_range_fraction() {
        let settings = BarSettings::default();
        let axis = x_axis(0.0, 1000.0);
        assert_relative_eq!(settings.get_min_step_size(&points(&[0.0, 0.5, 1000.0]), &axis), 0.5);
        assert_relative_eq!(
            settings.get_min_step_size(&points(&[0.0, 50.0]), &x_axis(0.0, 10.0)),
            1.0
        );
        assert_relative_eq!(settings.get_min_step_size(&points(&[2.0, 2.0]), &axis), 1.0);
        assert_relative_eq!(settings.get_min_step_size(&points(&[]), &axis), 1.0);
    }

    #[test]
    fn ordinal_base_keeps_cluster_width() {
        let mut settings = BarSettings::default();
        let mut axis = x_axis(0.0, 10.0);
        axis.set_scale_type(ScaleType::Ordinal);
        let series = vec![Series::bar("a", points(&[1.0, 1.5]))];
        settings.calc_cluster_scale_width(&series, &axis);
        assert_eq!(settings.cluster_scale_width(), 1.0);
    }

    #[test]
    fn cluster_width_is_minimum_over_bar_series() {
        let mut settings = BarSettings::default();
        let axis = x_axis(0.0, 10.0);
        let series = vec![
            Series::bar("a", points(&[0.0, 2.0, 4.0])),
            Series::bar("b", points(&[0.0, 0.5, 1.0])),
            Series::line("c", points(&[0.0, 0.1])),
        ];
        settings.calc_cluster_scale_width(&series, &axis);
        assert_relative_eq!(settings.cluster_scale_width(), 0.5);

        let space = axis.coordinate_space(crate::core::types::RectF::new(0.0, 0.0, 200.0, 100.0));
        assert_relative_eq!(settings.cluster_width_px(&space), 10.0);
    }

    #[test]
    fn manual_width_is_kept() {
        let mut settings = BarSettings::default();
        settings.set_cluster_scale_width(3.0).expect("width");
        settings.calc_cluster_scale_width(&[Series::bar("a", points(&[0.0, 1.0]))], &x_axis(0.0, 10.0));
        assert_eq!(settings.cluster_scale_width(), 3.0);
        assert!(settings.set_cluster_scale_width(0.0).is_err());
    }
}
