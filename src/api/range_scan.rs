use tracing::warn;

use crate::core::{Axis, BarBase, Scale};

use super::{AxisId, GraphPane};

/// Running min/max of one axis during a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn include_extent(&mut self, other: Self) {
        if !other.is_empty() {
            self.include(other.min);
            self.include(other.max);
        }
    }

    fn pad(&mut self, amount: f64) {
        if !self.is_empty() {
            self.min -= amount;
            self.max += amount;
        }
    }

    fn is_empty(self) -> bool {
        self.min > self.max
    }
}

/// Acceptance window of one axis for bounded scans.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    fn for_scale(scale: &Scale, is_bounded: bool) -> Self {
        let lower = if is_bounded && !scale.is_min_auto() {
            scale.min()
        } else {
            f64::NEG_INFINITY
        };
        let upper = if is_bounded && !scale.is_max_auto() {
            scale.max()
        } else {
            f64::INFINITY
        };
        Self { lower, upper }
    }

    fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[derive(Debug, Default)]
struct ScanResult {
    x: Option<Extent>,
    x2: Option<Extent>,
    y: Vec<Option<Extent>>,
    y2: Vec<Option<Extent>>,
    scanned_points: usize,
    accepted_points: usize,
}

impl ScanResult {
    fn slot(&mut self, id: AxisId) -> &mut Option<Extent> {
        match id {
            AxisId::X => &mut self.x,
            AxisId::X2 => &mut self.x2,
            AxisId::Y(index) => &mut self.y[index],
            AxisId::Y2(index) => &mut self.y2[index],
        }
    }
}

impl GraphPane {
    /// Records the data range of every axis on its scale.
    ///
    /// Ordinal axes see point positions `1..=len`; log axes skip
    /// non-positive values; bar series pull their value axis to zero and pad
    /// a non-ordinal base axis by half a cluster. Axes without data borrow
    /// the range of their sibling (Y2 from Y, X2 from X) or fall back to
    /// `[0, 1]`.
    ///
    /// The automatic cluster width is derived from the unpadded base range
    /// before padding, so repeated scans of the same data agree.
    pub(super) fn scan_ranges(&mut self) {
        let raw = self.collect_ranges(0.0);
        self.apply_scan(&raw);

        let has_bars = self
            .series
            .iter()
            .any(|series| series.is_visible && series.is_bar());
        self.update_cluster_width();
        let result = if has_bars {
            let padded = self.collect_ranges(self.bar_settings.cluster_scale_width() / 2.0);
            self.apply_scan(&padded);
            padded
        } else {
            raw
        };

        if self.config.pane.is_bounded_ranges
            && result.scanned_points > 0
            && result.accepted_points == 0
        {
            warn!(
                scanned_points = result.scanned_points,
                "bounded range scan accepted no points; axes fall back to defaults"
            );
        }
    }

    /// Cluster width from the data range of the bar base axis, or its manual
    /// bounds where set.
    fn update_cluster_width(&mut self) {
        let scale = self.bar_base_axis().scale().clone();
        let (data_min, data_max) = scale.data_range();
        let min = if scale.is_min_auto() { data_min } else { scale.min() };
        let max = if scale.is_max_auto() { data_max } else { scale.max() };
        let range = scale.linearize(max) - scale.linearize(min);
        self.bar_settings
            .calc_cluster_scale_width_in_range(&self.series, &scale, range);
    }

    fn collect_ranges(&self, bar_padding: f64) -> ScanResult {
        let pane = self.config.pane;
        let mut result = ScanResult {
            y: vec![None; self.y_axes.len()],
            y2: vec![None; self.y2_axes.len()],
            ..ScanResult::default()
        };

        for series in self.series.iter().filter(|series| series.is_visible) {
            let x_id = Self::x_axis_id_for_series(series);
            let y_id = self.y_axis_id_for_series(series);
            let x_axis = self.x_axis_for_series(series);
            let y_axis = self.y_axis_for_series(series);
            let x_scale = x_axis.scale();
            let y_scale = y_axis.scale();
            let x_bounds = Bounds::for_scale(x_scale, pane.is_bounded_ranges);
            let y_bounds = Bounds::for_scale(y_scale, pane.is_bounded_ranges);
            let x_ordinal = x_scale.is_any_ordinal() && !series.is_override_ordinal;
            let y_ordinal = y_scale.is_any_ordinal() && !series.is_override_ordinal;

            let mut x_extent = Extent::EMPTY;
            let mut y_extent = Extent::EMPTY;
            let mut is_leading = pane.is_ignore_initial;

            let points = series.points();
            for index in 0..points.len() {
                let Some(point) = points.get(index) else {
                    continue;
                };
                result.scanned_points += 1;
                if point.is_invalid() {
                    continue;
                }
                if is_leading {
                    if point.y == 0.0 {
                        continue;
                    }
                    is_leading = false;
                }

                let position = (index + 1) as f64;
                let x = if x_ordinal { position } else { point.x };
                let y = if y_ordinal { position } else { point.y };
                if !x_bounds.contains(x) || !y_bounds.contains(y) {
                    continue;
                }
                result.accepted_points += 1;
                if x_scale.is_domain_valid(x) {
                    x_extent.include(x);
                }
                if y_scale.is_domain_valid(y) {
                    y_extent.include(y);
                }
            }

            if series.is_bar() {
                self.apply_bar_extent(
                    (x_id, y_id),
                    (x_axis, y_axis),
                    &mut x_extent,
                    &mut y_extent,
                    bar_padding,
                );
            }

            for (id, extent) in [(x_id, x_extent), (y_id, y_extent)] {
                if !extent.is_empty() {
                    result
                        .slot(id)
                        .get_or_insert(Extent::EMPTY)
                        .include_extent(extent);
                }
            }
        }
        result
    }

    /// Zero base on the value axis and half-cluster padding on the base axis.
    fn apply_bar_extent(
        &self,
        (x_id, y_id): (AxisId, AxisId),
        (x_axis, y_axis): (&Axis, &Axis),
        x_extent: &mut Extent,
        y_extent: &mut Extent,
        padding: f64,
    ) {
        let (base_axis, base_extent, value_extent) = match self.bar_settings.base {
            BarBase::X | BarBase::X2 if x_id.kind() == self.bar_settings.base.axis_kind() => {
                (x_axis, x_extent, y_extent)
            }
            BarBase::Y | BarBase::Y2 if y_id.kind() == self.bar_settings.base.axis_kind() => {
                (y_axis, y_extent, x_extent)
            }
            _ => return,
        };
        if !value_extent.is_empty() {
            value_extent.include(0.0);
        }
        if !base_axis.scale().is_any_ordinal() {
            base_extent.pad(padding);
        }
    }

    fn apply_scan(&mut self, result: &ScanResult) {
        let first_y = result.y.first().copied().flatten();
        let first_y2 = result.y2.first().copied().flatten();
        let fallback_y = first_y.or(first_y2);

        let x = result.x.or(result.x2);
        let x2 = result.x2.or(result.x);
        set_range(&mut self.x_axis, x);
        set_range(&mut self.x2_axis, x2);
        for (axis, extent) in self.y_axes.iter_mut().zip(&result.y) {
            set_range(axis, extent.or(fallback_y));
        }
        for (axis, extent) in self.y2_axes.iter_mut().zip(&result.y2) {
            set_range(axis, extent.or(first_y2.or(first_y)));
        }
    }
}

fn set_range(axis: &mut Axis, extent: Option<Extent>) {
    let (min, max) = match extent {
        Some(extent) if !extent.is_empty() => (extent.min, extent.max),
        _ => (0.0, 1.0),
    };
    axis.scale_mut().set_data_range(min, max);
}
