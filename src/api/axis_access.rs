use crate::core::{Axis, AxisKind, BarBase, Series};
use crate::error::{ChartError, ChartResult};

use super::GraphPane;

/// Address of one axis in a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    X,
    X2,
    Y(usize),
    Y2(usize),
}

impl AxisId {
    #[must_use]
    pub fn kind(self) -> AxisKind {
        match self {
            Self::X => AxisKind::X,
            Self::X2 => AxisKind::X2,
            Self::Y(_) => AxisKind::Y,
            Self::Y2(_) => AxisKind::Y2,
        }
    }

    /// The first axis of each kind is the primary one.
    #[must_use]
    pub fn is_primary(self) -> bool {
        matches!(self, Self::X | Self::X2 | Self::Y(0) | Self::Y2(0))
    }

    /// Axis whose range positions this axis: the first Y axis for X and X2,
    /// the X axis for every Y and Y2 axis.
    #[must_use]
    pub fn cross_axis(self) -> Self {
        match self {
            Self::X | Self::X2 => Self::Y(0),
            Self::Y(_) | Self::Y2(_) => Self::X,
        }
    }
}

impl GraphPane {
    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn x_axis_mut(&mut self) -> &mut Axis {
        &mut self.x_axis
    }

    #[must_use]
    pub fn x2_axis(&self) -> &Axis {
        &self.x2_axis
    }

    pub fn x2_axis_mut(&mut self) -> &mut Axis {
        &mut self.x2_axis
    }

    #[must_use]
    pub fn y_axes(&self) -> &[Axis] {
        &self.y_axes
    }

    #[must_use]
    pub fn y2_axes(&self) -> &[Axis] {
        &self.y2_axes
    }

    pub fn axis(&self, id: AxisId) -> ChartResult<&Axis> {
        match id {
            AxisId::X => Ok(&self.x_axis),
            AxisId::X2 => Ok(&self.x2_axis),
            AxisId::Y(index) => self.y_axes.get(index).ok_or(ChartError::AxisIndexOutOfRange {
                axis: AxisKind::Y.label(),
                index,
                len: self.y_axes.len(),
            }),
            AxisId::Y2(index) => self.y2_axes.get(index).ok_or(ChartError::AxisIndexOutOfRange {
                axis: AxisKind::Y2.label(),
                index,
                len: self.y2_axes.len(),
            }),
        }
    }

    pub fn axis_mut(&mut self, id: AxisId) -> ChartResult<&mut Axis> {
        match id {
            AxisId::X => Ok(&mut self.x_axis),
            AxisId::X2 => Ok(&mut self.x2_axis),
            AxisId::Y(index) => {
                let len = self.y_axes.len();
                self.y_axes
                    .get_mut(index)
                    .ok_or(ChartError::AxisIndexOutOfRange {
                        axis: AxisKind::Y.label(),
                        index,
                        len,
                    })
            }
            AxisId::Y2(index) => {
                let len = self.y2_axes.len();
                self.y2_axes
                    .get_mut(index)
                    .ok_or(ChartError::AxisIndexOutOfRange {
                        axis: AxisKind::Y2.label(),
                        index,
                        len,
                    })
            }
        }
    }

    /// Every axis of the pane, in layout order.
    #[must_use]
    pub fn axis_ids(&self) -> Vec<AxisId> {
        [AxisId::X, AxisId::X2]
            .into_iter()
            .chain((0..self.y_axes.len()).map(AxisId::Y))
            .chain((0..self.y2_axes.len()).map(AxisId::Y2))
            .collect()
    }

    /// Adds a Y axis and returns its index.
    pub fn add_y_axis(&mut self, title: impl Into<String>) -> usize {
        let axis = Axis::new(AxisKind::Y, title, &self.config.scale, &self.config.axis);
        self.y_axes.push(axis);
        self.y_axes.len() - 1
    }

    /// Adds a Y2 axis and returns its index.
    pub fn add_y2_axis(&mut self, title: impl Into<String>) -> usize {
        let axis = Axis::new(AxisKind::Y2, title, &self.config.scale, &self.config.axis);
        self.y2_axes.push(axis);
        self.y2_axes.len() - 1
    }

    /// Index of the axis `series` is plotted against, in the Y or Y2 list.
    ///
    /// Out-of-range indices fall back to the first axis.
    #[must_use]
    pub fn y_axis_index_for_series(&self, series: &Series) -> usize {
        let len = if series.is_y2_axis {
            self.y2_axes.len()
        } else {
            self.y_axes.len()
        };
        if series.y_axis_index < len {
            series.y_axis_index
        } else {
            0
        }
    }

    #[must_use]
    pub fn y_axis_id_for_series(&self, series: &Series) -> AxisId {
        let index = self.y_axis_index_for_series(series);
        if series.is_y2_axis {
            AxisId::Y2(index)
        } else {
            AxisId::Y(index)
        }
    }

    #[must_use]
    pub fn x_axis_id_for_series(series: &Series) -> AxisId {
        if series.is_x2_axis { AxisId::X2 } else { AxisId::X }
    }

    #[must_use]
    pub fn y_axis_for_series(&self, series: &Series) -> &Axis {
        let index = self.y_axis_index_for_series(series);
        if series.is_y2_axis {
            &self.y2_axes[index]
        } else {
            &self.y_axes[index]
        }
    }

    #[must_use]
    pub fn x_axis_for_series(&self, series: &Series) -> &Axis {
        if series.is_x2_axis {
            &self.x2_axis
        } else {
            &self.x_axis
        }
    }

    /// Axis carrying the bar clusters.
    #[must_use]
    pub fn bar_base_axis(&self) -> &Axis {
        match self.bar_settings.base {
            BarBase::X => &self.x_axis,
            BarBase::X2 => &self.x2_axis,
            BarBase::Y => &self.y_axes[0],
            BarBase::Y2 => &self.y2_axes[0],
        }
    }
}
