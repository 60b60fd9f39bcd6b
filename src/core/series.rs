use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::PointList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Bar,
}

/// A data series as seen by the axis core: points plus axis bindings.
pub struct Series {
    pub label: String,
    pub kind: SeriesKind,
    points: Box<dyn PointList>,
    pub is_x2_axis: bool,
    pub is_y2_axis: bool,
    /// Index into the Y (or Y2) axis list. Out-of-range indices fall back
    /// to the first axis.
    pub y_axis_index: usize,
    /// Keep real X values even on an ordinal axis.
    pub is_override_ordinal: bool,
    pub is_visible: bool,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, kind: SeriesKind, points: impl PointList + 'static) -> Self {
        Self {
            label: label.into(),
            kind,
            points: Box::new(points),
            is_x2_axis: false,
            is_y2_axis: false,
            y_axis_index: 0,
            is_override_ordinal: false,
            is_visible: true,
        }
    }

    #[must_use]
    pub fn line(label: impl Into<String>, points: impl PointList + 'static) -> Self {
        Self::new(label, SeriesKind::Line, points)
    }

    #[must_use]
    pub fn bar(label: impl Into<String>, points: impl PointList + 'static) -> Self {
        Self::new(label, SeriesKind::Bar, points)
    }

    #[must_use]
    pub fn points(&self) -> &dyn PointList {
        self.points.as_ref()
    }

    pub fn set_points(&mut self, points: impl PointList + 'static) {
        self.points = Box::new(points);
    }

    #[must_use]
    pub fn is_bar(&self) -> bool {
        self.kind == SeriesKind::Bar
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("len", &self.points.len())
            .field("is_x2_axis", &self.is_x2_axis)
            .field("is_y2_axis", &self.is_y2_axis)
            .field("y_axis_index", &self.y_axis_index)
            .field("is_visible", &self.is_visible)
            .finish()
    }
}
