//! Tic styling and enumeration of major/minor tic values for a picked scale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::scale::{Scale, log_ladder_tics};

/// Placement of one class of tic marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TicStyle {
    /// Mark length in points, before font scaling.
    pub size: f64,
    #[serde(default = "default_true")]
    pub is_outside: bool,
    #[serde(default)]
    pub is_inside: bool,
    /// Marks on the opposite edge of the chart rect.
    #[serde(default)]
    pub is_opposite: bool,
    #[serde(default)]
    pub is_cross_outside: bool,
    #[serde(default)]
    pub is_cross_inside: bool,
}

impl TicStyle {
    #[must_use]
    pub const fn new(size: f64) -> Self {
        Self {
            size,
            is_outside: true,
            is_inside: false,
            is_opposite: false,
            is_cross_outside: false,
            is_cross_inside: false,
        }
    }

    #[must_use]
    pub fn scaled_size(&self, scale_factor: f64) -> f64 {
        self.size * scale_factor
    }

    /// Whether any mark extends away from the chart rect.
    #[must_use]
    pub fn is_any_outside(&self) -> bool {
        self.is_outside || self.is_cross_outside
    }

    #[must_use]
    pub fn is_any_inside(&self) -> bool {
        self.is_inside || self.is_cross_inside
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridStyle {
    #[serde(default)]
    pub is_visible: bool,
    /// Draw a line at value zero even when the grid is hidden.
    #[serde(default)]
    pub is_zero_line: bool,
}

fn default_true() -> bool {
    true
}

/// Major tics in tic space, either evenly stepped from the base tic or an
/// explicit list for sub-decade log ranges.
enum MajorSequence {
    Stepped { base: f64, count: usize },
    Listed(Vec<f64>),
}

impl MajorSequence {
    fn for_scale(scale: &Scale, max_tics: usize) -> Self {
        let (first, last) = scale.tic_bounds();
        if scale.is_log() && last - first < 1.0 {
            return Self::Listed(log_ladder_tics(scale.min(), scale.max()));
        }
        Self::Stepped {
            base: scale.calc_base_tic(),
            count: scale.calc_num_tics(max_tics),
        }
    }

    /// Tic at `index`, `None` past the end of the sequence.
    fn at(&self, scale: &Scale, index: usize) -> Option<f64> {
        match self {
            Self::Stepped { base, count } => {
                (index < *count).then(|| scale.calc_major_tic_value(*base, index as f64))
            }
            Self::Listed(values) => values.get(index).copied(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Stepped { count, .. } => *count,
            Self::Listed(values) => values.len(),
        }
    }
}

/// Major tic values inside `[min, max]`, in data units, ascending.
#[must_use]
pub fn major_tics(scale: &Scale, max_tics: usize) -> Vec<f64> {
    let (first, last) = scale.tic_bounds();
    let tolerance = (last - first).abs() * 1.0e-10;
    let sequence = MajorSequence::for_scale(scale, max_tics);

    let mut values = Vec::with_capacity(sequence.len());
    for index in 0..sequence.len() {
        let Some(tic) = sequence.at(scale, index) else {
            break;
        };
        if tic < first - tolerance {
            continue;
        }
        if tic > last + tolerance {
            break;
        }
        values.push(scale.tic_to_value(tic));
    }
    values
}

/// Minor tic values inside `[min, max]`, in data units, ascending.
///
/// Values that coincide with a major tic are left out. Enumeration stops
/// after `iteration_cap` candidates.
#[must_use]
pub fn minor_tics(scale: &Scale, max_tics: usize, iteration_cap: usize) -> Vec<f64> {
    if !scale.has_minor_tics() {
        return Vec::new();
    }

    let (first, last) = scale.tic_bounds();
    let sequence = MajorSequence::for_scale(scale, max_tics);
    let base = scale.calc_base_tic();

    let mut major_index = 0;
    let mut major = sequence.at(scale, major_index).unwrap_or(f64::INFINITY);
    let mut index = scale.calc_minor_start(base);
    let mut value = first;
    let mut iterations = 0;
    let mut values = Vec::new();

    while value < last && iterations < iteration_cap {
        value = scale.calc_minor_tic_value(base, index);
        while value > major {
            major_index += 1;
            major = sequence.at(scale, major_index).unwrap_or(f64::INFINITY);
        }
        if is_distinct_from_major(value, major) && value >= first && value <= last {
            values.push(scale.tic_to_value(value));
        }
        index += 1;
        iterations += 1;
    }

    if iterations >= iteration_cap && value < last {
        debug!(
            iteration_cap,
            emitted = values.len(),
            "minor tic enumeration truncated"
        );
    }
    values
}

/// Near zero the comparison is absolute, elsewhere relative.
fn is_distinct_from_major(value: f64, major: f64) -> bool {
    if value.abs() < 1.0e-20 {
        (value - major).abs() > 1.0e-20
    } else {
        ((value - major) / value).abs() > 1.0e-10
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{is_distinct_from_major, major_tics, minor_tics};
    use crate::core::defaults::ScaleDefaults;
    use crate::core::scale::{AxisOrientation, Scale, ScaleType};

    fn manual(scale_type: ScaleType, min: f64, max: f64, major: f64, minor: f64) -> Scale {
        let mut scale = Scale::new(
            scale_type,
            AxisOrientation::Horizontal,
            &ScaleDefaults::default(),
        );
        scale.set_min(min).expect("min");
        scale.set_max(max).expect("max");
        scale.set_major_step(major).expect("major");
        scale.set_minor_step(minor).expect("minor");
        scale
    }

    #[test]
    fn linear_majors_cover_the_range() {
        let scale = manual(ScaleType::Linear, 0.0, 100.0, 20.0, 5.0);
        assert_eq!(major_tics(&scale, 1000), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn minor_tics_skip_majors() {
        let scale = manual(ScaleType::Linear, 0.0, 10.0, 5.0, 1.0);
        let minors = minor_tics(&scale, 1000, 5000);
        assert_eq!(minors.len(), 8);
        assert!(!minors.iter().any(|value| (value - 5.0).abs() < 1e-9));
        assert!(minors.iter().all(|value| (0.0..=10.0).contains(value)));
    }

    #[test]
    fn iteration_cap_truncates_minors() {
        let scale = manual(ScaleType::Linear, 0.0, 1000.0, 500.0, 0.01);
        let minors = minor_tics(&scale, 1000, 50);
        assert!(minors.len() <= 50);
    }

    #[test]
    fn log_minors_follow_the_decade_table() {
        let scale = manual(ScaleType::Log, 1.0, 100.0, 1.0, 1.0);
        let majors = major_tics(&scale, 1000);
        assert_eq!(majors.len(), 3);
        let minors = minor_tics(&scale, 1000, 5000);
        assert_eq!(minors.len(), 16);
        assert_relative_eq!(minors[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(minors[8], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn narrow_log_range_uses_ladder() {
        let scale = manual(ScaleType::Log, 1.5, 9.0, 1.0, 1.0);
        let majors = major_tics(&scale, 1000);
        assert_eq!(majors.len(), 2);
        assert_relative_eq!(majors[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(majors[1], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn coincidence_check_switches_to_absolute_near_zero() {
        assert!(!is_distinct_from_major(0.0, 0.0));
        assert!(is_distinct_from_major(0.0, 1.0e-19));
        assert!(!is_distinct_from_major(1.0, 1.0 + 1.0e-12));
        assert!(is_distinct_from_major(1.0, 1.1));
    }
}
