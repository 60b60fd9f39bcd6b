use serde::{Deserialize, Serialize};

use crate::core::primitives::{safe_log10, signed_pow};

/// Denominators at or below this are treated as an empty linear range.
const MIN_LINEAR_SPAN: f64 = 1.0e-100;

/// Mapping from data values into the space in which a scale is linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Linearization {
    Identity,
    Log10,
    Power { exponent: f64 },
}

impl Linearization {
    #[must_use]
    pub fn linearize(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Log10 => safe_log10(value),
            Self::Power { exponent } => signed_pow(value, exponent),
        }
    }

    #[must_use]
    pub fn delinearize(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Log10 => 10_f64.powf(value),
            Self::Power { exponent } => signed_pow(value, 1.0 / exponent),
        }
    }
}

/// Immutable transform snapshot of one scale against one pixel span.
///
/// Built by [`Scale::coordinate_space`](super::Scale::coordinate_space) after
/// auto-ranging; every mapping below is a pure function of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCoordinateSpace {
    min_linear: f64,
    max_linear: f64,
    min_pix: f64,
    max_pix: f64,
    descending: bool,
    linearization: Linearization,
    is_any_ordinal: bool,
}

impl ScaleCoordinateSpace {
    /// `descending` makes the minimum value land on `max_pix`.
    #[must_use]
    pub(crate) fn new(
        min_linear: f64,
        max_linear: f64,
        min_pix: f64,
        max_pix: f64,
        descending: bool,
        linearization: Linearization,
        is_any_ordinal: bool,
    ) -> Self {
        Self {
            min_linear,
            max_linear,
            min_pix,
            max_pix,
            descending,
            linearization,
            is_any_ordinal,
        }
    }

    #[must_use]
    pub fn min_pix(self) -> f64 {
        self.min_pix
    }

    #[must_use]
    pub fn max_pix(self) -> f64 {
        self.max_pix
    }

    #[must_use]
    pub fn min_linear(self) -> f64 {
        self.min_linear
    }

    #[must_use]
    pub fn max_linear(self) -> f64 {
        self.max_linear
    }

    #[must_use]
    pub fn linearization(self) -> Linearization {
        self.linearization
    }

    #[must_use]
    pub fn is_descending(self) -> bool {
        self.descending
    }

    #[must_use]
    pub fn is_any_ordinal(self) -> bool {
        self.is_any_ordinal
    }

    /// Maps a data value to a pixel coordinate.
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        self.local_transform(self.linearization.linearize(value))
    }

    /// Maps an already linearized value to a pixel coordinate.
    #[must_use]
    pub fn local_transform(self, linear_value: f64) -> f64 {
        let span = self.max_linear - self.min_linear;
        let ratio = if span.abs() > MIN_LINEAR_SPAN {
            (linear_value - self.min_linear) / span
        } else {
            0.0
        };

        let pixel_span = self.max_pix - self.min_pix;
        if self.descending {
            self.max_pix - pixel_span * ratio
        } else {
            self.min_pix + pixel_span * ratio
        }
    }

    /// Position of the point at `index` whose raw coordinate is `value`.
    ///
    /// Ordinal-like scales place points by their 1-based index unless the
    /// series overrides ordinal placement.
    #[must_use]
    pub fn transform_ordinal(self, is_override_ordinal: bool, index: usize, value: f64) -> f64 {
        if self.is_any_ordinal && !is_override_ordinal {
            self.local_transform(index as f64 + 1.0)
        } else {
            self.transform(value)
        }
    }

    /// Inverse of [`ScaleCoordinateSpace::transform`].
    #[must_use]
    pub fn reverse_transform(self, pixel: f64) -> f64 {
        self.linearization
            .delinearize(self.reverse_local_transform(pixel))
    }

    /// Inverse of [`ScaleCoordinateSpace::local_transform`].
    #[must_use]
    pub fn reverse_local_transform(self, pixel: f64) -> f64 {
        let pixel_span = self.max_pix - self.min_pix;
        if pixel_span == 0.0 {
            return self.min_linear;
        }

        let ratio = if self.descending {
            (self.max_pix - pixel) / pixel_span
        } else {
            (pixel - self.min_pix) / pixel_span
        };
        self.min_linear + (self.max_linear - self.min_linear) * ratio
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Linearization, ScaleCoordinateSpace};

    #[test]
    fn ascending_identity_maps_midpoint() {
        let space =
            ScaleCoordinateSpace::new(0.0, 100.0, 0.0, 200.0, false, Linearization::Identity, false);
        assert_relative_eq!(space.transform(50.0), 100.0);
        assert_relative_eq!(space.reverse_transform(100.0), 50.0);
    }

    #[test]
    fn descending_space_puts_minimum_on_max_pixel() {
        let space =
            ScaleCoordinateSpace::new(0.0, 10.0, 20.0, 120.0, true, Linearization::Identity, false);
        assert_relative_eq!(space.transform(0.0), 120.0);
        assert_relative_eq!(space.transform(10.0), 20.0);
        assert_relative_eq!(space.reverse_transform(70.0), 5.0);
    }

    #[test]
    fn empty_linear_span_maps_to_edge_without_nan() {
        let space =
            ScaleCoordinateSpace::new(5.0, 5.0, 0.0, 100.0, false, Linearization::Identity, false);
        assert_eq!(space.transform(5.0), 0.0);
        assert_eq!(space.transform(7.0), 0.0);
    }

    #[test]
    fn inverted_bounds_still_round_trip() {
        let space =
            ScaleCoordinateSpace::new(10.0, 0.0, 0.0, 200.0, false, Linearization::Identity, false);
        assert_relative_eq!(space.transform(10.0), 0.0);
        assert_relative_eq!(space.transform(0.0), 200.0);
        assert_relative_eq!(space.transform(space.reverse_transform(50.0)), 50.0);
        assert_relative_eq!(space.reverse_transform(space.transform(2.5)), 2.5);
    }

    #[test]
    fn empty_pixel_span_reverses_to_minimum() {
        let space =
            ScaleCoordinateSpace::new(1.0, 3.0, 40.0, 40.0, false, Linearization::Log10, false);
        assert_relative_eq!(space.reverse_transform(40.0), 10.0);
    }

    #[test]
    fn ordinal_space_uses_one_based_index() {
        let space =
            ScaleCoordinateSpace::new(0.5, 5.5, 0.0, 500.0, false, Linearization::Identity, true);
        assert_relative_eq!(space.transform_ordinal(false, 2, 42.0), 250.0);
        assert_relative_eq!(space.transform_ordinal(true, 2, 1.5), 100.0);
    }

    #[test]
    fn power_linearization_preserves_sign() {
        let power = Linearization::Power { exponent: 2.0 };
        assert_relative_eq!(power.linearize(-3.0), -9.0);
        assert_relative_eq!(power.delinearize(-9.0), -3.0);
    }
}
