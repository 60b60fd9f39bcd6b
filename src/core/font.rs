use serde::{Deserialize, Serialize};

use crate::core::types::TextSize;

/// Font description used for label and title measurement.
///
/// `angle` is in degrees, counter-clockwise, measured in the axis frame: for
/// vertical axes the frame is rotated so the axis runs along the frame's x
/// direction, which is why vertical-axis scale labels default to 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f64,
    #[serde(default)]
    pub angle: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: 14.0,
            angle: 0.0,
        }
    }
}

impl FontSpec {
    #[must_use]
    pub const fn new(size: f64, angle: f64) -> Self {
        Self { size, angle }
    }

    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn scaled_size(self, scale_factor: f64) -> f64 {
        (self.size * scale_factor).max(1.0)
    }

    /// Bounding box of `text` after rotation by `angle`.
    #[must_use]
    pub fn bounding_box(
        &self,
        measurer: &dyn TextMeasurer,
        text: &str,
        scale_factor: f64,
    ) -> TextSize {
        rotate_extent(measurer.measure(text, self, scale_factor), self.angle)
    }

    /// Same as [`FontSpec::bounding_box`] with the rotation ignored.
    #[must_use]
    pub fn unrotated_box(
        &self,
        measurer: &dyn TextMeasurer,
        text: &str,
        scale_factor: f64,
    ) -> TextSize {
        measurer.measure(text, self, scale_factor)
    }

    /// Height of one line of text, independent of rotation.
    #[must_use]
    pub fn height(&self, measurer: &dyn TextMeasurer, scale_factor: f64) -> f64 {
        measurer.line_height(self, scale_factor)
    }
}

/// Text measurement oracle supplied by the rendering backend.
///
/// The axis core never draws; it only needs text extents to reserve layout
/// space and to decide how many labels fit along an axis.
pub trait TextMeasurer {
    /// Unrotated extent of `text`.
    fn measure(&self, text: &str, font: &FontSpec, scale_factor: f64) -> TextSize;

    fn line_height(&self, font: &FontSpec, scale_factor: f64) -> f64 {
        self.measure("X", font, scale_factor).height
    }
}

/// Backend-independent measurer based on per-glyph width estimates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedTextMeasurer;

const LINE_HEIGHT_RATIO: f64 = 1.2;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, scale_factor: f64) -> TextSize {
        let font_size_px = font.scaled_size(scale_factor);
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' | '^' => 0.42,
                ' ' => 0.33,
                'A'..='Z' => 0.68,
                _ => 0.58,
            }
        });
        TextSize::new(units * font_size_px, font_size_px * LINE_HEIGHT_RATIO)
    }
}

fn rotate_extent(size: TextSize, angle_degrees: f64) -> TextSize {
    if angle_degrees == 0.0 {
        return size;
    }
    let radians = angle_degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    TextSize::new(
        size.width * cos + size.height * sin,
        size.width * sin + size.height * cos,
    )
}
