use crate::core::primitives::{calc_bounded_step_size, calc_step_size};

use super::{Scale, ScaleContext};

/// Ranges narrower than this are widened before stepping.
const MIN_PICK_RANGE: f64 = 1.0e-20;

impl Scale {
    /// Auto-ranging for linear and exponent scales.
    pub(super) fn pick_linear(&mut self, ctx: &ScaleContext<'_>) {
        if self.max - self.min < MIN_PICK_RANGE {
            if self.max_auto {
                self.max += 0.2 * if self.max == 0.0 { 1.0 } else { self.max.abs() };
            }
            if self.min_auto {
                self.min -= 0.2 * if self.min == 0.0 { 1.0 } else { self.min.abs() };
            }
        }

        let zero_lever = ctx.defaults.zero_lever;
        if self.min_auto && self.min > 0.0 && self.min / (self.max - self.min) < zero_lever {
            self.min = 0.0;
        }
        if self.max_auto && self.max < 0.0 && (self.max / (self.max - self.min)).abs() < zero_lever
        {
            self.max = 0.0;
        }

        if self.major_step_auto {
            let range = self.max - self.min;
            self.major_step = calc_step_size(range, ctx.target_steps(self.orientation));

            if self.is_prevent_label_overlap {
                let max_labels = self.calc_max_labels(ctx);
                if max_labels < range / self.major_step {
                    self.major_step = calc_bounded_step_size(range, max_labels);
                }
            }
        }

        if self.minor_step_auto {
            self.minor_step = calc_step_size(self.major_step, ctx.defaults.target_minor_steps);
        }

        if self.min_auto {
            self.min = (self.min / self.major_step).floor() * self.major_step;
        }
        if self.max_auto {
            self.max = (self.max / self.major_step).ceil() * self.major_step;
        }

        self.set_scale_mag();
    }

    /// Picks the engineering magnitude and decimal count for numeric labels.
    ///
    /// The magnitude is the largest bound's decade rounded to the nearest
    /// multiple of three. Decades within three of zero are not factored out.
    pub(super) fn set_scale_mag(&mut self) {
        if self.mag_auto {
            let decade = |value: f64| {
                if value.abs() > 1.0e-30 {
                    value.abs().log10().floor() as i32
                } else {
                    -100
                }
            };
            let mag = decade(self.min).max(decade(self.max));
            self.mag = if mag == -100 || mag.abs() <= 3 {
                0
            } else {
                (f64::from(mag) / 3.0).round() as i32 * 3
            };
        }

        if self.format_auto {
            let step_decade = self.major_step.abs().log10().floor() as i32;
            self.decimals = usize::try_from(self.mag - step_decade).unwrap_or(0);
        }
    }

    pub(super) fn linear_base_tic(&self) -> f64 {
        (self.min / self.major_step - 1.0e-8).ceil() * self.major_step
    }
}
