use crate::core::primitives::calc_step_size;

use super::{Scale, ScaleContext};

impl Scale {
    /// Auto-ranging shared by `Ordinal`, `LinearAsOrdinal` and
    /// `DateAsOrdinal`: integer steps over the `[1, count]` index range with
    /// half a slot of padding on each side.
    pub(super) fn pick_ordinal(&mut self, ctx: &ScaleContext<'_>) {
        if self.max - self.min < 1.0 {
            if self.max_auto {
                self.max = self.min + 0.5;
            } else {
                self.min = self.max - 0.5;
            }
            if self.major_step_auto {
                self.major_step = 1.0;
            }
            if self.minor_step_auto {
                self.minor_step = 1.0;
            }
        } else {
            if self.major_step_auto {
                let range = self.max - self.min;
                self.major_step = calc_step_size(range, ctx.target_steps(self.orientation));

                if self.is_prevent_label_overlap {
                    let max_labels = self.calc_max_labels(ctx);
                    let label_step = (range / max_labels).ceil();
                    if label_step > self.major_step {
                        self.major_step = label_step;
                    }
                }
            }

            self.major_step = self.major_step.trunc().max(1.0);

            if self.minor_step_auto {
                self.minor_step =
                    calc_step_size(self.major_step, ctx.defaults.target_minor_steps);
            }
            if self.min_auto {
                self.min -= 0.5;
            }
            if self.max_auto {
                self.max += 0.5;
            }
        }

        if self.mag_auto {
            self.mag = 0;
        }
        if self.format_auto {
            self.decimals = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::core::defaults::{DateStepThresholds, ScaleDefaults};
    use crate::core::font::EstimatedTextMeasurer;
    use crate::core::scale::{AxisOrientation, Scale, ScaleContext, ScaleType};

    fn picked(count: f64, axis_length_px: f64) -> Scale {
        let defaults = ScaleDefaults::default();
        let date_steps = DateStepThresholds::default();
        let measurer = EstimatedTextMeasurer;
        let ctx = ScaleContext::new(&defaults, &date_steps, &measurer, axis_length_px);
        let mut scale = Scale::new(ScaleType::Ordinal, AxisOrientation::Horizontal, &defaults);
        scale.set_data_range(1.0, count);
        scale.pick_scale(&ctx);
        scale
    }

    #[test]
    fn pads_index_range_by_half_a_slot() {
        let scale = picked(5.0, 600.0);
        assert_relative_eq!(scale.min(), 0.5);
        assert_relative_eq!(scale.max(), 5.5);
        assert_eq!(scale.major_step(), 1.0);
        assert_eq!(scale.mag(), 0);
    }

    #[test]
    fn major_step_is_a_whole_number() {
        let scale = picked(250.0, 600.0);
        assert!(scale.major_step() >= 1.0);
        assert_eq!(scale.major_step().fract(), 0.0);
    }

    #[test]
    fn crowded_axis_widens_step() {
        let roomy = picked(100.0, 5_000.0);
        let crowded = picked(100.0, 60.0);
        assert!(crowded.major_step() > roomy.major_step());
    }

    #[test]
    fn single_point_gets_half_slot_range() {
        let scale = picked(1.0, 600.0);
        assert!(scale.min() < 1.0 && scale.max() > 1.0);
        assert_relative_eq!(scale.max() - scale.min(), 0.5, epsilon = 1e-12);
    }
}
