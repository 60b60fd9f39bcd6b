use super::{Scale, ScaleContext, ScaleVariant};

impl Scale {
    /// Auto-ranging for text scales: one slot per label, integer steps.
    pub(super) fn pick_text(&mut self, ctx: &ScaleContext<'_>) {
        let label_count = match &self.variant {
            ScaleVariant::Text { labels } if !labels.is_empty() => Some(labels.len()),
            _ => None,
        };

        match label_count {
            Some(count) => {
                if self.min_auto {
                    self.min = 0.5;
                }
                if self.max_auto {
                    self.max = count as f64 + 0.5;
                }
            }
            None => {
                if self.min_auto {
                    self.min -= 0.5;
                }
                if self.max_auto {
                    self.max += 0.5;
                }
            }
        }

        if self.max - self.min < 0.1 {
            if self.max_auto {
                self.max = self.min + 10.0;
            } else {
                self.min = self.max - 10.0;
            }
        }

        if self.major_step_auto {
            let range = self.max - self.min;
            self.major_step = 1.0;
            self.major_step = if !self.is_prevent_label_overlap {
                1.0
            } else if label_count.is_some() {
                // Measured against one label per slot.
                (range / self.calc_max_labels(ctx)).ceil()
            } else {
                ((range - 1.0) / ctx.defaults.max_text_labels).trunc() + 1.0
            };
        } else {
            self.major_step = self.major_step.trunc();
        }
        if self.major_step <= 0.0 {
            self.major_step = 1.0;
        }

        if self.minor_step_auto {
            self.minor_step = (self.major_step / 10.0).max(1.0);
        }
        if self.mag_auto {
            self.mag = 0;
        }
    }
}
