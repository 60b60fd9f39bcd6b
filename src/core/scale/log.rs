use crate::core::primitives::{calc_step_size, safe_log10};

use super::{Scale, ScaleContext};

/// Minor tics of a log scale start one decade below the base tic.
pub(super) const LOG_MINOR_START: i64 = -9;

/// `log10(1..=9)`, the minor tic offsets inside one decade.
const LOG_MINOR_TABLE: [f64; 9] = [
    0.0,
    0.301_029_995_663_981_2,
    0.477_121_254_719_662_4,
    0.602_059_991_327_962_4,
    0.698_970_004_336_018_8,
    0.778_151_250_383_643_6,
    0.845_098_040_014_256_8,
    0.903_089_986_991_943_6,
    0.954_242_509_439_324_9,
];

impl Scale {
    /// Auto-ranging for log scales: bounds snap out to whole decades and
    /// non-positive bounds are repaired.
    pub(super) fn pick_log(&mut self, ctx: &ScaleContext<'_>) {
        if self.mag_auto {
            self.mag = 0;
        }
        if self.format_auto {
            self.decimals = 0;
        }

        // Grace may have pushed a positive data minimum onto zero.
        if self.min_auto && self.min <= 0.0 && self.is_domain_valid(self.range_min) {
            self.min = self.range_min;
        }

        if self.min <= 0.0 && self.max <= 0.0 {
            self.min = 1.0;
            self.max = 10.0;
        } else if self.min <= 0.0 {
            self.min = self.max / 10.0;
        } else if self.max <= 0.0 {
            self.max = self.min * 10.0;
        }

        if self.max - self.min < 1.0e-20 {
            if self.max_auto {
                self.max *= 2.0;
            }
            if self.min_auto {
                self.min /= 2.0;
            }
        }

        if self.min_auto {
            self.min = 10_f64.powf(safe_log10(self.min).floor());
        }
        if self.max_auto {
            self.max = 10_f64.powf(safe_log10(self.max).ceil());
        }

        if self.major_step_auto {
            let decades = safe_log10(self.max) - safe_log10(self.min);
            let target = ctx.target_steps(self.orientation);
            self.major_step = if decades > target {
                calc_step_size(decades, target).ceil().max(1.0)
            } else {
                1.0
            };
        }
        if self.minor_step_auto {
            self.minor_step = 1.0;
        }
    }

    pub(super) fn log_base_tic(&self) -> f64 {
        (safe_log10(self.min) - 1.0e-8).ceil()
    }

    pub(super) fn log_num_tics(&self) -> i64 {
        let decades = safe_log10(self.max).floor() - safe_log10(self.min).ceil();
        (decades / self.major_step + 1.001) as i64
    }
}

pub(super) fn log_minor_tic_value(base: f64, index: i64) -> f64 {
    let decade = index.div_euclid(9) as f64;
    let offset = usize::try_from(index.rem_euclid(9)).map_or(0.0, |slot| LOG_MINOR_TABLE[slot]);
    base + decade + offset
}

/// Major tics, in decades, for a log range narrower than one decade.
///
/// Follows the 1-2-5 ladder; when fewer than two ladder values fit, every
/// integer multiple of the decade is used instead.
pub(crate) fn log_ladder_tics(min: f64, max: f64) -> Vec<f64> {
    if min <= 0.0 || max <= 0.0 {
        return Vec::new();
    }
    let (low, high) = if min <= max { (min, max) } else { (max, min) };

    let collect = |multipliers: &[f64]| {
        let min_exp = low.log10().floor() as i32;
        let max_exp = high.log10().ceil() as i32;
        let mut tics = Vec::new();
        for exp in min_exp..=max_exp {
            let decade = 10_f64.powi(exp);
            for multiplier in multipliers {
                let candidate = decade * multiplier;
                if approx_within(candidate, low, high) {
                    tics.push(candidate.log10());
                }
            }
        }
        tics
    };

    let ladder = collect(&[1.0, 2.0, 5.0]);
    if ladder.len() >= 2 {
        ladder
    } else {
        collect(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
    }
}

fn approx_within(value: f64, low: f64, high: f64) -> bool {
    let tolerance = high.abs().max(1.0) * 1e-12;
    value >= low - tolerance && value <= high + tolerance
}
