use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::core::defaults::DateStepThresholds;
use crate::core::primitives::{
    CalendarParts, HOURS_PER_DAY, MINUTES_PER_DAY, SECONDS_PER_DAY, calc_step_size,
    calendar_to_serial, datetime_to_serial, serial_to_calendar, serial_to_datetime,
};
use crate::core::types::is_missing_or_non_finite;

use super::{AxisOrientation, Scale, ScaleContext, ScaleVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateUnit {
    /// Nominal length of one unit in days.
    #[must_use]
    pub fn days(self) -> f64 {
        match self {
            Self::Year => 365.0,
            Self::Month => 30.0,
            Self::Day => 1.0,
            Self::Hour => 1.0 / HOURS_PER_DAY,
            Self::Minute => 1.0 / MINUTES_PER_DAY,
            Self::Second => 1.0 / SECONDS_PER_DAY,
        }
    }

    /// Label format used when a date scale has no explicit format.
    #[must_use]
    pub fn default_format(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%b-%Y",
            Self::Day => "%-d-%b",
            Self::Hour | Self::Minute => "%H:%M",
            Self::Second => "%M:%S",
        }
    }
}

/// Calendar units of the major and minor steps of a date scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateUnits {
    pub major: DateUnit,
    pub minor: DateUnit,
}

impl Default for DateUnits {
    fn default() -> Self {
        Self {
            major: DateUnit::Year,
            minor: DateUnit::Year,
        }
    }
}

/// Step sizes, units and label format chosen for a date range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DateStepChoice {
    pub major_unit: DateUnit,
    pub major_step: f64,
    pub minor_unit: DateUnit,
    pub minor_step: f64,
    pub format: &'static str,
}

/// Picks date step units for a range of `range` days split into roughly
/// `target_steps` intervals.
pub(crate) fn calc_date_step_size(
    range: f64,
    target_steps: f64,
    thresholds: &DateStepThresholds,
) -> DateStepChoice {
    let raw_step = range / target_steps.max(1.0);
    // Minor estimate giving about four minors per major.
    let minor_estimate = range / (target_steps.max(1.0) * 3.0);

    if range > thresholds.year_year {
        let major_step = (raw_step / 365.0).ceil();
        DateStepChoice {
            major_unit: DateUnit::Year,
            major_step,
            minor_unit: DateUnit::Year,
            minor_step: if major_step == 1.0 {
                0.25
            } else {
                calc_step_size(major_step, target_steps)
            },
            format: "%Y",
        }
    } else if range > thresholds.year_month {
        let months = (minor_estimate / 30.0).ceil();
        DateStepChoice {
            major_unit: DateUnit::Year,
            major_step: (raw_step / 365.0).ceil(),
            minor_unit: DateUnit::Month,
            minor_step: snap(months, &[(6.0, 12.0), (3.0, 6.0)]),
            format: "%b-%Y",
        }
    } else if range > thresholds.month_month {
        let major_step = (raw_step / 30.0).ceil();
        DateStepChoice {
            major_unit: DateUnit::Month,
            major_step,
            minor_unit: DateUnit::Month,
            minor_step: major_step * 0.25,
            format: "%b-%Y",
        }
    } else if range > thresholds.day_day {
        let major_step = raw_step.ceil();
        DateStepChoice {
            major_unit: DateUnit::Day,
            major_step,
            minor_unit: DateUnit::Day,
            minor_step: major_step * 0.25,
            format: "%-d-%b",
        }
    } else if range > thresholds.day_hour {
        let hours = (minor_estimate * HOURS_PER_DAY).ceil();
        DateStepChoice {
            major_unit: DateUnit::Day,
            major_step: raw_step.ceil(),
            minor_unit: DateUnit::Hour,
            minor_step: snap(hours, &[(6.0, 12.0), (3.0, 6.0), (2.0, 3.0)]),
            format: "%-d-%b %H:%M",
        }
    } else if range > thresholds.hour_hour {
        let hours = (raw_step * HOURS_PER_DAY).ceil();
        let major_step = snap_or(hours, &[(12.0, 24.0), (6.0, 12.0), (2.0, 6.0), (1.0, 2.0)], 1.0);
        DateStepChoice {
            major_unit: DateUnit::Hour,
            major_step,
            minor_unit: DateUnit::Hour,
            minor_step: if major_step <= 1.0 {
                0.25
            } else if major_step <= 6.0 {
                1.0
            } else if major_step <= 12.0 {
                2.0
            } else {
                4.0
            },
            format: "%H:%M",
        }
    } else if range > thresholds.hour_minute {
        let minutes = (minor_estimate * MINUTES_PER_DAY).ceil();
        DateStepChoice {
            major_unit: DateUnit::Hour,
            major_step: (raw_step * HOURS_PER_DAY).ceil(),
            minor_unit: DateUnit::Minute,
            minor_step: snap_or(minutes, &[(15.0, 30.0), (5.0, 15.0), (1.0, 5.0)], 1.0),
            format: "%H:%M",
        }
    } else if range > thresholds.minute_minute {
        let minutes = (raw_step * MINUTES_PER_DAY).ceil();
        let major_step = snap_or(minutes, &[(15.0, 30.0), (5.0, 15.0), (1.0, 5.0)], 1.0);
        DateStepChoice {
            major_unit: DateUnit::Minute,
            major_step,
            minor_unit: DateUnit::Minute,
            minor_step: sub_step(major_step),
            format: "%H:%M",
        }
    } else if range > thresholds.minute_second {
        let seconds = (minor_estimate * SECONDS_PER_DAY).ceil();
        DateStepChoice {
            major_unit: DateUnit::Minute,
            major_step: (raw_step * MINUTES_PER_DAY).ceil(),
            minor_unit: DateUnit::Second,
            minor_step: snap_or(seconds, &[(15.0, 30.0), (5.0, 15.0), (1.0, 5.0)], 1.0),
            format: "%M:%S",
        }
    } else {
        let seconds = (raw_step * SECONDS_PER_DAY).ceil();
        let major_step = snap_or(seconds, &[(15.0, 30.0), (5.0, 15.0), (1.0, 5.0)], 1.0);
        DateStepChoice {
            major_unit: DateUnit::Second,
            major_step,
            minor_unit: DateUnit::Second,
            minor_step: sub_step(major_step),
            format: "%M:%S",
        }
    }
}

/// First `(above, snapped)` rule with `value > above` wins; otherwise the
/// value is kept.
fn snap(value: f64, rules: &[(f64, f64)]) -> f64 {
    rules
        .iter()
        .find(|(above, _)| value > *above)
        .map_or(value, |(_, snapped)| *snapped)
}

fn snap_or(value: f64, rules: &[(f64, f64)], fallback: f64) -> f64 {
    rules
        .iter()
        .find(|(above, _)| value > *above)
        .map_or(fallback, |(_, snapped)| *snapped)
}

fn sub_step(major_step: f64) -> f64 {
    if major_step <= 1.0 {
        0.25
    } else if major_step <= 5.0 {
        1.0
    } else {
        5.0
    }
}

/// Adds `amount` calendar units to a serial date.
///
/// Whole years and months follow the calendar (month ends clamp); their
/// fractional part is added as nominal days.
pub(crate) fn add_date_units(serial: f64, unit: DateUnit, amount: f64) -> f64 {
    match unit {
        DateUnit::Year | DateUnit::Month => {
            let months_per_unit = if unit == DateUnit::Year { 12.0 } else { 1.0 };
            let whole = amount.trunc();
            let fraction = amount - whole;
            let shifted = add_whole_months(serial, whole * months_per_unit).unwrap_or(serial);
            shifted + fraction * unit.days()
        }
        DateUnit::Day | DateUnit::Hour | DateUnit::Minute | DateUnit::Second => {
            serial + amount * unit.days()
        }
    }
}

fn add_whole_months(serial: f64, months: f64) -> Option<f64> {
    let time = serial_to_datetime(serial)?;
    let count = u32::try_from(months.abs() as i64).ok()?;
    let shifted = if months >= 0.0 {
        time.checked_add_months(Months::new(count))?
    } else {
        time.checked_sub_months(Months::new(count))?
    };
    Some(datetime_to_serial(shifted))
}

/// Serial date of the calendar fields with everything below `unit` cleared.
fn truncate_to_unit(parts: CalendarParts, unit: DateUnit, bump: i64) -> Option<f64> {
    let year = i64::from(parts.year);
    let month = i64::from(parts.month);
    let day = i64::from(parts.day);
    let hour = i64::from(parts.hour);
    let minute = i64::from(parts.minute);
    let second = i64::from(parts.second);
    match unit {
        DateUnit::Year => calendar_to_serial(year + bump, 1, 1, 0, 0, 0),
        DateUnit::Month => calendar_to_serial(year, month + bump, 1, 0, 0, 0),
        DateUnit::Day => calendar_to_serial(year, month, day + bump, 0, 0, 0),
        DateUnit::Hour => calendar_to_serial(year, month, day, hour + bump, 0, 0),
        DateUnit::Minute => calendar_to_serial(year, month, day, hour, minute + bump, 0),
        DateUnit::Second => calendar_to_serial(year, month, day, hour, minute, second + bump),
    }
}

fn is_on_unit_boundary(parts: CalendarParts, unit: DateUnit) -> bool {
    let clock_clear = parts.hour == 0 && parts.minute == 0 && parts.second == 0;
    match unit {
        DateUnit::Year => parts.month == 1 && parts.day == 1 && clock_clear,
        DateUnit::Month => parts.day == 1 && clock_clear,
        DateUnit::Day => clock_clear,
        DateUnit::Hour => parts.minute == 0 && parts.second == 0,
        DateUnit::Minute => parts.second == 0,
        DateUnit::Second => true,
    }
}

/// Formats a serial date with a `chrono` strftime pattern.
pub(crate) fn format_serial_date(serial: f64, format: &str) -> String {
    serial_to_datetime(serial)
        .map(|time| time.format(format).to_string())
        .unwrap_or_default()
}

impl Scale {
    pub(super) fn pick_date(&mut self, ctx: &ScaleContext<'_>) {
        if self.max - self.min < 1.0e-20 {
            if self.max_auto {
                self.max += 0.2 * if self.max == 0.0 { 1.0 } else { self.max.abs() };
            }
            if self.min_auto {
                self.min -= 0.2 * if self.min == 0.0 { 1.0 } else { self.min.abs() };
            }
        }

        if self.major_step_auto {
            let range = self.max - self.min;
            let choice =
                calc_date_step_size(range, ctx.target_steps(self.orientation), ctx.date_steps);
            self.apply_date_choice(choice);

            if self.is_prevent_label_overlap {
                let max_labels = self.calc_max_labels(ctx);
                if max_labels < self.calc_num_tics(ctx.defaults.max_major_tics) as f64 {
                    let bounded = calc_date_step_size(range, max_labels, ctx.date_steps);
                    self.apply_date_choice(bounded);
                }
            }
        }

        if self.min_auto {
            self.min = self.calc_even_step_date(self.min, false);
        }
        if self.max_auto {
            self.max = self.calc_even_step_date(self.max, true);
        }
        if self.mag_auto {
            self.mag = 0;
        }
    }

    /// Label format of a date-as-ordinal scale, chosen from the date span of
    /// the first series.
    pub(super) fn pick_date_as_ordinal_format(&mut self, ctx: &ScaleContext<'_>) {
        let range = ctx
            .first_series
            .filter(|points| points.len() > 1)
            .and_then(|points| {
                let first = points.get(0)?;
                let last = points.get(points.len() - 1)?;
                let (start, end) = match self.orientation {
                    AxisOrientation::Horizontal => (first.x, last.x),
                    AxisOrientation::Vertical => (first.y, last.y),
                };
                if is_missing_or_non_finite(start) || is_missing_or_non_finite(end) {
                    None
                } else {
                    Some(end - start)
                }
            })
            .unwrap_or(10.0);

        let choice =
            calc_date_step_size(range, ctx.target_steps(self.orientation), ctx.date_steps);
        if let ScaleVariant::DateAsOrdinal { units } = &mut self.variant {
            units.major = choice.major_unit;
            units.minor = choice.minor_unit;
        }
        if self.format_auto {
            self.date_format = choice.format.to_owned();
        }
    }

    fn apply_date_choice(&mut self, choice: DateStepChoice) {
        let major_step_auto = self.major_step_auto;
        let minor_step_auto = self.minor_step_auto;
        if let ScaleVariant::Date { units } = &mut self.variant {
            if major_step_auto {
                units.major = choice.major_unit;
            }
            if minor_step_auto {
                units.minor = choice.minor_unit;
            }
        }
        if major_step_auto {
            self.major_step = choice.major_step;
        }
        if minor_step_auto {
            self.minor_step = choice.minor_step;
        }
        if self.format_auto {
            self.date_format = choice.format.to_owned();
        }
    }

    fn units(&self) -> DateUnits {
        self.date_units().unwrap_or_default()
    }

    /// Snaps `date` to the start of its major unit, or to the start of the
    /// next one when `upward` and `date` is not already on a boundary.
    pub(super) fn calc_even_step_date(&self, date: f64, upward: bool) -> f64 {
        let unit = self.units().major;
        let Some(parts) = serial_to_calendar(date) else {
            return date;
        };
        if upward && is_on_unit_boundary(parts, unit) {
            return date;
        }
        truncate_to_unit(parts, unit, i64::from(upward)).unwrap_or(date)
    }

    pub(super) fn date_base_tic(&self) -> f64 {
        let unit = self.units().major;
        let Some(parts) = serial_to_calendar(self.min) else {
            return self.min;
        };
        let start = truncate_to_unit(parts, unit, 0).unwrap_or(self.min);
        if start < self.min {
            truncate_to_unit(parts, unit, 1).unwrap_or(start)
        } else {
            start
        }
    }

    pub(super) fn date_major_tic_value(&self, base: f64, index: f64) -> f64 {
        add_date_units(base, self.units().major, index * self.major_step)
    }

    pub(super) fn date_minor_tic_value(&self, base: f64, index: i64) -> f64 {
        add_date_units(base, self.units().minor, index as f64 * self.minor_step)
    }

    pub(super) fn date_minor_start(&self, base: f64) -> i64 {
        let offset = self.min - base;
        let unit_days = match self.units().minor {
            DateUnit::Month => 28.0,
            other => other.days(),
        };
        (offset / (unit_days * self.minor_step)) as i64
    }

    pub(super) fn date_num_tics(&self) -> i64 {
        let unit = self.units().major;
        let span_in_units = match unit {
            DateUnit::Year | DateUnit::Month => {
                match (serial_to_calendar(self.min), serial_to_calendar(self.max)) {
                    (Some(start), Some(end)) => {
                        let years = f64::from(end.year - start.year);
                        if unit == DateUnit::Year {
                            years
                        } else {
                            f64::from(end.month) - f64::from(start.month) + 12.0 * years
                        }
                    }
                    _ => (self.max - self.min) / unit.days(),
                }
            }
            _ => (self.max - self.min) / unit.days(),
        };
        (span_in_units / self.major_step + 1.001) as i64
    }
}
