use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Values at or below this are treated as zero by the log linearization.
pub const LOG_FLOOR: f64 = 1.0e-20;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const MINUTES_PER_DAY: f64 = 1_440.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Roughly +/- 10,000 years around the serial epoch.
const MAX_SERIAL_DAYS: f64 = 3_652_500.0;

/// `log10(x)` for `x > 1e-20`, `0.0` otherwise.
#[must_use]
pub fn safe_log10(x: f64) -> f64 {
    if x > LOG_FLOOR { x.log10() } else { 0.0 }
}

/// Sign-preserving power: `sign(x) * |x|^exponent`.
#[must_use]
pub fn signed_pow(x: f64, exponent: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum() * x.abs().powf(exponent)
    }
}

/// Picks a "nice" step (1, 2 or 5 times a power of ten) close to
/// `range / target_steps`.
#[must_use]
pub fn calc_step_size(range: f64, target_steps: f64) -> f64 {
    let raw_step = range / target_steps;
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let mag = raw_step.log10().floor();
    let mag_pow = 10_f64.powf(mag);
    let leading = (raw_step / mag_pow + 0.5) as i64;
    let leading = if leading > 5 {
        10.0
    } else if leading > 2 {
        5.0
    } else if leading > 1 {
        2.0
    } else {
        1.0
    };
    leading * mag_pow
}

/// Smallest 1-2-5 step for which `range / step` does not exceed `max_steps`.
#[must_use]
pub fn calc_bounded_step_size(range: f64, max_steps: f64) -> f64 {
    let raw_step = range / max_steps.max(1.0);
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let mag = raw_step.log10().floor();
    let mag_pow = 10_f64.powf(mag);
    let leading = (raw_step / mag_pow).ceil();
    let leading = if leading > 5.0 {
        10.0
    } else if leading > 2.0 {
        5.0
    } else if leading > 1.0 {
        2.0
    } else {
        1.0
    };
    leading * mag_pow
}

/// Broken-down calendar fields of a serial date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

fn serial_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a serial day number (days since 1899-12-30, fraction = time of
/// day) into a calendar timestamp.
#[must_use]
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    serial_epoch().checked_add_signed(Duration::try_milliseconds(millis)?)
}

#[must_use]
pub fn datetime_to_serial(time: NaiveDateTime) -> f64 {
    time.signed_duration_since(serial_epoch()).num_milliseconds() as f64 / MILLIS_PER_DAY
}

#[must_use]
pub fn utc_to_serial(time: DateTime<Utc>) -> f64 {
    datetime_to_serial(time.naive_utc())
}

#[must_use]
pub fn serial_to_calendar(serial: f64) -> Option<CalendarParts> {
    let time = serial_to_datetime(serial)?;
    Some(CalendarParts {
        year: time.year(),
        month: time.month(),
        day: time.day(),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
        millisecond: time.nanosecond() / 1_000_000,
    })
}

/// Builds a serial date from calendar fields that may overflow their usual
/// ranges (month 13, day 0, hour 24, ...); overflow carries into the next
/// larger unit.
#[must_use]
pub fn calendar_to_serial(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Option<f64> {
    let total_months = year.checked_mul(12)?.checked_add(month - 1)?;
    let normalized_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let normalized_month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(normalized_year, normalized_month, 1)?;
    let midnight = first_of_month.and_hms_opt(0, 0, 0)?;
    let offset_seconds = (day - 1)
        .checked_mul(86_400)?
        .checked_add(hour.checked_mul(3_600)?)?
        .checked_add(minute.checked_mul(60)?)?
        .checked_add(second)?;
    let time = midnight.checked_add_signed(Duration::try_seconds(offset_seconds)?)?;
    Some(datetime_to_serial(time))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        calc_bounded_step_size, calc_step_size, calendar_to_serial, safe_log10,
        serial_to_calendar, signed_pow, utc_to_serial,
    };

    #[test]
    fn step_size_snaps_to_one_two_five_ladder() {
        assert_relative_eq!(calc_step_size(100.0, 7.0), 10.0);
        assert_relative_eq!(calc_step_size(1.0, 7.0), 0.1);
        assert_relative_eq!(calc_step_size(30.0, 7.0), 5.0);
        assert_relative_eq!(calc_step_size(70.0, 7.0), 10.0);
        assert_relative_eq!(calc_step_size(12.0, 7.0), 2.0);
    }

    #[test]
    fn bounded_step_never_exceeds_max_steps() {
        for (range, max_steps) in [(100.0, 3.0), (97.0, 4.0), (1.0, 9.0), (12_345.0, 6.0)] {
            let step = calc_bounded_step_size(range, max_steps);
            assert!(range / step <= max_steps + 1e-9, "{range}/{step} > {max_steps}");
        }
    }

    #[test]
    fn safe_log_and_signed_pow_handle_edges() {
        assert_eq!(safe_log10(0.0), 0.0);
        assert_eq!(safe_log10(-5.0), 0.0);
        assert_relative_eq!(safe_log10(1000.0), 3.0);
        assert_eq!(signed_pow(-4.0, 0.5), -2.0);
        assert_eq!(signed_pow(0.0, 2.0), 0.0);
    }

    #[test]
    fn calendar_overflow_carries_into_next_year() {
        let serial = calendar_to_serial(2023, 13, 1, 0, 0, 0).expect("serial");
        let parts = serial_to_calendar(serial).expect("calendar");
        assert_eq!((parts.year, parts.month, parts.day), (2024, 1, 1));
    }

    #[test]
    fn serial_epoch_is_day_zero() {
        let serial = calendar_to_serial(1899, 12, 30, 0, 0, 0).expect("serial");
        assert_eq!(serial, 0.0);
        let noon = calendar_to_serial(1900, 1, 1, 12, 0, 0).expect("serial");
        assert_eq!(noon, 2.5);
    }

    #[test]
    fn utc_timestamps_keep_time_of_day() {
        let time = chrono::DateTime::parse_from_rfc3339("2024-02-29T18:00:00Z")
            .expect("timestamp")
            .with_timezone(&chrono::Utc);
        let serial = utc_to_serial(time);
        let parts = serial_to_calendar(serial).expect("calendar");
        assert_eq!((parts.year, parts.month, parts.day, parts.hour), (2024, 2, 29, 18));
        assert_relative_eq!(serial.fract(), 0.75);
    }
}
