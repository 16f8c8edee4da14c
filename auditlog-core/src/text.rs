use chrono::{DateTime, Utc};

const MINUTES_IN_HOUR: f64 = 60.0;
const MINUTES_IN_DAY: f64 = 1_440.0;
const MINUTES_IN_MONTH: f64 = 43_200.0;
const MINUTES_IN_YEAR: f64 = 525_600.0;

/// Cuts `s` to at most `len` characters, ending in `...` when anything was cut.
pub fn truncate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(len.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Elapsed time between two instants in a single unit, e.g. `5 minutes`.
///
/// The unit is the largest one the distance reaches (seconds up to years) and
/// the count is rounded half-up. Argument order does not matter.
pub fn format_distance_strict(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let millis = (end - start).num_milliseconds().unsigned_abs() as f64;
    let minutes = millis / 60_000.0;

    if minutes < 1.0 {
        return plural(round(millis / 1_000.0), "second");
    }
    if minutes < MINUTES_IN_HOUR {
        return plural(round(minutes), "minute");
    }
    if minutes < MINUTES_IN_DAY {
        return plural(round(minutes / MINUTES_IN_HOUR), "hour");
    }
    if minutes < MINUTES_IN_MONTH {
        return plural(round(minutes / MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_YEAR {
        let months = round(minutes / MINUTES_IN_MONTH);
        if months == 12 {
            return plural(1, "year");
        }
        return plural(months, "month");
    }
    plural(round(minutes / MINUTES_IN_YEAR), "year")
}

fn round(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
