//! Display formatting: Chilean peso amounts and fixed-timezone dates.
//!
//! Currency renders with no decimal places, thousands grouped with `.` and a
//! leading `$` (es-CL). "Today" and "now" are the current instant rendered in
//! `America/Santiago` regardless of the host timezone — these values feed
//! query keys and default form values, so pure `*_at` variants over an
//! explicit instant exist for deterministic tests.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Santiago;
use chrono_tz::Tz;

/// Civil timezone every displayed date is rendered in.
pub const DISPLAY_TZ: Tz = Santiago;

/// Currency symbol for formatted amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// Format an amount as Chilean pesos: `$` symbol, zero decimals, thousands
/// grouped with `.`.
///
/// Non-finite input formats as the zero amount.
pub fn format_currency(amount: f64) -> String {
    let rounded = if amount.is_finite() {
        amount.round() as i64
    } else {
        0
    };
    let sign = if rounded < 0 { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_SYMBOL}{}",
        group_thousands(rounded.unsigned_abs())
    )
}

/// Parse a formatted peso amount back to its numeric value.
///
/// Strips the symbol and grouping separators; anything that still fails to
/// parse yields `NaN`. Formatting then parsing round-trips the rounded
/// amount.
pub fn parse_currency(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return f64::NAN;
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// The calendar date of `instant` in the display timezone.
pub fn date_at(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&DISPLAY_TZ).date_naive()
}

/// `instant` rendered in the display timezone.
pub fn datetime_at(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&DISPLAY_TZ)
}

/// Today's date in the display timezone.
pub fn today() -> NaiveDate {
    date_at(Utc::now())
}

/// The current timestamp in the display timezone.
pub fn now() -> DateTime<Tz> {
    datetime_at(Utc::now())
}

/// `YYYY-MM-DD` rendering used for query parameters and cache keys.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pesos_group_thousands_with_dots() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(990.0), "$990");
        assert_eq!(format_currency(6500.0), "$6.500");
        assert_eq!(format_currency(1_234_567.0), "$1.234.567");
        assert_eq!(format_currency(-4200.0), "-$4.200");
    }

    #[test]
    fn amounts_round_to_whole_pesos() {
        assert_eq!(format_currency(1999.6), "$2.000");
        assert_eq!(format_currency(1999.4), "$1.999");
    }

    #[test]
    fn non_finite_amounts_format_as_zero() {
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(f64::INFINITY), "$0");
    }

    #[test]
    fn format_then_parse_round_trips() {
        for amount in [0.0, 990.0, 6500.0, 1_234_567.0, 1999.6] {
            let parsed = parse_currency(&format_currency(amount));
            assert_eq!(parsed, amount.round());
        }
    }

    #[test]
    fn garbage_parses_to_nan() {
        assert!(parse_currency("").is_nan());
        assert!(parse_currency("gratis").is_nan());
    }

    #[test]
    fn dates_follow_santiago_not_the_host() {
        // 2026-08-01 01:30 UTC is still 2026-07-31 in Santiago (UTC-4)
        let instant = Utc.with_ymd_and_hms(2026, 8, 1, 1, 30, 0).unwrap();
        assert_eq!(
            date_at(instant),
            NaiveDate::from_ymd_opt(2026, 7, 31).unwrap()
        );

        // later the same UTC day it has rolled over in Santiago too
        let instant = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        assert_eq!(
            date_at(instant),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
        );
    }

    #[test]
    fn iso_rendering_for_query_params() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(format_iso_date(date), "2026-08-01");
    }
}
