//! Duration strings in the `1h2m3.5s` notation.
//!
//! A duration is an optional sign followed by one or more decimal numbers,
//! each with a unit suffix: `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.
//! The bare string `0` is also accepted.

use std::fmt;

use chrono::TimeDelta;
use serde::de::{self, Deserializer, Visitor};
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Errors produced while parsing a duration string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is out of range")]
    OutOfRange(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a duration string into a signed [`TimeDelta`]
pub fn parse(input: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_number) = if let Some(stripped) = after_int.strip_prefix('.') {
            let frac_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
            stripped.split_at(frac_len)
        } else {
            ("", after_int)
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_number
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map_or(after_number.len(), |(idx, _)| idx);
        let (unit, remainder) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let out_of_range = || DurationError::OutOfRange(input.to_string());
        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| out_of_range())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(out_of_range)?;

        // Digits beyond nanosecond precision cannot change the result.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| invalid())?;
            let divisor = 10u128.pow(u32::try_from(frac_digits.len()).map_err(|_| invalid())?);
            nanos = nanos
                .checked_add(frac * scale / divisor)
                .ok_or_else(out_of_range)?;
        }

        total = total.checked_add(nanos).ok_or_else(out_of_range)?;
        if total > i64::MAX as u128 {
            return Err(out_of_range());
        }
        rest = remainder;
    }

    let signed = i64::try_from(total).map_err(|_| DurationError::OutOfRange(input.to_string()))?;
    Ok(TimeDelta::nanoseconds(if negative { -signed } else { signed }))
}

/// Render a [`TimeDelta`] in the same notation [`parse`] accepts
pub fn format(delta: TimeDelta) -> String {
    let Some(nanos) = delta.num_nanoseconds() else {
        return format!("{}s", delta.num_seconds());
    };
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let abs = u128::from(nanos.unsigned_abs());

    if abs < NANOS_PER_SECOND {
        let body = if abs % NANOS_PER_MILLI == 0 {
            format!("{}ms", abs / NANOS_PER_MILLI)
        } else if abs % NANOS_PER_MICRO == 0 {
            format!("{}µs", abs / NANOS_PER_MICRO)
        } else {
            format!("{abs}ns")
        };
        return format!("{sign}{body}");
    }

    let hours = abs / NANOS_PER_HOUR;
    let minutes = (abs % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = (abs % NANOS_PER_MINUTE) / NANOS_PER_SECOND;
    let sub_second = abs % NANOS_PER_SECOND;

    let mut out = String::from(sign);
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if sub_second == 0 {
        out.push_str(&format!("{seconds}s"));
    } else {
        let fraction = format!("{sub_second:09}");
        out.push_str(&format!("{seconds}.{}s", fraction.trim_end_matches('0')));
    }
    out
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = TimeDelta;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration string such as \"5s\" or \"1m30s\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TimeDelta, E> {
        parse(value).map_err(E::custom)
    }
}

/// Serde `deserialize_with` adapter for duration strings
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
    deserializer.deserialize_str(DurationVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse("5s"), Ok(TimeDelta::seconds(5)));
        assert_eq!(parse("250ms"), Ok(TimeDelta::milliseconds(250)));
        assert_eq!(parse("3us"), Ok(TimeDelta::microseconds(3)));
        assert_eq!(parse("3µs"), Ok(TimeDelta::microseconds(3)));
        assert_eq!(parse("7ns"), Ok(TimeDelta::nanoseconds(7)));
        assert_eq!(parse("2h"), Ok(TimeDelta::hours(2)));
    }

    #[test]
    fn test_parse_compound_and_fractional() {
        assert_eq!(parse("1m30s"), Ok(TimeDelta::seconds(90)));
        assert_eq!(parse("1.5s"), Ok(TimeDelta::milliseconds(1500)));
        assert_eq!(parse(".5s"), Ok(TimeDelta::milliseconds(500)));
        assert_eq!(parse("1h0m0.001s"), Ok(TimeDelta::hours(1) + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_parse_signs_and_zero() {
        assert_eq!(parse("0"), Ok(TimeDelta::zero()));
        assert_eq!(parse("-0"), Ok(TimeDelta::zero()));
        assert_eq!(parse("0s"), Ok(TimeDelta::zero()));
        assert_eq!(parse("-5s"), Ok(TimeDelta::seconds(-5)));
        assert_eq!(parse("+5s"), Ok(TimeDelta::seconds(5)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse(""), Err(DurationError::Invalid(String::new())));
        assert_eq!(parse("-"), Err(DurationError::Invalid("-".to_string())));
        assert_eq!(parse("5"), Err(DurationError::MissingUnit("5".to_string())));
        assert_eq!(parse("abc"), Err(DurationError::Invalid("abc".to_string())));
        assert!(matches!(
            parse("5d"),
            Err(DurationError::UnknownUnit { ref unit, .. }) if unit == "d"
        ));
        assert!(matches!(parse("99999999999h"), Err(DurationError::OutOfRange(_))));
    }

    #[test]
    fn test_format() {
        assert_eq!(format(TimeDelta::zero()), "0s");
        assert_eq!(format(TimeDelta::seconds(5)), "5s");
        assert_eq!(format(TimeDelta::seconds(-5)), "-5s");
        assert_eq!(format(TimeDelta::seconds(90)), "1m30s");
        assert_eq!(format(TimeDelta::hours(1)), "1h0m0s");
        assert_eq!(format(TimeDelta::milliseconds(1500)), "1.5s");
        assert_eq!(format(TimeDelta::milliseconds(250)), "250ms");
        assert_eq!(format(TimeDelta::nanoseconds(42)), "42ns");
    }

    proptest! {
        #[test]
        fn prop_formatted_durations_parse_back(nanos in -1_000_000_000_000_000i64..1_000_000_000_000_000i64) {
            let delta = TimeDelta::nanoseconds(nanos);
            prop_assert_eq!(parse(&format(delta)), Ok(delta));
        }
    }
}
