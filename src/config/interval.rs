//! Poll interval parsing.
//!
//! Accepts the compact duration syntax operators already use for the
//! `--interval` flag: one or more `<number><unit>` pairs such as `15m`,
//! `1h30m`, `90s` or `1.5h`. Units are `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`.

use crate::domain::errors::ConfigError;
use std::time::Duration;

pub const DEFAULT_INTERVAL: &str = "15m";

pub fn parse_interval(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidInterval {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut rest = trimmed;
    let mut total_nanos: f64 = 0.0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| invalid("malformed number"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid("unknown unit")),
        };
        rest = &rest[unit_len..];

        total_nanos += value * nanos_per_unit;
    }

    if total_nanos < 1.0 {
        return Err(invalid("interval must be positive"));
    }
    if total_nanos > u64::MAX as f64 {
        return Err(invalid("interval too large"));
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
