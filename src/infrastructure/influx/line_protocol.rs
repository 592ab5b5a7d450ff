//! InfluxDB line protocol encoding.
//!
//! `measurement,tag=value field=1.5 1700000000`

use std::collections::BTreeMap;
use std::fmt::Write;

/// One point in one series. Tags and fields are kept sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, f64>,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Point {
    pub fn new(measurement: impl Into<String>, timestamp: i64) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// Add a tag. Empty values are dropped; the protocol has no empty tags.
    pub fn tag(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.tags.insert(key.to_string(), value);
        }
        self
    }

    /// Add a float field. Non-finite values are dropped.
    pub fn field(mut self, key: &str, value: f64) -> Self {
        if value.is_finite() {
            self.fields.insert(key.to_string(), value);
        }
        self
    }

    pub fn to_line(&self) -> String {
        let mut line = escape(&self.measurement, &[',', ' ']);

        for (key, value) in &self.tags {
            let _ = write!(
                line,
                ",{}={}",
                escape(key, &[',', '=', ' ']),
                escape(value, &[',', '=', ' '])
            );
        }

        let fields = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}={}", escape(key, &[',', '=', ' ']), value))
            .collect::<Vec<_>>()
            .join(",");

        let _ = write!(line, " {} {}", fields, self.timestamp);
        line
    }
}

fn escape(raw: &str, specials: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if specials.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_point() {
        let point = Point::new("price", 1_700_000_000)
            .tag("station.id", "abc")
            .field("E5", 1.759)
            .field("Diesel", 1.619);

        assert_eq!(
            point.to_line(),
            "price,station.id=abc Diesel=1.619,E5=1.759 1700000000"
        );
    }

    #[test]
    fn test_escapes_tag_values() {
        let point = Point::new("price", 1)
            .tag("station.name", "Shell Berlin, Mitte=1")
            .field("E10", 1.0);

        assert_eq!(
            point.to_line(),
            r"price,station.name=Shell\ Berlin\,\ Mitte\=1 E10=1 1"
        );
    }

    #[test]
    fn test_drops_empty_tags_and_non_finite_fields() {
        let point = Point::new("price", 1)
            .tag("station.brand", "")
            .field("E5", f64::NAN)
            .field("Diesel", 1.5);

        assert!(point.tags.is_empty());
        assert_eq!(point.fields.len(), 1);
        assert_eq!(point.to_line(), "price Diesel=1.5 1");
    }
}
