// ── Numeric telemetry samples ──

use std::fmt;

/// One numeric telemetry reading, or an explicit "no data" gap.
///
/// The device reports readings as display strings (`"17 %"`, `"42 °C"`);
/// [`Sample::parse`] extracts the number. A string with no extractable
/// digits yields [`Sample::INVALID`] — renderers must treat that as a gap,
/// never as zero. NaN is the sentinel internally, which is why `Sample`
/// deliberately does not implement `PartialEq`: compare through
/// [`value()`](Self::value).
#[derive(Debug, Clone, Copy)]
pub struct Sample(f64);

impl Sample {
    /// The "no data" sentinel.
    pub const INVALID: Sample = Sample(f64::NAN);

    /// Extract a numeric sample from a raw telemetry string.
    ///
    /// Strips every character that is not an ASCII digit, `-`, or `.`,
    /// then parses the remainder as `f64`. Unparseable input degrades to
    /// [`Sample::INVALID`]; this never fails and never panics.
    pub fn parse(raw: &str) -> Sample {
        let numeric: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();
        numeric.parse::<f64>().map_or(Sample::INVALID, Sample)
    }

    /// The numeric value, or `None` for a gap.
    pub fn value(self) -> Option<f64> {
        if self.0.is_nan() { None } else { Some(self.0) }
    }

    /// `true` if this sample carries a real reading.
    pub fn is_valid(self) -> bool {
        !self.0.is_nan()
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample(value)
    }
}

impl Default for Sample {
    fn default() -> Self {
        Sample::INVALID
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("-"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_cpu_percentage() {
        assert_eq!(Sample::parse("17 %").value(), Some(17.0));
        assert_eq!(Sample::parse("42%").value(), Some(42.0));
    }

    #[test]
    fn parses_temperature_with_degree_sign() {
        assert_eq!(Sample::parse("35.2°C").value(), Some(35.2));
        assert_eq!(Sample::parse("42 °C").value(), Some(42.0));
    }

    #[test]
    fn parses_negative_values() {
        assert_eq!(Sample::parse("-3.5 °C").value(), Some(-3.5));
    }

    #[test]
    fn no_digits_yields_invalid() {
        assert!(!Sample::parse("").is_valid());
        assert!(!Sample::parse("n/a").is_valid());
        assert!(!Sample::parse("°C").is_valid());
    }

    #[test]
    fn garbage_punctuation_yields_invalid() {
        // Strips to "..", which does not parse.
        assert!(!Sample::parse("..").is_valid());
    }

    #[test]
    fn displays_gap_as_dash() {
        assert_eq!(Sample::INVALID.to_string(), "-");
        assert_eq!(Sample::from(3.0).to_string(), "3");
    }
}
