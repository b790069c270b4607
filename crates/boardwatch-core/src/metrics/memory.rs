// ── Memory-size normalization ──

use std::fmt;

/// Unit suffix of a device-reported memory size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryUnit {
    /// Mebibytes (`Mi`).
    Mebibytes,
    /// Gibibytes (`Gi`).
    Gibibytes,
    /// Decimal megabytes (`MB`).
    Megabytes,
    /// Decimal gigabytes (`GB`).
    Gigabytes,
    /// Anything else, including a missing suffix.
    Unknown,
}

impl MemoryUnit {
    fn parse(token: &str) -> MemoryUnit {
        match token {
            "Mi" => MemoryUnit::Mebibytes,
            "Gi" => MemoryUnit::Gibibytes,
            "MB" => MemoryUnit::Megabytes,
            "GB" => MemoryUnit::Gigabytes,
            _ => MemoryUnit::Unknown,
        }
    }

    /// Multiplier that takes a magnitude in this unit to GiB.
    ///
    /// An [`Unknown`](MemoryUnit::Unknown) unit maps to zero so that a
    /// malformed reading contributes nothing rather than a wild value.
    fn gib_factor(self) -> f64 {
        match self {
            MemoryUnit::Mebibytes => 1.0 / 1024.0,
            MemoryUnit::Gibibytes => 1.0,
            MemoryUnit::Megabytes | MemoryUnit::Gigabytes => 1.0 / 1.073_741_824,
            MemoryUnit::Unknown => 0.0,
        }
    }
}

/// A memory size as reported by the device: a magnitude plus a unit
/// suffix, e.g. `"512 Mi"` or `"16Gi"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySize {
    magnitude: f64,
    unit: MemoryUnit,
}

impl MemorySize {
    /// Parse a raw size string.
    ///
    /// Whitespace anywhere in the string is ignored, so `"512 Mi"` and
    /// `"512Mi"` are equivalent. The leading run of digits and dots is the
    /// magnitude; the rest is the unit token. Strings with no parseable
    /// magnitude come back as zero with an unknown unit.
    pub fn parse(raw: &str) -> MemorySize {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let split = compact
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(compact.len());
        let (digits, suffix) = compact.split_at(split);
        let magnitude = digits.parse::<f64>().unwrap_or(0.0);
        let unit = MemoryUnit::parse(suffix);
        MemorySize { magnitude, unit }
    }

    /// The size in GiB. Unknown units normalize to `0.0`.
    pub fn to_gib(self) -> f64 {
        self.magnitude * self.unit.gib_factor()
    }

    /// The unit suffix this size was reported in.
    pub fn unit(self) -> MemoryUnit {
        self.unit
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} GiB", self.to_gib())
    }
}

/// Derived RAM usage figures for the dashboard.
///
/// Built from the device's free and installed memory readings. The used
/// amount is `installed - free` after both are normalized to GiB. The
/// percentage split is `None` when installed memory normalizes to zero
/// (absent reading or unknown unit) — renderers show a placeholder
/// instead of a division-by-zero artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RamUsage {
    pub used_gib: f64,
    pub free_gib: f64,
    pub used_pct: Option<f64>,
    pub free_pct: Option<f64>,
}

impl RamUsage {
    /// Compute usage from raw free/installed strings.
    pub fn compute(free: &str, installed: &str) -> RamUsage {
        let free_gib = MemorySize::parse(free).to_gib();
        let installed_gib = MemorySize::parse(installed).to_gib();
        let used_gib = (installed_gib - free_gib).max(0.0);

        let (used_pct, free_pct) = if installed_gib > 0.0 {
            (
                Some(round2(used_gib / installed_gib * 100.0)),
                Some(round2(free_gib / installed_gib * 100.0)),
            )
        } else {
            (None, None)
        };

        RamUsage { used_gib, free_gib, used_pct, free_pct }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
