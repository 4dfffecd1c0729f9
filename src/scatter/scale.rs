//! Scale primitives for the scatter plot: log/linear mappings, the rank
//! color ramp, and tick helpers.

use num_format::{Locale, ToFormattedString};

/// Logarithmic mapping of `[d0, d1]` onto `[0, 1]`. Inputs are clamped to
/// the domain, so a zero count lands on the axis edge instead of diverging.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    d0: f64,
    d1: f64,
}

impl LogScale {
    pub fn new(d0: f64, d1: f64) -> Self {
        Self { d0, d1 }
    }

    pub fn map(&self, v: f64) -> f64 {
        if self.d1 <= self.d0 {
            return 0.5;
        }
        let v = v.clamp(self.d0, self.d1);
        (v.ln() - self.d0.ln()) / (self.d1.ln() - self.d0.ln())
    }

    pub fn domain_max(&self) -> f64 {
        self.d1
    }
}

/// Linear mapping of a domain onto a range, clamped. A degenerate domain
/// maps everything to the middle of the range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 <= d0 {
            return (r0 + r1) / 2.0;
        }
        let t = ((v - d0) / (d1 - d0)).clamp(0.0, 1.0);
        r0 + (r1 - r0) * t
    }
}

/// Per-channel interpolation between two colors, `t` in `[0, 1]`.
pub fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (ch(from.0, to.0), ch(from.1, to.1), ch(from.2, to.2))
}

/// Powers of ten inside the scale's domain, as (normalized position, value)
/// pairs. These are the axis ticks of a log axis starting at 1.
pub fn decade_ticks(scale: &LogScale) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut v = 1.0f64;
    while v <= scale.domain_max() {
        out.push((scale.map(v), v));
        v *= 10.0;
    }
    out
}

/// Grouped count for axis labels, French grouping to match the UI labels.
pub fn format_count(v: f64) -> String {
    let n = v.round().max(0.0) as u64;
    n.to_formatted_string(&Locale::fr)
}
