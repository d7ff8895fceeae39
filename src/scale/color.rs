use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::fmt;

/// 11-class ColorBrewer RdYlGn, red (poor) → green (good).
const RDYLGN_HEX: &str = "a50026d73027f46d43fdae61fee08bffffbfd9ef8ba6d96a66bd631a9850006837";

static RDYLGN: Lazy<Vec<[f64; 3]>> = Lazy::new(|| {
    RDYLGN_HEX
        .as_bytes()
        .chunks(6)
        .map(|c| {
            let ch = |i: usize| {
                let s = std::str::from_utf8(&c[i..i + 2]).unwrap_or("00");
                u8::from_str_radix(s, 16).unwrap_or(0) as f64
            };
            [ch(0), ch(2), ch(4)]
        })
        .collect()
});

/// Fill for values that cannot be placed on the palette.
pub const UNKNOWN: Rgb = Rgb {
    r: 0xcc,
    g: 0xcc,
    b: 0xcc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    fn from_channels(c: [f64; 3]) -> Self {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: q(c[0]),
            g: q(c[1]),
            b: q(c[2]),
        }
    }

    /// Hue in degrees on `[-60, 300)`, so crimson sits just below red instead of wrapping to 340.
    /// `None` for greys.
    pub fn hue(&self) -> Option<f64> {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        if d == 0.0 {
            return None;
        }
        Some(if max == r {
            60.0 * (g - b) / d
        } else if max == g {
            60.0 * (b - r) / d + 120.0
        } else {
            60.0 * (r - g) / d + 240.0
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Uniform B-spline through the palette; `t` is clamped to `[0, 1]`.
fn spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (i, t) = if t <= 0.0 {
        (0, 0.0)
    } else if t >= 1.0 {
        (n - 1, 1.0)
    } else {
        ((t * n as f64).floor() as usize, t)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };
    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

/// RdYlGn evaluated at `t`; NaN yields [`UNKNOWN`].
pub fn interpolate_rdylgn(t: f64) -> Rgb {
    if t.is_nan() {
        return UNKNOWN;
    }
    let mut out = [0.0; 3];
    for (ch, slot) in out.iter_mut().enumerate() {
        let values: Vec<f64> = RDYLGN.iter().map(|c| c[ch]).collect();
        *slot = spline(&values, t);
    }
    Rgb::from_channels(out)
}

/// Continuous score → color mapping across the domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequentialScale {
    domain: [f64; 2],
}

impl SequentialScale {
    pub fn new(domain: [f64; 2]) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Normalized position of `v` in the domain; 0.5 when the domain is collapsed.
    pub fn position(&self, v: f64) -> f64 {
        let [x0, x1] = self.domain;
        if v.is_nan() {
            f64::NAN
        } else if x0 == x1 {
            0.5
        } else {
            (v - x0) / (x1 - x0)
        }
    }

    pub fn apply(&self, v: f64) -> Rgb {
        interpolate_rdylgn(self.position(v))
    }
}
