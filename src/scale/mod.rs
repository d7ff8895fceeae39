// src/scale/mod.rs
pub mod color;
pub mod linear;
pub mod sqrt;

use serde::Serialize;

pub use color::{Rgb, SequentialScale};
pub use linear::LinearScale;
pub use sqrt::SqrtScale;

/// Domain used whenever a year has nothing to measure.
pub const DEFAULT_DOMAIN: [f64; 2] = [0.0, 1.0];

/// `[min, max]` of a batch of values, ignoring NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extent {
    Empty,
    Range { min: f64, max: f64 },
}

impl Extent {
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(Extent::Empty, |acc, v| match acc {
                Extent::Empty => Extent::Range { min: v, max: v },
                Extent::Range { min, max } => Extent::Range {
                    min: min.min(v),
                    max: max.max(v),
                },
            })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Extent::Empty)
    }

    /// Bounds as a domain, or `fallback` when nothing was observed.
    pub fn bounds_or(&self, fallback: [f64; 2]) -> [f64; 2] {
        match *self {
            Extent::Empty => fallback,
            Extent::Range { min, max } => [min, max],
        }
    }
}

/// Linear interpolation of `range` at normalized position `t`.
pub(crate) fn lerp(range: [f64; 2], t: f64) -> f64 {
    range[0] + (range[1] - range[0]) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_skips_nan() {
        let e = Extent::of([f64::NAN, 3.0, -1.0, f64::NAN, 2.0]);
        assert_eq!(e, Extent::Range { min: -1.0, max: 3.0 });
        assert_eq!(e.bounds_or(DEFAULT_DOMAIN), [-1.0, 3.0]);
    }

    #[test]
    fn extent_of_nothing_falls_back() {
        let e = Extent::of([f64::NAN]);
        assert!(e.is_empty());
        assert_eq!(e.bounds_or(DEFAULT_DOMAIN), [0.0, 1.0]);
        assert!(Extent::of(Vec::<f64>::new()).is_empty());
    }
}
