use serde::Serialize;

use super::lerp;

/// Square-root scale: visual area, not radius, grows linearly with the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SqrtScale {
    domain: [f64; 2],
    range: [f64; 2],
}

fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

impl SqrtScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// NaN in, NaN out. A collapsed domain maps to the middle of the range.
    pub fn apply(&self, v: f64) -> f64 {
        if v.is_nan() {
            return f64::NAN;
        }
        let t0 = signed_sqrt(self.domain[0]);
        let t1 = signed_sqrt(self.domain[1]);
        let t = if t1 == t0 {
            0.5
        } else {
            (signed_sqrt(v) - t0) / (t1 - t0)
        };
        lerp(self.range, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_range() {
        let r = SqrtScale::new([100.0, 400.0], [2.0, 30.0]);
        assert!((r.apply(100.0) - 2.0).abs() < 1e-9);
        assert!((r.apply(400.0) - 30.0).abs() < 1e-9);
        // sqrt(225) is halfway between sqrt(100) and sqrt(400)
        assert!((r.apply(225.0) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn quadrupling_value_doubles_radius() {
        let r = SqrtScale::new([0.0, 1_000_000.0], [0.0, 30.0]);
        for p in [1.0, 250.0, 10_000.0, 123_456.0, 250_000.0] {
            let ratio = r.apply(4.0 * p) / r.apply(p);
            assert!((ratio - 2.0).abs() < 1e-9, "p={p} ratio={ratio}");
        }
    }

    #[test]
    fn radius_offset_obeys_sqrt_law_on_any_domain() {
        // with a non-zero domain start the law holds for the part above the zero-value radius
        let r = SqrtScale::new([50.0, 1_000_000.0], [2.0, 30.0]);
        let zero = r.apply(0.0);
        for p in [50.0, 900.0, 40_000.0, 250_000.0] {
            let ratio = (r.apply(4.0 * p) - zero) / (r.apply(p) - zero);
            assert!((ratio - 2.0).abs() < 1e-9, "p={p} ratio={ratio}");
        }
    }

    #[test]
    fn monotonic_and_nan_safe() {
        let r = SqrtScale::new([10.0, 1e9], [2.0, 30.0]);
        let mut last = f64::NEG_INFINITY;
        for p in [10.0, 11.0, 1e3, 5e4, 1e6, 7e7, 1e9] {
            let v = r.apply(p);
            assert!(v >= last);
            last = v;
        }
        assert!(r.apply(f64::NAN).is_nan());
        assert_eq!(SqrtScale::new([5.0, 5.0], [2.0, 30.0]).apply(5.0), 16.0);
    }
}
