use serde::Serialize;

use super::lerp;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// A collapsed domain maps everything to the middle of the range.
    pub fn apply(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let t = if d1 == d0 { 0.5 } else { (v - d0) / (d1 - d0) };
        lerp(self.range, t)
    }

    /// Extend the domain outward to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let [mut start, mut stop] = self.domain;
        if !start.is_finite() || !stop.is_finite() || start == stop || count == 0 {
            return self;
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prestep: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = Some(step);
        }

        self.domain = if reversed { [stop, start] } else { [start, stop] };
        self
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [a, b] = self.domain;
        ticks(a.min(b), a.max(b), count as f64)
    }

    /// Fraction digits needed to tell `ticks(count)` apart.
    pub fn tick_precision(&self, count: usize) -> usize {
        let [a, b] = self.domain;
        let inc = tick_increment(a.min(b), a.max(b), count as f64);
        let step = if inc < 0.0 { -1.0 / inc } else { inc };
        if !step.is_finite() || step <= 0.0 {
            return 0;
        }
        (-step.log10().floor()).max(0.0) as usize
    }
}

/// (i1, i2, inc) such that ticks are `i * inc` (inc > 0) or `i / -inc` (inc < 0).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0.0 {
        let pos = 10f64.powf(-power) / factor;
        let mut i1 = (start * pos).round();
        let mut i2 = (stop * pos).round();
        if i1 / pos < start {
            i1 += 1.0;
        }
        if i2 / pos > stop {
            i2 -= 1.0;
        }
        (i1, i2, -pos)
    } else {
        let pos = 10f64.powf(power) * factor;
        let mut i1 = (start / pos).round();
        let mut i2 = (stop / pos).round();
        if i1 * pos < start {
            i1 += 1.0;
        }
        if i2 * pos > stop {
            i2 -= 1.0;
        }
        (i1, i2, pos)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_spec(start, stop, count);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new([47.3, 83.1], [0.0, 1.0]).nice(10);
        assert_eq!(s.domain(), [45.0, 85.0]);

        let s = LinearScale::new([0.13, 0.96], [0.0, 1.0]).nice(10);
        let [a, b] = s.domain();
        assert!(approx(a, 0.1) && approx(b, 1.0), "{:?}", s.domain());
    }

    #[test]
    fn nice_keeps_round_domains() {
        assert_eq!(LinearScale::new([1.0, 2.0], [0.0, 1.0]).nice(10).domain(), [1.0, 2.0]);
        assert_eq!(LinearScale::new([50.0, 70.0], [0.0, 1.0]).nice(10).domain(), [50.0, 70.0]);
    }

    #[test]
    fn nice_leaves_degenerate_domain() {
        assert_eq!(LinearScale::new([3.0, 3.0], [0.0, 1.0]).nice(10).domain(), [3.0, 3.0]);
    }

    #[test]
    fn apply_maps_and_inverts() {
        let x = LinearScale::new([0.0, 10.0], [20.0, 990.0]);
        assert!(approx(x.apply(0.0), 20.0));
        assert!(approx(x.apply(10.0), 990.0));
        assert!(approx(x.apply(5.0), 505.0));

        // y runs bottom → top
        let y = LinearScale::new([50.0, 70.0], [570.0, 10.0]);
        assert!(y.apply(70.0) < y.apply(50.0));
        assert!(approx(y.apply(60.0), 290.0));
    }

    #[test]
    fn collapsed_domain_maps_to_midpoint() {
        let s = LinearScale::new([4.0, 4.0], [0.0, 100.0]);
        assert!(approx(s.apply(4.0), 50.0));
        assert!(approx(s.apply(123.0), 50.0));
    }

    #[test]
    fn ticks_are_round() {
        let s = LinearScale::new([45.0, 85.0], [0.0, 1.0]);
        assert_eq!(
            s.ticks(10),
            vec![45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 85.0]
        );
        assert_eq!(s.tick_precision(10), 0);

        let s = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        let t = s.ticks(10);
        assert_eq!(t.len(), 11);
        assert!(approx(t[3], 0.3));
        assert_eq!(s.tick_precision(10), 1);
    }
}
