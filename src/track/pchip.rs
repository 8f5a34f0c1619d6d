//! Piecewise cubic Hermite interpolation with Fritsch-Carlson style slopes.
//!
//! Slopes are chosen so that the interpolant is monotone wherever the data
//! is, and never overshoots a local extremum between two knots.

use super::error::TrackError;

#[derive(Debug, Clone)]
pub struct Pchip {
    xs: Vec<f64>,
    ys: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    /// Build an interpolant over strictly increasing `xs`.
    ///
    /// Returns `InsufficientAnchors` for fewer than two knots, and
    /// `NonIncreasingTime` with the 0-based knot position when `xs` is not
    /// strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, TrackError> {
        debug_assert_eq!(xs.len(), ys.len());
        if xs.len() < 2 {
            return Err(TrackError::InsufficientAnchors { found: xs.len() });
        }
        if let Some(pos) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(TrackError::NonIncreasingTime { index: pos + 1 });
        }

        let slopes = slopes(&xs, &ys);
        Ok(Self { xs, ys, slopes })
    }

    /// Evaluate at `x`; outside the knot span the end pieces are extended.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        // Index of the left knot of the containing interval.
        let k = self.xs.partition_point(|&xi| xi <= x).clamp(1, n - 1) - 1;

        let h = self.xs[k + 1] - self.xs[k];
        let t = (x - self.xs[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.ys[k] + h10 * h * self.slopes[k] + h01 * self.ys[k + 1] + h11 * h * self.slopes[k + 1]
    }
}

fn slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (ys[k + 1] - ys[k]) / h[k]).collect();

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (d0, d1) = (delta[k - 1], delta[k]);
        if d0 == 0.0 || d1 == 0.0 || d0.signum() != d1.signum() {
            continue;
        }
        // Weighted harmonic mean of the neighbouring secants.
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
    }
    d[0] = edge_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = edge_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

/// One-sided three-point slope at an end knot, limited to keep the end
/// piece shape preserving.
fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[test]
    fn passes_through_knots() {
        let xs = vec![0.0, 1.0, 3.0, 4.0, 7.0];
        let ys = vec![2.0, 5.0, 4.0, 9.0, 9.5];
        let p = Pchip::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert!((p.eval(*x) - y).abs() < EPS);
        }
    }

    #[test]
    fn two_knots_are_linear() {
        let p = Pchip::new(vec![0.0, 10.0], vec![100.0, 200.0]).unwrap();
        assert!((p.eval(2.5) - 125.0).abs() < EPS);
        assert!((p.eval(12.0) - 220.0).abs() < EPS);
    }

    #[test]
    fn monotone_data_stays_monotone() {
        // A step that a natural cubic spline would overshoot.
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0];
        let p = Pchip::new(xs, ys).unwrap();
        let mut prev = p.eval(0.0);
        for i in 1..=500 {
            let y = p.eval(i as f64 / 100.0);
            assert!(y >= prev - EPS, "not monotone at {}", i);
            assert!((-EPS..=10.0 + EPS).contains(&y));
            prev = y;
        }
    }

    #[test]
    fn flat_at_local_extremum() {
        let p = Pchip::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        // No overshoot above the peak.
        for i in 0..=200 {
            assert!(p.eval(i as f64 / 100.0) <= 1.0 + EPS);
        }
    }

    #[test]
    fn matches_reference_values() {
        // Reference values from a standard PCHIP implementation.
        let p = Pchip::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();
        assert!((p.eval(0.5) - 0.3125).abs() < 1e-9);
        assert!((p.eval(1.5) - 2.21875).abs() < 1e-9);
        assert!((p.eval(2.5) - 6.21875).abs() < 1e-9);
    }

    #[rstest]
    #[case(vec![0.0], vec![1.0], TrackError::InsufficientAnchors { found: 1 })]
    #[case(vec![], vec![], TrackError::InsufficientAnchors { found: 0 })]
    #[case(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0], TrackError::NonIncreasingTime { index: 2 })]
    fn rejects_bad_knots(#[case] xs: Vec<f64>, #[case] ys: Vec<f64>, #[case] expected: TrackError) {
        assert_eq!(Pchip::new(xs, ys).unwrap_err(), expected);
    }
}
