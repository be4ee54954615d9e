/// Maps linear progress in `[0, 1]` onto an eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; x control points are clamped to `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 40;
const EPSILON: f64 = 1e-7;

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let s = solve_for_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

// one dimensional cubic with fixed endpoints 0 and 1
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn solve_for_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < EPSILON {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier(0.33, 1.0, 0.68, 1.0),
        Easing::CubicBezier(0.03, 0.98, 0.52, 0.99),
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), easing.apply(0.0));
            assert_eq!(easing.apply(7.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let e = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((e.apply(t) - t).abs() < 1e-5, "t = {t}");
        }
    }

    #[test]
    fn test_ease_out_bezier_leads_linear() {
        let e = Easing::CubicBezier(0.33, 1.0, 0.68, 1.0);
        for i in 1..20 {
            let t = i as f64 / 20.0;
            assert!(e.apply(t) > t);
        }
    }
}
