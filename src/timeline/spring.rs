/// Physical parameters of a damped spring travelling from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    pub const BOUNCY: Self = Self::new(400.0, 10.0);
    pub const GENTLE: Self = Self::new(300.0, 20.0);
    pub const SNAPPY: Self = Self::new(500.0, 25.0);
    pub const WOBBLY: Self = Self::new(200.0, 8.0);

    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            mass: 1.0,
            stiffness,
            damping,
        }
    }

    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::GENTLE
    }
}

/// Position of a spring released at frame 0, resting at 0 and pulled towards 1.
///
/// Evaluated in closed form so any frame can be sampled independently.
/// Frames at or before 0 give 0; degenerate configs jump straight to 1.
pub fn spring(frame: f64, fps: f64, config: SpringConfig) -> f64 {
    if frame <= 0.0 {
        return 0.0;
    }
    if fps <= 0.0 || config.mass <= 0.0 || config.stiffness <= 0.0 || config.damping < 0.0 {
        return 1.0;
    }
    let t = frame / fps;
    let w0 = config.natural_frequency();
    let zeta = config.damping_ratio();

    // displacement from rest, starting at -1 with zero velocity
    let offset = if zeta < 1.0 {
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * w0 * t).exp();
        -envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
    } else if zeta == 1.0 {
        -(1.0 + w0 * t) * (-w0 * t).exp()
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - root);
        let r2 = -w0 * (zeta + root);
        let a = r2 / (r1 - r2);
        let b = -1.0 - a;
        a * (r1 * t).exp() + b * (r2 * t).exp()
    };
    1.0 + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_rest() {
        assert_eq!(spring(0.0, 30.0, SpringConfig::BOUNCY), 0.0);
        assert_eq!(spring(-10.0, 30.0, SpringConfig::GENTLE), 0.0);
    }

    #[test]
    fn test_presets_settle() {
        for config in [
            SpringConfig::BOUNCY,
            SpringConfig::GENTLE,
            SpringConfig::SNAPPY,
            SpringConfig::WOBBLY,
        ] {
            let v = spring(90.0, 30.0, config);
            assert!((v - 1.0).abs() < 1e-3, "{config:?} at 3s = {v}");
        }
    }

    #[test]
    fn test_underdamped_overshoots() {
        let peak = (1..60)
            .map(|f| spring(f as f64, 30.0, SpringConfig::BOUNCY))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.2);
    }

    #[test]
    fn test_critical_and_overdamped_never_overshoot() {
        for damping in [40.0, 80.0] {
            let config = SpringConfig::new(400.0, damping);
            let mut prev = 0.0;
            for f in 1..120 {
                let v = spring(f as f64, 30.0, config);
                assert!(v >= prev - 1e-12);
                assert!(v <= 1.0 + 1e-12);
                prev = v;
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = spring(17.0, 30.0, SpringConfig::WOBBLY);
        let b = spring(17.0, 30.0, SpringConfig::WOBBLY);
        assert_eq!(a, b);
    }
}
