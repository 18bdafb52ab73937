//! Easing curves for timeline interpolation

/// Easing function selector.
///
/// The power families take the curve degree (1 = quadratic through
/// 4 = quintic). `apply` clamps input to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    ExpoOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(p) => t.powi(exponent(p)),
            Ease::PowerOut(p) => 1.0 - (1.0 - t).powi(exponent(p)),
            Ease::PowerInOut(p) => {
                let e = exponent(p);
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(e) / 2.0
                }
            }
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Curve degree n maps to exponent n + 1 (degree 1 = quadratic)
fn exponent(p: u8) -> i32 {
    i32::from(p.clamp(1, 4)) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Ease; 6] = [
        Ease::Linear,
        Ease::PowerIn(1),
        Ease::PowerOut(3),
        Ease::PowerOut(4),
        Ease::PowerInOut(4),
        Ease::ExpoOut,
    ];

    #[test]
    fn test_boundaries() {
        for ease in CURVES {
            assert!(ease.apply(0.0).abs() < 1e-4, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_monotonic() {
        for ease in CURVES {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{:?} not monotonic at {}", ease, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_in_lags_out_leads() {
        let t = 0.3;
        assert!(Ease::PowerIn(1).apply(t) < t);
        assert!(Ease::PowerOut(1).apply(t) > t);
    }

    #[test]
    fn test_in_out_symmetry() {
        let ease = Ease::PowerInOut(4);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let a = ease.apply(t);
            let b = 1.0 - ease.apply(1.0 - t);
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Ease::PowerOut(3).apply(-1.0), 0.0);
        assert_eq!(Ease::PowerOut(3).apply(2.0), 1.0);
    }
}
