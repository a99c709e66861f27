//! Timing functions that remap blend progress.

use std::fmt;

use crate::css::model::DeclarationValue;

/// Position of the jump for `steps()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPosition {
    Start,
    #[default]
    End,
}

/// An easing curve applied to progress before blending.
#[derive(Clone, Copy, PartialEq, Default)]
pub enum TimingFunction {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    StepStart,
    StepEnd,
    CubicBezier(f32, f32, f32, f32),
    Steps(u32, StepPosition),
    /// A caller-supplied curve.
    Custom(fn(f32) -> f32),
}

impl fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::Ease => f.write_str("Ease"),
            Self::EaseIn => f.write_str("EaseIn"),
            Self::EaseOut => f.write_str("EaseOut"),
            Self::EaseInOut => f.write_str("EaseInOut"),
            Self::StepStart => f.write_str("StepStart"),
            Self::StepEnd => f.write_str("StepEnd"),
            Self::CubicBezier(a, b, c, d) => write!(f, "CubicBezier({a}, {b}, {c}, {d})"),
            Self::Steps(n, pos) => write!(f, "Steps({n}, {pos:?})"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl TimingFunction {
    /// Look up a timing keyword (`ease-in-out`, `step-end`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let timing = match name.to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "step-start" => Self::StepStart,
            "step-end" => Self::StepEnd,
            _ => return None,
        };
        Some(timing)
    }

    /// Parse a keyword or a `cubic-bezier(...)` / `steps(...)` function value.
    pub fn from_value(value: &DeclarationValue) -> Option<Self> {
        match value {
            DeclarationValue::Ident(name) => Self::from_name(name),
            DeclarationValue::Function(name, args) if name == "cubic-bezier" => {
                let nums: Vec<f32> = args
                    .iter()
                    .filter_map(|a| match a {
                        DeclarationValue::Number(n) => Some(*n),
                        _ => None,
                    })
                    .collect();
                match nums.as_slice() {
                    [x1, y1, x2, y2] => Some(Self::CubicBezier(*x1, *y1, *x2, *y2)),
                    _ => None,
                }
            }
            DeclarationValue::Function(name, args) if name == "steps" => {
                let count = match args.first()? {
                    DeclarationValue::Number(n) if *n >= 1.0 => *n as u32,
                    _ => return None,
                };
                let position = match args.get(1) {
                    None => StepPosition::End,
                    Some(DeclarationValue::Ident(p)) if p == "start" || p == "jump-start" => {
                        StepPosition::Start
                    }
                    Some(DeclarationValue::Ident(p)) if p == "end" || p == "jump-end" => {
                        StepPosition::End
                    }
                    Some(_) => return None,
                };
                Some(Self::Steps(count, position))
            }
            _ => None,
        }
    }

    /// Remap progress `t`.
    ///
    /// `Linear` and `Custom` pass values outside `0..=1` through; curves and
    /// steps clamp first.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::Custom(f) => f(t),
            Self::Ease => cubic_bezier(t.clamp(0.0, 1.0), 0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => cubic_bezier(t.clamp(0.0, 1.0), 0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => cubic_bezier(t.clamp(0.0, 1.0), 0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => cubic_bezier(t.clamp(0.0, 1.0), 0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(t.clamp(0.0, 1.0), *x1, *y1, *x2, *y2)
            }
            Self::StepStart => steps(t, 1, StepPosition::Start),
            Self::StepEnd => steps(t, 1, StepPosition::End),
            Self::Steps(n, position) => steps(t, *n, *position),
        }
    }
}

fn steps(t: f32, count: u32, position: StepPosition) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if count == 0 {
        return t;
    }
    let n = count as f32;
    match position {
        StepPosition::Start => (t * n).ceil() / n,
        StepPosition::End => (t * n).floor() / n,
    }
}

/// Sample a CSS `cubic-bezier(x1, y1, x2, y2)` curve at input progress `t`.
///
/// Inverts the x polynomial with Newton-Raphson, falling back to bisection
/// when the slope flattens, then samples y.
pub fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let curve = |s: f32, p1: f32, p2: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };
    let slope = |s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * x1 + 6.0 * inv * s * (x2 - x1) + 3.0 * s * s * (1.0 - x2)
    };

    let mut s = t;
    for _ in 0..8 {
        let err = curve(s, x1, x2) - t;
        if err.abs() < 1e-6 {
            return curve(s, y1, y2);
        }
        let d = slope(s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = t;
    for _ in 0..32 {
        let x = curve(s, x1, x2);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    curve(s, y1, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn linear_passes_overshoot_through() {
        assert_eq!(TimingFunction::Linear.apply(1.5), 1.5);
        assert_eq!(TimingFunction::Linear.apply(-0.5), -0.5);
    }

    #[test]
    fn curves_hit_endpoints() {
        for timing in [
            TimingFunction::Ease,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
        ] {
            assert!(approx(timing.apply(0.0), 0.0), "{timing:?} at 0");
            assert!(approx(timing.apply(1.0), 1.0), "{timing:?} at 1");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = TimingFunction::EaseInOut.apply(0.25);
        let b = TimingFunction::EaseInOut.apply(0.75);
        assert!(approx(a + b, 1.0));
        assert!(approx(TimingFunction::EaseInOut.apply(0.5), 0.5));
    }

    #[test]
    fn ease_in_starts_slow() {
        assert!(TimingFunction::EaseIn.apply(0.25) < 0.25);
        assert!(TimingFunction::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn bezier_identity_is_linear() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx(cubic_bezier(t, 0.0, 0.0, 1.0, 1.0), t));
        }
    }

    #[test]
    fn step_functions() {
        assert_eq!(TimingFunction::StepStart.apply(0.1), 1.0);
        assert_eq!(TimingFunction::StepEnd.apply(0.9), 0.0);
        assert_eq!(TimingFunction::StepEnd.apply(1.0), 1.0);
        assert_eq!(TimingFunction::Steps(4, StepPosition::End).apply(0.3), 0.25);
        assert_eq!(TimingFunction::Steps(4, StepPosition::Start).apply(0.3), 0.5);
    }

    #[test]
    fn custom_function() {
        fn square(t: f32) -> f32 {
            t * t
        }
        assert_eq!(TimingFunction::Custom(square).apply(0.5), 0.25);
    }

    #[test]
    fn parse_keywords_and_functions() {
        assert_eq!(TimingFunction::from_name("ease-in-out"), Some(TimingFunction::EaseInOut));
        assert_eq!(TimingFunction::from_name("bounce"), None);

        let steps = DeclarationValue::Function(
            "steps".into(),
            vec![
                DeclarationValue::Number(3.0),
                DeclarationValue::Ident("start".into()),
            ],
        );
        assert_eq!(
            TimingFunction::from_value(&steps),
            Some(TimingFunction::Steps(3, StepPosition::Start))
        );

        let bezier = DeclarationValue::Function(
            "cubic-bezier".into(),
            vec![
                DeclarationValue::Number(0.1),
                DeclarationValue::Number(0.2),
                DeclarationValue::Number(0.3),
                DeclarationValue::Number(0.4),
            ],
        );
        assert_eq!(
            TimingFunction::from_value(&bezier),
            Some(TimingFunction::CubicBezier(0.1, 0.2, 0.3, 0.4))
        );
    }
}
