use crate::foundation::math::clamp01;

/// Easing curves that remap linear progress to perceptual motion.
///
/// Every curve is exact at the endpoints (`apply(0) == 0`, `apply(1) == 1`). The back,
/// elastic and spring families overshoot `[0, 1]` strictly between the endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Identity.
    Linear,
    /// CSS `ease` (`cubic-bezier(0.25, 0.1, 0.25, 1)`).
    Css,
    /// CSS `ease-in` (`cubic-bezier(0.42, 0, 1, 1)`).
    EaseIn,
    /// CSS `ease-out` (`cubic-bezier(0, 0, 0.58, 1)`).
    EaseOut,
    /// CSS `ease-in-out` (`cubic-bezier(0.42, 0, 0.58, 1)`).
    EaseInOut,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in/out.
    InOutExpo,
    /// Circular ease-in.
    InCirc,
    /// Circular ease-out.
    OutCirc,
    /// Circular ease-in/out.
    InOutCirc,
    /// Anticipating ease-in (dips below 0).
    InBack,
    /// Overshooting ease-out (exceeds 1).
    OutBack,
    /// Anticipate then overshoot.
    InOutBack,
    /// Decaying oscillation around 1.
    OutElastic,
    /// Piecewise bounce settling at 1.
    OutBounce,
    /// Underdamped spring step response.
    Spring,
}

/// Easing applied to a keyframe that does not name one.
pub const DEFAULT_KEYFRAME_EASE: Ease = Ease::EaseInOut;

impl Ease {
    /// All supported curves, in declaration order.
    pub const ALL: [Ease; 29] = [
        Ease::Linear,
        Ease::Css,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
        Ease::OutElastic,
        Ease::OutBounce,
        Ease::Spring,
    ];

    /// Canonical identifier of this curve.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Css => "ease",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InQuart => "easeInQuart",
            Self::OutQuart => "easeOutQuart",
            Self::InOutQuart => "easeInOutQuart",
            Self::InSine => "easeInSine",
            Self::OutSine => "easeOutSine",
            Self::InOutSine => "easeInOutSine",
            Self::InExpo => "easeInExpo",
            Self::OutExpo => "easeOutExpo",
            Self::InOutExpo => "easeInOutExpo",
            Self::InCirc => "easeInCirc",
            Self::OutCirc => "easeOutCirc",
            Self::InOutCirc => "easeInOutCirc",
            Self::InBack => "easeInBack",
            Self::OutBack => "easeOutBack",
            Self::InOutBack => "easeInOutBack",
            Self::OutElastic => "easeOutElastic",
            Self::OutBounce => "easeOutBounce",
            Self::Spring => "spring",
        }
    }

    /// Resolve a canonical name or legacy alias.
    ///
    /// Matching ignores case and `-`, `_` and whitespace, so `ease-in-out`, `ease_in_out`
    /// and `easeInOut` all resolve to [`Ease::EaseInOut`].
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let ease = match key.as_str() {
            "linear" | "none" => Self::Linear,
            "ease" => Self::Css,
            "easein" | "in" => Self::EaseIn,
            "easeout" | "out" => Self::EaseOut,
            "easeinout" | "inout" | "smooth" => Self::EaseInOut,
            "easeinquad" | "quadin" => Self::InQuad,
            "easeoutquad" | "quadout" => Self::OutQuad,
            "easeinoutquad" | "quadinout" => Self::InOutQuad,
            "easeincubic" | "cubicin" => Self::InCubic,
            "easeoutcubic" | "cubicout" => Self::OutCubic,
            "easeinoutcubic" | "cubicinout" => Self::InOutCubic,
            "easeinquart" | "quartin" => Self::InQuart,
            "easeoutquart" | "quartout" => Self::OutQuart,
            "easeinoutquart" | "quartinout" => Self::InOutQuart,
            "easeinsine" | "sinein" => Self::InSine,
            "easeoutsine" | "sineout" => Self::OutSine,
            "easeinoutsine" | "sineinout" | "sine" => Self::InOutSine,
            "easeinexpo" | "expoin" => Self::InExpo,
            "easeoutexpo" | "expoout" => Self::OutExpo,
            "easeinoutexpo" | "expoinout" => Self::InOutExpo,
            "easeincirc" | "circin" => Self::InCirc,
            "easeoutcirc" | "circout" => Self::OutCirc,
            "easeinoutcirc" | "circinout" => Self::InOutCirc,
            "easeinback" | "backin" => Self::InBack,
            "easeoutback" | "backout" | "back" => Self::OutBack,
            "easeinoutback" | "backinout" | "anticipate" => Self::InOutBack,
            "easeoutelastic" | "elasticout" | "elastic" => Self::OutElastic,
            "easeoutbounce" | "bounceout" | "bounce" => Self::OutBounce,
            "spring" => Self::Spring,
            _ => return None,
        };
        Some(ease)
    }

    /// Apply this curve to progress `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp01(t);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Css => cubic_bezier_ease(t, 0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => cubic_bezier_ease(t, 0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => cubic_bezier_ease(t, 0.42, 0.0, 0.58, 1.0),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::InExpo => 2f64.powf(10.0 * t - 10.0),
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Self::InOutExpo => {
                if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Self::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
            Self::InOutBack => {
                let c2 = BACK_C1 * 1.525;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
            Self::OutElastic => elastic_out(t),
            Self::OutBounce => bounce_out(t),
            Self::Spring => spring_step(t, 100.0, 12.0, 1.0),
        }
    }
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// Evaluate easing `name` at `progress`.
///
/// `progress` is clamped to `[0, 1]`; unknown names fall back to linear.
pub fn ease_progress(progress: f64, name: &str) -> f64 {
    Ease::from_name(name).unwrap_or(Ease::Linear).apply(progress)
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` evaluated at `x`.
fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Find the curve parameter u where bx(u) = x, then read by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton steps first, a fixed number of them.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    // Bisection cleans up where the derivative was too flat for Newton.
    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t);
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

/// Unit step response of a damped spring starting at rest at 0.
fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return t;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // critically damped
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // underdamped, overshoots and rings
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // overdamped
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

/// Decaying sine overshoot with period 0.3.
fn elastic_out(t: f64) -> f64 {
    let p = 0.3;
    2f64.powf(-10.0 * t) * ((t - p / 4.0) * (2.0 * std::f64::consts::PI) / p).sin() + 1.0
}

/// Piecewise-quadratic bounce settling at 1 (Penner's coefficients).
fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
