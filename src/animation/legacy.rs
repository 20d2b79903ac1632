//! Lowering of the pre-keyframe `{enter, exit, continuous, duration, delay}` descriptor.
//!
//! Older content describes motion with named effects. Those descriptors are lowered
//! into an explicit keyframe track on demand and never stored in lowered form, so both
//! schemas flow through the same interpolation path.

use kurbo::Point;

use crate::{animation::ease::Ease, animation::keyframes::Keyframe};

/// Legacy per-element animation descriptor.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnimation {
    /// Entrance effect name (`fadeIn`, `slideInLeft`, `scaleIn`, `pop`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<String>,
    /// Exit effect name (`fadeOut`, `slideOut*`, `scaleOut`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
    /// Looping effect while the element is held (`pulse`, `float`, `spin`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous: Option<String>,
    /// Entrance duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Entrance delay in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

/// Distance travelled by slide effects, in element units.
pub const SLIDE_DISTANCE: f64 = 40.0;
/// Local time of the hold keyframe.
pub const HOLD_TIME: f64 = 0.75;
/// Local time of the exit keyframe.
pub const EXIT_TIME: f64 = 1.0;

const ENTER_END_BASE: f64 = 0.15;
const ENTER_END_STAGGER: f64 = 0.05;
const ENTER_END_MAX: f64 = 0.4;
const ENTER_START_MAX: f64 = 0.3;
const MIN_ENTER_SPAN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Enter {
    None,
    Fade,
    Slide { dx: f64, dy: f64 },
    Scale,
    Pop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Exit {
    Fade,
    Slide { dx: f64, dy: f64 },
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Continuous {
    None,
    Pulse,
    Float,
    Spin,
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_enter(name: Option<&str>) -> Enter {
    let Some(name) = name else {
        return Enter::Fade;
    };
    match normalize(name).as_str() {
        "none" | "appear" | "" => Enter::None,
        "slideinleft" | "slideleft" | "fromleft" => Enter::Slide {
            dx: -SLIDE_DISTANCE,
            dy: 0.0,
        },
        "slideinright" | "slideright" | "fromright" => Enter::Slide {
            dx: SLIDE_DISTANCE,
            dy: 0.0,
        },
        "slideindown" | "slidedown" | "fromtop" => Enter::Slide {
            dx: 0.0,
            dy: -SLIDE_DISTANCE,
        },
        "slidein" | "slide" | "slideinup" | "slideup" | "frombottom" => Enter::Slide {
            dx: 0.0,
            dy: SLIDE_DISTANCE,
        },
        "scalein" | "scale" | "zoomin" | "zoom" | "grow" => Enter::Scale,
        "pop" | "popin" | "bounce" | "bouncein" => Enter::Pop,
        _ => Enter::Fade,
    }
}

fn parse_exit(name: Option<&str>) -> Exit {
    match name.map(normalize).as_deref() {
        Some("slideout" | "slide" | "slideoutright" | "slideright") => Exit::Slide {
            dx: SLIDE_DISTANCE,
            dy: 0.0,
        },
        Some("slideoutleft" | "slideleft") => Exit::Slide {
            dx: -SLIDE_DISTANCE,
            dy: 0.0,
        },
        Some("slideoutup" | "slideup") => Exit::Slide {
            dx: 0.0,
            dy: -SLIDE_DISTANCE,
        },
        Some("slideoutdown" | "slidedown") => Exit::Slide {
            dx: 0.0,
            dy: SLIDE_DISTANCE,
        },
        Some("scaleout" | "scale" | "zoomout" | "shrink") => Exit::Scale,
        _ => Exit::Fade,
    }
}

fn parse_continuous(name: Option<&str>) -> Continuous {
    match name.map(normalize).as_deref() {
        Some("pulse" | "breathe") => Continuous::Pulse,
        Some("float" | "bob" | "hover") => Continuous::Float,
        Some("spin" | "rotate") => Continuous::Spin,
        _ => Continuous::None,
    }
}

/// Local time at which element `element_index` finishes entering.
///
/// Staggered so simultaneous elements do not pop in together.
pub fn enter_end_time(element_index: usize) -> f64 {
    (ENTER_END_BASE + element_index as f64 * ENTER_END_STAGGER).min(ENTER_END_MAX)
}

/// Lower a legacy descriptor into an explicit keyframe track.
///
/// `base` is the element's resting position. The track has an entrance keyframe, a
/// rest keyframe at the staggered enter end, a hold keyframe at [`HOLD_TIME`] and an
/// exit keyframe at [`EXIT_TIME`].
pub fn keyframes_from_legacy_animation(
    descriptor: &LegacyAnimation,
    base: Point,
    element_index: usize,
) -> Vec<Keyframe> {
    let enter = parse_enter(descriptor.enter.as_deref());
    let exit = parse_exit(descriptor.exit.as_deref());
    let continuous = parse_continuous(descriptor.continuous.as_deref());

    let start = enter_start_time(descriptor);
    let enter_end = enter_end_time(element_index).max(start + MIN_ENTER_SPAN);

    let entrance = Keyframe::at(start).with_opacity(0.0).with_scale(1.0);
    let first = match enter {
        Enter::None => entrance
            .with_xy(base.x, base.y)
            .with_opacity(1.0)
            .with_easing(Ease::Linear),
        Enter::Fade => entrance
            .with_xy(base.x, base.y)
            .with_easing(Ease::EaseOut),
        Enter::Slide { dx, dy } => entrance
            .with_xy(base.x + dx, base.y + dy)
            .with_easing(Ease::OutCubic),
        Enter::Scale => entrance
            .with_xy(base.x, base.y)
            .with_scale(0.5)
            .with_easing(Ease::EaseOut),
        Enter::Pop => entrance
            .with_xy(base.x, base.y)
            .with_scale(0.0)
            .with_easing(Ease::OutBack),
    };

    let rest = Keyframe::at(enter_end)
        .with_xy(base.x, base.y)
        .with_opacity(1.0)
        .with_scale(1.0)
        .with_rotate_z(0.0)
        .with_easing(match continuous {
            Continuous::None => Ease::Linear,
            _ => Ease::InOutSine,
        });

    let hold = match continuous {
        Continuous::None => Keyframe::at(HOLD_TIME).with_xy(base.x, base.y),
        Continuous::Pulse => Keyframe::at(HOLD_TIME)
            .with_xy(base.x, base.y)
            .with_scale(1.05),
        Continuous::Float => Keyframe::at(HOLD_TIME).with_xy(base.x, base.y - 8.0),
        Continuous::Spin => Keyframe::at(HOLD_TIME)
            .with_xy(base.x, base.y)
            .with_rotate_z(360.0),
    }
    .with_opacity(1.0)
    .with_easing(Ease::EaseIn);

    let settled = Keyframe {
        time: EXIT_TIME,
        opacity: Some(0.0),
        easing: None,
        ..hold.clone()
    };
    let exit = match exit {
        Exit::Fade => settled,
        Exit::Slide { dx, dy } => Keyframe {
            x: settled.x.map(|x| x + dx),
            y: settled.y.map(|y| y + dy),
            ..settled
        },
        Exit::Scale => settled.with_scale(0.5),
    };

    vec![first, rest, hold, exit]
}

fn enter_start_time(descriptor: &LegacyAnimation) -> f64 {
    let delay = descriptor.delay.filter(|d| d.is_finite() && *d > 0.0);
    let Some(delay) = delay else {
        return 0.0;
    };
    let duration = descriptor
        .duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(1.0);
    (delay / (delay + duration)).clamp(0.0, ENTER_START_MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/legacy.rs"]
mod tests;
