use crate::{
    animation::color::blend_css_colors,
    animation::ease::{DEFAULT_KEYFRAME_EASE, Ease},
    foundation::math::{lerp, ratio_or_zero},
};

/// A keyframe on a sparse track.
///
/// Keys are resolved cumulatively: each key's explicit fields override the state already
/// resolved from the keys before it, and absent fields carry that state forward. The
/// first key resolves on top of the track's neutral value.
pub(crate) trait TrackKey {
    type Value;

    fn time(&self) -> f64;
    fn easing(&self) -> Option<&str>;
    fn resolve_onto(&self, base: &Self::Value) -> Self::Value;
    fn blend(from: &Self::Value, to: &Self, t: f64) -> Self::Value;
}

/// Sample a time-sorted track at `progress`.
///
/// No extrapolation: progress before the first key yields the first key's state and
/// progress past the last key yields the fully accumulated state. Inside a bracket the
/// local progress is eased with the `from` key's easing.
pub(crate) fn sample_track<K: TrackKey>(
    keys: &[K],
    progress: f64,
    default_ease: Ease,
    empty: impl FnOnce() -> K::Value,
) -> K::Value {
    let neutral = empty();
    let Some(first) = keys.first() else {
        return neutral;
    };
    let mut state = first.resolve_onto(&neutral);
    if progress.is_nan() || progress <= first.time() {
        return state;
    }

    for pair in keys.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if progress < to.time() {
            let local = ratio_or_zero(progress - from.time(), to.time() - from.time());
            let ease = from
                .easing()
                .map(|name| Ease::from_name(name).unwrap_or(Ease::Linear))
                .unwrap_or(default_ease);
            return K::blend(&state, to, ease.apply(local));
        }
        state = to.resolve_onto(&state);
    }
    state
}

pub(crate) fn blend_field(from: f64, to: Option<f64>, t: f64) -> f64 {
    lerp(from, to.unwrap_or(from), t)
}

/// Keyframe on a 2D element property track.
///
/// `time` is local to the owning step, in `[0, 1]`. Absent values hold the previous
/// keyframe's value rather than resetting to zero.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Local time in `[0, 1]`.
    pub time: f64,
    /// Horizontal position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Depth offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Rotation about the X axis, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f64>,
    /// Rotation about the Y axis, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<f64>,
    /// Rotation about the Z axis, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate_z: Option<f64>,
    /// Uniform scale; per-axis fields take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Horizontal scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Vertical scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// CSS color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Easing toward the next keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

impl Keyframe {
    /// Empty keyframe at `time`.
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Set the position.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set uniform scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the Z rotation in degrees.
    pub fn with_rotate_z(mut self, degrees: f64) -> Self {
        self.rotate_z = Some(degrees);
        self
    }

    /// Set the easing toward the next keyframe.
    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = Some(easing.name().to_owned());
        self
    }

    fn scale_x_value(&self) -> Option<f64> {
        self.scale_x.or(self.scale)
    }

    fn scale_y_value(&self) -> Option<f64> {
        self.scale_y.or(self.scale)
    }
}

/// Interpolated visual state of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Depth offset.
    pub z: f64,
    /// Rotation about the X axis, degrees.
    pub rotate_x: f64,
    /// Rotation about the Y axis, degrees.
    pub rotate_y: f64,
    /// Rotation about the Z axis, degrees.
    pub rotate_z: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Opacity.
    pub opacity: f64,
    /// CSS color, when any keyframe defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            color: None,
        }
    }
}

impl TrackKey for Keyframe {
    type Value = ElementState;

    fn time(&self) -> f64 {
        self.time
    }

    fn easing(&self) -> Option<&str> {
        self.easing.as_deref()
    }

    fn resolve_onto(&self, base: &ElementState) -> ElementState {
        ElementState {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            z: self.z.unwrap_or(base.z),
            rotate_x: self.rotate_x.unwrap_or(base.rotate_x),
            rotate_y: self.rotate_y.unwrap_or(base.rotate_y),
            rotate_z: self.rotate_z.unwrap_or(base.rotate_z),
            scale_x: self.scale_x_value().unwrap_or(base.scale_x),
            scale_y: self.scale_y_value().unwrap_or(base.scale_y),
            opacity: self.opacity.unwrap_or(base.opacity),
            color: self.color.clone().or_else(|| base.color.clone()),
        }
    }

    fn blend(from: &ElementState, to: &Self, t: f64) -> ElementState {
        let color = match (&from.color, &to.color) {
            (Some(a), Some(b)) => Some(blend_css_colors(a, b, t)),
            (a, b) => a.clone().or_else(|| b.clone()),
        };
        ElementState {
            x: blend_field(from.x, to.x, t),
            y: blend_field(from.y, to.y, t),
            z: blend_field(from.z, to.z, t),
            rotate_x: blend_field(from.rotate_x, to.rotate_x, t),
            rotate_y: blend_field(from.rotate_y, to.rotate_y, t),
            rotate_z: blend_field(from.rotate_z, to.rotate_z, t),
            scale_x: blend_field(from.scale_x, to.scale_x_value(), t),
            scale_y: blend_field(from.scale_y, to.scale_y_value(), t),
            opacity: blend_field(from.opacity, to.opacity, t),
            color,
        }
    }
}

/// Interpolate a 2D property track at `progress`.
///
/// Keyframes without an easing use `easeInOut` toward the next keyframe.
pub fn interpolate_keyframes(keyframes: &[Keyframe], progress: f64) -> ElementState {
    sample_track(
        keyframes,
        progress,
        DEFAULT_KEYFRAME_EASE,
        ElementState::default,
    )
}

/// Like [`interpolate_keyframes`], with a caller-chosen easing for keyframes that do not
/// name one. Unknown names fall back to linear.
pub fn interpolate_keyframes_with_easing(
    keyframes: &[Keyframe],
    progress: f64,
    default_easing: &str,
) -> ElementState {
    let ease = Ease::from_name(default_easing).unwrap_or(Ease::Linear);
    sample_track(keyframes, progress, ease, ElementState::default)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
