use crate::{
    animation::ease::{DEFAULT_KEYFRAME_EASE, Ease},
    animation::keyframes::{TrackKey, blend_field, sample_track},
    foundation::core::Vec3,
};

/// Scale on a 3D keyframe: a bare number or a `[x, y, z]` triple.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Scale3 {
    /// Same factor on every axis.
    Uniform(f64),
    /// Independent factor per axis.
    Axes(Vec3),
}

impl Scale3 {
    /// Expand into a per-axis vector.
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::Uniform(s) => Vec3::splat(s),
            Self::Axes(v) => v,
        }
    }
}

/// Keyframe on a 3D element track.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe3D {
    /// Local time in `[0, 1]`.
    pub time: f64,
    /// World position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    /// Euler rotation, radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    /// Scale factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale3>,
    /// Opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Easing toward the next keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

/// Interpolated state of a 3D element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform3D {
    /// World position.
    pub position: Vec3,
    /// Euler rotation, radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Opacity.
    pub opacity: f64,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
        }
    }
}

fn blend_vec3(from: Vec3, to: Option<Vec3>, t: f64) -> Vec3 {
    from.lerp(to.unwrap_or(from), t)
}

impl TrackKey for Keyframe3D {
    type Value = Transform3D;

    fn time(&self) -> f64 {
        self.time
    }

    fn easing(&self) -> Option<&str> {
        self.easing.as_deref()
    }

    fn resolve_onto(&self, base: &Transform3D) -> Transform3D {
        Transform3D {
            position: self.position.unwrap_or(base.position),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.map(Scale3::to_vec3).unwrap_or(base.scale),
            opacity: self.opacity.unwrap_or(base.opacity),
        }
    }

    fn blend(from: &Transform3D, to: &Self, t: f64) -> Transform3D {
        Transform3D {
            position: blend_vec3(from.position, to.position, t),
            rotation: blend_vec3(from.rotation, to.rotation, t),
            scale: blend_vec3(from.scale, to.scale.map(Scale3::to_vec3), t),
            opacity: blend_field(from.opacity, to.opacity, t),
        }
    }
}

/// Interpolate a 3D element track at `progress`.
pub fn interpolate_3d_keyframes(keyframes: &[Keyframe3D], progress: f64) -> Transform3D {
    sample_track(
        keyframes,
        progress,
        DEFAULT_KEYFRAME_EASE,
        Transform3D::default,
    )
}

/// Default camera position when a track is empty.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 6.0);
/// Default vertical field of view, degrees.
pub const DEFAULT_CAMERA_FOV: f64 = 50.0;

/// Keyframe on a camera track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraKeyframe {
    /// Local time in `[0, 1]`.
    pub time: f64,
    /// Camera position.
    pub position: Vec3,
    /// Point the camera looks at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_at: Option<Vec3>,
    /// Vertical field of view, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    /// Easing toward the next keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

/// Interpolated camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    /// Camera position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Vertical field of view, degrees.
    pub fov: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            look_at: Vec3::ZERO,
            fov: DEFAULT_CAMERA_FOV,
        }
    }
}

impl TrackKey for CameraKeyframe {
    type Value = CameraState;

    fn time(&self) -> f64 {
        self.time
    }

    fn easing(&self) -> Option<&str> {
        self.easing.as_deref()
    }

    fn resolve_onto(&self, base: &CameraState) -> CameraState {
        CameraState {
            position: self.position,
            look_at: self.look_at.unwrap_or(base.look_at),
            fov: self.fov.unwrap_or(base.fov),
        }
    }

    fn blend(from: &CameraState, to: &Self, t: f64) -> CameraState {
        CameraState {
            position: from.position.lerp(to.position, t),
            look_at: blend_vec3(from.look_at, to.look_at, t),
            fov: blend_field(from.fov, to.fov, t),
        }
    }
}

/// Interpolate a camera track at `progress`.
pub fn interpolate_camera_track(keyframes: &[CameraKeyframe], progress: f64) -> CameraState {
    sample_track(keyframes, progress, DEFAULT_KEYFRAME_EASE, CameraState::default)
}

/// Like [`interpolate_camera_track`] with an explicit easing for unnamed keyframes.
pub fn interpolate_camera_track_with_easing(
    keyframes: &[CameraKeyframe],
    progress: f64,
    default_easing: &str,
) -> CameraState {
    let ease = Ease::from_name(default_easing).unwrap_or(Ease::Linear);
    sample_track(keyframes, progress, ease, CameraState::default)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spatial.rs"]
mod tests;
