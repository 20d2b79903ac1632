//! Papercast turns a narrated presentation script into a seekable playback timeline.
//!
//! Three pieces cooperate:
//!
//! - [`repair_section_segments`] keeps narration segments aligned 1:1 with visual steps
//! - [`Timeline`] maps playback time to a [`TimelineState`] and drives subscribers
//! - the keyframe engine ([`interpolate_keyframes`], [`ease_progress`], ...) turns step-local
//!   progress into element state
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod playback;
pub(crate) mod script;

pub use crate::foundation::core::{Point, Vec3};
pub use crate::foundation::error::{PapercastError, PapercastResult};

pub use crate::animation::color::{Rgba, blend_css_colors};
pub use crate::animation::ease::{DEFAULT_KEYFRAME_EASE, Ease, ease_progress};
pub use crate::animation::keyframes::{
    ElementState, Keyframe, interpolate_keyframes, interpolate_keyframes_with_easing,
};
pub use crate::animation::legacy::{
    EXIT_TIME, HOLD_TIME, LegacyAnimation, SLIDE_DISTANCE, enter_end_time,
    keyframes_from_legacy_animation,
};
pub use crate::animation::spatial::{
    CameraKeyframe, CameraState, DEFAULT_CAMERA_FOV, DEFAULT_CAMERA_POSITION, Keyframe3D, Scale3,
    Transform3D, interpolate_3d_keyframes, interpolate_camera_track,
    interpolate_camera_track_with_easing,
};
pub use crate::playback::listeners::Subscription;
pub use crate::playback::scheduler::{FrameId, FrameScheduler, ManualFrames};
pub use crate::playback::state::{Phase, TimelineState};
pub use crate::playback::timeline::{Span, Timeline, TimelineOpts};
pub use crate::script::model::{
    AnimationElement, AnimationStep, ElementMotion, NarrationSegment, Pacing, PresentationScript,
    SectionScript, SectionTransition,
};
pub use crate::script::repair::{RawSection, RepairOpts, repair_section_segments};
pub use crate::script::text::{estimate_duration, normalize_sentence, split_sentences};
