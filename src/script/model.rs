use std::{borrow::Cow, fs::File, io::BufReader, path::Path};

use kurbo::Point;

use crate::{
    animation::keyframes::{ElementState, Keyframe, interpolate_keyframes},
    animation::legacy::{LegacyAnimation, keyframes_from_legacy_animation},
    animation::spatial::{
        CameraKeyframe, CameraState, Keyframe3D, Transform3D, interpolate_3d_keyframes,
        interpolate_camera_track,
    },
    foundation::error::{PapercastError, PapercastResult},
};

const OFFSET_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Complete narrated presentation for one analyzed document.
///
/// Built once per document and replaced wholesale when its content changes.
pub struct PresentationScript {
    /// Title of the source document.
    #[serde(default)]
    pub paper_title: String,
    /// Sections in playback order.
    pub sections: Vec<SectionScript>,
    /// Transitions between consecutive sections (`sections.len() - 1` entries).
    #[serde(default)]
    pub transitions: Vec<SectionTransition>,
    /// Sum of every section and transition duration, in seconds.
    pub total_duration: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Narration for one section, split into time-boxed segments.
pub struct SectionScript {
    /// Identifier of the section.
    pub section_id: String,
    /// Full narration text.
    #[serde(default)]
    pub full_text: String,
    /// Segments sorted by `start_time`, contiguous over `[0, total_duration)`.
    pub segments: Vec<NarrationSegment>,
    /// Section duration in seconds.
    pub total_duration: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Delivery speed hint for narration.
pub enum Pacing {
    /// Slower, for dense material.
    Slow,
    /// Regular delivery.
    #[default]
    Normal,
    /// Faster, for recaps.
    Fast,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One spoken slice of a section, tied to exactly one animation step.
pub struct NarrationSegment {
    /// Segment identifier.
    pub id: String,
    /// Spoken text (non-empty).
    pub text: String,
    /// Identifier of the matching animation step.
    #[serde(default)]
    pub step_id: String,
    /// Estimated spoken duration in seconds.
    #[serde(default)]
    pub estimated_duration: f64,
    /// Start offset within the section, seconds.
    #[serde(default)]
    pub start_time: f64,
    /// End offset within the section, seconds (exclusive).
    #[serde(default)]
    pub end_time: f64,
    /// Up to two words to stress.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emphasis: Vec<String>,
    /// Delivery speed hint.
    #[serde(default)]
    pub pacing: Pacing,
}

impl NarrationSegment {
    /// Segment duration (`end_time - start_time`).
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether `local` falls in `[start_time, end_time)`.
    pub fn contains(&self, local: f64) -> bool {
        self.start_time <= local && local < self.end_time
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Timed crossover between two consecutive sections.
pub struct SectionTransition {
    /// Section the transition leaves.
    pub from_section_id: String,
    /// Section the transition enters.
    pub to_section_id: String,
    /// Transition effect name (`fade`, `slide`, `zoom`, ...).
    #[serde(rename = "type", default = "default_transition_kind")]
    pub kind: String,
    /// Duration in seconds.
    pub duration: f64,
}

fn default_transition_kind() -> String {
    "fade".to_owned()
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One discrete configuration of animated elements.
pub struct AnimationStep {
    /// Step identifier.
    pub id: String,
    /// Free-text description of what the step shows.
    #[serde(default)]
    pub description: String,
    /// Authored duration in seconds, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Elements animated during this step.
    #[serde(default)]
    pub elements: Vec<AnimationElement>,
    /// Optional camera track for 3D steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Vec<CameraKeyframe>>,
}

impl AnimationStep {
    /// Authored duration if it is a usable positive number.
    pub fn authored_duration(&self) -> Option<f64> {
        self.duration.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Camera state at step-local `progress`; defaults when the step has no camera track.
    pub fn camera_at(&self, progress: f64) -> CameraState {
        interpolate_camera_track(self.camera.as_deref().unwrap_or_default(), progress)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A visual element animated by a step.
pub struct AnimationElement {
    /// Element identifier.
    pub id: String,
    /// Element kind (`text`, `shape`, `node`, `highlight`, `arrow`, ...).
    #[serde(rename = "type", default)]
    pub element_type: String,
    /// Free-form renderer properties (`content`, `label`, `x`, `y`, ...).
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
    /// Explicit 2D keyframe track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes: Option<Vec<Keyframe>>,
    /// Explicit 3D keyframe track.
    #[serde(
        rename = "keyframes3D",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub keyframes_3d: Option<Vec<Keyframe3D>>,
    /// Legacy enter/exit descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<LegacyAnimation>,
}

/// How an element's motion is described.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementMotion<'a> {
    /// Explicit keyframe track.
    Keyframes(&'a [Keyframe]),
    /// Legacy descriptor, lowered on demand.
    Legacy(&'a LegacyAnimation),
    /// No motion: the element rests at its base position.
    Static,
}

const HIGHLIGHT_ELEMENT_TYPES: [&str; 4] = ["highlight", "shape", "node", "text"];

impl AnimationElement {
    /// Which motion description applies; explicit keyframes win over a legacy descriptor.
    pub fn motion(&self) -> ElementMotion<'_> {
        match (&self.keyframes, &self.animation) {
            (Some(kfs), _) if !kfs.is_empty() => ElementMotion::Keyframes(kfs),
            (_, Some(legacy)) => ElementMotion::Legacy(legacy),
            _ => ElementMotion::Static,
        }
    }

    /// Resting position read from the numeric `x`/`y` props (0 when absent).
    pub fn base_position(&self) -> Point {
        let num = |key: &str| {
            self.props
                .get(key)
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0)
        };
        Point::new(num("x"), num("y"))
    }

    /// Canonical keyframe track; legacy descriptors are lowered here and not stored.
    pub fn keyframes_for(&self, element_index: usize) -> Cow<'_, [Keyframe]> {
        match self.motion() {
            ElementMotion::Keyframes(kfs) => Cow::Borrowed(kfs),
            ElementMotion::Legacy(legacy) => Cow::Owned(keyframes_from_legacy_animation(
                legacy,
                self.base_position(),
                element_index,
            )),
            ElementMotion::Static => {
                let base = self.base_position();
                Cow::Owned(vec![Keyframe::at(0.0).with_xy(base.x, base.y)])
            }
        }
    }

    /// Interpolated 2D state at step-local `progress`.
    pub fn sample(&self, element_index: usize, progress: f64) -> ElementState {
        interpolate_keyframes(&self.keyframes_for(element_index), progress)
    }

    /// Interpolated 3D state at step-local `progress`.
    pub fn sample_3d(&self, progress: f64) -> Transform3D {
        interpolate_3d_keyframes(self.keyframes_3d.as_deref().unwrap_or_default(), progress)
    }

    /// Phrase worth narrating: the string `content` or `label` prop of a highlight,
    /// shape, node or text element.
    pub fn highlight_phrase(&self) -> Option<&str> {
        let kind = self.element_type.to_ascii_lowercase();
        if !HIGHLIGHT_ELEMENT_TYPES.contains(&kind.as_str()) {
            return None;
        }
        ["content", "label"]
            .iter()
            .filter_map(|key| self.props.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

impl SectionScript {
    /// Check ordering, contiguity and coverage of segment offsets.
    pub fn validate(&self) -> PapercastResult<()> {
        let id = &self.section_id;
        if !self.total_duration.is_finite() || self.total_duration < 0.0 {
            return Err(PapercastError::validation(format!(
                "section '{id}' totalDuration must be finite and >= 0"
            )));
        }
        if self.segments.is_empty() {
            if self.total_duration > 0.0 {
                return Err(PapercastError::validation(format!(
                    "section '{id}' has a duration but no segments"
                )));
            }
            return Ok(());
        }

        let mut expected_start = 0.0;
        for (i, seg) in self.segments.iter().enumerate() {
            if seg.text.trim().is_empty() {
                return Err(PapercastError::validation(format!(
                    "section '{id}' segment {i} has empty text"
                )));
            }
            if seg.end_time < seg.start_time {
                return Err(PapercastError::validation(format!(
                    "section '{id}' segment {i} ends before it starts"
                )));
            }
            if (seg.start_time - expected_start).abs() > OFFSET_EPSILON {
                return Err(PapercastError::validation(format!(
                    "section '{id}' segment {i} starts at {} but {expected_start} was expected",
                    seg.start_time
                )));
            }
            expected_start = seg.end_time;
        }
        if (expected_start - self.total_duration).abs() > OFFSET_EPSILON {
            return Err(PapercastError::validation(format!(
                "section '{id}' segments end at {expected_start} but totalDuration is {}",
                self.total_duration
            )));
        }
        Ok(())
    }
}

impl PresentationScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PapercastResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PapercastError::serde(format!("parse presentation script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PapercastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PapercastError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Sum of every section and transition duration.
    pub fn computed_total_duration(&self) -> f64 {
        self.sections.iter().map(|s| s.total_duration).sum::<f64>()
            + self.transitions.iter().map(|t| t.duration).sum::<f64>()
    }

    /// Check the structural invariants the timeline relies on.
    ///
    /// The timeline itself never calls this; it trusts its input.
    pub fn validate(&self) -> PapercastResult<()> {
        let expected = self.sections.len().saturating_sub(1);
        if self.transitions.len() != expected {
            return Err(PapercastError::validation(format!(
                "expected {expected} transitions for {} sections, found {}",
                self.sections.len(),
                self.transitions.len()
            )));
        }
        for (i, tr) in self.transitions.iter().enumerate() {
            if !tr.duration.is_finite() || tr.duration < 0.0 {
                return Err(PapercastError::validation(format!(
                    "transition {i} duration must be finite and >= 0"
                )));
            }
            let (from, to) = (&self.sections[i], &self.sections[i + 1]);
            if tr.from_section_id != from.section_id || tr.to_section_id != to.section_id {
                return Err(PapercastError::validation(format!(
                    "transition {i} must join '{}' -> '{}'",
                    from.section_id, to.section_id
                )));
            }
        }
        for section in &self.sections {
            section.validate()?;
        }
        let computed = self.computed_total_duration();
        if (computed - self.total_duration).abs() > OFFSET_EPSILON {
            return Err(PapercastError::validation(format!(
                "totalDuration is {} but sections and transitions sum to {computed}",
                self.total_duration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
