#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which kind of span the playhead is in.
pub enum Phase {
    /// Inside a section's narration.
    #[default]
    Section,
    /// Between two sections.
    Transition,
    /// At or past the end. Terminal.
    Complete,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Immutable snapshot of where playback is.
///
/// Handed to every subscriber on each tick and on each seek.
pub struct TimelineState {
    /// Current phase.
    pub phase: Phase,
    /// Active section (the outgoing one during a transition).
    pub section_index: usize,
    /// Active segment within `section_index`.
    pub segment_index: usize,
    /// Progress through the section in `[0, 1]`.
    pub section_progress: f64,
    /// Progress through the segment in `[0, 1]`.
    pub segment_progress: f64,
    /// Step shown by the active segment.
    pub active_step_id: Option<String>,
    /// Caption text of the active segment.
    pub current_text: String,
    /// Words to stress in the caption.
    pub emphasis: Vec<String>,
    /// Absolute playback time in seconds.
    pub global_time: f64,
    /// Outgoing section during a transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_section: Option<usize>,
    /// Incoming section during a transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_section: Option<usize>,
    /// Progress through the transition in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_progress: Option<f64>,
}

impl TimelineState {
    /// Whether playback has reached the end.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}
