use crate::{
    foundation::math::{clamp01, ratio_or_zero},
    playback::listeners::{Listeners, Subscription},
    playback::scheduler::{FrameId, FrameScheduler, ManualFrames},
    playback::state::{Phase, TimelineState},
    script::model::{PresentationScript, SectionScript},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Timeline construction options.
pub struct TimelineOpts {
    /// Initial speed multiplier. Non-finite or non-positive values mean 1.0.
    pub speed: f64,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Absolute `[start, start + duration)` span on the timeline, in seconds.
pub struct Span {
    /// Start offset.
    pub start: f64,
    /// Length.
    pub duration: f64,
}

impl Span {
    /// Exclusive end offset.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end()
    }
}

fn usable_speed(speed: f64) -> Option<f64> {
    (speed.is_finite() && speed > 0.0).then_some(speed)
}

/// Seekable, speed-adjustable playback over a [`PresentationScript`].
///
/// Single-threaded: every mutation happens inside a control method or inside
/// [`Timeline::on_frame`], which the host calls for frames requested through `S`.
pub struct Timeline<S: FrameScheduler = ManualFrames> {
    script: PresentationScript,
    section_spans: Vec<Span>,
    transition_spans: Vec<Span>,
    scheduler: S,
    listeners: Listeners,
    current_time: f64,
    speed: f64,
    playing: bool,
    last_timestamp: Option<f64>,
    pending_frame: Option<FrameId>,
    destroyed: bool,
}

impl<S: FrameScheduler> Timeline<S> {
    /// Build a paused timeline at time 0.
    pub fn new(script: PresentationScript, scheduler: S) -> Self {
        Self::with_opts(script, scheduler, TimelineOpts::default())
    }

    /// Build a paused timeline at time 0 with explicit options.
    ///
    /// The script is trusted as-is; see [`PresentationScript::validate`].
    pub fn with_opts(script: PresentationScript, scheduler: S, opts: TimelineOpts) -> Self {
        let mut section_spans = Vec::with_capacity(script.sections.len());
        let mut transition_spans = Vec::with_capacity(script.transitions.len());
        let mut cursor = 0.0;
        for (i, section) in script.sections.iter().enumerate() {
            section_spans.push(Span {
                start: cursor,
                duration: section.total_duration,
            });
            cursor += section.total_duration;
            if let Some(tr) = script.transitions.get(i) {
                transition_spans.push(Span {
                    start: cursor,
                    duration: tr.duration,
                });
                cursor += tr.duration;
            }
        }

        Self {
            script,
            section_spans,
            transition_spans,
            scheduler,
            listeners: Listeners::default(),
            current_time: 0.0,
            speed: usable_speed(opts.speed).unwrap_or(1.0),
            playing: false,
            last_timestamp: None,
            pending_frame: None,
            destroyed: false,
        }
    }

    /// The script being played.
    pub fn script(&self) -> &PresentationScript {
        &self.script
    }

    /// Declared total duration in seconds.
    pub fn total_duration(&self) -> f64 {
        self.script.total_duration
    }

    /// Absolute span of every section.
    pub fn section_spans(&self) -> &[Span] {
        &self.section_spans
    }

    /// Absolute span of every transition.
    pub fn transition_spans(&self) -> &[Span] {
        &self.transition_spans
    }

    /// Absolute start offset of section `index`.
    pub fn section_start(&self, index: usize) -> Option<f64> {
        self.section_spans.get(index).map(|s| s.start)
    }

    /// Playhead position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether frames are being consumed.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether [`Timeline::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// State at the playhead.
    pub fn current_state(&self) -> TimelineState {
        self.get_state_at_time(self.current_time)
    }

    /// Map an absolute time to a structured position. Pure.
    pub fn get_state_at_time(&self, t: f64) -> TimelineState {
        let total = self.total_duration();
        if t >= total {
            return self.terminal_state();
        }
        let t = t.max(0.0);

        for (i, span) in self.section_spans.iter().enumerate() {
            if span.contains(t) {
                return section_state(i, &self.script.sections[i], t - span.start, t);
            }
            if let Some(tr) = self.transition_spans.get(i)
                && tr.contains(t)
            {
                return self.transition_state(i, *tr, t);
            }
        }
        self.terminal_state()
    }

    fn terminal_state(&self) -> TimelineState {
        let section_index = self.script.sections.len().saturating_sub(1);
        let last_segment = self
            .script
            .sections
            .last()
            .and_then(|s| s.segments.last());
        TimelineState {
            phase: Phase::Complete,
            section_index,
            segment_index: last_segment_index(self.script.sections.last()),
            section_progress: 1.0,
            segment_progress: 1.0,
            active_step_id: last_segment.map(|s| s.step_id.clone()),
            current_text: String::new(),
            emphasis: Vec::new(),
            global_time: self.total_duration(),
            from_section: None,
            to_section: None,
            transition_progress: None,
        }
    }

    fn transition_state(&self, i: usize, span: Span, t: f64) -> TimelineState {
        TimelineState {
            phase: Phase::Transition,
            section_index: i,
            segment_index: last_segment_index(self.script.sections.get(i)),
            section_progress: 1.0,
            segment_progress: 1.0,
            active_step_id: None,
            current_text: String::new(),
            emphasis: Vec::new(),
            global_time: t,
            from_section: Some(i),
            to_section: Some(i + 1),
            transition_progress: Some(clamp01(ratio_or_zero(t - span.start, span.duration))),
        }
    }

    /// Start or resume playback; restarts from 0 when at the end.
    pub fn play(&mut self) {
        if self.destroyed {
            return;
        }
        if self.current_time >= self.total_duration() {
            self.current_time = 0.0;
        }
        self.playing = true;
        self.last_timestamp = None;
        self.cancel_pending();
        self.schedule();
        tracing::debug!(time = self.current_time, speed = self.speed, "play");
    }

    /// Stop consuming frames; the pending frame is cancelled.
    pub fn pause(&mut self) {
        self.cancel_pending();
        self.playing = false;
        tracing::debug!(time = self.current_time, "pause");
    }

    /// Move the playhead to `time` (clamped) and notify subscribers immediately.
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_nan() { 0.0 } else { time };
        self.current_time = time.clamp(0.0, self.total_duration().max(0.0));
        self.last_timestamp = None;
        tracing::debug!(time = self.current_time, "seek");
        self.notify();
    }

    /// Seek to the start of section `index`; out-of-range indices are ignored.
    pub fn seek_to_section(&mut self, index: usize) {
        match self.section_start(index) {
            Some(start) => self.seek(start),
            None => tracing::debug!(index, "seek_to_section out of range"),
        }
    }

    /// Change the speed multiplier for frames after this call.
    ///
    /// Non-finite or non-positive multipliers are ignored.
    pub fn set_speed(&mut self, multiplier: f64) {
        match usable_speed(multiplier) {
            Some(speed) => {
                self.speed = speed;
                tracing::debug!(speed, "set_speed");
            }
            None => tracing::warn!(multiplier, "ignoring unusable speed"),
        }
    }

    /// Register a listener for state snapshots.
    ///
    /// Listeners must not call back into this timeline.
    pub fn subscribe(&mut self, listener: impl FnMut(&TimelineState) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Pause and drop every listener. Idempotent; later `play` calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.pause();
        self.listeners.clear();
        self.destroyed = true;
        tracing::debug!("destroy");
    }

    /// Advance by one frame.
    ///
    /// `timestamp` is the host's monotonic clock in seconds. Returns `false` when `id` is
    /// not the frame this timeline is waiting for, which is how cancelled frames that
    /// still arrive are dropped.
    pub fn on_frame(&mut self, id: FrameId, timestamp: f64) -> bool {
        if self.pending_frame != Some(id) {
            return false;
        }
        self.pending_frame = None;
        if !self.playing {
            return false;
        }

        let delta = self
            .last_timestamp
            .map_or(0.0, |prev| (timestamp - prev).max(0.0));
        self.last_timestamp = Some(timestamp);
        self.current_time += delta * self.speed;

        let total = self.total_duration();
        if self.current_time >= total {
            self.current_time = total.max(0.0);
            self.playing = false;
            tracing::debug!(time = self.current_time, "playback complete");
        }
        tracing::trace!(time = self.current_time, delta, "tick");

        self.notify();
        if self.playing {
            self.schedule();
        }
        true
    }

    fn schedule(&mut self) {
        self.pending_frame = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    fn notify(&self) {
        self.listeners.notify(&self.current_state());
    }
}

fn last_segment_index(section: Option<&SectionScript>) -> usize {
    section.map_or(0, |s| s.segments.len().saturating_sub(1))
}

fn section_state(index: usize, section: &SectionScript, local: f64, t: f64) -> TimelineState {
    let section_progress = clamp01(ratio_or_zero(local, section.total_duration));
    let segment_index = section
        .segments
        .iter()
        .position(|s| s.contains(local))
        .unwrap_or_else(|| section.segments.len().saturating_sub(1));

    let mut state = TimelineState {
        phase: Phase::Section,
        section_index: index,
        segment_index,
        section_progress,
        global_time: t,
        ..TimelineState::default()
    };
    if let Some(seg) = section.segments.get(segment_index) {
        state.segment_progress = clamp01(ratio_or_zero(local - seg.start_time, seg.duration()));
        state.active_step_id = Some(seg.step_id.clone());
        state.current_text = seg.text.clone();
        state.emphasis = seg.emphasis.clone();
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timeline.rs"]
mod tests;
