use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::script::model::{NarrationSegment, Pacing, SectionTransition};

fn section(id: &str, durations: &[f64]) -> SectionScript {
    let mut start = 0.0;
    let segments = durations
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let seg = NarrationSegment {
                id: format!("{id}-seg-{i}"),
                text: format!("{id} line {i}."),
                step_id: format!("{id}-step-{i}"),
                estimated_duration: *d,
                start_time: start,
                end_time: start + d,
                emphasis: vec![format!("{id}{i}")],
                pacing: Pacing::Normal,
            };
            start += d;
            seg
        })
        .collect();
    SectionScript {
        section_id: id.to_owned(),
        full_text: String::new(),
        segments,
        total_duration: durations.iter().sum(),
    }
}

fn script(sections: Vec<SectionScript>, transitions: &[f64]) -> PresentationScript {
    let transitions: Vec<SectionTransition> = transitions
        .iter()
        .enumerate()
        .map(|(i, d)| SectionTransition {
            from_section_id: sections[i].section_id.clone(),
            to_section_id: sections[i + 1].section_id.clone(),
            kind: "fade".to_owned(),
            duration: *d,
        })
        .collect();
    let total = sections.iter().map(|s| s.total_duration).sum::<f64>()
        + transitions.iter().map(|t| t.duration).sum::<f64>();
    PresentationScript {
        paper_title: "Paper".to_owned(),
        sections,
        transitions,
        total_duration: total,
    }
}

fn two_sections() -> PresentationScript {
    script(vec![section("a", &[4.0, 6.0]), section("b", &[8.0])], &[2.0])
}

fn timeline(script: PresentationScript) -> (Timeline, ManualFrames) {
    let frames = ManualFrames::new();
    (Timeline::new(script, frames.clone()), frames)
}

fn deliver(tl: &mut Timeline, frames: &ManualFrames, ts: f64) -> usize {
    frames
        .take_pending()
        .into_iter()
        .filter(|id| tl.on_frame(*id, ts))
        .count()
}

#[test]
fn spans_tile_the_whole_duration() {
    let (tl, _) = timeline(two_sections());
    assert_eq!(
        tl.section_spans(),
        &[
            Span { start: 0.0, duration: 10.0 },
            Span { start: 12.0, duration: 8.0 }
        ]
    );
    assert_eq!(tl.transition_spans(), &[Span { start: 10.0, duration: 2.0 }]);
    assert_eq!(tl.section_start(1), Some(12.0));
    assert_eq!(tl.section_start(2), None);
    assert_eq!(tl.section_spans()[1].end(), tl.total_duration());
}

#[test]
fn transition_midway() {
    let (tl, _) = timeline(two_sections());
    let s = tl.get_state_at_time(10.5);
    assert_eq!(s.phase, Phase::Transition);
    assert_eq!((s.from_section, s.to_section), (Some(0), Some(1)));
    assert!((s.transition_progress.unwrap() - 0.25).abs() < 1e-9);
    assert_eq!((s.section_progress, s.segment_progress), (1.0, 1.0));
    assert_eq!(s.section_index, 0);
    assert_eq!(s.segment_index, 1);
    assert_eq!(s.active_step_id, None);
    assert!(s.current_text.is_empty());
}

#[test]
fn segment_lookup_inside_section() {
    let (tl, _) = timeline(script(vec![section("a", &[3.0, 3.0, 3.0])], &[]));
    let s = tl.get_state_at_time(7.0);
    assert_eq!(s.phase, Phase::Section);
    assert_eq!(s.segment_index, 2);
    assert!((s.segment_progress - 1.0 / 3.0).abs() < 1e-9);
    assert!((s.section_progress - 7.0 / 9.0).abs() < 1e-9);
    assert_eq!(s.active_step_id.as_deref(), Some("a-step-2"));
    assert_eq!(s.current_text, "a line 2.");
    assert_eq!(s.emphasis, vec!["a2"]);
}

#[test]
fn segment_boundaries_belong_to_the_later_segment() {
    let (tl, _) = timeline(script(vec![section("a", &[3.0, 3.0, 3.0])], &[]));
    assert_eq!(tl.get_state_at_time(3.0).segment_index, 1);
    assert_eq!(tl.get_state_at_time(2.999).segment_index, 0);
    assert_eq!(tl.get_state_at_time(0.0).segment_index, 0);
}

#[test]
fn second_section_after_transition() {
    let (tl, _) = timeline(two_sections());
    let s = tl.get_state_at_time(12.0);
    assert_eq!(s.phase, Phase::Section);
    assert_eq!(s.section_index, 1);
    assert_eq!(s.segment_progress, 0.0);
    assert_eq!(s.global_time, 12.0);
}

#[test]
fn out_of_range_times() {
    let (tl, _) = timeline(two_sections());
    let end = tl.get_state_at_time(25.0);
    assert!(end.is_complete());
    assert_eq!(end.global_time, 20.0);
    assert_eq!(end.section_index, 1);
    assert_eq!(end.active_step_id.as_deref(), Some("b-step-0"));
    assert_eq!(tl.get_state_at_time(20.0).phase, Phase::Complete);

    let before = tl.get_state_at_time(-3.0);
    assert_eq!(before.phase, Phase::Section);
    assert_eq!(before.global_time, 0.0);
    assert_eq!(tl.get_state_at_time(f64::NAN).global_time, 0.0);
}

#[test]
fn zero_sections_is_always_complete() {
    let (tl, _) = timeline(script(vec![], &[]));
    assert_eq!(tl.total_duration(), 0.0);
    let s = tl.get_state_at_time(0.0);
    assert!(s.is_complete());
    assert_eq!(s.active_step_id, None);
}

#[test]
fn zero_length_transition_is_skipped() {
    let (tl, _) = timeline(script(
        vec![section("a", &[2.0]), section("b", &[2.0])],
        &[0.0],
    ));
    let s = tl.get_state_at_time(2.0);
    assert_eq!(s.phase, Phase::Section);
    assert_eq!(s.section_index, 1);
}

#[test]
fn seek_notifies_synchronously_with_the_same_state() {
    let (mut tl, _) = timeline(two_sections());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = tl.subscribe(move |s| sink.borrow_mut().push(s.clone()));

    for t in [5.0, 10.5, 1.0, 30.0, -1.0] {
        tl.seek(t);
        let expected = tl.get_state_at_time(t.clamp(0.0, 20.0));
        assert_eq!(seen.borrow().last(), Some(&expected));
        assert_eq!(tl.current_state(), expected);
    }
    assert_eq!(seen.borrow().len(), 5);
}

#[test]
fn seek_to_section_uses_precomputed_start() {
    let (mut tl, _) = timeline(two_sections());
    tl.seek_to_section(1);
    assert_eq!(tl.current_time(), 12.0);
    tl.seek_to_section(9);
    assert_eq!(tl.current_time(), 12.0);
}

#[test]
fn playback_advances_by_wall_clock_delta() {
    let (mut tl, frames) = timeline(two_sections());
    tl.play();
    assert!(tl.is_playing());

    // First frame only records the baseline.
    assert_eq!(deliver(&mut tl, &frames, 100.0), 1);
    assert_eq!(tl.current_time(), 0.0);

    let mut ts = 100.0;
    for _ in 0..60 {
        ts += 1.0 / 60.0;
        deliver(&mut tl, &frames, ts);
    }
    assert!((tl.current_time() - 1.0).abs() < 1e-6);
}

#[test]
fn speed_applies_to_later_frames_only() {
    let (mut tl, frames) = timeline(two_sections());
    tl.play();
    deliver(&mut tl, &frames, 0.0);
    deliver(&mut tl, &frames, 1.0);
    assert!((tl.current_time() - 1.0).abs() < 1e-9);

    tl.set_speed(2.0);
    assert!((tl.current_time() - 1.0).abs() < 1e-9);
    deliver(&mut tl, &frames, 1.5);
    assert!((tl.current_time() - 2.0).abs() < 1e-9);

    tl.set_speed(0.0);
    tl.set_speed(f64::INFINITY);
    assert_eq!(tl.speed(), 2.0);
}

#[test]
fn initial_speed_comes_from_opts() {
    let frames = ManualFrames::new();
    let tl = Timeline::with_opts(two_sections(), frames.clone(), TimelineOpts { speed: 1.5 });
    assert_eq!(tl.speed(), 1.5);
    let tl = Timeline::with_opts(two_sections(), frames, TimelineOpts { speed: -2.0 });
    assert_eq!(tl.speed(), 1.0);
}

#[test]
fn playback_stops_at_the_end_and_notifies_completion() {
    let (mut tl, frames) = timeline(script(vec![section("a", &[1.0])], &[]));
    let last = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&last);
    let _sub = tl.subscribe(move |s| *sink.borrow_mut() = Some(s.phase));

    tl.play();
    deliver(&mut tl, &frames, 0.0);
    deliver(&mut tl, &frames, 5.0);
    assert!(!tl.is_playing());
    assert_eq!(tl.current_time(), 1.0);
    assert_eq!(*last.borrow(), Some(Phase::Complete));
    assert!(frames.pending().is_empty());

    tl.play();
    assert_eq!(tl.current_time(), 0.0);
    assert!(tl.is_playing());
}

#[test]
fn pause_cancels_the_pending_frame() {
    let (mut tl, frames) = timeline(two_sections());
    tl.play();
    deliver(&mut tl, &frames, 0.0);
    let stale = frames.pending();
    assert_eq!(stale.len(), 1);

    tl.pause();
    assert!(frames.pending().is_empty());
    // A frame the host already had in flight does nothing.
    assert!(!tl.on_frame(stale[0], 10.0));
    assert_eq!(tl.current_time(), 0.0);
    assert!(!tl.is_playing());
}

#[test]
fn resume_resets_the_delta_baseline() {
    let (mut tl, frames) = timeline(two_sections());
    tl.play();
    deliver(&mut tl, &frames, 0.0);
    deliver(&mut tl, &frames, 1.0);
    tl.pause();

    tl.play();
    deliver(&mut tl, &frames, 50.0);
    assert!((tl.current_time() - 1.0).abs() < 1e-9);
    deliver(&mut tl, &frames, 50.5);
    assert!((tl.current_time() - 1.5).abs() < 1e-9);
}

#[test]
fn seek_while_playing_keeps_playing_from_new_time() {
    let (mut tl, frames) = timeline(two_sections());
    tl.play();
    deliver(&mut tl, &frames, 0.0);
    deliver(&mut tl, &frames, 2.0);
    tl.seek(15.0);
    deliver(&mut tl, &frames, 3.0);
    assert_eq!(tl.current_time(), 15.0);
    deliver(&mut tl, &frames, 3.5);
    assert!((tl.current_time() - 15.5).abs() < 1e-9);
}

#[test]
fn notifications_are_monotonic_while_playing() {
    let (mut tl, frames) = timeline(two_sections());
    let times = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&times);
    let _sub = tl.subscribe(move |s| sink.borrow_mut().push(s.global_time));
    tl.play();
    let mut ts = 0.0;
    while tl.is_playing() {
        deliver(&mut tl, &frames, ts);
        ts += 0.25;
    }
    let times = times.borrow();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(times.last(), Some(&20.0));
}

#[test]
fn unsubscribed_listeners_stop_receiving() {
    let (mut tl, _) = timeline(two_sections());
    let hits = Rc::new(RefCell::new((0, 0)));
    let (a, b) = (Rc::clone(&hits), Rc::clone(&hits));
    let sub_a = tl.subscribe(move |_| a.borrow_mut().0 += 1);
    let _sub_b = tl.subscribe(move |_| b.borrow_mut().1 += 1);
    assert_eq!(tl.listener_count(), 2);

    tl.seek(1.0);
    sub_a.unsubscribe();
    tl.seek(2.0);
    assert_eq!(*hits.borrow(), (1, 2));
    assert_eq!(tl.listener_count(), 1);
}

#[test]
fn destroy_is_idempotent_and_final() {
    let (mut tl, frames) = timeline(two_sections());
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    let sub = tl.subscribe(move |_| *h.borrow_mut() += 1);
    tl.play();

    tl.destroy();
    tl.destroy();
    assert!(tl.is_destroyed());
    assert!(!tl.is_playing());
    assert!(!sub.is_active());
    assert!(frames.pending().is_empty());

    tl.play();
    assert!(!tl.is_playing());
    tl.seek(3.0);
    assert_eq!(*hits.borrow(), 0);
}
