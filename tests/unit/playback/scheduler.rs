use super::*;

#[test]
fn clones_share_the_queue() {
    let host = ManualFrames::new();
    let mut sched = host.clone();
    let a = sched.request_frame();
    let b = sched.request_frame();
    assert_ne!(a, b);
    assert_eq!(host.pending(), vec![a, b]);

    sched.cancel_frame(a);
    assert_eq!(host.take_pending(), vec![b]);
    assert!(host.pending().is_empty());
}

#[test]
fn ids_are_never_reused() {
    let mut sched = ManualFrames::new();
    let a = sched.request_frame();
    sched.cancel_frame(a);
    let b = sched.request_frame();
    assert!(b > a);
}

#[test]
fn boxed_schedulers_forward() {
    let host = ManualFrames::new();
    let mut boxed: Box<dyn FrameScheduler> = Box::new(host.clone());
    let id = boxed.request_frame();
    assert_eq!(host.pending(), vec![id]);
    boxed.cancel_frame(id);
    assert!(host.pending().is_empty());
}
