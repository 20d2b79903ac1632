use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Handle for one requested animation frame.
pub struct FrameId(pub u64);

/// Host facility that calls back once per display frame.
///
/// The timeline requests at most one frame at a time and the host answers by calling
/// [`crate::Timeline::on_frame`] with the same id. Cancelled ids must not be delivered,
/// but a late delivery is harmless: the timeline drops ids it is not waiting for.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameId;
    /// Withdraw a pending request.
    fn cancel_frame(&mut self, id: FrameId);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Box<S> {
    fn request_frame(&mut self) -> FrameId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        (**self).cancel_frame(id)
    }
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    pending: Vec<FrameId>,
}

#[derive(Clone, Debug, Default)]
/// Frame scheduler driven by the caller.
///
/// Clones share one queue: hand one clone to the timeline and keep the other to drain
/// requested frames with [`ManualFrames::take_pending`].
pub struct ManualFrames {
    queue: Rc<RefCell<Queue>>,
}

impl ManualFrames {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested frames not yet delivered or cancelled.
    pub fn pending(&self) -> Vec<FrameId> {
        self.queue.borrow().pending.clone()
    }

    /// Remove and return every pending frame, oldest first.
    pub fn take_pending(&self) -> Vec<FrameId> {
        std::mem::take(&mut self.queue.borrow_mut().pending)
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameId {
        let mut q = self.queue.borrow_mut();
        q.next_id += 1;
        let id = FrameId(q.next_id);
        q.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queue.borrow_mut().pending.retain(|p| *p != id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
