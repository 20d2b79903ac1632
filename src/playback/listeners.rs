use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::playback::state::TimelineState;

type Callback = Rc<RefCell<dyn FnMut(&TimelineState)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, Callback>,
}

#[derive(Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn add(&self, f: impl FnMut(&TimelineState) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        reg.next_id += 1;
        let id = reg.next_id;
        let cb: Callback = Rc::new(RefCell::new(f));
        reg.entries.insert(id, cb);
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub(crate) fn clear(&self) {
        self.registry.borrow_mut().entries.clear();
    }

    /// Call every listener in registration order.
    ///
    /// Listeners removed by an earlier callback in the same round are skipped.
    pub(crate) fn notify(&self, state: &TimelineState) {
        let snapshot: Vec<(u64, Callback)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(id, cb)| (*id, Rc::clone(cb)))
            .collect();
        for (id, cb) in snapshot {
            if !self.registry.borrow().entries.contains_key(&id) {
                continue;
            }
            // A listener cannot be re-entered while it runs.
            if let Ok(mut f) = cb.try_borrow_mut() {
                (*f)(state);
            }
        }
    }
}

/// Handle returned by [`crate::Timeline::subscribe`].
///
/// Dropping the handle keeps the listener registered; call [`Subscription::unsubscribe`]
/// to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the listener. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(reg) = self.registry.upgrade() {
            reg.borrow_mut().entries.remove(&self.id);
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|reg| reg.borrow().entries.contains_key(&self.id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/listeners.rs"]
mod tests;
