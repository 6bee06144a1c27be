//! Single-threaded publish/subscribe used for every input and output signal
//! of the engine (intersection entries, scroll, progress, particles, ...).
//!
//! Listeners may subscribe, unsubscribe or publish from inside a callback.
//! A listener that re-enters itself through a nested publish is skipped for
//! that nested delivery.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct TopicInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Topic<T> {
    inner: Rc<RefCell<TopicInner<T>>>,
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Default for Topic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Topic<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TopicInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let listener: Listener<T> = Rc::new(RefCell::new(listener));
            inner.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<TopicInner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    pub fn publish(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self.inner.borrow().listeners.clone();
        for (id, listener) in snapshot {
            // An earlier listener in this round may have detached this one.
            let still_attached = self
                .inner
                .borrow()
                .listeners
                .iter()
                .any(|(lid, _)| *lid == id);
            if !still_attached {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut f) => f(value),
                Err(_) => log::warn!("[signal] listener {} re-entered; skipped", id),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Detaches its listener when dropped or when `unsubscribe` is called.
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dropping_subscription_detaches() {
        let topic: Topic<u32> = Topic::new();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let sub = topic.subscribe(move |v| s.set(s.get() + *v));
        topic.publish(&2);
        drop(sub);
        topic.publish(&5);
        assert_eq!(seen.get(), 2);
        assert_eq!(topic.listener_count(), 0);
    }

    #[test]
    fn listener_can_unsubscribe_another_during_publish() {
        let topic: Topic<()> = Topic::new();
        let hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let v = victim.clone();
        let _first = topic.subscribe(move |_| {
            v.borrow_mut().take();
        });
        let h = hits.clone();
        *victim.borrow_mut() = Some(topic.subscribe(move |_| h.set(h.get() + 1)));

        topic.publish(&());
        assert_eq!(hits.get(), 0);
        assert_eq!(topic.listener_count(), 1);
    }
}
