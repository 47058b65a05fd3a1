//! Observable in-memory state.
//!
//! # Responsibility
//! - Hold the authoritative project sequence for one running board.
//! - Fan out immutable snapshots to subscribed listeners on every mutation.
//!
//! # Invariants
//! - Listeners are notified in registration order.
//! - Every listener receives its own copy of the sequence.
//! - Listeners must not mutate, subscribe or notify while a notification is
//!   running; such calls are rejected with `StateError::NotificationInProgress`.
//! - Weak listeners whose target has been dropped are pruned on the next
//!   notification round.

pub mod project_state;

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};

/// Registered callback; returns `false` once it should be dropped.
type Listener<T> = Box<dyn FnMut(Vec<T>) -> bool>;

/// State mutation/subscription errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A listener tried to call back into the store during notification.
    NotificationInProgress,
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotificationInProgress => {
                write!(f, "state cannot change while listeners are being notified")
            }
        }
    }
}

impl Error for StateError {}

/// Generic listener registry shared by observable stores.
pub struct State<T> {
    listeners: RefCell<Vec<Listener<T>>>,
    // Readable while `listeners` is mutably borrowed by `notify`.
    listener_count: Cell<usize>,
    notifying: Cell<bool>,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            listener_count: Cell::new(0),
            notifying: Cell::new(false),
        }
    }
}

impl<T: Clone> State<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener. Identical callbacks are not deduplicated.
    pub fn add_listener(
        &self,
        mut listener: impl FnMut(Vec<T>) + 'static,
    ) -> Result<(), StateError> {
        self.register(Box::new(move |items| {
            listener(items);
            true
        }))
    }

    /// Registers a listener that lives only as long as `target`.
    ///
    /// Once `target` is dropped the listener is removed instead of called.
    pub fn add_weak_listener<O: 'static>(
        &self,
        target: &Rc<O>,
        mut listener: impl FnMut(&O, Vec<T>) + 'static,
    ) -> Result<(), StateError> {
        let target: Weak<O> = Rc::downgrade(target);
        self.register(Box::new(move |items| match target.upgrade() {
            Some(target) => {
                listener(&target, items);
                true
            }
            None => false,
        }))
    }

    fn register(&self, listener: Listener<T>) -> Result<(), StateError> {
        self.ensure_idle()?;
        self.listeners.borrow_mut().push(listener);
        self.listener_count.set(self.listener_count.get() + 1);
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.listener_count.get()
    }

    /// Whether a notification round is currently running.
    pub fn is_notifying(&self) -> bool {
        self.notifying.get()
    }

    /// Rejects the call when invoked from inside a listener.
    pub fn ensure_idle(&self) -> Result<(), StateError> {
        if self.notifying.get() {
            return Err(StateError::NotificationInProgress);
        }
        Ok(())
    }

    /// Hands every listener its own copy of `items`.
    ///
    /// # Errors
    /// - `StateError::NotificationInProgress` when called from a listener.
    pub fn notify(&self, items: &[T]) -> Result<(), StateError> {
        self.ensure_idle()?;
        let _round = NotifyRound::enter(&self.notifying);
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain_mut(|listener| listener(items.to_vec()));
        self.listener_count.set(listeners.len());
        Ok(())
    }
}

/// Resets the notifying flag even if a listener panics.
struct NotifyRound<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> NotifyRound<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for NotifyRound<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::{State, StateError};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order() {
        let state = State::<u8>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            state
                .add_listener(move |_| seen.borrow_mut().push(tag))
                .expect("idle state accepts listeners");
        }

        state.notify(&[1]).expect("idle notify");
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
        assert_eq!(state.listener_count(), 2);
        assert!(!state.is_notifying());
    }

    #[test]
    fn each_listener_gets_independent_copy() {
        let state = State::<u8>::new();
        let kept = Rc::new(RefCell::new(Vec::new()));

        state
            .add_listener(|mut items| items.push(99))
            .expect("first listener");
        let sink = Rc::clone(&kept);
        state
            .add_listener(move |items| *sink.borrow_mut() = items)
            .expect("second listener");

        state.notify(&[1, 2]).expect("idle notify");
        assert_eq!(*kept.borrow(), vec![1, 2]);
    }

    #[test]
    fn ensure_idle_fails_inside_notification() {
        let state = Rc::new(State::<u8>::new());
        let observed = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&state);
        let sink = Rc::clone(&observed);
        state
            .add_listener(move |_| *sink.borrow_mut() = Some(inner.ensure_idle()))
            .expect("listener registration");

        state.notify(&[0]).expect("idle notify");
        assert_eq!(
            *observed.borrow(),
            Some(Err(StateError::NotificationInProgress))
        );
        assert!(state.ensure_idle().is_ok());
    }

    #[test]
    fn nested_notify_is_rejected_instead_of_panicking() {
        let state = Rc::new(State::<u8>::new());
        let nested = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&state);
        let sink = Rc::clone(&nested);
        state
            .add_listener(move |items| {
                if items == [1] {
                    sink.borrow_mut().push(inner.notify(&[2]));
                }
            })
            .expect("listener registration");

        state.notify(&[1]).expect("outer notify");
        assert_eq!(
            *nested.borrow(),
            vec![Err(StateError::NotificationInProgress)]
        );
        assert!(!state.is_notifying());
    }

    #[test]
    fn weak_listener_is_pruned_after_target_drops() {
        let state = State::<u8>::new();
        let target = Rc::new(RefCell::new(Vec::new()));

        state
            .add_weak_listener(&target, |target, items| *target.borrow_mut() = items)
            .expect("weak listener");
        state.add_listener(|_| {}).expect("strong listener");

        state.notify(&[7]).expect("notify with live target");
        assert_eq!(*target.borrow(), vec![7]);
        assert_eq!(state.listener_count(), 2);

        drop(target);
        state.notify(&[8]).expect("notify after drop");
        assert_eq!(state.listener_count(), 1);
    }
}
