//! Toggle surface: mode-change observers.
//!
//! External integrations depend on this notification alone, never on the
//! controller's internals. The controller notifies its observers exactly
//! once per accepted toggle — including toggles demoted to flag-and-notify
//! by an externally managed surface — and never for same-value sets.
//! Dispatch is synchronous and in subscription order; observers should not
//! block.

use std::fmt;

use tracing::trace;

/// Observer of the source-mode flag. Closures taking the new flag value
/// implement this directly.
pub trait ModeObserver {
    fn mode_changed(&self, is_source_mode: bool);
}

impl<F: Fn(bool)> ModeObserver for F {
    fn mode_changed(&self, is_source_mode: bool) {
        self(is_source_mode)
    }
}

/// Subscription-ordered observer list.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn ModeObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl ModeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Fan the new flag value out to every observer, in subscription order.
    pub fn notify(&self, is_source_mode: bool) {
        trace!(
            target: "mode.toggle",
            is_source_mode,
            observers = self.observers.len(),
            "mode_changed_notify"
        );
        for observer in &self.observers {
            observer.mode_changed(is_source_mode);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_every_observer_in_order() {
        let seen: Rc<RefCell<Vec<(u8, bool)>>> = Rc::default();
        let mut reg = ObserverRegistry::new();
        let first = seen.clone();
        reg.subscribe(move |v: bool| first.borrow_mut().push((1, v)));
        let second = seen.clone();
        reg.subscribe(move |v: bool| second.borrow_mut().push((2, v)));

        reg.notify(true);
        reg.notify(false);
        assert_eq!(
            *seen.borrow(),
            vec![(1, true), (2, true), (1, false), (2, false)]
        );
    }

    #[test]
    fn empty_registry_notification_is_harmless() {
        let reg = ObserverRegistry::new();
        reg.notify(true);
        assert!(reg.is_empty());
    }
}
