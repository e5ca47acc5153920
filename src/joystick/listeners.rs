//! Typed listener registry with synchronous, in-order dispatch.

use std::fmt;

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ListenerFn<E> = Box<dyn FnMut(&E) + Send>;

/// Callbacks for one kind of notification.
///
/// Listeners run on the caller's thread, in registration order, before
/// [`Listeners::emit`] returns.
pub struct Listeners<E: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerFn<E>)>,
}

impl<E: ?Sized> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Deliver `event` to every listener. Returns how many were called.
    pub fn emit(&mut self, event: &E) -> usize {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
        self.entries.len()
    }
}

impl<E: ?Sized> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_emit_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::<u32>::new();

        let first = log.clone();
        listeners.subscribe(move |v| first.lock().push(("first", *v)));
        let second = log.clone();
        listeners.subscribe(move |v| second.lock().push(("second", *v)));

        assert_eq!(listeners.emit(&7), 2);
        assert_eq!(*log.lock(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let mut listeners = Listeners::<()>::new();

        let counter = hits.clone();
        let id = listeners.subscribe(move |_| *counter.lock() += 1);
        assert!(!listeners.is_empty());

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id)); // Already gone
        assert!(listeners.is_empty());

        assert_eq!(listeners.emit(&()), 0);
        assert_eq!(*hits.lock(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut listeners = Listeners::<()>::new();
        let a = listeners.subscribe(|_| {});
        listeners.unsubscribe(a);
        let b = listeners.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 1);
    }
}
