// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Keeps every listener attached while a component is connected.
///
/// Handles detach themselves when dropped (as [`gloo_events::EventListener`]
/// does), so teardown is just draining the registry, in reverse order of
/// registration.
pub struct Registry<H> {
    handles: Vec<H>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Registry { handles: Vec::new() }
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register(&mut self, handle: H) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Detach everything, returning how many handles were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.handles.len();

        while let Some(handle) = self.handles.pop() {
            drop(handle);
        }

        count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Handle(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    #[test]
    fn clear_detaches_everything_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();

        registry.register(Handle("click", log.clone()));
        registry.register(Handle("input", log.clone()));
        registry.register(Handle("toggle", log.clone()));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.clear(), 3);
        assert!(registry.is_empty());
        assert_eq!(*log.borrow(), ["toggle", "input", "click"]);

        assert_eq!(registry.clear(), 0);
    }

    #[test]
    fn reconnecting_starts_fresh() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();

        registry.register(Handle("a", log.clone()));
        registry.clear();
        registry.register(Handle("b", log.clone()));

        assert_eq!(registry.len(), 1);
        assert_eq!(*log.borrow(), ["a"]);
    }
}
