//! Shared, single-threaded handle to the option store.
//!
//! The dispatcher's message handlers, the command registry and the UI layer
//! all need the same store. [`OptionsHandle`] is the cloneable owner they are
//! given at wiring time. It is intentionally `!Send`: everything touching the
//! store runs on the client's single event thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{ListenerResult, OptionsError, Result};
use crate::listeners::OptionsListener;
use crate::store::OptionsStore;
use crate::value::{OptionSet, OptionValue};
use crate::view::OptionsView;

/// Cloneable façade over one [`OptionsStore`].
///
/// Every method fails with [`OptionsError::Busy`] when called re-entrantly
/// from inside a listener; listeners should read through the view they are
/// handed instead.
#[derive(Clone, Default)]
pub struct OptionsHandle {
    inner: Rc<RefCell<OptionsStore>>,
}

impl OptionsHandle {
    pub fn new(store: OptionsStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Look up an option, returning an owned copy of its value.
    pub fn get(&self, name: &str) -> Result<OptionValue> {
        let store = self.inner.try_borrow().map_err(|_| OptionsError::Busy)?;
        store.get(name).cloned()
    }

    /// Run `f` against a read-only view of the current options.
    pub fn with_view<R>(&self, f: impl FnOnce(&OptionsView<'_>) -> R) -> Result<R> {
        let store = self.inner.try_borrow().map_err(|_| OptionsError::Busy)?;
        Ok(f(&store.view()))
    }

    /// Owned copy of the whole mapping, if set.
    pub fn snapshot(&self) -> Result<Option<OptionSet>> {
        self.with_view(|view| view.as_map().cloned())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        self.with_view(|view| view.is_initialized())
    }

    /// See [`OptionsStore::set`].
    pub fn set(&self, name: impl Into<String>, value: impl Into<OptionValue>) -> Result<bool> {
        Ok(self.store_mut()?.set(name, value))
    }

    /// See [`OptionsStore::apply_single`].
    pub fn apply_single(
        &self,
        name: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<bool> {
        Ok(self.store_mut()?.apply_single(name, value))
    }

    /// See [`OptionsStore::apply_bulk`].
    pub fn apply_bulk(&self, options: OptionSet, is_watcher: bool) -> Result<bool> {
        Ok(self.store_mut()?.apply_bulk(options, is_watcher))
    }

    /// See [`OptionsStore::clear`].
    pub fn clear(&self) -> Result<()> {
        self.store_mut()?.clear();
        Ok(())
    }

    /// See [`OptionsStore::add_listener`].
    pub fn add_listener<F>(&self, callback: F) -> Result<()>
    where
        F: Fn(&OptionsView<'_>) -> ListenerResult + 'static,
    {
        self.store_mut()?.add_listener(callback);
        Ok(())
    }

    /// See [`OptionsStore::add_observer`].
    pub fn add_observer(&self, listener: impl OptionsListener + 'static) -> Result<()> {
        self.store_mut()?.add_observer(listener);
        Ok(())
    }

    /// Non-owning reference for listeners that need to reach back into the
    /// store. A listener holding a clone of the handle would keep the store
    /// alive forever.
    pub fn downgrade(&self) -> WeakOptionsHandle {
        WeakOptionsHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn store_mut(&self) -> Result<std::cell::RefMut<'_, OptionsStore>> {
        self.inner.try_borrow_mut().map_err(|_| OptionsError::Busy)
    }
}

/// Weak counterpart of [`OptionsHandle`].
#[derive(Clone, Default)]
pub struct WeakOptionsHandle {
    inner: Weak<RefCell<OptionsStore>>,
}

impl WeakOptionsHandle {
    /// Returns `None` once every strong handle is gone.
    pub fn upgrade(&self) -> Option<OptionsHandle> {
        self.inner.upgrade().map(|inner| OptionsHandle { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn seeded() -> OptionsHandle {
        let handle = OptionsHandle::default();
        handle.apply_bulk(OptionSet::new(), false).unwrap();
        handle
    }

    #[test]
    fn clones_share_one_store() {
        let handle = seeded();
        let other = handle.clone();

        assert_eq!(handle.set("tile_font_size", 16), Ok(true));

        assert_eq!(other.get("tile_font_size"), Ok(OptionValue::from(16)));
    }

    #[test]
    fn reentrant_access_from_listener_is_busy() {
        let handle = seeded();
        let weak = handle.downgrade();
        let observed = Rc::new(Cell::new(None));
        let sink = Rc::clone(&observed);

        handle
            .add_listener(move |view| {
                if let Some(inner) = weak.upgrade() {
                    sink.set(Some(inner.get("a")));
                }
                assert!(view.contains("a"));
                Ok(())
            })
            .unwrap();

        handle.set("a", 1).unwrap();

        assert_eq!(observed.take(), Some(Err(OptionsError::Busy)));
        assert_eq!(handle.get("a"), Ok(OptionValue::from(1)));
    }

    #[test]
    fn listener_holding_weak_handle_does_not_keep_store_alive() {
        let handle = seeded();
        let weak = handle.downgrade();
        let listener_ref = handle.downgrade();
        handle
            .add_listener(move |_| {
                let _ = listener_ref.upgrade();
                Ok(())
            })
            .unwrap();

        drop(handle);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn set_before_snapshot_is_dropped() {
        let handle = OptionsHandle::default();

        assert_eq!(handle.set("a", 1), Ok(false));
        assert_eq!(handle.is_initialized(), Ok(false));
    }

    #[test]
    fn snapshot_is_detached() {
        let handle = OptionsHandle::default();
        assert_eq!(handle.snapshot(), Ok(None));

        handle.apply_bulk(OptionSet::new(), false).unwrap();
        handle.set("a", true).unwrap();
        let snapshot = handle.snapshot().unwrap().unwrap();
        handle.set("a", false).unwrap();

        assert_eq!(snapshot["a"], OptionValue::Bool(true));
    }
}
