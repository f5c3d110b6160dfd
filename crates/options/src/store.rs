//! Client-side option cache.
//!
//! [`OptionsStore`] holds the options pushed by the server and is the only
//! place they are mutated. Every accepted mutation goes through the same
//! apply-then-notify path: the mapping is updated in place first, then every
//! listener runs in registration order with a view of the updated state.
//!
//! # Lifecycle
//!
//! ```text
//! unset ──options snapshot──▶ set ──set / set_option──▶ set (merged)
//!   ▲  │                       │
//!   │  └ set: dropped          │      watcher snapshot: replace again
//!   └────────── clear ─────────┘
//! ```

use tracing::{debug, info, warn};

use crate::error::{ListenerResult, Result};
use crate::listeners::{FnListener, ListenerRegistry, NotifyOutcome, OptionsListener};
use crate::value::{OptionSet, OptionValue};
use crate::view::OptionsView;

/// Owner of the option set and its listeners.
#[derive(Default)]
pub struct OptionsStore {
    options: Option<OptionSet>,
    listeners: ListenerRegistry,
}

impl OptionsStore {
    /// Creates an empty, unset store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current options (e.g. on disconnect).
    ///
    /// Listeners are not notified. Listener registrations are kept.
    pub fn clear(&mut self) {
        if self.options.take().is_some() {
            debug!(target: "options::store", "Options cleared");
        }
    }

    /// Look up the current value of `name`.
    ///
    /// Strict: unknown names are an error even though [`set`](Self::set)
    /// accepts them. See [`OptionsView::get`] for the error cases.
    pub fn get(&self, name: &str) -> Result<&OptionValue> {
        self.view().get(name)
    }

    /// Read-only view over the current options.
    pub fn view(&self) -> OptionsView<'_> {
        OptionsView::new(self.options.as_ref())
    }

    pub fn is_initialized(&self) -> bool {
        self.options.is_some()
    }

    /// Apply a full options snapshot.
    ///
    /// The snapshot replaces the whole set, but only on the first sync (store
    /// unset) or when the sender flags this client as a watcher. Otherwise it
    /// is ignored without notifying anyone.
    ///
    /// Returns whether the snapshot was applied.
    pub fn apply_bulk(&mut self, options: OptionSet, is_watcher: bool) -> bool {
        if self.options.is_some() && !is_watcher {
            debug!(
                target: "options::store",
                count = options.len(),
                "Ignoring options snapshot, already initialized"
            );
            return false;
        }

        debug!(
            target: "options::store",
            count = options.len(),
            watcher = is_watcher,
            "Applying options snapshot"
        );
        self.options = Some(options);
        self.notify();
        true
    }

    /// Write a single option and notify listeners.
    ///
    /// Permissive: the option is created if the current snapshot lacks it.
    /// The previous value is looked up through [`get`](Self::get) for the
    /// change log line. Before the first snapshot there is nothing to write
    /// into, so the lookup logs a "not set" diagnostic and the write is
    /// dropped without notifying anyone. The next snapshot is then applied as
    /// the first sync.
    ///
    /// Returns whether the write was applied.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> bool {
        let name = name.into();
        let value = value.into();

        let old = match self.get(&name) {
            Ok(old) => old.to_string(),
            Err(_) => "null".to_string(),
        };
        info!(target: "options::store", "{}: '{}' => '{}'", name, old, value);

        let Some(options) = self.options.as_mut() else {
            warn!(
                target: "options::store",
                option = %name,
                "Options not set yet, dropping write"
            );
            return false;
        };
        options.insert(name, value);
        self.notify();
        true
    }

    /// Handler body for a single-option change pushed by the server.
    pub fn apply_single(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> bool {
        self.set(name, value)
    }

    /// Register a closure listener. It is not invoked until the next change.
    pub fn add_listener<F>(&mut self, callback: F)
    where
        F: Fn(&OptionsView<'_>) -> ListenerResult + 'static,
    {
        self.listeners.register(Box::new(FnListener::new(callback)));
    }

    /// Register a listener object.
    pub fn add_observer(&mut self, listener: impl OptionsListener + 'static) {
        self.listeners.register(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) -> NotifyOutcome {
        let outcome = self.listeners.notify_all(&self.view());
        if outcome.failed > 0 {
            debug!(
                target: "options::store",
                notified = outcome.notified,
                failed = outcome.failed,
                "Listener round finished with failures"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionsError;
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn options(pairs: &[(&str, i64)]) -> OptionSet {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), OptionValue::from(*value)))
            .collect()
    }

    fn counting(store: &mut OptionsStore) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        store.add_listener(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        count
    }

    #[test]
    fn starts_unset() {
        let store = OptionsStore::new();

        assert!(!store.is_initialized());
        assert_eq!(
            store.get("a"),
            Err(OptionsError::NotInitialized { name: "a".into() })
        );
    }

    #[test]
    fn first_snapshot_is_applied() {
        let mut store = OptionsStore::new();
        let calls = counting(&mut store);

        assert!(store.apply_bulk(options(&[("a", 1), ("b", 2)]), false));

        assert_eq!(store.get("a"), Ok(&OptionValue::from(1)));
        assert_eq!(
            store.get("c"),
            Err(OptionsError::UnknownOption { name: "c".into() })
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn later_snapshot_ignored_for_players() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1)]), false);
        let calls = counting(&mut store);

        assert!(!store.apply_bulk(options(&[("a", 9)]), false));

        assert_eq!(store.get("a"), Ok(&OptionValue::from(1)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn watcher_snapshot_replaces_without_merge() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1), ("b", 2)]), false);
        let calls = counting(&mut store);

        assert!(store.apply_bulk(options(&[("a", 9)]), true));

        assert_eq!(store.get("a"), Ok(&OptionValue::from(9)));
        assert!(store.get("b").is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn single_update_merges() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1)]), false);
        let calls = counting(&mut store);

        store.apply_single("b", 5);

        assert_eq!(store.get("a"), Ok(&OptionValue::from(1)));
        assert_eq!(store.get("b"), Ok(&OptionValue::from(5)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn write_before_first_snapshot_does_not_block_it() {
        let mut store = OptionsStore::new();
        let calls = counting(&mut store);

        assert!(!store.set("tile_font", "monospace"));
        assert!(!store.is_initialized());
        assert_eq!(calls.get(), 0);

        let snapshot: OptionSet = [
            ("tile_font".to_string(), OptionValue::from("serif")),
            ("tile_font_size".to_string(), OptionValue::from(16)),
        ]
        .into_iter()
        .collect();
        assert!(store.apply_bulk(snapshot, false));

        assert_eq!(store.get("tile_font"), Ok(&OptionValue::from("serif")));
        assert_eq!(store.get("tile_font_size"), Ok(&OptionValue::from(16)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn write_before_first_snapshot_logs_not_set_diagnostic() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let mut store = OptionsStore::new();

        let applied =
            tracing::subscriber::with_default(subscriber, || store.set("tile_font", "monospace"));

        assert!(!applied);
        let output = logs.contents();
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("Options not set, wanted option"), "{output}");
        assert!(output.contains("tile_font: 'null' => 'monospace'"), "{output}");
        assert!(output.contains("dropping write"), "{output}");
    }

    #[test]
    fn watcher_snapshot_on_unset_store_is_applied() {
        let mut store = OptionsStore::new();
        let calls = counting(&mut store);

        assert!(store.apply_bulk(options(&[("a", 3)]), true));

        assert!(store.is_initialized());
        assert_eq!(store.get("a"), Ok(&OptionValue::from(3)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listeners_run_in_registration_order_after_each_mutation() {
        let mut store = OptionsStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let sink = Rc::clone(&order);
            store.add_listener(move |view| {
                sink.borrow_mut().push((label, view.get("a")?.as_i64()));
                Ok(())
            });
        }

        store.apply_bulk(options(&[("a", 1)]), false);
        store.set("a", 2);

        assert_eq!(
            *order.borrow(),
            vec![
                ("first", Some(1)),
                ("second", Some(1)),
                ("third", Some(1)),
                ("first", Some(2)),
                ("second", Some(2)),
                ("third", Some(2)),
            ]
        );
    }

    #[test]
    fn clear_is_silent_and_idempotent() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1)]), false);
        let calls = counting(&mut store);

        store.clear();
        store.clear();

        assert_eq!(
            store.get("a"),
            Err(OptionsError::NotInitialized { name: "a".into() })
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn snapshot_after_clear_is_accepted_again() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1)]), false);
        store.clear();

        assert!(store.apply_bulk(options(&[("a", 2)]), false));
        assert_eq!(store.get("a"), Ok(&OptionValue::from(2)));
    }

    #[test]
    fn listeners_see_the_mutation() {
        let mut store = OptionsStore::new();
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        store.add_listener(move |view| {
            sink.set(view.get("a")?.as_i64());
            Ok(())
        });

        store.apply_bulk(options(&[("a", 1)]), false);
        assert_eq!(seen.get(), Some(1));

        store.set("a", 7);
        assert_eq!(seen.get(), Some(7));
    }

    #[test]
    fn add_listener_does_not_invoke() {
        let mut store = OptionsStore::new();
        store.apply_bulk(options(&[("a", 1)]), false);

        let calls = counting(&mut store);

        assert_eq!(calls.get(), 0);
    }
}
