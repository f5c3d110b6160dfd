//! Read-only accessor over the option set.

use tracing::error;

use crate::error::{OptionsError, Result};
use crate::value::{OptionSet, OptionValue};

/// Borrowed, read-only view of the current options.
///
/// This is what listeners receive on notification and what
/// [`OptionsStore::get`](crate::OptionsStore::get) delegates to. Failed lookups
/// are logged at error level and returned as `Err`; they never panic.
#[derive(Debug, Clone, Copy)]
pub struct OptionsView<'a> {
    options: Option<&'a OptionSet>,
}

impl<'a> OptionsView<'a> {
    pub fn new(options: Option<&'a OptionSet>) -> Self {
        Self { options }
    }

    /// Look up the current value of `name`.
    ///
    /// # Errors
    ///
    /// - `OptionsError::NotInitialized` before the first options snapshot
    ///   (or after a clear)
    /// - `OptionsError::UnknownOption` if the snapshot has no such option
    pub fn get(&self, name: &str) -> Result<&'a OptionValue> {
        let Some(options) = self.options else {
            error!(target: "options::store", option = name, "Options not set, wanted option");
            return Err(OptionsError::NotInitialized {
                name: name.to_string(),
            });
        };

        options.get(name).ok_or_else(|| {
            error!(target: "options::store", option = name, "Option doesn't exist");
            OptionsError::UnknownOption {
                name: name.to_string(),
            }
        })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let value = self.get(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, "bool", value))
    }

    pub fn get_number(&self, name: &str) -> Result<f64> {
        let value = self.get(name)?;
        value.as_f64().ok_or_else(|| mismatch(name, "number", value))
    }

    pub fn get_text(&self, name: &str) -> Result<&'a str> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "text", value))
    }

    /// Check for an option without logging a diagnostic when it is missing.
    pub fn contains(&self, name: &str) -> bool {
        self.options.is_some_and(|options| options.contains_key(name))
    }

    pub fn is_initialized(&self) -> bool {
        self.options.is_some()
    }

    /// Number of options; zero when unset.
    pub fn len(&self) -> usize {
        self.options.map_or(0, OptionSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Option names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.options
            .into_iter()
            .flat_map(|options| options.keys().map(String::as_str))
    }

    /// Borrow the whole mapping, if set.
    pub fn as_map(&self) -> Option<&'a OptionSet> {
        self.options
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &OptionValue) -> OptionsError {
    OptionsError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionSet {
        let mut options = OptionSet::new();
        options.insert("show_game_time".into(), true.into());
        options.insert("tile_font_size".into(), 16.into());
        options.insert("tile_font".into(), "monospace".into());
        options
    }

    #[test]
    fn unset_view_reports_not_initialized() {
        let view = OptionsView::new(None);

        assert_eq!(
            view.get("anything"),
            Err(OptionsError::NotInitialized {
                name: "anything".into()
            })
        );
        assert!(!view.is_initialized());
        assert_eq!(view.len(), 0);
        assert_eq!(view.names().count(), 0);
    }

    #[test]
    fn typed_getters() {
        let options = sample();
        let view = OptionsView::new(Some(&options));

        assert_eq!(view.get_bool("show_game_time"), Ok(true));
        assert_eq!(view.get_number("tile_font_size"), Ok(16.0));
        assert_eq!(view.get_text("tile_font"), Ok("monospace"));
    }

    #[test]
    fn typed_getter_mismatch() {
        let options = sample();
        let view = OptionsView::new(Some(&options));

        assert_eq!(
            view.get_bool("tile_font"),
            Err(OptionsError::TypeMismatch {
                name: "tile_font".into(),
                expected: "bool",
                actual: "text",
            })
        );
    }

    #[test]
    fn contains_is_quiet_and_strict() {
        let options = sample();
        let view = OptionsView::new(Some(&options));

        assert!(view.contains("tile_font"));
        assert!(!view.contains("missing"));
        assert!(!OptionsView::new(None).contains("tile_font"));
    }
}
