//! Type-safe key bindings shared by the feed components.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown to the user. Components expose their bindings
//! through the [`KeyMap`] trait.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding, e.g. `("r", "refresh")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short rendering of the keys.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses that trigger one action.
///
/// # Examples
///
/// ```rust
/// use bookshelf_feed::key::Binding;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let refresh = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh");
/// let retry = Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)])
///     .with_help("ctrl+r", "retry");
///
/// assert_eq!(refresh.help().desc, "refresh");
/// assert!(retry.enabled());
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help text (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The key presses bound to this action.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding currently responds to input.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns `true` if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == msg.key && k.modifiers == msg.modifiers)
    }
}

/// Implemented by components that expose key bindings for help views.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Returns `true` if the key message triggers any of the given bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_binding_matches_exact_modifiers() {
        let plain = Binding::new(vec![KeyCode::Char('r')]);
        let ctrl = Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)]);

        let r = key(KeyCode::Char('r'), KeyModifiers::NONE);
        let ctrl_r = key(KeyCode::Char('r'), KeyModifiers::CONTROL);

        assert!(plain.matches(&r));
        assert!(!plain.matches(&ctrl_r));
        assert!(ctrl.matches(&ctrl_r));
        assert!(!ctrl.matches(&r));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]);
        binding.set_enabled(false);
        assert!(!binding.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));

        let empty: Binding = Binding::new(Vec::<KeyCode>::new());
        assert!(!empty.enabled());
    }

    #[test]
    fn test_matches_any() {
        let a = Binding::new(vec![KeyCode::Char('a')]);
        let b = Binding::new(vec![KeyCode::Char('b')]);
        let msg = key(KeyCode::Char('b'), KeyModifiers::NONE);
        assert!(matches(&msg, &[&a, &b]));
        assert!(!matches(&msg, &[&a]));
    }
}
