//! Default key bindings for the feed.

use crate::key::{Binding, KeyMap};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for feed actions.
///
/// # Examples
///
/// ```rust
/// use bookshelf_feed::feed::FeedKeyMap;
/// use bookshelf_feed::key::{Binding, KeyMap};
/// use crossterm::event::KeyCode;
///
/// let mut keymap = FeedKeyMap::default();
/// keymap.refresh = Binding::new(vec![KeyCode::F(5)]).with_help("f5", "refresh");
/// assert_eq!(keymap.short_help().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct FeedKeyMap {
    /// Drop the window and reload from the first page.
    pub refresh: Binding,
    /// Load the previous page without a pull gesture.
    pub load_earlier: Binding,
    /// Retry the last failed load.
    pub retry: Binding,
    /// Toggle the favorites filter.
    pub toggle_favorites: Binding,
    /// Toggle the finished filter.
    pub toggle_finished: Binding,
    /// Toggle the unfinished filter.
    pub toggle_unfinished: Binding,
}

impl Default for FeedKeyMap {
    fn default() -> Self {
        Self {
            refresh: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh"),
            load_earlier: Binding::new(vec![(KeyCode::Char('u'), KeyModifiers::CONTROL)])
                .with_help("ctrl+u", "load earlier"),
            retry: Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)])
                .with_help("ctrl+r", "retry"),
            toggle_favorites: Binding::new(vec![KeyCode::Char('f')])
                .with_help("f", "favorites"),
            toggle_finished: Binding::new(vec![KeyCode::Char('d')]).with_help("d", "finished"),
            toggle_unfinished: Binding::new(vec![KeyCode::Char('u')])
                .with_help("u", "unfinished"),
        }
    }
}

impl KeyMap for FeedKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.refresh,
            &self.toggle_favorites,
            &self.toggle_finished,
            &self.toggle_unfinished,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.refresh, &self.load_earlier, &self.retry],
            vec![
                &self.toggle_favorites,
                &self.toggle_finished,
                &self.toggle_unfinished,
            ],
        ]
    }
}
