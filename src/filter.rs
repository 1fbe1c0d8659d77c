//! The filter descriptor sent with every page request.
//!
//! `finished_only` and `unfinished_only` are mutually exclusive. The fields
//! are private so that every mutation goes through the toggles below, which
//! keep that invariant.

/// Search term and toggle filters for the book feed.
///
/// # Examples
///
/// ```rust
/// use bookshelf_feed::FeedFilter;
///
/// let mut filter = FeedFilter::new();
/// filter.toggle_unfinished();
/// filter.toggle_finished();
///
/// assert!(filter.finished_only());
/// assert!(!filter.unfinished_only());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeedFilter {
    search_term: String,
    favorites_only: bool,
    finished_only: bool,
    unfinished_only: bool,
}

impl FeedFilter {
    /// Creates an empty filter that matches the whole collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term (builder pattern).
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// The active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether only favorites are requested.
    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    /// Whether only finished books are requested.
    pub fn finished_only(&self) -> bool {
        self.finished_only
    }

    /// Whether only unfinished books are requested.
    pub fn unfinished_only(&self) -> bool {
        self.unfinished_only
    }

    /// Returns `true` if any part of the filter narrows the collection.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || self.favorites_only
            || self.finished_only
            || self.unfinished_only
    }

    /// Replaces the search term. Returns `true` if it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Flips the favorites toggle.
    pub fn toggle_favorites(&mut self) {
        self.favorites_only = !self.favorites_only;
    }

    /// Flips the finished toggle; activating it clears `unfinished_only`.
    pub fn toggle_finished(&mut self) {
        self.finished_only = !self.finished_only;
        if self.finished_only {
            self.unfinished_only = false;
        }
    }

    /// Flips the unfinished toggle; activating it clears `finished_only`.
    pub fn toggle_unfinished(&mut self) {
        self.unfinished_only = !self.unfinished_only;
        if self.unfinished_only {
            self.finished_only = false;
        }
    }

    /// Query parameters for the `/api/books` endpoint.
    ///
    /// Toggle parameters are only present when active.
    ///
    /// ```rust
    /// use bookshelf_feed::FeedFilter;
    ///
    /// let mut filter = FeedFilter::new().with_search_term("dune");
    /// filter.toggle_favorites();
    ///
    /// let pairs = filter.query_pairs(36, 18);
    /// assert_eq!(pairs[0], ("query", "dune".to_string()));
    /// assert!(pairs.contains(&("favorites", "true".to_string())));
    /// assert!(!pairs.iter().any(|(k, _)| *k == "finished"));
    /// ```
    pub fn query_pairs(&self, offset: usize, limit: usize) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.search_term.clone()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if self.favorites_only {
            pairs.push(("favorites", "true".to_string()));
        }
        if self.finished_only {
            pairs.push(("finished", "true".to_string()));
        }
        if self.unfinished_only {
            pairs.push(("unfinished", "true".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filter_is_inactive() {
        let filter = FeedFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.search_term(), "");
    }

    #[test]
    fn test_finished_clears_unfinished() {
        let mut filter = FeedFilter::new();
        filter.toggle_unfinished();
        assert!(filter.unfinished_only());

        filter.toggle_finished();
        assert!(filter.finished_only());
        assert!(!filter.unfinished_only());
    }

    #[test]
    fn test_unfinished_clears_finished() {
        let mut filter = FeedFilter::new();
        filter.toggle_finished();
        filter.toggle_unfinished();
        assert!(filter.unfinished_only());
        assert!(!filter.finished_only());
    }

    #[test]
    fn test_deactivating_leaves_other_toggle_alone() {
        let mut filter = FeedFilter::new();
        filter.toggle_finished();
        filter.toggle_finished();
        assert!(!filter.finished_only());
        assert!(!filter.unfinished_only());
    }

    #[test]
    fn test_never_both_finished_and_unfinished() {
        let mut filter = FeedFilter::new();
        let ops: [fn(&mut FeedFilter); 3] = [
            FeedFilter::toggle_finished,
            FeedFilter::toggle_unfinished,
            FeedFilter::toggle_favorites,
        ];
        for round in 0..27 {
            ops[round % 3](&mut filter);
            ops[(round / 3) % 3](&mut filter);
            assert!(!(filter.finished_only() && filter.unfinished_only()));
        }
    }

    #[test]
    fn test_set_search_term_reports_change() {
        let mut filter = FeedFilter::new();
        assert!(filter.set_search_term("tolkien"));
        assert!(!filter.set_search_term("tolkien"));
        assert!(filter.is_active());
    }

    #[test]
    fn test_query_pairs_include_active_toggles() {
        let mut filter = FeedFilter::new();
        filter.toggle_unfinished();
        let pairs = filter.query_pairs(0, 18);
        assert_eq!(
            pairs,
            vec![
                ("query", String::new()),
                ("offset", "0".to_string()),
                ("limit", "18".to_string()),
                ("unfinished", "true".to_string()),
            ]
        );
    }
}
