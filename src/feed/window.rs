//! The materialized window and its merge rules.
//!
//! [`Window`] holds the items currently in memory together with both
//! cursors, both `has_more` flags and both loading guards. Pages are merged
//! with [`Window::append_page`] and [`Window::prepend_page`], which dedupe
//! against the live items and evict one chunk from the opposite end when the
//! window overflows.
//!
//! An id index is kept next to `items` and updated on every insert and
//! eviction, so dedup stays O(page) however large the window is configured.

use super::types::FeedItem;
use std::collections::HashSet;
use web_time::Instant;

/// Counts reported by a page merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Items that were not yet resident and got inserted.
    pub added: usize,
    /// Fetched items dropped because their id was already resident.
    pub duplicates: usize,
    /// Items evicted from the opposite end.
    pub evicted: usize,
}

/// The in-memory window over the remote collection.
#[derive(Debug, Clone)]
pub struct Window<I: FeedItem> {
    items: Vec<I>,
    ids: HashSet<I::Id>,
    pub(super) forward_cursor: usize,
    pub(super) backward_cursor: usize,
    pub(super) has_more_forward: bool,
    pub(super) has_more_backward: bool,
    pub(super) loading_forward: bool,
    pub(super) loading_backward: bool,
    pub(super) last_backward_load: Option<Instant>,
    generation: u64,
}

impl<I: FeedItem> Default for Window<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: FeedItem> Window<I> {
    /// Creates an empty window at generation 0.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            forward_cursor: 0,
            backward_cursor: 0,
            has_more_forward: true,
            has_more_backward: false,
            loading_forward: false,
            loading_backward: false,
            last_backward_load: None,
            generation: 0,
        }
    }

    /// Drops every item and returns all fields to their initial values.
    ///
    /// The generation is bumped so that fetches started before the reset can
    /// be recognized as stale when they settle.
    pub fn reset(&mut self) {
        self.items.clear();
        self.ids.clear();
        self.forward_cursor = 0;
        self.backward_cursor = 0;
        self.has_more_forward = true;
        self.has_more_backward = false;
        self.loading_forward = false;
        self.loading_backward = false;
        self.last_backward_load = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// The materialized items, oldest-loaded first.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of materialized items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item is materialized.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this id is materialized.
    pub fn contains(&self, id: &I::Id) -> bool {
        self.ids.contains(id)
    }

    /// Offset of the next page going down.
    pub fn forward_cursor(&self) -> usize {
        self.forward_cursor
    }

    /// Offset of the earliest page that is no longer materialized going up.
    pub fn backward_cursor(&self) -> usize {
        self.backward_cursor
    }

    /// Whether later pages may exist.
    pub fn has_more_forward(&self) -> bool {
        self.has_more_forward
    }

    /// Whether earlier pages may exist.
    pub fn has_more_backward(&self) -> bool {
        self.has_more_backward
    }

    /// Whether a forward fetch is in flight.
    pub fn loading_forward(&self) -> bool {
        self.loading_forward
    }

    /// Whether a backward fetch is in flight.
    pub fn loading_backward(&self) -> bool {
        self.loading_backward
    }

    /// The current generation; bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Merges a page fetched at `forward_cursor` onto the bottom.
    ///
    /// An empty page exhausts the forward direction and leaves everything
    /// else untouched. Otherwise the page is capped at `chunk_size`, deduped,
    /// appended, and one chunk is evicted from the top if the window
    /// overflows. The forward cursor always advances by a full chunk since it
    /// tracks backend position, not occupancy.
    pub fn append_page(
        &mut self,
        mut page: Vec<I>,
        chunk_size: usize,
        max_window_size: usize,
    ) -> MergeOutcome {
        if page.is_empty() {
            self.has_more_forward = false;
            return MergeOutcome::default();
        }
        page.truncate(chunk_size);

        let fetched = page.len();
        let fresh = self.retain_unseen(page);
        let mut outcome = MergeOutcome {
            added: fresh.len(),
            duplicates: fetched - fresh.len(),
            evicted: 0,
        };
        self.items.extend(fresh);

        if self.items.len() > max_window_size {
            outcome.evicted = self.evict_front(chunk_size);
            self.backward_cursor += chunk_size;
        }
        if outcome.evicted > 0 || self.items.len() >= max_window_size || self.backward_cursor > 0
        {
            self.has_more_backward = true;
        }
        self.forward_cursor += chunk_size;
        outcome
    }

    /// Merges a page fetched at `target` onto the top.
    ///
    /// An empty page exhausts the backward direction. Otherwise the page is
    /// capped at `chunk_size`, deduped, prepended, and one chunk is evicted
    /// from the bottom if the window overflows. The backward cursor moves to
    /// `target`; reaching offset 0 exhausts the backward direction.
    pub fn prepend_page(
        &mut self,
        mut page: Vec<I>,
        target: usize,
        chunk_size: usize,
        max_window_size: usize,
    ) -> MergeOutcome {
        if page.is_empty() {
            self.has_more_backward = false;
            return MergeOutcome::default();
        }
        page.truncate(chunk_size);

        let fetched = page.len();
        let fresh = self.retain_unseen(page);
        let mut outcome = MergeOutcome {
            added: fresh.len(),
            duplicates: fetched - fresh.len(),
            evicted: 0,
        };
        self.items.splice(0..0, fresh);

        if self.items.len() > max_window_size {
            outcome.evicted = self.evict_back(chunk_size);
        }
        self.backward_cursor = target;
        if target == 0 {
            self.has_more_backward = false;
        }
        outcome
    }

    /// Keeps the items of `page` whose id is neither resident nor repeated
    /// earlier in the page, and registers their ids.
    fn retain_unseen(&mut self, page: Vec<I>) -> Vec<I> {
        page.into_iter()
            .filter(|item| self.ids.insert(item.id()))
            .collect()
    }

    fn evict_front(&mut self, count: usize) -> usize {
        let count = count.min(self.items.len());
        for item in self.items.drain(..count) {
            self.ids.remove(&item.id());
        }
        count
    }

    fn evict_back(&mut self, count: usize) -> usize {
        let count = count.min(self.items.len());
        let keep = self.items.len() - count;
        for item in self.items.drain(keep..) {
            self.ids.remove(&item.id());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32);

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "row {}", self.0)
        }
    }

    impl FeedItem for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn rows(range: std::ops::Range<u32>) -> Vec<Row> {
        range.map(Row).collect()
    }

    fn ids(window: &Window<Row>) -> Vec<u32> {
        window.items().iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_new_window_state() {
        let window: Window<Row> = Window::new();
        assert!(window.is_empty());
        assert_eq!(window.forward_cursor(), 0);
        assert_eq!(window.backward_cursor(), 0);
        assert!(window.has_more_forward());
        assert!(!window.has_more_backward());
        assert!(!window.loading_forward());
        assert!(!window.loading_backward());
        assert_eq!(window.generation(), 0);
    }

    #[test]
    fn test_append_within_bound() {
        let mut window = Window::new();
        let outcome = window.append_page(rows(0..18), 18, 54);
        assert_eq!(outcome.added, 18);
        assert_eq!(outcome.evicted, 0);
        assert_eq!(window.len(), 18);
        assert_eq!(window.forward_cursor(), 18);
        assert!(!window.has_more_backward());
    }

    #[test]
    fn test_append_dedupes_against_resident_items() {
        let mut window = Window::new();
        window.append_page(rows(0..18), 18, 54);
        let outcome = window.append_page(rows(10..28), 18, 54);
        assert_eq!(outcome.added, 10);
        assert_eq!(outcome.duplicates, 8);
        assert_eq!(ids(&window), (0..28).collect::<Vec<_>>());
        assert_eq!(window.forward_cursor(), 36);
    }

    #[test]
    fn test_append_dedupes_within_page() {
        let mut window = Window::new();
        let outcome = window.append_page(vec![Row(1), Row(2), Row(1)], 18, 54);
        assert_eq!(outcome.added, 2);
        assert_eq!(ids(&window), vec![1, 2]);
    }

    #[test]
    fn test_append_truncates_oversized_page() {
        let mut window = Window::new();
        let outcome = window.append_page(rows(0..30), 18, 54);
        assert_eq!(outcome.added, 18);
        assert_eq!(window.len(), 18);
    }

    #[test]
    fn test_append_evicts_front_chunk_on_overflow() {
        let mut window = Window::new();
        for start in [0, 18, 36] {
            window.append_page(rows(start..start + 18), 18, 54);
        }
        assert_eq!(window.len(), 54);
        assert!(window.has_more_backward());
        assert_eq!(window.backward_cursor(), 0);

        let outcome = window.append_page(rows(54..72), 18, 54);
        assert_eq!(outcome.evicted, 18);
        assert_eq!(window.len(), 54);
        assert_eq!(window.backward_cursor(), 18);
        assert_eq!(ids(&window).first(), Some(&18));
        assert!(!window.contains(&0));
        assert!(window.contains(&71));
    }

    #[test]
    fn test_empty_append_exhausts_forward_only() {
        let mut window = Window::new();
        window.append_page(rows(0..18), 18, 54);
        let outcome = window.append_page(Vec::new(), 18, 54);
        assert_eq!(outcome, MergeOutcome::default());
        assert!(!window.has_more_forward());
        assert_eq!(window.forward_cursor(), 18);
        assert_eq!(window.len(), 18);
    }

    #[test]
    fn test_prepend_inserts_at_top_and_moves_cursor() {
        let mut window = Window::new();
        for start in (0..72).step_by(18) {
            window.append_page(rows(start..start + 18), 18, 54);
        }
        window.append_page(rows(72..90), 18, 54);
        assert_eq!(window.backward_cursor(), 36);

        let outcome = window.prepend_page(rows(18..36), 18, 18, 54);
        assert_eq!(outcome.added, 18);
        assert_eq!(outcome.evicted, 18);
        assert_eq!(window.len(), 54);
        assert_eq!(ids(&window).first(), Some(&18));
        assert_eq!(ids(&window).last(), Some(&71));
        assert!(!window.contains(&72));
        assert_eq!(window.backward_cursor(), 18);
        assert!(window.has_more_backward());
    }

    #[test]
    fn test_prepend_to_offset_zero_exhausts_backward() {
        let mut window = Window::new();
        window.has_more_backward = true;
        window.backward_cursor = 18;
        window.prepend_page(rows(0..18), 0, 18, 54);
        assert_eq!(window.backward_cursor(), 0);
        assert!(!window.has_more_backward());
    }

    #[test]
    fn test_empty_prepend_exhausts_backward() {
        let mut window: Window<Row> = Window::new();
        window.has_more_backward = true;
        window.backward_cursor = 36;
        window.prepend_page(Vec::new(), 18, 18, 54);
        assert!(!window.has_more_backward());
        assert_eq!(window.backward_cursor(), 36);
    }

    #[test]
    fn test_reset_restores_initial_state_and_bumps_generation() {
        let mut window = Window::new();
        window.append_page(rows(0..18), 18, 54);
        window.loading_forward = true;
        window.loading_backward = true;
        window.has_more_backward = true;
        window.last_backward_load = Some(Instant::now());
        window.reset();

        assert!(window.is_empty());
        assert!(!window.contains(&0));
        assert_eq!(window.forward_cursor(), 0);
        assert_eq!(window.backward_cursor(), 0);
        assert!(window.has_more_forward());
        assert!(!window.has_more_backward());
        assert!(!window.loading_forward());
        assert!(!window.loading_backward());
        assert!(window.last_backward_load.is_none());
        assert_eq!(window.generation(), 1);
    }

    #[test]
    fn test_evicted_ids_can_return() {
        let mut window = Window::new();
        for start in (0..72).step_by(18) {
            window.append_page(rows(start..start + 18), 18, 54);
        }
        assert!(!window.contains(&5));
        window.prepend_page(rows(0..18), 0, 18, 54);
        assert!(window.contains(&5));
        assert_eq!(window.len(), 54);
    }
}
