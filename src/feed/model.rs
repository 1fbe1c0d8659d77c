//! Main Model struct, construction, accessors and filter controls.

use super::config::{ConfigError, FeedConfig};
use super::gesture::{GesturePhase, GestureSensor};
use super::keys::FeedKeyMap;
use super::sensor::BottomSensor;
use super::style::FeedStyles;
use super::types::{Direction, FeedItem, LoadFailure, PageFetcher};
use super::window::Window;
use crate::clock::{Clock, SystemClock};
use crate::filter::FeedFilter;
use bubbletea_rs::Cmd;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A bidirectional sliding-window feed over a paged remote collection.
///
/// The feed keeps at most `max_window_size` items in memory. Scrolling to the
/// bottom appends the next page and evicts the oldest chunk; pulling at the
/// top prepends the previous page and evicts the newest chunk. Every filter
/// change resets the window and starts over from offset 0.
///
/// All loads are asynchronous: methods that start one return a [`Cmd`] that
/// performs the fetch and resolves to a [`PageLoadedMsg`](super::PageLoadedMsg),
/// which the host passes back into [`update`](Model::update).
///
/// # Examples
///
/// ```
/// use bookshelf_feed::feed::Model;
/// use bookshelf_feed::{Book, FeedFilter, FetchError, PageFuture};
///
/// let feed: Model<Book> = Model::new(|_: &FeedFilter, _offset: usize, _limit: usize| -> PageFuture<Book> {
///     Box::pin(async { Ok::<_, FetchError>(Vec::new()) })
/// });
///
/// assert!(feed.items().is_empty());
/// assert!(feed.has_more_forward());
/// assert!(!feed.has_more_backward());
/// ```
pub struct Model<I: FeedItem> {
    pub(super) id: i64,
    pub(super) config: FeedConfig,
    pub(super) fetcher: Arc<dyn PageFetcher<I>>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) filter: FeedFilter,
    pub(super) window: Window<I>,
    pub(super) gesture: GestureSensor,
    pub(super) bottom: BottomSensor,
    pub(super) forward_failure: Option<LoadFailure>,
    pub(super) backward_failure: Option<LoadFailure>,
    pub(super) focus: bool,
    pub(super) width: usize,

    /// Header text shown above the items.
    pub title: String,
    /// Key bindings.
    pub keymap: FeedKeyMap,
    /// Styles for the status lines.
    pub styles: FeedStyles,
}

impl<I: FeedItem> Model<I> {
    /// Creates a feed with the default configuration and the system clock.
    ///
    /// The window starts empty; call [`init`](Model::init) to issue the first
    /// forward load.
    pub fn new(fetcher: impl PageFetcher<I> + 'static) -> Self {
        Self::build(Arc::new(fetcher), FeedConfig::default())
    }

    /// Creates a feed with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails
    /// [`FeedConfig::validate`].
    pub fn with_config(
        fetcher: impl PageFetcher<I> + 'static,
        config: FeedConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(Arc::new(fetcher), config))
    }

    /// Creates a feed from a shared fetcher.
    pub fn with_shared_fetcher(
        fetcher: Arc<dyn PageFetcher<I>>,
        config: FeedConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(fetcher, config))
    }

    fn build(fetcher: Arc<dyn PageFetcher<I>>, config: FeedConfig) -> Self {
        Self {
            id: next_id(),
            gesture: GestureSensor::new(config.pull_threshold),
            bottom: BottomSensor::new(config.sentinel_margin),
            config,
            fetcher,
            clock: Arc::new(SystemClock),
            filter: FeedFilter::default(),
            window: Window::new(),
            forward_failure: None,
            backward_failure: None,
            focus: false,
            width: 0,
            title: "Library".to_string(),
            keymap: FeedKeyMap::default(),
            styles: FeedStyles::default(),
        }
    }

    /// Replaces the clock used for backward-load debouncing (builder pattern).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Starts with the given filter instead of the empty one (builder pattern).
    pub fn with_filter(mut self, filter: FeedFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the header text (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Issues the first forward load.
    pub fn init(&mut self) -> Option<Cmd> {
        self.load_forward()
    }

    /// The unique id of this feed; messages addressed to another id are
    /// ignored.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The active configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// The active filter descriptor.
    pub fn filter(&self) -> &FeedFilter {
        &self.filter
    }

    /// The materialized window state.
    pub fn window(&self) -> &Window<I> {
        &self.window
    }

    /// The current window, oldest-loaded first.
    pub fn items(&self) -> &[I] {
        self.window.items()
    }

    /// Whether a forward load is in flight.
    pub fn loading_forward(&self) -> bool {
        self.window.loading_forward
    }

    /// Whether a backward load is in flight.
    pub fn loading_backward(&self) -> bool {
        self.window.loading_backward
    }

    /// Whether later pages may exist.
    pub fn has_more_forward(&self) -> bool {
        self.window.has_more_forward
    }

    /// Whether earlier pages may exist.
    pub fn has_more_backward(&self) -> bool {
        self.window.has_more_backward
    }

    /// The pending load failure, forward first. A failure is kept until a
    /// load in the same direction starts or the window is reset.
    pub fn error(&self) -> Option<&LoadFailure> {
        self.forward_failure
            .as_ref()
            .or(self.backward_failure.as_ref())
    }

    /// The pending failure of one direction.
    pub fn failure(&self, direction: Direction) -> Option<&LoadFailure> {
        match direction {
            Direction::Forward => self.forward_failure.as_ref(),
            Direction::Backward => self.backward_failure.as_ref(),
        }
    }

    /// The accumulated pull distance of the gesture in progress.
    pub fn pull_distance(&self) -> f32 {
        self.gesture.pull_distance()
    }

    /// The phase of the top gesture sensor.
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Sets the render width; lines wider than this are truncated. Zero
    /// disables truncation.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Resets the window to its initial state.
    ///
    /// In-flight fetches are not cancelled; their results are discarded when
    /// they arrive because the window generation has moved on.
    pub fn reset(&mut self) {
        self.window.reset();
        self.gesture.reset();
        self.forward_failure = None;
        self.backward_failure = None;
        tracing::debug!(
            feed = self.id,
            generation = self.window.generation(),
            "feed window reset"
        );
    }

    /// Resets the window and immediately loads the first page.
    ///
    /// Use after the underlying collection changed elsewhere.
    pub fn refresh(&mut self) -> Option<Cmd> {
        self.reset();
        self.load_forward()
    }

    /// Replaces the filter descriptor. An unchanged descriptor is a no-op;
    /// otherwise the window is reset and the first page requested.
    pub fn set_filter(&mut self, filter: FeedFilter) -> Option<Cmd> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        self.refresh()
    }

    /// Replaces the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Option<Cmd> {
        let mut filter = self.filter.clone();
        if !filter.set_search_term(term) {
            return None;
        }
        self.set_filter(filter)
    }

    /// Toggles the favorites filter.
    pub fn toggle_favorites(&mut self) -> Option<Cmd> {
        let mut filter = self.filter.clone();
        filter.toggle_favorites();
        self.set_filter(filter)
    }

    /// Toggles the finished filter, clearing "unfinished" when activated.
    pub fn toggle_finished(&mut self) -> Option<Cmd> {
        let mut filter = self.filter.clone();
        filter.toggle_finished();
        self.set_filter(filter)
    }

    /// Toggles the unfinished filter, clearing "finished" when activated.
    pub fn toggle_unfinished(&mut self) -> Option<Cmd> {
        let mut filter = self.filter.clone();
        filter.toggle_unfinished();
        self.set_filter(filter)
    }
}
