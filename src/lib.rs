#![warn(missing_docs)]

//! # bookshelf-feed
//!
//! An infinitely scrolling, filterable book feed for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! The feed materializes a remote, paginated library through a bounded
//! sliding window. Reaching the bottom appends the next page and drops the
//! oldest chunk; pulling down at the top brings the previous page back and
//! drops the newest chunk. Memory stays bounded no matter how far the reader
//! scrolls.
//!
//! ## Overview
//!
//! - [`feed::Model`]: the window controller, with forward/backward loaders,
//!   dedup, eviction and the bubbletea `update`/`view` surface
//! - [`FeedFilter`]: search term plus favorites / finished / unfinished flags
//! - [`PageFetcher`]: the only data dependency, an async `(filter, offset,
//!   limit) -> page` call
//! - [`Book`]: the library item and its `/api/books` wire format
//! - [`clock`]: injectable time source for backward-load debouncing
//!
//! ## Example
//!
//! ```rust
//! use bookshelf_feed::prelude::*;
//! use bubbletea_rs::Msg;
//!
//! let fetch = |filter: &FeedFilter, offset: usize, limit: usize| -> PageFuture<Book> {
//!     let _query = filter.query_pairs(offset, limit);
//!     Box::pin(async { Ok::<_, FetchError>(Vec::new()) })
//! };
//!
//! let mut feed: Feed<Book> = Feed::with_config(fetch, FeedConfig::default()).unwrap();
//! let _first_page = feed.init();
//!
//! // While the first page is in flight, scroll signals are absorbed.
//! let bottom = Box::new(ReachedBottomMsg { id: feed.id() }) as Msg;
//! assert!(feed.update(bottom).is_none());
//! assert!(feed.loading_forward());
//! ```
//!
//! ## Focus Management
//!
//! The feed implements [`Component`]; key bindings from
//! [`feed::FeedKeyMap`] are only honored while it is focused.
//!
//! ```rust
//! use bookshelf_feed::prelude::*;
//!
//! let mut feed: Feed<Book> = Feed::new(|_: &FeedFilter, _: usize, _: usize| -> PageFuture<Book> {
//!     Box::pin(async { Ok::<_, FetchError>(Vec::new()) })
//! });
//! assert!(!feed.focused());
//! feed.focus();
//! assert!(feed.focused());
//! feed.blur();
//! assert!(!feed.focused());
//! ```

pub mod book;
pub mod clock;
pub mod feed;
pub mod filter;
pub mod key;

use bubbletea_rs::Cmd;

/// Core trait for components that take keyboard focus.
///
/// - `focus()` marks the component focused and may return a command to run
/// - `blur()` marks it unfocused
/// - `focused()` reports the current state
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use book::{parse_books_page, sort_for_display, Book, BooksPage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use feed::{
    BottomSensor, ConfigError, Direction, FailurePolicy, FeedConfig, FeedItem, FeedKeyMap,
    FeedStyles, FetchError, GestureEvent, GesturePhase, GestureSensor, GestureSignal, LoadFailure,
    Model as Feed, PageFetcher, PageFuture, ViewportMetrics,
};
pub use filter::FeedFilter;
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bookshelf_feed::prelude::*;
/// ```
pub mod prelude {
    pub use crate::book::{Book, BooksPage};
    pub use crate::feed::{
        ConfigError, FailurePolicy, FeedConfig, FeedItem, FetchError, GestureEvent, GestureMsg,
        Model as Feed, PageFetcher, PageFuture, PageLoadedMsg, ReachedBottomMsg, RefreshMsg,
        ViewportMetrics, ViewportMsg,
    };
    pub use crate::filter::FeedFilter;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::Component;
}
