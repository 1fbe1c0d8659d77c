//! Core types and traits for the feed component.
//!
//! This module contains:
//! - the [`FeedItem`] trait for anything the feed can hold
//! - the [`PageFetcher`] trait, the feed's only data dependency
//! - [`FetchError`] and the messages exchanged with the bubbletea runtime

use super::gesture::GestureEvent;
use super::sensor::ViewportMetrics;
use crate::filter::FeedFilter;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;

/// Trait for items that can live in the feed window.
///
/// The feed never looks inside an item except to compare identities, so the
/// only requirement beyond `Display` (used by the default view) is a stable
/// unique [`id`](FeedItem::id).
///
/// # Examples
///
/// ```
/// use bookshelf_feed::FeedItem;
/// use std::fmt::Display;
///
/// #[derive(Clone)]
/// struct Article {
///     slug: String,
///     headline: String,
/// }
///
/// impl Display for Article {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.headline)
///     }
/// }
///
/// impl FeedItem for Article {
///     type Id = String;
///
///     fn id(&self) -> String {
///         self.slug.clone()
///     }
/// }
/// ```
pub trait FeedItem: Display + Clone + Send + Sync + 'static {
    /// The identity type used for deduplication.
    type Id: Eq + Hash + Clone + Debug + Send + Sync;

    /// Returns the stable unique identifier of this item.
    fn id(&self) -> Self::Id;
}

/// The two directions the window grows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards later pages (scrolling down).
    Forward,
    /// Towards earlier pages (pulling at the top).
    Backward,
}

/// Errors a [`PageFetcher`] can report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("server responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text returned by the backend, if any.
        message: String,
    },
    /// The backend answered with an error body.
    #[error("server error: {0}")]
    Server(String),
    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The future returned by [`PageFetcher::fetch_page`].
pub type PageFuture<I> = Pin<Box<dyn Future<Output = Result<Vec<I>, FetchError>> + Send + 'static>>;

/// Fetches one page of the remote collection.
///
/// Implementations must return items in a stable order for a given
/// `(filter, offset)` pair; the window's ordering depends on it.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use bookshelf_feed::{FeedFilter, FetchError, PageFetcher, PageFuture};
///
/// #[derive(Clone)]
/// struct Line(u32);
///
/// let fetcher = |_: &FeedFilter, offset: usize, limit: usize| -> PageFuture<Line> {
///     Box::pin(async move {
///         let page: Vec<Line> = (offset..offset + limit).map(|n| Line(n as u32)).collect();
///         Ok::<_, FetchError>(page)
///     })
/// };
/// let _page = fetcher.fetch_page(&FeedFilter::new(), 0, 18);
/// ```
pub trait PageFetcher<I>: Send + Sync {
    /// Starts fetching `limit` items beginning at `offset`.
    fn fetch_page(&self, filter: &FeedFilter, offset: usize, limit: usize) -> PageFuture<I>;
}

impl<I, F> PageFetcher<I> for F
where
    F: Fn(&FeedFilter, usize, usize) -> PageFuture<I> + Send + Sync,
{
    fn fetch_page(&self, filter: &FeedFilter, offset: usize, limit: usize) -> PageFuture<I> {
        self(filter, offset, limit)
    }
}

/// A fetch that failed and was kept for a manual retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// The direction of the failed load.
    pub direction: Direction,
    /// The offset that was requested.
    pub offset: usize,
    /// Human readable error text.
    pub message: String,
}

/// Message produced when a page fetch settles.
///
/// The `generation` is the window generation captured when the fetch started;
/// a feed drops the message if it has been reset since.
#[derive(Debug)]
pub struct PageLoadedMsg<I> {
    /// The feed instance that started the fetch.
    pub id: i64,
    /// Window generation at fetch start.
    pub generation: u64,
    /// Which loader started the fetch.
    pub direction: Direction,
    /// The requested offset.
    pub offset: usize,
    /// The fetched page or the failure.
    pub result: Result<Vec<I>, FetchError>,
}

/// Viewport geometry reported by the host after every scroll or resize.
///
/// Drives both the bottom sentinel and the "at top" gate of the gesture
/// sensor. An `id` of 0 addresses every feed.
#[derive(Debug, Clone, Copy)]
pub struct ViewportMsg {
    /// Target feed, or 0 for all.
    pub id: i64,
    /// The current viewport geometry.
    pub metrics: ViewportMetrics,
}

/// A raw input event for the top gesture sensor. An `id` of 0 addresses
/// every feed.
#[derive(Debug, Clone, Copy)]
pub struct GestureMsg {
    /// Target feed, or 0 for all.
    pub id: i64,
    /// The input event.
    pub event: GestureEvent,
}

/// Sent by hosts that detect the bottom sentinel themselves.
#[derive(Debug, Clone, Copy)]
pub struct ReachedBottomMsg {
    /// Target feed, or 0 for all.
    pub id: i64,
}

/// Asks the feed to drop its window and reload from the first page, e.g.
/// after the collection was mutated elsewhere in the application.
#[derive(Debug, Clone, Copy)]
pub struct RefreshMsg {
    /// Target feed, or 0 for all.
    pub id: i64,
}
