//! Bidirectional sliding-window feed.
//!
//! The feed streams an unbounded, filterable collection through a small
//! in-memory window:
//!
//! - **Forward loads** append the next page when the bottom sentinel becomes
//!   visible and evict the oldest chunk once the window overflows.
//! - **Backward loads** prepend the previous page after a pull gesture at the
//!   top and evict the newest chunk on overflow.
//! - **Dedup**: every merge drops items whose id is already resident, checked
//!   against the live window at the time the page arrives.
//! - **Resets**: any filter change or explicit refresh empties the window and
//!   bumps its generation; pages fetched before the reset are discarded.
//!
//! ## Message flow
//!
//! The host forwards runtime messages into [`Model::update`]:
//!
//! | Message | Effect |
//! |---------|--------|
//! | [`ViewportMsg`] | updates the "at top" gate; loads forward while the sentinel is visible |
//! | [`GestureMsg`] | drives the pull gesture; loads backward once it fires |
//! | [`ReachedBottomMsg`] | loads forward |
//! | [`RefreshMsg`] | resets and reloads |
//! | [`PageLoadedMsg`] | merges a settled fetch |
//! | `KeyMsg` | feed key bindings, while focused |
//!
//! ```
//! use bookshelf_feed::feed::{Model, ReachedBottomMsg};
//! use bookshelf_feed::{Book, FeedFilter, FetchError, PageFuture};
//! use bubbletea_rs::Msg;
//!
//! let mut feed: Model<Book> = Model::new(|_: &FeedFilter, _offset: usize, _limit: usize| -> PageFuture<Book> {
//!     Box::pin(async { Ok::<_, FetchError>(Vec::new()) })
//! });
//!
//! // The first load is issued by init; a second bottom signal is absorbed
//! // by the forward guard while it is in flight.
//! assert!(feed.init().is_some());
//! let id = feed.id();
//! assert!(feed.update(Box::new(ReachedBottomMsg { id }) as Msg).is_none());
//! ```

pub mod config;
pub mod gesture;
pub mod keys;
pub mod sensor;
pub mod style;
pub mod window;

mod loader;
mod model;
mod rendering;
mod types;


pub use config::{ConfigError, FailurePolicy, FeedConfig};
pub use gesture::{GestureEvent, GesturePhase, GestureSensor, GestureSignal};
pub use keys::FeedKeyMap;
pub use model::Model;
pub use sensor::{BottomSensor, ViewportMetrics};
pub use style::FeedStyles;
pub use types::{
    Direction, FeedItem, FetchError, GestureMsg, LoadFailure, PageFetcher, PageFuture,
    PageLoadedMsg, ReachedBottomMsg, RefreshMsg, ViewportMsg,
};
pub use window::{MergeOutcome, Window};

use crate::key::KeyMap;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};

impl<I: FeedItem> Model<I> {
    fn addressed(&self, id: i64) -> bool {
        id == 0 || id == self.id
    }

    /// Handles a runtime message and returns the command it starts, if any.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<PageLoadedMsg<I>>() {
            Ok(loaded) => {
                self.apply_page(*loaded);
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(viewport) = msg.downcast_ref::<ViewportMsg>() {
            if !self.addressed(viewport.id) {
                return None;
            }
            return self.observe_viewport(viewport.metrics);
        }

        if let Some(gesture) = msg.downcast_ref::<GestureMsg>() {
            if !self.addressed(gesture.id) {
                return None;
            }
            return self.handle_gesture(gesture.event);
        }

        if let Some(bottom) = msg.downcast_ref::<ReachedBottomMsg>() {
            if !self.addressed(bottom.id) {
                return None;
            }
            return self.load_forward();
        }

        if let Some(refresh) = msg.downcast_ref::<RefreshMsg>() {
            if !self.addressed(refresh.id) {
                return None;
            }
            return self.refresh();
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focus {
                return None;
            }
            return self.handle_key(key_msg);
        }

        None
    }

    /// Applies a viewport report: updates the top gate of the gesture sensor
    /// and loads forward while the bottom sentinel is visible.
    pub fn observe_viewport(&mut self, metrics: ViewportMetrics) -> Option<Cmd> {
        let at_top = metrics.at_top();
        if at_top != self.gesture.at_top() {
            self.gesture.handle(GestureEvent::TopChanged(at_top));
        }
        if self.bottom.observe(metrics) && self.window.has_more_forward {
            return self.load_forward();
        }
        None
    }

    /// Feeds one input event to the gesture sensor and loads backward when
    /// the pull resolves.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<Cmd> {
        match self.gesture.handle(event) {
            GestureSignal::LoadBackward => self.load_backward(),
            GestureSignal::None => None,
        }
    }

    fn handle_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.refresh.matches(msg) {
            return self.refresh();
        }
        if self.keymap.retry.matches(msg) {
            return self.retry();
        }
        if self.keymap.load_earlier.matches(msg) {
            return self.load_backward();
        }
        if self.keymap.toggle_favorites.matches(msg) {
            return self.toggle_favorites();
        }
        if self.keymap.toggle_finished.matches(msg) {
            return self.toggle_finished();
        }
        if self.keymap.toggle_unfinished.matches(msg) {
            return self.toggle_unfinished();
        }
        None
    }
}

impl<I: FeedItem> KeyMap for Model<I> {
    fn short_help(&self) -> Vec<&crate::key::Binding> {
        let mut bindings = self.keymap.short_help();
        if self.error().is_some() {
            bindings.insert(0, &self.keymap.retry);
        }
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&crate::key::Binding>> {
        self.keymap.full_help()
    }
}

impl<I: FeedItem> Component for Model<I> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
