//! Forward and backward loaders.
//!
//! Starting a load flips the direction's guard and returns a [`Cmd`] wrapping
//! the fetch. When the fetch settles the runtime delivers a
//! [`PageLoadedMsg`], and [`Model::apply_page`] merges it into the live window
//! unless the window has been reset in the meantime.

use super::config::FailurePolicy;
use super::model::Model;
use super::types::{Direction, FeedItem, LoadFailure, PageLoadedMsg};
use bubbletea_rs::{Cmd, Msg};

impl<I: FeedItem> Model<I> {
    /// Requests the next page below the window.
    ///
    /// Returns `None` without fetching while a forward load is in flight,
    /// once the forward direction is exhausted, or while a forward failure
    /// is pending. Only [`retry`](Model::retry) or a reset clears a pending
    /// failure.
    pub fn load_forward(&mut self) -> Option<Cmd> {
        if self.window.loading_forward || !self.window.has_more_forward {
            return None;
        }
        if self.forward_failure.is_some() {
            tracing::debug!(feed = self.id, "forward load held until retry");
            return None;
        }
        self.window.loading_forward = true;
        Some(self.fetch_cmd(Direction::Forward, self.window.forward_cursor))
    }

    /// Requests the page above the window.
    ///
    /// Returns `None` without fetching while a backward load is in flight,
    /// once the backward direction is exhausted, or within the debounce
    /// interval of the previous backward load. If the window already starts
    /// at offset 0 the backward direction is marked exhausted instead.
    pub fn load_backward(&mut self) -> Option<Cmd> {
        if self.window.loading_backward || !self.window.has_more_backward {
            return None;
        }
        let now = self.clock.now();
        if let Some(last) = self.window.last_backward_load {
            if now.saturating_duration_since(last) < self.config.backward_debounce {
                tracing::debug!(feed = self.id, "backward load debounced");
                return None;
            }
        }

        let target = self
            .window
            .backward_cursor
            .saturating_sub(self.config.chunk_size);
        if target >= self.window.backward_cursor {
            self.window.has_more_backward = false;
            return None;
        }

        self.window.loading_backward = true;
        self.window.last_backward_load = Some(now);
        self.gesture.clear_pull();
        self.backward_failure = None;
        Some(self.fetch_cmd(Direction::Backward, target))
    }

    /// Retries a failed load, forward first.
    ///
    /// A backward retry goes through [`load_backward`](Model::load_backward)
    /// and still honors the debounce interval.
    pub fn retry(&mut self) -> Option<Cmd> {
        if let Some(failure) = self.forward_failure.take() {
            let cmd = self.load_forward();
            if cmd.is_some() {
                return cmd;
            }
            self.forward_failure = Some(failure);
        }
        if self.backward_failure.is_some() {
            return self.load_backward();
        }
        None
    }

    /// Builds the fetch command. The fetcher is called right away; the
    /// returned future is awaited by the runtime.
    fn fetch_cmd(&self, direction: Direction, offset: usize) -> Cmd {
        let id = self.id;
        let generation = self.window.generation();
        let limit = self.config.chunk_size;
        tracing::debug!(
            feed = id,
            generation,
            direction = ?direction,
            offset,
            limit,
            "starting page load"
        );
        let page = self.fetcher.fetch_page(&self.filter, offset, limit);

        Box::pin(async move {
            let result = page.await;
            Some(Box::new(PageLoadedMsg {
                id,
                generation,
                direction,
                offset,
                result,
            }) as Msg)
        })
    }

    /// Merges a settled fetch into the window.
    ///
    /// Messages from another feed or from a generation before the last
    /// reset are dropped without touching any state.
    pub fn apply_page(&mut self, msg: PageLoadedMsg<I>) {
        if msg.id != self.id {
            return;
        }
        if msg.generation != self.window.generation() {
            tracing::debug!(
                feed = self.id,
                stale_generation = msg.generation,
                generation = self.window.generation(),
                direction = ?msg.direction,
                "discarding page from before reset"
            );
            return;
        }

        match msg.direction {
            Direction::Forward => self.window.loading_forward = false,
            Direction::Backward => self.window.loading_backward = false,
        }

        let page = match msg.result {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(
                    feed = self.id,
                    direction = ?msg.direction,
                    offset = msg.offset,
                    error = %err,
                    "page load failed"
                );
                match self.config.failure_policy {
                    FailurePolicy::EndOfFeed => match msg.direction {
                        Direction::Forward => self.window.has_more_forward = false,
                        Direction::Backward => self.window.has_more_backward = false,
                    },
                    FailurePolicy::Retryable => {
                        let failure = Some(LoadFailure {
                            direction: msg.direction,
                            offset: msg.offset,
                            message: err.to_string(),
                        });
                        match msg.direction {
                            Direction::Forward => self.forward_failure = failure,
                            Direction::Backward => self.backward_failure = failure,
                        }
                    }
                }
                return;
            }
        };

        let chunk_size = self.config.chunk_size;
        let max_window_size = self.config.max_window_size;
        let outcome = match msg.direction {
            Direction::Forward => self.window.append_page(page, chunk_size, max_window_size),
            Direction::Backward => {
                self.window
                    .prepend_page(page, msg.offset, chunk_size, max_window_size)
            }
        };
        tracing::debug!(
            feed = self.id,
            direction = ?msg.direction,
            offset = msg.offset,
            added = outcome.added,
            duplicates = outcome.duplicates,
            evicted = outcome.evicted,
            len = self.window.len(),
            "page merged"
        );
    }
}
