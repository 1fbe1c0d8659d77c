//! View rendering for the feed.
//!
//! The whole window is rendered, one line per item, framed by status lines
//! that reflect the loading and `has_more` flags:
//! - top: "loading earlier" while a backward load runs, a failure notice,
//!   otherwise a pull hint with progress when earlier items exist
//! - bottom: "loading more", a failure notice, or the end-of-list marker

use super::model::Model;
use super::types::FeedItem;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Cuts `line` to at most `width` display columns, marking the cut with an
/// ellipsis. A width of zero leaves the line untouched.
fn truncate(line: &str, width: usize) -> String {
    if width == 0 || line.width() <= width {
        return line.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

impl<I: FeedItem> Model<I> {
    fn view_header(&self) -> String {
        let mut header = self.styles.title.clone().render(&self.title);
        let mut active = Vec::new();
        if !self.filter.search_term().is_empty() {
            active.push(format!("\"{}\"", self.filter.search_term()));
        }
        if self.filter.favorites_only() {
            active.push("favorites".to_string());
        }
        if self.filter.finished_only() {
            active.push("finished".to_string());
        }
        if self.filter.unfinished_only() {
            active.push("unfinished".to_string());
        }
        if !active.is_empty() {
            header.push(' ');
            header.push_str(
                &self
                    .styles
                    .filter_summary
                    .clone()
                    .render(&active.join(" · ")),
            );
        }
        header
    }

    fn view_top_status(&self) -> Option<String> {
        if self.window.loading_backward {
            return Some(self.styles.loading.clone().render("↑ Loading earlier…"));
        }
        if let Some(failure) = &self.backward_failure {
            return Some(self.styles.error.clone().render(&truncate(
                &format!("↑ Failed loading earlier: {}", failure.message),
                self.width,
            )));
        }
        if self.window.has_more_backward {
            let percent = (self.gesture.progress() * 100.0).round() as u32;
            let hint = if percent > 0 {
                format!("↑ Pull to load earlier ({}%)", percent)
            } else {
                "↑ Pull to load earlier".to_string()
            };
            return Some(self.styles.pull_hint.clone().render(&hint));
        }
        None
    }

    fn view_bottom_status(&self) -> Option<String> {
        if self.window.loading_forward {
            return Some(self.styles.loading.clone().render("Loading more…"));
        }
        if let Some(failure) = &self.forward_failure {
            return Some(self.styles.error.clone().render(&truncate(
                &format!("Failed loading more: {}", failure.message),
                self.width,
            )));
        }
        if !self.window.has_more_forward && !self.window.is_empty() {
            return Some(self.styles.end_of_feed.clone().render("End of library"));
        }
        None
    }

    /// Renders the header, every item in the window and the status lines.
    pub fn view(&self) -> String {
        let mut lines = vec![self.view_header()];
        if let Some(top) = self.view_top_status() {
            lines.push(top);
        }

        if self.window.is_empty() {
            if !self.window.loading_forward && !self.window.loading_backward {
                lines.push(self.styles.no_items.clone().render("No books."));
            }
        } else {
            lines.extend(
                self.window
                    .items()
                    .iter()
                    .map(|item| truncate(&item.to_string(), self.width)),
            );
        }

        if let Some(bottom) = self.view_bottom_status() {
            lines.push(bottom);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_line_untouched() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Dune", 0), "Dune");
    }

    #[test]
    fn test_truncate_long_line() {
        assert_eq!(truncate("The Left Hand of Darkness", 8), "The Lef…");
        assert_eq!(truncate("The Left Hand of Darkness", 8).width(), 8);
    }

    #[test]
    fn test_truncate_wide_characters() {
        let cut = truncate("三体三体三体", 5);
        assert!(cut.width() <= 5);
        assert!(cut.ends_with(ELLIPSIS));
    }
}
