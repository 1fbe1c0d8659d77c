//! Styles for the feed's status lines.
//!
//! Items are rendered as plain lines; only the affordances around them
//! (header, loading indicators, end-of-list marker, errors) are styled.

use lipgloss_extras::prelude::*;

/// Styling for the feed view.
///
/// # Examples
///
/// ```rust
/// use bookshelf_feed::feed::FeedStyles;
/// use lipgloss_extras::prelude::*;
///
/// let mut styles = FeedStyles::default();
/// styles.title = Style::new().bold(true);
/// ```
#[derive(Debug, Clone)]
pub struct FeedStyles {
    /// Header line with the title and active filters.
    pub title: Style,
    /// Active filter summary next to the title.
    pub filter_summary: Style,
    /// "Loading" indicators at either end.
    pub loading: Style,
    /// Hint that earlier items can be pulled in.
    pub pull_hint: Style,
    /// End-of-list marker.
    pub end_of_feed: Style,
    /// Shown when the window is empty and nothing is loading.
    pub no_items: Style,
    /// Failed load notice.
    pub error: Style,
}

impl Default for FeedStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            filter_summary: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            loading: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            pull_hint: Style::new().foreground(subdued_color.clone()),
            end_of_feed: Style::new().foreground(subdued_color),
            no_items: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            }),
        }
    }
}
