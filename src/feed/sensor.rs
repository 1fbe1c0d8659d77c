//! Bottom visibility sensor.
//!
//! A sentinel row sits right after the last rendered item. The sensor is
//! level-triggered: it reports the sentinel as visible on every observation
//! while it is in view, and leaves duplicate suppression to the forward
//! loader's guard.

/// Viewport geometry in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// Index of the first visible row.
    pub offset: usize,
    /// Number of visible rows.
    pub height: usize,
    /// Total rows of rendered content, excluding the sentinel.
    pub content_height: usize,
}

impl ViewportMetrics {
    /// Creates viewport metrics.
    pub fn new(offset: usize, height: usize, content_height: usize) -> Self {
        Self {
            offset,
            height,
            content_height,
        }
    }

    /// Whether the viewport is scrolled to its topmost position.
    pub fn at_top(&self) -> bool {
        self.offset == 0
    }
}

/// Watches the sentinel after the last item.
#[derive(Debug, Clone, Default)]
pub struct BottomSensor {
    margin: usize,
    visible: bool,
}

impl BottomSensor {
    /// Creates a sensor; `margin` rows below the viewport already count as
    /// visible.
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            visible: false,
        }
    }

    /// Records the latest viewport and returns whether the sentinel is in
    /// view.
    ///
    /// ```rust
    /// use bookshelf_feed::{BottomSensor, ViewportMetrics};
    ///
    /// let mut sensor = BottomSensor::new(0);
    /// assert!(!sensor.observe(ViewportMetrics::new(0, 10, 40)));
    /// assert!(sensor.observe(ViewportMetrics::new(30, 10, 40)));
    /// assert!(sensor.observe(ViewportMetrics::new(30, 10, 40)));
    /// ```
    pub fn observe(&mut self, metrics: ViewportMetrics) -> bool {
        let bottom = metrics
            .offset
            .saturating_add(metrics.height)
            .saturating_add(self.margin);
        self.visible = bottom >= metrics.content_height;
        self.visible
    }

    /// The result of the last observation.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_shows_sentinel() {
        let mut sensor = BottomSensor::new(0);
        assert!(sensor.observe(ViewportMetrics::new(0, 20, 0)));
    }

    #[test]
    fn test_sentinel_hidden_until_scrolled_to_end() {
        let mut sensor = BottomSensor::new(0);
        assert!(!sensor.observe(ViewportMetrics::new(0, 10, 54)));
        assert!(!sensor.observe(ViewportMetrics::new(43, 10, 54)));
        assert!(sensor.observe(ViewportMetrics::new(44, 10, 54)));
        assert!(sensor.is_visible());
    }

    #[test]
    fn test_margin_triggers_early() {
        let mut sensor = BottomSensor::new(5);
        assert!(sensor.observe(ViewportMetrics::new(39, 10, 54)));
        assert!(!sensor.observe(ViewportMetrics::new(38, 10, 54)));
        assert!(!sensor.is_visible());
    }

    #[test]
    fn test_at_top() {
        assert!(ViewportMetrics::new(0, 10, 54).at_top());
        assert!(!ViewportMetrics::new(1, 10, 54).at_top());
    }
}
