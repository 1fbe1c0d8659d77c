//! Pull-at-top gesture detection.
//!
//! The sensor is a small state machine driven by abstract input events, so
//! any pointer, touch or wheel source can feed it and tests can replay
//! synthetic sequences:
//!
//! ```text
//!   Idle --DragStart (at top)--> Dragging --DragEnd (>= threshold)--> Resolved
//!    ^                              |                                     |
//!    +------ DragEnd (< threshold) -+                                     |
//!    +------------------------ next input event --------------------------+
//! ```
//!
//! Wheel input skips `Dragging`: scrolling up while at the top accumulates
//! into the same `pull_distance` and resolves as soon as the threshold is
//! crossed, and is ignored while a drag is in progress. Leaving the top at
//! any point clears the accumulator.

/// An input event relevant to the top gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The viewport reached (`true`) or left (`false`) its topmost position.
    TopChanged(bool),
    /// A pointer or touch drag began.
    DragStart,
    /// The drag moved; positive `delta` is downward.
    DragMove {
        /// Vertical movement since the previous event.
        delta: f32,
    },
    /// The drag was released.
    DragEnd,
    /// Wheel input; negative `delta` scrolls up.
    Wheel {
        /// Vertical wheel movement.
        delta: f32,
    },
}

/// Where the sensor is in a gesture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag that started at the top is in progress.
    Dragging,
    /// The last gesture crossed the threshold and fired.
    Resolved,
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    /// Nothing to do.
    None,
    /// The pull threshold was crossed; load earlier items.
    LoadBackward,
}

/// Tracks drag and reverse-scroll input at the top of the viewport.
#[derive(Debug, Clone)]
pub struct GestureSensor {
    threshold: f32,
    at_top: bool,
    phase: GesturePhase,
    pull_distance: f32,
}

impl GestureSensor {
    /// Creates a sensor that fires once `threshold` units are pulled.
    /// The viewport starts out at its top.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            at_top: true,
            phase: GesturePhase::Idle,
            pull_distance: 0.0,
        }
    }

    /// The accumulated pull distance of the current gesture.
    pub fn pull_distance(&self) -> f32 {
        self.pull_distance
    }

    /// The current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether the viewport was last reported at its top.
    pub fn at_top(&self) -> bool {
        self.at_top
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Pull progress in `0.0..=1.0`, for rendering a pull indicator.
    pub fn progress(&self) -> f32 {
        (self.pull_distance / self.threshold).clamp(0.0, 1.0)
    }

    /// Clears the accumulator and returns to `Idle`.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.pull_distance = 0.0;
    }

    /// Clears the accumulator without touching the phase.
    pub fn clear_pull(&mut self) {
        self.pull_distance = 0.0;
    }

    /// Feeds one event through the state machine.
    ///
    /// ```rust
    /// use bookshelf_feed::{GestureEvent, GestureSensor, GestureSignal};
    ///
    /// let mut sensor = GestureSensor::new(100.0);
    /// sensor.handle(GestureEvent::DragStart);
    /// sensor.handle(GestureEvent::DragMove { delta: 120.0 });
    /// assert_eq!(sensor.handle(GestureEvent::DragEnd), GestureSignal::LoadBackward);
    /// assert_eq!(sensor.pull_distance(), 0.0);
    /// ```
    pub fn handle(&mut self, event: GestureEvent) -> GestureSignal {
        match event {
            GestureEvent::TopChanged(at_top) => {
                self.at_top = at_top;
                if !at_top {
                    self.reset();
                }
                GestureSignal::None
            }
            GestureEvent::DragStart => {
                self.pull_distance = 0.0;
                self.phase = if self.at_top {
                    GesturePhase::Dragging
                } else {
                    GesturePhase::Idle
                };
                GestureSignal::None
            }
            GestureEvent::DragMove { delta } => {
                if self.phase == GesturePhase::Dragging && self.at_top {
                    self.pull_distance = (self.pull_distance + delta).max(0.0);
                }
                GestureSignal::None
            }
            GestureEvent::DragEnd => {
                if self.phase != GesturePhase::Dragging {
                    return GestureSignal::None;
                }
                if self.pull_distance >= self.threshold {
                    self.resolve()
                } else {
                    self.reset();
                    GestureSignal::None
                }
            }
            GestureEvent::Wheel { delta } => {
                if !self.at_top || delta >= 0.0 || self.phase == GesturePhase::Dragging {
                    return GestureSignal::None;
                }
                if self.phase == GesturePhase::Resolved {
                    self.phase = GesturePhase::Idle;
                }
                self.pull_distance += -delta;
                if self.pull_distance >= self.threshold {
                    self.resolve()
                } else {
                    GestureSignal::None
                }
            }
        }
    }

    fn resolve(&mut self) -> GestureSignal {
        self.phase = GesturePhase::Resolved;
        self.pull_distance = 0.0;
        GestureSignal::LoadBackward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(sensor: &mut GestureSensor, events: &[GestureEvent]) -> Vec<GestureSignal> {
        events.iter().map(|e| sensor.handle(*e)).collect()
    }

    fn fired(signals: &[GestureSignal]) -> usize {
        signals
            .iter()
            .filter(|s| **s == GestureSignal::LoadBackward)
            .count()
    }

    #[test]
    fn test_drag_past_threshold_fires_on_release() {
        let mut sensor = GestureSensor::new(100.0);
        let signals = replay(
            &mut sensor,
            &[
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 60.0 },
                GestureEvent::DragMove { delta: 60.0 },
            ],
        );
        assert_eq!(fired(&signals), 0);
        assert_eq!(sensor.phase(), GesturePhase::Dragging);
        assert_eq!(sensor.pull_distance(), 120.0);

        assert_eq!(sensor.handle(GestureEvent::DragEnd), GestureSignal::LoadBackward);
        assert_eq!(sensor.phase(), GesturePhase::Resolved);
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_drag_exactly_at_threshold_fires() {
        let mut sensor = GestureSensor::new(100.0);
        let signals = replay(
            &mut sensor,
            &[
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 100.0 },
                GestureEvent::DragEnd,
            ],
        );
        assert_eq!(fired(&signals), 1);
    }

    #[test]
    fn test_short_drag_resets_without_firing() {
        let mut sensor = GestureSensor::new(100.0);
        let signals = replay(
            &mut sensor,
            &[
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 99.0 },
                GestureEvent::DragEnd,
            ],
        );
        assert_eq!(fired(&signals), 0);
        assert_eq!(sensor.pull_distance(), 0.0);
        assert_eq!(sensor.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_upward_drag_reduces_distance_and_floors_at_zero() {
        let mut sensor = GestureSensor::new(100.0);
        replay(
            &mut sensor,
            &[
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 80.0 },
                GestureEvent::DragMove { delta: -30.0 },
            ],
        );
        assert_eq!(sensor.pull_distance(), 50.0);
        sensor.handle(GestureEvent::DragMove { delta: -200.0 });
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_drag_away_from_top_is_ignored() {
        let mut sensor = GestureSensor::new(100.0);
        let signals = replay(
            &mut sensor,
            &[
                GestureEvent::TopChanged(false),
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 500.0 },
                GestureEvent::DragEnd,
            ],
        );
        assert_eq!(fired(&signals), 0);
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_leaving_top_mid_drag_cancels() {
        let mut sensor = GestureSensor::new(100.0);
        let signals = replay(
            &mut sensor,
            &[
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: 150.0 },
                GestureEvent::TopChanged(false),
                GestureEvent::TopChanged(true),
                GestureEvent::DragEnd,
            ],
        );
        assert_eq!(fired(&signals), 0);
        assert_eq!(sensor.pull_distance(), 0.0);
        assert_eq!(sensor.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_wheel_fires_as_soon_as_threshold_crossed() {
        let mut sensor = GestureSensor::new(100.0);
        assert_eq!(
            sensor.handle(GestureEvent::Wheel { delta: -40.0 }),
            GestureSignal::None
        );
        assert_eq!(
            sensor.handle(GestureEvent::Wheel { delta: -40.0 }),
            GestureSignal::None
        );
        assert_eq!(sensor.pull_distance(), 80.0);
        assert_eq!(
            sensor.handle(GestureEvent::Wheel { delta: -40.0 }),
            GestureSignal::LoadBackward
        );
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_downward_wheel_does_not_accumulate() {
        let mut sensor = GestureSensor::new(100.0);
        sensor.handle(GestureEvent::Wheel { delta: 300.0 });
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_wheel_away_from_top_is_ignored() {
        let mut sensor = GestureSensor::new(100.0);
        sensor.handle(GestureEvent::TopChanged(false));
        assert_eq!(
            sensor.handle(GestureEvent::Wheel { delta: -500.0 }),
            GestureSignal::None
        );
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_leaving_top_clears_wheel_accumulator() {
        let mut sensor = GestureSensor::new(100.0);
        sensor.handle(GestureEvent::Wheel { delta: -70.0 });
        sensor.handle(GestureEvent::TopChanged(false));
        sensor.handle(GestureEvent::TopChanged(true));
        assert_eq!(
            sensor.handle(GestureEvent::Wheel { delta: -70.0 }),
            GestureSignal::None
        );
    }

    #[test]
    fn test_new_cycle_after_resolution() {
        let mut sensor = GestureSensor::new(100.0);
        sensor.handle(GestureEvent::Wheel { delta: -100.0 });
        assert_eq!(sensor.phase(), GesturePhase::Resolved);

        sensor.handle(GestureEvent::Wheel { delta: -10.0 });
        assert_eq!(sensor.phase(), GesturePhase::Idle);
        assert_eq!(sensor.pull_distance(), 10.0);

        sensor.handle(GestureEvent::DragStart);
        assert_eq!(sensor.phase(), GesturePhase::Dragging);
        assert_eq!(sensor.pull_distance(), 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut sensor = GestureSensor::new(100.0);
        sensor.handle(GestureEvent::DragStart);
        sensor.handle(GestureEvent::DragMove { delta: 50.0 });
        assert_eq!(sensor.progress(), 0.5);
        sensor.handle(GestureEvent::DragMove { delta: 500.0 });
        assert_eq!(sensor.progress(), 1.0);
    }
}
