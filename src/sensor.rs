//! Pointer activation constraints for the drag gesture provider.
//!
//! The host owns real pointer capture and the clock; it feeds positions and
//! timestamps in and starts a drag gesture only once a sensor reports
//! [`SensorState::Active`]. A mouse press must travel a minimum distance
//! before it becomes a drag, so plain clicks still reach click handlers. A
//! touch press must be held for a delay, and is abandoned if the finger
//! drifts too far while waiting.

#[cfg(test)]
#[path = "sensor_test.rs"]
mod sensor_test;

use crate::consts::{
    MOUSE_ACTIVATION_DISTANCE_PX, TOUCH_ACTIVATION_DELAY_MS, TOUCH_ACTIVATION_TOLERANCE_PX,
};
use crate::geometry::Point;

/// Where a sensor is in its activation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorState {
    /// No press being tracked.
    #[default]
    Idle,
    /// Pressed, constraint not yet satisfied.
    Pending,
    /// Constraint satisfied; a drag gesture is in flight.
    Active,
}

/// Mouse activation: a press becomes a drag after a minimum travel distance.
#[derive(Debug, Clone)]
pub struct MouseSensor {
    activation_distance: f64,
    origin: Option<Point>,
    state: SensorState,
}

impl Default for MouseSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseSensor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_activation_distance(MOUSE_ACTIVATION_DISTANCE_PX)
    }

    #[must_use]
    pub fn with_activation_distance(activation_distance: f64) -> Self {
        Self { activation_distance, origin: None, state: SensorState::Idle }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Begin tracking a press at `at`.
    pub fn press(&mut self, at: Point) {
        self.origin = Some(at);
        self.state = SensorState::Pending;
    }

    /// Feed a pointer move. Returns the state after the move: `Active` once
    /// cumulative travel from the press point reaches the activation
    /// distance.
    pub fn advance(&mut self, to: Point) -> SensorState {
        if self.state == SensorState::Pending {
            if let Some(origin) = self.origin {
                if origin.distance_to(to) >= self.activation_distance {
                    self.state = SensorState::Active;
                }
            }
        }
        self.state
    }

    /// End the press. Returns `true` if a drag was in flight (the host
    /// should dispatch drag-end); `false` means the press stayed a click.
    pub fn release(&mut self) -> bool {
        let was_active = self.state == SensorState::Active;
        self.origin = None;
        self.state = SensorState::Idle;
        was_active
    }
}

/// Touch activation: a press becomes a drag after a hold delay, provided
/// the finger stays within the drift tolerance while waiting.
#[derive(Debug, Clone)]
pub struct TouchSensor {
    delay_ms: i64,
    tolerance: f64,
    origin: Option<Point>,
    pressed_at_ms: i64,
    state: SensorState,
}

impl Default for TouchSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSensor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_constraint(TOUCH_ACTIVATION_DELAY_MS, TOUCH_ACTIVATION_TOLERANCE_PX)
    }

    #[must_use]
    pub fn with_constraint(delay_ms: i64, tolerance: f64) -> Self {
        Self { delay_ms, tolerance, origin: None, pressed_at_ms: 0, state: SensorState::Idle }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Begin tracking a press at `at`, observed at `now_ms`.
    pub fn press(&mut self, at: Point, now_ms: i64) {
        self.origin = Some(at);
        self.pressed_at_ms = now_ms;
        self.state = SensorState::Pending;
    }

    /// Feed a pointer move observed at `now_ms`. Drift beyond the tolerance
    /// before the delay elapses abandons the press.
    pub fn advance(&mut self, to: Point, now_ms: i64) -> SensorState {
        if self.state == SensorState::Pending {
            if let Some(origin) = self.origin {
                if origin.distance_to(to) > self.tolerance {
                    self.origin = None;
                    self.state = SensorState::Idle;
                    return self.state;
                }
            }
            self.check_delay(now_ms);
        }
        self.state
    }

    /// Timer tick: activates a still-pending press once the delay elapses
    /// without any movement at all.
    pub fn poll(&mut self, now_ms: i64) -> SensorState {
        if self.state == SensorState::Pending {
            self.check_delay(now_ms);
        }
        self.state
    }

    /// End the press. Returns `true` if a drag was in flight.
    pub fn release(&mut self) -> bool {
        let was_active = self.state == SensorState::Active;
        self.origin = None;
        self.state = SensorState::Idle;
        was_active
    }

    fn check_delay(&mut self, now_ms: i64) {
        if now_ms - self.pressed_at_ms >= self.delay_ms {
            self.state = SensorState::Active;
        }
    }
}
