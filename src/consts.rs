//! Shared numeric constants for the kanban crate.

// ── Sensor activation ───────────────────────────────────────────

/// Mouse travel in CSS pixels required before a press becomes a drag.
/// Keeps plain clicks from starting a gesture.
pub const MOUSE_ACTIVATION_DISTANCE_PX: f64 = 10.0;

/// Press-and-hold delay before a touch becomes a drag, in milliseconds.
pub const TOUCH_ACTIVATION_DELAY_MS: i64 = 250;

/// Maximum touch drift tolerated during the activation delay, in CSS pixels.
pub const TOUCH_ACTIVATION_TOLERANCE_PX: f64 = 500.0;

// ── Drag overlay ────────────────────────────────────────────────

/// Opacity the host applies to the floating preview while the drop
/// animation plays out.
pub const DROP_ANIMATION_OPACITY: f64 = 0.5;
