//! Controller subsystem for analog stick input
//!
//! Turns raw axis samples into direction target edges:
//!
//! 1. [`axis`] - Shared raw axis values written by the polling side
//! 2. [`zones`] - Bearing and diagonal sector table
//! 3. [`activation`] - Which targets are held, per-slot edges
//! 4. [`stick`] - The engine tying it together
//! 5. [`distance`] - Magnitudes for mouse emulation
//!
//! # Architecture
//!
//! ```text
//! JoyAxis x ─┐
//!            ├─► ControlStick ──► DirectionTarget x8
//! JoyAxis y ─┘        │
//!                     └──► StickEvent (broadcast)
//! ```
//!
//! Processing is synchronous. The caller writes both axes and then calls
//! [`stick::ControlStick::process_sample`] on the thread that owns the stick.

pub mod activation;
pub mod axis;
pub mod direction;
pub mod distance;
pub mod stick;
pub mod zones;

pub use activation::{ActivationState, SlotKind};
pub use axis::{JoyAxis, StickId, AXIS_MAX, AXIS_MAX_ZONE, AXIS_MIN};
pub use direction::{Direction, DirectionMap, StickDirection};
pub use stick::{ControlStick, StickEvent, StickMode};
