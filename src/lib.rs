//! Analog stick to direction button mapping.
//!
//! A [`ControlStick`] classifies the position of two axes into one of eight
//! sectors and drives per-direction targets with activate/deactivate edges.
//! Each target carries programmable [`ActionSlot`]s and mouse settings.

pub mod config;
pub mod controller;
pub mod mapping;
pub mod persistence;

pub use controller::{ControlStick, Direction, JoyAxis, StickDirection, StickEvent, StickMode};
pub use mapping::{ActionSlot, DirectionTarget, MappingError, SlotMode, StickButton};
pub use persistence::{Profile, ProfileError, StickConfig};
