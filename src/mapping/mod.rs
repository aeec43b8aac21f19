//! Modul für die Belegung der Stick-Richtungen.
//!
//! Jede Richtung eines Sticks ist ein [`DirectionTarget`]. Das Standardziel
//! [`StickButton`] hält eine Liste von [`ActionSlot`]s sowie die Einstellungen
//! für die Mausemulation. Die eigentliche Ausgabe von Tasten- und Mausereignissen
//! passiert außerhalb dieser Bibliothek.

pub mod curve;
pub mod error;
pub mod keys;
pub mod slot;
pub mod stick_button;
pub mod target;

// Re-exports für einfacheren Zugriff
pub use curve::{MouseCurve, MouseMode};
pub use error::MappingError;
pub use slot::{ActionSlot, MouseDirection, RepeatInterval, SlotMode};
pub use stick_button::StickButton;
pub use target::DirectionTarget;
