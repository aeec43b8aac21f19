//! Fehlerdefinitionen für das Mapping-Modul

use thiserror::Error;

/// Fehlertypen beim Auflösen von Slot- und Richtungsangaben
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Der Tastenname ist in der Keysym-Tabelle nicht bekannt
    #[error("Unbekannter Tastenname: {0}")]
    UnknownKeyName(String),

    /// Der Slot-Modus existiert nicht
    #[error("Unbekannter Slot-Modus: {0}")]
    UnknownSlotMode(String),

    /// Der Richtungscode liegt außerhalb von 0..=8
    #[error("Unbekannter Richtungscode: {0}")]
    UnknownDirection(i32),

    /// Der Stick-Modus existiert nicht
    #[error("Unbekannter Stick-Modus: {0}")]
    UnknownStickMode(String),
}
