//! Trait-Definition für die Richtungsziele eines Sticks
//!
//! Ein Stick besitzt genau acht Ziele, eins pro [`Direction`]. Der Stick treibt
//! sie ausschließlich über Flanken an (`activate` / `deactivate`); was ein Ziel
//! daraufhin ausgibt, bleibt dem Ziel überlassen.

use crate::controller::direction::Direction;
use crate::mapping::curve::{MouseCurve, MouseMode};
use crate::persistence::StickButtonConfig;

/// Schnittstelle, über die ein Stick seine Richtungsziele steuert
pub trait DirectionTarget: Send + 'static {
    /// Erstellt ein frisches Ziel für eine Richtung eines Sticks
    fn for_direction(stick_index: usize, direction: Direction) -> Self
    where
        Self: Sized;

    /// Richtung, an die das Ziel gebunden ist
    fn direction(&self) -> Direction;

    /// Ziel ist (weiterhin) aktiv. Wird auch für gehaltene Ziele erneut gesendet.
    fn activate(&mut self, ignore_sets: bool);

    /// Ziel ist nicht mehr aktiv
    fn deactivate(&mut self, ignore_sets: bool);

    /// Setzt Belegung und Einstellungen auf Werkseinstellungen zurück
    fn reset(&mut self);

    /// Gibt an, ob sich das Ziel von den Werkseinstellungen unterscheidet
    fn is_default(&self) -> bool;

    /// Kurzbeschreibung der Belegung
    fn summary_label(&self) -> String;

    fn mouse_mode(&self) -> MouseMode;
    fn set_mouse_mode(&mut self, mode: MouseMode);

    fn mouse_curve(&self) -> MouseCurve;
    fn set_mouse_curve(&mut self, curve: MouseCurve);

    fn spring_width(&self) -> i32;
    fn set_spring_width(&mut self, width: i32);

    fn spring_height(&self) -> i32;
    fn set_spring_height(&mut self, height: i32);

    fn sensitivity(&self) -> f64;
    fn set_sensitivity(&mut self, sensitivity: f64);

    /// Liefert die Profil-Darstellung des Ziels
    fn write_config(&self) -> StickButtonConfig;

    /// Übernimmt eine Profil-Darstellung, unbekannte oder ungültige Werte werden übersprungen
    fn read_config(&mut self, config: &StickButtonConfig);
}
