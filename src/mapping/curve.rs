//! Mausmodi und Beschleunigungskurven für Stick-Richtungen

use serde::{Deserialize, Serialize};

/// Art der Mausemulation einer Richtung
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseMode {
    /// Relative Cursorbewegung, kreisförmige Totzone
    #[default]
    Cursor,
    /// Absolute Position in einem Federbereich, rechteckige Ausleuchtung
    Spring,
}

/// Kurve, mit der eine normierte Auslenkung in Mausgeschwindigkeit übersetzt wird
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MouseCurve {
    #[default]
    Linear,
    Quadratic,
    Cubic,
    QuadraticExtreme,
    Power,
    EnhancedPrecision,
}

impl MouseCurve {
    /// Wendet die Kurve auf eine Auslenkung in 0.0..=1.0 an.
    ///
    /// `sensitivity` wird nur von [`MouseCurve::Power`] ausgewertet.
    pub fn apply(&self, distance: f64, sensitivity: f64) -> f64 {
        let distance = distance.clamp(0.0, 1.0);
        match self {
            MouseCurve::Linear => distance,
            MouseCurve::Quadratic => distance * distance,
            MouseCurve::Cubic => distance * distance * distance,
            MouseCurve::QuadraticExtreme => {
                let squared = distance * distance;
                // Oberhalb von 95% Auslenkung kräftig beschleunigen
                if distance > 0.95 {
                    squared * 1.5
                } else {
                    squared
                }
            }
            MouseCurve::Power => distance.powf(sensitivity.max(0.001)),
            MouseCurve::EnhancedPrecision => {
                if distance <= 0.4 {
                    distance * 0.38
                } else if distance <= 0.75 {
                    distance - 0.248
                } else {
                    distance * 2.008 - 1.008
                }
            }
        }
    }
}
