//! Aktions-Slots für Stick-Richtungen
//!
//! Ein Slot ist die kleinste programmierbare Einheit hinter einer Richtung:
//! ein Code plus ein Modus, der festlegt, wie der Code zu lesen ist.

use crate::mapping::keys::keycode_to_name;
use crate::mapping::MappingError;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Bedeutung des Slot-Codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SlotMode {
    /// Tastencode (Keysym)
    #[default]
    Keyboard,
    /// Maustaste (1 = links, 2 = Mitte, 3 = rechts)
    MouseButton,
    /// Mausrichtung, siehe [`MouseDirection`]
    MouseMovement,
    /// Pause in Millisekunden
    Pause,
    /// Halten in Millisekunden
    Hold,
    /// Zyklus-Trenner, Code wird nicht ausgewertet
    Cycle,
    /// Distanz in Prozent
    Distance,
    /// Verzögertes Loslassen in Millisekunden
    Release,
}

impl SlotMode {
    pub const ALL: [SlotMode; 8] = [
        SlotMode::Keyboard,
        SlotMode::MouseButton,
        SlotMode::MouseMovement,
        SlotMode::Pause,
        SlotMode::Hold,
        SlotMode::Cycle,
        SlotMode::Distance,
        SlotMode::Release,
    ];

    /// Name im Profil
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotMode::Keyboard => "keyboard",
            SlotMode::MouseButton => "mousebutton",
            SlotMode::MouseMovement => "mousemovement",
            SlotMode::Pause => "pause",
            SlotMode::Hold => "hold",
            SlotMode::Cycle => "cycle",
            SlotMode::Distance => "distance",
            SlotMode::Release => "release",
        }
    }
}

impl fmt::Display for SlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotMode {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| MappingError::UnknownSlotMode(s.to_string()))
    }
}

/// Richtungscodes für [`SlotMode::MouseMovement`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseDirection {
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
}

impl MouseDirection {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(MouseDirection::Up),
            2 => Some(MouseDirection::Down),
            3 => Some(MouseDirection::Left),
            4 => Some(MouseDirection::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MouseDirection::Up => "Up",
            MouseDirection::Down => "Down",
            MouseDirection::Left => "Left",
            MouseDirection::Right => "Right",
        }
    }
}

impl From<MouseDirection> for i32 {
    fn from(direction: MouseDirection) -> Self {
        direction as i32
    }
}

/// Passive Stoppuhr für wiederholte Ausgaben.
///
/// Wird nur von außen neu gestartet und abgefragt, löst selbst nichts aus.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepeatInterval {
    started: Option<Instant>,
}

impl RepeatInterval {
    pub fn restart(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Vergangene Zeit seit dem letzten Neustart, `Duration::ZERO` wenn nie gestartet
    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }
}

/// Ein programmierbarer Aktions-Slot
#[derive(Clone, Debug, Default)]
pub struct ActionSlot {
    code: i32,
    mode: SlotMode,
    distance: f64,
    interval: RepeatInterval,
}

impl PartialEq for ActionSlot {
    fn eq(&self, other: &Self) -> bool {
        // Die Stoppuhr ist Laufzeitzustand und zählt nicht zur Belegung
        self.code == other.code && self.mode == other.mode && self.distance == other.distance
    }
}

impl ActionSlot {
    /// Erstellt einen Slot, negative Codes werden zu 0
    pub fn new(code: i32, mode: SlotMode) -> Self {
        Self {
            code: code.max(0),
            mode,
            distance: 0.0,
            interval: RepeatInterval::default(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn set_code(&mut self, code: i32) {
        self.code = code;
    }

    pub fn mode(&self) -> SlotMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SlotMode) {
        self.mode = mode;
    }

    /// Distanz in Prozent (nur für [`SlotMode::Distance`])
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.clamp(0.0, 100.0);
    }

    pub fn interval(&self) -> &RepeatInterval {
        &self.interval
    }

    pub fn restart_interval(&mut self) {
        self.interval.restart();
    }

    pub fn interval_elapsed(&self) -> Duration {
        self.interval.elapsed()
    }

    /// Beschriftung für Anzeige und Zusammenfassungen
    pub fn label(&self) -> String {
        if self.code <= 0 {
            return "[NO KEY]".to_string();
        }

        match self.mode {
            SlotMode::Keyboard => keycode_to_name(self.code)
                .unwrap_or_else(|| format!("0x{:x}", self.code))
                .to_uppercase(),
            SlotMode::MouseButton => match self.code {
                1 => "Mouse LB".to_string(),
                2 => "Mouse MB".to_string(),
                3 => "Mouse RB".to_string(),
                other => format!("Mouse {}", other),
            },
            SlotMode::MouseMovement => match MouseDirection::from_code(self.code) {
                Some(direction) => format!("Mouse {}", direction.name()),
                None => "Mouse".to_string(),
            },
            SlotMode::Pause => format!("Pause {}", seconds_label(self.code)),
            SlotMode::Hold => format!("Hold {}", seconds_label(self.code)),
            SlotMode::Release => format!("Release {}", seconds_label(self.code)),
            SlotMode::Cycle => "Cycle".to_string(),
            SlotMode::Distance => format!("Distance {}%", self.code),
        }
    }
}

impl fmt::Display for ActionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Millisekunden als Sekunden mit drei signifikanten Stellen
fn seconds_label(millis: i32) -> String {
    format_significant(millis as f64 / 1000.0, 3)
}

/// Formatiert wie `%g`: feste Notation für moderate Exponenten, sonst wissenschaftlich,
/// jeweils ohne überflüssige Nullen
fn format_significant(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(&mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value))
    }
}

fn trim_zeros(number: &str) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number.to_string()
    }
}
