//! Standard-Richtungsziel mit Aktions-Slots

use crate::controller::direction::Direction;
use crate::mapping::curve::{MouseCurve, MouseMode};
use crate::mapping::slot::{ActionSlot, SlotMode};
use crate::mapping::target::DirectionTarget;
use crate::persistence::{SlotConfig, StickButtonConfig};
use tracing::{debug, trace, warn};

pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Richtungsziel eines Sticks.
///
/// Hält die Slot-Belegung und die Mauseinstellungen und merkt sich, wie oft
/// es gedrückt, gehalten und losgelassen wurde.
#[derive(Clone, Debug)]
pub struct StickButton {
    stick_index: usize,
    direction: Direction,
    slots: Vec<ActionSlot>,
    mouse_mode: MouseMode,
    mouse_curve: MouseCurve,
    spring_width: i32,
    spring_height: i32,
    sensitivity: f64,

    pressed: bool,
    press_count: u32,
    hold_count: u32,
    release_count: u32,
    last_ignore_sets: bool,
}

impl StickButton {
    pub fn new(stick_index: usize, direction: Direction) -> Self {
        Self {
            stick_index,
            direction,
            slots: Vec::new(),
            mouse_mode: MouseMode::default(),
            mouse_curve: MouseCurve::default(),
            spring_width: 0,
            spring_height: 0,
            sensitivity: DEFAULT_SENSITIVITY,
            pressed: false,
            press_count: 0,
            hold_count: 0,
            release_count: 0,
            last_ignore_sets: false,
        }
    }

    /// Name für Anzeigen, z.B. "Stick 1: Up"
    pub fn partial_name(&self) -> String {
        format!("Stick {}: {}", self.stick_index + 1, self.direction)
    }

    pub fn slots(&self) -> &[ActionSlot] {
        &self.slots
    }

    pub fn add_slot(&mut self, slot: ActionSlot) {
        debug!("{} bound to {}", self.partial_name(), slot.label());
        self.slots.push(slot);
    }

    /// Ersetzt die komplette Belegung
    pub fn set_slots(&mut self, slots: Vec<ActionSlot>) {
        debug!("{} rebound to {} slot(s)", self.partial_name(), slots.len());
        self.slots = slots;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Anzahl der Übergänge losgelassen -> gedrückt
    pub fn press_count(&self) -> u32 {
        self.press_count
    }

    /// Anzahl der erneuten Aktivierungen eines bereits gedrückten Ziels
    pub fn hold_count(&self) -> u32 {
        self.hold_count
    }

    /// Anzahl der Übergänge gedrückt -> losgelassen
    pub fn release_count(&self) -> u32 {
        self.release_count
    }

    pub fn last_ignore_sets(&self) -> bool {
        self.last_ignore_sets
    }
}

impl DirectionTarget for StickButton {
    fn for_direction(stick_index: usize, direction: Direction) -> Self {
        StickButton::new(stick_index, direction)
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn activate(&mut self, ignore_sets: bool) {
        self.last_ignore_sets = ignore_sets;
        if self.pressed {
            self.hold_count += 1;
            trace!("{} held", self.partial_name());
        } else {
            self.pressed = true;
            self.press_count += 1;
            debug!("{} pressed", self.partial_name());
            for slot in &mut self.slots {
                slot.restart_interval();
            }
        }
    }

    fn deactivate(&mut self, ignore_sets: bool) {
        self.last_ignore_sets = ignore_sets;
        if self.pressed {
            self.pressed = false;
            self.release_count += 1;
            debug!("{} released", self.partial_name());
        }
    }

    fn reset(&mut self) {
        let stick_index = self.stick_index;
        let direction = self.direction;
        *self = StickButton::new(stick_index, direction);
    }

    fn is_default(&self) -> bool {
        self.slots.is_empty()
            && self.mouse_mode == MouseMode::default()
            && self.mouse_curve == MouseCurve::default()
            && self.spring_width == 0
            && self.spring_height == 0
            && self.sensitivity == DEFAULT_SENSITIVITY
    }

    fn summary_label(&self) -> String {
        if self.slots.is_empty() {
            return "[NO KEY]".to_string();
        }
        self.slots
            .iter()
            .map(ActionSlot::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn mouse_mode(&self) -> MouseMode {
        self.mouse_mode
    }

    fn set_mouse_mode(&mut self, mode: MouseMode) {
        self.mouse_mode = mode;
    }

    fn mouse_curve(&self) -> MouseCurve {
        self.mouse_curve
    }

    fn set_mouse_curve(&mut self, curve: MouseCurve) {
        self.mouse_curve = curve;
    }

    fn spring_width(&self) -> i32 {
        self.spring_width
    }

    fn set_spring_width(&mut self, width: i32) {
        self.spring_width = width.max(0);
    }

    fn spring_height(&self) -> i32 {
        self.spring_height
    }

    fn set_spring_height(&mut self, height: i32) {
        self.spring_height = height.max(0);
    }

    fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    fn set_sensitivity(&mut self, sensitivity: f64) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.sensitivity = sensitivity;
        }
    }

    fn write_config(&self) -> StickButtonConfig {
        StickButtonConfig {
            index: Some(self.direction.code()),
            mouse_mode: (self.mouse_mode != MouseMode::default()).then_some(self.mouse_mode),
            mouse_curve: (self.mouse_curve != MouseCurve::default()).then_some(self.mouse_curve),
            spring_width: (self.spring_width != 0).then_some(self.spring_width),
            spring_height: (self.spring_height != 0).then_some(self.spring_height),
            sensitivity: (self.sensitivity != DEFAULT_SENSITIVITY).then_some(self.sensitivity),
            slots: self.slots.iter().map(SlotConfig::from).collect(),
        }
    }

    fn read_config(&mut self, config: &StickButtonConfig) {
        if let Some(mode) = config.mouse_mode {
            self.set_mouse_mode(mode);
        }
        if let Some(curve) = config.mouse_curve {
            self.set_mouse_curve(curve);
        }
        if let Some(width) = config.spring_width {
            self.set_spring_width(width);
        }
        if let Some(height) = config.spring_height {
            self.set_spring_height(height);
        }
        if let Some(sensitivity) = config.sensitivity {
            self.set_sensitivity(sensitivity);
        }

        if config.slots.is_empty() {
            return;
        }

        let mut slots = Vec::with_capacity(config.slots.len());
        for slot_config in &config.slots {
            let mut slot = ActionSlot::new(0, SlotMode::Keyboard);
            if let Some(code) = slot_config.code {
                slot.set_code(code);
            }
            if let Some(mode) = &slot_config.mode {
                match mode.parse::<SlotMode>() {
                    Ok(mode) => slot.set_mode(mode),
                    Err(e) => warn!("{}: {}, slot mode skipped", self.partial_name(), e),
                }
            }
            slots.push(slot);
        }
        self.set_slots(slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release_counts() {
        let mut button = StickButton::new(0, Direction::Up);
        button.activate(false);
        button.activate(false);
        button.activate(true);
        assert!(button.is_pressed());
        assert_eq!(button.press_count(), 1);
        assert_eq!(button.hold_count(), 2);
        assert!(button.last_ignore_sets());

        button.deactivate(false);
        button.deactivate(false);
        assert!(!button.is_pressed());
        assert_eq!(button.release_count(), 1);
    }

    #[test]
    fn test_summary_label() {
        let mut button = StickButton::new(0, Direction::Left);
        assert_eq!(button.summary_label(), "[NO KEY]");
        button.add_slot(ActionSlot::new('a' as i32, SlotMode::Keyboard));
        button.add_slot(ActionSlot::new(500, SlotMode::Pause));
        assert_eq!(button.summary_label(), "A, Pause 0.5");
        assert_eq!(button.partial_name(), "Stick 1: Left");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut button = StickButton::new(1, Direction::Down);
        button.add_slot(ActionSlot::new(1, SlotMode::MouseButton));
        button.set_mouse_mode(MouseMode::Spring);
        button.set_sensitivity(2.5);
        button.activate(false);
        assert!(!button.is_default());

        button.reset();
        assert!(button.is_default());
        assert!(!button.is_pressed());
        assert_eq!(button.direction(), Direction::Down);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut button = StickButton::new(0, Direction::RightUp);
        button.add_slot(ActionSlot::new(3, SlotMode::MouseMovement));
        button.add_slot(ActionSlot::new(40, SlotMode::Distance));
        button.set_mouse_curve(MouseCurve::Cubic);
        button.set_spring_width(800);

        let config = button.write_config();
        assert_eq!(config.index, Some(2));

        let mut restored = StickButton::new(0, Direction::RightUp);
        restored.read_config(&config);
        assert_eq!(restored.slots(), button.slots());
        assert_eq!(restored.mouse_curve(), MouseCurve::Cubic);
        assert_eq!(restored.spring_width(), 800);
        assert_eq!(restored.mouse_mode(), MouseMode::Cursor);
    }

    #[test]
    fn test_unknown_slot_mode_keeps_keyboard() {
        let config = StickButtonConfig {
            index: Some(1),
            slots: vec![SlotConfig {
                code: Some(0x61),
                mode: Some("teleport".to_string()),
            }],
            ..Default::default()
        };
        let mut button = StickButton::new(0, Direction::Up);
        button.read_config(&config);
        assert_eq!(button.slots().len(), 1);
        assert_eq!(button.slots()[0].mode(), SlotMode::Keyboard);
        assert_eq!(button.slots()[0].label(), "A");
    }

    #[test]
    fn test_read_config_replaces_slots() {
        let mut button = StickButton::new(0, Direction::Up);
        button.add_slot(ActionSlot::new('w' as i32, SlotMode::Keyboard));
        let config = button.write_config();

        button.read_config(&config);
        button.read_config(&config);
        assert_eq!(button.slots().len(), 1);
        assert_eq!(button.summary_label(), "W");
        assert_eq!(button.write_config().slots.len(), 1);

        let other = StickButtonConfig {
            index: Some(0),
            slots: vec![SlotConfig {
                code: Some(2),
                mode: Some("mousebutton".to_string()),
            }],
            ..Default::default()
        };
        button.read_config(&other);
        assert_eq!(button.slots().len(), 1);
        assert_eq!(button.slots()[0].mode(), SlotMode::MouseButton);
    }

    #[test]
    fn test_read_config_without_slots_keeps_binding() {
        let mut button = StickButton::new(0, Direction::Up);
        button.add_slot(ActionSlot::new('w' as i32, SlotMode::Keyboard));
        let config = StickButtonConfig {
            index: Some(0),
            sensitivity: Some(2.0),
            ..Default::default()
        };
        button.read_config(&config);
        assert_eq!(button.slots().len(), 1);
        assert_eq!(button.sensitivity(), 2.0);
    }
}
