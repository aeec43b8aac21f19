//! Control stick direction engine
//!
//! A [`ControlStick`] reads two [`JoyAxis`] handles, decides which of its eight
//! direction targets should be held and drives them through activate/deactivate
//! edges. Every sample runs the same pipeline:
//!
//! ```text
//! axes ──► deadzone test ──► bearing ──► sector ──► per-slot edges ──► targets
//! ```
//!
//! Observers subscribe to [`StickEvent`]s through a broadcast channel. Sending
//! never blocks and works without subscribers.

use crate::controller::activation::{transition, ActivationState, SlotEdge, SlotKind};
use crate::controller::axis::{JoyAxis, StickId, AXIS_MAX, AXIS_MAX_ZONE};
use crate::controller::direction::{Direction, DirectionMap, StickDirection};
use crate::controller::distance::StickGeometry;
use crate::controller::zones::{
    DiagonalZones, DEFAULT_DIAGONAL_RANGE, MAX_DIAGONAL_RANGE, MIN_DIAGONAL_RANGE,
};
use crate::mapping::curve::{MouseCurve, MouseMode};
use crate::mapping::stick_button::{StickButton, DEFAULT_SENSITIVITY};
use crate::mapping::target::DirectionTarget;
use crate::mapping::MappingError;
use crate::persistence::{StickConfig, EIGHT_WAY_MODE};
use std::str::FromStr;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_DEAD_ZONE: i32 = 8000;
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

const STANDARD_MODE: &str = "standard";

/// How diagonal sectors are mapped onto targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StickMode {
    /// Diagonals hold the two adjacent cardinal targets
    #[default]
    Standard,
    /// Diagonals hold their own dedicated target
    EightWay,
}

impl StickMode {
    /// Name in profiles
    pub fn as_str(&self) -> &'static str {
        match self {
            StickMode::Standard => STANDARD_MODE,
            StickMode::EightWay => EIGHT_WAY_MODE,
        }
    }
}

impl FromStr for StickMode {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STANDARD_MODE => Ok(StickMode::Standard),
            EIGHT_WAY_MODE => Ok(StickMode::EightWay),
            other => Err(MappingError::UnknownStickMode(other.to_string())),
        }
    }
}

/// Notifications published by a stick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StickEvent {
    /// Stick left the deadzone
    Active { x: i32, y: i32 },
    /// Stick returned into the deadzone
    Released { x: i32, y: i32 },
    /// Sent after every processed sample
    Moved { x: i32, y: i32 },
    DeadZoneChanged(i32),
    MaxZoneChanged(i32),
    DiagonalRangeChanged(i32),
}

pub struct ControlStick<T: DirectionTarget = StickButton> {
    index: usize,
    origin_set: usize,
    axis_x: JoyAxis,
    axis_y: JoyAxis,

    dead_zone: i32,
    max_zone: i32,
    diagonal_range: i32,
    zones: DiagonalZones,
    mode: StickMode,

    safe_zone: bool,
    is_active: bool,
    current_direction: StickDirection,
    activation: ActivationState,

    buttons: DirectionMap<T>,
    events: broadcast::Sender<StickEvent>,
}

impl ControlStick<StickButton> {
    /// Stick with [`StickButton`] targets
    pub fn new(axis_x: JoyAxis, axis_y: JoyAxis, index: usize, origin_set: usize) -> Self {
        Self::with_targets(axis_x, axis_y, index, origin_set)
    }
}

impl<T: DirectionTarget> ControlStick<T> {
    /// Stick with targets built by [`DirectionTarget::for_direction`]
    pub fn with_targets(axis_x: JoyAxis, axis_y: JoyAxis, index: usize, origin_set: usize) -> Self {
        axis_x.set_control_stick(StickId(index));
        axis_y.set_control_stick(StickId(index));

        let (events, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        info!(
            "Stick {} created from axes {} and {}",
            index + 1,
            axis_x.index(),
            axis_y.index()
        );

        Self {
            index,
            origin_set,
            axis_x,
            axis_y,
            dead_zone: DEFAULT_DEAD_ZONE,
            max_zone: AXIS_MAX_ZONE,
            diagonal_range: DEFAULT_DIAGONAL_RANGE,
            zones: DiagonalZones::new(DEFAULT_DIAGONAL_RANGE),
            mode: StickMode::Standard,
            safe_zone: false,
            is_active: false,
            current_direction: StickDirection::Centered,
            activation: ActivationState::Inactive,
            buttons: DirectionMap::from_fn(|direction| T::for_direction(index, direction)),
            events,
        }
    }

    /// Replaces the notification channel. Existing subscribers stop receiving.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        self.events = events;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StickEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: StickEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Runs one sample through the engine. Call whenever either axis changed.
    pub fn process_sample(&mut self, ignore_sets: bool) {
        let geometry = self.geometry();
        let (x, y) = (geometry.x, geometry.y);
        self.safe_zone = !geometry.in_dead_zone();

        if self.safe_zone && !self.is_active {
            self.is_active = true;
            debug!("Stick {} active at ({}, {})", self.index + 1, x, y);
            self.notify(StickEvent::Active { x, y });
            self.dispatch(&geometry, ignore_sets);
        } else if !self.safe_zone && self.is_active {
            self.is_active = false;
            self.current_direction = StickDirection::Centered;
            debug!("Stick {} released at ({}, {})", self.index + 1, x, y);
            self.notify(StickEvent::Released { x, y });
            self.dispatch(&geometry, ignore_sets);
        } else if self.is_active {
            self.dispatch(&geometry, ignore_sets);
        }

        trace!("Stick {} moved to ({}, {})", self.index + 1, x, y);
        self.notify(StickEvent::Moved { x, y });
    }

    fn dispatch(&mut self, geometry: &StickGeometry, ignore_sets: bool) {
        let candidate = if self.safe_zone {
            let direction = self.zones.classify_bearing(geometry.bearing());
            if direction != self.current_direction {
                debug!(
                    "Stick {} direction {} -> {}",
                    self.index + 1,
                    self.current_direction,
                    direction
                );
            }
            self.current_direction = direction;
            ActivationState::for_direction(direction, self.mode)
        } else {
            ActivationState::Inactive
        };

        for (_, edge) in transition(self.activation, candidate) {
            self.apply_edge(edge, ignore_sets);
        }
        self.activation = candidate;
    }

    fn apply_edge(&mut self, edge: SlotEdge, ignore_sets: bool) {
        match edge {
            SlotEdge::None => {}
            SlotEdge::Activate(direction) | SlotEdge::Hold(direction) => {
                self.buttons[direction].activate(ignore_sets)
            }
            SlotEdge::Deactivate(direction) => self.buttons[direction].deactivate(ignore_sets),
            SlotEdge::Switch { from, to } => {
                self.buttons[from].deactivate(ignore_sets);
                self.buttons[to].activate(ignore_sets);
            }
        }
    }

    /// Deactivates the targets currently held by the engine
    fn release_active(&mut self) {
        for direction in self.activation.active_directions() {
            self.buttons[direction].deactivate(true);
        }
        self.activation = ActivationState::Inactive;
    }

    /// Sends a deactivate edge to every target, held or not
    pub fn release_button_events(&mut self) {
        for button in self.buttons.values_mut() {
            button.deactivate(true);
        }
        self.activation = ActivationState::Inactive;
    }

    /// Back to factory settings. Held targets are released first.
    pub fn reset(&mut self) {
        self.release_active();

        self.dead_zone = DEFAULT_DEAD_ZONE;
        self.max_zone = AXIS_MAX_ZONE;
        self.diagonal_range = DEFAULT_DIAGONAL_RANGE;
        self.zones = DiagonalZones::new(DEFAULT_DIAGONAL_RANGE);
        self.mode = StickMode::Standard;
        self.safe_zone = false;
        self.is_active = false;
        self.current_direction = StickDirection::Centered;

        for button in self.buttons.values_mut() {
            button.reset();
        }
        debug!("Stick {} reset", self.index + 1);
    }

    /// Throws away all targets and builds fresh ones
    pub fn refresh_buttons(&mut self) {
        self.release_active();
        for button in self.buttons.values_mut() {
            button.reset();
        }
        let index = self.index;
        self.buttons = DirectionMap::from_fn(|direction| T::for_direction(index, direction));
    }

    pub fn replace_x_axis(&mut self, axis: JoyAxis) {
        self.axis_x.remove_control_stick();
        axis.set_control_stick(StickId(self.index));
        self.axis_x = axis;
    }

    pub fn replace_y_axis(&mut self, axis: JoyAxis) {
        self.axis_y.remove_control_stick();
        axis.set_control_stick(StickId(self.index));
        self.axis_y = axis;
    }

    /// Takes the absolute value and caps it at the axis maximum.
    /// Values not strictly below the max zone are rejected.
    pub fn set_dead_zone(&mut self, value: i32) {
        let value = clamp_zone(value);
        if value != self.dead_zone && value < self.max_zone {
            self.dead_zone = value;
            self.notify(StickEvent::DeadZoneChanged(value));
        }
    }

    /// Takes the absolute value and caps it at the axis maximum.
    /// Values not strictly above the dead zone are rejected.
    pub fn set_max_zone(&mut self, value: i32) {
        let value = clamp_zone(value);
        if value != self.max_zone && value > self.dead_zone {
            self.max_zone = value;
            self.notify(StickEvent::MaxZoneChanged(value));
        }
    }

    pub fn set_diagonal_range(&mut self, value: i32) {
        let value = value.clamp(MIN_DIAGONAL_RANGE, MAX_DIAGONAL_RANGE);
        if value != self.diagonal_range {
            self.diagonal_range = value;
            self.zones = DiagonalZones::new(value);
            self.notify(StickEvent::DiagonalRangeChanged(value));
        }
    }

    /// Only changes how the next samples are classified; held targets stay held.
    pub fn set_mode(&mut self, mode: StickMode) {
        self.mode = mode;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based index used in names and profiles
    pub fn real_index(&self) -> usize {
        self.index + 1
    }

    pub fn origin_set(&self) -> usize {
        self.origin_set
    }

    pub fn dead_zone(&self) -> i32 {
        self.dead_zone
    }

    pub fn max_zone(&self) -> i32 {
        self.max_zone
    }

    pub fn diagonal_range(&self) -> i32 {
        self.diagonal_range
    }

    pub fn diagonal_zones(&self) -> &DiagonalZones {
        &self.zones
    }

    pub fn mode(&self) -> StickMode {
        self.mode
    }

    pub fn current_direction(&self) -> StickDirection {
        self.current_direction
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn activation(&self) -> ActivationState {
        self.activation
    }

    pub fn axis_x(&self) -> &JoyAxis {
        &self.axis_x
    }

    pub fn axis_y(&self) -> &JoyAxis {
        &self.axis_y
    }

    pub fn x_coordinate(&self) -> i32 {
        self.axis_x.raw_value()
    }

    pub fn y_coordinate(&self) -> i32 {
        self.axis_y.raw_value()
    }

    pub fn normalized_x_placement(&self) -> f64 {
        self.axis_x.normalized_placement()
    }

    pub fn normalized_y_placement(&self) -> f64 {
        self.axis_y.normalized_placement()
    }

    pub fn button(&self, direction: Direction) -> &T {
        &self.buttons[direction]
    }

    pub fn button_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.buttons[direction]
    }

    pub fn buttons(&self) -> &DirectionMap<T> {
        &self.buttons
    }

    /// Snapshot of the current axis values and zone settings
    pub fn geometry(&self) -> StickGeometry {
        StickGeometry::new(
            self.axis_x.raw_value(),
            self.axis_y.raw_value(),
            self.dead_zone,
            self.max_zone,
        )
    }

    pub fn in_dead_zone(&self) -> bool {
        self.geometry().in_dead_zone()
    }

    pub fn bearing(&self) -> f64 {
        self.geometry().bearing()
    }

    pub fn distance_from_dead_zone(&self) -> f64 {
        self.geometry().radial_distance()
    }

    pub fn absolute_distance(&self) -> f64 {
        self.geometry().absolute_distance()
    }

    pub fn normalized_absolute_distance(&self) -> f64 {
        self.geometry().normalized_absolute_distance()
    }

    /// Magnitude a target should move the mouse with.
    ///
    /// Picks the helper matching the slot the target occupies. Targets that are
    /// not held get 0.0.
    pub fn directional_distance(&self, direction: Direction, mouse_mode: MouseMode) -> f64 {
        let geometry = self.geometry();
        match (self.activation.slot_of(direction), mouse_mode) {
            (Some(SlotKind::Horizontal), MouseMode::Cursor) => geometry.x_distance(),
            (Some(SlotKind::Horizontal), MouseMode::Spring) => geometry.spring_x_distance(),
            (Some(SlotKind::Vertical), MouseMode::Cursor) => geometry.y_distance(),
            (Some(SlotKind::Vertical), MouseMode::Spring) => geometry.spring_y_distance(),
            (Some(SlotKind::Diagonal), _) => geometry.diagonal_distance(),
            (None, _) => 0.0,
        }
    }

    /// "Stick N: " followed by the Up, Left, Down and Right summaries
    pub fn name(&self) -> String {
        let summaries = [Direction::Up, Direction::Left, Direction::Down, Direction::Right]
            .map(|direction| self.buttons[direction].summary_label());
        format!("Stick {}: {}", self.real_index(), summaries.join(", "))
    }

    pub fn is_default(&self) -> bool {
        self.dead_zone == DEFAULT_DEAD_ZONE
            && self.max_zone == AXIS_MAX_ZONE
            && self.diagonal_range == DEFAULT_DIAGONAL_RANGE
            && self.mode == StickMode::Standard
            && self.buttons.values().all(T::is_default)
    }

    // Targets the uniform settings queries look at
    fn preset_directions(&self) -> &'static [Direction] {
        match self.mode {
            StickMode::Standard => &Direction::CARDINALS,
            StickMode::EightWay => &Direction::ALL,
        }
    }

    fn agreed_value<V: PartialEq>(&self, value: impl Fn(&T) -> V) -> Option<V> {
        let mut values = self
            .preset_directions()
            .iter()
            .map(|direction| value(&self.buttons[*direction]));
        let first = values.next()?;
        if values.all(|other| other == first) {
            Some(first)
        } else {
            None
        }
    }

    pub fn set_buttons_mouse_mode(&mut self, mode: MouseMode) {
        for button in self.buttons.values_mut() {
            button.set_mouse_mode(mode);
        }
    }

    pub fn has_same_buttons_mouse_mode(&self) -> bool {
        self.agreed_value(|b| b.mouse_mode()).is_some()
    }

    /// Shared mouse mode, [`MouseMode::Cursor`] if the targets disagree
    pub fn buttons_preset_mouse_mode(&self) -> MouseMode {
        self.agreed_value(|b| b.mouse_mode())
            .unwrap_or(MouseMode::Cursor)
    }

    pub fn set_buttons_mouse_curve(&mut self, curve: MouseCurve) {
        for button in self.buttons.values_mut() {
            button.set_mouse_curve(curve);
        }
    }

    pub fn has_same_buttons_mouse_curve(&self) -> bool {
        self.agreed_value(|b| b.mouse_curve()).is_some()
    }

    /// Shared curve, [`MouseCurve::Linear`] if the targets disagree
    pub fn buttons_preset_mouse_curve(&self) -> MouseCurve {
        self.agreed_value(|b| b.mouse_curve())
            .unwrap_or(MouseCurve::Linear)
    }

    pub fn set_buttons_spring_width(&mut self, width: i32) {
        for button in self.buttons.values_mut() {
            button.set_spring_width(width);
        }
    }

    pub fn buttons_preset_spring_width(&self) -> i32 {
        self.agreed_value(|b| b.spring_width()).unwrap_or(0)
    }

    pub fn set_buttons_spring_height(&mut self, height: i32) {
        for button in self.buttons.values_mut() {
            button.set_spring_height(height);
        }
    }

    pub fn buttons_preset_spring_height(&self) -> i32 {
        self.agreed_value(|b| b.spring_height()).unwrap_or(0)
    }

    pub fn set_buttons_sensitivity(&mut self, sensitivity: f64) {
        for button in self.buttons.values_mut() {
            button.set_sensitivity(sensitivity);
        }
    }

    pub fn buttons_preset_sensitivity(&self) -> f64 {
        self.agreed_value(|b| b.sensitivity())
            .unwrap_or(DEFAULT_SENSITIVITY)
    }

    /// Profile block for this stick, `None` while everything is at factory settings
    pub fn write_config(&self) -> Option<StickConfig> {
        if self.is_default() {
            return None;
        }

        Some(StickConfig {
            index: i32::try_from(self.real_index()).ok(),
            dead_zone: Some(self.dead_zone),
            max_zone: Some(self.max_zone),
            diagonal_range: Some(self.diagonal_range),
            mode: (self.mode != StickMode::Standard).then(|| self.mode.as_str().to_string()),
            buttons: self
                .buttons
                .values()
                .filter(|button| !button.is_default())
                .map(T::write_config)
                .collect(),
        })
    }

    /// Applies a profile block through the regular setters.
    ///
    /// Held targets are released before anything changes. Absent values keep
    /// their current setting.
    pub fn read_config(&mut self, config: &StickConfig) {
        self.release_active();

        match (config.dead_zone, config.max_zone) {
            // A dead zone above the current max zone only fits after the max zone moved
            (Some(dead_zone), Some(max_zone)) if clamp_zone(dead_zone) >= self.max_zone => {
                self.set_max_zone(max_zone);
                self.set_dead_zone(dead_zone);
            }
            (dead_zone, max_zone) => {
                if let Some(dead_zone) = dead_zone {
                    self.set_dead_zone(dead_zone);
                }
                if let Some(max_zone) = max_zone {
                    self.set_max_zone(max_zone);
                }
            }
        }

        if let Some(range) = config.diagonal_range {
            self.set_diagonal_range(range);
        }

        if let Some(name) = config.mode.as_deref() {
            match name.parse::<StickMode>() {
                Ok(mode) => self.set_mode(mode),
                Err(e) => warn!("Stick {}: {}, mode skipped", self.real_index(), e),
            }
        }

        for button_config in &config.buttons {
            let Some(code) = button_config.index else {
                warn!("Stick {}: button block without index skipped", self.real_index());
                continue;
            };
            match Direction::from_code(code) {
                Ok(direction) => self.buttons[direction].read_config(button_config),
                Err(e) => warn!("Stick {}: {}, button block skipped", self.real_index(), e),
            }
        }

        debug!("Stick {} configured: {}", self.real_index(), self.name());
    }
}

impl<T: DirectionTarget> Drop for ControlStick<T> {
    fn drop(&mut self) {
        self.axis_x.remove_control_stick();
        self.axis_y.remove_control_stick();
    }
}

fn clamp_zone(value: i32) -> i32 {
    value.saturating_abs().min(AXIS_MAX)
}
