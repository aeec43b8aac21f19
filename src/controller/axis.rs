use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Lowest raw value an axis reports
pub const AXIS_MIN: i32 = -32767;

/// Highest raw value an axis reports
pub const AXIS_MAX: i32 = 32767;

/// Default saturation radius for sticks
pub const AXIS_MAX_ZONE: i32 = AXIS_MAX;

/// Identifies the stick an axis currently belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StickId(pub usize);

#[derive(Debug)]
struct AxisState {
    index: usize,
    value: AtomicI32,
    // Bookkeeping only, never consulted for control flow
    stick: Mutex<Option<StickId>>,
}

// Shared handle to a raw axis sample.
// The polling side writes the value, sticks read it.
#[derive(Clone, Debug)]
pub struct JoyAxis {
    state: Arc<AxisState>,
}

impl JoyAxis {
    pub fn new(index: usize) -> Self {
        Self {
            state: Arc::new(AxisState {
                index,
                value: AtomicI32::new(0),
                stick: Mutex::new(None),
            }),
        }
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn raw_value(&self) -> i32 {
        self.state.value.load(Ordering::Relaxed)
    }

    // Values outside of the axis range are clamped
    pub fn set_raw_value(&self, value: i32) {
        let value = value.clamp(AXIS_MIN, AXIS_MAX);
        self.state.value.store(value, Ordering::Relaxed);
    }

    /// Raw value scaled into -1.0..=1.0
    pub fn normalized_placement(&self) -> f64 {
        (self.raw_value() as f64 / AXIS_MAX as f64).clamp(-1.0, 1.0)
    }

    pub fn set_control_stick(&self, stick: StickId) {
        match self.state.stick.lock() {
            Ok(mut guard) => {
                debug!("Axis {} attached to stick {}", self.index(), stick.0 + 1);
                *guard = Some(stick);
            }
            Err(e) => warn!("Unable to attach axis {}: {}", self.index(), e),
        }
    }

    pub fn remove_control_stick(&self) {
        match self.state.stick.lock() {
            Ok(mut guard) => *guard = None,
            Err(e) => warn!("Unable to detach axis {}: {}", self.index(), e),
        }
    }

    pub fn control_stick(&self) -> Option<StickId> {
        self.state.stick.lock().ok().and_then(|guard| *guard)
    }

    pub fn is_part_of_stick(&self) -> bool {
        self.control_stick().is_some()
    }

    /// True if both handles point at the same axis
    pub fn same_axis(&self, other: &JoyAxis) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
