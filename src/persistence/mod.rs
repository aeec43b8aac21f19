//! # Persistence Module
//!
//! Serializable shapes of a stick configuration and the profile store that
//! writes them to disk as TOML.
//!
//! ## Key Abstractions
//! - **StickConfig**: one stick block, only non-default values are present
//! - **StickButtonConfig**: one direction target block, tagged with its direction code
//! - **SlotConfig**: one action slot (code plus mode name)
//! - **Profile**: named collection of stick blocks, see [`profile`]
//!
//! ## Error Handling Strategy
//! Reading is lenient. Malformed fields are skipped via [`lenient`] and the
//! rest of the block still applies. Only I/O failures and broken TOML syntax
//! surface as [`profile::ProfileError`].

pub mod lenient;
pub mod profile;

pub use profile::{Profile, ProfileError};

use crate::mapping::curve::{MouseCurve, MouseMode};
use crate::mapping::slot::ActionSlot;
use serde::{Deserialize, Serialize};

/// Marker stored in [`StickConfig::mode`] for eight-way sticks
pub const EIGHT_WAY_MODE: &str = "eight-way";

/// Persisted form of one control stick.
///
/// `index` is 1-based. Absent fields keep the stick's current value.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StickConfig {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub dead_zone: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub max_zone: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub diagonal_range: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<StickButtonConfig>,
}

/// Persisted form of one direction target
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StickButtonConfig {
    /// Direction code 1..=8, clockwise from Up
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub mouse_mode: Option<MouseMode>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub mouse_curve: Option<MouseCurve>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub spring_width: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub spring_height: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotConfig>,
}

/// Persisted form of one action slot
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct SlotConfig {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl From<&ActionSlot> for SlotConfig {
    fn from(slot: &ActionSlot) -> Self {
        Self {
            code: Some(slot.code()),
            mode: Some(slot.mode().as_str().to_string()),
        }
    }
}
