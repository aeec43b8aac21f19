//! Which direction targets a stick currently holds active.
//!
//! A stick can hold at most three targets at once, one per slot: a horizontal
//! cardinal, a vertical cardinal and a discrete diagonal. Not every combination
//! is legal, so the state is one tagged value instead of three nullable slots.

use crate::controller::direction::{Direction, StickDirection};
use crate::controller::stick::StickMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Inactive,
    /// One cardinal target (Up, Down, Left or Right)
    SingleCardinal(Direction),
    /// Standard mode diagonal: both adjacent cardinals are held
    BlendedDiagonal {
        horizontal: Direction,
        vertical: Direction,
    },
    /// Eight-way mode diagonal: the dedicated diagonal target
    DiscreteDiagonal(Direction),
}

/// The three activation slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Per-slot view of an [`ActivationState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ActivationSlots {
    pub horizontal: Option<Direction>,
    pub vertical: Option<Direction>,
    pub diagonal: Option<Direction>,
}

impl ActivationSlots {
    pub fn get(&self, kind: SlotKind) -> Option<Direction> {
        match kind {
            SlotKind::Horizontal => self.horizontal,
            SlotKind::Vertical => self.vertical,
            SlotKind::Diagonal => self.diagonal,
        }
    }
}

impl ActivationState {
    /// Slots are processed in this order on every dispatch
    pub const DISPATCH_ORDER: [SlotKind; 3] =
        [SlotKind::Vertical, SlotKind::Horizontal, SlotKind::Diagonal];

    /// Targets a classified sector asks for
    pub fn for_direction(direction: StickDirection, mode: StickMode) -> Self {
        let Some(direction) = direction.direction() else {
            return ActivationState::Inactive;
        };

        match direction.components() {
            None => ActivationState::SingleCardinal(direction),
            Some(_) if mode == StickMode::EightWay => ActivationState::DiscreteDiagonal(direction),
            Some((horizontal, vertical)) => ActivationState::BlendedDiagonal {
                horizontal,
                vertical,
            },
        }
    }

    pub fn slots(&self) -> ActivationSlots {
        match *self {
            ActivationState::Inactive => ActivationSlots::default(),
            ActivationState::SingleCardinal(direction) if direction.is_horizontal() => {
                ActivationSlots {
                    horizontal: Some(direction),
                    ..Default::default()
                }
            }
            ActivationState::SingleCardinal(direction) => ActivationSlots {
                vertical: Some(direction),
                ..Default::default()
            },
            ActivationState::BlendedDiagonal {
                horizontal,
                vertical,
            } => ActivationSlots {
                horizontal: Some(horizontal),
                vertical: Some(vertical),
                diagonal: None,
            },
            ActivationState::DiscreteDiagonal(direction) => ActivationSlots {
                diagonal: Some(direction),
                ..Default::default()
            },
        }
    }

    /// Slot a target occupies, `None` if it is not active
    pub fn slot_of(&self, direction: Direction) -> Option<SlotKind> {
        let slots = self.slots();
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|kind| slots.get(*kind) == Some(direction))
    }

    pub fn is_active(&self, direction: Direction) -> bool {
        self.slot_of(direction).is_some()
    }

    /// Active targets in dispatch order
    pub fn active_directions(&self) -> Vec<Direction> {
        let slots = self.slots();
        Self::DISPATCH_ORDER
            .into_iter()
            .filter_map(|kind| slots.get(kind))
            .collect()
    }
}

/// Edge a single slot produces when moving from `active` to `candidate`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotEdge {
    None,
    Activate(Direction),
    Deactivate(Direction),
    /// Same target stays active and is activated again
    Hold(Direction),
    /// Old target is deactivated, then the new one activated
    Switch { from: Direction, to: Direction },
}

impl SlotEdge {
    pub fn between(active: Option<Direction>, candidate: Option<Direction>) -> Self {
        match (active, candidate) {
            (None, None) => SlotEdge::None,
            (None, Some(to)) => SlotEdge::Activate(to),
            (Some(from), None) => SlotEdge::Deactivate(from),
            (Some(from), Some(to)) if from == to => SlotEdge::Hold(to),
            (Some(from), Some(to)) => SlotEdge::Switch { from, to },
        }
    }
}

/// Edges for every slot, in dispatch order
pub fn transition(from: ActivationState, to: ActivationState) -> [(SlotKind, SlotEdge); 3] {
    let old = from.slots();
    let new = to.slots();
    ActivationState::DISPATCH_ORDER.map(|kind| (kind, SlotEdge::between(old.get(kind), new.get(kind))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_shapes() {
        assert_eq!(
            ActivationState::for_direction(StickDirection::Centered, StickMode::Standard),
            ActivationState::Inactive
        );
        assert_eq!(
            ActivationState::for_direction(StickDirection::Left, StickMode::EightWay),
            ActivationState::SingleCardinal(Direction::Left)
        );
        assert_eq!(
            ActivationState::for_direction(StickDirection::LeftUp, StickMode::Standard),
            ActivationState::BlendedDiagonal {
                horizontal: Direction::Left,
                vertical: Direction::Up
            }
        );
        assert_eq!(
            ActivationState::for_direction(StickDirection::RightDown, StickMode::EightWay),
            ActivationState::DiscreteDiagonal(Direction::RightDown)
        );
    }

    #[test]
    fn test_slot_membership() {
        let state = ActivationState::BlendedDiagonal {
            horizontal: Direction::Right,
            vertical: Direction::Down,
        };
        assert_eq!(state.slot_of(Direction::Right), Some(SlotKind::Horizontal));
        assert_eq!(state.slot_of(Direction::Down), Some(SlotKind::Vertical));
        assert_eq!(state.slot_of(Direction::RightDown), None);
        assert_eq!(
            state.active_directions(),
            vec![Direction::Down, Direction::Right]
        );
    }

    #[test]
    fn test_blend_to_cardinal_keeps_shared_component() {
        let from = ActivationState::BlendedDiagonal {
            horizontal: Direction::Right,
            vertical: Direction::Up,
        };
        let to = ActivationState::SingleCardinal(Direction::Right);
        assert_eq!(
            transition(from, to),
            [
                (SlotKind::Vertical, SlotEdge::Deactivate(Direction::Up)),
                (SlotKind::Horizontal, SlotEdge::Hold(Direction::Right)),
                (SlotKind::Diagonal, SlotEdge::None),
            ]
        );
    }

    #[test]
    fn test_opposite_jump_switches() {
        let from = ActivationState::SingleCardinal(Direction::Left);
        let to = ActivationState::SingleCardinal(Direction::Right);
        assert_eq!(
            transition(from, to)[1],
            (
                SlotKind::Horizontal,
                SlotEdge::Switch {
                    from: Direction::Left,
                    to: Direction::Right
                }
            )
        );
    }

    #[test]
    fn test_release_deactivates_everything() {
        let from = ActivationState::DiscreteDiagonal(Direction::LeftDown);
        let edges = transition(from, ActivationState::Inactive);
        assert_eq!(edges[2].1, SlotEdge::Deactivate(Direction::LeftDown));
        assert_eq!(edges[0].1, SlotEdge::None);
        assert_eq!(edges[1].1, SlotEdge::None);
    }
}
