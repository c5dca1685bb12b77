//! Position reassignment for a milestone moving within its timeline.
//!
//! Works on an in-memory snapshot of sibling positions and returns the
//! writes needed; it never touches storage. The caller applies the result
//! inside one transaction.
//!
//! A move only displaces siblings when the destination is already held. A
//! destination that is a gap, whether between two positions or beyond either
//! end, is taken as-is and nobody else moves.
//!
//! ```rust
//! use waypoint_core::schedule::{reassign, OrderPatch, OrderSlot};
//!
//! // Four milestones at 1..=4; the one at 1 moves to 4.
//! let siblings = [
//!     OrderSlot::new(2, 2),
//!     OrderSlot::new(3, 3),
//!     OrderSlot::new(4, 4),
//! ];
//! let plan = reassign(&siblings, 1, 1, 4);
//!
//! assert_eq!(plan.moved, OrderPatch { id: 1, order: 4 });
//! assert_eq!(
//!     plan.siblings,
//!     vec![
//!         OrderPatch { id: 2, order: 1 },
//!         OrderPatch { id: 3, order: 2 },
//!         OrderPatch { id: 4, order: 3 },
//!     ]
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::models::Milestone;

/// Current position of one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderSlot {
    pub id: u64,
    pub order: u32,
}

impl OrderSlot {
    pub fn new(id: u64, order: u32) -> Self {
        Self { id, order }
    }
}

impl From<&Milestone> for OrderSlot {
    fn from(milestone: &Milestone) -> Self {
        Self::new(milestone.id, milestone.order)
    }
}

/// A position write: milestone `id` takes `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderPatch {
    pub id: u64,
    pub order: u32,
}

/// Outcome of a reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    /// Final position of the moved milestone
    pub moved: OrderPatch,
    /// Displaced siblings, sorted by their original position
    pub siblings: Vec<OrderPatch>,
    previous_order: u32,
}

impl Reassignment {
    /// Position the moved milestone held before the move.
    pub fn previous_order(&self) -> u32 {
        self.previous_order
    }

    /// True when nothing changes at all.
    pub fn is_noop(&self) -> bool {
        self.moved.order == self.previous_order && self.siblings.is_empty()
    }

    /// True when the move required shifting siblings.
    pub fn displaced(&self) -> bool {
        !self.siblings.is_empty()
    }

    /// Every write to perform, moved milestone first. Empty for a no-op.
    pub fn patches(&self) -> Vec<OrderPatch> {
        if self.is_noop() {
            return Vec::new();
        }
        std::iter::once(self.moved)
            .chain(self.siblings.iter().copied())
            .collect()
    }

    /// Applies the writes to an in-memory snapshot.
    pub fn apply_to(&self, slots: &mut [OrderSlot]) {
        for patch in self.patches() {
            if let Some(slot) = slots.iter_mut().find(|slot| slot.id == patch.id) {
                slot.order = patch.order;
            }
        }
    }
}

/// Computes the writes needed to move milestone `moved_id` from `old_order`
/// to `new_order`.
///
/// `siblings` are the other live milestones of the same timeline. An entry
/// carrying `moved_id` is ignored.
pub fn reassign(
    siblings: &[OrderSlot],
    moved_id: u64,
    old_order: u32,
    new_order: u32,
) -> Reassignment {
    let moved = OrderPatch {
        id: moved_id,
        order: new_order,
    };
    let others: Vec<&OrderSlot> = siblings.iter().filter(|slot| slot.id != moved_id).collect();

    if new_order == old_order || !others.iter().any(|slot| slot.order == new_order) {
        return Reassignment {
            moved,
            siblings: Vec::new(),
            previous_order: old_order,
        };
    }

    let mut displaced: Vec<OrderPatch> = if new_order > old_order {
        others
            .iter()
            .filter(|slot| slot.order > old_order && slot.order <= new_order)
            .map(|slot| OrderPatch {
                id: slot.id,
                order: slot.order - 1,
            })
            .collect()
    } else {
        others
            .iter()
            .filter(|slot| slot.order >= new_order && slot.order < old_order)
            .map(|slot| OrderPatch {
                id: slot.id,
                order: slot.order + 1,
            })
            .collect()
    };
    displaced.sort_by_key(|patch| patch.order);

    Reassignment {
        moved,
        siblings: displaced,
        previous_order: old_order,
    }
}

/// Whether a live sibling already holds `order`.
pub fn is_occupied(siblings: &[OrderSlot], order: u32) -> bool {
    siblings.iter().any(|slot| slot.order == order)
}
