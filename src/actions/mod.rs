//! The compiled action space.
//!
//! Enumerates every legal-in-principle action across the six decision kinds
//! once per environment, in a fixed construction order that defines the
//! action-index contract. A reverse map gives O(1) lookup from an action's
//! canonical form back to its index, which is what makes mask generation
//! O(legal-count) instead of O(total).

pub mod mask;

use std::collections::HashMap;

use thiserror::Error;

use crate::board::location::{Location, LocationKind, UtilityKind};
use crate::board::resource::Resource;

/// Length of the fixed integer vector every action serializes to.
pub const ACTION_VEC_LEN: usize = 7;

/// Number of binary flags in a tool-selection action: four persistent
/// slots followed by up to three one-use tools.
pub const TOOL_FLAG_COUNT: usize = 7;

/// Placement counts are capped at ten workers regardless of capacity.
pub const MAX_PLACEMENT_WORKERS: u8 = 10;

/// Size of the ToolSelect block (2^7 flag combinations).
pub const TOOL_SELECT_COUNT: usize = 128;

/// Size of the BuyOrSkip block.
pub const BUY_OR_SKIP_COUNT: usize = 2;

/// Size of the ResourceSpend block: all multisets of size 1..=7 over the
/// four spendable resources.
pub const RESOURCE_SPEND_COUNT: usize = 329;

/// Size of the DiceChoice block (die values 1..=6).
pub const DICE_CHOICE_COUNT: usize = 6;

/// Size of the ChooseTwo block (ordered pairs over the five resources).
pub const CHOOSE_TWO_COUNT: usize = 25;

/// A fully specified action, one of the six decision kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place `workers` workers at board location `location`.
    Placement { location: u8, workers: u8 },
    /// Apply the flagged tools to the pending dice sum. Flags 0..4 are the
    /// persistent slots, 4..7 the one-use tools by list position.
    ToolSelect { flags: [bool; TOOL_FLAG_COUNT] },
    /// Confirm or decline the pending purchase.
    BuyOrSkip { buy: bool },
    /// Pay the pending cost with this resource multiset.
    ResourceSpend { wood: u8, stone: u8, clay: u8, gold: u8 },
    /// Take the die showing `value` from the pending roll set.
    DiceChoice { value: u8 },
    /// Gain one unit each of two freely chosen resources.
    ChooseTwo { first: Resource, second: Resource },
}

impl Action {
    /// Serializes the action into the fixed 7-slot integer vector used
    /// for storage. Unused slots are zero.
    pub fn to_vec(self) -> [i32; ACTION_VEC_LEN] {
        let mut v = [0i32; ACTION_VEC_LEN];
        match self {
            Action::Placement { location, workers } => {
                v[0] = location as i32;
                v[1] = workers as i32;
            }
            Action::ToolSelect { flags } => {
                for (slot, &f) in v.iter_mut().zip(flags.iter()) {
                    *slot = f as i32;
                }
            }
            Action::BuyOrSkip { buy } => {
                v[0] = buy as i32;
            }
            Action::ResourceSpend { wood, stone, clay, gold } => {
                v[0] = wood as i32;
                v[1] = stone as i32;
                v[2] = clay as i32;
                v[3] = gold as i32;
            }
            Action::DiceChoice { value } => {
                v[0] = value as i32;
            }
            Action::ChooseTwo { first, second } => {
                v[0] = first as i32;
                v[1] = second as i32;
            }
        }
        v
    }
}

/// Lookup failure in the compiled reverse map.
///
/// A mask-respecting caller can never trigger this; it indicates an
/// inconsistency between the mask generator and the compiler.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("action {0:?} is not in the compiled action space")]
pub struct UnknownActionError(pub Action);

/// The total ordered enumeration of all actions for a given board layout.
///
/// Built once per environment; the index assignment never changes during
/// play. Block order: Placement, ToolSelect, BuyOrSkip, ResourceSpend,
/// DiceChoice, ChooseTwo.
#[derive(Debug, Clone)]
pub struct ActionSpace {
    actions: Vec<Action>,
    index: HashMap<Action, usize>,
    pub placement_start: usize,
    pub tool_select_start: usize,
    pub buy_or_skip_start: usize,
    pub resource_spend_start: usize,
    pub dice_choice_start: usize,
    pub choose_two_start: usize,
}

impl ActionSpace {
    /// Compiles the action space from the board layout. Only location
    /// capacities matter; occupancy and slot contents are ignored.
    pub fn new(locations: &[Location]) -> Self {
        let mut actions: Vec<Action> = Vec::new();
        let mut index: HashMap<Action, usize> = HashMap::new();

        let push = |actions: &mut Vec<Action>, index: &mut HashMap<Action, usize>, a: Action| {
            index.insert(a, actions.len());
            actions.push(a);
        };

        // Placement block, in board order. The worker-granting House is the
        // one location with a single fixed 2-worker action.
        let placement_start = actions.len();
        for (loc_idx, location) in locations.iter().enumerate() {
            if matches!(location.kind, LocationKind::Utility(UtilityKind::House)) {
                push(
                    &mut actions,
                    &mut index,
                    Action::Placement {
                        location: loc_idx as u8,
                        workers: crate::board::location::HOUSE_WORKERS,
                    },
                );
            } else {
                let max_workers = location.capacity.min(MAX_PLACEMENT_WORKERS);
                for workers in 1..=max_workers {
                    push(
                        &mut actions,
                        &mut index,
                        Action::Placement { location: loc_idx as u8, workers },
                    );
                }
            }
        }

        // ToolSelect block: all 2^7 flag combinations, lexicographic with
        // flag 0 as the most significant bit.
        let tool_select_start = actions.len();
        for code in 0..TOOL_SELECT_COUNT {
            let mut flags = [false; TOOL_FLAG_COUNT];
            for (i, flag) in flags.iter_mut().enumerate() {
                *flag = (code >> (TOOL_FLAG_COUNT - 1 - i)) & 1 == 1;
            }
            push(&mut actions, &mut index, Action::ToolSelect { flags });
        }

        // BuyOrSkip block: skip, then buy.
        let buy_or_skip_start = actions.len();
        push(&mut actions, &mut index, Action::BuyOrSkip { buy: false });
        push(&mut actions, &mut index, Action::BuyOrSkip { buy: true });

        // ResourceSpend block: every multiset of size 1..=7 over the four
        // spendable resources, ordered by total then by descending counts.
        let resource_spend_start = actions.len();
        for total in 1..=7u8 {
            for wood in (0..=total).rev() {
                for stone in (0..=total - wood).rev() {
                    for clay in (0..=total - wood - stone).rev() {
                        let gold = total - wood - stone - clay;
                        push(
                            &mut actions,
                            &mut index,
                            Action::ResourceSpend { wood, stone, clay, gold },
                        );
                    }
                }
            }
        }

        // DiceChoice block: die values 1..=6.
        let dice_choice_start = actions.len();
        for value in 1..=6u8 {
            push(&mut actions, &mut index, Action::DiceChoice { value });
        }

        // ChooseTwo block: ordered resource pairs, first varying slowest.
        let choose_two_start = actions.len();
        for &first in &crate::board::resource::ALL_RESOURCES {
            for &second in &crate::board::resource::ALL_RESOURCES {
                push(&mut actions, &mut index, Action::ChooseTwo { first, second });
            }
        }

        ActionSpace {
            actions,
            index,
            placement_start,
            tool_select_start,
            buy_or_skip_start,
            resource_spend_start,
            dice_choice_start,
            choose_two_start,
        }
    }

    /// The total number of compiled actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Looks up an action by index.
    pub fn action(&self, index: usize) -> Option<Action> {
        self.actions.get(index).copied()
    }

    /// Reverse lookup from an action to its compiled index.
    pub fn index_of(&self, action: Action) -> Result<usize, UnknownActionError> {
        self.index
            .get(&action)
            .copied()
            .ok_or(UnknownActionError(action))
    }

    /// All compiled actions in index order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
