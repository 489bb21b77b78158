//! Legal-action mask generation.
//!
//! Produces a boolean vector over the whole compiled action space with
//! `true` exactly at the currently legal indices. Legality keys are derived
//! directly from state and fed through the compiled reverse map, so the
//! cost is O(legal-count); only the always-fully-legal ChooseTwo block is
//! marked wholesale.

use super::{Action, ActionSpace, CHOOSE_TWO_COUNT, MAX_PLACEMENT_WORKERS, TOOL_FLAG_COUNT};
use crate::board::location::{Location, LocationKind, UtilityKind, HOUSE_WORKERS};
use crate::board::player::Player;
use crate::game::{Decision, Game, SpendRequest};

/// Generates the legal-action mask for the game's current decision.
pub fn legal_mask(space: &ActionSpace, game: &Game) -> Vec<bool> {
    let mut mask = vec![false; space.len()];
    let player = game.current_player();

    match &game.decision {
        Decision::Placement => {
            mark_placements(space, &mut mask, &game.locations, player);
        }
        Decision::ToolSelect { .. } => {
            mark_tool_selections(space, &mut mask, player);
        }
        Decision::BuyOrSkip { location } => {
            let mut mark = |a| mark_action(space, &mut mask, a);
            mark(Action::BuyOrSkip { buy: false });
            if purchase_affordable(&game.locations[*location], player) {
                mark(Action::BuyOrSkip { buy: true });
            }
        }
        Decision::ResourceSpend { request, .. } => {
            mark_spends(space, &mut mask, request, player);
        }
        Decision::DiceChoice { rolls, .. } => {
            for &value in rolls {
                mark_action(space, &mut mask, Action::DiceChoice { value });
            }
        }
        Decision::ChooseTwo { .. } => {
            // The one block that is always fully legal.
            for slot in mask[space.choose_two_start..space.choose_two_start + CHOOSE_TWO_COUNT]
                .iter_mut()
            {
                *slot = true;
            }
        }
        Decision::GameOver => {}
    }

    mask
}

/// Returns true if the player has at least one legal placement right now.
pub fn can_place_anywhere(locations: &[Location], player: &Player) -> bool {
    if player.available_workers == 0 {
        return false;
    }
    locations.iter().any(|loc| {
        if !loc.can_place() {
            return false;
        }
        if matches!(loc.kind, LocationKind::Utility(UtilityKind::House)) {
            loc.available_space() >= HOUSE_WORKERS && player.available_workers >= HOUSE_WORKERS
        } else {
            true
        }
    })
}

fn mark_action(space: &ActionSpace, mask: &mut [bool], action: Action) {
    // Every key derived here is in the compiled space by construction.
    let idx = space
        .index_of(action)
        .expect("mask generator derived a key outside the compiled space");
    mask[idx] = true;
}

fn mark_placements(space: &ActionSpace, mask: &mut [bool], locations: &[Location], player: &Player) {
    for (loc_idx, location) in locations.iter().enumerate() {
        if !location.can_place() {
            continue;
        }
        if matches!(location.kind, LocationKind::Utility(UtilityKind::House)) {
            if location.available_space() >= HOUSE_WORKERS
                && player.available_workers >= HOUSE_WORKERS
            {
                mark_action(
                    space,
                    mask,
                    Action::Placement { location: loc_idx as u8, workers: HOUSE_WORKERS },
                );
            }
            continue;
        }
        let max_workers = location
            .available_space()
            .min(player.available_workers)
            .min(MAX_PLACEMENT_WORKERS);
        for workers in 1..=max_workers {
            mark_action(space, mask, Action::Placement { location: loc_idx as u8, workers });
        }
    }
}

/// Marks every flag combination whose set bits all name a tool the player
/// owns and can still use this round. The empty selection is always legal.
fn mark_tool_selections(space: &ActionSpace, mask: &mut [bool], player: &Player) {
    let mut usable: Vec<usize> = Vec::with_capacity(TOOL_FLAG_COUNT);
    for (i, tool) in player.tools.iter().enumerate() {
        if tool.available && tool.value > 0 {
            usable.push(i);
        }
    }
    for j in 0..player.one_use_tools.len() {
        usable.push(4 + j);
    }

    for subset in 0u32..(1 << usable.len()) {
        let mut flags = [false; TOOL_FLAG_COUNT];
        for (bit, &flag_pos) in usable.iter().enumerate() {
            if subset >> bit & 1 == 1 {
                flags[flag_pos] = true;
            }
        }
        mark_action(space, mask, Action::ToolSelect { flags });
    }
}

fn purchase_affordable(location: &Location, player: &Player) -> bool {
    match &location.kind {
        LocationKind::CardSlot(Some(card)) => card.is_affordable(player.spendable_total()),
        LocationKind::BuildingSlot(Some(building)) => building.is_affordable(&player.resources),
        _ => false,
    }
}

/// Marks every payable multiset for the pending spend request: per-type
/// counts bounded by the player's holdings, total and variety per the rule.
fn mark_spends(space: &ActionSpace, mask: &mut [bool], request: &SpendRequest, player: &Player) {
    use crate::board::resource::Resource;
    let have = [
        player.resource(Resource::Wood),
        player.resource(Resource::Stone),
        player.resource(Resource::Clay),
        player.resource(Resource::Gold),
    ];

    let (totals, variety): (Vec<u8>, Option<u8>) = match request {
        SpendRequest::AnyMix { total } => (vec![*total], None),
        SpendRequest::ExactVariety { total, variety } => (vec![*total], Some(*variety)),
        SpendRequest::Open => ((1..=7).collect(), None),
    };

    for total in totals {
        for wood in 0..=total.min(have[0]) {
            for stone in 0..=(total - wood).min(have[1]) {
                for clay in 0..=(total - wood - stone).min(have[2]) {
                    let gold = total - wood - stone - clay;
                    if gold > have[3] {
                        continue;
                    }
                    if let Some(v) = variety {
                        let distinct =
                            [wood, stone, clay, gold].iter().filter(|&&c| c > 0).count() as u8;
                        if distinct != v {
                            continue;
                        }
                    }
                    mark_action(space, mask, Action::ResourceSpend { wood, stone, clay, gold });
                }
            }
        }
    }
}
