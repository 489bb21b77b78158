//! Per-location resolution effects.
//!
//! Each function here either finishes an effect and calls back into
//! [`Game::advance_resolution`], or installs the next [`Decision`] and
//! returns, leaving the automaton suspended until the next step.

use crate::board::building::{Building, FLEX_OPEN_COUNT};
use crate::board::card::CardEffect;
use crate::board::location::{LocationKind, UtilityKind};
use crate::board::player::MAX_PLAYERS;
use crate::board::resource::{Resource, SPEND_RESOURCES};

use super::{Decision, Game, SpendRequest};

/// Gathering yield: dice sum plus tool bonus, floor-divided by the
/// resource's divisor.
pub fn gather_yield(dice_sum: u32, tool_bonus: u32, resource: Resource) -> u8 {
    ((dice_sum + tool_bonus) / resource.divisor()) as u8
}

/// Resolves one occupied location for the cursor player. Returns `true`
/// when the automaton suspended on a new decision.
pub(crate) fn visit_location(game: &mut Game, loc: usize) -> bool {
    let player = game.resolving_player();
    match game.locations[loc].kind.clone() {
        LocationKind::Utility(kind) => {
            apply_utility(game, kind);
            game.locations[loc].clear_player(player);
            false
        }
        LocationKind::Gathering(resource) => {
            let workers = game.locations[loc].occupants[player];
            let dice_sum = game.roll_dice_sum(workers as u32);
            game.decision =
                Decision::ToolSelect { location: loc, resource, dice_sum, from_card: false };
            true
        }
        LocationKind::CardSlot(Some(_)) | LocationKind::BuildingSlot(Some(_)) => {
            game.decision = Decision::BuyOrSkip { location: loc };
            true
        }
        // Emptied slots never carry occupancy past the purchase, but an
        // occupied empty slot must not wedge the scan.
        LocationKind::CardSlot(None) | LocationKind::BuildingSlot(None) => {
            game.locations[loc].clear_player(player);
            false
        }
    }
}

fn apply_utility(game: &mut Game, kind: UtilityKind) {
    let player = game.current_player_mut();
    match kind {
        UtilityKind::Farm => player.gain_wheat(1),
        UtilityKind::House => player.gain_worker(1),
        UtilityKind::ToolShop => player.upgrade_tool(),
    }
}

/// Completes a gather after the tool decision: credits the yield, clears
/// the occupancy for board gathers, and resumes the scan. Card-driven
/// gathers never had workers on the location.
pub(crate) fn credit_gather(
    game: &mut Game,
    location: usize,
    resource: Resource,
    dice_sum: u8,
    tool_bonus: u32,
    from_card: bool,
) {
    let amount = gather_yield(dice_sum as u32, tool_bonus, resource);
    game.current_player_mut().gain_resource(resource, amount);
    if !from_card {
        let player = game.resolving_player();
        game.locations[location].clear_player(player);
    }
    game.advance_resolution();
}

/// Handles the buy-or-skip decision on a card or building slot.
pub(crate) fn handle_buy_or_skip(game: &mut Game, location: usize, buy: bool) {
    let player = game.resolving_player();
    if !buy {
        game.locations[location].clear_player(player);
        game.advance_resolution();
        return;
    }
    match game.locations[location].kind.clone() {
        LocationKind::BuildingSlot(Some(Building::Certain { cost })) => {
            for &r in &cost {
                game.players[player].spend_resource(r, 1);
            }
            let vp: i32 = cost.iter().map(|&r| r as i32).sum();
            game.players[player].vp_buildings += vp;
            game.players[player].buildings_owned += 1;
            game.locations[location].kind = LocationKind::BuildingSlot(None);
            game.locations[location].clear_player(player);
            game.advance_resolution();
        }
        LocationKind::BuildingSlot(Some(Building::Flex { count, variety })) => {
            let request = if count == FLEX_OPEN_COUNT {
                SpendRequest::Open
            } else {
                SpendRequest::ExactVariety { total: count, variety }
            };
            game.decision = Decision::ResourceSpend { location, request };
        }
        LocationKind::CardSlot(Some(card)) => {
            // Free cards have no payment decision to suspend on.
            if card.cost == 0 {
                finalize_card_purchase(game, location);
            } else {
                game.decision = Decision::ResourceSpend {
                    location,
                    request: SpendRequest::AnyMix { total: card.cost },
                };
            }
        }
        other => unreachable!("buy decision on non-purchasable location {:?}", other),
    }
}

/// Applies a chosen payment multiset, then completes the purchase the
/// payment was for.
pub(crate) fn handle_spend(game: &mut Game, location: usize, counts: [u8; 4]) {
    let player = game.resolving_player();
    for (&r, &n) in SPEND_RESOURCES.iter().zip(counts.iter()) {
        if n > 0 {
            game.players[player].spend_resource(r, n);
        }
    }
    match game.locations[location].kind.clone() {
        LocationKind::BuildingSlot(Some(Building::Flex { .. })) => {
            // Flex buildings are worth the encodings of what was paid.
            let vp: i32 = SPEND_RESOURCES
                .iter()
                .zip(counts.iter())
                .map(|(&r, &n)| r as i32 * n as i32)
                .sum();
            game.players[player].vp_buildings += vp;
            game.players[player].buildings_owned += 1;
            game.locations[location].kind = LocationKind::BuildingSlot(None);
            game.locations[location].clear_player(player);
            game.advance_resolution();
        }
        LocationKind::CardSlot(Some(_)) => finalize_card_purchase(game, location),
        other => unreachable!("payment resolved against {:?}", other),
    }
}

/// Removes the card from its slot, attaches its scoring to the buyer, and
/// applies the immediate effect. Effects that need further input leave the
/// automaton suspended.
fn finalize_card_purchase(game: &mut Game, location: usize) {
    let player = game.resolving_player();
    let card = match &mut game.locations[location].kind {
        LocationKind::CardSlot(slot) => match slot.take() {
            Some(card) => card,
            None => unreachable!("card purchase on an empty slot"),
        },
        _ => unreachable!("card purchase on a non-card location"),
    };
    game.players[player].add_card_scoring(card.scoring);
    game.locations[location].clear_player(player);
    if !apply_card_effect(game, card.effect, location) {
        game.advance_resolution();
    }
}

/// Applies a card's immediate effect. Returns `true` when the effect
/// installed a follow-up decision.
fn apply_card_effect(game: &mut Game, effect: CardEffect, location: usize) -> bool {
    match effect {
        CardEffect::AddResource { resource, amount } => {
            game.current_player_mut().gain_resource(resource, amount);
            false
        }
        CardEffect::AddVp(vp) => {
            game.current_player_mut().vp += vp as i32;
            false
        }
        CardEffect::AddTool => {
            game.current_player_mut().upgrade_tool();
            false
        }
        CardEffect::AddWheat => {
            game.current_player_mut().gain_wheat(1);
            false
        }
        CardEffect::OneUseTool(value) => {
            game.current_player_mut().gain_one_use_tool(value);
            false
        }
        CardEffect::DrawCard => {
            // Only the scoring half of the drawn card transfers.
            if let Some(card) = game.draw_card() {
                game.current_player_mut().add_card_scoring(card.scoring);
            }
            false
        }
        CardEffect::AnyTwoResources => {
            game.decision = Decision::ChooseTwo { location };
            true
        }
        CardEffect::DiceRoll => {
            let rolls: Vec<u8> = (0..MAX_PLAYERS).map(|_| game.roll_die()).collect();
            game.decision =
                Decision::DiceChoice { location, rolls, remaining: MAX_PLAYERS as u8 };
            true
        }
        CardEffect::ResourcesWithDice { resource } => {
            let dice_sum = game.roll_dice_sum(2);
            game.decision =
                Decision::ToolSelect { location, resource, dice_sum, from_card: true };
            true
        }
    }
}

/// One pick in the dice-roll card's choice loop. The buyer picks first,
/// then each player clockwise; the turn returns to the buyer when the
/// last die is claimed.
pub(crate) fn handle_dice_choice(
    game: &mut Game,
    location: usize,
    mut rolls: Vec<u8>,
    remaining: u8,
    value: u8,
) {
    let pos = match rolls.iter().position(|&r| r == value) {
        Some(pos) => pos,
        None => unreachable!("mask allowed a die value not in the roll set"),
    };
    rolls.remove(pos);
    apply_die_reward(game, value);
    let remaining = remaining - 1;
    if remaining > 0 {
        game.current_player_idx = (game.current_player_idx + 1) % MAX_PLAYERS;
        game.decision = Decision::DiceChoice { location, rolls, remaining };
    } else {
        game.current_player_idx = game.resolving_player();
        game.advance_resolution();
    }
}

fn apply_die_reward(game: &mut Game, value: u8) {
    let player = game.current_player_mut();
    match value {
        1 => player.gain_resource(Resource::Wood, 1),
        2 => player.gain_resource(Resource::Clay, 1),
        3 => player.gain_resource(Resource::Stone, 1),
        4 => player.gain_resource(Resource::Gold, 1),
        5 => player.upgrade_tool(),
        _ => player.gain_wheat(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yield_floor_divides_by_divisor() {
        // 13 + 4 in tools on stone: floor(17 / 4) = 4.
        assert_eq!(gather_yield(13, 4, Resource::Stone), 4);
        assert_eq!(gather_yield(3, 0, Resource::Stone), 0);
        assert_eq!(gather_yield(12, 0, Resource::Gold), 2);
        assert_eq!(gather_yield(7, 0, Resource::Food), 3);
    }

    #[test]
    fn die_reward_mapping() {
        let mut game = Game::new(Some(9));
        let player = game.current_player_idx;
        let wood = game.players[player].resource(Resource::Wood);
        apply_die_reward(&mut game, 1);
        assert_eq!(game.players[player].resource(Resource::Wood), wood + 1);

        let tools = game.players[player].tool_value_total();
        apply_die_reward(&mut game, 5);
        assert_eq!(game.players[player].tool_value_total(), tools + 1);

        let wheat = game.players[player].wheat;
        apply_die_reward(&mut game, 6);
        assert_eq!(game.players[player].wheat, wheat + 1);
    }
}
