//! Game state -> flat f32 observation for policy/value inference.
//!
//! Produces a fixed-length vector from the acting player's perspective.
//! Layout (offsets are compile-time constants, lengths in brackets):
//!
//!   player block
//!     [6]  scalars: total workers, available workers, wheat,
//!          card VP, building VP, buildings owned
//!     [5]  resource holdings in encoding order (food, wood, stone,
//!          clay, gold)
//!     [8]  persistent tools: four values then four availability flags
//!     [3]  one-use tool values, zero padded
//!     [8]  painting counts by value 1..8
//!     [4]  multiplier totals by kind 1..4
//!   board block
//!     [64] occupancy: 16 locations x 4 players, acting player first
//!     [4]  building stack sizes
//!     [12] visible building features, 3 per slot
//!     [1]  card deck size
//!     [20] visible card features, 5 per slot: cost, effect code,
//!          effect params, scoring encoding (empty slots all zero)
//!   control block
//!     [3]  round, acting player index, first player
//!     [7]  decision one-hot
//!     [4]  decision params: location, dice sum or spend total,
//!          variety or remaining picks, from-card or open flag
//!     [4]  pending die values, zero padded

use crate::board::card::{Card, CardScoring};
use crate::board::location::{LocationKind, LOCATION_COUNT};
use crate::board::player::{Player, MAX_PLAYERS, TOOL_SLOTS};
use crate::board::resource::RESOURCE_COUNT;
use crate::game::{Decision, Game, SpendRequest};

const OFF_SCALARS: usize = 0;
const OFF_RESOURCES: usize = OFF_SCALARS + 6;
const OFF_TOOLS: usize = OFF_RESOURCES + RESOURCE_COUNT;
const OFF_ONE_USE: usize = OFF_TOOLS + 2 * TOOL_SLOTS;
const OFF_PAINTINGS: usize = OFF_ONE_USE + 3;
const OFF_MULTIPLIERS: usize = OFF_PAINTINGS + 8;
const OFF_OCCUPANCY: usize = OFF_MULTIPLIERS + 4;
const OFF_BUILDING_DECKS: usize = OFF_OCCUPANCY + LOCATION_COUNT * MAX_PLAYERS;
const OFF_BUILDING_FEATURES: usize = OFF_BUILDING_DECKS + 4;
const OFF_CARD_DECK: usize = OFF_BUILDING_FEATURES + 12;
const OFF_CARD_FEATURES: usize = OFF_CARD_DECK + 1;
const OFF_CONTROL: usize = OFF_CARD_FEATURES + 20;
const OFF_DECISION: usize = OFF_CONTROL + 3;
const OFF_DECISION_PARAMS: usize = OFF_DECISION + 7;
const OFF_DICE: usize = OFF_DECISION_PARAMS + 4;

/// Total observation length.
pub const OBS_LEN: usize = OFF_DICE + 4;

/// Encodes the full observable state from the acting player's view.
pub fn encode_observation(game: &Game) -> Vec<f32> {
    let mut obs = vec![0f32; OBS_LEN];
    let actor = game.current_player_idx;

    encode_player(&mut obs, game.current_player());

    // Occupancy rows are rotated so the acting player is always row 0.
    for (loc_idx, location) in game.locations.iter().enumerate() {
        for offset in 0..MAX_PLAYERS {
            let player = (actor + offset) % MAX_PLAYERS;
            obs[OFF_OCCUPANCY + loc_idx * MAX_PLAYERS + offset] =
                location.occupants[player] as f32;
        }
    }

    for (i, deck) in game.building_decks.iter().enumerate() {
        obs[OFF_BUILDING_DECKS + i] = deck.len() as f32;
    }
    let mut building_slot = 0;
    let mut card_slot = 0;
    for location in &game.locations {
        match &location.kind {
            LocationKind::BuildingSlot(slot) => {
                if let Some(building) = slot {
                    let features = building.features();
                    for (j, &f) in features.iter().enumerate() {
                        obs[OFF_BUILDING_FEATURES + building_slot * 3 + j] = f as f32;
                    }
                }
                building_slot += 1;
            }
            LocationKind::CardSlot(slot) => {
                if let Some(card) = slot {
                    encode_card(&mut obs, OFF_CARD_FEATURES + card_slot * 5, card);
                }
                card_slot += 1;
            }
            _ => {}
        }
    }
    obs[OFF_CARD_DECK] = game.card_deck.len() as f32;

    obs[OFF_CONTROL] = game.round as f32;
    obs[OFF_CONTROL + 1] = actor as f32;
    obs[OFF_CONTROL + 2] = game.first_player as f32;
    encode_decision(&mut obs, &game.decision);

    obs
}

fn encode_player(obs: &mut [f32], player: &Player) {
    obs[OFF_SCALARS] = player.total_workers as f32;
    obs[OFF_SCALARS + 1] = player.available_workers as f32;
    obs[OFF_SCALARS + 2] = player.wheat as f32;
    obs[OFF_SCALARS + 3] = player.vp as f32;
    obs[OFF_SCALARS + 4] = player.vp_buildings as f32;
    obs[OFF_SCALARS + 5] = player.buildings_owned as f32;

    for i in 0..RESOURCE_COUNT {
        obs[OFF_RESOURCES + i] = player.resources[i] as f32;
    }
    for (i, tool) in player.tools.iter().enumerate() {
        obs[OFF_TOOLS + i] = tool.value as f32;
        obs[OFF_TOOLS + TOOL_SLOTS + i] = if tool.available { 1.0 } else { 0.0 };
    }
    for (i, &value) in player.one_use_tools.iter().take(3).enumerate() {
        obs[OFF_ONE_USE + i] = value as f32;
    }
    for &value in &player.paintings {
        let slot = (value as usize).clamp(1, 8) - 1;
        obs[OFF_PAINTINGS + slot] += 1.0;
    }
    for &(kind, amount) in &player.multipliers {
        let slot = (kind as usize).clamp(1, 4) - 1;
        obs[OFF_MULTIPLIERS + slot] += amount as f32;
    }
}

fn encode_card(obs: &mut [f32], base: usize, card: &Card) {
    let (param_a, param_b) = card.effect.params();
    obs[base] = card.cost as f32;
    obs[base + 1] = card.effect.code() as f32;
    obs[base + 2] = param_a as f32;
    obs[base + 3] = param_b as f32;
    obs[base + 4] = match card.scoring {
        CardScoring::Painting(value) => value as f32,
        // Two-digit encoding keeps multipliers disjoint from paintings.
        CardScoring::Multiplier { kind, amount } => (10 * kind + amount) as f32,
    };
}

fn encode_decision(obs: &mut [f32], decision: &Decision) {
    let (slot, params, dice): (usize, [f32; 4], &[u8]) = match decision {
        Decision::Placement => (0, [0.0; 4], &[]),
        Decision::ToolSelect { location, resource, dice_sum, from_card } => (
            1,
            [
                *location as f32,
                *dice_sum as f32,
                *resource as u8 as f32,
                if *from_card { 1.0 } else { 0.0 },
            ],
            &[],
        ),
        Decision::BuyOrSkip { location } => (2, [*location as f32, 0.0, 0.0, 0.0], &[]),
        Decision::ResourceSpend { location, request } => {
            let (total, variety, open) = match request {
                SpendRequest::AnyMix { total } => (*total as f32, 0.0, 0.0),
                SpendRequest::ExactVariety { total, variety } => {
                    (*total as f32, *variety as f32, 0.0)
                }
                SpendRequest::Open => (0.0, 0.0, 1.0),
            };
            (3, [*location as f32, total, variety, open], &[])
        }
        Decision::DiceChoice { location, rolls, remaining } => (
            4,
            [*location as f32, *remaining as f32, 0.0, 0.0],
            rolls.as_slice(),
        ),
        Decision::ChooseTwo { location } => (5, [*location as f32, 0.0, 0.0, 0.0], &[]),
        Decision::GameOver => (6, [0.0; 4], &[]),
    };
    obs[OFF_DECISION + slot] = 1.0;
    obs[OFF_DECISION_PARAMS..OFF_DECISION_PARAMS + 4].copy_from_slice(&params);
    for (i, &value) in dice.iter().take(4).enumerate() {
        obs[OFF_DICE + i] = value as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::resource::Resource;

    #[test]
    fn observation_has_fixed_length() {
        let game = Game::new(Some(17));
        assert_eq!(encode_observation(&game).len(), OBS_LEN);
    }

    #[test]
    fn player_block_reflects_state() {
        let mut game = Game::new(Some(17));
        let actor = game.current_player_idx;
        game.players[actor].wheat = 3;
        game.players[actor].gain_resource(Resource::Gold, 2);
        game.players[actor].paintings = vec![4, 4, 7];
        game.players[actor].multipliers = vec![(2, 3), (2, 1)];

        let obs = encode_observation(&game);
        assert_eq!(obs[OFF_SCALARS + 2], 3.0);
        assert_eq!(obs[OFF_RESOURCES + Resource::Gold.index()], 2.0);
        assert_eq!(obs[OFF_PAINTINGS + 3], 2.0);
        assert_eq!(obs[OFF_PAINTINGS + 6], 1.0);
        assert_eq!(obs[OFF_MULTIPLIERS + 1], 4.0);
    }

    #[test]
    fn occupancy_rotates_to_acting_player() {
        let mut game = Game::new(Some(17));
        let actor = game.current_player_idx;
        let other = (actor + 2) % 4;
        game.locations[4].place(actor, 2);
        game.locations[4].place(other, 3);

        let obs = encode_observation(&game);
        assert_eq!(obs[OFF_OCCUPANCY + 4 * 4], 2.0);
        assert_eq!(obs[OFF_OCCUPANCY + 4 * 4 + 2], 3.0);
    }

    #[test]
    fn decision_one_hot_tracks_the_automaton() {
        let game = Game::new(Some(17));
        let obs = encode_observation(&game);
        assert_eq!(obs[OFF_DECISION], 1.0);
        assert_eq!(obs[OFF_DECISION..OFF_DECISION + 7].iter().sum::<f32>(), 1.0);
    }
}
