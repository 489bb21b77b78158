//! Round-end bookkeeping: feeding, refresh, replenishment, rotation, and
//! the two termination conditions.

use crate::board::card::Card;
use crate::board::location::{
    LocationKind, BUILDING_SLOTS, BUILDING_SLOT_BASE, CARD_SLOTS, CARD_SLOT_BASE,
};
use crate::board::player::MAX_PLAYERS;

use super::{Decision, Game, TurnPhase, ROUND_CAP};

/// Runs the full end-of-round sequence and either opens the next round's
/// placement phase or terminates the game.
pub(crate) fn end_round(game: &mut Game) {
    for player in game.players.iter_mut() {
        player.feed();
        player.refresh_round();
    }
    for location in game.locations.iter_mut() {
        location.clear_all();
    }
    replenish_cards(game);
    replenish_buildings(game);
    game.first_player = (game.first_player + 1) % MAX_PLAYERS;

    if game.round >= ROUND_CAP || board_starved(game) {
        game.phase = TurnPhase::Over;
        game.decision = Decision::GameOver;
        return;
    }

    game.round += 1;
    game.phase = TurnPhase::Placement;
    game.current_player_idx = game.first_player;
    game.decision = Decision::Placement;
}

/// Surviving cards shift to the lowest-index slots; the deck fills the
/// rest in order.
fn replenish_cards(game: &mut Game) {
    let mut survivors: Vec<Card> = Vec::new();
    for i in 0..CARD_SLOTS {
        if let LocationKind::CardSlot(slot) = &mut game.locations[CARD_SLOT_BASE + i].kind {
            if let Some(card) = slot.take() {
                survivors.push(card);
            }
        }
    }
    let mut refill = survivors.into_iter();
    for i in 0..CARD_SLOTS {
        let card = refill.next().or_else(|| game.draw_card());
        if let LocationKind::CardSlot(slot) = &mut game.locations[CARD_SLOT_BASE + i].kind {
            *slot = card;
        }
    }
}

/// Each empty building slot refills from its own per-slot stack.
fn replenish_buildings(game: &mut Game) {
    for i in 0..BUILDING_SLOTS {
        if let LocationKind::BuildingSlot(slot) = &mut game.locations[BUILDING_SLOT_BASE + i].kind
        {
            if slot.is_none() && !game.building_decks[i].is_empty() {
                *slot = Some(game.building_decks[i].remove(0));
            }
        }
    }
}

/// The game ends when any card or building slot cannot be refilled.
fn board_starved(game: &Game) -> bool {
    game.locations.iter().any(|loc| {
        matches!(
            loc.kind,
            LocationKind::CardSlot(None) | LocationKind::BuildingSlot(None)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::building::Building;
    use crate::board::player::STARTING_WORKERS;
    use crate::board::resource::Resource;

    #[test]
    fn end_round_feeds_refreshes_and_rotates() {
        let mut game = Game::new(Some(21));
        let first = game.first_player;
        game.players[0].available_workers = 0;
        game.players[0].tools[0].value = 2;
        game.players[0].tools[0].available = false;
        game.locations[4].place(2, 3);
        let wheat = game.players[0].wheat;
        let food = game.players[0].resource(Resource::Food);

        end_round(&mut game);

        // Fed five workers against wheat, then refreshed.
        let need = (STARTING_WORKERS - wheat).max(0);
        assert_eq!(game.players[0].resource(Resource::Food), food - need);
        assert_eq!(game.players[0].available_workers, STARTING_WORKERS);
        assert!(game.players[0].tools[0].available);
        assert_eq!(game.locations[4].occupied_total(), 0);
        assert_eq!(game.first_player, (first + 1) % MAX_PLAYERS);
        assert_eq!(game.round, 2);
        assert_eq!(game.decision, Decision::Placement);
        assert_eq!(game.current_player_idx, game.first_player);
    }

    #[test]
    fn cards_shift_left_before_deck_refill() {
        let mut game = Game::new(Some(21));
        // Empty the first and third slots, as if those cards were bought.
        for &i in &[0, 2] {
            if let LocationKind::CardSlot(slot) = &mut game.locations[CARD_SLOT_BASE + i].kind {
                *slot = None;
            }
        }
        let survivor_a = match &game.locations[CARD_SLOT_BASE + 1].kind {
            LocationKind::CardSlot(Some(card)) => card.clone(),
            other => panic!("expected a card, got {:?}", other),
        };
        let survivor_b = match &game.locations[CARD_SLOT_BASE + 3].kind {
            LocationKind::CardSlot(Some(card)) => card.clone(),
            other => panic!("expected a card, got {:?}", other),
        };
        let deck_before = game.card_deck.len();

        end_round(&mut game);

        // Survivors compacted to the front; two fresh cards behind them.
        assert_eq!(
            game.locations[CARD_SLOT_BASE].kind,
            LocationKind::CardSlot(Some(survivor_a))
        );
        assert_eq!(
            game.locations[CARD_SLOT_BASE + 1].kind,
            LocationKind::CardSlot(Some(survivor_b))
        );
        assert_eq!(game.card_deck.len(), deck_before - 2);
        for i in 0..CARD_SLOTS {
            assert!(matches!(
                game.locations[CARD_SLOT_BASE + i].kind,
                LocationKind::CardSlot(Some(_))
            ));
        }
    }

    #[test]
    fn building_slots_refill_from_their_own_stack() {
        let mut game = Game::new(Some(21));
        let next: Building = game.building_decks[1][0].clone();
        if let LocationKind::BuildingSlot(slot) = &mut game.locations[BUILDING_SLOT_BASE + 1].kind
        {
            *slot = None;
        }
        let stack_before = game.building_decks[1].len();

        end_round(&mut game);

        assert_eq!(
            game.locations[BUILDING_SLOT_BASE + 1].kind,
            LocationKind::BuildingSlot(Some(next))
        );
        assert_eq!(game.building_decks[1].len(), stack_before - 1);
    }

    #[test]
    fn round_cap_terminates() {
        let mut game = Game::new(Some(21));
        game.round = ROUND_CAP;
        end_round(&mut game);
        assert!(game.is_over());
        assert_eq!(game.decision, Decision::GameOver);
    }

    #[test]
    fn unfillable_card_slot_terminates() {
        let mut game = Game::new(Some(21));
        game.card_deck.clear();
        if let LocationKind::CardSlot(slot) = &mut game.locations[CARD_SLOT_BASE].kind {
            *slot = None;
        }
        end_round(&mut game);
        assert!(game.is_over());
    }

    #[test]
    fn starvation_costs_ten_points() {
        let mut game = Game::new(Some(21));
        game.players[0].wheat = 0;
        game.players[0].resources = [3, 0, 0, 0, 0];
        let score = game.players[0].score();
        end_round(&mut game);
        // The remaining food is forfeited and the penalty applied.
        assert_eq!(game.players[0].resource(Resource::Food), 0);
        assert_eq!(game.players[0].score(), score - 10);
    }
}
