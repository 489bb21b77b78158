//! Official board content: the civilization card deck, the four building
//! deck stacks, and the starting board layout.
//!
//! Content mirrors the published game. Multiplier cards are encoded as
//! `(kind, amount)` pairs: kind 1 scores per total tool value, 2 per
//! building owned, 3 per worker, 4 per wheat.

use rand::seq::SliceRandom;
use rand::Rng;

use super::building::{Building, FLEX_OPEN_COUNT};
use super::card::{Card, CardEffect, CardScoring};
use super::location::{Location, UtilityKind, BUILDING_SLOTS};
use super::resource::Resource;

/// Worker capacity of the food gathering area.
pub const FOOD_CAPACITY: u8 = 40;

/// Worker capacity of each non-food gathering area.
pub const GATHERING_CAPACITY: u8 = 7;

fn painting(symbol: u8) -> CardScoring {
    CardScoring::Painting(symbol)
}

fn multiplier(kind: u8, amount: u8) -> CardScoring {
    CardScoring::Multiplier { kind, amount }
}

fn add_resource(cost: u8, resource: Resource, amount: u8, scoring: CardScoring) -> Card {
    Card::new(cost, CardEffect::AddResource { resource, amount }, scoring)
}

fn certain(cost: &[Resource]) -> Building {
    Building::Certain { cost: cost.to_vec() }
}

fn flex(count: u8, variety: u8) -> Building {
    Building::Flex { count, variety }
}

/// Creates the shuffled civilization card deck.
pub fn create_card_deck(rng: &mut impl Rng) -> Vec<Card> {
    use CardEffect::*;
    use Resource::*;

    let mut cards = vec![
        // Dice roll cards: every player picks one die.
        Card::new(0, DiceRoll, multiplier(3, 2)),
        Card::new(0, DiceRoll, multiplier(2, 1)),
        Card::new(0, DiceRoll, multiplier(2, 2)),
        Card::new(0, DiceRoll, multiplier(4, 1)),
        Card::new(0, DiceRoll, multiplier(4, 2)),
        Card::new(0, DiceRoll, painting(1)),
        Card::new(0, DiceRoll, painting(8)),
        Card::new(0, DiceRoll, painting(2)),
        Card::new(0, DiceRoll, painting(3)),
        // Food cards.
        add_resource(1, Food, 7, painting(2)),
        add_resource(1, Food, 2, multiplier(2, 2)),
        add_resource(2, Food, 4, multiplier(2, 1)),
        add_resource(2, Food, 5, painting(4)),
        add_resource(3, Food, 3, painting(5)),
        add_resource(3, Food, 1, painting(5)),
        add_resource(4, Food, 3, multiplier(4, 2)),
        // Resource cards.
        add_resource(1, Stone, 1, multiplier(4, 1)),
        add_resource(2, Stone, 2, painting(1)),
        add_resource(2, Stone, 1, multiplier(3, 1)),
        add_resource(3, Gold, 1, multiplier(3, 1)),
        add_resource(3, Clay, 1, multiplier(3, 2)),
        // Gather-with-dice cards.
        Card::new(2, ResourcesWithDice { resource: Gold }, painting(6)),
        Card::new(3, ResourcesWithDice { resource: Wood }, multiplier(3, 2)),
        Card::new(3, ResourcesWithDice { resource: Stone }, multiplier(3, 1)),
        // Victory point cards.
        Card::new(2, AddVp(3), multiplier(2, 3)),
        Card::new(3, AddVp(3), painting(7)),
        Card::new(4, AddVp(3), painting(7)),
        // Tool card.
        Card::new(2, AddTool, painting(6)),
        // Wheat cards.
        Card::new(2, AddWheat, multiplier(4, 1)),
        Card::new(3, AddWheat, painting(8)),
        // Draw card.
        Card::new(3, DrawCard, painting(3)),
        // One-use tool cards.
        Card::new(1, OneUseTool(4), multiplier(1, 1)),
        Card::new(2, OneUseTool(3), multiplier(1, 1)),
        Card::new(3, OneUseTool(2), multiplier(1, 2)),
        // Any-two-resources card.
        Card::new(2, AnyTwoResources, painting(4)),
    ];
    cards.shuffle(rng);
    cards
}

/// Creates the four building deck stacks, one per building slot.
pub fn create_building_decks() -> [Vec<Building>; BUILDING_SLOTS] {
    use Resource::*;
    [
        vec![
            certain(&[Wood, Wood, Clay]),
            certain(&[Wood, Wood, Stone]),
            certain(&[Wood, Clay, Clay]),
            certain(&[Wood, Clay, Stone]),
            certain(&[Wood, Clay, Gold]),
            flex(4, 2),
        ],
        vec![
            certain(&[Wood, Wood, Gold]),
            certain(&[Wood, Stone, Stone]),
            certain(&[Clay, Clay, Stone]),
            certain(&[Wood, Stone, Gold]),
            certain(&[Clay, Stone, Gold]),
            flex(4, 3),
            flex(4, 4),
        ],
        vec![
            certain(&[Clay, Clay, Gold]),
            certain(&[Clay, Stone, Stone]),
            certain(&[Stone, Stone, Gold]),
            flex(5, 1),
            flex(5, 2),
            flex(5, 4),
        ],
        vec![
            flex(5, 3),
            flex(FLEX_OPEN_COUNT, 0),
            flex(4, 1),
            certain(&[Stone, Clay, Gold]),
            certain(&[Wood, Stone, Gold]),
        ],
    ]
}

/// The four cards on the board at game start.
pub fn starting_cards() -> [Card; 4] {
    use Resource::*;
    [
        add_resource(1, Food, 5, painting(1)),
        add_resource(2, Food, 4, painting(1)),
        Card::new(3, CardEffect::DiceRoll, painting(1)),
        Card::new(4, CardEffect::AddTool, painting(2)),
    ]
}

/// The four buildings on the board at game start.
pub fn starting_buildings() -> [Building; 4] {
    use Resource::*;
    [
        certain(&[Wood, Wood, Clay]),
        flex(4, 2),
        certain(&[Wood, Stone, Clay]),
        certain(&[Stone, Clay, Gold]),
    ]
}

/// Builds the standard 16-location board in fixed board order:
/// three utilities, five gathering areas, four card slots, four
/// building slots.
pub fn standard_locations() -> Vec<Location> {
    let mut locations = vec![
        Location::utility(UtilityKind::Farm, 1),
        Location::utility(UtilityKind::House, 2),
        Location::utility(UtilityKind::ToolShop, 1),
        Location::gathering(Resource::Food, FOOD_CAPACITY),
        Location::gathering(Resource::Wood, GATHERING_CAPACITY),
        Location::gathering(Resource::Stone, GATHERING_CAPACITY),
        Location::gathering(Resource::Clay, GATHERING_CAPACITY),
        Location::gathering(Resource::Gold, GATHERING_CAPACITY),
    ];
    for card in starting_cards() {
        locations.push(Location::card_slot(card));
    }
    for building in starting_buildings() {
        locations.push(Location::building_slot(building));
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::location::{
        LocationKind, BUILDING_SLOT_BASE, CARD_SLOT_BASE, LOCATION_COUNT,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn board_has_sixteen_locations_in_order() {
        let locations = standard_locations();
        assert_eq!(locations.len(), LOCATION_COUNT);
        for (i, loc) in locations.iter().enumerate() {
            match &loc.kind {
                LocationKind::Utility(_) => assert!(i < 3),
                LocationKind::Gathering(_) => assert!((3..CARD_SLOT_BASE).contains(&i)),
                LocationKind::CardSlot(_) => {
                    assert!((CARD_SLOT_BASE..BUILDING_SLOT_BASE).contains(&i))
                }
                LocationKind::BuildingSlot(_) => assert!(i >= BUILDING_SLOT_BASE),
            }
        }
    }

    #[test]
    fn card_deck_is_shuffled_but_stable_per_seed() {
        let deck1 = create_card_deck(&mut StdRng::seed_from_u64(7));
        let deck2 = create_card_deck(&mut StdRng::seed_from_u64(7));
        let deck3 = create_card_deck(&mut StdRng::seed_from_u64(8));
        assert_eq!(deck1, deck2);
        assert_ne!(deck1, deck3);
        assert_eq!(deck1.len(), 35);
    }

    #[test]
    fn building_decks_cover_all_slots() {
        let decks = create_building_decks();
        assert_eq!(decks.len(), BUILDING_SLOTS);
        assert!(decks.iter().all(|d| !d.is_empty()));
    }

    #[test]
    fn certain_buildings_cost_three_resources() {
        for deck in create_building_decks() {
            for building in deck {
                if let Building::Certain { cost } = building {
                    assert_eq!(cost.len(), 3);
                }
            }
        }
    }
}
