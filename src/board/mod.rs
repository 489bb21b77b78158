//! Board representation and game-state types.
//!
//! Contains the core data structures for resources, players, cards,
//! buildings, locations, and the official deck content.

pub mod building;
pub mod card;
pub mod decks;
pub mod location;
pub mod player;
pub mod resource;

pub use building::{Building, FLEX_OPEN_COUNT};
pub use card::{Card, CardEffect, CardScoring};
pub use decks::{
    create_building_decks, create_card_deck, standard_locations, starting_buildings,
    starting_cards, FOOD_CAPACITY, GATHERING_CAPACITY,
};
pub use location::{
    Location, LocationKind, UtilityKind, BUILDING_SLOTS, BUILDING_SLOT_BASE, CARD_SLOTS,
    CARD_SLOT_BASE, HOUSE_INDEX, HOUSE_WORKERS, LOCATION_COUNT,
};
pub use player::{
    Player, Tool, MAX_ONE_USE_TOOLS, MAX_PLAYERS, STARTING_FOOD, STARTING_WORKERS,
    STARVATION_PENALTY, TOOL_SLOTS,
};
pub use resource::{
    Resource, ALL_RESOURCES, RESOURCE_COUNT, SPEND_RESOURCES, SPEND_RESOURCE_COUNT,
};
