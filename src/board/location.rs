//! Board locations and per-player occupancy.
//!
//! A location is one of five closed variants with a capacity and a
//! fixed-size per-player occupant array. The occupancy invariant
//! (`Σ occupants <= capacity`) is enforced by the mutators, never assumed.

use super::building::Building;
use super::card::Card;
use super::player::MAX_PLAYERS;
use super::resource::Resource;

/// The number of locations on the standard board.
pub const LOCATION_COUNT: usize = 16;

/// Board index of the first card slot.
pub const CARD_SLOT_BASE: usize = 8;

/// Board index of the first building slot.
pub const BUILDING_SLOT_BASE: usize = 12;

/// The number of card slots on the board.
pub const CARD_SLOTS: usize = 4;

/// The number of building slots on the board.
pub const BUILDING_SLOTS: usize = 4;

/// Board index of the worker-granting House utility.
pub const HOUSE_INDEX: usize = 1;

/// Workers required by the single House placement action.
pub const HOUSE_WORKERS: u8 = 2;

/// The three fixed utility locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityKind {
    /// Grants one wheat.
    Farm,
    /// Grants one worker; requires exactly two placed workers.
    House,
    /// Upgrades a persistent tool.
    ToolShop,
}

/// What a location is, as a closed sum over the five variants.
///
/// Card and building slots hold `None` after a purchase until the
/// round-end replenishment refills them (or fails to, ending the game).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKind {
    Utility(UtilityKind),
    Gathering(Resource),
    CardSlot(Option<Card>),
    BuildingSlot(Option<Building>),
}

/// A board location: its kind, capacity, and per-player worker counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub kind: LocationKind,
    pub capacity: u8,
    pub occupants: [u8; MAX_PLAYERS],
}

impl Location {
    pub fn utility(kind: UtilityKind, capacity: u8) -> Self {
        Location { kind: LocationKind::Utility(kind), capacity, occupants: [0; MAX_PLAYERS] }
    }

    pub fn gathering(resource: Resource, capacity: u8) -> Self {
        Location {
            kind: LocationKind::Gathering(resource),
            capacity,
            occupants: [0; MAX_PLAYERS],
        }
    }

    pub fn card_slot(card: Card) -> Self {
        Location { kind: LocationKind::CardSlot(Some(card)), capacity: 1, occupants: [0; MAX_PLAYERS] }
    }

    pub fn building_slot(building: Building) -> Self {
        Location {
            kind: LocationKind::BuildingSlot(Some(building)),
            capacity: 1,
            occupants: [0; MAX_PLAYERS],
        }
    }

    /// Total workers currently placed here across all players.
    pub fn occupied_total(&self) -> u8 {
        self.occupants.iter().sum()
    }

    /// Remaining worker capacity.
    pub fn available_space(&self) -> u8 {
        self.capacity - self.occupied_total()
    }

    /// Whether placement is possible at all: space remains and, for
    /// purchase slots, the slot is not empty.
    pub fn can_place(&self) -> bool {
        if self.available_space() == 0 {
            return false;
        }
        match &self.kind {
            LocationKind::CardSlot(card) => card.is_some(),
            LocationKind::BuildingSlot(building) => building.is_some(),
            _ => true,
        }
    }

    /// Places `count` workers for `player`. Returns false (without
    /// mutating) if the capacity would be exceeded.
    pub fn place(&mut self, player: usize, count: u8) -> bool {
        if count == 0 || self.occupied_total() + count > self.capacity {
            return false;
        }
        self.occupants[player] += count;
        true
    }

    /// Whether `player` has workers placed here.
    pub fn is_occupied_by(&self, player: usize) -> bool {
        self.occupants[player] > 0
    }

    /// Removes all of `player`'s workers from this location.
    pub fn clear_player(&mut self, player: usize) {
        self.occupants[player] = 0;
    }

    /// Removes every player's workers.
    pub fn clear_all(&mut self) {
        self.occupants = [0; MAX_PLAYERS];
    }
}
