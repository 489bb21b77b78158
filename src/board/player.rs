//! Player state and invariant-preserving mutators.
//!
//! Holds a player's workers, resource inventory, tools, wheat, victory
//! points, and the two ordered card-scoring collections. Fixed-size arrays
//! keep the state cheap to clone for rollouts.

use super::card::CardScoring;
use super::resource::{Resource, RESOURCE_COUNT};

/// The number of players in a game. The board layout assumes exactly four.
pub const MAX_PLAYERS: usize = 4;

/// The number of persistent tool slots per player.
pub const TOOL_SLOTS: usize = 4;

/// The maximum number of one-use tools a player can hold at once.
pub const MAX_ONE_USE_TOOLS: usize = 3;

/// Starting food for each player.
pub const STARTING_FOOD: u8 = 10;

/// Starting worker count for each player.
pub const STARTING_WORKERS: u8 = 5;

/// Victory point penalty for failing to feed all workers.
pub const STARVATION_PENALTY: i32 = 10;

/// A persistent tool slot: upgradeable value, usable once per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tool {
    pub value: u8,
    pub available: bool,
}

/// Complete state for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub total_workers: u8,
    pub available_workers: u8,
    pub wheat: u8,
    /// Victory points granted directly by card effects and penalties.
    pub vp: i32,
    /// Victory points accumulated from building purchases.
    pub vp_buildings: i32,
    /// Number of buildings purchased (feeds the per-building multiplier).
    pub buildings_owned: u8,
    /// Resource inventory indexed by `Resource::index()`.
    pub resources: [u8; RESOURCE_COUNT],
    pub tools: [Tool; TOOL_SLOTS],
    /// One-use tool values, consumed on use. At most three.
    pub one_use_tools: Vec<u8>,
    /// Painting symbols from purchased cards, in acquisition order.
    pub paintings: Vec<u8>,
    /// `(kind, amount)` multiplier pairs from purchased cards.
    pub multipliers: Vec<(u8, u8)>,
}

impl Player {
    /// Creates a player with the standard starting setup.
    pub fn new() -> Self {
        let mut resources = [0u8; RESOURCE_COUNT];
        resources[Resource::Food.index()] = STARTING_FOOD;
        Player {
            total_workers: STARTING_WORKERS,
            available_workers: STARTING_WORKERS,
            wheat: 0,
            vp: 0,
            vp_buildings: 0,
            buildings_owned: 0,
            resources,
            tools: [Tool { value: 0, available: true }; TOOL_SLOTS],
            one_use_tools: Vec::new(),
            paintings: Vec::new(),
            multipliers: Vec::new(),
        }
    }

    /// Returns the held count of a resource.
    pub fn resource(&self, r: Resource) -> u8 {
        self.resources[r.index()]
    }

    /// Adds `amount` of `r` to the inventory.
    pub fn gain_resource(&mut self, r: Resource, amount: u8) {
        self.resources[r.index()] = self.resources[r.index()].saturating_add(amount);
    }

    /// Removes `amount` of `r`. The mask generator guarantees the inventory
    /// covers the spend; a shortfall here is an engine bug.
    pub fn spend_resource(&mut self, r: Resource, amount: u8) {
        debug_assert!(
            self.resources[r.index()] >= amount,
            "overspend of {:?}: have {}, need {}",
            r,
            self.resources[r.index()],
            amount
        );
        self.resources[r.index()] = self.resources[r.index()].saturating_sub(amount);
    }

    /// Total non-food resource units held.
    pub fn spendable_total(&self) -> u32 {
        super::resource::SPEND_RESOURCES
            .iter()
            .map(|&r| self.resource(r) as u32)
            .sum()
    }

    pub fn gain_wheat(&mut self, amount: u8) {
        self.wheat = self.wheat.saturating_add(amount);
    }

    /// Grants a worker. It becomes available at the next round's refresh.
    pub fn gain_worker(&mut self, amount: u8) {
        self.total_workers = self.total_workers.saturating_add(amount);
    }

    /// Upgrades the lowest-valued persistent tool slot by one.
    pub fn upgrade_tool(&mut self) {
        let mut min_slot = 0;
        for i in 1..TOOL_SLOTS {
            if self.tools[i].value < self.tools[min_slot].value {
                min_slot = i;
            }
        }
        self.tools[min_slot].value += 1;
    }

    /// Adds a one-use tool. Acquisitions past the cap are dropped.
    pub fn gain_one_use_tool(&mut self, value: u8) {
        if self.one_use_tools.len() < MAX_ONE_USE_TOOLS {
            self.one_use_tools.push(value);
        }
    }

    /// Records a purchased card's end-game scoring.
    pub fn add_card_scoring(&mut self, scoring: CardScoring) {
        match scoring {
            CardScoring::Painting(symbol) => self.paintings.push(symbol),
            CardScoring::Multiplier { kind, amount } => self.multipliers.push((kind, amount)),
        }
    }

    /// Total value across the four persistent tool slots.
    pub fn tool_value_total(&self) -> u32 {
        self.tools.iter().map(|t| t.value as u32).sum()
    }

    /// Refreshes the player for a new round: all workers available, all
    /// persistent tools usable again. One-use tools persist until spent.
    pub fn refresh_round(&mut self) {
        self.available_workers = self.total_workers;
        for tool in self.tools.iter_mut() {
            tool.available = true;
        }
    }

    /// End-of-round feeding. Wheat substitutes for food one-for-one; a
    /// shortfall costs [`STARVATION_PENALTY`] VP and all remaining food.
    /// Returns true if the player starved.
    pub fn feed(&mut self) -> bool {
        let need = self.total_workers.saturating_sub(self.wheat);
        let food = self.resources[Resource::Food.index()];
        if food >= need {
            self.resources[Resource::Food.index()] = food - need;
            false
        } else {
            self.vp -= STARVATION_PENALTY;
            self.resources[Resource::Food.index()] = 0;
            true
        }
    }

    /// Victory points from painting sets: repeatedly form a set of distinct
    /// symbols from the collection; each set scores the square of its size.
    fn painting_score(&self) -> i32 {
        let mut counts: Vec<u32> = Vec::new();
        let mut symbols: Vec<u8> = Vec::new();
        for &p in &self.paintings {
            match symbols.iter().position(|&s| s == p) {
                Some(i) => counts[i] += 1,
                None => {
                    symbols.push(p);
                    counts.push(1);
                }
            }
        }
        let mut score = 0i32;
        while counts.iter().any(|&c| c > 0) {
            let set_size = counts.iter().filter(|&&c| c > 0).count() as i32;
            score += set_size * set_size;
            for c in counts.iter_mut() {
                *c = c.saturating_sub(1);
            }
        }
        score
    }

    /// Victory points from multiplier cards. Kinds: 1 per total tool value,
    /// 2 per building owned, 3 per worker, 4 per wheat.
    fn multiplier_score(&self) -> i32 {
        self.multipliers
            .iter()
            .map(|&(kind, amount)| {
                let stat = match kind {
                    1 => self.tool_value_total() as i32,
                    2 => self.buildings_owned as i32,
                    3 => self.total_workers as i32,
                    4 => self.wheat as i32,
                    _ => 0,
                };
                stat * amount as i32
            })
            .sum()
    }

    /// Total end-game score.
    pub fn score(&self) -> i32 {
        self.vp + self.vp_buildings + self.painting_score() + self.multiplier_score()
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starting_setup() {
        let p = Player::new();
        assert_eq!(p.resource(Resource::Food), STARTING_FOOD);
        assert_eq!(p.resource(Resource::Wood), 0);
        assert_eq!(p.total_workers, STARTING_WORKERS);
        assert_eq!(p.available_workers, STARTING_WORKERS);
        assert!(p.tools.iter().all(|t| t.value == 0 && t.available));
    }

    #[test]
    fn feeding_pays_food() {
        let mut p = Player::new();
        p.resources[Resource::Food.index()] = 7;
        p.wheat = 0;
        p.total_workers = 5;
        assert!(!p.feed());
        assert_eq!(p.resource(Resource::Food), 2);
        assert_eq!(p.vp, 0);
    }

    #[test]
    fn feeding_shortfall_penalizes() {
        let mut p = Player::new();
        p.resources[Resource::Food.index()] = 2;
        p.wheat = 0;
        p.total_workers = 5;
        assert!(p.feed());
        assert_eq!(p.resource(Resource::Food), 0);
        assert_eq!(p.vp, -STARVATION_PENALTY);
    }

    #[test]
    fn wheat_reduces_food_need() {
        let mut p = Player::new();
        p.resources[Resource::Food.index()] = 3;
        p.wheat = 2;
        p.total_workers = 5;
        assert!(!p.feed());
        assert_eq!(p.resource(Resource::Food), 0);
    }

    #[test]
    fn wheat_exceeding_workers_needs_no_food() {
        let mut p = Player::new();
        p.resources[Resource::Food.index()] = 1;
        p.wheat = 6;
        p.total_workers = 5;
        assert!(!p.feed());
        assert_eq!(p.resource(Resource::Food), 1);
    }

    #[test]
    fn upgrade_tool_picks_lowest_slot() {
        let mut p = Player::new();
        p.upgrade_tool();
        assert_eq!(p.tools[0].value, 1);
        p.upgrade_tool();
        assert_eq!(p.tools[1].value, 1);
        p.tools[1].value = 3;
        p.upgrade_tool();
        // Slots 2 and 3 are still 0; slot 2 is the first minimum.
        assert_eq!(p.tools[2].value, 1);
    }

    #[test]
    fn one_use_tools_cap_at_three() {
        let mut p = Player::new();
        for v in [4, 3, 2, 1] {
            p.gain_one_use_tool(v);
        }
        assert_eq!(p.one_use_tools, vec![4, 3, 2]);
    }

    #[test]
    fn refresh_restores_workers_and_tools() {
        let mut p = Player::new();
        p.available_workers = 0;
        p.tools[0].available = false;
        p.gain_worker(1);
        p.refresh_round();
        assert_eq!(p.available_workers, 6);
        assert!(p.tools[0].available);
    }

    #[test]
    fn painting_sets_score_squared() {
        let mut p = Player::new();
        // Two full symbols and one single: sets {1,2}, {1} -> 4 + 1.
        p.paintings = vec![1, 2, 1];
        assert_eq!(p.score(), 5);
    }

    #[test]
    fn multiplier_scoring_uses_stats() {
        let mut p = Player::new();
        p.tools[0].value = 2;
        p.tools[1].value = 1;
        p.buildings_owned = 3;
        p.wheat = 4;
        p.multipliers = vec![(1, 2), (2, 1), (3, 1), (4, 2)];
        // 3 tool value * 2 + 3 buildings * 1 + 5 workers * 1 + 4 wheat * 2.
        assert_eq!(p.score(), 6 + 3 + 5 + 8);
    }

    #[test]
    fn spendable_total_excludes_food() {
        let mut p = Player::new();
        p.gain_resource(Resource::Wood, 2);
        p.gain_resource(Resource::Gold, 1);
        assert_eq!(p.spendable_total(), 3);
    }
}
