//! The turn resolution automaton.
//!
//! `Game` walks a round through placement, per-player location resolution,
//! and round-end replenishment, suspending on every state transition that
//! needs an external decision. A suspension is just a return from
//! [`Game::step`] with an updated [`Decision`]; the caller resumes by
//! calling `step` again with the next action index. Nothing progresses
//! between calls.

pub mod resolve;
pub mod round;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::actions::mask::{can_place_anywhere, legal_mask};
use crate::actions::{Action, ActionSpace, TOOL_FLAG_COUNT};
use crate::board::building::Building;
use crate::board::card::Card;
use crate::board::decks::{create_building_decks, create_card_deck, standard_locations};
use crate::board::location::{Location, BUILDING_SLOTS};
use crate::board::player::{Player, MAX_PLAYERS, TOOL_SLOTS};
use crate::board::resource::Resource;

/// Maximum number of rounds before forced termination.
pub const ROUND_CAP: u32 = 50;

/// Errors returned by [`Game::step`]. The state is never mutated on error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("action index {0} is outside the compiled action space")]
    OutOfRange(usize),

    #[error("action index {0} is not legal for the current decision")]
    IllegalAction(usize),

    #[error("the game is over; reset before stepping again")]
    GameOver,
}

/// Result of a successful step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Score delta for the player who acted.
    pub reward: f32,
    /// Whether the game ended during this step.
    pub done: bool,
    /// The acting player's current total score.
    pub score: f32,
}

/// The pending payment shape for a ResourceSpend decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendRequest {
    /// Card payment: exactly `total` units, any mix of types.
    AnyMix { total: u8 },
    /// Flex building: `total` units across exactly `variety` distinct types.
    ExactVariety { total: u8, variety: u8 },
    /// Open-ended building: one to seven units, any mix.
    Open,
}

/// The decision the automaton is currently suspended on, with its pending
/// data. Overwritten on every step; never carries stale cross-round state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The current player must place workers.
    Placement,
    /// A dice sum is waiting for the tool decision before the yield is
    /// computed. `from_card` distinguishes the gather-with-dice card from
    /// an ordinary gathering location.
    ToolSelect { location: usize, resource: Resource, dice_sum: u8, from_card: bool },
    /// The current player may buy the card or building at `location`.
    BuyOrSkip { location: usize },
    /// The current player must pick the resources paying for `location`.
    ResourceSpend { location: usize, request: SpendRequest },
    /// Each player in turn picks one die from the remaining rolls.
    DiceChoice { location: usize, rolls: Vec<u8>, remaining: u8 },
    /// The current player picks two resources to gain.
    ChooseTwo { location: usize },
    /// Terminal marker; stepping returns an error.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnPhase {
    Placement,
    Resolution,
    Over,
}

/// Scan position within the resolution phase.
#[derive(Debug, Clone, Copy)]
struct ResolveCursor {
    /// The player whose locations are being resolved.
    player: usize,
    /// Next board index to examine for this player.
    location: usize,
    /// How many players have been fully resolved this round.
    resolved: u8,
}

/// Complete game state plus the compiled action space and seeded RNG.
pub struct Game {
    pub players: [Player; MAX_PLAYERS],
    /// Board locations in fixed board order.
    pub locations: Vec<Location>,
    /// Current round, starting at 1.
    pub round: u32,
    pub current_player_idx: usize,
    /// Rotates by one each round.
    pub first_player: usize,
    pub card_deck: Vec<Card>,
    pub building_decks: [Vec<Building>; BUILDING_SLOTS],
    pub decision: Decision,
    space: ActionSpace,
    rng: SmallRng,
    phase: TurnPhase,
    cursor: ResolveCursor,
}

impl Game {
    /// Creates and resets a new game. `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let locations = standard_locations();
        let space = ActionSpace::new(&locations);
        let mut game = Game {
            players: std::array::from_fn(|_| Player::new()),
            locations,
            round: 1,
            current_player_idx: 0,
            first_player: 0,
            card_deck: Vec::new(),
            building_decks: create_building_decks(),
            decision: Decision::Placement,
            space,
            rng: SmallRng::seed_from_u64(0),
            phase: TurnPhase::Placement,
            cursor: ResolveCursor { player: 0, location: 0, resolved: 0 },
        };
        game.reset(seed);
        game
    }

    /// Reinitializes players, board, and decks for a fresh game.
    /// The compiled action space is unchanged: the board shape is fixed.
    pub fn reset(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        self.players = std::array::from_fn(|_| Player::new());
        self.locations = standard_locations();
        self.card_deck = create_card_deck(&mut self.rng);
        self.building_decks = create_building_decks();
        self.round = 1;
        self.first_player = self.rng.gen_range(0..MAX_PLAYERS);
        self.current_player_idx = self.first_player;
        self.phase = TurnPhase::Placement;
        self.cursor = ResolveCursor { player: self.first_player, location: 0, resolved: 0 };
        self.decision = Decision::Placement;
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player_idx]
    }

    /// The compiled action space for this board.
    pub fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    /// The total number of compiled actions.
    pub fn num_actions(&self) -> usize {
        self.space.len()
    }

    /// The legal-action mask for the current decision.
    pub fn legal_action_mask(&self) -> Vec<bool> {
        legal_mask(&self.space, self)
    }

    /// The fixed-length observation vector for the acting player.
    pub fn observation(&self) -> Vec<f32> {
        crate::nn::encode_observation(self)
    }

    /// Whether the game has reached its terminal state.
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::Over
    }

    /// Final (or current) total score for each player.
    pub fn scores(&self) -> [i32; MAX_PLAYERS] {
        std::array::from_fn(|i| self.players[i].score())
    }

    /// Applies one action. Rejects anything outside the current legal mask
    /// without touching state; on success the automaton runs forward until
    /// the next decision point or the end of the game.
    pub fn step(&mut self, action_index: usize) -> Result<StepOutcome, StepError> {
        if matches!(self.decision, Decision::GameOver) {
            return Err(StepError::GameOver);
        }
        let action = self
            .space
            .action(action_index)
            .ok_or(StepError::OutOfRange(action_index))?;
        let mask = legal_mask(&self.space, self);
        if !mask[action_index] {
            return Err(StepError::IllegalAction(action_index));
        }

        let actor = self.current_player_idx;
        let before = self.players[actor].score();
        self.apply(action);
        let after = self.players[actor].score();

        Ok(StepOutcome {
            reward: (after - before) as f32,
            done: matches!(self.decision, Decision::GameOver),
            score: after as f32,
        })
    }

    /// Dispatches a mask-validated action against the current decision.
    fn apply(&mut self, action: Action) {
        match (self.decision.clone(), action) {
            (Decision::Placement, Action::Placement { location, workers }) => {
                let placed = self.locations[location as usize].place(self.current_player_idx, workers);
                debug_assert!(placed, "mask allowed an over-capacity placement");
                self.current_player_mut().available_workers -= workers;
                self.advance_placement();
            }
            (
                Decision::ToolSelect { location, resource, dice_sum, from_card },
                Action::ToolSelect { flags },
            ) => {
                let bonus = self.consume_tools(&flags);
                resolve::credit_gather(self, location, resource, dice_sum, bonus, from_card);
            }
            (Decision::BuyOrSkip { location }, Action::BuyOrSkip { buy }) => {
                resolve::handle_buy_or_skip(self, location, buy);
            }
            (Decision::ResourceSpend { location, .. }, Action::ResourceSpend { wood, stone, clay, gold }) => {
                resolve::handle_spend(self, location, [wood, stone, clay, gold]);
            }
            (Decision::DiceChoice { location, rolls, remaining }, Action::DiceChoice { value }) => {
                resolve::handle_dice_choice(self, location, rolls, remaining, value);
            }
            (Decision::ChooseTwo { .. }, Action::ChooseTwo { first, second }) => {
                let player = self.current_player_mut();
                player.gain_resource(first, 1);
                player.gain_resource(second, 1);
                self.advance_resolution();
            }
            (decision, action) => {
                unreachable!("mask allowed {:?} during {:?}", action, decision)
            }
        }
    }

    /// Spends the flagged tools and returns the total bonus value.
    fn consume_tools(&mut self, flags: &[bool; TOOL_FLAG_COUNT]) -> u32 {
        let player = &mut self.players[self.current_player_idx];
        let mut bonus = 0u32;
        for i in 0..TOOL_SLOTS {
            if flags[i] {
                bonus += player.tools[i].value as u32;
                player.tools[i].available = false;
            }
        }
        // Back to front so removals keep earlier indices valid.
        for j in (0..player.one_use_tools.len()).rev() {
            if flags[TOOL_SLOTS + j] {
                bonus += player.one_use_tools.remove(j) as u32;
            }
        }
        bonus
    }

    /// Hands the placement turn to the next player who can still place;
    /// starts resolution when nobody can.
    fn advance_placement(&mut self) {
        for offset in 1..=MAX_PLAYERS {
            let idx = (self.current_player_idx + offset) % MAX_PLAYERS;
            if can_place_anywhere(&self.locations, &self.players[idx]) {
                self.current_player_idx = idx;
                self.decision = Decision::Placement;
                return;
            }
        }
        self.begin_resolution();
    }

    fn begin_resolution(&mut self) {
        self.phase = TurnPhase::Resolution;
        self.cursor = ResolveCursor { player: self.first_player, location: 0, resolved: 0 };
        self.current_player_idx = self.first_player;
        self.advance_resolution();
    }

    /// Scans occupied locations in board order for the player under the
    /// cursor, applying immediate effects and suspending when a location
    /// needs a decision. Crosses player and round boundaries automatically.
    pub(crate) fn advance_resolution(&mut self) {
        loop {
            if self.cursor.location >= self.locations.len() {
                self.cursor.resolved += 1;
                if self.cursor.resolved as usize >= MAX_PLAYERS {
                    round::end_round(self);
                    return;
                }
                self.cursor.player = (self.cursor.player + 1) % MAX_PLAYERS;
                self.cursor.location = 0;
                self.current_player_idx = self.cursor.player;
                continue;
            }
            let loc = self.cursor.location;
            if !self.locations[loc].is_occupied_by(self.cursor.player) {
                self.cursor.location += 1;
                continue;
            }
            // Pre-advance so a resumed decision continues past this location.
            self.cursor.location += 1;
            if resolve::visit_location(self, loc) {
                return;
            }
        }
    }

    /// The player whose locations are being resolved. During a dice-roll
    /// card's choice loop `current_player_idx` walks the table; this stays
    /// on the buyer.
    pub(crate) fn resolving_player(&self) -> usize {
        self.cursor.player
    }

    pub(crate) fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    pub(crate) fn roll_dice_sum(&mut self, count: u32) -> u8 {
        let mut sum = 0u8;
        for _ in 0..count {
            sum += self.roll_die();
        }
        sum
    }

    /// Draws the top card of the deck, or `None` once it is exhausted.
    pub(crate) fn draw_card(&mut self) -> Option<Card> {
        if self.card_deck.is_empty() {
            None
        } else {
            Some(self.card_deck.remove(0))
        }
    }
}
