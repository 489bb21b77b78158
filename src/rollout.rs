//! Random-policy rollout generation for training data.
//!
//! Plays full games by sampling uniformly from the legal-action mask at
//! every decision point. Records the acting player, action index, and
//! reward per step, plus final scores, for reinforcement learning.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::player::MAX_PLAYERS;
use crate::game::Game;

/// Configuration for rollout generation.
#[derive(Clone)]
pub struct RolloutConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Safety valve on steps per game; games never reach it in practice.
    pub max_steps: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        RolloutConfig { num_games: 10, max_steps: 20_000, threads: 4, seed: 0, quiet: false }
    }
}

/// One decision taken during a rollout.
#[derive(Clone, Serialize)]
pub struct StepRecord {
    /// The player who acted.
    pub player: usize,
    /// Index into the compiled action space.
    pub action: usize,
    /// Score delta for the acting player.
    pub reward: f32,
}

/// A complete rollout game record.
#[derive(Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// All steps in order.
    pub steps: Vec<StepRecord>,
    /// Rounds played before termination.
    pub rounds: u32,
    /// Final total score per player.
    pub scores: [i32; MAX_PLAYERS],
    /// The highest-scoring player; ties go to the lowest index.
    pub winner: usize,
}

/// Plays a single game with uniform random legal actions.
pub fn play_game(config: &RolloutConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = Game::new(Some(rng.gen()));
    let mut steps: Vec<StepRecord> = Vec::new();

    while !game.is_over() && steps.len() < config.max_steps {
        let mask = game.legal_action_mask();
        let legal: Vec<usize> =
            mask.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i).collect();
        debug_assert!(!legal.is_empty(), "no legal action while the game is live");
        let action = legal[rng.gen_range(0..legal.len())];
        let player = game.current_player_idx;
        match game.step(action) {
            Ok(outcome) => steps.push(StepRecord { player, action, reward: outcome.reward }),
            Err(err) => {
                // The mask guarantees legality; surface a desync loudly.
                panic!("masked action {} rejected: {}", action, err);
            }
        }
    }

    let scores = game.scores();
    let winner = scores
        .iter()
        .enumerate()
        .max_by_key(|&(i, &s)| (s, std::cmp::Reverse(i)))
        .map(|(i, _)| i)
        .unwrap_or(0);

    GameRecord { game_id, steps, rounds: game.round, scores, winner }
}

/// Runs rollout generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_rollouts(config: &RolloutConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_rollouts_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs rollout generation, calling `on_game` with each completed record.
///
/// This allows the caller to process games incrementally (e.g. write to
/// disk) rather than waiting for all games to finish.
pub fn run_rollouts_with_callback<F>(config: &RolloutConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_rollouts_parallel(config, on_game);
    } else {
        run_rollouts_sequential(config, on_game);
    }
}

fn run_rollouts_sequential<F>(config: &RolloutConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            let elapsed = game_start.elapsed().as_secs_f64();
            eprintln!(
                "Game {}/{}: player {} wins {:?} after {} rounds ({:.2}s)",
                i + 1,
                config.num_games,
                game.winner,
                game.scores,
                game.rounds,
                elapsed,
            );
        }
        on_game(game);
    }
}

/// Parallel rollouts: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker
/// threads.
fn run_rollouts_parallel<F>(config: &RolloutConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("falling back to sequential rollouts: {}", err);
            run_rollouts_sequential(config, on_game);
            return;
        }
    };

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        let elapsed = game_start.elapsed().as_secs_f64();
                        eprintln!(
                            "Game {}/{}: player {} wins {:?} after {} rounds ({:.2}s)",
                            n,
                            config_clone.num_games,
                            game.winner,
                            game.scores,
                            game.rounds,
                            elapsed,
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the main thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    if handle.join().is_err() {
        eprintln!("rollout worker thread panicked");
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_game_terminates_and_scores() {
        let mut rng = SmallRng::seed_from_u64(99);
        let config = RolloutConfig { num_games: 1, threads: 1, quiet: true, ..Default::default() };
        let game = play_game(&config, 0, &mut rng);
        assert!(!game.steps.is_empty());
        assert!(game.rounds <= crate::game::ROUND_CAP);
        assert!(game.winner < MAX_PLAYERS);
        let best = *game.scores.iter().max().unwrap();
        assert_eq!(game.scores[game.winner], best);
    }

    #[test]
    fn sequential_rollouts_are_reproducible() {
        let config =
            RolloutConfig { num_games: 2, threads: 1, seed: 7, quiet: true, ..Default::default() };
        let a = run_rollouts(&config);
        let b = run_rollouts(&config);
        assert_eq!(a.len(), 2);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.scores, y.scores);
            assert_eq!(x.steps.len(), y.steps.len());
        }
    }

    #[test]
    fn parallel_rollouts_produce_all_games() {
        let config =
            RolloutConfig { num_games: 4, threads: 2, seed: 7, quiet: true, ..Default::default() };
        let games = run_rollouts(&config);
        assert_eq!(games.len(), 4);
        let mut ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn jsonl_is_one_object_per_line() {
        let config =
            RolloutConfig { num_games: 2, threads: 1, seed: 3, quiet: true, ..Default::default() };
        let games = run_rollouts(&config);
        let mut buf: Vec<u8> = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("scores").is_some());
        }
    }
}
