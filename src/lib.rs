//! Neolith game engine library.
//!
//! Exposes the board representation, compiled action space, legal-action
//! masking, turn resolution automaton, observation encoding, and rollout
//! modules for use by integration tests and the binary entry point.

pub mod actions;
pub mod board;
pub mod game;
pub mod nn;
pub mod rollout;
