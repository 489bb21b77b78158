//! Observation encoding for learned agents.

pub mod encoding;

pub use encoding::{encode_observation, OBS_LEN};
