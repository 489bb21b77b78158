//! Integration test for the rollout CLI binary.
//!
//! Spawns the binary, requests a small seeded batch, and checks the JSONL
//! output on stdout.

use std::process::{Command, Stdio};

#[test]
fn cli_emits_one_json_object_per_game() {
    let exe = env!("CARGO_BIN_EXE_neolith");
    let output = Command::new(exe)
        .args(["--games", "2", "--threads", "1", "--seed", "5", "--quiet"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .expect("failed to run neolith");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("stdout was not UTF-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).expect("invalid JSON line");
        assert!(value.get("game_id").is_some());
        assert_eq!(value["scores"].as_array().map(|a| a.len()), Some(4));
        let winner = value["winner"].as_u64().expect("winner missing");
        assert!(winner < 4);
    }
}
