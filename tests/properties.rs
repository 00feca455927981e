//! Property tests for Gridlock.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "allocation never exceeds capacity" and
//! "detection is deterministic".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/detector.rs"]
mod detector;

#[path = "properties/manager.rs"]
mod manager;
