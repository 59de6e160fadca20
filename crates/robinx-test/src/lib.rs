//! Shared test fixtures for robinx crates.
//!
//! This crate provides schedule and instance builders for testing.
//! It depends on `robinx-core` only, so the scoring crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`schedule`] - identifiers and the canonical double round-robin
//! - [`instance`] - a small builder for [`Instance`](robinx_core::Instance)
//! - [`shuffle`] - seeded shuffles for order-independence tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! robinx-test = { workspace = true }
//! ```

pub mod instance;
pub mod schedule;
pub mod shuffle;

pub use instance::InstanceBuilder;
pub use schedule::{double_round_robin, double_round_robin_slots, slot_ids, team_ids};
pub use shuffle::shuffled;
