//! Constraint checking and objective scoring for round-robin timetables.
//!
//! This crate evaluates a schedule against an instance:
//! - One pure check per constraint category (CA1 to CA4, GA1, SE1, BR1, BR2, FA2)
//! - Structural checks of the double round-robin itself
//! - `ViolationMap`s of signed magnitudes, merged into a `CheckReport`
//! - The objective: soft violations weighted by their penalties
//!
//! # Architecture
//!
//! Checks only read the instance and the schedule. Categories are checked
//! independently and, unless configured otherwise, in parallel on rayon.

pub mod checker;
pub mod checks;
pub mod objective;
pub mod report;
pub mod violation;

#[cfg(test)]
mod test_utils;

pub use checker::{check_solution, objective, Checker};
pub use checks::primitives::{count_breaks, team_pairs, Break};
pub use checks::{CategoryCheck, CheckContext};
pub use objective::objective_of;
pub use report::{Check, CheckReport};
pub use violation::{Bounds, KeyPart, ViolationKey, ViolationMap};
