//! Test utilities for robinx-scoring
//!
//! Provides common fixtures used across the crate's test modules.

use robinx_core::{
    AggregationScope, Br1, Ca1, Ca4, ConstraintClass, ScheduledMatch, SlotId, Solution, TeamId,
    VenueMode,
};
use robinx_test::InstanceBuilder;

use crate::violation::ViolationKey;

pub const HARD: ConstraintClass = ConstraintClass::Hard;
pub const SOFT: ConstraintClass = ConstraintClass::Soft;

pub fn teams(ids: &[&str]) -> Vec<TeamId> {
    ids.iter().map(|&id| TeamId::from(id)).collect()
}

pub fn slots(ids: &[&str]) -> Vec<SlotId> {
    ids.iter().map(|&id| SlotId::from(id)).collect()
}

pub fn four_teams() -> InstanceBuilder {
    InstanceBuilder::new()
        .teams(["A", "B", "C", "D"])
        .slots(["s1", "s2", "s3"])
}

/// A is at home in all three slots; B, C and D rotate.
pub fn three_rounds() -> Solution {
    [
        ("A", "B", "s1"),
        ("C", "D", "s1"),
        ("A", "C", "s2"),
        ("B", "D", "s2"),
        ("A", "D", "s3"),
        ("B", "C", "s3"),
    ]
    .into_iter()
    .map(|(home, away, slot)| ScheduledMatch::new(home, away, slot))
    .collect()
}

pub fn key(id: usize) -> ViolationKey {
    ViolationKey::constraint(id)
}

pub fn ca1(mode: VenueMode, team: &str, slot: &str) -> Ca1 {
    Ca1 {
        id: 0,
        class: HARD,
        penalty: None,
        teams: teams(&[team]),
        slots: slots(&[slot]),
        mode,
        min: Some(0),
        max: Some(0),
        extra: Default::default(),
    }
}

pub fn br1(team_ids: &[&str], slot_ids: &[&str], mode2: VenueMode, intp: i64) -> Br1 {
    Br1 {
        id: 0,
        class: SOFT,
        penalty: Some(3),
        teams: teams(team_ids),
        slots: slots(slot_ids),
        mode2,
        intp: Some(intp),
        extra: Default::default(),
    }
}

pub fn ca4(mode2: AggregationScope, class: ConstraintClass) -> Ca4 {
    Ca4 {
        id: 0,
        class,
        penalty: Some(2),
        teams1: teams(&["A", "B"]),
        teams2: teams(&["C", "D"]),
        slots: slots(&["s1", "s2", "s3"]),
        mode1: Some(VenueMode::Both),
        mode2,
        max: Some(1),
        extra: Default::default(),
    }
}
