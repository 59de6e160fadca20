//! Structural checks of a double round-robin schedule.
//!
//! These hold for every valid schedule regardless of the instance's
//! constraints and are always reported as hard.

use std::collections::BTreeMap;

use robinx_core::{Instance, SlotId, Solution, TeamId, Venue};

use crate::violation::{ViolationKey, ViolationMap};

/// Teams whose number of home games differs from `n - 1`.
pub fn check_num_home(instance: &Instance, solution: &Solution) -> ViolationMap {
    venue_counts(instance, solution, Venue::Home)
}

/// Teams whose number of away games differs from `n - 1`.
pub fn check_num_away(instance: &Instance, solution: &Solution) -> ViolationMap {
    venue_counts(instance, solution, Venue::Away)
}

fn venue_counts(instance: &Instance, solution: &Solution, venue: Venue) -> ViolationMap {
    // Teams of the instance start at zero so missing games are reported.
    let mut counts: BTreeMap<&TeamId, i64> = instance.team_ids().map(|t| (t, 0)).collect();
    for m in solution.iter() {
        let team = match venue {
            Venue::Home => &m.home,
            Venue::Away => &m.away,
        };
        *counts.entry(team).or_default() += 1;
    }

    let expected = instance.num_teams().saturating_sub(1) as i64;
    counts
        .into_iter()
        .filter(|&(_, count)| count != expected)
        .map(|(team, count)| (ViolationKey::default().team(team), count - expected))
        .collect()
}

/// (slot, team) combinations in which the team plays more than once.
pub fn check_one_match_per_slot(solution: &Solution) -> ViolationMap {
    let mut appearances: BTreeMap<(&SlotId, &TeamId), i64> = BTreeMap::new();
    for m in solution.iter() {
        *appearances.entry((&m.slot, &m.home)).or_default() += 1;
        *appearances.entry((&m.slot, &m.away)).or_default() += 1;
    }
    appearances
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|((slot, team), count)| (ViolationKey::default().slot(slot).team(team), count - 1))
        .collect()
}
