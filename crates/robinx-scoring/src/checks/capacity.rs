//! Capacity checks: CA1 to CA4.

use std::collections::HashSet;

use robinx_core::{AggregationScope, Ca1, Ca2, Ca3, Ca4, SlotId, TeamId, VenueMode};

use super::primitives::orientations;
use super::{as_len, CategoryCheck, CheckContext};
use crate::report::Check;
use crate::violation::{Bounds, ViolationKey, ViolationMap};

type Candidate<'a> = (&'a TeamId, &'a TeamId, &'a SlotId);

/// Distinct scheduled matches of `team` against `rivals` in `slots`, with the
/// sides chosen by `mode`.
fn scheduled_against<'a>(
    ctx: &CheckContext<'_>,
    mode: VenueMode,
    team: &'a TeamId,
    rivals: &'a [TeamId],
    slots: impl IntoIterator<Item = &'a SlotId> + Clone,
) -> HashSet<Candidate<'a>> {
    let mut found = HashSet::new();
    for rival in rivals {
        for slot in slots.clone() {
            for (home, away) in orientations(mode, team, rival) {
                if ctx.index.is_scheduled(home, away, slot) {
                    found.insert((home, away, slot));
                }
            }
        }
    }
    found
}

impl CategoryCheck for Ca1 {
    /// One indicator per (team, slot): does the team play there with `mode`?
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(bounds) = Bounds::between(self.min, self.max) else {
            return violations;
        };
        for team in &self.teams {
            for slot in &self.slots {
                let plays = ctx
                    .index
                    .booking(team, slot)
                    .is_some_and(|venue| self.mode.includes(venue));
                let key = ViolationKey::constraint(self.id).team(team).slot(slot);
                violations.compare(key, i64::from(plays), bounds);
            }
        }
        violations
    }
}

impl CategoryCheck for Ca2 {
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(bounds) = Bounds::between(self.min, self.max) else {
            return violations;
        };
        for team in &self.teams1 {
            let found = scheduled_against(ctx, self.mode2, team, &self.teams2, &self.slots);
            let key = ViolationKey::constraint(self.id).team(team);
            violations.compare(key, found.len() as i64, bounds);
        }
        violations
    }
}

impl CategoryCheck for Ca3 {
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let (Some(intp), Some(max)) = (self.intp, self.max) else {
            return violations;
        };
        for window in ctx.instance.slot_order().windows(as_len(intp)) {
            let Some(start) = window.first() else { continue };
            for team in &self.teams1 {
                let found = scheduled_against(ctx, self.mode1, team, &self.teams2, window);
                let key = ViolationKey::constraint(self.id).team(team).slot(start);
                violations.compare(key, found.len() as i64, Bounds::Max(max));
            }
        }
        violations
    }
}

impl CategoryCheck for Ca4 {
    fn report_as(&self) -> Check {
        Check::Ca4(self.mode2)
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(max) = self.max else {
            return violations;
        };
        let mode = self.candidate_mode();
        let mut found: HashSet<Candidate<'_>> = HashSet::new();
        for team in &self.teams1 {
            found.extend(scheduled_against(ctx, mode, team, &self.teams2, &self.slots));
        }

        let bounds = Bounds::Max(max);
        match self.mode2 {
            AggregationScope::Global => {
                let key = ViolationKey::constraint(self.id);
                violations.compare(key, found.len() as i64, bounds);
            }
            AggregationScope::Every => {
                for slot in &self.slots {
                    let count = found.iter().filter(|(_, _, s)| *s == slot).count();
                    let key = ViolationKey::constraint(self.id).slot(slot);
                    violations.compare(key, count as i64, bounds);
                }
            }
        }
        violations
    }
}
