//! Fairness check: FA2.

use robinx_core::{Fa2, ScheduleIndex, SlotId, TeamPair};

use super::primitives::team_pairs;
use super::{CategoryCheck, CheckContext};
use crate::violation::{Bounds, ViolationKey, ViolationMap};

/// Largest difference in home games played so far between the two teams of
/// `pair`, over `slots`.
pub fn home_difference(index: &ScheduleIndex<'_>, pair: &TeamPair, slots: &[SlotId]) -> i64 {
    slots
        .iter()
        .map(|slot| {
            let first = index.cumulative_home(pair.first(), slot);
            let second = index.cumulative_home(pair.second(), slot);
            (first - second).abs()
        })
        .max()
        .unwrap_or(0)
}

impl CategoryCheck for Fa2 {
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(cap) = self.intp else {
            return violations;
        };
        for pair in team_pairs(&self.teams) {
            let difference = home_difference(&ctx.index, &pair, &self.slots);
            let key = ViolationKey::constraint(self.id).pair(&pair);
            violations.compare(key, difference, Bounds::Max(cap));
        }
        violations
    }
}
