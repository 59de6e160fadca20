//! Break checks: BR1 and BR2.

use std::collections::BTreeMap;

use robinx_core::{Br1, Br2, TeamId};

use super::primitives::count_breaks;
use super::{CategoryCheck, CheckContext};
use crate::violation::{Bounds, ViolationKey, ViolationMap};

impl CategoryCheck for Br1 {
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(cap) = self.intp else {
            return violations;
        };
        let mut per_team: BTreeMap<&TeamId, i64> = BTreeMap::new();
        for b in count_breaks(&ctx.index, &self.teams, &self.slots) {
            if self.mode2.includes(b.venue) {
                *per_team.entry(b.team).or_default() += 1;
            }
        }

        for (team, count) in per_team {
            let key = ViolationKey::constraint(self.id).team(team);
            violations.compare(key, count, Bounds::Max(cap));
        }
        violations
    }
}

impl CategoryCheck for Br2 {
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(cap) = self.intp else {
            return violations;
        };
        let total = count_breaks(&ctx.index, &self.teams, &self.slots).len();
        violations.compare(ViolationKey::constraint(self.id), total as i64, Bounds::Max(cap));
        violations
    }
}
