//! Separation check: SE1.

use robinx_core::Se1;

use super::primitives::team_pairs;
use super::{CategoryCheck, CheckContext};
use crate::violation::{Bounds, ViolationKey, ViolationMap};

impl CategoryCheck for Se1 {
    /// The separation of a pair is the number of slots strictly between its
    /// two meetings. Pairs that do not meet twice are skipped.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(min) = self.min else {
            return violations;
        };
        let order = ctx.instance.slot_order();
        for pair in team_pairs(&self.teams) {
            let Some([first, second]) = ctx.index.ordered_slot_pairs(&pair) else {
                continue;
            };
            let Some(distance) = order.distance(first, second) else {
                continue;
            };
            let separation = distance as i64 - 1;
            let key = ViolationKey::constraint(self.id).pair(&pair);
            violations.compare(key, separation, Bounds::Min(min));
        }
        violations
    }
}
