//! Game assignment check: GA1.

use robinx_core::Ga1;

use super::primitives::distinct;
use super::{CategoryCheck, CheckContext};
use crate::violation::{Bounds, ViolationKey, ViolationMap};

impl CategoryCheck for Ga1 {
    /// Counts the listed (home, away) meetings that take place in the
    /// listed slots.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap {
        let mut violations = ViolationMap::new();
        let Some(bounds) = Bounds::between(self.min, self.max) else {
            return violations;
        };
        let slots = distinct(&self.slots);
        let played = distinct(&self.meetings)
            .into_iter()
            .flat_map(|m| slots.iter().map(move |&slot| (m, slot)))
            .filter(|(m, slot)| ctx.index.is_scheduled(&m.home, &m.away, slot))
            .count();

        violations.compare(ViolationKey::constraint(self.id), played as i64, bounds);
        violations
    }
}
