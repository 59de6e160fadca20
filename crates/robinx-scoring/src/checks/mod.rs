//! Per-category constraint checks and the structural schedule checks.
//!
//! Every check is a pure function of the instance and the schedule. A check
//! evaluates one constraint into a [`ViolationMap`] whose keys start with the
//! constraint id; [`run_category`] collects the maps of all constraints of a
//! category under their report name.

mod breaks;
mod capacity;
mod fairness;
mod game;
pub mod primitives;
mod separation;
mod structural;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use robinx_core::{
    Br1, Br2, Ca1, Ca2, Ca3, Ca4, Category, CategoryConstraint, ConstraintClass, Fa2, Ga1,
    Instance, ScheduleIndex, Se1, Solution,
};
use tracing::trace;

use crate::report::Check;
use crate::violation::ViolationMap;

pub use structural::{check_num_away, check_num_home, check_one_match_per_slot};

/// Read-only inputs shared by all checks of one run.
#[derive(Debug)]
pub struct CheckContext<'a> {
    pub instance: &'a Instance,
    pub solution: &'a Solution,
    pub index: ScheduleIndex<'a>,
}

impl<'a> CheckContext<'a> {
    pub fn new(instance: &'a Instance, solution: &'a Solution) -> Self {
        Self {
            instance,
            solution,
            index: ScheduleIndex::new(instance.slot_order(), solution),
        }
    }
}

/// A constraint type that can be checked against a schedule.
pub trait CategoryCheck: CategoryConstraint + Sync {
    /// Name under which this constraint's violations are reported.
    fn report_as(&self) -> Check {
        Check::of_category(Self::CATEGORY)[0]
    }

    /// Violations of this one constraint.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> ViolationMap;
}

/// Checks every constraint of `category` matching `class`.
///
/// The result holds one map per report name, possibly empty.
pub fn run_category(
    category: Category,
    ctx: &CheckContext<'_>,
    class: Option<ConstraintClass>,
) -> BTreeMap<Check, ViolationMap> {
    match category {
        Category::Ca1 => run::<Ca1>(ctx, class),
        Category::Ca2 => run::<Ca2>(ctx, class),
        Category::Ca3 => run::<Ca3>(ctx, class),
        Category::Ca4 => run::<Ca4>(ctx, class),
        Category::Ga1 => run::<Ga1>(ctx, class),
        Category::Se1 => run::<Se1>(ctx, class),
        Category::Br1 => run::<Br1>(ctx, class),
        Category::Br2 => run::<Br2>(ctx, class),
        Category::Fa2 => run::<Fa2>(ctx, class),
    }
}

fn run<C: CategoryCheck>(
    ctx: &CheckContext<'_>,
    class: Option<ConstraintClass>,
) -> BTreeMap<Check, ViolationMap> {
    let mut out: BTreeMap<Check, ViolationMap> = BTreeMap::new();
    for constraint in ctx.instance.constraints::<C>(class) {
        let violations = constraint.evaluate(ctx);
        trace!(
            event = "constraint_checked",
            category = %C::CATEGORY,
            id = constraint.id(),
            violations = violations.len(),
        );
        out.entry(constraint.report_as())
            .or_default()
            .append(violations);
    }
    out
}

/// Runs the three structural checks.
pub fn run_structural(ctx: &CheckContext<'_>) -> [(Check, ViolationMap); 3] {
    [
        (Check::NumHome, check_num_home(ctx.instance, ctx.solution)),
        (Check::NumAway, check_num_away(ctx.instance, ctx.solution)),
        (Check::OneMatchPerSlot, check_one_match_per_slot(ctx.solution)),
    ]
}

/// Converts a non-negative window length or threshold to `usize`.
fn as_len(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
