//! Objective scoring of a checked schedule.

use robinx_core::{Instance, LookupError};

use crate::report::CheckReport;

/// Sum of `|magnitude| × penalty` over the soft violations in `report`.
///
/// CA4's two report names share the CA4 penalties. Structural checks carry
/// no penalty and are skipped.
///
/// # Errors
///
/// Fails if a violation belongs to a HARD constraint, to an unknown
/// constraint, or to a SOFT constraint without a penalty. Penalties never
/// default to zero. Also fails if the weighted sum leaves the `i64` range.
pub fn objective_of(instance: &Instance, report: &CheckReport) -> Result<i64, LookupError> {
    let mut total: i64 = 0;
    for (check, violations) in report {
        let Some(category) = check.category() else {
            continue;
        };
        for (key, magnitude) in violations {
            let Some(id) = key.constraint_id() else {
                continue;
            };
            let penalty = instance.penalty_of(category, id)?;
            total = magnitude
                .checked_abs()
                .and_then(|magnitude| magnitude.checked_mul(penalty))
                .and_then(|weighted| total.checked_add(weighted))
                .ok_or(LookupError::Overflow { category, id })?;
        }
    }
    Ok(total)
}
