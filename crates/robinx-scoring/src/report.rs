//! Check names and the merged report of a checker run.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use robinx_core::{AggregationScope, Category};

use crate::violation::ViolationMap;

/// Name under which a violation map is reported.
///
/// CA4 reports under two names, one per aggregation scope; both map back to
/// [`Category::Ca4`]. The structural checks have no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Check {
    Ca1,
    Ca2,
    Ca3,
    Ca4(AggregationScope),
    Ga1,
    Se1,
    Br1,
    Br2,
    Fa2,
    NumHome,
    NumAway,
    OneMatchPerSlot,
}

impl Check {
    pub const STRUCTURAL: [Check; 3] = [Check::NumHome, Check::NumAway, Check::OneMatchPerSlot];

    /// The report names produced by one category.
    pub fn of_category(category: Category) -> &'static [Check] {
        match category {
            Category::Ca1 => &[Check::Ca1],
            Category::Ca2 => &[Check::Ca2],
            Category::Ca3 => &[Check::Ca3],
            Category::Ca4 => &[
                Check::Ca4(AggregationScope::Global),
                Check::Ca4(AggregationScope::Every),
            ],
            Category::Ga1 => &[Check::Ga1],
            Category::Se1 => &[Check::Se1],
            Category::Br1 => &[Check::Br1],
            Category::Br2 => &[Check::Br2],
            Category::Fa2 => &[Check::Fa2],
        }
    }

    /// Category used for penalty lookup; `None` for structural checks.
    pub fn category(self) -> Option<Category> {
        match self {
            Check::Ca1 => Some(Category::Ca1),
            Check::Ca2 => Some(Category::Ca2),
            Check::Ca3 => Some(Category::Ca3),
            Check::Ca4(_) => Some(Category::Ca4),
            Check::Ga1 => Some(Category::Ga1),
            Check::Se1 => Some(Category::Se1),
            Check::Br1 => Some(Category::Br1),
            Check::Br2 => Some(Category::Br2),
            Check::Fa2 => Some(Category::Fa2),
            Check::NumHome | Check::NumAway | Check::OneMatchPerSlot => None,
        }
    }

    pub fn is_structural(self) -> bool {
        self.category().is_none()
    }

    pub fn name(self) -> &'static str {
        match self {
            Check::Ca1 => "CA1",
            Check::Ca2 => "CA2",
            Check::Ca3 => "CA3",
            Check::Ca4(AggregationScope::Global) => "CA4_global",
            Check::Ca4(AggregationScope::Every) => "CA4_every",
            Check::Ga1 => "GA1",
            Check::Se1 => "SE1",
            Check::Br1 => "BR1",
            Check::Br2 => "BR2",
            Check::Fa2 => "FA2",
            Check::NumHome => "num_home",
            Check::NumAway => "num_away",
            Check::OneMatchPerSlot => "one_match_slot",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-empty violation maps of one checker run, keyed by check.
///
/// An empty report means full compliance for the checks that were run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport(BTreeMap<Check, ViolationMap>);

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check's result; empty maps are dropped.
    pub fn insert(&mut self, check: Check, violations: ViolationMap) {
        if !violations.is_empty() {
            self.0.insert(check, violations);
        }
    }

    pub fn get(&self, check: Check) -> Option<&ViolationMap> {
        self.0.get(&check)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of checks with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violation_count(&self) -> usize {
        self.0.values().map(ViolationMap::len).sum()
    }

    /// Sum of absolute magnitudes over every check.
    pub fn total_magnitude(&self) -> i64 {
        self.0.values().map(ViolationMap::total_magnitude).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Check, ViolationMap> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CheckReport {
    type Item = (&'a Check, &'a ViolationMap);
    type IntoIter = btree_map::Iter<'a, Check, ViolationMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Check, ViolationMap)> for CheckReport {
    fn from_iter<I: IntoIterator<Item = (Check, ViolationMap)>>(iter: I) -> Self {
        let mut report = CheckReport::new();
        for (check, violations) in iter {
            report.insert(check, violations);
        }
        report
    }
}
