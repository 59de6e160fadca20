//! Violation keys and maps.
//!
//! A [`ViolationMap`] maps a key tuple to a signed magnitude: positive when a
//! value is above its maximum, negative when it is below its minimum. Keys of
//! category checks always start with the constraint id.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use robinx_core::{ConstraintId, SlotId, TeamId, TeamPair};
use smallvec::SmallVec;

/// One component of a violation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Id(ConstraintId),
    Team(TeamId),
    Slot(SlotId),
    Pair(TeamPair),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Id(id) => write!(f, "{id}"),
            KeyPart::Team(team) => write!(f, "{team}"),
            KeyPart::Slot(slot) => write!(f, "{slot}"),
            KeyPart::Pair(pair) => write!(f, "{pair}"),
        }
    }
}

/// Key tuple of a violation.
///
/// # Example
///
/// ```
/// use robinx_scoring::ViolationKey;
///
/// let key = ViolationKey::constraint(3).team(&"A".into()).slot(&"7".into());
/// assert_eq!(key.constraint_id(), Some(3));
/// assert_eq!(key.to_string(), "(3, A, 7)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ViolationKey(SmallVec<[KeyPart; 3]>);

impl ViolationKey {
    /// Starts a key for constraint `id`.
    pub fn constraint(id: ConstraintId) -> Self {
        Self::default().with(KeyPart::Id(id))
    }

    pub fn team(self, team: &TeamId) -> Self {
        self.with(KeyPart::Team(team.clone()))
    }

    pub fn slot(self, slot: &SlotId) -> Self {
        self.with(KeyPart::Slot(slot.clone()))
    }

    pub fn pair(self, pair: &TeamPair) -> Self {
        self.with(KeyPart::Pair(pair.clone()))
    }

    fn with(mut self, part: KeyPart) -> Self {
        self.0.push(part);
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Leading constraint id; `None` for structural keys.
    pub fn constraint_id(&self) -> Option<ConstraintId> {
        match self.0.first() {
            Some(KeyPart::Id(id)) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for ViolationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str(")")
    }
}

/// Which bounds a value is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    Min(i64),
    Max(i64),
    Both { min: i64, max: i64 },
}

impl Bounds {
    /// Bounds from optional limits, `None` when neither is set.
    ///
    /// ```
    /// use robinx_scoring::Bounds;
    ///
    /// assert_eq!(Bounds::between(Some(1), None), Some(Bounds::Min(1)));
    /// assert_eq!(Bounds::between(None, None), None);
    /// ```
    pub fn between(min: Option<i64>, max: Option<i64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(Bounds::Both { min, max }),
            (Some(min), None) => Some(Bounds::Min(min)),
            (None, Some(max)) => Some(Bounds::Max(max)),
            (None, None) => None,
        }
    }

    /// Returns `value - bound` when `value` is above the max or below the min.
    ///
    /// ```
    /// use robinx_scoring::Bounds;
    ///
    /// assert_eq!(Bounds::Max(2).excess(5), Some(3));
    /// assert_eq!(Bounds::Min(2).excess(0), Some(-2));
    /// assert_eq!(Bounds::Both { min: 1, max: 3 }.excess(2), None);
    /// ```
    pub fn excess(self, value: i64) -> Option<i64> {
        let above = |max: i64| (value > max).then_some(value - max);
        let below = |min: i64| (value < min).then_some(value - min);
        match self {
            Bounds::Max(max) => above(max),
            Bounds::Min(min) => below(min),
            Bounds::Both { min, max } => below(min).or_else(|| above(max)),
        }
    }
}

/// Signed violation magnitudes keyed by [`ViolationKey`].
///
/// Only violating entries are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationMap(BTreeMap<ViolationKey, i64>);

impl ViolationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `key` if it violates `bounds`.
    pub fn compare(&mut self, key: ViolationKey, value: i64, bounds: Bounds) {
        if let Some(excess) = bounds.excess(value) {
            self.0.insert(key, excess);
        }
    }

    pub fn insert(&mut self, key: ViolationKey, magnitude: i64) {
        self.0.insert(key, magnitude);
    }

    /// Moves every entry of `other` into `self`.
    pub fn append(&mut self, mut other: ViolationMap) {
        self.0.append(&mut other.0);
    }

    pub fn get(&self, key: &ViolationKey) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ViolationKey, i64> {
        self.0.iter()
    }

    /// Sum of absolute magnitudes.
    pub fn total_magnitude(&self) -> i64 {
        self.0.values().map(|v| v.abs()).sum()
    }
}

impl<'a> IntoIterator for &'a ViolationMap {
    type Item = (&'a ViolationKey, &'a i64);
    type IntoIter = btree_map::Iter<'a, ViolationKey, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ViolationMap {
    type Item = (ViolationKey, i64);
    type IntoIter = btree_map::IntoIter<ViolationKey, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(ViolationKey, i64)> for ViolationMap {
    fn from_iter<I: IntoIterator<Item = (ViolationKey, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
