//! Total order over the time slots of an instance.

use std::collections::HashMap;

use crate::entity::SlotId;

/// The fixed, totally ordered sequence of slots of an instance.
///
/// The order is the order in which slots were listed when the instance was
/// built and never changes afterwards.
///
/// # Example
///
/// ```
/// use robinx_core::{SlotId, SlotOrder};
///
/// let order = SlotOrder::new(["s0", "s1", "s2"].map(SlotId::from));
/// assert_eq!(order.first().map(SlotId::as_str), Some("s0"));
/// assert_eq!(order.predecessor(&"s2".into()).map(SlotId::as_str), Some("s1"));
/// assert_eq!(order.distance(&"s0".into(), &"s2".into()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotOrder {
    order: Vec<SlotId>,
    positions: HashMap<SlotId, usize>,
}

impl SlotOrder {
    /// Builds the order from slots listed first to last.
    ///
    /// A slot listed twice keeps its first position.
    pub fn new(slots: impl IntoIterator<Item = SlotId>) -> Self {
        // Listing order, not a text sort of the ids: "10" must follow "9".
        let mut order = Vec::new();
        let mut positions = HashMap::new();
        for slot in slots {
            if !positions.contains_key(&slot) {
                positions.insert(slot.clone(), order.len());
                order.push(slot);
            }
        }
        Self { order, positions }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn first(&self) -> Option<&SlotId> {
        self.order.first()
    }

    /// Returns the slot right before `slot`, or `None` for the first slot
    /// and for unknown slots.
    pub fn predecessor(&self, slot: &SlotId) -> Option<&SlotId> {
        let position = self.position(slot)?;
        position.checked_sub(1).map(|p| &self.order[p])
    }

    /// Zero-based position of `slot` in schedule order.
    pub fn position(&self, slot: &SlotId) -> Option<usize> {
        self.positions.get(slot).copied()
    }

    /// Slot at the given position.
    pub fn get(&self, position: usize) -> Option<&SlotId> {
        self.order.get(position)
    }

    /// Linear separation between two slots in schedule order.
    ///
    /// There is no wrap-around: the distance between the first and the last
    /// slot is `len() - 1`.
    pub fn distance(&self, a: &SlotId, b: &SlotId) -> Option<usize> {
        Some(self.position(a)?.abs_diff(self.position(b)?))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlotId> {
        self.order.iter()
    }

    /// All windows of `length` consecutive slots, in schedule order.
    ///
    /// Windows overlap; there are `len() - length + 1` of them, and none when
    /// `length` is zero or longer than the schedule.
    pub fn windows(&self, length: usize) -> impl Iterator<Item = &[SlotId]> {
        let length = if length == 0 { self.order.len() + 1 } else { length };
        self.order.windows(length)
    }
}

impl<'a> IntoIterator for &'a SlotOrder {
    type Item = &'a SlotId;
    type IntoIter = std::slice::Iter<'a, SlotId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(n: usize) -> SlotOrder {
        SlotOrder::new((0..n).map(|i| SlotId::new(i.to_string())))
    }

    #[test]
    fn test_first_and_predecessor() {
        let slots = order(3);
        assert_eq!(slots.first(), Some(&SlotId::new("0")));
        assert_eq!(slots.predecessor(&"0".into()), None);
        assert_eq!(slots.predecessor(&"1".into()), Some(&SlotId::new("0")));
        assert_eq!(slots.predecessor(&"9".into()), None);
    }

    #[test]
    fn test_listing_order_is_kept() {
        // "10" sorts before "2" as text, but the listing order wins.
        let slots = SlotOrder::new(["2", "10"].map(SlotId::from));
        assert_eq!(slots.position(&"2".into()), Some(0));
        assert_eq!(slots.position(&"10".into()), Some(1));
    }

    #[test]
    fn test_distance_is_linear_and_symmetric() {
        let slots = order(6);
        assert_eq!(slots.distance(&"1".into(), &"4".into()), Some(3));
        assert_eq!(slots.distance(&"4".into(), &"1".into()), Some(3));
        assert_eq!(slots.distance(&"0".into(), &"5".into()), Some(5));
        assert_eq!(slots.distance(&"0".into(), &"x".into()), None);
    }

    #[test]
    fn test_windows() {
        let slots = order(5);
        assert_eq!(slots.windows(3).count(), 3);
        assert_eq!(slots.windows(5).count(), 1);
        assert_eq!(slots.windows(6).count(), 0);
        assert_eq!(slots.windows(0).count(), 0);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let slots = SlotOrder::new(["a", "b", "a"].map(SlotId::from));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.position(&"a".into()), Some(0));
    }
}
