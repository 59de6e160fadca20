//! Candidate schedules and the read-only views derived from them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entity::{SlotId, TeamId, TeamPair, Venue};
use crate::slots::SlotOrder;

/// One match as scheduled: `home` receives `away` in `slot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub home: TeamId,
    pub away: TeamId,
    pub slot: SlotId,
}

impl ScheduledMatch {
    pub fn new(home: impl Into<TeamId>, away: impl Into<TeamId>, slot: impl Into<SlotId>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
            slot: slot.into(),
        }
    }
}

/// An ordered sequence of scheduled matches.
///
/// The external form is `{"assignment": [{"home", "away", "slot"}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    assignment: Vec<ScheduledMatch>,
}

impl Solution {
    pub fn new(assignment: Vec<ScheduledMatch>) -> Self {
        Self { assignment }
    }

    pub fn matches(&self) -> &[ScheduledMatch] {
        &self.assignment
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledMatch> {
        self.assignment.iter()
    }
}

impl FromIterator<ScheduledMatch> for Solution {
    fn from_iter<I: IntoIterator<Item = ScheduledMatch>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Lookup tables derived once from a solution and the instance's slot order.
///
/// All views borrow from the solution; nothing here mutates it.
#[derive(Debug)]
pub struct ScheduleIndex<'a> {
    order: &'a SlotOrder,
    booking: HashMap<(&'a TeamId, &'a SlotId), Venue>,
    slot_of: HashMap<(&'a TeamId, &'a TeamId), &'a SlotId>,
    scheduled: HashSet<(&'a TeamId, &'a TeamId, &'a SlotId)>,
    // Per team, home games played up to and including each slot position.
    cumulative_home: HashMap<&'a TeamId, Vec<i64>>,
}

impl<'a> ScheduleIndex<'a> {
    pub fn new(order: &'a SlotOrder, solution: &'a Solution) -> Self {
        let mut booking = HashMap::new();
        let mut slot_of = HashMap::new();
        let mut scheduled = HashSet::new();
        let mut home_games: HashMap<&TeamId, Vec<i64>> = HashMap::new();

        for m in solution.iter() {
            booking.insert((&m.home, &m.slot), Venue::Home);
            booking.insert((&m.away, &m.slot), Venue::Away);
            slot_of.entry((&m.home, &m.away)).or_insert(&m.slot);
            scheduled.insert((&m.home, &m.away, &m.slot));
            home_games.entry(&m.away).or_insert_with(|| vec![0; order.len()]);
            let games = home_games
                .entry(&m.home)
                .or_insert_with(|| vec![0; order.len()]);
            if let Some(position) = order.position(&m.slot) {
                games[position] += 1;
            }
        }

        for games in home_games.values_mut() {
            let mut running = 0;
            for count in games.iter_mut() {
                running += *count;
                *count = running;
            }
        }

        Self {
            order,
            booking,
            slot_of,
            scheduled,
            cumulative_home: home_games,
        }
    }

    pub fn slot_order(&self) -> &'a SlotOrder {
        self.order
    }

    /// Venue at which `team` plays in `slot`, or `None` if it does not play.
    pub fn booking(&self, team: &TeamId, slot: &SlotId) -> Option<Venue> {
        self.booking.get(&(team, slot)).copied()
    }

    /// Slot of the directed match `home` vs `away` (first occurrence).
    pub fn slot_of(&self, home: &TeamId, away: &TeamId) -> Option<&'a SlotId> {
        self.slot_of.get(&(home, away)).copied()
    }

    pub fn is_scheduled(&self, home: &TeamId, away: &TeamId, slot: &SlotId) -> bool {
        self.scheduled.contains(&(home, away, slot))
    }

    /// The two slots in which the pair meets, earliest first.
    ///
    /// `None` unless both directed matches are scheduled in known slots.
    pub fn ordered_slot_pairs(&self, pair: &TeamPair) -> Option<[&'a SlotId; 2]> {
        let a = self.slot_of(pair.first(), pair.second())?;
        let b = self.slot_of(pair.second(), pair.first())?;
        let (pa, pb) = (self.order.position(a)?, self.order.position(b)?);
        Some(if pa <= pb { [a, b] } else { [b, a] })
    }

    /// Home games of `team` played up to and including `slot`.
    pub fn cumulative_home(&self, team: &TeamId, slot: &SlotId) -> i64 {
        self.order
            .position(slot)
            .and_then(|p| self.cumulative_home.get(team)?.get(p).copied())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> SlotOrder {
        SlotOrder::new(["0", "1", "2", "3"].map(SlotId::from))
    }

    fn solution() -> Solution {
        [
            ScheduledMatch::new("A", "B", "0"),
            ScheduledMatch::new("C", "D", "0"),
            ScheduledMatch::new("A", "C", "1"),
            ScheduledMatch::new("D", "B", "1"),
            ScheduledMatch::new("B", "A", "3"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_booking() {
        let order = order();
        let solution = solution();
        let index = ScheduleIndex::new(&order, &solution);

        assert_eq!(index.booking(&"A".into(), &"0".into()), Some(Venue::Home));
        assert_eq!(index.booking(&"B".into(), &"0".into()), Some(Venue::Away));
        assert_eq!(index.booking(&"A".into(), &"2".into()), None);
    }

    #[test]
    fn test_slot_of_is_directed() {
        let order = order();
        let solution = solution();
        let index = ScheduleIndex::new(&order, &solution);

        assert_eq!(index.slot_of(&"A".into(), &"B".into()), Some(&SlotId::new("0")));
        assert_eq!(index.slot_of(&"B".into(), &"A".into()), Some(&SlotId::new("3")));
        assert_eq!(index.slot_of(&"C".into(), &"A".into()), None);
        assert!(index.is_scheduled(&"D".into(), &"B".into(), &"1".into()));
        assert!(!index.is_scheduled(&"B".into(), &"D".into(), &"1".into()));
    }

    #[test]
    fn test_ordered_slot_pairs() {
        let order = order();
        let solution = solution();
        let index = ScheduleIndex::new(&order, &solution);

        let slots = index.ordered_slot_pairs(&TeamPair::new("B", "A")).unwrap();
        assert_eq!(slots.map(SlotId::as_str), ["0", "3"]);
        assert!(index.ordered_slot_pairs(&TeamPair::new("A", "C")).is_none());
    }

    #[test]
    fn test_cumulative_home() {
        let order = order();
        let solution = solution();
        let index = ScheduleIndex::new(&order, &solution);

        let a: Vec<_> = order.iter().map(|s| index.cumulative_home(&"A".into(), s)).collect();
        assert_eq!(a, vec![1, 2, 2, 2]);
        let b: Vec<_> = order.iter().map(|s| index.cumulative_home(&"B".into(), s)).collect();
        assert_eq!(b, vec![0, 0, 0, 1]);
        assert_eq!(index.cumulative_home(&"Z".into(), &"3".into()), 0);
    }

    #[test]
    fn test_solution_json_form() {
        let json = r#"{"assignment":[{"home":"A","away":"B","slot":"0"}]}"#;
        let solution: Solution = serde_json::from_str(json).unwrap();
        assert_eq!(solution.matches(), &[ScheduledMatch::new("A", "B", "0")]);
        assert_eq!(serde_json::to_string(&solution).unwrap(), json);
    }
}
