//! Shared building blocks: venue expansion, breaks and team pairs.

use std::collections::BTreeSet;

use robinx_core::{ScheduleIndex, SlotId, TeamId, TeamPair, Venue, VenueMode};

/// Directed `(home, away)` orientations of `team` against `rival` under `mode`.
///
/// HOME keeps `team` at home, AWAY swaps the sides, BOTH yields both.
pub fn orientations<'a>(
    mode: VenueMode,
    team: &'a TeamId,
    rival: &'a TeamId,
) -> impl Iterator<Item = (&'a TeamId, &'a TeamId)> {
    mode.venues().iter().map(move |venue| match venue {
        Venue::Home => (team, rival),
        Venue::Away => (rival, team),
    })
}

/// A team playing at the same venue in a slot and in its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Break<'a> {
    pub team: &'a TeamId,
    pub slot: &'a SlotId,
    pub venue: Venue,
}

/// Venue of the break of `team` at `slot`, if there is one.
///
/// The first slot never holds a break.
pub fn break_at(index: &ScheduleIndex<'_>, team: &TeamId, slot: &SlotId) -> Option<Venue> {
    let previous = index.slot_order().predecessor(slot)?;
    let venue = index.booking(team, slot)?;
    (index.booking(team, previous)? == venue).then_some(venue)
}

/// All breaks within `teams × slots`, each (team, slot) reported once.
pub fn count_breaks<'a>(
    index: &ScheduleIndex<'_>,
    teams: &'a [TeamId],
    slots: &'a [SlotId],
) -> BTreeSet<Break<'a>> {
    let slots = distinct(slots);
    distinct(teams)
        .into_iter()
        .flat_map(|team| slots.iter().map(move |&slot| (team, slot)))
        .filter_map(|(team, slot)| {
            break_at(index, team, slot).map(|venue| Break { team, slot, venue })
        })
        .collect()
}

/// Every unordered pair of distinct teams, in canonical form.
pub fn team_pairs(teams: &[TeamId]) -> BTreeSet<TeamPair> {
    let teams: Vec<_> = distinct(teams).into_iter().collect();
    teams
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| {
            teams[i + 1..]
                .iter()
                .map(move |&b| TeamPair::new(a.clone(), b.clone()))
        })
        .collect()
}

pub fn distinct<T: Ord>(items: &[T]) -> BTreeSet<&T> {
    items.iter().collect()
}
