//! Identifier helpers and the canonical double round-robin.

use robinx_core::{ScheduledMatch, SlotId, Solution, TeamId};

/// Team ids `"0"` to `"n-1"`.
pub fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|i| TeamId::new(i.to_string())).collect()
}

/// Slot ids `"0"` to `"n-1"`, listed in schedule order.
pub fn slot_ids(n: usize) -> Vec<SlotId> {
    (0..n).map(|i| SlotId::new(i.to_string())).collect()
}

/// Number of slots [`double_round_robin`] uses for `n` teams.
pub fn double_round_robin_slots(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        2 * rounds(n)
    }
}

fn rounds(n: usize) -> usize {
    if n % 2 == 0 {
        n - 1
    } else {
        n
    }
}

/// Builds a double round-robin with the circle method.
///
/// The first half is a single round-robin; the second half mirrors it with
/// venues swapped. Every pair meets once at each venue and no team plays
/// twice in a slot. Slots are named as by [`slot_ids`]. An odd number of
/// teams gets a bye in every round.
///
/// # Example
///
/// ```
/// use robinx_test::{double_round_robin, team_ids};
///
/// let solution = double_round_robin(&team_ids(4));
/// assert_eq!(solution.len(), 12);
/// ```
pub fn double_round_robin(teams: &[TeamId]) -> Solution {
    if teams.len() < 2 {
        return Solution::default();
    }

    // `None` is the bye for odd team counts.
    let mut circle: Vec<Option<&TeamId>> = teams.iter().map(Some).collect();
    if circle.len() % 2 == 1 {
        circle.push(None);
    }
    let size = circle.len();
    let rounds = rounds(teams.len());

    let mut first_half = Vec::new();
    for round in 0..rounds {
        for i in 0..size / 2 {
            let (a, b) = (circle[i], circle[size - 1 - i]);
            let (Some(a), Some(b)) = (a, b) else { continue };
            // Alternate the fixed team's venue so it does not always play at home.
            let (home, away) = if i == 0 && round % 2 == 1 { (b, a) } else { (a, b) };
            first_half.push((home.clone(), away.clone(), round));
        }
        // Keep the first position fixed and rotate the rest by one.
        circle[1..].rotate_right(1);
    }

    let slots = slot_ids(2 * rounds);
    let mirrored = first_half
        .iter()
        .map(|(home, away, round)| (away.clone(), home.clone(), round + rounds));
    first_half
        .clone()
        .into_iter()
        .chain(mirrored)
        .map(|(home, away, round)| ScheduledMatch {
            home,
            away,
            slot: slots[round].clone(),
        })
        .collect()
}
