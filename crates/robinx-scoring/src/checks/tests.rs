//! Tests for the category and structural checks.

use robinx_core::{
    AggregationScope, Br2, Ca2, Ca3, Category, Fa2, Ga1, Instance, Meeting, ScheduleIndex,
    ScheduledMatch, Se1, SlotId, Solution, TeamId, TeamPair, Venue, VenueMode,
};
use robinx_test::{double_round_robin, shuffled, team_ids, InstanceBuilder};

use super::fairness::home_difference;
use super::primitives::count_breaks;
use crate::checker::check_solution;
use crate::report::Check;
use crate::test_utils::*;
use crate::violation::ViolationKey;

#[test]
fn test_double_round_robin_is_structurally_feasible() {
    for n in [4, 6, 8] {
        let instance = InstanceBuilder::double_round_robin(n).build();
        let solution = double_round_robin(&team_ids(n));
        let report = check_solution(&instance, &solution, Some(HARD), None);
        assert!(report.is_empty(), "{n} teams: {report:?}");
    }
}

#[test]
fn test_structural_deviations() {
    let instance = InstanceBuilder::new()
        .teams(["A", "B", "C"])
        .slots(["s0"])
        .build();
    let solution: Solution = [
        ScheduledMatch::new("A", "B", "s0"),
        ScheduledMatch::new("A", "C", "s0"),
    ]
    .into_iter()
    .collect();
    let report = check_solution(&instance, &solution, Some(HARD), None);

    let home = report.get(Check::NumHome).unwrap();
    assert_eq!(home.len(), 2);
    assert_eq!(home.get(&ViolationKey::default().team(&"B".into())), Some(-2));
    assert_eq!(home.get(&ViolationKey::default().team(&"C".into())), Some(-2));

    let away = report.get(Check::NumAway).unwrap();
    assert_eq!(away.get(&ViolationKey::default().team(&"A".into())), Some(-2));
    assert_eq!(away.get(&ViolationKey::default().team(&"B".into())), Some(-1));

    let double = report.get(Check::OneMatchPerSlot).unwrap();
    assert_eq!(double.len(), 1);
    let key = ViolationKey::default().slot(&"s0".into()).team(&"A".into());
    assert_eq!(double.get(&key), Some(1));
}

#[test]
fn test_structural_checks_only_in_hard_runs() {
    let instance = four_teams().build();
    let solution = three_rounds();
    assert!(check_solution(&instance, &solution, None, None).is_empty());
    assert!(check_solution(&instance, &solution, Some(SOFT), None).is_empty());
    assert!(!check_solution(&instance, &solution, Some(HARD), None).is_empty());
}

#[test]
fn test_ca1_boundary() {
    let instance = InstanceBuilder::new()
        .teams(["A", "B"])
        .slots(["s"])
        .constraint(ca1(VenueMode::Home, "A", "s"))
        .build();

    let home: Solution = [ScheduledMatch::new("A", "B", "s")].into_iter().collect();
    let report = check_solution(&instance, &home, None, None);
    let violations = report.get(Check::Ca1).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.get(&key(0).team(&"A".into()).slot(&"s".into())), Some(1));

    let away: Solution = [ScheduledMatch::new("B", "A", "s")].into_iter().collect();
    assert!(check_solution(&instance, &away, None, None).is_empty());
}

#[test]
fn test_ca1_min_side() {
    let mut must_play_away = ca1(VenueMode::Away, "A", "s1");
    must_play_away.min = Some(1);
    must_play_away.max = Some(1);
    let instance = four_teams().constraint(must_play_away).build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ca1).unwrap();
    assert_eq!(violations.get(&key(0).team(&"A".into()).slot(&"s1".into())), Some(-1));
}

#[test]
fn test_ca2_counts_every_team1() {
    let instance = four_teams()
        .constraint(Ca2 {
            id: 0,
            class: HARD,
            penalty: None,
            teams1: teams(&["A", "D"]),
            teams2: teams(&["A", "B", "C", "D"]),
            slots: slots(&["s1", "s2", "s3"]),
            mode2: VenueMode::Home,
            min: Some(1),
            max: Some(1),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ca2).unwrap();
    // A hosts three games; D never plays at home.
    assert_eq!(violations.get(&key(0).team(&"A".into())), Some(2));
    assert_eq!(violations.get(&key(0).team(&"D".into())), Some(-1));
    assert_eq!(violations.len(), 2);
}

#[test]
fn test_ca2_away_mode_swaps_sides() {
    let instance = four_teams()
        .constraint(Ca2 {
            id: 0,
            class: HARD,
            penalty: None,
            teams1: teams(&["D"]),
            teams2: teams(&["A", "B", "C"]),
            slots: slots(&["s1", "s2", "s3"]),
            mode2: VenueMode::Away,
            min: Some(0),
            max: Some(2),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ca2).unwrap();
    assert_eq!(violations.get(&key(0).team(&"D".into())), Some(1));
}

#[test]
fn test_ca3_rolling_windows() {
    let instance = four_teams()
        .constraint(Ca3 {
            id: 0,
            class: HARD,
            penalty: None,
            teams1: teams(&["A", "C"]),
            teams2: teams(&["B", "C", "D"]),
            intp: Some(2),
            mode1: VenueMode::Home,
            max: Some(1),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ca3).unwrap();
    assert_eq!(violations.get(&key(0).team(&"A".into()).slot(&"s1".into())), Some(1));
    assert_eq!(violations.get(&key(0).team(&"A".into()).slot(&"s2".into())), Some(1));
    // C hosts once per window at most.
    assert_eq!(violations.len(), 2);
}

#[test]
fn test_ca3_window_longer_than_schedule() {
    let instance = four_teams()
        .constraint(Ca3 {
            id: 0,
            class: HARD,
            penalty: None,
            teams1: teams(&["A"]),
            teams2: teams(&["B", "C", "D"]),
            intp: Some(4),
            mode1: VenueMode::Both,
            max: Some(0),
            extra: Default::default(),
        })
        .build();
    assert!(check_solution(&instance, &three_rounds(), None, None).is_empty());
}

#[test]
fn test_ca4_global_and_every() {
    let instance = four_teams()
        .constraint(ca4(AggregationScope::Global, HARD))
        .constraint(ca4(AggregationScope::Every, HARD))
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);

    let global = report.get(Check::Ca4(AggregationScope::Global)).unwrap();
    assert_eq!(global.len(), 1);
    assert_eq!(global.get(&key(0)), Some(3));

    let every = report.get(Check::Ca4(AggregationScope::Every)).unwrap();
    assert_eq!(every.len(), 2);
    assert_eq!(every.get(&key(1).slot(&"s2".into())), Some(1));
    assert_eq!(every.get(&key(1).slot(&"s3".into())), Some(1));
}

#[test]
fn test_ca4_without_mode1_counts_both_venues() {
    let mut unset = ca4(AggregationScope::Global, HARD);
    unset.mode1 = None;
    let instance = four_teams().constraint(unset).build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let global = report.get(Check::Ca4(AggregationScope::Global)).unwrap();
    assert_eq!(global.get(&key(0)), Some(3));
}

#[test]
fn test_unset_limits_are_not_checked() {
    let mut max_only = ca1(VenueMode::Home, "A", "s1");
    max_only.min = None;
    let instance = four_teams().constraint(max_only).build();
    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ca1).unwrap();
    assert_eq!(violations.get(&key(0).team(&"A".into()).slot(&"s1".into())), Some(1));

    let mut unbounded = ca1(VenueMode::Home, "A", "s1");
    unbounded.min = None;
    unbounded.max = None;
    let no_minimum = Se1 {
        id: 0,
        class: HARD,
        penalty: None,
        teams: teams(&["A", "B", "C", "D"]),
        min: None,
        extra: Default::default(),
    };
    let mut no_cap = br1(&["A"], &["s2", "s3"], VenueMode::Both, 0);
    no_cap.class = HARD;
    no_cap.intp = None;
    let instance = four_teams()
        .constraint(unbounded)
        .constraint(no_minimum)
        .constraint(no_cap)
        .build();
    assert!(check_solution(&instance, &three_rounds(), None, None).is_empty());
}

#[test]
fn test_ga1_meetings_are_directed() {
    let instance = four_teams()
        .constraint(Ga1 {
            id: 0,
            class: HARD,
            penalty: None,
            meetings: vec![Meeting::new("A", "B"), Meeting::new("B", "A")],
            slots: slots(&["s1", "s2"]),
            min: Some(2),
            max: Some(2),
            extra: Default::default(),
        })
        .constraint(Ga1 {
            id: 0,
            class: HARD,
            penalty: None,
            meetings: vec![Meeting::new("A", "C"), Meeting::new("A", "D")],
            slots: slots(&["s2", "s3"]),
            min: Some(0),
            max: Some(1),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Ga1).unwrap();
    assert_eq!(violations.get(&key(0)), Some(-1));
    assert_eq!(violations.get(&key(1)), Some(1));
}

#[test]
fn test_se1_separation() {
    let instance = InstanceBuilder::new()
        .teams(["A", "B", "C"])
        .slots(["0", "1", "2", "3"])
        .constraint(Se1 {
            id: 0,
            class: HARD,
            penalty: None,
            teams: teams(&["A", "B", "C"]),
            min: Some(1),
            extra: Default::default(),
        })
        .build();
    let solution: Solution = [
        ScheduledMatch::new("A", "B", "0"),
        ScheduledMatch::new("B", "A", "1"),
        ScheduledMatch::new("C", "A", "0"),
        ScheduledMatch::new("A", "C", "3"),
        ScheduledMatch::new("B", "C", "2"),
    ]
    .into_iter()
    .collect();

    let report = check_solution(&instance, &solution, None, None);
    let violations = report.get(Check::Se1).unwrap();
    // A-B meet in consecutive slots; A-C are two apart; B-C meet once.
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.get(&key(0).pair(&TeamPair::new("B", "A"))), Some(-1));
}

#[test]
fn test_count_breaks() {
    let instance = four_teams().build();
    let solution = three_rounds();
    let index = ScheduleIndex::new(instance.slot_order(), &solution);

    let all_slots = slots(&["s1", "s2", "s3"]);
    let team_a = teams(&["A"]);
    let breaks: Vec<_> = count_breaks(&index, &team_a, &all_slots)
        .into_iter()
        .map(|b| (b.team.as_str(), b.slot.as_str(), b.venue))
        .collect();
    assert_eq!(breaks, vec![("A", "s2", Venue::Home), ("A", "s3", Venue::Home)]);

    let everyone = teams(&["A", "B", "C", "D"]);
    assert_eq!(count_breaks(&index, &everyone, &all_slots).len(), 6);
}

#[test]
fn test_br1_break_cap() {
    let instance = four_teams()
        .constraint(br1(&["A"], &["s2", "s3"], VenueMode::Both, 1))
        .constraint(br1(&["A", "B", "C", "D"], &["s1", "s2", "s3"], VenueMode::Away, 0))
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Br1).unwrap();
    assert_eq!(violations.get(&key(0).team(&"A".into())), Some(1));
    // Only away breaks count for the second constraint.
    assert_eq!(violations.get(&key(1).team(&"C".into())), Some(1));
    assert_eq!(violations.get(&key(1).team(&"D".into())), Some(2));
    assert_eq!(violations.len(), 3);
}

#[test]
fn test_br2_total_breaks() {
    let instance = four_teams()
        .constraint(Br2 {
            id: 0,
            class: HARD,
            penalty: None,
            teams: teams(&["A", "B", "C", "D"]),
            slots: slots(&["s1", "s2", "s3"]),
            intp: Some(4),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    assert_eq!(report.get(Check::Br2).unwrap().get(&key(0)), Some(2));
}

#[test]
fn test_fa2_home_difference() {
    let instance = four_teams()
        .constraint(Fa2 {
            id: 0,
            class: HARD,
            penalty: None,
            teams: teams(&["D", "A"]),
            slots: slots(&["s1", "s2", "s3"]),
            intp: Some(1),
            extra: Default::default(),
        })
        .build();

    let report = check_solution(&instance, &three_rounds(), None, None);
    let violations = report.get(Check::Fa2).unwrap();
    assert_eq!(violations.get(&key(0).pair(&TeamPair::new("A", "D"))), Some(2));
}

#[test]
fn test_fa2_is_symmetric() {
    let teams = team_ids(6);
    let solution = double_round_robin(&teams);
    let instance = InstanceBuilder::double_round_robin(6).build();
    let index = ScheduleIndex::new(instance.slot_order(), &solution);
    let all_slots: Vec<SlotId> = instance.slot_order().iter().cloned().collect();

    for x in &teams {
        for y in &teams {
            let xy = home_difference(&index, &TeamPair::new(x.clone(), y.clone()), &all_slots);
            let yx = home_difference(&index, &TeamPair::new(y.clone(), x.clone()), &all_slots);
            assert_eq!(xy, yx);
        }
    }

    let fa2 = |teams: Vec<TeamId>| Fa2 {
        id: 0,
        class: HARD,
        penalty: None,
        teams,
        slots: all_slots.clone(),
        intp: Some(0),
        extra: Default::default(),
    };
    let reference = check_solution(
        &InstanceBuilder::double_round_robin(6).constraint(fa2(teams.clone())).build(),
        &solution,
        None,
        None,
    );
    assert!(!reference.is_empty());
    for seed in 0..5 {
        let instance = InstanceBuilder::double_round_robin(6)
            .constraint(fa2(shuffled(&teams, seed)))
            .build();
        assert_eq!(check_solution(&instance, &solution, None, None), reference);
    }
}

#[test]
fn test_class_filter_and_category_subset() {
    let mut soft_cap = ca1(VenueMode::Home, "A", "s1");
    soft_cap.class = SOFT;
    soft_cap.penalty = Some(1);
    let instance = four_teams()
        .constraint(ca1(VenueMode::Home, "A", "s2"))
        .constraint(soft_cap)
        .constraint(br1(&["A"], &["s2", "s3"], VenueMode::Both, 1))
        .build();
    let solution = three_rounds();

    let soft = check_solution(&instance, &solution, Some(SOFT), Some(&[Category::Ca1]));
    assert_eq!(soft.len(), 1);
    let ca1 = soft.get(Check::Ca1).unwrap();
    assert_eq!(ca1.len(), 1);
    assert_eq!(ca1.iter().next().unwrap().0.constraint_id(), Some(1));

    let all = check_solution(&instance, &solution, None, None);
    assert_eq!(all.get(Check::Ca1).unwrap().len(), 2);
    assert!(all.get(Check::Br1).is_some());
}

#[test]
fn test_empty_instance_is_compliant() {
    let instance = Instance::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
    let report = check_solution(&instance, &Solution::default(), Some(HARD), None);
    assert!(report.is_empty());
}
