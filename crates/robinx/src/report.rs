//! Solution report: the metadata and games of an exported schedule.

use robinx_core::{CostScore, Instance, ScheduledMatch, Solution, TimetableError};
use robinx_scoring::Checker;
use serde::{Deserialize, Serialize};

/// Instance name used when the instance carries none.
pub const DEFAULT_INSTANCE_NAME: &str = "Test Instance Demo";

/// Scored schedule, ready to be written out.
///
/// Games keep the order of the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub instance_name: String,
    pub solution_name: String,
    pub infeasibility: i64,
    pub objective: i64,
    pub games: Vec<ScheduledMatch>,
}

impl SolutionReport {
    pub fn score(&self) -> CostScore {
        CostScore::of(self.infeasibility, self.objective)
    }
}

/// Scores `solution` with the default checker.
///
/// # Errors
///
/// Fails if a violated SOFT constraint has no penalty.
///
/// # Example
///
/// ```
/// use robinx::{evaluate, Instance, Solution};
///
/// let instance = Instance::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
///     .unwrap()
///     .with_name("demo");
/// let report = evaluate(&instance, &Solution::default()).unwrap();
/// assert_eq!(report.solution_name, "Soldemo");
/// assert!(report.score().is_feasible());
/// ```
pub fn evaluate(instance: &Instance, solution: &Solution) -> Result<SolutionReport, TimetableError> {
    evaluate_with(&Checker::new(), instance, solution)
}

/// Scores `solution` with a configured checker.
pub fn evaluate_with(
    checker: &Checker,
    instance: &Instance,
    solution: &Solution,
) -> Result<SolutionReport, TimetableError> {
    let score = checker.evaluate(instance, solution)?;
    let instance_name = instance.name().unwrap_or(DEFAULT_INSTANCE_NAME).to_string();
    Ok(SolutionReport {
        solution_name: format!("Sol{instance_name}"),
        instance_name,
        infeasibility: score.hard(),
        objective: score.soft(),
        games: solution.matches().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use robinx_core::{Ca1, ConstraintClass, VenueMode};
    use robinx_test::{double_round_robin, team_ids, InstanceBuilder};

    #[test]
    fn test_report_of_feasible_schedule() {
        let instance = InstanceBuilder::double_round_robin(4).name("tiny").build();
        let solution = double_round_robin(&team_ids(4));
        let report = evaluate(&instance, &solution).unwrap();

        assert_eq!(report.instance_name, "tiny");
        assert_eq!(report.solution_name, "Soltiny");
        assert_eq!(report.score(), CostScore::ZERO);
        assert_eq!(report.games, solution.matches());
    }

    #[test]
    fn test_report_counts_violations() {
        let cap = Ca1 {
            id: 0,
            class: ConstraintClass::Soft,
            penalty: Some(10),
            teams: team_ids(4),
            slots: vec!["0".into()],
            mode: VenueMode::Home,
            min: Some(0),
            max: Some(0),
            extra: Default::default(),
        };
        let instance = InstanceBuilder::double_round_robin(4).constraint(cap).build();
        let solution = double_round_robin(&team_ids(4));
        let report = evaluate(&instance, &solution).unwrap();

        // Two teams play at home in the first slot.
        assert_eq!(report.objective, 20);
        assert_eq!(report.infeasibility, 0);
        assert_eq!(report.instance_name, DEFAULT_INSTANCE_NAME);
    }

    #[test]
    fn test_missing_penalty_is_an_error() {
        let cap = Ca1 {
            id: 0,
            class: ConstraintClass::Soft,
            penalty: None,
            teams: team_ids(4),
            slots: vec!["0".into()],
            mode: VenueMode::Home,
            min: Some(0),
            max: Some(0),
            extra: Default::default(),
        };
        let instance = InstanceBuilder::double_round_robin(4).constraint(cap).build();
        let err = evaluate(&instance, &double_round_robin(&team_ids(4))).unwrap_err();
        assert!(matches!(err, TimetableError::Lookup(_)));
    }

    #[test]
    fn test_report_json_shape() {
        let instance = InstanceBuilder::double_round_robin(2).name("pair").build();
        let solution = double_round_robin(&team_ids(2));
        let report = evaluate(&instance, &solution).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["solution_name"], "Solpair");
        assert_eq!(json["games"][0]["home"], "0");
        assert_eq!(json["games"][1]["home"], "1");
    }
}
