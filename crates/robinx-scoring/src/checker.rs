//! Checker front-end: runs the category checks and scores the result.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use robinx_config::{CheckerConfig, ConfigError, ThreadCount};
use robinx_core::{Category, ConstraintClass, CostScore, Instance, LookupError, Solution};
use tracing::{debug, info, warn};

use crate::checks::{run_category, run_structural, CheckContext};
use crate::objective::objective_of;
use crate::report::{Check, CheckReport};
use crate::violation::ViolationMap;

enum Dispatch {
    Sequential,
    GlobalPool,
    Pool(ThreadPool),
}

/// Validates schedules against an instance's constraints.
///
/// A checker holds no state between runs; one checker can be shared by any
/// number of threads.
///
/// # Example
///
/// ```
/// use robinx_core::{Instance, Solution};
/// use robinx_scoring::Checker;
///
/// let instance = Instance::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
/// let report = Checker::new().check(&instance, &Solution::default(), None);
/// assert!(report.is_empty());
/// ```
pub struct Checker {
    config: CheckerConfig,
    dispatch: Dispatch,
}

impl std::fmt::Debug for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    /// Checker with the default configuration: all categories, global pool.
    pub fn new() -> Self {
        Self {
            config: CheckerConfig::default(),
            dispatch: Dispatch::GlobalPool,
        }
    }

    /// Builds a checker from a validated configuration.
    ///
    /// A dedicated pool that cannot be started falls back to sequential
    /// checking.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CheckerConfig::validate`].
    pub fn from_config(config: CheckerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dispatch = match config.thread_count {
            ThreadCount::Auto => Dispatch::GlobalPool,
            ThreadCount::None => Dispatch::Sequential,
            ThreadCount::Count(n) => match ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Dispatch::Pool(pool),
                Err(err) => {
                    warn!(event = "thread_pool_unavailable", threads = n, error = %err);
                    Dispatch::Sequential
                }
            },
        };
        Ok(Self { config, dispatch })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Runs the configured category checks, restricted to `class` if given.
    ///
    /// Structural checks are added only to HARD runs. The report holds the
    /// non-empty violation maps; an empty report means full compliance.
    pub fn check(
        &self,
        instance: &Instance,
        solution: &Solution,
        class: Option<ConstraintClass>,
    ) -> CheckReport {
        let categories = self.config.categories();
        info!(
            event = "check_start",
            teams = instance.num_teams(),
            slots = instance.slot_order().len(),
            constraints = instance.constraint_count(),
            matches = solution.len(),
            categories = categories.len(),
            class = ?class,
        );

        let ctx = CheckContext::new(instance, solution);
        let run = |&category: &Category| (category, run_category(category, &ctx, class));
        let results: Vec<(Category, BTreeMap<Check, ViolationMap>)> = match &self.dispatch {
            Dispatch::Sequential => categories.iter().map(run).collect(),
            Dispatch::GlobalPool => categories.par_iter().map(run).collect(),
            Dispatch::Pool(pool) => pool.install(|| categories.par_iter().map(run).collect()),
        };

        let mut report = CheckReport::new();
        for (category, maps) in results {
            let violations: usize = maps.values().map(ViolationMap::len).sum();
            debug!(event = "check_done", category = %category, violations);
            for (check, map) in maps {
                report.insert(check, map);
            }
        }

        if class == Some(ConstraintClass::Hard) && self.config.structural_checks {
            for (check, map) in run_structural(&ctx) {
                debug!(event = "check_done", category = %check, violations = map.len());
                report.insert(check, map);
            }
        }

        info!(
            event = "check_end",
            failed_checks = report.len(),
            violations = report.violation_count(),
        );
        report
    }

    /// Weighted sum of the soft violations.
    ///
    /// # Errors
    ///
    /// Fails if a violated SOFT constraint has no penalty.
    pub fn objective(&self, instance: &Instance, solution: &Solution) -> Result<i64, LookupError> {
        let report = self.check(instance, solution, Some(ConstraintClass::Soft));
        let objective = objective_of(instance, &report)?;
        debug!(event = "objective", objective);
        Ok(objective)
    }

    /// Total magnitude of the hard violations, structural checks included.
    pub fn infeasibility(&self, instance: &Instance, solution: &Solution) -> i64 {
        let infeasibility = self
            .check(instance, solution, Some(ConstraintClass::Hard))
            .total_magnitude();
        debug!(event = "infeasibility", infeasibility);
        infeasibility
    }

    /// Infeasibility and objective as one cost score.
    pub fn evaluate(
        &self,
        instance: &Instance,
        solution: &Solution,
    ) -> robinx_core::Result<CostScore> {
        let hard = self.infeasibility(instance, solution);
        let soft = self.objective(instance, solution)?;
        Ok(CostScore::of(hard, soft))
    }
}

/// Checks `solution` sequentially, optionally restricted to some categories.
pub fn check_solution(
    instance: &Instance,
    solution: &Solution,
    class: Option<ConstraintClass>,
    categories: Option<&[Category]>,
) -> CheckReport {
    let mut config = CheckerConfig::new().with_thread_count(ThreadCount::None);
    if let Some(categories) = categories {
        config = config.with_categories(categories.iter().copied());
    }
    Checker {
        config,
        dispatch: Dispatch::Sequential,
    }
    .check(instance, solution, class)
}

/// Objective of `solution` with the default checker.
///
/// # Errors
///
/// Fails if a violated SOFT constraint has no penalty.
pub fn objective(instance: &Instance, solution: &Solution) -> Result<i64, LookupError> {
    Checker::new().objective(instance, solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use robinx_core::{AggregationScope, VenueMode};
    use robinx_test::{double_round_robin, team_ids, InstanceBuilder};

    fn scored_instance() -> Instance {
        let mut soft_cap = ca1(VenueMode::Home, "A", "s1");
        soft_cap.class = SOFT;
        soft_cap.penalty = Some(5);
        four_teams()
            .constraint(soft_cap)
            .constraint(ca1(VenueMode::Away, "B", "s1"))
            .constraint(br1(&["A"], &["s2", "s3"], VenueMode::Both, 1))
            .constraint(ca4(AggregationScope::Global, SOFT))
            .constraint(ca4(AggregationScope::Every, SOFT))
            .build()
    }

    #[test]
    fn test_dispatch_modes_agree() {
        let instance = scored_instance();
        let solution = three_rounds();
        let expected = Checker::new().check(&instance, &solution, None);
        assert!(!expected.is_empty());

        for threads in [ThreadCount::None, ThreadCount::Count(2)] {
            let config = CheckerConfig::new().with_thread_count(threads);
            let checker = Checker::from_config(config).unwrap();
            assert_eq!(checker.check(&instance, &solution, None), expected);
        }
    }

    #[test]
    fn test_evaluate() {
        let instance = scored_instance();
        let solution = three_rounds();

        let config = CheckerConfig::new().with_structural_checks(false);
        let checker = Checker::from_config(config).unwrap();
        assert_eq!(checker.evaluate(&instance, &solution).unwrap(), CostScore::of(1, 18));

        // Home counts B 2, C 1, D 0 and away counts A 0, B 1, C 2 against 3.
        assert_eq!(Checker::new().infeasibility(&instance, &solution), 13);
    }

    #[test]
    fn test_feasible_schedule_scores_zero() {
        let instance = InstanceBuilder::double_round_robin(6).build();
        let solution = double_round_robin(&team_ids(6));
        let score = Checker::new().evaluate(&instance, &solution).unwrap();
        assert!(score.is_feasible());
        assert_eq!(score, CostScore::ZERO);
    }

    #[test]
    fn test_configured_categories() {
        let instance = scored_instance();
        let config = CheckerConfig::new().with_categories([Category::Br1]);
        let checker = Checker::from_config(config).unwrap();
        let report = checker.check(&instance, &three_rounds(), Some(ConstraintClass::Soft));
        assert_eq!(report.len(), 1);
        assert!(report.get(Check::Br1).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CheckerConfig::new().with_thread_count(ThreadCount::Count(0));
        assert!(matches!(Checker::from_config(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_free_functions() {
        let instance = scored_instance();
        let solution = three_rounds();
        assert_eq!(objective(&instance, &solution), Ok(18));
        let report = check_solution(&instance, &solution, None, Some(&[Category::Ca1]));
        assert_eq!(report.get(Check::Ca1).map(ViolationMap::len), Some(2));
    }
}
