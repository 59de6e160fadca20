//! Robinx - Round-Robin Timetable Checking in Rust
//!
//! Load an instance and a schedule, then check or score it.
//!
//! # Example
//!
//! ```rust
//! use robinx::prelude::*;
//!
//! let score = CostScore::of(0, 12);
//! assert!(score.is_feasible());
//! assert_eq!(score.to_string(), "0hard/12soft");
//! ```

// Model types
pub use robinx_core::{
    AggregationScope, Br1, Br2, Ca1, Ca2, Ca3, Ca4, Category, CategoryConstraint, Constraint,
    ConstraintClass, ConstraintId, CostScore, DecodeError, Fa2, FlatConstraint, FlatInstance,
    Ga1, Instance, League, LookupError, Meeting, ScheduleIndex, ScheduledMatch, Se1, Slot,
    SlotId, SlotOrder, Solution, StructuredInstance, Team, TeamId, TeamPair, TimetableError,
    Venue, VenueMode,
};

// Checking and scoring
pub use robinx_scoring::{
    check_solution, objective, Check, CheckReport, Checker, ViolationKey, ViolationMap,
};

// Configuration
pub use robinx_config::{CheckerConfig, ConfigError, ThreadCount};

mod report;
pub use report::{evaluate, evaluate_with, SolutionReport, DEFAULT_INSTANCE_NAME};

pub mod prelude {
    pub use super::{evaluate, SolutionReport};
    pub use super::{Category, ConstraintClass, CostScore, Instance, ScheduledMatch, Solution};
    pub use super::{Check, CheckReport, Checker, CheckerConfig};
}
