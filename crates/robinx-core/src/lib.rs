//! Robinx Core - Core types for round-robin timetable validation
//!
//! This crate provides the vocabulary shared by the checker and the scorer:
//! - Entity types (teams, ordered slots, scheduled matches)
//! - The constraint model for the ITC constraint categories
//! - `Instance` and `Solution` value types with their derived views
//! - Flattened and structured external representations
//! - The cost score used to report infeasibility and objective

pub mod constraint;
pub mod entity;
pub mod error;
pub mod format;
pub mod instance;
pub mod score;
pub mod slots;
pub mod solution;

pub use constraint::{
    AggregationScope, AttributeValue, Br1, Br2, Ca1, Ca2, Ca3, Ca4, Category, CategoryConstraint,
    Constraint, ConstraintClass, ConstraintId, ExtraAttributes, Fa2, Ga1, Se1, VenueMode,
};
pub use entity::{League, Meeting, Slot, SlotId, Team, TeamId, TeamPair, Venue};
pub use error::{DecodeError, LookupError, Result, TimetableError};
pub use format::{FlatConstraint, FlatInstance, StructuredInstance};
pub use instance::Instance;
pub use score::{CostScore, ScoreParseError};
pub use slots::SlotOrder;
pub use solution::{ScheduleIndex, ScheduledMatch, Solution};
