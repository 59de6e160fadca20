//! Cost score for a checked timetable.
//!
//! Unlike maximizing scores, both levels are non-negative costs and lower is
//! better: `hard` is the infeasibility, `soft` the weighted objective.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A two-level cost: hard (infeasibility) and soft (objective).
///
/// When comparing costs:
/// 1. Hard costs are compared first
/// 2. Soft costs are only compared when hard costs are equal
///
/// # Examples
///
/// ```
/// use robinx_core::CostScore;
///
/// let infeasible = CostScore::of(1, 0);
/// let feasible = CostScore::of(0, 250);
///
/// // Any feasible timetable beats an infeasible one
/// assert!(feasible < infeasible);
/// assert!(feasible.is_feasible());
///
/// assert_eq!("2hard/40soft".parse::<CostScore>().unwrap(), CostScore::of(2, 40));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CostScore {
    hard: i64,
    soft: i64,
}

impl CostScore {
    /// The zero cost.
    pub const ZERO: CostScore = CostScore { hard: 0, soft: 0 };

    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        CostScore { hard, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        CostScore { hard, soft: 0 }
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        CostScore { hard: 0, soft }
    }

    /// Infeasibility: summed magnitude of hard violations.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Objective: penalty-weighted magnitude of soft violations.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

impl Ord for CostScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for CostScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for CostScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        CostScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl fmt::Debug for CostScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CostScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for CostScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

impl FromStr for CostScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hard, soft) = s.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("Invalid CostScore format '{s}': expected 2 parts separated by '/'"),
        })?;
        Ok(CostScore::of(level(hard, "hard")?, level(soft, "soft")?))
    }
}

fn level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let num = part.strip_suffix(suffix).ok_or_else(|| ScoreParseError {
        message: format!("{suffix} part '{part}' must end with '{suffix}'"),
    })?;
    num.parse::<i64>().map_err(|e| ScoreParseError {
        message: format!("Invalid {suffix} score '{num}': {e}"),
    })
}
