//! Constraint model for the ITC round-robin constraint family.
//!
//! Each category is a plain struct; [`Constraint`] is the closed sum over
//! them. The structured (JSON) form is the serde representation of these
//! structs, the flattened form lives in [`flat`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::{Meeting, SlotId, TeamId, Venue};
use crate::error::DecodeError;

pub mod flat;


/// Identifier of a constraint: its zero-based position within its category.
pub type ConstraintId = usize;

/// The nine constraint categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CA1")]
    Ca1,
    #[serde(rename = "CA2")]
    Ca2,
    #[serde(rename = "CA3")]
    Ca3,
    #[serde(rename = "CA4")]
    Ca4,
    #[serde(rename = "GA1")]
    Ga1,
    #[serde(rename = "SE1")]
    Se1,
    #[serde(rename = "BR1")]
    Br1,
    #[serde(rename = "BR2")]
    Br2,
    #[serde(rename = "FA2")]
    Fa2,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Ca1,
        Category::Ca2,
        Category::Ca3,
        Category::Ca4,
        Category::Ga1,
        Category::Se1,
        Category::Br1,
        Category::Br2,
        Category::Fa2,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Category::Ca1 => "CA1",
            Category::Ca2 => "CA2",
            Category::Ca3 => "CA3",
            Category::Ca4 => "CA4",
            Category::Ga1 => "GA1",
            Category::Se1 => "SE1",
            Category::Br1 => "BR1",
            Category::Br2 => "BR2",
            Category::Fa2 => "FA2",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DecodeError::UnknownCategory(s.to_string()))
    }
}

/// Whether a constraint must hold or is penalized in the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstraintClass {
    Hard,
    Soft,
}

impl ConstraintClass {
    pub const fn token(self) -> &'static str {
        match self {
            ConstraintClass::Hard => "HARD",
            ConstraintClass::Soft => "SOFT",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HARD" => Some(ConstraintClass::Hard),
            "SOFT" => Some(ConstraintClass::Soft),
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Which side of a meeting a constraint is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueMode {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
    #[serde(rename = "HA")]
    Both,
}

impl VenueMode {
    pub const fn token(self) -> &'static str {
        match self {
            VenueMode::Home => "H",
            VenueMode::Away => "A",
            VenueMode::Both => "HA",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "H" => Some(VenueMode::Home),
            "A" => Some(VenueMode::Away),
            "HA" => Some(VenueMode::Both),
            _ => None,
        }
    }

    /// Returns true if a team playing at `venue` is covered by this mode.
    pub fn includes(self, venue: Venue) -> bool {
        matches!(
            (self, venue),
            (VenueMode::Both, _) | (VenueMode::Home, Venue::Home) | (VenueMode::Away, Venue::Away)
        )
    }

    /// The venues covered by this mode, home first.
    pub fn venues(self) -> &'static [Venue] {
        match self {
            VenueMode::Home => &[Venue::Home],
            VenueMode::Away => &[Venue::Away],
            VenueMode::Both => &[Venue::Home, Venue::Away],
        }
    }
}

impl fmt::Display for VenueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// CA4 aggregation: one count over the whole constraint, or one per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationScope {
    Global,
    Every,
}

impl AggregationScope {
    pub const fn token(self) -> &'static str {
        match self {
            AggregationScope::Global => "GLOBAL",
            AggregationScope::Every => "EVERY",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GLOBAL" => Some(AggregationScope::Global),
            "EVERY" => Some(AggregationScope::Every),
            _ => None,
        }
    }
}

impl fmt::Display for AggregationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Value of an attribute the category struct does not model.
///
/// Integer-named attributes (`min`, `max`, `intp`, `penalty`) decode to
/// [`AttributeValue::Int`] when they parse, anything else stays text.
/// Lists only come from the structured form; flattened they are `;`-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => f.write_str(value),
            AttributeValue::List(items) => f.write_str(&items.join(";")),
        }
    }
}

/// Unmodeled attributes of a constraint record, kept for re-encoding.
pub type ExtraAttributes = BTreeMap<String, AttributeValue>;

/// CA1: venue cap for each single (team, slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ca1 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    /// Home or away only.
    pub mode: VenueMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// CA2: venue-filtered opponent count over a slot set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ca2 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams1: Vec<TeamId>,
    pub teams2: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    pub mode2: VenueMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// CA3: opponent cap over every window of `intp` consecutive slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ca3 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams1: Vec<TeamId>,
    pub teams2: Vec<TeamId>,
    /// Window length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intp: Option<i64>,
    pub mode1: VenueMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// CA4: opponent cap over the whole slot set or per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ca4 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams1: Vec<TeamId>,
    pub teams2: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    /// Venue mode used to expand candidate matches; BOTH when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode1: Option<VenueMode>,
    pub mode2: AggregationScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// GA1: fixed meetings that must (or must not) be played in given slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ga1 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub meetings: Vec<Meeting>,
    pub slots: Vec<SlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// SE1: minimum number of slots between the two meetings of each pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Se1 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams: Vec<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// BR1: per-team cap on breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Br1 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    pub mode2: VenueMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intp: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// BR2: cap on the total number of breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Br2 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intp: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

/// FA2: cap on the difference in cumulative home games between teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fa2 {
    #[serde(skip)]
    pub id: ConstraintId,
    #[serde(rename = "type")]
    pub class: ConstraintClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<i64>,
    pub teams: Vec<TeamId>,
    pub slots: Vec<SlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intp: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraAttributes,
}

impl Ca4 {
    /// The venue mode candidates are expanded with.
    pub fn candidate_mode(&self) -> VenueMode {
        self.mode1.unwrap_or(VenueMode::Both)
    }
}

/// Access shared by every category struct.
pub trait CategoryConstraint: Sized {
    const CATEGORY: Category;

    fn id(&self) -> ConstraintId;

    fn class(&self) -> ConstraintClass;

    fn penalty(&self) -> Option<i64>;

    /// Borrows the category struct out of a [`Constraint`] of the same category.
    fn from_constraint(constraint: &Constraint) -> Option<&Self>;

    fn into_constraint(self) -> Constraint;
}

/// A constraint of any category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Ca1(Ca1),
    Ca2(Ca2),
    Ca3(Ca3),
    Ca4(Ca4),
    Ga1(Ga1),
    Se1(Se1),
    Br1(Br1),
    Br2(Br2),
    Fa2(Fa2),
}

macro_rules! impl_category {
    ($($variant:ident),+) => {
        $(
            impl CategoryConstraint for $variant {
                const CATEGORY: Category = Category::$variant;

                fn id(&self) -> ConstraintId {
                    self.id
                }

                fn class(&self) -> ConstraintClass {
                    self.class
                }

                fn penalty(&self) -> Option<i64> {
                    self.penalty
                }

                fn from_constraint(constraint: &Constraint) -> Option<&Self> {
                    match constraint {
                        Constraint::$variant(c) => Some(c),
                        _ => None,
                    }
                }

                fn into_constraint(self) -> Constraint {
                    Constraint::$variant(self)
                }
            }

            impl From<$variant> for Constraint {
                fn from(c: $variant) -> Self {
                    Constraint::$variant(c)
                }
            }
        )+

        impl Constraint {
            pub fn category(&self) -> Category {
                match self {
                    $(Constraint::$variant(_) => Category::$variant,)+
                }
            }

            pub fn id(&self) -> ConstraintId {
                match self {
                    $(Constraint::$variant(c) => c.id,)+
                }
            }

            pub fn class(&self) -> ConstraintClass {
                match self {
                    $(Constraint::$variant(c) => c.class,)+
                }
            }

            pub fn penalty(&self) -> Option<i64> {
                match self {
                    $(Constraint::$variant(c) => c.penalty,)+
                }
            }

            pub(crate) fn set_id(&mut self, id: ConstraintId) {
                match self {
                    $(Constraint::$variant(c) => c.id = id,)+
                }
            }
        }
    };
}

impl_category!(Ca1, Ca2, Ca3, Ca4, Ga1, Se1, Br1, Br2, Fa2);
