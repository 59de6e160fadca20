//! Tournament instance: teams, ordered slots and typed constraints.

use std::collections::{BTreeMap, HashSet};

use crate::constraint::{Category, CategoryConstraint, Constraint, ConstraintClass, ConstraintId};
use crate::entity::{League, Slot, Team, TeamId};
use crate::error::{DecodeError, LookupError};
use crate::slots::SlotOrder;

/// An immutable tournament instance.
///
/// Constraint ids are the position of each constraint within its category,
/// in the order the constraints were handed to [`Instance::new`].
///
/// # Example
///
/// ```
/// use robinx_core::{Ca1, Category, ConstraintClass, Instance, Slot, Team, VenueMode};
///
/// let teams = ["A", "B"].map(Team::new).to_vec();
/// let slots = ["0", "1"].map(Slot::new).to_vec();
/// let cap = Ca1 {
///     id: 0,
///     class: ConstraintClass::Soft,
///     penalty: Some(5),
///     teams: vec!["A".into()],
///     slots: vec!["0".into()],
///     mode: VenueMode::Home,
///     min: Some(0),
///     max: Some(0),
///     extra: Default::default(),
/// };
/// let instance = Instance::new(teams, slots, Vec::new(), [cap.into()]).unwrap();
///
/// assert_eq!(instance.constraints_of(Category::Ca1, None).len(), 1);
/// assert_eq!(instance.penalty_of(Category::Ca1, 0).unwrap(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    name: Option<String>,
    teams: Vec<Team>,
    slots: Vec<Slot>,
    slot_order: SlotOrder,
    leagues: Vec<League>,
    constraints: BTreeMap<Category, Vec<Constraint>>,
}

impl Instance {
    /// Builds an instance, renumbering constraints by position per category.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::DuplicateId`] if two teams or two slots share an id.
    pub fn new(
        teams: Vec<Team>,
        slots: Vec<Slot>,
        leagues: Vec<League>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Result<Self, DecodeError> {
        let mut seen = HashSet::new();
        if let Some(team) = teams.iter().find(|t| !seen.insert(t.id.as_str())) {
            return Err(DecodeError::DuplicateId {
                kind: "team",
                id: team.id.to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(slot) = slots.iter().find(|s| !seen.insert(s.id.as_str())) {
            return Err(DecodeError::DuplicateId {
                kind: "slot",
                id: slot.id.to_string(),
            });
        }

        let mut by_category: BTreeMap<Category, Vec<Constraint>> = BTreeMap::new();
        for mut constraint in constraints {
            let list = by_category.entry(constraint.category()).or_default();
            constraint.set_id(list.len());
            list.push(constraint);
        }

        let slot_order = SlotOrder::new(slots.iter().map(|s| s.id.clone()));
        Ok(Self {
            name: None,
            teams,
            slots,
            slot_order,
            leagues,
            constraints: by_category,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter().map(|t| &t.id)
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_order(&self) -> &SlotOrder {
        &self.slot_order
    }

    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    /// Constraints of `category`, optionally restricted to one class.
    ///
    /// Never fails; an empty map means there is nothing to check.
    pub fn constraints_of(
        &self,
        category: Category,
        class: Option<ConstraintClass>,
    ) -> BTreeMap<ConstraintId, &Constraint> {
        self.all_of(category)
            .iter()
            .filter(|c| class.map_or(true, |class| c.class() == class))
            .map(|c| (c.id(), c))
            .collect()
    }

    /// Typed view over the constraints of one category.
    pub fn constraints<'a, C: CategoryConstraint + 'a>(
        &'a self,
        class: Option<ConstraintClass>,
    ) -> impl Iterator<Item = &'a C> {
        self.all_of(C::CATEGORY)
            .iter()
            .filter_map(C::from_constraint)
            .filter(move |c| class.map_or(true, |class| c.class() == class))
    }

    pub fn constraint(&self, category: Category, id: ConstraintId) -> Option<&Constraint> {
        self.all_of(category).get(id)
    }

    /// All constraints, category by category.
    pub fn iter_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values().flatten()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.values().map(Vec::len).sum()
    }

    /// Penalty of a SOFT constraint.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids, HARD constraints and SOFT constraints without
    /// a penalty. There is no default.
    pub fn penalty_of(&self, category: Category, id: ConstraintId) -> Result<i64, LookupError> {
        let constraint = self
            .constraint(category, id)
            .ok_or(LookupError::UnknownConstraint { category, id })?;
        if constraint.class() == ConstraintClass::Hard {
            return Err(LookupError::HardConstraint { category, id });
        }
        constraint
            .penalty()
            .ok_or(LookupError::MissingPenalty { category, id })
    }

    fn all_of(&self, category: Category) -> &[Constraint] {
        self.constraints
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
