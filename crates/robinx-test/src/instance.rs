//! A small builder for test instances.

use robinx_core::{Constraint, Instance, Slot, SlotId, Team, TeamId};

use crate::schedule::{double_round_robin_slots, slot_ids, team_ids};

/// Builds an [`Instance`] from team ids, slot ids and constraints.
///
/// # Example
///
/// ```
/// use robinx_test::InstanceBuilder;
///
/// let instance = InstanceBuilder::new()
///     .teams(["A", "B", "C", "D"])
///     .slots(["s1", "s2", "s3"])
///     .build();
/// assert_eq!(instance.num_teams(), 4);
/// assert_eq!(instance.slot_order().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    name: Option<String>,
    teams: Vec<TeamId>,
    slots: Vec<SlotId>,
    constraints: Vec<Constraint>,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Teams `"0"..n` with exactly the slots a double round-robin needs.
    pub fn double_round_robin(n: usize) -> Self {
        Self::new()
            .teams(team_ids(n))
            .slots(slot_ids(double_round_robin_slots(n)))
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn teams<T: Into<TeamId>>(mut self, teams: impl IntoIterator<Item = T>) -> Self {
        self.teams = teams.into_iter().map(Into::into).collect();
        self
    }

    pub fn slots<S: Into<SlotId>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.slots = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Builds the instance.
    ///
    /// # Panics
    ///
    /// Panics on duplicate team or slot ids.
    pub fn build(self) -> Instance {
        let teams = self.teams.into_iter().map(Team::new).collect();
        let slots = self.slots.into_iter().map(Slot::new).collect();
        let instance = Instance::new(teams, slots, Vec::new(), self.constraints)
            .expect("test instance has duplicate ids");
        match self.name {
            Some(name) => instance.with_name(name),
            None => instance,
        }
    }
}
