//! External instance documents.
//!
//! Two lossless forms share the same resources (teams, slots, leagues) and
//! differ in how constraints are written:
//! - [`StructuredInstance`]: nested sequences and native integers (JSON-like)
//! - [`FlatInstance`]: attribute maps with `;`-joined lists (XML-attribute-like)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constraint::flat::{flatten, unflatten};
use crate::constraint::{
    Br1, Br2, Ca1, Ca2, Ca3, Ca4, Category, CategoryConstraint, Constraint, Fa2, Ga1, Se1,
};
use crate::entity::{League, Slot, Team};
use crate::error::DecodeError;
use crate::instance::Instance;

pub use crate::constraint::flat::FlatConstraint;

/// Instance document with structured constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub teams: Vec<Team>,
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub constraints: StructuredConstraints,
}

/// Structured constraints, one list per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredConstraints {
    #[serde(rename = "CA1", default)]
    pub ca1: Vec<Ca1>,
    #[serde(rename = "CA2", default)]
    pub ca2: Vec<Ca2>,
    #[serde(rename = "CA3", default)]
    pub ca3: Vec<Ca3>,
    #[serde(rename = "CA4", default)]
    pub ca4: Vec<Ca4>,
    #[serde(rename = "GA1", default)]
    pub ga1: Vec<Ga1>,
    #[serde(rename = "SE1", default)]
    pub se1: Vec<Se1>,
    #[serde(rename = "BR1", default)]
    pub br1: Vec<Br1>,
    #[serde(rename = "BR2", default)]
    pub br2: Vec<Br2>,
    #[serde(rename = "FA2", default)]
    pub fa2: Vec<Fa2>,
}

impl StructuredConstraints {
    fn into_constraints(self) -> impl Iterator<Item = Constraint> {
        fn wrap<C: CategoryConstraint>(list: Vec<C>) -> impl Iterator<Item = Constraint> {
            list.into_iter().map(C::into_constraint)
        }

        wrap(self.ca1)
            .chain(wrap(self.ca2))
            .chain(wrap(self.ca3))
            .chain(wrap(self.ca4))
            .chain(wrap(self.ga1))
            .chain(wrap(self.se1))
            .chain(wrap(self.br1))
            .chain(wrap(self.br2))
            .chain(wrap(self.fa2))
    }

    fn push(&mut self, constraint: Constraint) {
        match constraint {
            Constraint::Ca1(c) => self.ca1.push(c),
            Constraint::Ca2(c) => self.ca2.push(c),
            Constraint::Ca3(c) => self.ca3.push(c),
            Constraint::Ca4(c) => self.ca4.push(c),
            Constraint::Ga1(c) => self.ga1.push(c),
            Constraint::Se1(c) => self.se1.push(c),
            Constraint::Br1(c) => self.br1.push(c),
            Constraint::Br2(c) => self.br2.push(c),
            Constraint::Fa2(c) => self.fa2.push(c),
        }
    }
}

/// Instance document with flattened constraints, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub teams: Vec<Team>,
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub constraints: BTreeMap<String, Vec<FlatConstraint>>,
}

impl Instance {
    pub fn from_structured(doc: StructuredInstance) -> Result<Self, DecodeError> {
        let instance = Instance::new(
            doc.teams,
            doc.slots,
            doc.leagues,
            doc.constraints.into_constraints(),
        )?;
        Ok(match doc.name {
            Some(name) => instance.with_name(name),
            None => instance,
        })
    }

    pub fn to_structured(&self) -> StructuredInstance {
        let mut constraints = StructuredConstraints::default();
        for constraint in self.iter_constraints() {
            constraints.push(constraint.clone());
        }
        StructuredInstance {
            name: self.name().map(str::to_string),
            teams: self.teams().to_vec(),
            slots: self.slots().to_vec(),
            leagues: self.leagues().to_vec(),
            constraints,
        }
    }

    /// Decodes a flattened document.
    ///
    /// # Errors
    ///
    /// Fails on unknown category names and on any malformed record.
    pub fn from_flat(doc: FlatInstance) -> Result<Self, DecodeError> {
        let mut constraints = Vec::new();
        for (name, records) in &doc.constraints {
            let category: Category = name.parse()?;
            for (id, record) in records.iter().enumerate() {
                constraints.push(unflatten(category, id, record)?);
            }
        }
        let instance = Instance::new(doc.teams, doc.slots, doc.leagues, constraints)?;
        Ok(match doc.name {
            Some(name) => instance.with_name(name),
            None => instance,
        })
    }

    pub fn to_flat(&self) -> FlatInstance {
        let mut constraints: BTreeMap<String, Vec<FlatConstraint>> = BTreeMap::new();
        for constraint in self.iter_constraints() {
            constraints
                .entry(constraint.category().name().to_string())
                .or_default()
                .push(flatten(constraint));
        }
        FlatInstance {
            name: self.name().map(str::to_string),
            teams: self.teams().to_vec(),
            slots: self.slots().to_vec(),
            leagues: self.leagues().to_vec(),
            constraints,
        }
    }
}
