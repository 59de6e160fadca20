//! Flattened (attribute-map) representation of constraints.
//!
//! Every field is a string attribute: set-valued fields are `;`-joined,
//! GA1 meetings additionally `,`-join home and away, integers are decimal
//! strings. Constraint ids are not stored; they are the record's position
//! within its category. Absent integers stay unset, and attributes a
//! category does not model are carried through unchanged.

use std::collections::BTreeMap;

use super::{
    AggregationScope, AttributeValue, Br1, Br2, Ca1, Ca2, Ca3, Ca4, Category,
    CategoryConstraint, Constraint, ConstraintClass, ConstraintId, ExtraAttributes, Fa2, Ga1,
    Se1, VenueMode,
};
use crate::entity::{Meeting, SlotId, TeamId};
use crate::error::DecodeError;

/// A constraint as a flat attribute map.
pub type FlatConstraint = BTreeMap<String, String>;

const LIST_SEPARATOR: &str = ";";
const TUPLE_SEPARATOR: &str = ",";

/// Attributes read as integers whenever they parse, modeled or not.
const INTEGER_ATTRIBUTES: [&str; 4] = ["min", "max", "intp", "penalty"];

/// Conversion between a category struct and its flattened record.
pub trait FlatFields: CategoryConstraint {
    /// Attributes the struct models, besides `type` and `penalty`.
    const ATTRIBUTES: &'static [&'static str];

    fn to_flat(&self) -> FlatConstraint;

    /// Decodes the record found at position `id` of the category.
    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError>;
}

/// Flattens a constraint of any category.
pub fn flatten(constraint: &Constraint) -> FlatConstraint {
    match constraint {
        Constraint::Ca1(c) => c.to_flat(),
        Constraint::Ca2(c) => c.to_flat(),
        Constraint::Ca3(c) => c.to_flat(),
        Constraint::Ca4(c) => c.to_flat(),
        Constraint::Ga1(c) => c.to_flat(),
        Constraint::Se1(c) => c.to_flat(),
        Constraint::Br1(c) => c.to_flat(),
        Constraint::Br2(c) => c.to_flat(),
        Constraint::Fa2(c) => c.to_flat(),
    }
}

/// Decodes a flattened record of the given category.
pub fn unflatten(
    category: Category,
    id: ConstraintId,
    record: &FlatConstraint,
) -> Result<Constraint, DecodeError> {
    Ok(match category {
        Category::Ca1 => Ca1::from_flat(id, record)?.into(),
        Category::Ca2 => Ca2::from_flat(id, record)?.into(),
        Category::Ca3 => Ca3::from_flat(id, record)?.into(),
        Category::Ca4 => Ca4::from_flat(id, record)?.into(),
        Category::Ga1 => Ga1::from_flat(id, record)?.into(),
        Category::Se1 => Se1::from_flat(id, record)?.into(),
        Category::Br1 => Br1::from_flat(id, record)?.into(),
        Category::Br2 => Br2::from_flat(id, record)?.into(),
        Category::Fa2 => Fa2::from_flat(id, record)?.into(),
    })
}

struct Writer(FlatConstraint);

impl Writer {
    fn new(class: ConstraintClass, penalty: Option<i64>, extra: &ExtraAttributes) -> Self {
        let mut record: FlatConstraint = extra
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        record.insert("type".to_string(), class.token().to_string());
        Self(record).int("penalty", penalty)
    }

    fn list<T: AsRef<str>>(mut self, name: &str, items: impl IntoIterator<Item = T>) -> Self {
        let joined = items
            .into_iter()
            .map(|item| item.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);
        self.0.insert(name.to_string(), joined);
        self
    }

    fn meetings(self, name: &str, meetings: &[Meeting]) -> Self {
        let tuples = meetings
            .iter()
            .map(|m| format!("{}{TUPLE_SEPARATOR}{}", m.home, m.away));
        self.list(name, tuples)
    }

    fn token(mut self, name: &str, token: Option<&str>) -> Self {
        if let Some(token) = token {
            self.0.insert(name.to_string(), token.to_string());
        }
        self
    }

    fn int(mut self, name: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.0.insert(name.to_string(), value.to_string());
        }
        self
    }

    fn finish(self) -> FlatConstraint {
        self.0
    }
}

struct Reader<'a> {
    category: Category,
    index: usize,
    record: &'a FlatConstraint,
}

impl<'a> Reader<'a> {
    fn new<C: CategoryConstraint>(index: usize, record: &'a FlatConstraint) -> Self {
        Self {
            category: C::CATEGORY,
            index,
            record,
        }
    }

    fn raw(&self, attribute: &'static str) -> Result<&'a str, DecodeError> {
        self.record
            .get(attribute)
            .map(String::as_str)
            .ok_or(DecodeError::MissingAttribute {
                category: self.category,
                index: self.index,
                attribute,
            })
    }

    fn invalid(&self, attribute: &'static str, value: &str) -> DecodeError {
        DecodeError::InvalidToken {
            category: self.category,
            index: self.index,
            attribute,
            value: value.to_string(),
        }
    }

    fn class(&self) -> Result<ConstraintClass, DecodeError> {
        let token = self.raw("type")?;
        ConstraintClass::from_token(token).ok_or_else(|| self.invalid("type", token))
    }

    fn tokens(&self, attribute: &'static str) -> Result<impl Iterator<Item = &'a str>, DecodeError> {
        Ok(self
            .raw(attribute)?
            .split(LIST_SEPARATOR)
            .filter(|token| !token.is_empty()))
    }

    fn teams(&self, attribute: &'static str) -> Result<Vec<TeamId>, DecodeError> {
        Ok(self.tokens(attribute)?.map(TeamId::from).collect())
    }

    fn slots(&self) -> Result<Vec<SlotId>, DecodeError> {
        Ok(self.tokens("slots")?.map(SlotId::from).collect())
    }

    fn meetings(&self) -> Result<Vec<Meeting>, DecodeError> {
        self.tokens("meetings")?
            .map(|tuple| match tuple.split(TUPLE_SEPARATOR).collect::<Vec<_>>()[..] {
                [home, away] if !home.is_empty() && !away.is_empty() => {
                    Ok(Meeting::new(home, away))
                }
                _ => Err(DecodeError::InvalidMeeting {
                    category: self.category,
                    index: self.index,
                    value: tuple.to_string(),
                }),
            })
            .collect()
    }

    fn venue(&self, attribute: &'static str) -> Result<VenueMode, DecodeError> {
        let token = self.raw(attribute)?;
        VenueMode::from_token(token).ok_or_else(|| self.invalid(attribute, token))
    }

    fn opt_venue(&self, attribute: &'static str) -> Result<Option<VenueMode>, DecodeError> {
        if self.record.contains_key(attribute) {
            self.venue(attribute).map(Some)
        } else {
            Ok(None)
        }
    }

    fn scope(&self, attribute: &'static str) -> Result<AggregationScope, DecodeError> {
        let token = self.raw(attribute)?;
        AggregationScope::from_token(token).ok_or_else(|| self.invalid(attribute, token))
    }

    fn int(&self, attribute: &'static str) -> Result<Option<i64>, DecodeError> {
        match self.record.get(attribute) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| DecodeError::NotAnInteger {
                    category: self.category,
                    index: self.index,
                    attribute,
                    value: value.clone(),
                }),
        }
    }

    fn extra(&self, modeled: &[&str]) -> ExtraAttributes {
        self.record
            .iter()
            .filter(|(name, _)| {
                let name = name.as_str();
                name != "type" && name != "penalty" && !modeled.contains(&name)
            })
            .map(|(name, value)| {
                let parsed = INTEGER_ATTRIBUTES
                    .contains(&name.as_str())
                    .then(|| value.trim().parse().ok())
                    .flatten();
                let value = match parsed {
                    Some(int) => AttributeValue::Int(int),
                    None => AttributeValue::Text(value.clone()),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl FlatFields for Ca1 {
    const ATTRIBUTES: &'static [&'static str] = &["teams", "slots", "mode", "min", "max"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams", &self.teams)
            .list("slots", &self.slots)
            .token("mode", Some(self.mode.token()))
            .int("min", self.min)
            .int("max", self.max)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        let mode = r.venue("mode")?;
        if mode == VenueMode::Both {
            return Err(r.invalid("mode", mode.token()));
        }
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams: r.teams("teams")?,
            slots: r.slots()?,
            mode,
            min: r.int("min")?,
            max: r.int("max")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Ca2 {
    const ATTRIBUTES: &'static [&'static str] =
        &["teams1", "teams2", "slots", "mode2", "min", "max"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams1", &self.teams1)
            .list("teams2", &self.teams2)
            .list("slots", &self.slots)
            .token("mode2", Some(self.mode2.token()))
            .int("min", self.min)
            .int("max", self.max)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams1: r.teams("teams1")?,
            teams2: r.teams("teams2")?,
            slots: r.slots()?,
            mode2: r.venue("mode2")?,
            min: r.int("min")?,
            max: r.int("max")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Ca3 {
    const ATTRIBUTES: &'static [&'static str] = &["teams1", "teams2", "intp", "mode1", "max"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams1", &self.teams1)
            .list("teams2", &self.teams2)
            .int("intp", self.intp)
            .token("mode1", Some(self.mode1.token()))
            .int("max", self.max)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams1: r.teams("teams1")?,
            teams2: r.teams("teams2")?,
            intp: r.int("intp")?,
            mode1: r.venue("mode1")?,
            max: r.int("max")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Ca4 {
    const ATTRIBUTES: &'static [&'static str] =
        &["teams1", "teams2", "slots", "mode1", "mode2", "max"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams1", &self.teams1)
            .list("teams2", &self.teams2)
            .list("slots", &self.slots)
            .token("mode1", self.mode1.map(VenueMode::token))
            .token("mode2", Some(self.mode2.token()))
            .int("max", self.max)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams1: r.teams("teams1")?,
            teams2: r.teams("teams2")?,
            slots: r.slots()?,
            mode1: r.opt_venue("mode1")?,
            mode2: r.scope("mode2")?,
            max: r.int("max")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Ga1 {
    const ATTRIBUTES: &'static [&'static str] = &["meetings", "slots", "min", "max"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .meetings("meetings", &self.meetings)
            .list("slots", &self.slots)
            .int("min", self.min)
            .int("max", self.max)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            meetings: r.meetings()?,
            slots: r.slots()?,
            min: r.int("min")?,
            max: r.int("max")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Se1 {
    const ATTRIBUTES: &'static [&'static str] = &["teams", "min"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams", &self.teams)
            .int("min", self.min)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams: r.teams("teams")?,
            min: r.int("min")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Br1 {
    const ATTRIBUTES: &'static [&'static str] = &["teams", "slots", "mode2", "intp"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams", &self.teams)
            .list("slots", &self.slots)
            .token("mode2", Some(self.mode2.token()))
            .int("intp", self.intp)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams: r.teams("teams")?,
            slots: r.slots()?,
            mode2: r.venue("mode2")?,
            intp: r.int("intp")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Br2 {
    const ATTRIBUTES: &'static [&'static str] = &["teams", "slots", "intp"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams", &self.teams)
            .list("slots", &self.slots)
            .int("intp", self.intp)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams: r.teams("teams")?,
            slots: r.slots()?,
            intp: r.int("intp")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}

impl FlatFields for Fa2 {
    const ATTRIBUTES: &'static [&'static str] = &["teams", "slots", "intp"];

    fn to_flat(&self) -> FlatConstraint {
        Writer::new(self.class, self.penalty, &self.extra)
            .list("teams", &self.teams)
            .list("slots", &self.slots)
            .int("intp", self.intp)
            .finish()
    }

    fn from_flat(id: ConstraintId, record: &FlatConstraint) -> Result<Self, DecodeError> {
        let r = Reader::new::<Self>(id, record);
        Ok(Self {
            id,
            class: r.class()?,
            penalty: r.int("penalty")?,
            teams: r.teams("teams")?,
            slots: r.slots()?,
            intp: r.int("intp")?,
            extra: r.extra(Self::ATTRIBUTES),
        })
    }
}
