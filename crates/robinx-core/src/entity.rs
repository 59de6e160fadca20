//! Entity types: teams, slots, leagues and the pairings between teams.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque team identifier.
    TeamId
);

string_id!(
    /// Identifier of a time slot.
    SlotId
);

/// A team resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            league: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = Some(league.into());
        self
    }
}

/// A time slot resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Slot {
    pub fn new(id: impl Into<SlotId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A league resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The venue at which a team plays a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
}

impl Venue {
    /// Returns the single-letter token used by the external formats.
    pub const fn token(self) -> &'static str {
        match self {
            Venue::Home => "H",
            Venue::Away => "A",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A directed pairing: `home` receives `away`.
///
/// Serialized as a two-element `[home, away]` sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(TeamId, TeamId)", into = "(TeamId, TeamId)")]
pub struct Meeting {
    pub home: TeamId,
    pub away: TeamId,
}

impl Meeting {
    pub fn new(home: impl Into<TeamId>, away: impl Into<TeamId>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Returns the unordered pair of teams, ignoring venue.
    pub fn pair(&self) -> TeamPair {
        TeamPair::new(self.home.clone(), self.away.clone())
    }
}

impl From<(TeamId, TeamId)> for Meeting {
    fn from((home, away): (TeamId, TeamId)) -> Self {
        Self { home, away }
    }
}

impl From<Meeting> for (TeamId, TeamId) {
    fn from(meeting: Meeting) -> Self {
        (meeting.home, meeting.away)
    }
}

/// An unordered pair of teams, stored in canonical (sorted) order.
///
/// # Example
///
/// ```
/// use robinx_core::TeamPair;
///
/// assert_eq!(TeamPair::new("B", "A"), TeamPair::new("A", "B"));
/// assert_eq!(TeamPair::new("B", "A").first().as_str(), "A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamPair {
    first: TeamId,
    second: TeamId,
}

impl TeamPair {
    pub fn new(a: impl Into<TeamId>, b: impl Into<TeamId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &TeamId {
        &self.first
    }

    pub fn second(&self) -> &TeamId {
        &self.second
    }
}

impl fmt::Display for TeamPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_pair_is_order_independent() {
        let xy = TeamPair::new("X", "Y");
        let yx = TeamPair::new("Y", "X");
        assert_eq!(xy, yx);
        assert_eq!(xy.first().as_str(), "X");
        assert_eq!(xy.second().as_str(), "Y");
    }

    #[test]
    fn test_meeting_pair_drops_venue() {
        let home = Meeting::new("B", "A");
        let away = Meeting::new("A", "B");
        assert_ne!(home, away);
        assert_eq!(home.pair(), away.pair());
    }

    #[test]
    fn test_meeting_serializes_as_tuple() {
        let json = serde_json::to_string(&Meeting::new("0", "1")).unwrap();
        assert_eq!(json, r#"["0","1"]"#);
        let back: Meeting = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Meeting::new("0", "1"));
    }

    #[test]
    fn test_team_builder() {
        let team = Team::new("3").with_name("Lions").with_league("0");
        assert_eq!(team.id.as_str(), "3");
        assert_eq!(team.name.as_deref(), Some("Lions"));
        assert_eq!(team.league.as_deref(), Some("0"));
    }
}
