use std::{collections::BTreeSet, fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Set of user ids backing the like and connection relations.
///
/// The legacy textual form is the ids joined by single spaces (`"3 7 12"`); an
/// empty set renders as `""`. Parsing accepts any run of whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberSet(BTreeSet<EntityId>);

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: EntityId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.0.remove(&id)
    }

    /// Flips the membership of `id` and returns whether it is a member afterwards.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for MemberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for MemberSet {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse::<EntityId>).collect()
    }
}

impl FromIterator<EntityId> for MemberSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How a listed user relates to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Connected,
    Myself,
    NotConnected,
}

impl Relationship {
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::Connected => "connected",
            Relationship::Myself => "you",
            Relationship::NotConnected => "not connected",
        }
    }
}
