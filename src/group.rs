//! Groups, the sub-pairings derived from them, and complete plans.

use std::fmt;

use serde::Serialize;

use crate::error::MatchError;
use crate::participant::Participant;

/// Two or three distinct participants, kept sorted by canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Group {
    members: Vec<Participant>,
}

impl Group {
    /// Build a group, rejecting sizes other than 2 or 3 and repeated members.
    pub fn new(mut members: Vec<Participant>) -> Result<Self, MatchError> {
        if !(2..=3).contains(&members.len()) {
            return Err(MatchError::InvalidGroup {
                reason: format!("expected 2 or 3 members, got {}", members.len()),
            });
        }

        members.sort();
        if members.windows(2).any(|w| w[0] == w[1]) {
            return Err(MatchError::InvalidGroup {
                reason: format!("member '{}' appears more than once", duplicate(&members)),
            });
        }

        Ok(Self { members })
    }

    /// Build from members already known to be 2 or 3 distinct people.
    pub(crate) fn from_distinct(mut members: Vec<Participant>) -> Self {
        debug_assert!((2..=3).contains(&members.len()));
        members.sort();
        Self { members }
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_trio(&self) -> bool {
        self.members.len() == 3
    }

    pub fn contains(&self, participant: &Participant) -> bool {
        self.members.contains(participant)
    }

    /// Every 2-combination of the members: one for a pair, three for a trio.
    pub fn sub_pairings(&self) -> impl Iterator<Item = SubPairing> + '_ {
        let m = &self.members;
        (0..m.len()).flat_map(move |i| {
            (i + 1..m.len()).map(move |j| SubPairing::new(m[i].clone(), m[j].clone()))
        })
    }

    /// The exact identity of a 3-person group.
    pub fn triple(&self) -> Option<Triple> {
        match self.members.as_slice() {
            [a, b, c] => Some(Triple::new(a.clone(), b.clone(), c.clone())),
            _ => None,
        }
    }
}

fn duplicate(sorted: &[Participant]) -> &str {
    sorted
        .windows(2)
        .find(|w| w[0] == w[1])
        .map_or("", |w| w[0].display())
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" - ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

/// An unordered pair of participants stored in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SubPairing(Participant, Participant);

impl SubPairing {
    pub fn new(a: Participant, b: Participant) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> &Participant {
        &self.0
    }

    pub fn second(&self) -> &Participant {
        &self.1
    }
}

impl fmt::Display for SubPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0, self.1)
    }
}

/// The exact identity of a 3-person group, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Triple([Participant; 3]);

impl Triple {
    pub fn new(a: Participant, b: Participant, c: Participant) -> Self {
        let mut members = [a, b, c];
        members.sort();
        Self(members)
    }

    pub fn members(&self) -> &[Participant; 3] {
        &self.0
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.0[0], self.0[1], self.0[2])
    }
}

/// An ordered sequence of groups that partitions a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchingPlan {
    groups: Vec<Group>,
}

impl MatchingPlan {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.groups.iter().flat_map(|g| g.members().iter())
    }

    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}
