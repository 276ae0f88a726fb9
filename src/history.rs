//! History of previously recorded groups.
//!
//! Only what was literally recorded is remembered: a 2-person record adds
//! its pair, a 3-person record adds its exact triple. The pairs inside a
//! recorded trio are not forbidden on their own.

use std::collections::HashSet;

use tracing::debug;

use crate::error::MatchError;
use crate::group::{Group, SubPairing, Triple};
use crate::participant::normalize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pairs: HashSet<SubPairing>,
    triples: HashSet<Triple>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one recorded group.
    pub fn record(&mut self, group: &Group) {
        match group.triple() {
            Some(triple) => {
                self.triples.insert(triple);
            }
            None => {
                self.pairs.extend(group.sub_pairings());
            }
        }
    }

    pub fn contains_pair(&self, pair: &SubPairing) -> bool {
        self.pairs.contains(pair)
    }

    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &SubPairing> {
        self.pairs.iter()
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.triples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.triples.len()
    }
}

/// Build a history from already-validated groups.
pub fn build_history<'a, I>(records: I) -> History
where
    I: IntoIterator<Item = &'a Group>,
{
    let mut history = History::new();
    for group in records {
        history.record(group);
    }
    history
}

/// Parse raw history rows (as read from storage) into groups.
///
/// Every member passes through [`normalize`]. Blank trailing cells are
/// ignored; a row that still is not a group of 2 or 3 distinct people is
/// rejected rather than guessed at.
pub fn parse_records<R, S>(rows: &[R]) -> Result<Vec<Group>, MatchError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut groups = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let cells = row.as_ref();
        let members: Vec<_> = cells.iter().filter_map(|cell| normalize(cell.as_ref())).collect();
        if members.is_empty() {
            debug!(index, "skipping empty history row");
            continue;
        }

        let group = Group::new(members).map_err(|err| MatchError::MalformedRecord {
            index,
            reason: match err {
                MatchError::InvalidGroup { reason } => reason,
                other => other.to_string(),
            },
        })?;
        groups.push(group);
    }

    Ok(groups)
}
