//! Participant identifiers and the single normalization rule applied at the
//! roster/history boundary.
//!
//! Storage layers decorate names with marker characters (`*alice`, `✓ Bob`)
//! and are inconsistent about case. [`normalize`] is the only place such
//! noise is removed:
//!
//! 1. surrounding whitespace is trimmed;
//! 2. leading characters that are neither alphanumeric nor whitespace are
//!    stripped, then whitespace is trimmed again;
//! 3. internal whitespace runs collapse to a single space.
//!
//! What remains is the display name. Its lowercase form is the canonical
//! key, and equality, hashing and ordering look at the key only.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Participant {
    key: String,
    display: String,
}

impl Participant {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Participant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Participant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for Participant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

/// Normalize a raw identifier. Returns `None` for blank input.
pub fn normalize(raw: &str) -> Option<Participant> {
    let stripped = raw
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric() && !c.is_whitespace())
        .trim();

    let display = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if display.is_empty() {
        return None;
    }

    Some(Participant {
        key: display.to_lowercase(),
        display,
    })
}

/// Normalize a raw roster: blank entries are dropped and only the first
/// occurrence of each canonical identity is kept.
pub fn normalize_roster<I, S>(raw: I) -> Vec<Participant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut roster = Vec::new();

    for entry in raw {
        let entry = entry.as_ref();
        let Some(participant) = normalize(entry) else {
            continue;
        };
        if seen.insert(participant.key.clone()) {
            roster.push(participant);
        } else {
            debug!(entry, "dropping duplicate roster entry");
        }
    }

    roster
}
