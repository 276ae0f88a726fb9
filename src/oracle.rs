//! Validity of a single candidate group against history.

use crate::group::Group;
use crate::history::History;

/// `true` when no pair inside `candidate` was recorded before and, for a
/// trio, the exact trio was not recorded either.
pub fn is_valid(candidate: &Group, history: &History) -> bool {
    if candidate.sub_pairings().any(|pair| history.contains_pair(&pair)) {
        return false;
    }
    match candidate.triple() {
        Some(triple) => !history.contains_triple(&triple),
        None => true,
    }
}
