//! Detection of repeated groupings in a complete plan.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::group::{MatchingPlan, SubPairing, Triple};
use crate::history::History;

/// Sub-pairings (and exact trios) of a plan that already occur in history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepeatReport {
    pub pairs: BTreeSet<SubPairing>,
    pub triples: BTreeSet<Triple>,
}

impl RepeatReport {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.triples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.triples.len()
    }

    pub fn contains_pair(&self, pair: &SubPairing) -> bool {
        self.pairs.contains(pair)
    }
}

pub fn find_repeats(plan: &MatchingPlan, history: &History) -> RepeatReport {
    let mut report = RepeatReport::default();
    for group in plan.groups() {
        report
            .pairs
            .extend(group.sub_pairings().filter(|pair| history.contains_pair(pair)));
        if let Some(triple) = group.triple().filter(|t| history.contains_triple(t)) {
            report.triples.insert(triple);
        }
    }
    report
}

pub fn count_repeats(plan: &MatchingPlan, history: &History) -> usize {
    find_repeats(plan, history).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;
    use crate::history::{build_history, parse_records};
    use crate::participant::normalize;
    use pretty_assertions::assert_eq;

    fn group(names: &[&str]) -> Group {
        Group::new(names.iter().map(|n| normalize(n).unwrap()).collect()).unwrap()
    }

    fn history(rows: &[&[&str]]) -> History {
        let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.to_vec()).collect();
        build_history(&parse_records(&rows).unwrap())
    }

    fn pair(a: &str, b: &str) -> SubPairing {
        SubPairing::new(normalize(a).unwrap(), normalize(b).unwrap())
    }

    #[test]
    fn fresh_plan_has_no_repeats() {
        let plan = MatchingPlan::new(vec![group(&["a", "b"]), group(&["c", "d"])]);
        let report = find_repeats(&plan, &history(&[&["a", "c"]]));
        assert!(report.is_empty());
        assert_eq!(count_repeats(&plan, &History::new()), 0);
    }

    #[test]
    fn reports_pairs_inside_trios() {
        let plan = MatchingPlan::new(vec![group(&["a", "b"]), group(&["c", "d", "e"])]);
        let h = history(&[&["a", "b"], &["d", "e"], &["x", "y"]]);
        let report = find_repeats(&plan, &h);
        assert_eq!(report.pairs, BTreeSet::from([pair("a", "b"), pair("d", "e")]));
        assert!(report.triples.is_empty());
        assert_eq!(count_repeats(&plan, &h), 2);
    }

    #[test]
    fn reports_exact_trio_repeat() {
        let plan = MatchingPlan::new(vec![group(&["a", "b", "c"])]);
        let report = find_repeats(&plan, &history(&[&["c", "b", "a"]]));
        assert!(report.pairs.is_empty());
        assert_eq!(report.triples.len(), 1);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn same_pair_is_reported_once() {
        // Not a real partition, but the detector must not double count.
        let plan = MatchingPlan::new(vec![group(&["a", "b"]), group(&["a", "b", "c"])]);
        let report = find_repeats(&plan, &history(&[&["a", "b"]]));
        assert_eq!(report.len(), 1);
        assert!(report.contains_pair(&pair("b", "a")));
    }
}
