use std::collections::HashSet;

use pair_rotation::{
    build_history, count_repeats, find_all_partitions, is_valid, normalize_roster, parse_records, Group,
    History, MatchConfig, MatchOutcome, Matcher, Participant,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MIN_PROPTEST_CASES: u32 = 128;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("person{i:02}")).collect()
}

/// Random history over `n` people: index pairs and index triples.
fn scenario(max_n: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<(usize, usize, usize)>, u64)> {
    (2..=max_n).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..(n * 2)),
            prop::collection::vec((0..n, 0..n, 0..n), 0..n),
            any::<u64>(),
        )
    })
}

fn records(
    n: usize,
    pairs: &[(usize, usize)],
    triples: &[(usize, usize, usize)],
) -> (Vec<String>, Vec<Group>) {
    let roster = names(n);
    let mut rows: Vec<Vec<String>> = pairs
        .iter()
        .filter(|(a, b)| a != b)
        .map(|&(a, b)| vec![roster[a].clone(), roster[b].clone()])
        .collect();
    rows.extend(
        triples
            .iter()
            .filter(|(a, b, c)| a != b && b != c && a != c)
            .map(|&(a, b, c)| vec![roster[a].clone(), roster[b].clone(), roster[c].clone()]),
    );
    let groups = parse_records(&rows).expect("generated rows are well formed");
    (roster, groups)
}

fn build(
    n: usize,
    pairs: &[(usize, usize)],
    triples: &[(usize, usize, usize)],
) -> (Vec<String>, History) {
    let (roster, groups) = records(n, pairs, triples);
    (roster, build_history(&groups))
}

fn run(roster: &[String], history: &History, seed: u64) -> MatchOutcome {
    let matcher = Matcher::new(MatchConfig {
        heuristic_attempts: 200,
        exact_node_limit: 20_000,
        ..MatchConfig::default()
    })
    .expect("valid config");
    matcher
        .run_with_rng(roster, history, &mut StdRng::seed_from_u64(seed))
        .expect("rosters of two or more always get a plan")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn plan_partitions_roster_with_valid_shapes((n, pairs, triples, seed) in scenario(16)) {
        let (roster, history) = build(n, &pairs, &triples);
        let outcome = run(&roster, &history, seed);

        let mut seen = HashSet::new();
        for participant in outcome.plan.participants() {
            prop_assert!(seen.insert(participant.key().to_string()), "duplicate {}", participant);
        }
        let expected: HashSet<String> = roster.iter().cloned().collect();
        prop_assert_eq!(seen, expected);

        let trios = outcome.plan.groups().iter().filter(|g| g.len() == 3).count();
        prop_assert_eq!(trios, n % 2);
        prop_assert!(outcome.plan.groups().iter().all(|g| g.len() == 2 || g.len() == 3));
    }

    #[test]
    fn repeat_report_is_sound_and_complete((n, pairs, triples, seed) in scenario(16)) {
        let (roster, history) = build(n, &pairs, &triples);
        let outcome = run(&roster, &history, seed);

        for pair in &outcome.repeats.pairs {
            prop_assert!(history.contains_pair(pair));
            prop_assert!(outcome.plan.groups().iter().any(|g| g.contains(pair.first()) && g.contains(pair.second())));
        }
        for triple in &outcome.repeats.triples {
            prop_assert!(history.contains_triple(triple));
        }
        prop_assert_eq!(outcome.repeats.len(), count_repeats(&outcome.plan, &history));

        if outcome.repeats.is_empty() {
            prop_assert!(outcome.plan.groups().iter().all(|g| is_valid(g, &history)));
        }
    }

    #[test]
    fn small_rosters_find_a_fresh_plan_when_one_exists((n, pairs, triples, seed) in scenario(9)) {
        let (roster, history) = build(n, &pairs, &triples);
        let participants: Vec<Participant> = normalize_roster(&roster);
        let fresh_exists = find_all_partitions(&participants)
            .iter()
            .any(|plan| count_repeats(plan, &history) == 0);

        let outcome = run(&roster, &history, seed);
        prop_assert_eq!(outcome.repeats.is_empty(), fresh_exists);
    }

    #[test]
    fn history_derivation_is_idempotent((n, pairs, triples, _seed) in scenario(12)) {
        let (_, groups) = records(n, &pairs, &triples);
        let first = build_history(&groups);
        let second = build_history(&groups);
        prop_assert_eq!(first, second);
    }
}
