use std::collections::BTreeSet;

use pair_rotation::{
    build_history, normalize, parse_records, History, MatchConfig, MatchError, MatchOutcome, Matcher,
    Strategy, SubPairing,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn history(rows: &[&[&str]]) -> History {
    let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.to_vec()).collect();
    build_history(&parse_records(&rows).expect("well-formed history"))
}

fn matcher(seed: u64) -> Matcher {
    Matcher::new(MatchConfig {
        seed: Some(seed),
        ..MatchConfig::default()
    })
    .expect("valid config")
}

fn keys(outcome: &MatchOutcome) -> Vec<BTreeSet<String>> {
    outcome
        .plan
        .groups()
        .iter()
        .map(|g| g.members().iter().map(|m| m.key().to_string()).collect())
        .collect()
}

fn assert_covers(outcome: &MatchOutcome, roster: &[&str]) {
    let mut seen: Vec<String> = outcome.plan.participants().map(|p| p.key().to_string()).collect();
    seen.sort();
    let mut expected: Vec<String> = roster.iter().map(|n| n.to_lowercase()).collect();
    expected.sort();
    assert_eq!(seen, expected);

    let trios = outcome.plan.groups().iter().filter(|g| g.len() == 3).count();
    assert_eq!(trios, roster.len() % 2);
    assert!(outcome.plan.groups().iter().all(|g| g.len() == 2 || g.len() == 3));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn four_people_without_history(#[case] seed: u64) {
    let roster = ["A", "B", "C", "D"];
    let outcome = matcher(seed).run(&roster, &History::new()).unwrap();
    assert_covers(&outcome, &roster);
    assert_eq!(outcome.plan.len(), 2);
    assert!(outcome.repeats.is_empty());
}

#[test]
fn three_people_form_one_trio() {
    let outcome = matcher(5).run(&["A", "B", "C"], &History::new()).unwrap();
    assert_eq!(outcome.plan.len(), 1);
    assert_eq!(keys(&outcome)[0], BTreeSet::from(["a".into(), "b".into(), "c".into()]));
    assert!(outcome.repeats.is_empty());
}

#[rstest]
#[case(10)]
#[case(11)]
#[case(12)]
#[case(13)]
fn recorded_pair_is_avoided(#[case] seed: u64) {
    let roster = ["A", "B", "C", "D"];
    let outcome = matcher(seed).run(&roster, &history(&[&["A", "B"]])).unwrap();
    assert_covers(&outcome, &roster);
    assert!(outcome.repeats.is_empty());
    let ab: BTreeSet<String> = BTreeSet::from(["a".into(), "b".into()]);
    assert!(!keys(&outcome).contains(&ab));
}

#[test]
fn two_people_with_history_degrade_gracefully() {
    let outcome = matcher(7).run(&["A", "B"], &history(&[&["A", "B"]])).unwrap();
    assert_eq!(outcome.plan.len(), 1);
    assert_eq!(outcome.strategy, Strategy::Exhaustive);
    let expected = SubPairing::new(normalize("A").unwrap(), normalize("B").unwrap());
    assert_eq!(outcome.repeats.pairs, BTreeSet::from([expected]));
}

#[test]
fn empty_roster_is_rejected() {
    let roster: [&str; 0] = [];
    assert_eq!(matcher(0).run(&roster, &History::new()), Err(MatchError::EmptyRoster));
}

#[test]
fn fourteen_people_take_the_heuristic_path() {
    let roster: Vec<String> = (1..=14).map(|i| format!("member{i:02}")).collect();
    let refs: Vec<&str> = roster.iter().map(String::as_str).collect();
    let h = history(&[&["member01", "member02"], &["member03", "member04", "member05"]]);

    // Starve the exact search so the fallback must run.
    let config = MatchConfig {
        seed: Some(99),
        exact_node_limit: 1,
        ..MatchConfig::default()
    };
    let outcome = Matcher::new(config).unwrap().run(&refs[..], &h).unwrap();
    assert_eq!(outcome.strategy, Strategy::Heuristic);
    assert_covers(&outcome, &refs);
}

#[test]
fn odd_roster_gets_exactly_one_trio() {
    let roster = ["a", "b", "c", "d", "e", "f", "g"];
    let outcome = matcher(21).run(&roster, &history(&[&["a", "b"], &["c", "d"]])).unwrap();
    assert_covers(&outcome, &roster);
    assert!(outcome.repeats.is_empty());
}

#[test]
fn decorated_and_duplicate_names_collapse() {
    let outcome = matcher(8)
        .run(&["*Alice", "alice", "  Bob ", "", "✓carol", "Dan"], &history(&[&["ALICE", "bob"]]))
        .unwrap();
    assert_covers(&outcome, &["alice", "bob", "carol", "dan"]);
    assert!(outcome.repeats.is_empty());
}

#[test]
fn saturated_small_roster_keeps_the_least_repeated_plan() {
    // a-b and c-d and a-c and b-d used; only {a,d},{b,c} is fresh.
    let h = history(&[&["a", "b"], &["c", "d"], &["a", "c"], &["b", "d"]]);
    let outcome = matcher(30).run(&["a", "b", "c", "d"], &h).unwrap();
    assert!(outcome.repeats.is_empty());
    let ad: BTreeSet<String> = BTreeSet::from(["a".into(), "d".into()]);
    assert!(keys(&outcome).contains(&ad));
}

#[test]
fn time_limit_still_produces_a_plan() {
    let roster: Vec<String> = (0..9).map(|i| format!("p{i}")).collect();
    let mut rows = Vec::new();
    for i in 0..roster.len() {
        for j in i + 1..roster.len() {
            rows.push(vec![roster[i].clone(), roster[j].clone()]);
        }
    }
    let h = build_history(&parse_records(&rows).unwrap());
    let config = MatchConfig {
        seed: Some(1),
        time_limit_ms: Some(0),
        ..MatchConfig::default()
    };
    let outcome = Matcher::new(config).unwrap().run(&roster[..], &h).unwrap();
    assert_eq!(outcome.plan.participants().count(), 9);
    assert!(!outcome.repeats.is_empty());
}
