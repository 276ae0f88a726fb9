//! Human-readable and JSON rendering of a [`MatchOutcome`].

use std::fmt::Write as _;

use crate::engine::MatchOutcome;

// Convert a group index (0-based) to a label: A..Z, then AA, AB, ...
pub fn group_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Plain-text listing; repeated pairs are marked with `!`.
pub fn render_text(outcome: &MatchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Groups ({} strategy) ===", outcome.strategy);

    for (i, group) in outcome.plan.groups().iter().enumerate() {
        let repeated = group
            .sub_pairings()
            .any(|pair| outcome.repeats.contains_pair(&pair))
            || group.triple().is_some_and(|t| outcome.repeats.triples.contains(&t));
        let marker = if repeated { " !" } else { "" };
        let _ = writeln!(out, "Group {}: {}{marker}", group_label(i), group);
    }

    let _ = writeln!(out, "\nTotal: {} groups", outcome.plan.len());
    if outcome.is_fresh() {
        let _ = writeln!(out, "No grouping has happened before.");
    } else {
        let _ = writeln!(out, "Repeated groupings ({}):", outcome.repeats.len());
        for pair in &outcome.repeats.pairs {
            let _ = writeln!(out, "  - {pair}");
        }
        for triple in &outcome.repeats.triples {
            let _ = writeln!(out, "  - {triple}");
        }
    }
    out
}

pub fn render_json(outcome: &MatchOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
