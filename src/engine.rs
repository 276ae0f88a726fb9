//! Orchestration: exact search first, then exhaustive enumeration for small
//! rosters or random sampling for large ones.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::arena::RosterArena;
use crate::budget::Budget;
use crate::config::MatchConfig;
use crate::error::{ConfigError, MatchError};
use crate::group::MatchingPlan;
use crate::history::History;
use crate::participant::{normalize_roster, Participant};
use crate::repeats::{find_repeats, RepeatReport};
use crate::search::exhaustive::{exhaustive_partition, Scored};
use crate::search::{exact, heuristic};

/// Which strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exact,
    Exhaustive,
    Heuristic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Exhaustive => "exhaustive",
            Self::Heuristic => "heuristic",
        })
    }
}

/// Result of one matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub plan: MatchingPlan,
    pub repeats: RepeatReport,
    pub strategy: Strategy,
}

impl MatchOutcome {
    /// `true` when no grouping in the plan has happened before.
    pub fn is_fresh(&self) -> bool {
        self.repeats.is_empty()
    }
}

/// Runs the layered search with one configuration and budget.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchConfig,
    budget: Budget,
}

impl Matcher {
    /// Build a matcher after checking `config` against the search caps.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            budget: Budget::unlimited(),
        })
    }

    /// Replace the budget (e.g. to attach a cancellation flag). The
    /// configured time limit is applied on top when each run starts.
    #[must_use]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Partition a raw roster, seeding the RNG from config or entropy.
    pub fn run<S: AsRef<str>>(&self, roster: &[S], history: &History) -> Result<MatchOutcome, MatchError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(roster, history, &mut rng)
    }

    pub fn run_with_rng<S, R>(&self, roster: &[S], history: &History, rng: &mut R) -> Result<MatchOutcome, MatchError>
    where
        S: AsRef<str>,
        R: Rng,
    {
        let roster = normalize_roster(roster);
        self.partition(&roster, history, rng)
    }

    /// Partition an already normalized, deduplicated roster.
    pub fn partition<R: Rng>(
        &self,
        roster: &[Participant],
        history: &History,
        rng: &mut R,
    ) -> Result<MatchOutcome, MatchError> {
        if roster.is_empty() {
            return Err(MatchError::EmptyRoster);
        }

        let budget = match self.config.time_limit() {
            Some(limit) => self.budget.clone().with_time_limit(limit),
            None => self.budget.clone(),
        };
        let arena = RosterArena::new(roster, history);
        let mut meter = budget.meter();
        debug!(size = arena.len(), history = history.len(), "matching roster");

        if let Some(groups) = exact::exact_partition(&arena, self.config.exact_limits(), rng, &mut meter) {
            info!(strategy = %Strategy::Exact, groups = groups.len(), "found a plan with no repeats");
            return Ok(MatchOutcome {
                plan: arena.materialize(&groups),
                repeats: RepeatReport::default(),
                strategy: Strategy::Exact,
            });
        }

        let (best, strategy) = if arena.len() > self.config.exhaustive_threshold {
            (
                heuristic::heuristic_partition(&arena, self.config.heuristic_attempts, rng, &mut meter),
                Strategy::Heuristic,
            )
        } else {
            match exhaustive_partition(&arena, &mut meter) {
                Some(best) => (Some(best), Strategy::Exhaustive),
                None if meter.exhausted() => {
                    warn!("search budget ran out before enumeration produced a plan; sampling one instead");
                    (
                        heuristic::heuristic_partition(&arena, 1, rng, &mut meter),
                        Strategy::Heuristic,
                    )
                }
                None => (None, Strategy::Exhaustive),
            }
        };

        debug!(%strategy, steps = meter.steps(), "fallback search finished");
        if meter.exhausted() {
            warn!(%strategy, "search budget ran out; returning the best plan found so far");
        }

        let Some(Scored { groups, repeats }) = best else {
            return Err(MatchError::UnresolvableRoster { size: arena.len() });
        };

        let plan = arena.materialize(&groups);
        let report = find_repeats(&plan, history);
        debug_assert_eq!(report.len(), repeats);

        if report.is_empty() {
            info!(%strategy, groups = plan.len(), "found a plan with no repeats");
        } else {
            warn!(%strategy, repeats = report.len(), "no fresh plan exists within limits; some groupings repeat");
        }

        Ok(MatchOutcome {
            plan,
            repeats: report,
            strategy,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            budget: Budget::unlimited(),
        }
    }
}

/// Partition `roster` with default settings.
pub fn match_roster<S: AsRef<str>>(roster: &[S], history: &History) -> Result<MatchOutcome, MatchError> {
    Matcher::default().run(roster, history)
}
