//! # pair-rotation
//!
//! Splits a roster into groups of two (plus one group of three when the
//! roster is odd) while avoiding groupings that happened in earlier rounds.
//!
//! The engine tries, in order:
//! 1. randomized backtracking over groups with no history ([`search::exact`]);
//! 2. for rosters up to `exhaustive_threshold`, full enumeration keeping the
//!    plan with the fewest repeats ([`search::exhaustive`]);
//! 3. for larger rosters, random sampling of naive plans ([`search::heuristic`]).
//!
//! ```
//! use pair_rotation::{build_history, match_roster, parse_records};
//!
//! let records = parse_records(&[vec!["Alice", "Bob"]]).unwrap();
//! let history = build_history(&records);
//! let outcome = match_roster(&["Alice", "Bob", "Carol", "Dan"], &history).unwrap();
//!
//! assert_eq!(outcome.plan.len(), 2);
//! assert!(outcome.repeats.is_empty());
//! ```

pub mod arena;
pub mod budget;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod history;
pub mod oracle;
pub mod participant;
pub mod render;
pub mod repeats;
pub mod search;
pub mod store;

pub use arena::RosterArena;
pub use budget::Budget;
pub use config::MatchConfig;
pub use engine::{match_roster, MatchOutcome, Matcher, Strategy};
pub use error::{ConfigError, MatchError, StoreError};
pub use group::{Group, MatchingPlan, SubPairing, Triple};
pub use history::{build_history, parse_records, History};
pub use oracle::is_valid;
pub use participant::{normalize, normalize_roster, Participant};
pub use repeats::{count_repeats, find_repeats, RepeatReport};
pub use search::{exhaustive_best, find_all_partitions, heuristic_best, try_exact};
