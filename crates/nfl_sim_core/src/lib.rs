//! Domain model, standings calculator, tiebreaker engine and playoff seeder
//! for the NFL season simulator. Transport-agnostic: nothing here knows
//! about HTTP, the cache directory, or job lifecycles.

pub mod cancel;
pub mod error;
pub mod game;
pub mod result;
pub mod seed;
pub mod standings;
pub mod team;
pub mod tiebreak;

pub use cancel::CancelFlag;
pub use error::Error;
pub use game::{fixed_outcomes, resolve_schedule, unresolved_games, Game, GameOutcome, ResolvedGame, Winner};
pub use result::{SimulationResult, TeamSimulationStats};
pub use seed::{seed_conference, ConferenceSeeds};
pub use standings::{GameRecord, LeagueStats, Standing};
pub use team::{Conference, Division, Team, TeamRoster, GAMES_PER_TEAM, NUM_TEAMS, REGULAR_SEASON_GAMES};
pub use tiebreak::{rank_by_standing, rank_group, CoinToss, Mode};
