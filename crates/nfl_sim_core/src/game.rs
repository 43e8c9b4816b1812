use crate::error::Error;
use crate::team::TeamRoster;
use serde::{Deserialize, Serialize};

/// A scheduled regular-season game, as read from `schedule_<season>.json` /
/// `results_current.json` and possibly amended by the override store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
	pub id: String,
	pub week: u8,
	pub home_team: String,
	pub away_team: String,
	pub home_score: Option<u16>,
	pub away_score: Option<u16>,
	pub is_completed: bool,
	pub override_home_score: Option<u16>,
	pub override_away_score: Option<u16>,
	pub is_overridden: bool,
}

impl Game {
	pub fn validate(&self) -> Result<(), Error> {
		if self.home_team == self.away_team {
			return Err(Error::InvalidGame {
				id: self.id.clone(),
				reason: format!("home and away team are both {}", self.home_team),
			});
		}
		if self.is_completed && (self.home_score.is_none() || self.away_score.is_none()) {
			return Err(Error::InvalidGame {
				id: self.id.clone(),
				reason: "is_completed is set but actual scores are missing".into(),
			});
		}
		if self.is_overridden && (self.override_home_score.is_none() || self.override_away_score.is_none()) {
			return Err(Error::InvalidGame {
				id: self.id.clone(),
				reason: "is_overridden is set but override scores are missing".into(),
			});
		}
		Ok(())
	}

	/// The effective (home, away) score: override wins over actual, which
	/// wins over "unresolved". `None` means the game must be simulated.
	#[must_use]
	pub fn effective_score(&self) -> Option<(u16, u16)> {
		if self.is_overridden {
			Some((self.override_home_score?, self.override_away_score?))
		} else if self.is_completed {
			Some((self.home_score?, self.away_score?))
		} else {
			None
		}
	}

	#[must_use]
	pub fn is_resolved(&self) -> bool {
		self.effective_score().is_some()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
	Home,
	Away,
	Tie,
}

/// A per-trial result for a single game: the dense team indices of home and
/// away, plus the final score. Produced both by resolving fixed games once
/// (outside the trial loop) and by the Monte Carlo driver for unresolved
/// games (once per trial).
#[derive(Debug, Clone, Copy)]
pub struct GameOutcome {
	pub home: u8,
	pub away: u8,
	pub home_score: u16,
	pub away_score: u16,
}

impl GameOutcome {
	#[must_use]
	pub fn winner(&self) -> Winner {
		match self.home_score.cmp(&self.away_score) {
			std::cmp::Ordering::Greater => Winner::Home,
			std::cmp::Ordering::Less => Winner::Away,
			std::cmp::Ordering::Equal => Winner::Tie,
		}
	}
}

/// A schedule game resolved against the team roster: home/away are dense
/// indices, and `fixed` carries the effective score when the game is
/// already decided (completed or overridden), or `None` when it must be
/// simulated by the Monte Carlo driver.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedGame {
	pub home: u8,
	pub away: u8,
	pub week: u8,
	pub fixed: Option<(u16, u16)>,
}

/// Resolve a schedule (already carrying any applied overrides) against the
/// roster once, up front. This is the only place string team ids are looked
/// up; every trial afterwards works entirely in dense indices.
pub fn resolve_schedule(games: &[Game], roster: &TeamRoster) -> Result<Vec<ResolvedGame>, Error> {
	games
		.iter()
		.map(|game| {
			game.validate()?;
			let home = roster.index_of(&game.home_team)?;
			let away = roster.index_of(&game.away_team)?;
			Ok(ResolvedGame {
				home,
				away,
				week: game.week,
				fixed: game.effective_score(),
			})
		})
		.collect()
}

/// Split a resolved schedule into the outcomes that are already fixed
/// (completed or overridden -- identical across every trial) and the games
/// that still need to be simulated.
#[must_use]
pub fn fixed_outcomes(resolved: &[ResolvedGame]) -> Vec<GameOutcome> {
	resolved
		.iter()
		.filter_map(|g| {
			g.fixed.map(|(home_score, away_score)| GameOutcome {
				home: g.home,
				away: g.away,
				home_score,
				away_score,
			})
		})
		.collect()
}

#[must_use]
pub fn unresolved_games(resolved: &[ResolvedGame]) -> Vec<ResolvedGame> {
	resolved.iter().copied().filter(|g| g.fixed.is_none()).collect()
}
