use crate::game::{GameOutcome, Winner};
use crate::team::{Conference, TeamRoster};
use serde::{Deserialize, Serialize};

/// Derived per-team record. Never persisted -- always reconstructible from a
/// `GameOutcome` set, per trial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standing {
	pub wins: u32,
	pub losses: u32,
	pub ties: u32,
	pub division_wins: u32,
	pub division_losses: u32,
	pub division_ties: u32,
	pub conference_wins: u32,
	pub conference_losses: u32,
	pub conference_ties: u32,
	pub points_for: u32,
	pub points_against: u32,
}

impl Standing {
	#[must_use]
	pub fn games_played(&self) -> u32 {
		self.wins + self.losses + self.ties
	}

	#[must_use]
	pub fn win_percentage(&self) -> f64 {
		let gp = self.games_played();
		if gp == 0 {
			0.5
		} else {
			(f64::from(self.wins) + 0.5 * f64::from(self.ties)) / f64::from(gp)
		}
	}

	#[must_use]
	pub fn division_win_percentage(&self) -> f64 {
		let gp = self.division_wins + self.division_losses + self.division_ties;
		if gp == 0 {
			0.5
		} else {
			(f64::from(self.division_wins) + 0.5 * f64::from(self.division_ties)) / f64::from(gp)
		}
	}

	#[must_use]
	pub fn conference_win_percentage(&self) -> f64 {
		let gp = self.conference_wins + self.conference_losses + self.conference_ties;
		if gp == 0 {
			0.5
		} else {
			(f64::from(self.conference_wins) + 0.5 * f64::from(self.conference_ties)) / f64::from(gp)
		}
	}

	#[must_use]
	pub fn net_points(&self) -> i32 {
		self.points_for as i32 - self.points_against as i32
	}
}

/// One game a team played, from that team's point of view, kept around so
/// the tiebreaker engine can re-derive head-to-head, common-games and
/// strength-of-schedule/victory without re-walking the raw outcome list for
/// every rule.
#[derive(Debug, Clone, Copy)]
pub struct GameRecord {
	pub opponent: u8,
	pub team_score: u16,
	pub opponent_score: u16,
	pub division_game: bool,
	pub conference_game: bool,
}

impl GameRecord {
	#[must_use]
	pub fn result(&self) -> Winner {
		match self.team_score.cmp(&self.opponent_score) {
			std::cmp::Ordering::Greater => Winner::Home,
			std::cmp::Ordering::Less => Winner::Away,
			std::cmp::Ordering::Equal => Winner::Tie,
		}
	}
}

/// The full league state derived from one trial's (or the real season's)
/// complete set of `GameOutcome`s: a `Standing` per team plus each team's
/// per-opponent game log, both dense-indexed by team index.
#[derive(Debug, Clone)]
pub struct LeagueStats {
	pub standings: Vec<Standing>,
	pub games: Vec<Vec<GameRecord>>,
}

impl LeagueStats {
	pub fn compute(roster: &TeamRoster, outcomes: &[GameOutcome]) -> Self {
		let n = roster.len();
		let mut standings = vec![Standing::default(); n];
		let mut games: Vec<Vec<GameRecord>> = vec![Vec::new(); n];

		for outcome in outcomes {
			let home = roster.team(outcome.home);
			let away = roster.team(outcome.away);
			let same_division = home.conference == away.conference && home.division == away.division;
			let same_conference = home.conference == away.conference;

			standings[outcome.home as usize].points_for += u32::from(outcome.home_score);
			standings[outcome.home as usize].points_against += u32::from(outcome.away_score);
			standings[outcome.away as usize].points_for += u32::from(outcome.away_score);
			standings[outcome.away as usize].points_against += u32::from(outcome.home_score);

			match outcome.winner() {
				Winner::Home => {
					credit(&mut standings[outcome.home as usize], same_division, same_conference, Credit::Win);
					credit(&mut standings[outcome.away as usize], same_division, same_conference, Credit::Loss);
				}
				Winner::Away => {
					credit(&mut standings[outcome.home as usize], same_division, same_conference, Credit::Loss);
					credit(&mut standings[outcome.away as usize], same_division, same_conference, Credit::Win);
				}
				Winner::Tie => {
					credit(&mut standings[outcome.home as usize], same_division, same_conference, Credit::Tie);
					credit(&mut standings[outcome.away as usize], same_division, same_conference, Credit::Tie);
				}
			}

			games[outcome.home as usize].push(GameRecord {
				opponent: outcome.away,
				team_score: outcome.home_score,
				opponent_score: outcome.away_score,
				division_game: same_division,
				conference_game: same_conference,
			});
			games[outcome.away as usize].push(GameRecord {
				opponent: outcome.home,
				team_score: outcome.away_score,
				opponent_score: outcome.home_score,
				division_game: same_division,
				conference_game: same_conference,
			});
		}

		Self { standings, games }
	}

	#[must_use]
	pub fn standing(&self, team_idx: u8) -> &Standing {
		&self.standings[team_idx as usize]
	}

	#[must_use]
	pub fn games_for(&self, team_idx: u8) -> &[GameRecord] {
		&self.games[team_idx as usize]
	}

	/// 1-based rank of `team_idx`'s points-for among `pool`, highest points
	/// first. Ties share the average of the ordinal positions they occupy,
	/// split evenly across the tied ordinal positions.
	#[must_use]
	pub fn points_for_rank(&self, team_idx: u8, pool: &[u8]) -> f64 {
		rank_by(pool, |idx| self.standing(idx).points_for, team_idx, true)
	}

	/// 1-based rank of `team_idx`'s points-against among `pool`, fewest
	/// allowed first (lower is better, same tie handling as above).
	#[must_use]
	pub fn points_against_rank(&self, team_idx: u8, pool: &[u8]) -> f64 {
		rank_by(pool, |idx| self.standing(idx).points_against, team_idx, false)
	}

	#[must_use]
	pub fn conference_pool(&self, roster: &TeamRoster, conference: Conference) -> Vec<u8> {
		roster.conference_indices(conference)
	}
}

enum Credit {
	Win,
	Loss,
	Tie,
}

fn credit(standing: &mut Standing, same_division: bool, same_conference: bool, credit: Credit) {
	match credit {
		Credit::Win => {
			standing.wins += 1;
			if same_division {
				standing.division_wins += 1;
			}
			if same_conference {
				standing.conference_wins += 1;
			}
		}
		Credit::Loss => {
			standing.losses += 1;
			if same_division {
				standing.division_losses += 1;
			}
			if same_conference {
				standing.conference_losses += 1;
			}
		}
		Credit::Tie => {
			standing.ties += 1;
			if same_division {
				standing.division_ties += 1;
			}
			if same_conference {
				standing.conference_ties += 1;
			}
		}
	}
}

/// Rank `target` within `pool` by `key(idx)`. `descending = true` ranks the
/// largest key as #1 (used for points scored); `descending = false` ranks
/// the smallest key as #1 (used for points allowed). Tied keys all receive
/// the average of the ordinal positions they'd otherwise occupy.
fn rank_by(pool: &[u8], key: impl Fn(u8) -> u32, target: u8, descending: bool) -> f64 {
	let mut values: Vec<u32> = pool.iter().map(|&idx| key(idx)).collect();
	values.sort_unstable();
	if descending {
		values.reverse();
	}

	let target_value = key(target);
	let mut first = None;
	let mut last = None;
	for (i, &v) in values.iter().enumerate() {
		if v == target_value {
			if first.is_none() {
				first = Some(i);
			}
			last = Some(i);
		}
	}
	let first = first.unwrap_or(0) as f64 + 1.0;
	let last = last.unwrap_or(0) as f64 + 1.0;
	(first + last) / 2.0
}
