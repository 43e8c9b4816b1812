use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NUM_TEAMS: usize = 32;
pub const NUM_DIVISIONS: usize = 8;
pub const TEAMS_PER_DIVISION: usize = 4;
pub const GAMES_PER_TEAM: u32 = 17;
pub const REGULAR_SEASON_GAMES: usize = 272;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
	AFC,
	NFC,
}

impl Conference {
	pub const ALL: [Self; 2] = [Self::AFC, Self::NFC];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
	East,
	North,
	South,
	West,
}

impl Division {
	pub const ALL: [Self; 4] = [Self::East, Self::North, Self::South, Self::West];
}

/// A single NFL team. `id` is the stable string identifier used on the wire
/// and in the schedule (e.g. `"kc"`); `team_idx` (assigned by `TeamRoster`) is
/// the dense `0..32` index used on every hot path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
	pub id: String,
	pub name: String,
	pub abbreviation: String,
	pub conference: Conference,
	pub division: Division,
}

/// The full 32-team league, indexed densely for the simulation hot path.
///
/// Invariant: exactly 32 teams, partitioned evenly into 8 divisions of 4
/// (4 divisions per conference). Violations are rejected at construction,
/// never discovered mid-trial.
#[derive(Debug, Clone)]
pub struct TeamRoster {
	teams: Vec<Team>,
	index_by_id: HashMap<String, u8>,
}

impl TeamRoster {
	pub fn new(teams: Vec<Team>) -> Result<Self, Error> {
		if teams.len() != NUM_TEAMS {
			return Err(Error::InvalidGame {
				id: String::new(),
				reason: format!("roster must contain exactly {NUM_TEAMS} teams, got {}", teams.len()),
			});
		}

		let mut index_by_id = HashMap::with_capacity(teams.len());
		for (idx, team) in teams.iter().enumerate() {
			if index_by_id.insert(team.id.clone(), idx as u8).is_some() {
				return Err(Error::InvalidGame {
					id: team.id.clone(),
					reason: "duplicate team id in roster".into(),
				});
			}
		}

		for division in Division::ALL {
			for conference in Conference::ALL {
				let count = teams.iter().filter(|t| t.division == division && t.conference == conference).count();
				if count != TEAMS_PER_DIVISION {
					return Err(Error::InvalidGame {
						id: String::new(),
						reason: format!("{conference:?} {division:?} has {count} teams, expected {TEAMS_PER_DIVISION}"),
					});
				}
			}
		}

		Ok(Self { teams, index_by_id })
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.teams.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.teams.is_empty()
	}

	pub fn index_of(&self, id: &str) -> Result<u8, Error> {
		self.index_by_id.get(id).copied().ok_or_else(|| Error::UnknownTeam(id.to_string()))
	}

	#[must_use]
	pub fn team(&self, idx: u8) -> &Team {
		&self.teams[idx as usize]
	}

	pub fn teams(&self) -> &[Team] {
		&self.teams
	}

	/// Team indices in `conference`, in roster order.
	pub fn conference_indices(&self, conference: Conference) -> Vec<u8> {
		(0..self.teams.len() as u8).filter(|&idx| self.team(idx).conference == conference).collect()
	}

	/// The four division groups (each a `Vec` of 4 team indices) that make up
	/// `conference`, one per `Division` variant.
	pub fn division_groups(&self, conference: Conference) -> Vec<Vec<u8>> {
		Division::ALL
			.iter()
			.map(|&division| {
				(0..self.teams.len() as u8)
					.filter(|&idx| {
						let team = self.team(idx);
						team.conference == conference && team.division == division
					})
					.collect()
			})
			.collect()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	pub fn make_team(id: &str, conference: Conference, division: Division) -> Team {
		Team {
			id: id.to_string(),
			name: id.to_string(),
			abbreviation: id.to_uppercase(),
			conference,
			division,
		}
	}

	pub fn sample_roster() -> TeamRoster {
		let mut teams = Vec::with_capacity(NUM_TEAMS);
		let mut n = 0;
		for conference in Conference::ALL {
			for division in Division::ALL {
				for slot in 0..TEAMS_PER_DIVISION {
					teams.push(make_team(&format!("t{n}"), conference, division));
					n += 1;
					let _ = slot;
				}
			}
		}
		TeamRoster::new(teams).expect("sample roster is valid")
	}

	#[test]
	fn rejects_wrong_team_count() {
		let teams = vec![make_team("a", Conference::AFC, Division::East)];
		assert!(TeamRoster::new(teams).is_err());
	}

	#[test]
	fn rejects_uneven_divisions() {
		let mut teams = sample_roster().teams().to_vec();
		teams[0].division = Division::North;
		assert!(TeamRoster::new(teams).is_err());
	}

	#[test]
	fn index_of_round_trips() {
		let roster = sample_roster();
		for (idx, team) in roster.teams().iter().enumerate() {
			assert_eq!(roster.index_of(&team.id).unwrap(), idx as u8);
		}
	}

	#[test]
	fn division_groups_partition_conference() {
		let roster = sample_roster();
		for conference in Conference::ALL {
			let groups = roster.division_groups(conference);
			assert_eq!(groups.len(), 4);
			let total: usize = groups.iter().map(Vec::len).sum();
			assert_eq!(total, 16);
		}
	}
}
