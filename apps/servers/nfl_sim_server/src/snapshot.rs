//! Loads the read-mostly team/schedule snapshot from the cache directory at
//! startup. No polling loop is spawned; picking up on-disk changes requires
//! a process restart.

use nfl_sim_core::{Game, Team, TeamRoster};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

pub async fn load_roster(cache_directory: &Path) -> anyhow::Result<TeamRoster> {
	let teams: Vec<Team> = read_json_or_empty(&cache_directory.join("teams.json")).await?;
	Ok(TeamRoster::new(teams)?)
}

/// Reads `schedule_<season>.json`, then folds `results_current.json` onto it
/// by game id so completed results override the originally scheduled rows.
pub async fn load_schedule(cache_directory: &Path, season: u16) -> anyhow::Result<Vec<Game>> {
	let mut games: Vec<Game> = read_json_or_empty(&cache_directory.join(format!("schedule_{season}.json"))).await?;
	let mut results: HashMap<String, Game> = read_json_or_empty::<Game>(&cache_directory.join("results_current.json"))
		.await?
		.into_iter()
		.map(|g| (g.id.clone(), g))
		.collect();

	for game in &mut games {
		if let Some(result) = results.remove(&game.id) {
			game.home_score = result.home_score;
			game.away_score = result.away_score;
			game.is_completed = result.is_completed;
		}
	}

	Ok(games)
}

async fn read_json_or_empty<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
	match tokio::fs::read(path).await {
		Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
		Err(e) => Err(e.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_file(dir: &Path, name: &str, contents: &str) {
		let mut f = std::fs::File::create(dir.join(name)).unwrap();
		f.write_all(contents.as_bytes()).unwrap();
	}

	#[tokio::test]
	async fn missing_files_load_as_empty_schedule() {
		let dir = tempfile::tempdir().unwrap();
		let games = load_schedule(dir.path(), 2026).await.unwrap();
		assert!(games.is_empty());
	}

	#[tokio::test]
	async fn results_are_folded_onto_the_schedule_by_id() {
		let dir = tempfile::tempdir().unwrap();
		write_file(
			dir.path(),
			"schedule_2026.json",
			r#"[{"id":"g1","week":1,"home_team":"kc","away_team":"den","home_score":null,"away_score":null,"is_completed":false,"override_home_score":null,"override_away_score":null,"is_overridden":false}]"#,
		);
		write_file(
			dir.path(),
			"results_current.json",
			r#"[{"id":"g1","week":1,"home_team":"kc","away_team":"den","home_score":24,"away_score":17,"is_completed":true,"override_home_score":null,"override_away_score":null,"is_overridden":false}]"#,
		);

		let games = load_schedule(dir.path(), 2026).await.unwrap();
		assert_eq!(games.len(), 1);
		assert_eq!(games[0].effective_score(), Some((24, 17)));
	}
}
