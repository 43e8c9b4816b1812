//! The NFL tiebreaker engine (11 rules, division and wild-card flavors) and
//! the multi-team reduction that drives both.
//!
//! A single rule evaluator (`RULES`) is shared by both tiebreaker flavors;
//! only rule 1's semantics (simple head-to-head record vs. clean sweep) and
//! the wild-card's division-reduction pre-step differ.

use crate::standings::LeagueStats;
use crate::team::{Conference, TeamRoster};
use std::collections::HashSet;

/// Which flavor of tiebreaker is being applied. Only affects rule 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// All teams in the set share a division; rule 1 is a simple
	/// head-to-head win percentage among the set's members.
	Division,
	/// Teams may come from different divisions of the same conference;
	/// rule 1 requires a clean sweep (one team beat every other).
	WildCard,
}

/// A source of randomness for the final coin-toss rule. The tiebreaker
/// engine only ever needs one operation -- an index in `[0, n)` -- so it
/// doesn't take a dependency on any particular RNG crate; callers (the
/// Monte Carlo driver) pass in whatever `rand::Rng` they're already
/// carrying for the trial.
pub trait CoinToss {
	fn next_index(&mut self, exclusive_upper_bound: usize) -> usize;
}

const EPSILON: f64 = 1e-9;

/// Order `teams` primarily by raw win percentage (descending); only teams
/// tied on record are handed to `rank_group` for tiebreaking. This is the
/// entry point playoff seeding calls -- `rank_group` itself assumes its
/// input is already a tied cluster, and must not be applied across teams
/// whose records already separate them.
pub fn rank_by_standing(teams: &[u8], mode: Mode, league: &LeagueStats, roster: &TeamRoster, coin: &mut impl CoinToss) -> Vec<u8> {
	if teams.len() <= 1 {
		return teams.to_vec();
	}

	let mut sorted: Vec<u8> = teams.to_vec();
	sorted.sort_by(|&a, &b| league.standing(b).win_percentage().total_cmp(&league.standing(a).win_percentage()));

	let mut result = Vec::with_capacity(sorted.len());
	let mut i = 0;
	while i < sorted.len() {
		let pct = league.standing(sorted[i]).win_percentage();
		let mut j = i + 1;
		while j < sorted.len() && (league.standing(sorted[j]).win_percentage() - pct).abs() < EPSILON {
			j += 1;
		}
		if j - i == 1 {
			result.push(sorted[i]);
		} else {
			result.extend(rank_group(&sorted[i..j], mode, league, roster, coin));
		}
		i = j;
	}
	result
}

/// Rank `teams` (all already known to require disambiguation -- i.e. tied on
/// raw win/loss record) by the ordered NFL tiebreaker rules for `mode`.
/// Returns the full ordering, best team first.
pub fn rank_group(teams: &[u8], mode: Mode, league: &LeagueStats, roster: &TeamRoster, coin: &mut impl CoinToss) -> Vec<u8> {
	if teams.len() <= 1 {
		return teams.to_vec();
	}

	if mode == Mode::WildCard {
		let (representatives, division_orders) = reduce_to_one_per_division(teams, league, roster, coin);
		let order_of_reps = run_rules(&representatives, mode, league, roster, coin);
		let mut result = Vec::with_capacity(teams.len());
		for rep in order_of_reps {
			let group = division_orders.iter().find(|g| g[0] == rep).expect("every representative heads exactly one division group");
			result.extend(group.iter().copied());
		}
		result
	} else {
		run_rules(teams, mode, league, roster, coin)
	}
}

/// Wild-card-only pre-step: before ranking candidates across divisions,
/// reduce each represented division to its single best remaining team (by
/// the division tiebreaker). Returns the chosen representative per division
/// alongside that division's full internal order, so the teams it beat out
/// aren't lost -- they're reinserted right behind their representative once
/// the representatives themselves are ranked.
fn reduce_to_one_per_division(teams: &[u8], league: &LeagueStats, roster: &TeamRoster, coin: &mut impl CoinToss) -> (Vec<u8>, Vec<Vec<u8>>) {
	let mut by_division: Vec<(Conference, crate::team::Division, Vec<u8>)> = Vec::new();
	for &team in teams {
		let t = roster.team(team);
		if let Some(entry) = by_division.iter_mut().find(|(c, d, _)| *c == t.conference && *d == t.division) {
			entry.2.push(team);
		} else {
			by_division.push((t.conference, t.division, vec![team]));
		}
	}

	let division_orders: Vec<Vec<u8>> = by_division
		.into_iter()
		.map(|(_, _, group)| if group.len() == 1 { group } else { run_rules(&group, Mode::Division, league, roster, coin) })
		.collect();
	let representatives: Vec<u8> = division_orders.iter().map(|g| g[0]).collect();

	(representatives, division_orders)
}

fn run_rules(set: &[u8], mode: Mode, league: &LeagueStats, roster: &TeamRoster, coin: &mut impl CoinToss) -> Vec<u8> {
	if set.len() <= 1 {
		return set.to_vec();
	}

	for rule in RULES {
		let Some(scores) = rule(set, mode, league, roster) else {
			continue;
		};

		let best = scores.iter().cloned().fold(f64::MIN, f64::max);
		let (winners, remainder): (Vec<(&u8, &f64)>, Vec<(&u8, &f64)>) = set.iter().zip(scores.iter()).partition(|(_, &score)| (score - best).abs() < EPSILON);
		let winners: Vec<u8> = winners.into_iter().map(|(&t, _)| t).collect();
		let remainder: Vec<u8> = remainder.into_iter().map(|(&t, _)| t).collect();

		if winners.len() < set.len() {
			// Winner-set advances (restarting from rule 1 among itself);
			// the remainder is independently ranked the same way.
			let mut ranked_winners = run_rules(&winners, mode, league, roster, coin);
			let mut ranked_remainder = run_rules(&remainder, mode, league, roster, coin);
			ranked_winners.append(&mut ranked_remainder);
			return ranked_winners;
		}
		// Everyone tied on this rule; fall through to the next one.
	}

	coin_toss_order(set, coin)
}

fn coin_toss_order(set: &[u8], coin: &mut impl CoinToss) -> Vec<u8> {
	let mut remaining = set.to_vec();
	let mut order = Vec::with_capacity(set.len());
	while !remaining.is_empty() {
		let i = coin.next_index(remaining.len());
		order.push(remaining.remove(i));
	}
	order
}

type Rule = fn(&[u8], Mode, &LeagueStats, &TeamRoster) -> Option<Vec<f64>>;

const RULES: [Rule; 10] = [
	rule_head_to_head,
	rule_division_record,
	rule_common_games_record,
	rule_conference_record,
	rule_strength_of_victory,
	rule_strength_of_schedule,
	rule_combined_ranking_conference,
	rule_combined_ranking_league,
	rule_net_points_common_games,
	rule_net_points_all_games,
];

/// Games `team` has played against any team in `others`.
fn games_against(league: &LeagueStats, team: u8, others: &HashSet<u8>) -> Vec<crate::standings::GameRecord> {
	league.games_for(team).iter().copied().filter(|g| others.contains(&g.opponent)).collect()
}

fn win_pct(games: &[crate::standings::GameRecord]) -> Option<f64> {
	if games.is_empty() {
		return None;
	}
	let wins = games.iter().filter(|g| g.result() == crate::game::Winner::Home).count();
	let ties = games.iter().filter(|g| g.result() == crate::game::Winner::Tie).count();
	Some((wins as f64 + 0.5 * ties as f64) / games.len() as f64)
}

fn rule_head_to_head(set: &[u8], mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	let others: HashSet<u8> = set.iter().copied().collect();

	match mode {
		Mode::Division => {
			let mut scores = Vec::with_capacity(set.len());
			let mut any_games = false;
			for &team in set {
				let mut mine = others.clone();
				mine.remove(&team);
				let games = games_against(league, team, &mine);
				if !games.is_empty() {
					any_games = true;
				}
				scores.push(win_pct(&games).unwrap_or(0.5));
			}
			any_games.then_some(scores)
		}
		Mode::WildCard => {
			// A clean sweep: exactly one team beat every other team in the
			// set in every meeting, and every pairing was actually played.
			for &candidate in set {
				let mut swept_all = true;
				let mut played_all = true;
				for &other in set {
					if other == candidate {
						continue;
					}
					let mut opp = HashSet::new();
					opp.insert(other);
					let games = games_against(league, candidate, &opp);
					if games.is_empty() {
						played_all = false;
						break;
					}
					if games.iter().any(|g| g.result() != crate::game::Winner::Home) {
						swept_all = false;
						break;
					}
				}
				if played_all && swept_all {
					return Some(set.iter().map(|&t| if t == candidate { 1.0 } else { 0.0 }).collect());
				}
			}
			None
		}
	}
}

fn rule_division_record(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(set.iter().map(|&t| league.standing(t).division_win_percentage()).collect())
}

fn common_opponents(set: &[u8], league: &LeagueStats) -> HashSet<u8> {
	let set_members: HashSet<u8> = set.iter().copied().collect();
	let mut iter = set.iter();
	let Some(&first) = iter.next() else {
		return HashSet::new();
	};
	let mut common: HashSet<u8> = league.games_for(first).iter().map(|g| g.opponent).filter(|o| !set_members.contains(o)).collect();
	for &team in iter {
		let opponents: HashSet<u8> = league.games_for(team).iter().map(|g| g.opponent).filter(|o| !set_members.contains(o)).collect();
		common = common.intersection(&opponents).copied().collect();
	}
	common
}

fn rule_common_games_record(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	let common = common_opponents(set, league);
	if common.is_empty() {
		return None;
	}
	let per_team: Vec<Vec<crate::standings::GameRecord>> = set.iter().map(|&t| games_against(league, t, &common)).collect();
	if per_team.iter().any(|games| games.len() < 4) {
		return None;
	}
	Some(per_team.iter().map(|games| win_pct(games).unwrap_or(0.5)).collect())
}

fn rule_conference_record(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(set.iter().map(|&t| league.standing(t).conference_win_percentage()).collect())
}

fn rule_strength_of_victory(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(set.iter().map(|&t| strength_of_victory(league, t)).collect())
}

fn strength_of_victory(league: &LeagueStats, team: u8) -> f64 {
	let beaten: Vec<f64> = league
		.games_for(team)
		.iter()
		.filter(|g| g.result() == crate::game::Winner::Home)
		.map(|g| league.standing(g.opponent).win_percentage())
		.collect();
	if beaten.is_empty() {
		0.0
	} else {
		beaten.iter().sum::<f64>() / beaten.len() as f64
	}
}

fn rule_strength_of_schedule(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(set.iter().map(|&t| strength_of_schedule(league, t)).collect())
}

fn strength_of_schedule(league: &LeagueStats, team: u8) -> f64 {
	let games = league.games_for(team);
	if games.is_empty() {
		return 0.5;
	}
	games.iter().map(|g| league.standing(g.opponent).win_percentage()).sum::<f64>() / games.len() as f64
}

fn rule_combined_ranking_conference(set: &[u8], _mode: Mode, league: &LeagueStats, roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(
		set.iter()
			.map(|&t| {
				let pool = roster.conference_indices(roster.team(t).conference);
				-(league.points_for_rank(t, &pool) + league.points_against_rank(t, &pool))
			})
			.collect(),
	)
}

fn rule_combined_ranking_league(set: &[u8], _mode: Mode, league: &LeagueStats, roster: &TeamRoster) -> Option<Vec<f64>> {
	let pool: Vec<u8> = (0..roster.len() as u8).collect();
	Some(set.iter().map(|&t| -(league.points_for_rank(t, &pool) + league.points_against_rank(t, &pool))).collect())
}

fn rule_net_points_common_games(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	let common = common_opponents(set, league);
	if common.is_empty() {
		return None;
	}
	Some(
		set.iter()
			.map(|&t| {
				let games = games_against(league, t, &common);
				games.iter().map(|g| i32::from(g.team_score) - i32::from(g.opponent_score)).sum::<i32>() as f64
			})
			.collect(),
	)
}

fn rule_net_points_all_games(set: &[u8], _mode: Mode, league: &LeagueStats, _roster: &TeamRoster) -> Option<Vec<f64>> {
	Some(set.iter().map(|&t| f64::from(league.standing(t).net_points())).collect())
}
