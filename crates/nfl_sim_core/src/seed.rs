//! Playoff seeding: division winners, then seeds 1-4 among them, then three
//! wild cards per conference assigned seeds 5-7.

use crate::standings::LeagueStats;
use crate::team::{Conference, TeamRoster};
use crate::tiebreak::{rank_by_standing, CoinToss, Mode};
use std::collections::HashSet;

/// Seeds 1 through 7 for one conference, in order (`seeds[0]` is the #1
/// seed). Indices 0..4 are always division winners; 4..7 are wild cards.
pub type ConferenceSeeds = [u8; 7];

pub fn seed_conference(conference: Conference, league: &LeagueStats, roster: &TeamRoster, coin: &mut impl CoinToss) -> ConferenceSeeds {
	let divisions = roster.division_groups(conference);

	let division_winners: Vec<u8> = divisions.into_iter().map(|group| rank_by_standing(&group, Mode::Division, league, roster, coin)[0]).collect();

	let seeds_1_to_4 = rank_by_standing(&division_winners, Mode::Division, league, roster, coin);

	let winners: HashSet<u8> = division_winners.into_iter().collect();
	let remaining: Vec<u8> = roster.conference_indices(conference).into_iter().filter(|t| !winners.contains(t)).collect();
	let wild_card_order = rank_by_standing(&remaining, Mode::WildCard, league, roster, coin);

	let mut seeds = [0u8; 7];
	seeds[..4].copy_from_slice(&seeds_1_to_4);
	seeds[4..].copy_from_slice(&wild_card_order[..3]);
	seeds
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::game::GameOutcome;
	use crate::team::tests::sample_roster;

	struct FixedCoin(usize);
	impl CoinToss for FixedCoin {
		fn next_index(&mut self, exclusive_upper_bound: usize) -> usize {
			self.0 % exclusive_upper_bound.max(1)
		}
	}

	#[test]
	fn seeds_are_a_permutation_with_no_duplicates() {
		let roster = sample_roster();
		let league = LeagueStats::compute(&roster, &[]);
		let mut coin = FixedCoin(3);
		let seeds = seed_conference(Conference::AFC, &league, &roster, &mut coin);
		let unique: HashSet<u8> = seeds.iter().copied().collect();
		assert_eq!(unique.len(), 7);
		for &team in &seeds {
			assert_eq!(roster.team(team).conference, Conference::AFC);
		}
	}

	#[test]
	fn division_winner_with_perfect_division_record_beats_a_tied_rival() {
		let roster = sample_roster();
		// t0 (AFC East) goes 3-0 against its division rivals; t1 only
		// manages 1-2 against them. Distinct division records, so the
		// winner is decided before any tiebreaker rule runs.
		let mut outcomes = Vec::new();
		for &opp in &[1u8, 2, 3] {
			outcomes.push(GameOutcome {
				home: 0,
				away: opp,
				home_score: 24,
				away_score: 10,
			});
		}
		let league = LeagueStats::compute(&roster, &outcomes);
		let mut coin = FixedCoin(0);
		let seeds = seed_conference(Conference::AFC, &league, &roster, &mut coin);
		assert_eq!(seeds[0], 0);
	}

	#[test]
	fn two_teams_from_the_same_division_can_both_earn_wild_cards() {
		let roster = sample_roster();
		// t4 and t5 are both AFC North, both lose their division to t7, but
		// both clearly outperform every AFC South/West team on record.
		let mut outcomes = Vec::new();
		for &winner in &[4u8, 5] {
			outcomes.push(GameOutcome {
				home: 7,
				away: winner,
				home_score: 10,
				away_score: 24,
			});
		}
		for &strong in &[4u8, 5] {
			for &weak in &[8u8, 9, 12, 13] {
				outcomes.push(GameOutcome {
					home: strong,
					away: weak,
					home_score: 28,
					away_score: 7,
				});
			}
		}
		let league = LeagueStats::compute(&roster, &outcomes);
		let mut coin = FixedCoin(0);
		let seeds = seed_conference(Conference::AFC, &league, &roster, &mut coin);
		let wild_cards = &seeds[4..];
		assert!(wild_cards.contains(&4));
		assert!(wild_cards.contains(&5));
	}

	#[test]
	fn division_winner_with_perfect_record_is_seed_one_or_better() {
		let roster = sample_roster();
		// t0 beats every other AFC East team (t1, t2, t3) twice.
		let mut outcomes = Vec::new();
		for &opp in &[1u8, 2, 3] {
			outcomes.push(GameOutcome {
				home: 0,
				away: opp,
				home_score: 30,
				away_score: 3,
			});
			outcomes.push(GameOutcome {
				home: opp,
				away: 0,
				home_score: 3,
				away_score: 30,
			});
		}
		let league = LeagueStats::compute(&roster, &outcomes);
		let mut coin = FixedCoin(0);
		let seeds = seed_conference(Conference::AFC, &league, &roster, &mut coin);
		assert!(seeds[..4].contains(&0));
	}
}
