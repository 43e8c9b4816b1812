use crate::counters::WorkerCounters;
use crate::scoring::simulate_score;
use nfl_sim_core::{seed_conference, CoinToss, Conference, GameOutcome, LeagueStats, ResolvedGame, TeamRoster};
use rand::Rng;
use rand_distr::Poisson;

/// Adapts a `rand::Rng` to the tiebreaker engine's minimal `CoinToss`
/// contract, so the same per-worker RNG substream drives both score
/// generation and coin-toss tiebreaks within a trial.
struct RngCoin<'a, R: Rng>(&'a mut R);

impl<R: Rng> CoinToss for RngCoin<'_, R> {
	fn next_index(&mut self, exclusive_upper_bound: usize) -> usize {
		if exclusive_upper_bound <= 1 {
			0
		} else {
			self.0.gen_range(0..exclusive_upper_bound)
		}
	}
}

/// Run one complete simulated season and fold the result into `counters`.
pub fn run_trial(unresolved: &[ResolvedGame], fixed: &[GameOutcome], roster: &TeamRoster, poisson: &Poisson<f64>, rng: &mut impl Rng, counters: &mut WorkerCounters) {
	let mut outcomes = Vec::with_capacity(fixed.len() + unresolved.len());
	outcomes.extend_from_slice(fixed);

	for game in unresolved {
		let home_wins = rng.gen_bool(0.5);
		let (home_score, away_score) = simulate_score(home_wins, poisson, rng);
		outcomes.push(GameOutcome {
			home: game.home,
			away: game.away,
			home_score,
			away_score,
		});
	}

	let league = LeagueStats::compute(roster, &outcomes);
	let mut coin = RngCoin(rng);

	let mut seeded = vec![false; roster.len()];
	for conference in Conference::ALL {
		let seeds = seed_conference(conference, &league, roster, &mut coin);
		for (position, &team) in seeds.iter().enumerate() {
			seeded[team as usize] = true;
			counters.seed_counts[team as usize][position] += 1;
			if position < 4 {
				counters.division_win_count[team as usize] += 1;
			}
			if position == 0 {
				counters.first_seed_count[team as usize] += 1;
			}
		}
	}

	for team in 0..roster.len() {
		let standing = league.standing(team as u8);
		counters.wins_sum[team] += f64::from(standing.wins);
	}
	counters.trials_run += 1;
}
