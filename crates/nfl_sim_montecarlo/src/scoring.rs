use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Mean of the Poisson distribution used to draw plausible NFL scores.
pub const SCORE_LAMBDA: f64 = 22.5;

/// Flip a fair coin for the winner, then draw two Poisson(lambda) scores,
/// resampling until they strictly separate a winner from a loser (simulated
/// games never end in a tie). Returns `(home_score, away_score)`.
pub fn simulate_score(home_wins: bool, poisson: &Poisson<f64>, rng: &mut impl Rng) -> (u16, u16) {
	loop {
		let a = poisson.sample(rng).round();
		let b = poisson.sample(rng).round();
		if (a - b).abs() < f64::EPSILON {
			continue;
		}
		let (winner_score, loser_score) = if a > b { (a, b) } else { (b, a) };
		let winner_score = winner_score as u16;
		let loser_score = loser_score as u16;
		return if home_wins { (winner_score, loser_score) } else { (loser_score, winner_score) };
	}
}

#[must_use]
pub fn score_distribution() -> Poisson<f64> {
	Poisson::new(SCORE_LAMBDA).expect("lambda is a finite positive constant")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn winner_always_outscores_loser() {
		let poisson = score_distribution();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			let (home, away) = simulate_score(true, &poisson, &mut rng);
			assert!(home > away);
			let (home, away) = simulate_score(false, &poisson, &mut rng);
			assert!(away > home);
		}
	}
}
