use super::energy::hop_energy_delta;
use crate::engine::interactions::Interactions;
use crate::engine::state::ChargeState;
use rand::Rng;
use tracing::trace;

/// Hop trials per unoccupied site in one hopping phase.
pub const TRIALS_PER_UNOCCUPIED_SITE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HopStats {
    pub attempted: usize,
    pub accepted: usize,
}

/// Metropolis-style acceptance of a hop with energy change `delta`.
///
/// Downhill and level moves are always taken without consuming a random
/// draw; uphill moves are taken with probability `exp(−delta / scale)`.
#[inline]
pub fn accept_hop<R: Rng + ?Sized>(delta: f64, scale: f64, rng: &mut R) -> bool {
    delta <= 0.0 || rng.r#gen::<f64>() < (-delta / scale).exp()
}

/// One hopping phase: up to five trials per currently unoccupied site.
///
/// Each trial moves a random charge to a random empty site and keeps or
/// reverses the move according to [`accept_hop`]. The phase ends early if
/// either pool is empty. Total occupation is conserved.
pub fn run<R: Rng + ?Sized>(
    state: &mut ChargeState,
    table: &Interactions,
    unfav_hop_scale: f64,
    rng: &mut R,
) -> HopStats {
    let mut stats = HopStats::default();
    let max_trials = TRIALS_PER_UNOCCUPIED_SITE * state.unoccupied_count();

    for _ in 0..max_trials {
        let Some(from) = state.random_site(true, rng) else {
            break;
        };
        let Some(to) = state.random_site(false, rng) else {
            break;
        };

        let delta = hop_energy_delta(state, table, from, to);
        stats.attempted += 1;
        if accept_hop(delta, unfav_hop_scale, rng) {
            state.hop(from, to);
            stats.accepted += 1;
            trace!(from, to, delta, "Hop accepted");
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::ProgressReporter;
    use crate::engine::tasks::energy::system_energy;
    use crate::engine::tasks::precompute;
    use nalgebra::Point2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_line(n: usize, spacing: f64) -> Interactions {
        let sites: Vec<_> = (0..n)
            .map(|i| Point2::new(i as f64 * spacing, 0.0))
            .collect();
        precompute::run(&sites, &[], 5e-9, &ProgressReporter::new())
    }

    #[test]
    fn downhill_and_level_hops_are_always_accepted() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            assert!(accept_hop(-1e-3, 1.0, &mut rng));
            assert!(accept_hop(0.0, 1.0, &mut rng));
        }
    }

    #[test]
    fn uphill_acceptance_frequency_matches_boltzmann_factor() {
        let mut rng = StdRng::seed_from_u64(42);
        let (delta, scale) = (0.7, 1.0);
        let trials = 200_000;
        let accepted = (0..trials)
            .filter(|_| accept_hop(delta, scale, &mut rng))
            .count();
        let observed = accepted as f64 / trials as f64;
        let expected = (-delta / scale).exp();
        assert!(
            (observed - expected).abs() < 0.01,
            "observed {observed}, expected {expected}"
        );
    }

    #[test]
    fn huge_uphill_cost_is_never_accepted() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            assert!(!accept_hop(1e4, 1.0, &mut rng));
        }
    }

    #[test]
    fn hopping_conserves_total_occupation() {
        let table = create_line(8, 3.84);
        let mut state = ChargeState::from_charges([1, 1, 1, 0, 0, 0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let stats = run(&mut state, &table, 1.0, &mut rng);
            assert!(stats.accepted <= stats.attempted);
            assert!(stats.attempted <= TRIALS_PER_UNOCCUPIED_SITE * 5);
            assert_eq!(state.occupied_count(), 3);
            assert_eq!(state.charges().iter().map(|&q| q as usize).sum::<usize>(), 3);
        }
    }

    #[test]
    fn hopping_spreads_clustered_charges_apart() {
        let table = create_line(6, 3.84);
        let mut state = ChargeState::from_charges([1, 1, 0, 0, 0, 0]);
        let before = system_energy(&state, &table, 0.0);
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..20 {
            run(&mut state, &table, 0.01, &mut rng);
        }
        let after = system_energy(&state, &table, 0.0);
        assert!(after < before);
        assert_eq!(state.charges(), &[1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn ground_state_survives_a_cold_hopping_phase() {
        let table = create_line(6, 3.84);
        let ground = ChargeState::from_charges([1, 0, 0, 0, 0, 1]);
        let mut state = ground.clone();
        let mut rng = StdRng::seed_from_u64(31);

        let stats = run(&mut state, &table, 1e-6, &mut rng);

        assert_eq!(stats.attempted, TRIALS_PER_UNOCCUPIED_SITE * 4);
        assert_eq!(stats.accepted, 0);
        assert_eq!(state, ground);
    }

    #[test]
    fn phase_stops_without_a_valid_pair() {
        let table = create_line(3, 3.84);
        let mut rng = StdRng::seed_from_u64(0);

        let mut empty = ChargeState::new(3);
        assert_eq!(run(&mut empty, &table, 1.0, &mut rng), HopStats::default());

        let mut full = ChargeState::from_charges([1, 1, 1]);
        assert_eq!(run(&mut full, &table, 1.0, &mut rng), HopStats::default());
    }
}
