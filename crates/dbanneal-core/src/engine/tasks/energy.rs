use crate::core::physics::potentials::HARTREE_TO_EV;
use crate::engine::interactions::Interactions;
use crate::engine::state::ChargeState;

/// Total energy of a configuration:
/// `(v0 + Σ_i q_i·drive_i + Σ_{i<j} q_i·q_j·V_ij) · HARTREE_TO_EV`.
pub fn system_energy(state: &ChargeState, table: &Interactions, v0: f64) -> f64 {
    let n = state.len();
    let mut energy = v0;
    for i in 0..n {
        if !state.is_occupied(i) {
            continue;
        }
        energy += table.drive(i);
        for j in (i + 1)..n {
            if state.is_occupied(j) {
                energy += table.potential(i, j);
            }
        }
    }
    energy * HARTREE_TO_EV
}

/// Energy change of moving the charge on `from` to the empty site `to`,
/// evaluated in O(n) against the current state.
///
/// Equal to `system_energy` after the hop minus `system_energy` before it.
pub fn hop_energy_delta(state: &ChargeState, table: &Interactions, from: usize, to: usize) -> f64 {
    let mut delta = table.drive(to) - table.drive(from);
    for j in 0..state.len() {
        if j != from && j != to && state.is_occupied(j) {
            delta += table.potential(to, j) - table.potential(from, j);
        }
    }
    delta * HARTREE_TO_EV
}

/// Local field at site `i`: `v0 − drive_i − Σ_{j≠i} V_ij·q_j`.
///
/// A higher field favours occupying the site. The drive of the fixed
/// charges is subtracted, not added, because [`system_energy`] charges
/// `+q_i·drive_i` for occupying site `i`: a fixed charge repels a free one
/// exactly like an occupied neighbour does, and lowers the field by the
/// energy the occupation would cost.
pub fn effective_potential(state: &ChargeState, table: &Interactions, v0: f64, i: usize) -> f64 {
    let screening: f64 = (0..i)
        .chain((i + 1)..state.len())
        .filter(|&j| state.is_occupied(j))
        .map(|j| table.potential(i, j))
        .sum();
    v0 - table.drive(i) - screening
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::ProgressReporter;
    use crate::engine::tasks::precompute;
    use crate::core::models::site::FixedCharge;
    use nalgebra::Point2;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn create_table() -> Interactions {
        let sites = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.84, 0.0),
            Point2::new(7.68, 0.0),
            Point2::new(0.0, 7.68),
            Point2::new(11.52, 3.84),
        ];
        let fixed = vec![FixedCharge::new(-7.68, 0.0, 1.0)];
        precompute::run(&sites, &fixed, 5e-9, &ProgressReporter::new())
    }

    #[test]
    fn empty_configuration_has_only_the_bias_energy() {
        let table = create_table();
        let state = ChargeState::new(table.len());
        assert!(f64_approx_equal(
            system_energy(&state, &table, 0.5),
            0.5 * HARTREE_TO_EV
        ));
    }

    #[test]
    fn energy_counts_each_pair_once_and_skips_the_diagonal() {
        let table = create_table();
        let state = ChargeState::from_charges([1, 1, 0, 0, 0]);
        let expected =
            (table.drive(0) + table.drive(1) + table.potential(0, 1)) * HARTREE_TO_EV;
        assert!(f64_approx_equal(system_energy(&state, &table, 0.0), expected));
    }

    #[test]
    fn hop_delta_matches_full_energy_difference() {
        let table = create_table();
        let mut state = ChargeState::from_charges([1, 0, 1, 0, 1]);
        for (from, to) in [(0, 1), (2, 3), (4, 1), (0, 3)] {
            let before = system_energy(&state, &table, 1.0);
            let delta = hop_energy_delta(&state, &table, from, to);
            state.hop(from, to);
            let after = system_energy(&state, &table, 1.0);
            assert!(f64_approx_equal(delta, after - before));
            state.hop(to, from);
        }
    }

    #[test]
    fn effective_potential_ignores_the_site_itself() {
        let table = create_table();
        let occupied = ChargeState::from_charges([1, 0, 0, 0, 0]);
        let empty = ChargeState::new(5);
        assert_eq!(
            effective_potential(&occupied, &table, 1.0, 0),
            effective_potential(&empty, &table, 1.0, 0)
        );
    }

    #[test]
    fn occupied_neighbours_lower_the_effective_potential() {
        let table = create_table();
        let empty = ChargeState::new(5);
        let neighbour = ChargeState::from_charges([0, 1, 0, 0, 0]);
        let lone = effective_potential(&empty, &table, 1.0, 0);
        let screened = effective_potential(&neighbour, &table, 1.0, 0);
        assert!(f64_approx_equal(lone - screened, table.potential(0, 1)));
    }

    #[test]
    fn fixed_charge_drive_lowers_the_field_by_the_occupation_cost() {
        let table = create_table();
        let empty = ChargeState::new(5);
        for i in 0..5 {
            let mut charges = [0; 5];
            charges[i] = 1;
            let single = ChargeState::from_charges(charges);
            let cost = (system_energy(&single, &table, 0.0) - system_energy(&empty, &table, 0.0))
                / HARTREE_TO_EV;

            let field = effective_potential(&empty, &table, 1.0, i);
            assert!(table.drive(i) > 0.0);
            assert!(f64_approx_equal(field, 1.0 - table.drive(i)));
            assert!(f64_approx_equal(1.0 - field, cost));
        }
    }
}
