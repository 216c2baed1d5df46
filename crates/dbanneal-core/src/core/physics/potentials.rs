use nalgebra::Point2;
use std::f64::consts::PI;

pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19; // C
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12; // F/m

/// Prefactor q / (4π ε₀) of the Coulomb law, in V·m.
pub const COULOMB_PREFACTOR: f64 = ELEMENTARY_CHARGE / (4.0 * PI * VACUUM_PERMITTIVITY);

pub const HARTREE_TO_EV: f64 = 27.2114;

/// Design coordinates are in ångström; potentials take metres.
pub const DESIGN_UNIT_TO_METRE: f64 = 1e-10;

/// Stand-in for the undefined self-interaction on the matrix diagonal.
pub const SELF_INTERACTION: f64 = 1e5;

const MIN_SEPARATION_METRE: f64 = 1e-15;

/// Euclidean distance between two design-space points, converted to metres.
#[inline]
pub fn separation(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(a, b) * DESIGN_UNIT_TO_METRE
}

/// Screened (Yukawa) Coulomb potential `k · exp(−r/λ) / r`.
///
/// Coincident points have no finite interaction and get [`SELF_INTERACTION`].
#[inline]
pub fn screened_coulomb(r: f64, debye_length: f64) -> f64 {
    if r < MIN_SEPARATION_METRE {
        return SELF_INTERACTION;
    }
    COULOMB_PREFACTOR * (-r / debye_length).exp() / r
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn separation_converts_angstrom_to_metre() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!(f64_approx_equal(separation(&a, &b), 5e-10));
        assert!(f64_approx_equal(separation(&b, &a), 5e-10));
    }

    #[test]
    fn screened_coulomb_without_screening_reduces_to_coulomb() {
        let r = 1e-9;
        let v = screened_coulomb(r, f64::INFINITY);
        assert!(f64_approx_equal(v, COULOMB_PREFACTOR / r));
    }

    #[test]
    fn screened_coulomb_at_one_debye_length_is_damped_by_e() {
        let lambda = 5e-9;
        let v = screened_coulomb(lambda, lambda);
        assert!(f64_approx_equal(v, COULOMB_PREFACTOR / lambda / std::f64::consts::E));
    }

    #[test]
    fn screened_coulomb_decreases_with_distance() {
        let lambda = 5e-9;
        let near = screened_coulomb(3.84e-10, lambda);
        let far = screened_coulomb(7.68e-10, lambda);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn screened_coulomb_at_zero_distance_returns_sentinel() {
        assert_eq!(screened_coulomb(0.0, 5e-9), SELF_INTERACTION);
    }

    #[test]
    fn coulomb_prefactor_matches_known_value() {
        // e / (4π ε₀) ≈ 1.44 eV·nm expressed in V·m.
        assert!((COULOMB_PREFACTOR - 1.439_964_5e-9).abs() < 1e-15);
    }
}
