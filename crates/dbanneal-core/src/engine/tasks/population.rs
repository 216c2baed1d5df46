use super::energy::effective_potential;
use crate::engine::interactions::Interactions;
use crate::engine::state::ChargeState;
use rand::Rng;

/// Fermi-like probability of accepting an occupation change of cost `delta`.
#[inline]
pub fn flip_probability(delta: f64, kt: f64) -> f64 {
    1.0 / (1.0 + (delta / kt).exp())
}

/// One population pass over every free site, in index order.
///
/// The pass is sequential: a flip is committed before the next site's local
/// field is evaluated. One uniform draw is consumed per site.
///
/// # Return
///
/// The number of sites whose occupation changed.
pub fn run<R: Rng + ?Sized>(
    state: &mut ChargeState,
    table: &Interactions,
    v0: f64,
    kt: f64,
    v_freeze: f64,
    rng: &mut R,
) -> usize {
    let mut flips = 0;
    for i in 0..state.len() {
        let v_eff = effective_potential(state, table, v0, i);
        let delta = if state.is_occupied(i) {
            v_eff + v_freeze
        } else {
            -v_eff + v_freeze
        };
        if rng.r#gen::<f64>() < flip_probability(delta, kt) {
            state.flip(i);
            flips += 1;
        }
    }
    flips
}
