use rand::Rng;
use rand::seq::SliceRandom;

/// Occupation of every free site during a run.
///
/// Occupations are `0` or `1`, indexed like the precomputed interaction
/// tables. The number of occupied sites is tracked alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeState {
    charges: Vec<u8>,
    occupied: usize,
}

impl ChargeState {
    /// All `n` sites start unoccupied.
    pub fn new(n: usize) -> Self {
        Self {
            charges: vec![0; n],
            occupied: 0,
        }
    }

    /// Builds a state from explicit occupations; any non-zero value counts as occupied.
    pub fn from_charges(charges: impl IntoIterator<Item = u8>) -> Self {
        let charges: Vec<u8> = charges.into_iter().map(|q| u8::from(q != 0)).collect();
        let occupied = charges.iter().filter(|&&q| q == 1).count();
        Self { charges, occupied }
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn charges(&self) -> &[u8] {
        &self.charges
    }

    #[inline]
    pub fn charge(&self, i: usize) -> u8 {
        self.charges[i]
    }

    #[inline]
    pub fn is_occupied(&self, i: usize) -> bool {
        self.charges[i] == 1
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn unoccupied_count(&self) -> usize {
        self.charges.len() - self.occupied
    }

    /// Toggles the occupation of site `i`.
    pub fn flip(&mut self, i: usize) {
        if self.charges[i] == 1 {
            self.charges[i] = 0;
            self.occupied -= 1;
        } else {
            self.charges[i] = 1;
            self.occupied += 1;
        }
    }

    /// Moves the charge on `from` to the empty site `to`.
    ///
    /// The total occupation is unchanged. Calling `hop(to, from)` afterwards
    /// restores the previous state exactly.
    pub fn hop(&mut self, from: usize, to: usize) {
        debug_assert!(self.is_occupied(from) && !self.is_occupied(to));
        self.charges[from] = 0;
        self.charges[to] = 1;
    }

    /// A uniformly chosen site with the given occupation, or `None` if there is none.
    pub fn random_site<R: Rng + ?Sized>(&self, occupied: bool, rng: &mut R) -> Option<usize> {
        let wanted = u8::from(occupied);
        let pool: Vec<usize> = self
            .charges
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q == wanted)
            .map(|(i, _)| i)
            .collect();
        pool.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_state_is_empty_and_counts_are_consistent() {
        let state = ChargeState::new(4);
        assert_eq!(state.charges(), &[0, 0, 0, 0]);
        assert_eq!(state.occupied_count(), 0);
        assert_eq!(state.unoccupied_count(), 4);
    }

    #[test]
    fn flip_toggles_and_tracks_count() {
        let mut state = ChargeState::new(3);
        state.flip(1);
        assert!(state.is_occupied(1));
        assert_eq!(state.occupied_count(), 1);
        state.flip(1);
        assert!(!state.is_occupied(1));
        assert_eq!(state.occupied_count(), 0);
    }

    #[test]
    fn hop_conserves_charge_and_reverses_exactly() {
        let mut state = ChargeState::from_charges([1, 0, 1, 0]);
        let before = state.clone();

        state.hop(0, 3);
        assert_eq!(state.charges(), &[0, 0, 1, 1]);
        assert_eq!(state.occupied_count(), 2);

        state.hop(3, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn random_site_only_returns_sites_from_the_requested_pool() {
        let state = ChargeState::from_charges([1, 0, 1, 0, 0]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let occupied = state.random_site(true, &mut rng).unwrap();
            assert!(state.is_occupied(occupied));
            let empty = state.random_site(false, &mut rng).unwrap();
            assert!(!state.is_occupied(empty));
        }
    }

    #[test]
    fn random_site_covers_the_whole_pool() {
        let state = ChargeState::from_charges([0, 0, 0, 1]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[state.random_site(false, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn random_site_from_empty_pool_is_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ChargeState::new(3).random_site(true, &mut rng), None);
        assert_eq!(
            ChargeState::from_charges([1, 1]).random_site(false, &mut rng),
            None
        );
    }
}
