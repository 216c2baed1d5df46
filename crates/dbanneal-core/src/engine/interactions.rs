use nalgebra::{DMatrix, DVector};

/// Precomputed pairwise quantities for the free sites of one run.
///
/// All three arrays are indexed by position in the flattened free-site list.
/// The off-diagonal entries of both matrices are symmetric. The diagonal of
/// `potentials` holds [`SELF_INTERACTION`](crate::core::physics::potentials::SELF_INTERACTION)
/// and is never part of an energy sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactions {
    distances: DMatrix<f64>,
    potentials: DMatrix<f64>,
    drive: DVector<f64>,
}

impl Interactions {
    pub(crate) fn from_parts(
        distances: DMatrix<f64>,
        potentials: DMatrix<f64>,
        drive: DVector<f64>,
    ) -> Self {
        debug_assert!(distances.is_square() && potentials.shape() == distances.shape());
        debug_assert_eq!(drive.len(), distances.nrows());
        Self {
            distances,
            potentials,
            drive,
        }
    }

    /// Number of free sites.
    pub fn len(&self) -> usize {
        self.drive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drive.is_empty()
    }

    /// Separation of sites `i` and `j`, in metres.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[(i, j)]
    }

    /// Screened Coulomb interaction between sites `i` and `j`.
    #[inline]
    pub fn potential(&self, i: usize, j: usize) -> f64 {
        self.potentials[(i, j)]
    }

    /// Potential at site `i` due to every fixed charge.
    #[inline]
    pub fn drive(&self, i: usize) -> f64 {
        self.drive[i]
    }

    pub fn distances(&self) -> &DMatrix<f64> {
        &self.distances
    }

    pub fn potentials(&self) -> &DMatrix<f64> {
        &self.potentials
    }

    pub fn drive_vector(&self) -> &DVector<f64> {
        &self.drive
    }
}
