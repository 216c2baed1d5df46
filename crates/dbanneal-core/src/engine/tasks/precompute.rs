use crate::core::models::site::FixedCharge;
use crate::core::physics::potentials::{SELF_INTERACTION, screened_coulomb, separation};
use crate::engine::interactions::Interactions;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::{DMatrix, DVector, Point2};
use tracing::{debug, info, instrument};

/// Builds the distance matrix, the interaction matrix and the drive vector.
///
/// Each unordered pair is evaluated once and mirrored. The drive of a free
/// site is the sum of `magnitude · interaction(r)` over all fixed charges.
#[instrument(skip_all, name = "precompute_task", fields(free = free.len(), fixed = fixed.len()))]
pub fn run(
    free: &[Point2<f64>],
    fixed: &[FixedCharge],
    debye_length: f64,
    reporter: &ProgressReporter,
) -> Interactions {
    let n = free.len();
    info!("Precomputing pairwise distances and interactions.");
    reporter.report(Progress::TaskStart {
        total_steps: n as u64,
    });

    let mut distances = DMatrix::<f64>::zeros(n, n);
    let mut potentials = DMatrix::<f64>::from_element(n, n, SELF_INTERACTION);
    let mut drive = DVector::<f64>::zeros(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let r = separation(&free[i], &free[j]);
            let v = screened_coulomb(r, debye_length);
            distances[(i, j)] = r;
            distances[(j, i)] = r;
            potentials[(i, j)] = v;
            potentials[(j, i)] = v;
        }

        drive[i] = fixed
            .iter()
            .map(|charge| {
                let r = separation(&charge.location, &free[i]);
                charge.magnitude * screened_coulomb(r, debye_length)
            })
            .sum();
        debug!(site = i, x = free[i].x, y = free[i].y, drive = drive[i], "Site precomputed");

        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Interactions::from_parts(distances, potentials, drive)
}
