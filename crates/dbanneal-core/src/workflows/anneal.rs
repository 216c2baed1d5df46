use crate::core::io::sim_out::{EngineInfo, SimOutput};
use crate::core::models::problem::Problem;
use crate::engine::config::AnnealConfig;
use crate::engine::error::EngineError;
use crate::engine::history::ResultHistory;
use crate::engine::progress::{CycleStatus, Progress, ProgressReporter};
use crate::engine::schedule::{AnnealPhase, Schedule};
use crate::engine::state::ChargeState;
use crate::engine::tasks::{energy, hopping, population, precompute};
use nalgebra::Point2;
use rand::Rng;
use tracing::{debug, info, instrument};

pub const ENGINE_NAME: &str = "SimAnneal";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Free-site locations in design units; column order of every configuration.
    pub site_locations: Vec<Point2<f64>>,
    /// Recorded configurations, oldest first.
    pub history: Vec<Vec<u8>>,
    /// Energy of the final configuration, in eV.
    pub final_energy: f64,
    pub cycles_run: usize,
    pub config: AnnealConfig,
}

impl AnnealResult {
    pub fn final_configuration(&self) -> Option<&[u8]> {
        self.history.last().map(Vec::as_slice)
    }
}

impl From<&AnnealResult> for SimOutput {
    fn from(result: &AnnealResult) -> Self {
        SimOutput {
            engine: EngineInfo {
                name: ENGINE_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
            },
            parameters: result.config.parameter_pairs(),
            site_locations: result.site_locations.clone(),
            configurations: result.history.clone(),
        }
    }
}

/// Runs the full anneal on a loaded problem.
///
/// # Errors
///
/// Returns [`EngineError::DegenerateProblem`] before any work is done if the
/// problem has no free sites.
#[instrument(skip_all, name = "anneal_workflow")]
pub fn run<R: Rng + ?Sized>(
    problem: &Problem,
    config: &AnnealConfig,
    reporter: &ProgressReporter,
    rng: &mut R,
) -> Result<AnnealResult, EngineError> {
    let partitioned = problem.partition();
    if partitioned.free.is_empty() {
        return Err(EngineError::DegenerateProblem {
            fixed_sites: partitioned.fixed.len(),
        });
    }
    info!(
        free_sites = partitioned.free.len(),
        fixed_charges = partitioned.fixed.len(),
        "Starting anneal."
    );

    // === Phase 1: Precompute ===
    reporter.report(Progress::PhaseStart { name: "Precompute" });
    let table = precompute::run(
        &partitioned.free,
        &partitioned.fixed,
        config.physics.debye_length,
        reporter,
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Anneal ===
    reporter.report(Progress::PhaseStart { name: "Annealing" });
    let total_cycles = Schedule::total_cycles(&config.schedule);
    reporter.report(Progress::TaskStart {
        total_steps: total_cycles as u64,
    });

    let v0 = config.physics.global_v0;
    let mut state = ChargeState::new(table.len());
    let mut schedule = Schedule::new(&config.schedule);
    let mut history = ResultHistory::new(config.history_capacity());
    let mut energy = energy::system_energy(&state, &table, v0);
    let mut cycles_run = 0;

    while !schedule.is_done() {
        let phase = schedule.phase();
        let (kt, v_freeze) = (schedule.kt(), schedule.v_freeze());
        let flips = population::run(&mut state, &table, v0, kt, v_freeze, rng);
        let hops = hopping::run(&mut state, &table, config.unfav_hop_scale, rng);
        history.push(state.charges());

        let new_energy = energy::system_energy(&state, &table, v0);
        debug!(
            cycle = cycles_run,
            %phase,
            kt,
            v_freeze,
            flips,
            hops_attempted = hops.attempted,
            hops_accepted = hops.accepted,
            energy = new_energy,
            delta = new_energy - energy,
            "Cycle complete"
        );
        energy = new_energy;
        cycles_run += 1;
        reporter.report(Progress::TaskIncrement);
        reporter.report(Progress::Cycle(CycleStatus {
            phase,
            kt,
            v_freeze,
            energy,
        }));

        if schedule.advance() == AnnealPhase::Annealing && phase == AnnealPhase::PreAnneal {
            reporter.report(Progress::StatusUpdate {
                text: "Pre-anneal finished".to_string(),
            });
        }
    }

    reporter.report(Progress::TaskFinish);
    if cycles_run > 0 {
        reporter.report(Progress::StatusUpdate {
            text: format!("Final energy {energy:.6} eV"),
        });
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        cycles = cycles_run,
        recorded = history.len(),
        occupied = state.occupied_count(),
        final_energy = energy,
        "Anneal complete."
    );

    Ok(AnnealResult {
        site_locations: partitioned.free,
        history: history.into_vec(),
        final_energy: energy,
        cycles_run,
        config: config.clone(),
    })
}
