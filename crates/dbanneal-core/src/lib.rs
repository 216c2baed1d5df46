//! # dbanneal Core Library
//!
//! Ground-state search for charge configurations of dangling-bond (DB) sites
//! on a passivated surface, by simulated annealing over site occupations.
//!
//! ## Architecture
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (sites, aggregates,
//!   [`Problem`](core::models::problem::Problem)), the screened Coulomb potential and
//!   the XML design and result formats.
//!
//! - **[`engine`]: The Logic Core.** The stateful annealing machinery: configuration,
//!   the precomputed interaction matrices, the occupation state, the cooling schedule,
//!   the bounded result history and the per-cycle population and hopping tasks.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a
//!   complete run, from a loaded problem to an exportable result.
//!
//! ## Example
//!
//! ```no_run
//! use dbanneal::core::io::design::DesignFile;
//! use dbanneal::core::io::sim_out::{SimOutFile, SimOutput};
//! use dbanneal::core::io::traits::SimFile;
//! use dbanneal::engine::config::AnnealConfig;
//! use dbanneal::engine::progress::ProgressReporter;
//! use dbanneal::workflows::anneal;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let problem = DesignFile::read_from_path("cooldbdesign.xml")?;
//! let config = AnnealConfig::from_problem(&problem)?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = anneal::run(&problem, &config, &ProgressReporter::default(), &mut rng)?;
//! SimOutFile::write_to_path(&SimOutput::from(&result), "cooloutput.xml")?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
