//! # Engine Module
//!
//! The stateful machinery of an annealing run.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Typed run parameters, built from a problem or by hand
//! - **Precomputed Tables** ([`interactions`]) - Pairwise distances, interactions and drive potentials
//! - **Runtime State** ([`state`]) - The occupation vector of the free sites
//! - **Schedule** ([`schedule`]) - PreAnneal/Annealing/Done phases and the kT and v_freeze evolution
//! - **Result History** ([`history`]) - Bounded FIFO of recorded configurations
//! - **Tasks** ([`tasks`]) - Precompute, population, hopping and energy computations
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Everything here is single-threaded. Randomness is always passed in as an
//! explicit generator.

pub mod config;
pub mod error;
pub mod history;
pub mod interactions;
pub mod progress;
pub mod schedule;
pub mod state;
pub mod tasks;
