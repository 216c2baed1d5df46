//! Physical constants and the pairwise potential law used by the engine.

pub mod potentials;
