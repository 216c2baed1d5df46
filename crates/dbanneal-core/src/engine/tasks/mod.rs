//! Per-run and per-cycle computations of the annealer.
//!
//! [`precompute`] runs once per invocation and produces the
//! [`Interactions`](crate::engine::interactions::Interactions) table. Every
//! cycle then runs a [`population`] pass followed by a [`hopping`] phase;
//! both evaluate configurations through [`energy`]. Tasks that draw random
//! numbers take the generator explicitly, so call order alone fixes the
//! random stream.

pub mod energy;
pub mod hopping;
pub mod population;
pub mod precompute;
