//! # Core Module
//!
//! Stateless building blocks of the annealer.
//!
//! - **Site Model** ([`models`]) - Sites, the aggregate tree that groups them and the
//!   [`Problem`](models::problem::Problem) that owns tree, parameters and external charges
//! - **Physics** ([`physics`]) - Physical constants and the screened Coulomb potential
//! - **File I/O** ([`io`]) - The design input document and the result output document
//!
//! Nothing in this module holds runtime simulation state; that lives in
//! [`crate::engine`].

pub mod io;
pub mod models;
pub mod physics;
