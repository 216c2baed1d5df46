//! # Workflows Module
//!
//! Top-level entry points of the library. A workflow takes a loaded
//! [`Problem`](crate::core::models::problem::Problem) and a typed configuration and
//! runs every stage of the computation, reporting progress as it goes.
//!
//! - **Anneal Workflow** ([`anneal`]) - Precompute followed by the PreAnneal and
//!   Annealing cycles, producing the bounded result history.

pub mod anneal;
