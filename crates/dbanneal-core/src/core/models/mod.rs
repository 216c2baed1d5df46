//! # Core Models Module
//!
//! Data structures describing a dangling-bond design as it is handed to the
//! annealing engine.
//!
//! ## Key Components
//!
//! - [`site`] - Individual charge sites and static external charges
//! - [`aggregate`] - The arena-backed aggregate tree and its flattening iterator
//! - [`problem`] - The loaded problem: site tree, parameter table, fixed charges
//! - [`ids`] - Key types for the aggregate arena
//!
//! ## Usage
//!
//! ```ignore
//! use dbanneal::core::models::{aggregate::SiteTree, problem::Problem, site::Site};
//!
//! let mut tree = SiteTree::new();
//! let group = tree.add_aggregate(tree.root()).unwrap();
//! tree.add_site(group, Site::free(0.0, 0.0)).unwrap();
//! tree.add_site(group, Site::fixed(3.84, 0.0)).unwrap();
//!
//! let mut problem = Problem::with_sites(tree);
//! problem.set_parameter("anneal_cycles", "500");
//! ```

pub mod aggregate;
pub mod ids;
pub mod problem;
pub mod site;
