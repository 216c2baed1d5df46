//! Reading and writing the simulation documents.
//!
//! Both documents are XML, mapped onto private serde structs and read or
//! written with `quick-xml`: [`design`] reads the design input into a
//! [`Problem`](crate::core::models::problem::Problem), [`sim_out`] writes and
//! reads the result document. Both implement the [`traits::SimFile`]
//! interface.

pub mod design;
pub mod sim_out;
pub mod traits;

mod document;
