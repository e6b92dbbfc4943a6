//! Test fixtures for tour-planner.
//!
//! Provides real Baden-Württemberg locations around the Stuttgart depot
//! and mock duration oracles.

pub mod bw_locations;
pub mod oracles;

pub use bw_locations::*;
pub use oracles::*;
