//! The discretized decision process: parameters, tables, value iteration,
//! and policy extraction.

mod grid;
mod iteration;
mod mobility;
mod params;
mod policy;
mod solver;
mod tables;


pub use grid::*;
pub use iteration::*;
pub use mobility::*;
pub use params::*;
pub use policy::*;
pub use solver::*;
pub use tables::*;
