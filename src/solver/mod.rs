//! The constraint-propagating solver core. `solver::*` depends only on
//! [`types::GameOracle`], never on `crate::board::Board` directly, so it
//! can be driven against the real game or a small test fixture.

pub mod board_view;
pub mod controller;
pub mod enumerator;
pub mod frontier;
pub mod propagator;
pub mod reconciler;
pub mod selector;
#[cfg(test)]
pub mod test_support;
pub mod types;

pub use controller::{PlayResult, Solver};
pub use types::{CellKind, Coord, GameCell, GameOracle, RevealOutcome};
