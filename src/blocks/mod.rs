//! Simulation blocks

mod discrete;
mod sources;
mod statespace;
mod transfer_function;

pub use discrete::DiscreteTransferFunction;
pub use sources::Step;
pub use statespace::{DiscreteStateSpace, StateSpace};
pub use transfer_function::TransferFunction;
