// Bitgold Rust - chain parameter definitions for the Bitgold node
// This is the library crate that exposes the public API

pub mod chainparams;
pub mod consensus;

pub use chainparams::{ChainParams, Network, NetworkRegistry};
pub use consensus::ConsensusParams;
