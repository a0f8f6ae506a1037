// Consensus rules and parameters
// This module provides consensus-related constants for the Bitgold networks

pub mod params;

pub use params::{ConsensusParams, Deployment, DeploymentPos};

/// Get consensus parameters for a specific network
pub fn get_consensus_params(network: crate::chainparams::Network) -> ConsensusParams {
    crate::chainparams::ChainParams::for_network(network).consensus
}
