// Network registry
// Holds the chain parameters selected at startup for the rest of the process

use tracing::info;

use crate::chainparams::{ChainParams, ChainParamsError, Network};
use crate::consensus::DeploymentPos;

/// The process-wide home of the selected [`ChainParams`].
///
/// The top-level composition point owns one registry, calls [`select`] exactly
/// once before spawning any subsystem, and hands out references from then on.
/// Reading an unselected registry is a programming defect and panics rather
/// than returning an error.
///
/// [`select`]: NetworkRegistry::select
#[derive(Debug, Default)]
pub struct NetworkRegistry {
    params: Option<ChainParams>,
}

impl NetworkRegistry {
    /// A registry with no network selected.
    pub fn new() -> Self {
        Self { params: None }
    }

    /// Resolve `name` to a network, build its parameters, and store them.
    ///
    /// An unknown name is a recoverable configuration error and leaves the
    /// registry untouched. A repeated call replaces the stored parameters
    /// wholesale; there is no partial update.
    pub fn select(&mut self, name: &str) -> Result<(), ChainParamsError> {
        let network: Network = name.parse()?;
        let params = ChainParams::for_network(network);
        info!(%network, port = params.default_port, "selected chain parameters");
        self.params = Some(params);
        Ok(())
    }

    /// Whether a network has been selected.
    pub fn is_selected(&self) -> bool {
        self.params.is_some()
    }

    /// The network selected for this process, if any.
    pub fn network(&self) -> Option<Network> {
        self.params.as_ref().map(|p| p.network)
    }

    /// The selected chain parameters.
    ///
    /// Panics if no network has been selected yet: every caller runs after
    /// startup wiring, so an unselected registry means the process is built
    /// wrong and must not continue.
    pub fn current(&self) -> &ChainParams {
        self.params
            .as_ref()
            .expect("network registry read before a network was selected")
    }

    /// Move the activation window of one soft-fork deployment.
    ///
    /// This is the only mutation allowed after selection and exists for test
    /// orchestration. It is not synchronized; callers must run it before any
    /// concurrent readers exist.
    pub fn update_deployment(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
        self.params
            .as_mut()
            .expect("network registry read before a network was selected")
            .update_deployment(pos, start_time, timeout);
    }
}
