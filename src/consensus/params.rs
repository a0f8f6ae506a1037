// Network parameters and consensus rules
// This module defines the consensus-critical constants for the Bitgold networks

use bitcoin::{BlockHash, Target, Work};

/// Position of a versionbits soft-fork deployment in the deployment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentPos {
    /// Dummy deployment used by signalling tests.
    TestDummy = 0,
    /// BIP68, BIP112, and BIP113 (relative lock times).
    Csv = 1,
    /// BIP141, BIP143, and BIP147 (segregated witness).
    Segwit = 2,
}

impl DeploymentPos {
    pub const COUNT: usize = 3;
}

/// Activation window of one versionbits deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// Bit position to select the signalling bit in the block version.
    /// Must be in 0..=28 and unique per active deployment.
    pub bit: u8,
    /// Start of the signalling window as a unix timestamp, or `ALWAYS_ACTIVE`.
    pub start_time: i64,
    /// End of the signalling window as a unix timestamp, or `NO_TIMEOUT`.
    pub timeout: i64,
}

impl Deployment {
    /// Sentinel start time: the deployment is active from genesis.
    pub const ALWAYS_ACTIVE: i64 = -1;
    /// Sentinel timeout: the deployment never expires.
    pub const NO_TIMEOUT: i64 = i64::MAX;
}

/// Consensus parameters for a specific Bitgold network
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusParams {
    /// Number of blocks between block-subsidy halvings
    pub subsidy_halving_interval: u32,
    /// Block height at which BIP16 (P2SH) becomes active
    pub bip16_height: u32,
    /// Block height at which BIP34 (height in coinbase) becomes active
    pub bip34_height: u32,
    /// Hash of the block at `bip34_height`
    pub bip34_hash: BlockHash,
    /// Block height at which BIP65 (CHECKLOCKTIMEVERIFY) becomes active
    pub bip65_height: u32,
    /// Block height at which BIP66 (strict DER signatures) becomes active
    pub bip66_height: u32,
    /// Maximum allowed target (minimum difficulty)
    pub pow_limit: Target,
    /// Target timespan for difficulty adjustment (2 weeks in seconds)
    pub pow_target_timespan: u32,
    /// Target spacing between blocks (10 minutes in seconds)
    pub pow_target_spacing: u32,
    /// Whether blocks may fall back to the minimum difficulty
    pub pow_allow_min_difficulty_blocks: bool,
    /// Whether difficulty retargeting is disabled entirely
    pub pow_no_retargeting: bool,
    /// Number of signalling blocks needed to lock in a rule change
    pub rule_change_activation_threshold: u32,
    /// Size of the signalling window in blocks
    pub miner_confirmation_window: u32,
    /// Versionbits deployment table, indexed by `DeploymentPos`
    pub deployments: [Deployment; DeploymentPos::COUNT],
    /// Minimum cumulative work a candidate best chain must have
    pub minimum_chain_work: Work,
    /// Block whose ancestor signatures are assumed valid, if any
    pub default_assume_valid: Option<BlockHash>,
}

impl ConsensusParams {
    /// Number of blocks between difficulty adjustments
    pub fn difficulty_adjustment_interval(&self) -> u32 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Get the expected time for a difficulty adjustment period
    pub fn expected_timespan(&self) -> u32 {
        self.difficulty_adjustment_interval() * self.pow_target_spacing
    }

    /// Check if a target is within the network's PoW limit
    pub fn is_target_valid(&self, target: &Target) -> bool {
        *target <= self.pow_limit
    }

    /// Get the activation window for a deployment
    pub fn deployment(&self, pos: DeploymentPos) -> &Deployment {
        &self.deployments[pos as usize]
    }

    /// Replace the activation window of a single deployment.
    /// Only meant for test harnesses; the bit position is never changed.
    pub fn update_deployment(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
        let deployment = &mut self.deployments[pos as usize];
        deployment.start_time = start_time;
        deployment.timeout = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::ChainParams;

    #[test]
    fn test_mainnet_params() {
        let params = ChainParams::main().consensus;

        assert_eq!(params.pow_target_timespan, 14 * 24 * 60 * 60);
        assert_eq!(params.pow_target_spacing, 10 * 60);
        assert_eq!(params.difficulty_adjustment_interval(), 2016);
        assert_eq!(params.subsidy_halving_interval, 210000);

        // Check that pow_limit is valid against itself
        let pow_limit = params.pow_limit;
        assert!(params.is_target_valid(&pow_limit));
    }

    #[test]
    fn test_timespan_is_multiple_of_spacing() {
        for params in [
            ChainParams::main().consensus,
            ChainParams::test().consensus,
            ChainParams::regtest().consensus,
        ] {
            assert_eq!(params.pow_target_timespan % params.pow_target_spacing, 0);
            assert_eq!(params.expected_timespan(), params.pow_target_timespan);
        }
    }

    #[test]
    fn test_adjustment_interval_matches_confirmation_window() {
        // On main and test the signalling window is defined to coincide with
        // the retarget window; regtest shortens the window to 144.
        for params in [ChainParams::main().consensus, ChainParams::test().consensus] {
            assert_eq!(
                params.difficulty_adjustment_interval(),
                params.miner_confirmation_window
            );
        }
        assert_eq!(ChainParams::regtest().consensus.miner_confirmation_window, 144);
    }

    #[test]
    fn test_threshold_within_window() {
        for params in [
            ChainParams::main().consensus,
            ChainParams::test().consensus,
            ChainParams::regtest().consensus,
        ] {
            assert!(params.rule_change_activation_threshold <= params.miner_confirmation_window);
        }
    }

    #[test]
    fn test_deployment_bits_are_distinct() {
        for params in [
            ChainParams::main().consensus,
            ChainParams::test().consensus,
            ChainParams::regtest().consensus,
        ] {
            let bits: Vec<u8> = params.deployments.iter().map(|d| d.bit).collect();
            for (i, a) in bits.iter().enumerate() {
                assert!(*a <= 28);
                for b in &bits[i + 1..] {
                    assert_ne!(a, b, "deployment bits must be pairwise distinct");
                }
            }
        }
    }

    #[test]
    fn test_target_validation() {
        let params = ChainParams::main().consensus;

        // Valid target (at the limit)
        let valid_target = params.pow_limit;
        assert!(params.is_target_valid(&valid_target));

        // Invalid target (exceeds limit) - use a very small pow limit
        let strict = ChainParams::regtest().consensus;
        let loose_target = strict.pow_limit;
        let tiny = Target::from_be_bytes([
            0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
        ]);
        assert!(strict.is_target_valid(&tiny));
        assert!(!ChainParams::main().consensus.is_target_valid(&loose_target));
    }

    #[test]
    fn test_regtest_deployments_never_expire() {
        let params = ChainParams::regtest().consensus;
        for pos in [DeploymentPos::TestDummy, DeploymentPos::Csv, DeploymentPos::Segwit] {
            assert_eq!(params.deployment(pos).timeout, Deployment::NO_TIMEOUT);
        }
        assert_eq!(
            params.deployment(DeploymentPos::Segwit).start_time,
            Deployment::ALWAYS_ACTIVE
        );
    }
}
