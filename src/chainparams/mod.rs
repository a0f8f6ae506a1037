// Chain parameters for the Bitgold networks
// This module defines the per-network records selected once at process start

pub mod checkpoints;
pub mod genesis;
pub mod registry;

pub use checkpoints::Checkpoints;
pub use registry::NetworkRegistry;

use std::fmt;
use std::str::FromStr;

use bitcoin::block;
use bitcoin::{Amount, Block, BlockHash, CompactTarget, Target, TxMerkleNode, Work};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consensus::{ConsensusParams, Deployment, DeploymentPos};

/// Recoverable configuration errors surfaced during network selection.
#[derive(Error, Debug)]
pub enum ChainParamsError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

/// The closed set of Bitgold networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Main,
    Test,
    Regtest,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ChainParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(ChainParamsError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Base58 version bytes for text-encoded keys and addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey_address: u8,
    pub script_address: u8,
    pub secret_key: u8,
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
}

/// Chain activity statistics as of a reference block, used by
/// progress-estimation code outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTxData {
    /// Unix timestamp of the last known number of transactions
    pub time: u64,
    /// Total number of transactions between genesis and that timestamp
    pub tx_count: u64,
    /// Estimated number of transactions per second after that timestamp
    pub tx_rate: f64,
}

/// The full parameter record for one Bitgold network.
///
/// Constructed once when a network is selected and treated as deeply
/// immutable afterwards; the only sanctioned mutation is
/// [`ChainParams::update_deployment`], reserved for test harnesses.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainParams {
    pub network: Network,
    pub consensus: ConsensusParams,
    pub genesis: Block,
    /// First four bytes of every wire-protocol message on this network
    pub message_start: [u8; 4],
    pub default_port: u16,
    /// Blocks below this height may be pruned
    pub prune_after_height: u64,
    pub base58_prefixes: Base58Prefixes,
    pub bech32_hrp: &'static str,
    pub dns_seeds: Vec<&'static str>,
    pub checkpoints: Checkpoints,
    pub basepoints: Checkpoints,
    pub chain_tx_data: ChainTxData,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub fallback_fee_enabled: bool,
}

const GENESIS_TIME: u32 = 1509526800; // 2017-11-01 17:00:00 UTC
const GENESIS_VERSION: i32 = 0x2000_0000; // versionbits top bits
const GENESIS_REWARD_SAT: u64 = 50 * 100_000_000;

/// Shared merkle root: the coinbase transaction is identical on every network.
const GENESIS_MERKLE_ROOT: &str =
    "5fd8818c00a3e171e4d43e7194dfbc8df60ded3416e79af1688b3e5448c8564a";

const MAIN_GENESIS_HASH: &str =
    "0000018d2d31e4ed7df7b699d32cc1f4da1ba6e3e6f49a2b33b9ff43ffa630e0";
const TEST_GENESIS_HASH: &str =
    "54192846adbe9997460098a0fd4f041c7456429d6885adc0c7d4900f04621b8b";
const REGTEST_GENESIS_HASH: &str =
    "1285c90cd4cbd709bc3db0494f7b2631daa7945aa1311872b5fcba8b7c0352ea";

fn block_hash(literal: &str) -> BlockHash {
    BlockHash::from_str(literal).expect("valid block hash literal")
}

fn merkle_root(literal: &str) -> TxMerkleNode {
    TxMerkleNode::from_str(literal).expect("valid merkle root literal")
}

/// Build the genesis block for one network and verify it against the two
/// independently recorded hashes. A mismatch means a parameter literal or
/// the block construction itself changed without a matching hash update;
/// the node must not start against an inconsistent genesis.
fn checked_genesis_block(
    network: Network,
    nonce: u32,
    bits: u32,
    expected_hash: &str,
    expected_merkle_root: &str,
) -> Block {
    let genesis = genesis::bitgold_genesis_block(
        GENESIS_TIME,
        nonce,
        CompactTarget::from_consensus(bits),
        block::Version::from_consensus(GENESIS_VERSION),
        Amount::from_sat(GENESIS_REWARD_SAT),
    );
    assert_eq!(
        genesis.block_hash(),
        block_hash(expected_hash),
        "{network} genesis block hash mismatch"
    );
    assert_eq!(
        genesis.header.merkle_root,
        merkle_root(expected_merkle_root),
        "{network} genesis merkle root mismatch"
    );
    debug!(%network, hash = %genesis.block_hash(), "verified genesis block");
    genesis
}

impl ChainParams {
    /// Build the parameter record for `network`.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::main(),
            Network::Test => Self::test(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Main network parameters.
    pub fn main() -> Self {
        let genesis_hash = block_hash(MAIN_GENESIS_HASH);
        let consensus = ConsensusParams {
            subsidy_halving_interval: 210_000,
            bip16_height: 0,
            bip34_height: 0,
            bip34_hash: genesis_hash,
            bip65_height: 0,
            bip66_height: 0,
            // 0x00000fff ff..ff
            pow_limit: Target::from_be_bytes([
                0x00, 0x00, 0x0f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            ]),
            pow_target_timespan: 14 * 24 * 60 * 60, // two weeks
            pow_target_spacing: 10 * 60,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 1916, // 95% of 2016
            miner_confirmation_window: 2016, // pow_target_timespan / pow_target_spacing
            deployments: [
                // TestDummy
                Deployment { bit: 28, start_time: 0, timeout: 1_514_736_000 },
                // Csv: BIP68, BIP112, and BIP113
                Deployment { bit: 0, start_time: 0, timeout: 1_514_736_000 },
                // Segwit: BIP141, BIP143, and BIP147
                Deployment { bit: 1, start_time: 0, timeout: 1_514_736_000 },
            ],
            // 0x00..000fffff
            minimum_chain_work: Work::from_be_bytes([
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x0f, 0xff, 0xff,
            ]),
            default_assume_valid: None,
        };

        let genesis = checked_genesis_block(
            Network::Main,
            7_240_431,
            0x1e0f901d,
            MAIN_GENESIS_HASH,
            GENESIS_MERKLE_ROOT,
        );

        Self {
            network: Network::Main,
            consensus,
            genesis,
            // 0x901dcafe => goldcafe. Rarely used upper ASCII, not valid UTF-8.
            message_start: [0x90, 0x1d, 0xca, 0xfe],
            default_port: 30333,
            prune_after_height: 104_832, // about 2 years
            base58_prefixes: Base58Prefixes {
                pubkey_address: 38,
                script_address: 5,
                secret_key: 128,
                ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
                ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
            },
            bech32_hrp: "BTG",
            // seed.bitgold.bitbaba.com is not yet live
            dns_seeds: vec![],
            checkpoints: Checkpoints::new(vec![(0, genesis_hash)]),
            basepoints: Checkpoints::new(vec![(0, genesis_hash)]),
            chain_tx_data: ChainTxData {
                time: 1_509_526_606,
                tx_count: 1,
                tx_rate: 3.1,
            },
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            fallback_fee_enabled: false,
        }
    }

    /// Public test network parameters.
    pub fn test() -> Self {
        let genesis_hash = block_hash(TEST_GENESIS_HASH);
        let consensus = ConsensusParams {
            subsidy_halving_interval: 210_000,
            bip16_height: 0,
            bip34_height: 0,
            bip34_hash: genesis_hash,
            bip65_height: 0,
            bip66_height: 0,
            // 0x7fff..ff
            pow_limit: Target::from_be_bytes([
                0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            ]),
            pow_target_timespan: 14 * 24 * 60 * 60, // two weeks
            pow_target_spacing: 10 * 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 1008, // 50% for testchains
            miner_confirmation_window: 2016,
            deployments: [
                Deployment { bit: 28, start_time: 0, timeout: 1_514_736_000 },
                Deployment { bit: 0, start_time: 0, timeout: 1_514_736_000 },
                Deployment { bit: 1, start_time: 0, timeout: 1_514_736_000 },
            ],
            minimum_chain_work: Work::from_be_bytes([
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
            ]),
            default_assume_valid: Some(genesis_hash),
        };

        let genesis = checked_genesis_block(
            Network::Test,
            1,
            0x207fffff,
            TEST_GENESIS_HASH,
            GENESIS_MERKLE_ROOT,
        );

        Self {
            network: Network::Test,
            consensus,
            genesis,
            // 0xc01dbeef => cold beef
            message_start: [0xc0, 0x1d, 0xbe, 0xef],
            default_port: 40333,
            prune_after_height: 105_200,
            base58_prefixes: Base58Prefixes {
                pubkey_address: 66, // 'T'
                script_address: 196,
                secret_key: 239,
                ext_public_key: [0x04, 0x35, 0x87, 0xCF],
                ext_secret_key: [0x04, 0x35, 0x83, 0x94],
            },
            bech32_hrp: "tb",
            dns_seeds: vec![],
            checkpoints: Checkpoints::new(vec![(0, genesis_hash)]),
            basepoints: Checkpoints::new(vec![(0, genesis_hash)]),
            chain_tx_data: ChainTxData {
                time: 1_509_526_606,
                tx_count: 1,
                tx_rate: 3.1,
            },
            default_consistency_checks: false,
            require_standard: false,
            mine_blocks_on_demand: false,
            fallback_fee_enabled: true,
        }
    }

    /// Regression test parameters.
    pub fn regtest() -> Self {
        let genesis_hash = block_hash(REGTEST_GENESIS_HASH);
        let consensus = ConsensusParams {
            subsidy_halving_interval: 150,
            bip16_height: 0, // always enforce P2SH on regtest
            bip34_height: 0,
            bip34_hash: genesis_hash,
            bip65_height: 0,
            bip66_height: 0,
            pow_limit: Target::from_be_bytes([
                0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            ]),
            pow_target_timespan: 14 * 24 * 60 * 60,
            pow_target_spacing: 10 * 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            rule_change_activation_threshold: 72, // 50% for testchains
            miner_confirmation_window: 144, // faster than normal for regtest
            deployments: [
                Deployment { bit: 28, start_time: 0, timeout: Deployment::NO_TIMEOUT },
                Deployment { bit: 0, start_time: 0, timeout: Deployment::NO_TIMEOUT },
                Deployment {
                    bit: 1,
                    start_time: Deployment::ALWAYS_ACTIVE,
                    timeout: Deployment::NO_TIMEOUT,
                },
            ],
            minimum_chain_work: Work::from_be_bytes([
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
            ]),
            default_assume_valid: Some(genesis_hash),
        };

        let genesis = checked_genesis_block(
            Network::Regtest,
            2,
            0x207fffff,
            REGTEST_GENESIS_HASH,
            GENESIS_MERKLE_ROOT,
        );

        Self {
            network: Network::Regtest,
            consensus,
            genesis,
            // 0xabadfee1 => a bad feel
            message_start: [0xab, 0xad, 0xfe, 0xe1],
            default_port: 40444,
            prune_after_height: 105_200,
            base58_prefixes: Base58Prefixes {
                pubkey_address: 61, // 'R'
                script_address: 196,
                secret_key: 239,
                ext_public_key: [0x04, 0x35, 0x87, 0xCF],
                ext_secret_key: [0x04, 0x35, 0x83, 0x94],
            },
            bech32_hrp: "bcrt",
            // regtest never discovers peers
            dns_seeds: vec![],
            checkpoints: Checkpoints::new(vec![(0, genesis_hash)]),
            basepoints: Checkpoints::new(vec![(0, genesis_hash)]),
            chain_tx_data: ChainTxData {
                time: 1_509_526_606,
                tx_count: 1,
                tx_rate: 3.1,
            },
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            fallback_fee_enabled: true,
        }
    }

    /// Hash of this network's genesis block.
    pub fn genesis_hash(&self) -> BlockHash {
        self.genesis.block_hash()
    }

    /// Replace the activation window of one deployment in place.
    /// Test-harness-only; see `NetworkRegistry::update_deployment`.
    pub fn update_deployment(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
        self.consensus.update_deployment(pos, start_time, timeout);
    }
}
