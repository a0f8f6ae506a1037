// Offline genesis mining utility
// Scans nonces for a genesis header meeting a compact target and prints the
// resulting hash, merkle root, and nonce. Development tooling only; the node
// itself never mines a genesis block.

use anyhow::{bail, Context, Result};
use bitcoin::block::Version;
use bitcoin::{Amount, CompactTarget, Target};
use tracing::info;

use bitgold::chainparams::genesis;

const GENESIS_VERSION: i32 = 0x2000_0000;
const GENESIS_REWARD_SAT: u64 = 50 * 100_000_000;

fn parse_args() -> Result<(u32, u32)> {
    let mut args = std::env::args().skip(1);
    let time = args
        .next()
        .context("usage: genesis-miner <time> <bits>, e.g. genesis-miner 1509526800 0x1e0f901d")?
        .parse::<u32>()
        .context("header time must be a unix timestamp")?;
    let bits_raw = args
        .next()
        .context("usage: genesis-miner <time> <bits>, e.g. genesis-miner 1509526800 0x1e0f901d")?;
    let bits = u32::from_str_radix(bits_raw.trim_start_matches("0x"), 16)
        .context("bits must be a compact target in hex")?;
    Ok((time, bits))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (time, bits) = parse_args()?;
    let bits = CompactTarget::from_consensus(bits);
    let target = Target::from_compact(bits);

    let mut block = genesis::bitgold_genesis_block(
        time,
        0,
        bits,
        Version::from_consensus(GENESIS_VERSION),
        Amount::from_sat(GENESIS_REWARD_SAT),
    );

    info!(time, bits = ?bits, "searching for a genesis nonce");
    for nonce in 0..=u32::MAX {
        block.header.nonce = nonce;
        let hash = block.header.block_hash();
        if target.is_met_by(hash) {
            println!("nonce:       {nonce}");
            println!("hash:        {hash}");
            println!("merkle root: {}", block.header.merkle_root);
            return Ok(());
        }
        if nonce % 10_000_000 == 0 && nonce > 0 {
            info!(nonce, "still searching");
        }
    }
    bail!("exhausted the nonce space; choose a different header time")
}
