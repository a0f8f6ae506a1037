// Genesis block construction
// This module deterministically assembles the coinbase-only block that seeds a chain

use bitcoin::absolute::LockTime;
use bitcoin::block::{self, Block, Header};
use bitcoin::hashes::Hash;
use bitcoin::hex::FromHex;
use bitcoin::opcodes::all::OP_CHECKSIG;
use bitcoin::script::{Builder, PushBytesBuf, ScriptBuf};
use bitcoin::transaction::{self, Transaction};
use bitcoin::{Amount, BlockHash, CompactTarget, OutPoint, Sequence, TxIn, TxMerkleNode, TxOut, Witness};

/// News headline embedded in the genesis coinbase, proving the chain did not
/// start before that date.
const GENESIS_TIMESTAMP: &str = "DJIA 31/Nov/2017 closed at 23377.24";

/// Uncompressed public key the genesis reward is paid to. The output cannot
/// be spent since it never exists in the UTXO database.
const GENESIS_OUTPUT_PUBKEY: &str =
    "048183aecd19078802388a000d81b292cc3e55782df76164ea111cd7a29a0f842ac419590423b0df91602f1e2882f1534d43844cd8d69c0046556d36ab44aaba85";

/// Build a genesis block for the given header fields.
///
/// The block contains a single coinbase transaction whose input script
/// carries `timestamp` as opaque bytes behind two zero pushes (so it can
/// never be mistaken for a real spend), and whose single output pays
/// `reward` to `output_script`. The predecessor hash is the all-zero hash.
///
/// Identical inputs always produce an identical block and therefore an
/// identical hash; the per-network constructors rely on this to verify the
/// recorded genesis hashes at startup.
pub fn create_genesis_block(
    timestamp: &str,
    output_script: ScriptBuf,
    time: u32,
    nonce: u32,
    bits: CompactTarget,
    version: block::Version,
    reward: Amount,
) -> Block {
    let mut tag = PushBytesBuf::new();
    tag.extend_from_slice(timestamp.as_bytes())
        .expect("genesis timestamp fits in a script push");
    let script_sig = Builder::new()
        .push_int(0)
        .push_int(0)
        .push_slice(tag)
        .into_script();

    let coinbase = Transaction {
        version: transaction::Version::ONE,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: Sequence::MAX,
            witness: Witness::default(),
        }],
        output: vec![TxOut {
            value: reward,
            script_pubkey: output_script,
        }],
    };

    let mut genesis = Block {
        header: Header {
            version,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time,
            bits,
            nonce,
        },
        txdata: vec![coinbase],
    };
    genesis.header.merkle_root = genesis
        .compute_merkle_root()
        .expect("genesis block has a coinbase transaction");
    genesis
}

/// Build the Bitgold genesis block for the given time, nonce, and difficulty.
/// The timestamp text and reward script are the same on every network.
pub fn bitgold_genesis_block(
    time: u32,
    nonce: u32,
    bits: CompactTarget,
    version: block::Version,
    reward: Amount,
) -> Block {
    let pubkey = Vec::<u8>::from_hex(GENESIS_OUTPUT_PUBKEY)
        .expect("genesis output pubkey is valid hex");
    let pubkey = PushBytesBuf::try_from(pubkey).expect("genesis output pubkey fits in a push");
    let output_script = Builder::new()
        .push_slice(pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    create_genesis_block(GENESIS_TIMESTAMP, output_script, time, nonce, bits, version, reward)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> Block {
        bitgold_genesis_block(
            1509526800,
            7240431,
            CompactTarget::from_consensus(0x1e0f901d),
            block::Version::from_consensus(0x2000_0000),
            Amount::from_sat(50 * 100_000_000),
        )
    }

    #[test]
    fn test_genesis_has_zero_predecessor() {
        let genesis = build();
        assert_eq!(genesis.header.prev_blockhash, BlockHash::all_zeros());
    }

    #[test]
    fn test_genesis_has_single_coinbase() {
        let genesis = build();
        assert_eq!(genesis.txdata.len(), 1);
        assert!(genesis.txdata[0].is_coinbase());
        assert_eq!(genesis.txdata[0].input.len(), 1);
        assert_eq!(genesis.txdata[0].output.len(), 1);
    }

    #[test]
    fn test_genesis_merkle_root_covers_coinbase() {
        let genesis = build();
        assert!(genesis.check_merkle_root());
        assert_eq!(
            genesis.header.merkle_root.to_byte_array(),
            genesis.txdata[0].compute_txid().to_byte_array()
        );
    }

    #[test]
    fn test_genesis_is_deterministic() {
        assert_eq!(build().block_hash(), build().block_hash());
    }

    #[test]
    fn test_coinbase_script_embeds_timestamp() {
        let genesis = build();
        let script = genesis.txdata[0].input[0].script_sig.as_bytes();
        // Two zero pushes, then a single push of the headline text.
        assert_eq!(&script[..3], &[0x00, 0x00, GENESIS_TIMESTAMP.len() as u8]);
        assert_eq!(&script[3..], GENESIS_TIMESTAMP.as_bytes());
    }
}
