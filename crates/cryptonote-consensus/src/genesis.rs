//! Genesis block construction.
//!
//! The genesis coinbase is hard-coded rather than generated, because a fresh
//! miner transaction draws a random transaction key and the genesis block must
//! be identical on every node.

use tracing::debug;

use crate::block::{Block, BlockHeader};
use crate::params::{BLOCK_MAJOR_VERSION_1, BLOCK_MINOR_VERSION_0};
use crate::serialization::decode_transaction_hex;
use crate::ConsensusResult;

/// Serialized genesis coinbase transaction.
pub const GENESIS_COINBASE_TX_HEX: &str = "010a01ff000180a3c347029b2e4c0281c0b02e7c53291a94d1d0cbff8883f8024f5142ee494ffbbd0880712101677642503be486533f0aacb7ccce24a3d4931635fa700d62bf6b383cf26436e9";

/// Genesis nonce on mainnet. Testnet uses the next value.
pub const GENESIS_NONCE: u32 = 70;

/// Genesis timestamp (2017-06-07 UTC).
pub const GENESIS_TIMESTAMP: u64 = 1_496_764_095;

/// Build the genesis block for the given network mode.
///
/// Deterministic: the same `testnet` flag always yields the same block.
pub fn generate_genesis_block(testnet: bool) -> ConsensusResult<Block> {
    let base_transaction = decode_transaction_hex(GENESIS_COINBASE_TX_HEX)?;

    let nonce = if testnet {
        GENESIS_NONCE + 1
    } else {
        GENESIS_NONCE
    };

    debug!(testnet, nonce, "Generated genesis block");

    Ok(Block {
        header: BlockHeader {
            major_version: BLOCK_MAJOR_VERSION_1,
            minor_version: BLOCK_MINOR_VERSION_0,
            nonce,
            timestamp: GENESIS_TIMESTAMP,
            previous_block_hash: Default::default(),
        },
        base_transaction,
        ..Default::default()
    })
}
