//! # cryptonote-consensus
//!
//! Consensus ruleset for a CryptoNote-family blockchain.
//!
//! This crate provides:
//! - Coin emission and per-block reward, with the reward-law hard fork
//! - Three generations of difficulty retargeting (classic, Poisson-median, LWMA)
//! - Transaction fee derivation and term-deposit interest
//! - Fusion (output consolidation) transaction recognition
//! - Proof-of-work dispatch by block major version, including merge mining
//! - Miner (coinbase) transaction construction
//! - A builder producing an immutable, validated [`Currency`] with its genesis block
//!
//! Every rule is a pure function of the [`Currency`] and the call arguments.
//! Hashing, address encoding and key derivation are supplied by the caller
//! through the [`BlockHasher`], [`AddressCodec`] and [`OneTimeKeyDeriver`]
//! traits.
//!
//! ## Difficulty
//!
//! The retarget algorithm is picked by height from the currency's schedule:
//! a windowed average with outlier cut, then a Poisson-median blend, then
//! linearly weighted moving averages (LWMA and LWMA-2).

mod address;
mod amount;
pub mod block;
mod checkpoints;
mod coinbase;
mod config;
mod currency;
mod difficulty;
mod emission;
mod error;
mod fusion;
mod genesis;
mod pow;
pub mod serialization;
mod value;

#[cfg(test)]
mod test_helpers;

pub use address::AddressCodec;
pub use block::{
    AccountPublicAddress, BaseInput, Block, BlockHeader, Hash, KeyImage, KeyInput, KeyOutput,
    KeyPair, MultisignatureInput, MultisignatureOutput, OutputTarget, PublicKey, RootBlock,
    SecretKey, Signature, Transaction, TransactionInput, TransactionOutput,
};
pub use checkpoints::{CheckpointCheck, Checkpoints, MAINNET_CHECKPOINTS};
pub use coinbase::OneTimeKeyDeriver;
pub use config::{CurrencyConfig, DifficultyScheduleEntry};
pub use currency::{Currency, CurrencyBuilder, CurrencyParams, Network, MAX_DIFFICULTY_TARGET};
pub use difficulty::{DifficultyAlgorithm, DifficultyCalculator, DifficultyParams};
pub use emission::{penalized_amount, BlockReward};
pub use error::{ConsensusError, ConsensusResult};
pub use fusion::{decompose_amount, decompose_amount_into_digits, PRETTY_AMOUNTS};
pub use genesis::{
    generate_genesis_block, GENESIS_COINBASE_TX_HEX, GENESIS_NONCE, GENESIS_TIMESTAMP,
};
pub use pow::{check_hash, BlockHasher};

/// Difficulty value.
pub type Difficulty = u64;

/// Network parameters (mainnet data table).
pub mod params {
    /// Target block interval in seconds.
    pub const DIFFICULTY_TARGET: u64 = 120;

    pub const CRYPTONOTE_MAX_BLOCK_NUMBER: u64 = 500_000_000;
    pub const CRYPTONOTE_MAX_BLOCK_BLOB_SIZE: usize = 500_000_000;
    pub const CRYPTONOTE_MAX_TX_SIZE: usize = 1_000_000_000;

    /// Base58 address prefix (addresses start with "Xun3").
    pub const CRYPTONOTE_PUBLIC_ADDRESS_BASE58_PREFIX: u64 = 0x1a2638;

    /// Blocks before mined coins unlock.
    pub const CRYPTONOTE_MINED_MONEY_UNLOCK_WINDOW: u32 = 10;
    pub const CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT: u64 = 60 * 60 * 2;
    pub const CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT_V2: u64 = 6 * 60 * 2;
    pub const CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT_V3: u64 = DIFFICULTY_TARGET * 3;
    pub const CRYPTONOTE_DEFAULT_TX_SPENDABLE_AGE: u64 = 10;

    pub const BLOCKCHAIN_TIMESTAMP_CHECK_WINDOW: usize = 60;
    pub const BLOCKCHAIN_TIMESTAMP_CHECK_WINDOW_V2: usize = 11;

    /// Hard cap on total emission, in atomic units.
    pub const MONEY_SUPPLY: u64 = 2_100_000_000_000_000_000;

    pub const CRYPTONOTE_REWARD_BLOCKS_WINDOW: usize = 100;
    /// Block size (bytes) up to which the full reward is granted.
    pub const CRYPTONOTE_BLOCK_GRANTED_FULL_REWARD_ZONE: usize = 100_000;
    pub const CRYPTONOTE_COINBASE_BLOB_RESERVED_SIZE: usize = 600;
    pub const CRYPTONOTE_DISPLAY_DECIMAL_POINT: usize = 6;

    pub const POINT: u64 = 1_000;
    /// Atomic units in one coin.
    pub const COIN: u64 = 1_000_000;
    pub const MINIMUM_FEE: u64 = 1_000;
    pub const DEFAULT_DUST_THRESHOLD: u64 = 100;

    pub const EXPECTED_NUMBER_OF_BLOCKS_PER_DAY: u64 = 24 * 60 * 60 / DIFFICULTY_TARGET;

    /// Generation 1 window and cut.
    pub const DIFFICULTY_WINDOW: usize = 20;
    pub const DIFFICULTY_CUT: usize = 5;

    /// Generation 2 window.
    pub const DIFFICULTY_WINDOW_V1: usize = 35;
    /// LWMA window (N + 1 samples).
    pub const DIFFICULTY_WINDOW_V2: usize = 60;
    /// LWMA-2 window (N + 1 samples).
    pub const DIFFICULTY_WINDOW_V3: usize = 60 + 1;
    pub const DIFFICULTY_LAG: usize = 1;

    /// Generation 2 per-block timespan bounds, in seconds.
    pub const MIN_AVERAGE_TIMESPAN: u64 = DIFFICULTY_TARGET / 24;
    pub const MAX_AVERAGE_TIMESPAN: u64 = DIFFICULTY_TARGET * 6;

    /// LWMA floor.
    pub const LWMA_MIN_DIFFICULTY: u64 = 100_000;
    /// LWMA-2 short-window guesses.
    pub const LWMA2_LOWER_DIFFICULTY_GUESS: u64 = 10_000;
    pub const LWMA2_DIFFICULTY_GUESS: u64 = 100_000;

    pub const DEPOSIT_MIN_AMOUNT: u64 = COIN;
    /// ~1 month.
    pub const DEPOSIT_MIN_TERM: u32 = 22_000;
    /// ~1 year.
    pub const DEPOSIT_MAX_TERM: u32 = 12 * 22_000;
    /// Rate is constant across terms.
    pub const DEPOSIT_MIN_TOTAL_RATE_FACTOR: u64 = 0;
    /// Percentage rate earned over `DEPOSIT_MAX_TERM`.
    pub const DEPOSIT_MAX_TOTAL_RATE: u64 = 3;

    /// Early depositor interest multiplier.
    pub const MULTIPLIER_FACTOR: u64 = 250;
    /// Last height at which the early depositor multiplier applies.
    pub const END_MULTIPLIER_BLOCK: u32 = 3_600;

    pub const MAX_BLOCK_SIZE_INITIAL: usize = CRYPTONOTE_BLOCK_GRANTED_FULL_REWARD_ZONE * 10;
    pub const MAX_BLOCK_SIZE_GROWTH_SPEED_NUMERATOR: u64 = 100 * 1024;
    pub const MAX_BLOCK_SIZE_GROWTH_SPEED_DENOMINATOR: u64 = 365 * 24 * 60 * 60 / DIFFICULTY_TARGET;

    pub const CRYPTONOTE_LOCKED_TX_ALLOWED_DELTA_BLOCKS: u64 = 1;
    pub const CRYPTONOTE_LOCKED_TX_ALLOWED_DELTA_SECONDS: u64 =
        DIFFICULTY_TARGET * CRYPTONOTE_LOCKED_TX_ALLOWED_DELTA_BLOCKS;

    /// Seconds, 14 hours.
    pub const CRYPTONOTE_MEMPOOL_TX_LIVETIME: u64 = 60 * 60 * 14;
    /// Seconds, one day.
    pub const CRYPTONOTE_MEMPOOL_TX_FROM_ALT_BLOCK_LIVETIME: u64 = 60 * 60 * 24;
    pub const CRYPTONOTE_NUMBER_OF_PERIODS_TO_FORGET_TX_DELETED_FROM_POOL: u64 = 7;

    pub const FUSION_TX_MAX_SIZE: usize = CRYPTONOTE_BLOCK_GRANTED_FULL_REWARD_ZONE * 30 / 100;
    pub const FUSION_TX_MIN_INPUT_COUNT: usize = 12;
    pub const FUSION_TX_MIN_IN_OUT_COUNT_RATIO: usize = 4;

    pub const UPGRADE_HEIGHT_V2: u32 = 1;
    pub const UPGRADE_HEIGHT_V3: u32 = 191_998;
    pub const TESTNET_UPGRADE_HEIGHT_V2: u32 = 1;
    pub const TESTNET_UPGRADE_HEIGHT_V3: u32 = 199;

    /// Percent.
    pub const UPGRADE_VOTING_THRESHOLD: u32 = 90;
    /// Blocks.
    pub const UPGRADE_VOTING_WINDOW: u32 = EXPECTED_NUMBER_OF_BLOCKS_PER_DAY as u32;
    /// Blocks.
    pub const UPGRADE_WINDOW: u32 = EXPECTED_NUMBER_OF_BLOCKS_PER_DAY as u32;

    pub const CRYPTONOTE_BLOCKS_FILENAME: &str = "blocks.dat";
    pub const CRYPTONOTE_BLOCKINDEXES_FILENAME: &str = "blockindexes.dat";
    pub const CRYPTONOTE_BLOCKSCACHE_FILENAME: &str = "blockscache.dat";
    pub const CRYPTONOTE_POOLDATA_FILENAME: &str = "poolstate.bin";
    pub const P2P_NET_DATA_FILENAME: &str = "p2pstate.bin";
    pub const CRYPTONOTE_BLOCKCHAIN_INDICES_FILENAME: &str = "blockchainindices.dat";
    pub const MINER_CONFIG_FILE_NAME: &str = "miner_conf.json";
    pub const TESTNET_FILENAME_PREFIX: &str = "testnet_";

    pub const START_BLOCK_REWARD: u64 = 150 * COIN;
    /// One-time bootstrap allocation paid at height 1.
    pub const ICO_BLOCK_REWARD: u64 = 18_446_744_073 * COIN;
    /// Flat subsidy after the reward-law fork.
    pub const BLOCK_REWARD_V2: u64 = 300 * COIN;
    pub const BLOCK_REWARD_V2_HEIGHT: u32 = 456_000;
    pub const MAX_BLOCK_REWARD: u64 = 1_500 * COIN;
    /// Blocks between tenfold increases of the pre-fork subsidy.
    pub const REWARD_INCREASE_INTERVAL: u64 = 264_000;

    pub const CRYPTONOTE_NAME: &str = "UltraNote";

    pub const TRANSACTION_VERSION_1: u8 = 1;
    pub const TRANSACTION_VERSION_2: u8 = 2;

    pub const BLOCK_MAJOR_VERSION_1: u8 = 1;
    pub const BLOCK_MAJOR_VERSION_2: u8 = 2;
    pub const BLOCK_MAJOR_VERSION_3: u8 = 3;
    pub const BLOCK_MAJOR_VERSION_4: u8 = 4;

    pub const BLOCK_MINOR_VERSION_0: u8 = 0;
    pub const BLOCK_MINOR_VERSION_1: u8 = 1;

    /// Version-3 blocks whose major version does not exceed this are accepted
    /// without a proof-of-work check.
    pub const MERGE_MINING_BOOTSTRAP_VERSION: u8 = BLOCK_MAJOR_VERSION_3 + 10;

    pub const BLOCKS_IDS_SYNCHRONIZING_DEFAULT_COUNT: usize = 10_000;
    pub const BLOCKS_SYNCHRONIZING_DEFAULT_COUNT: usize = 200;
    pub const COMMAND_RPC_GET_BLOCKS_FAST_MAX_COUNT: usize = 1_000;

    pub const P2P_DEFAULT_PORT: u16 = 32_000;
    pub const RPC_DEFAULT_PORT: u16 = 33_000;

    /// Network identifier exchanged in the P2P handshake.
    pub const CRYPTONOTE_NETWORK: [u8; 16] = [
        0xA1, 0xE5, 0xAA, 0x16, 0xB1, 0x35, 0xE5, 0xB4, 0x70, 0x15, 0xA7, 0x5F, 0xDD, 0xC7, 0x12,
        0x36,
    ];

    pub const SEED_NODES: &[&str] = &[
        "136.244.105.109:32000",
        "195.178.167.189:32000",
        "208.167.255.71:32000",
        "superblockchain.con-ip.com:32000",
    ];

    /// Difficulty algorithm activation heights (mainnet).
    pub const DIFFICULTY_POISSON_HEIGHT: u32 = 34_147;
    pub const DIFFICULTY_LWMA_HEIGHT: u32 = 170_000;
    pub const DIFFICULTY_LWMA2_HEIGHT: u32 = 192_000;

    /// Difficulty algorithm activation heights (testnet).
    pub const TESTNET_DIFFICULTY_POISSON_HEIGHT: u32 = 60;
    pub const TESTNET_DIFFICULTY_LWMA_HEIGHT: u32 = 180;
    pub const TESTNET_DIFFICULTY_LWMA2_HEIGHT: u32 = 240;

    const _: () = assert!(
        2 * DIFFICULTY_CUT <= DIFFICULTY_WINDOW - 2,
        "Bad DIFFICULTY_WINDOW or DIFFICULTY_CUT"
    );
    const _: () = assert!(DEPOSIT_MIN_TERM > 0, "Bad DEPOSIT_MIN_TERM");
    const _: () = assert!(DEPOSIT_MIN_TERM <= DEPOSIT_MAX_TERM, "Bad DEPOSIT_MAX_TERM");
    const _: () = assert!(
        DEPOSIT_MIN_TERM as u64 * DEPOSIT_MAX_TOTAL_RATE > DEPOSIT_MIN_TOTAL_RATE_FACTOR,
        "Bad DEPOSIT_MIN_TOTAL_RATE_FACTOR or DEPOSIT_MAX_TOTAL_RATE"
    );
    const _: () = assert!(
        0 < UPGRADE_VOTING_THRESHOLD && UPGRADE_VOTING_THRESHOLD <= 100,
        "Bad UPGRADE_VOTING_THRESHOLD"
    );
    const _: () = assert!(UPGRADE_VOTING_WINDOW > 1, "Bad UPGRADE_VOTING_WINDOW");
}
