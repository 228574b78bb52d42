//! Immutable consensus policy and its builder.
//!
//! A [`Currency`] is assembled once by [`CurrencyBuilder`], validated, and
//! then only read. The rule families (emission, difficulty, value balance,
//! fusion, proof of work, miner transactions) are methods on it, implemented
//! in their own modules.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{Block, Hash};
use crate::config::{CurrencyConfig, DifficultyScheduleEntry};
use crate::difficulty::{DifficultyAlgorithm, DifficultyCalculator, DifficultyParams};
use crate::genesis::generate_genesis_block;
use crate::params;
use crate::pow::BlockHasher;
use crate::{ConsensusError, ConsensusResult, Difficulty};

/// Largest accepted block interval in seconds.
pub const MAX_DIFFICULTY_TARGET: u64 = u32::MAX as u64;

/// Network mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn is_testnet(self) -> bool {
        self == Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Every policy constant of a currency.
///
/// Defaults to the mainnet data table in [`crate::params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyParams {
    pub max_block_number: u64,
    pub max_block_blob_size: usize,
    pub max_tx_size: usize,
    pub public_address_base58_prefix: u64,
    pub mined_money_unlock_window: u32,

    pub timestamp_check_window: usize,
    pub timestamp_check_window_v2: usize,
    pub block_future_time_limit: u64,
    pub block_future_time_limit_v2: u64,
    pub block_future_time_limit_v3: u64,

    pub money_supply: u64,
    pub start_block_reward: u64,
    /// Paid once, at height 1.
    pub ico_block_reward: u64,
    pub block_reward_v2: u64,
    /// First height paying the flat `block_reward_v2`.
    pub block_reward_v2_height: u32,
    pub max_block_reward: u64,
    pub reward_increase_interval: u64,

    pub reward_blocks_window: usize,
    pub block_granted_full_reward_zone: usize,
    pub miner_tx_blob_reserved_size: usize,

    pub number_of_decimal_places: usize,
    pub minimum_fee: u64,
    pub default_dust_threshold: u64,

    pub difficulty_target: u64,
    pub difficulty_window: usize,
    pub difficulty_lag: usize,
    pub difficulty_cut: usize,
    pub difficulty_window_v1: usize,
    pub difficulty_window_v2: usize,
    pub difficulty_window_v3: usize,
    pub lwma_min_difficulty: Difficulty,
    /// Activation heights of each retarget generation, ascending, starting at 0.
    pub difficulty_schedule: Vec<DifficultyScheduleEntry>,

    pub deposit_min_amount: u64,
    pub deposit_min_term: u32,
    pub deposit_max_term: u32,
    pub deposit_min_total_rate_factor: u64,
    pub deposit_max_total_rate: u64,
    pub multiplier_factor: u64,
    /// Last height at which interest is multiplied by `multiplier_factor`.
    pub end_multiplier_block: u32,

    pub max_block_size_initial: usize,
    pub max_block_size_growth_speed_numerator: u64,
    pub max_block_size_growth_speed_denominator: u64,

    pub locked_tx_allowed_delta_seconds: u64,
    pub locked_tx_allowed_delta_blocks: u64,

    pub mempool_tx_live_time: u64,
    pub mempool_tx_from_alt_block_live_time: u64,
    pub number_of_periods_to_forget_tx_deleted_from_pool: u64,

    pub upgrade_height_v2: u32,
    pub upgrade_height_v3: u32,
    pub upgrade_voting_threshold: u32,
    pub upgrade_voting_window: u32,
    pub upgrade_window: u32,

    pub fusion_tx_max_size: usize,
    pub fusion_tx_min_input_count: usize,
    pub fusion_tx_min_in_out_count_ratio: usize,

    /// Version-3 blocks up to this major version skip the proof-of-work check.
    pub merge_mining_bootstrap_version: u8,

    pub blocks_file_name: String,
    pub blocks_cache_file_name: String,
    pub block_indexes_file_name: String,
    pub tx_pool_file_name: String,
    pub blockchain_indices_file_name: String,
}

impl Default for CurrencyParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl CurrencyParams {
    /// Mainnet data table.
    pub fn mainnet() -> Self {
        Self {
            max_block_number: params::CRYPTONOTE_MAX_BLOCK_NUMBER,
            max_block_blob_size: params::CRYPTONOTE_MAX_BLOCK_BLOB_SIZE,
            max_tx_size: params::CRYPTONOTE_MAX_TX_SIZE,
            public_address_base58_prefix: params::CRYPTONOTE_PUBLIC_ADDRESS_BASE58_PREFIX,
            mined_money_unlock_window: params::CRYPTONOTE_MINED_MONEY_UNLOCK_WINDOW,

            timestamp_check_window: params::BLOCKCHAIN_TIMESTAMP_CHECK_WINDOW,
            timestamp_check_window_v2: params::BLOCKCHAIN_TIMESTAMP_CHECK_WINDOW_V2,
            block_future_time_limit: params::CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT,
            block_future_time_limit_v2: params::CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT_V2,
            block_future_time_limit_v3: params::CRYPTONOTE_BLOCK_FUTURE_TIME_LIMIT_V3,

            money_supply: params::MONEY_SUPPLY,
            start_block_reward: params::START_BLOCK_REWARD,
            ico_block_reward: params::ICO_BLOCK_REWARD,
            block_reward_v2: params::BLOCK_REWARD_V2,
            block_reward_v2_height: params::BLOCK_REWARD_V2_HEIGHT,
            max_block_reward: params::MAX_BLOCK_REWARD,
            reward_increase_interval: params::REWARD_INCREASE_INTERVAL,

            reward_blocks_window: params::CRYPTONOTE_REWARD_BLOCKS_WINDOW,
            block_granted_full_reward_zone: params::CRYPTONOTE_BLOCK_GRANTED_FULL_REWARD_ZONE,
            miner_tx_blob_reserved_size: params::CRYPTONOTE_COINBASE_BLOB_RESERVED_SIZE,

            number_of_decimal_places: params::CRYPTONOTE_DISPLAY_DECIMAL_POINT,
            minimum_fee: params::MINIMUM_FEE,
            default_dust_threshold: params::DEFAULT_DUST_THRESHOLD,

            difficulty_target: params::DIFFICULTY_TARGET,
            difficulty_window: params::DIFFICULTY_WINDOW,
            difficulty_lag: params::DIFFICULTY_LAG,
            difficulty_cut: params::DIFFICULTY_CUT,
            difficulty_window_v1: params::DIFFICULTY_WINDOW_V1,
            difficulty_window_v2: params::DIFFICULTY_WINDOW_V2,
            difficulty_window_v3: params::DIFFICULTY_WINDOW_V3,
            lwma_min_difficulty: params::LWMA_MIN_DIFFICULTY,
            difficulty_schedule: DifficultyScheduleEntry::mainnet_schedule(),

            deposit_min_amount: params::DEPOSIT_MIN_AMOUNT,
            deposit_min_term: params::DEPOSIT_MIN_TERM,
            deposit_max_term: params::DEPOSIT_MAX_TERM,
            deposit_min_total_rate_factor: params::DEPOSIT_MIN_TOTAL_RATE_FACTOR,
            deposit_max_total_rate: params::DEPOSIT_MAX_TOTAL_RATE,
            multiplier_factor: params::MULTIPLIER_FACTOR,
            end_multiplier_block: params::END_MULTIPLIER_BLOCK,

            max_block_size_initial: params::MAX_BLOCK_SIZE_INITIAL,
            max_block_size_growth_speed_numerator: params::MAX_BLOCK_SIZE_GROWTH_SPEED_NUMERATOR,
            max_block_size_growth_speed_denominator:
                params::MAX_BLOCK_SIZE_GROWTH_SPEED_DENOMINATOR,

            locked_tx_allowed_delta_seconds: params::CRYPTONOTE_LOCKED_TX_ALLOWED_DELTA_SECONDS,
            locked_tx_allowed_delta_blocks: params::CRYPTONOTE_LOCKED_TX_ALLOWED_DELTA_BLOCKS,

            mempool_tx_live_time: params::CRYPTONOTE_MEMPOOL_TX_LIVETIME,
            mempool_tx_from_alt_block_live_time:
                params::CRYPTONOTE_MEMPOOL_TX_FROM_ALT_BLOCK_LIVETIME,
            number_of_periods_to_forget_tx_deleted_from_pool:
                params::CRYPTONOTE_NUMBER_OF_PERIODS_TO_FORGET_TX_DELETED_FROM_POOL,

            upgrade_height_v2: params::UPGRADE_HEIGHT_V2,
            upgrade_height_v3: params::UPGRADE_HEIGHT_V3,
            upgrade_voting_threshold: params::UPGRADE_VOTING_THRESHOLD,
            upgrade_voting_window: params::UPGRADE_VOTING_WINDOW,
            upgrade_window: params::UPGRADE_WINDOW,

            fusion_tx_max_size: params::FUSION_TX_MAX_SIZE,
            fusion_tx_min_input_count: params::FUSION_TX_MIN_INPUT_COUNT,
            fusion_tx_min_in_out_count_ratio: params::FUSION_TX_MIN_IN_OUT_COUNT_RATIO,

            merge_mining_bootstrap_version: params::MERGE_MINING_BOOTSTRAP_VERSION,

            blocks_file_name: params::CRYPTONOTE_BLOCKS_FILENAME.to_string(),
            blocks_cache_file_name: params::CRYPTONOTE_BLOCKSCACHE_FILENAME.to_string(),
            block_indexes_file_name: params::CRYPTONOTE_BLOCKINDEXES_FILENAME.to_string(),
            tx_pool_file_name: params::CRYPTONOTE_POOLDATA_FILENAME.to_string(),
            blockchain_indices_file_name: params::CRYPTONOTE_BLOCKCHAIN_INDICES_FILENAME
                .to_string(),
        }
    }

    /// Check the invariants every policy must satisfy.
    pub fn validate(&self) -> ConsensusResult<()> {
        if self.difficulty_target == 0 || self.difficulty_target > MAX_DIFFICULTY_TARGET {
            return Err(ConsensusError::config(
                "difficulty_target",
                format!(
                    "must be in 1..={MAX_DIFFICULTY_TARGET}, got {}",
                    self.difficulty_target
                ),
            ));
        }
        if self.difficulty_window < 2 {
            return Err(ConsensusError::config(
                "difficulty_window",
                format!("must be at least 2, got {}", self.difficulty_window),
            ));
        }
        let Some(trimmed) = self.difficulty_cut.checked_mul(2) else {
            return Err(ConsensusError::config(
                "difficulty_cut",
                format!("2 * cut overflows, got {}", self.difficulty_cut),
            ));
        };
        if trimmed > self.difficulty_window - 2 {
            return Err(ConsensusError::config(
                "difficulty_cut",
                format!(
                    "2 * cut ({trimmed}) exceeds window - 2 ({})",
                    self.difficulty_window - 2
                ),
            ));
        }
        if trimmed + 2 > self.difficulty_window_v1 {
            return Err(ConsensusError::config(
                "difficulty_window_v1",
                format!(
                    "must leave at least 2 samples after the cut, got {}",
                    self.difficulty_window_v1
                ),
            ));
        }
        if self.difficulty_window_v2 < 2 || self.difficulty_window_v3 < 2 {
            return Err(ConsensusError::config(
                "difficulty_window_v2",
                "LWMA windows must hold at least 2 samples",
            ));
        }
        self.validate_schedule()?;

        if self.deposit_min_term == 0 {
            return Err(ConsensusError::config("deposit_min_term", "must be positive"));
        }
        if self.deposit_min_term > self.deposit_max_term {
            return Err(ConsensusError::config(
                "deposit_max_term",
                format!(
                    "min term {} exceeds max term {}",
                    self.deposit_min_term, self.deposit_max_term
                ),
            ));
        }
        if u128::from(self.deposit_min_term) * u128::from(self.deposit_max_total_rate)
            <= u128::from(self.deposit_min_total_rate_factor)
        {
            return Err(ConsensusError::config(
                "deposit_min_total_rate_factor",
                "min term * max total rate must exceed the min total rate factor",
            ));
        }

        if self.upgrade_voting_threshold == 0 || self.upgrade_voting_threshold > 100 {
            return Err(ConsensusError::config(
                "upgrade_voting_threshold",
                format!("must be in 1..=100, got {}", self.upgrade_voting_threshold),
            ));
        }
        if self.upgrade_voting_window <= 1 {
            return Err(ConsensusError::config(
                "upgrade_voting_window",
                format!("must be greater than 1, got {}", self.upgrade_voting_window),
            ));
        }
        if self.upgrade_window == 0 {
            return Err(ConsensusError::config("upgrade_window", "must be positive"));
        }

        if self.number_of_decimal_places > 19 {
            return Err(ConsensusError::config(
                "number_of_decimal_places",
                format!("10^{} does not fit 64 bits", self.number_of_decimal_places),
            ));
        }
        if self.reward_increase_interval == 0 {
            return Err(ConsensusError::config(
                "reward_increase_interval",
                "must be positive",
            ));
        }
        if self.max_block_size_growth_speed_denominator == 0 {
            return Err(ConsensusError::config(
                "max_block_size_growth_speed_denominator",
                "must be positive",
            ));
        }

        Ok(())
    }

    fn validate_schedule(&self) -> ConsensusResult<()> {
        match self.difficulty_schedule.first() {
            Some(entry) if entry.height == 0 => {}
            _ => {
                return Err(ConsensusError::config(
                    "difficulty_schedule",
                    "must start with an entry at height 0",
                ))
            }
        }
        let ascending = self
            .difficulty_schedule
            .windows(2)
            .all(|pair| pair[0].height < pair[1].height);
        if !ascending {
            return Err(ConsensusError::config(
                "difficulty_schedule",
                "heights must be strictly ascending",
            ));
        }
        Ok(())
    }

    fn apply_testnet_overrides(&mut self) {
        self.upgrade_height_v2 = params::TESTNET_UPGRADE_HEIGHT_V2;
        self.upgrade_height_v3 = params::TESTNET_UPGRADE_HEIGHT_V3;
        self.difficulty_schedule = DifficultyScheduleEntry::testnet_schedule();
    }

    fn apply_mainnet_overrides(&mut self) {
        let mainnet = Self::mainnet();
        self.upgrade_height_v2 = mainnet.upgrade_height_v2;
        self.upgrade_height_v3 = mainnet.upgrade_height_v3;
        self.difficulty_schedule = mainnet.difficulty_schedule;
    }

    fn apply_testnet_file_names(&mut self) {
        for name in [
            &mut self.blocks_file_name,
            &mut self.blocks_cache_file_name,
            &mut self.block_indexes_file_name,
            &mut self.tx_pool_file_name,
            &mut self.blockchain_indices_file_name,
        ] {
            name.insert_str(0, params::TESTNET_FILENAME_PREFIX);
        }
    }

    fn difficulty_params(&self) -> DifficultyParams {
        DifficultyParams {
            target: self.difficulty_target,
            window: self.difficulty_window,
            cut: self.difficulty_cut,
            poisson_window: self.difficulty_window_v1,
            lwma_window: self.difficulty_window_v2,
            lwma2_window: self.difficulty_window_v3,
            min_average_timespan: self.difficulty_target / 24,
            max_average_timespan: self.difficulty_target * 6,
            lwma_min_difficulty: self.lwma_min_difficulty,
            ..DifficultyParams::default()
        }
    }
}

/// Immutable consensus policy for one network.
///
/// Built by [`CurrencyBuilder`]. Cheap to share behind an `Arc`; every
/// method takes `&self`.
pub struct Currency {
    params: CurrencyParams,
    network: Network,
    coin: u64,
    difficulty: DifficultyParams,
    genesis_block: Block,
    genesis_block_hash: Hash,
    hasher: Arc<dyn BlockHasher>,
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Currency")
            .field("network", &self.network)
            .field("genesis_block_hash", &self.genesis_block_hash)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Currency {
    /// All policy constants.
    pub fn params(&self) -> &CurrencyParams {
        &self.params
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_testnet(&self) -> bool {
        self.network.is_testnet()
    }

    /// Atomic units per coin.
    pub fn coin(&self) -> u64 {
        self.coin
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis_block
    }

    pub fn genesis_block_hash(&self) -> Hash {
        self.genesis_block_hash
    }

    /// Hashing collaborator shared by genesis and proof-of-work checks.
    pub fn hasher(&self) -> &dyn BlockHasher {
        self.hasher.as_ref()
    }

    pub fn money_supply(&self) -> u64 {
        self.params.money_supply
    }

    pub fn minimum_fee(&self) -> u64 {
        self.params.minimum_fee
    }

    pub fn default_dust_threshold(&self) -> u64 {
        self.params.default_dust_threshold
    }

    pub fn difficulty_target(&self) -> u64 {
        self.params.difficulty_target
    }

    /// Samples a caller should supply to [`Currency::next_difficulty`].
    pub fn difficulty_blocks_count(&self) -> usize {
        self.params.difficulty_window + self.params.difficulty_lag
    }

    pub fn public_address_base58_prefix(&self) -> u64 {
        self.params.public_address_base58_prefix
    }

    pub fn blocks_file_name(&self) -> &str {
        &self.params.blocks_file_name
    }

    pub fn blocks_cache_file_name(&self) -> &str {
        &self.params.blocks_cache_file_name
    }

    pub fn block_indexes_file_name(&self) -> &str {
        &self.params.block_indexes_file_name
    }

    pub fn tx_pool_file_name(&self) -> &str {
        &self.params.tx_pool_file_name
    }

    pub fn blockchain_indices_file_name(&self) -> &str {
        &self.params.blockchain_indices_file_name
    }

    /// Height at which a block major version activates. `u32::MAX` when it
    /// has no scheduled height.
    pub fn upgrade_height(&self, major_version: u8) -> u32 {
        match major_version {
            params::BLOCK_MAJOR_VERSION_2 => self.params.upgrade_height_v2,
            params::BLOCK_MAJOR_VERSION_3 => self.params.upgrade_height_v3,
            _ => u32::MAX,
        }
    }

    /// Parameters handed to the difficulty calculator.
    pub fn difficulty_params(&self) -> &DifficultyParams {
        &self.difficulty
    }

    pub fn difficulty_calculator(&self) -> DifficultyCalculator<'_> {
        DifficultyCalculator::new(&self.difficulty)
    }

    /// Retarget generation active at `height`.
    pub fn difficulty_algorithm(&self, height: u32) -> DifficultyAlgorithm {
        self.params
            .difficulty_schedule
            .iter()
            .rev()
            .find(|entry| entry.height <= height)
            .map(|entry| entry.algorithm)
            .unwrap_or(DifficultyAlgorithm::Classic)
    }

    /// Difficulty for the block at `height`, with the generation the schedule
    /// assigns to that height.
    pub fn next_difficulty(
        &self,
        height: u32,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
    ) -> Difficulty {
        self.difficulty_calculator().calculate(
            self.difficulty_algorithm(height),
            timestamps,
            cumulative_difficulties,
        )
    }
}

macro_rules! param_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.params.$name = value;
                self
            }
        )*
    };
}

/// Builder for [`Currency`], seeded with the mainnet data table.
pub struct CurrencyBuilder {
    params: CurrencyParams,
    network: Network,
    hasher: Arc<dyn BlockHasher>,
}

impl CurrencyBuilder {
    /// Start from mainnet defaults.
    pub fn new(hasher: Arc<dyn BlockHasher>) -> Self {
        Self {
            params: CurrencyParams::mainnet(),
            network: Network::Mainnet,
            hasher,
        }
    }

    /// Switch network mode.
    ///
    /// Testnet replaces the upgrade heights and the difficulty schedule with
    /// their testnet values. Setters called afterwards still take effect.
    /// Switching back to mainnet restores the mainnet heights and schedule.
    pub fn testnet(mut self, testnet: bool) -> Self {
        let network = if testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        };
        if network == self.network {
            return self;
        }
        self.network = network;
        if testnet {
            self.params.apply_testnet_overrides();
        } else {
            self.params.apply_mainnet_overrides();
        }
        self
    }

    /// Apply every value present in `config`.
    pub fn apply_config(mut self, config: &CurrencyConfig) -> Self {
        if let Some(network) = config.network {
            self = self.testnet(network.is_testnet());
        }
        config.apply_to(&mut self.params);
        self
    }

    param_setters! {
        max_block_number: u64,
        max_block_blob_size: usize,
        max_tx_size: usize,
        public_address_base58_prefix: u64,
        mined_money_unlock_window: u32,
        timestamp_check_window: usize,
        timestamp_check_window_v2: usize,
        block_future_time_limit: u64,
        block_future_time_limit_v2: u64,
        block_future_time_limit_v3: u64,
        money_supply: u64,
        start_block_reward: u64,
        ico_block_reward: u64,
        block_reward_v2: u64,
        block_reward_v2_height: u32,
        max_block_reward: u64,
        reward_increase_interval: u64,
        reward_blocks_window: usize,
        block_granted_full_reward_zone: usize,
        miner_tx_blob_reserved_size: usize,
        number_of_decimal_places: usize,
        minimum_fee: u64,
        default_dust_threshold: u64,
        difficulty_target: u64,
        difficulty_window: usize,
        difficulty_lag: usize,
        difficulty_cut: usize,
        difficulty_window_v1: usize,
        difficulty_window_v2: usize,
        difficulty_window_v3: usize,
        lwma_min_difficulty: Difficulty,
        difficulty_schedule: Vec<DifficultyScheduleEntry>,
        deposit_min_amount: u64,
        deposit_min_term: u32,
        deposit_max_term: u32,
        deposit_min_total_rate_factor: u64,
        deposit_max_total_rate: u64,
        multiplier_factor: u64,
        end_multiplier_block: u32,
        max_block_size_initial: usize,
        max_block_size_growth_speed_numerator: u64,
        max_block_size_growth_speed_denominator: u64,
        locked_tx_allowed_delta_seconds: u64,
        locked_tx_allowed_delta_blocks: u64,
        mempool_tx_live_time: u64,
        mempool_tx_from_alt_block_live_time: u64,
        number_of_periods_to_forget_tx_deleted_from_pool: u64,
        upgrade_height_v2: u32,
        upgrade_height_v3: u32,
        upgrade_voting_threshold: u32,
        upgrade_voting_window: u32,
        upgrade_window: u32,
        fusion_tx_max_size: usize,
        fusion_tx_min_input_count: usize,
        fusion_tx_min_in_out_count_ratio: usize,
        merge_mining_bootstrap_version: u8,
        blocks_file_name: String,
        blocks_cache_file_name: String,
        block_indexes_file_name: String,
        tx_pool_file_name: String,
        blockchain_indices_file_name: String,
    }

    /// Validate, derive network overrides and build the genesis block.
    pub fn build(self) -> ConsensusResult<Currency> {
        let CurrencyBuilder {
            mut params,
            network,
            hasher,
        } = self;

        params.validate()?;

        if network.is_testnet() {
            params.apply_testnet_file_names();
        }

        let coin = 10u64.pow(params.number_of_decimal_places as u32);
        let difficulty = params.difficulty_params();

        let genesis_block = generate_genesis_block(network.is_testnet())?;
        let genesis_block_hash = hasher.block_hash(&genesis_block)?;

        debug!(
            %network,
            genesis_hash = %genesis_block_hash,
            upgrade_height_v2 = params.upgrade_height_v2,
            upgrade_height_v3 = params.upgrade_height_v3,
            "Currency initialized"
        );

        Ok(Currency {
            params,
            network,
            coin,
            difficulty,
            genesis_block,
            genesis_block_hash,
            hasher,
        })
    }
}
