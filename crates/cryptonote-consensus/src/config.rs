//! Serializable policy overrides.
//!
//! A [`CurrencyConfig`] is a partial policy: every field is optional and only
//! the fields present override the builder's current values. It loads from
//! TOML so private networks can be described in a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyParams, Network};
use crate::difficulty::DifficultyAlgorithm;
use crate::params;
use crate::{ConsensusError, ConsensusResult, Difficulty};

/// Activation of a retarget generation at a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyScheduleEntry {
    pub height: u32,
    pub algorithm: DifficultyAlgorithm,
}

impl DifficultyScheduleEntry {
    pub const fn new(height: u32, algorithm: DifficultyAlgorithm) -> Self {
        Self { height, algorithm }
    }

    pub fn mainnet_schedule() -> Vec<Self> {
        vec![
            Self::new(0, DifficultyAlgorithm::Classic),
            Self::new(params::DIFFICULTY_POISSON_HEIGHT, DifficultyAlgorithm::Poisson),
            Self::new(params::DIFFICULTY_LWMA_HEIGHT, DifficultyAlgorithm::Lwma),
            Self::new(params::DIFFICULTY_LWMA2_HEIGHT, DifficultyAlgorithm::Lwma2),
        ]
    }

    pub fn testnet_schedule() -> Vec<Self> {
        vec![
            Self::new(0, DifficultyAlgorithm::Classic),
            Self::new(
                params::TESTNET_DIFFICULTY_POISSON_HEIGHT,
                DifficultyAlgorithm::Poisson,
            ),
            Self::new(params::TESTNET_DIFFICULTY_LWMA_HEIGHT, DifficultyAlgorithm::Lwma),
            Self::new(
                params::TESTNET_DIFFICULTY_LWMA2_HEIGHT,
                DifficultyAlgorithm::Lwma2,
            ),
        ]
    }
}

/// Partial currency policy.
///
/// Unknown keys are rejected so a misspelt field cannot silently fall back to
/// the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyConfig {
    /// Network mode. Testnet overrides are applied before the other fields.
    pub network: Option<Network>,

    pub public_address_base58_prefix: Option<u64>,
    pub mined_money_unlock_window: Option<u32>,
    pub max_block_number: Option<u64>,
    pub max_block_blob_size: Option<usize>,
    pub max_tx_size: Option<usize>,

    // Emission
    pub money_supply: Option<u64>,
    pub start_block_reward: Option<u64>,
    pub ico_block_reward: Option<u64>,
    pub block_reward_v2: Option<u64>,
    pub block_reward_v2_height: Option<u32>,
    pub max_block_reward: Option<u64>,
    pub reward_increase_interval: Option<u64>,
    pub reward_blocks_window: Option<usize>,
    pub block_granted_full_reward_zone: Option<usize>,
    pub miner_tx_blob_reserved_size: Option<usize>,
    pub max_block_size_initial: Option<usize>,
    pub max_block_size_growth_speed_numerator: Option<u64>,
    pub max_block_size_growth_speed_denominator: Option<u64>,

    // Amounts
    pub number_of_decimal_places: Option<usize>,
    pub minimum_fee: Option<u64>,
    pub default_dust_threshold: Option<u64>,

    // Difficulty
    pub difficulty_target: Option<u64>,
    pub difficulty_window: Option<usize>,
    pub difficulty_lag: Option<usize>,
    pub difficulty_cut: Option<usize>,
    pub difficulty_window_v1: Option<usize>,
    pub difficulty_window_v2: Option<usize>,
    pub difficulty_window_v3: Option<usize>,
    pub lwma_min_difficulty: Option<Difficulty>,
    pub difficulty_schedule: Option<Vec<DifficultyScheduleEntry>>,

    // Deposits
    pub deposit_min_amount: Option<u64>,
    pub deposit_min_term: Option<u32>,
    pub deposit_max_term: Option<u32>,
    pub deposit_min_total_rate_factor: Option<u64>,
    pub deposit_max_total_rate: Option<u64>,
    pub multiplier_factor: Option<u64>,
    pub end_multiplier_block: Option<u32>,

    // Upgrades
    pub upgrade_height_v2: Option<u32>,
    pub upgrade_height_v3: Option<u32>,
    pub upgrade_voting_threshold: Option<u32>,
    pub upgrade_voting_window: Option<u32>,
    pub upgrade_window: Option<u32>,
    pub merge_mining_bootstrap_version: Option<u8>,

    // Fusion
    pub fusion_tx_max_size: Option<usize>,
    pub fusion_tx_min_input_count: Option<usize>,
    pub fusion_tx_min_in_out_count_ratio: Option<usize>,
}

macro_rules! override_fields {
    ($config:expr, $params:expr; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$config.$field {
                $params.$field = value.clone();
            }
        )*
    };
}

impl CurrencyConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> ConsensusResult<Self> {
        toml::from_str(content).map_err(|e| ConsensusError::config("toml", e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConsensusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsensusError::config("path", format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> ConsensusResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConsensusError::config("toml", e.to_string()))
    }

    pub(crate) fn apply_to(&self, params: &mut CurrencyParams) {
        override_fields!(self, params;
            public_address_base58_prefix,
            mined_money_unlock_window,
            max_block_number,
            max_block_blob_size,
            max_tx_size,
            money_supply,
            start_block_reward,
            ico_block_reward,
            block_reward_v2,
            block_reward_v2_height,
            max_block_reward,
            reward_increase_interval,
            reward_blocks_window,
            block_granted_full_reward_zone,
            miner_tx_blob_reserved_size,
            max_block_size_initial,
            max_block_size_growth_speed_numerator,
            max_block_size_growth_speed_denominator,
            number_of_decimal_places,
            minimum_fee,
            default_dust_threshold,
            difficulty_target,
            difficulty_window,
            difficulty_lag,
            difficulty_cut,
            difficulty_window_v1,
            difficulty_window_v2,
            difficulty_window_v3,
            lwma_min_difficulty,
            difficulty_schedule,
            deposit_min_amount,
            deposit_min_term,
            deposit_max_term,
            deposit_min_total_rate_factor,
            deposit_max_total_rate,
            multiplier_factor,
            end_multiplier_block,
            upgrade_height_v2,
            upgrade_height_v3,
            upgrade_voting_threshold,
            upgrade_voting_window,
            upgrade_window,
            merge_mining_bootstrap_version,
            fusion_tx_max_size,
            fusion_tx_min_input_count,
            fusion_tx_min_in_out_count_ratio,
        );
    }
}
