//! Coin emission and block reward.

use tracing::{debug, trace};

use crate::currency::Currency;
use crate::{ConsensusError, ConsensusResult};

/// Reward granted to a block and the coins it newly emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockReward {
    /// Subsidy plus fees, as paid by the miner transaction.
    pub reward: u64,
    /// Newly emitted coins, excluding fees.
    pub emission_change: i64,
}

/// Quadratic size penalty: `amount * size * (2 * median - size) / median^2`.
///
/// Returns `amount` unchanged when `current_block_size <= median_size`. The
/// caller must have checked `current_block_size <= 2 * median_size`.
pub fn penalized_amount(amount: u64, median_size: usize, current_block_size: usize) -> u64 {
    if amount == 0 {
        return 0;
    }
    if current_block_size <= median_size {
        return amount;
    }

    let median = median_size as u128;
    let current = current_block_size as u128;
    let multiplicand = current * (2 * median).saturating_sub(current);

    let penalized = u128::from(amount) * multiplicand / median / median;
    debug_assert!(penalized < u128::from(amount));
    penalized as u64
}

impl Currency {
    /// Block subsidy before penalty and fees.
    ///
    /// Height 1 pays the one-time bootstrap allocation. Below the reward-law
    /// fork the subsidy grows tenfold every `reward_increase_interval` blocks,
    /// capped at `max_block_reward`. From the fork on it is the flat
    /// `block_reward_v2`. Never more than the unissued supply.
    pub fn base_reward(&self, already_generated_coins: u64, height: u32) -> u64 {
        let params = self.params();
        let remaining = params.money_supply.saturating_sub(already_generated_coins);

        let reward = if height == 1 {
            params.ico_block_reward
        } else if height < params.block_reward_v2_height {
            let intervals = u64::from(height) / params.reward_increase_interval;
            let multiplier = u32::try_from(intervals)
                .ok()
                .and_then(|exp| 10u64.checked_pow(exp))
                .unwrap_or(u64::MAX);
            params
                .start_block_reward
                .saturating_mul(multiplier)
                .min(params.max_block_reward)
        } else {
            params.block_reward_v2
        };

        reward.min(remaining)
    }

    /// Apply the size penalty to `base_reward`.
    ///
    /// Fails with [`ConsensusError::BlockTooLarge`] when the block is more than
    /// twice the effective median, `max(median_size, full reward zone)`.
    pub fn penalized_reward(
        &self,
        base_reward: u64,
        median_size: usize,
        current_block_size: usize,
    ) -> ConsensusResult<u64> {
        let median_size = median_size.max(self.params().block_granted_full_reward_zone);
        let max_size = median_size.saturating_mul(2);
        if current_block_size > max_size {
            trace!(
                current_block_size,
                max_size,
                "Block cumulative size is too big"
            );
            return Err(ConsensusError::BlockTooLarge {
                size: current_block_size,
                max: max_size,
            });
        }

        Ok(penalized_amount(base_reward, median_size, current_block_size))
    }

    /// Reward for a block at `height` and its emission change.
    pub fn block_reward(
        &self,
        median_size: usize,
        current_block_size: usize,
        already_generated_coins: u64,
        fee: u64,
        height: u32,
    ) -> ConsensusResult<BlockReward> {
        let max_reward = self.params().max_block_reward;
        let base_reward = self.base_reward(already_generated_coins, height);
        let penalized = self.penalized_reward(base_reward, median_size, current_block_size)?;

        let (emission, reward) = if height < 2 {
            let reward = penalized
                .checked_add(fee)
                .ok_or(ConsensusError::ArithmeticOverflow("block reward"))?;
            (penalized, reward)
        } else {
            (
                penalized.min(max_reward),
                penalized.saturating_add(fee).min(max_reward),
            )
        };

        let emission_change = i64::try_from(emission)
            .map_err(|_| ConsensusError::ArithmeticOverflow("emission change"))?;

        debug!(
            height,
            base_reward, penalized, fee, reward, "Block reward computed"
        );

        Ok(BlockReward {
            reward,
            emission_change,
        })
    }

    /// Largest cumulative block size allowed at `height`.
    pub fn max_block_cumulative_size(&self, height: u64) -> usize {
        let params = self.params();
        let growth = u128::from(height) * u128::from(params.max_block_size_growth_speed_numerator)
            / u128::from(params.max_block_size_growth_speed_denominator);
        let max_size = params.max_block_size_initial as u128 + growth;
        usize::try_from(max_size).unwrap_or(usize::MAX)
    }
}
