//! Property-based tests using proptest.
//!
//! These tests check the consensus invariants over randomly generated
//! heights, supplies, chains and transactions, with shrinking support.

use crate::generators::*;
use crate::harness::*;
use cryptonote_consensus::params::{
    BLOCK_REWARD_V2_HEIGHT, DEFAULT_DUST_THRESHOLD, FUSION_TX_MAX_SIZE, MAX_BLOCK_REWARD,
    MONEY_SUPPLY,
};
use cryptonote_consensus::{
    decompose_amount, penalized_amount, ConsensusError, Currency, DifficultyAlgorithm,
    PRETTY_AMOUNTS,
};
use proptest::prelude::*;
use std::sync::OnceLock;

fn mainnet() -> &'static Currency {
    static CURRENCY: OnceLock<Currency> = OnceLock::new();
    CURRENCY.get_or_init(|| builder().build().expect("mainnet defaults are valid"))
}

const ALL_ALGORITHMS: [DifficultyAlgorithm; 5] = [
    DifficultyAlgorithm::Classic,
    DifficultyAlgorithm::Poisson,
    DifficultyAlgorithm::Lwma,
    DifficultyAlgorithm::Lwma2,
    DifficultyAlgorithm::Lwma2Lower,
];

// ============================================================================
// Strategies
// ============================================================================

/// Heights after the bootstrap block and before the reward-law fork.
fn arb_pre_fork_height() -> impl Strategy<Value = u32> {
    2u32..BLOCK_REWARD_V2_HEIGHT
}

fn arb_height() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..1_000_000, any::<u32>()]
}

fn arb_generated_coins() -> impl Strategy<Value = u64> {
    prop_oneof![
        0u64..=MONEY_SUPPLY,
        (MONEY_SUPPLY - 10 * MAX_BLOCK_REWARD)..=MONEY_SUPPLY,
        any::<u64>(),
    ]
}

/// Plain transfer amounts, small enough that sums never overflow.
fn arb_amounts(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000_000_000_000, 0..max_len)
}

/// Fusion-eligible inputs: at least the minimum count, none below dust.
fn arb_fusion_inputs() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(DEFAULT_DUST_THRESHOLD..10_000_000, 12..48)
}

/// Chain with positive per-block difficulty and bounded solve times.
fn arb_sane_chain() -> impl Strategy<Value = (Vec<u64>, Vec<u64>)> {
    prop::collection::vec((1u64..2_000, 1u64..1_000_000_000_000), 2..90).prop_map(|blocks| {
        let (solve_times, difficulties): (Vec<u64>, Vec<u64>) = blocks.into_iter().unzip();
        chain_from(&solve_times[1..], &difficulties)
    })
}

/// Anything at all, including decreasing and unaligned series.
/// At least 4 samples with strictly decreasing cumulative difficulty.
fn arb_decreasing_chain() -> impl Strategy<Value = (Vec<u64>, Vec<u64>)> {
    (
        4usize..90,
        1u64..1_000,
        1u64..1_000_000,
        1_000_000_000u64..u64::MAX / 2,
    )
        .prop_map(|(count, spacing, drop, start)| {
            let timestamps = (0..count as u64)
                .map(|i| 1_500_000_000 + i * spacing)
                .collect();
            let cumulative = (0..count as u64).map(|i| start - i * drop).collect();
            (timestamps, cumulative)
        })
}

fn arb_adversarial_chain() -> impl Strategy<Value = (Vec<u64>, Vec<u64>)> {
    (
        prop::collection::vec(any::<u64>(), 0..80),
        prop::collection::vec(any::<u64>(), 0..80),
    )
}

// ============================================================================
// Emission
// ============================================================================

proptest! {
    /// More coins already generated never raise the subsidy, and the cap holds
    /// after the bootstrap block.
    #[test]
    fn base_reward_non_increasing_and_bounded(
        height in arb_pre_fork_height(),
        a in arb_generated_coins(),
        b in arb_generated_coins(),
    ) {
        let currency = mainnet();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let reward_low = currency.base_reward(low, height);
        let reward_high = currency.base_reward(high, height);

        prop_assert!(reward_high <= reward_low);
        prop_assert!(reward_low <= MAX_BLOCK_REWARD);
    }

    /// The subsidy never pushes emission past the money supply.
    #[test]
    fn base_reward_respects_money_supply(
        height in arb_height(),
        generated in 0u64..=MONEY_SUPPLY,
    ) {
        let reward = mainnet().base_reward(generated, height);
        prop_assert!(generated + reward <= MONEY_SUPPLY);
    }

    /// The size penalty only ever takes away.
    #[test]
    fn penalty_never_increases_reward(
        amount in any::<u64>(),
        median in 1usize..10_000_000,
        factor in 0u32..=200,
    ) {
        let current = (median as u64 * u64::from(factor) / 100) as usize;
        prop_assert!(penalized_amount(amount, median, current) <= amount);
    }

    /// Block reward fails exactly when the block exceeds twice the effective median.
    #[test]
    fn block_reward_size_limit(
        median in 0usize..1_000_000,
        current in 0usize..3_000_000,
        height in 2u32..1_000_000,
    ) {
        let limit = 2 * median.max(100_000);
        let result = mainnet().block_reward(median, current, 0, 0, height);
        if current > limit {
            prop_assert!(
                matches!(result, Err(ConsensusError::BlockTooLarge { .. })),
                "expected block too large error"
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

// ============================================================================
// Difficulty
// ============================================================================

proptest! {
    /// Well-formed chains always retarget to a positive difficulty.
    #[test]
    fn difficulty_positive_on_sane_chains((timestamps, cumulative) in arb_sane_chain()) {
        let calculator = mainnet().difficulty_calculator();
        for algorithm in ALL_ALGORITHMS {
            let next = calculator.calculate(algorithm, &timestamps, &cumulative);
            prop_assert!(next > 0, "{:?} returned 0", algorithm);
        }
    }

    /// Arbitrary series never panic; every result is a difficulty or the sentinel.
    #[test]
    fn difficulty_total_on_adversarial_input(
        (timestamps, cumulative) in arb_adversarial_chain(),
    ) {
        let calculator = mainnet().difficulty_calculator();
        for algorithm in ALL_ALGORITHMS {
            let _ = calculator.calculate(algorithm, &timestamps, &cumulative);
        }
    }

    /// Work too large to scale by the target hits the overflow sentinel
    /// instead of wrapping.
    #[test]
    fn overflow_yields_sentinel(per_block in (u64::MAX / 1_080 + 1)..=(u64::MAX / 20)) {
        let (timestamps, cumulative) = steady_chain(20, 1, per_block);
        let calculator = mainnet().difficulty_calculator();
        for algorithm in [DifficultyAlgorithm::Classic, DifficultyAlgorithm::Poisson] {
            prop_assert_eq!(calculator.calculate(algorithm, &timestamps, &cumulative), 0);
        }
    }

    /// A window whose cumulative difficulty decreases yields the sentinel in
    /// every generation.
    #[test]
    fn decreasing_cumulative_yields_sentinel(
        (timestamps, cumulative) in arb_decreasing_chain(),
    ) {
        let calculator = mainnet().difficulty_calculator();
        for algorithm in ALL_ALGORITHMS {
            prop_assert_eq!(
                calculator.calculate(algorithm, &timestamps, &cumulative),
                0,
                "{:?}",
                algorithm
            );
        }
    }
}

// ============================================================================
// Fusion and decomposition
// ============================================================================

proptest! {
    /// Decomposition sums back to the amount; chunks are pretty amounts or dust.
    #[test]
    fn decompose_reconstructs_amount(amount in any::<u64>(), dust_threshold in 0u64..1_000_000) {
        let parts = decompose_amount(amount, dust_threshold);
        let total: u128 = parts.iter().map(|&p| u128::from(p)).sum();
        prop_assert_eq!(total, u128::from(amount));

        let mut dust_seen = false;
        for part in parts {
            if PRETTY_AMOUNTS.binary_search(&part).is_err() {
                prop_assert!(part <= dust_threshold);
                prop_assert!(!dust_seen, "more than one dust chunk");
                dust_seen = true;
            }
        }
    }

    /// Classification does not depend on output order, and the size cap
    /// always applies.
    #[test]
    fn fusion_order_invariant_and_size_capped(
        inputs in arb_fusion_inputs(),
        rotation in any::<usize>(),
        size in 0usize..=FUSION_TX_MAX_SIZE,
    ) {
        let currency = mainnet();
        let sum: u64 = inputs.iter().sum();
        let outputs = decompose_amount(sum, DEFAULT_DUST_THRESHOLD);

        let mut shuffled = outputs.clone();
        shuffled.reverse();
        let len = shuffled.len().max(1);
        shuffled.rotate_left(rotation % len);

        let verdict = currency.is_fusion_transaction_amounts(&inputs, &outputs, size);
        prop_assert_eq!(
            currency.is_fusion_transaction_amounts(&inputs, &shuffled, size),
            verdict
        );
        prop_assert!(!currency.is_fusion_transaction_amounts(
            &inputs,
            &outputs,
            FUSION_TX_MAX_SIZE + 1 + size
        ));

        let tx = transfer_amounts(&inputs, &shuffled);
        prop_assert_eq!(currency.is_fusion_transaction(&tx, size), verdict);
    }

    /// Only exact pretty denominations below the threshold qualify as fusion inputs.
    #[test]
    fn fusion_input_applicability(amount in any::<u64>(), threshold in any::<u64>()) {
        let currency = mainnet();
        match currency.is_amount_applicable_in_fusion_transaction_input(amount, threshold) {
            Some(order) => {
                prop_assert!(amount < threshold);
                prop_assert!(amount >= DEFAULT_DUST_THRESHOLD);
                let index = PRETTY_AMOUNTS.binary_search(&amount);
                prop_assert_eq!(index.map(|i| (i / 9) as u8), Ok(order));
            }
            None => prop_assert!(
                amount >= threshold
                    || amount < DEFAULT_DUST_THRESHOLD
                    || PRETTY_AMOUNTS.binary_search(&amount).is_err()
            ),
        }
    }
}

// ============================================================================
// Fees
// ============================================================================

proptest! {
    /// Reordering inputs or outputs does not change the fee or the verdict.
    #[test]
    fn fee_invariant_under_reordering(
        inputs in arb_amounts(16),
        outputs in arb_amounts(16),
        rotation in any::<usize>(),
        height in arb_height(),
    ) {
        let currency = mainnet();
        let tx = transfer_amounts(&inputs, &outputs);

        let mut inputs_reordered = inputs.clone();
        inputs_reordered.reverse();
        let mut outputs_reordered = outputs.clone();
        if !outputs_reordered.is_empty() {
            let len = outputs_reordered.len();
            outputs_reordered.rotate_right(rotation % len);
        }
        let reordered = transfer_amounts(&inputs_reordered, &outputs_reordered);

        prop_assert_eq!(
            currency.transaction_fee(&tx, height),
            currency.transaction_fee(&reordered, height)
        );
    }

    /// Whenever a fee is accepted it is either the exact surplus or the
    /// minimum fee for a small withdrawal excess.
    #[test]
    fn fee_matches_balance(inputs in arb_amounts(16), outputs in arb_amounts(16)) {
        let currency = mainnet();
        let tx = transfer_amounts(&inputs, &outputs);
        let total_in: u64 = inputs.iter().sum();
        let total_out: u64 = outputs.iter().sum();

        match currency.transaction_fee(&tx, 100) {
            Ok(fee) if total_out <= total_in => prop_assert_eq!(fee, total_in - total_out),
            Ok(fee) => {
                prop_assert_eq!(fee, currency.minimum_fee());
                prop_assert!(total_out - total_in <= currency.minimum_fee());
            }
            Err(e) => {
                prop_assert_eq!(
                    e,
                    ConsensusError::InvalidValueBalance { inputs: total_in, outputs: total_out }
                );
                prop_assert!(
                    total_out - total_in > currency.minimum_fee()
                        || inputs.is_empty()
                        || outputs.is_empty()
                );
            }
        }
    }

    /// Longer deposits never earn less.
    #[test]
    fn interest_non_decreasing_in_term(
        amount in 0u64..1_000_000_000_000_000,
        a in 22_000u32..=264_000,
        b in 22_000u32..=264_000,
        height in arb_height(),
    ) {
        let currency = mainnet();
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let short_interest = currency.calculate_interest(amount, short, height).unwrap();
        let long_interest = currency.calculate_interest(amount, long, height).unwrap();
        prop_assert!(short_interest <= long_interest);
    }
}

// ============================================================================
// Miner transaction and amounts
// ============================================================================

proptest! {
    /// Miner outputs always add up to the block reward.
    #[test]
    fn miner_transaction_sums_to_reward(
        height in arb_height(),
        median in 0usize..400_000,
        current in 0usize..500_000,
        fee in 0u64..1_000_000_000,
        generated in arb_generated_coins(),
        max_outputs in 1usize..20,
    ) {
        let currency = mainnet();
        let deriver = TestDeriver::default();
        let address = test_address(11);

        let reward = currency.block_reward(median, current, generated, fee, height);
        let tx = currency.construct_miner_transaction(
            height, median, generated, current, fee, &address, &[], max_outputs, &deriver,
        );

        match (reward, tx) {
            (Ok(reward), Ok(tx)) => {
                prop_assert!(tx.outputs.len() <= max_outputs);
                prop_assert_eq!(tx.outputs_amounts().iter().sum::<u64>(), reward.reward);
            }
            (Err(expected), Err(actual)) => prop_assert_eq!(expected, actual),
            (reward, tx) => prop_assert!(false, "reward {:?} but transaction {:?}", reward, tx),
        }
    }

    /// Formatted amounts parse back to the same value.
    #[test]
    fn amount_text_roundtrip(amount in any::<u64>()) {
        let currency = mainnet();
        prop_assert_eq!(currency.parse_amount(&currency.format_amount(amount)), Ok(amount));
    }
}
