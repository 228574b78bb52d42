//! Test data generators for integration tests.
//!
//! Builds transactions, inputs, outputs and synthetic chains with
//! deterministic contents.

use cryptonote_consensus::{
    AccountPublicAddress, BaseInput, Difficulty, KeyImage, KeyInput, KeyOutput,
    MultisignatureInput, MultisignatureOutput, OutputTarget, PublicKey, Transaction,
    TransactionInput, TransactionOutput,
};

/// Key-pair address derived from a seed.
pub fn test_address(seed: u8) -> AccountPublicAddress {
    AccountPublicAddress {
        spend_public_key: PublicKey([seed; 32]),
        view_public_key: PublicKey([seed.wrapping_mul(7).wrapping_add(1); 32]),
    }
}

/// Key input spending `amount` with a ring of one.
pub fn key_input(amount: u64) -> TransactionInput {
    let mut image = [0u8; 32];
    image[..8].copy_from_slice(&amount.to_le_bytes());
    TransactionInput::Key(KeyInput {
        amount,
        output_indexes: vec![0],
        key_image: KeyImage(image),
    })
}

/// Multisignature input. A non-zero `term` makes it a deposit withdrawal.
pub fn deposit_input(amount: u64, term: u32) -> TransactionInput {
    TransactionInput::Multisignature(MultisignatureInput {
        amount,
        signature_count: 1,
        output_index: 0,
        term,
    })
}

pub fn base_input(height: u32) -> TransactionInput {
    TransactionInput::Base(BaseInput {
        block_index: height,
    })
}

pub fn key_output(amount: u64) -> TransactionOutput {
    TransactionOutput {
        amount,
        target: OutputTarget::Key(KeyOutput {
            key: PublicKey([0xAB; 32]),
        }),
    }
}

pub fn deposit_output(amount: u64, term: u32) -> TransactionOutput {
    TransactionOutput {
        amount,
        target: OutputTarget::Multisignature(MultisignatureOutput {
            keys: vec![PublicKey([0xCD; 32])],
            required_signature_count: 1,
            term,
        }),
    }
}

/// Version 1 transfer with the given inputs and outputs.
pub fn transfer(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Transaction {
    let signatures = inputs
        .iter()
        .map(|input| vec![Default::default(); input.signature_count()])
        .collect();
    Transaction {
        version: 1,
        unlock_time: 0,
        inputs,
        outputs,
        extra: Vec::new(),
        signatures,
    }
}

/// Transfer spending key inputs of `inputs` into key outputs of `outputs`.
pub fn transfer_amounts(inputs: &[u64], outputs: &[u64]) -> Transaction {
    transfer(
        inputs.iter().copied().map(key_input).collect(),
        outputs.iter().copied().map(key_output).collect(),
    )
}

/// Timestamps and cumulative difficulties of a chain with constant spacing
/// and per-block difficulty, oldest first.
pub fn steady_chain(count: usize, spacing: u64, difficulty: Difficulty) -> (Vec<u64>, Vec<u64>) {
    let timestamps = (0..count as u64)
        .map(|i| 1_500_000_000 + i * spacing)
        .collect();
    let cumulative = (1..=count as u64).map(|i| i * difficulty).collect();
    (timestamps, cumulative)
}

/// Chain built from explicit solve times and per-block difficulties.
pub fn chain_from(solve_times: &[u64], difficulties: &[Difficulty]) -> (Vec<u64>, Vec<u64>) {
    let mut timestamps = vec![1_500_000_000u64];
    let mut cumulative = vec![difficulties.first().copied().unwrap_or(1)];
    for (st, d) in solve_times.iter().zip(difficulties.iter().skip(1)) {
        let last_ts = *timestamps.last().unwrap_or(&0);
        let last_cd = *cumulative.last().unwrap_or(&0);
        timestamps.push(last_ts.saturating_add(*st));
        cumulative.push(last_cd.saturating_add(*d));
    }
    (timestamps, cumulative)
}
