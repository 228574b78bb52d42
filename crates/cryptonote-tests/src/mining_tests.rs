//! Mining tests.
//!
//! Miner transaction construction and proof-of-work dispatch by block
//! version, driven through pinned proof-of-work hashes.

use crate::generators::*;
use crate::harness::*;
use cryptonote_consensus::params::COIN;
use cryptonote_consensus::serialization::transaction_public_key_from_extra;
use cryptonote_consensus::{
    Block, BlockHeader, ConsensusError, Hash, OneTimeKeyDeriver, OutputTarget, TransactionInput,
    PRETTY_AMOUNTS,
};

fn block(major_version: u8) -> Block {
    Block {
        header: BlockHeader {
            major_version,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Little-endian hash holding `value` in its low bytes.
fn small_hash(value: u64) -> Hash {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&value.to_le_bytes());
    Hash(bytes)
}

// ============================================================================
// Miner transaction
// ============================================================================

#[test]
fn test_miner_transaction_pays_block_reward() {
    let ctx = TestContext::new();
    let currency = &ctx.mainnet;
    let deriver = TestDeriver::default();
    let address = test_address(7);

    let reward = currency
        .block_reward(0, 120_000, 0, 2_500, 50_000)
        .unwrap()
        .reward;
    let tx = currency
        .construct_miner_transaction(50_000, 0, 0, 120_000, 2_500, &address, &[], 100, &deriver)
        .unwrap();

    assert_eq!(tx.outputs_amounts().iter().sum::<u64>(), reward);
    assert!(tx.outputs_amounts().windows(2).all(|w| w[0] < w[1]));
    for amount in tx.outputs_amounts() {
        assert!(
            amount <= 100 || PRETTY_AMOUNTS.binary_search(&amount).is_ok(),
            "{amount} is neither dust nor a pretty amount"
        );
    }
    assert_eq!(
        tx.inputs,
        vec![TransactionInput::Base(cryptonote_consensus::BaseInput {
            block_index: 50_000
        })]
    );
    assert_eq!(tx.signatures, vec![Vec::new()]);
}

#[test]
fn test_miner_transaction_output_keys() {
    let ctx = TestContext::new();
    let deriver = TestDeriver::new(3);
    let address = test_address(9);

    let tx = ctx
        .mainnet
        .construct_miner_transaction(10, 0, 0, 0, 0, &address, b"extra", 3, &deriver)
        .unwrap();

    let tx_key = deriver.generate_key_pair();
    assert_eq!(transaction_public_key_from_extra(&tx.extra), Some(tx_key.public_key));

    for (index, output) in tx.outputs.iter().enumerate() {
        let expected = deriver
            .derive_output_key(&tx_key.secret_key, &address, index)
            .unwrap();
        match &output.target {
            OutputTarget::Key(key) => assert_eq!(key.key, expected),
            other => panic!("unexpected target {other:?}"),
        }
    }
}

#[test]
fn test_miner_transaction_bootstrap_height() {
    let ctx = TestContext::new();
    let deriver = TestDeriver::default();
    let address = test_address(1);

    let tx = ctx
        .mainnet
        .construct_miner_transaction(1, 0, 0, 0, 99, &address, &[], 1, &deriver)
        .unwrap();
    assert_eq!(tx.outputs_amounts(), vec![18_446_744_073 * COIN + 99]);
    assert_eq!(tx.unlock_time, 11);
}

#[test]
fn test_miner_transaction_rejects_oversized_block() {
    let ctx = TestContext::new();
    let deriver = TestDeriver::default();
    let address = test_address(1);

    let err = ctx
        .mainnet
        .construct_miner_transaction(500, 0, 0, 300_000, 0, &address, &[], 10, &deriver)
        .unwrap_err();
    assert!(matches!(err, ConsensusError::BlockTooLarge { .. }));
}

#[test]
fn test_testnet_miner_transaction_matches_mainnet_amounts() {
    let ctx = TestContext::new();
    let deriver = TestDeriver::default();
    let address = test_address(5);

    let main = ctx
        .mainnet
        .construct_miner_transaction(700, 0, 0, 0, 0, &address, &[], 4, &deriver)
        .unwrap();
    let test = ctx
        .testnet
        .construct_miner_transaction(700, 0, 0, 0, 0, &address, &[], 4, &deriver)
        .unwrap();
    assert_eq!(main, test);
}

// ============================================================================
// Proof of work
// ============================================================================

#[test]
fn test_pow_legacy_versions() {
    init_tracing();
    let currency = builder_with(TestHasher::with_pow_hash(small_hash(1_000)))
        .build()
        .unwrap();

    for major in [1, 2] {
        assert!(currency.check_proof_of_work(&block(major), 1).unwrap());
        assert!(currency.check_proof_of_work(&block(major), u64::MAX).unwrap());
        assert!(!currency.check_proof_of_work(&block(major), 0).unwrap());
    }

    let hard = builder_with(TestHasher::with_pow_hash(Hash([0xff; 32])))
        .build()
        .unwrap();
    assert!(hard.check_proof_of_work(&block(1), 1).unwrap());
    assert!(!hard.check_proof_of_work(&block(1), 2).unwrap());
}

#[test]
fn test_pow_merge_mining_bootstrap() {
    let currency = builder_with(TestHasher::with_pow_hash(Hash([0xff; 32])).failing_aux())
        .build()
        .unwrap();
    // Within the bootstrap range nothing is checked.
    assert!(currency.check_proof_of_work(&block(3), u64::MAX).unwrap());
}

#[test]
fn test_pow_merge_mining_checks() {
    let currency = builder_with(TestHasher::with_pow_hash(small_hash(1)))
        .merge_mining_bootstrap_version(2)
        .build()
        .unwrap();

    let mut merge_mined = block(3);
    assert!(currency.check_proof_of_work(&merge_mined, 1_000).unwrap());

    merge_mined.root_block.blockchain_branch = vec![Hash::zero(); 257];
    assert!(!currency.check_proof_of_work(&merge_mined, 1_000).unwrap());

    let no_aux = builder_with(TestHasher::with_pow_hash(small_hash(1)).failing_aux())
        .merge_mining_bootstrap_version(2)
        .build()
        .unwrap();
    assert!(!no_aux.check_proof_of_work(&block(3), 1_000).unwrap());

    let too_hard = builder_with(TestHasher::with_pow_hash(Hash([0xff; 32])))
        .merge_mining_bootstrap_version(2)
        .build()
        .unwrap();
    assert!(!too_hard.check_proof_of_work(&block(3), 2).unwrap());
}

#[test]
fn test_pow_unknown_version() {
    let ctx = TestContext::new();
    let mut unknown = block(4);
    unknown.header.minor_version = 1;
    assert_eq!(
        ctx.mainnet.check_proof_of_work(&unknown, 1),
        Err(ConsensusError::UnsupportedBlockVersion { major: 4, minor: 1 })
    );
}
