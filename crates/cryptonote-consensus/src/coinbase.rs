//! Miner (coinbase) transaction construction.
//!
//! The miner transaction pays the block reward to the miner's address as a
//! set of denominated outputs, each locked to a one-time key.

use tracing::{debug, info};

use crate::block::{
    AccountPublicAddress, BaseInput, KeyOutput, KeyPair, OutputTarget, PublicKey, SecretKey,
    Transaction, TransactionInput, TransactionOutput,
};
use crate::currency::Currency;
use crate::fusion::decompose_amount;
use crate::params::TRANSACTION_VERSION_1;
use crate::serialization::{add_extra_nonce_to_extra, add_transaction_public_key_to_extra};
use crate::{ConsensusError, ConsensusResult};

/// Key derivation collaborator for miner outputs.
///
/// `generate_key_pair` is the only source of randomness the ruleset touches.
pub trait OneTimeKeyDeriver {
    /// Fresh transaction key pair.
    fn generate_key_pair(&self) -> KeyPair;

    /// One-time public key of output `output_index`, from the transaction
    /// secret key and the recipient's view and spend keys.
    ///
    /// Fails when a key is not a valid curve point.
    fn derive_output_key(
        &self,
        tx_secret_key: &SecretKey,
        address: &AccountPublicAddress,
        output_index: usize,
    ) -> ConsensusResult<PublicKey>;
}

impl Currency {
    /// Build the miner transaction for a block at `height`.
    ///
    /// The reward is split into pretty denominations. While there are more
    /// than `max_outputs`, the smallest is folded into the next one.
    #[allow(clippy::too_many_arguments)]
    pub fn construct_miner_transaction(
        &self,
        height: u32,
        median_size: usize,
        already_generated_coins: u64,
        current_block_size: usize,
        fee: u64,
        miner_address: &AccountPublicAddress,
        extra_nonce: &[u8],
        max_outputs: usize,
        deriver: &dyn OneTimeKeyDeriver,
    ) -> ConsensusResult<Transaction> {
        if max_outputs == 0 {
            return Err(ConsensusError::MinerTransaction(
                "max outputs must be non-zero".to_string(),
            ));
        }

        let tx_key = deriver.generate_key_pair();
        let mut extra = Vec::new();
        add_transaction_public_key_to_extra(&mut extra, &tx_key.public_key);
        if !extra_nonce.is_empty() {
            add_extra_nonce_to_extra(&mut extra, extra_nonce)?;
        }

        let block_reward = self
            .block_reward(
                median_size,
                current_block_size,
                already_generated_coins,
                fee,
                height,
            )
            .map_err(|e| {
                info!(height, error = %e, "Block is too big");
                e
            })?
            .reward;

        let mut amounts = decompose_amount(block_reward, self.params().default_dust_threshold);
        while amounts.len() > max_outputs {
            let smallest = amounts.remove(0);
            amounts[0] += smallest;
        }

        let mut outputs = Vec::with_capacity(amounts.len());
        let mut total: u64 = 0;
        for (index, amount) in amounts.into_iter().enumerate() {
            let key = deriver.derive_output_key(&tx_key.secret_key, miner_address, index)?;
            total = total
                .checked_add(amount)
                .ok_or(ConsensusError::ArithmeticOverflow("miner outputs"))?;
            outputs.push(TransactionOutput {
                amount,
                target: OutputTarget::Key(KeyOutput { key }),
            });
        }

        if total != block_reward {
            return Err(ConsensusError::MinerTransaction(format!(
                "outputs total {total} does not match block reward {block_reward}"
            )));
        }

        debug!(
            height,
            block_reward,
            outputs = outputs.len(),
            "Constructed miner transaction"
        );

        Ok(Transaction {
            version: TRANSACTION_VERSION_1,
            unlock_time: u64::from(height) + u64::from(self.params().mined_money_unlock_window),
            inputs: vec![TransactionInput::Base(BaseInput {
                block_index: height,
            })],
            outputs,
            extra,
            signatures: vec![Vec::new()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::COIN;
    use crate::serialization::{transaction_public_key_from_extra, TX_EXTRA_NONCE};
    use crate::test_helpers::{test_address, test_currency, TestKeyDeriver};

    #[test]
    fn test_miner_transaction_shape() {
        let currency = test_currency();
        let deriver = TestKeyDeriver::default();
        let address = test_address(1);

        let tx = currency
            .construct_miner_transaction(1_000, 0, 0, 0, 1_234, &address, &[], 10, &deriver)
            .unwrap();

        assert_eq!(tx.version, 1);
        assert_eq!(tx.unlock_time, 1_010);
        assert!(tx.is_coinbase());
        assert_eq!(
            tx.outputs_amounts(),
            vec![34, 200, 1_000, 50_000_000, 100_000_000]
        );
        assert_eq!(tx.outputs_amounts().iter().sum::<u64>(), 150 * COIN + 1_234);
        assert!(transaction_public_key_from_extra(&tx.extra).is_some());
    }

    #[test]
    fn test_miner_transaction_merges_outputs() {
        let currency = test_currency();
        let deriver = TestKeyDeriver::default();
        let address = test_address(2);
        let reward = 150 * COIN + 1_234;

        let tx = currency
            .construct_miner_transaction(1_000, 0, 0, 0, 1_234, &address, &[], 1, &deriver)
            .unwrap();
        assert_eq!(tx.outputs_amounts(), vec![reward]);

        let tx = currency
            .construct_miner_transaction(1_000, 0, 0, 0, 1_234, &address, &[], 2, &deriver)
            .unwrap();
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs_amounts()[1], 100 * COIN);
        assert_eq!(tx.outputs_amounts().iter().sum::<u64>(), reward);
    }

    #[test]
    fn test_miner_transaction_extra_nonce() {
        let currency = test_currency();
        let deriver = TestKeyDeriver::default();
        let address = test_address(3);

        let tx = currency
            .construct_miner_transaction(5, 0, 0, 0, 0, &address, b"pool", 1, &deriver)
            .unwrap();
        assert_eq!(tx.extra.len(), 33 + 2 + 4);
        assert_eq!(tx.extra[33], TX_EXTRA_NONCE);
        assert_eq!(&tx.extra[35..], b"pool");

        let err = currency
            .construct_miner_transaction(5, 0, 0, 0, 0, &address, &[0u8; 256], 1, &deriver)
            .unwrap_err();
        assert!(matches!(err, ConsensusError::InvalidExtraNonce { .. }));
    }

    #[test]
    fn test_miner_transaction_errors() {
        let currency = test_currency();
        let deriver = TestKeyDeriver::default();
        let address = test_address(4);

        assert!(matches!(
            currency.construct_miner_transaction(5, 0, 0, 200_001, 0, &address, &[], 1, &deriver),
            Err(ConsensusError::BlockTooLarge { .. })
        ));
        assert!(matches!(
            currency.construct_miner_transaction(5, 0, 0, 0, 0, &address, &[], 0, &deriver),
            Err(ConsensusError::MinerTransaction(_))
        ));

        let failing = TestKeyDeriver::failing();
        assert!(matches!(
            currency.construct_miner_transaction(5, 0, 0, 0, 0, &address, &[], 1, &failing),
            Err(ConsensusError::KeyDerivation(_))
        ));
    }
}
