//! Value conservation: input amounts, deposit interest and fees.

use tracing::{debug, instrument};

use crate::block::{Transaction, TransactionInput};
use crate::currency::Currency;
use crate::{ConsensusError, ConsensusResult};

impl Currency {
    /// Interest earned by a deposit of `amount` locked for `term` blocks.
    ///
    /// `amount * (term * max_rate - min_factor) / (100 * max_term)`, truncated,
    /// then multiplied by the early-depositor factor while
    /// `height <= end_multiplier_block`.
    pub fn calculate_interest(
        &self,
        amount: u64,
        term: u32,
        height: u32,
    ) -> ConsensusResult<u64> {
        let params = self.params();
        if term < params.deposit_min_term || term > params.deposit_max_term {
            return Err(ConsensusError::InvalidDepositTerm {
                term,
                min: params.deposit_min_term,
                max: params.deposit_max_term,
            });
        }

        let rate = u128::from(term) * u128::from(params.deposit_max_total_rate)
            - u128::from(params.deposit_min_total_rate_factor);
        let denominator = 100 * u128::from(params.deposit_max_term);
        let base = u128::from(amount) * rate / denominator;

        let interest = if height <= params.end_multiplier_block {
            debug!(
                height,
                base_interest = %base,
                factor = params.multiplier_factor,
                "Early depositor multiplier applied"
            );
            base * u128::from(params.multiplier_factor)
        } else {
            base
        };

        u64::try_from(interest).map_err(|_| ConsensusError::ArithmeticOverflow("deposit interest"))
    }

    /// Value an input contributes to the transaction balance.
    ///
    /// Deposits (multisignature inputs with a term) contribute principal plus
    /// interest. Unknown input kinds fail rather than count as zero.
    pub fn input_amount(&self, input: &TransactionInput, height: u32) -> ConsensusResult<u64> {
        match input {
            TransactionInput::Base(_) => Ok(0),
            TransactionInput::Key(key) => Ok(key.amount),
            TransactionInput::Multisignature(msig) if msig.term == 0 => Ok(msig.amount),
            TransactionInput::Multisignature(msig) => {
                let interest = self.calculate_interest(msig.amount, msig.term, height)?;
                msig.amount
                    .checked_add(interest)
                    .ok_or(ConsensusError::ArithmeticOverflow("deposit input amount"))
            }
            TransactionInput::Unknown(tag) => Err(ConsensusError::UnknownInput(*tag)),
        }
    }

    /// Sum of every input's value, interest included.
    pub fn transaction_all_inputs_amount(
        &self,
        tx: &Transaction,
        height: u32,
    ) -> ConsensusResult<u64> {
        tx.inputs.iter().try_fold(0u64, |total, input| {
            total
                .checked_add(self.input_amount(input, height)?)
                .ok_or(ConsensusError::ArithmeticOverflow("transaction inputs amount"))
        })
    }

    /// Interest earned by every deposit input of `tx`.
    pub fn calculate_total_transaction_interest(
        &self,
        tx: &Transaction,
        height: u32,
    ) -> ConsensusResult<u64> {
        tx.inputs
            .iter()
            .filter_map(|input| match input {
                TransactionInput::Multisignature(msig) if msig.term != 0 => Some(msig),
                _ => None,
            })
            .try_fold(0u64, |total, msig| {
                total
                    .checked_add(self.calculate_interest(msig.amount, msig.term, height)?)
                    .ok_or(ConsensusError::ArithmeticOverflow("transaction interest"))
            })
    }

    /// Fee paid by `tx`.
    ///
    /// Inputs minus outputs. Withdrawals may show outputs above inputs by up to
    /// `minimum_fee`, in which case the fee is `minimum_fee`. Any larger excess
    /// fails with [`ConsensusError::InvalidValueBalance`].
    #[instrument(skip(self, tx), fields(inputs = tx.inputs.len(), outputs = tx.outputs.len()))]
    pub fn transaction_fee(&self, tx: &Transaction, height: u32) -> ConsensusResult<u64> {
        let amount_in = self.transaction_all_inputs_amount(tx, height)?;
        let amount_out = tx.outputs.iter().try_fold(0u64, |total, output| {
            total
                .checked_add(output.amount)
                .ok_or(ConsensusError::ArithmeticOverflow("transaction outputs amount"))
        })?;

        if amount_out <= amount_in {
            return Ok(amount_in - amount_out);
        }

        let minimum_fee = self.params().minimum_fee;
        let is_withdrawal = !tx.inputs.is_empty()
            && !tx.outputs.is_empty()
            && amount_out - amount_in <= minimum_fee;

        if is_withdrawal {
            debug!(amount_in, amount_out, "Withdrawal charged minimum fee");
            Ok(minimum_fee)
        } else {
            Err(ConsensusError::InvalidValueBalance {
                inputs: amount_in,
                outputs: amount_out,
            })
        }
    }
}
