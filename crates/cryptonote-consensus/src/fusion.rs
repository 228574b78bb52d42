//! Denomination and fusion transaction rules.
//!
//! Amounts are split into "pretty" denominations, one significant digit times
//! a power of ten. A fusion transaction consolidates many inputs into exactly
//! the pretty decomposition of their sum, and is exempt from the usual fee
//! expectations.

use std::cell::RefCell;

use crate::block::Transaction;
use crate::currency::Currency;

const fn pretty_amounts() -> [u64; 172] {
    let mut out = [0u64; 172];
    let mut order = 1u64;
    let mut power = 0;
    while power < 19 {
        let mut digit = 1;
        while digit <= 9 {
            out[power * 9 + digit - 1] = digit as u64 * order;
            digit += 1;
        }
        order *= 10;
        power += 1;
    }
    out[171] = order;
    out
}

/// Every pretty denomination representable in 64 bits, ascending:
/// `1..=9`, `10..=90`, ..., `10^18..=9 * 10^18`, `10^19`.
pub const PRETTY_AMOUNTS: [u64; 172] = pretty_amounts();

/// Split `amount` into per-digit chunks, lowest digit first.
///
/// Low digits are accumulated as dust while the running dust stays within
/// `dust_threshold`. The dust is reported once, before the first chunk above
/// it, and zero chunks are skipped.
pub fn decompose_amount_into_digits(
    mut amount: u64,
    dust_threshold: u64,
    mut chunk_handler: impl FnMut(u64),
    mut dust_handler: impl FnMut(u64),
) {
    let mut dust_handled = false;
    let mut dust = 0u64;
    let mut order = 1u64;

    while amount != 0 {
        let chunk = (amount % 10) * order;
        amount /= 10;
        order = order.saturating_mul(10);

        if dust.saturating_add(chunk) <= dust_threshold {
            dust += chunk;
        } else {
            if !dust_handled && dust != 0 {
                dust_handler(dust);
                dust_handled = true;
            }
            if chunk != 0 {
                chunk_handler(chunk);
            }
        }
    }

    if !dust_handled && dust != 0 {
        dust_handler(dust);
    }
}

/// Decomposition of `amount` as a list, dust included, in emission order.
pub fn decompose_amount(amount: u64, dust_threshold: u64) -> Vec<u64> {
    let amounts = RefCell::new(Vec::new());
    decompose_amount_into_digits(
        amount,
        dust_threshold,
        |chunk| amounts.borrow_mut().push(chunk),
        |dust| amounts.borrow_mut().push(dust),
    );
    amounts.into_inner()
}

impl Currency {
    /// Whether amounts of this shape form a fusion transaction of `size` bytes.
    ///
    /// Requires a size within the fusion cap, enough inputs, an input to output
    /// ratio of at least the minimum, no dust inputs, and outputs that are
    /// exactly the decomposition of the input sum in any order.
    pub fn is_fusion_transaction_amounts(
        &self,
        inputs_amounts: &[u64],
        outputs_amounts: &[u64],
        size: usize,
    ) -> bool {
        let params = self.params();
        if size > params.fusion_tx_max_size {
            return false;
        }
        if inputs_amounts.len() < params.fusion_tx_min_input_count {
            return false;
        }
        if inputs_amounts.len()
            < outputs_amounts
                .len()
                .saturating_mul(params.fusion_tx_min_in_out_count_ratio)
        {
            return false;
        }

        let dust_threshold = params.default_dust_threshold;
        let mut input_amount = 0u64;
        for &amount in inputs_amounts {
            if amount < dust_threshold {
                return false;
            }
            input_amount = match input_amount.checked_add(amount) {
                Some(total) => total,
                None => return false,
            };
        }

        let mut expected = decompose_amount(input_amount, dust_threshold);
        expected.sort_unstable();

        let mut actual = outputs_amounts.to_vec();
        actual.sort_unstable();

        expected == actual
    }

    /// Whether `tx`, serialized to `size` bytes, is a fusion transaction.
    pub fn is_fusion_transaction(&self, tx: &Transaction, size: usize) -> bool {
        self.is_fusion_transaction_amounts(&tx.inputs_amounts(), &tx.outputs_amounts(), size)
    }

    /// Decimal order of `amount` if it may be spent as a fusion input.
    ///
    /// `amount` must be below `threshold`, not dust, and exactly a pretty
    /// denomination.
    pub fn is_amount_applicable_in_fusion_transaction_input(
        &self,
        amount: u64,
        threshold: u64,
    ) -> Option<u8> {
        if amount >= threshold || amount < self.params().default_dust_threshold {
            return None;
        }
        PRETTY_AMOUNTS
            .binary_search(&amount)
            .ok()
            .map(|index| (index / 9) as u8)
    }

    /// Rough upper bound on key inputs that fit a transaction of
    /// `transaction_size` bytes with `output_count` outputs and ring size
    /// `mixin_count + 1`.
    pub fn approximate_maximum_input_count(
        &self,
        transaction_size: usize,
        output_count: usize,
        mixin_count: usize,
    ) -> usize {
        const KEY_IMAGE_SIZE: usize = 32;
        const OUTPUT_KEY_SIZE: usize = 32;
        const AMOUNT_SIZE: usize = 8 + 2;
        const GLOBAL_INDEXES_VECTOR_SIZE_SIZE: usize = 1;
        const GLOBAL_INDEXES_INITIAL_VALUE_SIZE: usize = 4;
        const GLOBAL_INDEXES_DIFFERENCE_SIZE: usize = 4;
        const SIGNATURE_SIZE: usize = 64;
        const EXTRA_TAG_SIZE: usize = 1;
        const INPUT_TAG_SIZE: usize = 1;
        const OUTPUT_TAG_SIZE: usize = 1;
        const PUBLIC_KEY_SIZE: usize = 32;
        const TRANSACTION_VERSION_SIZE: usize = 1;
        const TRANSACTION_UNLOCK_TIME_SIZE: usize = 8;

        let outputs_size =
            output_count.saturating_mul(OUTPUT_TAG_SIZE + OUTPUT_KEY_SIZE + AMOUNT_SIZE);
        let header_size = TRANSACTION_VERSION_SIZE
            + TRANSACTION_UNLOCK_TIME_SIZE
            + EXTRA_TAG_SIZE
            + PUBLIC_KEY_SIZE;
        let input_size = (INPUT_TAG_SIZE
            + AMOUNT_SIZE
            + KEY_IMAGE_SIZE
            + SIGNATURE_SIZE
            + GLOBAL_INDEXES_VECTOR_SIZE_SIZE
            + GLOBAL_INDEXES_INITIAL_VALUE_SIZE)
            .saturating_add(
                mixin_count.saturating_mul(GLOBAL_INDEXES_DIFFERENCE_SIZE + SIGNATURE_SIZE),
            );

        transaction_size
            .saturating_sub(header_size)
            .saturating_sub(outputs_size)
            / input_size
    }
}
