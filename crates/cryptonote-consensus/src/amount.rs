//! Human-readable amounts.

use crate::currency::Currency;
use crate::{ConsensusError, ConsensusResult};

impl Currency {
    /// Format atomic units as a decimal string with the currency's decimal places.
    ///
    /// `format_amount(1_500_000)` is `"1.500000"` with six places.
    pub fn format_amount(&self, amount: u64) -> String {
        let places = self.params().number_of_decimal_places;
        let mut s = amount.to_string();
        if s.len() < places + 1 {
            s.insert_str(0, &"0".repeat(places + 1 - s.len()));
        }
        s.insert(s.len() - places, '.');
        s
    }

    /// Format a signed amount, with a leading `-` when negative.
    pub fn format_signed_amount(&self, amount: i64) -> String {
        let s = self.format_amount(amount.unsigned_abs());
        if amount < 0 {
            format!("-{s}")
        } else {
            s
        }
    }

    /// Parse a decimal string into atomic units.
    ///
    /// Surrounding whitespace is ignored and trailing fractional zeros beyond
    /// the decimal places are tolerated. More significant fractional digits,
    /// non-digits and values above `u64::MAX` are rejected.
    pub fn parse_amount(&self, text: &str) -> ConsensusResult<u64> {
        let places = self.params().number_of_decimal_places;
        let mut digits = text.trim().to_string();

        let fraction_size = match digits.find('.') {
            Some(point) => {
                let mut fraction_size = digits.len() - point - 1;
                while fraction_size > places && digits.ends_with('0') {
                    digits.pop();
                    fraction_size -= 1;
                }
                if fraction_size > places {
                    return Err(ConsensusError::InvalidAmount(format!(
                        "{text:?} has more than {places} decimal places"
                    )));
                }
                digits.remove(point);
                fraction_size
            }
            None => 0,
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConsensusError::InvalidAmount(format!("{text:?} is not a number")));
        }

        digits.push_str(&"0".repeat(places - fraction_size));
        digits
            .parse::<u64>()
            .map_err(|e| ConsensusError::InvalidAmount(format!("{text:?}: {e}")))
    }
}
