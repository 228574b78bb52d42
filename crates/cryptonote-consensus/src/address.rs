//! Account address strings.

use tracing::debug;

use crate::block::AccountPublicAddress;
use crate::currency::Currency;
use crate::{ConsensusError, ConsensusResult};

/// Address string codec (Base58 with checksum in production).
pub trait AddressCodec {
    fn encode(&self, prefix: u64, address: &AccountPublicAddress) -> String;

    /// Decode to `(prefix, keys)`. Fails on malformed input.
    fn decode(&self, address: &str) -> ConsensusResult<(u64, AccountPublicAddress)>;
}

impl Currency {
    /// Encode `address` with this currency's prefix.
    pub fn account_address_as_string(
        &self,
        codec: &dyn AddressCodec,
        address: &AccountPublicAddress,
    ) -> String {
        codec.encode(self.public_address_base58_prefix(), address)
    }

    /// Decode an address string, rejecting other currencies' prefixes.
    pub fn parse_account_address(
        &self,
        codec: &dyn AddressCodec,
        address: &str,
    ) -> ConsensusResult<AccountPublicAddress> {
        let (prefix, keys) = codec.decode(address)?;
        let expected = self.public_address_base58_prefix();
        if prefix != expected {
            debug!(prefix, expected, "Wrong address prefix");
            return Err(ConsensusError::InvalidAddress(format!(
                "prefix {prefix:#x}, expected {expected:#x}"
            )));
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_address, test_currency, HexAddressCodec};

    #[test]
    fn test_address_roundtrip() {
        let currency = test_currency();
        let address = test_address(9);
        let text = currency.account_address_as_string(&HexAddressCodec, &address);
        assert_eq!(
            currency.parse_account_address(&HexAddressCodec, &text).unwrap(),
            address
        );
    }

    #[test]
    fn test_foreign_prefix_rejected() {
        let currency = test_currency();
        let foreign = HexAddressCodec.encode(0x1234, &test_address(9));
        assert!(matches!(
            currency.parse_account_address(&HexAddressCodec, &foreign),
            Err(ConsensusError::InvalidAddress(_))
        ));
        assert!(currency
            .parse_account_address(&HexAddressCodec, "not an address")
            .is_err());
    }
}
