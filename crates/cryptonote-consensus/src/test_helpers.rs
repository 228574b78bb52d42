//! Deterministic collaborators for unit tests.

use std::sync::Arc;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::address::AddressCodec;
use crate::block::{AccountPublicAddress, Block, Hash, KeyPair, PublicKey, SecretKey};
use crate::coinbase::OneTimeKeyDeriver;
use crate::currency::{Currency, CurrencyBuilder};
use crate::pow::BlockHasher;
use crate::{ConsensusError, ConsensusResult};

type Blake2b256 = Blake2b<U32>;

fn digest(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Blake2b-256 over the header and coinbase fields.
pub struct TestBlockHasher;

impl BlockHasher for TestBlockHasher {
    fn block_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        let header = &block.header;
        let amounts: Vec<u8> = block
            .base_transaction
            .outputs_amounts()
            .iter()
            .flat_map(|a| a.to_le_bytes())
            .collect();
        Ok(Hash(digest(&[
            &[header.major_version, header.minor_version],
            &header.nonce.to_le_bytes(),
            &header.timestamp.to_le_bytes(),
            header.previous_block_hash.as_bytes(),
            &block.base_transaction.extra,
            &amounts,
        ])))
    }

    fn proof_of_work_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        let id = self.block_hash(block)?;
        Ok(Hash(digest(&[b"pow", id.as_bytes()])))
    }

    fn aux_block_header_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        let id = self.block_hash(block)?;
        Ok(Hash(digest(&[b"aux", id.as_bytes()])))
    }
}

/// Key deriver with a fixed transaction key.
#[derive(Default)]
pub struct TestKeyDeriver {
    fail: bool,
}

impl TestKeyDeriver {
    /// Deriver whose output key derivation always fails.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl OneTimeKeyDeriver for TestKeyDeriver {
    fn generate_key_pair(&self) -> KeyPair {
        KeyPair {
            public_key: PublicKey([0x11; 32]),
            secret_key: SecretKey([0x22; 32]),
        }
    }

    fn derive_output_key(
        &self,
        tx_secret_key: &SecretKey,
        address: &AccountPublicAddress,
        output_index: usize,
    ) -> ConsensusResult<PublicKey> {
        if self.fail {
            return Err(ConsensusError::KeyDerivation("not a curve point".to_string()));
        }
        Ok(PublicKey(digest(&[
            tx_secret_key.as_bytes(),
            address.view_public_key.as_bytes(),
            address.spend_public_key.as_bytes(),
            &(output_index as u64).to_le_bytes(),
        ])))
    }
}

/// `<prefix hex>:<spend hex><view hex>`.
pub struct HexAddressCodec;

impl AddressCodec for HexAddressCodec {
    fn encode(&self, prefix: u64, address: &AccountPublicAddress) -> String {
        format!(
            "{prefix:x}:{}{}",
            address.spend_public_key, address.view_public_key
        )
    }

    fn decode(&self, address: &str) -> ConsensusResult<(u64, AccountPublicAddress)> {
        let invalid = || ConsensusError::InvalidAddress(address.to_string());
        let (prefix, keys) = address.split_once(':').ok_or_else(invalid)?;
        let prefix = u64::from_str_radix(prefix, 16).map_err(|_| invalid())?;
        if keys.len() != 128 || !keys.is_char_boundary(64) {
            return Err(invalid());
        }
        let spend = PublicKey::from_hex(&keys[..64]).ok_or_else(invalid)?;
        let view = PublicKey::from_hex(&keys[64..]).ok_or_else(invalid)?;
        Ok((
            prefix,
            AccountPublicAddress {
                spend_public_key: spend,
                view_public_key: view,
            },
        ))
    }
}

pub fn test_address(seed: u8) -> AccountPublicAddress {
    AccountPublicAddress {
        spend_public_key: PublicKey([seed; 32]),
        view_public_key: PublicKey([seed.wrapping_add(1); 32]),
    }
}

pub fn test_currency_builder() -> CurrencyBuilder {
    CurrencyBuilder::new(Arc::new(TestBlockHasher))
}

pub fn test_currency() -> Currency {
    test_currency_builder()
        .build()
        .expect("mainnet defaults are valid")
}
