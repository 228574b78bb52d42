//! Test harness for integration tests.
//!
//! Provides deterministic stand-ins for the hashing, key derivation and
//! address codec collaborators, and a context holding ready-built currencies.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use cryptonote_consensus::{
    AccountPublicAddress, AddressCodec, Block, BlockHasher, ConsensusError, ConsensusResult,
    Currency, CurrencyBuilder, Hash, KeyPair, OneTimeKeyDeriver, PublicKey, SecretKey,
};
use tempfile::TempDir;

type Blake2b256 = Blake2b<U32>;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process. Honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Blake2b-256 block hasher.
///
/// The proof-of-work hash can be pinned to a fixed value to drive the
/// difficulty comparison from tests.
#[derive(Debug, Clone, Default)]
pub struct TestHasher {
    pow_override: Option<Hash>,
    fail_aux: bool,
}

impl TestHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always report `hash` as the proof-of-work hash.
    pub fn with_pow_hash(hash: Hash) -> Self {
        Self {
            pow_override: Some(hash),
            fail_aux: false,
        }
    }

    /// Fail every auxiliary header hash derivation.
    pub fn failing_aux(mut self) -> Self {
        self.fail_aux = true;
        self
    }
}

impl BlockHasher for TestHasher {
    fn block_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        let header = &block.header;
        let amounts: Vec<u8> = block
            .base_transaction
            .outputs_amounts()
            .iter()
            .flat_map(|a| a.to_le_bytes())
            .collect();
        Ok(Hash(blake2b256(&[
            &[header.major_version, header.minor_version],
            &header.nonce.to_le_bytes(),
            &header.timestamp.to_le_bytes(),
            header.previous_block_hash.as_bytes(),
            &block.base_transaction.extra,
            &amounts,
        ])))
    }

    fn proof_of_work_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        match self.pow_override {
            Some(hash) => Ok(hash),
            None => {
                let id = self.block_hash(block)?;
                Ok(Hash(blake2b256(&[b"pow", id.as_bytes()])))
            }
        }
    }

    fn aux_block_header_hash(&self, block: &Block) -> ConsensusResult<Hash> {
        if self.fail_aux {
            return Err(ConsensusError::Hashing(
                "merge mining tag not found".to_string(),
            ));
        }
        let id = self.block_hash(block)?;
        Ok(Hash(blake2b256(&[b"aux", id.as_bytes()])))
    }
}

/// Key deriver seeded by a single byte.
#[derive(Debug, Clone, Copy)]
pub struct TestDeriver {
    seed: u8,
}

impl TestDeriver {
    pub fn new(seed: u8) -> Self {
        Self { seed }
    }
}

impl Default for TestDeriver {
    fn default() -> Self {
        Self::new(0x5e)
    }
}

impl OneTimeKeyDeriver for TestDeriver {
    fn generate_key_pair(&self) -> KeyPair {
        KeyPair {
            public_key: PublicKey(blake2b256(&[b"pub", &[self.seed]])),
            secret_key: SecretKey(blake2b256(&[b"sec", &[self.seed]])),
        }
    }

    fn derive_output_key(
        &self,
        tx_secret_key: &SecretKey,
        address: &AccountPublicAddress,
        output_index: usize,
    ) -> ConsensusResult<PublicKey> {
        Ok(PublicKey(blake2b256(&[
            tx_secret_key.as_bytes(),
            address.view_public_key.as_bytes(),
            address.spend_public_key.as_bytes(),
            &(output_index as u64).to_le_bytes(),
        ])))
    }
}

/// `<prefix hex>:<spend hex><view hex>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexCodec;

impl AddressCodec for HexCodec {
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
        Ok((
            prefix,
            AccountPublicAddress {
                spend_public_key: PublicKey::from_hex(&keys[..64]).ok_or_else(invalid)?,
                view_public_key: PublicKey::from_hex(&keys[64..]).ok_or_else(invalid)?,
            },
        ))
    }
}

/// Builder wired to a [`TestHasher`].
pub fn builder() -> CurrencyBuilder {
    builder_with(TestHasher::new())
}

pub fn builder_with(hasher: TestHasher) -> CurrencyBuilder {
    CurrencyBuilder::new(Arc::new(hasher))
}

/// Test context with both networks built.
pub struct TestContext {
    pub mainnet: Currency,
    pub testnet: Currency,
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            mainnet: builder().build().expect("mainnet defaults are valid"),
            testnet: builder()
                .testnet(true)
                .build()
                .expect("testnet defaults are valid"),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Policy file in a temporary directory, removed on drop.
pub struct TestConfigFile {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TestConfigFile {
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("currency.toml");
        let mut file = std::fs::File::create(&path).expect("Failed to create config file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config file");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
