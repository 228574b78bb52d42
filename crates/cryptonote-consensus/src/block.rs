//! Block and transaction types consumed by the ruleset.
//!
//! These are owned by the chain driver and handed to the ruleset per call.
//! Nothing in this crate mutates a block or transaction it did not build itself.

use std::fmt;

/// Size of hashes and curve points in bytes.
pub const HASH_SIZE: usize = 32;

macro_rules! byte_array_type {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// All-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Parse from a hex string of exactly the right length.
            pub fn from_hex(s: &str) -> Option<Self> {
                let bytes = hex::decode(s).ok()?;
                let arr: [u8; $len] = bytes.try_into().ok()?;
                Some(Self(arr))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }
    };
}

byte_array_type!(
    /// 256-bit digest.
    Hash,
    HASH_SIZE
);
byte_array_type!(
    /// Compressed curve point.
    PublicKey,
    HASH_SIZE
);
byte_array_type!(
    /// Curve scalar.
    SecretKey,
    HASH_SIZE
);
byte_array_type!(
    /// Key image of a spent key output.
    KeyImage,
    HASH_SIZE
);
byte_array_type!(
    /// Ring signature element.
    Signature,
    64
);

/// Transaction key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

/// Public part of an account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountPublicAddress {
    pub spend_public_key: PublicKey,
    pub view_public_key: PublicKey,
}

/// Coinbase input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseInput {
    pub block_index: u32,
}

/// Spend of a key output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub amount: u64,
    pub output_indexes: Vec<u32>,
    pub key_image: KeyImage,
}

/// Spend of a multisignature output. A non-zero `term` marks a deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisignatureInput {
    pub amount: u64,
    pub signature_count: u8,
    pub output_index: u32,
    pub term: u32,
}

/// Transaction input variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionInput {
    Base(BaseInput),
    Key(KeyInput),
    Multisignature(MultisignatureInput),
    /// Input kind this ruleset does not know how to value.
    Unknown(u8),
}

impl TransactionInput {
    /// Number of signatures that accompany this input.
    pub fn signature_count(&self) -> usize {
        match self {
            TransactionInput::Base(_) | TransactionInput::Unknown(_) => 0,
            TransactionInput::Key(input) => input.output_indexes.len(),
            TransactionInput::Multisignature(input) => input.signature_count as usize,
        }
    }
}

/// Key output target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutput {
    pub key: PublicKey,
}

/// Multisignature output target. A non-zero `term` locks a deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisignatureOutput {
    pub keys: Vec<PublicKey>,
    pub required_signature_count: u8,
    pub term: u32,
}

/// Output spend target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Key(KeyOutput),
    Multisignature(MultisignatureOutput),
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    pub amount: u64,
    pub target: OutputTarget,
}

/// Transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub version: u8,
    pub unlock_time: u64,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub extra: Vec<u8>,
    /// One signature list per input.
    pub signatures: Vec<Vec<Signature>>,
}

impl Transaction {
    /// Output amounts in transaction order.
    pub fn outputs_amounts(&self) -> Vec<u64> {
        self.outputs.iter().map(|o| o.amount).collect()
    }

    /// Stated amounts of key and multisignature inputs, without interest.
    pub fn inputs_amounts(&self) -> Vec<u64> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                TransactionInput::Key(key) => Some(key.amount),
                TransactionInput::Multisignature(msig) => Some(msig.amount),
                TransactionInput::Base(_) | TransactionInput::Unknown(_) => None,
            })
            .collect()
    }

    /// Whether this is a coinbase transaction (single base input).
    pub fn is_coinbase(&self) -> bool {
        matches!(self.inputs.as_slice(), [TransactionInput::Base(_)])
    }
}

/// Parent-chain block a merge-mined block commits into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootBlock {
    pub major_version: u8,
    pub minor_version: u8,
    pub timestamp: u64,
    pub previous_block_hash: Hash,
    pub nonce: u32,
    pub transaction_count: usize,
    pub base_transaction_branch: Vec<Hash>,
    pub base_transaction: Transaction,
    /// Merkle branch linking this chain into the parent's merge-mining tag.
    pub blockchain_branch: Vec<Hash>,
}

/// Block header fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockHeader {
    pub major_version: u8,
    pub minor_version: u8,
    pub nonce: u32,
    pub timestamp: u64,
    pub previous_block_hash: Hash,
}

/// Block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub header: BlockHeader,
    /// Present only for merge-mined block versions.
    pub root_block: RootBlock,
    pub base_transaction: Transaction,
    pub transaction_hashes: Vec<Hash>,
}

impl Block {
    /// Block major version.
    pub fn major_version(&self) -> u8 {
        self.header.major_version
    }

    /// Block minor version.
    pub fn minor_version(&self) -> u8 {
        self.header.minor_version
    }
}
