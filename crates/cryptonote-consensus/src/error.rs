//! Error types for the consensus ruleset.

use thiserror::Error;

/// Consensus rule errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// A policy constant violates an invariant. Only raised while building a currency.
    #[error("Invalid configuration for '{field}': {message}")]
    ConfigurationInvalid {
        field: &'static str,
        message: String,
    },

    /// Block cumulative size exceeds twice the effective median.
    #[error("Block too large: {size} bytes, max {max} bytes")]
    BlockTooLarge { size: usize, max: usize },

    /// Outputs exceed the inputs by more than the withdrawal allowance.
    #[error("Invalid value balance: inputs {inputs}, outputs {outputs}")]
    InvalidValueBalance { inputs: u64, outputs: u64 },

    /// Block major version has no proof-of-work rule.
    #[error("Unsupported block version: {major}.{minor}")]
    UnsupportedBlockVersion { major: u8, minor: u8 },

    /// Deposit term is outside the policy bounds.
    #[error("Invalid deposit term {term}, expected {min}..={max}")]
    InvalidDepositTerm { term: u32, min: u32, max: u32 },

    /// Wide arithmetic result does not fit the target type.
    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// Transaction input of a kind this ruleset cannot value.
    #[error("Unknown transaction input tag 0x{0:02x}")]
    UnknownInput(u8),

    /// Malformed or foreign account address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// One-time output key derivation failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Binary blob could not be decoded.
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Extra nonce does not fit in a single extra field.
    #[error("Extra nonce too large: {size} bytes, max {max} bytes")]
    InvalidExtraNonce { size: usize, max: usize },

    /// Amount string could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Hashing collaborator failed.
    #[error("Hashing failed: {0}")]
    Hashing(String),

    /// Miner transaction could not be constructed.
    #[error("Miner transaction construction failed: {0}")]
    MinerTransaction(String),
}

impl ConsensusError {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            field,
            message: message.into(),
        }
    }
}

/// Result type for consensus operations.
pub type ConsensusResult<T> = Result<T, ConsensusError>;
