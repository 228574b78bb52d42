//! # cryptonote-tests
//!
//! Integration tests for the CryptoNote consensus ruleset.
//!
//! This crate provides:
//! - Deterministic hashing, key derivation and address collaborators
//! - Transaction and chain generators
//! - Sanity tests across emission, fees, difficulty and genesis
//! - Mining tests for miner transactions and proof of work
//! - Property-based tests for the consensus invariants

pub mod generators;
pub mod harness;


#[cfg(test)]
mod mining_tests;


#[cfg(test)]
mod property_tests;

pub use generators::*;
pub use harness::*;
