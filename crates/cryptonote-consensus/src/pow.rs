//! Proof-of-work verification.
//!
//! Dispatch by block major version:
//!
//! - v1, v2: the proof-of-work hash must meet the difficulty.
//! - v3 (merge mined): blocks up to `merge_mining_bootstrap_version` are
//!   accepted unconditionally as a bootstrap grace period. Past it, the hash
//!   must meet the difficulty, the parent-chain branch must be no deeper than
//!   the bit width of a hash, and the auxiliary header hash must be derivable.
//!   The parent chain itself is not validated here.
//! - anything else: [`ConsensusError::UnsupportedBlockVersion`].

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, trace, warn};

use crate::block::{Block, Hash, HASH_SIZE};
use crate::currency::Currency;
use crate::params::{BLOCK_MAJOR_VERSION_1, BLOCK_MAJOR_VERSION_2, BLOCK_MAJOR_VERSION_3};
use crate::{ConsensusError, ConsensusResult, Difficulty};

/// Block hashing collaborator.
///
/// Implementations must be deterministic. The slow proof-of-work hash lives
/// outside this crate.
pub trait BlockHasher: Send + Sync {
    /// Block identifier.
    fn block_hash(&self, block: &Block) -> ConsensusResult<Hash>;

    /// Proof-of-work ("long") hash.
    fn proof_of_work_hash(&self, block: &Block) -> ConsensusResult<Hash>;

    /// Header hash committed into the parent chain by a merge-mined block.
    fn aux_block_header_hash(&self, block: &Block) -> ConsensusResult<Hash>;
}

/// Whether `hash`, read as a little-endian 256-bit integer, meets `difficulty`.
///
/// Passes iff `hash * difficulty < 2^256`, i.e. `hash <= (2^256 - 1) / difficulty`
/// without the division.
pub fn check_hash(hash: &Hash, difficulty: Difficulty) -> bool {
    let value = BigUint::from_bytes_le(hash.as_bytes());
    value * difficulty < *hash_space()
}

/// `2^256`, computed once.
fn hash_space() -> &'static BigUint {
    static HASH_SPACE: OnceLock<BigUint> = OnceLock::new();
    HASH_SPACE.get_or_init(|| BigUint::one() << (HASH_SIZE * 8))
}

impl Currency {
    /// Check the proof of work of `block` against `difficulty`.
    ///
    /// `Ok(false)` means the block does not meet the target. A zero
    /// difficulty is the retarget failure sentinel and never passes.
    pub fn check_proof_of_work(
        &self,
        block: &Block,
        difficulty: Difficulty,
    ) -> ConsensusResult<bool> {
        match block.major_version() {
            BLOCK_MAJOR_VERSION_1 | BLOCK_MAJOR_VERSION_2 => {
                self.check_proof_of_work_v1(block, difficulty)
            }
            BLOCK_MAJOR_VERSION_3 => self.check_proof_of_work_v2(block, difficulty),
            major => {
                warn!(
                    major,
                    minor = block.minor_version(),
                    "Unknown block major version"
                );
                Err(ConsensusError::UnsupportedBlockVersion {
                    major,
                    minor: block.minor_version(),
                })
            }
        }
    }

    fn meets_difficulty(&self, block: &Block, difficulty: Difficulty) -> ConsensusResult<bool> {
        if difficulty == 0 {
            trace!("Zero difficulty never meets the target");
            return Ok(false);
        }
        let proof_of_work = self.hasher().proof_of_work_hash(block)?;
        let ok = check_hash(&proof_of_work, difficulty);
        trace!(%proof_of_work, difficulty, ok, "Proof of work checked");
        Ok(ok)
    }

    fn check_proof_of_work_v1(
        &self,
        block: &Block,
        difficulty: Difficulty,
    ) -> ConsensusResult<bool> {
        self.meets_difficulty(block, difficulty)
    }

    fn check_proof_of_work_v2(
        &self,
        block: &Block,
        difficulty: Difficulty,
    ) -> ConsensusResult<bool> {
        if block.major_version() <= self.params().merge_mining_bootstrap_version {
            trace!(
                major = block.major_version(),
                "Merge-mining bootstrap, proof of work not checked"
            );
            return Ok(true);
        }

        if !self.meets_difficulty(block, difficulty)? {
            return Ok(false);
        }

        let branch_depth = block.root_block.blockchain_branch.len();
        if branch_depth > HASH_SIZE * 8 {
            debug!(branch_depth, "Merge-mining branch too deep");
            return Ok(false);
        }

        if let Err(e) = self.hasher().aux_block_header_hash(block) {
            debug!(error = %e, "Cannot derive auxiliary block header hash");
            return Ok(false);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockHeader;
    use crate::test_helpers::{test_currency, test_currency_builder};

    fn block(major_version: u8) -> Block {
        Block {
            header: BlockHeader {
                major_version,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_check_hash_bounds() {
        let zero = Hash::zero();
        assert!(check_hash(&zero, u64::MAX));

        let max = Hash([0xff; 32]);
        assert!(check_hash(&max, 1));
        assert!(!check_hash(&max, 2));

        // 2^255 (top bit of the last little-endian byte) passes difficulty 1 only.
        let mut half = [0u8; 32];
        half[31] = 0x80;
        assert!(check_hash(&Hash(half), 1));
        assert!(!check_hash(&Hash(half), 2));

        // 2^255 - 1 still fits twice.
        let mut below_half = [0xff; 32];
        below_half[31] = 0x7f;
        assert!(check_hash(&Hash(below_half), 2));
    }

    #[test]
    fn test_check_hash_exact_boundary() {
        // (2^256 - 1) / 3 is 0x55 in every byte.
        let largest = Hash([0x55; 32]);
        assert!(check_hash(&largest, 3));

        let mut next = [0x55; 32];
        next[0] = 0x56;
        assert!(!check_hash(&Hash(next), 3));

        // The cached bound gives the same answer on repeated calls.
        assert!(check_hash(&largest, 3));
        assert!(!check_hash(&Hash(next), 3));
    }

    #[test]
    fn test_unsupported_version() {
        let currency = test_currency();
        for major in [0u8, 4, 200] {
            assert_eq!(
                currency.check_proof_of_work(&block(major), 1),
                Err(ConsensusError::UnsupportedBlockVersion { major, minor: 0 })
            );
        }
    }

    #[test]
    fn test_v1_difficulty_one_always_passes() {
        let currency = test_currency();
        assert!(currency.check_proof_of_work(&block(1), 1).unwrap());
        assert!(currency.check_proof_of_work(&block(2), 1).unwrap());
        assert!(!currency.check_proof_of_work(&block(1), 0).unwrap());
    }

    #[test]
    fn test_v3_bootstrap_grace() {
        let currency = test_currency();
        // Even an impossible difficulty passes during the grace period.
        assert!(currency.check_proof_of_work(&block(3), u64::MAX).unwrap());
    }

    #[test]
    fn test_v3_full_checks() {
        let currency = test_currency_builder()
            .merge_mining_bootstrap_version(0)
            .build()
            .unwrap();

        let mut merge_mined = block(3);
        assert!(currency.check_proof_of_work(&merge_mined, 1).unwrap());

        merge_mined.root_block.blockchain_branch = vec![Hash::zero(); 257];
        assert!(!currency.check_proof_of_work(&merge_mined, 1).unwrap());

        merge_mined.root_block.blockchain_branch.truncate(256);
        assert!(currency.check_proof_of_work(&merge_mined, 1).unwrap());
    }
}
