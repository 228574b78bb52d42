//! Binary transaction decoding and transaction extra fields.
//!
//! Covers the version 1 transaction layout: varint-prefixed vectors, tagged
//! inputs and outputs, the opaque `extra` blob and one signature list per
//! input. Only the decoding direction is needed here, to materialize the
//! hard-coded genesis coinbase.

use crate::block::{
    BaseInput, KeyImage, KeyInput, KeyOutput, MultisignatureInput, MultisignatureOutput,
    OutputTarget, PublicKey, Signature, Transaction, TransactionInput, TransactionOutput,
    HASH_SIZE,
};
use crate::{ConsensusError, ConsensusResult};

const TAG_BASE_INPUT: u8 = 0xff;
const TAG_KEY_INPUT: u8 = 0x02;
const TAG_MULTISIGNATURE_INPUT: u8 = 0x03;
const TAG_KEY_OUTPUT: u8 = 0x02;
const TAG_MULTISIGNATURE_OUTPUT: u8 = 0x03;

/// Extra field tag carrying the transaction public key.
pub const TX_EXTRA_TAG_PUBKEY: u8 = 0x01;
/// Extra field tag carrying an arbitrary nonce.
pub const TX_EXTRA_NONCE: u8 = 0x02;
/// Largest nonce that fits in one extra field.
pub const TX_EXTRA_NONCE_MAX_COUNT: usize = 255;

/// Upper bound on any decoded vector length, to refuse absurd allocations.
const MAX_VECTOR_LEN: u64 = 1 << 20;

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn byte(&mut self) -> ConsensusResult<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| eof("byte", self.pos))?;
        self.pos += 1;
        Ok(b)
    }

    fn bytes<const N: usize>(&mut self) -> ConsensusResult<[u8; N]> {
        let end = self.pos + N;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| eof("fixed-size field", self.pos))?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos = end;
        Ok(out)
    }

    fn varint(&mut self) -> ConsensusResult<u64> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.byte()?;
            if shift == 63 && b > 1 {
                return Err(ConsensusError::Deserialization(
                    "varint overflows 64 bits".to_string(),
                ));
            }
            value |= u64::from(b & 0x7f) << shift;
            if b & 0x80 == 0 {
                if b == 0 && shift > 0 {
                    return Err(ConsensusError::Deserialization(
                        "non-canonical varint".to_string(),
                    ));
                }
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(ConsensusError::Deserialization(
                    "varint too long".to_string(),
                ));
            }
        }
    }

    fn varint_u32(&mut self, what: &str) -> ConsensusResult<u32> {
        let v = self.varint()?;
        u32::try_from(v)
            .map_err(|_| ConsensusError::Deserialization(format!("{what} out of range: {v}")))
    }

    fn varint_u8(&mut self, what: &str) -> ConsensusResult<u8> {
        let v = self.varint()?;
        u8::try_from(v)
            .map_err(|_| ConsensusError::Deserialization(format!("{what} out of range: {v}")))
    }

    fn length(&mut self, what: &str) -> ConsensusResult<usize> {
        let len = self.varint()?;
        if len > MAX_VECTOR_LEN {
            return Err(ConsensusError::Deserialization(format!(
                "{what} length {len} too large"
            )));
        }
        Ok(len as usize)
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }
}

fn eof(what: &str, pos: usize) -> ConsensusError {
    ConsensusError::Deserialization(format!("unexpected end of data reading {what} at {pos}"))
}

fn read_input(r: &mut Reader<'_>) -> ConsensusResult<TransactionInput> {
    let tag = r.byte()?;
    let input = match tag {
        TAG_BASE_INPUT => TransactionInput::Base(BaseInput {
            block_index: r.varint_u32("block index")?,
        }),
        TAG_KEY_INPUT => {
            let amount = r.varint()?;
            let count = r.length("output indexes")?;
            let mut output_indexes = Vec::with_capacity(count);
            for _ in 0..count {
                output_indexes.push(r.varint_u32("output index")?);
            }
            let key_image = KeyImage(r.bytes::<HASH_SIZE>()?);
            TransactionInput::Key(KeyInput {
                amount,
                output_indexes,
                key_image,
            })
        }
        TAG_MULTISIGNATURE_INPUT => TransactionInput::Multisignature(MultisignatureInput {
            amount: r.varint()?,
            signature_count: r.varint_u8("signature count")?,
            output_index: r.varint_u32("output index")?,
            term: r.varint_u32("term")?,
        }),
        other => {
            return Err(ConsensusError::Deserialization(format!(
                "unknown input tag 0x{other:02x}"
            )))
        }
    };
    Ok(input)
}

fn read_output(r: &mut Reader<'_>) -> ConsensusResult<TransactionOutput> {
    let amount = r.varint()?;
    let tag = r.byte()?;
    let target = match tag {
        TAG_KEY_OUTPUT => OutputTarget::Key(KeyOutput {
            key: PublicKey(r.bytes::<HASH_SIZE>()?),
        }),
        TAG_MULTISIGNATURE_OUTPUT => {
            let count = r.length("multisignature keys")?;
            let mut keys = Vec::with_capacity(count);
            for _ in 0..count {
                keys.push(PublicKey(r.bytes::<HASH_SIZE>()?));
            }
            OutputTarget::Multisignature(MultisignatureOutput {
                keys,
                required_signature_count: r.varint_u8("required signature count")?,
                term: r.varint_u32("term")?,
            })
        }
        other => {
            return Err(ConsensusError::Deserialization(format!(
                "unknown output tag 0x{other:02x}"
            )))
        }
    };
    Ok(TransactionOutput { amount, target })
}

/// Decode a binary transaction blob.
///
/// The whole blob must be consumed.
pub fn decode_transaction(data: &[u8]) -> ConsensusResult<Transaction> {
    let mut r = Reader::new(data);

    let version = r.varint_u8("version")?;
    let unlock_time = r.varint()?;

    let input_count = r.length("inputs")?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        inputs.push(read_input(&mut r)?);
    }

    let output_count = r.length("outputs")?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        outputs.push(read_output(&mut r)?);
    }

    let extra_len = r.length("extra")?;
    let mut extra = Vec::with_capacity(extra_len);
    for _ in 0..extra_len {
        extra.push(r.byte()?);
    }

    let mut signatures = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let count = input.signature_count();
        let mut sigs = Vec::with_capacity(count);
        for _ in 0..count {
            sigs.push(Signature(r.bytes::<64>()?));
        }
        signatures.push(sigs);
    }

    if !r.is_empty() {
        return Err(ConsensusError::Deserialization(format!(
            "{} trailing bytes after transaction",
            data.len() - r.pos
        )));
    }

    Ok(Transaction {
        version,
        unlock_time,
        inputs,
        outputs,
        extra,
        signatures,
    })
}

/// Decode a hex-encoded transaction blob.
pub fn decode_transaction_hex(hex_blob: &str) -> ConsensusResult<Transaction> {
    let bytes = hex::decode(hex_blob)
        .map_err(|e| ConsensusError::Deserialization(format!("invalid hex: {e}")))?;
    decode_transaction(&bytes)
}

/// Append the transaction public key field to `extra`.
pub fn add_transaction_public_key_to_extra(extra: &mut Vec<u8>, key: &PublicKey) {
    extra.push(TX_EXTRA_TAG_PUBKEY);
    extra.extend_from_slice(key.as_bytes());
}

/// Append an extra-nonce field to `extra`.
pub fn add_extra_nonce_to_extra(extra: &mut Vec<u8>, nonce: &[u8]) -> ConsensusResult<()> {
    if nonce.len() > TX_EXTRA_NONCE_MAX_COUNT {
        return Err(ConsensusError::InvalidExtraNonce {
            size: nonce.len(),
            max: TX_EXTRA_NONCE_MAX_COUNT,
        });
    }
    extra.push(TX_EXTRA_NONCE);
    extra.push(nonce.len() as u8);
    extra.extend_from_slice(nonce);
    Ok(())
}

/// Find the transaction public key in `extra`, if it leads the blob.
pub fn transaction_public_key_from_extra(extra: &[u8]) -> Option<PublicKey> {
    match extra.split_first() {
        Some((&TX_EXTRA_TAG_PUBKEY, rest)) if rest.len() >= HASH_SIZE => {
            let mut key = [0u8; HASH_SIZE];
            key.copy_from_slice(&rest[..HASH_SIZE]);
            Some(PublicKey(key))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::GENESIS_COINBASE_TX_HEX;

    #[test]
    fn test_decode_genesis_coinbase() {
        let tx = decode_transaction_hex(GENESIS_COINBASE_TX_HEX).unwrap();

        assert_eq!(tx.version, 1);
        assert_eq!(tx.unlock_time, 10);
        assert_eq!(
            tx.inputs,
            vec![TransactionInput::Base(BaseInput { block_index: 0 })]
        );
        assert_eq!(tx.outputs.len(), 1);
        assert_eq!(tx.outputs[0].amount, 150_000_000);
        assert_eq!(tx.extra.len(), 33);
        assert_eq!(tx.signatures, vec![Vec::<Signature>::new()]);

        let key = transaction_public_key_from_extra(&tx.extra).unwrap();
        assert_eq!(
            key.to_string(),
            "677642503be486533f0aacb7ccce24a3d4931635fa700d62bf6b383cf26436e9"
        );
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let mut bytes = hex::decode(GENESIS_COINBASE_TX_HEX).unwrap();
        assert!(decode_transaction(&bytes[..bytes.len() - 1]).is_err());

        bytes.push(0);
        assert!(matches!(
            decode_transaction(&bytes),
            Err(ConsensusError::Deserialization(_))
        ));
    }

    #[test]
    fn test_decode_multisignature_deposit_input() {
        // version 1, unlock 0, one msig input (amount 1000, 1 sig, index 5, term 22000),
        // one key output of 900, empty extra, one signature.
        let mut blob = vec![0x01, 0x00, 0x01, 0x03];
        blob.extend_from_slice(&[0xe8, 0x07]); // 1000
        blob.push(0x01);
        blob.push(0x05);
        blob.extend_from_slice(&[0xf0, 0xab, 0x01]); // 22000
        blob.push(0x01);
        blob.extend_from_slice(&[0x84, 0x07]); // 900
        blob.push(0x02);
        blob.extend_from_slice(&[0xaa; 32]);
        blob.push(0x00);
        blob.extend_from_slice(&[0x11; 64]);

        let tx = decode_transaction(&blob).unwrap();
        assert_eq!(
            tx.inputs[0],
            TransactionInput::Multisignature(MultisignatureInput {
                amount: 1000,
                signature_count: 1,
                output_index: 5,
                term: 22_000,
            })
        );
        assert_eq!(tx.outputs[0].amount, 900);
        assert_eq!(tx.signatures[0].len(), 1);
    }

    #[test]
    fn test_unknown_input_tag() {
        let blob = [0x01, 0x00, 0x01, 0x7f];
        assert!(matches!(
            decode_transaction(&blob),
            Err(ConsensusError::Deserialization(_))
        ));
    }

    #[test]
    fn test_extra_nonce_limits() {
        let mut extra = Vec::new();
        add_extra_nonce_to_extra(&mut extra, &[7u8; 4]).unwrap();
        assert_eq!(extra, vec![TX_EXTRA_NONCE, 4, 7, 7, 7, 7]);

        let err = add_extra_nonce_to_extra(&mut extra, &[0u8; 256]).unwrap_err();
        assert_eq!(
            err,
            ConsensusError::InvalidExtraNonce {
                size: 256,
                max: TX_EXTRA_NONCE_MAX_COUNT
            }
        );
    }
}
