//! Message and transaction digest assembly (component G).
//!
//! This module owns the pure byte-string algorithms needed to feed a
//! message or a transaction input through ECDSA: varint encoding, the
//! Bitcoin "Signed Message" framing, and the BIP-143 per-input preimage.
//! Script-building, transaction record types, and the loop that drives one
//! `bip143_preimage` call per input live at the boundary (`tss-demo`), since
//! they carry no cryptographic content of their own.

use crate::encoding::double_sha256;
use crate::errors::DigestError;

/// `SIGHASH_ALL | SIGHASH_FORKID`, the only sighash type this crate signs.
pub const SIGHASH_ALL_FORKID: u32 = 0x41;

/// Bitcoin's CompactSize varint: values below `0xfd` encode as a single
/// byte; larger values are prefixed with `0xfd`/`0xfe`/`0xff` and a
/// little-endian field of the matching width.
pub fn encode_varint(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value <= 0xffff {
        let mut out = vec![0xfd];
        out.extend(&(value as u16).to_le_bytes());
        out
    } else if value <= 0xffff_ffff {
        let mut out = vec![0xfe];
        out.extend(&(value as u32).to_le_bytes());
        out
    } else {
        let mut out = vec![0xff];
        out.extend(&value.to_le_bytes());
        out
    }
}

const SIGNED_MESSAGE_PREFIX: &[u8] = b"Bitcoin Signed Message:\n";

/// Assembles the byte string that is actually hashed and signed for a
/// Bitcoin "Signed Message": `varint(len(prefix)) || prefix ||
/// varint(len(msg)) || msg`.
pub fn message_bytes(message: &str) -> Vec<u8> {
    let msg_bytes = message.as_bytes();
    let mut out = encode_varint(SIGNED_MESSAGE_PREFIX.len() as u64);
    out.extend(SIGNED_MESSAGE_PREFIX);
    out.extend(encode_varint(msg_bytes.len() as u64));
    out.extend(msg_bytes);
    out
}

/// The full per-input fields needed to assemble a BIP-143 preimage. Callers
/// (the transaction-digest driver at the boundary) are responsible for
/// deriving `prevouts_hash` and `sequences_hash` once per transaction and
/// `outputs_hash` from the serialized output set, and for building
/// `script_code` (the P2PKH locking script of the output being spent).
pub struct Bip143Input<'a> {
    pub version: u32,
    pub prevouts_hash: [u8; 32],
    pub sequences_hash: [u8; 32],
    pub outpoint_txid: [u8; 32],
    pub outpoint_index: u32,
    pub script_code: &'a [u8],
    pub value: u64,
    pub sequence: u32,
    pub outputs_hash: [u8; 32],
    pub locktime: u32,
    pub sighash: u32,
}

/// Builds the BIP-143 preimage for a single input. Only `SIGHASH_ALL_FORKID`
/// is supported; any other sighash type is rejected.
pub fn bip143_preimage(input: &Bip143Input) -> Result<Vec<u8>, DigestError> {
    if input.sighash != SIGHASH_ALL_FORKID {
        return Err(DigestError::UnsupportedSighash(input.sighash));
    }

    let mut out = Vec::new();
    out.extend(&input.version.to_le_bytes());
    out.extend(&input.prevouts_hash);
    out.extend(&input.sequences_hash);
    out.extend(&input.outpoint_txid);
    out.extend(&input.outpoint_index.to_le_bytes());
    out.extend(encode_varint(input.script_code.len() as u64));
    out.extend(input.script_code);
    out.extend(&input.value.to_le_bytes());
    out.extend(&input.sequence.to_le_bytes());
    out.extend(&input.outputs_hash);
    out.extend(&input.locktime.to_le_bytes());
    out.extend(&input.sighash.to_le_bytes());
    Ok(out)
}

/// `double_sha256` of a BIP-143 preimage, i.e. the sighash `z` itself.
/// Signing callers should pass [`bip143_preimage`]'s bytes to `sign`/
/// `sign_recoverable` directly rather than this digest — those already
/// apply `hash_to_int`'s own `double_sha256`, so hashing here first would
/// hash the preimage twice over. This is exposed for callers that just
/// want to display or compare the raw sighash.
pub fn bip143_digest(input: &Bip143Input) -> Result<[u8; 32], DigestError> {
    Ok(double_sha256(&bip143_preimage(input)?))
}
