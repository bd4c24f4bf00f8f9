//! Wallet Import Format export/import (component I boundary, core half).

use crate::encoding::{base58_decode, base58check_encode, checksum};
use crate::errors::EncodingError;
use crate::scalar::Scalar;

const VERSION_WIF: u8 = 0x80;
const COMPRESSION_FLAG: u8 = 0x01;

/// Exports `d` as WIF: `0x80 || d(32 BE) || [0x01 if compressed]`, then a
/// 4-byte double-SHA-256 checksum, Base58-encoded. This is exactly what
/// [`base58check_encode`] already does to its input payload, so no separate
/// checksum step is applied on top.
pub fn wif_encode(d: &Scalar, compressed: bool) -> String {
    let mut payload = vec![VERSION_WIF];
    payload.extend(d.to_be_bytes());
    if compressed {
        payload.push(COMPRESSION_FLAG);
    }
    base58check_encode(&payload)
}

/// Imports a WIF string, returning the private key and whether it claims
/// compression. Only leading characters `5`, `K`, `L` are accepted.
pub fn wif_decode(encoded: &str) -> Result<(Scalar, bool), EncodingError> {
    match encoded.chars().next() {
        Some('5') | Some('K') | Some('L') => {}
        _ => return Err(EncodingError::InvalidWif),
    }

    let decoded = base58_decode(encoded)?;
    if decoded.len() < 4 {
        return Err(EncodingError::PayloadTooShort);
    }
    let (payload, trailing_checksum) = decoded.split_at(decoded.len() - 4);
    if trailing_checksum != checksum(payload) {
        return Err(EncodingError::ChecksumMismatch);
    }
    if payload.is_empty() || payload[0] != VERSION_WIF {
        return Err(EncodingError::InvalidWif);
    }

    let body = &payload[1..];
    let (key_bytes, compressed) = match body.len() {
        33 if body[32] == COMPRESSION_FLAG => (&body[..32], true),
        32 => (body, false),
        _ => return Err(EncodingError::InvalidWif),
    };

    let mut fixed = [0u8; 32];
    fixed.copy_from_slice(key_bytes);
    Ok((Scalar::from_be_bytes_reduced(&fixed), compressed))
}
