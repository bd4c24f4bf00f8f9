//! Hashing and Base58(Check) encoding (component A).

use crate::errors::EncodingError;

pub fn sha256(payload: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn double_sha256(payload: &[u8]) -> [u8; 32] {
    sha256(&sha256(payload))
}

/// The first 4 bytes of `double_sha256(payload)`, used as a Base58Check
/// checksum.
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let hash = double_sha256(payload);
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// `RIPEMD160(SHA256(payload))`, as used for public-key hashes.
pub fn hash160(payload: &[u8]) -> [u8; 20] {
    use ripemd160::{Digest, Ripemd160};
    let sha = sha256(payload);
    let mut hasher = Ripemd160::new();
    hasher.update(&sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hasher.finalize());
    out
}

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub fn base58_encode(payload: &[u8]) -> String {
    let zeros = payload.iter().take_while(|&&b| b == 0).count();

    // Treat the remainder as a big-endian unsigned integer and repeatedly
    // divide by 58, emitting digits least-significant first.
    let mut digits: Vec<u8> = vec![0];
    for &byte in payload {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(digits.iter().rev().map(|&d| BASE58_ALPHABET[d as usize] as char));
    out
}

pub fn base58_decode(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    let zeros = encoded.chars().take_while(|&c| c == '1').count();

    let mut bytes: Vec<u8> = vec![0];
    for c in encoded.chars() {
        let digit = BASE58_ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(EncodingError::InvalidEncoding(c))? as u32;
        let mut carry = digit;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev().skip_while(|&&b| b == 0).cloned());
    Ok(out)
}

pub fn base58check_encode(payload: &[u8]) -> String {
    let mut full = payload.to_vec();
    full.extend_from_slice(&checksum(payload));
    base58_encode(&full)
}

pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    let decoded = base58_decode(encoded)?;
    if decoded.len() < 4 {
        return Err(EncodingError::PayloadTooShort);
    }
    let (payload, decoded_checksum) = decoded.split_at(decoded.len() - 4);
    if decoded_checksum != checksum(payload) {
        return Err(EncodingError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
