//! Signature and public-key encodings (component D): strict DER (BIP-66),
//! the compact recoverable format, and compressed/uncompressed public keys.

use crate::curve::Point;
use crate::errors::CodecError;
use crate::field::Fp;
use crate::scalar::Scalar;

/// A plain ECDSA signature `(r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: Scalar,
    pub s: Scalar,
}

/// A recoverable ECDSA signature `(recovery_id, r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub recovery_id: u8,
    pub r: Scalar,
    pub s: Scalar,
}

fn strip_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let mut i = 0;
    while i < bytes.len() - 1 && bytes[i] == 0 {
        i += 1;
    }
    bytes[i..].to_vec()
}

fn der_integer(value_be: &[u8; 32]) -> Vec<u8> {
    let mut magnitude = strip_leading_zeros(value_be);
    if magnitude[0] & 0x80 != 0 {
        magnitude.insert(0, 0x00);
    }
    let mut out = vec![0x02, magnitude.len() as u8];
    out.extend(magnitude);
    out
}

/// Serializes `(r, s)` to strict DER, canonicalizing `s` to low-S
/// (`s <= n/2`, BIP-62) as a responsibility of the codec, never of `sign`.
pub fn serialize_der(sig: &Signature) -> Vec<u8> {
    let n = crate::params::n();
    let half_n = &n / 2u32;
    let s = if sig.s.as_biguint() > &half_n {
        Scalar::new(&n - sig.s.as_biguint())
    } else {
        sig.s.clone()
    };

    let mut content = der_integer(&sig.r.to_be_bytes());
    content.extend(der_integer(&s.to_be_bytes()));

    let mut out = vec![0x30, content.len() as u8];
    out.extend(content);
    out
}

/// Parses a strict DER signature, failing on any deviation from the
/// exact layout.
pub fn deserialize_der(bytes: &[u8]) -> Result<Signature, CodecError> {
    let parse = || -> Option<Signature> {
        if bytes.len() < 2 || bytes[0] != 0x30 {
            return None;
        }
        let total_len = bytes[1] as usize;
        if total_len != bytes.len() - 2 {
            return None;
        }
        let content = &bytes[2..];

        if content.is_empty() || content[0] != 0x02 {
            return None;
        }
        let r_len = content[1] as usize;
        if content.len() < 2 + r_len {
            return None;
        }
        let r_bytes = &content[2..2 + r_len];

        let rest = &content[2 + r_len..];
        if rest.is_empty() || rest[0] != 0x02 {
            return None;
        }
        let s_len = rest[1] as usize;
        if rest.len() != 2 + s_len {
            return None;
        }
        let s_bytes = &rest[2..2 + s_len];

        if r_bytes.is_empty() || s_bytes.is_empty() {
            return None;
        }

        Some(Signature {
            r: Scalar::from_be_bytes_reduced(&pad_to_32(r_bytes)?),
            s: Scalar::from_be_bytes_reduced(&pad_to_32(s_bytes)?),
        })
    };
    parse().ok_or(CodecError::InvalidDer)
}

/// Strips the single leading `0x00` padding byte `der_integer` prepends
/// whenever a magnitude's top bit is set, then pads the remainder into a
/// fixed 32-byte big-endian field. A 33-byte magnitude whose padding byte
/// wasn't actually required (the following byte's top bit is clear) is
/// rejected as non-minimal DER.
fn pad_to_32(bytes: &[u8]) -> Option<[u8; 32]> {
    let bytes = if bytes.len() == 33 {
        if bytes[0] != 0x00 || bytes[1] & 0x80 == 0 {
            return None;
        }
        &bytes[1..]
    } else {
        bytes
    };
    if bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}

/// Serializes a recoverable signature to the 65-byte compact format:
/// `(27 + recovery_id + [4 if compressed]) || r(32 BE) || s(32 BE)`.
pub fn serialize_compact(sig: &RecoverableSignature, compressed: bool) -> Vec<u8> {
    let prefix = 27 + sig.recovery_id + if compressed { 4 } else { 0 };
    let mut out = vec![prefix];
    out.extend(sig.r.to_be_bytes());
    out.extend(sig.s.to_be_bytes());
    out
}

/// Parses the 65-byte compact format, returning the signature, its
/// recovery id, and whether it claims a compressed public key.
pub fn deserialize_compact(bytes: &[u8]) -> Result<(RecoverableSignature, bool), CodecError> {
    if bytes.len() != 65 {
        return Err(CodecError::InvalidCompactLength(bytes.len()));
    }
    let mut prefix = bytes[0];
    if !(27..=34).contains(&prefix) {
        return Err(CodecError::InvalidCompactPrefix(prefix));
    }
    let compressed = prefix >= 31;
    if compressed {
        prefix -= 4;
    }
    let recovery_id = prefix - 27;

    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&bytes[1..33]);
    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&bytes[33..65]);

    Ok((
        RecoverableSignature {
            recovery_id,
            r: Scalar::from_be_bytes_reduced(&r_bytes),
            s: Scalar::from_be_bytes_reduced(&s_bytes),
        },
        compressed,
    ))
}

/// Serializes a public key: `02|03 || x` (compressed, 33 bytes) or
/// `04 || x || y` (uncompressed, 65 bytes).
pub fn serialize_public_key(point: &Point, compressed: bool) -> Vec<u8> {
    match point {
        Point::Identity => panic!("cannot serialize the point at infinity as a public key"),
        Point::Affine(x, y) => {
            if compressed {
                let mut out = vec![if y.is_even() { 0x02 } else { 0x03 }];
                out.extend(x.to_be_bytes());
                out
            } else {
                let mut out = vec![0x04];
                out.extend(x.to_be_bytes());
                out.extend(y.to_be_bytes());
                out
            }
        }
    }
}

/// Parses a compressed or uncompressed public key back into a curve point,
/// recomputing and validating `y` for the compressed case.
pub fn deserialize_public_key(bytes: &[u8]) -> Result<Point, CodecError> {
    match bytes.len() {
        33 => {
            if bytes[0] != 0x02 && bytes[0] != 0x03 {
                return Err(CodecError::InvalidPublicKeyLength(bytes.len()));
            }
            let mut x_bytes = [0u8; 32];
            x_bytes.copy_from_slice(&bytes[1..33]);
            let x = Fp::from_be_bytes(&x_bytes);
            let y_squared = x.mul(&x).mul(&x).add(&Fp::new(crate::params::b()));
            let mut y = y_squared.sqrt();
            let want_even = bytes[0] == 0x02;
            if y.is_even() != want_even {
                y = y.neg();
            }
            let point = Point::Affine(x, y);
            if !crate::curve::on_curve(&point) {
                return Err(CodecError::PointNotOnCurve);
            }
            Ok(point)
        }
        65 => {
            if bytes[0] != 0x04 {
                return Err(CodecError::InvalidPublicKeyLength(bytes.len()));
            }
            let mut x_bytes = [0u8; 32];
            x_bytes.copy_from_slice(&bytes[1..33]);
            let mut y_bytes = [0u8; 32];
            y_bytes.copy_from_slice(&bytes[33..65]);
            let point = Point::Affine(Fp::from_be_bytes(&x_bytes), Fp::from_be_bytes(&y_bytes));
            if !crate::curve::on_curve(&point) {
                return Err(CodecError::PointNotOnCurve);
            }
            Ok(point)
        }
        other => Err(CodecError::InvalidPublicKeyLength(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn der_roundtrip_low_s() {
        let sig = Signature {
            r: Scalar::from_u64(12345),
            s: Scalar::from_u64(67890),
        };
        let der = serialize_der(&sig);
        let decoded = deserialize_der(&der).unwrap();
        assert_eq!(decoded, sig);
    }

    #[test]
    fn der_roundtrip_high_bit_r_requires_padding_byte() {
        // r's top bit set (>= 2^255) forces der_integer to prepend 0x00,
        // producing a 33-byte DER INTEGER magnitude.
        let n = crate::params::n();
        let high_r = Scalar::new(&n - Scalar::from_u64(1).as_biguint());
        let sig = Signature {
            r: high_r.clone(),
            s: Scalar::from_u64(42),
        };
        let der = serialize_der(&sig);
        // 0x30 len 0x02 0x21 0x00 <32 bytes r> 0x02 len <s>
        assert_eq!(der[3], 0x21);
        assert_eq!(der[4], 0x00);
        let decoded = deserialize_der(&der).unwrap();
        assert_eq!(decoded.r, high_r);
        assert_eq!(decoded.s, Scalar::from_u64(42));
    }

    #[test]
    fn der_rejects_non_minimal_padding() {
        // A leading 0x00 is only valid DER when the following byte's top
        // bit is set; here it is not, so the padding is non-minimal.
        let mut magnitude = vec![0x00];
        magnitude.extend(&[0x01; 32]);
        let mut content = vec![0x02, magnitude.len() as u8];
        content.extend(&magnitude);
        content.extend(der_integer(&Scalar::from_u64(1).to_be_bytes()));
        let mut der = vec![0x30, content.len() as u8];
        der.extend(content);
        assert!(deserialize_der(&der).is_err());
    }

    #[test]
    fn der_canonicalizes_high_s() {
        let n = crate::params::n();
        let high_s = Scalar::new(&n - Scalar::from_u64(1).as_biguint());
        let sig = Signature {
            r: Scalar::from_u64(1),
            s: high_s.clone(),
        };
        let der = serialize_der(&sig);
        let decoded = deserialize_der(&der).unwrap();
        // s' = n - s when s > n/2
        assert_eq!(decoded.s, Scalar::new(&n - high_s.as_biguint()));
    }

    #[test]
    fn der_rejects_garbage() {
        assert!(deserialize_der(&[0x30, 0x02, 0x02, 0x00]).is_err());
    }

    #[test]
    fn compact_roundtrip() {
        let sig = RecoverableSignature {
            recovery_id: 3,
            r: Scalar::from_u64(1),
            s: Scalar::from_u64(2),
        };
        let bytes = serialize_compact(&sig, true);
        assert_eq!(bytes.len(), 65);
        let (decoded, compressed) = deserialize_compact(&bytes).unwrap();
        assert_eq!(decoded, sig);
        assert!(compressed);
    }

    #[test]
    fn compact_rejects_wrong_length() {
        assert!(deserialize_compact(&[0u8; 10]).is_err());
    }

    #[test]
    fn public_key_roundtrip() {
        let point = crate::curve::mul_scalar(&Scalar::from_u64(42), &crate::curve::generator());
        let compressed = serialize_public_key(&point, true);
        assert_eq!(deserialize_public_key(&compressed).unwrap(), point);
        let uncompressed = serialize_public_key(&point, false);
        assert_eq!(deserialize_public_key(&uncompressed).unwrap(), point);
    }

    proptest::proptest! {
        /// DER serialization always canonicalizes to low-S regardless of
        /// ephemeral k, and deserializing it recovers that canonical s'.
        #[test]
        fn prop_der_roundtrip_is_always_low_s(r in 1u64..1_000_000, s in 1u64..1_000_000) {
            let n = crate::params::n();
            let half_n = &n / 2u32;
            let sig = Signature {
                r: Scalar::from_u64(r),
                s: Scalar::from_u64(s),
            };
            let expected_s = if sig.s.as_biguint() > &half_n {
                Scalar::new(&n - sig.s.as_biguint())
            } else {
                sig.s.clone()
            };
            let der = serialize_der(&sig);
            let decoded = deserialize_der(&der).unwrap();
            proptest::prop_assert_eq!(decoded.r, sig.r);
            proptest::prop_assert_eq!(&decoded.s, &expected_s);
            proptest::prop_assert!(decoded.s.as_biguint() <= &half_n);
        }
    }
}
