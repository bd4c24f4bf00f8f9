//! ECDSA signing, verification, and public-key recovery (component E).

use crate::codec::{RecoverableSignature, Signature};
use crate::curve::{self, Point};
use crate::encoding::double_sha256;
use crate::errors::EcdsaError;
use crate::field::Fp;
use crate::params;
use crate::scalar::Scalar;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

/// The big-endian integer value of `double_sha256(m)`, reduced mod n only
/// where a caller asks for a [`Scalar`] — here it is kept as the raw 32-byte
/// digest since both `r + n` overflow comparisons and the reduced value are
/// needed by different callers.
pub fn hash_to_int(message: &[u8]) -> [u8; 32] {
    double_sha256(message)
}

fn hash_to_scalar(message: &[u8]) -> Scalar {
    Scalar::from_be_bytes_reduced(&hash_to_int(message))
}

/// Signs `message` under private key `d`, looping until both `r` and `s`
/// are nonzero. Does not canonicalize to low-S; that is the codec's job at
/// serialization time.
pub fn sign<R: RngCore + CryptoRng>(d: &Scalar, message: &[u8], rng: &mut R) -> Signature {
    let e = hash_to_scalar(message);
    loop {
        let k = Scalar::random(rng);
        let point = curve::mul_scalar(&k, &curve::generator());
        let x = match &point {
            Point::Affine(x, _) => x,
            Point::Identity => continue,
        };
        let r = Scalar::new(x.as_biguint().clone());
        if r.is_zero() {
            continue;
        }
        let k_inv = match k.inverse() {
            Ok(inv) => inv,
            Err(_) => continue,
        };
        let s = k_inv.mul(&e.add(&r.mul(d)));
        if s.is_zero() {
            continue;
        }
        return Signature { r, s };
    }
}

/// Signs `message` under private key `d`, additionally recording a 2-bit
/// recovery id: bit 0 is the parity of `kG`'s y-coordinate, bit 1 is set
/// when `kG`'s x-coordinate overflowed `n` (so the true x is `r + n`). Per
/// the redesigned recovery-id scheme, both bits are set independently
/// rather than discarding overflowing `k` draws.
pub fn sign_recoverable<R: RngCore + CryptoRng>(d: &Scalar, message: &[u8], rng: &mut R) -> RecoverableSignature {
    let e = hash_to_scalar(message);
    loop {
        let k = Scalar::random(rng);
        let point = curve::mul_scalar(&k, &curve::generator());
        let (x, y) = match &point {
            Point::Affine(x, y) => (x, y),
            Point::Identity => continue,
        };
        let r = Scalar::new(x.as_biguint().clone());
        if r.is_zero() {
            continue;
        }
        let k_inv = match k.inverse() {
            Ok(inv) => inv,
            Err(_) => continue,
        };
        let s = k_inv.mul(&e.add(&r.mul(d)));
        if s.is_zero() {
            continue;
        }
        let overflow_bit = if Scalar::overflowed(x.as_biguint()) { 2 } else { 0 };
        let parity_bit = if y.is_even() { 0 } else { 1 };
        return RecoverableSignature {
            recovery_id: overflow_bit | parity_bit,
            r,
            s,
        };
    }
}

/// Verifies `(r, s)` against public key `q` and `message`. Returns
/// `Err(EcdsaError::OutOfRange)` only for the structural failure of `r`/`s`
/// falling outside `[1, n)`; an otherwise well-formed signature that simply
/// doesn't match is an ordinary `Ok(false)` reject, not an error —
/// verification never raises on ordinary cryptographic failure.
pub fn verify(q: &Point, message: &[u8], sig: &Signature) -> Result<bool, EcdsaError> {
    let n = params::n();
    if sig.r.is_zero() || sig.r.as_biguint() >= &n || sig.s.is_zero() || sig.s.as_biguint() >= &n {
        return Err(EcdsaError::OutOfRange);
    }
    let e = hash_to_scalar(message);
    let w = sig.s.inverse().map_err(|_| EcdsaError::OutOfRange)?;
    let u1 = w.mul(&e);
    let u2 = w.mul(&sig.r);

    let point = curve::add(&curve::mul_scalar(&u1, &curve::generator()), &curve::mul_scalar(&u2, q));
    match point {
        Point::Identity => Ok(false),
        Point::Affine(x, _) => {
            let x_mod_n = Scalar::new(x.as_biguint().clone());
            Ok(x_mod_n == sig.r)
        }
    }
}

/// Recovers the public key implied by a recoverable signature over
/// `message`. The caller is expected to confirm the result by re-running
/// [`verify`].
pub fn recover_public_key(sig: &RecoverableSignature, message: &[u8]) -> Point {
    let n = params::n();
    let x_value = if sig.recovery_id >= 2 {
        sig.r.as_biguint() + &n
    } else {
        sig.r.as_biguint().clone()
    };
    let x = Fp::new(x_value);
    let y_squared = x.mul(&x).mul(&x).add(&Fp::new(params::b()));
    let mut y = y_squared.sqrt();
    // recovery_id & 1 is the target parity of y (y mod 2); flip if mismatched.
    if u8::from(!y.is_even()) != (sig.recovery_id & 1) {
        y = y.neg();
    }
    let r_point = Point::Affine(x, y);

    let e = hash_to_scalar(message);
    let r_inv = sig.r.inverse().expect("recoverable signature has nonzero r");
    let s_r = curve::mul_scalar(&sig.s, &r_point);
    let e_g = curve::mul_scalar(&e, &curve::generator());
    let diff = curve::add(&s_r, &curve::neg(&e_g));
    curve::mul_scalar(&r_inv, &diff)
}

/// Verifies a Bitcoin "signed message" Base64 compact signature against a
/// claimed P2PKH `address`: decodes the compact signature, recovers the
/// signer's public key from `plain_text`, and accepts only if that key's
/// address matches `address` *and* the recovered key verifies the
/// recoverable signature's plain `(r, s)`. Structural decoding failures
/// (bad Base64, malformed compact layout) raise; an address mismatch or a
/// failing `verify` is an ordinary `Ok(false)` reject.
pub fn verify_message(address: &str, plain_text: &str, compact_signature_b64: &str) -> Result<bool, EcdsaError> {
    let compact = base64::decode(compact_signature_b64).map_err(|_| EcdsaError::Codec(crate::errors::CodecError::InvalidBase64))?;
    let (recoverable, _compressed) = crate::codec::deserialize_compact(&compact)?;
    let digest = crate::digest::message_bytes(plain_text);
    let recovered_q = recover_public_key(&recoverable, &digest);
    if crate::address::p2pkh_address(&recovered_q) != address {
        return Ok(false);
    }
    let plain = Signature {
        r: recoverable.r,
        s: recoverable.s,
    };
    verify(&recovered_q, &digest, &plain)
}
