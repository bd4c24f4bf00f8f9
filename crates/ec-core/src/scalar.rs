//! The scalar type `Fn`, i.e. an integer in `[0, n)` where `n` is the curve
//! order (component C groundwork). Polynomial
//! coefficients, shares, ephemeral `k`, private keys, and signature
//! components `r, s` are all represented with this type.

use crate::errors::ModularError;
use crate::params;
use crate::residue;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroize;

/// An element of `[0, n)`.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    pub fn one() -> Self {
        Scalar(BigUint::from(1u32))
    }

    /// Reduces `value` into `[0, n)`.
    pub fn new(value: BigUint) -> Self {
        Scalar(residue::reduce(&value, &params::n()))
    }

    pub fn from_u64(v: u64) -> Self {
        Scalar::new(BigUint::from(v))
    }

    /// Parses a fixed 32-byte big-endian encoding, reducing mod n. Used for
    /// `hash_to_int`, which treats a 256-bit hash as an integer that may
    /// exceed n.
    pub fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Scalar::new(BigUint::from_bytes_be(bytes))
    }

    /// Serializes to a fixed 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Draws a scalar uniformly at random from `[1, n)` by rejection
    /// sampling 32-byte draws against `n`. Used for ECDSA's ephemeral `k`
    /// and polynomial coefficients alike (every coefficient is drawn from
    /// `[1, n)` and never 0).
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let modulus = params::n();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let candidate = BigUint::from_bytes_be(&bytes);
            if !candidate.is_zero() && candidate < modulus {
                return Scalar(candidate);
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the integer value (before any reduction) was `>= n`, used
    /// to decide the recovery-id's x-overflow bit.
    pub fn overflowed(candidate: &BigUint) -> bool {
        candidate >= &params::n()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        Scalar(residue::add_mod(&self.0, &other.0, &params::n()))
    }

    pub fn sub(&self, other: &Scalar) -> Scalar {
        Scalar(residue::sub_mod(&self.0, &other.0, &params::n()))
    }

    pub fn neg(&self) -> Scalar {
        Scalar(residue::neg_mod(&self.0, &params::n()))
    }

    pub fn mul(&self, other: &Scalar) -> Scalar {
        Scalar(residue::mul_mod(&self.0, &other.0, &params::n()))
    }

    /// `self^-1 mod n`. Returns `ModularError::NonInvertible` for zero.
    pub fn inverse(&self) -> Result<Scalar, ModularError> {
        residue::inv_mod(&self.0, &params::n())
            .map(Scalar)
            .ok_or_else(|| ModularError::NonInvertible(self.0.to_string(), params::n().to_string()))
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({:#x})", self.0)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn random_is_in_range() {
        let mut rng = OsRng;
        for _ in 0..50 {
            let s = Scalar::random(&mut rng);
            assert!(!s.is_zero());
            assert!(s.as_biguint() < &params::n());
        }
    }

    #[test]
    fn inverse_identity() {
        let x = Scalar::from_u64(7);
        let inv = x.inverse().unwrap();
        assert_eq!(x.mul(&inv), Scalar::one());
    }
}
