//! The field element type `Fp`, i.e. an integer in `[0, p)` (component C
//! groundwork).

use crate::errors::ModularError;
use crate::params;
use crate::residue;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use zeroize::Zeroize;

/// An element of the secp256k1 base field, always held reduced into `[0, p)`.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Fp(BigUint);

impl Fp {
    pub fn zero() -> Self {
        Fp(BigUint::zero())
    }

    /// Reduces `value` into `[0, p)`.
    pub fn new(value: BigUint) -> Self {
        Fp(residue::reduce(&value, &params::p()))
    }

    pub fn from_u64(v: u64) -> Self {
        Fp::new(BigUint::from(v))
    }

    /// Parses a fixed 32-byte big-endian encoding.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Fp::new(BigUint::from_bytes_be(bytes))
    }

    /// Serializes to a fixed 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_even(&self) -> bool {
        &self.0 % 2u32 == BigUint::zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn add(&self, other: &Fp) -> Fp {
        Fp(residue::add_mod(&self.0, &other.0, &params::p()))
    }

    pub fn sub(&self, other: &Fp) -> Fp {
        Fp(residue::sub_mod(&self.0, &other.0, &params::p()))
    }

    pub fn neg(&self) -> Fp {
        Fp(residue::neg_mod(&self.0, &params::p()))
    }

    pub fn mul(&self, other: &Fp) -> Fp {
        Fp(residue::mul_mod(&self.0, &other.0, &params::p()))
    }

    pub fn pow(&self, exp: &BigUint) -> Fp {
        Fp(residue::pow_mod(&self.0, exp, &params::p()))
    }

    /// `self^-1 mod p`. Returns `ModularError::NonInvertible` for zero.
    pub fn inverse(&self) -> Result<Fp, ModularError> {
        residue::inv_mod(&self.0, &params::p())
            .map(Fp)
            .ok_or_else(|| ModularError::NonInvertible(self.0.to_string(), params::p().to_string()))
    }

    /// `sqrt(self) mod p`, valid only because `p ≡ 3 (mod 4)` for secp256k1:
    /// the square root is `self^((p+1)/4) mod p` whenever one exists.
    pub fn sqrt(&self) -> Fp {
        let exp = (params::p() + BigUint::from(1u32)) / BigUint::from(4u32);
        self.pow(&exp)
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({:#x})", self.0)
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
