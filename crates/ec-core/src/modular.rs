//! Extended Euclidean GCD and modular multiplicative inverse (component B).
//!
//! This is the one place in the crate that works with signed big integers;
//! every other module deals exclusively in non-negative residues.

use crate::errors::ModularError;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};

/// Returns `(g, x, y)` such that `a*x + b*y = g = gcd(a, b)`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::from(1), BigInt::from(0));
    let (mut old_t, mut t) = (BigInt::from(0), BigInt::from(1));

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let new_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, new_s);
        let new_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, new_t);
    }
    (old_r, old_s, old_t)
}

/// Returns the modular multiplicative inverse of `a` mod `m`, normalized
/// into `[0, m)`. Callers must guarantee `gcd(a, m) == 1`; otherwise this
/// returns `ModularError::NonInvertible`.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, ModularError> {
    let a_signed = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());
    let (g, mut x, _) = extended_gcd(&a_signed, &m_signed);
    if g != BigInt::from(1) && g != BigInt::from(-1) {
        return Err(ModularError::NonInvertible(a.to_string(), m.to_string()));
    }
    if g.is_negative() {
        x = -x;
    }
    x %= &m_signed;
    if x.is_negative() {
        x += &m_signed;
    }
    Ok(x.to_biguint().expect("normalized into [0, m)"))
}
