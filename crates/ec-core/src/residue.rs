//! Internal helpers shared by [`crate::field::Fp`] and [`crate::scalar::Scalar`]:
//! both are "an integer reduced modulo a fixed 256-bit prime", so the actual
//! arithmetic lives here once instead of being duplicated per type.

use crate::modular;
use num_bigint::BigUint;
use num_traits::Zero;

pub fn reduce(a: &BigUint, m: &BigUint) -> BigUint {
    a % m
}

pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        (a - b) % m
    } else {
        (m - (b - a)) % m
    }
}

pub fn neg_mod(a: &BigUint, m: &BigUint) -> BigUint {
    if a.is_zero() {
        BigUint::zero()
    } else {
        m - a
    }
}

pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

pub fn pow_mod(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

/// `a^-1 mod m`, assuming `gcd(a, m) == 1`.
pub fn inv_mod(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    modular::inverse_mod(a, m).ok()
}
