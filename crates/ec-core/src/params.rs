//! secp256k1 domain parameters (component C).
//!
//! `p`, `n`, and `G` are fixed 256-bit constants; nothing here depends on
//! randomness or caller input.

use num_bigint::BigUint;

fn from_hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hard-coded secp256k1 constant")
}

/// The field characteristic: `p = 2^256 - 2^32 - 977`.
pub fn p() -> BigUint {
    from_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
}

/// The curve order `n`.
pub fn n() -> BigUint {
    from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
}

/// The curve equation coefficient `a` (always zero for secp256k1).
pub fn a() -> BigUint {
    BigUint::from(0u32)
}

/// The curve equation coefficient `b` (always seven for secp256k1).
pub fn b() -> BigUint {
    BigUint::from(7u32)
}

/// The generator point's x-coordinate.
pub fn gx() -> BigUint {
    from_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
}

/// The generator point's y-coordinate.
pub fn gy() -> BigUint {
    from_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
}

/// The cofactor, always 1 for secp256k1.
pub const H: u32 = 1;
