//! secp256k1 point arithmetic (component C).
//!
//! `Point` is a tagged representation — `Identity` or `Affine(x, y)` — never
//! a null sentinel, avoiding a class of null-handling bugs in the group
//! law.

use crate::field::Fp;
use crate::params;
use crate::scalar::Scalar;
use num_bigint::BigUint;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub enum Point {
    Identity,
    Affine(Fp, Fp),
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "Point::Identity"),
            Point::Affine(x, y) => write!(f, "Point({:#x}, {:#x})", x.as_biguint(), y.as_biguint()),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Identity => write!(f, "infinity"),
            Point::Affine(x, y) => write!(f, "({:#x}, {:#x})", x.as_biguint(), y.as_biguint()),
        }
    }
}

/// The curve generator `G`.
pub fn generator() -> Point {
    Point::Affine(Fp::new(params::gx()), Fp::new(params::gy()))
}

/// `true` for the identity; otherwise checks `y^2 == x^3 + 7 (mod p)`.
pub fn on_curve(point: &Point) -> bool {
    match point {
        Point::Identity => true,
        Point::Affine(x, y) => {
            let lhs = y.mul(y);
            let rhs = x.mul(x).mul(x).add(&Fp::new(params::b()));
            lhs == rhs
        }
    }
}

/// `-point`.
pub fn neg(point: &Point) -> Point {
    debug_assert!(on_curve(point));
    match point {
        Point::Identity => Point::Identity,
        Point::Affine(x, y) => Point::Affine(x.clone(), y.neg()),
    }
}

/// The group law: `p + q`.
pub fn add(p: &Point, q: &Point) -> Point {
    debug_assert!(on_curve(p));
    debug_assert!(on_curve(q));

    let (p_x, p_y) = match p {
        Point::Identity => return q.clone(),
        Point::Affine(x, y) => (x, y),
    };
    let (q_x, q_y) = match q {
        Point::Identity => return p.clone(),
        Point::Affine(x, y) => (x, y),
    };

    if *p == neg(q) {
        return Point::Identity;
    }

    let m = if p == q {
        let numerator = p_x.mul(p_x).mul(&Fp::from_u64(3));
        let denominator = p_y.mul(&Fp::from_u64(2));
        numerator.mul(&denominator.inverse().expect("on-curve point has y != 0 unless P = -P, handled above"))
    } else {
        let numerator = p_y.sub(q_y);
        let denominator = p_x.sub(q_x);
        numerator.mul(&denominator.inverse().expect("p != q and p != -q implies x1 != x2"))
    };

    let x3 = m.mul(&m).sub(p_x).sub(q_x);
    let y3 = m.mul(&p_x.sub(&x3)).sub(p_y);
    let result = Point::Affine(x3, y3);
    debug_assert!(on_curve(&result));
    result
}

/// Double-and-add scalar multiplication `k * point`, over the bits of `k`
/// from LSB to MSB.
pub fn scalar_mul(k: &BigUint, point: &Point) -> Point {
    debug_assert!(on_curve(point));
    let n = params::n();
    let k_mod_n = k % &n;
    if k_mod_n == BigUint::from(0u32) || *point == Point::Identity {
        return Point::Identity;
    }

    let mut result = Point::Identity;
    let mut addend = point.clone();
    let mut remaining = k_mod_n;
    let zero = BigUint::from(0u32);
    let two = BigUint::from(2u32);
    while remaining > zero {
        if &remaining % &two == BigUint::from(1u32) {
            result = add(&result, &addend);
        }
        addend = add(&addend, &addend);
        remaining /= &two;
    }
    debug_assert!(on_curve(&result));
    result
}

/// Scalar multiplication by a reduced [`Scalar`], the common case used
/// throughout ECDSA and the threshold protocol.
pub fn mul_scalar(k: &Scalar, point: &Point) -> Point {
    scalar_mul(k.as_biguint(), point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        assert!(on_curve(&generator()));
    }

    #[test]
    fn add_identity() {
        let g = generator();
        assert_eq!(add(&g, &Point::Identity), g);
        assert_eq!(add(&Point::Identity, &g), g);
    }

    #[test]
    fn add_negation_is_identity() {
        let g = generator();
        assert_eq!(add(&g, &neg(&g)), Point::Identity);
    }

    #[test]
    fn add_is_commutative() {
        let g = generator();
        let two_g = scalar_mul(&BigUint::from(2u32), &g);
        assert_eq!(add(&g, &two_g), add(&two_g, &g));
    }

    #[test]
    fn scalar_mul_zero_is_identity() {
        assert_eq!(scalar_mul(&BigUint::from(0u32), &generator()), Point::Identity);
    }

    #[test]
    fn scalar_mul_reduces_mod_n() {
        let g = generator();
        let k = BigUint::from(5u32);
        let k_plus_n = &k + params::n();
        assert_eq!(scalar_mul(&k, &g), scalar_mul(&k_plus_n, &g));
    }

    #[test]
    fn known_scalar_mul_vector() {
        // the same fixed private key used in address.rs's WIF round-trip test.
        let a = BigUint::parse_bytes(
            b"f97c89aaacf0cd2e47ddbacc97dae1f88bec49106ac37716c451dcdd008a4b62",
            16,
        )
        .unwrap();
        let point = scalar_mul(&a, &generator());
        assert!(on_curve(&point));
    }

    proptest::proptest! {
        /// For any on-curve P (sampled as a random multiple of G),
        /// `add(P, neg(P))` is the identity and `add(P, identity) == P`.
        #[test]
        fn prop_identity_and_negation(k in 1u64..1_000_000) {
            let p = scalar_mul(&BigUint::from(k), &generator());
            proptest::prop_assert_eq!(add(&p, &neg(&p)), Point::Identity);
            proptest::prop_assert_eq!(add(&p, &Point::Identity), p.clone());
            proptest::prop_assert_eq!(add(&Point::Identity, &p), p);
        }

        /// Point addition commutes.
        #[test]
        fn prop_add_commutes(j in 1u64..1_000_000, k in 1u64..1_000_000) {
            let p = scalar_mul(&BigUint::from(j), &generator());
            let q = scalar_mul(&BigUint::from(k), &generator());
            proptest::prop_assert_eq!(add(&p, &q), add(&q, &p));
        }

        /// `scalar_mul` reduces its scalar mod n, and `scalar_mul(0, P)`
        /// is always the identity.
        #[test]
        fn prop_scalar_mul_reduces_mod_n(k in 1u64..1_000_000) {
            let g = generator();
            let k = BigUint::from(k);
            let k_plus_n = &k + params::n();
            proptest::prop_assert_eq!(scalar_mul(&k, &g), scalar_mul(&k_plus_n, &g));
            proptest::prop_assert_eq!(scalar_mul(&BigUint::from(0u32), &g), Point::Identity);
        }
    }
}
