//! Polynomial secret sharing over the scalar field (component F).
//!
//! `Poly` models a degree-`t` polynomial with coefficients in `Fn`, used both
//! as the sharing polynomial in JVRSS and as the implicit polynomial behind
//! any additive combination of shares (ADDSS, PROSS). Recovery uses Lagrange
//! interpolation at `x = 0` with a per-denominator modular inverse rather
//! than the single final integer division the reference implementation
//! performs — unconditionally correct regardless of which points are chosen,
//! at the cost of `t` extra inversions.

use crate::errors::{ModularError, PolyError};
use crate::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A polynomial `f(x) = a_0 + a_1 x + ... + a_t x^t`, `a_i` in `Fn`. The
/// coefficient vector is wiped on drop: in the secret-sharing callers
/// (JVRSS, INVSS), it is ephemeral per-participant state that has already
/// been folded into a returned share vector or public key by the time it
/// goes out of scope.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Poly {
    coefficients: Vec<Scalar>,
}

impl Poly {
    /// Builds a polynomial of degree `degree` whose constant term is `secret`
    /// and whose remaining `degree` coefficients are drawn uniformly at
    /// random from `[1, n)`.
    pub fn sharing<R: RngCore + CryptoRng>(secret: Scalar, degree: usize, rng: &mut R) -> Self {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret);
        for _ in 0..degree {
            coefficients.push(Scalar::random(rng));
        }
        Poly { coefficients }
    }

    /// Builds a polynomial from explicit coefficients, `a_0` first.
    pub fn from_coefficients(coefficients: Vec<Scalar>) -> Self {
        Poly { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[Scalar] {
        &self.coefficients
    }

    /// The constant term `f(0)`, i.e. the shared secret.
    pub fn constant_term(&self) -> &Scalar {
        &self.coefficients[0]
    }

    /// Evaluates `f(x)` via Horner's method.
    pub fn eval(&self, x: &Scalar) -> Scalar {
        let mut acc = Scalar::zero();
        for coefficient in self.coefficients.iter().rev() {
            acc = acc.mul(x).add(coefficient);
        }
        acc
    }

    /// Evaluates at participant index `i` (`i` from 1, matching the
    /// convention that participant 0 would hand every other participant the
    /// secret itself).
    pub fn eval_index(&self, i: u32) -> Scalar {
        self.eval(&Scalar::from_u64(i as u64))
    }

    /// Coefficient-wise sum of two polynomials of possibly different degree.
    pub fn add(&self, other: &Poly) -> Poly {
        let len = self.coefficients.len().max(other.coefficients.len());
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            let a = self.coefficients.get(i).cloned().unwrap_or_else(Scalar::zero);
            let b = other.coefficients.get(i).cloned().unwrap_or_else(Scalar::zero);
            out.push(a.add(&b));
        }
        Poly::from_coefficients(out)
    }

    /// The polynomial product `self * other`, degree `deg(self) + deg(other)`,
    /// via convolution of coefficients. Used by PROSS to combine two
    /// degree-`t` sharings into a degree-`2t` product sharing.
    pub fn mul(&self, other: &Poly) -> Poly {
        let out_len = self.coefficients.len() + other.coefficients.len() - 1;
        let mut out = vec![Scalar::zero(); out_len];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                out[i + j] = out[i + j].add(&a.mul(b));
            }
        }
        Poly::from_coefficients(out)
    }
}

/// A `(x, y)` share of some polynomial, `x` the participant index and `y`
/// the evaluation `f(x)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub x: u32,
    pub y: Scalar,
}

/// Lagrange-interpolates the polynomial implied by `shares` and evaluates
/// it at `x`:
///
/// `f(x) = sum_i y_i * prod_{j != i} (x - x_j) / (x_i - x_j)`
///
/// Requires at least two points and requires the `x` values to be pairwise
/// distinct (checked; a repeated index makes a denominator zero). Each
/// denominator is inverted individually via [`Scalar::inverse`] rather than
/// combined into one final integer division — unconditionally correct
/// regardless of which points or target `x` are chosen.
pub fn interpolate_at(shares: &[Share], x: &Scalar) -> Result<Scalar, PolyError> {
    if shares.len() < 2 {
        return Err(PolyError::TooFewPoints(shares.len()));
    }

    let mut acc = Scalar::zero();
    for (i, share_i) in shares.iter().enumerate() {
        let x_i = Scalar::from_u64(share_i.x as u64);
        let mut numerator = Scalar::one();
        let mut denominator = Scalar::one();
        for (j, share_j) in shares.iter().enumerate() {
            if i == j {
                continue;
            }
            let x_j = Scalar::from_u64(share_j.x as u64);
            numerator = numerator.mul(&x.sub(&x_j));
            denominator = denominator.mul(&x_i.sub(&x_j));
        }
        let denominator_inv = denominator.inverse().map_err(|_| {
            PolyError::Modular(ModularError::NonInvertible(
                "lagrange denominator".to_string(),
                "n".to_string(),
            ))
        })?;
        let term = share_i.y.mul(&numerator).mul(&denominator_inv);
        acc = acc.add(&term);
    }
    Ok(acc)
}

/// Recovers `f(0)`, the common case used throughout threshold signing: the
/// group secret and every ADDSS/PROSS/INVSS combination are recovered at
/// `x = 0`, never at an arbitrary abscissa.
pub fn interpolate_at_zero(shares: &[Share]) -> Result<Scalar, PolyError> {
    interpolate_at(shares, &Scalar::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn eval_matches_direct_computation() {
        // f(x) = 3 + 2x
        let poly = Poly::from_coefficients(vec![Scalar::from_u64(3), Scalar::from_u64(2)]);
        assert_eq!(poly.eval(&Scalar::from_u64(5)), Scalar::from_u64(13));
    }

    #[test]
    fn interpolation_recovers_constant_term() {
        let mut rng = OsRng;
        let secret = Scalar::random(&mut rng);
        let poly = Poly::sharing(secret.clone(), 2, &mut rng);
        let shares: Vec<Share> = (1..=3)
            .map(|i| Share {
                x: i,
                y: poly.eval_index(i),
            })
            .collect();
        let recovered = interpolate_at_zero(&shares).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn interpolation_with_extra_points_still_matches() {
        let mut rng = OsRng;
        let secret = Scalar::random(&mut rng);
        let poly = Poly::sharing(secret.clone(), 1, &mut rng);
        let shares: Vec<Share> = (1..=5)
            .map(|i| Share {
                x: i,
                y: poly.eval_index(i),
            })
            .collect();
        assert_eq!(interpolate_at_zero(&shares).unwrap(), secret);
    }

    #[test]
    fn interpolation_requires_two_points() {
        let shares = vec![Share {
            x: 1,
            y: Scalar::from_u64(1),
        }];
        assert_eq!(interpolate_at_zero(&shares), Err(PolyError::TooFewPoints(1)));
    }

    #[test]
    fn addition_of_sharings_shares_the_sum() {
        let mut rng = OsRng;
        let a = Poly::sharing(Scalar::from_u64(10), 1, &mut rng);
        let b = Poly::sharing(Scalar::from_u64(20), 1, &mut rng);
        let sum = a.add(&b);
        assert_eq!(sum.constant_term(), &Scalar::from_u64(30));
        assert_eq!(sum.eval_index(1), a.eval_index(1).add(&b.eval_index(1)));
    }

    #[test]
    fn product_polynomial_has_combined_degree() {
        let mut rng = OsRng;
        let a = Poly::sharing(Scalar::from_u64(1), 1, &mut rng);
        let b = Poly::sharing(Scalar::from_u64(2), 1, &mut rng);
        let product = a.mul(&b);
        assert_eq!(product.degree(), 2);
        assert_eq!(product.eval(&Scalar::zero()), Scalar::from_u64(2));
    }

    /// The fixed points `(1,350), (2,770), (3,1350)` lie on a degree-2
    /// polynomial whose constant term is 90.
    #[test]
    fn known_points_interpolate_to_fixed_secret() {
        let shares = vec![
            Share {
                x: 1,
                y: Scalar::from_u64(350),
            },
            Share {
                x: 2,
                y: Scalar::from_u64(770),
            },
            Share {
                x: 3,
                y: Scalar::from_u64(1350),
            },
        ];
        assert_eq!(interpolate_at_zero(&shares).unwrap(), Scalar::from_u64(90));
        assert_eq!(interpolate_at(&shares, &Scalar::from_u64(1)).unwrap(), Scalar::from_u64(350));
        assert_eq!(interpolate_at(&shares, &Scalar::from_u64(2)).unwrap(), Scalar::from_u64(770));
    }

    proptest::proptest! {
        /// For any order-t polynomial and any t+1 of its evaluation
        /// points, interpolate-at-0 recovers f(0).
        #[test]
        fn prop_interpolation_recovers_constant_term(secret in 1u64..1_000_000, a1 in 1u64..1_000_000, a2 in 1u64..1_000_000) {
            let poly = Poly::from_coefficients(vec![
                Scalar::from_u64(secret),
                Scalar::from_u64(a1),
                Scalar::from_u64(a2),
            ]);
            let shares: Vec<Share> = (1..=3)
                .map(|i| Share { x: i, y: poly.eval_index(i) })
                .collect();
            proptest::prop_assert_eq!(interpolate_at_zero(&shares).unwrap(), Scalar::from_u64(secret));
        }

        /// `interpolate_at` recovers every one of the polynomial's own
        /// evaluation points, not just its constant term.
        #[test]
        fn prop_interpolation_recovers_held_out_point(a0 in 1u64..1_000_000, a1 in 1u64..1_000_000, a2 in 1u64..1_000_000, target in 1u32..10) {
            let poly = Poly::from_coefficients(vec![
                Scalar::from_u64(a0),
                Scalar::from_u64(a1),
                Scalar::from_u64(a2),
            ]);
            let shares: Vec<Share> = (1..=3)
                .map(|i| Share { x: i, y: poly.eval_index(i) })
                .collect();
            let expected = poly.eval_index(target);
            proptest::prop_assert_eq!(interpolate_at(&shares, &Scalar::from_u64(target as u64)).unwrap(), expected);
        }
    }
}
