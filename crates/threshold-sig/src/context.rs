//! JVRSS-based threshold ECDSA (component H).
//!
//! `ThresholdSignature` simulates `group_size` participants inside a single
//! trusted orchestrator process: there is no network transport here, no
//! broadcast board, no justification/resharing machinery — every "send
//! share to participant j" step in the algorithms below is just an array
//! write. Peer-to-peer distribution of shares between independent
//! participants is out of scope; a richer networked DKG is a different
//! protocol for a different threat model.

use crate::errors::ThresholdError;
use ec_core::codec::{serialize_compact, RecoverableSignature};
use ec_core::curve::{self, Point};
use ec_core::digest::message_bytes;
use ec_core::ecdsa::hash_to_int;
use ec_core::poly::{interpolate_at_zero, Poly, Share};
use ec_core::scalar::Scalar;
use rand::thread_rng;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

fn hash_to_scalar(message: &[u8]) -> Scalar {
    Scalar::from_be_bytes_reduced(&hash_to_int(message))
}

fn sample_points<R: RngCore>(shares: &[Scalar], count: usize, rng: &mut R) -> Vec<Share> {
    rand::seq::index::sample(rng, shares.len(), count)
        .into_iter()
        .map(|idx| Share {
            x: (idx + 1) as u32,
            y: shares[idx].clone(),
        })
        .collect()
}

/// Joint Verifiable Random Secret Sharing: every participant samples an
/// order-`t` polynomial, the shares are summed pointwise, and the group
/// public key is the sum of each participant's committed constant term.
/// The shared secret itself — `sum_i f_i(0)` — is never materialized.
pub fn jvrss<R: RngCore + CryptoRng>(group_size: usize, polynomial_order: usize, rng: &mut R) -> (Vec<Scalar>, Point) {
    let mut shares = vec![Scalar::zero(); group_size];
    let mut public_key = Point::Identity;
    for _ in 0..group_size {
        let poly = Poly::sharing(Scalar::random(rng), polynomial_order, rng);
        for (j, share) in shares.iter_mut().enumerate() {
            *share = share.add(&poly.eval_index((j + 1) as u32));
        }
        public_key = curve::add(&public_key, &curve::mul_scalar(poly.constant_term(), &curve::generator()));
    }
    (shares, public_key)
}

/// Pointwise sums two share vectors, then recovers `a + b mod n` from
/// `t + 1` randomly chosen points (sufficient since the sum of two order-t
/// polynomials is itself order <= t).
pub fn addss<R: RngCore + CryptoRng>(
    shares_a: &[Scalar],
    shares_b: &[Scalar],
    polynomial_order: usize,
    rng: &mut R,
) -> Result<Scalar, ThresholdError> {
    let sum_shares: Vec<Scalar> = shares_a.iter().zip(shares_b).map(|(a, b)| a.add(b)).collect();
    let points = sample_points(&sum_shares, polynomial_order + 1, rng);
    Ok(interpolate_at_zero(&points)?)
}

/// Pointwise multiplies two share vectors, then recovers `a * b mod n` from
/// `2t + 1` randomly chosen points (the product of two order-t polynomials
/// is order <= 2t — this is why the signature threshold is `2t + 1`).
pub fn pross<R: RngCore + CryptoRng>(
    shares_a: &[Scalar],
    shares_b: &[Scalar],
    polynomial_order: usize,
    rng: &mut R,
) -> Result<Scalar, ThresholdError> {
    let product_shares: Vec<Scalar> = shares_a.iter().zip(shares_b).map(|(a, b)| a.mul(b)).collect();
    let points = sample_points(&product_shares, 2 * polynomial_order + 1, rng);
    Ok(interpolate_at_zero(&points)?)
}

/// Inverse Secret Sharing: draws a fresh random sharing `b` via JVRSS,
/// recovers `u = a * b` via PROSS, and has each participant scale their `b`
/// share by `u^-1` — the result is a fresh sharing of `a^-1` without ever
/// reconstructing `a` or `a^-1` at a single point.
pub fn invss<R: RngCore + CryptoRng>(
    shares_a: &[Scalar],
    group_size: usize,
    polynomial_order: usize,
    rng: &mut R,
) -> Result<Vec<Scalar>, ThresholdError> {
    let (mut shares_b, _) = jvrss(group_size, polynomial_order, rng);
    let u = pross(shares_a, &shares_b, polynomial_order, rng)?;
    let alpha = u.inverse()?;
    let result = shares_b.iter().map(|b| alpha.mul(b)).collect();
    shares_b.zeroize();
    Ok(result)
}

/// Recovers the secret behind a share vector from at least `key_threshold`
/// `(x, y)` points via Lagrange interpolation at zero.
pub fn restore_key(points: &[Share], key_threshold: usize) -> Result<Scalar, ThresholdError> {
    if points.len() < key_threshold {
        return Err(ThresholdError::Poly(ec_core::errors::PolyError::InsufficientShares(
            points.len(),
            key_threshold,
        )));
    }
    Ok(interpolate_at_zero(points)?)
}

/// A group of `group_size` participants sharing a secret ECDSA key via
/// JVRSS. Immutable once constructed: the share vector is produced exactly
/// once, by the JVRSS round run during construction, and is read-only for
/// the lifetime of the context.
#[derive(Clone, Debug)]
pub struct ThresholdSignature {
    group_size: usize,
    polynomial_order: usize,
    key_threshold: usize,
    signature_threshold: usize,
    shares: Vec<Scalar>,
    public_key: Point,
}

impl ThresholdSignature {
    fn validate(group_size: usize, polynomial_order: usize) -> Result<(usize, usize), ThresholdError> {
        let key_threshold = polynomial_order + 1;
        let signature_threshold = 2 * polynomial_order + 1;
        if polynomial_order < 1 || key_threshold > group_size || signature_threshold > group_size {
            return Err(ThresholdError::ThresholdMisconfigured(group_size, polynomial_order));
        }
        Ok((key_threshold, signature_threshold))
    }

    /// Builds a new group of `group_size` participants with polynomial
    /// order `polynomial_order`, running JVRSS with an explicit
    /// cryptographic RNG.
    pub fn new_from<R: RngCore + CryptoRng>(
        group_size: usize,
        polynomial_order: usize,
        rng: &mut R,
    ) -> Result<Self, ThresholdError> {
        let (key_threshold, signature_threshold) = Self::validate(group_size, polynomial_order)?;
        let (shares, public_key) = jvrss(group_size, polynomial_order, rng);
        Ok(ThresholdSignature {
            group_size,
            polynomial_order,
            key_threshold,
            signature_threshold,
            shares,
            public_key,
        })
    }

    /// Convenience constructor backed by `rand::thread_rng()`.
    pub fn new(group_size: usize, polynomial_order: usize) -> Result<Self, ThresholdError> {
        Self::new_from(group_size, polynomial_order, &mut thread_rng())
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn polynomial_order(&self) -> usize {
        self.polynomial_order
    }

    pub fn key_threshold(&self) -> usize {
        self.key_threshold
    }

    pub fn signature_threshold(&self) -> usize {
        self.signature_threshold
    }

    pub fn shares(&self) -> &[Scalar] {
        &self.shares
    }

    pub fn public_key(&self) -> &Point {
        &self.public_key
    }

    /// Runs the distributed sign-recoverable protocol over `message`,
    /// retrying the whole procedure on the (probabilistically negligible)
    /// chance that `r` or `s` comes out zero.
    pub fn sign_recoverable<R: RngCore + CryptoRng>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<RecoverableSignature, ThresholdError> {
        let e = hash_to_scalar(message);
        loop {
            let (r, recovery_id, mut kinv_shares) = loop {
                let (mut k_shares, k_point) = jvrss(self.group_size, self.polynomial_order, rng);
                let (x, y) = match &k_point {
                    Point::Affine(x, y) => (x, y),
                    Point::Identity => continue,
                };
                let r = Scalar::new(x.as_biguint().clone());
                if r.is_zero() {
                    continue;
                }
                let overflow_bit = if Scalar::overflowed(x.as_biguint()) { 2 } else { 0 };
                let parity_bit = if y.is_even() { 0 } else { 1 };
                let kinv_shares = invss(&k_shares, self.group_size, self.polynomial_order, rng)?;
                k_shares.zeroize();
                break (r, overflow_bit | parity_bit, kinv_shares);
            };

            let mut s_shares: Vec<Scalar> = self
                .shares
                .iter()
                .zip(kinv_shares.iter())
                .map(|(share, kinv_share)| e.add(&r.mul(share)).mul(kinv_share))
                .collect();
            kinv_shares.zeroize();
            let points = sample_points(&s_shares, self.signature_threshold, rng);
            let s = interpolate_at_zero(&points)?;
            s_shares.zeroize();
            if s.is_zero() {
                continue;
            }
            return Ok(RecoverableSignature { recovery_id, r, s });
        }
    }

    /// Runs [`Self::sign_recoverable`] over the Bitcoin "Signed Message"
    /// framing of `plain_text` and returns `(P2PKH address of the group
    /// key, Base64 of prefix||r||s)`. The group key is always represented
    /// compressed.
    pub fn sign_message<R: RngCore + CryptoRng>(
        &self,
        plain_text: &str,
        rng: &mut R,
    ) -> Result<(String, String), ThresholdError> {
        let digest = message_bytes(plain_text);
        let sig = self.sign_recoverable(&digest, rng)?;
        let compact = serialize_compact(&sig, true);
        let address = ec_core::address::p2pkh_address(&self.public_key);
        Ok((address, base64::encode(compact)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::curve::{generator, mul_scalar};
    use ec_core::ecdsa::verify;
    use rand::rngs::OsRng;

    #[test]
    fn jvrss_shares_interpolate_to_the_group_key() {
        let mut rng = OsRng;
        let (shares, q) = jvrss(5, 2, &mut rng);
        let points: Vec<Share> = (1..=3)
            .map(|i| Share {
                x: i,
                y: shares[i as usize - 1].clone(),
            })
            .collect();
        let secret = interpolate_at_zero(&points).unwrap();
        assert_eq!(mul_scalar(&secret, &generator()), q);
    }

    #[test]
    fn invss_produces_shares_of_the_inverse() {
        let mut rng = OsRng;
        let (shares, _) = jvrss(5, 2, &mut rng);
        let inv_shares = invss(&shares, 5, 2, &mut rng).unwrap();

        let points: Vec<Share> = (1..=3)
            .map(|i| Share {
                x: i,
                y: shares[i as usize - 1].clone(),
            })
            .collect();
        let a = interpolate_at_zero(&points).unwrap();

        let inv_points: Vec<Share> = (1..=3)
            .map(|i| Share {
                x: i,
                y: inv_shares[i as usize - 1].clone(),
            })
            .collect();
        let a_inv = interpolate_at_zero(&inv_points).unwrap();

        assert_eq!(a.mul(&a_inv), Scalar::one());
    }

    #[test]
    fn threshold_context_rejects_bad_parameters() {
        assert!(ThresholdSignature::new(3, 2).is_err()); // 2*2+1=5 > 3
        assert!(ThresholdSignature::new(3, 0).is_err()); // t must be >= 1
    }

    #[test]
    fn threshold_signature_verifies_against_group_key() {
        let mut rng = OsRng;
        let ctx = ThresholdSignature::new_from(5, 2, &mut rng).unwrap();
        let sig = ctx.sign_recoverable(b"threshold ecdsa", &mut rng).unwrap();
        let plain = ec_core::codec::Signature {
            r: sig.r.clone(),
            s: sig.s.clone(),
        };
        assert_eq!(verify(ctx.public_key(), b"threshold ecdsa", &plain), Ok(true));
    }

    #[test]
    fn sign_message_returns_address_and_base64() {
        let mut rng = OsRng;
        let ctx = ThresholdSignature::new_from(5, 2, &mut rng).unwrap();
        let (address, signature) = ctx.sign_message("hello world", &mut rng).unwrap();
        assert!(address.starts_with('1'));
        assert!(!signature.is_empty());
    }

    /// A (N=3, t=1) threshold group's `sign_message` output verifies
    /// against the group's own P2PKH address, and any 2 of its 3 shares
    /// restore a scalar `a` with `a*G = Q`.
    #[test]
    fn threshold_2_of_3_group_signs_a_message_that_verifies() {
        let mut rng = OsRng;
        let ctx = ThresholdSignature::new_from(3, 1, &mut rng).unwrap();
        let (address, signature) = ctx.sign_message("threshold group message", &mut rng).unwrap();
        assert!(ec_core::ecdsa::verify_message(&address, "threshold group message", &signature).unwrap());

        let points: Vec<Share> = (1..=2)
            .map(|i| Share {
                x: i,
                y: ctx.shares()[i as usize - 1].clone(),
            })
            .collect();
        let restored = restore_key(&points, ctx.key_threshold()).unwrap();
        assert_eq!(&mul_scalar(&restored, &generator()), ctx.public_key());
    }
}
