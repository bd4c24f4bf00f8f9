//! secp256k1 field/scalar/curve arithmetic, ECDSA, Base58/WIF/address
//! encodings, and Lagrange interpolation over the scalar field.
//!
//! This crate is deliberately concrete rather than generic: it implements
//! exactly one curve (secp256k1) and one signature scheme (ECDSA), so there
//! is no trait layer abstracting over curve choice — just concrete types.

pub mod address;
pub mod codec;
pub mod curve;
pub mod digest;
pub mod ecdsa;
pub mod encoding;
pub mod errors;
pub mod field;
pub mod modular;
pub mod params;
pub mod poly;
pub mod residue;
pub mod scalar;
pub mod wif;

pub use curve::Point;
pub use field::Fp;
pub use scalar::Scalar;
