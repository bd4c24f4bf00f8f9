//! Error kinds shared across the core: every fallible boundary in this crate
//! returns one of these instead of panicking. Invariant violations inside the
//! curve arithmetic (a computed point failing `on_curve`) are a separate
//! concern and are `debug_assert!`-guarded panics, not a `Result` here.

use thiserror::Error;

/// Errors raised while decoding Base58 / Base58Check / WIF payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character '{0}' is not part of the base58 alphabet")]
    InvalidEncoding(char),

    #[error("base58check checksum mismatch")]
    ChecksumMismatch,

    #[error("wif string must start with '5', 'K' or 'L'")]
    InvalidWif,

    #[error("base58check payload is shorter than the 4-byte checksum")]
    PayloadTooShort,
}

/// Errors raised by the modular-arithmetic layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModularError {
    #[error("{0} has no modular inverse mod {1}: not coprime")]
    NonInvertible(String, String),
}

/// Errors raised while decoding signatures or public keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid DER encoded signature")]
    InvalidDer,

    #[error("compact signature must be exactly 65 bytes, got {0}")]
    InvalidCompactLength(usize),

    #[error("compact signature prefix {0} out of range [27, 34]")]
    InvalidCompactPrefix(u8),

    #[error("public key encoding must be 33 (compressed) or 65 (uncompressed) bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("signature is not valid base64")]
    InvalidBase64,
}

/// Errors raised by ECDSA signing/verification/recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcdsaError {
    #[error("signature component out of range [1, n)")]
    OutOfRange,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors raised while assembling message or transaction digests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("unsupported sighash type {0:#x}, only ALL|FORKID (0x41) is supported")]
    UnsupportedSighash(u32),
}

/// Errors raised by polynomial interpolation / recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolyError {
    #[error("lagrange interpolation requires at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("insufficient shares: have {0}, need at least {1}")]
    InsufficientShares(usize, usize),

    #[error(transparent)]
    Modular(#[from] ModularError),
}
