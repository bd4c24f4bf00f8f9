//! Demonstration binaries wiring `ec-core` and `threshold-sig` together:
//! single-key and threshold signing over plain messages, signature
//! verification, and a minimal single-input P2PKH transaction signer.
//! None of this is hardened library surface — it exists to exercise the two
//! libraries end to end.

pub mod actions;
pub mod opts;
pub mod tx;
