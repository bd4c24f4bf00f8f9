//! # Threshold ECDSA
//!
//! A JVRSS-based (t, N)-threshold ECDSA signer: `N` simulated participants
//! jointly hold a secp256k1 private key with no participant ever learning
//! it, and any `2t + 1` of them can cooperate to produce a valid
//! recoverable signature. Unlike a networked DKG, every "participant" here
//! is simulated inside a single orchestrator process — there is no board,
//! no transport, and no justification/resharing state machine.

mod context;
mod errors;

pub use context::{addss, invss, jvrss, pross, restore_key, ThresholdSignature};
pub use errors::ThresholdError;
