//! Errors raised while configuring or running a threshold-signature context.

use ec_core::errors::{ModularError, PolyError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    /// Raised when `(group_size, polynomial_order)` violates `t >= 1`,
    /// `t+1 <= N`, or `2t+1 <= N`.
    #[error("threshold misconfigured: group_size={0}, polynomial_order={1} (need t>=1, t+1<=N, 2t+1<=N)")]
    ThresholdMisconfigured(usize, usize),

    #[error(transparent)]
    Poly(#[from] PolyError),

    #[error(transparent)]
    Modular(#[from] ModularError),
}
