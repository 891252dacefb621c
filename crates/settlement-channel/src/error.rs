//! error taxonomy for settlement operations
//!
//! every failure is local and synchronous; nothing is retried and no partial
//! state is committed on error.

use thiserror::Error;

use crate::channel::ChannelStatus;
use crate::types::{Balance, ChannelId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("participant set is invalid: {reason}")]
    InvalidParticipants { reason: &'static str },

    #[error("timeout must be non-zero")]
    InvalidTimeout,

    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("channel {0} not found")]
    ChannelNotFound(ChannelId),

    #[error("operation not permitted while channel is {found:?}")]
    InvalidState { found: ChannelStatus },

    #[error("token is not allowed for this channel")]
    TokenNotAllowed,

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Balance, need: Balance },

    #[error("proof verification failed")]
    ProofInvalid,

    #[error("public input length {got} does not match verifier requirement {need}")]
    InvalidPublicInputLength { got: usize, need: usize },

    #[error("group public key is not a valid curve point")]
    InvalidGroupKey,

    #[error("threshold signature verification failed")]
    SignatureInvalid,

    #[error("requested {requested} does not match recorded withdrawable {recorded}")]
    AmountMismatch { requested: Balance, recorded: Balance },

    #[error("withdrawal already executed for this participant and token")]
    AlreadyWithdrawn,

    #[error("channel window has expired")]
    ChannelExpired,

    #[error("challenge period has not elapsed")]
    ChallengeNotElapsed,

    #[error("closure balances exceed deposited totals for a token")]
    ConservationViolation,

    #[error("settlement key does not match the key bound at first deposit")]
    KeyMismatch,

    #[error("unknown computation manifest")]
    UnknownManifest,

    #[error("nothing left to withdraw")]
    NothingToWithdraw,

    #[error("bond is not available for reclaim")]
    BondUnavailable,
}

pub type Result<T> = core::result::Result<T, ChannelError>;

impl From<threshold_sig::ThresholdError> for ChannelError {
    fn from(err: threshold_sig::ThresholdError) -> Self {
        match err {
            threshold_sig::ThresholdError::InvalidGroupKey => ChannelError::InvalidGroupKey,
            _ => ChannelError::SignatureInvalid,
        }
    }
}

impl From<commitment_tree::TreeError> for ChannelError {
    fn from(_: commitment_tree::TreeError) -> Self {
        ChannelError::ProofInvalid
    }
}
