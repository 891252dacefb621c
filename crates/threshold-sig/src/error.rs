//! error types for threshold signature verification

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("group public key is not a valid curve point")]
    InvalidGroupKey,

    #[error("signature bytes are malformed")]
    MalformedSignature,

    #[error("signer recovery failed")]
    RecoveryFailed,

    #[error("recovered signer does not match the registered signer")]
    SignerMismatch,
}

pub type Result<T> = core::result::Result<T, ThresholdError>;
