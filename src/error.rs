//! Module-wide error type.
//!
//! Mirrors the sentinel error registry of the source this module was
//! distilled from (`x/tss/types/errors.go`): one stable variant per
//! documented failure mode, grouped by input / lookup / protocol /
//! crypto failure. `validate_basic` failures use [`ValidationError`]
//! and never touch the state repository.

use thiserror::Error;

/// Errors raised while checking a message's local, state-independent
/// well-formedness (bech32 parsing, vector lengths, point/scalar
/// validity). These never read or write persisted state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("account address format is invalid: {0}")]
    InvalidAccAddressFormat(String),
    #[error("duplicate member address")]
    DuplicateMember,
    #[error("threshold must be less than or equal to the members but more than zero")]
    BadThreshold,
    #[error("coefficients commit not correct length: got {got}, want {want}")]
    CommitsNotCorrectLength { got: usize, want: usize },
    #[error("encrypted secret shares not correct length: got {got}, want {want}")]
    EncryptedSecretSharesNotCorrectLength { got: usize, want: usize },
    #[error("complaint list must not be empty")]
    EmptyComplaints,
    #[error("all complaint entries must share the same complainer")]
    MixedComplainer,
    #[error("complainer cannot be the same as complainant")]
    SelfComplaint,
    #[error("invalid curve point: {0}")]
    InvalidPoint(String),
    #[error("invalid curve scalar: {0}")]
    InvalidScalar(String),
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
}

/// Errors raised by the DKG state machine while applying a validated
/// message to persisted state. A state-machine error aborts the current
/// message and causes the host to roll back its writes; it is never
/// retried internally. A FALLEN transition is not an error.
#[derive(Debug, Error)]
pub enum TssError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // --- Lookup errors ---
    #[error("group not found: {0}")]
    GroupNotFound(u64),
    #[error("member not found: group {group_id}, member {member_id}")]
    MemberNotFound { group_id: u64, member_id: u16 },
    #[error("round 1 data not found: group {group_id}, member {member_id}")]
    Round1DataNotFound { group_id: u64, member_id: u16 },
    #[error("round 2 data not found: group {group_id}, member {member_id}")]
    Round2DataNotFound { group_id: u64, member_id: u16 },
    #[error("dkg context not found: group {0}")]
    DKGContextNotFound(u64),
    #[error("confirm not found: group {group_id}, member {member_id}")]
    ConfirmNotFound { group_id: u64, member_id: u16 },
    #[error("complains with status not found: group {group_id}, complainer {member_id}")]
    ComplainsWithStatusNotFound { group_id: u64, member_id: u16 },

    // --- Protocol errors ---
    #[error("member is already submit message")]
    AlreadySubmit,
    #[error("member is not authorized for this group")]
    MemberNotAuthorized,
    #[error("round expired")]
    RoundExpired,
    #[error("member is already malicious")]
    MemberIsAlreadyMalicious,
    #[error("member already submitted a complaint or confirmation this round")]
    MemberIsAlreadyComplainOrConfirm,
    #[error("group status does not allow this message: expected {expected}, got {got}")]
    UnexpectedStatus { expected: String, got: String },

    // --- Crypto errors ---
    #[error("fail to verify one time sign")]
    VerifyOneTimeSigFailed,
    #[error("fail to verify a0 sign")]
    VerifyA0SigFailed,
    #[error("fail to add coefficient commit")]
    AddCommit,
    #[error("coefficients commit not correct length")]
    CommitsNotCorrectLength,
    #[error("fail to verify complaint signature")]
    ComplainFailed,
    #[error("fail to verify confirm signature")]
    ConfirmFailed,
    #[error("fail to compute own public key")]
    ComputeOwnPubKeyFailed,
}
