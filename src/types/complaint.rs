use crate::crypto::ComplainProof;
use crate::crypto::CurveScalar;
use crate::types::{GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// Outcome of adjudicating one complaint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    /// The complainant's share failed Feldman verification; the
    /// complaint is upheld and the complainant is malicious.
    Success,
    /// The complainant's share verified correctly; the complaint is
    /// rejected and the complainer is malicious.
    Failed,
}

/// One `(complainer, complainant)` accusation within a `Complain`
/// message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplainEntry {
    pub complainer: MemberId,
    pub complainant: MemberId,
    pub key_sym: CurveScalar,
    pub nonce_sym: CurveScalar,
    pub signature: ComplainProof,
}

/// The persisted, adjudicated result of a member's `Complain`
/// submission. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintWithStatus {
    pub group_id: GroupId,
    pub complainer: MemberId,
    pub entries: Vec<(ComplainEntry, ComplaintStatus)>,
}
