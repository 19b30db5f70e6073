use crate::crypto::{CurvePoint, Signature};
use crate::types::{GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// A member's Round 1 submission: their Feldman commitment vector, a
/// fresh one-time public key for this session, and proofs of knowledge
/// binding both to the group's DKG context. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round1Data {
    pub group_id: GroupId,
    pub member_id: MemberId,
    /// Length must equal the group's threshold `t`.
    pub coefficient_commits: Vec<CurvePoint>,
    pub one_time_pub_key: CurvePoint,
    pub a0_sig: Signature,
    pub one_time_sig: Signature,
}
