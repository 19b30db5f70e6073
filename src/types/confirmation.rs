use crate::crypto::Signature;
use crate::types::{GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// A member's signed acknowledgement that their derived public share
/// matches the group's accumulated commitment. Immutable once
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub own_pub_key_sig: Signature,
}
