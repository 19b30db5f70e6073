use crate::types::{GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// A member's Round 2 submission: one 32-byte authenticated ciphertext
/// per peer, omitting the sender's own share. Ordered by increasing peer
/// `MemberId`, skipping self — see
/// [`crate::state_machine::share_slot`] for the exact indexing rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round2Data {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub encrypted_secret_shares: Vec<[u8; 32]>,
}
