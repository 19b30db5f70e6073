use crate::address::Address;
use serde::{Deserialize, Serialize};

pub type GroupId = u64;
pub type MemberId = u16;

/// `PENDING_CREATION → ROUND_1 → ROUND_2 → ROUND_3_COMPLAIN|ROUND_3_CONFIRM
/// → ACTIVE | FALLEN`. ACTIVE and FALLEN are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupStatus {
    PendingCreation,
    Round1,
    Round2,
    Round3Complain,
    Round3Confirm,
    Active,
    Fallen,
}

impl GroupStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GroupStatus::Active | GroupStatus::Fallen)
    }

    pub fn is_round3(self) -> bool {
        matches!(
            self,
            GroupStatus::Round3Complain | GroupStatus::Round3Confirm
        )
    }
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupStatus::PendingCreation => "PENDING_CREATION",
            GroupStatus::Round1 => "ROUND_1",
            GroupStatus::Round2 => "ROUND_2",
            GroupStatus::Round3Complain => "ROUND_3_COMPLAIN",
            GroupStatus::Round3Confirm => "ROUND_3_CONFIRM",
            GroupStatus::Active => "ACTIVE",
            GroupStatus::Fallen => "FALLEN",
        };
        write!(f, "{}", s)
    }
}

/// A TSS group: size `n`, threshold `t`, a random DKG context, current
/// status, and (once ACTIVE) the derived group public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub size: u16,
    pub threshold: u16,
    pub dkg_context: [u8; 32],
    pub status: GroupStatus,
    /// Compressed SEC1 encoding of the group public key; only set once
    /// the group transitions to ACTIVE.
    pub pub_key: Option<Vec<u8>>,
}

/// A group member, identified by `(group_id, member_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub address: Address,
    /// Set on Confirm.
    pub pub_key: Option<Vec<u8>>,
    /// Set when an adjudicated complaint finds against this member.
    pub is_malicious: bool,
}
