use crate::crypto::{CurvePoint, Signature};
use crate::error::ValidationError;
use crate::msgs::wire::{self, RawSignature};
use crate::types::{GroupId, MemberId, Round1Data};
use serde::{Deserialize, Serialize};

/// Wire form of a member's Round 1 submission: commitment points and
/// signatures travel as raw compressed-point / scalar bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRound1Info {
    pub member_id: MemberId,
    pub coefficient_commits: Vec<Vec<u8>>,
    pub one_time_pub_key: Vec<u8>,
    pub a0_sig: RawSignature,
    pub one_time_sig: RawSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgSubmitDKGRound1 {
    pub member: String,
    pub group_id: GroupId,
    pub round1_info: RawRound1Info,
}

impl MsgSubmitDKGRound1 {
    /// Parses the wire form into [`Round1Data`] and checks that the
    /// commitment vector has the length this message alone can verify:
    /// non-zero. Checking it against the group's threshold needs the
    /// group record and belongs to the state machine.
    pub fn validate_basic(&self) -> Result<Round1Data, ValidationError> {
        crate::address::Address::from_bech32(&self.member)?;

        if self.round1_info.coefficient_commits.is_empty() {
            return Err(ValidationError::CommitsNotCorrectLength { got: 0, want: 1 });
        }

        let coefficient_commits: Vec<CurvePoint> = self
            .round1_info
            .coefficient_commits
            .iter()
            .map(|c| wire::parse_point(c))
            .collect::<Result<_, _>>()?;

        let one_time_pub_key = wire::parse_point(&self.round1_info.one_time_pub_key)?;
        let a0_sig: Signature = self.round1_info.a0_sig.parse()?;
        let one_time_sig: Signature = self.round1_info.one_time_sig.parse()?;

        Ok(Round1Data {
            group_id: self.group_id,
            member_id: self.round1_info.member_id,
            coefficient_commits,
            one_time_pub_key,
            a0_sig,
            one_time_sig,
        })
    }
}
