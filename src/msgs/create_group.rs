use crate::address::{self, Address};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Allocates a new group of `members.len()` participants with the given
/// signing threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgCreateGroup {
    pub sender: String,
    pub members: Vec<String>,
    pub threshold: u64,
}

/// Parsed, validated form ready for the state machine.
#[derive(Debug)]
pub struct ParsedCreateGroup {
    pub sender: Address,
    pub members: Vec<Address>,
    pub threshold: u16,
}

impl MsgCreateGroup {
    pub fn validate_basic(&self) -> Result<ParsedCreateGroup, ValidationError> {
        let sender = Address::from_bech32(&self.sender)?;

        let members = self
            .members
            .iter()
            .map(|m| Address::from_bech32(m))
            .collect::<Result<Vec<_>, _>>()?;

        if address::has_duplicate(&members) {
            return Err(ValidationError::DuplicateMember);
        }

        if self.threshold == 0 || self.threshold > members.len() as u64 {
            return Err(ValidationError::BadThreshold);
        }

        Ok(ParsedCreateGroup {
            sender,
            members,
            threshold: self.threshold as u16,
        })
    }
}
