use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Opaque to the DKG core: requests a signature from a group's key, but
/// the signing protocol itself lives outside this module. Only the
/// sender address is checked here; routing and fee handling belong to
/// the signing module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgRequestSignature {
    pub sender: String,
    pub group_id: u64,
    pub message: Vec<u8>,
}

impl MsgRequestSignature {
    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        crate::address::Address::from_bech32(&self.sender)?;
        Ok(())
    }
}

/// Opaque to the DKG core: a member's contribution to an in-progress
/// signing session, identified by `signing_id`. Structurally checked
/// only; the cryptographic verification is the signing module's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgSign {
    pub member: String,
    pub signing_id: u64,
    pub signature: Vec<u8>,
}

impl MsgSign {
    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        crate::address::Address::from_bech32(&self.member)?;
        if self.signature.is_empty() {
            return Err(ValidationError::InvalidSignature("empty".into()));
        }
        Ok(())
    }
}
