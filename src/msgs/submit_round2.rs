use crate::error::ValidationError;
use crate::types::{GroupId, MemberId, Round2Data};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRound2Info {
    pub member_id: MemberId,
    pub encrypted_secret_shares: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgSubmitDKGRound2 {
    pub member: String,
    pub group_id: GroupId,
    pub round2_info: RawRound2Info,
}

impl MsgSubmitDKGRound2 {
    /// Parses the wire form, checking that every ciphertext is exactly
    /// 32 bytes (the fixed width of a single encrypted secret share).
    /// The *count* of shares (one per peer) needs the group record and
    /// is checked by the state machine.
    pub fn validate_basic(&self) -> Result<Round2Data, ValidationError> {
        crate::address::Address::from_bech32(&self.member)?;

        let encrypted_secret_shares = self
            .round2_info
            .encrypted_secret_shares
            .iter()
            .map(|ct| {
                <[u8; 32]>::try_from(ct.as_slice()).map_err(|_| {
                    ValidationError::EncryptedSecretSharesNotCorrectLength {
                        got: ct.len(),
                        want: 32,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Round2Data {
            group_id: self.group_id,
            member_id: self.round2_info.member_id,
            encrypted_secret_shares,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> String {
        crate::address::Address::from_bytes(&[3; crate::address::ADDR_LEN])
            .unwrap()
            .to_bech32()
    }

    #[test]
    fn accepts_well_formed_ciphertexts() {
        let msg = MsgSubmitDKGRound2 {
            member: addr(),
            group_id: 1,
            round2_info: RawRound2Info {
                member_id: 1,
                encrypted_secret_shares: vec![vec![0u8; 32], vec![1u8; 32]],
            },
        };
        let parsed = msg.validate_basic().unwrap();
        assert_eq!(parsed.encrypted_secret_shares.len(), 2);
    }

    #[test]
    fn rejects_wrong_length_ciphertext() {
        let msg = MsgSubmitDKGRound2 {
            member: addr(),
            group_id: 1,
            round2_info: RawRound2Info {
                member_id: 1,
                encrypted_secret_shares: vec![vec![0u8; 31]],
            },
        };
        assert_eq!(
            msg.validate_basic().unwrap_err(),
            ValidationError::EncryptedSecretSharesNotCorrectLength { got: 31, want: 32 }
        );
    }
}
