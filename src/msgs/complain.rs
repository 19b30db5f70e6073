use crate::crypto::ComplainProof;
use crate::error::ValidationError;
use crate::msgs::wire;
use crate::types::{ComplainEntry, GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// Wire form of one `(complainer, complainant)` accusation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComplainEntry {
    pub complainer: MemberId,
    pub complainant: MemberId,
    pub key_sym: [u8; 32],
    pub nonce_sym: [u8; 32],
    pub signature: RawComplainProof,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComplainProof {
    pub shared: Vec<u8>,
    pub r1: Vec<u8>,
    pub r2: Vec<u8>,
    pub s: [u8; 32],
}

impl RawComplainProof {
    fn parse(&self) -> Result<ComplainProof, ValidationError> {
        Ok(ComplainProof {
            shared: wire::parse_point(&self.shared)?,
            r1: wire::parse_point(&self.r1)?,
            r2: wire::parse_point(&self.r2)?,
            s: wire::parse_scalar(&self.s)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgComplain {
    pub member: String,
    pub group_id: GroupId,
    pub complaints: Vec<RawComplainEntry>,
}

impl MsgComplain {
    /// All entries in a single `Complain` message must share one
    /// complainer and none may self-accuse; these are the only checks
    /// that don't need the member roster.
    pub fn validate_basic(&self) -> Result<Vec<ComplainEntry>, ValidationError> {
        crate::address::Address::from_bech32(&self.member)?;

        if self.complaints.is_empty() {
            return Err(ValidationError::EmptyComplaints);
        }

        let complainer = self.complaints[0].complainer;
        if self.complaints.iter().any(|c| c.complainer != complainer) {
            return Err(ValidationError::MixedComplainer);
        }
        if self.complaints.iter().any(|c| c.complainant == complainer) {
            return Err(ValidationError::SelfComplaint);
        }

        self.complaints
            .iter()
            .map(|c| {
                Ok(ComplainEntry {
                    complainer: c.complainer,
                    complainant: c.complainant,
                    key_sym: wire::parse_scalar(&c.key_sym)?,
                    nonce_sym: wire::parse_scalar(&c.nonce_sym)?,
                    signature: c.signature.parse()?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    fn addr() -> String {
        crate::address::Address::from_bytes(&[5; crate::address::ADDR_LEN])
            .unwrap()
            .to_bech32()
    }

    fn entry(complainer: MemberId, complainant: MemberId) -> RawComplainEntry {
        use crate::crypto::{schnorr, CurvePoint, CurveScalar};
        let priv_i = CurveScalar::random();
        let priv_j = CurveScalar::random();
        let pub_i = CurvePoint::generator() * &priv_i;
        let pub_j = CurvePoint::generator() * &priv_j;
        let (proof, key_sym, nonce_sym) = schnorr::sign_complain(&pub_i, &pub_j, &priv_i);
        RawComplainEntry {
            complainer,
            complainant,
            key_sym: key_sym.to_bytes().as_ref().try_into().unwrap(),
            nonce_sym: nonce_sym.to_bytes().as_ref().try_into().unwrap(),
            signature: RawComplainProof {
                shared: proof.shared.to_bytes(true).to_vec(),
                r1: proof.r1.to_bytes(true).to_vec(),
                r2: proof.r2.to_bytes(true).to_vec(),
                s: proof.s.to_bytes().as_ref().try_into().unwrap(),
            },
        }
    }

    #[test]
    fn accepts_single_complainer_entries() {
        let msg = MsgComplain {
            member: addr(),
            group_id: 1,
            complaints: vec![entry(1, 2), entry(1, 3)],
        };
        assert_eq!(msg.validate_basic().unwrap().len(), 2);
    }

    #[test]
    fn rejects_mixed_complainer() {
        let msg = MsgComplain {
            member: addr(),
            group_id: 1,
            complaints: vec![entry(1, 2), entry(4, 3)],
        };
        assert_eq!(
            msg.validate_basic().unwrap_err(),
            ValidationError::MixedComplainer
        );
    }

    #[test]
    fn rejects_self_complaint() {
        let msg = MsgComplain {
            member: addr(),
            group_id: 1,
            complaints: vec![entry(1, 1)],
        };
        assert_eq!(
            msg.validate_basic().unwrap_err(),
            ValidationError::SelfComplaint
        );
    }

    #[test]
    fn rejects_empty_complaints() {
        let msg = MsgComplain {
            member: addr(),
            group_id: 1,
            complaints: vec![],
        };
        assert_eq!(
            msg.validate_basic().unwrap_err(),
            ValidationError::EmptyComplaints
        );
    }
}
