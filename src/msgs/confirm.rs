use crate::error::ValidationError;
use crate::msgs::wire::RawSignature;
use crate::types::{Confirmation, GroupId, MemberId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgConfirm {
    pub member: String,
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub own_pub_key_sig: RawSignature,
}

impl MsgConfirm {
    pub fn validate_basic(&self) -> Result<Confirmation, ValidationError> {
        crate::address::Address::from_bech32(&self.member)?;

        Ok(Confirmation {
            group_id: self.group_id,
            member_id: self.member_id,
            own_pub_key_sig: self.own_pub_key_sig.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{schnorr, CurvePoint, CurveScalar};
    use std::convert::TryInto;

    #[test]
    fn accepts_well_formed_confirmation() {
        let priv_share = CurveScalar::random();
        let group_pub = CurvePoint::generator() * &priv_share;
        let sig = schnorr::sign_own_pub_key(&priv_share, &group_pub, 1, b"ctx");

        let addr = crate::address::Address::from_bytes(&[7; crate::address::ADDR_LEN])
            .unwrap()
            .to_bech32();
        let msg = MsgConfirm {
            member: addr,
            group_id: 1,
            member_id: 1,
            own_pub_key_sig: RawSignature {
                r: sig.r.to_bytes(true).to_vec(),
                s: sig.s.to_bytes().as_ref().try_into().unwrap(),
            },
        };
        assert!(msg.validate_basic().is_ok());
    }
}
