use crate::error::ValidationError;
use crate::msgs::wire;
use crate::types::DEPair;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDEPair {
    pub pub_d: Vec<u8>,
    pub pub_e: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgSubmitDEs {
    pub sender: String,
    pub des: Vec<RawDEPair>,
}

impl MsgSubmitDEs {
    pub fn validate_basic(&self) -> Result<Vec<DEPair>, ValidationError> {
        crate::address::Address::from_bech32(&self.sender)?;

        self.des
            .iter()
            .map(|d| {
                Ok(DEPair {
                    pub_d: wire::parse_point(&d.pub_d)?,
                    pub_e: wire::parse_point(&d.pub_e)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{CurvePoint, CurveScalar};

    #[test]
    fn accepts_well_formed_pairs() {
        let d = CurvePoint::generator() * CurveScalar::random();
        let e = CurvePoint::generator() * CurveScalar::random();
        let addr = crate::address::Address::from_bytes(&[4; crate::address::ADDR_LEN])
            .unwrap()
            .to_bech32();
        let msg = MsgSubmitDEs {
            sender: addr,
            des: vec![RawDEPair {
                pub_d: d.to_bytes(true).to_vec(),
                pub_e: e.to_bytes(true).to_vec(),
            }],
        };
        assert_eq!(msg.validate_basic().unwrap().len(), 1);
    }

    #[test]
    fn rejects_malformed_point() {
        let addr = crate::address::Address::from_bytes(&[4; crate::address::ADDR_LEN])
            .unwrap()
            .to_bech32();
        let msg = MsgSubmitDEs {
            sender: addr,
            des: vec![RawDEPair {
                pub_d: vec![0u8; 10],
                pub_e: vec![0u8; 33],
            }],
        };
        assert!(msg.validate_basic().is_err());
    }
}
