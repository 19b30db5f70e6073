//! Wire-level byte representations that `validate_basic` parses into
//! the typed crypto primitives used by the rest of the crate.

use crate::crypto::{self, CurvePoint, CurveScalar, Signature};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignature {
    pub r: Vec<u8>,
    pub s: [u8; 32],
}

impl RawSignature {
    pub fn parse(&self) -> Result<Signature, ValidationError> {
        Ok(Signature {
            r: crypto::point_parse(&self.r)?,
            s: crypto::scalar_parse(&self.s)?,
        })
    }
}

pub fn parse_point(bytes: &[u8]) -> Result<CurvePoint, ValidationError> {
    crypto::point_parse(bytes)
}

pub fn parse_scalar(bytes: &[u8; 32]) -> Result<CurveScalar, ValidationError> {
    crypto::scalar_parse(bytes)
}
