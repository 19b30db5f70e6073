//! Bech32 account addresses.
//!
//! The host chain's bech32 parser/validator is an external capability;
//! this module provides the concrete thin wrapper the core needs to
//! parse and round-trip the addresses carried in every protocol message.
//! `ADDR_LEN` matches the 20-byte payload used by the source this module
//! was distilled from.

use crate::error::ValidationError;
use std::fmt;

/// Length, in bytes, of the raw address payload.
pub const ADDR_LEN: usize = 20;

/// Human-readable part used when encoding addresses to bech32.
pub const HRP: &str = "band";

/// A parsed, validated account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDR_LEN]);

impl Address {
    pub fn from_bech32(s: &str) -> Result<Self, ValidationError> {
        let (_hrp, data, _variant) = bech32::decode(s)
            .map_err(|e| ValidationError::InvalidAccAddressFormat(e.to_string()))?;
        let bytes = <Vec<u8> as bech32::FromBase32>::from_base32(&data)
            .map_err(|e| ValidationError::InvalidAccAddressFormat(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        if bytes.len() != ADDR_LEN {
            return Err(ValidationError::InvalidAccAddressFormat(format!(
                "expected {} bytes, got {}",
                ADDR_LEN,
                bytes.len()
            )));
        }
        let mut buf = [0u8; ADDR_LEN];
        buf.copy_from_slice(bytes);
        Ok(Address(buf))
    }

    pub fn to_bech32(&self) -> String {
        use bech32::ToBase32;
        bech32::encode(HRP, self.0.to_base32(), bech32::Variant::Bech32)
            .expect("hrp is a valid bech32 human-readable part")
    }

    pub fn as_bytes(&self) -> &[u8; ADDR_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl std::str::FromStr for Address {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}

/// Checks whether `members` contains any duplicate address, mirroring
/// `DuplicateInArray` from the source's `MsgCreateGroup.ValidateBasic`.
pub fn has_duplicate(members: &[Address]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(members.len());
    members.iter().any(|m| !seen.insert(*m))
}
