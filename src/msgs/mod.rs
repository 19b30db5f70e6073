//! Protocol messages and their local (state-independent) validation.
//!
//! Each message's `validate_basic` follows the usual Cosmos SDK
//! `ValidateBasic` convention: bech32 address parsing, non-empty
//! required vectors, and per-point/per-scalar validation, with no state
//! repository access.

mod complain;
mod confirm;
mod create_group;
mod sign;
mod submit_des;
mod submit_round1;
mod submit_round2;
mod wire;

pub use complain::{MsgComplain, RawComplainEntry, RawComplainProof};
pub use confirm::MsgConfirm;
pub use create_group::{MsgCreateGroup, ParsedCreateGroup};
pub use sign::{MsgRequestSignature, MsgSign};
pub use submit_des::{MsgSubmitDEs, RawDEPair};
pub use submit_round1::{MsgSubmitDKGRound1, RawRound1Info};
pub use submit_round2::{MsgSubmitDKGRound2, RawRound2Info};
pub use wire::RawSignature;
