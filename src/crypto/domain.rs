//! Domain separator constants: one distinct ASCII tag per
//! signing/derivation context so that no two contexts can ever produce
//! colliding hash inputs.

pub const ECDH: &str = "tss/ecdh";
pub const ENCRYPT: &str = "tss/encrypt";
pub const SIGN_A0: &str = "tss/sign/a0";
pub const SIGN_ONE_TIME: &str = "tss/sign/one_time";
pub const SIGN_OWN_PUB_KEY: &str = "tss/sign/own_pub_key";
pub const SIGN_COMPLAIN: &str = "tss/sign/complain";
