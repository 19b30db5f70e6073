//! On-chain coordination core of a threshold signature scheme (TSS) group.
//!
//! This crate implements a deterministic state machine that drives a set of
//! participants through a Distributed Key Generation (DKG) protocol,
//! adjudicates misbehavior via a complaint/confirmation sub-protocol, and
//! keeps per-group persistent state from which an aggregate group public
//! key is derived. It also tracks each member's pool of pre-committed
//! signing nonces ("DE pairs") and validates participant-submitted
//! messages against cryptographic and structural invariants.
//!
//! The host blockchain, transaction authorization, CLI, and RPC transport
//! are external collaborators and out of scope for this crate; see
//! [`keeper::KVStore`] for the narrow interface the core expects from its
//! host.

pub mod address;
pub mod crypto;
pub mod error;
pub mod fee;
pub mod keeper;
pub mod member_agent;
pub mod msgs;
pub mod state_machine;
pub mod types;

pub use address::Address;
pub use error::TssError;
