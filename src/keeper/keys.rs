//! Key-prefix layout, following `x/tss/types/keys.go`: 0x06/0x07 are
//! reserved for Round2Data/Round2DataCount there, so AccumulatedCommit
//! and everything after it take the next free bytes instead.

use crate::types::{GroupId, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Prefix {
    GlobalCounters = 0x00,
    Group = 0x01,
    DKGContext = 0x02,
    Member = 0x03,
    Round1Data = 0x04,
    Round1Count = 0x05,
    Round2Data = 0x06,
    Round2Count = 0x07,
    AccumulatedCommit = 0x08,
    ComplaintWithStatus = 0x09,
    Confirmation = 0x0A,
    DEQueue = 0x0B,
}

fn with_prefix(prefix: Prefix, suffix: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + suffix.len());
    key.push(prefix as u8);
    key.extend_from_slice(suffix);
    key
}

pub fn group_key(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Group, &group_id.to_be_bytes())
}

pub fn dkg_context_key(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::DKGContext, &group_id.to_be_bytes())
}

pub fn member_prefix(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Member, &group_id.to_be_bytes())
}

pub fn member_key(group_id: GroupId, member_id: MemberId) -> Vec<u8> {
    let mut key = member_prefix(group_id);
    key.extend_from_slice(&member_id.to_be_bytes());
    key
}

pub fn round1_prefix(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Round1Data, &group_id.to_be_bytes())
}

pub fn round1_key(group_id: GroupId, member_id: MemberId) -> Vec<u8> {
    let mut key = round1_prefix(group_id);
    key.extend_from_slice(&member_id.to_be_bytes());
    key
}

pub fn round1_count_key(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Round1Count, &group_id.to_be_bytes())
}

pub fn round2_prefix(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Round2Data, &group_id.to_be_bytes())
}

pub fn round2_key(group_id: GroupId, member_id: MemberId) -> Vec<u8> {
    let mut key = round2_prefix(group_id);
    key.extend_from_slice(&member_id.to_be_bytes());
    key
}

pub fn round2_count_key(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Round2Count, &group_id.to_be_bytes())
}

pub fn accumulated_commit_key(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::AccumulatedCommit, &group_id.to_be_bytes())
}

pub fn complaint_prefix(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::ComplaintWithStatus, &group_id.to_be_bytes())
}

pub fn complaint_key(group_id: GroupId, complainer: MemberId) -> Vec<u8> {
    let mut key = complaint_prefix(group_id);
    key.extend_from_slice(&complainer.to_be_bytes());
    key
}

pub fn confirmation_prefix(group_id: GroupId) -> Vec<u8> {
    with_prefix(Prefix::Confirmation, &group_id.to_be_bytes())
}

pub fn confirmation_key(group_id: GroupId, member_id: MemberId) -> Vec<u8> {
    let mut key = confirmation_prefix(group_id);
    key.extend_from_slice(&member_id.to_be_bytes());
    key
}

pub fn de_queue_key(address: &crate::Address) -> Vec<u8> {
    with_prefix(Prefix::DEQueue, address.as_bytes())
}

pub fn next_group_id_key() -> Vec<u8> {
    with_prefix(Prefix::GlobalCounters, b"next_group_id")
}
