use super::keys;
use super::KVStore;
use crate::crypto::CurvePoint;
use crate::error::TssError;
use crate::types::{
    ComplaintWithStatus, Confirmation, DEPair, DEQueue, Group, GroupId, Member, MemberId,
    Round1Data, Round2Data,
};
use crate::Address;

/// Typed access to a group's persisted state, built on top of a raw
/// [`KVStore`]. Every read that a handler in [`crate::state_machine`]
/// needs goes through here; nothing in the state machine encodes a key
/// prefix or calls `serde_json` directly.
pub struct StateRepository<'a, S: KVStore> {
    store: &'a mut S,
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("entity types are always serializable")
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).expect("persisted entity was written by this crate")
}

impl<'a, S: KVStore> StateRepository<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn next_group_id(&mut self) -> GroupId {
        let key = keys::next_group_id_key();
        let next = self
            .store
            .get(&key)
            .map(|b| decode::<GroupId>(&b))
            .unwrap_or(0)
            + 1;
        self.store.set(&key, encode(&next));
        next
    }

    pub fn get_group(&self, group_id: GroupId) -> Result<Group, TssError> {
        self.store
            .get(&keys::group_key(group_id))
            .map(|b| decode(&b))
            .ok_or(TssError::GroupNotFound(group_id))
    }

    pub fn set_group(&mut self, group: &Group) {
        self.store.set(&keys::group_key(group.id), encode(group));
    }

    pub fn get_dkg_context(&self, group_id: GroupId) -> Result<[u8; 32], TssError> {
        self.store
            .get(&keys::dkg_context_key(group_id))
            .map(|b| decode(&b))
            .ok_or(TssError::DKGContextNotFound(group_id))
    }

    pub fn set_dkg_context(&mut self, group_id: GroupId, context: [u8; 32]) {
        self.store
            .set(&keys::dkg_context_key(group_id), encode(&context));
    }

    pub fn get_member(&self, group_id: GroupId, member_id: MemberId) -> Result<Member, TssError> {
        self.store
            .get(&keys::member_key(group_id, member_id))
            .map(|b| decode(&b))
            .ok_or(TssError::MemberNotFound { group_id, member_id })
    }

    pub fn set_member(&mut self, member: &Member) {
        self.store.set(
            &keys::member_key(member.group_id, member.member_id),
            encode(member),
        );
    }

    pub fn members(&self, group_id: GroupId) -> Vec<Member> {
        self.store
            .iterate(&keys::member_prefix(group_id))
            .into_iter()
            .map(|(_, v)| decode(&v))
            .collect()
    }

    pub fn member_by_address(&self, group_id: GroupId, address: &Address) -> Option<Member> {
        self.members(group_id)
            .into_iter()
            .find(|m| &m.address == address)
    }

    pub fn get_round1_data(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<Round1Data, TssError> {
        self.store
            .get(&keys::round1_key(group_id, member_id))
            .map(|b| decode(&b))
            .ok_or(TssError::Round1DataNotFound { group_id, member_id })
    }

    pub fn has_round1_data(&self, group_id: GroupId, member_id: MemberId) -> bool {
        self.store.get(&keys::round1_key(group_id, member_id)).is_some()
    }

    pub fn set_round1_data(&mut self, data: &Round1Data) {
        self.store.set(
            &keys::round1_key(data.group_id, data.member_id),
            encode(data),
        );
    }

    pub fn round1_data(&self, group_id: GroupId) -> Vec<Round1Data> {
        self.store
            .iterate(&keys::round1_prefix(group_id))
            .into_iter()
            .map(|(_, v)| decode(&v))
            .collect()
    }

    pub fn round1_count(&self, group_id: GroupId) -> u16 {
        self.store
            .get(&keys::round1_count_key(group_id))
            .map(|b| decode(&b))
            .unwrap_or(0)
    }

    pub fn set_round1_count(&mut self, group_id: GroupId, count: u16) {
        self.store
            .set(&keys::round1_count_key(group_id), encode(&count));
    }

    pub fn has_round2_data(&self, group_id: GroupId, member_id: MemberId) -> bool {
        self.store.get(&keys::round2_key(group_id, member_id)).is_some()
    }

    pub fn get_round2_data(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<Round2Data, TssError> {
        self.store
            .get(&keys::round2_key(group_id, member_id))
            .map(|b| decode(&b))
            .ok_or(TssError::Round2DataNotFound { group_id, member_id })
    }

    pub fn set_round2_data(&mut self, data: &Round2Data) {
        self.store.set(
            &keys::round2_key(data.group_id, data.member_id),
            encode(data),
        );
    }

    pub fn round2_data(&self, group_id: GroupId) -> Vec<Round2Data> {
        self.store
            .iterate(&keys::round2_prefix(group_id))
            .into_iter()
            .map(|(_, v)| decode(&v))
            .collect()
    }

    pub fn round2_count(&self, group_id: GroupId) -> u16 {
        self.store
            .get(&keys::round2_count_key(group_id))
            .map(|b| decode(&b))
            .unwrap_or(0)
    }

    pub fn set_round2_count(&mut self, group_id: GroupId, count: u16) {
        self.store
            .set(&keys::round2_count_key(group_id), encode(&count));
    }

    pub fn get_accumulated_commit(&self, group_id: GroupId) -> Vec<CurvePoint> {
        self.store
            .get(&keys::accumulated_commit_key(group_id))
            .map(|b| decode(&b))
            .unwrap_or_default()
    }

    pub fn set_accumulated_commit(&mut self, group_id: GroupId, commit: &[CurvePoint]) {
        self.store
            .set(&keys::accumulated_commit_key(group_id), encode(commit));
    }

    pub fn has_complaint(&self, group_id: GroupId, complainer: MemberId) -> bool {
        self.store
            .get(&keys::complaint_key(group_id, complainer))
            .is_some()
    }

    pub fn set_complaint(&mut self, entry: &ComplaintWithStatus) {
        self.store.set(
            &keys::complaint_key(entry.group_id, entry.complainer),
            encode(entry),
        );
    }

    pub fn complaints(&self, group_id: GroupId) -> Vec<ComplaintWithStatus> {
        self.store
            .iterate(&keys::complaint_prefix(group_id))
            .into_iter()
            .map(|(_, v)| decode(&v))
            .collect()
    }

    pub fn has_confirmation(&self, group_id: GroupId, member_id: MemberId) -> bool {
        self.store
            .get(&keys::confirmation_key(group_id, member_id))
            .is_some()
    }

    pub fn set_confirmation(&mut self, confirmation: &Confirmation) {
        self.store.set(
            &keys::confirmation_key(confirmation.group_id, confirmation.member_id),
            encode(confirmation),
        );
    }

    pub fn confirmations(&self, group_id: GroupId) -> Vec<Confirmation> {
        self.store
            .iterate(&keys::confirmation_prefix(group_id))
            .into_iter()
            .map(|(_, v)| decode(&v))
            .collect()
    }

    pub fn de_queue(&self, address: &Address) -> DEQueue {
        self.store
            .get(&keys::de_queue_key(address))
            .map(|b| decode(&b))
            .unwrap_or_default()
    }

    pub fn push_de_pair(&mut self, address: &Address, pair: DEPair) {
        let mut queue = self.de_queue(address);
        queue.push_back(pair);
        self.store.set(&keys::de_queue_key(address), encode(&queue));
    }

    pub fn pop_de_pair(&mut self, address: &Address) -> Option<DEPair> {
        let mut queue = self.de_queue(address);
        let pair = queue.pop_front();
        self.store.set(&keys::de_queue_key(address), encode(&queue));
        pair
    }
}
