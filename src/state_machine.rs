//! The per-group DKG driver: on each validated message, advances group
//! status, accumulates commitments, tallies per-round submissions, and
//! triggers ACTIVE/FALLEN transitions.
//!
//! Every handler here assumes its message already passed
//! `validate_basic` (crypto/structural checks with no state access);
//! what remains are the guards that need the current group/member
//! state.

use crate::crypto;
use crate::error::TssError;
use crate::keeper::{KVStore, StateRepository};
use crate::types::{
    ComplainEntry, ComplaintStatus, ComplaintWithStatus, Confirmation, DEPair, Group, GroupId,
    GroupStatus, Member, MemberId, Round1Data, Round2Data,
};
use crate::Address;
use log::{info, warn};

/// Index of the ciphertext destined for `recipient` inside a Round2
/// submission sent by `sender`, given the sender omits their own share.
pub fn share_slot(sender: MemberId, recipient: MemberId) -> usize {
    (if recipient < sender {
        recipient - 1
    } else {
        recipient - 2
    }) as usize
}

fn require_status(group: &Group, expected: GroupStatus) -> Result<(), TssError> {
    if group.status != expected {
        return Err(TssError::UnexpectedStatus {
            expected: expected.to_string(),
            got: group.status.to_string(),
        });
    }
    Ok(())
}

/// Allocates a new group with `MemberId`s 1..N assigned in submission
/// order, in `ROUND_1`. `dkg_context` is supplied by the host (e.g.
/// derived from the creating transaction's hash) since this core has
/// no randomness source of its own.
pub fn create_group<S: KVStore>(
    repo: &mut StateRepository<S>,
    members: &[Address],
    threshold: u16,
    dkg_context: [u8; 32],
) -> Result<GroupId, TssError> {
    let group_id = repo.next_group_id();
    let size = members.len() as u16;

    let group = Group {
        id: group_id,
        size,
        threshold,
        dkg_context,
        status: GroupStatus::Round1,
        pub_key: None,
    };
    repo.set_group(&group);
    repo.set_dkg_context(group_id, dkg_context);

    for (idx, address) in members.iter().enumerate() {
        let member_id = (idx + 1) as MemberId;
        repo.set_member(&Member {
            group_id,
            member_id,
            address: *address,
            pub_key: None,
            is_malicious: false,
        });
    }
    repo.set_round1_count(group_id, 0);
    repo.set_round2_count(group_id, 0);
    repo.set_accumulated_commit(group_id, &vec![crypto::CurvePoint::zero(); threshold as usize]);

    info!("group {} created: size={} threshold={}", group_id, size, threshold);
    Ok(group_id)
}

/// Appends a member's pre-committed signing-nonce pairs to their DE
/// queue, to be drawn down one pair per signing session by the (out of
/// scope) signing module.
pub fn submit_des<S: KVStore>(
    repo: &mut StateRepository<S>,
    sender: &Address,
    pairs: Vec<DEPair>,
) {
    for pair in pairs {
        repo.push_de_pair(sender, pair);
    }
}

/// Applies a member's Round 1 submission: verifies the proofs of
/// knowledge against the group's `dkg_context`, folds the commitment
/// vector into the running accumulated commit, and advances the group
/// to `ROUND_2` once every member has submitted.
pub fn submit_round1<S: KVStore>(
    repo: &mut StateRepository<S>,
    member_address: &Address,
    group_id: GroupId,
    data: Round1Data,
) -> Result<(), TssError> {
    let mut group = repo.get_group(group_id)?;
    require_status(&group, GroupStatus::Round1)?;

    let member = repo
        .member_by_address(group_id, member_address)
        .ok_or(TssError::MemberNotAuthorized)?;
    if member.member_id != data.member_id {
        return Err(TssError::MemberNotAuthorized);
    }
    if repo.has_round1_data(group_id, member.member_id) {
        return Err(TssError::AlreadySubmit);
    }
    if data.coefficient_commits.len() != group.threshold as usize {
        return Err(crate::error::ValidationError::CommitsNotCorrectLength {
            got: data.coefficient_commits.len(),
            want: group.threshold as usize,
        }
        .into());
    }

    let a0_pub = &data.coefficient_commits[0];
    if !crypto::schnorr::verify_a0(
        a0_pub,
        &group.dkg_context,
        member.member_id,
        member_address.as_bytes(),
        &data.a0_sig,
    ) {
        return Err(TssError::VerifyA0SigFailed);
    }
    if !crypto::schnorr::verify_one_time(
        &data.one_time_pub_key,
        &group.dkg_context,
        member.member_id,
        member_address.as_bytes(),
        &data.one_time_sig,
    ) {
        return Err(TssError::VerifyOneTimeSigFailed);
    }

    let mut accumulated = repo.get_accumulated_commit(group_id);
    if accumulated.len() != data.coefficient_commits.len() {
        return Err(TssError::CommitsNotCorrectLength);
    }
    for (acc, c) in accumulated.iter_mut().zip(data.coefficient_commits.iter()) {
        *acc = acc.clone() + c.clone();
    }
    repo.set_accumulated_commit(group_id, &accumulated);
    repo.set_round1_data(&data);

    let count = repo.round1_count(group_id) + 1;
    repo.set_round1_count(group_id, count);
    if count == group.size {
        group.status = GroupStatus::Round2;
        repo.set_group(&group);
        info!("group {} entering ROUND_2", group_id);
    }
    Ok(())
}

/// Applies a member's Round 2 submission (their encrypted shares for
/// every peer) and advances the group to the round-3 window once every
/// member has submitted.
pub fn submit_round2<S: KVStore>(
    repo: &mut StateRepository<S>,
    member_address: &Address,
    group_id: GroupId,
    data: Round2Data,
) -> Result<(), TssError> {
    let mut group = repo.get_group(group_id)?;
    require_status(&group, GroupStatus::Round2)?;

    let member = repo
        .member_by_address(group_id, member_address)
        .ok_or(TssError::MemberNotAuthorized)?;
    if member.member_id != data.member_id {
        return Err(TssError::MemberNotAuthorized);
    }
    if repo.has_round2_data(group_id, member.member_id) {
        return Err(TssError::AlreadySubmit);
    }
    let want = group.size as usize - 1;
    if data.encrypted_secret_shares.len() != want {
        return Err(crate::error::ValidationError::EncryptedSecretSharesNotCorrectLength {
            got: data.encrypted_secret_shares.len(),
            want,
        }
        .into());
    }

    repo.set_round2_data(&data);
    let count = repo.round2_count(group_id) + 1;
    repo.set_round2_count(group_id, count);
    if count == group.size {
        group.status = GroupStatus::Round3Confirm;
        repo.set_group(&group);
        info!("group {} entering round 3 (optimistic confirm window)", group_id);
    }
    Ok(())
}

fn malicious_count<S: KVStore>(repo: &StateRepository<S>, group_id: GroupId) -> u16 {
    repo.members(group_id)
        .into_iter()
        .filter(|m| m.is_malicious)
        .count() as u16
}

fn acted_count<S: KVStore>(repo: &StateRepository<S>, group_id: GroupId) -> u16 {
    let confirmed = repo.confirmations(group_id).len() as u16;
    let complained = repo.complaints(group_id).len() as u16;
    confirmed + complained
}

/// Checks whether the round-3 window is complete and, if so, resolves
/// the group to `ACTIVE` or `FALLEN`. Called after every Complain and
/// Confirm application.
fn try_resolve_round3<S: KVStore>(
    repo: &mut StateRepository<S>,
    group: &mut Group,
) -> Result<(), TssError> {
    if acted_count(repo, group.id) < group.size {
        return Ok(());
    }
    let malicious = malicious_count(repo, group.id);
    if malicious == 0 {
        let accumulated = repo.get_accumulated_commit(group.id);
        let pub_key = crypto::compute_group_public_key(&accumulated[0]);
        group.status = GroupStatus::Active;
        group.pub_key = Some(pub_key.to_bytes(true).to_vec());
        info!("group {} is ACTIVE", group.id);
    } else {
        group.status = GroupStatus::Fallen;
        warn!("group {} FALLEN: {} malicious member(s)", group.id, malicious);
    }
    repo.set_group(group);
    Ok(())
}

/// Applies a member's complaint: for every accused peer, verifies the
/// disclosed `key_sym` proof and Feldman-checks the decrypted share
/// against the accused's own Round 1 commitments, marking the losing
/// party malicious.
pub fn complain<S: KVStore>(
    repo: &mut StateRepository<S>,
    member_address: &Address,
    group_id: GroupId,
    entries: Vec<ComplainEntry>,
) -> Result<(), TssError> {
    let mut group = repo.get_group(group_id)?;
    if !group.status.is_round3() {
        return Err(TssError::UnexpectedStatus {
            expected: "ROUND_3_*".into(),
            got: group.status.to_string(),
        });
    }

    let complainer = repo
        .member_by_address(group_id, member_address)
        .ok_or(TssError::MemberNotAuthorized)?;
    let entry_complainer = entries.first().ok_or(TssError::ComplainFailed)?.complainer;
    if complainer.member_id != entry_complainer {
        return Err(TssError::MemberNotAuthorized);
    }
    if complainer.is_malicious
        || repo.has_complaint(group_id, complainer.member_id)
        || repo.has_confirmation(group_id, complainer.member_id)
    {
        return Err(TssError::MemberIsAlreadyComplainOrConfirm);
    }

    let mut labeled = Vec::with_capacity(entries.len());
    let mut newly_malicious = Vec::new();

    for entry in entries {
        let complainant = repo.get_member(group_id, entry.complainant)?;
        let complainer_round1 = repo.get_round1_data(group_id, complainer.member_id)?;
        let complainant_round1 = repo.get_round1_data(group_id, entry.complainant)?;

        let proof_ok = crypto::schnorr::verify_complain(
            &complainer_round1.one_time_pub_key,
            &complainant_round1.one_time_pub_key,
            &entry.nonce_sym,
            &entry.signature,
        );
        if !proof_ok {
            return Err(TssError::ComplainFailed);
        }

        let complainant_round2 = repo.get_round2_data(group_id, entry.complainant)?;
        let slot = share_slot(entry.complainant, complainer.member_id);
        let ciphertext = complainant_round2
            .encrypted_secret_shares
            .get(slot)
            .ok_or(TssError::ComplainFailed)?;
        let share = crypto::decrypt(ciphertext, &entry.key_sym)
            .map_err(|_| TssError::ComplainFailed)?;

        let share_ok = crypto::verify_secret_share(
            complainer.member_id,
            &share,
            &complainant_round1.coefficient_commits,
        );

        let status = if share_ok {
            newly_malicious.push(complainer.member_id);
            ComplaintStatus::Failed
        } else {
            newly_malicious.push(complainant.member_id);
            ComplaintStatus::Success
        };
        labeled.push((entry, status));
    }

    for member_id in newly_malicious {
        let mut m = repo.get_member(group_id, member_id)?;
        m.is_malicious = true;
        repo.set_member(&m);
    }

    repo.set_complaint(&ComplaintWithStatus {
        group_id,
        complainer: complainer.member_id,
        entries: labeled,
    });

    // Reaching ACTIVE requires every one of the N members to confirm;
    // an adjudicated complaint always marks exactly one party
    // malicious, so it always forecloses that outcome. This core does
    // not re-deal or exclude a participant and retry, so the group
    // falls immediately rather than waiting for the rest of the round-3
    // window to close.
    group.status = GroupStatus::Fallen;
    repo.set_group(&group);
    warn!("group {} FALLEN: adjudicated complaint", group_id);
    Ok(())
}

/// Applies a member's confirmation: verifies that the member's own
/// derived share matches the accumulated commitment, then checks
/// whether the round-3 window is now complete.
pub fn confirm<S: KVStore>(
    repo: &mut StateRepository<S>,
    member_address: &Address,
    group_id: GroupId,
    confirmation: Confirmation,
) -> Result<(), TssError> {
    let mut group = repo.get_group(group_id)?;
    if !group.status.is_round3() {
        return Err(TssError::UnexpectedStatus {
            expected: "ROUND_3_*".into(),
            got: group.status.to_string(),
        });
    }

    let member = repo
        .member_by_address(group_id, member_address)
        .ok_or(TssError::MemberNotAuthorized)?;
    if member.member_id != confirmation.member_id {
        return Err(TssError::MemberNotAuthorized);
    }
    if member.is_malicious
        || repo.has_complaint(group_id, member.member_id)
        || repo.has_confirmation(group_id, member.member_id)
    {
        return Err(TssError::MemberIsAlreadyComplainOrConfirm);
    }

    let accumulated = repo.get_accumulated_commit(group_id);
    let derived_pub = crypto::evaluate_commitment(member.member_id, &accumulated);

    if !crypto::schnorr::verify_own_pub_key(
        &derived_pub,
        &crypto::compute_group_public_key(&accumulated[0]),
        member.member_id,
        &group.dkg_context,
        &confirmation.own_pub_key_sig,
    ) {
        return Err(TssError::ConfirmFailed);
    }

    let mut updated_member = member;
    updated_member.pub_key = Some(derived_pub.to_bytes(true).to_vec());
    repo.set_member(&updated_member);
    repo.set_confirmation(&confirmation);

    try_resolve_round3(repo, &mut group)
}

/// Host-triggered end-of-round check: if the expected submission count
/// for the group's current round was not reached by the time the host
/// calls this (e.g. a per-block-height deadline), the group falls to
/// `FALLEN` with `RoundExpired`. A no-op once the group is terminal.
pub fn end_round<S: KVStore>(repo: &mut StateRepository<S>, group_id: GroupId) -> Result<(), TssError> {
    let mut group = repo.get_group(group_id)?;
    if group.status.is_terminal() {
        return Ok(());
    }

    let incomplete = match group.status {
        GroupStatus::Round1 => repo.round1_count(group_id) < group.size,
        GroupStatus::Round2 => repo.round2_count(group_id) < group.size,
        GroupStatus::Round3Complain | GroupStatus::Round3Confirm => {
            acted_count(repo, group_id) < group.size
        }
        GroupStatus::PendingCreation | GroupStatus::Active | GroupStatus::Fallen => false,
    };

    if incomplete {
        group.status = GroupStatus::Fallen;
        repo.set_group(&group);
        warn!("group {} FALLEN: round expired", group_id);
        return Err(TssError::RoundExpired);
    }
    Ok(())
}
