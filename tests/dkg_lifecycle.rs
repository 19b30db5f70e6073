//! End-to-end coverage of the DKG round state machine, driven entirely
//! through the public handler functions and an in-memory `KVStore` —
//! the scenarios a real host integration would exercise.

use tss_group_core::address::Address;
use tss_group_core::crypto::CurvePoint;
use tss_group_core::error::{TssError, ValidationError};
use tss_group_core::keeper::{MemoryStore, StateRepository};
use tss_group_core::member_agent::{AgentOutcome, MemberAgent};
use tss_group_core::state_machine;
use tss_group_core::types::{GroupId, GroupStatus, Round1Data, Round2Data};

fn addr(b: u8) -> Address {
    Address::from_bytes(&[b; tss_group_core::address::ADDR_LEN]).unwrap()
}

fn setup_group(
    store: &mut MemoryStore,
    n: u16,
    t: u16,
) -> (GroupId, Vec<Address>, Vec<MemberAgent>, [u8; 32]) {
    // Tests run in parallel in one process; try_init ignores the
    // already-initialized error from every call after the first, and
    // RUST_LOG controls which of state_machine's transition-boundary
    // logs actually print.
    let _ = env_logger::try_init();

    let members: Vec<Address> = (1..=n).map(|i| addr(i as u8)).collect();
    let dkg_context = [42u8; 32];

    let mut repo = StateRepository::new(store);
    let group_id = state_machine::create_group(&mut repo, &members, t, dkg_context).unwrap();

    let agents: Vec<MemberAgent> = members
        .iter()
        .enumerate()
        .map(|(idx, address)| {
            MemberAgent::new(group_id, (idx + 1) as u16, *address, dkg_context, t)
        })
        .collect();

    (group_id, members, agents, dkg_context)
}

fn run_round1(
    store: &mut MemoryStore,
    group_id: GroupId,
    members: &[Address],
    agents: &[MemberAgent],
) -> Vec<Round1Data> {
    let round1s: Vec<Round1Data> = agents.iter().map(|a| a.round1_submission()).collect();
    let mut repo = StateRepository::new(store);
    for (address, data) in members.iter().zip(round1s.iter()) {
        state_machine::submit_round1(&mut repo, address, group_id, data.clone()).unwrap();
    }
    round1s
}

fn run_round2(
    store: &mut MemoryStore,
    group_id: GroupId,
    members: &[Address],
    agents: &[MemberAgent],
    round1s: &[Round1Data],
) -> Vec<Round2Data> {
    let round2s: Vec<Round2Data> = agents
        .iter()
        .map(|a| a.round2_submission(round1s))
        .collect();
    let mut repo = StateRepository::new(store);
    for (address, data) in members.iter().zip(round2s.iter()) {
        state_machine::submit_round2(&mut repo, address, group_id, data.clone()).unwrap();
    }
    round2s
}

fn group_pub_key(round1s: &[Round1Data]) -> CurvePoint {
    let mut acc = CurvePoint::zero();
    for r in round1s {
        acc = acc + r.coefficient_commits[0].clone();
    }
    acc
}

#[test]
fn scenario_1_honest_group_reaches_active() {
    let mut store = MemoryStore::new();
    let (group_id, members, agents, _ctx) = setup_group(&mut store, 3, 2);

    let round1s = run_round1(&mut store, group_id, &members, &agents);
    {
        let repo = StateRepository::new(&mut store);
        assert_eq!(repo.get_group(group_id).unwrap().status, GroupStatus::Round2);
    }

    let round2s = run_round2(&mut store, group_id, &members, &agents, &round1s);
    {
        let repo = StateRepository::new(&mut store);
        assert_eq!(repo.get_group(group_id).unwrap().status, GroupStatus::Round3Confirm);
    }

    let pub_key = group_pub_key(&round1s);
    let mut repo = StateRepository::new(&mut store);
    for (address, agent) in members.iter().zip(agents.iter()) {
        match agent.process_round2(&round1s, &round2s, &pub_key) {
            AgentOutcome::Confirm(confirmation) => {
                state_machine::confirm(&mut repo, address, group_id, confirmation).unwrap();
            }
            AgentOutcome::Complain(_) => panic!("honest group should never complain"),
        }
    }

    let group = repo.get_group(group_id).unwrap();
    assert_eq!(group.status, GroupStatus::Active);
    let accumulated = repo.get_accumulated_commit(group_id);
    assert_eq!(group.pub_key, Some(accumulated[0].to_bytes(true).to_vec()));
}

#[test]
fn scenario_2_bad_share_falls_the_group() {
    let mut store = MemoryStore::new();
    let (group_id, members, agents, _ctx) = setup_group(&mut store, 3, 2);

    let round1s = run_round1(&mut store, group_id, &members, &agents);
    let mut round2s = run_round2(&mut store, group_id, &members, &agents, &round1s);

    // member 2 ships member 1 a tampered ciphertext.
    let sender_idx = round2s.iter().position(|r| r.member_id == 2).unwrap();
    round2s[sender_idx].encrypted_secret_shares
        [state_machine::share_slot(2, 1)][0] ^= 0xFF;
    {
        let mut repo = StateRepository::new(&mut store);
        repo.set_round2_data(&round2s[sender_idx]);
    }

    let pub_key = group_pub_key(&round1s);
    let member1 = &agents[0];
    let outcome = member1.process_round2(&round1s, &round2s, &pub_key);
    let entries = match outcome {
        AgentOutcome::Complain(entries) => entries,
        AgentOutcome::Confirm(_) => panic!("expected member 1 to detect the bad share"),
    };

    let mut repo = StateRepository::new(&mut store);
    state_machine::complain(&mut repo, &members[0], group_id, entries).unwrap();

    let group = repo.get_group(group_id).unwrap();
    assert_eq!(group.status, GroupStatus::Fallen);
    assert!(repo.get_member(group_id, 2).unwrap().is_malicious);
}

#[test]
fn scenario_3_false_complaint_marks_complainer_malicious() {
    let mut store = MemoryStore::new();
    let (group_id, members, agents, ctx) = setup_group(&mut store, 3, 2);

    let round1s = run_round1(&mut store, group_id, &members, &agents);
    let round2s = run_round2(&mut store, group_id, &members, &agents, &round1s);

    // member 1 falsely complains against honest member 2.
    let member2_r1 = round1s.iter().find(|r| r.member_id == 2).unwrap();
    let entry = agents[0].complain_against(member2_r1);
    let _ = ctx;

    let mut repo = StateRepository::new(&mut store);
    state_machine::complain(&mut repo, &members[0], group_id, vec![entry]).unwrap();

    let group = repo.get_group(group_id).unwrap();
    assert_eq!(group.status, GroupStatus::Fallen);
    assert!(repo.get_member(group_id, 1).unwrap().is_malicious);
    assert!(!repo.get_member(group_id, 2).unwrap().is_malicious);
}

#[test]
fn scenario_4_duplicate_round1_is_rejected() {
    let mut store = MemoryStore::new();
    let (group_id, members, agents, _ctx) = setup_group(&mut store, 3, 2);

    let data = agents[0].round1_submission();
    let mut repo = StateRepository::new(&mut store);
    state_machine::submit_round1(&mut repo, &members[0], group_id, data.clone()).unwrap();

    let err = state_machine::submit_round1(&mut repo, &members[0], group_id, data).unwrap_err();
    assert!(matches!(err, TssError::AlreadySubmit));
}

#[test]
fn scenario_5_wrong_share_count_is_rejected() {
    let mut store = MemoryStore::new();
    let (group_id, members, agents, _ctx) = setup_group(&mut store, 3, 2);

    let round1s = run_round1(&mut store, group_id, &members, &agents);
    let mut bad = agents[0].round2_submission(&round1s);
    bad.encrypted_secret_shares.pop();

    let mut repo = StateRepository::new(&mut store);
    let err = state_machine::submit_round2(&mut repo, &members[0], group_id, bad).unwrap_err();
    assert!(matches!(
        err,
        TssError::Validation(ValidationError::EncryptedSecretSharesNotCorrectLength {
            got: 1,
            want: 2
        })
    ));
}
