//! The off-chain side of the DKG protocol: given the group's public
//! view, a member computes its own share, verifies every peer's
//! dealing, and emits exactly one of `Confirm` or `Complain`.
//!
//! None of this module touches the state repository; it only consumes
//! the same [`Round1Data`]/[`Round2Data`] records a query would return,
//! plus the participant's own long-term secrets.

use crate::crypto::{self, CurvePoint, CurveScalar};
use crate::state_machine::share_slot;
use crate::types::{ComplainEntry, Confirmation, GroupId, MemberId, Round1Data, Round2Data};
use crate::Address;
use derivative::Derivative;

/// A participant's session secrets: the polynomial coefficients dealt
/// to peers and the one-time keypair used to authenticate this
/// session's submissions. Replaced with zero scalars on drop — these
/// values never reach the state repository.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct MemberAgent {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub address: Address,
    pub dkg_context: [u8; 32],
    #[derivative(Debug = "ignore")]
    coefficients: Vec<CurveScalar>,
    #[derivative(Debug = "ignore")]
    one_time_priv: CurveScalar,
}

impl Drop for MemberAgent {
    fn drop(&mut self) {
        for c in self.coefficients.iter_mut() {
            *c = CurveScalar::zero();
        }
        self.one_time_priv = CurveScalar::zero();
    }
}

/// Outcome of processing a completed round 2: a member emits exactly
/// one of these per DKG session.
pub enum AgentOutcome {
    Confirm(Confirmation),
    Complain(Vec<ComplainEntry>),
}

impl MemberAgent {
    /// Starts a fresh session: draws `threshold` random polynomial
    /// coefficients and a fresh one-time keypair.
    pub fn new(
        group_id: GroupId,
        member_id: MemberId,
        address: Address,
        dkg_context: [u8; 32],
        threshold: u16,
    ) -> Self {
        let coefficients = (0..threshold).map(|_| CurveScalar::random()).collect();
        let one_time_priv = CurveScalar::random();
        Self {
            group_id,
            member_id,
            address,
            dkg_context,
            coefficients,
            one_time_priv,
        }
    }

    fn one_time_pub(&self) -> CurvePoint {
        CurvePoint::generator() * &self.one_time_priv
    }

    /// Builds this member's Round 1 submission: the Feldman commitment
    /// vector, a fresh one-time public key, and proofs of knowledge
    /// binding both to the group's DKG context.
    pub fn round1_submission(&self) -> Round1Data {
        let coefficient_commits = crypto::commit(&self.coefficients);
        let one_time_pub_key = self.one_time_pub();
        let a0_sig = crypto::schnorr::sign_a0(
            &self.coefficients[0],
            &self.dkg_context,
            self.member_id,
            self.address.as_bytes(),
        );
        let one_time_sig = crypto::schnorr::sign_one_time(
            &self.one_time_priv,
            &self.dkg_context,
            self.member_id,
            self.address.as_bytes(),
        );
        Round1Data {
            group_id: self.group_id,
            member_id: self.member_id,
            coefficient_commits,
            one_time_pub_key,
            a0_sig,
            one_time_sig,
        }
    }

    /// Builds this member's Round 2 submission: one encrypted share per
    /// peer (ordered by increasing `MemberId`, skipping self), keyed by
    /// an ECDH secret derived from each peer's Round 1 one-time public
    /// key.
    pub fn round2_submission(&self, peers_round1: &[Round1Data]) -> Round2Data {
        let mut peers: Vec<&Round1Data> = peers_round1
            .iter()
            .filter(|p| p.member_id != self.member_id)
            .collect();
        peers.sort_by_key(|p| p.member_id);

        let encrypted_secret_shares = peers
            .iter()
            .map(|peer| {
                let share = crypto::compute_secret_share(&self.coefficients, peer.member_id);
                let key = crypto::key_sym(&self.one_time_priv, &peer.one_time_pub_key);
                crypto::encrypt(&share, &key)
            })
            .collect();

        Round2Data {
            group_id: self.group_id,
            member_id: self.member_id,
            encrypted_secret_shares,
        }
    }

    /// The member's own share of its own dealt polynomial, `f_i(i)`.
    fn own_dealt_share(&self) -> CurveScalar {
        crypto::compute_secret_share(&self.coefficients, self.member_id)
    }

    /// Produces a complaint entry against `peer`, disclosing the ECDH
    /// secret shared with them and a proof binding it to both one-time
    /// public keys. Exposed directly (not just through
    /// [`Self::process_round2`]'s honest-dealing check) since the
    /// chain must adjudicate a complaint regardless of whether the
    /// complainer's accusation turns out to be true.
    pub fn complain_against(&self, peer: &Round1Data) -> ComplainEntry {
        let (proof, key_sym, nonce_sym) = crypto::schnorr::sign_complain(
            &self.one_time_pub(),
            &peer.one_time_pub_key,
            &self.one_time_priv,
        );
        ComplainEntry {
            complainer: self.member_id,
            complainant: peer.member_id,
            key_sym,
            nonce_sym,
            signature: proof,
        }
    }

    /// Processes every peer's Round 1 commitments and Round 2 dealing
    /// addressed to this member: decrypts and Feldman-verifies each
    /// share, then emits a `Confirm` if every peer's dealing was
    /// honest or a `Complain` naming every peer that was not.
    pub fn process_round2(
        &self,
        peers_round1: &[Round1Data],
        peers_round2: &[Round2Data],
        group_pub_key: &CurvePoint,
    ) -> AgentOutcome {
        let mut shares = vec![self.own_dealt_share()];
        let mut complaints = Vec::new();

        for peer in peers_round1.iter().filter(|p| p.member_id != self.member_id) {
            let peer_round2 = match peers_round2.iter().find(|r| r.member_id == peer.member_id) {
                Some(r) => r,
                None => continue,
            };
            let slot = share_slot(peer.member_id, self.member_id);
            let ciphertext = match peer_round2.encrypted_secret_shares.get(slot) {
                Some(ct) => ct,
                None => continue,
            };
            let key_sym = crypto::key_sym(&self.one_time_priv, &peer.one_time_pub_key);

            let honest = crypto::decrypt(ciphertext, &key_sym)
                .ok()
                .filter(|share| {
                    crypto::verify_secret_share(self.member_id, share, &peer.coefficient_commits)
                });

            match honest {
                Some(share) => shares.push(share),
                None => complaints.push(self.complain_against(peer)),
            }
        }

        if !complaints.is_empty() {
            return AgentOutcome::Complain(complaints);
        }

        let own_priv = crypto::compute_own_private_key(&shares);
        let own_pub_key_sig = crypto::schnorr::sign_own_pub_key(
            &own_priv,
            group_pub_key,
            self.member_id,
            &self.dkg_context,
        );
        AgentOutcome::Confirm(Confirmation {
            group_id: self.group_id,
            member_id: self.member_id,
            own_pub_key_sig,
        })
    }
}
