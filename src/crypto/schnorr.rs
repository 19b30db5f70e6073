//! Schnorr signing and verification for the four proof contexts the DKG
//! core needs: `a0` (proof of knowledge of the constant coefficient),
//! `one_time` (proof of knowledge of the one-time private key), `own
//! pub key` (confirmation that a member's derived share matches the
//! accumulated commitment), and `complain` (a Chaum-Pedersen
//! discrete-log-equivalence proof binding a disclosed ECDH output to
//! both parties' one-time public keys, used to adjudicate complaints
//! against bad DKG dealings).

use super::domain;
use super::{CurvePoint, CurveScalar};
use curv::arithmetic::Converter;
use curv::BigInt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A standard Schnorr signature `(r, s)` with `s = k + e * priv` and
/// `e = H(domain || r || pubkey || context)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Signature {
    pub r: CurvePoint,
    pub s: CurveScalar,
}

fn challenge(parts: &[&[u8]]) -> CurveScalar {
    let mut hasher = Sha256::new();
    for p in parts {
        hasher.update(p);
    }
    let digest = hasher.finalize();
    CurveScalar::from_bigint(&BigInt::from_bytes(&digest))
}

fn sign(domain_tag: &str, priv_key: &CurveScalar, context: &[&[u8]]) -> Signature {
    let k = CurveScalar::random();
    let r = CurvePoint::generator() * &k;
    let pub_key = CurvePoint::generator() * priv_key;
    let mut parts: Vec<&[u8]> = vec![domain_tag.as_bytes()];
    let r_bytes = r.to_bytes(true);
    let pub_bytes = pub_key.to_bytes(true);
    parts.push(r_bytes.as_ref());
    parts.push(pub_bytes.as_ref());
    parts.extend_from_slice(context);
    let e = challenge(&parts);
    let s = k + e * priv_key;
    Signature { r, s }
}

fn verify(domain_tag: &str, pub_key: &CurvePoint, context: &[&[u8]], sig: &Signature) -> bool {
    let mut parts: Vec<&[u8]> = vec![domain_tag.as_bytes()];
    let r_bytes = sig.r.to_bytes(true);
    let pub_bytes = pub_key.to_bytes(true);
    parts.push(r_bytes.as_ref());
    parts.push(pub_bytes.as_ref());
    parts.extend_from_slice(context);
    let e = challenge(&parts);
    let lhs = CurvePoint::generator() * &sig.s;
    let rhs = sig.r.clone() + pub_key * &e;
    lhs == rhs
}

/// Signs the constant coefficient `a0 = coeffs[0]`, binding the proof to
/// the group's DKG context, the signer's member id, and address.
pub fn sign_a0(a0: &CurveScalar, dkg_context: &[u8], member_id: u16, address: &[u8]) -> Signature {
    sign(
        domain::SIGN_A0,
        a0,
        &[dkg_context, &member_id.to_be_bytes(), address],
    )
}

pub fn verify_a0(
    a0_pub: &CurvePoint,
    dkg_context: &[u8],
    member_id: u16,
    address: &[u8],
    sig: &Signature,
) -> bool {
    verify(
        domain::SIGN_A0,
        a0_pub,
        &[dkg_context, &member_id.to_be_bytes(), address],
        sig,
    )
}

/// Signs proof of knowledge of the one-time private key generated for
/// this DKG session.
pub fn sign_one_time(
    one_time_priv: &CurveScalar,
    dkg_context: &[u8],
    member_id: u16,
    address: &[u8],
) -> Signature {
    sign(
        domain::SIGN_ONE_TIME,
        one_time_priv,
        &[dkg_context, &member_id.to_be_bytes(), address],
    )
}

pub fn verify_one_time(
    one_time_pub: &CurvePoint,
    dkg_context: &[u8],
    member_id: u16,
    address: &[u8],
    sig: &Signature,
) -> bool {
    verify(
        domain::SIGN_ONE_TIME,
        one_time_pub,
        &[dkg_context, &member_id.to_be_bytes(), address],
        sig,
    )
}

/// Signs confirmation that the member's own derived public share
/// matches the group's accumulated commitment.
pub fn sign_own_pub_key(
    priv_share: &CurveScalar,
    group_pub_key: &CurvePoint,
    member_id: u16,
    dkg_context: &[u8],
) -> Signature {
    let group_pub_bytes = group_pub_key.to_bytes(true);
    sign(
        domain::SIGN_OWN_PUB_KEY,
        priv_share,
        &[group_pub_bytes.as_ref(), &member_id.to_be_bytes(), dkg_context],
    )
}

pub fn verify_own_pub_key(
    own_pub: &CurvePoint,
    group_pub_key: &CurvePoint,
    member_id: u16,
    dkg_context: &[u8],
    sig: &Signature,
) -> bool {
    let group_pub_bytes = group_pub_key.to_bytes(true);
    verify(
        domain::SIGN_OWN_PUB_KEY,
        own_pub,
        &[group_pub_bytes.as_ref(), &member_id.to_be_bytes(), dkg_context],
        sig,
    )
}

/// Discrete-log-equivalence proof binding a disclosed ECDH output
/// (`shared = one_time_priv_i · one_time_pub_j`) to both one-time public
/// keys, without revealing `one_time_priv_i`.
///
/// Proves knowledge of `x = one_time_priv_i` such that
/// `one_time_pub_i == x·G` and `shared == x·one_time_pub_j`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComplainProof {
    pub shared: CurvePoint,
    pub r1: CurvePoint,
    pub r2: CurvePoint,
    pub s: CurveScalar,
}

fn complain_challenge(
    one_time_pub_i: &CurvePoint,
    one_time_pub_j: &CurvePoint,
    shared: &CurvePoint,
    nonce_sym: &CurveScalar,
    r1: &CurvePoint,
    r2: &CurvePoint,
) -> CurveScalar {
    let i_bytes = one_time_pub_i.to_bytes(true);
    let j_bytes = one_time_pub_j.to_bytes(true);
    let shared_bytes = shared.to_bytes(true);
    let nonce_bytes = nonce_sym.to_bytes();
    let r1_bytes = r1.to_bytes(true);
    let r2_bytes = r2.to_bytes(true);
    challenge(&[
        domain::SIGN_COMPLAIN.as_bytes(),
        i_bytes.as_ref(),
        j_bytes.as_ref(),
        shared_bytes.as_ref(),
        nonce_bytes.as_ref(),
        r1_bytes.as_ref(),
        r2_bytes.as_ref(),
    ])
}

/// Returns `(proof, key_sym, nonce_sym)`. `nonce_sym` is an independent
/// session nonce folded into the Fiat-Shamir challenge (it is not the
/// proof's internal randomness `k`, which must stay secret or `x` would
/// be recoverable from `s`).
pub fn sign_complain(
    one_time_pub_i: &CurvePoint,
    one_time_pub_j: &CurvePoint,
    one_time_priv_i: &CurveScalar,
) -> (ComplainProof, CurveScalar, CurveScalar) {
    let shared = one_time_pub_j * one_time_priv_i;
    let key_sym = super::key_sym(one_time_priv_i, one_time_pub_j);
    let nonce_sym = CurveScalar::random();

    let k = CurveScalar::random();
    let r1 = CurvePoint::generator() * &k;
    let r2 = one_time_pub_j * &k;
    let e = complain_challenge(one_time_pub_i, one_time_pub_j, &shared, &nonce_sym, &r1, &r2);
    let s = k + e * one_time_priv_i;

    let proof = ComplainProof { shared, r1, r2, s };
    (proof, key_sym, nonce_sym)
}

pub fn verify_complain(
    one_time_pub_i: &CurvePoint,
    one_time_pub_j: &CurvePoint,
    nonce_sym: &CurveScalar,
    proof: &ComplainProof,
) -> bool {
    let e = complain_challenge(
        one_time_pub_i,
        one_time_pub_j,
        &proof.shared,
        nonce_sym,
        &proof.r1,
        &proof.r2,
    );
    let lhs1 = CurvePoint::generator() * &proof.s;
    let rhs1 = proof.r1.clone() + one_time_pub_i * &e;
    let lhs2 = one_time_pub_j * &proof.s;
    let rhs2 = proof.r2.clone() + &proof.shared * &e;
    lhs1 == rhs1 && lhs2 == rhs2
}
