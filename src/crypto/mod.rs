//! Crypto façade: a narrow, side-effect-free interface to the curve and
//! symmetric-crypto primitives used by the DKG core.
//!
//! Built on `curv-kzen`'s generic `Point<E>`/`Scalar<E>` abstraction,
//! instantiated over secp256k1. Every function here is pure: no state
//! repository access, no logging of secret values.

pub mod domain;
pub mod schnorr;

use crate::error::ValidationError;
use curv::arithmetic::Converter;
use curv::elliptic::curves::{Point, Scalar, Secp256k1};
use curv::BigInt;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

pub type Curve = Secp256k1;
pub type CurvePoint = Point<Curve>;
pub type CurveScalar = Scalar<Curve>;

pub use schnorr::{ComplainProof, Signature};

/// Parses and validates a 32-byte scalar. Curv's `Scalar::from_bytes`
/// already rejects encodings that are not a canonical field element.
pub fn scalar_parse(bytes: &[u8]) -> Result<CurveScalar, ValidationError> {
    CurveScalar::from_bytes(bytes)
        .map_err(|_| ValidationError::InvalidScalar(format!("{} bytes", bytes.len())))
}

/// Parses and validates a 33-byte compressed SEC1 point, rejecting the
/// identity element (the curve's point at infinity is never a valid
/// public key or commitment term).
pub fn point_parse(bytes: &[u8]) -> Result<CurvePoint, ValidationError> {
    let point = CurvePoint::from_bytes(bytes)
        .map_err(|_| ValidationError::InvalidPoint(format!("{} bytes", bytes.len())))?;
    if point.is_zero() {
        return Err(ValidationError::InvalidPoint(
            "point is the identity element".into(),
        ));
    }
    Ok(point)
}

/// Feldman commitment: `C_k = coeffs[k]·G` for every coefficient.
pub fn commit(coeffs: &[CurveScalar]) -> Vec<CurvePoint> {
    coeffs
        .iter()
        .map(|c| CurvePoint::generator() * c)
        .collect()
}

/// Evaluates `f(x) = Σ coeffs[k]·x^k mod n` at `x = member_id` using
/// Horner's method.
pub fn compute_secret_share(coeffs: &[CurveScalar], member_id: u16) -> CurveScalar {
    let x = CurveScalar::from_bigint(&BigInt::from(member_id as u64));
    let mut acc = CurveScalar::zero();
    for c in coeffs.iter().rev() {
        acc = acc * &x + c;
    }
    acc
}

/// Evaluates a Feldman commitment vector at `x = member_id`:
/// `Σ_{k} i^k · commits[k]`. The result is the public point
/// corresponding to that member's secret share of the underlying
/// polynomial.
pub fn evaluate_commitment(member_id: u16, commits: &[CurvePoint]) -> CurvePoint {
    let x = CurveScalar::from_bigint(&BigInt::from(member_id as u64));
    let mut acc = CurvePoint::zero();
    let mut x_pow = CurveScalar::from_bigint(&BigInt::from(1u64));
    for c in commits {
        acc = acc + c * &x_pow;
        x_pow = x_pow * &x;
    }
    acc
}

/// Verifies that `share·G == Σ_{k} i^k · commits[k]`, i.e. that `share`
/// is a valid Feldman opening of `commits` at `x = member_id`.
pub fn verify_secret_share(member_id: u16, share: &CurveScalar, commits: &[CurvePoint]) -> bool {
    let lhs = CurvePoint::generator() * share;
    lhs == evaluate_commitment(member_id, commits)
}

/// ECDH-derived shared secret, hashed to a scalar with a domain
/// separator so it can never collide with a Schnorr challenge hash.
pub fn key_sym(priv_i: &CurveScalar, pub_j: &CurvePoint) -> CurveScalar {
    let shared_point = pub_j * priv_i;
    hash_to_scalar(&[domain::ECDH.as_bytes(), shared_point.to_bytes(true).as_ref()])
}

/// Fixed-width symmetric encryption of a 32-byte scalar.
///
/// Produces exactly 32 ciphertext bytes (matching the wire length of
/// `EncryptedSecretShare`) by XOR-ing the scalar's canonical encoding
/// with a SHA-256 keystream derived from `key`. A tagged AEAD
/// construction would grow the ciphertext past that fixed width, so
/// integrity here instead comes from the Feldman check the recipient
/// runs on the decrypted share.
pub fn encrypt(share: &CurveScalar, key: &CurveScalar) -> [u8; 32] {
    let keystream = keystream(key);
    let plaintext = share.to_bytes();
    let mut out = [0u8; 32];
    for (o, (p, k)) in out.iter_mut().zip(plaintext.as_ref().iter().zip(keystream.iter())) {
        *o = p ^ k;
    }
    out
}

/// Inverse of [`encrypt`].
pub fn decrypt(ciphertext: &[u8; 32], key: &CurveScalar) -> Result<CurveScalar, ValidationError> {
    let keystream = keystream(key);
    let mut plaintext = [0u8; 32];
    for (p, (c, k)) in plaintext.iter_mut().zip(ciphertext.iter().zip(keystream.iter())) {
        *p = c ^ k;
    }
    let result = scalar_parse(&plaintext);
    plaintext.zeroize();
    result
}

fn keystream(key: &CurveScalar) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.to_bytes().as_ref());
    hasher.update(domain::ENCRYPT.as_bytes());
    hasher.finalize().into()
}

fn hash_to_scalar(parts: &[&[u8]]) -> CurveScalar {
    let mut hasher = Sha256::new();
    for p in parts {
        hasher.update(p);
    }
    let digest = hasher.finalize();
    CurveScalar::from_bigint(&BigInt::from_bytes(&digest))
}

/// `Σ shares`, the member's own final private key share.
pub fn compute_own_private_key(shares: &[CurveScalar]) -> CurveScalar {
    shares
        .iter()
        .fold(CurveScalar::zero(), |acc, s| acc + s)
}

/// The group public key is the zero-coefficient term of the accumulated
/// commitment vector.
pub fn compute_group_public_key(accumulated_commit_0: &CurvePoint) -> CurvePoint {
    accumulated_commit_0.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs(vals: &[u64]) -> Vec<CurveScalar> {
        vals.iter()
            .map(|v| CurveScalar::from_bigint(&BigInt::from(*v)))
            .collect()
    }

    #[test]
    fn share_verifies_against_commitment() {
        let c = coeffs(&[7, 3, 9]);
        let commits = commit(&c);
        for i in 1u16..=5 {
            let share = compute_secret_share(&c, i);
            assert!(verify_secret_share(i, &share, &commits));
        }
    }

    #[test]
    fn tampered_share_fails_verification() {
        let c = coeffs(&[7, 3, 9]);
        let commits = commit(&c);
        let share = compute_secret_share(&c, 1) + CurveScalar::from_bigint(&BigInt::from(1u64));
        assert!(!verify_secret_share(1, &share, &commits));
    }

    #[test]
    fn encrypt_decrypt_round_trips() {
        let key = CurveScalar::random();
        let share = CurveScalar::random();
        let ct = encrypt(&share, &key);
        assert_eq!(ct.len(), 32);
        let pt = decrypt(&ct, &key).unwrap();
        assert_eq!(pt, share);
    }

    #[test]
    fn key_sym_is_symmetric_over_ecdh() {
        let priv_a = CurveScalar::random();
        let priv_b = CurveScalar::random();
        let pub_a = CurvePoint::generator() * &priv_a;
        let pub_b = CurvePoint::generator() * &priv_b;
        assert_eq!(key_sym(&priv_a, &pub_b), key_sym(&priv_b, &pub_a));
    }
}
