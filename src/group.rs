//! Algebraic group layer over BLS12-381.
//!
//! The schemes are written for a symmetric pairing; on this curve every public
//! generator is sampled as a [`Mirror`], one discrete log lifted into both source
//! groups. Ciphertext components live in G1, key components in G2.

use std::sync::OnceLock;

use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::{Field, One, PrimeField, Zero};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

pub type Curve = Bls12_381;
pub type Scalar = Fr;
pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Gt = <Curve as Pairing>::TargetField;
pub type G1Prepared = <Curve as Pairing>::G1Prepared;
pub type G2Prepared = <Curve as Pairing>::G2Prepared;

const FLAG_DOMAIN: &[u8] = b"pe-search/flag";

/// A random exponent together with its images in G1 and G2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mirror {
    pub exponent: Scalar,
    pub g1: G1,
    pub g2: G2,
}

pub fn g1_generator() -> G1 {
    G1::from(G1Affine::generator())
}

pub fn g2_generator() -> G2 {
    G2::from(G2Affine::generator())
}

/// Uniform nonzero scalar. Draws 64 bytes so the reduction mod r has negligible bias.
pub fn sample_scalar<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Scalar> {
    let mut buf = [0u8; 64];
    loop {
        rng.try_fill_bytes(&mut buf)?;
        let s = Scalar::from_le_bytes_mod_order(&buf);
        if !s.is_zero() {
            return Ok(s);
        }
    }
}

pub fn sample_scalars<R: RngCore + CryptoRng + ?Sized>(rng: &mut R, n: usize) -> Result<Vec<Scalar>> {
    (0..n).map(|_| sample_scalar(rng)).collect()
}

/// Fresh generator pair `(g1^x, g2^x)` for uniform nonzero `x`.
pub fn sample_mirror<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Mirror> {
    let exponent = sample_scalar(rng)?;
    Ok(Mirror {
        exponent,
        g1: g1_generator() * exponent,
        g2: g2_generator() * exponent,
    })
}

pub fn sample_g2<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<G2> {
    Ok(g2_generator() * sample_scalar(rng)?)
}

pub fn pair(a: &G1, b: &G2) -> Gt {
    Curve::pairing(*a, *b).0
}

/// Product of pairings with a single final exponentiation.
/// A quotient `e(a, b)^-1` is passed as `(-a, b)`.
pub fn multi_pair<A, B>(terms: impl IntoIterator<Item = (A, B)>) -> Gt
where
    A: Into<G1Prepared>,
    B: Into<G2Prepared>,
{
    let (a, b): (Vec<G1Prepared>, Vec<G2Prepared>) = terms
        .into_iter()
        .map(|(a, b)| (a.into(), b.into()))
        .unzip();
    Curve::multi_pairing(a, b).0
}

pub fn gt_pow(base: &Gt, exponent: &Scalar) -> Gt {
    base.pow(exponent.into_bigint())
}

/// `num / den`. Fails closed when `den` has no inverse.
pub fn gt_div(num: &Gt, den: &Gt) -> Result<Gt> {
    den.inverse()
        .map(|inv| *num * inv)
        .ok_or(Error::PredicateMismatch)
}

/// Membership in the order-r subgroup of Fq12 that pairings land in.
pub fn is_in_gt_subgroup(x: &Gt) -> bool {
    !x.is_zero() && x.pow(Scalar::MODULUS).is_one()
}

/// `SHA-256(domain || data)` reduced mod r.
pub fn hash_to_scalar(domain: &[u8], data: &[u8]) -> Scalar {
    let digest = Sha256::new()
        .chain_update(domain)
        .chain_update(data)
        .finalize();
    Scalar::from_be_bytes_mod_order(&digest)
}

/// Public target-group encodings of a one-bit message.
pub fn flag_element(flag: bool) -> Gt {
    static FLAGS: OnceLock<(Gt, Gt)> = OnceLock::new();
    let (yes, no) = FLAGS.get_or_init(|| {
        let base = pair(&g1_generator(), &g2_generator());
        (
            gt_pow(&base, &hash_to_scalar(FLAG_DOMAIN, b"true")),
            gt_pow(&base, &hash_to_scalar(FLAG_DOMAIN, b"false")),
        )
    });
    if flag {
        *yes
    } else {
        *no
    }
}

/// Inverse of [`flag_element`]; `None` for any other element.
pub fn flag_from_element(x: &Gt) -> Option<bool> {
    if *x == flag_element(true) {
        Some(true)
    } else if *x == flag_element(false) {
        Some(false)
    } else {
        None
    }
}
