use ark_serialize::CanonicalSerialize;
use rand::{CryptoRng, RngCore};

use super::hash_identity;
use super::setup::PublicParams;
use crate::error;
use crate::group::{flag_element, gt_pow, sample_scalar, Gt, G1};

/// Ciphertext for keyword encryption
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize)]
pub struct Ciphertext {
    pub c: Gt,  // C = m · Ω^s
    pub c0: G1, // C0 = (g0·g1^h)^s
    pub c1: G1, // C1 = v1^(s - s1)
    pub c2: G1, // C2 = v2^(s1)
    pub c3: G1, // C3 = v3^(s - s2)
    pub c4: G1, // C4 = v4^(s2)
}

/// Keyword.Encrypt(pp, id, m) for a target-group message
///
/// # Arguments
/// * `pp` - Public parameters
/// * `id` - Keyword the ciphertext is bound to
/// * `m` - Message in GT
/// * `rng` - Random number generator for s, s1, s2
///
/// # Returns
/// * `Ciphertext` - ct = (C, C0, C1, C2, C3, C4)
pub fn encrypt_element<R: RngCore + CryptoRng + ?Sized>(
    pp: &PublicParams,
    id: &str,
    m: &Gt,
    rng: &mut R,
) -> error::Result<Ciphertext> {
    let h = hash_identity(id);
    let s = sample_scalar(rng)?;
    let s1 = sample_scalar(rng)?;
    let s2 = sample_scalar(rng)?;

    Ok(Ciphertext {
        c: *m * gt_pow(&pp.omega, &s),
        c0: (pp.g0 + pp.g1 * h) * s,
        c1: pp.v1 * (s - s1),
        c2: pp.v2 * s1,
        c3: pp.v3 * (s - s2),
        c4: pp.v4 * s2,
    })
}

/// Encrypts one bit under `id`.
pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
    pp: &PublicParams,
    id: &str,
    bit: bool,
    rng: &mut R,
) -> error::Result<Ciphertext> {
    encrypt_element(pp, id, &flag_element(bit), rng)
}

/// Encrypts the token `id` for keyword search; see [`super::matches`].
pub fn encrypt_keyword<R: RngCore + CryptoRng + ?Sized>(
    pp: &PublicParams,
    id: &str,
    rng: &mut R,
) -> error::Result<Ciphertext> {
    encrypt(pp, id, true, rng)
}
