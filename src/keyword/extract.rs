use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};

use super::hash_identity;
use super::setup::MasterKey;
use crate::error;
use crate::group::{sample_scalar, G2};

/// Secret key for one keyword, all components in G2
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SecretKey {
    pub d0: G2, // d0 = g^(r1·t1·t2 + r2·t3·t4)
    pub d1: G2, // d1 = g^(-ω·t2) · (g0·g1^h)^(-r1·t2)
    pub d2: G2, // d2 = g^(-ω·t1) · (g0·g1^h)^(-r1·t1)
    pub d3: G2, // d3 = (g0·g1^h)^(-r2·t4)
    pub d4: G2, // d4 = (g0·g1^h)^(-r2·t3)
}

/// Keyword.Extract(msk, id)
///
/// # Arguments
/// * `msk` - Master key
/// * `id` - Keyword the key will recognise
/// * `rng` - Random number generator for the per-key scalars r1, r2
///
/// # Returns
/// * `SecretKey` - sk = (d0, d1, d2, d3, d4). Two extractions for the same keyword
///   give different, functionally equivalent keys.
pub fn extract<R: RngCore + CryptoRng + ?Sized>(
    msk: &MasterKey,
    id: &str,
    rng: &mut R,
) -> error::Result<SecretKey> {
    let h = hash_identity(id);
    let r1 = sample_scalar(rng)?;
    let r2 = sample_scalar(rng)?;

    // g0·g1^h, the identity-bound base
    let base = msk.g0 + msk.g1 * h;

    Ok(SecretKey {
        d0: msk.g * (r1 * msk.t1 * msk.t2 + r2 * msk.t3 * msk.t4),
        d1: msk.g * (-(msk.omega * msk.t2)) + base * (-(r1 * msk.t2)),
        d2: msk.g * (-(msk.omega * msk.t1)) + base * (-(r1 * msk.t1)),
        d3: base * (-(r2 * msk.t4)),
        d4: base * (-(r2 * msk.t3)),
    })
}
