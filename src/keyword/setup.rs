use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use rand::{CryptoRng, RngCore};

use crate::config::SecurityParams;
use crate::error;
use crate::group::{gt_pow, pair, sample_mirror, sample_scalar, Gt, Scalar, G1, G2};

/// Public parameters for keyword encryption
/// pp = (Ω, g, g0, g1, v1, v2, v3, v4), all group elements on the ciphertext side (G1)
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize)]
pub struct PublicParams {
    pub omega: Gt, // Ω = e(g, g)^(t1·t2·ω)
    pub g: G1,
    pub g0: G1,
    pub g1: G1,
    pub v1: G1, // vᵢ = g^(tᵢ)
    pub v2: G1,
    pub v3: G1,
    pub v4: G1,
}

/// Master key for keyword extraction
/// msk = (ω, t1, t2, t3, t4) plus the G2 images of g, g0, g1
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MasterKey {
    pub omega: Scalar,
    pub t1: Scalar,
    pub t2: Scalar,
    pub t3: Scalar,
    pub t4: Scalar,
    pub g: G2,
    pub g0: G2,
    pub g1: G2,
}

/// Keyword.Setup(1^λ)
///
/// # Arguments
/// * `params` - Requested security parameters, checked against the curve
/// * `rng` - Cryptographically secure random number generator
///
/// # Returns
/// * `MasterKey` - msk = (ω, t1..t4) and the key-side generators
/// * `PublicParams` - pp = (Ω, g, g0, g1, v1..v4)
pub fn setup<R: RngCore + CryptoRng + ?Sized>(
    params: &SecurityParams,
    rng: &mut R,
) -> error::Result<(MasterKey, PublicParams)> {
    params.validate()?;

    // Sample generators g, g0, g1 with matching images in both source groups
    let g = sample_mirror(rng)?;
    let g0 = sample_mirror(rng)?;
    let g1 = sample_mirror(rng)?;

    let omega = sample_scalar(rng)?;
    let t1 = sample_scalar(rng)?;
    let t2 = sample_scalar(rng)?;
    let t3 = sample_scalar(rng)?;
    let t4 = sample_scalar(rng)?;

    let pp = PublicParams {
        omega: gt_pow(&pair(&g.g1, &g.g2), &(t1 * t2 * omega)),
        g: g.g1,
        g0: g0.g1,
        g1: g1.g1,
        v1: g.g1 * t1,
        v2: g.g1 * t2,
        v3: g.g1 * t3,
        v4: g.g1 * t4,
    };

    let msk = MasterKey {
        omega,
        t1,
        t2,
        t3,
        t4,
        g: g.g2,
        g0: g0.g2,
        g1: g1.g2,
    };

    debug!("keyword setup complete (order {} bits)", params.order_bits);
    Ok((msk, pp))
}
