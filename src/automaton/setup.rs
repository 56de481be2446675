use std::collections::BTreeMap;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use rand::{CryptoRng, RngCore};

use crate::config::{Alphabet, SecurityParams};
use crate::dfa::Symbol;
use crate::error::{self, Error};
use crate::group::{gt_pow, pair, sample_mirror, sample_scalar, Gt, Scalar, G1, G2};

/// Public parameters for automaton encryption
/// pp = (g, z, h_start, h_end, {h_σ}, E = e(g, g)^α), group elements in G1
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize)]
pub struct PublicParams {
    pub g: G1,
    pub z: G1,
    pub h_start: G1,
    pub h_end: G1,
    pub h: BTreeMap<Symbol, G1>,
    pub e: Gt,
}

/// Master key for automaton key generation: α and the G2 images of every generator
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MasterKey {
    pub alpha: Scalar,
    pub g: G2,
    pub z: G2,
    pub h_start: G2,
    pub h_end: G2,
    pub h: BTreeMap<Symbol, G2>,
}

impl PublicParams {
    pub fn alphabet(&self) -> Alphabet {
        self.h.keys().map(|s| s.0).collect()
    }
}

impl MasterKey {
    pub fn alphabet(&self) -> Alphabet {
        self.h.keys().map(|s| s.0).collect()
    }
}

/// Automaton.Setup(1^λ, Σ)
///
/// # Arguments
/// * `params` - Requested security parameters, checked against the curve
/// * `alphabet` - Symbols that need a generator h_σ
/// * `rng` - Cryptographically secure random number generator
///
/// # Returns
/// * `MasterKey` - msk = (α, key-side generators)
/// * `PublicParams` - pp = (g, z, h_start, h_end, {h_σ}, E)
pub fn setup<R: RngCore + CryptoRng + ?Sized>(
    params: &SecurityParams,
    alphabet: &Alphabet,
    rng: &mut R,
) -> error::Result<(MasterKey, PublicParams)> {
    params.validate()?;
    if alphabet.is_empty() {
        return Err(Error::UnsupportedParameters("empty alphabet".to_string()));
    }

    let g = sample_mirror(rng)?;
    let z = sample_mirror(rng)?;
    let h_start = sample_mirror(rng)?;
    let h_end = sample_mirror(rng)?;

    // One independent generator per symbol, so no symbol's discrete log is known
    // relative to another's
    let mut h_pub = BTreeMap::new();
    let mut h_sec = BTreeMap::new();
    for c in alphabet.iter() {
        let h_c = sample_mirror(rng)?;
        h_pub.insert(Symbol(c), h_c.g1);
        h_sec.insert(Symbol(c), h_c.g2);
    }

    let alpha = sample_scalar(rng)?;

    let pp = PublicParams {
        g: g.g1,
        z: z.g1,
        h_start: h_start.g1,
        h_end: h_end.g1,
        h: h_pub,
        e: gt_pow(&pair(&g.g1, &g.g2), &alpha),
    };

    let msk = MasterKey {
        alpha,
        g: g.g2,
        z: z.g2,
        h_start: h_start.g2,
        h_end: h_end.g2,
        h: h_sec,
    };

    debug!("automaton setup complete: {} symbols", alphabet.len());
    Ok((msk, pp))
}
