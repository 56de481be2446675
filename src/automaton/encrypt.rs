use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};

use super::setup::PublicParams;
use super::{mask_tag, MaskTag};
use crate::dfa::Symbol;
use crate::error::{self, Error};
use crate::group::{flag_element, gt_pow, sample_scalars, Gt, G1};

/// Ciphertext components for character position i
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PositionComponent {
    pub symbol: Symbol, // w_i
    pub c1: G1, // g^(s_i)
    pub c2: G1, // h_(w_i)^(s_i) · z^(s_(i-1))
}

/// Ciphertext for a word w = w_1 .. w_L. The word itself is public; only the
/// message is hidden.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize)]
pub struct Ciphertext {
    pub start_c1: G1, // g^(s_0)
    pub start_c2: G1, // h_start^(s_0)
    pub positions: Vec<PositionComponent>,
    pub end_c1: G1, // g^(s_L)
    pub end_c2: G1, // h_end^(s_L)
    pub cm: Gt,     // m · E^(s_L)
    pub tag: MaskTag,
}

impl Ciphertext {
    /// Length of the encrypted word.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The encrypted word.
    pub fn word(&self) -> String {
        self.positions.iter().map(|p| p.symbol.0).collect()
    }
}

/// Automaton.Encrypt(pp, w, m)
///
/// # Arguments
/// * `pp` - Public parameters
/// * `word` - Nonempty string over the setup alphabet
/// * `m` - Message in GT
/// * `rng` - Random number generator for s_0 .. s_L
///
/// # Returns
/// * `Ciphertext` - start pair, one symbol and pair per character, end pair, C_m and the mask tag
///
/// No automaton is involved: the same ciphertext can be tested against keys for
/// any number of DFAs.
pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
    pp: &PublicParams,
    word: &str,
    m: &Gt,
    rng: &mut R,
) -> error::Result<Ciphertext> {
    let generators = word
        .chars()
        .map(|c| {
            pp.h.get(&c)
                .map(|h| (Symbol(c), *h))
                .ok_or(Error::UnknownSymbol(c))
        })
        .collect::<error::Result<Vec<(Symbol, G1)>>>()?;
    if generators.is_empty() {
        return Err(Error::EmptyWord);
    }

    // s_0 .. s_L
    let s = sample_scalars(rng, generators.len() + 1)?;
    let s_last = s[generators.len()];

    // Position i chains s_i to s_(i-1), which forces decryption to consume
    // characters in order
    let positions = generators
        .iter()
        .zip(s.windows(2))
        .map(|(&(symbol, h_c), w)| PositionComponent {
            symbol,
            c1: pp.g * w[1],
            c2: h_c * w[1] + pp.z * w[0],
        })
        .collect();

    let mask = gt_pow(&pp.e, &s_last);

    Ok(Ciphertext {
        start_c1: pp.g * s[0],
        start_c2: pp.h_start * s[0],
        positions,
        end_c1: pp.g * s_last,
        end_c2: pp.h_end * s_last,
        cm: *m * mask,
        tag: mask_tag(&mask)?,
    })
}

/// Encrypts `word` for pattern search; see [`super::matches`].
pub fn encrypt_flag<R: RngCore + CryptoRng + ?Sized>(
    pp: &PublicParams,
    word: &str,
    rng: &mut R,
) -> error::Result<Ciphertext> {
    encrypt(pp, word, &flag_element(true), rng)
}
