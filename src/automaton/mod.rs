//! Functional encryption for regular languages.
//!
//! A key is issued for a [`Dfa`](crate::dfa::Dfa) and a ciphertext for a word
//! `w`. Decryption walks the automaton over the ciphertext positions: every state
//! carries a random blinding value `D[q]` in the key, and pairing a transition
//! key against two consecutive ciphertext positions trades `D[from]` for
//! `D[to]`. Only a walk that consumes the whole word and halts on an accept
//! state strips the last blinding value and exposes the message mask.
//!
//! Each ciphertext position names its symbol, so the walk follows the one
//! transition keyed by `(state, symbol)` and costs one multi-pairing per
//! character. The ciphertext also carries a confirmation tag of the message
//! mask; a walk that reaches an accept state with the wrong mask fails closed.

pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod setup;

pub use decrypt::{decrypt, matches, prepare_secret_key, PreparedSecretKey};
pub use encrypt::{encrypt, encrypt_flag, Ciphertext, PositionComponent};
pub use keygen::{keygen, AcceptKey, SecretKey, TransitionKey};
pub use setup::{setup, MasterKey, PublicParams};

use sha2::{Digest, Sha256};

use crate::codec::gt_bytes;
use crate::error::Result;
use crate::group::Gt;

const MASK_TAG_DOMAIN: &[u8] = b"pe-search/automaton/mask";

pub type MaskTag = [u8; 32];

/// Confirmation tag of the message mask `E^(s_L)`.
pub(crate) fn mask_tag(mask: &Gt) -> Result<MaskTag> {
    Ok(Sha256::new()
        .chain_update(MASK_TAG_DOMAIN)
        .chain_update(gt_bytes(mask)?)
        .finalize()
        .into())
}
