//! Anonymous identity-based encryption for exact keyword matching.
//!
//! Follows the Boyen–Waters construction: the ciphertext splits the identity
//! binding across two pairs `(c1, c2)` and `(c3, c4)` so that it reveals nothing
//! about the keyword it was produced for. A key for keyword `w` recovers the
//! message of a ciphertext for `w`, and a uniformly random target-group element
//! for any other keyword.

pub mod decrypt;
pub mod encrypt;
pub mod extract;
pub mod setup;

pub use decrypt::{decrypt, decrypt_element, matches, prepare_secret_key, PreparedSecretKey};
pub use encrypt::{encrypt, encrypt_element, encrypt_keyword, Ciphertext};
pub use extract::{extract, SecretKey};
pub use setup::{setup, MasterKey, PublicParams};

use crate::group::{hash_to_scalar, Scalar};

const IDENTITY_DOMAIN: &[u8] = b"pe-search/keyword/id";

/// Binds an identity string to a scalar.
pub(crate) fn hash_identity(id: &str) -> Scalar {
    hash_to_scalar(IDENTITY_DOMAIN, id.as_bytes())
}
