//! Predicate Encryption for Searchable Ciphertexts
//!
//! This crate provides two pairing-based predicate encryption schemes over the
//! BLS12-381 curve, built on the Arkworks ecosystem:
//!
//! - keyword: anonymous identity-based encryption (Boyen–Waters shape). A key for
//!   keyword `k` decrypts exactly the ciphertexts encrypted under `k`, and neither
//!   the ciphertext nor the key reveals the keyword. Used for encrypted keyword search.
//! - automaton: functional encryption for regular languages (Waters DFA shape). A key
//!   for a DFA `M` decrypts exactly the ciphertexts whose word `M` accepts.
//!
//! Design choices:
//! - Asymmetric pairing: ciphertext elements live in G1, key elements in G2; setup
//!   samples every generator with a known exponent so both images exist
//! - Automaton ciphertexts name the symbol at each position, so decryption takes one
//!   transition per character; the word is public and only the message is hidden
//! - Encodings are arkworks `CanonicalSerialize` with full validation on decode
//! - Not constant-time across all code paths; do not use for production without a security review
//!
//! Minimal API (see [`scheme`]):
//! - setup: generates the master key and public parameters of both schemes
//! - extract_identity / extract_automaton: key for a keyword or a DFA
//! - encrypt_identity / encrypt_automaton: ciphertext for a keyword or a word
//! - decrypt_identity / decrypt_automaton: message, or `Error::PredicateMismatch`

pub mod automaton;
pub mod codec;
pub mod config;
pub mod dfa;
pub mod error;
pub mod group;
pub mod keyword;
pub mod parallel;
pub mod scheme;

pub use codec::{Decode, Encode};
pub use config::{Alphabet, SchemeConfig, SecurityParams};
pub use dfa::{Dfa, StateId, Symbol, Transition};
pub use error::{Error, Result};
pub use group::{flag_element, Gt};
pub use scheme::{
    decrypt_automaton, decrypt_identity, encrypt_automaton, encrypt_identity, extract_automaton,
    extract_identity, setup, setup_from_config, AutomatonCiphertext, AutomatonSecretKey,
    EqualityCiphertext, EqualitySecretKey, MasterSecretKey, PublicParameters,
};
