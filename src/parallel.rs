//! Batch encryption and scanning on the rayon thread pool.
//!
//! Every task that needs randomness draws from its own `OsRng`. Scans prepare
//! the key once and share it read-only across tasks.

use log::debug;
use rand::rngs::OsRng;
use rayon::prelude::*;

use crate::automaton;
use crate::error::Result;
use crate::group::Gt;
use crate::keyword;

/// Encrypts each token for keyword search, in input order.
///
/// # Arguments
/// * `pp` - Keyword public parameters
/// * `tokens` - Tokens to encrypt, typically the words of one document
///
/// # Returns
/// * `Vec<keyword::Ciphertext>` - one ciphertext per token, or the first randomness failure
pub fn encrypt_keywords<S: AsRef<str> + Sync>(
    pp: &keyword::PublicParams,
    tokens: &[S],
) -> Result<Vec<keyword::Ciphertext>> {
    tokens
        .par_iter()
        .map(|t| keyword::encrypt_keyword(pp, t.as_ref(), &mut OsRng))
        .collect()
}

/// Encrypts each word for pattern search, in input order.
pub fn encrypt_words<S: AsRef<str> + Sync>(
    pp: &automaton::PublicParams,
    words: &[S],
) -> Result<Vec<automaton::Ciphertext>> {
    words
        .par_iter()
        .map(|w| automaton::encrypt_flag(pp, w.as_ref(), &mut OsRng))
        .collect()
}

/// Indices of the ciphertexts that match `sk`, ascending.
pub fn find_keyword_matches(
    sk: &keyword::SecretKey,
    ciphertexts: &[keyword::Ciphertext],
) -> Vec<usize> {
    let prepared = keyword::prepare_secret_key(sk);
    ciphertexts
        .par_iter()
        .enumerate()
        .filter(|(_, ct)| prepared.matches(ct))
        .map(|(i, _)| i)
        .collect()
}

/// Number of matching ciphertexts for each key, in key order.
///
/// Each count is produced by exactly one task.
pub fn scan_keywords(
    keys: &[keyword::SecretKey],
    ciphertexts: &[keyword::Ciphertext],
) -> Vec<usize> {
    let counts: Vec<usize> = keys
        .par_iter()
        .map(|sk| {
            let prepared = keyword::prepare_secret_key(sk);
            ciphertexts
                .par_iter()
                .filter(|ct| prepared.matches(ct))
                .count()
        })
        .collect();
    debug!(
        "scanned {} ciphertexts with {} keys",
        ciphertexts.len(),
        keys.len()
    );
    counts
}

/// Decrypts every ciphertext with one key; mismatches stay in place as errors.
pub fn decrypt_automaton_batch(
    sk: &automaton::SecretKey,
    ciphertexts: &[automaton::Ciphertext],
) -> Vec<Result<Gt>> {
    let prepared = automaton::prepare_secret_key(sk);
    ciphertexts
        .par_iter()
        .map(|ct| prepared.decrypt(ct))
        .collect()
}

/// Indices of the ciphertexts whose word the key's DFA accepts, ascending.
pub fn find_automaton_matches(
    sk: &automaton::SecretKey,
    ciphertexts: &[automaton::Ciphertext],
) -> Vec<usize> {
    let prepared = automaton::prepare_secret_key(sk);
    ciphertexts
        .par_iter()
        .enumerate()
        .filter(|(_, ct)| prepared.matches(ct))
        .map(|(i, _)| i)
        .collect()
}
