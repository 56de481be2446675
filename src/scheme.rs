//! Entry points that bundle both schemes behind one master key and one set of
//! public parameters. Randomness comes from the operating system.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::rngs::OsRng;

use crate::automaton;
use crate::config::{Alphabet, SchemeConfig, SecurityParams};
use crate::dfa::Dfa;
use crate::error;
use crate::group::Gt;
use crate::keyword;

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MasterSecretKey {
    pub keyword: keyword::MasterKey,
    pub automaton: automaton::MasterKey,
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicParameters {
    pub keyword: keyword::PublicParams,
    pub automaton: automaton::PublicParams,
}

pub type EqualitySecretKey = keyword::SecretKey;
pub type EqualityCiphertext = keyword::Ciphertext;
pub type AutomatonSecretKey = automaton::SecretKey;
pub type AutomatonCiphertext = automaton::Ciphertext;

/// Setup(1^λ, Σ)
///
/// # Arguments
/// * `params` - Security parameters, at most the sizes of BLS12-381
/// * `alphabet` - Symbols automaton ciphertexts may contain
///
/// # Returns
/// * `MasterSecretKey` - held by the key authority
/// * `PublicParameters` - published to every encryptor
pub fn setup(
    params: &SecurityParams,
    alphabet: &Alphabet,
) -> error::Result<(MasterSecretKey, PublicParameters)> {
    let mut rng = OsRng;
    let (kw_msk, kw_pp) = keyword::setup(params, &mut rng)?;
    let (fa_msk, fa_pp) = automaton::setup(params, alphabet, &mut rng)?;
    Ok((
        MasterSecretKey {
            keyword: kw_msk,
            automaton: fa_msk,
        },
        PublicParameters {
            keyword: kw_pp,
            automaton: fa_pp,
        },
    ))
}

pub fn setup_from_config(config: &SchemeConfig) -> error::Result<(MasterSecretKey, PublicParameters)> {
    setup(&config.security, &config.alphabet)
}

pub fn extract_identity(msk: &MasterSecretKey, identity: &str) -> error::Result<EqualitySecretKey> {
    keyword::extract(&msk.keyword, identity, &mut OsRng)
}

pub fn extract_automaton(msk: &MasterSecretKey, dfa: &Dfa) -> error::Result<AutomatonSecretKey> {
    automaton::keygen(&msk.automaton, dfa, &mut OsRng)
}

pub fn encrypt_identity(
    pp: &PublicParameters,
    identity: &str,
    message: bool,
) -> error::Result<EqualityCiphertext> {
    keyword::encrypt(&pp.keyword, identity, message, &mut OsRng)
}

pub fn encrypt_automaton(
    pp: &PublicParameters,
    word: &str,
    message: &Gt,
) -> error::Result<AutomatonCiphertext> {
    automaton::encrypt(&pp.automaton, word, message, &mut OsRng)
}

/// Returns the encrypted bit, or `Error::PredicateMismatch` when the identities differ.
pub fn decrypt_identity(sk: &EqualitySecretKey, ct: &EqualityCiphertext) -> error::Result<bool> {
    keyword::decrypt(sk, ct)
}

/// Returns the encrypted message, or `Error::PredicateMismatch` when the DFA rejects the word.
pub fn decrypt_automaton(sk: &AutomatonSecretKey, ct: &AutomatonCiphertext) -> error::Result<Gt> {
    automaton::decrypt(sk, ct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Decode, Encode};
    use crate::dfa::tests::aabb_plus;
    use crate::error::Error;
    use crate::group::flag_element;

    #[test]
    fn test_scheme_round_trip() {
        let alphabet: Alphabet = "ab".chars().collect();
        let (msk, pp) = setup(&SecurityParams::default(), &alphabet).unwrap();

        let sk = extract_identity(&msk, "felis").unwrap();
        for bit in [true, false] {
            let ct = encrypt_identity(&pp, "felis", bit).unwrap();
            assert_eq!(decrypt_identity(&sk, &ct).unwrap(), bit);
        }
        let other = encrypt_identity(&pp, "eros", true).unwrap();
        assert!(matches!(decrypt_identity(&sk, &other), Err(Error::PredicateMismatch)));

        let sk = extract_automaton(&msk, &aabb_plus()).unwrap();
        let m = flag_element(false);
        let ct = encrypt_automaton(&pp, "aabbb", &m).unwrap();
        assert_eq!(decrypt_automaton(&sk, &ct).unwrap(), m);
        let ct = encrypt_automaton(&pp, "aab", &m).unwrap();
        assert!(decrypt_automaton(&sk, &ct).unwrap_err().is_mismatch());
    }

    #[test]
    fn test_bundle_encoding() {
        let (msk, pp) = setup_from_config(&SchemeConfig::default()).unwrap();
        assert_eq!(MasterSecretKey::decode(&msk.encode().unwrap()).unwrap(), msk);
        assert_eq!(PublicParameters::decode(&pp.encode().unwrap()).unwrap(), pp);

        let mut bytes = pp.encode().unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(PublicParameters::decode(&bytes), Err(Error::Decode(_))));
    }
}
