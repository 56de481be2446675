use std::collections::BTreeMap;

use log::{debug, trace};

use super::encrypt::Ciphertext;
use super::keygen::SecretKey;
use super::mask_tag;
use crate::dfa::StateId;
use crate::error::{Error, Result};
use crate::group::{flag_element, gt_div, multi_pair, G2Prepared, Gt};

/// One prepared transition key: the target state and (K_t1, K_t2, K_t3).
#[derive(Clone, Debug)]
struct Step {
    to: StateId,
    k: [G2Prepared; 3],
}

/// Secret key with pairing precomputation, indexed by `(state, symbol)`.
/// Build once with [`prepare_secret_key`] when scanning.
#[derive(Clone, Debug)]
pub struct PreparedSecretKey {
    start_state: StateId,
    start: [G2Prepared; 2],
    steps: BTreeMap<(StateId, char), Step>,
    accept: BTreeMap<StateId, [G2Prepared; 2]>,
}

pub fn prepare_secret_key(sk: &SecretKey) -> PreparedSecretKey {
    let steps = sk
        .transitions
        .iter()
        .map(|tk| {
            let t = tk.transition;
            let step = Step {
                to: t.to,
                k: [tk.k1, tk.k2, tk.k3].map(G2Prepared::from),
            };
            ((t.from, t.symbol), step)
        })
        .collect();
    let accept = sk
        .accept
        .iter()
        .map(|ak| (ak.state, [ak.k1, ak.k2].map(G2Prepared::from)))
        .collect();

    PreparedSecretKey {
        start_state: sk.start_state,
        start: [sk.start_k1, sk.start_k2].map(G2Prepared::from),
        steps,
        accept,
    }
}

impl PreparedSecretKey {
    /// Automaton.Decrypt(sk, ct)
    ///
    /// B_0 = e(C_start1, K_start1) / e(C_start2, K_start2)
    /// B_i = B_(i-1) · e(C_(i-1)1, K_t1) / e(C_i2, K_t2) · e(C_i1, K_t3), where C_01 = C_start1
    /// mask = B_L / e(C_end1, K_end1) · e(C_end2, K_end2)
    ///
    /// Each step trades D[from] for D[to], so B_i stays e(g, D[q_i])^(s_i) along the
    /// walk. The transition for position i is the one leaving q_(i-1) on w_i; a walk
    /// that ends on an accept state q releases E^(s_L), confirmed by the tag.
    ///
    /// # Returns
    /// * `Ok(m)` if the DFA accepts the encrypted word
    /// * `Err(Error::PredicateMismatch)` otherwise
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<Gt> {
        if ct.is_empty() {
            return Err(Error::PredicateMismatch);
        }

        let mut acc = multi_pair([
            (ct.start_c1, self.start[0].clone()),
            (-ct.start_c2, self.start[1].clone()),
        ]);
        let mut state = self.start_state;
        let mut prev_c1 = ct.start_c1;

        for (i, pos) in ct.positions.iter().enumerate() {
            let Some(step) = self.steps.get(&(state, pos.symbol.0)) else {
                debug!("automaton decrypt: stuck in state {state} at position {i}");
                return Err(Error::PredicateMismatch);
            };
            trace!("position {i}: {state} -> {} on {:?}", step.to, pos.symbol.0);
            acc *= multi_pair([
                (prev_c1, step.k[0].clone()),
                (-pos.c2, step.k[1].clone()),
                (pos.c1, step.k[2].clone()),
            ]);
            state = step.to;
            prev_c1 = pos.c1;
        }

        let Some(k) = self.accept.get(&state) else {
            debug!("automaton decrypt: word ends in non-accepting state {state}");
            return Err(Error::PredicateMismatch);
        };
        let mask = acc * multi_pair([(-ct.end_c1, k[0].clone()), (ct.end_c2, k[1].clone())]);
        if mask_tag(&mask)? != ct.tag {
            debug!("automaton decrypt: mask tag mismatch");
            return Err(Error::PredicateMismatch);
        }
        gt_div(&ct.cm, &mask)
    }

    pub fn matches(&self, ct: &Ciphertext) -> bool {
        matches!(self.decrypt(ct), Ok(m) if m == flag_element(true))
    }
}

/// Automaton.Decrypt(sk, ct); see [`PreparedSecretKey::decrypt`].
pub fn decrypt(sk: &SecretKey, ct: &Ciphertext) -> Result<Gt> {
    prepare_secret_key(sk).decrypt(ct)
}

/// Pattern test: true iff `ct` encrypts `true` and the key's DFA accepts its word.
pub fn matches(sk: &SecretKey, ct: &Ciphertext) -> bool {
    prepare_secret_key(sk).matches(ct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::encrypt::{encrypt, encrypt_flag};
    use crate::automaton::keygen::keygen;
    use crate::automaton::setup::{setup, MasterKey, PublicParams};
    use crate::config::{Alphabet, SecurityParams};
    use crate::dfa::tests::aabb_plus;
    use crate::dfa::{Dfa, Symbol, Transition};
    use crate::group::{g1_generator, pair, sample_g2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture(seed: u64) -> (MasterKey, PublicParams, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let alphabet: Alphabet = "abc".chars().collect();
        let (msk, pp) = setup(&SecurityParams::default(), &alphabet, &mut rng).unwrap();
        (msk, pp, rng)
    }

    #[test]
    fn test_accepted_word_decrypts() {
        let (msk, pp, mut rng) = fixture(42);
        let sk = keygen(&msk, &aabb_plus(), &mut rng).unwrap();
        let m = pair(&g1_generator(), &sample_g2(&mut rng).unwrap());

        for word in ["aabb", "aabbb", "aabbbbbb"] {
            let ct = encrypt(&pp, word, &m, &mut rng).unwrap();
            assert_eq!(decrypt(&sk, &ct).unwrap(), m, "word {word}");
        }
    }

    #[test]
    fn test_rejected_word_mismatches() {
        let (msk, pp, mut rng) = fixture(43);
        let sk = keygen(&msk, &aabb_plus(), &mut rng).unwrap();

        for word in ["aab", "aa", "a", "b", "abbb", "aabba", "aaabb", "ccbb"] {
            let ct = encrypt_flag(&pp, word, &mut rng).unwrap();
            assert!(
                matches!(decrypt(&sk, &ct), Err(Error::PredicateMismatch)),
                "word {word}"
            );
        }
    }

    #[test]
    fn test_branching_walk() {
        // (a|b)*c : state 0 loops on a and b, moves to 1 on c
        let (msk, pp, mut rng) = fixture(44);
        let dfa = Dfa::new(
            0..=1,
            "abc".chars().collect(),
            vec![
                Transition::new(0, 0, 'a'),
                Transition::new(0, 0, 'b'),
                Transition::new(0, 1, 'c'),
            ],
            0,
            [1],
        )
        .unwrap();
        let sk = keygen(&msk, &dfa, &mut rng).unwrap();
        let psk = prepare_secret_key(&sk);

        assert!(psk.matches(&encrypt_flag(&pp, "abbac", &mut rng).unwrap()));
        assert!(psk.matches(&encrypt_flag(&pp, "c", &mut rng).unwrap()));
        assert!(!psk.matches(&encrypt_flag(&pp, "abca", &mut rng).unwrap()));
        assert!(!psk.matches(&encrypt_flag(&pp, "cc", &mut rng).unwrap()));
    }

    #[test]
    fn test_key_from_other_setup_mismatches() {
        let (_, pp, mut rng) = fixture(45);
        let (other_msk, _, _) = fixture(46);
        let sk = keygen(&other_msk, &aabb_plus(), &mut rng).unwrap();
        let ct = encrypt_flag(&pp, "aabb", &mut rng).unwrap();
        assert!(decrypt(&sk, &ct).is_err());
    }

    #[test]
    fn test_tampered_ciphertext_mismatches() {
        let (msk, pp, mut rng) = fixture(47);
        let sk = keygen(&msk, &aabb_plus(), &mut rng).unwrap();
        let mut ct = encrypt_flag(&pp, "aabbb", &mut rng).unwrap();
        // Same symbols, so the walk still accepts, but the chain of s_i is broken
        ct.positions.swap(2, 3);
        assert_eq!(ct.word(), "aabbb");
        assert!(matches!(decrypt(&sk, &ct), Err(Error::PredicateMismatch)));

        let mut ct = encrypt_flag(&pp, "aabbb", &mut rng).unwrap();
        ct.positions[1].symbol = Symbol('b');
        assert!(matches!(decrypt(&sk, &ct), Err(Error::PredicateMismatch)));
    }
}
