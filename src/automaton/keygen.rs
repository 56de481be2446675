use std::collections::BTreeMap;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use rand::{CryptoRng, RngCore};

use super::setup::MasterKey;
use crate::dfa::{Dfa, StateId, Transition};
use crate::error::{self, Error};
use crate::group::{sample_g2, sample_scalar, G2};

/// Key component for one transition (x, y, σ)
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct TransitionKey {
    pub transition: Transition,
    pub k1: G2, // D[x]^(-1) · z^(r_t)
    pub k2: G2, // g^(r_t)
    pub k3: G2, // D[y] · h_σ^(r_t)
}

/// Key component for one accept state x
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AcceptKey {
    pub state: StateId,
    pub k1: G2, // g^(-α) · D[x] · h_end^(r_x)
    pub k2: G2, // g^(r_x)
}

/// Secret key for a DFA. Size is linear in |transitions| + |accept states|.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize)]
pub struct SecretKey {
    pub start_state: StateId,
    pub start_k1: G2, // D[q0] · h_start^(r_start)
    pub start_k2: G2, // g^(r_start)
    pub transitions: Vec<TransitionKey>,
    pub accept: Vec<AcceptKey>,
}

/// Automaton.KeyGen(msk, M)
///
/// # Arguments
/// * `msk` - Master key
/// * `dfa` - Automaton whose language the key will recognise
/// * `rng` - Random number generator for the state blinding values and per-component scalars
///
/// # Returns
/// * `SecretKey` - start pair, one triple per transition, one pair per accept state
///
/// The blinding values D[q] are sampled fresh per key and discarded; they only
/// survive inside the components, where consecutive transitions cancel them.
pub fn keygen<R: RngCore + CryptoRng + ?Sized>(
    msk: &MasterKey,
    dfa: &Dfa,
    rng: &mut R,
) -> error::Result<SecretKey> {
    dfa.validate()?;
    if let Some(c) = dfa.alphabet.iter().find(|c| !msk.h.contains_key(c)) {
        return Err(Error::InvalidDfa(format!(
            "symbol {c:?} has no generator in the master key"
        )));
    }

    let mut blinding: BTreeMap<StateId, G2> = BTreeMap::new();
    for &q in &dfa.states {
        blinding.insert(q, sample_g2(rng)?);
    }
    let d = |q: StateId| -> error::Result<G2> {
        blinding
            .get(&q)
            .copied()
            .ok_or_else(|| Error::InvalidDfa(format!("state {q} is not declared")))
    };

    let r_start = sample_scalar(rng)?;
    let start_k1 = d(dfa.start)? + msk.h_start * r_start;
    let start_k2 = msk.g * r_start;

    let mut transitions = Vec::with_capacity(dfa.transitions.len());
    for t in &dfa.transitions {
        let h_sigma = msk
            .h
            .get(&t.symbol)
            .ok_or_else(|| Error::InvalidDfa(format!("symbol {:?} has no generator", t.symbol)))?;
        let r_t = sample_scalar(rng)?;
        transitions.push(TransitionKey {
            transition: *t,
            k1: -d(t.from)? + msk.z * r_t,
            k2: msk.g * r_t,
            k3: d(t.to)? + *h_sigma * r_t,
        });
    }

    let g_neg_alpha = msk.g * (-msk.alpha);
    let mut accept = Vec::with_capacity(dfa.accept_states.len());
    for &q in &dfa.accept_states {
        let r_x = sample_scalar(rng)?;
        accept.push(AcceptKey {
            state: q,
            k1: g_neg_alpha + d(q)? + msk.h_end * r_x,
            k2: msk.g * r_x,
        });
    }

    debug!(
        "automaton key: {} states, {} transitions, {} accept states",
        dfa.states.len(),
        transitions.len(),
        accept.len()
    );

    Ok(SecretKey {
        start_state: dfa.start,
        start_k1,
        start_k2,
        transitions,
        accept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::setup::setup;
    use crate::config::{Alphabet, SecurityParams};
    use crate::dfa::tests::aabb_plus;
    use crate::group::tests::BrokenRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_keygen_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let (msk, _pp) = setup(&SecurityParams::default(), &"ab".chars().collect(), &mut rng).unwrap();
        let dfa = aabb_plus();
        let sk = keygen(&msk, &dfa, &mut rng).unwrap();

        assert_eq!(sk.start_state, 0);
        assert_eq!(sk.transitions.len(), 5);
        assert_eq!(sk.accept.len(), 1);
        assert_eq!(sk.accept[0].state, 4);
        assert_eq!(sk.transitions[4].transition, Transition::new(4, 4, 'b'));
    }

    #[test]
    fn test_keygen_is_unlinkable() {
        let mut rng = StdRng::seed_from_u64(43);
        let (msk, _pp) = setup(&SecurityParams::default(), &"ab".chars().collect(), &mut rng).unwrap();
        let dfa = aabb_plus();
        let a = keygen(&msk, &dfa, &mut rng).unwrap();
        let b = keygen(&msk, &dfa, &mut rng).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.transitions[0].k1, b.transitions[0].k1);
    }

    #[test]
    fn test_keygen_rejects_foreign_symbols() {
        let mut rng = StdRng::seed_from_u64(44);
        let (msk, _pp) = setup(&SecurityParams::default(), &"a".chars().collect(), &mut rng).unwrap();
        let err = keygen(&msk, &aabb_plus(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidDfa(_)));
    }

    #[test]
    fn test_keygen_rejects_invalid_dfa() {
        let mut rng = StdRng::seed_from_u64(45);
        let alphabet: Alphabet = "ab".chars().collect();
        let (msk, _pp) = setup(&SecurityParams::default(), &alphabet, &mut rng).unwrap();
        let mut dfa = aabb_plus();
        dfa.transitions.push(Transition::new(4, 9, 'a'));
        assert!(matches!(keygen(&msk, &dfa, &mut rng), Err(Error::InvalidDfa(_))));
    }

    #[test]
    fn test_keygen_broken_rng() {
        let mut rng = StdRng::seed_from_u64(46);
        let (msk, _pp) = setup(&SecurityParams::default(), &"ab".chars().collect(), &mut rng).unwrap();
        assert!(matches!(
            keygen(&msk, &aabb_plus(), &mut BrokenRng),
            Err(Error::Randomness(_))
        ));
    }
}
