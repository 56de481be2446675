use super::encrypt::Ciphertext;
use super::extract::SecretKey;
use crate::error::{Error, Result};
use crate::group::{flag_from_element, multi_pair, G2Prepared, Gt};

/// Keyword.Decrypt(sk, ct) for a target-group message
///
/// Computes m = C · e(C0, d0) · e(C1, d1) · e(C2, d2) · e(C3, d3) · e(C4, d4)
/// as one multi-pairing. The blinding Ω^s cancels only when the key and the
/// ciphertext carry the same keyword; otherwise the result is a random element.
pub fn decrypt_element(sk: &SecretKey, ct: &Ciphertext) -> Gt {
    ct.c * multi_pair([
        (ct.c0, sk.d0),
        (ct.c1, sk.d1),
        (ct.c2, sk.d2),
        (ct.c3, sk.d3),
        (ct.c4, sk.d4),
    ])
}

/// Recovers the bit of a ciphertext produced by [`super::encrypt`].
///
/// # Returns
/// * `Ok(bit)` if the key's keyword matches
/// * `Err(Error::PredicateMismatch)` otherwise
pub fn decrypt(sk: &SecretKey, ct: &Ciphertext) -> Result<bool> {
    flag_from_element(&decrypt_element(sk, ct)).ok_or(Error::PredicateMismatch)
}

/// Keyword test: true iff `ct` encrypts `true` under the key's keyword.
pub fn matches(sk: &SecretKey, ct: &Ciphertext) -> bool {
    matches!(decrypt(sk, ct), Ok(true))
}

/// Secret key with its Miller-loop precomputation done once, for scanning
/// many ciphertexts with the same key.
#[derive(Clone, Debug)]
pub struct PreparedSecretKey {
    pub d: [G2Prepared; 5],
}

pub fn prepare_secret_key(sk: &SecretKey) -> PreparedSecretKey {
    PreparedSecretKey {
        d: [sk.d0, sk.d1, sk.d2, sk.d3, sk.d4].map(G2Prepared::from),
    }
}

impl PreparedSecretKey {
    pub fn decrypt_element(&self, ct: &Ciphertext) -> Gt {
        let c = [ct.c0, ct.c1, ct.c2, ct.c3, ct.c4];
        ct.c * multi_pair(c.into_iter().zip(self.d.iter().cloned()))
    }

    pub fn decrypt(&self, ct: &Ciphertext) -> Result<bool> {
        flag_from_element(&self.decrypt_element(ct)).ok_or(Error::PredicateMismatch)
    }

    pub fn matches(&self, ct: &Ciphertext) -> bool {
        matches!(self.decrypt(ct), Ok(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityParams;
    use crate::group::{g1_generator, g2_generator, pair};
    use crate::keyword::encrypt::{encrypt, encrypt_element, encrypt_keyword};
    use crate::keyword::extract::extract;
    use crate::keyword::setup::setup;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_decrypt_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let (msk, pp) = setup(&SecurityParams::default(), &mut rng).unwrap();
        let m = pair(&(g1_generator() * crate::group::sample_scalar(&mut rng).unwrap()), &g2_generator());

        let sk = extract(&msk, "feugiat", &mut rng).unwrap();
        let ct = encrypt_element(&pp, "feugiat", &m, &mut rng).unwrap();
        assert_eq!(decrypt_element(&sk, &ct), m);

        let other = extract(&msk, "feugiax", &mut rng).unwrap();
        assert_ne!(decrypt_element(&other, &ct), m);
    }

    #[test]
    fn test_decrypt_bits() {
        let mut rng = StdRng::seed_from_u64(43);
        let (msk, pp) = setup(&SecurityParams::default(), &mut rng).unwrap();
        let sk = extract(&msk, "lorem", &mut rng).unwrap();

        for bit in [true, false] {
            let ct = encrypt(&pp, "lorem", bit, &mut rng).unwrap();
            assert_eq!(decrypt(&sk, &ct).unwrap(), bit);
        }
    }

    #[test]
    fn test_mismatch() {
        let mut rng = StdRng::seed_from_u64(44);
        let (msk, pp) = setup(&SecurityParams::default(), &mut rng).unwrap();
        let sk = extract(&msk, "lorem", &mut rng).unwrap();
        let ct = encrypt_keyword(&pp, "ipsum", &mut rng).unwrap();

        assert!(matches!(decrypt(&sk, &ct), Err(Error::PredicateMismatch)));
        assert!(!matches(&sk, &ct));
    }

    #[test]
    fn test_prepared_key_agrees() {
        let mut rng = StdRng::seed_from_u64(45);
        let (msk, pp) = setup(&SecurityParams::default(), &mut rng).unwrap();
        let sk = extract(&msk, "eros", &mut rng).unwrap();
        let psk = prepare_secret_key(&sk);

        let hit = encrypt_keyword(&pp, "eros", &mut rng).unwrap();
        let miss = encrypt_keyword(&pp, "erosa", &mut rng).unwrap();
        assert_eq!(psk.decrypt_element(&hit), decrypt_element(&sk, &hit));
        assert!(psk.matches(&hit));
        assert!(!psk.matches(&miss));
    }
}
