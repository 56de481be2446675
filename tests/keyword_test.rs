//! End-to-end keyword search through the public entry points

use pe_search::keyword;
use pe_search::parallel::{encrypt_keywords, find_keyword_matches, scan_keywords};
use pe_search::{
    decrypt_identity, encrypt_identity, extract_identity, setup, Alphabet, Encode, Error,
    SecurityParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLE_TEXT: &str = "Pellentesque sed viverra nisi, ut sollicitudin felis. Curabitur lorem neque, \
pulvinar vel porta et, euismod dignissim turpis. Nullam consequat sapien leo, ac rhoncus tortor \
imperdiet a. Praesent condimentum nunc ante, at cursus diam maximus vitae. In eleifend aliquam velit, \
eget fermentum nunc. Integer sit lorem lacus porta, rutrum lacus vel, felis felis. In ut metus lacinia \
erat dapibus accumsan. Nulla facilisi. Ut ut lectus feugiat lorem felis vestibulum. Ut lorem, diam in \
posuere vehicula, nulla turpis venenatis tortor, nec ullamcorper dolor neque et ligula. Suspendisse eu \
libero vel erat congue tempor non molestie arcu. Donec auctor, sem vitae malesuada lobortis, lorem eros \
accumsan nibh, id tempus risus lorem quis nullam. Sed euismod rhoncus elit, non eleifend tortor \
fringilla felis. Aliquam erat volutpat. Morbi interdum elit nec efficitur malesuada.";

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[test]
fn test_identity_correctness_and_soundness() {
    let _ = env_logger::try_init();
    let (msk, pp) = setup(&SecurityParams::default(), &Alphabet::default()).unwrap();

    let identities = ["alice", "bob", "", "ünïcødé"];
    for id in identities {
        let sk = extract_identity(&msk, id).unwrap();
        for bit in [true, false] {
            let ct = encrypt_identity(&pp, id, bit).unwrap();
            assert_eq!(decrypt_identity(&sk, &ct).unwrap(), bit, "identity {id:?}");
        }
        for other in identities.iter().filter(|o| **o != id) {
            let ct = encrypt_identity(&pp, other, true).unwrap();
            let err = decrypt_identity(&sk, &ct).unwrap_err();
            assert!(err.is_mismatch(), "key {id:?} opened {other:?}");
        }
    }
}

#[test]
fn test_extraction_is_unlinkable() {
    let (msk, _pp) = setup(&SecurityParams::default(), &Alphabet::default()).unwrap();
    let a = extract_identity(&msk, "lorem").unwrap();
    let b = extract_identity(&msk, "lorem").unwrap();
    assert_ne!(a.encode().unwrap(), b.encode().unwrap());
}

#[test]
fn test_sample_text_search() {
    let _ = env_logger::try_init();
    let mut rng = StdRng::seed_from_u64(2024);
    let (msk, pp) = keyword::setup(&SecurityParams::default(), &mut rng).unwrap();

    let tokens = tokenize(SAMPLE_TEXT);
    assert_eq!(tokens.len(), 128);
    let ciphertexts = encrypt_keywords(&pp, &tokens).unwrap();

    let keywords = ["lorem", "felis", "eros", "porta", "absent"];
    let keys: Vec<_> = keywords
        .iter()
        .map(|k| keyword::extract(&msk, k, &mut rng).unwrap())
        .collect();

    assert_eq!(scan_keywords(&keys, &ciphertexts), vec![6, 5, 1, 2, 0]);

    let positions = find_keyword_matches(&keys[2], &ciphertexts);
    assert_eq!(positions.len(), 1);
    assert_eq!(tokens[positions[0]], "eros");
}

#[test]
fn test_scan_continues_past_mismatches() {
    let mut rng = StdRng::seed_from_u64(7);
    let (msk, pp) = keyword::setup(&SecurityParams::default(), &mut rng).unwrap();
    let sk = keyword::prepare_secret_key(&keyword::extract(&msk, "porta", &mut rng).unwrap());

    let mut found = 0;
    for token in ["vel", "porta", "et", "porta"] {
        let ct = keyword::encrypt_keyword(&pp, token, &mut rng).unwrap();
        match sk.decrypt(&ct) {
            Ok(true) => found += 1,
            Ok(false) => unreachable!("keyword ciphertexts carry a true flag"),
            Err(Error::PredicateMismatch) => continue,
            Err(e) => panic!("structural error: {e}"),
        }
    }
    assert_eq!(found, 2);
}
