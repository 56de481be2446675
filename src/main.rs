use std::process::ExitCode;

use log::info;
use pe_search::parallel::{encrypt_keywords, find_automaton_matches, scan_keywords};
use pe_search::{
    decrypt_automaton, encrypt_automaton, extract_automaton, extract_identity, flag_element,
    setup_from_config, Dfa, Encode, SchemeConfig, Transition,
};

const SAMPLE_TEXT: &str = "Pellentesque sed viverra nisi, ut sollicitudin felis. Curabitur lorem neque, \
pulvinar vel porta et, euismod dignissim turpis. Nullam consequat sapien leo, ac rhoncus tortor \
imperdiet a. Praesent condimentum nunc ante, at cursus diam maximus vitae. In eleifend aliquam velit, \
eget fermentum nunc. Integer sit lorem lacus porta, rutrum lacus vel, felis felis. In ut metus lacinia \
erat dapibus accumsan. Nulla facilisi. Ut ut lectus feugiat lorem felis vestibulum. Ut lorem, diam in \
posuere vehicula, nulla turpis venenatis tortor, nec ullamcorper dolor neque et ligula. Suspendisse eu \
libero vel erat congue tempor non molestie arcu. Donec auctor, sem vitae malesuada lobortis, lorem eros \
accumsan nibh, id tempus risus lorem quis nullam. Sed euismod rhoncus elit, non eleifend tortor \
fringilla felis. Aliquam erat volutpat. Morbi interdum elit nec efficitur malesuada.";

const SAMPLE_KEYWORDS: [&str; 4] = ["lorem", "felis", "eros", "porta"];

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// aa b+ over {a, b}
fn aabb_plus() -> pe_search::Result<Dfa> {
    Dfa::new(
        0..=4,
        "ab".chars().collect(),
        vec![
            Transition::new(0, 1, 'a'),
            Transition::new(1, 2, 'a'),
            Transition::new(2, 3, 'b'),
            Transition::new(3, 4, 'b'),
            Transition::new(4, 4, 'b'),
        ],
        0,
        [4],
    )
}

fn run() -> pe_search::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SchemeConfig::load(path)?,
        None => SchemeConfig::default(),
    };

    println!("=== Predicate Encryption Search Demo ===\n");

    println!("Step 1: Running Setup(1^λ, Σ)...");
    let (msk, pp) = setup_from_config(&config)?;
    println!("  Curve order: {} bits", config.security.order_bits);
    println!("  Alphabet: {} symbols", config.alphabet.len());
    println!("  Public parameters: {} bytes\n", pp.encode()?.len());

    println!("Step 2: Keyword search over the sample text...");
    let tokens = tokenize(SAMPLE_TEXT);
    let ciphertexts = encrypt_keywords(&pp.keyword, &tokens)?;
    let keys = SAMPLE_KEYWORDS
        .iter()
        .map(|k| extract_identity(&msk, k))
        .collect::<pe_search::Result<Vec<_>>>()?;
    info!("encrypted {} tokens", ciphertexts.len());

    for (keyword, count) in SAMPLE_KEYWORDS.iter().zip(scan_keywords(&keys, &ciphertexts)) {
        println!("  {keyword:>6}: found {count} times");
    }
    println!();

    println!("Step 3: Pattern search with the automaton for aa b+...");
    let sk = extract_automaton(&msk, &aabb_plus()?)?;
    let m = flag_element(true);
    for word in ["aabbb", "aab"] {
        let ct = encrypt_automaton(&pp, word, &m)?;
        match decrypt_automaton(&sk, &ct) {
            Ok(recovered) => println!("  {word:>6}: accepted, message recovered: {}", recovered == m),
            Err(e) if e.is_mismatch() => println!("  {word:>6}: rejected"),
            Err(e) => return Err(e),
        }
    }

    let words = ["ab", "aabb", "abab", "aabbbb"];
    let cts = words
        .iter()
        .map(|w| encrypt_automaton(&pp, w, &m))
        .collect::<pe_search::Result<Vec<_>>>()?;
    let hits: Vec<&str> = find_automaton_matches(&sk, &cts)
        .into_iter()
        .map(|i| words[i])
        .collect();
    println!("  matches among {words:?}: {hits:?}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
