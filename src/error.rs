use thiserror::Error;

/// Errors surfaced by setup, key extraction, encryption, decryption and decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// The entropy source failed while sampling a scalar.
    #[error("randomness source failed: {0}")]
    Randomness(#[from] rand::Error),
    /// Malformed bytes, or bytes that do not name an element of the expected group.
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
    /// The key's predicate does not hold for the ciphertext.
    #[error("predicate mismatch")]
    PredicateMismatch,
    /// Structurally invalid automaton, or one that uses symbols setup never saw.
    #[error("invalid DFA: {0}")]
    InvalidDfa(String),
    /// Automaton encryption needs at least one character.
    #[error("cannot encrypt an empty word")]
    EmptyWord,
    /// A word contains a symbol without a generator in the public parameters.
    #[error("symbol {0:?} is not in the alphabet")]
    UnknownSymbol(char),
    #[error("unsupported security parameters: {0}")]
    UnsupportedParameters(String),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the expected "no match" outcome of a scan, false for structural failures.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::PredicateMismatch)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_is_distinguishable() {
        assert!(Error::PredicateMismatch.is_mismatch());
        assert!(!Error::Decode("short".into()).is_mismatch());
        assert!(!Error::EmptyWord.is_mismatch());
    }

    #[test]
    fn test_messages() {
        assert_eq!(Error::UnknownSymbol('7').to_string(), "symbol '7' is not in the alphabet");
        assert_eq!(Error::PredicateMismatch.to_string(), "predicate mismatch");
    }
}
