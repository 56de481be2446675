//! Setup configuration: security parameters and the alphabet the automaton scheme
//! needs generators for.

use std::collections::BTreeSet;
use std::path::Path;

use ark_bls12_381::{Fq, Fr};
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Requested subgroup-order and base-field sizes, in bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityParams {
    pub order_bits: u32,
    pub field_bits: u32,
}

impl Default for SecurityParams {
    fn default() -> Self {
        Self {
            order_bits: Fr::MODULUS_BIT_SIZE,
            field_bits: Fq::MODULUS_BIT_SIZE,
        }
    }
}

impl SecurityParams {
    /// Checks the request against what BLS12-381 provides.
    pub fn validate(&self) -> Result<()> {
        if self.order_bits == 0 || self.field_bits == 0 {
            return Err(Error::UnsupportedParameters(
                "bit lengths must be positive".to_string(),
            ));
        }
        if self.order_bits > Fr::MODULUS_BIT_SIZE {
            return Err(Error::UnsupportedParameters(format!(
                "order of {} bits requested, curve provides {}",
                self.order_bits,
                Fr::MODULUS_BIT_SIZE
            )));
        }
        if self.field_bits > Fq::MODULUS_BIT_SIZE {
            return Err(Error::UnsupportedParameters(format!(
                "base field of {} bits requested, curve provides {}",
                self.field_bits,
                Fq::MODULUS_BIT_SIZE
            )));
        }
        Ok(())
    }
}

/// Ordered set of symbols. Ordering keeps generator maps and their encodings canonical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alphabet(BTreeSet<char>);

const DEFAULT_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz:;'\"%-^@+#&|\\()[]{}`~=_";

impl Default for Alphabet {
    fn default() -> Self {
        DEFAULT_SYMBOLS.chars().collect()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Alphabet(iter.into_iter().collect())
    }
}

impl Alphabet {
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything `scheme::setup` consumes, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub security: SecurityParams,
    pub alphabet: Alphabet,
}

impl SchemeConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: SchemeConfig = serde_json::from_str(s)?;
        config.security.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
