//! Deterministic finite automata used as key predicates.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::Alphabet;
use crate::error::{Error, Result};

pub type StateId = u32;

/// An alphabet symbol as it appears in keys and ciphertexts. Encoded as its
/// Unicode code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub char);

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c)
    }
}

impl Borrow<char> for Symbol {
    fn borrow(&self) -> &char {
        &self.0
    }
}

/// `from --symbol--> to`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub symbol: char,
}

impl Transition {
    pub fn new(from: StateId, to: StateId, symbol: char) -> Self {
        Self { from, to, symbol }
    }
}

/// A validated automaton. Construct with [`Dfa::new`] or deserialize and call
/// [`Dfa::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dfa {
    pub states: BTreeSet<StateId>,
    pub alphabet: Alphabet,
    pub transitions: Vec<Transition>,
    pub start: StateId,
    pub accept_states: BTreeSet<StateId>,
}

impl Dfa {
    pub fn new(
        states: impl IntoIterator<Item = StateId>,
        alphabet: Alphabet,
        transitions: Vec<Transition>,
        start: StateId,
        accept_states: impl IntoIterator<Item = StateId>,
    ) -> Result<Self> {
        let dfa = Dfa {
            states: states.into_iter().collect(),
            alphabet,
            transitions,
            start,
            accept_states: accept_states.into_iter().collect(),
        };
        dfa.validate()?;
        Ok(dfa)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let dfa: Dfa = serde_json::from_str(s)?;
        dfa.validate()?;
        Ok(dfa)
    }

    pub fn validate(&self) -> Result<()> {
        if self.states.is_empty() {
            return Err(Error::InvalidDfa("no states".to_string()));
        }
        if !self.states.contains(&self.start) {
            return Err(Error::InvalidDfa(format!(
                "start state {} is not declared",
                self.start
            )));
        }
        if let Some(q) = self.accept_states.iter().find(|q| !self.states.contains(q)) {
            return Err(Error::InvalidDfa(format!("accept state {q} is not declared")));
        }
        let mut seen = BTreeSet::new();
        for t in &self.transitions {
            for q in [t.from, t.to] {
                if !self.states.contains(&q) {
                    return Err(Error::InvalidDfa(format!(
                        "transition {} -> {} on {:?} uses undeclared state {q}",
                        t.from, t.to, t.symbol
                    )));
                }
            }
            if !self.alphabet.contains(t.symbol) {
                return Err(Error::InvalidDfa(format!(
                    "transition symbol {:?} is not in the DFA alphabet",
                    t.symbol
                )));
            }
            if !seen.insert((t.from, t.symbol)) {
                return Err(Error::InvalidDfa(format!(
                    "state {} has two transitions on {:?}",
                    t.from, t.symbol
                )));
            }
        }
        Ok(())
    }

    /// Runs the automaton on a plaintext word.
    pub fn accepts(&self, word: &str) -> bool {
        let mut state = self.start;
        for c in word.chars() {
            match self.transitions.iter().find(|t| t.from == state && t.symbol == c) {
                Some(t) => state = t.to,
                None => return false,
            }
        }
        self.accept_states.contains(&state)
    }
}
