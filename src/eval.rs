//! Simulation of words against a DFA.

use crate::automata::dfa::{Dfa, DfaStateId};
use crate::error::{Error, Result};
use core::fmt;

/// Whether a word is in the language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    NotAccepted,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Verdict::Accepted => "accepted",
            Verdict::NotAccepted => "not accepted",
        })
    }
}

/// One consumed symbol and the state it led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub symbol: char,
    pub state: DfaStateId,
    pub name: String,
}

/// The result of running a word through a DFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,

    /// Name of the start state.
    pub start: String,

    /// States visited, in order. This stops early if the trap is reached.
    pub trace: Vec<Step>,
}

impl Evaluation {
    #[inline]
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// \return the trace as a list of state names, starting with the start
    /// state.
    pub fn path(&self) -> Vec<&str> {
        let mut path = vec![self.start.as_str()];
        path.extend(self.trace.iter().map(|s| s.name.as_str()));
        path
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.verdict)?;
        write!(f, "  start: {}", self.start)?;
        for step in &self.trace {
            write!(f, "\n  '{}' -> {}", step.symbol, step.name)?;
        }
        Ok(())
    }
}

impl Dfa {
    /// Run a word through the DFA, recording each visited state.
    /// Fails without walking if the word has a symbol outside the alphabet.
    pub fn evaluate(&self, word: &str) -> Result<Evaluation> {
        if let Some(symbol) = word.chars().find(|&c| !self.alphabet().contains(c)) {
            return Err(Error::SymbolNotInAlphabet { symbol });
        }

        let mut current = self.start();
        let mut trace = Vec::with_capacity(word.len());
        for symbol in word.chars() {
            current = self
                .next(current, symbol)
                .ok_or(Error::SymbolNotInAlphabet { symbol })?;
            log::trace!("'{}' -> {}", symbol, self.name(current));
            trace.push(Step {
                symbol,
                state: current,
                name: self.name(current),
            });
            if self.is_trap(current) {
                break;
            }
        }

        let verdict = if !self.is_trap(current) && self.is_final(current) {
            Verdict::Accepted
        } else {
            Verdict::NotAccepted
        };
        Ok(Evaluation {
            verdict,
            start: self.name(self.start()),
            trace,
        })
    }

    /// \return whether the word is in the language.
    pub fn accepts(&self, word: &str) -> Result<bool> {
        self.evaluate(word).map(|e| e.accepted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Compiler;

    #[test]
    fn test_trace() {
        let dfa = Compiler::new().compile_str("{0,1}", "0.1*").unwrap();
        let eval = dfa.evaluate("011").unwrap();
        assert!(eval.accepted());
        assert_eq!(eval.path(), vec!["q0", "q1", "q2", "q2"]);
        assert_eq!(
            eval.to_string(),
            "accepted\n  start: q0\n  '0' -> q1\n  '1' -> q2\n  '1' -> q2"
        );
    }

    #[test]
    fn test_trap_short_circuits() {
        let dfa = Compiler::new().compile_str("{0,1}", "0.1*").unwrap();
        let eval = dfa.evaluate("1011").unwrap();
        assert_eq!(eval.verdict, Verdict::NotAccepted);
        assert_eq!(eval.trace.len(), 1);
        assert_eq!(eval.trace[0].name, "qT");
    }

    #[test]
    fn test_empty_word() {
        let dfa = Compiler::new().compile_str("a,b", "a*").unwrap();
        let eval = dfa.evaluate("").unwrap();
        assert!(eval.accepted());
        assert!(eval.trace.is_empty());
        assert_eq!(eval.to_string(), "accepted\n  start: q0");
    }

    #[test]
    fn test_foreign_symbol() {
        let dfa = Compiler::new().compile_str("a,b", "a.b").unwrap();
        assert_eq!(
            dfa.evaluate("ac"),
            Err(Error::SymbolNotInAlphabet { symbol: 'c' })
        );
        assert_eq!(dfa.accepts("ab"), Ok(true));
    }
}
