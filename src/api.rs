use crate::automata::{dfa, nfa};
use crate::normalize::normalize;
use crate::postfix::to_postfix;

pub use crate::alphabet::{Alphabet, Preset};
pub use crate::automata::dfa::{Dfa, DfaState, DfaStateId, Graph, GraphEdge, GraphNode, Transition};
pub use crate::automata::nfa::{Nfa, State as NfaState, StateHandle, StateSet};
pub use crate::error::{Error, Result};
pub use crate::eval::{Evaluation, Step, Verdict};
pub use crate::postfix::{Postfix, Token};

/// Options used to control compilation.
/// The defaults bound the NFA at 2048 states and the DFA at 4096 states.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of NFA states.
    pub nfa_state_budget: usize,

    /// Maximum number of DFA states, including the trap.
    pub dfa_state_budget: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            nfa_state_budget: nfa::DEFAULT_STATE_BUDGET,
            dfa_state_budget: dfa::DEFAULT_STATE_BUDGET,
        }
    }
}

/// Compiles regexes over an alphabet into complete DFAs.
/// Compilation is deterministic: identical inputs give identical DFAs with
/// identical state names.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Compiler { options }
    }

    /// Limit the number of NFA states. Exceeding it is a
    /// [`Error::StateExplosion`].
    pub fn nfa_state_budget(mut self, budget: usize) -> Self {
        self.options.nfa_state_budget = budget;
        self
    }

    /// Limit the number of DFA states. Exceeding it is a
    /// [`Error::StateExplosion`].
    pub fn dfa_state_budget(mut self, budget: usize) -> Self {
        self.options.dfa_state_budget = budget;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Validate, normalize and convert a regex, then build its NFA.
    pub fn build_nfa(&self, alphabet: &Alphabet, regex: &str) -> Result<Nfa> {
        alphabet.validate(regex)?;
        let normalized = normalize(regex);
        log::debug!("normalized '{}' to '{}'", regex, normalized);
        let postfix = to_postfix(&normalized)?;
        Nfa::from_postfix(&postfix, alphabet, self.options.nfa_state_budget)
    }

    /// Compile a regex over an alphabet into a complete DFA.
    pub fn compile(&self, alphabet: &Alphabet, regex: &str) -> Result<Dfa> {
        let nfa = self.build_nfa(alphabet, regex)?;
        Dfa::from_nfa(&nfa, self.options.dfa_state_budget)
    }

    /// Compile a regex over an alphabet given as text, like `{a,b}`.
    pub fn compile_str(&self, alphabet: &str, regex: &str) -> Result<Dfa> {
        self.compile(&Alphabet::parse(alphabet)?, regex)
    }
}

/// Compile a regex over an alphabet given as text, using default options.
pub fn compile(alphabet: &str, regex: &str) -> Result<Dfa> {
    Compiler::new().compile_str(alphabet, regex)
}

/// Individual compilation phases, for tools which want to show them.
pub mod phases {
    pub use crate::alphabet::check_parentheses;
    pub use crate::normalize::normalize;
    pub use crate::postfix::to_postfix;

    use super::{Alphabet, Dfa, Nfa, Options, Postfix, Result};

    /// Build an NFA from postfix tokens by Thompson construction.
    pub fn thompson(postfix: &Postfix, alphabet: &Alphabet, options: &Options) -> Result<Nfa> {
        Nfa::from_postfix(postfix, alphabet, options.nfa_state_budget)
    }

    /// Build a complete DFA from an NFA by subset construction.
    pub fn subset(nfa: &Nfa, options: &Options) -> Result<Dfa> {
        Dfa::from_nfa(nfa, options.dfa_state_budget)
    }
}
