//! Construction of finite automata from postfix regexes.

pub mod dfa;
pub mod nfa;
mod util;
