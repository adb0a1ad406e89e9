/*!

# regdfa - regular expressions to deterministic finite automata

This crate compiles a regular expression over a finite alphabet into a complete deterministic finite automaton, and evaluates words against it.

# Example: test if a word is accepted

```rust
let dfa = regdfa::compile("{0,1}", "0.1*").unwrap();
assert_eq!(dfa.accepts("0111"), Ok(true));
assert_eq!(dfa.accepts("00"), Ok(false));
```

# Example: tracing a word

Evaluation records the state reached after each symbol:

```rust
use regdfa::Verdict;
let dfa = regdfa::compile("a,b", "(a|b)*b").unwrap();
let eval = dfa.evaluate("ab").unwrap();
assert_eq!(eval.verdict, Verdict::Accepted);
println!("{}", eval);
// Output: accepted
// Output:   start: q0
// Output:   'a' -> q1
// Output:   'b' -> q2
```

# Supported Syntax

Symbols are single characters from the alphabet. The operators are:

- `|` union, lowest precedence
- `.` concatenation, which may also be left implicit: `ab` is `a.b`
- `*` Kleene star, highest precedence
- `(` and `)` for grouping

There are no anchors, character classes or repetition counts.

# Architecture

regdfa validates the regex against the alphabet, inserts explicit concatenation operators, converts the result to postfix with the shunting-yard algorithm, builds an NFA by Thompson construction, and converts that NFA to a DFA by subset construction. Missing transitions are completed with a trap state, so the DFA's transition function is total.

State names are reproducible: the start state is `q0`, other states are numbered in the order subset construction discovers them (symbols are always explored in sorted order), and the trap is `qT`.

Compilation may be bounded with [`Compiler::nfa_state_budget`] and [`Compiler::dfa_state_budget`].

*/

#![warn(clippy::all)]

pub use crate::api::*;

mod alphabet;
mod api;
mod automata;
mod error;
mod eval;
mod normalize;
mod postfix;
