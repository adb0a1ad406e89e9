//! Human-readable dumps of automata.

use crate::automata::dfa::{Dfa, DfaStateId, Transition};
use crate::automata::nfa::{Nfa, StateHandle};
use core::fmt;

/// Format a symbol in a readable way.
fn format_symbol(c: char) -> String {
    match c {
        '\\' => "'\\\\'".to_string(),
        '\'' => "'\\''".to_string(),
        c if c.is_control() => format!("U+{:04X}", c as u32),
        c => format!("'{}'", c),
    }
}

impl Nfa {
    /// Generate a human-readable representation of the NFA
    pub fn to_readable_string(&self) -> String {
        let mut result = String::new();
        result.push_str("NFA States:\n");
        result.push_str("===========\n\n");

        for (idx, state) in self.states().iter().enumerate() {
            let state_idx = idx as StateHandle;

            // Add special state markers
            let marker = match state_idx {
                idx if idx == self.start() && idx == self.accept() => " (START, ACCEPT)",
                idx if idx == self.start() => " (START)",
                idx if idx == self.accept() => " (ACCEPT)",
                _ => "",
            };

            result.push_str(&format!("State {}{}\n", state_idx, marker));

            if !state.transitions.is_empty() {
                result.push_str("  Symbol transitions:\n");
                for &(symbol, target) in &state.transitions {
                    result.push_str(&format!("    {} ──> {}\n", format_symbol(symbol), target));
                }
            }

            if !state.eps.is_empty() {
                result.push_str("  ε-transitions:\n");
                for &target in &state.eps {
                    let dest = match target {
                        idx if idx == self.start() => "START".to_string(),
                        idx if idx == self.accept() => "ACCEPT".to_string(),
                        _ => target.to_string(),
                    };
                    result.push_str(&format!("    ε ──> {}\n", dest));
                }
            }

            if state.eps.is_empty() && state.transitions.is_empty() && !state.is_final {
                result.push_str("  (no transitions)\n");
            }

            result.push('\n');
        }

        result
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NFA({} states)", self.len())?;
        for (idx, state) in self.states().iter().enumerate() {
            let handle = idx as StateHandle;
            let marker = match handle {
                h if h == self.start() => "S",
                h if h == self.accept() => "A",
                _ => " ",
            };

            write!(f, "[{}{}]", marker, handle)?;

            for &(symbol, target) in &state.transitions {
                write!(f, " {}→{}", symbol, target)?;
            }

            for &target in &state.eps {
                write!(f, " ε→{}", target)?;
            }

            if idx + 1 < self.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Dfa {
    /// Render a transition as `origin --symbol--> destination`.
    pub fn describe(&self, t: &Transition) -> String {
        format!("{} --{}--> {}", self.name(t.from), t.symbol, self.name(t.to))
    }

    fn names_of(&self, ids: &[DfaStateId]) -> String {
        let names: Vec<String> = ids.iter().map(|&id| self.name(id)).collect();
        format!("{{{}}}", names.join(", "))
    }

    /// Generate a human-readable representation of the DFA: the transition
    /// listing followed by start, final and trap annotations.
    pub fn to_readable_string(&self) -> String {
        let mut result = String::new();
        result.push_str("DFA Transitions:\n");
        result.push_str("================\n\n");
        for t in self.transitions() {
            result.push_str(&self.describe(&t));
            result.push('\n');
        }
        result.push('\n');
        result.push_str(&format!("Start state: {}\n", self.name(self.start())));
        result.push_str(&format!(
            "Final states: {}\n",
            self.names_of(&self.final_states())
        ));
        if let Some(trap) = self.trap() {
            result.push_str(&format!("Trap state: {}\n", self.name(trap)));
        }
        result
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DFA({} states)", self.len())?;
        for (idx, state) in self.states().iter().enumerate() {
            let id = idx as DfaStateId;
            let marker = match id {
                id if self.is_trap(id) => "T",
                id if id == self.start() && state.is_final() => "*",
                id if id == self.start() => "S",
                _ if state.is_final() => "F",
                _ => " ",
            };
            write!(f, "[{}{}] {:?}", marker, self.name(id), state.nfa_states().as_slice())?;
            for symbol in self.alphabet().iter() {
                if let Some(to) = self.next(id, symbol) {
                    write!(f, " {}→{}", symbol, self.name(to))?;
                }
            }
            if idx + 1 < self.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
