//! Conversion of NFAs to complete deterministic finite automata by subset
//! construction.

use crate::alphabet::Alphabet;
use crate::automata::nfa::{Nfa, StateSet};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::collections::VecDeque;

/// Default limit on the number of DFA states, including the trap.
pub const DEFAULT_STATE_BUDGET: usize = 4096;

/// Index of a DFA state. States are numbered in discovery order.
pub type DfaStateId = u32;

/// The start state is always discovered first.
pub const START_STATE: DfaStateId = 0;

/// Display name reserved for the trap state.
pub const TRAP_NAME: &str = "qT";

#[derive(Debug, Clone)]
pub struct DfaState {
    // The epsilon-closed set of NFA states this state stands for.
    // Empty for the trap.
    nfa_states: StateSet,

    // Targets indexed by the symbol's position in the alphabet.
    transitions: Box<[DfaStateId]>,

    is_final: bool,
}

impl DfaState {
    pub fn nfa_states(&self) -> &StateSet {
        &self.nfa_states
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// A single (origin, symbol, destination) transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transition {
    pub from: DfaStateId,
    pub symbol: char,
    pub to: DfaStateId,
}

/// A node of the graph view handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub is_start: bool,
    pub is_final: bool,
    pub is_trap: bool,
}

/// A labeled, directed edge of the graph view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: char,
}

/// A rendering-agnostic description of a DFA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A complete DFA: every state has a transition on every alphabet symbol.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    states: Box<[DfaState]>,
    trap: Option<DfaStateId>,
}

// Registry of discovered subsets. The index of a subset is its state id.
struct Subsets {
    sets: IndexSet<StateSet>,
    rows: Vec<Box<[Option<DfaStateId>]>>,
    state_budget: usize,
    width: usize,
}

impl Subsets {
    /// Register a subset, returning its id and whether it is new.
    fn register(&mut self, set: StateSet) -> Result<(DfaStateId, bool)> {
        let (idx, inserted) = self.sets.insert_full(set);
        if inserted {
            if self.sets.len() > self.state_budget {
                return Err(Error::StateExplosion {
                    limit: self.state_budget,
                });
            }
            self.rows.push(vec![None; self.width].into_boxed_slice());
        }
        Ok((idx as DfaStateId, inserted))
    }
}

impl Dfa {
    /// Build a complete DFA from an NFA.
    /// Symbols are explored in canonical alphabet order, so state numbering is
    /// reproducible.
    pub fn from_nfa(nfa: &Nfa, state_budget: usize) -> Result<Self> {
        let alphabet = nfa.alphabet();
        let mut subsets = Subsets {
            sets: IndexSet::new(),
            rows: Vec::new(),
            state_budget,
            width: alphabet.len(),
        };
        let mut queue = VecDeque::new();

        let (start, _) = subsets.register(nfa.epsilon_closure([nfa.start()]))?;
        debug_assert_eq!(start, START_STATE);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let set = subsets.sets[current as usize].clone();
            for (sym_idx, symbol) in alphabet.iter().enumerate() {
                let moved = nfa.move_on(&set, symbol);
                if moved.is_empty() {
                    continue;
                }
                let (next, inserted) = subsets.register(nfa.epsilon_closure(moved))?;
                if inserted {
                    log::trace!("discovered q{} from q{} on '{}'", next, current, symbol);
                    queue.push_back(next);
                }
                subsets.rows[current as usize][sym_idx] = Some(next);
            }
        }

        let Subsets { sets, rows, .. } = subsets;
        let needs_trap = rows.iter().any(|row| row.contains(&None));
        let trap = if needs_trap {
            if sets.len() + 1 > state_budget {
                return Err(Error::StateExplosion {
                    limit: state_budget,
                });
            }
            Some(sets.len() as DfaStateId)
        } else {
            None
        };

        let accept = nfa.accept();
        let mut states: Vec<DfaState> = sets
            .into_iter()
            .zip(rows)
            .map(|(nfa_states, row)| DfaState {
                is_final: nfa_states.contains(accept),
                transitions: row
                    .iter()
                    .map(|t| t.or(trap).expect("Missing transition without a trap"))
                    .collect(),
                nfa_states,
            })
            .collect();

        if let Some(trap) = trap {
            log::debug!("completing DFA with trap state q{}", trap);
            states.push(DfaState {
                nfa_states: StateSet::default(),
                transitions: vec![trap; alphabet.len()].into_boxed_slice(),
                is_final: false,
            });
        }

        log::debug!("built DFA with {} states", states.len());
        Ok(Dfa {
            alphabet: alphabet.clone(),
            states: states.into_boxed_slice(),
            trap,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start(&self) -> DfaStateId {
        START_STATE
    }

    pub fn trap(&self) -> Option<DfaStateId> {
        self.trap
    }

    pub fn at(&self, id: DfaStateId) -> &DfaState {
        &self.states[id as usize]
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn is_final(&self, id: DfaStateId) -> bool {
        self.at(id).is_final
    }

    #[inline]
    pub fn is_trap(&self, id: DfaStateId) -> bool {
        self.trap == Some(id)
    }

    /// \return the target of a state's transition on a symbol, or None if the
    /// symbol is not in the alphabet.
    #[inline]
    pub fn next(&self, id: DfaStateId, symbol: char) -> Option<DfaStateId> {
        let idx = self.alphabet.index_of(symbol)?;
        Some(self.at(id).transitions[idx])
    }

    /// \return the display name of a state. The start is `q0`, others are
    /// numbered in discovery order, and the trap is `qT`.
    pub fn name(&self, id: DfaStateId) -> String {
        if self.is_trap(id) {
            TRAP_NAME.to_string()
        } else {
            format!("q{}", id)
        }
    }

    pub fn final_states(&self) -> Vec<DfaStateId> {
        (0..self.len() as DfaStateId)
            .filter(|&id| self.is_final(id))
            .collect()
    }

    /// \return every transition, sorted by origin then symbol.
    /// Origins are ordered by id, that is numerically by name (`q9` before
    /// `q10`), with the trap last.
    pub fn transitions(&self) -> Vec<Transition> {
        let mut result = Vec::with_capacity(self.len() * self.alphabet.len());
        for (from, state) in self.states.iter().enumerate() {
            for (symbol, &to) in self.alphabet.iter().zip(state.transitions.iter()) {
                result.push(Transition {
                    from: from as DfaStateId,
                    symbol,
                    to,
                });
            }
        }
        result
    }

    /// \return a rendering-agnostic view of this DFA.
    pub fn graph(&self) -> Graph {
        let nodes = (0..self.len() as DfaStateId)
            .map(|id| GraphNode {
                name: self.name(id),
                is_start: id == START_STATE,
                is_final: self.is_final(id),
                is_trap: self.is_trap(id),
            })
            .collect();
        let edges = self
            .transitions()
            .into_iter()
            .map(|t| GraphEdge {
                from: self.name(t.from),
                to: self.name(t.to),
                label: t.symbol,
            })
            .collect();
        Graph { nodes, edges }
    }
}
