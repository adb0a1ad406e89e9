//! Thompson construction of non-deterministic finite automata from postfix
//! regexes.

use crate::alphabet::Alphabet;
use crate::error::{malformed, Error, Result};
use crate::postfix::{Postfix, Token};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Default limit on the number of NFA states.
pub const DEFAULT_STATE_BUDGET: usize = 2048;

// A handle to a State in the NFA.
// This is an index into the NFA's state arena.
pub type StateHandle = u32;

#[derive(Debug, Default, Clone)]
pub struct State {
    // Epsilon transitions to other states. Thompson states have at most two.
    pub eps: SmallVec<[StateHandle; 2]>,

    // Symbol transitions to other states, sorted by symbol then target.
    pub transitions: Vec<(char, StateHandle)>,

    pub is_final: bool,
}

impl State {
    // Add an epsilon transition to another state.
    pub fn add_eps(&mut self, target: StateHandle) {
        if !self.eps.contains(&target) {
            self.eps.push(target);
        }
    }

    // Add a symbol transition to another state.
    pub fn add_transition(&mut self, symbol: char, dest: StateHandle) {
        let edge = (symbol, dest);
        if let Err(i) = self.transitions.binary_search(&edge) {
            self.transitions.insert(i, edge);
        }
    }

    /// \return the targets of transitions on a symbol.
    pub fn targets(&self, symbol: char) -> impl Iterator<Item = StateHandle> + '_ {
        let lo = self.transitions.partition_point(|&(s, _)| s < symbol);
        let hi = self.transitions.partition_point(|&(s, _)| s <= symbol);
        self.transitions[lo..hi].iter().map(|&(_, dst)| dst)
    }
}

/// A sorted, deduplicated set of NFA states.
/// Two sets are equal iff they contain the same handles, independent of the
/// order in which the states were found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StateSet(Box<[StateHandle]>);

impl StateSet {
    pub fn from_unsorted(mut handles: Vec<StateHandle>) -> Self {
        handles.sort_unstable();
        handles.dedup();
        StateSet(handles.into_boxed_slice())
    }

    #[inline]
    pub fn contains(&self, h: StateHandle) -> bool {
        self.0.binary_search(&h).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = StateHandle> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[StateHandle] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// A piece of an NFA under construction, with a single start and a single
// accept state.
#[derive(Debug, Copy, Clone)]
struct Fragment {
    start: StateHandle,
    accept: StateHandle,
}

struct Builder<'a> {
    // States indexed by handle.
    states: Vec<State>,
    state_budget: usize,
    alphabet: &'a Alphabet,
}

impl<'a> Builder<'a> {
    fn new(alphabet: &'a Alphabet, state_budget: usize) -> Self {
        Builder {
            states: Vec::new(),
            state_budget,
            alphabet,
        }
    }

    /// Try adding a new state, returning its handle.
    fn make(&mut self) -> Result<StateHandle> {
        if self.states.len() < self.state_budget {
            self.states.push(State::default());
            Ok(self.states.len() as StateHandle - 1)
        } else {
            Err(Error::StateExplosion {
                limit: self.state_budget,
            })
        }
    }

    /// Access a state by handle.
    fn get(&mut self, idx: StateHandle) -> &mut State {
        &mut self.states[idx as usize]
    }

    /// Build the fragment for a whole postfix sequence.
    fn build(&mut self, postfix: &Postfix) -> Result<Fragment> {
        let mut stack: Vec<Fragment> = Vec::new();
        for &tok in &postfix.tokens {
            let frag = match tok {
                Token::Symbol(c) => self.build_symbol(c)?,
                Token::Star => {
                    let body = pop_operand(&mut stack, tok)?;
                    self.build_star(body)?
                }
                Token::Concat => {
                    let right = pop_operand(&mut stack, tok)?;
                    let left = pop_operand(&mut stack, tok)?;
                    self.build_cat(left, right)
                }
                Token::Union => {
                    let right = pop_operand(&mut stack, tok)?;
                    let left = pop_operand(&mut stack, tok)?;
                    self.build_alt(left, right)?
                }
                Token::LParen | Token::RParen => {
                    return malformed(format!("unexpected '{}' in postfix sequence", tok))
                }
            };
            stack.push(frag);
        }

        match stack.len() {
            0 => Err(Error::EmptyExpression),
            1 => Ok(stack[0]),
            n => malformed(format!("{} operands are missing an operator", n - 1)),
        }
    }

    /// Two states joined by a transition on the symbol.
    fn build_symbol(&mut self, c: char) -> Result<Fragment> {
        if !self.alphabet.contains(c) {
            return Err(Error::SymbolNotInAlphabet { symbol: c });
        }
        let start = self.make()?;
        let accept = self.make()?;
        self.get(start).add_transition(c, accept);
        Ok(Fragment { start, accept })
    }

    /// Kleene closure: the body may be skipped or repeated.
    fn build_star(&mut self, body: Fragment) -> Result<Fragment> {
        let start = self.make()?;
        let accept = self.make()?;
        self.get(start).add_eps(body.start);
        self.get(start).add_eps(accept);
        self.get(body.accept).add_eps(body.start);
        self.get(body.accept).add_eps(accept);
        Ok(Fragment { start, accept })
    }

    /// Concatenation: the left accept state flows into the right start.
    fn build_cat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.get(left.accept).add_eps(right.start);
        Fragment {
            start: left.start,
            accept: right.accept,
        }
    }

    /// Alternation of two fragments.
    fn build_alt(&mut self, left: Fragment, right: Fragment) -> Result<Fragment> {
        let start = self.make()?;
        let accept = self.make()?;
        self.get(start).add_eps(left.start);
        self.get(start).add_eps(right.start);
        self.get(left.accept).add_eps(accept);
        self.get(right.accept).add_eps(accept);
        Ok(Fragment { start, accept })
    }
}

fn pop_operand(stack: &mut Vec<Fragment>, op: Token) -> Result<Fragment> {
    match stack.pop() {
        Some(frag) => Ok(frag),
        None => malformed(format!("operator '{}' is missing an operand", op)),
    }
}

/// Visit states reachable from `start` in breadth-first order, following
/// symbol transitions and then epsilon transitions.
fn breadth_first(states: &[State], start: StateHandle) -> Vec<StateHandle> {
    let mut seen = vec![false; states.len()];
    let mut order = Vec::with_capacity(states.len());
    let mut queue = VecDeque::new();
    seen[start as usize] = true;
    queue.push_back(start);
    while let Some(h) = queue.pop_front() {
        order.push(h);
        let state = &states[h as usize];
        let succs = state
            .transitions
            .iter()
            .map(|&(_, dst)| dst)
            .chain(state.eps.iter().copied());
        for next in succs {
            if !seen[next as usize] {
                seen[next as usize] = true;
                queue.push_back(next);
            }
        }
    }
    order
}

// Keep only states reachable from the start, renumbered densely in
// breadth-first order so the start state is 0.
fn compact(states: Vec<State>, start: StateHandle) -> (Vec<State>, Vec<Option<StateHandle>>) {
    let order = breadth_first(&states, start);
    let mut forwarding = vec![None; states.len()];
    for (dense, &sparse) in order.iter().enumerate() {
        forwarding[sparse as usize] = Some(dense as StateHandle);
    }
    let forward = |h: StateHandle| forwarding[h as usize].expect("Target should be reachable");

    let mut slots: Vec<Option<State>> = states.into_iter().map(Some).collect();
    let mut dense = Vec::with_capacity(order.len());
    for &sparse in &order {
        let mut state = slots[sparse as usize]
            .take()
            .expect("State should be visited once");
        for target in state.eps.iter_mut() {
            *target = forward(*target);
        }
        for edge in state.transitions.iter_mut() {
            edge.1 = forward(edge.1);
        }
        state.transitions.sort_unstable();
        dense.push(state);
    }
    (dense, forwarding)
}

#[derive(Debug, Clone)]
pub struct Nfa {
    start: StateHandle,
    accept: StateHandle,
    states: Box<[State]>,
    alphabet: Alphabet,
}

impl Nfa {
    /// Build an NFA from a postfix regex by Thompson construction.
    /// Fails if a symbol is outside the alphabet, if operators lack operands,
    /// or if the state budget is exceeded.
    pub fn from_postfix(
        postfix: &Postfix,
        alphabet: &Alphabet,
        state_budget: usize,
    ) -> Result<Self> {
        let mut b = Builder::new(alphabet, state_budget);
        let Fragment { start, accept } = b.build(postfix)?;
        b.get(accept).is_final = true;

        let (states, forwarding) = compact(b.states, start);
        let forward = |h: StateHandle| forwarding[h as usize];
        let (start, accept) = match (forward(start), forward(accept)) {
            (Some(s), Some(a)) => (s, a),
            _ => return malformed("accept state is unreachable"),
        };
        log::debug!("built NFA with {} states", states.len());
        Ok(Nfa {
            start,
            accept,
            states: states.into_boxed_slice(),
            alphabet: alphabet.clone(),
        })
    }

    pub fn at(&self, idx: StateHandle) -> &State {
        &self.states[idx as usize]
    }

    pub fn start(&self) -> StateHandle {
        self.start
    }

    pub fn accept(&self) -> StateHandle {
        self.accept
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// \return all states reachable from the start, in breadth-first order.
    pub fn reachable(&self) -> Vec<StateHandle> {
        breadth_first(&self.states, self.start)
    }

    /// \return the set of states reachable from the seeds through epsilon
    /// transitions alone, including the seeds.
    pub fn epsilon_closure<I>(&self, seeds: I) -> StateSet
    where
        I: IntoIterator<Item = StateHandle>,
    {
        let mut seen = vec![false; self.states.len()];
        let mut found = Vec::new();
        let mut worklist: Vec<StateHandle> = Vec::new();
        for h in seeds {
            if !seen[h as usize] {
                seen[h as usize] = true;
                worklist.push(h);
            }
        }
        while let Some(h) = worklist.pop() {
            found.push(h);
            for &next in &self.at(h).eps {
                if !seen[next as usize] {
                    seen[next as usize] = true;
                    worklist.push(next);
                }
            }
        }
        StateSet::from_unsorted(found)
    }

    /// \return the targets of transitions on a symbol from any state in the
    /// set. Epsilon transitions are not followed.
    pub fn move_on(&self, set: &StateSet, symbol: char) -> Vec<StateHandle> {
        let mut result: Vec<StateHandle> = set
            .iter()
            .flat_map(|h| self.at(h).targets(symbol))
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }
}
