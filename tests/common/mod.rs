#![allow(clippy::uninlined_format_args)]

use std::collections::BTreeSet;

/// A DFA together with the source it was compiled from.
#[derive(Debug, Clone)]
pub struct TestDfa {
    pub dfa: regdfa::Dfa,
    pub alphabet: String,
    pub pattern: String,
}

/// Compile \p pattern over \p alphabet, panicking on failure.
#[track_caller]
pub fn compile(alphabet: &str, pattern: &str) -> TestDfa {
    let dfa = regdfa::compile(alphabet, pattern)
        .unwrap_or_else(|err| panic!("Pattern '{}' failed to compile: {}", pattern, err));
    TestDfa {
        dfa,
        alphabet: alphabet.to_string(),
        pattern: pattern.to_string(),
    }
}

impl TestDfa {
    /// "Fluent" style helper for testing that all words are accepted.
    #[track_caller]
    pub fn test_accepts(&self, words: &[&str]) -> &Self {
        for word in words {
            assert_eq!(
                self.dfa.accepts(word),
                Ok(true),
                "Pattern '{}' should accept '{}'",
                self.pattern,
                word
            );
        }
        self
    }

    /// "Fluent" style helper for testing that all words are rejected.
    #[track_caller]
    pub fn test_rejects(&self, words: &[&str]) -> &Self {
        for word in words {
            assert_eq!(
                self.dfa.accepts(word),
                Ok(false),
                "Pattern '{}' should reject '{}'",
                self.pattern,
                word
            );
        }
        self
    }

    /// \return the transition table as (origin, symbol, destination) names.
    pub fn table(&self) -> Vec<(String, char, String)> {
        self.dfa
            .transitions()
            .into_iter()
            .map(|t| (self.dfa.name(t.from), t.symbol, self.dfa.name(t.to)))
            .collect()
    }
}

/// Test that compiling fails with an error matching \p pred.
#[track_caller]
pub fn test_compile_fails(alphabet: &str, pattern: &str, pred: impl Fn(&regdfa::Error) -> bool) {
    match regdfa::compile(alphabet, pattern) {
        Ok(_) => panic!("Pattern should not have compiled: {}", pattern),
        Err(err) => assert!(
            pred(&err),
            "Unexpected error '{}' for pattern '{}'",
            err,
            pattern
        ),
    }
}

/// Enumerate all words over \p symbols with length at most \p max_len.
pub fn all_words(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut result = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for w in &frontier {
            for &c in symbols {
                let mut s = w.clone();
                s.push(c);
                next.push(s);
            }
        }
        result.extend(next.iter().cloned());
        frontier = next;
    }
    result
}

/// A regex syntax tree for reference matching.
#[derive(Debug)]
enum Ast {
    Empty,
    Sym(char),
    Cat(Box<Ast>, Box<Ast>),
    Alt(Box<Ast>, Box<Ast>),
    Star(Box<Ast>),
}

/// A recursive descent parser, independent of the crate under test.
/// Concatenation may be explicit or implicit.
struct RefParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl RefParser<'_> {
    fn alt(&mut self) -> Ast {
        let mut left = self.cat();
        while self.chars.peek() == Some(&'|') {
            self.chars.next();
            let right = self.cat();
            left = Ast::Alt(Box::new(left), Box::new(right));
        }
        left
    }

    fn cat(&mut self) -> Ast {
        let mut left: Option<Ast> = None;
        loop {
            match self.chars.peek() {
                None | Some('|') | Some(')') => break,
                Some('.') => {
                    self.chars.next();
                    continue;
                }
                _ => {}
            }
            let item = self.star();
            left = Some(match left {
                None => item,
                Some(l) => Ast::Cat(Box::new(l), Box::new(item)),
            });
        }
        left.unwrap_or(Ast::Empty)
    }

    fn star(&mut self) -> Ast {
        let mut atom = match self.chars.next() {
            Some('(') => {
                let inner = self.alt();
                assert_eq!(self.chars.next(), Some(')'));
                inner
            }
            Some(c) => Ast::Sym(c),
            None => unreachable!(),
        };
        while self.chars.peek() == Some(&'*') {
            self.chars.next();
            atom = Ast::Star(Box::new(atom));
        }
        atom
    }
}

/// \return the positions at which a match of \p ast beginning at each of
/// \p starts can end.
fn ends(ast: &Ast, word: &[char], starts: &BTreeSet<usize>) -> BTreeSet<usize> {
    match ast {
        Ast::Empty => starts.clone(),
        Ast::Sym(c) => starts
            .iter()
            .filter(|&&i| word.get(i) == Some(c))
            .map(|&i| i + 1)
            .collect(),
        Ast::Cat(l, r) => ends(r, word, &ends(l, word, starts)),
        Ast::Alt(l, r) => {
            let mut result = ends(l, word, starts);
            result.extend(ends(r, word, starts));
            result
        }
        Ast::Star(body) => {
            let mut result = starts.clone();
            let mut frontier = starts.clone();
            while !frontier.is_empty() {
                let next: BTreeSet<usize> = ends(body, word, &frontier)
                    .difference(&result)
                    .copied()
                    .collect();
                result.extend(next.iter().copied());
                frontier = next;
            }
            result
        }
    }
}

/// Reference definition of language membership.
pub fn reference_matches(pattern: &str, word: &str) -> bool {
    let mut parser = RefParser {
        chars: pattern.chars().peekable(),
    };
    let ast = parser.alt();
    assert!(parser.chars.next().is_none(), "Trailing input in {}", pattern);
    let word: Vec<char> = word.chars().collect();
    let starts: BTreeSet<usize> = [0].into_iter().collect();
    ends(&ast, &word, &starts).contains(&word.len())
}
