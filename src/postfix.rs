//! Conversion of infix regexes (with explicit concatenation) to postfix.

use crate::error::{Error, Result};
use core::fmt;

/// A single regex token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(char),
    Star,
    Concat,
    Union,
    LParen,
    RParen,
}

impl Token {
    pub fn from_char(c: char) -> Self {
        match c {
            '*' => Token::Star,
            '.' => Token::Concat,
            '|' => Token::Union,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c => Token::Symbol(c),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Star => '*',
            Token::Concat => '.',
            Token::Union => '|',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }

    /// Binding strength of an operator. All operators are left-associative.
    fn precedence(self) -> Option<u8> {
        match self {
            Token::Star => Some(3),
            Token::Concat => Some(2),
            Token::Union => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A regex in postfix order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    pub tokens: Vec<Token>,
}

impl Postfix {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for tok in &self.tokens {
            write!(f, "{}", tok)?;
        }
        Ok(())
    }
}

/// Convert a normalized infix regex to postfix via shunting-yard.
/// Positions in `UnbalancedParentheses` errors are character offsets into
/// `regex` as passed, which includes any `.` the normalizer inserted.
pub fn to_postfix(regex: &str) -> Result<Postfix> {
    let mut output = Vec::with_capacity(regex.len());
    // Operator stack; entries are (token, position).
    let mut ops: Vec<(Token, usize)> = Vec::new();

    for (position, c) in regex.chars().enumerate() {
        let tok = Token::from_char(c);
        match tok {
            Token::Symbol(_) => output.push(tok),
            Token::LParen => ops.push((tok, position)),
            Token::RParen => loop {
                match ops.pop() {
                    Some((Token::LParen, _)) => break,
                    Some((op, _)) => output.push(op),
                    None => {
                        return Err(Error::UnbalancedParentheses {
                            position: Some(position),
                        })
                    }
                }
            },
            Token::Star | Token::Concat | Token::Union => {
                let prec = tok.precedence();
                // Ties pop, giving left-associativity.
                while let Some(&(top, _)) = ops.last() {
                    if top != Token::LParen && top.precedence() >= prec {
                        output.push(top);
                        ops.pop();
                    } else {
                        break;
                    }
                }
                ops.push((tok, position));
            }
        }
    }

    while let Some((op, position)) = ops.pop() {
        if op == Token::LParen {
            return Err(Error::UnbalancedParentheses {
                position: Some(position),
            });
        }
        output.push(op);
    }

    let postfix = Postfix { tokens: output };
    log::debug!("postfix form of '{}' is '{}'", regex, postfix);
    Ok(postfix)
}
