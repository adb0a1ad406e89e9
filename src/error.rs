//! Errors produced while compiling a regex or evaluating a word.

use thiserror::Error;

/// Represents an error encountered during regex compilation or word
/// evaluation. All errors are deterministic functions of the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The alphabet specification contained no symbols.
    #[error("alphabet is empty")]
    EmptyAlphabet,

    /// An alphabet entry was not a single usable character.
    #[error("invalid alphabet entry '{entry}'")]
    InvalidAlphabetEntry { entry: String },

    /// The regex contained a character that is neither an alphabet symbol nor
    /// an operator.
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Parentheses do not balance. The position is that of the offending
    /// parenthesis, or None if the expression ended with open groups.
    #[error("unbalanced parentheses{}", at_position(.position))]
    UnbalancedParentheses { position: Option<usize> },

    /// A regex token or a word character is not in the alphabet.
    #[error("symbol '{symbol}' is not in the alphabet")]
    SymbolNotInAlphabet { symbol: char },

    /// An operator lacks operands, or operands were left over.
    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: String },

    /// The expression produced no tokens.
    #[error("empty expression")]
    EmptyExpression,

    /// Construction exceeded the configured state budget.
    #[error("state budget of {limit} exceeded")]
    StateExplosion { limit: usize },
}

fn at_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at position {}", p),
        None => String::new(),
    }
}

pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn malformed<T, S: ToString>(reason: S) -> Result<T> {
    Err(Error::MalformedExpression {
        reason: reason.to_string(),
    })
}
