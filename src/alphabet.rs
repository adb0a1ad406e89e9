//! Alphabets, and validation of regex text against an alphabet.

use crate::error::{Error, Result};
use core::{fmt, str::FromStr};

/// Characters with meaning in a regex. These are never alphabet symbols.
pub const OPERATORS: [char; 5] = ['*', '|', '.', '(', ')'];

/// Characters used to delimit an alphabet specification.
const DELIMITERS: [char; 3] = ['{', '}', ','];

#[inline]
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// A finite set of single-character symbols.
/// Symbols are kept sorted and deduplicated, so iteration is always in
/// canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Box<[char]>,
}

/// Named alphabets for convenience.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Preset {
    /// {0, 1}
    Binary,
    /// {a, b, c}
    Abc,
    /// {0-9, a-f}
    Hex,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(Preset::Binary),
            "abc" => Ok(Preset::Abc),
            "hex" => Ok(Preset::Hex),
            other => Err(format!(
                "unknown alphabet preset '{}' (expected binary, abc or hex)",
                other
            )),
        }
    }
}

impl Alphabet {
    /// Parse an alphabet specification such as `{a,b,c}` or `a, b, c`.
    /// Braces are optional and whitespace is ignored. Duplicates collapse.
    pub fn parse(spec: &str) -> Result<Self> {
        let body = spec.trim();
        let body = body.strip_prefix('{').unwrap_or(body);
        let body = body.trim_end();
        let body = body.strip_suffix('}').unwrap_or(body);

        let mut symbols = Vec::new();
        for entry in body.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => symbols.push(c),
                _ => {
                    return Err(Error::InvalidAlphabetEntry {
                        entry: entry.to_string(),
                    })
                }
            }
        }
        Self::from_symbols(symbols)
    }

    /// Construct an alphabet from individual symbols.
    pub fn from_symbols<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let mut symbols: Vec<char> = symbols.into_iter().collect();
        if let Some(&bad) = symbols
            .iter()
            .find(|&&c| is_operator(c) || DELIMITERS.contains(&c) || c.is_whitespace())
        {
            return Err(Error::InvalidAlphabetEntry {
                entry: bad.to_string(),
            });
        }
        symbols.sort_unstable();
        symbols.dedup();
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        log::debug!("alphabet has {} symbols", symbols.len());
        Ok(Alphabet {
            symbols: symbols.into_boxed_slice(),
        })
    }

    pub fn preset(preset: Preset) -> Self {
        let symbols: Box<[char]> = match preset {
            Preset::Binary => "01".chars().collect(),
            Preset::Abc => "abc".chars().collect(),
            Preset::Hex => "0123456789abcdef".chars().collect(),
        };
        Alphabet { symbols }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.symbols.binary_search(&c).is_ok()
    }

    /// \return the position of a symbol in canonical order.
    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.symbols.binary_search(&c).ok()
    }

    /// Iterate symbols in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// \return whether this alphabet has no symbols. Parsed alphabets always have some.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check that a regex uses only symbols of this alphabet and operators,
    /// and that its parentheses balance.
    pub fn validate(&self, regex: &str) -> Result<()> {
        for (position, c) in regex.chars().enumerate() {
            if !self.contains(c) && !is_operator(c) {
                return Err(Error::InvalidSymbol {
                    symbol: c,
                    position,
                });
            }
        }
        check_parentheses(regex)
    }
}

impl FromStr for Alphabet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("}")
    }
}

/// Check parenthesis balance with a running depth counter, which must never
/// go negative and must end at zero.
pub fn check_parentheses(regex: &str) -> Result<()> {
    let mut depth: usize = 0;
    for (position, c) in regex.chars().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(Error::UnbalancedParentheses {
                        position: Some(position),
                    })?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(Error::UnbalancedParentheses { position: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let expected: &[char] = &['a', 'b', 'c'];
        assert_eq!(Alphabet::parse("{a,b,c}").unwrap().symbols(), expected);
        assert_eq!(Alphabet::parse("a,b,c").unwrap().symbols(), expected);
        assert_eq!(Alphabet::parse(" { c , a ,b } ").unwrap().symbols(), expected);
        assert_eq!(Alphabet::parse("b,a,c,a").unwrap().symbols(), expected);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Alphabet::parse(""), Err(Error::EmptyAlphabet));
        assert_eq!(Alphabet::parse("{}"), Err(Error::EmptyAlphabet));
        assert_eq!(Alphabet::parse(" , ,"), Err(Error::EmptyAlphabet));
        assert_eq!(
            Alphabet::parse("a,bc"),
            Err(Error::InvalidAlphabetEntry {
                entry: "bc".to_string()
            })
        );
        assert_eq!(
            Alphabet::parse("a,*"),
            Err(Error::InvalidAlphabetEntry {
                entry: "*".to_string()
            })
        );
    }

    #[test]
    fn test_presets() {
        assert_eq!(Alphabet::preset(Preset::Binary).to_string(), "{0, 1}");
        assert_eq!(Alphabet::preset(Preset::Hex).len(), 16);
        assert_eq!("ABC".parse::<Preset>(), Ok(Preset::Abc));
        assert!("sigma".parse::<Preset>().is_err());
    }

    #[test]
    fn test_index_of() {
        let ab = Alphabet::parse("c,a").unwrap();
        assert_eq!(ab.index_of('a'), Some(0));
        assert_eq!(ab.index_of('c'), Some(1));
        assert_eq!(ab.index_of('b'), None);
        assert_eq!(ab.len(), 2);
        assert!(!ab.is_empty());
    }

    #[test]
    fn test_validate() {
        let ab = Alphabet::parse("{a,b}").unwrap();
        assert_eq!(ab.validate("(a|b)*.a"), Ok(()));
        assert_eq!(
            ab.validate("a.c"),
            Err(Error::InvalidSymbol {
                symbol: 'c',
                position: 2
            })
        );
        assert_eq!(
            ab.validate("(a|b"),
            Err(Error::UnbalancedParentheses { position: None })
        );
        assert_eq!(
            ab.validate("a)(b"),
            Err(Error::UnbalancedParentheses { position: Some(1) })
        );
    }
}
