use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Upper-cased ticker symbol of an index constituent.
///
/// Dots and dashes are kept so share classes (`BRK.B`, `BF-B`) and crypto
/// pairs (`BTC-USD`) survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim().to_ascii_uppercase();
        if ticker.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = ticker.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        let mut chars = ticker.chars().enumerate();
        if let Some((_, first)) = chars.next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }
        if let Some((index, ch)) =
            chars.find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_ticker_case_and_whitespace() {
        let symbol = Symbol::parse(" brk.b ").expect("symbol should parse");
        assert_eq!(symbol.as_str(), "BRK.B");
    }

    #[test]
    fn accepts_crypto_pairs() {
        assert!(Symbol::parse("BTC-USD").is_ok());
    }

    #[test]
    fn rejects_leading_digit() {
        let err = Symbol::parse("3M").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { ch: '3' }));
    }

    #[test]
    fn reports_position_of_invalid_char() {
        let err = Symbol::parse("AB$C").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolInvalidChar { ch: '$', index: 2 });
    }

    #[test]
    fn deserializes_through_validation() {
        let parsed: Result<Symbol, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }
}
