use std::num::{IntErrorKind, ParseFloatError, ParseIntError};

#[derive(thiserror::Error, Default, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Invalid or Unknown Symbol: {0}")]
    InvalidSymbol(String),
    #[default]
    #[error("Illegal Character encountered")]
    IllegalCharacter,
    #[error("Invalid number literal '{literal}': {reason}")]
    InvalidNumber { literal: String, reason: String },
    #[error("Unknown escape sequence '\\{0}' in string literal")]
    InvalidEscape(char),
}

impl LexError {
    pub fn int_literal(literal: &str, err: &ParseIntError) -> Self {
        let reason = match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                "does not fit in 64 bits".to_owned()
            }
            _ => err.to_string(),
        };
        Self::InvalidNumber {
            literal: literal.to_owned(),
            reason,
        }
    }

    pub fn real_literal(literal: &str, err: &ParseFloatError) -> Self {
        Self::InvalidNumber {
            literal: literal.to_owned(),
            reason: err.to_string(),
        }
    }
}
