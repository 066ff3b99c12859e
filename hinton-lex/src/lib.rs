pub mod err;
pub mod lex;

pub use err::LexError;
pub use lex::{LineInfo, Tok, TokBuffer, TokType};
