use std::fmt::Display;

use anyhow::Context;
use logos::{Lexer, Logos, Skip};

use crate::err::LexError;

/// Scanned Hinton source, always terminated by an `Eof` token.
#[derive(Debug, Clone)]
pub struct TokBuffer(Box<[Tok]>);

impl TokBuffer {
    pub fn read_file(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        Self::read_string(&s)
    }

    pub fn read_string(src: &str) -> anyhow::Result<Self> {
        let mut lex = LexTok::lexer_with_extras(src, LexState::default());
        let mut buf = Vec::with_capacity(32);
        while let Some(t) = lex.next() {
            let info = lex.extras.tok_start.take().unwrap_or(LineInfo {
                line: lex.extras.line,
                col: lex.span().start.saturating_sub(lex.extras.line_start),
            });
            let t = t
                .map_err(|e| match e {
                    LexError::IllegalCharacter => LexError::InvalidSymbol(lex.slice().to_owned()),
                    e => e,
                })
                .with_context(|| format!("scanning '{}' at {info}", lex.slice()))?;
            buf.push(Tok::from_tok(t, lex.slice(), info));
        }
        buf.push(Tok::eof());
        log::debug!("scanned {} tokens", buf.len());
        Ok(Self(buf.into_boxed_slice()))
    }

    #[inline]
    pub fn slice(&self) -> &[Tok] {
        self.0.as_ref()
    }

    /// Identifier tokens in source order.
    pub fn idents(&self) -> impl Iterator<Item = &Tok> {
        self.0.iter().filter(|t| t.is_ident())
    }
}

/// Source position of a token. Lines start at 1, columns at 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub line: usize,
    pub col: usize,
}

impl Display for LineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.line;
        let col = self.col;
        write!(f, "(L:{line},C:{col})")
    }
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub tok: LexTok,
    pub lexeme: String,
    pub ty: TokType,
    pub info: LineInfo,
}

impl Tok {
    pub const EOF_STR: &'static str = "__EOF__";

    pub fn eof() -> Self {
        Self {
            tok: LexTok::Str(Self::EOF_STR.into()),
            lexeme: Self::EOF_STR.into(),
            ty: TokType::Eof,
            info: LineInfo {
                line: usize::MAX,
                col: usize::MAX,
            },
        }
    }

    /// Identifier reference that did not come out of the scanner, e.g. a
    /// name synthesized by the evaluator for a desugared construct.
    pub fn ident(name: &str, info: LineInfo) -> Self {
        Self {
            tok: LexTok::Ident,
            lexeme: name.to_owned(),
            ty: TokType::Ident,
            info,
        }
    }

    fn from_tok(tok: LexTok, lexeme: &str, info: LineInfo) -> Self {
        let ty = TokType::from(&tok);
        Self {
            tok,
            lexeme: lexeme.to_owned(),
            ty,
            info,
        }
    }

    pub const fn is_ident(&self) -> bool {
        matches!(self.ty, TokType::Ident)
    }

    pub const fn is_binding_keyword(&self) -> bool {
        matches!(self.ty, TokType::Let | TokType::Const | TokType::Func)
    }
}

impl Display for Tok {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ty = &self.ty;
        let lexeme = &self.lexeme;
        let info = self.info;
        write!(f, "Token [ {lexeme} => {ty:?}, Lineno => {info} ]")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TokType {
    // Keywords
    Let,
    Const,
    Func,
    Lambda,
    If,
    Else,
    While,
    For,
    Loop,
    Break,
    Continue,
    Return,
    In,

    // Literals
    True,
    False,
    Null,
    Int,
    Real,
    Str,
    #[default]
    Ident,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Expo,
    Eq,
    PlusEq,
    MinusEq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,

    // Delimiters
    OpenParen,
    CloseParen,
    BraceOpen,
    BraceClosed,
    BracketOpen,
    BracketClose,
    Comma,
    Dot,
    Colon,
    Semicolon,

    NewLine,
    Comment,
    Eof,
}

impl From<&LexTok> for TokType {
    fn from(value: &LexTok) -> Self {
        match value {
            LexTok::Let => TokType::Let,
            LexTok::Const => TokType::Const,
            LexTok::Func => TokType::Func,
            LexTok::Lambda => TokType::Lambda,
            LexTok::If => TokType::If,
            LexTok::Else => TokType::Else,
            LexTok::While => TokType::While,
            LexTok::For => TokType::For,
            LexTok::Loop => TokType::Loop,
            LexTok::Break => TokType::Break,
            LexTok::Continue => TokType::Continue,
            LexTok::Return => TokType::Return,
            LexTok::In => TokType::In,
            LexTok::Bool(true) => TokType::True,
            LexTok::Bool(false) => TokType::False,
            LexTok::Null => TokType::Null,
            LexTok::Int(_) => TokType::Int,
            LexTok::Real(_) => TokType::Real,
            LexTok::Str(_) => TokType::Str,
            LexTok::Ident => TokType::Ident,
            LexTok::NewLine => TokType::NewLine,
            LexTok::BlockComment => TokType::Comment,
            LexTok::Plus => TokType::Plus,
            LexTok::Minus => TokType::Minus,
            LexTok::Star => TokType::Star,
            LexTok::Slash => TokType::Slash,
            LexTok::Percent => TokType::Percent,
            LexTok::Expo => TokType::Expo,
            LexTok::Equal => TokType::Eq,
            LexTok::PlusEqual => TokType::PlusEq,
            LexTok::MinusEqual => TokType::MinusEq,
            LexTok::EqualEqual => TokType::EqEq,
            LexTok::Bang => TokType::Bang,
            LexTok::BangEqual => TokType::BangEq,
            LexTok::Lt => TokType::Lt,
            LexTok::Le => TokType::Le,
            LexTok::Gt => TokType::Gt,
            LexTok::Ge => TokType::Ge,
            LexTok::And => TokType::And,
            LexTok::Or => TokType::Or,
            LexTok::OpenParen => TokType::OpenParen,
            LexTok::CloseParen => TokType::CloseParen,
            LexTok::BraceOpen => TokType::BraceOpen,
            LexTok::BraceClosed => TokType::BraceClosed,
            LexTok::BracketOpen => TokType::BracketOpen,
            LexTok::BracketClose => TokType::BracketClose,
            LexTok::Comma => TokType::Comma,
            LexTok::Dot => TokType::Dot,
            LexTok::Colon => TokType::Colon,
            LexTok::Semicolon => TokType::Semicolon,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LexState {
    pub line: usize,
    /// Byte offset where the current line begins.
    pub line_start: usize,
    /// Start position of a token that spanned lines, recorded before the
    /// line counters moved past it.
    pub tok_start: Option<LineInfo>,
}

impl Default for LexState {
    fn default() -> Self {
        Self {
            line: 1,
            line_start: 0,
            tok_start: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(extras = LexState)]
#[logos(error = LexError)]
pub enum LexTok {
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("func")]
    Func,
    #[token("fn")]
    Lambda,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("loop")]
    Loop,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("in")]
    In,

    #[token("false", |_| false)]
    #[token("true", |_| true)]
    Bool(bool),

    #[token("null")]
    Null,

    #[regex(r"\d+", int_cb)]
    Int(i64),

    #[regex(r"\d+\.\d+", real_cb)]
    Real(f64),

    #[regex(r#""([^"\\]|\\.)*""#, string_cb)]
    Str(String),

    #[regex(r"[_a-zA-Z]\w*")]
    Ident,

    #[regex(r"\n", newline_cb)]
    NewLine,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", block_comment_cb)]
    BlockComment,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    Expo,
    #[token("=")]
    Equal,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("==")]
    EqualEqual,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("&&")]
    And,
    #[token("||")]
    Or,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClosed,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
}

fn newline_cb(lex: &mut Lexer<LexTok>) -> Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    Skip
}

/// Advances line tracking past newlines inside the current slice.
fn track_newlines(lex: &mut Lexer<LexTok>) {
    let slice = lex.slice();
    if let Some(last) = slice.rfind('\n') {
        lex.extras.tok_start = Some(LineInfo {
            line: lex.extras.line,
            col: lex.span().start.saturating_sub(lex.extras.line_start),
        });
        lex.extras.line += slice.matches('\n').count();
        lex.extras.line_start = lex.span().start + last + 1;
    }
}

fn block_comment_cb(lex: &mut Lexer<LexTok>) -> Skip {
    track_newlines(lex);
    lex.extras.tok_start = None;
    Skip
}

fn int_cb(lex: &mut Lexer<LexTok>) -> Result<i64, LexError> {
    let s = lex.slice();
    s.parse().map_err(|e| LexError::int_literal(s, &e))
}

fn real_cb(lex: &mut Lexer<LexTok>) -> Result<f64, LexError> {
    let s = lex.slice();
    s.parse().map_err(|e| LexError::real_literal(s, &e))
}

fn string_cb(lex: &mut Lexer<LexTok>) -> Result<String, LexError> {
    track_newlines(lex);
    let s = lex.slice();
    unescape(&s[1..s.len() - 1])
}

fn unescape(raw: &str) -> Result<String, LexError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let c = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some(other) => return Err(LexError::InvalidEscape(other)),
            None => return Err(LexError::InvalidEscape('\\')),
        };
        out.push(c);
    }
    Ok(out)
}
