//! logos-based CSS lexer.
//!
//! Tokens carry their decoded payload: numbers are parsed, quotes and sigils
//! stripped. Comments and whitespace are skipped, but every [`Lexeme`] keeps
//! its byte span so the parser can tell `view.item` from `view .item`.
//!
//! Longest match wins, so `#ff00aa` is one [`Token::HexColor`], `10px` one
//! [`Token::Dimension`] and `::before` one [`Token::PseudoElement`].

use std::fmt;
use std::ops::Range;

use logos::{Lexer, Logos, Skip};

/// A number with its unit suffix: `10px`, `50%`, `1.5rem`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f32,
    pub unit: String,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `/* ... */`. Skipped by its callback, never produced.
    #[token("/*", block_comment)]
    Comment,

    #[token("!important")]
    Important,

    /// Hex digits without the `#`.
    #[regex(r"#[0-9a-fA-F]{3,8}", |lex| lex.slice()[1..].to_owned())]
    HexColor(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?(px|%|deg|rem|em|s|ms)", quantity)]
    Dimension(Quantity),

    /// Name without the `::`.
    #[regex(r"::[a-zA-Z][a-zA-Z0-9_-]*", |lex| lex.slice()[2..].to_owned())]
    PseudoElement(String),

    /// Name without the `:`.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*", |lex| lex.slice()[1..].to_owned())]
    PseudoClass(String),

    /// Single- or double-quoted, quotes stripped.
    #[regex(r#""[^"]*"|'[^']*'"#, unquote)]
    Str(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f32>().ok())]
    Number(f32),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_owned())]
    Ident(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token("*")]
    Star,
    #[token(">")]
    Gt,
}

fn quantity(lex: &mut Lexer<Token>) -> Option<Quantity> {
    let slice = lex.slice();
    let split = slice
        .char_indices()
        .skip(1)
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)?;
    Some(Quantity {
        value: slice[..split].parse().ok()?,
        unit: slice[split..].to_owned(),
    })
}

/// Bump past the closing `*/`; an unterminated comment is a lex error.
fn block_comment(lex: &mut Lexer<Token>) -> Result<Skip, ()> {
    let end = lex.remainder().find("*/").ok_or(())?;
    lex.bump(end + 2);
    Ok(Skip)
}

fn unquote(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_owned()
}

impl Token {
    /// Whether this token can open a compound selector.
    pub fn starts_selector(&self) -> bool {
        matches!(
            self,
            Self::Ident(_)
                | Self::Hash
                | Self::HexColor(_)
                | Self::Dot
                | Self::Star
                | Self::PseudoClass(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => f.write_str("/* */"),
            Self::Important => f.write_str("!important"),
            Self::HexColor(hex) => write!(f, "#{hex}"),
            Self::Dimension(q) => write!(f, "{}{}", q.value, q.unit),
            Self::PseudoElement(name) => write!(f, "::{name}"),
            Self::PseudoClass(name) => write!(f, ":{name}"),
            Self::Str(text) => write!(f, "{text:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Ident(name) => f.write_str(name),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Colon => f.write_str(":"),
            Self::Semicolon => f.write_str(";"),
            Self::Comma => f.write_str(","),
            Self::Dot => f.write_str("."),
            Self::Hash => f.write_str("#"),
            Self::Star => f.write_str("*"),
            Self::Gt => f.write_str(">"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

/// A token and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Range<usize>,
}

/// Input the lexer could not recognize.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unrecognized input at byte {offset}: {snippet:?}")]
pub struct LexError {
    pub offset: usize,
    pub snippet: String,
}

/// Lex `input` completely. Stops at the first unrecognized character, or at
/// an unterminated comment or string.
pub fn lex(input: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Token::lexer(input);
    let mut out = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => out.push(Lexeme { token, span }),
            Err(()) => {
                return Err(LexError {
                    offset: span.start,
                    snippet: input[span.start..].chars().take(12).collect(),
                })
            }
        }
    }
    Ok(out)
}
