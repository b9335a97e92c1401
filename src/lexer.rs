#[cfg(not(feature = "qp-trie"))]
use crate::prefix_map::{HashPrefixMap, PrefixMap};
#[cfg(feature = "qp-trie")]
use crate::prefix_map::{PrefixMap, QpTriePrefixMap};
use crate::LexicalError;
use lazy_static::lazy_static;
use std::fmt;
use std::iter::FusedIterator;

/// The lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// One of the trigonometric functions `sin`, `cos` or `tan`
    Function,
    /// An identifier `[a-zA-Z_][a-zA-Z0-9_]*` that isn't a function name
    Variable,
    /// A decimal literal with an optional fractional part
    Number,
    /// A binary operator, or a sign in unary position
    Operator,
    /// `(`
    OpenBracket,
    /// `)`
    CloseBracket,
}

macro_rules! lexemes {
    ($($kind:ident => $($str:expr),+;)+) => {
        [
            $(
                $(
                    ($str, Kind::$kind),
                )+
            )+
        ]
    };
}

/// Every fixed lexeme the lexer recognizes
///
/// Identifiers and numbers are scanned separately; anything in this table takes priority over
/// them when it prefixes the remaining input.
pub const LEXEMES: [(&str, Kind); 10] = lexemes!(
    Function => "sin", "cos", "tan";
    Operator => "+", "-", "*", "/", "^";
    OpenBracket => "(";
    CloseBracket => ")";
);

/// The table [Lexer::new] uses
#[cfg(feature = "qp-trie")]
pub type DefaultTable = QpTriePrefixMap<Kind>;
/// The table [Lexer::new] uses
#[cfg(not(feature = "qp-trie"))]
pub type DefaultTable = HashPrefixMap<Kind>;

lazy_static! {
    static ref DEFAULT_TABLE: DefaultTable = LEXEMES.into_iter().collect();
}

/// One lexical unit of an expression
///
/// `text` borrows from the analyzed input, except for tokens synthesized by later stages (the
/// zero inserted before a unary sign, brackets and joiners added while grouping) which use static
/// text and take the position of the token they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    /// The lexical class
    pub kind: Kind,
    /// The lexeme
    pub text: &'a str,
    /// Byte offset of the lexeme in the trimmed input
    pub position: usize,
}

impl<'a> Token<'a> {
    /// Create a token
    pub fn new(kind: Kind, text: &'a str, position: usize) -> Self {
        Token {
            kind,
            text,
            position,
        }
    }

    /// A number or a variable
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, Kind::Number | Kind::Variable)
    }

    /// A number, variable or function name, i.e. anything that needs an operator in front of it
    pub fn is_operand_like(&self) -> bool {
        matches!(self.kind, Kind::Number | Kind::Variable | Kind::Function)
    }

    /// The operator with exactly this lexeme
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == Kind::Operator && self.text == op
    }

    /// An operator other than the signs `+` and `-`
    pub fn is_binary_only_operator(&self) -> bool {
        self.kind == Kind::Operator && !matches!(self.text, "+" | "-")
    }

    /// The number literal with exactly this lexeme
    pub fn is_number(&self, literal: &str) -> bool {
        self.kind == Kind::Number && self.text == literal
    }

    /// `(`
    pub fn is_open(&self) -> bool {
        self.kind == Kind::OpenBracket
    }

    /// `)`
    pub fn is_close(&self) -> bool {
        self.kind == Kind::CloseBracket
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Render a token sequence by joining its lexemes
///
/// # Example
/// ```
/// use arith_analyzer::{join, tokenize};
///
/// let (tokens, _) = tokenize("a + sin(b)");
/// assert_eq!(join(&tokens, ""), "a+sin(b)");
/// assert_eq!(join(&tokens, " "), "a + sin ( b )");
/// ```
pub fn join(tokens: &[Token<'_>], separator: &str) -> String {
    tokens
        .iter()
        .map(|token| token.text)
        .collect::<Vec<_>>()
        .join(separator)
}

fn strip_number(inp: &str) -> Option<(&str, &str)> {
    let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();
    let whole = digits(inp);
    if whole == 0 {
        return None;
    }
    let len = match inp[whole..].strip_prefix('.') {
        Some(frac) if digits(frac) > 0 => whole + 1 + digits(frac),
        _ => whole,
    };
    Some(inp.split_at(len))
}

fn strip_identifier(inp: &str) -> Option<(&str, &str)> {
    let first = inp.bytes().next()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = inp
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    Some(inp.split_at(len))
}

/// A lexer over a single line of expression text
///
/// Whitespace is skipped. At each position the longest lexeme from the table wins, then an
/// identifier, then a number. Anything else yields a [LexicalError::UnexpectedChar] for that one
/// character and lexing resumes right after it.
///
/// # Example
/// ```
/// use arith_analyzer::{Kind, Lexer, LexicalError};
///
/// let res: Vec<_> = Lexer::new("x $ 2").collect();
/// assert_eq!(res.len(), 3);
/// assert_eq!(res[0].as_ref().map(|t| t.kind), Ok(Kind::Variable));
/// assert_eq!(res[1], Err(LexicalError::UnexpectedChar { character: '$', position: 2 }));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a, 'b, T> {
    remaining: &'a str,
    len: usize,
    table: &'b T,
}

impl<'a> Lexer<'a, 'static, DefaultTable> {
    /// Create a lexer with the built-in table of [LEXEMES]
    pub fn new(inp: &'a str) -> Self {
        Self::with_table(inp, &DEFAULT_TABLE)
    }
}

impl<'a, 'b, T> Lexer<'a, 'b, T> {
    /// Create a lexer that recognizes fixed lexemes through a custom table
    ///
    /// Positions are byte offsets into `inp`.
    pub fn with_table(inp: &'a str, table: &'b T) -> Self {
        Lexer {
            remaining: inp,
            len: inp.len(),
            table,
        }
    }

    fn offset(&self) -> usize {
        self.len - self.remaining.len()
    }

    fn emit(&mut self, kind: Kind, text: &'a str, rest: &'a str) -> Token<'a> {
        let token = Token::new(kind, text, self.offset());
        self.remaining = rest;
        token
    }
}

impl<'a, 'b, T> Iterator for Lexer<'a, 'b, T>
where
    T: PrefixMap<Kind>,
{
    type Item = Result<Token<'a>, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.trim_start();
        if let Some((len, &kind)) = self.table.get_longest_prefix(self.remaining) {
            let (text, rest) = self.remaining.split_at(len);
            return Some(Ok(self.emit(kind, text, rest)));
        }
        if let Some((text, rest)) = strip_identifier(self.remaining) {
            return Some(Ok(self.emit(Kind::Variable, text, rest)));
        }
        if let Some((text, rest)) = strip_number(self.remaining) {
            return Some(Ok(self.emit(Kind::Number, text, rest)));
        }
        let character = self.remaining.chars().next()?;
        let position = self.offset();
        self.remaining = &self.remaining[character.len_utf8()..];
        Some(Err(LexicalError::UnexpectedChar {
            character,
            position,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.len()))
    }
}

impl<'a, 'b, T> FusedIterator for Lexer<'a, 'b, T> where T: PrefixMap<Kind> {}

/// Split trimmed input into tokens, collecting every lexical error along the way
///
/// Input that is empty after trimming produces no tokens and a single [LexicalError::Empty].
pub fn tokenize(inp: &str) -> (Vec<Token<'_>>, Vec<LexicalError>) {
    let inp = inp.trim();
    if inp.is_empty() {
        return (Vec::new(), vec![LexicalError::Empty]);
    }
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for res in Lexer::new(inp) {
        match res {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }
    log::debug!("lexed {} tokens, {} lexical errors", tokens.len(), errors.len());
    (tokens, errors)
}
