//! Errors reported by the analysis stages
//!
//! Lexical and syntax errors are collected: every problem in the input is reported at once and
//! they only stop the pipeline as a batch, through [Error::Rejected]. A division by the literal
//! zero is fatal and aborts the analysis as soon as the rewriter sees it.
use std::fmt;
use thiserror::Error;

/// A problem found while splitting the input into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    /// The input contained nothing but whitespace
    #[error("the expression is empty")]
    Empty,
    /// A character no lexeme starts with
    #[error("lexical error at position {position}: unexpected character '{character}'")]
    UnexpectedChar {
        /// The offending character
        character: char,
        /// Its byte offset in the trimmed input
        position: usize,
    },
}

/// A structural problem in an otherwise lexed expression
///
/// Every variant carries the recorded lexical position of the token the problem is reported at.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("error at position {position}: the expression cannot start with '{lexeme}'")]
    InvalidStart { lexeme: String, position: usize },
    #[error("error at position {position}: the expression cannot end with operator '{lexeme}'")]
    TrailingOperator { lexeme: String, position: usize },
    #[error("error at position {position}: the expression cannot end with an opening bracket")]
    TrailingOpenBracket { position: usize },
    #[error("error at position {position}: the expression cannot end with function '{lexeme}'")]
    TrailingFunction { lexeme: String, position: usize },
    #[error("error at position {position}: missing operator between '{left}' and '{right}'")]
    MissingOperator {
        left: String,
        right: String,
        position: usize,
    },
    #[error("error at position {position}: function '{function}' must be followed by '('")]
    MissingFunctionBracket { function: String, position: usize },
    #[error("error at position {position}: consecutive operators '{first}{second}'")]
    ConsecutiveOperators {
        first: String,
        second: String,
        position: usize,
    },
    #[error("error at position {position}: operator '{operator}' cannot follow an opening bracket")]
    OperatorAfterOpenBracket { operator: String, position: usize },
    #[error("error at position {position}: missing operator between '{operand}' and '('")]
    MissingOperatorBeforeBracket { operand: String, position: usize },
    #[error("error at position {position}: operator '{operator}' cannot precede a closing bracket")]
    OperatorBeforeCloseBracket { operator: String, position: usize },
    #[error("error at position {position}: missing operator between ')' and '{lexeme}'")]
    MissingOperatorAfterBracket { lexeme: String, position: usize },
    #[error("error at position {position}: brackets contain no expression")]
    EmptyBrackets { position: usize },
    #[error("error at position {position}: missing operator between ')' and '('")]
    MissingOperatorBetweenBrackets { position: usize },
    #[error("error at position {position}: extra closing bracket")]
    UnexpectedCloseBracket { position: usize },
    #[error("error at position {position}: no matching closing bracket")]
    UnclosedBracket { position: usize },
}

impl SyntaxError {
    /// The position the error is reported at
    pub fn position(&self) -> usize {
        match *self {
            SyntaxError::InvalidStart { position, .. }
            | SyntaxError::TrailingOperator { position, .. }
            | SyntaxError::TrailingOpenBracket { position }
            | SyntaxError::TrailingFunction { position, .. }
            | SyntaxError::MissingOperator { position, .. }
            | SyntaxError::MissingFunctionBracket { position, .. }
            | SyntaxError::ConsecutiveOperators { position, .. }
            | SyntaxError::OperatorAfterOpenBracket { position, .. }
            | SyntaxError::MissingOperatorBeforeBracket { position, .. }
            | SyntaxError::OperatorBeforeCloseBracket { position, .. }
            | SyntaxError::MissingOperatorAfterBracket { position, .. }
            | SyntaxError::EmptyBrackets { position }
            | SyntaxError::MissingOperatorBetweenBrackets { position }
            | SyntaxError::UnexpectedCloseBracket { position }
            | SyntaxError::UnclosedBracket { position } => position,
        }
    }
}

/// The only fatal simplification error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("division by zero at position {position}")]
pub struct DivisionByZero {
    /// Position of the `/` whose right operand is the literal `0`
    pub position: usize,
}

/// A postfix sequence that doesn't describe exactly one tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// There was nothing to build
    #[error("cannot build a tree from an empty postfix sequence")]
    Empty,
    /// An operator or function found too few operands on the stack
    #[error("'{lexeme}' at position {position} is missing an operand")]
    MissingOperand {
        /// The operator or function
        lexeme: String,
        /// Its position
        position: usize,
    },
    /// Postfix sequences never contain brackets
    #[error("unexpected bracket '{lexeme}' at position {position} in postfix sequence")]
    UnexpectedBracket {
        /// The bracket
        lexeme: String,
        /// Its position
        position: usize,
    },
    /// More than one tree was left once the sequence was consumed
    #[error("{0} operands were left without an operator")]
    Leftover(usize),
}

/// Every lexical and syntax error found in one expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Lexical errors in input order
    pub lexical: Vec<LexicalError>,
    /// Syntax errors in the order the checks report them
    pub syntax: Vec<SyntaxError>,
}

impl Diagnostics {
    /// True when the expression may proceed to simplification
    pub fn is_empty(&self) -> bool {
        self.lexical.is_empty() && self.syntax.is_empty()
    }

    /// Total number of problems
    pub fn len(&self) -> usize {
        self.lexical.len() + self.syntax.len()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let messages = self
            .lexical
            .iter()
            .map(ToString::to_string)
            .chain(self.syntax.iter().map(ToString::to_string));
        for message in messages {
            if !first {
                writeln!(f)?;
            }
            write!(f, "- {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

/// Why an expression could not be turned into a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input has lexical or syntax errors, all of which are listed
    #[error("the expression has {} error(s):\n{0}", .0.len())]
    Rejected(Diagnostics),
    /// The expression divides by the literal zero
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZero),
    /// The simplified expression did not form a single tree
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl From<Diagnostics> for Error {
    fn from(diagnostics: Diagnostics) -> Self {
        Error::Rejected(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, DivisionByZero, Error, LexicalError, SyntaxError};
    use pretty_assertions::assert_eq;

    #[test]
    fn diagnostics_list_every_problem() {
        let diagnostics = Diagnostics {
            lexical: vec![LexicalError::UnexpectedChar {
                character: '#',
                position: 1,
            }],
            syntax: vec![
                SyntaxError::ConsecutiveOperators {
                    first: "+".into(),
                    second: "*".into(),
                    position: 3,
                },
                SyntaxError::UnclosedBracket { position: 0 },
            ],
        };
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(
            Error::from(diagnostics).to_string(),
            "the expression has 3 error(s):\n\
             - lexical error at position 1: unexpected character '#'\n\
             - error at position 3: consecutive operators '+*'\n\
             - error at position 0: no matching closing bracket"
        );
    }

    #[test]
    fn fatal_error_display() {
        let err: Error = DivisionByZero { position: 4 }.into();
        assert_eq!(err.to_string(), "division by zero at position 4");
    }

    #[test]
    fn syntax_error_positions() {
        let err = SyntaxError::MissingOperator {
            left: "2".into(),
            right: "x".into(),
            position: 2,
        };
        assert_eq!(err.position(), 2);
        assert_eq!(
            SyntaxError::EmptyBrackets { position: 7 }.position(),
            7
        );
    }
}
