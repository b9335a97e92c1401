//! Lexing, validation, simplification and tree building for arithmetic expressions
//!
//! An expression is made of numbers, variables, the binary operators `+ - * / ^`, brackets, and
//! the functions `sin`, `cos` and `tan`. [`analyze`] runs it through every stage and returns the
//! artifacts of each one, ending with a binary expression [`Node`] tree. Tokens borrow their
//! lexemes from the input, so nothing but the containers is allocated along the way.
//!
//! ## Usage
//!
//! ```
//! use arith_analyzer::analyze;
//!
//! let analysis = analyze("1*x + 0*(y-2)").unwrap();
//! assert_eq!(analysis.simplified_text(), "x");
//! assert_eq!(analysis.tree.to_string(), "x");
//! ```
//!
//! Malformed input is rejected with every problem found, not just the first:
//!
//! ```
//! use arith_analyzer::{analyze, Error};
//!
//! let Err(Error::Rejected(diagnostics)) = analyze("(2 x +") else {
//!     panic!("expected a rejection");
//! };
//! assert_eq!(diagnostics.len(), 3);
//! ```
//!
//! ## Stages
//!
//! 1. [`tokenize`] splits the input into positioned [`Token`]s. Unknown characters are reported
//!    and skipped. The [`Lexer`] underneath is an iterator and can take a custom lexeme table
//!    through [`Lexer::with_table`], see [`prefix_map`].
//! 2. [`validate`] reports every structural problem: bad first or last tokens, missing or doubled
//!    operators, and unbalanced or empty brackets.
//! 3. [`simplify`] applies zero and one identities (`0*x`, `x*1`, `x+0`, ...) and turns unary
//!    signs into binary ones until nothing changes. Dividing by the literal `0` is fatal.
//! 4. [`group`] nests brackets and function calls, regroups by precedence and normalizes chained
//!    subtraction and division, after which [`flatten`] returns a token sequence again.
//! 5. [`to_postfix`] orders the tokens with the shunting-yard algorithm, every operator being left
//!    associative, and [`build_tree`] turns the postfix sequence into a tree.
//!
//! Each stage is a plain function of the previous stage's output and can be used on its own.
//!
//! ## Logging
//!
//! Stage boundaries are logged at `debug` level and every rewrite and regrouping step at `trace`
//! level through the [log] facade. No logger is installed by this crate.
//!
//! ## Features
//!
//! - `qp-trie` (default): the built-in lexeme table is a [`QpTriePrefixMap`][prefix_map::QpTriePrefixMap].
//!   Without it a [`HashPrefixMap`][prefix_map::HashPrefixMap] is used.
//! - `fnv`: exposes [`FnvHashPrefixMap`][prefix_map::FnvHashPrefixMap].
#![warn(missing_docs)]
mod brackets;
mod error;
mod group;
mod lexer;
mod pipeline;
mod postfix;
pub mod prefix_map;
mod rewrite;
pub mod tree;
mod validate;

pub use error::{Diagnostics, DivisionByZero, Error, LexicalError, SyntaxError, TreeError};
pub use group::{flatten, group, Bounds, Group, Item};
pub use lexer::{join, tokenize, DefaultTable, Kind, Lexer, Token, LEXEMES};
pub use pipeline::{analyze, diagnose, Analysis};
pub use postfix::to_postfix;
pub use rewrite::{find_division_by_zero, simplify};
pub use tree::{build_tree, Node};
pub use validate::validate;
