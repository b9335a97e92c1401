use crate::{
    build_tree, flatten, group, join, simplify, to_postfix, tokenize, validate, Diagnostics, Error,
    Node, Token,
};

/// Every artifact of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis<'a> {
    /// The trimmed input, which token positions refer to
    pub source: &'a str,
    /// The lexed tokens
    pub tokens: Vec<Token<'a>>,
    /// The tokens once no simplification rule applies
    pub simplified: Vec<Token<'a>>,
    /// The simplified tokens with chained subtraction and division normalized
    pub normalized: Vec<Token<'a>>,
    /// The normalized tokens in postfix order
    pub postfix: Vec<Token<'a>>,
    /// The expression tree
    pub tree: Node<'a>,
}

impl<'a> Analysis<'a> {
    /// The simplified expression as text
    pub fn simplified_text(&self) -> String {
        join(&self.simplified, "")
    }

    /// The postfix form with lexemes separated by spaces
    pub fn postfix_text(&self) -> String {
        join(&self.postfix, " ")
    }
}

/// Lex and validate without going any further
///
/// The structural checks run on whatever tokens were lexed, even when lexing reported errors, so
/// that every problem in the input is reported in one go.
///
/// # Example
/// ```
/// use arith_analyzer::diagnose;
///
/// let (tokens, diagnostics) = diagnose("2 # (x");
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(diagnostics.lexical.len(), 1);
/// assert_eq!(diagnostics.syntax.len(), 2);
/// ```
pub fn diagnose(inp: &str) -> (Vec<Token<'_>>, Diagnostics) {
    let (tokens, lexical) = tokenize(inp);
    let syntax = validate(&tokens);
    (tokens, Diagnostics { lexical, syntax })
}

/// Run the whole pipeline on one expression
///
/// # Errors
///
/// [Error::Rejected] with every lexical and syntax error when there are any, otherwise
/// [Error::DivisionByZero] when the expression divides by the literal zero.
///
/// # Example
/// ```
/// use arith_analyzer::analyze;
///
/// let analysis = analyze("(a+b+5)*2+0*(0/5-(6+3+d))").unwrap();
/// assert_eq!(analysis.simplified_text(), "(a+b+5)*2");
/// assert_eq!(analysis.postfix_text(), "a b + 5 + 2 *");
/// assert_eq!(analysis.tree.value, "*");
/// ```
pub fn analyze(inp: &str) -> Result<Analysis<'_>, Error> {
    let source = inp.trim();
    let (tokens, diagnostics) = diagnose(source);
    if !diagnostics.is_empty() {
        log::debug!("rejected with {} errors", diagnostics.len());
        return Err(diagnostics.into());
    }
    let simplified = simplify(tokens.clone())?;
    log::debug!("simplified: {}", join(&simplified, ""));
    let normalized = flatten(&group(&simplified));
    log::debug!("normalized: {}", join(&normalized, ""));
    let postfix = to_postfix(&normalized);
    let tree = build_tree(&postfix)?;
    Ok(Analysis {
        source,
        tokens,
        simplified,
        normalized,
        postfix,
        tree,
    })
}
