//! Token-level algebraic simplification
//!
//! The rules are applied to a validated flat sequence one firing at a time. After each firing the
//! scan restarts from the first token, and simplification ends once a full scan fires nothing.
//! Every rule except the unary-sign rule shortens the sequence. The unary-sign rule inserts one
//! zero in front of a leading sign, after which that sign is no longer in leading position, so the
//! loop is bounded by the token count plus the number of signs.
//!
//! A zero factor collapses the whole term it belongs to: every factor, divisor and `^` chain up to
//! the nearest `+`, `-` or bracket at the same depth. `y/x^2*0` therefore becomes `0` as a whole.
//! Powers of the literals are folded first. `x^0` and `1^x` become `1`, `x^1` becomes `x`, and
//! `0^n` becomes `0` for a positive literal `n`. A zero raised to any other exponent is kept,
//! since its value depends on the sign of that exponent.
use crate::brackets::{matching_close, matching_open};
use crate::{DivisionByZero, Kind, Token};
use std::fmt;
use std::ops::Range;

/// The simplification rules, in the order they are tried at each position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// `-x` → `0-x` at the start of the sequence or after `(`, likewise for `+`
    UnarySign,
    /// `x^0`, `(..)^y^0` → `1`
    ZeroExponent,
    /// `0^n` → `0` for a positive literal `n`
    ZeroPower,
    /// `a*x^2*0`, `y/x*0`, `0*f(..)` → `0`
    MultiplyByZero,
    /// `0/x`, `0/(..)*y` → `0`
    ZeroDividend,
    /// `x^1` → `x`
    IdentityExponent,
    /// `1^x`, `1^(..)` → `1`
    OnePower,
    /// `x*1`, `x/1`, `1*x` → `x`
    IdentityFactor,
    /// `x+0`, `x-0`, `0+x` → `x`
    IdentityTerm,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rule::UnarySign => "unary sign",
            Rule::ZeroExponent => "zero exponent",
            Rule::ZeroPower => "power of zero",
            Rule::MultiplyByZero => "multiply by zero",
            Rule::ZeroDividend => "zero dividend",
            Rule::IdentityExponent => "exponent one",
            Rule::OnePower => "power of one",
            Rule::IdentityFactor => "multiply or divide by one",
            Rule::IdentityTerm => "add or subtract zero",
        })
    }
}

/// Replace `range` with `insert`
#[derive(Debug)]
struct Edit<'a> {
    rule: Rule,
    range: Range<usize>,
    insert: Option<Token<'a>>,
}

impl<'a> Edit<'a> {
    fn new(rule: Rule, range: Range<usize>, insert: Option<Token<'a>>) -> Self {
        Edit {
            rule,
            range,
            insert,
        }
    }

    fn apply(self, tokens: &mut Vec<Token<'a>>) {
        tokens.splice(self.range, self.insert);
    }
}

fn at<'t, 'a>(tokens: &'t [Token<'a>], ind: Option<usize>) -> Option<&'t Token<'a>> {
    ind.and_then(|ind| tokens.get(ind))
}

/// Whether the token exists and is one of the given operators
fn is_any(token: Option<&Token<'_>>, ops: &[&str]) -> bool {
    token.is_some_and(|token| token.kind == Kind::Operator && ops.contains(&token.text))
}

/// A number literal with a nonzero digit
fn is_positive_literal(token: Option<&Token<'_>>) -> bool {
    token.is_some_and(|token| {
        token.kind == Kind::Number && token.text.bytes().any(|b| b.is_ascii_digit() && b != b'0')
    })
}

/// Last index of the atom starting at `start`: an operand, a bracketed region or a call
fn atom_end(tokens: &[Token<'_>], start: usize) -> Option<usize> {
    let token = tokens.get(start)?;
    if token.is_operand() {
        Some(start)
    } else if token.is_open() || token.kind == Kind::Function {
        matching_close(tokens, start)
    } else {
        None
    }
}

/// First index of the atom ending at `end`
fn atom_start(tokens: &[Token<'_>], end: usize) -> Option<usize> {
    let token = tokens.get(end)?;
    if token.is_operand() {
        Some(end)
    } else if token.is_close() {
        let open = matching_open(tokens, end)?;
        match at(tokens, open.checked_sub(1)) {
            Some(func) if func.kind == Kind::Function => Some(open - 1),
            _ => Some(open),
        }
    } else {
        None
    }
}

/// Start of the `^` chain whose last atom starts at `start`
fn power_start(tokens: &[Token<'_>], mut start: usize) -> Option<usize> {
    while is_any(at(tokens, start.checked_sub(1)), &["^"]) {
        start = atom_start(tokens, start.checked_sub(2)?)?;
    }
    Some(start)
}

fn power_end(tokens: &[Token<'_>], mut end: usize) -> Option<usize> {
    while is_any(tokens.get(end + 1), &["^"]) {
        end = atom_end(tokens, end + 2)?;
    }
    Some(end)
}

/// The `*` and `/` term around the single-token atom at `ind`
fn term(tokens: &[Token<'_>], ind: usize) -> Option<Range<usize>> {
    let mut start = power_start(tokens, ind)?;
    while is_any(at(tokens, start.checked_sub(1)), &["*", "/"]) {
        start = power_start(tokens, atom_start(tokens, start.checked_sub(2)?)?)?;
    }
    let mut end = power_end(tokens, ind)?;
    while is_any(tokens.get(end + 1), &["*", "/"]) {
        end = power_end(tokens, atom_end(tokens, end + 2)?)?;
    }
    Some(start..end + 1)
}

/// The first `/` whose right operand is the literal zero
pub fn find_division_by_zero(tokens: &[Token<'_>]) -> Option<DivisionByZero> {
    tokens
        .windows(2)
        .find(|pair| pair[0].is_operator("/") && pair[1].is_number("0"))
        .map(|pair| DivisionByZero {
            position: pair[0].position,
        })
}

fn unary_sign<'a>(tokens: &[Token<'a>], ind: usize) -> Option<Edit<'a>> {
    let cur = tokens[ind];
    let prev = at(tokens, ind.checked_sub(1));
    if (cur.is_operator("-") || cur.is_operator("+")) && prev.map_or(true, Token::is_open) {
        let zero = Token::new(Kind::Number, "0", cur.position);
        Some(Edit::new(Rule::UnarySign, ind..ind, Some(zero)))
    } else {
        None
    }
}

fn zero_rules<'a>(tokens: &[Token<'a>], ind: usize) -> Option<Edit<'a>> {
    let zero = tokens[ind];
    let prev = at(tokens, ind.checked_sub(1));
    let next = tokens.get(ind + 1);

    if is_any(prev, &["^"]) {
        let start = power_start(tokens, ind)?;
        let one = Token::new(Kind::Number, "1", zero.position);
        return Some(Edit::new(Rule::ZeroExponent, start..ind + 1, Some(one)));
    }
    if is_any(next, &["^"]) {
        return is_positive_literal(tokens.get(ind + 2))
            .then(|| Edit::new(Rule::ZeroPower, ind..ind + 3, Some(zero)));
    }
    if is_any(prev, &["*"]) || is_any(next, &["*", "/"]) {
        let rule = if is_any(prev, &["*"]) || is_any(next, &["*"]) {
            Rule::MultiplyByZero
        } else {
            Rule::ZeroDividend
        };
        return Some(Edit::new(rule, term(tokens, ind)?, Some(zero)));
    }
    // x + 0 and x - 0
    if is_any(prev, &["+", "-"]) {
        return Some(Edit::new(Rule::IdentityTerm, ind - 1..ind + 1, None));
    }
    // 0 + x
    if is_any(next, &["+"]) {
        return Some(Edit::new(Rule::IdentityTerm, ind..ind + 2, None));
    }
    None
}

fn one_rules<'a>(tokens: &[Token<'a>], ind: usize) -> Option<Edit<'a>> {
    let one = tokens[ind];
    let prev = at(tokens, ind.checked_sub(1));
    let next = tokens.get(ind + 1);
    if is_any(prev, &["^"]) {
        return Some(Edit::new(Rule::IdentityExponent, ind - 1..ind + 1, None));
    }
    if is_any(next, &["^"]) {
        let end = atom_end(tokens, ind + 2)?;
        return Some(Edit::new(Rule::OnePower, ind..end + 1, Some(one)));
    }
    // x * 1 and x / 1
    if is_any(prev, &["*", "/"]) {
        return Some(Edit::new(Rule::IdentityFactor, ind - 1..ind + 1, None));
    }
    // 1 * x
    if is_any(next, &["*"]) {
        return Some(Edit::new(Rule::IdentityFactor, ind..ind + 2, None));
    }
    None
}

fn edit_at<'a>(tokens: &[Token<'a>], ind: usize) -> Option<Edit<'a>> {
    let cur = tokens[ind];
    match cur.kind {
        Kind::Operator => unary_sign(tokens, ind),
        Kind::Number if cur.text == "0" => zero_rules(tokens, ind),
        Kind::Number if cur.text == "1" => one_rules(tokens, ind),
        _ => None,
    }
}

/// Simplify a validated token sequence until no rule applies
///
/// Fails as soon as a `/` is directly followed by the literal `0`, whether that was in the input
/// or produced by an earlier firing.
///
/// # Example
/// ```
/// use arith_analyzer::{join, simplify, tokenize};
///
/// let (tokens, _) = tokenize("(a+b+5)*2+0*(0/5-(6+3+d))");
/// assert_eq!(join(&simplify(tokens).unwrap(), ""), "(a+b+5)*2");
///
/// let (tokens, _) = tokenize("x/(y*0)+3/0");
/// assert_eq!(simplify(tokens).unwrap_err().position, 9);
/// ```
pub fn simplify(mut tokens: Vec<Token<'_>>) -> Result<Vec<Token<'_>>, DivisionByZero> {
    loop {
        if let Some(err) = find_division_by_zero(&tokens) {
            log::debug!("{err}");
            return Err(err);
        }
        match (0..tokens.len()).find_map(|ind| edit_at(&tokens, ind)) {
            Some(edit) => {
                log::trace!("{} at {:?}", edit.rule, edit.range);
                edit.apply(&mut tokens);
            }
            None => {
                log::debug!("simplified to {} tokens", tokens.len());
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{find_division_by_zero, simplify};
    use crate::{join, tokenize, DivisionByZero, Kind, Token};
    use pretty_assertions::assert_eq;

    fn simplified(inp: &str) -> String {
        let (tokens, errors) = tokenize(inp);
        assert!(errors.is_empty());
        join(&simplify(tokens).expect("no division by zero"), "")
    }

    #[test]
    fn unary_minus_gets_a_zero() {
        let (tokens, _) = tokenize("-x*(-y)");
        let res = simplify(tokens).unwrap();
        assert_eq!(join(&res, ""), "0-x*(0-y)");
        assert_eq!(res[0], Token::new(Kind::Number, "0", 0));
        assert_eq!(res[5], Token::new(Kind::Number, "0", 4));
    }

    #[test]
    fn unary_plus_disappears() {
        assert_eq!(simplified("+x"), "x");
        assert_eq!(simplified("a*(+b)"), "a*(b)");
    }

    #[test]
    fn multiply_by_zero() {
        assert_eq!(simplified("a+0*b"), "a");
        assert_eq!(simplified("a+b*0"), "a");
        assert_eq!(simplified("0*(5+3)"), "0");
        assert_eq!(simplified("2+sin(x)*0"), "2");
        assert_eq!(simplified("0*cos(x+1)-y"), "0-y");
        assert_eq!(simplified("(a+b)*0*c"), "0");
    }

    #[test]
    fn zero_dividend() {
        assert_eq!(simplified("0/x+y"), "y");
        assert_eq!(simplified("z-0/(x+y)"), "z");
        assert_eq!(simplified("0/tan(x)"), "0");
    }

    #[test]
    fn multiply_and_divide_by_one() {
        assert_eq!(simplified("1*x"), "x");
        assert_eq!(simplified("x*1"), "x");
        assert_eq!(simplified("x/1"), "x");
        assert_eq!(simplified("x/1*y"), "x*y");
        assert_eq!(simplified("1*1"), "1");
    }

    #[test]
    fn add_and_subtract_zero() {
        assert_eq!(simplified("x+0"), "x");
        assert_eq!(simplified("x-0"), "x");
        assert_eq!(simplified("0+x"), "x");
        assert_eq!(simplified("(0+x)-(y-0)"), "(x)-(y)");
        assert_eq!(simplified("-0"), "0");
    }

    #[test]
    fn zero_factor_collapses_whole_term() {
        assert_eq!(simplified("x^2*0"), "0");
        assert_eq!(simplified("0*x^2"), "0");
        assert_eq!(simplified("y/x*0"), "0");
        assert_eq!(simplified("y/(x)*0"), "0");
        assert_eq!(simplified("2^(x)*0"), "0");
        assert_eq!(simplified("a-b/c^d*0*e+f"), "a+f");
        assert_eq!(simplified("(a+b)*sin(x)^2/y*0+1"), "1");
        assert_eq!(simplified("x-0^2"), "x");
    }

    #[test]
    fn powers_of_zero_and_one() {
        assert_eq!(simplified("x^0"), "1");
        assert_eq!(simplified("(a+b)^0*y"), "y");
        assert_eq!(simplified("x^y^0+z"), "1+z");
        assert_eq!(simplified("x^1*y"), "x*y");
        assert_eq!(simplified("x^1^y"), "x^y");
        assert_eq!(simplified("x*1^2"), "x");
        assert_eq!(simplified("1^sin(x)+y"), "1+y");
        assert_eq!(simplified("0^3.5+y"), "y");
        assert_eq!(simplified("0^0"), "1");
    }

    #[test]
    fn zero_to_an_unknown_power_is_kept() {
        assert_eq!(simplified("x*0^y"), "x*0^y");
        assert_eq!(simplified("0^(a-b)+c"), "0^(a-b)+c");
        assert_eq!(simplified("0^0.0"), "0^0.0");
    }

    #[test]
    fn function_argument_untouched() {
        assert_eq!(simplified("sin(0)"), "sin(0)");
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let (tokens, _) = tokenize("a+b/0");
        assert_eq!(simplify(tokens), Err(DivisionByZero { position: 3 }));
        let (tokens, _) = tokenize("0/0");
        assert_eq!(simplify(tokens), Err(DivisionByZero { position: 1 }));
    }

    #[test]
    fn division_by_zero_produced_by_rewriting() {
        let (tokens, _) = tokenize("x/0*y");
        assert_eq!(find_division_by_zero(&tokens), Some(DivisionByZero { position: 1 }));
        let (tokens, _) = tokenize("x/(0)");
        assert_eq!(find_division_by_zero(&tokens), None);
        assert_eq!(simplified("x/(0)"), "x/(0)");
    }

    #[test]
    fn reaches_fixed_point() {
        let (tokens, _) = tokenize("1*(0+a*1)-0*b+c/1");
        let once = simplify(tokens).unwrap();
        assert_eq!(join(&once, ""), "(a)+c");
        assert_eq!(simplify(once.clone()).unwrap(), once);
    }
}
