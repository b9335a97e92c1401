//! Bracket grouping and precedence regrouping
//!
//! [group] nests every bracketed region and every function call into a [Group], innermost first,
//! and regroups each level by operator precedence. [flatten] turns the nesting back into a token
//! sequence. Groups made by precedence regrouping have no delimiters, so the round trip returns
//! the input unchanged except for chained subtraction and division: `a-b-c` comes back as
//! `a-(b+c)` and `a/b/c` as `a/(b*c)`.
use crate::brackets::matching_close;
use crate::{Kind, Token};
use std::mem;

/// What surrounds a group when it is flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds<'a> {
    /// Made by precedence regrouping, nothing is emitted around it
    Implicit,
    /// A bracket pair, either written in the input or synthesized by normalization
    Brackets {
        /// `(`
        open: Token<'a>,
        /// `)`
        close: Token<'a>,
    },
    /// A function name applied to a bracketed argument
    Call {
        /// The function name
        function: Token<'a>,
        /// `(`
        open: Token<'a>,
        /// `)`
        close: Token<'a>,
    },
}

/// A nested, fully regrouped region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// The delimiters
    pub bounds: Bounds<'a>,
    /// The regrouped contents
    pub items: Vec<Item<'a>>,
}

impl<'a> Group<'a> {
    fn implicit(items: Vec<Item<'a>>) -> Self {
        Group {
            bounds: Bounds::Implicit,
            items,
        }
    }

    fn synthetic(position: usize, items: Vec<Item<'a>>) -> Self {
        Group {
            bounds: Bounds::Brackets {
                open: Token::new(Kind::OpenBracket, "(", position),
                close: Token::new(Kind::CloseBracket, ")", position),
            },
            items,
        }
    }
}

/// A single token or a nested group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'a> {
    /// A token that wasn't absorbed into a group
    Token(Token<'a>),
    /// A nested group
    Group(Group<'a>),
}

impl<'a> Item<'a> {
    /// The token, if this isn't a group
    pub fn token(&self) -> Option<&Token<'a>> {
        match self {
            Item::Token(token) => Some(token),
            Item::Group(_) => None,
        }
    }

    /// Something a binary operator can take as an argument
    pub fn is_operand_or_group(&self) -> bool {
        match self {
            Item::Token(token) => token.is_operand(),
            Item::Group(_) => true,
        }
    }

    fn is_operator(&self, op: &str) -> bool {
        self.token().is_some_and(|token| token.is_operator(op))
    }
}

impl Drop for Group<'_> {
    fn drop(&mut self) {
        // long `^` chains nest one level per operator
        let mut stack = mem::take(&mut self.items);
        while let Some(item) = stack.pop() {
            if let Item::Group(mut group) = item {
                stack.append(&mut group.items);
            }
        }
    }
}

/// An item tagged with whether the current pass created it
struct Tagged<'a> {
    item: Item<'a>,
    fresh: bool,
}

/// One left to right pass over a single precedence tier
fn tier_pass<'a>(items: Vec<Item<'a>>, ops: &[&str]) -> (Vec<Item<'a>>, bool) {
    let mut out: Vec<Tagged<'a>> = Vec::with_capacity(items.len());
    let mut grouped = false;
    let mut iter = items.into_iter().peekable();
    while let Some(item) = iter.next() {
        let Some(op) = item
            .token()
            .filter(|token| token.kind == Kind::Operator && ops.contains(&token.text))
            .map(|token| token.text)
        else {
            out.push(Tagged { item, fresh: false });
            continue;
        };
        // `+` and `*` leave a group made in this pass alone and pair up what follows instead
        let commutative = matches!(op, "+" | "*");
        let left_ready = out.last().is_some_and(|left| {
            left.item.is_operand_or_group() && !(commutative && left.fresh)
        });
        if left_ready {
            if let Some(right) = iter.next_if(Item::is_operand_or_group) {
                let left = out.pop().map(|tagged| tagged.item);
                let triple = left.into_iter().chain([item, right]).collect();
                out.push(Tagged {
                    item: Item::Group(Group::implicit(triple)),
                    fresh: true,
                });
                grouped = true;
                continue;
            }
        }
        out.push(Tagged { item, fresh: false });
    }
    (out.into_iter().map(|tagged| tagged.item).collect(), grouped)
}

fn group_tier<'a>(mut items: Vec<Item<'a>>, ops: &[&str]) -> Vec<Item<'a>> {
    let mut passes = 0;
    loop {
        let (next, grouped) = tier_pass(items, ops);
        items = next;
        passes += 1;
        if !grouped {
            log::trace!("tier {ops:?} settled after {passes} passes");
            return items;
        }
    }
}

fn group_tiers(items: Vec<Item<'_>>) -> Vec<Item<'_>> {
    let items = group_tier(items, &["^"]);
    let items = group_tier(items, &["*", "/"]);
    group_tier(items, &["+", "-"])
}

/// Rewrite every chain `X op Y op Z ...` with two or more chained operands as
/// `X op (Y joiner Z ...)`
fn normalize<'a>(items: Vec<Item<'a>>, op: &str, joiner: &'static str) -> Vec<Item<'a>> {
    let mut out = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();
    while let Some(item) = iter.next() {
        let first = match item {
            Item::Token(token) if token.is_operator(op) => token,
            other => {
                out.push(other);
                continue;
            }
        };
        out.push(Item::Token(first));
        let mut operands: Vec<_> = iter.next().into_iter().collect();
        let mut joiners = Vec::new();
        while let Some(Item::Token(chained)) = iter.next_if(|next| next.is_operator(op)) {
            joiners.push(chained.position);
            operands.extend(iter.next());
        }
        if joiners.is_empty() {
            out.extend(operands);
            continue;
        }
        log::trace!(
            "normalizing {} chained '{op}' at {}",
            operands.len(),
            first.position
        );
        let mut operands = operands.into_iter();
        let mut inner = Vec::with_capacity(2 * joiners.len() + 1);
        inner.extend(operands.next());
        for (position, operand) in joiners.into_iter().zip(operands) {
            inner.push(Item::Token(Token::new(Kind::Operator, joiner, position)));
            inner.push(operand);
        }
        out.push(Item::Group(Group::synthetic(first.position, group_tiers(inner))));
    }
    out
}

fn precedence_transform(items: Vec<Item<'_>>) -> Vec<Item<'_>> {
    let items = group_tier(items, &["^"]);
    let items = normalize(items, "/", "*");
    let items = group_tier(items, &["*", "/"]);
    let items = normalize(items, "-", "+");
    group_tier(items, &["+", "-"])
}

fn group_regions<'a>(tokens: &[Token<'a>]) -> Vec<Item<'a>> {
    let mut items = Vec::new();
    let mut ind = 0;
    while let Some(&token) = tokens.get(ind) {
        let region = match token.kind {
            Kind::OpenBracket => matching_close(tokens, ind).map(|close| (ind, close)),
            Kind::Function if tokens.get(ind + 1).is_some_and(Token::is_open) => {
                matching_close(tokens, ind + 1).map(|close| (ind + 1, close))
            }
            _ => None,
        };
        let Some((open, close)) = region else {
            items.push(Item::Token(token));
            ind += 1;
            continue;
        };
        let inner = precedence_transform(group_regions(&tokens[open + 1..close]));
        let bounds = if token.kind == Kind::Function {
            Bounds::Call {
                function: token,
                open: tokens[open],
                close: tokens[close],
            }
        } else {
            Bounds::Brackets {
                open: token,
                close: tokens[close],
            }
        };
        items.push(Item::Group(Group {
            bounds,
            items: inner,
        }));
        ind = close + 1;
    }
    items
}

/// Nest bracketed regions and function calls, then regroup every level by precedence
///
/// Within a level the tiers are grouped in the order `^`, `*` and `/`, then `+` and `-`. Chained
/// division is normalized before its tier and chained subtraction before its own, so `-`, `/` and
/// `^` always associate left.
///
/// The tokens are expected to have passed [validate](crate::validate). Otherwise a bracket without
/// a partner, or a function name not followed by `(`, is kept as a plain token.
pub fn group<'a>(tokens: &[Token<'a>]) -> Vec<Item<'a>> {
    let items = precedence_transform(group_regions(tokens));
    log::debug!("grouped {} tokens into {} items", tokens.len(), items.len());
    items
}

/// Dissolve every group, depth first, back into a token sequence
///
/// # Example
/// ```
/// use arith_analyzer::{flatten, group, join, tokenize};
///
/// let (tokens, _) = tokenize("3-4-5");
/// assert_eq!(join(&flatten(&group(&tokens)), ""), "3-(4+5)");
/// ```
pub fn flatten<'a>(items: &[Item<'a>]) -> Vec<Token<'a>> {
    enum Pending<'t, 'a> {
        Item(&'t Item<'a>),
        Close(Token<'a>),
    }

    let mut out = Vec::new();
    let mut stack: Vec<_> = items.iter().rev().map(Pending::Item).collect();
    while let Some(pending) = stack.pop() {
        let group = match pending {
            Pending::Close(token) | Pending::Item(&Item::Token(token)) => {
                out.push(token);
                continue;
            }
            Pending::Item(Item::Group(group)) => group,
        };
        let (open, close) = match group.bounds {
            Bounds::Implicit => (None, None),
            Bounds::Brackets { open, close } => (Some(open), Some(close)),
            Bounds::Call {
                function,
                open,
                close,
            } => {
                out.push(function);
                (Some(open), Some(close))
            }
        };
        out.extend(open);
        stack.extend(close.map(Pending::Close));
        stack.extend(group.items.iter().rev().map(Pending::Item));
    }
    out
}
