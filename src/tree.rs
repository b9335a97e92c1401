//! The expression tree built from a postfix sequence
//!
//! There is a single node type. A node with two children is a binary operator, a node with only
//! a left child is a function applied to its argument, and a node with no children is a number or
//! variable.
use crate::{Kind, Token, TreeError};
use std::fmt;

/// A binary expression tree node
///
/// Dropping, [depth](Node::depth) and [Display](fmt::Display) walk the tree with an explicit stack,
/// so long operator chains are fine. The derived comparison and cloning recurse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    /// Operand lexeme, operator symbol or function name
    pub value: &'a str,
    left: Option<Box<Node<'a>>>,
    right: Option<Box<Node<'a>>>,
}

impl<'a> Node<'a> {
    /// A number or variable
    pub fn leaf(value: &'a str) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    /// A function applied to its argument, which becomes the left child
    pub fn unary(func: &'a str, arg: Node<'a>) -> Self {
        Node {
            value: func,
            left: Some(Box::new(arg)),
            right: None,
        }
    }

    /// A binary operator and its operands
    pub fn binary(op: &'a str, left: Node<'a>, right: Node<'a>) -> Self {
        Node {
            value: op,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// The left operand, or the argument of a function
    pub fn left(&self) -> Option<&Node<'a>> {
        self.left.as_deref()
    }

    /// The right operand, never present for functions
    pub fn right(&self) -> Option<&Node<'a>> {
        self.right.as_deref()
    }

    /// True for numbers and variables
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// True for function applications
    pub fn is_function(&self) -> bool {
        self.left.is_some() && self.right.is_none()
    }

    /// Number of edges on the longest path down to a leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let children = node.left().into_iter().chain(node.right());
            stack.extend(children.map(|child| (child, depth + 1)));
        }
        deepest
    }
}

impl Drop for Node<'_> {
    fn drop(&mut self) {
        let mut stack: Vec<_> = self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Fully bracketed infix, e.g. `(3+sin(x))`
impl<'a> fmt::Display for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Part<'n> {
            Node(&'n Node<'n>),
            Text(&'n str),
        }

        let mut stack = vec![Part::Node(self)];
        while let Some(part) = stack.pop() {
            let node = match part {
                Part::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Part::Node(node) => node,
            };
            match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Part::Text(")"),
                        Part::Node(right),
                        Part::Text(node.value),
                        Part::Node(left),
                    ]);
                }
                (Some(arg), None) => {
                    write!(f, "{}(", node.value)?;
                    stack.extend([Part::Text(")"), Part::Node(arg)]);
                }
                _ => f.write_str(node.value)?,
            }
        }
        Ok(())
    }
}

fn operand<'a>(stack: &mut Vec<Node<'a>>, token: &Token<'a>) -> Result<Node<'a>, TreeError> {
    stack.pop().ok_or_else(|| TreeError::MissingOperand {
        lexeme: token.text.to_owned(),
        position: token.position,
    })
}

/// Build the tree for a postfix sequence
///
/// # Errors
///
/// When the sequence is empty, contains brackets, or doesn't reduce to exactly one node.
///
/// # Example
/// ```
/// use arith_analyzer::{build_tree, to_postfix, tokenize};
///
/// let (tokens, _) = tokenize("3+4*2");
/// let root = build_tree(&to_postfix(&tokens)).unwrap();
/// assert_eq!(root.value, "+");
/// assert_eq!(root.to_string(), "(3+(4*2))");
/// ```
pub fn build_tree<'a>(postfix: &[Token<'a>]) -> Result<Node<'a>, TreeError> {
    let mut stack = Vec::new();
    for token in postfix {
        let node = match token.kind {
            Kind::Number | Kind::Variable => Node::leaf(token.text),
            Kind::Function => Node::unary(token.text, operand(&mut stack, token)?),
            Kind::Operator => {
                let right = operand(&mut stack, token)?;
                let left = operand(&mut stack, token)?;
                Node::binary(token.text, left, right)
            }
            Kind::OpenBracket | Kind::CloseBracket => {
                return Err(TreeError::UnexpectedBracket {
                    lexeme: token.text.to_owned(),
                    position: token.position,
                })
            }
        };
        stack.push(node);
    }
    match stack.len() {
        0 => Err(TreeError::Empty),
        1 => stack.pop().ok_or(TreeError::Empty),
        leftover => Err(TreeError::Leftover(leftover)),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_tree, Node};
    use crate::{to_postfix, tokenize, Kind, Token, TreeError};
    use pretty_assertions::assert_eq;

    fn tree(inp: &str) -> Result<Node<'_>, TreeError> {
        let (tokens, _) = tokenize(inp);
        build_tree(&to_postfix(&tokens))
    }

    #[test]
    fn operator_precedence_shape() {
        let root = tree("3+4*2").unwrap();
        assert_eq!(
            root,
            Node::binary(
                "+",
                Node::leaf("3"),
                Node::binary("*", Node::leaf("4"), Node::leaf("2"))
            )
        );
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn functions_are_left_only() {
        let root = tree("sin(0)").unwrap();
        assert!(root.is_function());
        assert_eq!(root.left(), Some(&Node::leaf("0")));
        assert_eq!(root.right(), None);
        assert_eq!(root.to_string(), "sin(0)");
    }

    #[test]
    fn single_leaf() {
        let root = tree("0").unwrap();
        assert!(root.is_leaf());
        assert!(!root.is_function());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn renders_fully_bracketed() {
        assert_eq!(tree("2^3^2").unwrap().to_string(), "((2^3)^2)");
        assert_eq!(
            tree("a-cos(b)/c").unwrap().to_string(),
            "(a-(cos(b)/c))"
        );
    }

    #[test]
    fn deep_trees_need_no_recursion() {
        let inp = vec!["a"; 100_000].join("-");
        let root = tree(&inp).unwrap();
        assert_eq!(root.depth(), 99_999);
        assert_eq!(root.to_string().len(), inp.len() + 2 * 99_999);
    }

    #[test]
    fn malformed_postfix() {
        assert_eq!(build_tree(&[]), Err(TreeError::Empty));
        assert_eq!(tree("a b"), Err(TreeError::Leftover(2)));
        let plus = Token::new(Kind::Operator, "+", 4);
        assert_eq!(
            build_tree(&[Token::new(Kind::Number, "1", 0), plus]),
            Err(TreeError::MissingOperand {
                lexeme: "+".into(),
                position: 4
            })
        );
        assert_eq!(
            build_tree(&[Token::new(Kind::OpenBracket, "(", 0)]),
            Err(TreeError::UnexpectedBracket {
                lexeme: "(".into(),
                position: 0
            })
        );
    }
}
