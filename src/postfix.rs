use crate::{Kind, Token};

/// Binding strength, zero for anything that isn't an operator or function
fn precedence(token: &Token<'_>) -> u8 {
    match (token.kind, token.text) {
        (Kind::Function, _) => 4,
        (Kind::Operator, "^") => 3,
        (Kind::Operator, "*" | "/") => 2,
        (Kind::Operator, _) => 1,
        _ => 0,
    }
}

/// Convert an infix token sequence to postfix with the shunting-yard algorithm
///
/// Every operator is left associative, `^` included: an incoming operator first moves every
/// stacked operator of equal or higher precedence to the output. Functions bind tighter than any
/// operator. Brackets never reach the output.
///
/// # Example
/// ```
/// use arith_analyzer::{join, to_postfix, tokenize};
///
/// let (tokens, _) = tokenize("2^3^2");
/// assert_eq!(join(&to_postfix(&tokens), " "), "2 3 ^ 2 ^");
/// ```
pub fn to_postfix<'a>(tokens: &[Token<'a>]) -> Vec<Token<'a>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token<'a>> = Vec::new();
    for &token in tokens {
        match token.kind {
            Kind::Number | Kind::Variable => output.push(token),
            Kind::OpenBracket => stack.push(token),
            Kind::CloseBracket => {
                while let Some(top) = stack.pop() {
                    if top.is_open() {
                        break;
                    }
                    output.push(top);
                }
            }
            Kind::Function | Kind::Operator => {
                let incoming = precedence(&token);
                while stack.last().is_some_and(|top| precedence(top) >= incoming) {
                    output.extend(stack.pop());
                }
                stack.push(token);
            }
        }
    }
    output.extend(stack.into_iter().rev().filter(|token| !token.is_open()));
    log::debug!("postfix: {}", crate::join(&output, " "));
    output
}

#[cfg(test)]
mod tests {
    use super::to_postfix;
    use crate::{join, tokenize};
    use pretty_assertions::assert_eq;

    fn postfix(inp: &str) -> String {
        let (tokens, _) = tokenize(inp);
        join(&to_postfix(&tokens), " ")
    }

    #[test]
    fn precedence_order() {
        assert_eq!(postfix("3+4*2"), "3 4 2 * +");
        assert_eq!(postfix("a*b^c-d/e"), "a b c ^ * d e / -");
    }

    #[test]
    fn left_associative() {
        assert_eq!(postfix("3-4-5"), "3 4 - 5 -");
        assert_eq!(postfix("2^3^2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn brackets_override_precedence() {
        assert_eq!(postfix("(3+4)*2"), "3 4 + 2 *");
        assert_eq!(postfix("3-(4+5)"), "3 4 5 + -");
    }

    #[test]
    fn functions() {
        assert_eq!(postfix("sin(x)^2"), "x sin 2 ^");
        assert_eq!(postfix("a*sin(b+c)"), "a b c + sin *");
        assert_eq!(postfix("cos(tan(0))"), "0 tan cos");
    }

    #[test]
    fn stray_brackets_are_dropped() {
        assert_eq!(postfix("(a+b"), "a b +");
        assert_eq!(postfix("a+b)*c"), "a b + c *");
    }
}
