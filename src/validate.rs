use crate::{Kind, SyntaxError, Token};

fn check_start(first: &Token<'_>, errors: &mut Vec<SyntaxError>) {
    if first.is_binary_only_operator() || first.is_close() {
        errors.push(SyntaxError::InvalidStart {
            lexeme: first.text.to_owned(),
            position: first.position,
        });
    }
}

fn check_end(last: &Token<'_>, errors: &mut Vec<SyntaxError>) {
    let lexeme = last.text.to_owned();
    let position = last.position;
    match last.kind {
        Kind::Operator => errors.push(SyntaxError::TrailingOperator { lexeme, position }),
        Kind::OpenBracket => errors.push(SyntaxError::TrailingOpenBracket { position }),
        Kind::Function => errors.push(SyntaxError::TrailingFunction { lexeme, position }),
        _ => {}
    }
}

fn check_pair(cur: &Token<'_>, next: &Token<'_>, errors: &mut Vec<SyntaxError>) {
    if cur.is_operand_like() && next.is_operand_like() {
        errors.push(SyntaxError::MissingOperator {
            left: cur.text.to_owned(),
            right: next.text.to_owned(),
            position: next.position,
        });
    }
    if cur.kind == Kind::Function && !next.is_open() {
        errors.push(SyntaxError::MissingFunctionBracket {
            function: cur.text.to_owned(),
            position: next.position,
        });
    }
    if cur.kind == Kind::Operator && next.kind == Kind::Operator {
        errors.push(SyntaxError::ConsecutiveOperators {
            first: cur.text.to_owned(),
            second: next.text.to_owned(),
            position: next.position,
        });
    }
    if cur.is_open() && next.is_binary_only_operator() {
        errors.push(SyntaxError::OperatorAfterOpenBracket {
            operator: next.text.to_owned(),
            position: next.position,
        });
    }
    if cur.is_operand() && next.is_open() {
        errors.push(SyntaxError::MissingOperatorBeforeBracket {
            operand: cur.text.to_owned(),
            position: next.position,
        });
    }
    if cur.kind == Kind::Operator && next.is_close() {
        // reported at the operator, not the bracket
        errors.push(SyntaxError::OperatorBeforeCloseBracket {
            operator: cur.text.to_owned(),
            position: cur.position,
        });
    }
    if cur.is_close() && next.is_operand_like() {
        errors.push(SyntaxError::MissingOperatorAfterBracket {
            lexeme: next.text.to_owned(),
            position: next.position,
        });
    }
    if cur.is_open() && next.is_close() {
        errors.push(SyntaxError::EmptyBrackets {
            position: next.position,
        });
    }
    if cur.is_close() && next.is_open() {
        errors.push(SyntaxError::MissingOperatorBetweenBrackets {
            position: next.position,
        });
    }
}

fn check_balance(tokens: &[Token<'_>], errors: &mut Vec<SyntaxError>) {
    let mut open = Vec::new();
    for token in tokens {
        if token.is_open() {
            open.push(token.position);
        } else if token.is_close() && open.pop().is_none() {
            errors.push(SyntaxError::UnexpectedCloseBracket {
                position: token.position,
            });
        }
    }
    // innermost unmatched bracket first
    errors.extend(
        open.into_iter()
            .rev()
            .map(|position| SyntaxError::UnclosedBracket { position }),
    );
}

/// Check the structure of a token sequence, reporting every violation
///
/// Runs the start, end, adjacent-pair and bracket-balance checks in that order and never stops
/// early. An empty sequence has nothing to check; empty input is reported by the lexer.
///
/// # Example
/// ```
/// use arith_analyzer::{tokenize, validate, SyntaxError};
///
/// let (tokens, _) = tokenize("+*3");
/// assert_eq!(
///     validate(&tokens),
///     [SyntaxError::ConsecutiveOperators { first: "+".into(), second: "*".into(), position: 1 }]
/// );
/// ```
pub fn validate(tokens: &[Token<'_>]) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return errors;
    };
    check_start(first, &mut errors);
    check_end(last, &mut errors);
    for pair in tokens.windows(2) {
        check_pair(&pair[0], &pair[1], &mut errors);
    }
    check_balance(tokens, &mut errors);
    log::debug!("validated {} tokens, {} syntax errors", tokens.len(), errors.len());
    errors
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::{tokenize, SyntaxError};
    use pretty_assertions::assert_eq;

    fn check(inp: &str) -> Vec<SyntaxError> {
        let (tokens, errors) = tokenize(inp);
        assert!(errors.is_empty(), "lexical errors in {inp:?}: {errors:?}");
        validate(&tokens)
    }

    #[test]
    fn accepts_well_formed() {
        for inp in [
            "3+(5*(10-4))-sin(45)",
            "-x",
            "+x",
            "(-a)*b",
            "sin(cos(tan(x)))",
            "a^b^c/d",
            "(a+b+5)*2+0*(0/5-(6+3+d))",
        ] {
            assert!(check(inp).is_empty(), "{inp}");
        }
    }

    #[test]
    fn invalid_start_and_end() {
        assert_eq!(
            check("*a-"),
            [
                SyntaxError::InvalidStart {
                    lexeme: "*".into(),
                    position: 0
                },
                SyntaxError::TrailingOperator {
                    lexeme: "-".into(),
                    position: 2
                },
            ]
        );
        assert_eq!(
            check(")a"),
            [
                SyntaxError::InvalidStart {
                    lexeme: ")".into(),
                    position: 0
                },
                SyntaxError::MissingOperatorAfterBracket {
                    lexeme: "a".into(),
                    position: 1
                },
                SyntaxError::UnexpectedCloseBracket { position: 0 },
            ]
        );
        assert_eq!(
            check("a+sin"),
            [SyntaxError::TrailingFunction {
                lexeme: "sin".into(),
                position: 2
            }]
        );
    }

    #[test]
    fn trailing_open_bracket() {
        assert_eq!(
            check("a*("),
            [
                SyntaxError::TrailingOpenBracket { position: 2 },
                SyntaxError::UnclosedBracket { position: 2 },
            ]
        );
    }

    #[test]
    fn missing_operators() {
        assert_eq!(
            check("2 x"),
            [SyntaxError::MissingOperator {
                left: "2".into(),
                right: "x".into(),
                position: 2
            }]
        );
        assert_eq!(
            check("2(x)"),
            [SyntaxError::MissingOperatorBeforeBracket {
                operand: "2".into(),
                position: 1
            }]
        );
        assert_eq!(
            check("(a)(b)"),
            [SyntaxError::MissingOperatorBetweenBrackets { position: 3 }]
        );
        assert_eq!(
            check("(a)sin(b)"),
            [SyntaxError::MissingOperatorAfterBracket {
                lexeme: "sin".into(),
                position: 3
            }]
        );
    }

    #[test]
    fn function_without_bracket() {
        assert_eq!(
            check("sinx"),
            [
                SyntaxError::MissingOperator {
                    left: "sin".into(),
                    right: "x".into(),
                    position: 3
                },
                SyntaxError::MissingFunctionBracket {
                    function: "sin".into(),
                    position: 3
                },
            ]
        );
    }

    #[test]
    fn operators_next_to_brackets() {
        assert_eq!(
            check("(*a)"),
            [SyntaxError::OperatorAfterOpenBracket {
                operator: "*".into(),
                position: 1
            }]
        );
        assert_eq!(
            check("(a-)"),
            [SyntaxError::OperatorBeforeCloseBracket {
                operator: "-".into(),
                position: 2
            }]
        );
        assert_eq!(
            check("a*()"),
            [SyntaxError::EmptyBrackets { position: 3 }]
        );
    }

    #[test]
    fn double_operator_after_unary_sign() {
        assert_eq!(
            check("+*3"),
            [SyntaxError::ConsecutiveOperators {
                first: "+".into(),
                second: "*".into(),
                position: 1
            }]
        );
    }

    #[test]
    fn unmatched_brackets_innermost_first() {
        assert_eq!(
            check("((a+(b"),
            [
                SyntaxError::UnclosedBracket { position: 4 },
                SyntaxError::UnclosedBracket { position: 1 },
                SyntaxError::UnclosedBracket { position: 0 },
            ]
        );
    }

    #[test]
    fn extra_close_does_not_consume_later_open() {
        assert_eq!(
            check("a)+(b)"),
            [SyntaxError::UnexpectedCloseBracket { position: 1 }]
        );
    }

    #[test]
    fn reports_everything_at_once() {
        let errors = check("(a**b))+");
        assert_eq!(
            errors,
            [
                SyntaxError::TrailingOperator {
                    lexeme: "+".into(),
                    position: 7
                },
                SyntaxError::ConsecutiveOperators {
                    first: "*".into(),
                    second: "*".into(),
                    position: 3
                },
                SyntaxError::UnexpectedCloseBracket { position: 6 },
            ]
        );
    }

    #[test]
    fn empty_sequence() {
        assert!(validate(&[]).is_empty());
    }
}
