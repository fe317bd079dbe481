use lisk_core::{LiskError, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Dot,
    Int(i64),
    Str(String),
    Symbol(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Characters allowed in a symbol besides alphanumerics.
fn is_symbol_char(ch: char) -> bool {
    ch.is_alphanumeric() || "!#$%&|*+-/:<=>?@^_~".contains(ch)
}

pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LiskError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let mut line = 1;
    let mut col = 1;

    while i < chars.len() {
        let ch = chars[i];
        let span = Span::new(line, col);

        match ch {
            ' ' | '\t' | '\r' => {
                col += 1;
                i += 1;
            }
            '\n' => {
                line += 1;
                col = 1;
                i += 1;
            }

            ';' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }

            '(' => {
                tokens.push(SpannedToken {
                    token: Token::LParen,
                    span,
                });
                col += 1;
                i += 1;
            }
            ')' => {
                tokens.push(SpannedToken {
                    token: Token::RParen,
                    span,
                });
                col += 1;
                i += 1;
            }
            '\'' => {
                tokens.push(SpannedToken {
                    token: Token::Quote,
                    span,
                });
                col += 1;
                i += 1;
            }

            '"' => {
                i += 1;
                col += 1;
                let mut s = String::new();
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(LiskError::parse("unterminated string", span));
                        }
                        Some('"') => {
                            i += 1;
                            col += 1;
                            break;
                        }
                        Some('\\') => {
                            let escaped = match chars.get(i + 1) {
                                Some('n') => '\n',
                                Some('t') => '\t',
                                Some('r') => '\r',
                                Some('\\') => '\\',
                                Some('"') => '"',
                                _ => {
                                    return Err(LiskError::parse(
                                        "invalid escape in string",
                                        Span::new(line, col),
                                    ));
                                }
                            };
                            s.push(escaped);
                            i += 2;
                            col += 2;
                        }
                        Some('\n') => {
                            s.push('\n');
                            i += 1;
                            line += 1;
                            col = 1;
                        }
                        Some(c) => {
                            s.push(*c);
                            i += 1;
                            col += 1;
                        }
                    }
                }
                tokens.push(SpannedToken {
                    token: Token::Str(s),
                    span,
                });
            }

            _ if is_symbol_char(ch) => {
                let mut atom = String::new();
                while i < chars.len() && is_symbol_char(chars[i]) {
                    atom.push(chars[i]);
                    i += 1;
                    col += 1;
                }
                tokens.push(SpannedToken {
                    token: classify_atom(atom),
                    span,
                });
            }

            '.' => {
                tokens.push(SpannedToken {
                    token: Token::Dot,
                    span,
                });
                col += 1;
                i += 1;
            }

            _ => {
                return Err(LiskError::parse(format!("unexpected character '{ch}'"), span));
            }
        }
    }

    Ok(tokens)
}

/// An atom is a boolean literal, an integer literal, or a symbol.
fn classify_atom(atom: String) -> Token {
    match atom.as_str() {
        "#t" => return Token::Bool(true),
        "#f" => return Token::Bool(false),
        _ => {}
    }
    let digits = atom.strip_prefix('-').unwrap_or(&atom);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = atom.parse::<i64>() {
            return Token::Int(n);
        }
    }
    Token::Symbol(atom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn lexes_atoms() {
        assert_eq!(tokens("42"), vec![Token::Int(42)]);
        assert_eq!(tokens("-42"), vec![Token::Int(-42)]);
        assert_eq!(tokens("#t #f"), vec![Token::Bool(true), Token::Bool(false)]);
        assert_eq!(tokens("set!"), vec![Token::Symbol("set!".into())]);
        // A lone dash is subtraction's name, not a number.
        assert_eq!(tokens("-"), vec![Token::Symbol("-".into())]);
        assert_eq!(tokens("string<=?"), vec![Token::Symbol("string<=?".into())]);
    }

    #[test]
    fn lexes_strings() {
        assert_eq!(tokens("\"hi\""), vec![Token::Str("hi".into())]);
        assert_eq!(
            tokens("\"a\\nb\\\"c\\\\\""),
            vec![Token::Str("a\nb\"c\\".into())]
        );
    }

    #[test]
    fn lexes_lists_and_quote() {
        assert_eq!(
            tokens("'(a . b)"),
            vec![
                Token::Quote,
                Token::LParen,
                Token::Symbol("a".into()),
                Token::Dot,
                Token::Symbol("b".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(tokens("1 ; two\n3"), vec![Token::Int(1), Token::Int(3)]);
    }

    #[test]
    fn tracks_positions() {
        let toks = tokenize("(a\n  b)").expect("tokenize failed");
        assert_eq!(toks[0].span, Span::new(1, 1));
        assert_eq!(toks[1].span, Span::new(1, 2));
        assert_eq!(toks[2].span, Span::new(2, 3));
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(matches!(err, LiskError::Parse { .. }));
    }
}
