//! Line tokenizer for the embedded script language
//!
//! The language is line oriented: one statement per line, `#` starts a
//! comment. The lexer produces a flat token list per line; statement
//! dispatch and expression parsing live in `eval`.

use super::error::{EngineError, EngineResult};

/// A single token within one source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
    Dot,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Bang,
}

/// Tokenize one source line. Returns an empty vector for blank lines
/// and comment-only lines.
pub fn tokenize(
    line: usize,
    src: &str,
) -> EngineResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '#' => break,
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '=' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::EqEq);
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::NotEq);
                } else {
                    tokens.push(Token::Bang);
                }
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Le);
                } else {
                    tokens.push(Token::Lt);
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ge);
                } else {
                    tokens.push(Token::Gt);
                }
            }
            '"' => {
                chars.next();
                tokens.push(lex_string(line, &mut chars)?);
            }
            c if c.is_ascii_digit() => {
                tokens.push(lex_number(line, &mut chars)?);
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(EngineError::parse(
                    line,
                    format!("unexpected character: {:?}", other),
                ));
            }
        }
    }

    Ok(tokens)
}

fn lex_string(
    line: usize,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> EngineResult<Token> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some('"') => return Ok(Token::Str(out)),
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    return Err(EngineError::parse(
                        line,
                        format!("unknown escape: \\{}", other),
                    ));
                }
                None => return Err(EngineError::parse(line, "unterminated string")),
            },
            Some(c) => out.push(c),
            None => return Err(EngineError::parse(line, "unterminated string")),
        }
    }
}

fn lex_number(
    line: usize,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> EngineResult<Token> {
    let mut text = String::new();
    let mut is_float = false;

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            chars.next();
        } else if c == '.' && !is_float {
            // Peek past the dot: `1.5` is a float, `1.foo` is not a number.
            let mut ahead = chars.clone();
            ahead.next();
            if ahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                is_float = true;
                text.push(c);
                chars.next();
            } else {
                break;
            }
        } else {
            break;
        }
    }

    if is_float {
        text.parse::<f64>()
            .map(Token::Float)
            .map_err(|_| EngineError::parse(line, format!("invalid float literal: {}", text)))
    } else {
        text.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| EngineError::parse(line, format!("invalid integer literal: {}", text)))
    }
}
