//! Statement dispatch and expression evaluation
//!
//! One statement per line:
//! - `let name = expr`
//! - `print(expr, ...)`
//! - `import module.path`
//! - bare `expr` (the module's result value is its last bare expression)
//!
//! Expressions are evaluated in a single pass over the token list; there
//! is no separate AST stage for a language this small.

use std::collections::HashMap;

use super::error::{EngineError, EngineResult};
use super::lexer::{tokenize, Token};
use super::value::Value;

/// Parsed form of a single source line.
#[derive(Debug)]
pub enum Stmt {
    Let { name: String, expr: Vec<Token> },
    Print { args: Vec<Vec<Token>> },
    Import { module: String },
    Expr { expr: Vec<Token> },
}

/// Parse one source line into a statement. Blank/comment lines yield None.
pub fn parse_line(
    line: usize,
    src: &str,
) -> EngineResult<Option<Stmt>> {
    let tokens = tokenize(line, src)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    if let Token::Ident(head) = &tokens[0] {
        match head.as_str() {
            "let" => return parse_let(line, &tokens).map(Some),
            "print" if tokens.get(1) == Some(&Token::LParen) => {
                return parse_print(line, &tokens).map(Some);
            }
            "import" => return parse_import(line, &tokens).map(Some),
            _ => {}
        }
    }

    Ok(Some(Stmt::Expr { expr: tokens }))
}

fn parse_let(
    line: usize,
    tokens: &[Token],
) -> EngineResult<Stmt> {
    let name = match tokens.get(1) {
        Some(Token::Ident(name)) => name.clone(),
        _ => return Err(EngineError::parse(line, "expected variable name after let")),
    };
    if tokens.get(2) != Some(&Token::Assign) {
        return Err(EngineError::parse(line, "expected = in let statement"));
    }
    if tokens.len() <= 3 {
        return Err(EngineError::parse(line, "expected expression after ="));
    }
    Ok(Stmt::Let {
        name,
        expr: tokens[3..].to_vec(),
    })
}

fn parse_print(
    line: usize,
    tokens: &[Token],
) -> EngineResult<Stmt> {
    if tokens.last() != Some(&Token::RParen) {
        return Err(EngineError::parse(line, "unclosed print call"));
    }
    let inner = &tokens[2..tokens.len() - 1];

    // Split on top-level commas, tracking parenthesis depth.
    let mut args = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;
    for token in inner {
        match token {
            Token::LParen => {
                depth += 1;
                current.push(token.clone());
            }
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| EngineError::parse(line, "unbalanced parentheses"))?;
                current.push(token.clone());
            }
            Token::Comma if depth == 0 => {
                if current.is_empty() {
                    return Err(EngineError::parse(line, "empty print argument"));
                }
                args.push(std::mem::take(&mut current));
            }
            _ => current.push(token.clone()),
        }
    }
    if depth != 0 {
        return Err(EngineError::parse(line, "unbalanced parentheses"));
    }
    if !current.is_empty() {
        args.push(current);
    } else if !args.is_empty() {
        return Err(EngineError::parse(line, "trailing comma in print call"));
    }

    Ok(Stmt::Print { args })
}

fn parse_import(
    line: usize,
    tokens: &[Token],
) -> EngineResult<Stmt> {
    // Dotted module path: ident (`.` ident)*
    let mut parts = Vec::new();
    let mut expect_ident = true;
    for token in &tokens[1..] {
        match (expect_ident, token) {
            (true, Token::Ident(name)) => {
                parts.push(name.clone());
                expect_ident = false;
            }
            (false, Token::Dot) => expect_ident = true,
            _ => return Err(EngineError::parse(line, "malformed import statement")),
        }
    }
    if parts.is_empty() || expect_ident {
        return Err(EngineError::parse(line, "expected module name after import"));
    }
    Ok(Stmt::Import {
        module: parts.join("."),
    })
}

/// Evaluate an expression token list against the global namespace.
pub fn eval_expr(
    line: usize,
    tokens: &[Token],
    globals: &HashMap<String, Value>,
) -> EngineResult<Value> {
    let mut parser = ExprParser {
        line,
        tokens,
        pos: 0,
        globals,
    };
    let value = parser.equality()?;
    if parser.pos != tokens.len() {
        return Err(EngineError::parse(line, "unexpected trailing tokens"));
    }
    Ok(value)
}

/// Recursive-descent evaluator over a single line's token list.
struct ExprParser<'a> {
    line: usize,
    tokens: &'a [Token],
    pos: usize,
    globals: &'a HashMap<String, Value>,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn equality(&mut self) -> EngineResult<Value> {
        let mut lhs = self.comparison()?;
        while let Some(op) = self.peek() {
            let negate = match op {
                Token::EqEq => false,
                Token::NotEq => true,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.comparison()?;
            let eq = values_equal(&lhs, &rhs);
            lhs = Value::Bool(eq != negate);
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> EngineResult<Value> {
        let mut lhs = self.additive()?;
        while let Some(op) = self.peek() {
            let op = match op {
                Token::Lt | Token::Le | Token::Gt | Token::Ge => op.clone(),
                _ => break,
            };
            self.pos += 1;
            let rhs = self.additive()?;
            lhs = compare(self.line, &op, &lhs, &rhs)?;
        }
        Ok(lhs)
    }

    fn additive(&mut self) -> EngineResult<Value> {
        let mut lhs = self.multiplicative()?;
        while let Some(op) = self.peek() {
            let op = match op {
                Token::Plus | Token::Minus => op.clone(),
                _ => break,
            };
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = match op {
                Token::Plus => add(self.line, lhs, rhs)?,
                _ => numeric_op(self.line, "-", lhs, rhs)?,
            };
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> EngineResult<Value> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek() {
            let symbol = match op {
                Token::Star => "*",
                Token::Slash => "/",
                Token::Percent => "%",
                _ => break,
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = numeric_op(self.line, symbol, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> EngineResult<Value> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                let value = self.unary()?;
                match value {
                    Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
                    Value::Float(x) => Ok(Value::Float(-x)),
                    other => Err(EngineError::type_mismatch(
                        self.line,
                        format!("cannot negate {}", other.type_name()),
                    )),
                }
            }
            Some(Token::Bang) => {
                self.pos += 1;
                let value = self.unary()?;
                match value.to_bool() {
                    Some(b) => Ok(Value::Bool(!b)),
                    None => Err(EngineError::type_mismatch(
                        self.line,
                        format!("cannot apply ! to {}", value.type_name()),
                    )),
                }
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> EngineResult<Value> {
        let line = self.line;
        match self.advance() {
            Some(Token::Int(n)) => Ok(Value::Int(n)),
            Some(Token::Float(x)) => Ok(Value::Float(x)),
            Some(Token::Str(s)) => Ok(Value::Str(s)),
            Some(Token::Ident(name)) => {
                if name == "true" {
                    return Ok(Value::Bool(true));
                }
                if name == "false" {
                    return Ok(Value::Bool(false));
                }
                self.globals
                    .get(&name)
                    .cloned()
                    .ok_or(EngineError::UndefinedVariable { line, name })
            }
            Some(Token::LParen) => {
                let value = self.equality()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(EngineError::parse(line, "expected closing parenthesis")),
                }
            }
            Some(other) => Err(EngineError::parse(
                line,
                format!("unexpected token: {:?}", other),
            )),
            None => Err(EngineError::parse(line, "unexpected end of expression")),
        }
    }
}

/// Structural equality with numeric cross-type comparison.
fn values_equal(
    lhs: &Value,
    rhs: &Value,
) -> bool {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a == b,
        _ if lhs.is_numeric() && rhs.is_numeric() => {
            lhs.to_float() == rhs.to_float()
        }
        _ => lhs == rhs,
    }
}

fn compare(
    line: usize,
    op: &Token,
    lhs: &Value,
    rhs: &Value,
) -> EngineResult<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ if lhs.is_numeric() && rhs.is_numeric() => {
            lhs.to_float().partial_cmp(&rhs.to_float())
        }
        _ => None,
    };
    let Some(ordering) = ordering else {
        return Err(EngineError::type_mismatch(
            line,
            format!(
                "cannot compare {} with {}",
                lhs.type_name(),
                rhs.type_name()
            ),
        ));
    };
    let result = match op {
        Token::Lt => ordering.is_lt(),
        Token::Le => ordering.is_le(),
        Token::Gt => ordering.is_gt(),
        Token::Ge => ordering.is_ge(),
        _ => unreachable!("comparison called with non-comparison token"),
    };
    Ok(Value::Bool(result))
}

/// `+` is overloaded: numeric addition or string concatenation.
fn add(
    line: usize,
    lhs: Value,
    rhs: Value,
) -> EngineResult<Value> {
    match (&lhs, &rhs) {
        (Value::Str(a), Value::Str(b)) => {
            let mut out = a.clone();
            out.push_str(b);
            Ok(Value::Str(out))
        }
        _ => numeric_op(line, "+", lhs, rhs),
    }
}

fn numeric_op(
    line: usize,
    op: &str,
    lhs: Value,
    rhs: Value,
) -> EngineResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        return match op {
            "+" => Ok(Value::Int(a.wrapping_add(b))),
            "-" => Ok(Value::Int(a.wrapping_sub(b))),
            "*" => Ok(Value::Int(a.wrapping_mul(b))),
            "/" => {
                if b == 0 {
                    Err(EngineError::DivisionByZero { line })
                } else {
                    Ok(Value::Int(a / b))
                }
            }
            "%" => {
                if b == 0 {
                    Err(EngineError::DivisionByZero { line })
                } else {
                    Ok(Value::Int(a % b))
                }
            }
            _ => unreachable!("unknown numeric operator"),
        };
    }

    let (Some(a), Some(b)) = (lhs.to_float(), rhs.to_float()) else {
        return Err(EngineError::type_mismatch(
            line,
            format!(
                "operator {} expects numbers, got {} and {}",
                op,
                lhs.type_name(),
                rhs.type_name()
            ),
        ));
    };
    match op {
        "+" => Ok(Value::Float(a + b)),
        "-" => Ok(Value::Float(a - b)),
        "*" => Ok(Value::Float(a * b)),
        "/" => {
            if b == 0.0 {
                Err(EngineError::DivisionByZero { line })
            } else {
                Ok(Value::Float(a / b))
            }
        }
        "%" => {
            if b == 0.0 {
                Err(EngineError::DivisionByZero { line })
            } else {
                Ok(Value::Float(a % b))
            }
        }
        _ => unreachable!("unknown numeric operator"),
    }
}
