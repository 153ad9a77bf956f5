//! Calculator capability — evaluates mathematical expressions.
//!
//! Supports `+`, `-`, `*`, `/`, parentheses, unary negation, and decimal
//! numbers. Evaluation uses the two-stack shunting-yard algorithm. No
//! dependencies beyond std.

use async_trait::async_trait;
use reagent_core::capability::{Arguments, Capability};

pub struct CalculatorCapability;

#[async_trait]
impl Capability for CalculatorCapability {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluate a mathematical 'expression': +, -, *, /, parentheses, decimals"
    }

    async fn invoke(&self, arguments: &Arguments) -> Result<String, String> {
        let expression = arguments
            .get("expression")
            .ok_or_else(|| "missing 'expression' argument".to_string())?;

        let value = evaluate(expression)?;
        // Integers render without a trailing .0
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Ok(format!("{}", value as i64))
        } else {
            Ok(format!("{value}"))
        }
    }
}

// ── Shunting-yard evaluator ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    /// Unary negation, recognized during tokenization.
    Neg,
    LParen,
    RParen,
}

/// Evaluate a mathematical expression string.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err("empty expression".into());
    }

    let mut values: Vec<f64> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens {
        match tok {
            Tok::Num(n) => values.push(n),
            Tok::LParen => ops.push(tok),
            Tok::RParen => loop {
                match ops.pop() {
                    Some(Tok::LParen) => break,
                    Some(op) => apply(op, &mut values)?,
                    None => return Err("unmatched closing parenthesis".into()),
                }
            },
            op => {
                while let Some(&top) = ops.last() {
                    if top == Tok::LParen {
                        break;
                    }
                    // Neg is right-associative; binary operators are left.
                    let reduce = if op == Tok::Neg {
                        precedence(top) > precedence(op)
                    } else {
                        precedence(top) >= precedence(op)
                    };
                    if !reduce {
                        break;
                    }
                    let top = ops.pop().ok_or("operator stack underflow")?;
                    apply(top, &mut values)?;
                }
                ops.push(op);
            }
        }
    }

    while let Some(op) = ops.pop() {
        if op == Tok::LParen {
            return Err("unmatched opening parenthesis".into());
        }
        apply(op, &mut values)?;
    }

    match (values.pop(), values.is_empty()) {
        (Some(result), true) => Ok(result),
        _ => Err("malformed expression".into()),
    }
}

fn precedence(op: Tok) -> u8 {
    match op {
        Tok::Neg => 3,
        Tok::Star | Tok::Slash => 2,
        Tok::Plus | Tok::Minus => 1,
        _ => 0,
    }
}

fn apply(op: Tok, values: &mut Vec<f64>) -> Result<(), String> {
    if op == Tok::Neg {
        let v = values.pop().ok_or("missing operand")?;
        values.push(-v);
        return Ok(());
    }

    let right = values.pop().ok_or("missing operand")?;
    let left = values.pop().ok_or("missing operand")?;
    let result = match op {
        Tok::Plus => left + right,
        Tok::Minus => left - right,
        Tok::Star => left * right,
        Tok::Slash => {
            if right == 0.0 {
                return Err("division by zero".into());
            }
            left / right
        }
        other => return Err(format!("not an operator: {other:?}")),
    };
    values.push(result);
    Ok(())
}

fn tokenize(input: &str) -> Result<Vec<Tok>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    // Tracks whether the next token should be an operand; a '-' seen in
    // operand position is unary negation.
    let mut expect_operand = true;

    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push(Tok::Plus);
                expect_operand = true;
                i += 1;
            }
            '-' => {
                tokens.push(if expect_operand { Tok::Neg } else { Tok::Minus });
                expect_operand = true;
                i += 1;
            }
            '*' => {
                tokens.push(Tok::Star);
                expect_operand = true;
                i += 1;
            }
            '/' => {
                tokens.push(Tok::Slash);
                expect_operand = true;
                i += 1;
            }
            '(' => {
                tokens.push(Tok::LParen);
                expect_operand = true;
                i += 1;
            }
            ')' => {
                tokens.push(Tok::RParen);
                expect_operand = false;
                i += 1;
            }
            _ if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let num: f64 = text.parse().map_err(|_| format!("invalid number: {text}"))?;
                tokens.push(Tok::Num(num));
                expect_operand = false;
            }
            _ => return Err(format!("unexpected character: '{c}'")),
        }
    }

    Ok(tokens)
}

// ── Tests ─────────────────────────────────────────────────────────────────
