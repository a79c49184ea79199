//! Expression string tokenizer
//!
//! Splits a raw filter expression into a nested token stream: operator and
//! operand text at the current nesting level, with each parenthesized
//! sub-expression tokenized recursively into its own stream.

use crate::error::{PredicateError, Result};

/// Comparison operator symbols, recognized at nesting depth zero.
pub const COMPARISON_OPERATORS: [char; 3] = ['=', '>', '<'];

/// Logical operator symbols.
pub const LOGICAL_OPERATORS: [char; 3] = ['&', '|', '!'];

/// One element of a token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Operand text or a single-character operator symbol.
    Text(String),
    /// A parenthesized sub-expression.
    Group(TokenStream),
}

/// Ordered token sequence produced by [`tokenize`].
pub type TokenStream = Vec<Token>;

impl Token {
    fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }
}

/// Tokenize a raw expression string.
///
/// A leading logical operator is emitted on its own and applies to the
/// whole remainder, which is wrapped in parentheses when not already
/// grouped. Fails when parentheses do not balance.
pub fn tokenize(expression: &str) -> Result<TokenStream> {
    let mut tokens = TokenStream::new();

    if let Some(first) = expression.chars().next() {
        if LOGICAL_OPERATORS.contains(&first) {
            tokens.push(Token::text(first));
            let rest = &expression[first.len_utf8()..];
            if rest.starts_with('(') {
                tokens.extend(tokenize(rest)?);
            } else {
                tokens.extend(tokenize(&format!("({})", rest))?);
            }
            return Ok(tokens);
        }
    }

    let mut depth = 0i32;
    let mut buffer = String::new();

    for ch in expression.chars() {
        if depth == 0 && COMPARISON_OPERATORS.contains(&ch) {
            tokens.push(Token::text(ch));
            tokens.push(Token::text(buffer.trim()));
            buffer.clear();
        } else if ch == '(' {
            // A single buffered character is not flushed here; it stays in
            // the accumulator and joins the group's interior.
            if depth == 0 && buffer.chars().count() > 1 {
                tokens.push(Token::Group(tokenize(&buffer)?));
                buffer.clear();
            }
            if depth > 0 {
                buffer.push(ch);
            }
            depth += 1;
        } else if ch == ')' {
            depth -= 1;
            if depth == 0 {
                tokens.push(Token::Group(tokenize(&buffer)?));
                buffer.clear();
            }
            // Interior parentheses are kept verbatim for the recursive call.
            if depth > 0 {
                buffer.push(ch);
            }
        } else {
            buffer.push(ch);
        }

        if depth < 0 {
            return Err(PredicateError::MissingOpeningParen(expression.to_string()));
        }
    }

    if !buffer.is_empty() {
        tokens.push(Token::text(buffer.trim()));
    }

    if depth > 0 {
        return Err(PredicateError::MissingClosingParen(expression.to_string()));
    }

    Ok(tokens)
}
