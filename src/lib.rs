//! Prefix filter predicates evaluated against JSON-like targets
//!
//! An expression such as `&(age>18)(name=*)` is tokenized into a nested
//! token stream, parsed once into an immutable expression tree and then
//! evaluated against any `serde_json::Value`. Leaves double as literals
//! and property lookups: `age` means the target's `age` field when the
//! target has one and the plain string `"age"` otherwise, and dotted
//! leaves such as `user.name` walk nested objects.
//!
//! ```
//! use prefix_predicate::Predicate;
//! use serde_json::json;
//!
//! let filter = Predicate::new("&(age>18)(|(role=admin)(role=editor))");
//! let target = json!({"age": 32, "role": "editor"});
//! assert!(filter.matches(Some(&target)).unwrap());
//! ```
//!
//! The grammar is deliberately loose: operator placement is not
//! validated, and an operator missing an operand falls back to a literal
//! `true`, so `&(a=1)` evaluates exactly like `(a=1)`. Only unbalanced
//! parentheses are rejected.

pub mod ast;
pub mod cache;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod predicate;

#[cfg(test)]
mod property_tests;

pub use ast::{Expr, Literal};
pub use error::{PredicateError, Result};
pub use evaluator::{eval, loose_cmp, loose_eq, Evaluated};
pub use lexer::{tokenize, Token, TokenStream, COMPARISON_OPERATORS, LOGICAL_OPERATORS};
pub use parser::{parse, TokenQueue};
pub use predicate::Predicate;
