//! Module: predicate
//! Responsibility: operator enum, compiled expression tree, statement
//! compilation and evaluation.
//! Does not own: statement sequencing or grammar parsing.
//! Boundary: `compile` is the only way to produce an `Expr` from text.

mod ast;
mod compile;
mod eval;


// re-exports
pub use ast::{CompareOp, Expr};
pub use compile::compile;
pub(crate) use eval::eval_root;
