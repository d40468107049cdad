//! Abstract Syntax Tree (AST) of the expression language
//!
//! Expressions in decision tables and literal expressions compile into
//! these nodes before they are evaluated.

pub mod expression;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
