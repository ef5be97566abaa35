//! This crate contains code for parsing a textual description of a binary
//! tree and printing the node names in breadth-first order.

pub mod end_to_end;
pub mod lexical_analysis;
pub mod recursive_descent_parsing;
pub mod tree;
