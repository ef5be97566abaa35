//! Parse a binary tree description and print the node order of a
//! breadth-first traversal to standard output.
//!
//! Example usage:
//!
//!     cargo run -- --input-filepath test_programs/sample_tree.txt
//!
//! Without `--input-filepath` the tree description is read from standard
//! input.

use clap::Parser;
use tree_traversal::end_to_end::{run_traversal, TraversalConfig};

fn main() {
    let traversal_config = TraversalConfig::parse();

    if traversal_config.input_filepath.is_none() {
        println!("Waiting for input:");
    }

    match run_traversal(&traversal_config) {
        Ok(node_order) => {
            println!("Breadth-first traversal node order: ");
            println!("{}", node_order);
        }

        Err(run_error) => {
            eprintln!("{}", run_error);
            std::process::exit(1);
        }
    }
}
