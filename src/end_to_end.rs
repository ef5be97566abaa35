//! Code to configure and run the tree traversal on an input stream.

use std::fs::File;

use clap::Parser;

use crate::recursive_descent_parsing::ParseError;
use crate::tree::TreeNode;

/// Config for the traversal run. Instantiate via `TraversalConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct TraversalConfig {
    /// The input filepath containing the tree description. Reads standard
    /// input when omitted.
    #[arg(short, long)]
    pub input_filepath: Option<String>,
}

/// Errors that may be thrown when running the traversal.
#[derive(Debug)]
pub enum RunError {
    InputError(std::io::Error),
    TreeParseError(ParseError),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputError(io_error) => {
                return write!(f, "Input error: {}", io_error);
            }

            Self::TreeParseError(parse_error) => {
                return write!(f, "Tree parse error: {}", parse_error);
            }
        }
    }
}

/// Type conversions for errors.
impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputError(value);
    }
}

impl From<ParseError> for RunError {
    fn from(value: ParseError) -> Self {
        return Self::TreeParseError(value);
    }
}

/// Loads a binary tree from the configured input and returns its node
/// names in breadth-first order as a single space-delimited line.
pub fn run_traversal(config: &TraversalConfig) -> Result<String, RunError> {
    let mut binary_tree = TreeNode::new();

    match &config.input_filepath {
        Some(input_filepath) => {
            let mut input_file = File::open(input_filepath)?;
            binary_tree.load(&mut input_file)?;
        }

        None => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            binary_tree.load(&mut stdin_lock)?;
        }
    }

    let mut output = Vec::new();
    binary_tree.save(&mut output)?;

    return Ok(String::from_utf8_lossy(output.as_slice()).into_owned());
}
