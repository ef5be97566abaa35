//! Recursive descent parser for the tree description grammar
//! `node ::= "(" identifier "," child "," child ")"`, constructing tree
//! nodes incrementally while validating the token stream.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::lexical_analysis::{StreamTokenizer, Token};
use crate::tree::TreeNode;

// Pattern every node name must match: a letter first, letters and digits
// after.
lazy_static! {
    static ref node_name_pattern: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("Unable to compile node name regex.");
}

/// Represents a parsing error.
#[derive(Debug)]
pub enum ParseError {
    UnexpectedToken { expected: Token, found: Token },
    UnexpectedChildToken { expected: Token, found: Token },
    ExpectedIdentifier { found: Token },
    NameStartsWithNumber { name: String },
    NameNotAlphanumeric { name: String },
    Io(std::io::Error),
}

/// Display trait implementation for ParseError.
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                return write!(f, "Syntax error, expected '{}', but found: {}", expected, found);
            }

            Self::UnexpectedChildToken { expected, found } => {
                return write!(
                    f,
                    "Syntax error, expected '(' or '{}', but found: {}",
                    expected, found
                );
            }

            Self::ExpectedIdentifier { found } => {
                return write!(
                    f,
                    "Syntax error, expected node identifier, but found: {}",
                    found
                );
            }

            Self::NameStartsWithNumber { name } => {
                return write!(
                    f,
                    "Syntax error, node name can not start with a number: {}",
                    name
                );
            }

            Self::NameNotAlphanumeric { name } => {
                return write!(
                    f,
                    "Syntax error, node name must consist of english letters and numbers: {}",
                    name
                );
            }

            Self::Io(io_error) => {
                return write!(f, "I/O error while parsing: {}", io_error);
            }
        }
    }
}

/// Type conversion so tokenizer I/O failures propagate through `?`.
impl From<std::io::Error> for ParseError {
    fn from(value: std::io::Error) -> Self {
        return Self::Io(value);
    }
}

/// Parses and validates the identifier of the given node: expects '(' then
/// a word matching the node name pattern then ','.
pub fn parse_node_name(
    current_node: &mut TreeNode,
    tokenizer: &mut StreamTokenizer<'_, '_>,
) -> Result<(), ParseError> {
    // First token must be '('.
    check_next_token(tokenizer, Token::LeftParen)?;

    let name = match tokenizer.next_token()? {
        Token::Word(name) => name,
        found => return Err(ParseError::ExpectedIdentifier { found }),
    };

    if !node_name_pattern.is_match(name.as_str()) {
        if name.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Err(ParseError::NameStartsWithNumber { name });
        }
        return Err(ParseError::NameNotAlphanumeric { name });
    }

    current_node.set_name(name);

    // Next token must be a comma.
    return check_next_token(tokenizer, Token::Comma);
}

/// Parses one child slot of the given parent node. A '(' starts a nested
/// node: the character is pushed back onto the source so the child's own
/// load sees the opening parenthesis again. The expected trailing delimiter
/// by itself (',' for the first child, ')' for the second) means the child
/// slot is empty.
pub fn parse_child_node(
    parent_node: &mut TreeNode,
    tokenizer: &mut StreamTokenizer<'_, '_>,
    is_first_child: bool,
) -> Result<(), ParseError> {
    let expected_after_child = if is_first_child {
        Token::Comma
    } else {
        Token::RightParen
    };

    let token = tokenizer.next_token()?;
    if token == Token::LeftParen {
        // The source will start with '(' again when the child reads it.
        tokenizer.source_mut().unread('(');

        let mut child_node = TreeNode::new();
        child_node.load(tokenizer.source_mut())?;

        if is_first_child {
            parent_node.set_left(child_node);
        } else {
            parent_node.set_right(child_node);
        }

        // Next token must be a comma after the first child or a right
        // parenthesis after the second.
        return check_next_token(tokenizer, expected_after_child);
    }

    if token == expected_after_child {
        // Empty child slot, nothing to attach.
        return Ok(());
    }

    return Err(ParseError::UnexpectedChildToken {
        expected: expected_after_child,
        found: token,
    });
}

/// Checks that the next token in the stream matches the expected token.
pub fn check_next_token(
    tokenizer: &mut StreamTokenizer<'_, '_>,
    expected_token: Token,
) -> Result<(), ParseError> {
    let found_token = tokenizer.next_token()?;
    if found_token != expected_token {
        return Err(ParseError::UnexpectedToken {
            expected: expected_token,
            found: found_token,
        });
    }

    return Ok(());
}
