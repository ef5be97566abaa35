//! The binary tree data structure: an owned recursive node with load/save
//! entry points and a breadth-first traversal iterator.

use std::collections::VecDeque;
use std::io::{Read, Write};

use crate::lexical_analysis::{PushbackSource, StreamTokenizer};
use crate::recursive_descent_parsing::{parse_child_node, parse_node_name, ParseError};

// Separator between node names in the serialized breadth-first order.
const OUTPUT_DELIMITER: &str = " ";

/// A binary tree node owning its subtrees. A node starts empty and is
/// populated by `load` in a fixed order: name, then left child, then right
/// child.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct TreeNode {
    node_name: String,
    left_node: Option<Box<TreeNode>>,
    right_node: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Constructs an empty node.
    pub fn new() -> Self {
        return TreeNode::default();
    }

    /// Constructs a node with the given name and children.
    pub fn with_children(name: &str, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        return TreeNode {
            node_name: String::from(name),
            left_node: left.map(Box::new),
            right_node: right.map(Box::new),
        };
    }

    pub fn name(&self) -> &str {
        return self.node_name.as_str();
    }

    pub fn set_name(&mut self, name: String) {
        self.node_name = name;
    }

    pub fn left(&self) -> Option<&TreeNode> {
        return self.left_node.as_deref();
    }

    pub fn set_left(&mut self, node: TreeNode) {
        self.left_node = Some(Box::new(node));
    }

    pub fn right(&self) -> Option<&TreeNode> {
        return self.right_node.as_deref();
    }

    pub fn set_right(&mut self, node: TreeNode) {
        self.right_node = Some(Box::new(node));
    }

    /// Creates the iterator to use for breadth-first tree traversal.
    pub fn breadth_first_iter(&self) -> BreadthFirstIterator<'_> {
        return BreadthFirstIterator::new(self);
    }

    /// Parses the tree description from the given reader into this node
    /// and, transitively, its subtree. Each call wraps the input in its own
    /// pushback source and tokenizer, so a nested child parse runs on a
    /// fresh sub-scope of the same underlying stream.
    pub fn load(&mut self, input: &mut dyn Read) -> Result<(), ParseError> {
        let mut source = PushbackSource::new(input);
        let mut tokenizer = StreamTokenizer::new(&mut source);

        parse_node_name(self, &mut tokenizer)?;
        // Parse the left child, then the right child.
        parse_child_node(self, &mut tokenizer, true)?;
        parse_child_node(self, &mut tokenizer, false)?;
        return Ok(());
    }

    /// Writes the node names of a breadth-first traversal to the given
    /// writer, space separated with no leading or trailing delimiter. The
    /// writer is flushed even when a write fails partway.
    pub fn save(&self, output: &mut dyn Write) -> std::io::Result<()> {
        let write_result = self.write_node_order(output);
        let flush_result = output.flush();
        return write_result.and(flush_result);
    }

    fn write_node_order(&self, output: &mut dyn Write) -> std::io::Result<()> {
        let mut is_first = true;
        for node in self.breadth_first_iter() {
            if !is_first {
                output.write_all(OUTPUT_DELIMITER.as_bytes())?;
            }
            is_first = false;
            output.write_all(node.name().as_bytes())?;
        }

        return Ok(());
    }
}

/// Breadth-first tree traversal iterator: dequeues one node per step and
/// enqueues that node's children, left before right. Finite and free of
/// side effects on the tree; construct a new one per walk.
pub struct BreadthFirstIterator<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> BreadthFirstIterator<'a> {
    fn new(tree: &'a TreeNode) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(tree);
        return BreadthFirstIterator { queue };
    }
}

impl<'a> Iterator for BreadthFirstIterator<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<&'a TreeNode> {
        let node = self.queue.pop_front()?;

        if let Some(left_node) = node.left() {
            self.queue.push_back(left_node);
        }
        if let Some(right_node) = node.right() {
            self.queue.push_back(right_node);
        }

        return Some(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Loads a tree from an in-memory description.
    fn load_tree(input: &str) -> Result<TreeNode, ParseError> {
        let mut reader = input.as_bytes();
        let mut tree = TreeNode::new();
        tree.load(&mut reader)?;
        return Ok(tree);
    }

    // Builds the reference eight-node tree:
    //
    //        root
    //    /         \
    //   L1          R1
    //   / \           \
    // L1L2 L1R2      R1R2
    //   \             /
    //  L1L2R3       R1R2L3
    fn make_reference_tree() -> TreeNode {
        return TreeNode::with_children(
            "root",
            Some(TreeNode::with_children(
                "L1",
                Some(TreeNode::with_children(
                    "L1L2",
                    None,
                    Some(TreeNode::with_children("L1L2R3", None, None)),
                )),
                Some(TreeNode::with_children("L1R2", None, None)),
            )),
            Some(TreeNode::with_children(
                "R1",
                None,
                Some(TreeNode::with_children(
                    "R1R2",
                    Some(TreeNode::with_children("R1R2L3", None, None)),
                    None,
                )),
            )),
        );
    }

    // Test if load builds the full reference tree from a description with
    // scattered whitespace.
    #[test]
    fn test_load() {
        let tree = load_tree(
            "(root,(L1,   (L1L2    ,,(L1L2R3,   ,)),(L1R2,,)),(R1,    ,(R1R2,(R1R2L3,,    ),)))",
        )
        .expect("load returned unexpected parse error");

        assert_eq!(make_reference_tree(), tree);
    }

    // Test if a minimal description yields a root with two leaf children.
    #[test]
    fn test_load_simple() {
        let tree = load_tree("(root,(L1,,),(R1,,))").expect("load returned unexpected parse error");

        assert_eq!("root", tree.name());

        let left_node = tree.left().expect("left child must be present");
        assert_eq!("L1", left_node.name());
        assert!(left_node.left().is_none());
        assert!(left_node.right().is_none());

        let right_node = tree.right().expect("right child must be present");
        assert_eq!("R1", right_node.name());
        assert!(right_node.left().is_none());
        assert!(right_node.right().is_none());
    }

    // Test if a missing identifier is reported with the offending token.
    #[test]
    fn test_load_error_missing_identifier() {
        let parse_error =
            load_tree("(root,(,,),(R1,,))").expect_err("load accepted a missing identifier");

        assert_eq!(
            "Syntax error, expected node identifier, but found: ,",
            format!("{}", parse_error)
        );
    }

    // Test if a missing delimiter between children is reported.
    #[test]
    fn test_load_error_missing_delimiter() {
        let parse_error =
            load_tree("(root,(L1,,)(,(R1,,))").expect_err("load accepted a missing delimiter");

        assert_eq!(
            "Syntax error, expected ',', but found: (",
            format!("{}", parse_error)
        );
    }

    // Test if a node with a missing child slot is reported with both
    // acceptable alternatives.
    #[test]
    fn test_load_error_missing_child_slot() {
        let parse_error =
            load_tree("(root,(L1,),(R1,,))").expect_err("load accepted a missing child slot");

        assert_eq!(
            "Syntax error, expected '(' or ',', but found: )",
            format!("{}", parse_error)
        );
    }

    // Test if an unterminated input fails instead of truncating the tree.
    #[test]
    fn test_load_error_unterminated_input() {
        let parse_error =
            load_tree("(root,(L1,,),").expect_err("load accepted an unterminated input");

        assert_eq!(
            "Syntax error, expected '(' or ')', but found: EndOfStream",
            format!("{}", parse_error)
        );
    }

    // Test if whitespace splitting a name surfaces as a delimiter error on
    // the second fragment.
    #[test]
    fn test_load_error_split_name() {
        let parse_error =
            load_tree("(ro   ot,(1L,,),(1R,,))").expect_err("load accepted a split name");

        assert_eq!(
            "Syntax error, expected ',', but found: ot",
            format!("{}", parse_error)
        );
    }

    // Test if a name starting with a digit is reported with the specific
    // message.
    #[test]
    fn test_load_error_name_starting_with_number() {
        let parse_error =
            load_tree("(root,(1L,,),(1R,,))").expect_err("load accepted a numeric name start");

        assert_eq!(
            "Syntax error, node name can not start with a number: 1L",
            format!("{}", parse_error)
        );
    }

    // Test if save emits the breadth-first node order of the reference
    // tree, space separated.
    #[test]
    fn test_save() {
        let tree = make_reference_tree();

        let mut output = Vec::new();
        tree.save(&mut output).expect("save returned unexpected I/O error");

        assert_eq!(
            "root L1 R1 L1L2 L1R2 R1R2 L1L2R3 R1R2L3",
            String::from_utf8(output).expect("save produced invalid UTF-8")
        );
    }

    // Test if the breadth-first iterator visits every node exactly once,
    // parents before children, left before right.
    #[test]
    fn test_breadth_first_order() {
        let tree = make_reference_tree();

        let visited_names: Vec<&str> = tree.breadth_first_iter().map(TreeNode::name).collect();

        assert_eq!(
            vec!["root", "L1", "R1", "L1L2", "L1R2", "R1R2", "L1L2R3", "R1R2L3"],
            visited_names
        );
    }

    // Test if a fresh iterator restarts the walk from the root.
    #[test]
    fn test_breadth_first_iterator_is_fresh_per_walk() {
        let tree = make_reference_tree();

        let first_walk_len = tree.breadth_first_iter().count();
        let second_walk_len = tree.breadth_first_iter().count();

        assert_eq!(8, first_walk_len);
        assert_eq!(first_walk_len, second_walk_len);
    }

    // Test if a single-node tree saves as just its name.
    #[test]
    fn test_save_single_node() {
        let tree = TreeNode::with_children("root", None, None);

        let mut output = Vec::new();
        tree.save(&mut output).expect("save returned unexpected I/O error");

        assert_eq!(
            "root",
            String::from_utf8(output).expect("save produced invalid UTF-8")
        );
    }

    // Test if load followed by save reproduces the breadth-first order of
    // a parsed description.
    #[test]
    fn test_load_then_save() {
        let tree = load_tree("(root,(L1,,(L1R2,,)),(R1,,))")
            .expect("load returned unexpected parse error");

        let mut output = Vec::new();
        tree.save(&mut output).expect("save returned unexpected I/O error");

        assert_eq!(
            "root L1 R1 L1R2",
            String::from_utf8(output).expect("save produced invalid UTF-8")
        );
    }
}
