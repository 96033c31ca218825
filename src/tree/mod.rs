//! tree
//!
//! Positionally addressed tree of nodes.
//!
//! # Overview
//!
//! Configuration blobs are stored as nested brace lists such as
//! `{1,{"S",10,0},cf4abea7-37b2-11d4-940f-008048da11f9}`. Nothing in the
//! format is named: a value is reached by its path of child indices from the
//! root. This module holds the parsed [`Node`] tree and a [`Cursor`], a
//! borrowed view that remembers its absolute path so every failure names
//! the offset that broke.
//!
//! # Modules
//!
//! - [`parser`] - Text to [`Node`] parsing
//!
//! # Example
//!
//! ```
//! use cfgmeta::tree::Node;
//!
//! let tree = Node::parse(r#"{1,{"S",10,0}}"#).unwrap();
//! let root = tree.cursor();
//! assert_eq!(root.at(&[0]).unwrap().as_int().unwrap(), 1);
//! assert_eq!(root.at(&[1, 0]).unwrap().as_str().unwrap(), "S");
//! assert!(root.at(&[1, 5]).is_err());
//! ```

pub mod parser;

use thiserror::Error;

use crate::core::types::NodePath;

pub use parser::ParseError;

/// Errors from tree access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A path index did not resolve to a node.
    #[error("no node at {path}")]
    NoSuchNode { path: NodePath },

    /// The node exists but holds a different kind of value.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: NodePath,
        expected: &'static str,
        found: String,
    },
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Brace-delimited list of child nodes.
    List(Vec<Node>),
    /// Double-quoted string, unescaped.
    Str(String),
    /// Bare token: numbers, identifiers, GUIDs.
    Atom(String),
}

impl Node {
    /// Parse bracket text into a tree.
    pub fn parse(text: &str) -> Result<Node, ParseError> {
        parser::parse(text)
    }

    /// Borrow this node as the root of a cursor.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            node: self,
            path: NodePath::root(),
        }
    }

    /// Number of children (0 for scalars).
    pub fn child_count(&self) -> usize {
        match self {
            Node::List(children) => children.len(),
            _ => 0,
        }
    }

    /// Place `value` at `path`, creating intermediate lists as needed.
    ///
    /// Missing siblings are padded with `0` atoms and scalars on the way
    /// are replaced by lists. Used to assemble trees in layout order.
    pub fn insert(&mut self, path: &[usize], value: Node) {
        let Some((&index, rest)) = path.split_first() else {
            *self = value;
            return;
        };
        if !matches!(self, Node::List(_)) {
            *self = Node::List(Vec::new());
        }
        if let Node::List(children) = self {
            if children.len() <= index {
                children.resize(index + 1, Node::Atom("0".into()));
            }
            children[index].insert(rest, value);
        }
    }

    fn describe(&self) -> String {
        match self {
            Node::List(children) => format!("list of {}", children.len()),
            Node::Str(s) => format!("string {:?}", s),
            Node::Atom(a) => format!("atom {}", a),
        }
    }
}

/// Writes the bracket text form; parsing it yields an equal tree.
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::List(children) => {
                f.write_str("{")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", child)?;
                }
                f.write_str("}")
            }
            Node::Str(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Node::Atom(a) => f.write_str(a),
        }
    }
}

/// Borrowed view of a node together with its absolute path.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    node: &'a Node,
    path: NodePath,
}

impl<'a> Cursor<'a> {
    /// The underlying node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Absolute path of this node from the tree root.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Descend by a sequence of child indices.
    ///
    /// # Errors
    ///
    /// `TreeError::NoSuchNode` naming the absolute path of the first index
    /// that does not resolve.
    pub fn at(&self, indices: &[usize]) -> Result<Cursor<'a>, TreeError> {
        let mut node = self.node;
        for (depth, &index) in indices.iter().enumerate() {
            node = match node {
                Node::List(children) => children.get(index),
                _ => None,
            }
            .ok_or_else(|| TreeError::NoSuchNode {
                path: self.path.join(&indices[..=depth]),
            })?;
        }
        Ok(Cursor {
            node,
            path: self.path.join(indices),
        })
    }

    /// Number of children (0 for scalars).
    pub fn child_count(&self) -> usize {
        self.node.child_count()
    }

    /// Iterate over direct children.
    pub fn children(&self) -> impl Iterator<Item = Cursor<'a>> + '_ {
        let children: &'a [Node] = match self.node {
            Node::List(children) => children,
            _ => &[],
        };
        children.iter().enumerate().map(move |(i, node)| Cursor {
            node,
            path: self.path.join(&[i]),
        })
    }

    /// Text of a string or atom.
    pub fn as_str(&self) -> Result<&'a str, TreeError> {
        match self.node {
            Node::Str(s) | Node::Atom(s) => Ok(s.as_str()),
            other => Err(self.mismatch("scalar", other)),
        }
    }

    /// Integer value of an atom.
    pub fn as_int(&self) -> Result<i64, TreeError> {
        match self.node {
            Node::Atom(a) => a.parse().map_err(|_| self.mismatch("integer", self.node)),
            other => Err(self.mismatch("integer", other)),
        }
    }

    /// Integer value of an atom that must be non-negative (counts, lengths).
    pub fn as_count(&self) -> Result<usize, TreeError> {
        let value = self.as_int()?;
        usize::try_from(value).map_err(|_| self.mismatch("non-negative integer", self.node))
    }

    fn mismatch(&self, expected: &'static str, found: &Node) -> TreeError {
        TreeError::TypeMismatch {
            path: self.path.clone(),
            expected,
            found: found.describe(),
        }
    }
}
