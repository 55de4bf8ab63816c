//! Sorted multiway trie of token sequences
//!
//! Every path from the root spells an n-gram and each node counts how many
//! inserted windows passed through it. Nodes live in an arena owned by the
//! [`Trie`]; children are stored as indices sorted by token bytes and parent
//! links are plain indices.

use crate::error::Result;
use crate::tokenizer::Token;
use std::fmt;

/// Index of a node inside its trie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone)]
struct Node {
    value: Token,
    count: u64,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    depth: usize,
}

/// N-gram frequency trie
#[derive(Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    insertions: u64,
}

impl Trie {
    /// The root is always the first arena slot
    pub const ROOT: NodeId = NodeId(0);

    /// A trie holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                value: Token::empty(),
                count: 0,
                children: Vec::new(),
                parent: None,
                depth: 0,
            }],
            insertions: 0,
        }
    }

    /// Count one occurrence of every prefix of `path`
    ///
    /// Missing nodes are created in sorted position. Storage is reserved
    /// before each node is linked, so on `AllocationFailure` the trie holds
    /// only complete, reachable nodes. An empty path is a no-op.
    pub fn insert<I>(&mut self, path: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut current = Self::ROOT;
        let mut touched = false;
        for segment in path {
            let bytes = segment.as_ref();
            current = match self.search(current, bytes) {
                Ok(pos) => self.nodes[current.0].children[pos],
                Err(pos) => self.attach(current, pos, bytes)?,
            };
            self.nodes[current.0].count += 1;
            touched = true;
        }
        if touched {
            self.insertions += 1;
        }
        Ok(())
    }

    /// Binary search `parent`'s children for `bytes`
    fn search(&self, parent: NodeId, bytes: &[u8]) -> std::result::Result<usize, usize> {
        self.nodes[parent.0]
            .children
            .binary_search_by(|child| self.nodes[child.0].value.as_bytes().cmp(bytes))
    }

    fn attach(&mut self, parent: NodeId, pos: usize, bytes: &[u8]) -> Result<NodeId> {
        let value = Token::new(bytes)?;
        self.nodes.try_reserve(1)?;
        self.nodes[parent.0].children.try_reserve(1)?;

        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(Node {
            value,
            count: 0,
            children: Vec::new(),
            parent: Some(parent),
            depth,
        });
        self.nodes[parent.0].children.insert(pos, id);
        Ok(id)
    }

    /// View of the root node
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            trie: self,
            id: Self::ROOT,
        }
    }

    /// Node reached by following `path` from the root
    pub fn find<I>(&self, path: I) -> Option<NodeRef<'_>>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut current = Self::ROOT;
        for segment in path {
            let pos = self.search(current, segment.as_ref()).ok()?;
            current = self.nodes[current.0].children[pos];
        }
        Some(NodeRef {
            trie: self,
            id: current,
        })
    }

    /// Occurrences of `path`; zero when absent or empty
    pub fn count<I>(&self, path: I) -> u64
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.find(path).map_or(0, |node| node.count())
    }

    /// Number of n-gram nodes (the root excluded)
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Non-empty paths inserted so far
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Depth of the deepest node
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.len())
            .field("insertions", &self.insertions)
            .field("max_depth", &self.max_depth())
            .finish()
    }
}

/// Borrowed view of one trie node
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    trie: &'a Trie,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.trie.nodes[self.id.0]
    }

    /// Arena index
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Token bytes; empty for the root
    pub fn value(&self) -> &'a [u8] {
        self.node().value.as_bytes()
    }

    /// Times an inserted path passed through this node
    pub fn count(&self) -> u64 {
        self.node().count
    }

    /// Distance from the root, which sits at depth 0
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// Whether this is the synthetic root
    pub fn is_root(&self) -> bool {
        self.id == Trie::ROOT
    }

    /// Parent node; `None` for the root
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            trie: self.trie,
            id,
        })
    }

    /// Children in ascending byte order
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let trie = self.trie;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { trie, id })
    }

    /// Child holding exactly `bytes`
    pub fn child(&self, bytes: &[u8]) -> Option<NodeRef<'a>> {
        let pos = self.trie.search(self.id, bytes).ok()?;
        Some(NodeRef {
            trie: self.trie,
            id: self.node().children[pos],
        })
    }

    /// Tokens from the root down to this node, root excluded
    ///
    /// Always yields exactly `depth()` tokens.
    pub fn path(&self) -> Vec<&'a [u8]> {
        let mut path = Vec::with_capacity(self.depth());
        let mut current = Some(*self);
        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            path.push(node.value());
            current = node.parent();
        }
        path.reverse();
        path
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.value().escape_ascii().to_string())
            .field("count", &self.count())
            .field("depth", &self.depth())
            .finish()
    }
}
