//! Tree and flat rendering of a finished trie
//!
//! Both traversals walk an explicit stack and stop at `max_order`.

use crate::config::{Layout, PrintConfig};
use crate::error::Result;
use crate::escape::escape_into;
use crate::io::ByteSink;
use crate::trie::{NodeRef, Trie};

const QUOTE: u8 = b'"';
const INDENT: u8 = b' ';

/// Renders a [`Trie`] according to a [`PrintConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Printer<'c> {
    config: &'c PrintConfig,
}

impl<'c> Printer<'c> {
    /// Create a printer borrowing `config`
    pub fn new(config: &'c PrintConfig) -> Self {
        Self { config }
    }

    /// Write `trie` to `sink` and return the number of lines written
    ///
    /// The sink is flushed on success.
    pub fn print<K: ByteSink + ?Sized>(&self, trie: &Trie, sink: &mut K) -> Result<u64> {
        let lines = match self.config.layout {
            Layout::Tree => self.print_tree(trie, sink)?,
            Layout::Flat => self.print_flat(trie, sink)?,
        };
        sink.flush()?;
        Ok(lines)
    }

    /// Push the children of `node` no deeper than `max_order`, last first
    fn push_children<'t, T>(
        &self,
        node: NodeRef<'t>,
        stack: &mut Vec<T>,
        wrap: impl Fn(NodeRef<'t>) -> T,
    ) -> Result<()> {
        if node.depth() >= self.config.max_order {
            return Ok(());
        }
        let children = node.children();
        stack.try_reserve(children.len())?;
        stack.extend(children.rev().map(wrap));
        Ok(())
    }

    /// Pre-order: indentation, token, optional count, then children
    fn print_tree<K: ByteSink + ?Sized>(&self, trie: &Trie, sink: &mut K) -> Result<u64> {
        let mut lines = 0;
        let mut stack = Vec::new();
        self.push_children(trie.root(), &mut stack, |child| child)?;

        while let Some(node) = stack.pop() {
            let depth = node.depth();
            for _ in 0..depth {
                sink.put_byte(INDENT)?;
            }
            self.put_token(node.value(), sink)?;
            if depth >= self.config.min_order {
                sink.put_byte(self.config.separator)?;
                sink.put_bytes(node.count().to_string().as_bytes())?;
            }
            sink.put_byte(b'\n')?;
            lines += 1;
            self.push_children(node, &mut stack, |child| child)?;
        }
        Ok(lines)
    }

    /// Post-order: children first, then this node's `count path` line
    fn print_flat<K: ByteSink + ?Sized>(&self, trie: &Trie, sink: &mut K) -> Result<u64> {
        let mut lines = 0;
        // (node, children already queued)
        let mut stack = Vec::new();
        self.push_children(trie.root(), &mut stack, |child| (child, false))?;

        while let Some((node, expanded)) = stack.pop() {
            if !expanded {
                stack.try_reserve(1)?;
                stack.push((node, true));
                self.push_children(node, &mut stack, |child| (child, false))?;
                continue;
            }
            if node.depth() < self.config.min_order || node.count() == 0 {
                continue;
            }
            self.put_line(node, sink)?;
            lines += 1;
        }
        Ok(lines)
    }

    fn put_line<K: ByteSink + ?Sized>(&self, node: NodeRef<'_>, sink: &mut K) -> Result<()> {
        sink.put_bytes(node.count().to_string().as_bytes())?;
        sink.put_byte(self.config.separator)?;
        let path = node.path();
        debug_assert_eq!(path.len(), node.depth());
        if self.config.merge {
            sink.put_byte(QUOTE)?;
            for token in &path {
                escape_into(token, sink)?;
            }
            sink.put_byte(QUOTE)?;
        } else {
            for (i, token) in path.iter().enumerate() {
                if i > 0 {
                    sink.put_byte(self.config.separator)?;
                }
                self.put_token(token, sink)?;
            }
        }
        sink.put_byte(b'\n')
    }

    /// Escaped token, quoted unless merging
    fn put_token<K: ByteSink + ?Sized>(&self, token: &[u8], sink: &mut K) -> Result<()> {
        if self.config.merge {
            return escape_into(token, sink);
        }
        sink.put_byte(QUOTE)?;
        escape_into(token, sink)?;
        sink.put_byte(QUOTE)
    }
}

/// Print `trie` with `config` into `sink`
pub fn print<K: ByteSink + ?Sized>(trie: &Trie, config: &PrintConfig, sink: &mut K) -> Result<u64> {
    Printer::new(config).print(trie, sink)
}
