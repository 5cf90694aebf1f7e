//! Trie data structure for prefix lookup.
//!
//! Children are kept in byte order, so prefix iteration yields keys sorted
//! lexicographically without a separate sort pass.

use std::collections::BTreeMap;

/// A trie (prefix tree) keyed by strings.
///
/// # Complexity
///
/// - `insert`: O(k) where k = key length
/// - `remove`: O(k), empty branches are pruned
/// - `prefix_iter`: O(k + m) where m = size of the matching subtree
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("help", 0);
/// trie.insert("heal", 1);
/// trie.insert("quit", 2);
///
/// let he: Vec<_> = trie.prefix_iter("he").map(|(k, _)| k).collect();
/// assert_eq!(he, vec!["heal", "help"]);
/// ```
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: TrieNode<V>,
    len: usize,
}

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: BTreeMap<u8, TrieNode<V>>,
    /// Full key and value, present when a key ends at this node.
    entry: Option<(Box<str>, V)>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            entry: None,
        }
    }
}

impl<V> TrieNode<V> {
    fn is_dead(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            len: 0,
        }
    }

    /// Get the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key-value pair.
    ///
    /// Returns the previous value if the key already existed.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;

        for &byte in key.as_bytes() {
            node = node.children.entry(byte).or_default();
        }

        let old = node.entry.replace((key.into(), value)).map(|(_, v)| v);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Remove a key from the trie.
    ///
    /// Returns the removed value if it existed.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = Self::remove_at(&mut self.root, key.as_bytes());
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_at(node: &mut TrieNode<V>, rest: &[u8]) -> Option<V> {
        let Some((&byte, tail)) = rest.split_first() else {
            return node.entry.take().map(|(_, v)| v);
        };

        let child = node.children.get_mut(&byte)?;
        let removed = Self::remove_at(child, tail);
        if child.is_dead() {
            node.children.remove(&byte);
        }
        removed
    }

    /// Iterate over all key-value pairs with the given prefix, in key order.
    ///
    /// The prefix itself is not required to be a key in the trie.
    pub fn prefix_iter(&self, prefix: &str) -> PrefixIter<'_, V> {
        PrefixIter {
            stack: self.find(prefix).into_iter().collect(),
        }
    }

    /// Iterate over all keys with the given prefix, in key order.
    pub fn prefix_keys(&self, prefix: &str) -> impl Iterator<Item = &str> {
        self.prefix_iter(prefix).map(|(k, _)| k)
    }

    fn find(&self, key: &str) -> Option<&TrieNode<V>> {
        let mut node = &self.root;
        for byte in key.as_bytes() {
            node = node.children.get(byte)?;
        }
        Some(node)
    }
}

/// Depth-first iterator over entries sharing a prefix.
pub struct PrefixIter<'a, V> {
    stack: Vec<&'a TrieNode<V>>,
}

impl<'a, V> Iterator for PrefixIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Reverse push so the smallest byte is visited first
            self.stack.extend(node.children.values().rev());

            if let Some((key, value)) = &node.entry {
                return Some((key, value));
            }
        }

        None
    }
}
