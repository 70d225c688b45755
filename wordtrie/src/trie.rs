use smallvec::{smallvec, SmallVec};

/// Number of branches per node, one for each of `a`..=`z`.
pub const ALPHABET_SIZE: usize = 26;

/// Maps a byte to its child slot. Anything outside `a`..=`z` has no slot,
/// which is what stops a walk on malformed input.
fn letter_index(b: u8) -> Option<usize> {
    if b.is_ascii_lowercase() {
        Some((b - b'a') as usize)
    } else {
        None
    }
}

fn index_letter(i: usize) -> char {
    (b'a' + i as u8) as char
}

#[derive(Clone, Debug, Default)]
pub struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    terminal: bool,
}

impl TrieNode {
    /// Returns true if the path from the root to this node spells a word.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns the existing children in a..z order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| Some((index_letter(i), child.as_deref()?)))
    }

    fn child_count(&self) -> usize {
        self.children.iter().filter(|child| child.is_some()).count()
    }

    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// A 26-way prefix tree over lowercase ASCII words.
///
/// Input is expected to be normalized already (see [`crate::normalize`]).
/// A character outside `a`..=`z` is not an error: lookups treat it as
/// "not found" and [`Trie::insert`] stops at it.
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, the root included.
    pub fn node_count(&self) -> usize {
        let mut stack: SmallVec<[&TrieNode; 32]> = smallvec![&self.root];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().map(|(_, child)| child));
        }
        count
    }

    /// Stores `word`, creating nodes along the way.
    ///
    /// The walk stops at the first character outside `a`..=`z`. Nodes
    /// created before that point stay in the tree but nothing is marked
    /// as a word. Returns whether `word` is stored after the call.
    /// Inserting an already stored word changes nothing.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut ptr = &mut self.root;
        for &b in word.as_bytes() {
            let i = match letter_index(b) {
                Some(i) => i,
                None => return false,
            };
            ptr = &mut **ptr.children[i].get_or_insert_with(Box::default);
        }
        if !ptr.terminal {
            ptr.terminal = true;
            self.len += 1;
        }
        true
    }

    /// Returns true if `word` was inserted and not deleted since.
    pub fn contains_word(&self, word: &str) -> bool {
        !word.is_empty() && self.walk(word.as_bytes()).map_or(false, TrieNode::is_terminal)
    }

    /// Returns a handle on the node that `prefix` leads to, or None if no
    /// stored path spells `prefix`. The empty prefix yields the root.
    pub fn find_prefix(&self, prefix: &str) -> Option<Subtree<'_>> {
        let node = self.walk(prefix.as_bytes())?;
        Some(Subtree {
            node,
            prefix: prefix.to_string(),
        })
    }

    /// All stored words in lexicographic order.
    pub fn words(&self) -> Words<'_> {
        Words::new(&self.root, "")
    }

    pub fn extremal_words(&self) -> Extremes {
        Extremes::from_words(self.words())
    }

    /// Removes `word` and frees the nodes that only existed for it.
    ///
    /// Pruning stops at the first ancestor that is itself a word or that
    /// still leads to another word. Returns false, leaving the tree
    /// untouched, if `word` is not stored.
    pub fn delete(&mut self, word: &str) -> bool {
        let path = word.as_bytes();
        let (cut, keep_node) = match self.prune_point(path) {
            Some(point) => point,
            None => return false,
        };
        if keep_node {
            if let Some(node) = self.walk_mut(path) {
                node.terminal = false;
            }
        } else if let Some(node) = self.walk_mut(&path[..cut]) {
            if let Some(i) = letter_index(path[cut]) {
                node.children[i] = None;
            }
        }
        self.len -= 1;
        true
    }

    /// For a stored word, finds the depth of the deepest node on its path
    /// that must survive deletion. The edge below that node is where the
    /// dead chain gets cut. The second value is true when the word's own
    /// node has children, in which case only its mark is cleared.
    fn prune_point(&self, path: &[u8]) -> Option<(usize, bool)> {
        if path.is_empty() {
            return None;
        }
        let mut cut = 0;
        let mut ptr = &self.root;
        for (depth, &b) in path.iter().enumerate() {
            if ptr.terminal || ptr.child_count() > 1 {
                cut = depth;
            }
            ptr = ptr.children[letter_index(b)?].as_deref()?;
        }
        if !ptr.terminal {
            return None;
        }
        Some((cut, ptr.has_children()))
    }

    fn walk(&self, path: &[u8]) -> Option<&TrieNode> {
        let mut ptr = &self.root;
        for &b in path {
            ptr = ptr.children[letter_index(b)?].as_deref()?;
        }
        Some(ptr)
    }

    fn walk_mut(&mut self, path: &[u8]) -> Option<&mut TrieNode> {
        let mut ptr = &mut self.root;
        for &b in path {
            ptr = ptr.children[letter_index(b)?].as_deref_mut()?;
        }
        Some(ptr)
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

/// A node found by [`Trie::find_prefix`], together with the prefix that
/// leads to it. It borrows the trie, so it can't be kept across a delete.
#[derive(Clone, Debug)]
pub struct Subtree<'a> {
    node: &'a TrieNode,
    prefix: String,
}

impl<'a> Subtree<'a> {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn node(&self) -> &'a TrieNode {
        self.node
    }

    /// Every word below this node, each starting with the prefix.
    /// Each call starts a fresh traversal.
    pub fn words(&self) -> Words<'a> {
        Words::new(self.node, &self.prefix)
    }

    pub fn extremal_words(&self) -> Extremes {
        Extremes::from_words(self.words())
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame<'a> {
    node: &'a TrieNode,
    next_child: usize,
    visited: bool,
}

/// Lazy depth-first walk yielding words in a..z order.
///
/// Uses its own stack, so deep words don't grow the call stack.
#[derive(Clone, Debug)]
pub struct Words<'a> {
    stack: SmallVec<[Frame<'a>; 16]>,
    word: String,
}

impl<'a> Words<'a> {
    fn new(node: &'a TrieNode, prefix: &str) -> Self {
        Words {
            stack: smallvec![Frame {
                node,
                next_child: 0,
                visited: false,
            }],
            word: prefix.to_string(),
        }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let frame = self.stack.last_mut()?;
            if !frame.visited {
                frame.visited = true;
                if frame.node.terminal {
                    return Some(self.word.clone());
                }
            }

            let node = frame.node;
            let mut descend = None;
            while frame.next_child < ALPHABET_SIZE {
                let i = frame.next_child;
                frame.next_child += 1;
                if let Some(child) = node.children[i].as_deref() {
                    descend = Some((i, child));
                    break;
                }
            }

            match descend {
                Some((i, child)) => {
                    self.word.push(index_letter(i));
                    self.stack.push(Frame {
                        node: child,
                        next_child: 0,
                        visited: false,
                    });
                }
                None => {
                    self.stack.pop();
                    // The bottom frame's letters belong to the prefix.
                    if !self.stack.is_empty() {
                        self.word.pop();
                    }
                }
            }
        }
    }
}

/// The shortest and the longest words of a subtree. Ties are all kept,
/// in a..z order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extremes {
    pub shortest: Vec<String>,
    pub longest: Vec<String>,
}

impl Extremes {
    fn from_words(words: impl Iterator<Item = String>) -> Self {
        let mut extremes = Extremes::default();
        for word in words {
            let len = word.len();
            match extremes.shortest.first().map(String::len) {
                Some(min) if len > min => (),
                Some(min) if len == min => extremes.shortest.push(word.clone()),
                _ => extremes.shortest = vec![word.clone()],
            }
            match extremes.longest.first().map(String::len) {
                Some(max) if len < max => (),
                Some(max) if len == max => extremes.longest.push(word),
                _ => extremes.longest = vec![word],
            }
        }
        extremes
    }

    pub fn is_empty(&self) -> bool {
        self.shortest.is_empty()
    }
}
