use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use text_size::TextSize;

use crate::element::{Body, Element};
use crate::kind::Arity;

/// Arena handle for an [`Element`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ElementId(u32);

impl ElementId {
    /// Links of an element that has not been allocated yet.
    pub(crate) const PLACEHOLDER: Self = Self(u32::MAX);

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Arena of elements plus the navigation state between them.
///
/// All relations (`next`, `previous`, `parent`) are handles into the arena.
/// A handle that points at its own element is the sentinel state: the stream
/// start has `previous == self`, the stream end has `next == self`, and the
/// document root has `parent == self`. Nothing is nullable.
#[derive(Debug, Default)]
pub struct Tree {
    elements: Vec<Element>,
    propagate_ranges: bool,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Allocates `element` and returns its handle. A fresh element is a full
    /// self-loop: its own start, end, and root until linked otherwise.
    pub fn alloc(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        element.next = id;
        element.previous = id;
        element.parent = id;
        self.elements.push(element);
        id
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len() as u32).map(ElementId)
    }

    pub fn next(&self, id: ElementId) -> ElementId {
        self[id].next
    }

    pub fn previous(&self, id: ElementId) -> ElementId {
        self[id].previous
    }

    pub fn parent(&self, id: ElementId) -> ElementId {
        self[id].parent
    }

    pub fn is_root(&self, id: ElementId) -> bool {
        self[id].parent == id
    }

    pub fn is_start(&self, id: ElementId) -> bool {
        self[id].previous == id
    }

    pub fn is_end(&self, id: ElementId) -> bool {
        self[id].next == id
    }

    pub fn is_leaf(&self, id: ElementId) -> bool {
        self[id].kind.arity() == Arity::Leaf
    }

    pub fn is_twig(&self, id: ElementId) -> bool {
        self[id].kind.arity() == Arity::Branch
    }

    pub fn is_semantic(&self, id: ElementId) -> bool {
        self[id].is_semantic()
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self[id].children()
    }

    pub fn set_parent(&mut self, child: ElementId, parent: ElementId) {
        self[child].parent = parent;
    }

    /// Links `a -> b` in the sibling chain (both directions).
    pub fn link(&mut self, a: ElementId, b: ElementId) {
        self[a].next = b;
        self[b].previous = a;
    }

    pub fn make_start(&mut self, id: ElementId) {
        self[id].previous = id;
    }

    pub fn make_end(&mut self, id: ElementId) {
        self[id].next = id;
    }

    /// Inserts `child` into a branch's child list at `index`.
    ///
    /// Panics if `parent` is a pure leaf.
    pub fn insert_child(&mut self, parent: ElementId, index: usize, child: ElementId) {
        self[child].parent = parent;
        match &mut self[parent].body {
            Body::Branch { children } | Body::Dual { children, .. } => {
                children.insert(index, child);
            }
            Body::Leaf { .. } => panic!("cannot insert a child into a leaf"),
        }
    }

    /// When active, `remove`/`insert_before`/`insert_after` shift every
    /// element downstream of the edit point so `a.to == b.from` keeps
    /// holding across the chain. O(n) by design; editing is not a
    /// construction-path operation.
    pub fn set_range_propagation(&mut self, active: bool) {
        self.propagate_ranges = active;
    }

    /// Splices `id` out of the sibling chain. Afterwards `id` is a
    /// self-contained single-element loop.
    pub fn remove(&mut self, id: ElementId) {
        let prev = self.previous(id);
        let next = self.next(id);
        let span = self[id].range.len();

        match (prev != id, next != id) {
            (true, true) => self.link(prev, next),
            (true, false) => self.make_end(prev),
            (false, true) => self.make_start(next),
            (false, false) => {}
        }

        if self.propagate_ranges && next != id {
            self.shift_from(next, span, Direction::Left);
        }

        self[id].next = id;
        self[id].previous = id;
    }

    /// Splices `node` into the chain directly after `at`.
    pub fn insert_after(&mut self, at: ElementId, node: ElementId) {
        let next = self.next(at);
        self.link(at, node);
        if next == at {
            self.make_end(node);
        } else {
            self.link(node, next);
            if self.propagate_ranges {
                self.shift_from(next, self[node].range.len(), Direction::Right);
            }
        }
    }

    /// Splices `node` into the chain directly before `at`. Under range
    /// propagation the anchor and everything after it shift right by the
    /// inserted span; the caller positions `node` itself.
    pub fn insert_before(&mut self, at: ElementId, node: ElementId) {
        let prev = self.previous(at);
        self.link(node, at);
        if prev == at {
            self.make_start(node);
        } else {
            self.link(prev, node);
        }
        if self.propagate_ranges {
            self.shift_from(at, self[node].range.len(), Direction::Right);
        }
    }

    fn shift_from(&mut self, start: ElementId, by: TextSize, direction: Direction) {
        let mut cur = start;
        loop {
            match direction {
                Direction::Right => self[cur].range += by,
                Direction::Left => self[cur].range -= by,
            }
            let next = self.next(cur);
            if next == cur {
                break;
            }
            cur = next;
        }
    }

    /// Walks the `next` chain starting at `start` (inclusive).
    pub fn iter_from(&self, start: ElementId) -> LinearIter<'_> {
        LinearIter { tree: self, cur: Some(start) }
    }

    /// First element of the linear projection under `root`: the leftmost
    /// descendant that carries content. Empty branches are transparent.
    pub fn first_leaf(&self, root: ElementId) -> Option<ElementId> {
        match &self[root].body {
            Body::Leaf { .. } | Body::Dual { .. } => Some(root),
            Body::Branch { children } => {
                children.iter().find_map(|&child| self.first_leaf(child))
            }
        }
    }

    /// Concatenated content of the chain starting at `start`. With the
    /// no-gap invariant in force this reproduces the original source.
    pub fn linear_text(&self, start: ElementId) -> String {
        let mut text = String::new();
        for id in self.iter_from(start) {
            if let Some(content) = self[id].content() {
                text.push_str(content);
            }
        }
        text
    }

    /// Indented tree dump for tests and diagnostics.
    pub fn debug_dump(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, id: ElementId, depth: usize, out: &mut String) {
        let element = &self[id];
        for _ in 0..depth {
            out.push_str("  ");
        }
        let _ = write!(out, "{:?} @ {:?}", element.kind, element.range);
        if let Some(content) = element.content() {
            let _ = write!(out, " {content:?}");
        }
        out.push('\n');
        for &child in element.children() {
            self.dump_into(child, depth + 1, out);
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Left,
    Right,
}

impl Index<ElementId> for Tree {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        &self.elements[id.0 as usize]
    }
}

impl IndexMut<ElementId> for Tree {
    fn index_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0 as usize]
    }
}

/// Iterator over the doubly-linked sibling chain, terminating at the
/// self-loop sentinel.
pub struct LinearIter<'t> {
    tree: &'t Tree,
    cur: Option<ElementId>,
}

impl Iterator for LinearIter<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let cur = self.cur?;
        let next = self.tree.next(cur);
        self.cur = if next == cur { None } else { Some(next) };
        Some(cur)
    }
}
