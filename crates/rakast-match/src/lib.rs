//! The opaque match object handed over by the grammar engine.
//!
//! A [`Match`] carries a source range into the full original text, a hash of
//! named sub-captures, and a list of repeated captures. The factory never
//! stores matches in the tree it builds; it copies offsets and slices out of
//! them and drops them.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

/// A named sub-capture. The grammar distinguishes a capture that matched
/// content from one that is present but empty; an absent capture is simply
/// missing from the hash. The distinction is load-bearing for shape tests.
#[derive(Clone, Debug)]
pub enum Capture {
    Filled(Match),
    Empty,
}

/// One successful parse of a grammar production.
#[derive(Clone, Debug)]
pub struct Match {
    orig: Arc<str>,
    range: TextRange,
    hash: FxHashMap<Box<str>, Capture>,
    list: Vec<Match>,
}

impl Match {
    pub fn new(orig: Arc<str>, from: u32, to: u32) -> Self {
        let range = TextRange::new(from.into(), to.into());
        assert!(usize::from(range.end()) <= orig.len(), "match range outside original text");
        Self { orig, range, hash: FxHashMap::default(), list: Vec::new() }
    }

    /// Adds a named sub-capture with content.
    pub fn with(mut self, key: &str, child: Match) -> Self {
        self.hash.insert(key.into(), Capture::Filled(child));
        self
    }

    /// Adds a named sub-capture that is present but empty.
    pub fn with_empty(mut self, key: &str) -> Self {
        self.hash.insert(key.into(), Capture::Empty);
        self
    }

    /// Appends to the positional capture list.
    pub fn push(mut self, child: Match) -> Self {
        self.list.push(child);
        self
    }

    pub fn from(&self) -> TextSize {
        self.range.start()
    }

    pub fn to(&self) -> TextSize {
        self.range.end()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// The full original source text.
    pub fn orig(&self) -> &Arc<str> {
        &self.orig
    }

    /// The matched substring, always the exact `orig[from..to]` slice.
    pub fn text(&self) -> &str {
        let range: std::ops::Range<usize> = self.range.into();
        &self.orig[range]
    }

    /// The named capture under `key`, if present with content.
    pub fn capture(&self, key: &str) -> Option<&Match> {
        match self.hash.get(key) {
            Some(Capture::Filled(m)) => Some(m),
            _ => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        matches!(self.hash.get(key), Some(Capture::Filled(_)))
    }

    pub fn has_empty(&self, key: &str) -> bool {
        matches!(self.hash.get(key), Some(Capture::Empty))
    }

    pub fn filled_keys(&self) -> impl Iterator<Item = &str> {
        self.hash
            .iter()
            .filter(|(_, capture)| matches!(capture, Capture::Filled(_)))
            .map(|(key, _)| key.as_ref())
    }

    pub fn empty_keys(&self) -> impl Iterator<Item = &str> {
        self.hash
            .iter()
            .filter(|(_, capture)| matches!(capture, Capture::Empty))
            .map(|(key, _)| key.as_ref())
    }

    pub fn list(&self) -> &[Match] {
        &self.list
    }
}
