use rakast_errors::Diagnostic;
use rakast_tree::{ElementId, Tree};
use rustc_hash::FxHashMap;
use text_size::TextRange;

/// Per-build state: the source text, the tree under construction, the
/// here-doc offset map, and accumulated non-fatal diagnostics.
///
/// One factory serves exactly one `build` call; in particular the here-doc
/// map (body-start offset to true-end offset) never survives into another
/// parse.
pub(crate) struct Factory<'src> {
    pub(crate) text: &'src str,
    pub(crate) tree: Tree,
    pub(crate) here_docs: FxHashMap<u32, u32>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) debug: bool,
}

impl<'src> Factory<'src> {
    pub(crate) fn new(text: &'src str, debug: bool) -> Self {
        Self {
            text,
            tree: Tree::new(),
            here_docs: FxHashMap::default(),
            diagnostics: Vec::new(),
            debug,
        }
    }

    pub(crate) fn diagnostic(&mut self, message: impl Into<String>, range: TextRange) {
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    /// The element's end offset, for splice bookkeeping.
    pub(crate) fn end_of(&self, id: ElementId) -> text_size::TextSize {
        self.tree[id].to()
    }
}
