use text_size::{TextRange, TextSize};

use crate::kind::{Arity, ElementKind};
use crate::tree::ElementId;

/// Token text, child list, or (for the contextualizer only) both.
#[derive(Debug)]
pub enum Body {
    Leaf { content: Box<str> },
    Branch { children: Vec<ElementId> },
    Dual { content: Box<str>, children: Vec<ElementId> },
}

/// Quoting metadata recorded on string elements: the prefix lexeme (`q`,
/// `qq`, ...), the open/close delimiter characters, any colon-adverbs, and
/// whether the construct opens a here-document.
#[derive(Clone, Debug, Default)]
pub struct QuoteDetails {
    pub prefix: Box<str>,
    pub front: Box<str>,
    pub back: Box<str>,
    pub adverbs: Vec<Box<str>>,
    pub here_doc: bool,
}

/// One node of the abstract syntax tree.
///
/// Identity and navigation live in [`crate::Tree`]; an `Element` holds the
/// kind, the source range, and its body. `next`/`previous`/`parent` are arena
/// handles managed by the tree; a handle equal to the element's own id is the
/// sentinel state (stream start/end, document root).
#[derive(Debug)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) range: TextRange,
    pub(crate) body: Body,
    pub(crate) quote: Option<QuoteDetails>,
    pub(crate) factory: &'static str,
    pub(crate) next: ElementId,
    pub(crate) previous: ElementId,
    pub(crate) parent: ElementId,
}

impl Element {
    fn new(kind: ElementKind, range: TextRange, body: Body) -> Self {
        Self {
            kind,
            range,
            body,
            quote: None,
            factory: "",
            next: ElementId::PLACEHOLDER,
            previous: ElementId::PLACEHOLDER,
            parent: ElementId::PLACEHOLDER,
        }
    }

    pub fn leaf(kind: ElementKind, range: TextRange, content: &str) -> Self {
        debug_assert_eq!(kind.arity(), Arity::Leaf);
        Self::new(kind, range, Body::Leaf { content: content.into() })
    }

    pub fn branch(kind: ElementKind, range: TextRange, children: Vec<ElementId>) -> Self {
        debug_assert_eq!(kind.arity(), Arity::Branch);
        Self::new(kind, range, Body::Branch { children })
    }

    pub fn dual(
        kind: ElementKind,
        range: TextRange,
        content: &str,
        children: Vec<ElementId>,
    ) -> Self {
        debug_assert_eq!(kind.arity(), Arity::Dual);
        Self::new(kind, range, Body::Dual { content: content.into(), children })
    }

    pub fn with_factory(mut self, factory: &'static str) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_quote(mut self, quote: QuoteDetails) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn from(&self) -> TextSize {
        self.range.start()
    }

    /// Exclusive end; `to - from` is the glyph count.
    pub fn to(&self) -> TextSize {
        self.range.end()
    }

    pub fn content(&self) -> Option<&str> {
        match &self.body {
            Body::Leaf { content } | Body::Dual { content, .. } => Some(content),
            Body::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> &[ElementId] {
        match &self.body {
            Body::Leaf { .. } => &[],
            Body::Branch { children } | Body::Dual { children, .. } => children,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn quote(&self) -> Option<&QuoteDetails> {
        self.quote.as_ref()
    }

    /// The dispatch rule that produced this element.
    pub fn factory(&self) -> &'static str {
        self.factory
    }

    pub fn is_semantic(&self) -> bool {
        self.kind.is_semantic()
    }
}
