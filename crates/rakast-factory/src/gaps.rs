//! Gap detection and filling.
//!
//! After dispatch the raw tree covers only what the grammar captured; the
//! intervals between adjacent siblings (whitespace, comments, here-doc
//! bodies) are materialized here so the no-gap invariant holds before
//! threading.

use rakast_tree::{Element, ElementId, ElementKind};
use text_size::{TextRange, TextSize};

use crate::factory::Factory;

/// Fills every gap under `id`, bottom-up.
///
/// Children are finalized before their parent's level so gap detection sees
/// settled boundaries, and sibling gaps are spliced in reverse index order
/// so pending insertion points stay valid. The interior of a contextualizer
/// is skipped: its children are a tree-view projection of text the
/// contextualizer leaf already covers.
pub(crate) fn fill(f: &mut Factory<'_>, id: ElementId) {
    if f.tree[id].kind() == ElementKind::CONTEXTUALIZER {
        return;
    }

    let children: Vec<ElementId> = f.tree[id].children().to_vec();
    if children.is_empty() {
        return;
    }

    for &child in &children {
        fill(f, child);
    }

    // Trailing extremity first, then interior pairs in reverse, then the
    // leading extremity: each insertion index stays correct because every
    // later insertion happens at a strictly smaller index.
    let parent_range = f.tree[id].range();
    let last_to = f.tree[children[children.len() - 1]].to();
    fill_interval(f, id, children.len(), last_to, parent_range.end());

    for i in (0..children.len() - 1).rev() {
        let from = f.tree[children[i]].to();
        let to = f.tree[children[i + 1]].from();
        fill_interval(f, id, i + 1, from, to);
    }

    let first_from = f.tree[children[0]].from();
    fill_interval(f, id, 0, parent_range.start(), first_from);
}

/// Synthesizes nodes for one uncovered interval and splices them into the
/// parent's child list at `index`.
fn fill_interval(
    f: &mut Factory<'_>,
    parent: ElementId,
    index: usize,
    from: TextSize,
    to: TextSize,
) {
    if from == to {
        return;
    }
    if from > to {
        // Tooling bug upstream; leave the hole rather than crash.
        if f.debug {
            f.diagnostic("inverted gap interval", TextRange::new(to, from));
        }
        return;
    }

    let nodes = synthesize(f, from, to);
    for (offset, node) in nodes.into_iter().enumerate() {
        f.tree.insert_child(parent, index + offset, node);
    }
}

/// Classifies the gap text into whitespace, comment, here-doc ghost, and
/// unparsed leaves.
///
/// The here-doc map is consulted before each token: a registered body start
/// becomes a single ghost leaf spanning through its terminator line, and
/// tokenization resumes after it. Unregistered non-whitespace text is an
/// anomaly; it is kept as an `Unparsed` leaf with a diagnostic instead of
/// discarding the build.
fn synthesize(f: &mut Factory<'_>, from: TextSize, to: TextSize) -> Vec<ElementId> {
    let text = f.text;
    let end = usize::from(to);
    let mut at = usize::from(from);
    let mut out = Vec::new();

    while at < end {
        if let Some(&true_end) = f.here_docs.get(&(at as u32)) {
            let ghost_end = (true_end as usize).min(end);
            let range = TextRange::new(TextSize::new(at as u32), TextSize::new(ghost_end as u32));
            let ghost = Element::leaf(ElementKind::HERE_DOC_BODY, range, &text[at..ghost_end])
                .with_factory("gap");
            out.push(f.tree.alloc(ghost));
            at = ghost_end;
            continue;
        }

        let (kind, len) = next_token(&text[at..end]);
        let range = TextRange::new(TextSize::new(at as u32), TextSize::new((at + len) as u32));
        if kind == ElementKind::UNPARSED {
            f.diagnostic("unparsed text between elements", range);
        }
        let leaf = Element::leaf(kind, range, &text[at..at + len]).with_factory("gap");
        out.push(f.tree.alloc(leaf));
        at += len;
    }

    out
}

/// One token of gap text: a whitespace run, a `#` comment up to (not
/// including) its newline, or a run of anything else.
fn next_token(slice: &str) -> (ElementKind, usize) {
    let mut chars = slice.char_indices();
    let Some((_, first)) = chars.next() else {
        return (ElementKind::WHITESPACE, 0);
    };

    if first.is_whitespace() {
        let len = slice
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map_or(slice.len(), |(i, _)| i);
        return (ElementKind::WHITESPACE, len);
    }

    if first == '#' {
        let len = slice.find('\n').unwrap_or(slice.len());
        return (ElementKind::COMMENT, len);
    }

    let len = slice
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || *c == '#')
        .map_or(slice.len(), |(i, _)| i);
    (ElementKind::UNPARSED, len)
}
