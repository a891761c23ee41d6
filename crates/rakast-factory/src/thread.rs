//! Linearization: one doubly-linked chain over the whole tree, in document
//! order.
//!
//! The linear view and the tree view are different projections over the same
//! arena. Branches are transparent in the chain (an empty branch contributes
//! nothing but stays reachable through parent/child); a contextualizer
//! threads as one atomic token, its children visible only to tree-shaped
//! queries. Threading is a pure function of tree shape, so re-running it is
//! idempotent.

use rakast_tree::{Arity, ElementId, Tree};

pub(crate) fn thread(tree: &mut Tree, root: ElementId) {
    let mut chain = Vec::new();
    collect(tree, root, &mut chain);

    for pair in chain.windows(2) {
        tree.link(pair[0], pair[1]);
    }
    if let Some(&first) = chain.first() {
        tree.make_start(first);
    }
    if let Some(&last) = chain.last() {
        tree.make_end(last);
    }
}

/// Depth-first: assigns `parent` to every immediate child, then gathers the
/// content-carrying elements in order.
fn collect(tree: &mut Tree, id: ElementId, chain: &mut Vec<ElementId>) {
    match tree[id].kind().arity() {
        Arity::Leaf => chain.push(id),
        Arity::Dual => {
            chain.push(id);
            adopt_subtree(tree, id);
        }
        Arity::Branch => {
            let children: Vec<ElementId> = tree[id].children().to_vec();
            for &child in &children {
                tree.set_parent(child, id);
            }
            for &child in &children {
                collect(tree, child, chain);
            }
        }
    }
}

/// Parent pointers below a dual element stay consistent even though its
/// children never enter the chain.
fn adopt_subtree(tree: &mut Tree, id: ElementId) {
    let children: Vec<ElementId> = tree[id].children().to_vec();
    for &child in &children {
        tree.set_parent(child, id);
        adopt_subtree(tree, child);
    }
}
