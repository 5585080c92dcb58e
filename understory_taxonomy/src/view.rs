// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion and highlight state of a tree view.

use hashbrown::HashSet;

use crate::search::SearchResult;
use crate::types::NodeId;

/// Which nodes a tree view shows expanded and which it emphasizes.
///
/// The forest itself never tracks this; the host keeps one `ViewState` per
/// view and feeds it search results and manual expand/collapse actions.
///
/// ```
/// use understory_taxonomy::{Forest, RawTaxon, ViewState};
///
/// let forest = Forest::build([RawTaxon::new("genus")
///     .scientific("Canis")
///     .child(RawTaxon::new("species").canonical("Wolf").scientific("Canis lupus"))]);
/// let canis = forest.get("genus_canis").unwrap();
///
/// let mut view = ViewState::new();
/// view.apply_search(&forest.search("wolf"));
/// assert!(view.is_expanded(canis));
///
/// view.clear();
/// assert!(!view.is_expanded(canis));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    expanded: HashSet<NodeId>,
    highlighted: HashSet<NodeId>,
}

impl ViewState {
    /// Create a fully collapsed view with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a search result.
    ///
    /// The highlight set is replaced; the ancestors of every match are
    /// expanded in addition to whatever the user expanded by hand.
    pub fn apply_search(&mut self, result: &SearchResult) {
        self.highlighted.clear();
        self.highlighted.extend(result.highlighted());
        self.expanded.extend(result.expanded());
    }

    /// Collapse everything and drop all highlights, including manual expansion.
    pub fn clear(&mut self) {
        self.expanded.clear();
        self.highlighted.clear();
    }

    /// Flip the expansion of `node` and return the new state.
    pub fn toggle_expanded(&mut self, node: NodeId) -> bool {
        if self.expanded.remove(&node) {
            false
        } else {
            self.expanded.insert(node);
            true
        }
    }

    /// Expand or collapse `node`.
    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) {
        if expanded {
            self.expanded.insert(node);
        } else {
            self.expanded.remove(&node);
        }
    }

    /// Returns `true` if `node` is expanded.
    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.expanded.contains(&node)
    }

    /// Returns `true` if `node` is highlighted.
    pub fn is_highlighted(&self, node: NodeId) -> bool {
        self.highlighted.contains(&node)
    }

    /// Expanded nodes, in unspecified order.
    pub fn expanded(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.expanded.iter().copied()
    }

    /// Highlighted nodes, in unspecified order.
    pub fn highlighted(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.highlighted.iter().copied()
    }
}
