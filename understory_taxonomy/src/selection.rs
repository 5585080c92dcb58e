// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascading multi-select over a [`Forest`].
//!
//! Selecting a node selects its whole subtree, and a parent becomes selected
//! once every one of its children is. Deselecting a node clears its subtree and
//! breaks completeness upward. See [`Forest::toggle`] for the exact rules.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::forest::Forest;
use crate::types::NodeId;

/// A set of selected taxon identifiers, held by the caller.
///
/// Identifiers unknown to the forest are carried through every toggle
/// untouched, so a saved selection survives dataset revisions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from previously saved identifiers.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().collect()
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if `node` is selected in `forest`.
    pub fn contains_node(&self, forest: &Forest, node: NodeId) -> bool {
        forest.node(node).is_some_and(|n| self.contains(n.id()))
    }

    /// Number of selected identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate selected identifiers in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Selected identifiers, sorted, for persistence or display.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }

    fn insert(&mut self, id: &str) {
        if !self.ids.contains(id) {
            self.ids.insert(id.into());
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// How far deselection breaks completeness upward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeselectPropagation {
    /// Only the immediate parent is deselected.
    ///
    /// Grandparents that were auto-selected stay selected even though their
    /// subtree is no longer complete.
    #[default]
    Parent,
    /// Every selected ancestor whose children are no longer all selected is
    /// deselected, mirroring how selection propagates.
    Ancestors,
}

/// Options for [`Forest::toggle_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionPolicy {
    /// Upward reach of deselection.
    pub deselect: DeselectPropagation,
}

impl SelectionPolicy {
    /// The default policy: deselection reaches only the parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Break completeness on every ancestor when deselecting.
    pub fn deselect_ancestors(mut self) -> Self {
        self.deselect = DeselectPropagation::Ancestors;
        self
    }
}

impl Forest {
    /// Toggle `node` and return the resulting selection.
    ///
    /// Uses the default [`SelectionPolicy`]. See [`Forest::toggle_with`].
    ///
    /// ```
    /// use understory_taxonomy::{Forest, RawTaxon, Selection};
    ///
    /// let forest = Forest::build([RawTaxon::new("genus")
    ///     .scientific("Canis")
    ///     .child(RawTaxon::new("species").scientific("Canis lupus"))
    ///     .child(RawTaxon::new("species").scientific("Canis latrans"))]);
    /// let lupus = forest.get("species_canis_lupus").unwrap();
    /// let latrans = forest.get("species_canis_latrans").unwrap();
    ///
    /// let s = forest.toggle(&Selection::new(), lupus);
    /// let s = forest.toggle(&s, latrans);
    /// assert!(s.contains("genus_canis"));
    ///
    /// let s = forest.toggle(&s, lupus);
    /// assert_eq!(s.to_sorted_vec(), ["species_canis_latrans"]);
    /// ```
    pub fn toggle(&self, selection: &Selection, node: NodeId) -> Selection {
        self.toggle_with(selection, node, SelectionPolicy::default())
    }

    /// Toggle the node with identifier `id`.
    ///
    /// Unknown identifiers leave the selection unchanged.
    pub fn toggle_id(&self, selection: &Selection, id: &str) -> Selection {
        match self.get(id) {
            Some(node) => self.toggle(selection, node),
            None => selection.clone(),
        }
    }

    /// Toggle `node` under `policy` and return the resulting selection.
    ///
    /// When `node` is not selected it is selected together with its whole
    /// subtree, then each ancestor whose children are now all selected is
    /// selected too, stopping at the first incomplete one.
    ///
    /// When `node` is selected it is deselected together with its whole
    /// subtree, and selected ancestors that are no longer complete are
    /// deselected as far as [`SelectionPolicy::deselect`] allows.
    ///
    /// The input is never modified. Identifiers outside the forest are kept as
    /// they are. A `node` that does not belong to this forest yields an
    /// unchanged copy.
    pub fn toggle_with(
        &self,
        selection: &Selection,
        node: NodeId,
        policy: SelectionPolicy,
    ) -> Selection {
        let Some(taxon) = self.node(node) else {
            return selection.clone();
        };
        let mut next = selection.clone();

        if selection.contains(taxon.id()) {
            next.remove(taxon.id());
            for d in self.descendants(node) {
                next.remove(self.taxon(d).id());
            }
            let reach = match policy.deselect {
                DeselectPropagation::Parent => 1,
                DeselectPropagation::Ancestors => usize::MAX,
            };
            for ancestor in self.ancestors(node).take(reach) {
                let id = self.taxon(ancestor).id();
                if next.contains(id) && !self.all_children(ancestor, |c| next.contains(c)) {
                    next.remove(id);
                }
            }
            tracing::trace!(node = taxon.id(), selected = next.len(), "deselected taxon");
        } else {
            next.insert(taxon.id());
            for d in self.descendants(node) {
                next.insert(self.taxon(d).id());
            }
            for ancestor in self.ancestors(node) {
                if !self.all_children(ancestor, |c| next.contains(c)) {
                    break;
                }
                next.insert(self.taxon(ancestor).id());
            }
            tracing::trace!(node = taxon.id(), selected = next.len(), "selected taxon");
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawTaxon;

    /// A ── A1
    ///   └─ A2
    fn pair() -> Forest {
        Forest::build([RawTaxon::new("genus")
            .scientific("A")
            .child(RawTaxon::new("species").scientific("A1"))
            .child(RawTaxon::new("species").scientific("A2"))])
    }

    /// R ── A ── A1
    ///        └─ A2
    fn nested() -> Forest {
        Forest::build([RawTaxon::new("family").scientific("R").child(
            RawTaxon::new("genus")
                .scientific("A")
                .child(RawTaxon::new("species").scientific("A1"))
                .child(RawTaxon::new("species").scientific("A2")),
        )])
    }

    fn node(forest: &Forest, id: &str) -> NodeId {
        forest.get(id).unwrap()
    }

    #[test]
    fn sibling_completion_selects_parent() {
        let forest = pair();
        let a1 = node(&forest, "species_a1");
        let a2 = node(&forest, "species_a2");

        let s = forest.toggle(&Selection::new(), a1);
        assert_eq!(s.to_sorted_vec(), ["species_a1"]);

        let s = forest.toggle(&s, a2);
        assert_eq!(
            s.to_sorted_vec(),
            ["genus_a", "species_a1", "species_a2"],
            "parent is auto-selected once both children are"
        );

        let s = forest.toggle(&s, a1);
        assert_eq!(
            s.to_sorted_vec(),
            ["species_a2"],
            "removing a child breaks the parent's completeness"
        );
    }

    #[test]
    fn selecting_a_node_selects_its_subtree() {
        let forest = nested();
        let r = node(&forest, "family_r");
        let s = forest.toggle(&Selection::new(), r);
        for d in forest.descendants(r) {
            assert!(s.contains_node(&forest, d), "descendant {d:?} must be selected");
        }
        assert_eq!(s.len(), 4);

        let cleared = forest.toggle(&s, r);
        assert!(cleared.is_empty(), "deselecting the root clears the subtree");
    }

    #[test]
    fn completeness_walks_all_the_way_up() {
        let forest = nested();
        let s = forest.toggle(&Selection::new(), node(&forest, "species_a1"));
        let s = forest.toggle(&s, node(&forest, "species_a2"));
        assert!(s.contains("genus_a"));
        assert!(s.contains("family_r"), "sole child complete, so the root follows");
    }

    #[test]
    fn completeness_stops_at_an_incomplete_ancestor() {
        // R ── A ── A1
        //   │    └─ A2
        //   └─ B
        let forest = Forest::build([RawTaxon::new("family")
            .scientific("R")
            .child(
                RawTaxon::new("genus")
                    .scientific("A")
                    .child(RawTaxon::new("species").scientific("A1"))
                    .child(RawTaxon::new("species").scientific("A2")),
            )
            .child(RawTaxon::new("genus").scientific("B"))]);
        let s = forest.toggle(&Selection::new(), node(&forest, "species_a1"));
        let s = forest.toggle(&s, node(&forest, "species_a2"));
        assert!(s.contains("genus_a"));
        assert!(!s.contains("family_r"), "B is unselected, so R stays out");
        assert_eq!(s.to_sorted_vec(), ["genus_a", "species_a1", "species_a2"]);
    }

    #[test]
    fn deselect_reaches_one_level_by_default() {
        let forest = nested();
        let full = Selection::from_ids(["family_r", "genus_a", "species_a1", "species_a2"]);
        let s = forest.toggle(&full, node(&forest, "species_a1"));
        assert_eq!(s.to_sorted_vec(), ["family_r", "species_a2"]);
    }

    #[test]
    fn deselect_ancestors_policy_clears_the_chain() {
        let forest = nested();
        let full = Selection::from_ids(["family_r", "genus_a", "species_a1", "species_a2"]);
        let policy = SelectionPolicy::new().deselect_ancestors();
        let s = forest.toggle_with(&full, node(&forest, "species_a1"), policy);
        assert_eq!(s.to_sorted_vec(), ["species_a2"]);
    }

    #[test]
    fn double_toggle_restores_the_selection() {
        let forest = nested();
        let starts = [Selection::new(), Selection::from_ids(["elsewhere_x"])];
        for start in &starts {
            for id in ["species_a1", "genus_a", "family_r"] {
                let n = node(&forest, id);
                let back = forest.toggle(&forest.toggle(start, n), n);
                assert_eq!(&back, start, "toggling {id} twice from {start:?}");
            }
        }
    }

    #[test]
    fn double_toggle_keeps_a_distant_auto_selected_ancestor() {
        let forest = nested();
        let a1 = node(&forest, "species_a1");
        let start = Selection::from_ids(["species_a2"]);

        let s = forest.toggle(&start, a1);
        assert_eq!(s.to_sorted_vec(), ["family_r", "genus_a", "species_a1", "species_a2"]);
        let back = forest.toggle(&s, a1);
        assert_eq!(
            back.to_sorted_vec(),
            ["family_r", "species_a2"],
            "the default deselect only reaches the parent"
        );

        let policy = SelectionPolicy::new().deselect_ancestors();
        let back = forest.toggle_with(&forest.toggle_with(&start, a1, policy), a1, policy);
        assert_eq!(back, start, "deselecting the whole chain restores the start");
    }

    #[test]
    fn foreign_ids_are_untouched() {
        let forest = pair();
        let start = Selection::from_ids(["legacy_id"]);
        let s = forest.toggle(&start, node(&forest, "genus_a"));
        assert!(s.contains("legacy_id"));
        let s = forest.toggle(&s, node(&forest, "genus_a"));
        assert_eq!(s, start);
    }

    #[test]
    fn foreign_handles_and_ids_are_no_ops() {
        let forest = pair();
        let start = Selection::from_ids(["species_a1"]);
        assert_eq!(forest.toggle(&start, NodeId::new(42)), start);
        assert_eq!(forest.toggle_id(&start, "species_zz"), start);
        assert_eq!(forest.toggle_id(&start, "species_a1"), Selection::new());
    }

    #[test]
    fn input_selection_is_not_modified() {
        let forest = pair();
        let start = Selection::new();
        let _ = forest.toggle(&start, node(&forest, "genus_a"));
        assert!(start.is_empty());
    }
}
