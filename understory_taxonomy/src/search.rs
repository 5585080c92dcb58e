// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name search with ancestor closure.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::forest::Forest;
use crate::types::{NameFields, NodeId};

/// Options for [`Forest::search_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Name fields that are tested against the term.
    pub fields: NameFields,
}

impl SearchOptions {
    /// Search every name field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the search to `fields`.
    pub fn fields(mut self, fields: NameFields) -> Self {
        self.fields = fields;
        self
    }

    /// Also search the alternate names list.
    pub fn with_other_names(mut self) -> Self {
        self.fields |= NameFields::OTHER;
        self
    }
}

/// Outcome of a search.
#[derive(Clone, Debug, Default)]
pub struct SearchResult {
    matches: Vec<NodeId>,
    expanded: HashSet<NodeId>,
    highlighted: HashSet<NodeId>,
}

impl SearchResult {
    /// Matching nodes in pre-order.
    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Strict ancestors of every match; expanding these makes all matches visible.
    pub fn expanded(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.expanded.iter().copied()
    }

    /// Matches together with their ancestors.
    pub fn highlighted(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.highlighted.iter().copied()
    }

    /// Returns `true` if `node` lies on the path to a match.
    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.expanded.contains(&node)
    }

    /// Returns `true` if `node` is a match or an ancestor of one.
    pub fn is_highlighted(&self, node: NodeId) -> bool {
        self.highlighted.contains(&node)
    }

    /// String identifiers of the highlighted nodes, in unspecified order.
    pub fn highlighted_ids<'a>(&'a self, forest: &'a Forest) -> impl Iterator<Item = &'a str> + 'a {
        self.highlighted
            .iter()
            .filter_map(|&node| forest.node(node).map(|t| t.id()))
    }
}

impl Forest {
    /// Search every name field for `term`. See [`Forest::search_with`].
    ///
    /// ```
    /// use understory_taxonomy::{Forest, RawTaxon};
    ///
    /// let forest = Forest::build([RawTaxon::new("family")
    ///     .canonical("Canines")
    ///     .scientific("Canidae")
    ///     .child(RawTaxon::new("species").canonical("Wolf").scientific("Canis lupus"))]);
    ///
    /// let result = forest.search("wol");
    /// let mut ids: Vec<_> = result.highlighted_ids(&forest).collect();
    /// ids.sort();
    /// assert_eq!(ids, ["family_canidae", "species_canis_lupus"]);
    /// assert!(forest.search("cat").is_empty());
    /// ```
    pub fn search(&self, term: &str) -> SearchResult {
        self.search_with(term, SearchOptions::default())
    }

    /// Find every node whose enabled name fields contain `term`.
    ///
    /// The term is trimmed and compared case-insensitively as a substring. An
    /// empty or whitespace-only term matches nothing. All matches are returned,
    /// along with the ancestors that must be expanded to reveal them.
    pub fn search_with(&self, term: &str, options: SearchOptions) -> SearchResult {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return SearchResult::default();
        }

        let matches: Vec<NodeId> = self
            .iter()
            .filter(|(_, taxon)| taxon.matches(&needle, options.fields))
            .map(|(node, _)| node)
            .collect();

        let mut expanded = HashSet::new();
        for &m in &matches {
            for ancestor in self.ancestors(m) {
                // Chains are inserted whole, so the rest is already present.
                if !expanded.insert(ancestor) {
                    break;
                }
            }
        }

        let mut highlighted = expanded.clone();
        highlighted.extend(matches.iter().copied());

        tracing::trace!(
            term = %needle,
            matches = matches.len(),
            expanded = expanded.len(),
            "taxonomy search"
        );
        SearchResult {
            matches,
            expanded,
            highlighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawTaxon;

    fn sample() -> Forest {
        Forest::build([
            RawTaxon::new("family")
                .canonical("Canines")
                .scientific("Canidae")
                .child(
                    RawTaxon::new("genus")
                        .scientific("Canis")
                        .child(
                            RawTaxon::new("species")
                                .canonical("Wolf")
                                .scientific("Canis lupus")
                                .other_name("Grey wolf"),
                        )
                        .child(
                            RawTaxon::new("species")
                                .canonical("Coyote")
                                .scientific("Canis latrans")
                                .other_name("Prairie wolf"),
                        ),
                )
                .child(RawTaxon::new("genus").canonical("Foxes").scientific("Vulpes")),
            RawTaxon::new("family").canonical("Bears").scientific("Ursidae"),
        ])
    }

    fn sorted_ids(forest: &Forest, nodes: impl Iterator<Item = NodeId>) -> Vec<&str> {
        let mut ids: Vec<_> = nodes.map(|n| forest.node(n).unwrap().id()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn exact_canonical_name_matches() {
        let forest = sample();
        let result = forest.search("Coyote");
        let coyote = forest.get("species_canis_latrans").unwrap();
        assert_eq!(result.matches(), [coyote]);
        assert!(result.is_highlighted(coyote));
    }

    #[test]
    fn highlight_is_closed_over_ancestors() {
        let forest = sample();
        let result = forest.search("wolf");
        assert_eq!(
            sorted_ids(&forest, result.matches().iter().copied()),
            ["species_canis_latrans", "species_canis_lupus"],
            "alternate names are searched too"
        );
        for &m in result.matches() {
            let path = forest.path_to(m);
            for &ancestor in &path[..path.len() - 1] {
                assert!(
                    result.is_highlighted(ancestor),
                    "ancestor {ancestor:?} must be highlighted"
                );
                assert!(result.is_expanded(ancestor), "ancestor {ancestor:?} must be expanded");
            }
        }
        assert_eq!(
            sorted_ids(&forest, result.expanded()),
            ["family_canidae", "genus_canis"]
        );
    }

    #[test]
    fn matches_are_case_insensitive_and_trimmed() {
        let forest = sample();
        let result = forest.search("  CANIS LUP ");
        assert_eq!(result.matches(), [forest.get("species_canis_lupus").unwrap()]);
    }

    #[test]
    fn substring_in_the_middle_matches() {
        let forest = sample();
        let result = forest.search("sid");
        assert_eq!(result.matches(), [forest.get("family_ursidae").unwrap()]);
        assert_eq!(result.expanded().count(), 0, "roots need no expansion");
    }

    #[test]
    fn empty_term_matches_nothing() {
        let forest = sample();
        for term in ["", "   ", "\t\n"] {
            let result = forest.search(term);
            assert!(result.is_empty(), "term {term:?} must not match");
            assert_eq!(result.expanded().count(), 0);
            assert_eq!(result.highlighted().count(), 0);
        }
    }

    #[test]
    fn no_match_is_empty() {
        let forest = sample();
        assert!(forest.search("cat").is_empty());
    }

    #[test]
    fn field_selection_limits_matches() {
        let forest = sample();
        let canonical_only = SearchOptions::new().fields(NameFields::CANONICAL);
        let result = forest.search_with("wolf", canonical_only);
        assert_eq!(result.matches(), [forest.get("species_canis_lupus").unwrap()]);

        let scientific = SearchOptions::new().fields(NameFields::SCIENTIFIC);
        assert!(forest.search_with("wolf", scientific).is_empty());
        let with_other = scientific.with_other_names();
        assert_eq!(forest.search_with("wolf", with_other).matches().len(), 2);
    }
}
