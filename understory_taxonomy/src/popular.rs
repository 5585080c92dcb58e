// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shortcut list of frequently used taxa.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::forest::Forest;
use crate::types::NodeId;

/// Taxa named by an allow-list, sorted alphabetically by display name.
///
/// Derived once from a forest; the forest is immutable, so the list never
/// needs recomputing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopularItems {
    items: Vec<NodeId>,
}

impl PopularItems {
    /// Collect the taxa whose identifier appears in `allow`.
    ///
    /// Identifiers missing from the forest are skipped. Items are ordered by
    /// case-insensitive display name, then by identifier.
    pub fn new<I, S>(forest: &Forest, allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allow: Vec<S> = allow.into_iter().collect();
        let wanted: HashSet<&str> = allow.iter().map(AsRef::as_ref).collect();

        let mut items: Vec<NodeId> = forest
            .iter()
            .filter(|(_, taxon)| wanted.contains(taxon.id()))
            .map(|(node, _)| node)
            .collect();
        items.sort_by_cached_key(|&node| {
            let taxon = forest.taxon(node);
            (taxon.display_name().to_lowercase(), String::from(taxon.id()))
        });

        tracing::debug!(
            requested = wanted.len(),
            found = items.len(),
            "derived popular taxa"
        );
        Self { items }
    }

    /// The popular nodes in display order.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.items
    }

    /// Iterate the popular nodes in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.items.iter().copied()
    }

    /// Number of popular nodes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no allow-listed taxon was found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `node` is in the list.
    pub fn contains(&self, node: NodeId) -> bool {
        self.items.contains(&node)
    }
}

/// Parse a bundled popular allow-list: a JSON array of taxon identifiers.
#[cfg(feature = "json")]
pub fn popular_ids_from_json(text: &str) -> Result<Vec<String>, crate::JsonError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawTaxon;

    fn sample() -> Forest {
        Forest::build([RawTaxon::new("genus")
            .scientific("Canis")
            .child(RawTaxon::new("species").canonical("wolf").scientific("Canis lupus"))
            .child(RawTaxon::new("species").canonical("Coyote").scientific("Canis latrans"))
            .child(RawTaxon::new("species").scientific("Canis aureus"))])
    }

    fn ids(forest: &Forest, popular: &PopularItems) -> Vec<String> {
        popular
            .iter()
            .map(|n| String::from(forest.node(n).unwrap().id()))
            .collect()
    }

    #[test]
    fn filters_and_sorts_by_display_name() {
        let forest = sample();
        let popular = PopularItems::new(
            &forest,
            ["species_canis_lupus", "species_canis_aureus", "species_canis_latrans"],
        );
        assert_eq!(
            ids(&forest, &popular),
            ["species_canis_aureus", "species_canis_latrans", "species_canis_lupus"],
            "Canis aureus < Coyote < wolf, ignoring case"
        );
    }

    #[test]
    fn skips_unknown_and_duplicate_ids() {
        let forest = sample();
        let popular = PopularItems::new(
            &forest,
            ["species_canis_lupus", "species_felis_catus", "species_canis_lupus"],
        );
        assert_eq!(ids(&forest, &popular), ["species_canis_lupus"]);
        assert!(popular.contains(forest.get("species_canis_lupus").unwrap()));
        assert!(!popular.contains(forest.get("genus_canis").unwrap()));
    }

    #[test]
    fn empty_allow_list() {
        let forest = sample();
        let popular = PopularItems::new(&forest, core::iter::empty::<&str>());
        assert!(popular.is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn parses_allow_list_json() {
        let ids = popular_ids_from_json(r#"["species_canis_lupus", "genus_canis"]"#).unwrap();
        assert_eq!(ids, ["species_canis_lupus", "genus_canis"]);
        let err = popular_ids_from_json("{}").unwrap_err();
        assert_eq!(err.line, 1, "position is carried through: {err}");
    }
}
