// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core forest implementation: construction and read-only traversal.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::BuildError;
use crate::id::taxon_id;
use crate::raw::RawTaxon;
use crate::types::{NameFields, NodeId, Path, Taxon};

/// An immutable forest of taxa.
///
/// Nodes are stored in a flat arena in pre-order, so every subtree occupies a
/// contiguous run of slots starting at its root. Parent and children are kept
/// as [`NodeId`] references, never owning pointers.
///
/// Selection and highlight state are never stored here; see
/// [`Selection`](crate::Selection) and [`ViewState`](crate::ViewState).
///
/// ## Example
///
/// ```rust
/// use understory_taxonomy::{Forest, RawTaxon};
///
/// let forest = Forest::build([RawTaxon::new("family")
///     .canonical("Canines")
///     .scientific("Canidae")
///     .child(RawTaxon::new("species").canonical("Wolf").scientific("Canis lupus"))]);
///
/// let wolf = forest.get("species_canis_lupus").unwrap();
/// let chain: Vec<_> = forest
///     .ancestor_chain("species_canis_lupus")
///     .iter()
///     .map(|&n| forest.node(n).unwrap().id())
///     .collect();
/// assert_eq!(chain, ["family_canidae", "species_canis_lupus"]);
/// assert_eq!(forest.parent_taxon_id(wolf), "family_canidae");
/// ```
#[derive(Clone)]
pub struct Forest {
    /// Pre-order arena.
    nodes: Vec<Taxon>,
    roots: Vec<NodeId>,
    by_id: HashMap<String, NodeId>,
}

impl core::fmt::Debug for Forest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        let depth = self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0);
        f.debug_struct("Forest")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("leaves", &leaves)
            .field("depth", &depth)
            .finish_non_exhaustive()
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Build a forest from trusted authored data.
    ///
    /// Children are linked to their parents by nesting and every node receives
    /// its derived identifier (see [`taxon_id`](crate::taxon_id)).
    ///
    /// # Panics
    ///
    /// Panics if two taxa derive the same identifier or a taxon has no name.
    /// The bundled dataset is expected to be well formed; use
    /// [`Forest::try_build`] for data that is not.
    pub fn build(items: impl IntoIterator<Item = RawTaxon>) -> Self {
        match Self::try_build(items) {
            Ok(forest) => forest,
            Err(err) => panic!("invalid taxonomy dataset: {err}"),
        }
    }

    /// Build a forest, reporting malformed data instead of panicking.
    pub fn try_build(items: impl IntoIterator<Item = RawTaxon>) -> Result<Self, BuildError> {
        let mut forest = Self::new();

        // Children are pushed in reverse so they pop in authored order, which
        // lays the arena out in pre-order.
        let mut stack: Vec<(RawTaxon, Option<NodeId>)> =
            items.into_iter().map(|raw| (raw, None)).collect();
        stack.reverse();

        while let Some((mut raw, parent)) = stack.pop() {
            let children = core::mem::take(&mut raw.children);
            let id = forest.insert(raw, parent)?;
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        // Children always sit after their parent, so a reverse sweep sees every
        // child's final subtree end before the parent needs it.
        for idx in (0..forest.nodes.len()).rev() {
            let end = match forest.nodes[idx].children.last() {
                Some(&last) => forest.nodes[last.idx()].subtree_end,
                None => forest.nodes[idx].subtree_end,
            };
            forest.nodes[idx].subtree_end = end;
        }

        tracing::debug!(
            nodes = forest.nodes.len(),
            roots = forest.roots.len(),
            "built taxonomy forest"
        );
        Ok(forest)
    }

    /// Parse a nested JSON dataset (an array of [`RawTaxon`]) and build it.
    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        let items: Vec<RawTaxon> =
            serde_json::from_str(text).map_err(crate::error::JsonError::from)?;
        Self::try_build(items)
    }

    fn insert(&mut self, raw: RawTaxon, parent: Option<NodeId>) -> Result<NodeId, BuildError> {
        let Some(name) = raw.id_name() else {
            return Err(BuildError::MissingName { rank: raw.rank });
        };
        let id = taxon_id(&raw.rank, name);
        if self.by_id.contains_key(&id) {
            return Err(BuildError::DuplicateId { id });
        }

        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let node = NodeId::new(self.nodes.len() as u32);
        let depth = parent.map_or(0, |p| self.taxon(p).depth + 1);

        let mut search_keys = SmallVec::new();
        if let Some(name) = &raw.canonical_name {
            search_keys.push((NameFields::CANONICAL, name.to_lowercase()));
        }
        if let Some(name) = &raw.scientific_name {
            search_keys.push((NameFields::SCIENTIFIC, name.to_lowercase()));
        }
        for name in &raw.other_names {
            search_keys.push((NameFields::OTHER, name.to_lowercase()));
        }

        self.nodes.push(Taxon {
            id: id.clone(),
            rank: raw.rank,
            canonical_name: raw.canonical_name,
            scientific_name: raw.scientific_name,
            other_names: raw.other_names,
            parent,
            children: SmallVec::new(),
            subtree_end: node.0 + 1,
            depth,
            search_keys,
        });
        self.by_id.insert(id, node);
        match parent {
            Some(p) => self.taxon_mut(p).children.push(node),
            None => self.roots.push(node),
        }
        Ok(node)
    }

    /// Number of taxa in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest has no taxa.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root-level taxa in authored order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node by its string identifier.
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Access a taxon, or `None` if `node` does not belong to this forest.
    pub fn node(&self, node: NodeId) -> Option<&Taxon> {
        self.nodes.get(node.idx())
    }

    /// Returns `true` if `node` is a handle into this forest.
    pub fn contains(&self, node: NodeId) -> bool {
        node.idx() < self.nodes.len()
    }

    /// Iterate all taxa in pre-order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeId, &Taxon)> + '_ {
        self.nodes.iter().enumerate().map(|(idx, taxon)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let node = NodeId::new(idx as u32);
            (node, taxon)
        })
    }

    /// Returns the parent of a node, or `None` for roots and foreign handles.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Returns the parent's string identifier, or `""` for roots and foreign handles.
    pub fn parent_taxon_id(&self, node: NodeId) -> &str {
        self.parent_of(node).map_or("", |p| self.taxon(p).id())
    }

    /// Get the children of a node, or an empty slice for foreign handles.
    pub fn children_of(&self, node: NodeId) -> &[NodeId] {
        match self.node(node) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Distance from the root (roots have depth 0).
    pub fn depth(&self, node: NodeId) -> Option<usize> {
        self.node(node).map(|n| n.depth as usize)
    }

    /// Iterate the strict ancestors of a node, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.parent_of(node),
        }
    }

    /// Path from a root down to and including `node`.
    ///
    /// The first element is a root and the last is `node`; dropping the last
    /// element yields the ancestors only. Empty for foreign handles.
    pub fn path_to(&self, node: NodeId) -> Path {
        if !self.contains(node) {
            return Path::new();
        }
        let mut path: Path = core::iter::once(node).chain(self.ancestors(node)).collect();
        path.reverse();
        path
    }

    /// Path from a root down to and including the node with identifier `id`.
    ///
    /// Returns an empty path if no node has that identifier.
    pub fn ancestor_chain(&self, id: &str) -> Path {
        self.get(id).map(|node| self.path_to(node)).unwrap_or_default()
    }

    /// Iterate every node of the subtree under `node`, excluding `node`, in pre-order.
    pub fn descendants(&self, node: NodeId) -> Descendants {
        match self.node(node) {
            Some(n) => Descendants {
                next: node.0 + 1,
                end: n.subtree_end,
            },
            None => Descendants { next: 0, end: 0 },
        }
    }

    /// Iterate the nodes sharing `node`'s parent, excluding `node`.
    ///
    /// The siblings of a root are the other roots.
    pub fn siblings(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let peers: &[NodeId] = match self.node(node) {
            Some(n) => match n.parent {
                Some(p) => &self.taxon(p).children,
                None => &self.roots,
            },
            None => &[],
        };
        peers.iter().copied().filter(move |&peer| peer != node)
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` past the last node or for foreign handles. This does not
    /// wrap around; crossing from one root's subtree into the next is allowed.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        let next = NodeId::new(current.0.checked_add(1)?);
        (self.contains(current) && self.contains(next)).then_some(next)
    }

    /// Get the previous node in depth-first traversal order.
    ///
    /// Returns `None` before the first node or for foreign handles.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.contains(current) {
            return None;
        }
        current.0.checked_sub(1).map(NodeId::new)
    }

    /// Returns `true` if every child of `parent` passes `is_selected`.
    pub(crate) fn all_children(
        &self,
        parent: NodeId,
        mut is_selected: impl FnMut(&str) -> bool,
    ) -> bool {
        self.children_of(parent)
            .iter()
            .all(|&child| is_selected(self.taxon(child).id()))
    }

    /// Access a taxon; panics if `node` is foreign.
    pub(crate) fn taxon(&self, node: NodeId) -> &Taxon {
        &self.nodes[node.idx()]
    }

    fn taxon_mut(&mut self, node: NodeId) -> &mut Taxon {
        &mut self.nodes[node.idx()]
    }
}

/// Iterator over the strict ancestors of a node, nearest first.
///
/// Created by [`Forest::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    forest: &'a Forest,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.forest.parent_of(current);
        Some(current)
    }
}

/// Iterator over a subtree in pre-order, excluding its root.
///
/// Created by [`Forest::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants {
    next: u32,
    end: u32,
}

impl Iterator for Descendants {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next >= self.end {
            return None;
        }
        let node = NodeId::new(self.next);
        self.next += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end.saturating_sub(self.next) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Descendants {}
