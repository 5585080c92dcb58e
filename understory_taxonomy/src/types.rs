// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the taxonomy forest: node handles, name fields, and taxa.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// Handle of a node in a [`Forest`](crate::Forest).
///
/// Handles are dense arena indices assigned in pre-order during construction.
/// The forest never changes after it is built, so a handle stays valid for the
/// lifetime of the forest that produced it. Handles from a different forest are
/// not detected; queries with an out-of-range handle return empty results.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Name fields of a [`Taxon`] that participate in name search.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NameFields: u8 {
        /// The common (canonical) display name.
        const CANONICAL  = 0b0000_0001;
        /// The scientific name.
        const SCIENTIFIC = 0b0000_0010;
        /// Every entry of the alternate names list.
        const OTHER      = 0b0000_0100;
    }
}

impl Default for NameFields {
    fn default() -> Self {
        Self::all()
    }
}

/// Root→node path, inclusive of both ends.
///
/// Taxonomies are shallow, so paths almost always fit inline.
pub type Path = SmallVec<[NodeId; 8]>;

/// One entry of the hierarchy: an instance of a taxonomic rank.
///
/// Taxa are created by [`Forest::build`](crate::Forest::build) and are
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct Taxon {
    pub(crate) id: String,
    pub(crate) rank: String,
    pub(crate) canonical_name: Option<String>,
    pub(crate) scientific_name: Option<String>,
    pub(crate) other_names: Vec<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    /// Exclusive end of this node's subtree in the pre-order arena.
    pub(crate) subtree_end: u32,
    pub(crate) depth: u32,
    /// Lower-cased copies of the searchable names, tagged with their field.
    pub(crate) search_keys: SmallVec<[(NameFields, String); 3]>,
}

impl Taxon {
    /// Stable identifier, `{rank}_{normalized_scientific_name}`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Classification label (for example `kingdom` or `genus`).
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// Common display name, if authored.
    pub fn canonical_name(&self) -> Option<&str> {
        self.canonical_name.as_deref()
    }

    /// Scientific name, if authored.
    pub fn scientific_name(&self) -> Option<&str> {
        self.scientific_name.as_deref()
    }

    /// Alternate names in authored order.
    pub fn other_names(&self) -> &[String] {
        &self.other_names
    }

    /// The canonical name, falling back to the scientific name.
    pub fn display_name(&self) -> &str {
        self.canonical_name
            .as_deref()
            .or(self.scientific_name.as_deref())
            .unwrap_or_default()
    }

    /// Parent handle, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in authored order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if this taxon has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if any name in `fields` contains `needle`.
    ///
    /// `needle` must already be trimmed and lower-cased.
    pub(crate) fn matches(&self, needle: &str, fields: NameFields) -> bool {
        self.search_keys
            .iter()
            .any(|(field, key)| fields.intersects(*field) && key.contains(needle))
    }
}
