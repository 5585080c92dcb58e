// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Authored input: the nested dataset a [`Forest`](crate::Forest) is built from.

use alloc::string::String;
use alloc::vec::Vec;

use crate::id::normalize_name;

/// One authored taxon, with its children nested inline.
///
/// Parent/child relations are implied by nesting; identifiers are derived
/// during the build. With the `serde` feature the JSON field names are
/// `rank`, `canonicalName`, `scientificName`, `otherNames`, and `children`.
///
/// ```
/// use understory_taxonomy::RawTaxon;
///
/// let canis = RawTaxon::new("genus")
///     .scientific("Canis")
///     .child(RawTaxon::new("species").canonical("Wolf").scientific("Canis lupus"));
/// assert_eq!(canis.children.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawTaxon {
    /// Classification label.
    pub rank: String,
    /// Common display name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub canonical_name: Option<String>,
    /// Scientific name; preferred over the canonical name when deriving the id.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub scientific_name: Option<String>,
    /// Alternate names, searchable.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub other_names: Vec<String>,
    /// Nested children.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<RawTaxon>,
}

impl RawTaxon {
    /// Create a nameless taxon of the given rank.
    pub fn new(rank: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            ..Self::default()
        }
    }

    /// Set the canonical name.
    pub fn canonical(mut self, name: impl Into<String>) -> Self {
        self.canonical_name = Some(name.into());
        self
    }

    /// Set the scientific name.
    pub fn scientific(mut self, name: impl Into<String>) -> Self {
        self.scientific_name = Some(name.into());
        self
    }

    /// Append an alternate name.
    pub fn other_name(mut self, name: impl Into<String>) -> Self {
        self.other_names.push(name.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// The name the identifier is derived from, if any.
    ///
    /// A name only counts if it normalizes to something; a blank or
    /// punctuation-only scientific name falls back to the canonical name.
    pub(crate) fn id_name(&self) -> Option<&str> {
        let usable = |name: &&str| !normalize_name(name).is_empty();
        self.scientific_name
            .as_deref()
            .filter(usable)
            .or_else(|| self.canonical_name.as_deref().filter(usable))
    }
}
