// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_taxonomy --heading-base-level=0

//! Understory Taxonomy: an immutable taxonomy forest with cascading selection and name search.
//!
//! Understory Taxonomy is a reusable building block for hierarchical pickers such as rank
//! browsers, category trees, and tag hierarchies.
//!
//! - Builds an immutable forest once from nested authored data, deriving stable identifiers.
//! - Answers traversal queries: ancestor chains, descendants, siblings, parents.
//! - Computes cascading multi-select as a pure function over an external [`Selection`].
//! - Searches names case-insensitively and returns the ancestors needed to reveal every match.
//!
//! ## State lives outside the tree
//!
//! The [`Forest`] never changes after it is built. Selection, highlight, and expansion are
//! plain sets owned by the host and passed into each call:
//! - [`Forest::toggle`] takes a [`Selection`] and returns a new one.
//! - [`Forest::search`] returns a [`SearchResult`], which a [`ViewState`] can absorb.
//!
//! Nothing here performs I/O or keeps state between calls, so one forest can serve any
//! number of views.
//!
//! ## Selection rules
//!
//! - Selecting a node selects its whole subtree. Each ancestor whose children are then all
//!   selected becomes selected too, walking upward until an incomplete ancestor is found.
//! - Deselecting a node deselects its whole subtree and its parent. By default the walk stops
//!   there; [`SelectionPolicy::deselect_ancestors`] continues up the chain.
//! - Identifiers in a [`Selection`] that the forest does not know are kept as they are.
//!
//! ## API overview
//!
//! - [`RawTaxon`]: authored input, nested.
//! - [`Forest`]: the built arena. [`Forest::build`] / [`Forest::try_build`] / `Forest::from_json`.
//! - [`Taxon`]: read-only node data. [`NodeId`]: handle into a forest.
//! - [`Forest::ancestor_chain`], [`Forest::path_to`], [`Forest::descendants`],
//!   [`Forest::siblings`], [`Forest::parent_of`].
//! - [`Forest::toggle`] / [`Forest::toggle_with`] with [`SelectionPolicy`].
//! - [`Forest::search`] / [`Forest::search_with`] with [`SearchOptions`] and [`NameFields`].
//! - [`ViewState`]: expansion and highlight of one tree view.
//! - [`PopularItems`]: an alphabetized shortcut list derived from an allow-list.
//!
//! ## Example
//!
//! ```rust
//! use understory_taxonomy::{Forest, RawTaxon, Selection};
//!
//! let forest = Forest::build([RawTaxon::new("family")
//!     .canonical("Canines")
//!     .scientific("Canidae")
//!     .child(RawTaxon::new("species").canonical("Wolf").scientific("Canis lupus"))
//!     .child(RawTaxon::new("species").canonical("Coyote").scientific("Canis latrans"))]);
//!
//! // Selecting the family selects both species.
//! let family = forest.get("family_canidae").unwrap();
//! let selection = forest.toggle(&Selection::new(), family);
//! assert_eq!(selection.len(), 3);
//!
//! // Searching reveals the family above the match.
//! let result = forest.search("coy");
//! assert!(result.is_expanded(family));
//! ```
//!
//! ## Features
//!
//! - `json` *(default)*: `Forest::from_json` and `popular_ids_from_json` for bundled data.
//! - `serde`: `Deserialize`/`Serialize` for [`RawTaxon`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod forest;
mod id;
mod popular;
mod raw;
mod search;
mod selection;
mod types;
mod view;

pub use error::BuildError;
#[cfg(feature = "json")]
pub use error::JsonError;
pub use forest::{Ancestors, Descendants, Forest};
pub use id::{normalize_name, taxon_id};
#[cfg(feature = "json")]
pub use popular::popular_ids_from_json;
pub use popular::PopularItems;
pub use raw::RawTaxon;
pub use search::{SearchOptions, SearchResult};
pub use selection::{DeselectPropagation, Selection, SelectionPolicy};
pub use types::{NameFields, NodeId, Path, Taxon};
pub use view::ViewState;
