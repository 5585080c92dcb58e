// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic taxon identifiers.

use alloc::string::String;

/// Normalize a name for use inside an identifier.
///
/// The result is lower-case, every run of non-alphanumeric characters is
/// collapsed into a single `_`, and no `_` is left at either end.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Derive the identifier of a taxon from its rank and name.
///
/// ```
/// use understory_taxonomy::taxon_id;
///
/// assert_eq!(taxon_id("Species", "Canis lupus"), "species_canis_lupus");
/// assert_eq!(taxon_id("genus", " Canis  "), "genus_canis");
/// ```
pub fn taxon_id(rank: &str, name: &str) -> String {
    let rank = normalize_name(rank);
    let name = normalize_name(name);
    let mut id = String::with_capacity(rank.len() + name.len() + 1);
    id.push_str(&rank);
    id.push('_');
    id.push_str(&name);
    id
}
