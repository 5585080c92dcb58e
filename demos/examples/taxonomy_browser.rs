// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load the bundled sample taxonomy, search it, and click through a selection.
//!
//! Run:
//! - `cargo run -p understory_demos --example taxonomy_browser`
//! - `RUST_LOG=info cargo run -p understory_demos --example taxonomy_browser` (demo steps)
//! - `RUST_LOG=trace cargo run -p understory_demos --example taxonomy_browser`

use understory_taxonomy::{
    Forest, NodeId, PopularItems, Selection, SelectionPolicy, ViewState, popular_ids_from_json,
};

fn print_tree(forest: &Forest, view: &ViewState, selection: &Selection, node: NodeId) {
    let Some(taxon) = forest.node(node) else {
        return;
    };
    let depth = forest.depth(node).unwrap_or(0);
    let mark = if selection.contains(taxon.id()) { "[x]" } else { "[ ]" };
    let star = if view.is_highlighted(node) { " *" } else { "" };
    println!(
        "{:indent$}{mark} {} ({}){star}",
        "",
        taxon.display_name(),
        taxon.rank(),
        indent = depth * 2
    );
    if view.is_expanded(node) {
        for &child in taxon.children() {
            print_tree(forest, view, selection, child);
        }
    }
}

fn show(forest: &Forest, view: &ViewState, selection: &Selection) {
    for &root in forest.roots() {
        print_tree(forest, view, selection, root);
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let forest = Forest::from_json(include_str!("../../understory_taxonomy/data/taxonomy.json"))?;
    let allow = popular_ids_from_json(include_str!("../../understory_taxonomy/data/popular.json"))?;
    let popular = PopularItems::new(&forest, &allow);
    tracing::info!(taxa = forest.len(), popular = popular.len(), "loaded bundled taxonomy");
    println!("{forest:?}");

    println!("Popular:");
    for node in popular.iter() {
        if let Some(taxon) = forest.node(node) {
            println!("  {} ({})", taxon.display_name(), taxon.id());
        }
    }
    println!();

    let mut view = ViewState::new();
    let mut selection = Selection::from_ids(["legacy_saved_rank"]);

    println!("Search \"wolf\":");
    let result = forest.search("wolf");
    tracing::info!(matches = result.matches().len(), "searched for \"wolf\"");
    view.apply_search(&result);
    show(&forest, &view, &selection);

    let (Some(lupus), Some(latrans)) = (
        forest.get("species_canis_lupus"),
        forest.get("species_canis_latrans"),
    ) else {
        return Err("sample dataset is missing Canis".into());
    };

    println!("Select both Canis species:");
    selection = forest.toggle(&selection, lupus);
    selection = forest.toggle(&selection, latrans);
    tracing::info!(selected = selection.len(), "selected both Canis species");
    show(&forest, &view, &selection);

    println!("Deselect the wolf, breaking completeness all the way up:");
    selection = forest.toggle_with(&selection, lupus, SelectionPolicy::new().deselect_ancestors());
    show(&forest, &view, &selection);

    view.clear();
    tracing::info!(selected = selection.len(), "view cleared");
    println!("Cleared view; saved selection: {:?}", selection.to_sorted_vec());
    Ok(())
}
