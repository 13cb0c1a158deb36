//! Integration tests for the folio workspace tree

mod cli_replay;
mod drag_drop;
mod fixtures;
mod mutation_scenarios;
mod selection_navigation;
mod tree_invariants;
