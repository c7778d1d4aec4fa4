// src/source/mod.rs
// =============================================================================
// The repository data source.
//
// Owns the result of the last fetch (`items`, `loading`, `error`) and runs
// new fetches in the background so the terminal UI never blocks on the
// network. The UI reads the state; it never mutates the list.
// =============================================================================

mod repo_source;

pub use repo_source::RepoSource;
