// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Fetching the owner's public repositories and starred repositories
// - Intersecting the two lists (repos the owner both owns and has starred)
// - Sorting the result so the most recently updated repo comes first
// - Parsing `github.com/<owner>/<repo>` paths typed by the user
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod error;
mod fetch;
mod types;

// Re-export the pieces the rest of the app needs
pub use error::FetchError;
pub use fetch::{
    build_client, fetch_starred_own_repos, parse_repo_path, GithubConfig, DEFAULT_API_BASE,
    DEFAULT_USERNAME,
};
pub use types::Repository;
