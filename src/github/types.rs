// src/github/types.rs
// =============================================================================
// The JSON shapes we read from the GitHub API.
//
// GitHub returns a lot more fields than we need. serde ignores unknown fields
// by default, so these structs only list what the picker and the `list`
// command actually use.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by `/users/{user}/repos`.
///
/// `id` is the identity used for the owned/starred intersection; `name` is
/// what ends up in the picker dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    /// Missing timestamps sort after every dated repository
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One entry of `/users/{user}/starred` when requested with the
/// `application/vnd.github.v3.star+json` media type.
///
/// That media type wraps the repository together with the time it was starred.
#[derive(Debug, Clone, Deserialize)]
pub struct StarredItem {
    #[serde(default)]
    pub starred_at: Option<DateTime<Utc>>,
    pub repo: Repository,
}
