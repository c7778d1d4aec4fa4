// src/github/fetch.rs
// =============================================================================
// This module fetches the owner's repositories from the GitHub REST API.
//
// Strategy:
// - Ask for the owner's public repos and the owner's starred repos
// - Send both requests at the same time and wait for both answers
// - Keep only repos that appear in both lists (matched by numeric id)
// - Sort the survivors so the most recently updated repo comes first
//
// Why the API and not raw.githubusercontent.com?
// - We need listings (repos, stars), not file contents
// - Unauthenticated calls are enough: we only read public data
//
// Rust concepts:
// - async functions + futures::join!: Two network calls in parallel
// - Result with a custom error type: FetchError says which request failed
// - HashSet: O(1) membership checks for the intersection
// - String parsing: To extract owner/repo from a typed path
// =============================================================================

use anyhow::{anyhow, Result};
use futures::join;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

use super::error::{FetchError, RepoRequest};
use super::types::{Repository, StarredItem};

/// Owner used when nobody passes `--user`
pub const DEFAULT_USERNAME: &str = "IsaacSSilva";

/// Public GitHub API; tests point this at a local mock server
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

// GitHub caps a page at 100 items and we never ask for a second page
const PER_PAGE: &str = "100";

const REPOS_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
// The star media type adds `starred_at` and wraps each repo in `{ repo: ... }`
const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

// Where to fetch from and whose repositories to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub username: String,
    pub api_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GithubConfig {
    // GET /users/{username}/repos?per_page=100&sort=updated&type=public
    fn owned_repos_url(&self) -> Result<Url, FetchError> {
        self.endpoint(
            "repos",
            &[("per_page", PER_PAGE), ("sort", "updated"), ("type", "public")],
        )
    }

    // GET /users/{username}/starred?per_page=100
    fn starred_repos_url(&self) -> Result<Url, FetchError> {
        self.endpoint("starred", &[("per_page", PER_PAGE)])
    }

    fn endpoint(&self, listing: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/users/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.username,
            listing
        );
        Url::parse_with_params(&raw, params).map_err(|source| FetchError::InvalidUrl {
            url: raw,
            source,
        })
    }
}

// Builds the HTTP client shared by every fetch
//
// GitHub rejects API calls without a User-Agent header, so we always send
// "repo-picker/<version>".
pub fn build_client() -> Result<Client, FetchError> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

// Fetches the repositories the owner both owns and has starred
//
// Parameters:
//   client: reqwest HTTP client (borrowed, cheap to reuse)
//   config: which API and which user
//
// Returns: Result<Vec<Repository>, FetchError>
//   Success: owned ∩ starred, newest update first
//   Error: the first failing request (owned is checked before starred)
pub async fn fetch_starred_own_repos(
    client: &Client,
    config: &GithubConfig,
) -> Result<Vec<Repository>, FetchError> {
    let owned_url = config.owned_repos_url()?;
    let starred_url = config.starred_repos_url()?;

    info!(user = %config.username, "fetching owned and starred repositories");

    // Both requests are in flight at the same time; join! waits for both
    let (owned_res, starred_res) = join!(
        client.get(owned_url).header(ACCEPT, REPOS_MEDIA_TYPE).send(),
        client.get(starred_url).header(ACCEPT, STAR_MEDIA_TYPE).send(),
    );

    let owned_res = ensure_success(RepoRequest::Owned, owned_res?)?;
    let starred_res = ensure_success(RepoRequest::Starred, starred_res?)?;

    let owned: Vec<Repository> = read_json(RepoRequest::Owned, owned_res).await?;
    let starred: Vec<StarredItem> = read_json(RepoRequest::Starred, starred_res).await?;

    debug!(
        owned = owned.len(),
        starred = starred.len(),
        last_starred = ?starred.iter().filter_map(|item| item.starred_at).max(),
        "received repository listings"
    );

    let starred: Vec<Repository> = starred.into_iter().map(|item| item.repo).collect();

    let mut repos = intersect_starred(owned, &starred);
    sort_by_recency(&mut repos);

    info!(count = repos.len(), "starred own repositories ready");
    Ok(repos)
}

// Turns a non-2xx response into FetchError::Status
fn ensure_success(request: RepoRequest, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if !status.is_success() {
        warn!(%request, status = status.as_u16(), "GitHub returned an error status");
        return Err(FetchError::Status {
            request,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

// Reads the body and decodes it ourselves so a bad payload is reported as a
// decode error for that request rather than a generic reqwest error
async fn read_json<T: DeserializeOwned>(
    request: RepoRequest,
    response: Response,
) -> Result<T, FetchError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| FetchError::Decode { request, source })
}

// Keeps the owned repositories whose id also appears in the starred list
//
// Builds a HashSet of starred ids first, so this is O(n + m) instead of
// comparing every owned repo against every starred repo.
// The order of `owned` is preserved.
pub fn intersect_starred(owned: Vec<Repository>, starred: &[Repository]) -> Vec<Repository> {
    let starred_ids: HashSet<u64> = starred.iter().map(|repo| repo.id).collect();

    owned
        .into_iter()
        .filter(|repo| starred_ids.contains(&repo.id))
        .collect()
}

// Sorts newest `updated_at` first
//
// sort_by is stable, so repos with equal timestamps keep their order.
// Repos without a timestamp end up last (None < Some in Option's ordering).
pub fn sort_by_recency(repos: &mut [Repository]) {
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

// An owner and (optionally) one of their repositories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub repo: Option<String>,
}

impl RepoPath {
    // The canonical web URL for this path
    pub fn web_url(&self) -> String {
        match &self.repo {
            Some(repo) => format!("https://github.com/{}/{}", self.owner, repo),
            None => format!("https://github.com/{}", self.owner),
        }
    }
}

// Parses a GitHub path like the one shown in the picker
//
// Supported formats:
//   - github.com/owner
//   - github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - www.github.com/owner/repo/
//
// Example:
//   "github.com/IsaacSSilva/Portfolio" -> owner "IsaacSSilva", repo Some("Portfolio")
pub fn parse_repo_path(text: &str) -> Result<RepoPath> {
    // Remove common prefixes
    let trimmed = text
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    // Should start with github.com
    let Some(path) = trimmed.strip_prefix("github.com/") else {
        return Err(anyhow!("Not a GitHub path: {}", text));
    };

    // Split by '/' and drop empty pieces (trailing slashes)
    let mut parts = path.split('/').filter(|part| !part.is_empty());

    let owner = parts
        .next()
        .ok_or_else(|| anyhow!("GitHub path has no owner: {}", text))?
        .to_string();

    // Remove .git suffix if present
    let repo = parts
        .next()
        .map(|repo| repo.trim_end_matches(".git").to_string())
        .filter(|repo| !repo.is_empty());

    Ok(RepoPath { owner, repo })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does futures::join! do?
//    - Polls several futures together and returns all their outputs as a tuple
//    - Like Promise.all() in JavaScript, except it doesn't stop at the first
//      error: each output is its own Result that we inspect afterwards
//
// 2. Why a custom FetchError instead of anyhow here?
//    - The data source needs to know *which* request failed and with what
//      status, and the tests check exactly that
//    - anyhow is still used by parse_repo_path, which only feeds the CLI
//
// 3. What is DeserializeOwned?
//    - A serde trait bound meaning "can be built from JSON without borrowing
//      from the input buffer"
//    - Needed because the response bytes are dropped when read_json returns
//
// 4. Why `let ... else`?
//    - Binds a pattern or runs the else block, which must return/break
//    - Saves a level of nesting compared to match
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo(id: u64, name: &str, updated_at: &str) -> Repository {
        serde_json::from_value(json!({ "id": id, "name": name, "updated_at": updated_at }))
            .unwrap()
    }

    fn config_for(server: &MockServer) -> GithubConfig {
        GithubConfig {
            username: "octo".to_string(),
            api_base: server.uri(),
        }
    }

    async fn mount_owned(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .and(query_param("per_page", "100"))
            .and(query_param("sort", "updated"))
            .and(query_param("type", "public"))
            .and(header("accept", REPOS_MEDIA_TYPE))
            .respond_with(template)
            .mount(server)
            .await;
    }

    async fn mount_starred(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/users/octo/starred"))
            .and(query_param("per_page", "100"))
            .and(header("accept", STAR_MEDIA_TYPE))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn test_intersect_keeps_only_starred_owned() {
        let owned = vec![
            repo(1, "X", "2024-01-01T00:00:00Z"),
            repo(2, "Y", "2024-01-02T00:00:00Z"),
        ];
        let starred = vec![repo(1, "X", "2024-01-01T00:00:00Z"), repo(99, "Other", "2024-01-01T00:00:00Z")];

        let result = intersect_starred(owned, &starred);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[0].name, "X");
    }

    #[test]
    fn test_sort_by_recency_newest_first() {
        let mut repos = vec![
            repo(1, "old", "2023-01-01T00:00:00Z"),
            repo(2, "new", "2024-06-01T00:00:00Z"),
            repo(3, "mid", "2023-09-01T00:00:00Z"),
        ];
        repos.push(serde_json::from_value(json!({ "id": 4, "name": "undated" })).unwrap());

        sort_by_recency(&mut repos);
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_endpoint_urls() {
        let config = GithubConfig {
            username: "octo".to_string(),
            api_base: "https://api.github.com/".to_string(),
        };
        assert_eq!(
            config.owned_repos_url().unwrap().as_str(),
            "https://api.github.com/users/octo/repos?per_page=100&sort=updated&type=public"
        );
        assert_eq!(
            config.starred_repos_url().unwrap().as_str(),
            "https://api.github.com/users/octo/starred?per_page=100"
        );
    }

    #[test]
    fn test_invalid_api_base() {
        let config = GithubConfig {
            username: "octo".to_string(),
            api_base: "not a url".to_string(),
        };
        assert!(matches!(
            config.owned_repos_url(),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_intersects_and_sorts() {
        let server = MockServer::start().await;
        mount_owned(
            &server,
            ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "name": "X", "updated_at": "2024-01-01T00:00:00Z" },
                { "id": 2, "name": "Y", "updated_at": "2024-03-01T00:00:00Z" },
                { "id": 3, "name": "Z", "updated_at": "2024-02-01T00:00:00Z" }
            ])),
        )
        .await;
        mount_starred(
            &server,
            ResponseTemplate::new(200).set_body_json(json!([
                { "starred_at": "2024-04-01T00:00:00Z", "repo": { "id": 1, "name": "X" } },
                { "starred_at": "2024-04-02T00:00:00Z", "repo": { "id": 3, "name": "Z" } }
            ])),
        )
        .await;

        let client = build_client().unwrap();
        let repos = fetch_starred_own_repos(&client, &config_for(&server))
            .await
            .unwrap();

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "X"]);
    }

    #[tokio::test]
    async fn test_fetch_owned_failure_names_request() {
        let server = MockServer::start().await;
        mount_owned(&server, ResponseTemplate::new(404)).await;
        mount_starred(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let client = build_client().unwrap();
        let err = fetch_starred_own_repos(&client, &config_for(&server))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status {
                request: RepoRequest::Owned,
                status: 404
            }
        ));
        assert_eq!(err.to_string(), "failed to fetch owned repositories: status 404");
    }

    #[tokio::test]
    async fn test_fetch_starred_failure_names_request() {
        let server = MockServer::start().await;
        mount_owned(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;
        mount_starred(&server, ResponseTemplate::new(500)).await;

        let client = build_client().unwrap();
        let err = fetch_starred_own_repos(&client, &config_for(&server))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to fetch starred repositories: status 500");
    }

    #[tokio::test]
    async fn test_fetch_bad_json_is_decode_error() {
        let server = MockServer::start().await;
        mount_owned(&server, ResponseTemplate::new(200).set_body_string("not json")).await;
        mount_starred(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let client = build_client().unwrap();
        let err = fetch_starred_own_repos(&client, &config_for(&server))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Decode {
                request: RepoRequest::Owned,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_repo_path() {
        let parsed = parse_repo_path("github.com/IsaacSSilva/Portfolio").unwrap();
        assert_eq!(parsed.owner, "IsaacSSilva");
        assert_eq!(parsed.repo.as_deref(), Some("Portfolio"));
        assert_eq!(parsed.web_url(), "https://github.com/IsaacSSilva/Portfolio");
    }

    #[test]
    fn test_parse_repo_path_with_scheme_and_git() {
        let parsed = parse_repo_path("https://github.com/user/repo.git").unwrap();
        assert_eq!(parsed.owner, "user");
        assert_eq!(parsed.repo.as_deref(), Some("repo"));
    }

    #[test]
    fn test_parse_repo_path_owner_only() {
        let parsed = parse_repo_path("github.com/user/").unwrap();
        assert_eq!(parsed.owner, "user");
        assert_eq!(parsed.repo, None);
        assert_eq!(parsed.web_url(), "https://github.com/user");
    }

    #[test]
    fn test_parse_invalid_path() {
        assert!(parse_repo_path("https://gitlab.com/user/repo").is_err());
        assert!(parse_repo_path("github.com/").is_err());
    }
}
