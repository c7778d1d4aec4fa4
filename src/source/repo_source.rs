// src/source/repo_source.rs
// =============================================================================
// RepoSource: `{ items, loading, error, refetch }` for the picker.
//
// How it works:
// 1. refetch() bumps a generation number, opens a fresh oneshot channel and
//    spawns a tokio task that owns the sending half
// 2. The task runs the two GitHub requests and sends the result back
// 3. The UI loop calls poll() every frame to pick up the finished result
// 4. Calling refetch() again replaces the receiver, so an older fetch can
//    never publish even though its requests keep running
// 5. If the task dies without sending (panic, runtime shutdown), the sender
//    is dropped, the channel closes, and that shows up as an error
//
// Rust concepts:
// - tokio::spawn: Run a future in the background on the runtime
// - oneshot channels: Exactly one result per fetch, closed when the task ends
// - try_recv vs .await: Non-blocking poll for the UI, awaiting for the CLI
// =============================================================================

use reqwest::Client;
use std::future::Future;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::github::{fetch_starred_own_repos, FetchError, GithubConfig, Repository};

// Shown if a fetch ends without ever reporting back
const UNKNOWN_FETCH_ERROR: &str = "unknown error while fetching repositories";

type FetchResult = Result<Vec<Repository>, String>;

// The fetch whose result we are still waiting for
struct Pending {
    generation: u64,
    rx: oneshot::Receiver<FetchResult>,
}

pub struct RepoSource {
    client: Client,
    config: GithubConfig,
    items: Vec<Repository>,
    loading: bool,
    error: Option<String>,
    // Incremented by every refetch(); only used to tell fetches apart in logs
    generation: u64,
    pending: Option<Pending>,
}

impl RepoSource {
    /// Creates an idle source. Nothing is fetched until [`RepoSource::refetch`].
    ///
    /// Starts out `loading`, like a component that fetches as soon as it is
    /// mounted.
    pub fn new(client: Client, config: GithubConfig) -> Self {
        Self {
            client,
            config,
            items: Vec::new(),
            loading: true,
            error: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    pub fn items(&self) -> &[Repository] {
        &self.items
    }

    /// Repository names in published order, ready for the picker
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|repo| repo.name.clone()).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a new fetch in the background.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn refetch(&mut self) {
        let client = self.client.clone();
        let config = self.config.clone();
        self.start_fetch(async move { fetch_starred_own_repos(&client, &config).await });
    }

    // Spawns `fetch` and makes it the only fetch allowed to publish
    fn start_fetch<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<Vec<Repository>, FetchError>> + Send + 'static,
    {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        let generation = self.generation;
        let (tx, rx) = oneshot::channel();
        // Dropping the previous receiver silences the fetch it belonged to
        if let Some(previous) = self.pending.replace(Pending { generation, rx }) {
            debug!(stale = previous.generation, generation, "superseding fetch");
        }

        debug!(generation, user = %self.config.username, "starting repository fetch");

        tokio::spawn(async move {
            let result = fetch.await.map_err(|err| {
                warn!(generation, error = %err, "repository fetch failed");
                err.to_string()
            });
            // The receiver is gone when a newer refetch replaced it
            if tx.send(result).is_err() {
                debug!(generation, "dropping stale fetch result");
            }
        });
    }

    /// Applies the finished fetch without blocking.
    ///
    /// Returns `true` if the published state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => {
                warn!(generation = pending.generation, "fetch task ended without a result");
                Err(UNKNOWN_FETCH_ERROR.to_string())
            }
        };
        self.pending = None;
        self.apply(result);
        true
    }

    /// Waits until the latest fetch has been applied.
    ///
    /// Starts one first if none was ever requested.
    pub async fn wait(&mut self) {
        if self.generation == 0 {
            self.refetch();
        }

        let Some(pending) = self.pending.take() else {
            return;
        };
        let result = pending.rx.await.unwrap_or_else(|_| {
            warn!(generation = pending.generation, "fetch task ended without a result");
            Err(UNKNOWN_FETCH_ERROR.to_string())
        });
        self.apply(result);
    }

    fn apply(&mut self, result: FetchResult) {
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.loading = false;
            }
            Err(message) => self.fail(message),
        }
    }

    fn fail(&mut self, message: String) {
        self.items.clear();
        self.error = Some(message);
        self.loading = false;
    }

    /// A source that already finished a successful fetch
    #[cfg(test)]
    pub(crate) fn ready(items: Vec<Repository>) -> Self {
        let mut source = Self::new(Client::new(), GithubConfig::default());
        source.items = items;
        source.loading = false;
        source
    }
}
