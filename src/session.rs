//! Operator session: the state a front end renders and the actions it triggers.
//!
//! A [`Session`] owns the API key (restored from a [`KeyStore`]), the current
//! result set, fetched comments, and the selection. All methods take `&self`
//! so one session can be shared across tasks.
//!
//! Overlapping searches are ordered by a generation counter: every search
//! takes the next generation, and a run applies its results only if no newer
//! search started in the meantime.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::api::{ApiClient, KeyCheck};
use crate::comments::{fetch_all_comments, CommentStore};
use crate::config::{Config, FilterConfig};
use crate::error_handling::{
    ApiError, ExportError, InitializationError, RequestStats, StorageError,
};
use crate::export::{
    comments_csv, comments_filename, save_csv, selected_comments_filename, videos_csv,
    videos_filename, VideoExportContext,
};
use crate::rows::{CommentRow, VideoRow};
use crate::search::{run_search, sorted, ProgressCallback, SearchProgress, SortState};
use crate::storage::KeyStore;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of the current search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub loading: bool,
    /// Keyword of the applied search
    pub keyword: String,
    pub rows: Vec<VideoRow>,
    pub total_before: usize,
    pub progress: SearchProgress,
    /// Error of the last search; kept until the next search starts
    pub error: Option<ApiError>,
}

/// What happened to a finished search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Results were stored in the session
    Applied,
    /// A newer search started first; results were discarded
    Superseded,
}

/// Marks a video's comment fetch as running until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    video_id: String,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a Mutex<HashSet<String>>, video_id: &str) -> Result<Self, ApiError> {
        if !lock(set).insert(video_id.to_string()) {
            return Err(ApiError::FetchInProgress(video_id.to_string()));
        }
        Ok(InFlight {
            set,
            video_id: video_id.to_string(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.video_id);
    }
}

pub struct Session {
    config: Config,
    client: ApiClient,
    store: Arc<dyn KeyStore>,
    api_key: Mutex<String>,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<SearchState>>,
    comments: Mutex<CommentStore>,
    loading_comments: Mutex<HashSet<String>>,
    selection: Mutex<Vec<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("client", &self.client)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Builds a session from `config`, restoring the API key from `store`.
    pub fn new(config: Config, store: Arc<dyn KeyStore>) -> Result<Self, InitializationError> {
        let client = ApiClient::new(&config, "")?;
        Ok(Self::with_client(config, client, store))
    }

    /// Builds a session around an existing client; the client's own key is
    /// replaced by the stored one.
    pub fn with_client(config: Config, client: ApiClient, store: Arc<dyn KeyStore>) -> Self {
        let api_key = store.load().unwrap_or_default();
        if !api_key.is_empty() {
            info!("Restored stored API key");
        }
        Session {
            config,
            client,
            store,
            api_key: Mutex::new(api_key),
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(SearchState::default())),
            comments: Mutex::new(CommentStore::new()),
            loading_comments: Mutex::new(HashSet::new()),
            selection: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api_key(&self) -> String {
        lock(&self.api_key).clone()
    }

    /// Replaces the in-memory key without persisting it.
    pub fn set_api_key(&self, key: &str) {
        *lock(&self.api_key) = key.trim().to_string();
    }

    pub fn stats(&self) -> &Arc<RequestStats> {
        self.client.stats()
    }

    fn keyed_client(&self) -> ApiClient {
        self.client.with_api_key(&self.api_key())
    }

    /// Probes the current key and persists it only when the probe succeeds.
    pub async fn verify_and_save_key(&self) -> Result<KeyCheck, StorageError> {
        let key = self.api_key();
        let check = self.client.with_api_key(&key).verify_key().await;
        if check.ok {
            self.store.save(&key)?;
            info!("API key verified and saved");
        } else {
            warn!(
                "API key verification failed: {}",
                check.reason.as_deref().unwrap_or("unknown reason")
            );
        }
        Ok(check)
    }

    /// Runs a search and stores its outcome, unless a newer search started first.
    ///
    /// Starting a search clears the previous rows, error, and selection.
    /// `callback` receives every progress update of this run.
    pub async fn search(
        &self,
        filter: &FilterConfig,
        callback: &ProgressCallback,
    ) -> Result<SearchStatus, ApiError> {
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.state) = SearchState {
            loading: true,
            ..SearchState::default()
        };
        lock(&self.selection).clear();

        let sink: ProgressCallback = {
            let state = Arc::clone(&self.state);
            let generation = Arc::clone(&self.generation);
            let outer = callback.clone();
            Some(Arc::new(move |progress: &SearchProgress| {
                {
                    // generation is read under the state lock
                    let mut snapshot = lock(&state);
                    if generation.load(Ordering::SeqCst) == run {
                        snapshot.progress = *progress;
                    }
                }
                if let Some(outer) = &outer {
                    outer(progress);
                }
            }))
        };

        let result = run_search(
            &self.keyed_client(),
            filter,
            self.config.short_cutoff_secs,
            Utc::now(),
            &sink,
        )
        .await;

        let mut state = lock(&self.state);
        if self.generation.load(Ordering::SeqCst) != run {
            warn!("Discarding results of superseded search #{}", run);
            return Ok(SearchStatus::Superseded);
        }
        state.loading = false;
        match result {
            Ok(outcome) => {
                state.keyword = outcome.keyword;
                state.rows = outcome.rows;
                state.total_before = outcome.total_before;
                state.progress = outcome.progress;
                Ok(SearchStatus::Applied)
            }
            Err(e) => {
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn search_state(&self) -> SearchState {
        lock(&self.state).clone()
    }

    pub fn rows(&self) -> Vec<VideoRow> {
        lock(&self.state).rows.clone()
    }

    /// Current rows re-sorted for display; the stored order is unchanged.
    pub fn sorted_rows(&self, sort: SortState) -> Vec<VideoRow> {
        sorted(&lock(&self.state).rows, sort)
    }

    pub fn search_error(&self) -> Option<ApiError> {
        lock(&self.state).error.clone()
    }

    pub fn progress(&self) -> SearchProgress {
        lock(&self.state).progress
    }

    /// Checks or unchecks `video_id`.
    pub fn set_selected(&self, video_id: &str, selected: bool) {
        let mut selection = lock(&self.selection);
        let position = selection.iter().position(|id| id == video_id);
        match (selected, position) {
            (true, None) => selection.push(video_id.to_string()),
            (false, Some(index)) => {
                selection.remove(index);
            }
            _ => {}
        }
    }

    /// Checks every current row, or unchecks all if every row is already checked.
    pub fn toggle_select_all(&self) {
        let ids: Vec<String> = self.rows().into_iter().map(|r| r.video_id).collect();
        let mut selection = lock(&self.selection);
        if !ids.is_empty() && ids.iter().all(|id| selection.contains(id)) {
            selection.clear();
        } else {
            for id in ids {
                if !selection.contains(&id) {
                    selection.push(id);
                }
            }
        }
    }

    /// Checked video ids in the order they were checked.
    pub fn selected(&self) -> Vec<String> {
        lock(&self.selection).clone()
    }

    pub fn is_loading_comments(&self, video_id: &str) -> bool {
        lock(&self.loading_comments).contains(video_id)
    }

    /// Fetches all comments of `video_id` and stores them, replacing any
    /// earlier fetch for that video.
    ///
    /// At most one fetch per video runs at a time; a second one fails with
    /// [`ApiError::FetchInProgress`]. On failure the stored comments of every
    /// video, this one included, are left as they were.
    pub async fn fetch_comments(&self, video_id: &str) -> Result<usize, ApiError> {
        let client = self.keyed_client();
        if !client.has_api_key() {
            return Err(ApiError::MissingApiKey);
        }
        let _in_flight = InFlight::acquire(&self.loading_comments, video_id)?;

        match fetch_all_comments(&client, video_id).await {
            Ok(rows) => {
                let count = rows.len();
                lock(&self.comments).replace(video_id, rows);
                info!("Stored {} comments for {}", count, video_id);
                Ok(count)
            }
            Err(e) => {
                warn!("Comment fetch for {} failed: {}", video_id, e);
                Err(e)
            }
        }
    }

    pub fn comments_for(&self, video_id: &str) -> Option<Vec<CommentRow>> {
        lock(&self.comments).get(video_id).map(<[CommentRow]>::to_vec)
    }

    /// Writes the current rows to `dir/videos_<timestamp>.csv`.
    pub fn export_videos(&self, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf, ExportError> {
        let (keyword, rows) = {
            let state = lock(&self.state);
            (state.keyword.clone(), state.rows.clone())
        };
        let content = videos_csv(&rows, &VideoExportContext::new(keyword, now))?;
        save_csv(dir, &videos_filename(now), &content)
    }

    /// Writes the fetched comments of `video_id` to
    /// `dir/comments_<videoId>_<timestamp>.csv`.
    pub fn export_comments(
        &self,
        video_id: &str,
        dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let rows = self.comments_for(video_id).unwrap_or_default();
        if rows.is_empty() {
            return Err(ExportError::NothingToExport(
                "Fetch comments first".to_string(),
            ));
        }
        let content = comments_csv(&rows)?;
        save_csv(dir, &comments_filename(video_id, now), &content)
    }

    /// Writes the fetched comments of every checked video to
    /// `dir/comments_selected_<timestamp>.csv`.
    pub fn export_selected_comments(
        &self,
        dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let selected = self.selected();
        let rows = lock(&self.comments).collect(selected.iter().map(String::as_str));
        if rows.is_empty() {
            return Err(ExportError::NothingToExport(
                "No fetched comments for the selected videos; fetch comments for each video first"
                    .to_string(),
            ));
        }
        let content = comments_csv(&rows)?;
        save_csv(dir, &selected_comments_filename(now), &content)
    }
}
