//! Progress logging utilities.

use std::sync::Arc;

use log::info;

use crate::search::{ProgressCallback, SearchProgress};

/// Logs one progress update of a running search.
///
/// # Arguments
///
/// * `progress` - The latest progress snapshot
pub fn log_progress(progress: &SearchProgress) {
    info!(
        "Searching: {}/{} pages processed ({} ids fetched, {} rows kept)",
        progress.current_page,
        progress.total_pages,
        progress.total_fetched,
        progress.total_filtered
    );
}

/// A progress callback that logs every update.
pub fn progress_logger() -> ProgressCallback {
    Some(Arc::new(log_progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_does_not_panic() {
        log_progress(&SearchProgress::default());
        log_progress(&SearchProgress {
            current_page: 3,
            total_pages: 10,
            total_fetched: 150,
            total_filtered: 0,
        });
        log_progress(&SearchProgress {
            current_page: 10,
            total_pages: 10,
            total_fetched: 500,
            total_filtered: 12,
        });
    }

    #[test]
    fn test_progress_logger_is_set() {
        let callback = progress_logger();
        assert!(callback.is_some());
        if let Some(cb) = callback {
            cb(&SearchProgress::default());
        }
    }
}
