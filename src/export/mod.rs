//! CSV export of result rows and fetched comments.
//!
//! Rendering is pure ([`build_csv`], [`videos_csv`], [`comments_csv`]); only
//! [`save_csv`] touches the filesystem.

mod columns;
mod csv;

pub use columns::{
    comment_value, comments_filename, selected_comments_filename, video_value, videos_filename,
    VideoExportContext, COMMENT_HEADERS, VIDEO_HEADERS,
};
pub use csv::{build_csv, save_csv};

use crate::error_handling::ExportError;
use crate::rows::{CommentRow, VideoRow};

/// Renders the video export for `rows`.
pub fn videos_csv(rows: &[VideoRow], context: &VideoExportContext) -> Result<String, ExportError> {
    build_csv(&VIDEO_HEADERS, rows, |row, key| video_value(row, key, context))
}

/// Renders the comment export for `rows`.
pub fn comments_csv(rows: &[CommentRow]) -> Result<String, ExportError> {
    build_csv(&COMMENT_HEADERS, rows, comment_value)
}
