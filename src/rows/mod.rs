//! Result rows and the row builder.

mod builder;
mod models;

pub use builder::{build_rows, build_video_row, spread_rate, RowRules};
pub use models::{CommentRow, VideoRow};
