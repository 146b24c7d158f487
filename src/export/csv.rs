//! CSV rendering and file saving.
//!
//! Every field, headers included, is wrapped in double quotes; embedded
//! quotes are doubled. Lines are separated by a single `\n` with no trailing
//! newline.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;

use crate::error_handling::ExportError;

/// Renders `rows` as CSV text.
///
/// `selector` is called once per `(row, header)` pair, in header order; a
/// `None` becomes an empty field. No I/O happens here.
///
/// # Examples
///
/// ```
/// use video_scout::export::build_csv;
///
/// let rows = vec![("1,2", "\"q\"")];
/// let csv = build_csv(&["a", "b"], &rows, |row, key| match key {
///     "a" => Some(row.0.to_string()),
///     "b" => Some(row.1.to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(csv, "\"a\",\"b\"\n\"1,2\",\"\"\"q\"\"\"");
/// ```
pub fn build_csv<R, F>(headers: &[&str], rows: &[R], selector: F) -> Result<String, ExportError>
where
    F: Fn(&R, &str) -> Option<String>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(
            headers
                .iter()
                .map(|key| selector(row, key).unwrap_or_default()),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Writes `content` to `dir/filename`, creating `dir` if needed, and returns
/// the written path.
pub fn save_csv(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, content)?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}
