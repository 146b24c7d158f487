//! ISO 8601 video duration parsing.

use regex::Regex;
use std::sync::LazyLock;

const DURATION_PATTERN: &str = r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$";

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DURATION_PATTERN).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}': {}. This is a programming error.",
            DURATION_PATTERN, e
        )
    })
});

/// Converts a `PT[nH][nM][nS]` duration into whole seconds.
///
/// Missing components count as zero, so `"PT"` is `Some(0)`. Returns `None`
/// for an absent or empty input and for anything outside the grammar
/// (day components, fractions, stray text).
///
/// # Examples
///
/// ```
/// use video_scout::duration::parse_duration_secs;
///
/// assert_eq!(parse_duration_secs(Some("PT1M1S")), Some(61));
/// assert_eq!(parse_duration_secs(Some("PT1H")), Some(3600));
/// assert_eq!(parse_duration_secs(None), None);
/// ```
pub fn parse_duration_secs(iso: Option<&str>) -> Option<u64> {
    let iso = iso.filter(|s| !s.is_empty())?;
    let caps = DURATION_RE.captures(iso)?;

    let component = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
