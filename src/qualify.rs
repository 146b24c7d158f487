//! View-to-subscriber ratio qualification and matched-rule tagging.
//!
//! [`qualifies_by_ratio`] is the only place the ratio rule is evaluated; the
//! row builder and the filter pipeline both call it.

use crate::config::RatioThreshold;

/// Returns `true` iff `view_count >= multiple * subscriber_count`.
///
/// Hidden or unknown subscriber counts never qualify.
///
/// # Examples
///
/// ```
/// use video_scout::qualify::qualifies_by_ratio;
///
/// assert!(qualifies_by_ratio(2500, Some(1000), false, 2));
/// assert!(!qualifies_by_ratio(2500, Some(1000), false, 3));
/// assert!(!qualifies_by_ratio(2500, None, false, 1));
/// assert!(!qualifies_by_ratio(2500, Some(1000), true, 1));
/// ```
pub fn qualifies_by_ratio(
    view_count: u64,
    subscriber_count: Option<u64>,
    hidden: bool,
    multiple: u64,
) -> bool {
    if hidden {
        return false;
    }
    match subscriber_count {
        Some(subscribers) => view_count >= multiple.saturating_mul(subscribers),
        None => false,
    }
}

/// The qualification criterion a row satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedRule {
    /// Views reached the configured multiple of subscribers
    Ratio(RatioThreshold),
    /// Views reached the minimum, ratio not met
    MinViews,
    /// Neither
    None,
}

impl MatchedRule {
    /// Ratio match wins over minimum views, which wins over none.
    pub fn select(by_ratio: bool, by_min_views: bool, threshold: RatioThreshold) -> Self {
        if by_ratio {
            MatchedRule::Ratio(threshold)
        } else if by_min_views {
            MatchedRule::MinViews
        } else {
            MatchedRule::None
        }
    }

    /// Export label: `"1x"`/`"2x"`/`"3x"`, `"minViews"`, or `"none"`.
    pub fn label(&self) -> &'static str {
        match self {
            MatchedRule::Ratio(threshold) => threshold.label(),
            MatchedRule::MinViews => "minViews",
            MatchedRule::None => "none",
        }
    }
}

impl std::fmt::Display for MatchedRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
