//! Admission filter and item conversion for Reddit posts.

use crate::types::{RawItem, Source};

use super::reddit::PostData;

/// Minimum title length (in characters) for a post to be admitted.
const MIN_TITLE_LEN: usize = 15;

/// Minimum approval (upvote) ratio, when the field is present.
const MIN_APPROVAL_RATIO: f32 = 0.5;

/// Off-topic or low-signal communities excluded from results.
/// Matched case-insensitively.
const COMMUNITY_BLOCKLIST: &[&str] = &["anime", "memes", "funny", "pics"];

/// Decide whether a post passes the admission filter.
///
/// Rejects posts with a missing or empty title, a title shorter than
/// [`MIN_TITLE_LEN`] characters, a blocklisted subreddit, or an upvote ratio
/// below [`MIN_APPROVAL_RATIO`]. A post without a permalink is also rejected
/// here, so admitted posts always convert to an item and the keep cap counts
/// real survivors.
pub(super) fn admit(post: &PostData) -> bool {
    if post.permalink.is_none() {
        return false;
    }
    let Some(title) = post.title.as_deref() else {
        return false;
    };
    if title.is_empty() {
        return false;
    }
    if title.chars().count() < MIN_TITLE_LEN {
        return false;
    }
    if let Some(subreddit) = post.subreddit.as_deref() {
        let lowered = subreddit.to_lowercase();
        if COMMUNITY_BLOCKLIST.contains(&lowered.as_str()) {
            return false;
        }
    }
    if let Some(ratio) = post.upvote_ratio {
        if ratio < MIN_APPROVAL_RATIO {
            return false;
        }
    }
    true
}

/// Convert an admitted post into a [`RawItem`] with a reconstructed
/// permalink. Posts without a permalink are dropped.
pub(super) fn to_item(post: &PostData) -> Option<RawItem> {
    let title = post.title.clone()?;
    let permalink = post.permalink.as_deref()?;

    Some(RawItem {
        source: Source::Reddit,
        title,
        body: None,
        url: Some(format!("https://reddit.com{permalink}")),
    })
}
