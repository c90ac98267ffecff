use serde::Serialize;

use crate::domain::thread::{ThreadComment, ThreadReply};
use crate::types::date_range::DateRange;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDigest {
    pub url: String,
    pub title: String,
    pub comments: Vec<CommentDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentDigest {
    pub body: String,
    pub score: i64,
    pub replies: Vec<ReplyDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyDigest {
    pub body: String,
    pub score: i64,
}

/// Ranking and date rules applied to one thread's comments.
#[derive(Debug, Clone, Copy)]
pub struct CommentSelection {
    pub want_count: usize,
    pub range: DateRange,
    pub include_replies: bool,
}

impl Default for CommentSelection {
    fn default() -> Self {
        Self {
            want_count: 5,
            range: DateRange::unbounded(),
            include_replies: false,
        }
    }
}

/// Inclusive bounds on a comment body's length in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

impl LengthBounds {
    pub fn contains(&self, body: &str) -> bool {
        let len = i64::try_from(body.chars().count()).unwrap_or(i64::MAX);
        self.min <= len && len <= self.max
    }
}

/// Ranks by score (stable, so ties keep platform order), caps at
/// `want_count`, then drops comments outside the date range. The cap is
/// applied before the date filter and dropped comments are not replaced.
pub fn select_comments(
    mut comments: Vec<ThreadComment>,
    selection: &CommentSelection,
) -> Vec<CommentDigest> {
    comments.sort_by(|a, b| b.score.cmp(&a.score));
    comments.truncate(selection.want_count);
    comments
        .into_iter()
        .filter(|comment| selection.range.contains(comment.created_at))
        .map(|comment| {
            let replies = if selection.include_replies {
                select_replies(comment.replies, &selection.range)
            } else {
                Vec::new()
            };
            CommentDigest {
                body: comment.body,
                score: comment.score,
                replies,
            }
        })
        .collect()
}

fn select_replies(replies: Vec<ThreadReply>, range: &DateRange) -> Vec<ReplyDigest> {
    replies
        .into_iter()
        .filter(|reply| range.contains(reply.created_at))
        .map(|reply| ReplyDigest {
            body: reply.body,
            score: reply.score,
        })
        .collect()
}

pub fn retain_by_length(comments: &mut Vec<CommentDigest>, bounds: &LengthBounds) {
    comments.retain(|comment| bounds.contains(&comment.body));
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn comment(body: &str, score: i64, day: u32) -> ThreadComment {
        ThreadComment {
            body: body.to_string(),
            score,
            created_at: at(day),
            replies: Vec::new(),
        }
    }

    fn reply(body: &str, score: i64, day: u32) -> ThreadReply {
        ThreadReply {
            body: body.to_string(),
            score,
            created_at: at(day),
        }
    }

    fn bodies(comments: &[CommentDigest]) -> Vec<&str> {
        comments.iter().map(|comment| comment.body.as_str()).collect()
    }

    #[test]
    fn ranks_by_score_and_caps() {
        let comments = vec![
            comment("low", 1, 1),
            comment("high", 50, 1),
            comment("negative", -3, 1),
            comment("mid", 10, 1),
        ];
        let selection = CommentSelection {
            want_count: 2,
            ..CommentSelection::default()
        };
        let selected = select_comments(comments, &selection);
        assert_eq!(bodies(&selected), vec!["high", "mid"]);
    }

    #[test]
    fn ties_keep_platform_order() {
        let comments = vec![
            comment("first", 7, 1),
            comment("top", 9, 1),
            comment("second", 7, 1),
            comment("third", 7, 1),
        ];
        let selected = select_comments(comments, &CommentSelection::default());
        assert_eq!(bodies(&selected), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn cap_applies_before_date_filter() {
        let comments = vec![
            comment("old but popular", 100, 1),
            comment("recent", 20, 20),
            comment("recent but cut", 5, 20),
        ];
        let selection = CommentSelection {
            want_count: 2,
            range: DateRange {
                start: at(10),
                end: at(31),
            },
            include_replies: false,
        };
        let selected = select_comments(comments, &selection);
        assert_eq!(bodies(&selected), vec!["recent"]);
    }

    #[test]
    fn replies_are_filtered_by_date_when_requested() {
        let mut parent = comment("parent", 10, 15);
        parent.replies = vec![reply("too old", 99, 2), reply("in range", 1, 16), reply("also", 3, 17)];
        let selection = CommentSelection {
            want_count: 5,
            range: DateRange {
                start: at(10),
                end: at(20),
            },
            include_replies: true,
        };
        let selected = select_comments(vec![parent.clone()], &selection);
        assert_eq!(selected.len(), 1);
        let replies: Vec<&str> = selected[0].replies.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(replies, vec!["in range", "also"]);

        let without = CommentSelection {
            include_replies: false,
            ..selection
        };
        let selected = select_comments(vec![parent], &without);
        assert!(selected[0].replies.is_empty());
    }

    #[test]
    fn length_bounds_are_inclusive_and_count_chars() {
        let bounds = LengthBounds { min: 2, max: 4 };
        assert!(!bounds.contains("a"));
        assert!(bounds.contains("ab"));
        assert!(bounds.contains("éèêë"));
        assert!(!bounds.contains("abcde"));
    }

    #[test]
    fn retain_by_length_drops_out_of_range_bodies() {
        let mut selected = select_comments(
            vec![comment("tiny", 3, 1), comment("a much longer body", 2, 1)],
            &CommentSelection::default(),
        );
        retain_by_length(&mut selected, &LengthBounds { min: 5, max: 1000 });
        assert_eq!(bodies(&selected), vec!["a much longer body"]);
    }

    #[test]
    fn serializes_without_timestamps() {
        let digest = PostDigest {
            url: "https://www.reddit.com/r/rust/comments/abc/t/".to_string(),
            title: "t".to_string(),
            comments: vec![CommentDigest {
                body: "hi".to_string(),
                score: -2,
                replies: vec![ReplyDigest {
                    body: "yo".to_string(),
                    score: 1,
                }],
            }],
        };
        let value = serde_json::to_value(&digest).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "url": "https://www.reddit.com/r/rust/comments/abc/t/",
                "title": "t",
                "comments": [{"body": "hi", "score": -2, "replies": [{"body": "yo", "score": 1}]}]
            })
        );
    }
}
