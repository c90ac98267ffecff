use std::fmt;

use crate::error::CoreError;

/// Platform-native post identifier, e.g. `1abcd2` in
/// `https://www.reddit.com/r/rust/comments/1abcd2/some_title/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostId(String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PostId {
    type Error = CoreError;

    /// Takes the third-from-last `/` segment of a canonical comments URL.
    /// Short links, missing trailing slashes and other shapes are rejected.
    fn try_from(url: &str) -> Result<Self, Self::Error> {
        let segments: Vec<&str> = url.trim().split('/').collect();
        if segments.len() < 4 {
            return Err(CoreError::UnsupportedUrl(url.to_string()));
        }
        let candidate = segments[segments.len() - 3];
        let marker = segments[segments.len() - 4];
        if marker != "comments" {
            return Err(CoreError::UnsupportedUrl(url.to_string()));
        }
        if candidate.is_empty() || !candidate.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(CoreError::UnsupportedUrl(url.to_string()));
        }
        Ok(PostId(candidate.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
