use std::fmt;

/// Canonical location of one cover image.
///
/// Values are only produced by [`crate::Normalizer`] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoverUrl(String);

impl CoverUrl {
    pub(crate) fn from_canonical(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Final path segment of the URL.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for CoverUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CoverUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
