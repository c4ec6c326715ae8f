use std::collections::HashSet;

use crate::CoverUrl;

/// Ordered set of cover URLs: unique by exact string, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    order: Vec<CoverUrl>,
    seen: HashSet<CoverUrl>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the URL was already present; the original position is kept.
    pub fn insert(&mut self, url: CoverUrl) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn contains(&self, url: &CoverUrl) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoverUrl> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[CoverUrl] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<CoverUrl> {
        self.order
    }
}

impl Extend<CoverUrl> for UrlSet {
    fn extend<T: IntoIterator<Item = CoverUrl>>(&mut self, iter: T) {
        for url in iter {
            self.insert(url);
        }
    }
}

impl FromIterator<CoverUrl> for UrlSet {
    fn from_iter<T: IntoIterator<Item = CoverUrl>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a CoverUrl;
    type IntoIter = std::slice::Iter<'a, CoverUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
