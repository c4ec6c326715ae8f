//! Covers core: pure URL normalization and ordered deduplication.
mod cover_url;
mod normalize;
mod url_set;

pub use cover_url::CoverUrl;
pub use normalize::{
    NormalizeSkip, NormalizedBatch, Normalizer, SkippedUrl, CANONICAL_STYLE, CANONICAL_SUFFIX,
    DEFAULT_SITE_BASE,
};
pub use url_set::UrlSet;
