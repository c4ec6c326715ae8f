use std::fmt;

use url::Url;

use crate::{CoverUrl, UrlSet};

pub const DEFAULT_SITE_BASE: &str = "https://gameinformer.com";
pub const CANONICAL_STYLE: &str = "no_compression";
pub const CANONICAL_SUFFIX: &str = ".jpg.webp";

const FILES_ROOT: &str = "/sites/default/files/";
const STYLES_DIR: &str = "styles";
const PUBLIC_DIR: &str = "public";
const REPLACEABLE_EXTENSIONS: &[&str] = &[".jpeg", ".webp", ".jpg", ".png"];

/// Why a raw link could not become a [`CoverUrl`]. Skips are never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeSkip {
    Unparseable,
    UnsupportedScheme,
    ForeignHost,
    OutsideFilesTree,
    MissingFileName,
}

impl fmt::Display for NormalizeSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeSkip::Unparseable => write!(f, "not a parseable url"),
            NormalizeSkip::UnsupportedScheme => write!(f, "scheme is not http(s)"),
            NormalizeSkip::ForeignHost => write!(f, "host is not the cover site"),
            NormalizeSkip::OutsideFilesTree => write!(f, "path is outside /sites/default/files/"),
            NormalizeSkip::MissingFileName => write!(f, "no recognizable directory/file segments"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub raw: String,
    pub reason: NormalizeSkip,
}

/// Result of normalizing a whole extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub urls: UrlSet,
    pub skipped: Vec<SkippedUrl>,
}

/// Rewrites raw gallery links into the canonical download form:
/// `{site}/sites/default/files/styles/no_compression/public/{dirs}/{stem}.jpg.webp`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    base: Url,
}

impl Normalizer {
    pub fn new(site_base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(site_base)?;
        if base.host_str().is_none() {
            return Err(url::ParseError::EmptyHost);
        }
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn normalize(&self, raw: &str) -> Result<CoverUrl, NormalizeSkip> {
        let url = self.absolutize(raw)?;
        self.check_origin(&url)?;

        let relative = url
            .path()
            .strip_prefix(FILES_ROOT)
            .ok_or(NormalizeSkip::OutsideFilesTree)?;
        let mut segments: Vec<&str> = relative.split('/').collect();

        if segments.first() == Some(&STYLES_DIR) {
            if segments.len() < 3 || segments[2] != PUBLIC_DIR {
                return Err(NormalizeSkip::OutsideFilesTree);
            }
            segments.drain(..3);
        }

        if segments.len() < 2 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(NormalizeSkip::MissingFileName);
        }

        let (file, dirs) = segments
            .split_last()
            .ok_or(NormalizeSkip::MissingFileName)?;
        let file = canonical_file_name(file).ok_or(NormalizeSkip::MissingFileName)?;

        let origin = self.base.as_str().trim_end_matches('/');
        Ok(CoverUrl::from_canonical(format!(
            "{origin}{FILES_ROOT}{STYLES_DIR}/{CANONICAL_STYLE}/{PUBLIC_DIR}/{}/{file}",
            dirs.join("/")
        )))
    }

    /// Normalize every raw link, keeping first-seen order and dropping duplicates.
    pub fn normalize_all<'a, I>(&self, raws: I) -> NormalizedBatch
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut batch = NormalizedBatch::default();
        for raw in raws {
            match self.normalize(raw) {
                Ok(url) => {
                    batch.urls.insert(url);
                }
                Err(reason) => batch.skipped.push(SkippedUrl {
                    raw: raw.to_string(),
                    reason,
                }),
            }
        }
        batch
    }

    fn absolutize(&self, raw: &str) -> Result<Url, NormalizeSkip> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NormalizeSkip::Unparseable);
        }
        match Url::parse(trimmed) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base
                .join(trimmed)
                .map_err(|_| NormalizeSkip::Unparseable),
            Err(_) => Err(NormalizeSkip::Unparseable),
        }
    }

    fn check_origin(&self, url: &Url) -> Result<(), NormalizeSkip> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NormalizeSkip::UnsupportedScheme);
        }
        let host = url.host_str().map(strip_www).ok_or(NormalizeSkip::ForeignHost)?;
        let expected = self.base.host_str().map(strip_www).unwrap_or_default();
        if !host.eq_ignore_ascii_case(expected) || url.port() != self.base.port() {
            return Err(NormalizeSkip::ForeignHost);
        }
        Ok(())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_SITE_BASE).expect("default site base is a valid url"),
        }
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn canonical_file_name(name: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets, so slicing `name` with them is safe.
    let lower = name.to_ascii_lowercase();
    let stem = if lower.ends_with(CANONICAL_SUFFIX) {
        &name[..name.len() - CANONICAL_SUFFIX.len()]
    } else {
        REPLACEABLE_EXTENSIONS
            .iter()
            .find(|ext| lower.ends_with(*ext))
            .map(|ext| &name[..name.len() - ext.len()])
            .unwrap_or(name)
    };
    if stem.is_empty() {
        None
    } else {
        Some(format!("{stem}{CANONICAL_SUFFIX}"))
    }
}
