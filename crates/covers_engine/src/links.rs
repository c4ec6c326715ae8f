use engine_logging::engine_warn;
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_CONTAINER_SELECTOR: &str = "div.covers-container";
pub const DEFAULT_ITEM_SELECTOR: &str = "a.gallery";
const IMAGE_SELECTOR: &str = "img";

/// The gallery markup itself always parses; only the selectors can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

/// Collects raw cover links from the gallery markup.
///
/// Links come from `href` of each gallery anchor, falling back to the `src` or
/// `data-src` of the first image inside it. Order and duplicates are preserved.
#[derive(Debug, Clone)]
pub struct GalleryLinkExtractor {
    container: Selector,
    item: Selector,
    image: Selector,
}

impl GalleryLinkExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Self::with_selectors(DEFAULT_CONTAINER_SELECTOR, DEFAULT_ITEM_SELECTOR)
    }

    pub fn with_selectors(container: &str, item: &str) -> Result<Self, ParseError> {
        Ok(Self {
            container: parse_selector(container)?,
            item: parse_selector(item)?,
            image: parse_selector(IMAGE_SELECTOR)?,
        })
    }

    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        match document.select(&self.container).next() {
            Some(container) => self.collect(container.select(&self.item)),
            None => {
                engine_warn!("Gallery container not found; scanning the whole page");
                self.collect(document.select(&self.item))
            }
        }
    }

    fn collect<'a>(&self, items: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
        items.filter_map(|item| self.link_for(item)).collect()
    }

    fn link_for(&self, item: ElementRef) -> Option<String> {
        usable(item.value().attr("href")).or_else(|| {
            let image = item.select(&self.image).next()?;
            usable(image.value().attr("src")).or_else(|| usable(image.value().attr("data-src")))
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|err| ParseError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn usable(reference: Option<&str>) -> Option<String> {
    let trimmed = reference?.trim();
    let lower = trimmed.to_ascii_lowercase();
    if trimmed.is_empty() || lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    Some(trimmed.to_string())
}
