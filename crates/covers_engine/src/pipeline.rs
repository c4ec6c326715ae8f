use std::io;
use std::path::PathBuf;

use covers_core::{CoverUrl, Normalizer, UrlSet, DEFAULT_SITE_BASE};
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

use crate::decode::decode_page;
use crate::download::{DownloadReport, Downloader};
use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::links::{
    GalleryLinkExtractor, ParseError, DEFAULT_CONTAINER_SELECTOR, DEFAULT_ITEM_SELECTOR,
};
use crate::persist::PersistError;
use crate::store::{StoreError, UrlStore, DEFAULT_URL_STORE};
use crate::{FailureKind, FetchError, GALLERY_JOB_ID};

pub const DEFAULT_GALLERY_URL: &str = "https://gameinformer.com/covers";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Scheme and host every cover URL is rewritten onto.
    pub site_base: String,
    pub gallery_url: String,
    /// CSS selectors for the gallery block and the cover anchors inside it.
    pub container_selector: String,
    pub item_selector: String,
    pub output_dir: PathBuf,
    pub url_store_path: PathBuf,
    /// Read `url_store_path` instead of scraping when it loads.
    pub reuse_url_store: bool,
    pub gallery_fetch: FetchSettings,
    pub image_fetch: FetchSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            site_base: DEFAULT_SITE_BASE.to_string(),
            gallery_url: DEFAULT_GALLERY_URL.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            url_store_path: PathBuf::from(DEFAULT_URL_STORE),
            reuse_url_store: false,
            gallery_fetch: FetchSettings::gallery(),
            image_fetch: FetchSettings::image(),
        }
    }
}

/// Conditions that end a run. Per-cover problems never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid site base {base:?}: {message}")]
    InvalidSiteBase { base: String, message: String },
    #[error("gallery page could not be fetched: {0}")]
    Fetch(#[from] FetchError),
    #[error("gallery page could not be parsed: {0}")]
    Parse(#[from] ParseError),
    #[error("url store: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    OutputDir(#[from] PersistError),
    #[error("could not start the async runtime: {0}")]
    Runtime(#[from] io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Raw links found on the page, or entries read back from the store.
    pub discovered: usize,
    pub unique: usize,
    pub skipped_normalization: usize,
    pub reused_store: bool,
    pub downloaded: usize,
    pub already_present: usize,
    pub failed: Vec<(CoverUrl, FailureKind)>,
}

/// Fetch page, extract links, normalize, save `urls.json`, download. Strictly in that order.
pub struct Pipeline {
    config: PipelineConfig,
    gallery_fetcher: Box<dyn Fetcher>,
    image_fetcher: Box<dyn Fetcher>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let gallery_fetcher = Box::new(ReqwestFetcher::new(config.gallery_fetch.clone()));
        let image_fetcher = Box::new(ReqwestFetcher::new(config.image_fetch.clone()));
        Self::with_fetchers(config, gallery_fetcher, image_fetcher)
    }

    pub fn with_fetchers(
        config: PipelineConfig,
        gallery_fetcher: Box<dyn Fetcher>,
        image_fetcher: Box<dyn Fetcher>,
    ) -> Self {
        Self {
            config,
            gallery_fetcher,
            image_fetcher,
        }
    }

    /// Drive [`Pipeline::run`] on a single-threaded runtime.
    pub fn run_blocking(&self, sink: &dyn ProgressSink) -> Result<RunSummary, PipelineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(sink))
    }

    pub async fn run(&self, sink: &dyn ProgressSink) -> Result<RunSummary, PipelineError> {
        let normalizer =
            Normalizer::new(&self.config.site_base).map_err(|err| PipelineError::InvalidSiteBase {
                base: self.config.site_base.clone(),
                message: err.to_string(),
            })?;
        let store = UrlStore::new(&self.config.url_store_path);

        let (raw, reused_store) = match self.stored_urls(&store) {
            Some(raw) => (raw, true),
            None => (self.scrape_gallery(sink).await?, false),
        };

        engine_info!("Normalizing {} URLs", raw.len());
        let batch = normalizer.normalize_all(raw.iter().map(String::as_str));
        for skipped in &batch.skipped {
            engine_warn!("Skipping {:?}: {}", skipped.raw, skipped.reason);
        }
        engine_info!("Found {} unique URLs after normalization", batch.urls.len());

        if !reused_store {
            let path = store.save(&batch.urls)?;
            engine_info!("Saved URLs to {:?}", path);
        }

        let report = self.download(&batch.urls, sink).await?;

        Ok(RunSummary {
            discovered: raw.len(),
            unique: batch.urls.len(),
            skipped_normalization: batch.skipped.len(),
            reused_store,
            downloaded: report.downloaded,
            already_present: report.already_present,
            failed: report.failed,
        })
    }

    async fn scrape_gallery(&self, sink: &dyn ProgressSink) -> Result<Vec<String>, PipelineError> {
        let extractor = GalleryLinkExtractor::with_selectors(
            &self.config.container_selector,
            &self.config.item_selector,
        )?;

        engine_info!("Fetching {}...", self.config.gallery_url);
        let output = self
            .gallery_fetcher
            .fetch(GALLERY_JOB_ID, &self.config.gallery_url, sink)
            .await?;
        let page = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        if page.had_errors {
            engine_warn!(
                "Gallery page had bytes invalid as {}; they were replaced",
                page.encoding_label
            );
        }

        let links = extractor.extract(&page.html);
        engine_info!("Found {} gallery links", links.len());
        Ok(links)
    }

    fn stored_urls(&self, store: &UrlStore) -> Option<Vec<String>> {
        if !self.config.reuse_url_store {
            return None;
        }
        if !store.exists() {
            engine_info!("No URL store at {:?}; scraping the gallery", store.path());
            return None;
        }
        match store.load() {
            Ok(urls) => {
                engine_info!("Reusing {} URLs from {:?}", urls.len(), store.path());
                Some(urls)
            }
            Err(err) => {
                engine_warn!("Ignoring URL store {:?}: {}", store.path(), err);
                None
            }
        }
    }

    async fn download(
        &self,
        urls: &UrlSet,
        sink: &dyn ProgressSink,
    ) -> Result<DownloadReport, PersistError> {
        engine_info!("Downloading images to {:?}...", self.config.output_dir);
        Downloader::new(self.image_fetcher.as_ref(), &self.config.output_dir)
            .download_all(urls, sink)
            .await
    }
}
