//! Covers engine: page fetching, link extraction, persistence and downloads.
mod decode;
mod download;
mod fetch;
mod filename;
mod links;
mod persist;
mod pipeline;
mod store;
mod types;

pub use decode::{decode_page, DecodedPage};
pub use download::{DownloadReport, Downloader};
pub use fetch::{
    FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher, BROWSER_USER_AGENT,
};
pub use filename::cover_filename;
pub use links::{GalleryLinkExtractor, ParseError, DEFAULT_CONTAINER_SELECTOR, DEFAULT_ITEM_SELECTOR};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, RunSummary, DEFAULT_GALLERY_URL, DEFAULT_OUTPUT_DIR,
};
pub use store::{StoreError, UrlStore, DEFAULT_URL_STORE};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobId, JobOutcome,
    JobProgress, Stage, GALLERY_JOB_ID,
};
