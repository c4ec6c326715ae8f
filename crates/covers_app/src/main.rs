//! `download_covers`: scrape the cover gallery and fetch every cover not yet on disk.
mod config;
mod logging;
mod progress;

use std::path::Path;

use anyhow::Context;
use covers_engine::Pipeline;
use engine_logging::{engine_error, engine_info, engine_warn};

use crate::config::{FileConfig, CONFIG_FILENAME};
use crate::progress::LogProgressSink;

fn main() -> anyhow::Result<()> {
    let loaded = config::load(Path::new(CONFIG_FILENAME));
    let file_config: FileConfig = loaded.as_ref().ok().cloned().flatten().unwrap_or_default();
    logging::initialize(file_config.log_destination(), file_config.level_filter());

    match &loaded {
        Ok(Some(_)) => engine_info!("Loaded settings from {}", CONFIG_FILENAME),
        Ok(None) => {}
        Err(err) => engine_warn!("Ignoring settings file: {}", err),
    }

    let pipeline = Pipeline::new(file_config.into_pipeline_config());
    let summary = pipeline
        .run_blocking(&LogProgressSink)
        .inspect_err(|err| engine_error!("Run aborted: {}", err))
        .context("cover download aborted")?;

    for (url, kind) in &summary.failed {
        engine_warn!("Not downloaded: {} ({})", url, kind);
    }
    engine_info!(
        "Done! Downloaded {} new images, skipped {} existing images, {} failed.",
        summary.downloaded,
        summary.already_present,
        summary.failed.len()
    );
    Ok(())
}
