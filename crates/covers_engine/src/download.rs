use std::path::{Path, PathBuf};

use covers_core::{CoverUrl, UrlSet};
use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};

use crate::filename::cover_filename;
use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::{EngineEvent, FailureKind, Fetcher, JobId, JobOutcome, JobProgress, ProgressSink, Stage};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub already_present: usize,
    pub bytes_written: u64,
    pub failed: Vec<(CoverUrl, FailureKind)>,
}

/// Fetches covers one at a time into a flat output directory.
///
/// A file that already exists is never requested again; that is the only
/// record of earlier runs.
pub struct Downloader<'a> {
    fetcher: &'a dyn Fetcher,
    writer: AtomicFileWriter,
}

impl<'a> Downloader<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            writer: AtomicFileWriter::new(output_dir),
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Per-cover failures are collected in the report; only an unusable output
    /// directory stops the loop.
    pub async fn download_all(
        &self,
        urls: &UrlSet,
        sink: &dyn ProgressSink,
    ) -> Result<DownloadReport, PersistError> {
        ensure_output_dir(self.output_dir())?;

        let total = urls.len();
        let mut report = DownloadReport::default();
        for (index, url) in urls.iter().enumerate() {
            let job_id = index + 1;
            engine_info!("[{}/{}] {}", job_id, total, url);
            sink.emit(EngineEvent::Progress(JobProgress {
                job_id,
                stage: Stage::Queued,
                bytes: None,
            }));

            let result = self.download_one(job_id, url, sink).await;
            match &result {
                Ok(JobOutcome::Downloaded { bytes, .. }) => {
                    report.downloaded += 1;
                    report.bytes_written += bytes;
                }
                Ok(JobOutcome::AlreadyPresent { .. }) => report.already_present += 1,
                Err(kind) => report.failed.push((url.clone(), kind.clone())),
            }
            sink.emit(EngineEvent::JobCompleted {
                job_id,
                url: url.clone(),
                result,
            });
        }
        Ok(report)
    }

    async fn download_one(
        &self,
        job_id: JobId,
        url: &CoverUrl,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, FailureKind> {
        let Some(filename) = cover_filename(url) else {
            engine_warn!("No usable file name in {}", url);
            return Err(FailureKind::InvalidFileName);
        };
        let target = self.output_dir().join(&filename);
        if target.exists() {
            engine_info!("Skipping {} (already exists)", filename);
            return Ok(JobOutcome::AlreadyPresent { path: target });
        }

        engine_debug!("Downloading {}", filename);
        let output = self
            .fetcher
            .fetch(job_id, url.as_str(), sink)
            .await
            .map_err(|err| {
                engine_warn!("Error downloading {}: {}", url, err);
                err.kind
            })?;

        let bytes = output.bytes.len() as u64;
        engine_trace!(
            "Fetched {} from {} after {} redirect(s)",
            filename,
            output.metadata.final_url,
            output.metadata.redirect_count
        );
        sink.emit(EngineEvent::Progress(JobProgress {
            job_id,
            stage: Stage::Writing,
            bytes: Some(bytes),
        }));
        let path = self.writer.write(&filename, &output.bytes).map_err(|err| {
            engine_warn!("Error writing {:?}: {}", target, err);
            FailureKind::Persist(err.to_string())
        })?;
        sink.emit(EngineEvent::Progress(JobProgress {
            job_id,
            stage: Stage::Done,
            bytes: Some(bytes),
        }));
        engine_info!("Downloaded {} ({} bytes)", filename, bytes);
        Ok(JobOutcome::Downloaded { path, bytes })
    }
}
