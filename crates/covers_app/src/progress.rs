use covers_engine::{EngineEvent, JobOutcome, JobProgress, ProgressSink};
use engine_logging::{engine_debug, engine_trace};

/// Mirrors engine progress into the log at debug/trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::Progress(JobProgress {
                job_id,
                stage,
                bytes,
            }) => {
                engine_trace!("job {} {:?} bytes={:?}", job_id, stage, bytes);
            }
            EngineEvent::JobCompleted { job_id, url, result } => match result {
                Ok(JobOutcome::Downloaded { path, bytes }) => {
                    engine_debug!("job {} saved {} bytes to {:?}", job_id, bytes, path);
                }
                Ok(JobOutcome::AlreadyPresent { path }) => {
                    engine_debug!("job {} kept existing {:?}", job_id, path);
                }
                Err(kind) => {
                    engine_debug!("job {} failed for {}: {}", job_id, url, kind);
                }
            },
        }
    }
}
