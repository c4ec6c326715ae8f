#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use covers_engine::{
    EngineEvent, FailureKind, FetchError, FetchOutput, Fetcher, JobId, ProgressSink,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Fails every request and counts how many were attempted.
#[derive(Default)]
pub struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(
        &self,
        _job_id: JobId,
        url: &str,
        _sink: &dyn ProgressSink,
    ) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::new(FailureKind::Network, format!("offline: {url}")))
    }
}

pub fn gallery_html(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<a class="gallery" href="{href}"><img src="/thumb.jpg"></a>"#))
        .collect();
    format!(
        r#"<html><head><title>Covers</title></head><body><div class="covers-container">{items}</div></body></html>"#
    )
}
