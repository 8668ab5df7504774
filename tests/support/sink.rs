use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mule::error::Result;
use mule::report::{ReportDocument, ReportSink};

/// Report sink that records every delivered document.
#[derive(Clone, Default)]
pub struct RecordingSink {
    documents: Arc<Mutex<Vec<ReportDocument>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().expect("lock sink documents").len()
    }

    pub fn documents(&self) -> Vec<ReportDocument> {
        self.documents.lock().expect("lock sink documents").clone()
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn post(&self, document: &ReportDocument) -> Result<()> {
        self.documents
            .lock()
            .expect("lock sink documents")
            .push(document.clone());
        Ok(())
    }
}
